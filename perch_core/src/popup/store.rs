// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays popup storage with allocation, measurement, and
//! presentation management.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use understory_dirty::{CycleHandling, DirtyTracker};

use crate::alignment::Alignment;
use crate::anchor::{AttachmentAnchor, AttachmentEdge};
use crate::config::PopupConfig;
use crate::dirty;
use crate::host::DismissControl;
use crate::placement::{GeometryCache, Placement};
use crate::presentation::{
    InputEvent, PresentationBinding, PresentationState, PresentationTransition,
};
#[cfg(feature = "trace-rich")]
use crate::trace::MeasurementEvent;
use crate::trace::{MeasurementKind, MeasurementOutcome};

use super::id::PopupId;

/// A presentation transition waiting to be reported by the next evaluation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PendingTransition {
    pub(crate) idx: u32,
    pub(crate) transition: PresentationTransition,
    pub(crate) trigger: Option<InputEvent>,
}

/// Struct-of-arrays storage for all mounted popups.
///
/// Popups are addressed by [`PopupId`] handles. Each popup owns its slot in
/// the parallel arrays; no state is shared between popups. Destroyed popups
/// are recycled via a free list, and generation counters prevent stale
/// handle access.
#[derive(Debug)]
pub struct PopupStore {
    // -- Caller-supplied configuration --
    pub(crate) config: Vec<PopupConfig>,

    // -- Host measurements --
    pub(crate) cache: Vec<GeometryCache>,

    // -- Presentation (last state observed from the caller's binding) --
    pub(crate) observed: Vec<PresentationState>,

    // -- Computed (written by evaluate) --
    pub(crate) placement: Vec<Option<Placement>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
    pub(crate) pending_transitions: Vec<PendingTransition>,
    #[cfg(feature = "trace-rich")]
    pub(crate) pending_measurements: Vec<MeasurementEvent>,

    pub(crate) pass: u64,
}

impl Default for PopupStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PopupStore {
    /// Creates an empty popup store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Vec::new(),
            cache: Vec::new(),
            observed: Vec::new(),
            placement: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
            pending_transitions: Vec::new(),
            #[cfg(feature = "trace-rich")]
            pending_measurements: Vec::new(),
            pass: 0,
        }
    }

    // -- Allocation API --

    /// Mounts a popup and returns its handle.
    ///
    /// The popup starts hidden with an empty geometry cache. Non-finite
    /// numbers in `config` are zeroed (see [`PopupConfig::sanitized`]).
    pub fn create_popup(&mut self, config: PopupConfig) -> PopupId {
        let config = config.sanitized();
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.config[idx as usize] = config;
            self.cache[idx as usize] = GeometryCache::default();
            self.observed[idx as usize] = PresentationState::Hidden;
            self.placement[idx as usize] = None;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.config.push(config);
            self.cache.push(GeometryCache::default());
            self.observed.push(PresentationState::Hidden);
            self.placement.push(None);
            self.generation.push(0);
            idx
        };

        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::CONFIG);

        PopupId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Unmounts a popup, freeing its slot for reuse.
    ///
    /// Measurements and transitions still pending for the popup are dropped.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_popup(&mut self, id: PopupId) {
        self.validate(id);
        let idx = id.idx;

        self.dirty.remove_key(idx);
        self.pending_transitions.retain(|t| t.idx != idx);
        #[cfg(feature = "trace-rich")]
        self.pending_measurements.retain(|m| m.popup != idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.placement[idx as usize] = None;

        self.free_list.push(idx);
        self.pending_removed.push(idx);
    }

    /// Returns whether the given handle refers to a mounted popup.
    #[must_use]
    pub fn is_alive(&self, id: PopupId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Number of mounted popups.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the configuration of a popup.
    #[must_use]
    pub fn config(&self, id: PopupId) -> PopupConfig {
        self.validate(id);
        self.config[id.idx as usize]
    }

    /// Returns everything measured for a popup so far.
    #[must_use]
    pub fn geometry(&self, id: PopupId) -> GeometryCache {
        self.validate(id);
        self.cache[id.idx as usize]
    }

    /// Returns the last presentation state observed for a popup.
    #[must_use]
    pub fn presentation(&self, id: PopupId) -> PresentationState {
        self.validate(id);
        self.observed[id.idx as usize]
    }

    /// Returns the computed placement of a popup.
    ///
    /// `None` while hidden, and until [`evaluate`](Self::evaluate) has run
    /// once after presentation.
    #[must_use]
    pub fn placement(&self, id: PopupId) -> Option<Placement> {
        self.validate(id);
        self.placement[id.idx as usize]
    }

    /// Returns the hidden escape-bound control for a shown popup.
    #[must_use]
    pub fn dismiss_control(&self, id: PopupId) -> Option<DismissControl> {
        self.validate(id);
        let idx = id.idx as usize;
        if !self.observed[idx].is_shown() {
            return None;
        }
        let at = self.placement[idx].map_or(Point::ORIGIN, |p| p.rendered_center());
        Some(DismissControl {
            popup: id,
            frame: Rect::from_origin_size(at, Size::ZERO),
        })
    }

    // -- Configuration API (auto-marks dirty) --

    /// Replaces the configuration of a popup.
    ///
    /// Non-finite numbers in `config` are zeroed before comparing, so a
    /// repeated `NaN` offset marks nothing.
    pub fn set_config(&mut self, id: PopupId, config: PopupConfig) {
        self.validate(id);
        let config = config.sanitized();
        if self.config[id.idx as usize] != config {
            self.config[id.idx as usize] = config;
            self.dirty.mark(id.idx, dirty::CONFIG);
        }
    }

    /// Sets what the popup hangs from.
    pub fn set_attachment_anchor(&mut self, id: PopupId, anchor: AttachmentAnchor) {
        let config = self.config(id).with_anchor(anchor);
        self.set_config(id, config);
    }

    /// Sets the anchor edge the popup attaches to.
    pub fn set_attachment_edge(&mut self, id: PopupId, edge: AttachmentEdge) {
        let config = self.config(id).with_edge(edge);
        self.set_config(id, config);
    }

    /// Sets the constant gap between anchor and popup.
    pub fn set_edge_offset(&mut self, id: PopupId, edge_offset: f64) {
        let config = self.config(id).with_edge_offset(edge_offset);
        self.set_config(id, config);
    }

    /// Sets or clears the explicit alignment.
    pub fn set_alignment(&mut self, id: PopupId, alignment: Option<Alignment>) {
        let config = self.config(id).with_alignment(alignment);
        self.set_config(id, config);
    }

    /// Enables or disables tap-outside dismissal.
    pub fn set_tap_outside_to_dismiss(&mut self, id: PopupId, enabled: bool) {
        let config = self.config(id).with_tap_outside_to_dismiss(enabled);
        self.set_config(id, config);
    }

    // -- Measurement API (auto-marks dirty) --
    //
    // Hosts may repeat a notification; an unchanged value marks nothing.
    // Non-finite values are dropped before they reach the cache. Overlay
    // measurements for hidden popups are late callbacks from a previous
    // presentation and are dropped too.

    /// Records the abstract anchor bounds of a popup's anchor element.
    pub fn set_anchor_bounds(&mut self, id: PopupId, bounds: Rect) -> MeasurementOutcome {
        self.validate(id);
        let anchor = &mut self.cache[id.idx as usize].anchor;
        let outcome = if !bounds.is_finite() {
            MeasurementOutcome::DiscardedNonFinite
        } else if anchor.bounds == Some(bounds) {
            MeasurementOutcome::Unchanged
        } else {
            anchor.bounds = Some(bounds);
            self.dirty.mark(id.idx, dirty::ANCHOR);
            MeasurementOutcome::Applied
        };
        self.note_measurement(id.idx, MeasurementKind::AnchorBounds, outcome);
        outcome
    }

    /// Records the measured absolute frame of a popup's anchor element.
    pub fn set_anchor_frame(&mut self, id: PopupId, frame: Rect) -> MeasurementOutcome {
        self.validate(id);
        let anchor = &mut self.cache[id.idx as usize].anchor;
        let outcome = if !frame.is_finite() {
            MeasurementOutcome::DiscardedNonFinite
        } else if anchor.frame == Some(frame) {
            MeasurementOutcome::Unchanged
        } else {
            anchor.frame = Some(frame);
            self.dirty.mark(id.idx, dirty::ANCHOR);
            MeasurementOutcome::Applied
        };
        self.note_measurement(id.idx, MeasurementKind::AnchorFrame, outcome);
        outcome
    }

    /// Records the measured size of a popup's overlay content.
    pub fn set_overlay_size(&mut self, id: PopupId, size: Size) -> MeasurementOutcome {
        self.validate(id);
        let idx = id.idx as usize;
        let outcome = if !size.is_finite() {
            MeasurementOutcome::DiscardedNonFinite
        } else if !self.observed[idx].is_shown() {
            MeasurementOutcome::DiscardedHidden
        } else if self.cache[idx].overlay_size == Some(size) {
            MeasurementOutcome::Unchanged
        } else {
            self.cache[idx].overlay_size = Some(size);
            self.dirty.mark(id.idx, dirty::OVERLAY);
            MeasurementOutcome::Applied
        };
        self.note_measurement(id.idx, MeasurementKind::OverlaySize, outcome);
        outcome
    }

    /// Records the overlay's own absolute anchor origin, enabling
    /// own-measured placement for rect-anchored popups.
    pub fn set_overlay_origin(&mut self, id: PopupId, origin: Point) -> MeasurementOutcome {
        self.validate(id);
        let idx = id.idx as usize;
        let outcome = if !origin.is_finite() {
            MeasurementOutcome::DiscardedNonFinite
        } else if !self.observed[idx].is_shown() {
            MeasurementOutcome::DiscardedHidden
        } else if self.cache[idx].overlay_origin == Some(origin) {
            MeasurementOutcome::Unchanged
        } else {
            self.cache[idx].overlay_origin = Some(origin);
            self.dirty.mark(id.idx, dirty::OVERLAY);
            MeasurementOutcome::Applied
        };
        self.note_measurement(id.idx, MeasurementKind::OverlayOrigin, outcome);
        outcome
    }

    // -- Presentation API --

    /// Reads the caller's binding and applies any change since it was last
    /// observed.
    ///
    /// Presenting, replacing, and hiding all invalidate the overlay side of
    /// the geometry cache: the old overlay's size says nothing about the new
    /// content.
    pub fn sync_presentation<B: PresentationBinding + ?Sized>(
        &mut self,
        id: PopupId,
        binding: &B,
    ) -> Option<PresentationTransition> {
        self.validate(id);
        let transition =
            PresentationTransition::between(self.observed[id.idx as usize], binding.state())?;
        self.apply_transition(id.idx, transition, None);
        Some(transition)
    }

    // -- Raw-index accessors for hosts --
    //
    // These accept raw slot indices (as found in `PlacementChanges`) rather
    // than `PopupId` handles, skipping generation validation. Only use with
    // indices that came from `PlacementChanges`.

    /// Returns the computed placement at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn placement_at(&self, idx: u32) -> Option<Placement> {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.placement[idx as usize]
    }

    /// Returns the measured overlay size at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn overlay_size_at(&self, idx: u32) -> Option<Size> {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.cache[idx as usize].overlay_size
    }

    /// Returns the observed presentation state at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn presentation_at(&self, idx: u32) -> PresentationState {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.observed[idx as usize]
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: PopupId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale PopupId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Whether slot `idx` currently holds a mounted popup.
    pub(crate) fn is_live_slot(&self, idx: u32) -> bool {
        idx < self.len && !self.free_list.contains(&idx)
    }

    /// Moves slot `idx` to the transition's target state and queues it for
    /// the next evaluation.
    pub(crate) fn apply_transition(
        &mut self,
        idx: u32,
        transition: PresentationTransition,
        trigger: Option<InputEvent>,
    ) {
        let i = idx as usize;
        self.observed[i] = transition.target();
        self.cache[i].invalidate_overlay();
        match transition {
            PresentationTransition::Presented(_) => {}
            PresentationTransition::Replaced { .. } => {
                self.dirty.mark(idx, dirty::OVERLAY);
            }
            PresentationTransition::Dismissed => {
                self.placement[i] = None;
            }
        }
        self.dirty.mark(idx, dirty::PRESENTATION);
        self.pending_transitions.push(PendingTransition {
            idx,
            transition,
            trigger,
        });
    }

    #[inline]
    fn note_measurement(&mut self, idx: u32, kind: MeasurementKind, outcome: MeasurementOutcome) {
        #[cfg(feature = "trace-rich")]
        self.pending_measurements.push(MeasurementEvent {
            popup: idx,
            kind,
            outcome,
        });
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = (idx, kind, outcome);
        }
    }
}
