// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement evaluation and change tracking.
//!
//! Evaluation is the explicit "recompute layout" step. Hosts call it once per
//! frame, after delivering measurements and input:
//!
//! 1. **Transitions** — Presentation transitions queued since the previous
//!    evaluation are reported, in the order they were applied.
//! 2. **Drain** — All four dirty channels are drained and merged. A popup
//!    that appears in any of them is recomputed once.
//! 3. **Place** — Each recomputed popup that is still shown gets a fresh
//!    [`place`](crate::placement::place) result; hidden popups lose theirs.
//!    Only popups whose placement actually changed are listed as moved.
//!
//! [`PlacementChanges`] uses raw slot indices (`u32`) rather than
//! [`PopupId`](super::PopupId) handles so that hosts can read results via the
//! `*_at()` accessors (e.g.
//! [`placement_at`](super::PopupStore::placement_at)) without paying for
//! generation checks on every access.

use alloc::vec::Vec;

use crate::anchor::AttachmentAnchor;
use crate::dirty;
use crate::placement::place;
use crate::presentation::PresentationTransition;
use crate::trace::{
    EvaluateSummary, PlacementEvent, PlacementWarning, PresentationEvent, Tracer, WarningKind,
};

use super::store::PopupStore;

/// The set of changes produced by a single [`PopupStore::evaluate`] call.
///
/// Each field contains the raw slot indices of popups that changed in the
/// corresponding category. Hosts use these to apply incremental updates.
#[derive(Clone, Debug, Default)]
pub struct PlacementChanges {
    /// Popups whose placement changed.
    pub moved: Vec<u32>,
    /// Popups that went from hidden to shown.
    pub presented: Vec<u32>,
    /// Popups whose content identity changed while shown.
    pub replaced: Vec<u32>,
    /// Popups that went from shown to hidden.
    pub dismissed: Vec<u32>,
    /// Popups mounted since the last evaluate.
    pub added: Vec<u32>,
    /// Popups unmounted since the last evaluate.
    pub removed: Vec<u32>,
}

impl PlacementChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.moved.clear();
        self.presented.clear();
        self.replaced.clear();
        self.dismissed.clear();
        self.added.clear();
        self.removed.clear();
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moved.is_empty()
            && self.presented.is_empty()
            && self.replaced.is_empty()
            && self.dismissed.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
    }
}

impl PopupStore {
    /// Recomputes dirty placements and returns the set of changes.
    pub fn evaluate(&mut self) -> PlacementChanges {
        let mut changes = PlacementChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut PlacementChanges) {
        self.evaluate_traced(changes, &mut Tracer::none());
    }

    /// Like [`evaluate_into`](Self::evaluate_into), reporting what happened
    /// to `tracer`.
    pub fn evaluate_traced(&mut self, changes: &mut PlacementChanges, tracer: &mut Tracer<'_>) {
        changes.clear();
        self.pass += 1;

        #[cfg(feature = "trace-rich")]
        {
            tracer.measurements(self.pass, &self.pending_measurements);
            self.pending_measurements.clear();
        }

        for pending in self.pending_transitions.drain(..) {
            match pending.transition {
                PresentationTransition::Presented(_) => changes.presented.push(pending.idx),
                PresentationTransition::Replaced { .. } => changes.replaced.push(pending.idx),
                PresentationTransition::Dismissed => changes.dismissed.push(pending.idx),
            }
            tracer.presentation(&PresentationEvent {
                popup: pending.idx,
                transition: pending.transition,
                trigger: pending.trigger,
            });
        }

        let mut affected: Vec<u32> = Vec::new();
        for channel in [dirty::ANCHOR, dirty::OVERLAY, dirty::CONFIG, dirty::PRESENTATION] {
            affected.extend(self.dirty.drain(channel).deterministic().run());
        }
        affected.sort_unstable();
        affected.dedup();

        let mut recomputed = 0_u32;
        for &idx in &affected {
            if !self.is_live_slot(idx) {
                continue;
            }
            let i = idx as usize;
            if !self.observed[i].is_shown() {
                self.placement[i] = None;
                continue;
            }

            let config = &self.config[i];
            let cache = &self.cache[i];
            let placement = place(config, cache);
            recomputed += 1;

            if !cache.overlay_measured() {
                tracer.warning(&PlacementWarning {
                    popup: idx,
                    kind: WarningKind::UnmeasuredOverlay,
                });
            }
            if matches!(config.attachment_anchor, AttachmentAnchor::Rect(_))
                && cache.overlay_origin.is_none()
                && changes.presented.contains(&idx)
            {
                tracer.warning(&PlacementWarning {
                    popup: idx,
                    kind: WarningKind::OwnOriginUnmeasured,
                });
            }

            if self.placement[i] != Some(placement) {
                self.placement[i] = Some(placement);
                changes.moved.push(idx);
                tracer.placement(&PlacementEvent::new(idx, &placement));
            }
        }

        // Move lifecycle lists.
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);

        tracer.summary(&EvaluateSummary {
            pass: self.pass,
            live: u32::try_from(self.live_count()).unwrap_or(u32::MAX),
            recomputed,
            moved: u32::try_from(changes.moved.len()).unwrap_or(u32::MAX),
        });
    }
}
