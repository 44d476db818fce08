// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for placement evaluation.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! [`PopupStore::evaluate_traced`](crate::popup::PopupStore::evaluate_traced)
//! calls as it works. All method bodies default to no-ops, so implementing
//! only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates per-popup [`MeasurementEvent`]s.

use kurbo::{Point, Vec2};

use crate::placement::{Placement, PlacementMode};
use crate::presentation::{ContentId, InputEvent, PresentationTransition};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Known placement imprecisions worth surfacing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// Placed before the overlay was measured; the render offset ignores the
    /// overlay's size until the next evaluation.
    UnmeasuredOverlay,
    /// Rect-anchored popup presented before its own origin was measured;
    /// this frame uses the rect's origin and is off by the coordinate-space
    /// difference.
    OwnOriginUnmeasured,
}

/// Which measurement the host reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeasurementKind {
    /// Abstract anchor bounds.
    AnchorBounds,
    /// Measured absolute anchor frame.
    AnchorFrame,
    /// Overlay content size.
    OverlaySize,
    /// Overlay's own anchor origin.
    OverlayOrigin,
}

/// What the store did with a measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeasurementOutcome {
    /// Stored and marked dirty.
    Applied,
    /// Identical to the stored value; nothing marked.
    Unchanged,
    /// Overlay measurement for a hidden popup; dropped.
    DiscardedHidden,
    /// Non-finite coordinate or extent; dropped.
    DiscardedNonFinite,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a popup's placement changes.
#[derive(Clone, Copy, Debug)]
pub struct PlacementEvent {
    /// Slot index of the popup.
    pub popup: u32,
    /// Layout position of the popup's center.
    pub position: Point,
    /// Translation applied after positioning.
    pub render_offset: Vec2,
    /// Formula used.
    pub mode: PlacementMode,
}

impl PlacementEvent {
    /// Creates an event for `placement` of the popup in slot `popup`.
    #[must_use]
    pub fn new(popup: u32, placement: &Placement) -> Self {
        Self {
            popup,
            position: placement.position,
            render_offset: placement.render_offset,
            mode: placement.mode,
        }
    }
}

/// Emitted for each presentation transition applied since the previous
/// evaluation.
#[derive(Clone, Copy, Debug)]
pub struct PresentationEvent {
    /// Slot index of the popup.
    pub popup: u32,
    /// The transition.
    pub transition: PresentationTransition,
    /// Input that caused a dismissal, or `None` when the caller changed the
    /// binding itself.
    pub trigger: Option<InputEvent>,
}

impl PresentationEvent {
    /// Identity of the content after the transition.
    #[must_use]
    pub fn content(&self) -> Option<ContentId> {
        self.transition.target().content()
    }
}

/// Emitted when a placement is known to be imprecise.
#[derive(Clone, Copy, Debug)]
pub struct PlacementWarning {
    /// Slot index of the popup.
    pub popup: u32,
    /// What is wrong.
    pub kind: WarningKind,
}

/// Per-evaluation summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvaluateSummary {
    /// Monotonic evaluation counter.
    pub pass: u64,
    /// Live popups in the store.
    pub live: u32,
    /// Popups whose placement was recomputed.
    pub recomputed: u32,
    /// Popups whose placement actually changed.
    pub moved: u32,
}

/// A measurement reported by the host.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeasurementEvent {
    /// Slot index of the popup.
    pub popup: u32,
    /// Which measurement.
    pub kind: MeasurementKind,
    /// What the store did with it.
    pub outcome: MeasurementOutcome,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from placement evaluation.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a popup's placement changes.
    fn on_placement(&mut self, e: &PlacementEvent) {
        _ = e;
    }

    /// Called for each presentation transition.
    fn on_presentation(&mut self, e: &PresentationEvent) {
        _ = e;
    }

    /// Called when a placement is known to be imprecise.
    fn on_warning(&mut self, w: &PlacementWarning) {
        _ = w;
    }

    /// Called once at the end of each evaluation.
    fn on_summary(&mut self, s: &EvaluateSummary) {
        _ = s;
    }

    /// Called with the measurements received since the previous evaluation
    /// (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_measurements(&mut self, pass: u64, measurements: &[MeasurementEvent]) {
        _ = (pass, measurements);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PlacementEvent`].
    #[inline]
    pub fn placement(&mut self, e: &PlacementEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_placement(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PresentationEvent`].
    #[inline]
    pub fn presentation(&mut self, e: &PresentationEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_presentation(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PlacementWarning`].
    #[inline]
    pub fn warning(&mut self, w: &PlacementWarning) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_warning(w);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = w;
        }
    }

    /// Emits an [`EvaluateSummary`].
    #[inline]
    pub fn summary(&mut self, s: &EvaluateSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits measurement records (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn measurements(&mut self, pass: u64, measurements: &[MeasurementEvent]) {
        if let Some(s) = &mut self.sink {
            s.on_measurements(pass, measurements);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_placement() -> Placement {
        Placement {
            position: Point::new(120.0, 70.0),
            render_offset: Vec2::new(0.0, 27.0),
            mode: PlacementMode::Anchored,
        }
    }

    #[test]
    fn placement_event_copies_fields() {
        let evt = PlacementEvent::new(3, &sample_placement());
        assert_eq!(evt.popup, 3);
        assert_eq!(evt.position, Point::new(120.0, 70.0));
        assert_eq!(evt.render_offset, Vec2::new(0.0, 27.0));
        assert_eq!(evt.mode, PlacementMode::Anchored);
    }

    #[test]
    fn presentation_event_content_follows_target() {
        let evt = PresentationEvent {
            popup: 0,
            transition: PresentationTransition::Replaced {
                from: Some(ContentId(1)),
                to: Some(ContentId(2)),
            },
            trigger: None,
        };
        assert_eq!(evt.content(), Some(ContentId(2)));

        let dismissed = PresentationEvent {
            popup: 0,
            transition: PresentationTransition::Dismissed,
            trigger: Some(InputEvent::Escape),
        };
        assert_eq!(dismissed.content(), None);
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_placement(&PlacementEvent::new(0, &sample_placement()));
        sink.on_warning(&PlacementWarning {
            popup: 0,
            kind: WarningKind::UnmeasuredOverlay,
        });
        sink.on_summary(&EvaluateSummary::default());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.placement(&PlacementEvent::new(0, &sample_placement()));
        tracer.summary(&EvaluateSummary::default());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            popups: Vec<u32>,
        }
        impl TraceSink for RecordingSink {
            fn on_placement(&mut self, e: &PlacementEvent) {
                self.popups.push(e.popup);
            }
        }

        let mut sink = RecordingSink { popups: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.placement(&PlacementEvent::new(9, &sample_placement()));
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.popups, &[9]);
    }
}
