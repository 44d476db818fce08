// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event it
//! receives, in arrival order, as a [`RecordedEvent`]. Recordings can be
//! replayed into another sink or exported with [`export_json`](RecorderSink::export_json).

use std::io::{self, Write};

use perch_core::trace::{
    EvaluateSummary, MeasurementEvent, PlacementEvent, PlacementWarning, PresentationEvent,
    TraceSink,
};

/// A single recorded trace event.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`PlacementEvent`].
    Placement(PlacementEvent),
    /// A [`PresentationEvent`].
    Presentation(PresentationEvent),
    /// A [`PlacementWarning`].
    Warning(PlacementWarning),
    /// An [`EvaluateSummary`].
    Summary(EvaluateSummary),
    /// Measurements delivered before evaluation `pass`.
    Measurements {
        /// Evaluation counter.
        pass: u64,
        /// The measurements, in arrival order.
        events: Vec<MeasurementEvent>,
    },
}

/// A [`TraceSink`] that keeps events in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Feeds every recorded event, in order, to `sink`.
    pub fn replay(&self, sink: &mut dyn TraceSink) {
        for event in &self.events {
            match event {
                RecordedEvent::Placement(e) => sink.on_placement(e),
                RecordedEvent::Presentation(e) => sink.on_presentation(e),
                RecordedEvent::Warning(w) => sink.on_warning(w),
                RecordedEvent::Summary(s) => sink.on_summary(s),
                RecordedEvent::Measurements { pass, events } => sink.on_measurements(*pass, events),
            }
        }
    }

    /// Writes the recording as a JSON array to `writer`.
    ///
    /// See [`json::export`](crate::json::export) for the format.
    pub fn export_json(&self, writer: &mut dyn Write) -> io::Result<()> {
        crate::json::export(&self.events, writer)
    }
}

impl TraceSink for RecorderSink {
    fn on_placement(&mut self, e: &PlacementEvent) {
        self.events.push(RecordedEvent::Placement(*e));
    }

    fn on_presentation(&mut self, e: &PresentationEvent) {
        self.events.push(RecordedEvent::Presentation(*e));
    }

    fn on_warning(&mut self, w: &PlacementWarning) {
        self.events.push(RecordedEvent::Warning(*w));
    }

    fn on_summary(&mut self, s: &EvaluateSummary) {
        self.events.push(RecordedEvent::Summary(*s));
    }

    fn on_measurements(&mut self, pass: u64, measurements: &[MeasurementEvent]) {
        if measurements.is_empty() {
            return;
        }
        self.events.push(RecordedEvent::Measurements {
            pass,
            events: measurements.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Size};
    use perch_core::anchor::AttachmentEdge;
    use perch_core::config::PopupConfig;
    use perch_core::popup::{PlacementChanges, PopupStore};
    use perch_core::presentation::{InputEvent, PresentationTransition};
    use perch_core::trace::{MeasurementOutcome, Tracer, WarningKind};

    #[test]
    fn records_a_full_presentation() {
        let mut store = PopupStore::new();
        let id = store.create_popup(PopupConfig::DEFAULT.with_edge(AttachmentEdge::Bottom));
        let mut presented = true;
        store.sync_presentation(id, &presented);
        store.set_anchor_frame(id, Rect::from_origin_size((100.0, 50.0), (40.0, 20.0)));

        let mut rec = RecorderSink::new();
        let mut changes = PlacementChanges::default();
        store.evaluate_traced(&mut changes, &mut Tracer::new(&mut rec));

        let events = rec.events();
        assert!(matches!(
            events[0],
            RecordedEvent::Measurements { pass: 1, ref events } if events.len() == 1
        ));
        assert!(matches!(
            events[1],
            RecordedEvent::Presentation(PresentationEvent {
                transition: PresentationTransition::Presented(None),
                trigger: None,
                ..
            })
        ));
        assert!(events.iter().any(|e| matches!(
            e,
            RecordedEvent::Warning(PlacementWarning {
                kind: WarningKind::UnmeasuredOverlay,
                ..
            })
        )));
        assert!(matches!(
            events.last(),
            Some(RecordedEvent::Summary(EvaluateSummary { pass: 1, moved: 1, .. }))
        ));

        rec.clear();
        store.set_overlay_size(id, Size::new(60.0, 30.0));
        store.dispatch(id, &[InputEvent::Escape], &mut presented);
        store.set_overlay_size(id, Size::new(60.0, 30.0));
        store.evaluate_traced(&mut changes, &mut Tracer::new(&mut rec));

        let RecordedEvent::Measurements { events, .. } = &rec.events()[0] else {
            panic!("expected measurements first, got {:?}", rec.events()[0]);
        };
        assert_eq!(events[0].outcome, MeasurementOutcome::Applied);
        assert_eq!(events[1].outcome, MeasurementOutcome::DiscardedHidden);
        assert!(rec.events().iter().any(|e| matches!(
            e,
            RecordedEvent::Presentation(PresentationEvent {
                transition: PresentationTransition::Dismissed,
                trigger: Some(InputEvent::Escape),
                ..
            })
        )));
    }

    #[test]
    fn replay_reproduces_events() {
        let mut store = PopupStore::new();
        let id = store.create_popup(PopupConfig::DEFAULT);
        store.sync_presentation(id, &true);

        let mut rec = RecorderSink::new();
        let mut changes = PlacementChanges::default();
        store.evaluate_traced(&mut changes, &mut Tracer::new(&mut rec));

        let mut copy = RecorderSink::new();
        rec.replay(&mut copy);
        assert_eq!(copy.events().len(), rec.events().len());
    }
}
