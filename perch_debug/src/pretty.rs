// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use perch_core::presentation::{ContentId, InputEvent, PresentationTransition};
use perch_core::trace::{
    EvaluateSummary, MeasurementEvent, MeasurementOutcome, PlacementEvent, PlacementWarning,
    PresentationEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn trigger_name(trigger: Option<InputEvent>) -> &'static str {
    match trigger {
        Some(InputEvent::OutsideInteraction) => "outside",
        Some(InputEvent::Escape) => "escape",
        None => "binding",
    }
}

fn content_label(content: Option<ContentId>) -> String {
    content.map_or_else(|| "-".to_owned(), |c| format!("#{}", c.0))
}

fn outcome_name(outcome: MeasurementOutcome) -> &'static str {
    match outcome {
        MeasurementOutcome::Applied => "applied",
        MeasurementOutcome::Unchanged => "unchanged",
        MeasurementOutcome::DiscardedHidden => "discarded",
        MeasurementOutcome::DiscardedNonFinite => "non-finite",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_placement(&mut self, e: &PlacementEvent) {
        let _ = writeln!(
            self.writer,
            "[place] popup={} position=({:.1}, {:.1}) offset=({:.1}, {:.1}) mode={:?}",
            e.popup, e.position.x, e.position.y, e.render_offset.x, e.render_offset.y, e.mode,
        );
    }

    fn on_presentation(&mut self, e: &PresentationEvent) {
        let by = trigger_name(e.trigger);
        let _ = match e.transition {
            PresentationTransition::Presented(content) => writeln!(
                self.writer,
                "[present] popup={} shown content={} by={by}",
                e.popup,
                content_label(content),
            ),
            PresentationTransition::Replaced { from, to } => writeln!(
                self.writer,
                "[present] popup={} replaced {} -> {} by={by}",
                e.popup,
                content_label(from),
                content_label(to),
            ),
            PresentationTransition::Dismissed => writeln!(
                self.writer,
                "[present] popup={} dismissed by={by}",
                e.popup,
            ),
        };
    }

    fn on_warning(&mut self, w: &PlacementWarning) {
        let _ = writeln!(self.writer, "[warn] popup={} {:?}", w.popup, w.kind);
    }

    fn on_summary(&mut self, s: &EvaluateSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] pass={} live={} recomputed={} moved={}",
            s.pass, s.live, s.recomputed, s.moved,
        );
    }

    fn on_measurements(&mut self, pass: u64, measurements: &[MeasurementEvent]) {
        for m in measurements {
            let _ = writeln!(
                self.writer,
                "[measure] pass={pass} popup={} {:?} {}",
                m.popup,
                m.kind,
                outcome_name(m.outcome),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Vec2};
    use perch_core::placement::PlacementMode;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_writer()).unwrap()
    }

    #[test]
    fn pretty_print_placement() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_placement(&PlacementEvent {
            popup: 3,
            position: Point::new(120.0, 70.0),
            render_offset: Vec2::new(0.0, 27.0),
            mode: PlacementMode::Anchored,
        });
        let output = output(sink);
        assert!(output.starts_with("[place]"), "got: {output}");
        assert!(output.contains("popup=3"), "got: {output}");
        assert!(output.contains("offset=(0.0, 27.0)"), "got: {output}");
    }

    #[test]
    fn pretty_print_dismissal_names_trigger() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_presentation(&PresentationEvent {
            popup: 0,
            transition: PresentationTransition::Dismissed,
            trigger: Some(InputEvent::Escape),
        });
        sink.on_presentation(&PresentationEvent {
            popup: 0,
            transition: PresentationTransition::Replaced {
                from: Some(ContentId(1)),
                to: Some(ContentId(2)),
            },
            trigger: None,
        });
        let output = output(sink);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("dismissed by=escape"), "got: {output}");
        assert!(
            lines[1].contains("replaced #1 -> #2 by=binding"),
            "got: {output}"
        );
    }
}
