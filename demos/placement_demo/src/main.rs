// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated host that drives one popup through placement and dismissal.
//!
//! Mounts a bottom-attached popup, presents item content, measures it, swaps
//! the item for another, and finally dismisses it with an escape key press.
//! Every evaluation is traced to both a
//! [`PrettyPrintSink`](perch_debug::pretty::PrettyPrintSink) (stdout) and a
//! [`RecorderSink`](perch_debug::recorder::RecorderSink), whose recording is
//! exported as JSON to `placement_trace.json`.

use std::fs::File;
use std::io::BufWriter;

use kurbo::{Rect, Size};

use perch_core::anchor::AttachmentEdge;
use perch_core::config::PopupConfig;
use perch_core::host::{InputSource, OverlayHost};
use perch_core::popup::{PlacementChanges, PopupId, PopupStore};
use perch_core::presentation::{ContentId, InputEvent};
use perch_core::trace::{
    EvaluateSummary, MeasurementEvent, PlacementEvent, PlacementWarning, PresentationEvent,
    TraceSink, Tracer,
};

use perch_debug::pretty::PrettyPrintSink;
use perch_debug::recorder::RecorderSink;

/// Forwards every event to two sinks.
struct Tee<'a> {
    a: &'a mut dyn TraceSink,
    b: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_placement(&mut self, e: &PlacementEvent) {
        self.a.on_placement(e);
        self.b.on_placement(e);
    }

    fn on_presentation(&mut self, e: &PresentationEvent) {
        self.a.on_presentation(e);
        self.b.on_presentation(e);
    }

    fn on_warning(&mut self, w: &PlacementWarning) {
        self.a.on_warning(w);
        self.b.on_warning(w);
    }

    fn on_summary(&mut self, s: &EvaluateSummary) {
        self.a.on_summary(s);
        self.b.on_summary(s);
    }

    fn on_measurements(&mut self, pass: u64, measurements: &[MeasurementEvent]) {
        self.a.on_measurements(pass, measurements);
        self.b.on_measurements(pass, measurements);
    }
}

/// Stand-in for a UI framework: keeps rendered frames and queued key presses.
#[derive(Default)]
struct SimulatedHost {
    keys: Vec<InputEvent>,
    mounted: Vec<(u32, Rect)>,
}

impl InputSource for SimulatedHost {
    fn collect(&mut self, _popup: PopupId, out: &mut Vec<InputEvent>) {
        out.append(&mut self.keys);
    }
}

impl OverlayHost for SimulatedHost {
    fn apply(&mut self, store: &PopupStore, changes: &PlacementChanges) {
        for &idx in &changes.dismissed {
            self.mounted.retain(|(i, _)| *i != idx);
            println!("  host: unmount popup {idx}");
        }
        for &idx in &changes.moved {
            let Some(placement) = store.placement_at(idx) else {
                continue;
            };
            let size = store.overlay_size_at(idx).unwrap_or(Size::ZERO);
            let frame = placement.rendered_rect(size);
            self.mounted.retain(|(i, _)| *i != idx);
            self.mounted.push((idx, frame));
            println!(
                "  host: popup {idx} at ({:.1}, {:.1}) size {}x{}",
                frame.x0, frame.y0, size.width, size.height
            );
        }
    }
}

fn main() {
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();
    let mut host = SimulatedHost::default();
    let mut store = PopupStore::new();
    let mut changes = PlacementChanges::default();

    let config = PopupConfig::DEFAULT.with_edge(AttachmentEdge::Bottom);
    let popup = store.create_popup(config);
    store.set_anchor_frame(popup, Rect::from_origin_size((100.0, 50.0), (40.0, 20.0)));

    let mut item = None;
    let mut frame = |label: &str,
                     store: &mut PopupStore,
                     host: &mut SimulatedHost,
                     item: &mut Option<ContentId>| {
        println!("-- {label}");
        store.sync_presentation(popup, &*item);
        store.pump_input(popup, host, item);
        let mut tee = Tee {
            a: &mut pretty,
            b: &mut recorder,
        };
        store.evaluate_traced(&mut changes, &mut Tracer::new(&mut tee));
        host.apply(store, &changes);
    };

    frame("mount", &mut store, &mut host, &mut item);

    item = Some(ContentId(1));
    frame("present item 1", &mut store, &mut host, &mut item);

    store.set_overlay_size(popup, Size::new(60.0, 30.0));
    frame("measure overlay", &mut store, &mut host, &mut item);

    item = Some(ContentId(2));
    frame("replace with item 2", &mut store, &mut host, &mut item);

    store.set_overlay_size(popup, Size::new(80.0, 40.0));
    frame("measure new overlay", &mut store, &mut host, &mut item);

    host.keys.push(InputEvent::Escape);
    frame("escape", &mut store, &mut host, &mut item);
    assert_eq!(item, None, "escape should clear the binding");

    // Late layout callback for content that is already gone.
    store.set_overlay_size(popup, Size::new(80.0, 40.0));
    frame("late measurement", &mut store, &mut host, &mut item);

    // -- export JSON -------------------------------------------------------
    let path = "placement_trace.json";
    let file = File::create(path).expect("failed to create placement_trace.json");
    let mut writer = BufWriter::new(file);
    recorder
        .export_json(&mut writer)
        .expect("failed to write placement trace");

    println!(
        "Wrote {path} ({} events, {} popups mounted)",
        recorder.events().len(),
        host.mounted.len()
    );
}
