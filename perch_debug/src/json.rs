// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter.
//!
//! [`export`] writes events recorded by a
//! [`RecorderSink`](super::recorder::RecorderSink) as a JSON array with one
//! object per event. Every object carries a `"kind"` field (`"placement"`,
//! `"presentation"`, `"warning"`, `"summary"`, or `"measurements"`); the
//! remaining fields depend on the kind.

use std::io::{self, Write};

use serde_json::{Value, json};

use perch_core::presentation::{ContentId, InputEvent, PresentationTransition};
use perch_core::trace::MeasurementOutcome;

use crate::recorder::RecordedEvent;

/// Exports recorded events as a pretty-printed JSON array.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let mut out: Vec<Value> = Vec::with_capacity(events.len());

    for recorded in events {
        match recorded {
            RecordedEvent::Placement(e) => {
                out.push(json!({
                    "kind": "placement",
                    "popup": e.popup,
                    "position": [e.position.x, e.position.y],
                    "render_offset": [e.render_offset.x, e.render_offset.y],
                    "mode": format!("{:?}", e.mode),
                }));
            }
            RecordedEvent::Presentation(e) => {
                let (transition, from, to) = match e.transition {
                    PresentationTransition::Presented(content) => ("presented", None, content),
                    PresentationTransition::Replaced { from, to } => ("replaced", from, to),
                    PresentationTransition::Dismissed => ("dismissed", None, None),
                };
                let trigger = match e.trigger {
                    Some(InputEvent::OutsideInteraction) => json!("outside_interaction"),
                    Some(InputEvent::Escape) => json!("escape"),
                    None => Value::Null,
                };
                out.push(json!({
                    "kind": "presentation",
                    "popup": e.popup,
                    "transition": transition,
                    "from": content_value(from),
                    "to": content_value(to),
                    "trigger": trigger,
                }));
            }
            RecordedEvent::Warning(w) => {
                out.push(json!({
                    "kind": "warning",
                    "popup": w.popup,
                    "warning": format!("{:?}", w.kind),
                }));
            }
            RecordedEvent::Summary(s) => {
                out.push(json!({
                    "kind": "summary",
                    "pass": s.pass,
                    "live": s.live,
                    "recomputed": s.recomputed,
                    "moved": s.moved,
                }));
            }
            RecordedEvent::Measurements { pass, events } => {
                let items: Vec<Value> = events
                    .iter()
                    .map(|m| {
                        json!({
                            "popup": m.popup,
                            "measurement": format!("{:?}", m.kind),
                            "outcome": outcome_name(m.outcome),
                        })
                    })
                    .collect();
                out.push(json!({
                    "kind": "measurements",
                    "pass": pass,
                    "events": items,
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &out)?;
    Ok(())
}

fn outcome_name(outcome: MeasurementOutcome) -> &'static str {
    match outcome {
        MeasurementOutcome::Applied => "applied",
        MeasurementOutcome::Unchanged => "unchanged",
        MeasurementOutcome::DiscardedHidden => "discarded_hidden",
        MeasurementOutcome::DiscardedNonFinite => "discarded_non_finite",
    }
}

fn content_value(content: Option<ContentId>) -> Value {
    content.map_or(Value::Null, |c| json!(c.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use kurbo::{Rect, Size};
    use perch_core::anchor::AttachmentEdge;
    use perch_core::config::PopupConfig;
    use perch_core::popup::{PlacementChanges, PopupStore};
    use perch_core::trace::Tracer;

    #[test]
    fn export_produces_valid_json() {
        let mut store = PopupStore::new();
        let id = store.create_popup(PopupConfig::DEFAULT.with_edge(AttachmentEdge::Bottom));
        store.set_anchor_frame(id, Rect::from_origin_size((100.0, 50.0), (40.0, 20.0)));
        let mut item = Some(ContentId(7));
        store.sync_presentation(id, &item);
        store.set_overlay_size(id, Size::new(60.0, 30.0));

        let mut rec = RecorderSink::new();
        let mut changes = PlacementChanges::default();
        store.evaluate_traced(&mut changes, &mut Tracer::new(&mut rec));
        store.dispatch(id, &[InputEvent::Escape], &mut item);
        store.evaluate_traced(&mut changes, &mut Tracer::new(&mut rec));

        let mut out = Vec::new();
        rec.export_json(&mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();

        // measurements, presented, placement, summary, dismissed, summary
        assert_eq!(parsed.len(), 6, "{parsed:#?}");
        assert_eq!(parsed[0]["kind"], "measurements");
        assert_eq!(parsed[0]["events"].as_array().unwrap().len(), 2);

        assert_eq!(parsed[1]["kind"], "presentation");
        assert_eq!(parsed[1]["transition"], "presented");
        assert_eq!(parsed[1]["to"], 7);
        assert_eq!(parsed[1]["trigger"], Value::Null);

        assert_eq!(parsed[2]["kind"], "placement");
        assert_eq!(parsed[2]["position"], json!([120.0, 70.0]));
        assert_eq!(parsed[2]["render_offset"], json!([0.0, 27.0]));

        assert_eq!(parsed[3]["kind"], "summary");
        assert_eq!(parsed[4]["transition"], "dismissed");
        assert_eq!(parsed[4]["trigger"], "escape");
        assert_eq!(parsed[5]["pass"], 2);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert!(parsed.is_empty());
    }
}
