// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor-relative popup placement and dismissal.
//!
//! `perch_core` computes where a popup overlay should appear relative to an
//! anchor element, and tracks whether it is shown. It is `no_std` compatible
//! (with `alloc`) and keeps per-popup state in struct-of-arrays storage
//! addressed by generational handles.
//!
//! # Architecture
//!
//! A host UI framework feeds measurements and input in; placements and
//! presentation transitions come out:
//!
//! ```text
//!   Binding (bool / Option<item>)      Host layout pass
//!       │                                   │
//!       ▼                                   ▼
//!   sync_presentation()            set_anchor_frame() / set_overlay_size()
//!       │                                   │
//!       └──────────────┬────────────────────┘
//!                      ▼
//!   InputSource ──► PopupStore::dispatch() ──► binding.dismiss()
//!                      │
//!                      ▼
//!   PopupStore::evaluate() ──► PlacementChanges ──► OverlayHost::apply()
//! ```
//!
//! **[`geometry`]** — [`UnitPoint`](geometry::UnitPoint) and small vector
//! helpers on top of `kurbo`.
//!
//! **[`anchor`]** — Attachment edges, attachment anchors, and resolution of
//! the attachment point from measured anchor geometry.
//!
//! **[`alignment`]** — Nine-way alignment, direction multipliers, and the
//! fixed edge offset.
//!
//! **[`placement`]** — The placement formulas and the per-popup geometry
//! cache.
//!
//! **[`config`]** — Per-popup configuration with const builders.
//!
//! **[`presentation`]** — Bindings, presentation state, transitions, and the
//! dismissal rules for input events.
//!
//! **[`popup`]** — Struct-of-arrays popup storage and evaluation.
//!
//! **[`dirty`]** — Dirty channels via `understory_dirty`. Every channel is
//! local to one popup.
//!
//! **[`host`]** — The [`OverlayHost`](host::OverlayHost) and
//! [`InputSource`](host::InputSource) traits that framework integrations
//! implement.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types,
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-popup
//!   measurement events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod alignment;
pub mod anchor;
pub mod config;
pub mod dirty;
pub mod geometry;
pub mod host;
pub mod placement;
pub mod popup;
pub mod presentation;
pub mod trace;
