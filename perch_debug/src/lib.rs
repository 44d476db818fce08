// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON export for perch diagnostics.
//!
//! This crate provides [`TraceSink`](perch_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`] — in-memory event recording.
//! - [`json::export`] — writes recorded events as a JSON array.

pub mod json;
pub mod pretty;
pub mod recorder;
