// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance popup storage.
//!
//! A *popup* is one mounted presentation site: an anchor element plus the
//! overlay that may be shown next to it. Each popup has:
//!
//! - An identity ([`PopupId`]) — a generational handle that becomes stale when
//!   the popup is unmounted.
//! - **Configuration** set by the caller
//!   ([`set_config`](PopupStore::set_config) and friends).
//! - **Measurements** reported by the host's layout pass
//!   ([`set_anchor_frame`](PopupStore::set_anchor_frame),
//!   [`set_overlay_size`](PopupStore::set_overlay_size), ...).
//! - **Presentation** read from the caller's binding
//!   ([`sync_presentation`](PopupStore::sync_presentation)) or ended by input
//!   ([`dispatch`](PopupStore::dispatch)).
//! - A **computed placement** produced by
//!   [`evaluate`](PopupStore::evaluate).
//!
//! # Dirty tracking
//!
//! Mutations mark the matching [`dirty`](crate::dirty) channel for the popup
//! they touch. Channels are local-only; popups never invalidate one another.

mod evaluate;
mod id;
mod input;
mod store;

pub use evaluate::PlacementChanges;
pub use id::PopupId;
pub use store::PopupStore;
