// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for UI framework integrations.
//!
//! Perch does no layout, hit testing, or rendering of its own. A host
//! framework provides the following pieces:
//!
//! - **Measurements** — The host's layout pass reports anchor and overlay
//!   geometry through the [`PopupStore`] measurement API. This is a plain
//!   method call per notification rather than a trait, since each framework
//!   delivers layout callbacks differently.
//!
//! - **Input** — Implements [`InputSource`] to hand over outside-interaction
//!   and escape events for one input cycle. Hit testing stays on the host
//!   side; the core only sees the resulting [`InputEvent`]s.
//!
//! - **Presentation** — Implements [`OverlayHost`] to mount, move, and
//!   unmount overlay elements from evaluated [`PlacementChanges`], and to
//!   install the zero-size [`DismissControl`] bound to the escape key.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_frame(host: &mut Host, store: &mut PopupStore, binding: &mut bool) {
//!     // Caller-driven presentation changes.
//!     store.sync_presentation(popup, binding);
//!
//!     // Layout callbacks since the last frame.
//!     store.set_anchor_frame(popup, host.anchor_frame());
//!     store.set_overlay_size(popup, host.overlay_size());
//!
//!     // Input for this cycle; all events see the same state.
//!     store.pump_input(popup, &mut host.input, binding);
//!
//!     // Recompute and apply.
//!     let changes = store.evaluate();
//!     host.apply(store, &changes);
//! }
//! ```

use alloc::vec::Vec;

use kurbo::Rect;

use crate::popup::{PlacementChanges, PopupId, PopupStore};
use crate::presentation::InputEvent;

/// Applies evaluated placement changes to the host's view tree.
pub trait OverlayHost {
    /// Applies the given [`PlacementChanges`], reading current placements
    /// from `store` as needed.
    fn apply(&mut self, store: &PopupStore, changes: &PlacementChanges);
}

/// Source of dismiss-relevant input for one input cycle.
pub trait InputSource {
    /// Appends every event observed for `popup` since the last call.
    fn collect(&mut self, popup: PopupId, out: &mut Vec<InputEvent>);
}

/// A hidden, zero-size control that dismisses its popup on escape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DismissControl {
    /// Popup the control belongs to.
    pub popup: PopupId,
    /// Zero-size frame at the popup's rendered center.
    pub frame: Rect,
}
