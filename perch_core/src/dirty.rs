// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Every [`PopupStore`](crate::popup::PopupStore) mutation marks one of these
//! channels (via [`understory_dirty`]) for the affected popup. Popups never
//! depend on each other, so all channels are local-only: only the marked
//! popup shows up when the channel is drained.
//!
//! [`PopupStore::evaluate`](crate::popup::PopupStore::evaluate) drains all
//! four channels and recomputes the placement of every popup that appears in
//! any of them. A notification that does not change a stored value marks
//! nothing.

use understory_dirty::Channel;

/// Anchor bounds or anchor frame changed.
pub const ANCHOR: Channel = Channel::new(0);

/// Overlay size or overlay origin changed, or was invalidated.
pub const OVERLAY: Channel = Channel::new(1);

/// Configuration changed.
pub const CONFIG: Channel = Channel::new(2);

/// Presentation state changed.
pub const PRESENTATION: Channel = Channel::new(3);
