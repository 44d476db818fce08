// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popup identity.

use core::fmt;

/// A handle to a popup in a [`PopupStore`](super::PopupStore).
///
/// Contains both a slot index and a generation counter so that a handle kept
/// past [`destroy_popup`](super::PopupStore::destroy_popup) is detected
/// instead of silently addressing the next popup mounted in that slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PopupId {
    /// Slot index into the store's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the store's generation for this slot.
    pub(crate) generation: u32,
}

impl PopupId {
    /// Returns the raw slot index, as found in
    /// [`PlacementChanges`](super::PlacementChanges).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for PopupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PopupId({}@gen{})", self.idx, self.generation)
    }
}
