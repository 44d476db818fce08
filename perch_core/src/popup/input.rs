// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dismissal from input events.

use alloc::vec::Vec;

use crate::host::InputSource;
use crate::presentation::{InputEvent, PresentationBinding, PresentationTransition, dismiss_trigger};

use super::id::PopupId;
use super::store::PopupStore;

impl PopupStore {
    /// Applies one input cycle to a popup.
    ///
    /// The binding is re-read first, so a change the caller made in the same
    /// cycle is seen before the events. All `events` are then judged against
    /// that one state. If any of them dismisses, the binding is written back
    /// to its dismissed value and the triggering event is returned.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn dispatch<B: PresentationBinding + ?Sized>(
        &mut self,
        id: PopupId,
        events: &[InputEvent],
        binding: &mut B,
    ) -> Option<InputEvent> {
        _ = self.sync_presentation(id, &*binding);
        let idx = id.idx as usize;
        let trigger = dismiss_trigger(
            self.observed[idx],
            events,
            self.config[idx].tap_outside_to_dismiss,
        )?;
        binding.dismiss();
        self.apply_transition(id.idx, PresentationTransition::Dismissed, Some(trigger));
        Some(trigger)
    }

    /// Collects this cycle's events for `id` from `source` and
    /// [dispatches](Self::dispatch) them.
    pub fn pump_input<S: InputSource + ?Sized, B: PresentationBinding + ?Sized>(
        &mut self,
        id: PopupId,
        source: &mut S,
        binding: &mut B,
    ) -> Option<InputEvent> {
        self.validate(id);
        let mut events = Vec::new();
        source.collect(id, &mut events);
        self.dispatch(id, &events, binding)
    }
}
