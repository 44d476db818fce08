// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation bindings and the dismissal state machine.
//!
//! Whether a popup is shown is owned by the caller, not by this crate. The
//! caller hands over a [`PresentationBinding`], either an `isPresented`-style
//! `bool` or an item-style `Option<T>`, and the core:
//!
//! - reads it to derive the [`PresentationState`], and
//! - writes it (`false` / `None`) to signal a dismissal.
//!
//! ```text
//!            flag true / item present
//!   Hidden ───────────────────────────► Shown(id)
//!     ▲                                   │   │
//!     │  flag false / item absent         │   │ item identity changes
//!     │  outside interaction (if enabled) │   └──────► Shown(id') (replaced)
//!     └──────────── escape ◄──────────────┘
//! ```

use core::fmt;

/// Opaque identity of the content shown in a popup.
///
/// Two items with the same `ContentId` are the same content; a different
/// id replaces the popup's content in place.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentId(pub u64);

impl fmt::Debug for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentId({})", self.0)
    }
}

/// Items that can drive an item-bound popup.
pub trait Identifiable {
    /// Returns the identity of this item.
    fn content_id(&self) -> ContentId;
}

impl Identifiable for ContentId {
    fn content_id(&self) -> ContentId {
        *self
    }
}

/// Presentation state derived from a binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PresentationState {
    /// Nothing is presented.
    #[default]
    Hidden,
    /// The popup is presented. Flag-bound popups carry no identity.
    Shown(Option<ContentId>),
}

impl PresentationState {
    /// Whether the popup is presented.
    #[must_use]
    pub const fn is_shown(self) -> bool {
        matches!(self, Self::Shown(_))
    }

    /// Identity of the presented content, if any.
    #[must_use]
    pub const fn content(self) -> Option<ContentId> {
        match self {
            Self::Shown(content) => content,
            Self::Hidden => None,
        }
    }
}

/// A caller-owned value that controls presentation.
pub trait PresentationBinding {
    /// Derives the current state from the bound value.
    fn state(&self) -> PresentationState;

    /// Writes the "dismissed" value back into the binding.
    fn dismiss(&mut self);
}

impl PresentationBinding for bool {
    fn state(&self) -> PresentationState {
        if *self {
            PresentationState::Shown(None)
        } else {
            PresentationState::Hidden
        }
    }

    fn dismiss(&mut self) {
        *self = false;
    }
}

impl<T: Identifiable> PresentationBinding for Option<T> {
    fn state(&self) -> PresentationState {
        match self {
            Some(item) => PresentationState::Shown(Some(item.content_id())),
            None => PresentationState::Hidden,
        }
    }

    fn dismiss(&mut self) {
        *self = None;
    }
}

/// An input-side event that may dismiss a popup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// The user interacted outside the popup's bounds.
    OutsideInteraction,
    /// The escape key (or the platform equivalent) was triggered.
    Escape,
}

impl InputEvent {
    /// Whether this event dismisses a shown popup.
    #[must_use]
    pub const fn dismisses(self, tap_outside_to_dismiss: bool) -> bool {
        match self {
            Self::OutsideInteraction => tap_outside_to_dismiss,
            Self::Escape => true,
        }
    }
}

/// A change between two observed presentation states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresentationTransition {
    /// Hidden to shown.
    Presented(Option<ContentId>),
    /// Shown content swapped for different content without hiding.
    Replaced {
        /// Previous content.
        from: Option<ContentId>,
        /// New content.
        to: Option<ContentId>,
    },
    /// Shown to hidden.
    Dismissed,
}

impl PresentationTransition {
    /// Classifies the move from `observed` to `current`.
    ///
    /// Returns `None` when nothing changed.
    #[must_use]
    pub fn between(observed: PresentationState, current: PresentationState) -> Option<Self> {
        match (observed, current) {
            (PresentationState::Hidden, PresentationState::Hidden) => None,
            (PresentationState::Hidden, PresentationState::Shown(to)) => Some(Self::Presented(to)),
            (PresentationState::Shown(_), PresentationState::Hidden) => Some(Self::Dismissed),
            (PresentationState::Shown(from), PresentationState::Shown(to)) => {
                (from != to).then_some(Self::Replaced { from, to })
            }
        }
    }

    /// State after this transition.
    #[must_use]
    pub const fn target(self) -> PresentationState {
        match self {
            Self::Presented(to) | Self::Replaced { to, .. } => PresentationState::Shown(to),
            Self::Dismissed => PresentationState::Hidden,
        }
    }
}

/// Evaluates one input cycle against a presentation.
///
/// Every event in `events` is judged against the same pre-cycle `state`, so
/// one event cannot hide another. Returns the first event that dismisses, or
/// `None` if the popup stays as it is.
#[must_use]
pub fn dismiss_trigger(
    state: PresentationState,
    events: &[InputEvent],
    tap_outside_to_dismiss: bool,
) -> Option<InputEvent> {
    if !state.is_shown() {
        return None;
    }
    events
        .iter()
        .copied()
        .find(|event| event.dismisses(tap_outside_to_dismiss))
}
