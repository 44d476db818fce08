// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offset resolution: which way, and how far, to push a popup.
//!
//! Two vectors come out of this module:
//!
//! - A *direction multiplier* with components in `{-1, 0, 1}`. The placement
//!   engine multiplies it by half the overlay's measured size, so a popup on
//!   the bottom edge is pushed down by half its own height and never covers
//!   the anchor.
//! - A *fixed offset*: a constant gap of `edge_offset` units along the
//!   attachment edge's axis, independent of any measured size.

use kurbo::Vec2;

use crate::anchor::AttachmentEdge;

/// How the popup sits relative to its attachment point.
///
/// `None` in a [`PopupConfig`](crate::config::PopupConfig) derives the
/// alignment from the attachment edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Up and toward the leading side.
    TopLeading,
    /// Straight up.
    Top,
    /// Up and toward the trailing side.
    TopTrailing,
    /// Toward the leading side.
    Leading,
    /// Centered on the attachment point.
    Center,
    /// Toward the trailing side.
    Trailing,
    /// Down and toward the leading side.
    BottomLeading,
    /// Straight down.
    Bottom,
    /// Down and toward the trailing side.
    BottomTrailing,
}

impl Alignment {
    /// All alignments, in code order.
    pub const ALL: [Self; 9] = [
        Self::TopLeading,
        Self::Top,
        Self::TopTrailing,
        Self::Leading,
        Self::Center,
        Self::Trailing,
        Self::BottomLeading,
        Self::Bottom,
        Self::BottomTrailing,
    ];

    /// Signed direction multiplier for this alignment.
    #[must_use]
    pub const fn direction(self) -> Vec2 {
        match self {
            Self::TopLeading => Vec2::new(-1.0, -1.0),
            Self::Top => Vec2::new(0.0, -1.0),
            Self::TopTrailing => Vec2::new(1.0, -1.0),
            Self::Leading => Vec2::new(-1.0, 0.0),
            Self::Center => Vec2::new(0.0, 0.0),
            Self::Trailing => Vec2::new(1.0, 0.0),
            Self::BottomLeading => Vec2::new(-1.0, 1.0),
            Self::Bottom => Vec2::new(0.0, 1.0),
            Self::BottomTrailing => Vec2::new(1.0, 1.0),
        }
    }

    /// Decodes a host-supplied alignment code. Unknown codes return `None`.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::TopLeading),
            1 => Some(Self::Top),
            2 => Some(Self::TopTrailing),
            3 => Some(Self::Leading),
            4 => Some(Self::Center),
            5 => Some(Self::Trailing),
            6 => Some(Self::BottomLeading),
            7 => Some(Self::Bottom),
            8 => Some(Self::BottomTrailing),
            _ => None,
        }
    }

    /// Inverse of [`from_code`](Self::from_code).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::TopLeading => 0,
            Self::Top => 1,
            Self::TopTrailing => 2,
            Self::Leading => 3,
            Self::Center => 4,
            Self::Trailing => 5,
            Self::BottomLeading => 6,
            Self::Bottom => 7,
            Self::BottomTrailing => 8,
        }
    }
}

/// Returns the direction multiplier for a popup.
///
/// An explicit alignment decides on its own; otherwise the popup is pushed
/// outward across `edge`.
#[must_use]
pub const fn resolve_direction_multiplier(
    alignment: Option<Alignment>,
    edge: AttachmentEdge,
) -> Vec2 {
    match alignment {
        Some(alignment) => alignment.direction(),
        None => edge.outward(),
    }
}

/// Returns the constant nudge of `magnitude` units away from the anchor.
#[must_use]
pub fn resolve_fixed_offset(edge: AttachmentEdge, magnitude: f64) -> Vec2 {
    edge.outward() * magnitude
}

/// [`resolve_direction_multiplier`] over raw host codes.
///
/// Unrecognized codes resolve to [`Vec2::ZERO`].
#[must_use]
pub fn direction_multiplier_for_codes(alignment: Option<u8>, edge: u8) -> Vec2 {
    match alignment {
        Some(code) => Alignment::from_code(code).map_or(Vec2::ZERO, Alignment::direction),
        None => AttachmentEdge::from_code(edge).map_or(Vec2::ZERO, AttachmentEdge::outward),
    }
}

/// [`resolve_fixed_offset`] over a raw host edge code.
///
/// Unrecognized codes resolve to [`Vec2::ZERO`].
#[must_use]
pub fn fixed_offset_for_code(edge: u8, magnitude: f64) -> Vec2 {
    AttachmentEdge::from_code(edge).map_or(Vec2::ZERO, |edge| resolve_fixed_offset(edge, magnitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_direction_pushes_away_from_edge() {
        use AttachmentEdge::*;
        assert_eq!(resolve_direction_multiplier(None, Top), Vec2::new(0.0, -1.0));
        assert_eq!(resolve_direction_multiplier(None, Bottom), Vec2::new(0.0, 1.0));
        assert_eq!(resolve_direction_multiplier(None, Leading), Vec2::new(-1.0, 0.0));
        assert_eq!(resolve_direction_multiplier(None, Trailing), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn explicit_alignment_ignores_edge() {
        for edge in AttachmentEdge::ALL {
            assert_eq!(
                resolve_direction_multiplier(Some(Alignment::Center), edge),
                Vec2::ZERO
            );
            assert_eq!(
                resolve_direction_multiplier(Some(Alignment::BottomLeading), edge),
                Vec2::new(-1.0, 1.0)
            );
        }
    }

    #[test]
    fn every_alignment_has_its_direction() {
        use Alignment::*;
        let table = [
            (TopLeading, Vec2::new(-1.0, -1.0)),
            (Top, Vec2::new(0.0, -1.0)),
            (TopTrailing, Vec2::new(1.0, -1.0)),
            (Leading, Vec2::new(-1.0, 0.0)),
            (Center, Vec2::new(0.0, 0.0)),
            (Trailing, Vec2::new(1.0, 0.0)),
            (BottomLeading, Vec2::new(-1.0, 1.0)),
            (Bottom, Vec2::new(0.0, 1.0)),
            (BottomTrailing, Vec2::new(1.0, 1.0)),
        ];
        assert_eq!(table.len(), Alignment::ALL.len());
        for ((alignment, expected), listed) in table.into_iter().zip(Alignment::ALL) {
            assert_eq!(alignment, listed);
            assert_eq!(alignment.direction(), expected, "{alignment:?}");
        }
    }

    #[test]
    fn fixed_offset_is_single_axis() {
        assert_eq!(resolve_fixed_offset(AttachmentEdge::Top, 12.0), Vec2::new(0.0, -12.0));
        assert_eq!(resolve_fixed_offset(AttachmentEdge::Bottom, 12.0), Vec2::new(0.0, 12.0));
        assert_eq!(resolve_fixed_offset(AttachmentEdge::Leading, 5.0), Vec2::new(-5.0, 0.0));
        assert_eq!(resolve_fixed_offset(AttachmentEdge::Trailing, 5.0), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn unknown_codes_are_neutral() {
        assert_eq!(direction_multiplier_for_codes(Some(42), 1), Vec2::ZERO);
        assert_eq!(direction_multiplier_for_codes(None, 9), Vec2::ZERO);
        assert_eq!(fixed_offset_for_code(200, 12.0), Vec2::ZERO);
    }

    #[test]
    fn known_codes_match_typed_resolvers() {
        assert_eq!(direction_multiplier_for_codes(None, 1), Vec2::new(0.0, 1.0));
        assert_eq!(
            direction_multiplier_for_codes(Some(Alignment::TopTrailing.code()), 0),
            Vec2::new(1.0, -1.0)
        );
        assert_eq!(fixed_offset_for_code(3, 4.0), Vec2::new(4.0, 0.0));
    }
}
