// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor resolution: from a symbolic attachment to a concrete point.
//!
//! A popup is attached to one [`AttachmentEdge`] of an anchor rectangle. The
//! rectangle itself comes from an [`AttachmentAnchor`]: an explicit rect, the
//! anchor element's measured bounds, or a proportional point inside those
//! bounds.
//!
//! # Two coordinate sources
//!
//! The host can report the anchor element's geometry in two ways, stored in
//! [`AnchorGeometry`]:
//!
//! - `bounds` — the abstract anchor value, in the element's own coordinate
//!   space. Its origin is not meaningful to the overlay's container.
//! - `frame` — the measured absolute frame from the layout pass.
//!
//! After padding or transforms the two disagree. When both are present the
//! measured frame wins.

use kurbo::{Point, Rect, Size, Vec2};

use crate::geometry::UnitPoint;

/// The side of the anchor the popup attaches to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AttachmentEdge {
    /// Above the anchor.
    #[default]
    Top,
    /// Below the anchor.
    Bottom,
    /// Before the anchor on the horizontal axis.
    Leading,
    /// After the anchor on the horizontal axis.
    Trailing,
}

impl AttachmentEdge {
    /// All edges, in code order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Leading, Self::Trailing];

    /// The point on the anchor rectangle this edge attaches to.
    #[must_use]
    pub const fn unit_point(self) -> UnitPoint {
        match self {
            Self::Top => UnitPoint::TOP,
            Self::Bottom => UnitPoint::BOTTOM,
            Self::Leading => UnitPoint::LEADING,
            Self::Trailing => UnitPoint::TRAILING,
        }
    }

    /// Unit vector pointing away from the anchor across this edge.
    #[must_use]
    pub const fn outward(self) -> Vec2 {
        match self {
            Self::Top => Vec2::new(0.0, -1.0),
            Self::Bottom => Vec2::new(0.0, 1.0),
            Self::Leading => Vec2::new(-1.0, 0.0),
            Self::Trailing => Vec2::new(1.0, 0.0),
        }
    }

    /// Decodes a host-supplied edge code. Unknown codes return `None`.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Top),
            1 => Some(Self::Bottom),
            2 => Some(Self::Leading),
            3 => Some(Self::Trailing),
            _ => None,
        }
    }

    /// Inverse of [`from_code`](Self::from_code).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Top => 0,
            Self::Bottom => 1,
            Self::Leading => 2,
            Self::Trailing => 3,
        }
    }
}

/// Where on the anchor element a popup hangs from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AttachmentAnchor {
    /// An explicit rectangle supplied by the caller.
    Rect(Rect),
    /// The full measured bounds of the anchor element.
    #[default]
    Bounds,
    /// A proportional point inside the anchor element's bounds.
    Point(UnitPoint),
}

/// Anchor-side measurements for one popup.
///
/// Both fields start as `None` and are replaced wholesale on every
/// re-measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnchorGeometry {
    /// Abstract anchor bounds in the element's own coordinate space.
    pub bounds: Option<Rect>,
    /// Measured absolute frame of the anchor element.
    pub frame: Option<Rect>,
}

impl AnchorGeometry {
    /// Returns the anchor element's own rectangle, preferring the measured
    /// frame. Abstract bounds are rebased to the origin.
    #[must_use]
    pub fn measured_rect(&self) -> Option<Rect> {
        match (self.frame, self.bounds) {
            (Some(frame), _) => Some(frame),
            (None, Some(bounds)) => Some(bounds.with_origin(Point::ORIGIN)),
            (None, None) => None,
        }
    }

    /// Size of the anchor element, or zero before the first measurement.
    #[must_use]
    pub fn container_size(&self) -> Size {
        self.measured_rect().map_or(Size::ZERO, |r| r.size())
    }

    /// Resolves `anchor` against these measurements.
    #[must_use]
    pub fn attachment_point(&self, anchor: AttachmentAnchor, edge: AttachmentEdge) -> Point {
        resolve_attachment_point(anchor, self.measured_rect(), self.container_size(), edge)
    }
}

/// Maps a symbolic attachment onto a concrete point.
///
/// - `Rect(r)`: `r.origin + edge * r.size`.
/// - `Bounds`: the same formula over `anchor_rect`.
/// - `Point(u)`: `anchor_rect.origin + u * anchor_rect.size`, or
///   `u * container_size` when `anchor_rect` is absent.
///
/// `Bounds` with an absent `anchor_rect` resolves to [`Point::ORIGIN`].
#[must_use]
pub fn resolve_attachment_point(
    anchor: AttachmentAnchor,
    anchor_rect: Option<Rect>,
    container_size: Size,
    edge: AttachmentEdge,
) -> Point {
    match anchor {
        AttachmentAnchor::Rect(rect) => edge.unit_point().in_rect(rect),
        AttachmentAnchor::Bounds => {
            anchor_rect.map_or(Point::ORIGIN, |rect| edge.unit_point().in_rect(rect))
        }
        AttachmentAnchor::Point(unit) => {
            anchor_rect.map_or_else(|| unit.resolve(container_size), |rect| unit.in_rect(rect))
        }
    }
}
