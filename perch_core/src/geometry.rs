// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fractional coordinates and component-wise helpers on top of `kurbo`.
//!
//! Positions are [`kurbo::Point`], measured extents are [`kurbo::Size`], and
//! every signed displacement (direction multipliers, fixed nudges, render
//! offsets) is a [`kurbo::Vec2`]. The one type `kurbo` does not have is
//! [`UnitPoint`], a proportional coordinate inside a rectangle.

use core::ops::Mul;

use kurbo::{Point, Rect, Size, Vec2};

/// A fractional coordinate, conceptually in `[0, 1] × [0, 1]`.
///
/// The range is not enforced. A unit point is turned into an absolute point
/// by scaling it with a size ([`resolve`](Self::resolve)) or by placing it
/// inside a rectangle ([`in_rect`](Self::in_rect)).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UnitPoint {
    /// Horizontal fraction, `0.0` at the leading edge.
    pub x: f64,
    /// Vertical fraction, `0.0` at the top edge.
    pub y: f64,
}

impl UnitPoint {
    /// `(0, 0)`.
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// Top-leading corner.
    pub const TOP_LEADING: Self = Self::new(0.0, 0.0);
    /// Midpoint of the top edge.
    pub const TOP: Self = Self::new(0.5, 0.0);
    /// Top-trailing corner.
    pub const TOP_TRAILING: Self = Self::new(1.0, 0.0);
    /// Midpoint of the leading edge.
    pub const LEADING: Self = Self::new(0.0, 0.5);
    /// Center of the rectangle.
    pub const CENTER: Self = Self::new(0.5, 0.5);
    /// Midpoint of the trailing edge.
    pub const TRAILING: Self = Self::new(1.0, 0.5);
    /// Bottom-leading corner.
    pub const BOTTOM_LEADING: Self = Self::new(0.0, 1.0);
    /// Midpoint of the bottom edge.
    pub const BOTTOM: Self = Self::new(0.5, 1.0);
    /// Bottom-trailing corner.
    pub const BOTTOM_TRAILING: Self = Self::new(1.0, 1.0);

    /// Creates a unit point from its two fractions.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scales this point by `size`, giving an offset from a rectangle's origin.
    #[inline]
    #[must_use]
    pub fn resolve(self, size: Size) -> Point {
        Point::new(self.x * size.width, self.y * size.height)
    }

    /// Returns the absolute point this fraction selects inside `rect`.
    #[inline]
    #[must_use]
    pub fn in_rect(self, rect: Rect) -> Point {
        rect.origin() + self.resolve(rect.size()).to_vec2()
    }

    /// Returns the fractions as a vector.
    #[inline]
    #[must_use]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl Mul<Size> for UnitPoint {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: Size) -> Point {
        self.resolve(rhs)
    }
}

/// Multiplies `v` by `size` component-wise.
#[inline]
#[must_use]
pub fn scale(v: Vec2, size: Size) -> Vec2 {
    Vec2::new(v.x * size.width, v.y * size.height)
}

/// Returns half of `size` as a vector.
#[inline]
#[must_use]
pub fn half_extent(size: Size) -> Vec2 {
    Vec2::new(size.width * 0.5, size.height * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_scales_by_size() {
        let p = UnitPoint::BOTTOM.resolve(Size::new(40.0, 20.0));
        assert_eq!(p, Point::new(20.0, 20.0));
        assert_eq!(UnitPoint::TRAILING * Size::new(10.0, 8.0), Point::new(10.0, 4.0));
    }

    #[test]
    fn in_rect_offsets_by_origin() {
        let rect = Rect::from_origin_size((100.0, 50.0), (40.0, 20.0));
        assert_eq!(UnitPoint::TOP_LEADING.in_rect(rect), Point::new(100.0, 50.0));
        assert_eq!(UnitPoint::CENTER.in_rect(rect), Point::new(120.0, 60.0));
        assert_eq!(UnitPoint::BOTTOM_TRAILING.in_rect(rect), Point::new(140.0, 70.0));
    }

    #[test]
    fn out_of_range_fractions_are_not_clamped() {
        let p = UnitPoint::new(1.5, -0.5).resolve(Size::new(10.0, 10.0));
        assert_eq!(p, Point::new(15.0, -5.0));
    }

    #[test]
    fn scale_is_component_wise() {
        let v = scale(Vec2::new(-1.0, 1.0), Size::new(30.0, 15.0));
        assert_eq!(v, Vec2::new(-30.0, 15.0));
        assert_eq!(half_extent(Size::new(60.0, 30.0)), Vec2::new(30.0, 15.0));
    }
}
