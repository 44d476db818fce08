// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The placement engine.
//!
//! Placement is a pure function of a [`PopupConfig`] and a
//! [`GeometryCache`]; calling [`place`] twice with the same inputs gives the
//! same [`Placement`]. It runs in two layers:
//!
//! 1. `position` — the attachment point from the anchor resolver. Hosts
//!    position the popup by its center.
//! 2. `render_offset` — `overlay_size / 2 * direction + fixed_offset`,
//!    applied as a translation after positioning.
//!
//! The render offset depends on the overlay's own size, which is only known
//! after the overlay has been laid out once. Until then the size is treated
//! as zero, so the first frame after presentation may be placed at the bare
//! attachment point and corrected on the next pass.
//!
//! # Own-measured mode
//!
//! When the anchor is an explicit [`AttachmentAnchor::Rect`] and the host has
//! reported the overlay's own absolute anchor origin, that origin replaces
//! the rect's origin: `position = overlay_origin + edge * rect.size`. This
//! sidesteps the mismatch between anchor-space and measured coordinates. If
//! the popup is visible before the origin is measured the first frame falls
//! back to the rect's own origin and is wrong; the store reports this as a
//! [`PlacementWarning`](crate::trace::PlacementWarning) rather than
//! hiding it.

use kurbo::{Point, Rect, Size, Vec2};

use crate::alignment::{resolve_direction_multiplier, resolve_fixed_offset};
use crate::anchor::{AnchorGeometry, AttachmentAnchor};
use crate::config::PopupConfig;
use crate::geometry::{UnitPoint, half_extent, scale};

/// Which formula produced a [`Placement`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlacementMode {
    /// Attachment point resolved from anchor geometry.
    #[default]
    Anchored,
    /// Attachment point derived from the overlay's own measured origin.
    OwnMeasured,
}

/// Final placement handed to the host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    /// Layout position of the popup's center.
    pub position: Point,
    /// Translation applied after positioning.
    pub render_offset: Vec2,
    /// Formula used.
    pub mode: PlacementMode,
}

impl Placement {
    /// Center of the popup after the render offset is applied.
    #[inline]
    #[must_use]
    pub fn rendered_center(&self) -> Point {
        self.position + self.render_offset
    }

    /// Top-leading corner of a popup of `overlay_size` after the render
    /// offset is applied.
    #[inline]
    #[must_use]
    pub fn rendered_origin(&self, overlay_size: Size) -> Point {
        self.rendered_center() - half_extent(overlay_size)
    }

    /// Rendered bounding box of a popup of `overlay_size`.
    #[inline]
    #[must_use]
    pub fn rendered_rect(&self, overlay_size: Size) -> Rect {
        Rect::from_origin_size(self.rendered_origin(overlay_size), overlay_size)
    }
}

/// Overlay-side and anchor-side measurements for one presentation.
///
/// Every field is `None` until the host reports it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeometryCache {
    /// Anchor element measurements.
    pub anchor: AnchorGeometry,
    /// Measured size of the overlay content.
    pub overlay_size: Option<Size>,
    /// Overlay's own absolute anchor origin, for own-measured placement.
    pub overlay_origin: Option<Point>,
}

impl GeometryCache {
    /// Forgets everything measured on the overlay side.
    ///
    /// Anchor measurements are kept: the anchor stays mounted while the
    /// overlay comes and goes.
    pub fn invalidate_overlay(&mut self) {
        self.overlay_size = None;
        self.overlay_origin = None;
    }

    /// Whether the overlay has been measured since the last invalidation.
    #[must_use]
    pub fn overlay_measured(&self) -> bool {
        self.overlay_size.is_some()
    }
}

/// Combines an attachment point with the overlay's size and offsets.
#[must_use]
pub fn compute_position(
    attachment_point: Point,
    overlay_size: Size,
    direction: Vec2,
    fixed_offset: Vec2,
) -> Placement {
    let half = half_extent(overlay_size);
    Placement {
        position: attachment_point,
        render_offset: Vec2::new(direction.x * half.x, direction.y * half.y) + fixed_offset,
        mode: PlacementMode::Anchored,
    }
}

/// Attachment point for own-measured mode.
#[must_use]
pub fn compute_own_measured_point(
    overlay_origin: Point,
    parent_anchor: Rect,
    edge: UnitPoint,
) -> Point {
    overlay_origin + scale(edge.to_vec2(), parent_anchor.size())
}

/// Computes the placement of one popup from its configuration and cache.
#[must_use]
pub fn place(config: &PopupConfig, cache: &GeometryCache) -> Placement {
    let edge = config.attachment_edge;
    let direction = resolve_direction_multiplier(config.alignment, edge);
    let fixed_offset = resolve_fixed_offset(edge, config.edge_offset);
    let overlay_size = cache.overlay_size.unwrap_or(Size::ZERO);

    match (config.attachment_anchor, cache.overlay_origin) {
        (AttachmentAnchor::Rect(rect), Some(origin)) => {
            let point = compute_own_measured_point(origin, rect, edge.unit_point());
            Placement {
                mode: PlacementMode::OwnMeasured,
                ..compute_position(point, overlay_size, direction, fixed_offset)
            }
        }
        (anchor, _) => {
            let point = cache.anchor.attachment_point(anchor, edge);
            compute_position(point, overlay_size, direction, fixed_offset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::Alignment;
    use crate::anchor::AttachmentEdge;

    fn anchored_cache(frame: Rect, overlay: Option<Size>) -> GeometryCache {
        GeometryCache {
            anchor: AnchorGeometry {
                bounds: None,
                frame: Some(frame),
            },
            overlay_size: overlay,
            overlay_origin: None,
        }
    }

    #[test]
    fn bottom_edge_worked_example() {
        let frame = Rect::from_origin_size((100.0, 50.0), (40.0, 20.0));
        let overlay = Size::new(60.0, 30.0);
        let config = PopupConfig::DEFAULT.with_edge(AttachmentEdge::Bottom);
        let placement = place(&config, &anchored_cache(frame, Some(overlay)));

        assert_eq!(placement.position, Point::new(120.0, 70.0));
        assert_eq!(placement.render_offset, Vec2::new(0.0, 27.0));
        assert_eq!(placement.mode, PlacementMode::Anchored);

        // The rendered popup starts exactly one edge offset below the anchor.
        let rendered = placement.rendered_rect(overlay);
        assert_eq!(rendered.y0, frame.y1 + 12.0);
        assert_eq!(rendered.center().x, frame.center().x);
    }

    #[test]
    fn derived_offset_magnitude_per_edge() {
        let frame = Rect::from_origin_size((0.0, 0.0), (10.0, 10.0));
        let overlay = Size::new(80.0, 24.0);
        let offset = 7.0;
        for edge in AttachmentEdge::ALL {
            let config = PopupConfig::DEFAULT.with_edge(edge).with_edge_offset(offset);
            let r = place(&config, &anchored_cache(frame, Some(overlay))).render_offset;
            match edge {
                AttachmentEdge::Top => assert_eq!(r, Vec2::new(0.0, -(12.0 + offset))),
                AttachmentEdge::Bottom => assert_eq!(r, Vec2::new(0.0, 12.0 + offset)),
                AttachmentEdge::Leading => assert_eq!(r, Vec2::new(-(40.0 + offset), 0.0)),
                AttachmentEdge::Trailing => assert_eq!(r, Vec2::new(40.0 + offset, 0.0)),
            }
        }
    }

    #[test]
    fn rendered_popup_never_overlaps_anchor() {
        let frame = Rect::from_origin_size((30.0, 40.0), (50.0, 20.0));
        for overlay in [Size::new(10.0, 10.0), Size::new(200.0, 90.0)] {
            for edge in AttachmentEdge::ALL {
                let config = PopupConfig::DEFAULT.with_edge(edge).with_edge_offset(0.0);
                let rendered = place(&config, &anchored_cache(frame, Some(overlay)))
                    .rendered_rect(overlay);
                let overlap = rendered.intersect(frame);
                assert!(overlap.area() == 0.0, "{edge:?} overlaps: {overlap:?}");
            }
        }
    }

    #[test]
    fn explicit_alignment_drives_render_offset() {
        let frame = Rect::from_origin_size((0.0, 0.0), (10.0, 10.0));
        let config = PopupConfig::DEFAULT
            .with_edge(AttachmentEdge::Bottom)
            .with_alignment(Some(Alignment::BottomTrailing))
            .with_edge_offset(0.0);
        let r = place(&config, &anchored_cache(frame, Some(Size::new(20.0, 6.0)))).render_offset;
        assert_eq!(r, Vec2::new(10.0, 3.0));
    }

    #[test]
    fn unmeasured_overlay_uses_fixed_offset_only() {
        let frame = Rect::from_origin_size((100.0, 50.0), (40.0, 20.0));
        let config = PopupConfig::DEFAULT.with_edge(AttachmentEdge::Bottom);
        let placement = place(&config, &anchored_cache(frame, None));
        assert_eq!(placement.position, Point::new(120.0, 70.0));
        assert_eq!(placement.render_offset, Vec2::new(0.0, 12.0));
    }

    #[test]
    fn nothing_measured_is_origin() {
        let config = PopupConfig::DEFAULT.with_edge_offset(0.0);
        let placement = place(&config, &GeometryCache::default());
        assert_eq!(placement.position, Point::ORIGIN);
        assert_eq!(placement.render_offset, Vec2::ZERO);
    }

    #[test]
    fn placement_is_idempotent() {
        let cache = anchored_cache(
            Rect::from_origin_size((3.0, 4.0), (5.0, 6.0)),
            Some(Size::new(7.0, 8.0)),
        );
        let config = PopupConfig::DEFAULT.with_edge(AttachmentEdge::Leading);
        assert_eq!(place(&config, &cache), place(&config, &cache));
    }

    #[test]
    fn own_measured_uses_overlay_origin() {
        let rect = Rect::from_origin_size((0.0, 0.0), (40.0, 20.0));
        let config = PopupConfig::DEFAULT
            .with_anchor(AttachmentAnchor::Rect(rect))
            .with_edge(AttachmentEdge::Bottom)
            .with_edge_offset(0.0);
        let cache = GeometryCache {
            anchor: AnchorGeometry::default(),
            overlay_size: Some(Size::new(10.0, 10.0)),
            overlay_origin: Some(Point::new(100.0, 50.0)),
        };
        let placement = place(&config, &cache);
        assert_eq!(placement.mode, PlacementMode::OwnMeasured);
        assert_eq!(placement.position, Point::new(120.0, 70.0));
        assert_eq!(placement.render_offset, Vec2::new(0.0, 5.0));
    }

    #[test]
    fn rect_anchor_without_overlay_origin_falls_back() {
        let rect = Rect::from_origin_size((100.0, 50.0), (40.0, 20.0));
        let config = PopupConfig::DEFAULT
            .with_anchor(AttachmentAnchor::Rect(rect))
            .with_edge(AttachmentEdge::Top);
        let placement = place(&config, &GeometryCache::default());
        assert_eq!(placement.mode, PlacementMode::Anchored);
        assert_eq!(placement.position, Point::new(120.0, 50.0));
    }

    #[test]
    fn invalidate_overlay_keeps_anchor() {
        let mut cache = anchored_cache(
            Rect::from_origin_size((0.0, 0.0), (1.0, 1.0)),
            Some(Size::new(2.0, 2.0)),
        );
        cache.overlay_origin = Some(Point::new(1.0, 1.0));
        cache.invalidate_overlay();
        assert!(!cache.overlay_measured());
        assert_eq!(cache.overlay_origin, None);
        assert!(cache.anchor.frame.is_some());
    }
}
