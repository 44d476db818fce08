// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-popup configuration.
//!
//! One [`PopupConfig`] covers every way a popup can be attached. Behavior is
//! selected by field values, not by separate entry points: an explicit
//! [`AttachmentAnchor::Rect`] combined with a measured overlay origin turns
//! on own-measured placement (see [`placement`](crate::placement)), and a
//! `None` alignment derives the push direction from the edge.

use kurbo::Rect;

use crate::alignment::Alignment;
use crate::anchor::{AttachmentAnchor, AttachmentEdge};
use crate::geometry::UnitPoint;

/// Gap between anchor and popup when none is configured, in layout units.
pub const DEFAULT_EDGE_OFFSET: f64 = 12.0;

/// Caller-supplied configuration for one popup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopupConfig {
    /// What the popup hangs from.
    pub attachment_anchor: AttachmentAnchor,
    /// Which side of the anchor the popup attaches to.
    pub attachment_edge: AttachmentEdge,
    /// Constant gap added along the edge axis.
    pub edge_offset: f64,
    /// Explicit alignment, or `None` to derive it from the edge.
    pub alignment: Option<Alignment>,
    /// Whether an interaction outside the popup dismisses it.
    pub tap_outside_to_dismiss: bool,
}

impl PopupConfig {
    /// Bounds anchor, top edge, [`DEFAULT_EDGE_OFFSET`], derived alignment,
    /// tap-outside dismissal on.
    pub const DEFAULT: Self = Self {
        attachment_anchor: AttachmentAnchor::Bounds,
        attachment_edge: AttachmentEdge::Top,
        edge_offset: DEFAULT_EDGE_OFFSET,
        alignment: None,
        tap_outside_to_dismiss: true,
    };

    /// Returns a copy with the given anchor.
    #[must_use]
    pub const fn with_anchor(mut self, anchor: AttachmentAnchor) -> Self {
        self.attachment_anchor = anchor;
        self
    }

    /// Returns a copy attached to the given edge.
    #[must_use]
    pub const fn with_edge(mut self, edge: AttachmentEdge) -> Self {
        self.attachment_edge = edge;
        self
    }

    /// Returns a copy with the given edge offset.
    #[must_use]
    pub const fn with_edge_offset(mut self, edge_offset: f64) -> Self {
        self.edge_offset = edge_offset;
        self
    }

    /// Returns a copy with the given alignment.
    #[must_use]
    pub const fn with_alignment(mut self, alignment: Option<Alignment>) -> Self {
        self.alignment = alignment;
        self
    }

    /// Returns a copy with tap-outside dismissal switched on or off.
    #[must_use]
    pub const fn with_tap_outside_to_dismiss(mut self, enabled: bool) -> Self {
        self.tap_outside_to_dismiss = enabled;
        self
    }

    /// Returns a copy with every non-finite number replaced by zero.
    ///
    /// `NaN` never compares equal to itself, so a stored `NaN` would make
    /// every later [`set_config`](crate::popup::PopupStore::set_config) look
    /// like a change.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !self.edge_offset.is_finite() {
            self.edge_offset = 0.0;
        }
        match self.attachment_anchor {
            AttachmentAnchor::Rect(rect) if !rect.is_finite() => {
                self.attachment_anchor = AttachmentAnchor::Rect(Rect::ZERO);
            }
            AttachmentAnchor::Point(unit) if !(unit.x.is_finite() && unit.y.is_finite()) => {
                self.attachment_anchor = AttachmentAnchor::Point(UnitPoint::ZERO);
            }
            _ => {}
        }
        self
    }
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PopupConfig::default();
        assert_eq!(config.attachment_anchor, AttachmentAnchor::Bounds);
        assert_eq!(config.attachment_edge, AttachmentEdge::Top);
        assert_eq!(config.edge_offset, 12.0);
        assert_eq!(config.alignment, None);
        assert!(config.tap_outside_to_dismiss);
    }

    #[test]
    fn builders_touch_one_field() {
        let config = PopupConfig::DEFAULT
            .with_edge(AttachmentEdge::Bottom)
            .with_tap_outside_to_dismiss(false);
        assert_eq!(config.attachment_edge, AttachmentEdge::Bottom);
        assert!(!config.tap_outside_to_dismiss);
        assert_eq!(config.edge_offset, DEFAULT_EDGE_OFFSET);
    }

    #[test]
    fn sanitized_zeroes_non_finite_numbers() {
        let config = PopupConfig::DEFAULT
            .with_edge_offset(f64::NAN)
            .with_anchor(AttachmentAnchor::Point(UnitPoint::new(f64::INFINITY, 0.5)))
            .sanitized();
        assert_eq!(config.edge_offset, 0.0);
        assert_eq!(config.attachment_anchor, AttachmentAnchor::Point(UnitPoint::ZERO));
        assert_eq!(config, config.sanitized());

        let rect = Rect::new(0.0, f64::NAN, 10.0, 10.0);
        let config = PopupConfig::DEFAULT.with_anchor(AttachmentAnchor::Rect(rect)).sanitized();
        assert_eq!(config.attachment_anchor, AttachmentAnchor::Rect(Rect::ZERO));
    }

    #[test]
    fn sanitized_keeps_finite_values() {
        let config = PopupConfig::DEFAULT
            .with_edge_offset(-4.0)
            .with_anchor(AttachmentAnchor::Point(UnitPoint::BOTTOM));
        assert_eq!(config.sanitized(), config);
    }
}
