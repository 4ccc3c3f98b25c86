// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Position, Side};

/// Axis-aligned bounds of a node or a group of nodes.
///
/// `min_x <= max_x` and `min_y <= max_y` hold for every value built through the
/// constructors in this module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: max_x.max(min_x),
            max_y: max_y.max(min_y),
        }
    }

    /// Bounds of a node record (`x`, `y`, `width`, `height`).
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Smallest box containing every point.
    pub fn from_points(points: &[Position]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bbox = Self::new(first.x, first.y, first.x, first.y);
        for p in rest {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        Some(bbox)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Position {
        Position::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }

    /// Grows or shrinks the box about its own center; `1.0` is the identity.
    pub fn scale(&self, factor: f64) -> Self {
        let diff_x = (factor - 1.0) * self.width();
        let diff_y = (factor - 1.0) * self.height();
        Self::new(
            self.min_x - diff_x / 2.0,
            self.min_y - diff_y / 2.0,
            self.max_x + diff_x / 2.0,
            self.max_y + diff_y / 2.0,
        )
    }

    /// Pads every side by `padding`; negative padding shrinks the box.
    pub fn enlarge(&self, padding: f64) -> Self {
        Self::new(
            self.min_x - padding,
            self.min_y - padding,
            self.max_x + padding,
            self.max_y + padding,
        )
    }

    /// Closed-rectangle overlap test (touching counts).
    pub fn colliding(&self, other: &BBox) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Whether `point` lies inside; `inclusive` allows it to sit on the border.
    pub fn contains_point(&self, point: Position, inclusive: bool) -> bool {
        let (x, y) = (point.x, point.y);
        if inclusive {
            x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
        } else {
            x > self.min_x && x < self.max_x && y > self.min_y && y < self.max_y
        }
    }

    /// Whether `inner` lies inside; `inclusive` allows shared borders.
    pub fn contains_bbox(&self, inner: &BBox, inclusive: bool) -> bool {
        if inclusive {
            inner.min_x >= self.min_x
                && inner.max_x <= self.max_x
                && inner.min_y >= self.min_y
                && inner.max_y <= self.max_y
        } else {
            inner.min_x > self.min_x
                && inner.max_x < self.max_x
                && inner.min_y > self.min_y
                && inner.max_y < self.max_y
        }
    }

    /// Point on `side` at `relative` in `[0, 1]`.
    ///
    /// `0` is the top-left-most corner of that side (left end of top/bottom, upper end of
    /// left/right) and `1` the opposite corner.
    pub fn point_on_side(&self, side: Side, relative: f64) -> Position {
        match side {
            Side::Top => Position::new(self.min_x + self.width() * relative, self.min_y),
            Side::Right => Position::new(self.max_x, self.min_y + self.height() * relative),
            Side::Bottom => Position::new(self.min_x + self.width() * relative, self.max_y),
            Side::Left => Position::new(self.min_x, self.min_y + self.height() * relative),
        }
    }

    pub fn side_midpoint(&self, side: Side) -> Position {
        self.point_on_side(side, 0.5)
    }

    /// Inverse of [`BBox::point_on_side`] for an arbitrary point, clamped to `[0, 1]`.
    ///
    /// A zero-length side maps to its midpoint.
    pub fn relative_position_on_side(&self, side: Side, point: Position) -> f64 {
        let (offset, length) = if side.is_horizontal() {
            (point.y - self.min_y, self.height())
        } else {
            (point.x - self.min_x, self.width())
        };
        if length <= 0.0 {
            return 0.5;
        }
        (offset / length).clamp(0.0, 1.0)
    }
}

/// Union of a set of boxes.
///
/// Callers must not pass an empty slice; `None` is returned for it so the mistake stays
/// visible instead of producing an inverted infinite box.
pub fn combine(bboxes: &[BBox]) -> Option<BBox> {
    let (first, rest) = bboxes.split_first()?;
    Some(rest.iter().fold(*first, |acc, b| BBox {
        min_x: acc.min_x.min(b.min_x),
        min_y: acc.min_y.min(b.min_y),
        max_x: acc.max_x.max(b.max_x),
        max_y: acc.max_y.max(b.max_y),
    }))
}
