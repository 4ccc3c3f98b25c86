// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{ArrowShape, ArrowSize};

/// Polygon `points` for the line-end decoration of an edge.
///
/// The polygon tip sits at the origin and the body extends along +y, which is how the host
/// orients its line-end markers. `None` keeps the host's triangle; only direction arrows
/// are suppressed for it.
pub fn end_cap_points(shape: ArrowShape) -> &'static str {
    match shape {
        ArrowShape::HalvedTriangle => "-2,0 7.5,12 -2,12",
        ArrowShape::ThinTriangle => "0,0 7,10 0,0 0,10 0,0 -7,10",
        ArrowShape::Diamond | ArrowShape::DiamondOutline => "0,0 5,10 0,20 -5,10",
        ArrowShape::Circle | ArrowShape::CircleOutline => {
            "0 0, 4.95 1.8, 7.5 6.45, 6.6 11.7, 2.7 15, -2.7 15, -6.6 11.7, -7.5 6.45, -4.95 1.8"
        }
        ArrowShape::Blunt => "-10,8 10,8 10,6 -10,6",
        ArrowShape::Triangle | ArrowShape::None => "0,0 6.5,10.4 -6.5,10.4",
    }
}

/// How far the end cap polygon extends along +y from its tip; the drawn line stops there.
pub fn end_cap_depth(shape: ArrowShape) -> f64 {
    match shape {
        ArrowShape::HalvedTriangle => 12.0,
        ArrowShape::ThinTriangle => 10.0,
        ArrowShape::Diamond | ArrowShape::DiamondOutline => 20.0,
        ArrowShape::Circle | ArrowShape::CircleOutline => 15.0,
        ArrowShape::Blunt => 8.0,
        ArrowShape::Triangle | ArrowShape::None => 10.4,
    }
}

/// Whether the end cap is drawn as an outline instead of a filled shape.
pub fn end_cap_is_outline(shape: ArrowShape) -> bool {
    matches!(shape, ArrowShape::DiamondOutline | ArrowShape::CircleOutline)
}

/// Polygon `points` of a direction arrow; the tip is at the origin pointing along +x.
pub fn arrow_glyph_points(size: ArrowSize) -> &'static str {
    match size {
        ArrowSize::Small => "0,0 -8,-4 -8,4",
        ArrowSize::Medium => "0,0 -12,-6 -12,6",
        ArrowSize::Large => "0,0 -16,-8 -16,8",
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{arrow_glyph_points, end_cap_depth, end_cap_is_outline, end_cap_points};
    use crate::model::{ArrowShape, ArrowSize};

    #[rstest]
    #[case(ArrowShape::Diamond, ArrowShape::DiamondOutline)]
    #[case(ArrowShape::Circle, ArrowShape::CircleOutline)]
    #[case(ArrowShape::Triangle, ArrowShape::None)]
    fn shape_variants_share_polygons(#[case] a: ArrowShape, #[case] b: ArrowShape) {
        assert_eq!(end_cap_points(a), end_cap_points(b));
    }

    #[rstest]
    #[case(ArrowShape::Triangle)]
    #[case(ArrowShape::HalvedTriangle)]
    #[case(ArrowShape::ThinTriangle)]
    #[case(ArrowShape::Diamond)]
    #[case(ArrowShape::Circle)]
    #[case(ArrowShape::Blunt)]
    fn depth_is_the_deepest_polygon_point(#[case] shape: ArrowShape) {
        let deepest = end_cap_points(shape)
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .skip(1)
            .step_by(2)
            .filter_map(|y| y.parse::<f64>().ok())
            .fold(f64::MIN, f64::max);
        assert_eq!(end_cap_depth(shape), deepest);
    }

    #[test]
    fn outline_flags() {
        assert!(end_cap_is_outline(ArrowShape::CircleOutline));
        assert!(!end_cap_is_outline(ArrowShape::Circle));
    }

    #[test]
    fn glyph_sizes_scale() {
        assert_eq!(arrow_glyph_points(ArrowSize::Small), "0,0 -8,-4 -8,4");
        assert_eq!(arrow_glyph_points(ArrowSize::Large), "0,0 -16,-8 -16,8");
    }
}
