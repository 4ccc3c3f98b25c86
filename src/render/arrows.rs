// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::Write as _;

use super::markers::arrow_glyph_points;
use crate::geometry::Position;
use crate::model::{ArrowShape, EdgeId, EdgeStyle};
use crate::path::{fmt_num, CurveSampler, DrawPath};

pub const MAX_ARROWS: usize = 20;

/// Fraction of the path length used on each side of an arrow to estimate the tangent.
const TANGENT_SAMPLE: f64 = 0.01;

/// A direction arrow placed on an edge path.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowGlyph {
    pub position: Position,
    /// Rotation in degrees, `0` pointing along +x.
    pub angle_degrees: f64,
    pub points: &'static str,
    pub fill: String,
    pub visible: bool,
}

impl ArrowGlyph {
    /// SVG `<polygon>` element for this glyph.
    pub fn to_svg(&self, edge_id: &EdgeId) -> String {
        let mut out = String::with_capacity(192);
        let _ = write!(
            out,
            "<polygon class=\"edge-direction-arrow\" points=\"{}\" fill=\"{}\" \
             stroke=\"var(--background-primary)\" stroke-width=\"1\" \
             transform=\"translate({},{}) rotate({})\" data-edge-id=\"{}\"",
            self.points,
            escape_attr(&self.fill),
            fmt_num(self.position.x),
            fmt_num(self.position.y),
            fmt_num(self.angle_degrees),
            escape_attr(edge_id.as_str()),
        );
        if !self.visible {
            out.push_str(" style=\"display:none\"");
        }
        out.push_str("/>");
        out
    }
}

/// Number of arrows for a path of `length` at a density `divisor`: one per divisor
/// pixels, at least one and at most [`MAX_ARROWS`].
pub fn arrow_count(length: f64, divisor: f64) -> usize {
    let raw = (length / divisor).floor();
    if raw.is_finite() && raw > 1.0 {
        (raw as usize).min(MAX_ARROWS)
    } else {
        1
    }
}

/// Rebuilds the full arrow set for a path.
///
/// Returns `None` when the sampler cannot measure the path, so callers keep what they had.
/// A zero-length path or an edge styled without arrows yields an empty set.
pub fn place_arrows(
    path: &DrawPath,
    style: &EdgeStyle,
    fill: &str,
    visible: bool,
    sampler: &dyn CurveSampler,
) -> Option<Vec<ArrowGlyph>> {
    if style.arrow == ArrowShape::None {
        return Some(Vec::new());
    }
    let length = sampler.total_length(path)?;
    if !(length > 0.0) {
        return Some(Vec::new());
    }

    let count = arrow_count(length, style.arrow_density.divisor());
    let points = arrow_glyph_points(style.arrow_size);
    let delta = TANGENT_SAMPLE * length;

    let mut glyphs = Vec::with_capacity(count);
    for i in 1..=count {
        let at = length * i as f64 / (count + 1) as f64;
        let position = sampler.point_at_length(path, at)?;
        let before = sampler.point_at_length(path, (at - delta).max(0.0))?;
        let after = sampler.point_at_length(path, (at + delta).min(length))?;
        let angle_degrees = (after.y - before.y).atan2(after.x - before.x).to_degrees();
        glyphs.push(ArrowGlyph {
            position,
            angle_degrees,
            points,
            fill: fill.to_owned(),
            visible,
        });
    }
    Some(glyphs)
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
