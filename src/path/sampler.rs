// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::geometry::Position;

use super::{DrawPath, PathSegment};

/// Measures a drawn path and finds points along it.
///
/// Hosts that already own a rendered path element can answer these from it; the crate
/// ships [`FlattenSampler`] for everything else.
pub trait CurveSampler {
    /// Total length, or `None` when the path cannot be measured.
    fn total_length(&self, path: &DrawPath) -> Option<f64>;

    /// Point at `distance` from the start, clamped to the path.
    fn point_at_length(&self, path: &DrawPath, distance: f64) -> Option<Position>;
}

/// Measures lines and arcs exactly and flattens cubics into short chords.
#[derive(Debug, Clone, Copy)]
pub struct FlattenSampler {
    pub cubic_steps: usize,
}

impl Default for FlattenSampler {
    fn default() -> Self {
        Self { cubic_steps: 32 }
    }
}

impl FlattenSampler {
    fn segment_length(&self, from: Position, segment: &PathSegment) -> f64 {
        match *segment {
            PathSegment::Line { to } => from.distance(to),
            PathSegment::Arc { radius, sweep, .. } => (radius * sweep).abs(),
            PathSegment::Cubic { c1, c2, to } => {
                let steps = self.cubic_steps.max(1);
                let mut length = 0.0;
                let mut prev = from;
                for i in 1..=steps {
                    let p = cubic_point(from, c1, c2, to, i as f64 / steps as f64);
                    length += prev.distance(p);
                    prev = p;
                }
                length
            }
        }
    }

    fn point_in_segment(&self, from: Position, segment: &PathSegment, offset: f64) -> Position {
        match *segment {
            PathSegment::Line { to } => {
                let len = from.distance(to);
                if len <= 0.0 {
                    return to;
                }
                from.lerp(to, (offset / len).clamp(0.0, 1.0))
            }
            PathSegment::Arc { center, radius, start_angle, sweep, to } => {
                if radius <= 0.0 || sweep == 0.0 {
                    return to;
                }
                let t = (offset / (radius * sweep).abs()).clamp(0.0, 1.0);
                let angle = start_angle + sweep * t;
                Position::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
            }
            PathSegment::Cubic { c1, c2, to } => {
                let steps = self.cubic_steps.max(1);
                let mut walked = 0.0;
                let mut prev = from;
                for i in 1..=steps {
                    let p = cubic_point(from, c1, c2, to, i as f64 / steps as f64);
                    let chord = prev.distance(p);
                    if walked + chord >= offset && chord > 0.0 {
                        return prev.lerp(p, (offset - walked) / chord);
                    }
                    walked += chord;
                    prev = p;
                }
                to
            }
        }
    }
}

impl CurveSampler for FlattenSampler {
    fn total_length(&self, path: &DrawPath) -> Option<f64> {
        if !path.is_finite() {
            return None;
        }
        let mut from = path.start;
        let mut total = 0.0;
        for segment in &path.segments {
            total += self.segment_length(from, segment);
            from = segment.end();
        }
        Some(total)
    }

    fn point_at_length(&self, path: &DrawPath, distance: f64) -> Option<Position> {
        if !path.is_finite() || !distance.is_finite() {
            return None;
        }
        let mut from = path.start;
        let mut remaining = distance.max(0.0);
        for segment in &path.segments {
            let len = self.segment_length(from, segment);
            if remaining <= len {
                return Some(self.point_in_segment(from, segment, remaining));
            }
            remaining -= len;
            from = segment.end();
        }
        Some(path.end())
    }
}

/// Point on a cubic Bezier at parameter `t`.
pub(crate) fn cubic_point(p0: Position, c1: Position, c2: Position, p3: Position, t: f64) -> Position {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Position::new(
        a * p0.x + b * c1.x + c * c2.x + d * p3.x,
        a * p0.y + b * c1.y + c * c2.y + d * p3.y,
    )
}
