// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Drawable edge paths and the sampling seam used to place glyphs along them.

mod sampler;
mod svg;

pub use sampler::{CurveSampler, FlattenSampler};
pub(crate) use sampler::cubic_point;
pub use svg::fmt_num;

use smallvec::SmallVec;

use crate::geometry::Position;

/// One drawing command continuing from the previous end point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    Line {
        to: Position,
    },
    Cubic {
        c1: Position,
        c2: Position,
        to: Position,
    },
    /// Circular arc around `center`; angles are radians, positive `sweep` turns clockwise
    /// on screen (y grows downward).
    Arc {
        center: Position,
        radius: f64,
        start_angle: f64,
        sweep: f64,
        to: Position,
    },
}

impl PathSegment {
    pub fn end(&self) -> Position {
        match *self {
            PathSegment::Line { to }
            | PathSegment::Cubic { to, .. }
            | PathSegment::Arc { to, .. } => to,
        }
    }
}

/// A connected drawing made of segments from `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPath {
    pub start: Position,
    pub segments: SmallVec<[PathSegment; 8]>,
}

impl DrawPath {
    pub fn new(start: Position) -> Self {
        Self { start, segments: SmallVec::new() }
    }

    pub fn line_to(&mut self, to: Position) -> &mut Self {
        self.segments.push(PathSegment::Line { to });
        self
    }

    pub fn cubic_to(&mut self, c1: Position, c2: Position, to: Position) -> &mut Self {
        self.segments.push(PathSegment::Cubic { c1, c2, to });
        self
    }

    pub fn arc_to(
        &mut self,
        center: Position,
        radius: f64,
        start_angle: f64,
        sweep: f64,
        to: Position,
    ) -> &mut Self {
        self.segments.push(PathSegment::Arc { center, radius, start_angle, sweep, to });
        self
    }

    /// Straight polyline through `points`; `None` for fewer than two points.
    pub fn polyline(points: &[Position]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        if rest.is_empty() {
            return None;
        }
        let mut path = Self::new(*first);
        for p in rest {
            path.line_to(*p);
        }
        Some(path)
    }

    pub fn end(&self) -> Position {
        self.segments.last().map(PathSegment::end).unwrap_or(self.start)
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_finite()
            && self.segments.iter().all(|segment| match *segment {
                PathSegment::Line { to } => to.is_finite(),
                PathSegment::Cubic { c1, c2, to } => {
                    c1.is_finite() && c2.is_finite() && to.is_finite()
                }
                PathSegment::Arc { center, radius, start_angle, sweep, to } => {
                    center.is_finite()
                        && radius.is_finite()
                        && start_angle.is_finite()
                        && sweep.is_finite()
                        && to.is_finite()
                }
            })
    }

    /// SVG `d` attribute for this path.
    pub fn to_svg(&self) -> String {
        svg::path_data(self)
    }
}

/// Router output: the drawable path plus the point where the label sits.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    pub path: DrawPath,
    pub center: Position,
}

impl EdgePath {
    pub fn svg_path(&self) -> String {
        self.path.to_svg()
    }
}
