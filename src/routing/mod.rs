// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Edge routers.
//!
//! Every router answers the same [`RouteRequest`]: the two endpoint boxes with their anchor
//! and side, plus every other node box as potential obstacle. A failed route is never fatal;
//! callers keep whatever they drew before.

pub mod a_star;
mod direct;
mod polyline;
mod square;

pub use a_star::{AStarOptions, AStarRouter};
pub use direct::DirectRouter;
pub use square::SquareRouter;

use std::fmt;

use crate::geometry::{BBox, Position, Side};
use crate::path::EdgePath;

/// Routing strategy selected by an edge's `pathfindingMethod` style attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PathfindingMethod {
    #[default]
    Direct,
    Square,
    AStar,
}

impl PathfindingMethod {
    /// Exact style value match; `None` for anything the router table does not know.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "direct" => Some(Self::Direct),
            "square" => Some(Self::Square),
            "a-star" => Some(Self::AStar),
            _ => None,
        }
    }

    /// Resolves a style value; anything unknown or missing routes directly.
    pub fn from_style_value(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Square => "square",
            Self::AStar => "a-star",
        }
    }
}

impl fmt::Display for PathfindingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geometry of one edge end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointGeometry {
    pub bbox: BBox,
    /// Where the drawn curve actually touches the node.
    pub anchor: Position,
    pub side_midpoint: Position,
    pub side: Side,
}

impl EndpointGeometry {
    /// Anchors at `relative` along `side` (midpoint when absent).
    pub fn on_side(bbox: BBox, side: Side, relative: Option<f64>) -> Self {
        let relative = relative.filter(|r| r.is_finite()).unwrap_or(0.5).clamp(0.0, 1.0);
        Self {
            bbox,
            anchor: bbox.point_on_side(side, relative),
            side_midpoint: bbox.side_midpoint(side),
            side,
        }
    }

    /// Moves the anchor `distance` outward from the side, where a line-end marker begins.
    /// `side_midpoint` stays on the node.
    pub fn with_marker_offset(mut self, distance: f64) -> Self {
        self.anchor = self.anchor.move_in_direction(self.side, distance);
        self
    }

    fn is_finite(&self) -> bool {
        self.bbox.is_finite() && self.anchor.is_finite() && self.side_midpoint.is_finite()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RouteRequest<'a> {
    pub from: EndpointGeometry,
    pub to: EndpointGeometry,
    /// Boxes of every node except the two endpoints.
    pub obstacles: &'a [BBox],
}

impl RouteRequest<'_> {
    pub(crate) fn validate(&self) -> Result<(), RouteError> {
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err(RouteError::Degenerate { reason: "non-finite endpoint geometry" });
        }
        if self.from.anchor.approx_eq(self.to.anchor) {
            return Err(RouteError::Degenerate { reason: "endpoints coincide" });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteError {
    Degenerate { reason: &'static str },
    NoPath { from: Position, to: Position },
    GridTooLarge { cells: usize },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degenerate { reason } => write!(f, "degenerate route input: {reason}"),
            Self::NoPath { from, to } => write!(
                f,
                "no obstacle-free path from ({}, {}) to ({}, {})",
                from.x, from.y, to.x, to.y
            ),
            Self::GridTooLarge { cells } => {
                write!(f, "routing grid of {cells} cells exceeds the configured limit")
            }
        }
    }
}

impl std::error::Error for RouteError {}

/// A routing strategy.
pub trait Pathfinder {
    fn compute_path(&mut self, request: &RouteRequest<'_>) -> Result<EdgePath, RouteError>;
}

/// Per-call switches resolved from settings and edge style overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTuning {
    pub square_rounded: bool,
    pub a_star_rounded: bool,
    pub allow_diagonal: bool,
}

impl Default for RouteTuning {
    fn default() -> Self {
        Self { square_rounded: true, a_star_rounded: true, allow_diagonal: false }
    }
}

/// Owns one instance of each router so the A* scratch buffers are reused across edges.
#[derive(Debug, Default)]
pub struct EdgeRouter {
    direct: DirectRouter,
    square: SquareRouter,
    a_star: AStarRouter,
}

impl EdgeRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_a_star_options(options: AStarOptions) -> Self {
        Self { a_star: AStarRouter::new(options), ..Self::default() }
    }

    pub fn route(
        &mut self,
        method: PathfindingMethod,
        request: &RouteRequest<'_>,
        tuning: RouteTuning,
    ) -> Result<EdgePath, RouteError> {
        match method {
            PathfindingMethod::Direct => self.direct.compute_path(request),
            PathfindingMethod::Square => {
                self.square.rounded = tuning.square_rounded;
                self.square.compute_path(request)
            }
            PathfindingMethod::AStar => {
                self.a_star.options.rounded = tuning.a_star_rounded;
                self.a_star.options.allow_diagonal = tuning.allow_diagonal;
                self.a_star.compute_path(request)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{EdgeRouter, EndpointGeometry, PathfindingMethod, RouteError, RouteRequest};
    use crate::geometry::{BBox, Position, Side};

    #[rstest]
    #[case(Some("direct"), PathfindingMethod::Direct)]
    #[case(Some("square"), PathfindingMethod::Square)]
    #[case(Some("a-star"), PathfindingMethod::AStar)]
    #[case(Some("A-Star"), PathfindingMethod::Direct)]
    #[case(None, PathfindingMethod::Direct)]
    fn style_values_resolve_with_a_default_arm(
        #[case] value: Option<&str>,
        #[case] expected: PathfindingMethod,
    ) {
        assert_eq!(PathfindingMethod::from_style_value(value), expected);
    }

    #[test]
    fn endpoint_anchor_honours_relative_position() {
        let bbox = BBox::new(0.0, 0.0, 100.0, 40.0);
        let mid = EndpointGeometry::on_side(bbox, Side::Bottom, None);
        assert_eq!(mid.anchor, Position::new(50.0, 40.0));
        assert_eq!(mid.side_midpoint, mid.anchor);

        let biased = EndpointGeometry::on_side(bbox, Side::Bottom, Some(0.25));
        assert_eq!(biased.anchor, Position::new(25.0, 40.0));
        assert_eq!(biased.side_midpoint, Position::new(50.0, 40.0));

        let clamped = EndpointGeometry::on_side(bbox, Side::Bottom, Some(3.0));
        assert_eq!(clamped.anchor, Position::new(100.0, 40.0));
    }

    #[test]
    fn marker_offset_moves_only_the_anchor() {
        let bbox = BBox::new(0.0, 0.0, 100.0, 40.0);
        let left = EndpointGeometry::on_side(bbox, Side::Left, Some(0.25)).with_marker_offset(8.0);
        assert_eq!(left.anchor, Position::new(-8.0, 10.0));
        assert_eq!(left.side_midpoint, Position::new(0.0, 20.0));

        let bottom = EndpointGeometry::on_side(bbox, Side::Bottom, None).with_marker_offset(20.0);
        assert_eq!(bottom.anchor, Position::new(50.0, 60.0));
    }

    #[test]
    fn coinciding_anchors_are_degenerate_for_every_method() {
        let bbox = BBox::new(0.0, 0.0, 100.0, 100.0);
        let end = EndpointGeometry::on_side(bbox, Side::Right, None);
        let request = RouteRequest { from: end, to: end, obstacles: &[] };
        let mut router = EdgeRouter::new();
        for method in [PathfindingMethod::Direct, PathfindingMethod::Square, PathfindingMethod::AStar]
        {
            let result = router.route(method, &request, Default::default());
            assert!(matches!(result, Err(RouteError::Degenerate { .. })), "{method}");
        }
    }
}
