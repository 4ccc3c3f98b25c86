// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::polyline;
use super::{EndpointGeometry, Pathfinder, RouteError, RouteRequest};
use crate::geometry::{Position, Side, EPSILON};
use crate::path::{DrawPath, EdgePath};

const CLEARANCE: f64 = 20.0;
const CORNER_RADIUS: f64 = 10.0;

/// Orthogonal router: straight, Z, L or a detour through points pushed out of each side.
///
/// The route is purely geometric; it may cross the endpoint nodes themselves.
#[derive(Debug, Clone, Copy)]
pub struct SquareRouter {
    pub rounded: bool,
    pub clearance: f64,
    pub corner_radius: f64,
}

impl Default for SquareRouter {
    fn default() -> Self {
        Self { rounded: true, clearance: CLEARANCE, corner_radius: CORNER_RADIUS }
    }
}

impl Pathfinder for SquareRouter {
    fn compute_path(&mut self, request: &RouteRequest<'_>) -> Result<EdgePath, RouteError> {
        request.validate()?;
        let waypoints = polyline::simplify(&self.waypoints(&request.from, &request.to));
        let center = polyline::middle_of(&waypoints)
            .ok_or(RouteError::Degenerate { reason: "orthogonal route collapsed" })?;

        let path = if self.rounded {
            polyline::filleted(&waypoints, self.corner_radius)
        } else {
            DrawPath::polyline(&waypoints)
        }
        .ok_or(RouteError::Degenerate { reason: "orthogonal route collapsed" })?;

        Ok(EdgePath { path, center })
    }
}

impl SquareRouter {
    fn waypoints(&self, from: &EndpointGeometry, to: &EndpointGeometry) -> Vec<Position> {
        let (p1, p2) = (from.anchor, to.anchor);
        let (s1, s2) = (from.side, to.side);

        if s2 == s1.opposite() && ahead(p1, s1, p2) {
            return straight_or_z(p1, p2, s1);
        }

        if s1.is_horizontal() != s2.is_horizontal() {
            let corner =
                if s1.is_horizontal() { Position::new(p2.x, p1.y) } else { Position::new(p1.x, p2.y) };
            if ahead(p1, s1, corner) && ahead(p2, s2, corner) {
                return vec![p1, corner, p2];
            }
        }

        let q1 = p1.move_in_direction(s1, self.clearance);
        let q2 = p2.move_in_direction(s2, self.clearance);

        if s1 == s2 {
            // U-turn around whichever point sticks out further.
            return if s1.is_horizontal() {
                let x = extreme(q1.x, q2.x, s1);
                vec![p1, Position::new(x, p1.y), Position::new(x, p2.y), p2]
            } else {
                let y = extreme(q1.y, q2.y, s1);
                vec![p1, Position::new(p1.x, y), Position::new(p2.x, y), p2]
            };
        }

        if s2 == s1.opposite() {
            // Facing away from each other: cross over on the line between the two nodes,
            // or beyond both when they overlap on that axis.
            return if s1.is_horizontal() {
                let y = self.crossing_line(from, to, false);
                vec![p1, q1, Position::new(q1.x, y), Position::new(q2.x, y), q2, p2]
            } else {
                let x = self.crossing_line(from, to, true);
                vec![p1, q1, Position::new(x, q1.y), Position::new(x, q2.y), q2, p2]
            };
        }

        let joint =
            if s1.is_horizontal() { Position::new(q1.x, q2.y) } else { Position::new(q2.x, q1.y) };
        vec![p1, q1, joint, q2, p2]
    }

    /// Coordinate of the crossing line on the axis perpendicular to the sides.
    fn crossing_line(&self, from: &EndpointGeometry, to: &EndpointGeometry, along_x: bool) -> f64 {
        let (a, b) = (from.bbox, to.bbox);
        let (a_min, a_max, b_min, b_max) = if along_x {
            (a.min_x, a.max_x, b.min_x, b.max_x)
        } else {
            (a.min_y, a.max_y, b.min_y, b.max_y)
        };
        if a_max < b_min {
            (a_max + b_min) / 2.0
        } else if b_max < a_min {
            (b_max + a_min) / 2.0
        } else {
            a_max.max(b_max) + self.clearance
        }
    }
}

/// Whether `target` lies strictly in front of `origin` when leaving through `side`.
fn ahead(origin: Position, side: Side, target: Position) -> bool {
    let delta = if side.is_horizontal() { target.x - origin.x } else { target.y - origin.y };
    delta * side.direction() > EPSILON
}

fn straight_or_z(p1: Position, p2: Position, s1: Side) -> Vec<Position> {
    if s1.is_horizontal() {
        if (p1.y - p2.y).abs() <= EPSILON {
            return vec![p1, p2];
        }
        let mid_x = (p1.x + p2.x) / 2.0;
        vec![p1, Position::new(mid_x, p1.y), Position::new(mid_x, p2.y), p2]
    } else {
        if (p1.x - p2.x).abs() <= EPSILON {
            return vec![p1, p2];
        }
        let mid_y = (p1.y + p2.y) / 2.0;
        vec![p1, Position::new(p1.x, mid_y), Position::new(p2.x, mid_y), p2]
    }
}

fn extreme(a: f64, b: f64, side: Side) -> f64 {
    if side.direction() > 0.0 {
        a.max(b)
    } else {
        a.min(b)
    }
}
