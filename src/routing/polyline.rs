// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Helpers shared by the polyline routers.

use crate::geometry::{Position, EPSILON};
use crate::path::DrawPath;

/// Drops repeated points and interior points that continue straight on.
pub(super) fn simplify(points: &[Position]) -> Vec<Position> {
    let mut deduped = Vec::<Position>::with_capacity(points.len());
    for p in points {
        if deduped.last().is_some_and(|last| last.approx_eq(*p)) {
            continue;
        }
        deduped.push(*p);
    }

    if deduped.len() <= 2 {
        return deduped;
    }

    let mut out = Vec::<Position>::with_capacity(deduped.len());
    out.push(deduped[0]);
    for idx in 1..deduped.len() - 1 {
        let prev = out[out.len() - 1];
        let cur = deduped[idx];
        let next = deduped[idx + 1];
        let (ax, ay) = (cur.x - prev.x, cur.y - prev.y);
        let (bx, by) = (next.x - cur.x, next.y - cur.y);
        let cross = ax * by - ay * bx;
        let dot = ax * bx + ay * by;
        let scale = (ax.hypot(ay) * bx.hypot(by)).max(EPSILON);
        if (cross / scale).abs() <= EPSILON && dot > 0.0 {
            continue;
        }
        out.push(cur);
    }
    if let Some(last) = deduped.last() {
        out.push(*last);
    }
    out
}

pub(super) fn length(points: &[Position]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Waypoint whose arc-length position is closest to half the total length.
pub(super) fn waypoint_nearest_half_length(points: &[Position]) -> Option<Position> {
    let half = length(points) / 2.0;
    let mut walked = 0.0;
    let mut best: Option<(f64, Position)> = None;
    for (idx, p) in points.iter().enumerate() {
        if idx > 0 {
            walked += points[idx - 1].distance(*p);
        }
        let score = (walked - half).abs();
        match best {
            Some((best_score, _)) if best_score <= score => {}
            _ => best = Some((score, *p)),
        }
    }
    best.map(|(_, p)| p)
}

/// Midpoint of the middle segment for an odd segment count, else the middle waypoint.
pub(super) fn middle_of(points: &[Position]) -> Option<Position> {
    let segments = points.len().checked_sub(1).filter(|n| *n > 0)?;
    if segments % 2 == 1 {
        let idx = segments / 2;
        Some(points[idx].midpoint(points[idx + 1]))
    } else {
        Some(points[segments / 2])
    }
}

/// Draws `points` as a polyline whose corners are replaced by circular arcs of `radius`.
///
/// Each arc takes at most half of either adjacent segment, so neighbouring fillets never
/// overlap; the radius shrinks to fit on short segments. Straight joints and reversals stay
/// sharp.
pub(super) fn filleted(points: &[Position], radius: f64) -> Option<DrawPath> {
    let (first, _) = points.split_first()?;
    if points.len() < 2 {
        return None;
    }
    let mut path = DrawPath::new(*first);
    let mut cursor = *first;

    for idx in 1..points.len() - 1 {
        let (prev, cur, next) = (points[idx - 1], points[idx], points[idx + 1]);
        let Some(corner) = Fillet::at(prev, cur, next, radius) else {
            push_line(&mut path, &mut cursor, cur);
            continue;
        };
        push_line(&mut path, &mut cursor, corner.entry);
        path.arc_to(corner.center, corner.radius, corner.start_angle, corner.sweep, corner.exit);
        cursor = corner.exit;
    }

    if let Some(last) = points.last() {
        push_line(&mut path, &mut cursor, *last);
    }
    Some(path)
}

fn push_line(path: &mut DrawPath, cursor: &mut Position, to: Position) {
    if cursor.approx_eq(to) {
        return;
    }
    path.line_to(to);
    *cursor = to;
}

struct Fillet {
    entry: Position,
    exit: Position,
    center: Position,
    radius: f64,
    start_angle: f64,
    sweep: f64,
}

impl Fillet {
    fn at(prev: Position, cur: Position, next: Position, radius: f64) -> Option<Self> {
        if radius <= 0.0 {
            return None;
        }
        let len_in = prev.distance(cur);
        let len_out = cur.distance(next);
        if len_in <= EPSILON || len_out <= EPSILON {
            return None;
        }
        let d_in = Position::new((cur.x - prev.x) / len_in, (cur.y - prev.y) / len_in);
        let d_out = Position::new((next.x - cur.x) / len_out, (next.y - cur.y) / len_out);
        let cross = d_in.x * d_out.y - d_in.y * d_out.x;
        let dot = d_in.x * d_out.x + d_in.y * d_out.y;
        if cross.abs() <= EPSILON {
            return None;
        }

        // Turning angle between the two directions, in (0, pi).
        let turn = cross.abs().atan2(dot);
        let half_tan = (turn / 2.0).tan();
        let tangent = (radius * half_tan).min(len_in / 2.0).min(len_out / 2.0);
        if tangent <= EPSILON {
            return None;
        }
        let radius = tangent / half_tan;

        let entry = Position::new(cur.x - d_in.x * tangent, cur.y - d_in.y * tangent);
        let exit = Position::new(cur.x + d_out.x * tangent, cur.y + d_out.y * tangent);
        let normal = if cross > 0.0 {
            Position::new(-d_in.y, d_in.x)
        } else {
            Position::new(d_in.y, -d_in.x)
        };
        let center = Position::new(entry.x + normal.x * radius, entry.y + normal.y * radius);
        let start_angle = (entry.y - center.y).atan2(entry.x - center.x);
        let sweep = if cross > 0.0 { turn } else { -turn };

        Some(Self { entry, exit, center, radius, start_angle, sweep })
    }
}
