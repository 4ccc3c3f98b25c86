// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Obstacle-aware grid search router.
//!
//! The area around both endpoint nodes is sampled on a uniform grid. Cells whose center
//! falls inside another node (grown by a clearance) are blocked, and an A* search runs
//! between the cells just outside each anchor. Scratch buffers survive between calls and
//! are invalidated with generation counters instead of being cleared.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::polyline;
use super::{Pathfinder, RouteError, RouteRequest};
use crate::geometry::{combine, BBox, Position, Side};
use crate::path::{DrawPath, EdgePath};

const ORTHOGONAL_COST: u32 = 1000;
const DIAGONAL_COST: u32 = 1414;

const MIN_DERIVED_CELL: f64 = 5.0;
const MAX_DERIVED_CELL: f64 = 20.0;
const CELLS_PER_SPAN: f64 = 64.0;

/// Right, down, left, up, then the four diagonals.
const DIRECTIONS: [(i32, i32); 8] =
    [(1, 0), (0, 1), (-1, 0), (0, -1), (1, 1), (1, -1), (-1, 1), (-1, -1)];
const NO_DIRECTION: u8 = u8::MAX;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AStarOptions {
    /// Fixed cell size in canvas pixels; derived from the routed area when `None`.
    pub cell_size: Option<f64>,
    /// Padding added around the two endpoint boxes to form the search area.
    pub margin: f64,
    /// Padding added around each obstacle before blocking cells.
    pub clearance: f64,
    pub max_cells: usize,
    pub allow_diagonal: bool,
    pub rounded: bool,
    pub corner_radius: f64,
}

impl Default for AStarOptions {
    fn default() -> Self {
        Self {
            cell_size: None,
            margin: 80.0,
            clearance: 10.0,
            max_cells: 250_000,
            allow_diagonal: false,
            rounded: true,
            corner_radius: 10.0,
        }
    }
}

#[derive(Debug, Default)]
pub struct AStarRouter {
    pub options: AStarOptions,
    scratch: ShortestPathScratch,
}

impl AStarRouter {
    pub fn new(options: AStarOptions) -> Self {
        Self { options, scratch: ShortestPathScratch::default() }
    }

    fn grid_for(&self, region: BBox) -> Result<RoutingGrid, RouteError> {
        let fixed = self.options.cell_size.filter(|c| c.is_finite() && *c > 0.0);
        let mut cell = fixed.unwrap_or_else(|| {
            (region.width().max(region.height()) / CELLS_PER_SPAN)
                .clamp(MIN_DERIVED_CELL, MAX_DERIVED_CELL)
        });

        loop {
            let grid = RoutingGrid::covering(region, cell);
            let cells = grid.width.saturating_mul(grid.height);
            if cells <= self.options.max_cells {
                return Ok(grid);
            }
            if fixed.is_some() {
                return Err(RouteError::GridTooLarge { cells });
            }
            cell *= 1.25;
        }
    }
}

impl Pathfinder for AStarRouter {
    fn compute_path(&mut self, request: &RouteRequest<'_>) -> Result<EdgePath, RouteError> {
        request.validate()?;
        let (from, to) = (request.from, request.to);
        let region = combine(&[from.bbox, to.bbox])
            .ok_or(RouteError::Degenerate { reason: "missing endpoint boxes" })?
            .enlarge(self.options.margin);
        let grid = self.grid_for(region)?;

        self.scratch.configure(grid, request.obstacles, self.options.clearance);
        let start = grid.nearest(from.anchor.move_in_direction(from.side, grid.cell));
        let goal = grid.nearest(to.anchor.move_in_direction(to.side, grid.cell));

        let Some(cells) = self
            .scratch
            .search(start, goal, self.options.allow_diagonal, direction_of(from.side))
            .map(compress_to_polyline)
        else {
            tracing::trace!(
                width = grid.width,
                height = grid.height,
                expanded = self.scratch.expanded,
                "a* search exhausted without reaching the goal"
            );
            return Err(RouteError::NoPath { from: from.anchor, to: to.anchor });
        };
        tracing::trace!(
            width = grid.width,
            height = grid.height,
            cell = grid.cell,
            expanded = self.scratch.expanded,
            waypoints = cells.len(),
            "a* search finished"
        );

        let (Some(first), Some(last)) = (cells.first(), cells.last()) else {
            return Err(RouteError::NoPath { from: from.anchor, to: to.anchor });
        };
        let first = grid.to_canvas(*first);
        let last = grid.to_canvas(*last);

        let mut points = Vec::with_capacity(cells.len() + 4);
        points.push(from.anchor);
        points.push(exit_joint(from.anchor, from.side, first));
        points.extend(cells.iter().map(|p| grid.to_canvas(*p)));
        points.push(exit_joint(to.anchor, to.side, last));
        points.push(to.anchor);
        let points = polyline::simplify(&points);

        let center = if points.len() == 2 {
            Some(points[0].midpoint(points[1]))
        } else {
            polyline::waypoint_nearest_half_length(&points)
        }
        .ok_or(RouteError::Degenerate { reason: "grid route collapsed" })?;

        let path = if self.options.rounded {
            polyline::filleted(&points, self.options.corner_radius)
        } else {
            DrawPath::polyline(&points)
        }
        .ok_or(RouteError::Degenerate { reason: "grid route collapsed" })?;

        Ok(EdgePath { path, center })
    }
}

/// Square corner between an anchor and the first grid waypoint, keeping the exit
/// perpendicular to the node side.
fn exit_joint(anchor: Position, side: Side, cell: Position) -> Position {
    if side.is_horizontal() {
        Position::new(cell.x, anchor.y)
    } else {
        Position::new(anchor.x, cell.y)
    }
}

fn direction_of(side: Side) -> u8 {
    match side {
        Side::Right => 0,
        Side::Bottom => 1,
        Side::Left => 2,
        Side::Top => 3,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct GridPoint {
    x: i32,
    y: i32,
}

impl GridPoint {
    fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct RoutingGrid {
    origin: Position,
    cell: f64,
    width: usize,
    height: usize,
}

impl RoutingGrid {
    fn covering(region: BBox, cell: f64) -> Self {
        let width = (region.width() / cell).floor() as usize + 1;
        let height = (region.height() / cell).floor() as usize + 1;
        Self { origin: Position::new(region.min_x, region.min_y), cell, width, height }
    }

    fn len(&self) -> usize {
        self.width * self.height
    }

    fn idx_of(&self, point: GridPoint) -> Option<usize> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as usize, point.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    fn point_of(&self, idx: usize) -> GridPoint {
        GridPoint::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    fn to_canvas(&self, point: GridPoint) -> Position {
        Position::new(
            self.origin.x + point.x as f64 * self.cell,
            self.origin.y + point.y as f64 * self.cell,
        )
    }

    fn nearest(&self, position: Position) -> GridPoint {
        let x = ((position.x - self.origin.x) / self.cell).round();
        let y = ((position.y - self.origin.y) / self.cell).round();
        GridPoint::new(
            x.clamp(0.0, (self.width - 1) as f64) as i32,
            y.clamp(0.0, (self.height - 1) as f64) as i32,
        )
    }

    /// Inclusive index range of cells whose centers lie in `[min, max]` along one axis.
    fn span(&self, min: f64, max: f64, origin: f64, count: usize) -> Option<(usize, usize)> {
        let lo = ((min - origin) / self.cell).ceil().max(0.0);
        let hi = ((max - origin) / self.cell).floor().min((count - 1) as f64);
        (lo <= hi).then_some((lo as usize, hi as usize))
    }
}

#[derive(Debug, Default)]
struct ShortestPathScratch {
    grid: Option<RoutingGrid>,
    obstacles: Vec<u8>,
    closed_gen: Vec<u32>,
    came_from: Vec<i32>,
    arrived: Vec<u8>,
    turns: Vec<u16>,
    dist_gen: Vec<u32>,
    dist_cost: Vec<u32>,
    path: Vec<GridPoint>,
    gen: u32,
    heap: BinaryHeap<Reverse<(u32, u32, u32, u32)>>,
    expanded: usize,
}

impl ShortestPathScratch {
    fn configure(&mut self, grid: RoutingGrid, obstacles: &[BBox], clearance: f64) {
        let len = grid.len();
        if self.obstacles.len() != len {
            self.obstacles = vec![0u8; len];
            self.closed_gen = vec![0u32; len];
            self.came_from = vec![-1i32; len];
            self.arrived = vec![NO_DIRECTION; len];
            self.turns = vec![0u16; len];
            self.dist_gen = vec![0u32; len];
            self.dist_cost = vec![0u32; len];
        } else {
            self.obstacles.fill(0);
        }
        self.grid = Some(grid);

        let reserve_hint = len.min(4096);
        self.heap.reserve(reserve_hint.saturating_sub(self.heap.len()));

        for obstacle in obstacles {
            let blocked = obstacle.enlarge(clearance);
            let Some((x0, x1)) = grid.span(blocked.min_x, blocked.max_x, grid.origin.x, grid.width)
            else {
                continue;
            };
            let Some((y0, y1)) =
                grid.span(blocked.min_y, blocked.max_y, grid.origin.y, grid.height)
            else {
                continue;
            };
            for y in y0..=y1 {
                let row = y * grid.width;
                self.obstacles[row + x0..=row + x1].fill(1);
            }
        }
    }

    fn begin(&mut self) -> u32 {
        self.gen = self.gen.wrapping_add(1);
        if self.gen == 0 {
            self.closed_gen.fill(0);
            self.dist_gen.fill(0);
            self.gen = 1;
        }
        self.heap.clear();
        self.expanded = 0;
        self.gen
    }

    fn close(&mut self, idx: usize, gen: u32) -> bool {
        if self.closed_gen[idx] == gen {
            return false;
        }
        self.closed_gen[idx] = gen;
        true
    }

    fn dist(&self, idx: usize, gen: u32) -> u32 {
        if self.dist_gen[idx] == gen {
            self.dist_cost[idx]
        } else {
            u32::MAX
        }
    }

    fn set_dist(&mut self, idx: usize, gen: u32, cost: u32, came_from: i32, dir: u8, turns: u16) {
        self.dist_gen[idx] = gen;
        self.dist_cost[idx] = cost;
        self.came_from[idx] = came_from;
        self.arrived[idx] = dir;
        self.turns[idx] = turns;
    }

    fn blocked(&self, grid: RoutingGrid, point: GridPoint) -> bool {
        grid.idx_of(point).map_or(true, |idx| self.obstacles[idx] != 0)
    }

    /// Cheapest cell path from `start` to `goal`; among equally cheap paths the one with
    /// fewer turns wins. Start and goal are always enterable.
    fn search(
        &mut self,
        start: GridPoint,
        goal: GridPoint,
        allow_diagonal: bool,
        initial_dir: u8,
    ) -> Option<&[GridPoint]> {
        let grid = self.grid?;
        let start_idx = grid.idx_of(start)?;
        let goal_idx = grid.idx_of(goal)?;
        let directions = if allow_diagonal { &DIRECTIONS[..] } else { &DIRECTIONS[..4] };

        let gen = self.begin();
        self.set_dist(start_idx, gen, 0, -1, initial_dir, 0);
        let h0 = heuristic(start, goal, allow_diagonal);
        self.heap.push(Reverse((h0, 0, 0, start_idx as u32)));
        let mut tie_seq = 1u32;

        while let Some(Reverse((_f_cost, g_cost, _tie, idx))) = self.heap.pop() {
            let idx = idx as usize;
            if g_cost != self.dist(idx, gen) || !self.close(idx, gen) {
                continue;
            }
            self.expanded += 1;

            if idx == goal_idx {
                return self.reconstruct(grid, start_idx, goal_idx);
            }

            let current = grid.point_of(idx);
            let arrived = self.arrived[idx];
            let turns_here = self.turns[idx];
            for (dir, &(dx, dy)) in directions.iter().enumerate() {
                let dir = dir as u8;
                let next = current.offset(dx, dy);
                let Some(next_idx) = grid.idx_of(next) else {
                    continue;
                };
                if self.closed_gen[next_idx] == gen {
                    continue;
                }
                if next_idx != goal_idx && self.obstacles[next_idx] != 0 {
                    continue;
                }
                let diagonal = dx != 0 && dy != 0;
                if diagonal
                    && (self.blocked(grid, current.offset(dx, 0))
                        || self.blocked(grid, current.offset(0, dy)))
                {
                    continue;
                }

                let cost = g_cost + if diagonal { DIAGONAL_COST } else { ORTHOGONAL_COST };
                let turns = turns_here.saturating_add(u16::from(arrived != dir));
                let known = self.dist(next_idx, gen);
                if cost < known {
                    self.set_dist(next_idx, gen, cost, idx as i32, dir, turns);
                    let h = heuristic(next, goal, allow_diagonal);
                    self.heap.push(Reverse((cost + h, cost, tie_seq, next_idx as u32)));
                    tie_seq = tie_seq.wrapping_add(1);
                } else if cost == known && turns < self.turns[next_idx] {
                    self.came_from[next_idx] = idx as i32;
                    self.arrived[next_idx] = dir;
                    self.turns[next_idx] = turns;
                }
            }
        }

        None
    }

    fn reconstruct(
        &mut self,
        grid: RoutingGrid,
        start_idx: usize,
        goal_idx: usize,
    ) -> Option<&[GridPoint]> {
        self.path.clear();
        self.path.push(grid.point_of(goal_idx));
        let mut cursor_idx = goal_idx;
        while cursor_idx != start_idx {
            let prev_idx = self.came_from[cursor_idx];
            if prev_idx < 0 {
                return None;
            }
            cursor_idx = prev_idx as usize;
            self.path.push(grid.point_of(cursor_idx));
        }
        self.path.reverse();
        Some(&self.path)
    }
}

/// Manhattan distance for 4-way movement, octile distance for 8-way.
fn heuristic(from: GridPoint, goal: GridPoint, allow_diagonal: bool) -> u32 {
    let dx = from.x.abs_diff(goal.x);
    let dy = from.y.abs_diff(goal.y);
    if allow_diagonal {
        let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
        ORTHOGONAL_COST * (hi - lo) + DIAGONAL_COST * lo
    } else {
        ORTHOGONAL_COST * (dx + dy)
    }
}

fn compress_to_polyline(path: &[GridPoint]) -> Vec<GridPoint> {
    let Some(&first) = path.first() else {
        return Vec::new();
    };
    let mut points = vec![first];
    for w in path.windows(3) {
        let d_in = (w[1].x - w[0].x, w[1].y - w[0].y);
        let d_out = (w[2].x - w[1].x, w[2].y - w[1].y);
        if d_in != d_out {
            points.push(w[1]);
        }
    }
    if path.len() > 1 {
        if let Some(&last) = path.last() {
            points.push(last);
        }
    }
    points
}
