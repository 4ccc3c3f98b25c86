// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canvas-space geometry shared by every router.
//!
//! Coordinates grow right (`x`) and down (`y`), matching the host canvas.

pub mod bbox;
pub mod side;

pub use bbox::{combine, BBox};
pub use side::{side_connection_points, ConnectionPoint, Side};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    pub fn lerp(self, other: Position, t: f64) -> Self {
        Self { x: self.x + (other.x - self.x) * t, y: self.y + (other.y - self.y) * t }
    }

    pub fn midpoint(self, other: Position) -> Self {
        self.lerp(other, 0.5)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Moves the point `distance` units away from a node through `side`.
    pub fn move_in_direction(self, side: Side, distance: f64) -> Self {
        let v = side.vector();
        Self { x: self.x + v.x * distance, y: self.y + v.y * distance }
    }

    pub(crate) fn approx_eq(self, other: Position) -> bool {
        (self.x - other.x).abs() <= EPSILON && (self.y - other.y).abs() <= EPSILON
    }
}

/// Tolerance used when comparing computed coordinates.
pub(crate) const EPSILON: f64 = 1e-6;
