// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{BBox, Position};

/// Face of a node's bounding box an edge attaches to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    /// `true` for left/right: an edge leaving through it travels along the x axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }

    /// `+1` for right/bottom, `-1` for top/left.
    pub fn direction(self) -> f64 {
        match self {
            Side::Right | Side::Bottom => 1.0,
            Side::Top | Side::Left => -1.0,
        }
    }

    /// Unit vector pointing out of the node through this side.
    pub fn vector(self) -> Position {
        match self {
            Side::Top => Position::new(0.0, -1.0),
            Side::Right => Position::new(1.0, 0.0),
            Side::Bottom => Position::new(0.0, 1.0),
            Side::Left => Position::new(-1.0, 0.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSideError {
    value: String,
}

impl fmt::Display for ParseSideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown side {:?} (expected top, right, bottom or left)", self.value)
    }
}

impl std::error::Error for ParseSideError {}

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Side::Top),
            "right" => Ok(Side::Right),
            "bottom" => Ok(Side::Bottom),
            "left" => Ok(Side::Left),
            _ => Err(ParseSideError { value: s.to_owned() }),
        }
    }
}

/// Handle a host can render on a node side to start an edge at a given relative position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionPoint {
    pub side: Side,
    pub relative: f64,
    pub position: Position,
}

const CONNECTION_POINTS_PER_SIDE: usize = 5;

/// Evenly spaced connection handles on every side, corners included.
pub fn side_connection_points(bbox: &BBox) -> Vec<ConnectionPoint> {
    let mut points = Vec::with_capacity(Side::ALL.len() * CONNECTION_POINTS_PER_SIDE);
    for side in Side::ALL {
        for i in 0..CONNECTION_POINTS_PER_SIDE {
            let relative = i as f64 / (CONNECTION_POINTS_PER_SIDE - 1) as f64;
            points.push(ConnectionPoint {
                side,
                relative,
                position: bbox.point_on_side(side, relative),
            });
        }
    }
    points
}
