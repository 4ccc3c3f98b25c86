// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Style attribute maps and their typed reading for edges.
//!
//! The persisted form is a plain `key -> string | null` map. Reading never fails: unknown
//! keys are kept untouched and unknown values fall back to the documented defaults.

use std::borrow::Cow;
use std::collections::BTreeMap;

use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::routing::PathfindingMethod;

pub const PATHFINDING_METHOD_KEY: &str = "pathfindingMethod";
pub const ARROW_KEY: &str = "arrow";
pub const ARROW_DENSITY_KEY: &str = "arrowDensity";
pub const ARROW_SIZE_KEY: &str = "arrowSize";
pub const PATH_ROUNDED_KEY: &str = "pathRounded";
pub const ALLOW_DIAGONAL_KEY: &str = "allowDiagonal";

/// Attribute map attached to a node or edge record. `None` means "unset, inherit".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleAttributes(BTreeMap<SmolStr, Option<SmolStr>>);

impl StyleAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.as_deref())
    }

    pub fn set(&mut self, key: &str, value: Option<&str>) {
        self.0.insert(SmolStr::new(key), value.map(SmolStr::new));
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, Some(value));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

impl JsonSchema for StyleAttributes {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("StyleAttributes")
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        <BTreeMap<String, Option<String>>>::json_schema(generator)
    }
}

/// Shape drawn at the line ends; `None` also turns off direction arrows along the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowShape {
    #[default]
    Triangle,
    HalvedTriangle,
    ThinTriangle,
    Diamond,
    DiamondOutline,
    Circle,
    CircleOutline,
    Blunt,
    None,
}

impl ArrowShape {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("halved-triangle") => Self::HalvedTriangle,
            Some("thin-triangle") => Self::ThinTriangle,
            Some("diamond") => Self::Diamond,
            Some("diamond-outline") => Self::DiamondOutline,
            Some("circle") => Self::Circle,
            Some("circle-outline") => Self::CircleOutline,
            Some("blunt") => Self::Blunt,
            Some("none") => Self::None,
            _ => Self::Triangle,
        }
    }
}

/// How many direction arrows are spread along a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowDensity {
    Low,
    #[default]
    Medium,
    High,
}

impl ArrowDensity {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("low" | "sparse") => Self::Low,
            Some("high" | "dense") => Self::High,
            _ => Self::Medium,
        }
    }

    /// Path length, in canvas pixels, that earns one arrow.
    pub fn divisor(self) -> f64 {
        match self {
            Self::Low => 200.0,
            Self::Medium => 100.0,
            Self::High => 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ArrowSize {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("small") => Self::Small,
            Some("large") => Self::Large,
            _ => Self::Medium,
        }
    }
}

/// Typed view over an edge's style attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeStyle {
    pub pathfinding_method: PathfindingMethod,
    pub arrow: ArrowShape,
    pub arrow_density: ArrowDensity,
    pub arrow_size: ArrowSize,
    pub path_rounded: Option<bool>,
    pub allow_diagonal: Option<bool>,
}

impl EdgeStyle {
    pub fn from_attributes(attributes: Option<&StyleAttributes>) -> Self {
        let get = |key: &str| attributes.and_then(|attrs| attrs.get(key));
        Self {
            pathfinding_method: PathfindingMethod::from_style_value(get(PATHFINDING_METHOD_KEY)),
            arrow: ArrowShape::parse(get(ARROW_KEY)),
            arrow_density: ArrowDensity::parse(get(ARROW_DENSITY_KEY)),
            arrow_size: ArrowSize::parse(get(ARROW_SIZE_KEY)),
            path_rounded: parse_flag(get(PATH_ROUNDED_KEY)),
            allow_diagonal: parse_flag(get(ALLOW_DIAGONAL_KEY)),
        }
    }
}

fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}
