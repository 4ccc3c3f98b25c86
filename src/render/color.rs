// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use regex::Regex;

pub const DEFAULT_STROKE: &str = "var(--interactive-accent)";

static PRESET_COLOR: OnceLock<Regex> = OnceLock::new();

fn is_preset(color: &str) -> bool {
    PRESET_COLOR
        .get_or_init(|| Regex::new(r"^[1-6]$").expect("preset color regex must compile"))
        .is_match(color)
}

/// Stroke color used for an edge's direction arrows.
///
/// Preset palette indices `1`..`6` map to the host's CSS variables; any other value is
/// used as given.
pub fn resolve_stroke_color(color: Option<&str>) -> String {
    match color {
        Some(c) if is_preset(c) => format!("var(--canvas-color-{c})"),
        Some(c) if !c.is_empty() => c.to_owned(),
        _ => DEFAULT_STROKE.to_owned(),
    }
}
