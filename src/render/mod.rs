// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Decorations drawn on top of routed edges: direction arrows, line-end polygons and their
//! stroke color.
//!
//! Nothing here touches a DOM. Hosts receive plain values (and optional SVG fragments) and
//! apply them to their own elements.

mod arrows;
mod color;
mod markers;

pub use arrows::{arrow_count, place_arrows, ArrowGlyph, MAX_ARROWS};
pub use color::{resolve_stroke_color, DEFAULT_STROKE};
pub use markers::{arrow_glyph_points, end_cap_depth, end_cap_is_outline, end_cap_points};
