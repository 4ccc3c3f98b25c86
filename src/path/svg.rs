// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::f64::consts::PI;
use std::fmt::Write as _;

use super::{DrawPath, PathSegment};

/// Formats a coordinate with at most three decimals and no trailing zeros.
pub fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    // Avoid "-0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let mut text = format!("{rounded:.3}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

pub(super) fn path_data(path: &DrawPath) -> String {
    let mut out = String::with_capacity(16 + path.segments.len() * 24);
    let _ = write!(out, "M {} {}", fmt_num(path.start.x), fmt_num(path.start.y));
    for segment in &path.segments {
        match *segment {
            PathSegment::Line { to } => {
                let _ = write!(out, " L {} {}", fmt_num(to.x), fmt_num(to.y));
            }
            PathSegment::Cubic { c1, c2, to } => {
                let _ = write!(
                    out,
                    " C {} {}, {} {}, {} {}",
                    fmt_num(c1.x),
                    fmt_num(c1.y),
                    fmt_num(c2.x),
                    fmt_num(c2.y),
                    fmt_num(to.x),
                    fmt_num(to.y)
                );
            }
            PathSegment::Arc { radius, sweep, to, .. } => {
                let large_arc = u8::from(sweep.abs() > PI);
                let sweep_flag = u8::from(sweep > 0.0);
                let r = fmt_num(radius);
                let _ = write!(
                    out,
                    " A {r} {r} 0 {large_arc} {sweep_flag} {} {}",
                    fmt_num(to.x),
                    fmt_num(to.y)
                );
            }
        }
    }
    out
}
