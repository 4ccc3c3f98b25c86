// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{Pathfinder, RouteError, RouteRequest};
use crate::path::{cubic_point, DrawPath, EdgePath};

const MIN_CONTROL_OFFSET: f64 = 20.0;
const MAX_CONTROL_OFFSET: f64 = 150.0;

/// Single cubic that leaves and enters perpendicular to the node sides.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectRouter;

impl Pathfinder for DirectRouter {
    fn compute_path(&mut self, request: &RouteRequest<'_>) -> Result<EdgePath, RouteError> {
        request.validate()?;
        let (from, to) = (request.from, request.to);

        let offset = (from.anchor.distance(to.anchor) * 0.5)
            .clamp(MIN_CONTROL_OFFSET, MAX_CONTROL_OFFSET);
        let c1 = from.anchor.move_in_direction(from.side, offset);
        let c2 = to.anchor.move_in_direction(to.side, offset);

        let mut path = DrawPath::new(from.anchor);
        path.cubic_to(c1, c2, to.anchor);
        let center = cubic_point(from.anchor, c1, c2, to.anchor, 0.5);
        Ok(EdgePath { path, center })
    }
}
