// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Deterministic canvases for benchmarks (no RNG).

use canvas_router::geometry::BBox;
use canvas_router::model::{CanvasData, EdgeEnd, EdgeStyle, EndCap, Endpoint};
use canvas_router::render::end_cap_depth;
use canvas_router::routing::{EndpointGeometry, PathfindingMethod};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// 4x3 nodes, neighbours connected.
    Small,
    /// 10x8 nodes, neighbours connected plus long diagonals across the grid.
    Medium,
}

impl Case {
    fn dims(self) -> (usize, usize) {
        match self {
            Case::Small => (4, 3),
            Case::Medium => (10, 8),
        }
    }
}

const NODE_W: usize = 160;
const NODE_H: usize = 80;
const GAP: usize = 120;

fn node_id(col: usize, row: usize) -> String {
    format!("n{col}x{row}")
}

/// Grid canvas whose edges all use `method`.
pub fn grid_canvas(case: Case, method: PathfindingMethod) -> CanvasData {
    let (cols, rows) = case.dims();
    let mut nodes = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            nodes.push(json!({
                "id": node_id(col, row),
                "type": "text",
                "text": format!("node {col},{row}"),
                "x": col * (NODE_W + GAP),
                "y": row * (NODE_H + GAP),
                "width": NODE_W,
                "height": NODE_H,
            }));
        }
    }

    let mut edges: Vec<Value> = Vec::new();
    let mut push = |from: String, from_side: &str, to: String, to_side: &str| {
        edges.push(json!({
            "id": format!("e{}", edges.len()),
            "fromNode": from,
            "fromSide": from_side,
            "toNode": to,
            "toSide": to_side,
            "styleAttributes": { "pathfindingMethod": method.as_str() },
        }));
    };
    for row in 0..rows {
        for col in 0..cols {
            if col + 1 < cols {
                push(node_id(col, row), "right", node_id(col + 1, row), "left");
            }
            if row + 1 < rows {
                push(node_id(col, row), "bottom", node_id(col, row + 1), "top");
            }
        }
    }
    if matches!(case, Case::Medium) {
        for row in 0..rows - 2 {
            push(node_id(0, row), "right", node_id(cols - 1, row + 2), "left");
        }
    }

    serde_json::from_value(json!({ "nodes": nodes, "edges": edges }))
        .expect("fixture canvas deserializes")
}

/// Endpoint geometry and obstacles of every edge, as the coordinator would build them.
pub fn route_inputs(doc: &CanvasData) -> Vec<(EndpointGeometry, EndpointGeometry, Vec<BBox>)> {
    doc.edges
        .iter()
        .map(|edge| {
            let from = doc.node_bbox(&edge.from_node).expect("from node");
            let to = doc.node_bbox(&edge.to_node).expect("to node");
            let obstacles = doc
                .nodes
                .iter()
                .filter(|node| node.id != edge.from_node && node.id != edge.to_node)
                .map(|node| node.bbox())
                .collect();
            let style = EdgeStyle::from_attributes(edge.style_attributes.as_ref());
            (
                endpoint_geometry(from, &edge.endpoint(EdgeEnd::From), &style),
                endpoint_geometry(to, &edge.endpoint(EdgeEnd::To), &style),
                obstacles,
            )
        })
        .collect()
}

fn endpoint_geometry(bbox: BBox, endpoint: &Endpoint<'_>, style: &EdgeStyle) -> EndpointGeometry {
    let geometry = EndpointGeometry::on_side(bbox, endpoint.side, endpoint.relative);
    match endpoint.end {
        EndCap::Arrow => geometry.with_marker_offset(end_cap_depth(style.arrow)),
        EndCap::None => geometry,
    }
}
