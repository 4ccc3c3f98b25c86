// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![cfg(test)]

use serde_json::Map;

use super::canvas::{CanvasData, EdgeData, Layer, NodeData};
use super::ids::{EdgeId, LayerId, NodeId};
use super::style::{StyleAttributes, PATHFINDING_METHOD_KEY};
use crate::geometry::Side;

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("edge id")
}

pub(crate) fn lid(value: &str) -> LayerId {
    LayerId::new(value).expect("layer id")
}

pub(crate) fn node(id: &str, x: f64, y: f64, width: f64, height: f64) -> NodeData {
    NodeData {
        id: nid(id),
        kind: "text".to_owned(),
        x,
        y,
        width,
        height,
        color: None,
        style_attributes: None,
        extra: Map::new(),
    }
}

pub(crate) fn edge(id: &str, from: &str, from_side: Side, to: &str, to_side: Side) -> EdgeData {
    EdgeData {
        id: eid(id),
        from_node: nid(from),
        from_side,
        from_floating: None,
        from_end: None,
        from_position: None,
        to_node: nid(to),
        to_side,
        to_floating: None,
        to_end: None,
        to_position: None,
        color: None,
        label: None,
        style_attributes: None,
        extra: Map::new(),
    }
}

pub(crate) fn with_method(mut edge: EdgeData, method: &str) -> EdgeData {
    edge.style_attributes = Some(StyleAttributes::new().with(PATHFINDING_METHOD_KEY, method));
    edge
}

/// `a` at (0,0)-(100,100), `b` at (300,0)-(400,100), one edge `a.right -> b.left`.
pub(crate) fn two_nodes_side_by_side() -> CanvasData {
    CanvasData {
        nodes: vec![node("a", 0.0, 0.0, 100.0, 100.0), node("b", 300.0, 0.0, 100.0, 100.0)],
        edges: vec![edge("e1", "a", Side::Right, "b", Side::Left)],
        ..CanvasData::default()
    }
}

/// `a` and `b` side by side with a tall `wall` between them; the edge routes with A*.
pub(crate) fn wall_between_nodes() -> CanvasData {
    CanvasData {
        nodes: vec![
            node("a", 0.0, 0.0, 100.0, 100.0),
            node("wall", 180.0, -30.0, 60.0, 160.0),
            node("b", 320.0, 0.0, 100.0, 100.0),
        ],
        edges: vec![with_method(edge("e1", "a", Side::Right, "b", Side::Left), "a-star")],
        ..CanvasData::default()
    }
}

/// Two layers: `base` holds `a`, `b` and `e1`; hidden `notes` holds `c` and `e2`.
pub(crate) fn layered_document() -> CanvasData {
    let mut base = Layer::new(lid("base"), "Base");
    base.node_ids = vec![nid("a"), nid("b")];
    base.edge_ids = vec![eid("e1")];

    let mut notes = Layer::new(lid("notes"), "Notes");
    notes.visible = false;
    notes.node_ids = vec![nid("c")];
    notes.edge_ids = vec![eid("e2")];

    CanvasData {
        nodes: vec![
            node("a", 0.0, 0.0, 100.0, 100.0),
            node("b", 300.0, 0.0, 100.0, 100.0),
            node("c", 0.0, 300.0, 100.0, 100.0),
        ],
        edges: vec![
            edge("e1", "a", Side::Right, "b", Side::Left),
            edge("e2", "a", Side::Bottom, "c", Side::Top),
        ],
        layers: vec![base, notes],
        ..CanvasData::default()
    }
}
