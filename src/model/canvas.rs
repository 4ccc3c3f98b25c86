// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Records of a `.canvas` document as persisted by the host.
//!
//! Only the fields the router reads are typed. Everything else rides along in `extra` so a
//! load/save cycle never drops host data.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ids::{EdgeId, LayerId, NodeId};
use super::style::StyleAttributes;
use crate::geometry::{BBox, Side};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct CanvasData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub nodes: Vec<NodeData>,
    #[serde(default)]
    pub edges: Vec<EdgeData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<Layer>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CanvasData {
    pub fn node(&self, id: &NodeId) -> Option<&NodeData> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&EdgeData> {
        self.edges.iter().find(|edge| &edge.id == id)
    }

    pub fn edge_mut(&mut self, id: &EdgeId) -> Option<&mut EdgeData> {
        self.edges.iter_mut().find(|edge| &edge.id == id)
    }

    pub fn node_bbox(&self, id: &NodeId) -> Option<BBox> {
        self.node(id).map(NodeData::bbox)
    }

    /// Bounds spanned by an edge's two end nodes, `None` when either node is missing.
    pub fn edge_bbox(&self, edge: &EdgeData) -> Option<BBox> {
        let from = self.node_bbox(&edge.from_node)?;
        let to = self.node_bbox(&edge.to_node)?;
        crate::geometry::combine(&[from, to])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_attributes: Option<StyleAttributes>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeData {
    pub fn bbox(&self) -> BBox {
        BBox::from_rect(self.x, self.y, self.width, self.height)
    }

    pub fn is_group(&self) -> bool {
        self.kind == "group"
    }
}

/// Line-end decoration declared on an edge side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EndCap {
    None,
    Arrow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
    pub id: EdgeId,
    pub from_node: NodeId,
    pub from_side: Side,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_floating: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_end: Option<EndCap>,
    /// Fraction along `from_side`; absent means the side midpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_position: Option<f64>,
    pub to_node: NodeId,
    pub to_side: Side,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_floating: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_end: Option<EndCap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_position: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_attributes: Option<StyleAttributes>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Which end of an edge an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeEnd {
    From,
    To,
}

/// Everything needed to anchor one end of an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoint<'a> {
    pub node: &'a NodeId,
    pub side: Side,
    pub relative: Option<f64>,
    pub end: EndCap,
}

impl EdgeData {
    pub fn endpoint(&self, end: EdgeEnd) -> Endpoint<'_> {
        match end {
            EdgeEnd::From => Endpoint {
                node: &self.from_node,
                side: self.from_side,
                relative: self.from_position,
                end: self.from_end.unwrap_or(EndCap::None),
            },
            EdgeEnd::To => Endpoint {
                node: &self.to_node,
                side: self.to_side,
                relative: self.to_position,
                end: self.to_end.unwrap_or(EndCap::Arrow),
            },
        }
    }

    pub fn set_relative_position(&mut self, end: EdgeEnd, relative: f64) {
        match end {
            EdgeEnd::From => self.from_position = Some(relative),
            EdgeEnd::To => self.to_position = Some(relative),
        }
    }

    pub fn touches(&self, node: &NodeId) -> bool {
        &self.from_node == node || &self.to_node == node
    }
}

/// A named, independently hideable group of nodes and edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    #[serde(default)]
    pub node_ids: Vec<NodeId>,
    #[serde(default)]
    pub edge_ids: Vec<EdgeId>,
}

impl Layer {
    pub fn new(id: LayerId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), visible: true, node_ids: Vec::new(), edge_ids: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty() && self.edge_ids.is_empty()
    }
}
