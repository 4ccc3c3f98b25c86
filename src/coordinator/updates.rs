// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use crate::geometry::Position;
use crate::model::{CanvasData, EdgeId, Layer, NodeId};
use crate::path::EdgePath;
use crate::render::ArrowGlyph;
use crate::routing::{PathfindingMethod, RouteError};

/// A routed path the host should draw instead of its own curve.
#[derive(Debug, Clone, PartialEq)]
pub struct PathUpdate {
    pub edge_id: EdgeId,
    pub method: PathfindingMethod,
    /// SVG path data.
    pub d: String,
    pub center: Position,
    pub path: EdgePath,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowUpdate {
    pub edge_id: EdgeId,
    /// Replaces every direction arrow previously drawn on the edge.
    pub glyphs: Vec<ArrowGlyph>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndCapUpdate {
    pub edge_id: EdgeId,
    pub points: &'static str,
    pub outline: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteFailure {
    pub edge_id: EdgeId,
    pub error: RouteError,
}

/// Everything one dispatch asks the host to apply, sorted by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Updates {
    pub paths: Vec<PathUpdate>,
    /// Edges that go back to the host's own curve.
    pub resets: Vec<EdgeId>,
    pub arrows: Vec<ArrowUpdate>,
    pub end_caps: Vec<EndCapUpdate>,
    pub node_visibility: Vec<(NodeId, bool)>,
    pub edge_visibility: Vec<(EdgeId, bool)>,
    /// The layer list after a membership or layer change, for the host to persist.
    pub layers: Option<Vec<Layer>>,
    /// Document snapshots to push onto the host's undo history.
    pub history: Vec<CanvasData>,
    /// Edges whose previous route was kept because routing failed.
    pub failures: Vec<RouteFailure>,
}

impl Updates {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
            && self.resets.is_empty()
            && self.arrows.is_empty()
            && self.end_caps.is_empty()
            && self.node_visibility.is_empty()
            && self.edge_visibility.is_empty()
            && self.layers.is_none()
            && self.history.is_empty()
            && self.failures.is_empty()
    }

    pub fn path(&self, edge_id: &EdgeId) -> Option<&PathUpdate> {
        self.paths.iter().find(|update| &update.edge_id == edge_id)
    }

    pub fn arrows_for(&self, edge_id: &EdgeId) -> Option<&[ArrowGlyph]> {
        self.arrows
            .iter()
            .find(|update| &update.edge_id == edge_id)
            .map(|update| update.glyphs.as_slice())
    }
}

#[derive(Debug, Default)]
pub(super) struct UpdatesBuilder {
    paths: BTreeMap<EdgeId, PathUpdate>,
    resets: BTreeSet<EdgeId>,
    arrows: BTreeMap<EdgeId, Vec<ArrowGlyph>>,
    end_caps: BTreeMap<EdgeId, EndCapUpdate>,
    node_visibility: BTreeMap<NodeId, bool>,
    edge_visibility: BTreeMap<EdgeId, bool>,
    layers: Option<Vec<Layer>>,
    history: Vec<CanvasData>,
    failures: BTreeMap<EdgeId, RouteError>,
}

impl UpdatesBuilder {
    pub(super) fn record_path(&mut self, update: PathUpdate) {
        self.resets.remove(&update.edge_id);
        self.failures.remove(&update.edge_id);
        self.paths.insert(update.edge_id.clone(), update);
    }

    pub(super) fn record_reset(&mut self, edge_id: EdgeId) {
        self.paths.remove(&edge_id);
        self.failures.remove(&edge_id);
        self.resets.insert(edge_id);
    }

    pub(super) fn record_arrows(&mut self, edge_id: EdgeId, glyphs: Vec<ArrowGlyph>) {
        self.arrows.insert(edge_id, glyphs);
    }

    pub(super) fn record_end_cap(&mut self, update: EndCapUpdate) {
        self.end_caps.insert(update.edge_id.clone(), update);
    }

    pub(super) fn record_node_visibility(&mut self, node_id: NodeId, visible: bool) {
        self.node_visibility.insert(node_id, visible);
    }

    pub(super) fn record_edge_visibility(&mut self, edge_id: EdgeId, visible: bool) {
        self.edge_visibility.insert(edge_id, visible);
    }

    pub(super) fn record_layers(&mut self, layers: Vec<Layer>) {
        self.layers = Some(layers);
    }

    pub(super) fn record_history(&mut self, snapshot: CanvasData) {
        self.history.push(snapshot);
    }

    pub(super) fn record_failure(&mut self, edge_id: EdgeId, error: RouteError) {
        if self.paths.contains_key(&edge_id) || self.resets.contains(&edge_id) {
            return;
        }
        self.failures.insert(edge_id, error);
    }

    /// Drops everything recorded for an edge the host no longer has.
    pub(super) fn forget_edge(&mut self, edge_id: &EdgeId) {
        self.paths.remove(edge_id);
        self.resets.remove(edge_id);
        self.arrows.remove(edge_id);
        self.end_caps.remove(edge_id);
        self.edge_visibility.remove(edge_id);
        self.failures.remove(edge_id);
    }

    pub(super) fn finish(self) -> Updates {
        Updates {
            paths: self.paths.into_values().collect(),
            resets: self.resets.into_iter().collect(),
            arrows: self
                .arrows
                .into_iter()
                .map(|(edge_id, glyphs)| ArrowUpdate { edge_id, glyphs })
                .collect(),
            end_caps: self.end_caps.into_values().collect(),
            node_visibility: self.node_visibility.into_iter().collect(),
            edge_visibility: self.edge_visibility.into_iter().collect(),
            layers: self.layers,
            history: self.history,
            failures: self
                .failures
                .into_iter()
                .map(|(edge_id, error)| RouteFailure { edge_id, error })
                .collect(),
        }
    }
}
