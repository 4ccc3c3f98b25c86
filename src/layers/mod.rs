// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Named, independently hideable groups of nodes and edges.
//!
//! The [`LayerManager`] owns the layer list and the current-layer cursor that decides where
//! new items land. Membership drift (ids in several layers, ids the document no longer has,
//! document ids in no layer) is repaired by [`LayerManager::heal`], which every visibility
//! recomputation runs first.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::{CanvasData, EdgeId, Layer, LayerId, NodeId};

pub const DEFAULT_LAYER_NAME: &str = "Default layer";
pub const NEW_LAYER_NAME: &str = "New layer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerError {
    /// The only remaining layer cannot be deleted.
    LastLayer,
    NotFound { layer_id: LayerId },
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastLayer => f.write_str("cannot delete the last layer"),
            Self::NotFound { layer_id } => write!(f, "layer not found: {layer_id}"),
        }
    }
}

impl std::error::Error for LayerError {}

/// What [`LayerManager::heal`] had to repair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealReport {
    pub duplicates: usize,
    pub stale: usize,
    pub adopted: usize,
}

impl HealReport {
    pub fn is_clean(&self) -> bool {
        self.duplicates == 0 && self.stale == 0 && self.adopted == 0
    }
}

/// Resolved display state for every node and edge of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    pub nodes: BTreeMap<NodeId, bool>,
    pub edges: BTreeMap<EdgeId, bool>,
}

impl Visibility {
    /// Ids the map does not know about are visible.
    pub fn node_visible(&self, id: &NodeId) -> bool {
        self.nodes.get(id).copied().unwrap_or(true)
    }

    pub fn edge_visible(&self, id: &EdgeId) -> bool {
        self.edges.get(id).copied().unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LayerManager {
    layers: Vec<Layer>,
    current: Option<LayerId>,
    minted: u32,
}

impl LayerManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_layers(layers: Vec<Layer>) -> Self {
        Self { layers, current: None, minted: 0 }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn into_layers(self) -> Vec<Layer> {
        self.layers
    }

    pub fn layer(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| &layer.id == id)
    }

    /// The layer new items land in: the cursor if it still exists, else the first layer.
    pub fn current(&self) -> Option<&LayerId> {
        let cursor = self
            .current
            .as_ref()
            .and_then(|id| self.layers.iter().find(|layer| &layer.id == id));
        cursor.or_else(|| self.layers.first()).map(|layer| &layer.id)
    }

    pub fn set_current(&mut self, id: &LayerId) -> Result<(), LayerError> {
        self.index_of(id)?;
        self.current = Some(id.clone());
        Ok(())
    }

    /// Creates an empty default layer when there are none and makes it current.
    ///
    /// Returns the id of the synthesized layer.
    pub fn ensure_default(&mut self) -> Option<LayerId> {
        if !self.layers.is_empty() {
            return None;
        }
        let id = self.mint_id();
        self.layers.push(Layer::new(id.clone(), DEFAULT_LAYER_NAME));
        self.current = Some(id.clone());
        tracing::debug!(layer_id = %id, "synthesized default layer");
        Some(id)
    }

    /// Appends a new visible layer. The cursor does not move.
    pub fn add(&mut self, name: Option<&str>) -> LayerId {
        let id = self.mint_id();
        self.layers.push(Layer::new(id.clone(), name.unwrap_or(NEW_LAYER_NAME)));
        id
    }

    pub fn rename(&mut self, id: &LayerId, name: impl Into<String>) -> Result<(), LayerError> {
        let idx = self.index_of(id)?;
        self.layers[idx].name = name.into();
        Ok(())
    }

    /// Swaps the layer with its predecessor. `Ok(false)` when it is already first.
    pub fn move_up(&mut self, id: &LayerId) -> Result<bool, LayerError> {
        let idx = self.index_of(id)?;
        if idx == 0 {
            return Ok(false);
        }
        self.layers.swap(idx, idx - 1);
        Ok(true)
    }

    /// Swaps the layer with its successor. `Ok(false)` when it is already last.
    pub fn move_down(&mut self, id: &LayerId) -> Result<bool, LayerError> {
        let idx = self.index_of(id)?;
        if idx + 1 >= self.layers.len() {
            return Ok(false);
        }
        self.layers.swap(idx, idx + 1);
        Ok(true)
    }

    pub fn set_visible(&mut self, id: &LayerId, visible: bool) -> Result<(), LayerError> {
        let idx = self.index_of(id)?;
        self.layers[idx].visible = visible;
        Ok(())
    }

    /// Flips visibility and returns the new state.
    pub fn toggle_visible(&mut self, id: &LayerId) -> Result<bool, LayerError> {
        let idx = self.index_of(id)?;
        let layer = &mut self.layers[idx];
        layer.visible = !layer.visible;
        Ok(layer.visible)
    }

    /// Removes a layer, handing its members to the first remaining layer.
    ///
    /// Only allowed while at least two layers exist. A deleted cursor moves to the first
    /// remaining layer.
    pub fn delete(&mut self, id: &LayerId) -> Result<Layer, LayerError> {
        let idx = self.index_of(id)?;
        if self.layers.len() < 2 {
            return Err(LayerError::LastLayer);
        }
        let removed = self.layers.remove(idx);
        if let Some(target) = self.layers.first_mut() {
            for node_id in &removed.node_ids {
                if !target.node_ids.contains(node_id) {
                    target.node_ids.push(node_id.clone());
                }
            }
            for edge_id in &removed.edge_ids {
                if !target.edge_ids.contains(edge_id) {
                    target.edge_ids.push(edge_id.clone());
                }
            }
            if self.current.as_ref() == Some(id) {
                self.current = Some(target.id.clone());
            }
        }
        tracing::debug!(
            layer_id = %id,
            nodes = removed.node_ids.len(),
            edges = removed.edge_ids.len(),
            "deleted layer"
        );
        Ok(removed)
    }

    /// Puts a node in the current layer, taking it out of any other layer first.
    ///
    /// Used both for freshly created nodes and for moving existing ones. A missing cursor
    /// falls back to the first layer and adopts it.
    pub fn assign_node(&mut self, id: &NodeId) -> LayerId {
        self.remove_node(id);
        let idx = self.adopt_current();
        self.layers[idx].node_ids.push(id.clone());
        self.layers[idx].id.clone()
    }

    pub fn assign_edge(&mut self, id: &EdgeId) -> LayerId {
        self.remove_edge(id);
        let idx = self.adopt_current();
        self.layers[idx].edge_ids.push(id.clone());
        self.layers[idx].id.clone()
    }

    /// Drops a node from every layer that lists it. Returns whether any did.
    pub fn remove_node(&mut self, id: &NodeId) -> bool {
        strip(&mut self.layers, node_ids, id)
    }

    pub fn remove_edge(&mut self, id: &EdgeId) -> bool {
        strip(&mut self.layers, edge_ids, id)
    }

    pub fn layer_of_node(&self, id: &NodeId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.node_ids.contains(id))
    }

    pub fn layer_of_edge(&self, id: &EdgeId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.edge_ids.contains(id))
    }

    /// Repairs membership against the document.
    ///
    /// Duplicates keep their first layer in list order, ids the document no longer has are
    /// dropped, and document ids no layer lists join the first layer. With no layers at all
    /// there is nothing to repair.
    pub fn heal(&mut self, doc: &CanvasData) -> HealReport {
        let mut report = HealReport::default();
        if self.layers.is_empty() {
            return report;
        }
        let node_order: Vec<&NodeId> = doc.nodes.iter().map(|node| &node.id).collect();
        let edge_order: Vec<&EdgeId> = doc.edges.iter().map(|edge| &edge.id).collect();
        heal_members(&mut self.layers, node_ids, &node_order, &mut report);
        heal_members(&mut self.layers, edge_ids, &edge_order, &mut report);
        if !report.is_clean() {
            tracing::debug!(
                duplicates = report.duplicates,
                stale = report.stale,
                adopted = report.adopted,
                "healed layer membership"
            );
        }
        report
    }

    /// Heals, then resolves whether every document node and edge is shown.
    pub fn recompute_visibility(&mut self, doc: &CanvasData) -> Visibility {
        self.heal(doc);

        let mut node_visible: BTreeMap<&NodeId, bool> = BTreeMap::new();
        let mut edge_visible: BTreeMap<&EdgeId, bool> = BTreeMap::new();
        for layer in &self.layers {
            for id in &layer.node_ids {
                node_visible.entry(id).or_insert(layer.visible);
            }
            for id in &layer.edge_ids {
                edge_visible.entry(id).or_insert(layer.visible);
            }
        }

        let nodes = doc
            .nodes
            .iter()
            .map(|node| {
                let visible = node_visible.get(&node.id).copied().unwrap_or(true);
                (node.id.clone(), visible)
            })
            .collect();
        let edges = doc
            .edges
            .iter()
            .map(|edge| {
                let visible = edge_visible.get(&edge.id).copied().unwrap_or(true);
                (edge.id.clone(), visible)
            })
            .collect();
        Visibility { nodes, edges }
    }

    fn index_of(&self, id: &LayerId) -> Result<usize, LayerError> {
        self.layers
            .iter()
            .position(|layer| &layer.id == id)
            .ok_or_else(|| LayerError::NotFound { layer_id: id.clone() })
    }

    fn adopt_current(&mut self) -> usize {
        self.ensure_default();
        let idx = self
            .current
            .as_ref()
            .and_then(|id| self.layers.iter().position(|layer| &layer.id == id))
            .unwrap_or(0);
        self.current = Some(self.layers[idx].id.clone());
        idx
    }

    fn mint_id(&mut self) -> LayerId {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or(0);
        loop {
            self.minted = self.minted.wrapping_add(1);
            let candidate = format!("layer-{millis}-{}", self.minted);
            if self.layers.iter().all(|layer| layer.id.as_str() != candidate) {
                return LayerId::generated(candidate);
            }
        }
    }
}

fn node_ids(layer: &mut Layer) -> &mut Vec<NodeId> {
    &mut layer.node_ids
}

fn edge_ids(layer: &mut Layer) -> &mut Vec<EdgeId> {
    &mut layer.edge_ids
}

fn strip<T: PartialEq>(
    layers: &mut [Layer],
    members: fn(&mut Layer) -> &mut Vec<T>,
    id: &T,
) -> bool {
    let mut found = false;
    for layer in layers.iter_mut() {
        let list = members(layer);
        let before = list.len();
        list.retain(|member| member != id);
        found |= list.len() != before;
    }
    found
}

fn heal_members<T: Ord + Clone>(
    layers: &mut [Layer],
    members: fn(&mut Layer) -> &mut Vec<T>,
    document: &[&T],
    report: &mut HealReport,
) {
    let present: BTreeSet<&T> = document.iter().copied().collect();
    let mut seen: BTreeSet<T> = BTreeSet::new();

    for layer in layers.iter_mut() {
        members(layer).retain(|id| {
            if !present.contains(id) {
                report.stale += 1;
                false
            } else if !seen.insert(id.clone()) {
                report.duplicates += 1;
                false
            } else {
                true
            }
        });
    }

    if let Some(first) = layers.first_mut() {
        let list = members(first);
        for id in document {
            if seen.insert((*id).clone()) {
                list.push((*id).clone());
                report.adopted += 1;
            }
        }
    }
}
