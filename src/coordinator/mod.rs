// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Single dispatch point between host change notifications and the routers.
//!
//! The host forwards every [`CanvasEvent`] to [`EdgeCoordinator::dispatch`] and applies the
//! returned [`Updates`]. Each edge moves through `Idle -> Dirty -> Routed -> Idle`; an edge
//! whose route inputs did not change since its last route is not routed again, so an
//! update applied by the host that echoes back as another change event costs nothing.
//!
//! Routing failures never clear an edge: the previous path and arrows stay in place and
//! the failure is reported in [`Updates::failures`].

mod events;
mod updates;

pub use events::{CanvasEvent, LayerCommand};
pub use updates::{ArrowUpdate, EndCapUpdate, PathUpdate, RouteFailure, Updates};

use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use updates::UpdatesBuilder;

use crate::geometry::{combine, BBox, Position};
use crate::layers::{LayerError, LayerManager, Visibility};
use crate::model::style::PATHFINDING_METHOD_KEY;
use crate::model::{
    CanvasData, EdgeData, EdgeEnd, EdgeId, EdgeStyle, EndCap, Endpoint, NodeData, NodeId,
    StyleAttributes,
};
use crate::path::{CurveSampler, EdgePath, FlattenSampler};
use crate::render::{
    end_cap_depth, end_cap_is_outline, end_cap_points, place_arrows, resolve_stroke_color,
    ArrowGlyph,
};
use crate::routing::{EdgeRouter, EndpointGeometry, PathfindingMethod, RouteRequest, RouteTuning};
use crate::settings::Settings;

/// Delay before arrows on a freshly created edge are measured again.
pub const SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Largest selection that still re-routes edges live while dragging.
pub const MAX_LIVE_UPDATE_SELECTION: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RouteState {
    #[default]
    Idle,
    Dirty,
    Routed,
}

/// Last successful route of an edge.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedEdge {
    pub method: PathfindingMethod,
    /// The edge names its router; otherwise the host keeps drawing its own curve.
    pub explicit: bool,
    pub path: EdgePath,
    pub arrows: Vec<ArrowGlyph>,
}

#[derive(Debug, Clone, PartialEq)]
struct RouteInput {
    method: PathfindingMethod,
    explicit: bool,
    from: EndpointGeometry,
    to: EndpointGeometry,
    obstacles: Vec<BBox>,
    tuning: RouteTuning,
    style: EdgeStyle,
    fill: String,
}

#[derive(Debug, Default)]
struct EdgeState {
    state: RouteState,
    routed: Option<RoutedEdge>,
    last_input: Option<RouteInput>,
}

#[derive(Debug, Default)]
struct Interaction {
    dragging: bool,
    connecting: bool,
    selected_nodes: BTreeSet<NodeId>,
    selected_edges: BTreeSet<EdgeId>,
}

pub struct EdgeCoordinator<S = FlattenSampler> {
    doc: CanvasData,
    settings: Settings,
    router: EdgeRouter,
    sampler: S,
    layers: LayerManager,
    visibility: Visibility,
    edges: BTreeMap<EdgeId, EdgeState>,
    interaction: Interaction,
    deferred: BTreeMap<EdgeId, Instant>,
}

impl EdgeCoordinator {
    pub fn new(settings: Settings) -> Self {
        Self::with_sampler(settings, FlattenSampler::default())
    }
}

impl<S: CurveSampler> EdgeCoordinator<S> {
    pub fn with_sampler(settings: Settings, sampler: S) -> Self {
        Self {
            doc: CanvasData::default(),
            settings,
            router: EdgeRouter::new(),
            sampler,
            layers: LayerManager::new(),
            visibility: Visibility::default(),
            edges: BTreeMap::new(),
            interaction: Interaction::default(),
            deferred: BTreeMap::new(),
        }
    }

    pub fn document(&self) -> &CanvasData {
        &self.doc
    }

    pub fn into_document(self) -> CanvasData {
        self.doc
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces the settings. Edges pick them up on their next route.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn edge_state(&self, edge_id: &EdgeId) -> Option<RouteState> {
        self.edges.get(edge_id).map(|state| state.state)
    }

    pub fn routed(&self, edge_id: &EdgeId) -> Option<&RoutedEdge> {
        self.edges.get(edge_id).and_then(|state| state.routed.as_ref())
    }

    /// Label anchor for an edge: the routed center, or `fallback` when the host draws it.
    pub fn center_for(&self, edge_id: &EdgeId, fallback: Position) -> Position {
        self.routed(edge_id)
            .filter(|routed| routed.explicit)
            .map(|routed| routed.path.center)
            .unwrap_or(fallback)
    }

    /// When the earliest pending settle callback is due.
    pub fn next_deferred(&self) -> Option<Instant> {
        self.deferred.values().min().copied()
    }

    pub fn dispatch(&mut self, event: CanvasEvent) -> Updates {
        let mut out = UpdatesBuilder::default();
        let mut structural = false;

        match event {
            CanvasEvent::DocumentLoaded { doc } => {
                self.load(doc);
                structural = true;
            }
            CanvasEvent::NodeAdded {
                node,
                bulk,
                pasting,
            } => {
                let node_id = node.id.clone();
                let bbox = node.bbox();
                self.upsert_node(node);
                if self.layers.layer_of_node(&node_id).is_none() {
                    self.layers.assign_node(&node_id);
                }
                structural = true;
                if !bulk || pasting {
                    self.mark_area(bbox, Some(&node_id));
                }
            }
            CanvasEvent::NodeMoved { node, keyboard } => {
                let node_id = node.id.clone();
                let bbox = node.bbox();
                self.upsert_node(node);
                if keyboard {
                    self.mark_area(bbox, Some(&node_id));
                } else if self.edge_change_allowed() {
                    self.mark_attached(&node_id);
                }
            }
            CanvasEvent::NodeRemoved { node_id } => {
                let bbox = self.doc.node_bbox(&node_id);
                self.doc.nodes.retain(|node| node.id != node_id);
                self.layers.remove_node(&node_id);
                structural = true;
                if let Some(bbox) = bbox {
                    self.mark_area(bbox, Some(&node_id));
                }
            }
            CanvasEvent::EdgeCreated { edge } => {
                let edge_id = edge.id.clone();
                self.upsert_edge(edge);
                if self.layers.layer_of_edge(&edge_id).is_none() {
                    self.layers.assign_edge(&edge_id);
                }
                structural = true;
                if self.edge_change_allowed() {
                    self.mark_dirty(&edge_id);
                }
                self.schedule_settle(edge_id);
            }
            CanvasEvent::EdgeChanged { edge } => {
                let edge_id = edge.id.clone();
                self.upsert_edge(edge);
                if self.edge_change_allowed() {
                    self.mark_dirty(&edge_id);
                }
            }
            CanvasEvent::EdgeRemoved { edge_id } => {
                self.doc.edges.retain(|edge| edge.id != edge_id);
                self.layers.remove_edge(&edge_id);
                self.edges.remove(&edge_id);
                self.deferred.remove(&edge_id);
                out.forget_edge(&edge_id);
                structural = true;
            }
            CanvasEvent::DraggingChanged { dragging } => {
                self.interaction.dragging = dragging;
                if !dragging {
                    let selected: Vec<BBox> = self
                        .interaction
                        .selected_nodes
                        .iter()
                        .filter_map(|node_id| self.doc.node_bbox(node_id))
                        .collect();
                    if let Some(area) = combine(&selected) {
                        self.mark_area(area, None);
                    }
                }
            }
            CanvasEvent::ConnectingChanged { connecting } => {
                self.interaction.connecting = connecting;
            }
            CanvasEvent::SelectionChanged { nodes, edges } => {
                self.interaction.selected_nodes = nodes.into_iter().collect();
                self.interaction.selected_edges = edges.into_iter().collect();
            }
            CanvasEvent::EdgeConnectionDragged {
                edge_id,
                end,
                pointer,
            } => {
                if self.settings.custom_edge_connection_positions {
                    self.drop_edge_end(&edge_id, end, pointer);
                }
            }
            CanvasEvent::SetStyleAttribute { edges, key, value } => {
                self.set_style_attribute(&edges, &key, value.as_deref(), &mut out);
            }
        }

        if structural {
            self.refresh_visibility(&mut out);
        }
        self.route_dirty(&mut out);
        out.finish()
    }

    pub fn apply_layer_command(&mut self, command: LayerCommand) -> Result<Updates, LayerError> {
        match command {
            LayerCommand::Add { name } => {
                self.layers.add(name.as_deref());
            }
            LayerCommand::Rename { layer_id, name } => self.layers.rename(&layer_id, name)?,
            LayerCommand::Delete { layer_id } => {
                self.layers.delete(&layer_id)?;
            }
            LayerCommand::MoveUp { layer_id } => {
                self.layers.move_up(&layer_id)?;
            }
            LayerCommand::MoveDown { layer_id } => {
                self.layers.move_down(&layer_id)?;
            }
            LayerCommand::SetVisible { layer_id, visible } => {
                self.layers.set_visible(&layer_id, visible)?
            }
            LayerCommand::ToggleVisible { layer_id } => {
                self.layers.toggle_visible(&layer_id)?;
            }
            LayerCommand::SetCurrent { layer_id } => self.layers.set_current(&layer_id)?,
            LayerCommand::MoveSelectionToCurrent => {
                for node_id in &self.interaction.selected_nodes {
                    if self.doc.node(node_id).is_some() {
                        self.layers.assign_node(node_id);
                    }
                }
                for edge_id in &self.interaction.selected_edges {
                    if self.doc.edge(edge_id).is_some() {
                        self.layers.assign_edge(edge_id);
                    }
                }
            }
        }

        let mut out = UpdatesBuilder::default();
        self.refresh_visibility(&mut out);
        Ok(out.finish())
    }

    /// Rebuilds arrows for every edge whose settle delay has elapsed by `now`.
    pub fn poll_deferred(&mut self, now: Instant) -> Updates {
        let due: Vec<EdgeId> = self
            .deferred
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(edge_id, _)| edge_id.clone())
            .collect();

        let mut out = UpdatesBuilder::default();
        for edge_id in due {
            self.deferred.remove(&edge_id);
            self.rebuild_arrows(&edge_id, &mut out);
        }
        out.finish()
    }

    fn load(&mut self, doc: CanvasData) {
        self.doc = doc;
        self.layers = LayerManager::from_layers(std::mem::take(&mut self.doc.layers));
        self.layers.ensure_default();
        self.visibility = Visibility::default();
        self.edges.clear();
        self.deferred.clear();

        let edge_ids: Vec<EdgeId> = self.doc.edges.iter().map(|edge| edge.id.clone()).collect();
        for edge_id in &edge_ids {
            self.mark_dirty(edge_id);
        }
        tracing::debug!(
            nodes = self.doc.nodes.len(),
            edges = edge_ids.len(),
            layers = self.layers.layers().len(),
            "document loaded"
        );
    }

    fn upsert_node(&mut self, node: NodeData) {
        match self.doc.nodes.iter_mut().find(|existing| existing.id == node.id) {
            Some(existing) => *existing = node,
            None => self.doc.nodes.push(node),
        }
    }

    fn upsert_edge(&mut self, edge: EdgeData) {
        match self.doc.edge_mut(&edge.id) {
            Some(existing) => *existing = edge,
            None => self.doc.edges.push(edge),
        }
    }

    fn styling_enabled(&self) -> bool {
        self.settings.edges_styling_feature_enabled
    }

    /// Routing may run now: not dragging, live updates opted in, or mid-connection.
    fn live_allowed(&self) -> bool {
        !self.interaction.dragging
            || self.settings.edge_style_update_while_dragging
            || self.interaction.connecting
    }

    /// Edge-directed changes also pass while a small, group-free selection is dragged.
    fn edge_change_allowed(&self) -> bool {
        if self.live_allowed() {
            return true;
        }
        let selected =
            self.interaction.selected_nodes.len() + self.interaction.selected_edges.len();
        if selected > MAX_LIVE_UPDATE_SELECTION {
            return false;
        }
        !self
            .interaction
            .selected_nodes
            .iter()
            .any(|node_id| self.doc.node(node_id).is_some_and(NodeData::is_group))
    }

    fn mark_dirty(&mut self, edge_id: &EdgeId) {
        if !self.styling_enabled() || self.doc.edge(edge_id).is_none() {
            return;
        }
        self.edges.entry(edge_id.clone()).or_default().state = RouteState::Dirty;
    }

    fn mark_attached(&mut self, node_id: &NodeId) {
        let attached: Vec<EdgeId> = self
            .doc
            .edges
            .iter()
            .filter(|edge| edge.touches(node_id))
            .map(|edge| edge.id.clone())
            .collect();
        for edge_id in &attached {
            self.mark_dirty(edge_id);
        }
    }

    /// Marks every edge whose end nodes span a box colliding with `area`, plus the edges
    /// attached to `node_id`.
    fn mark_area(&mut self, area: BBox, node_id: Option<&NodeId>) {
        if !self.live_allowed() {
            return;
        }
        let hit: Vec<EdgeId> = self
            .doc
            .edges
            .iter()
            .filter(|edge| {
                node_id.is_some_and(|node_id| edge.touches(node_id))
                    || self.doc.edge_bbox(edge).is_some_and(|bbox| bbox.colliding(&area))
            })
            .map(|edge| edge.id.clone())
            .collect();
        for edge_id in &hit {
            self.mark_dirty(edge_id);
        }
    }

    fn schedule_settle(&mut self, edge_id: EdgeId) {
        if !self.styling_enabled() {
            return;
        }
        self.deferred.entry(edge_id).or_insert_with(|| Instant::now() + SETTLE_DELAY);
    }

    fn drop_edge_end(&mut self, edge_id: &EdgeId, end: EdgeEnd, pointer: Position) {
        let relative = self.doc.edge(edge_id).and_then(|edge| {
            let endpoint = edge.endpoint(end);
            let bbox = self.doc.node_bbox(endpoint.node)?;
            Some(bbox.relative_position_on_side(endpoint.side, pointer))
        });
        let Some(relative) = relative else {
            return;
        };
        if let Some(edge) = self.doc.edge_mut(edge_id) {
            edge.set_relative_position(end, relative);
        }
        self.mark_dirty(edge_id);
    }

    fn set_style_attribute(
        &mut self,
        edges: &[EdgeId],
        key: &str,
        value: Option<&str>,
        out: &mut UpdatesBuilder,
    ) {
        let mut touched = Vec::with_capacity(edges.len());
        for edge_id in edges {
            if let Some(edge) = self.doc.edge_mut(edge_id) {
                edge.style_attributes.get_or_insert_with(StyleAttributes::new).set(key, value);
                touched.push(edge_id);
            }
        }
        if touched.is_empty() {
            return;
        }
        for edge_id in touched {
            self.mark_dirty(edge_id);
        }
        out.record_history(self.doc.clone());
    }

    fn refresh_visibility(&mut self, out: &mut UpdatesBuilder) {
        let next = self.layers.recompute_visibility(&self.doc);

        for (node_id, visible) in &next.nodes {
            if self.visibility.nodes.get(node_id) != Some(visible) {
                out.record_node_visibility(node_id.clone(), *visible);
            }
        }
        for (edge_id, visible) in &next.edges {
            if self.visibility.edges.get(edge_id) == Some(visible) {
                continue;
            }
            out.record_edge_visibility(edge_id.clone(), *visible);
            let routed = self.edges.get_mut(edge_id).and_then(|state| state.routed.as_mut());
            if let Some(routed) = routed {
                for glyph in &mut routed.arrows {
                    glyph.visible = *visible;
                }
                out.record_arrows(edge_id.clone(), routed.arrows.clone());
            }
        }
        self.visibility = next;

        if self.doc.layers.as_slice() != self.layers.layers() {
            self.doc.layers = self.layers.layers().to_vec();
            out.record_layers(self.doc.layers.clone());
        }
    }

    fn route_dirty(&mut self, out: &mut UpdatesBuilder) {
        let dirty: Vec<EdgeId> = self
            .edges
            .iter()
            .filter(|(_, state)| state.state == RouteState::Dirty)
            .map(|(edge_id, _)| edge_id.clone())
            .collect();

        for edge_id in &dirty {
            self.route_edge(edge_id, out);
        }
        for state in self.edges.values_mut() {
            state.state = RouteState::Idle;
        }
    }

    fn route_input(&self, edge: &EdgeData) -> Option<RouteInput> {
        let from_bbox = self.doc.node_bbox(&edge.from_node)?;
        let to_bbox = self.doc.node_bbox(&edge.to_node)?;
        let style = EdgeStyle::from_attributes(edge.style_attributes.as_ref());
        let explicit = edge
            .style_attributes
            .as_ref()
            .and_then(|attrs| attrs.get(PATHFINDING_METHOD_KEY))
            .and_then(PathfindingMethod::parse)
            .is_some();
        let obstacles = self
            .doc
            .nodes
            .iter()
            .filter(|node| {
                node.id != edge.from_node && node.id != edge.to_node && !node.is_group()
            })
            .map(NodeData::bbox)
            .collect();

        Some(RouteInput {
            method: style.pathfinding_method,
            explicit,
            from: endpoint_geometry(from_bbox, &edge.endpoint(EdgeEnd::From), &style),
            to: endpoint_geometry(to_bbox, &edge.endpoint(EdgeEnd::To), &style),
            obstacles,
            tuning: self.settings.route_tuning(&style),
            style,
            fill: resolve_stroke_color(edge.color.as_deref()),
        })
    }

    fn route_edge(&mut self, edge_id: &EdgeId, out: &mut UpdatesBuilder) {
        let Some(input) = self.doc.edge(edge_id).and_then(|edge| self.route_input(edge)) else {
            tracing::debug!(edge_id = %edge_id, "edge endpoints unavailable, not routing");
            return;
        };
        let state = self.edges.entry(edge_id.clone()).or_default();
        if state.last_input.as_ref() == Some(&input) {
            tracing::debug!(edge_id = %edge_id, "route inputs unchanged, skipping");
            return;
        }

        let request = RouteRequest {
            from: input.from,
            to: input.to,
            obstacles: &input.obstacles,
        };
        let path = match self.router.route(input.method, &request, input.tuning) {
            Ok(path) => path,
            Err(error) => {
                tracing::warn!(
                    edge_id = %edge_id,
                    method = %input.method,
                    error = %error,
                    "routing failed, keeping previous route"
                );
                state.last_input = None;
                out.record_failure(edge_id.clone(), error);
                return;
            }
        };

        let visible = self.visibility.edge_visible(edge_id);
        let previous_arrows = state.routed.take().map(|routed| routed.arrows);
        let placed = place_arrows(&path.path, &input.style, &input.fill, visible, &self.sampler);
        let arrows = match placed {
            Some(glyphs) => {
                out.record_arrows(edge_id.clone(), glyphs.clone());
                glyphs
            }
            None => previous_arrows.unwrap_or_default(),
        };

        if input.explicit {
            out.record_path(PathUpdate {
                edge_id: edge_id.clone(),
                method: input.method,
                d: path.svg_path(),
                center: path.center,
                path: path.clone(),
            });
        } else {
            out.record_reset(edge_id.clone());
        }
        out.record_end_cap(EndCapUpdate {
            edge_id: edge_id.clone(),
            points: end_cap_points(input.style.arrow),
            outline: end_cap_is_outline(input.style.arrow),
        });

        tracing::debug!(
            edge_id = %edge_id,
            method = %input.method,
            segments = path.path.segments.len(),
            arrows = arrows.len(),
            "routed edge"
        );
        state.routed = Some(RoutedEdge {
            method: input.method,
            explicit: input.explicit,
            path,
            arrows,
        });
        state.state = RouteState::Routed;
        state.last_input = Some(input);
    }

    fn rebuild_arrows(&mut self, edge_id: &EdgeId, out: &mut UpdatesBuilder) {
        let Some(edge) = self.doc.edge(edge_id) else {
            return;
        };
        let style = EdgeStyle::from_attributes(edge.style_attributes.as_ref());
        let fill = resolve_stroke_color(edge.color.as_deref());
        let visible = self.visibility.edge_visible(edge_id);
        let Some(routed) = self.edges.get_mut(edge_id).and_then(|state| state.routed.as_mut())
        else {
            return;
        };
        let placed = place_arrows(&routed.path.path, &style, &fill, visible, &self.sampler);
        if let Some(glyphs) = placed {
            routed.arrows = glyphs.clone();
            out.record_arrows(edge_id.clone(), glyphs);
        }
    }
}

/// An end with a line-end marker stops where the marker begins instead of on the node.
fn endpoint_geometry(bbox: BBox, endpoint: &Endpoint<'_>, style: &EdgeStyle) -> EndpointGeometry {
    let geometry = EndpointGeometry::on_side(bbox, endpoint.side, endpoint.relative);
    match endpoint.end {
        EndCap::Arrow => geometry.with_marker_offset(end_cap_depth(style.arrow)),
        EndCap::None => geometry,
    }
}

#[cfg(test)]
mod tests;
