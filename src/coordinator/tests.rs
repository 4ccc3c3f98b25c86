// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Instant;

use rstest::rstest;

use super::{CanvasEvent, EdgeCoordinator, LayerCommand, RouteState, Updates};
use crate::geometry::{Position, Side};
use crate::layers::LayerError;
use crate::model::fixtures::{
    edge, eid, layered_document, lid, nid, node, two_nodes_side_by_side, wall_between_nodes,
    with_method,
};
use crate::model::style::{ARROW_KEY, PATHFINDING_METHOD_KEY};
use crate::model::{CanvasData, EdgeEnd, EndCap};
use crate::routing::{PathfindingMethod, RouteError};
use crate::settings::Settings;

fn loaded(doc: CanvasData) -> (EdgeCoordinator, Updates) {
    loaded_with(Settings::default(), doc)
}

fn loaded_with(settings: Settings, doc: CanvasData) -> (EdgeCoordinator, Updates) {
    let mut coordinator = EdgeCoordinator::new(settings);
    let updates = coordinator.dispatch(CanvasEvent::DocumentLoaded { doc });
    (coordinator, updates)
}

fn square_pair() -> CanvasData {
    let mut doc = two_nodes_side_by_side();
    doc.edges[0] = with_method(doc.edges[0].clone(), "square");
    doc
}

fn start_drag(coordinator: &mut EdgeCoordinator, selected: &[&str]) {
    coordinator.dispatch(CanvasEvent::SelectionChanged {
        nodes: selected.iter().map(|id| nid(id)).collect(),
        edges: Vec::new(),
    });
    coordinator.dispatch(CanvasEvent::DraggingChanged { dragging: true });
}

#[test]
fn load_routes_explicit_edges_and_resets_the_rest() {
    let mut doc = two_nodes_side_by_side();
    doc.nodes.push(node("c", 0.0, 300.0, 100.0, 100.0));
    doc.edges.push(with_method(edge("e2", "a", Side::Bottom, "c", Side::Top), "square"));

    let (coordinator, updates) = loaded(doc);

    assert_eq!(updates.resets, vec![eid("e1")]);
    assert_eq!(updates.paths.len(), 1);
    let path = &updates.paths[0];
    assert_eq!(path.edge_id, eid("e2"));
    assert_eq!(path.method, PathfindingMethod::Square);
    assert_eq!(path.d, "M 50 100 L 50 289.6");
    assert!(path.center.approx_eq(Position::new(50.0, 194.8)), "{:?}", path.center);

    assert_eq!(updates.arrows.len(), 2);
    assert_eq!(updates.end_caps.len(), 2);
    assert!(updates.failures.is_empty());
    assert_eq!(coordinator.edge_state(&eid("e1")), Some(RouteState::Idle));
    assert_eq!(coordinator.edge_state(&eid("e2")), Some(RouteState::Idle));
}

#[test]
fn load_synthesizes_a_layer_and_reports_full_visibility() {
    let (coordinator, updates) = loaded(two_nodes_side_by_side());

    let layers = updates.layers.expect("layers recorded");
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].node_ids, vec![nid("a"), nid("b")]);
    assert_eq!(layers[0].edge_ids, vec![eid("e1")]);
    assert_eq!(updates.node_visibility, vec![(nid("a"), true), (nid("b"), true)]);
    assert_eq!(updates.edge_visibility, vec![(eid("e1"), true)]);
    assert_eq!(coordinator.document().layers, layers);
}

#[test]
fn echoed_changes_with_identical_inputs_do_nothing() {
    let (mut coordinator, _) = loaded(square_pair());
    let echo = coordinator.document().edges[0].clone();

    let updates = coordinator.dispatch(CanvasEvent::EdgeChanged { edge: echo });
    assert!(updates.is_empty(), "{updates:?}");
}

#[test]
fn changed_colors_rebuild_arrows_with_the_new_fill() {
    let (mut coordinator, _) = loaded(square_pair());
    let mut recolored = coordinator.document().edges[0].clone();
    recolored.color = Some("4".to_owned());

    let updates = coordinator.dispatch(CanvasEvent::EdgeChanged { edge: recolored });
    let glyphs = updates.arrows_for(&eid("e1")).expect("arrows");
    assert!(!glyphs.is_empty());
    assert!(glyphs.iter().all(|glyph| glyph.fill == "var(--canvas-color-4)"));
}

#[rstest]
#[case(&["a"], false, false, true)]
#[case(&["a", "b", "x1", "x2", "x3", "x4"], false, false, false)]
#[case(&["a", "b", "x1", "x2", "x3", "x4"], true, false, true)]
#[case(&["a", "b", "x1", "x2", "x3", "x4"], false, true, true)]
#[case(&["a", "group"], false, false, false)]
fn edge_changes_while_dragging(
    #[case] selected: &[&str],
    #[case] live_updates: bool,
    #[case] connecting: bool,
    #[case] routed: bool,
) {
    let mut doc = square_pair();
    let mut group = node("group", -50.0, -50.0, 600.0, 300.0);
    group.kind = "group".to_owned();
    doc.nodes.push(group);
    let settings = Settings {
        edge_style_update_while_dragging: live_updates,
        ..Settings::default()
    };
    let (mut coordinator, _) = loaded_with(settings, doc);
    start_drag(&mut coordinator, selected);
    coordinator.dispatch(CanvasEvent::ConnectingChanged { connecting });

    let mut moved = coordinator.document().edges[0].clone();
    moved.to_position = Some(0.25);
    let updates = coordinator.dispatch(CanvasEvent::EdgeChanged { edge: moved });

    assert_eq!(updates.path(&eid("e1")).is_some(), routed);
}

#[test]
fn drag_end_reroutes_edges_around_the_selection() {
    let (mut coordinator, _) = loaded(square_pair());
    start_drag(&mut coordinator, &["a", "b", "x1", "x2", "x3", "x4"]);

    let mut b = node("b", 300.0, 200.0, 100.0, 100.0);
    let during = coordinator.dispatch(CanvasEvent::NodeMoved {
        node: b.clone(),
        keyboard: false,
    });
    assert!(during.paths.is_empty());

    b.y = 220.0;
    coordinator.dispatch(CanvasEvent::NodeMoved {
        node: b,
        keyboard: false,
    });
    let after = coordinator.dispatch(CanvasEvent::DraggingChanged { dragging: false });
    let path = after.path(&eid("e1")).expect("rerouted");
    assert!(path.d.ends_with("289.6 270"), "{}", path.d);
}

#[rstest]
#[case(None, None, None, "M 100 50 L 289.6 50")]
#[case(None, Some(EndCap::None), None, "M 100 50 L 300 50")]
#[case(Some(EndCap::Arrow), Some(EndCap::Arrow), None, "M 110.4 50 L 289.6 50")]
#[case(None, Some(EndCap::Arrow), Some("diamond"), "M 100 50 L 280 50")]
#[case(None, Some(EndCap::Arrow), Some("blunt"), "M 100 50 L 292 50")]
fn line_end_markers_pull_the_anchor_off_the_node(
    #[case] from_end: Option<EndCap>,
    #[case] to_end: Option<EndCap>,
    #[case] arrow: Option<&str>,
    #[case] expected: &str,
) {
    let mut doc = square_pair();
    let edge = &mut doc.edges[0];
    edge.from_end = from_end;
    edge.to_end = to_end;
    if let (Some(attrs), Some(arrow)) = (edge.style_attributes.as_mut(), arrow) {
        attrs.set(ARROW_KEY, Some(arrow));
    }

    let (_, updates) = loaded(doc);
    assert_eq!(updates.path(&eid("e1")).expect("routed").d, expected);
}

#[test]
fn changing_the_end_cap_reroutes_the_edge() {
    let (mut coordinator, _) = loaded(square_pair());
    let mut plain = coordinator.document().edges[0].clone();
    plain.to_end = Some(EndCap::None);

    let updates = coordinator.dispatch(CanvasEvent::EdgeChanged { edge: plain });
    let path = updates.path(&eid("e1")).expect("rerouted");
    assert_eq!(path.d, "M 100 50 L 300 50");
}

#[test]
fn keyboard_nudges_update_edges_in_the_area() {
    let (mut coordinator, _) = loaded(square_pair());
    let updates = coordinator.dispatch(CanvasEvent::NodeMoved {
        node: node("b", 300.0, 10.0, 100.0, 100.0),
        keyboard: true,
    });
    assert!(updates.path(&eid("e1")).is_some());
}

#[test]
fn failed_routes_keep_the_previous_path() {
    let mut doc = square_pair();
    doc.edges[0].to_end = Some(EndCap::None);
    let (mut coordinator, _) = loaded(doc);
    let before = coordinator.routed(&eid("e1")).cloned().expect("routed");

    let updates = coordinator.dispatch(CanvasEvent::NodeMoved {
        node: node("b", 100.0, 0.0, 100.0, 100.0),
        keyboard: false,
    });

    assert!(updates.paths.is_empty());
    assert_eq!(updates.failures.len(), 1);
    assert!(matches!(updates.failures[0].error, RouteError::Degenerate { .. }));
    assert_eq!(coordinator.routed(&eid("e1")), Some(&before));
}

#[test]
fn a_star_edges_detour_around_the_wall() {
    let (coordinator, updates) = loaded(wall_between_nodes());
    let path = updates.path(&eid("e1")).expect("routed");
    assert_eq!(path.method, PathfindingMethod::AStar);
    assert!(path.path.path.segments.len() > 1);
    assert!(coordinator.routed(&eid("e1")).is_some());
}

#[test]
fn style_picker_writes_every_edge_and_pushes_one_snapshot() {
    let mut doc = two_nodes_side_by_side();
    doc.edges.push(edge("e2", "b", Side::Left, "a", Side::Right));
    let (mut coordinator, _) = loaded(doc);

    let updates = coordinator.dispatch(CanvasEvent::SetStyleAttribute {
        edges: vec![eid("e1"), eid("e2"), eid("missing")],
        key: PATHFINDING_METHOD_KEY.to_owned(),
        value: Some("square".to_owned()),
    });

    assert_eq!(updates.history.len(), 1);
    let snapshot = &updates.history[0];
    for edge in &snapshot.edges {
        let attrs = edge.style_attributes.as_ref().expect("attributes");
        assert_eq!(attrs.get(PATHFINDING_METHOD_KEY), Some("square"));
    }
    assert_eq!(updates.paths.len(), 2);
    assert!(updates.paths.iter().all(|path| path.method == PathfindingMethod::Square));
}

#[test]
fn clearing_the_method_hands_the_edge_back_to_the_host() {
    let (mut coordinator, _) = loaded(square_pair());
    let updates = coordinator.dispatch(CanvasEvent::SetStyleAttribute {
        edges: vec![eid("e1")],
        key: PATHFINDING_METHOD_KEY.to_owned(),
        value: None,
    });
    assert_eq!(updates.resets, vec![eid("e1")]);
    let fallback = Position::new(1.0, 2.0);
    assert_eq!(coordinator.center_for(&eid("e1"), fallback), fallback);
}

#[test]
fn arrow_none_changes_the_end_cap_and_clears_arrows() {
    let (mut coordinator, _) = loaded(square_pair());
    let updates = coordinator.dispatch(CanvasEvent::SetStyleAttribute {
        edges: vec![eid("e1")],
        key: ARROW_KEY.to_owned(),
        value: Some("diamond-outline".to_owned()),
    });
    assert_eq!(updates.end_caps[0].points, "0,0 5,10 0,20 -5,10");
    assert!(updates.end_caps[0].outline);

    let updates = coordinator.dispatch(CanvasEvent::SetStyleAttribute {
        edges: vec![eid("e1")],
        key: ARROW_KEY.to_owned(),
        value: Some("none".to_owned()),
    });
    assert_eq!(updates.arrows_for(&eid("e1")).map(<[_]>::len), Some(0));
}

#[test]
fn dropping_an_edge_end_stores_its_relative_position() {
    let (mut coordinator, _) = loaded(square_pair());
    let updates = coordinator.dispatch(CanvasEvent::EdgeConnectionDragged {
        edge_id: eid("e1"),
        end: EdgeEnd::From,
        pointer: Position::new(104.0, 25.0),
    });

    let edge = coordinator.document().edge(&eid("e1")).expect("edge");
    assert_eq!(edge.from_position, Some(0.25));
    let path = updates.path(&eid("e1")).expect("rerouted");
    assert_eq!(path.path.path.start, Position::new(100.0, 25.0));
}

#[test]
fn dropping_an_edge_end_is_ignored_when_custom_positions_are_off() {
    let settings = Settings {
        custom_edge_connection_positions: false,
        ..Settings::default()
    };
    let (mut coordinator, _) = loaded_with(settings, square_pair());
    let updates = coordinator.dispatch(CanvasEvent::EdgeConnectionDragged {
        edge_id: eid("e1"),
        end: EdgeEnd::To,
        pointer: Position::new(300.0, 90.0),
    });
    assert!(updates.is_empty());
    assert_eq!(coordinator.document().edges[0].to_position, None);
}

#[test]
fn center_requests_prefer_the_routed_center() {
    let (coordinator, _) = loaded(square_pair());
    let fallback = Position::new(-1.0, -1.0);
    let center = coordinator.center_for(&eid("e1"), fallback);
    assert!(center.approx_eq(Position::new(194.8, 50.0)), "{center:?}");
    assert_eq!(coordinator.center_for(&eid("unknown"), fallback), fallback);
}

#[test]
fn created_edges_settle_once_after_the_delay() {
    let mut doc = square_pair();
    let created = doc.edges.remove(0);
    let (mut coordinator, _) = loaded(doc);

    let before = Instant::now();
    let updates = coordinator.dispatch(CanvasEvent::EdgeCreated {
        edge: created.clone(),
    });
    assert!(updates.path(&eid("e1")).is_some());
    assert_eq!(updates.layers.map(|layers| layers[0].edge_ids.clone()), Some(vec![eid("e1")]));

    coordinator.dispatch(CanvasEvent::EdgeCreated { edge: created });
    let due = coordinator.next_deferred().expect("scheduled");
    assert!(coordinator.poll_deferred(before).is_empty());

    let settled = coordinator.poll_deferred(due);
    assert_eq!(settled.arrows.len(), 1);
    assert_eq!(settled.arrows[0].edge_id, eid("e1"));
    assert_eq!(coordinator.next_deferred(), None);
    assert!(coordinator.poll_deferred(due).is_empty());
}

#[test]
fn hidden_layers_hide_edges_and_their_arrows() {
    let (mut coordinator, updates) = loaded(layered_document());
    assert!(updates.node_visibility.contains(&(nid("c"), false)));
    assert!(updates.edge_visibility.contains(&(eid("e2"), false)));
    let hidden = updates.arrows_for(&eid("e2")).expect("arrows");
    assert!(hidden.iter().all(|glyph| !glyph.visible));

    let shown = coordinator
        .apply_layer_command(LayerCommand::ToggleVisible { layer_id: lid("notes") })
        .expect("toggle");
    assert_eq!(shown.node_visibility, vec![(nid("c"), true)]);
    assert_eq!(shown.edge_visibility, vec![(eid("e2"), true)]);
    let glyphs = shown.arrows_for(&eid("e2")).expect("restamped arrows");
    assert!(!glyphs.is_empty());
    assert!(glyphs.iter().all(|glyph| glyph.visible));
    assert!(shown.layers.is_some());
}

#[test]
fn deleting_layers_goes_through_the_manager() {
    let (mut coordinator, _) = loaded(layered_document());
    let updates = coordinator
        .apply_layer_command(LayerCommand::Delete { layer_id: lid("notes") })
        .expect("delete");
    assert!(updates.node_visibility.contains(&(nid("c"), true)));
    assert_eq!(coordinator.document().layers.len(), 1);

    let err = coordinator
        .apply_layer_command(LayerCommand::Delete { layer_id: lid("base") })
        .unwrap_err();
    assert_eq!(err, LayerError::LastLayer);
}

#[test]
fn new_nodes_join_the_current_layer() {
    let (mut coordinator, _) = loaded(layered_document());
    coordinator
        .apply_layer_command(LayerCommand::SetCurrent { layer_id: lid("notes") })
        .expect("current");

    let updates = coordinator.dispatch(CanvasEvent::NodeAdded {
        node: node("d", 600.0, 600.0, 50.0, 50.0),
        bulk: false,
        pasting: false,
    });
    assert_eq!(updates.node_visibility, vec![(nid("d"), false)]);
    let notes = coordinator.layers().layer(&lid("notes")).expect("notes");
    assert!(notes.node_ids.contains(&nid("d")));
}

#[test]
fn bulk_additions_skip_area_updates() {
    let (mut coordinator, _) = loaded(square_pair());
    let bulk = coordinator.dispatch(CanvasEvent::NodeAdded {
        node: node("x", 150.0, 0.0, 50.0, 100.0),
        bulk: true,
        pasting: false,
    });
    assert!(bulk.paths.is_empty());

    let pasted = coordinator.dispatch(CanvasEvent::NodeAdded {
        node: node("y", 150.0, 200.0, 50.0, 50.0),
        bulk: true,
        pasting: true,
    });
    assert!(pasted.node_visibility.contains(&(nid("y"), true)));
}

#[test]
fn moving_the_selection_to_the_current_layer() {
    let (mut coordinator, _) = loaded(layered_document());
    coordinator.dispatch(CanvasEvent::SelectionChanged {
        nodes: vec![nid("a")],
        edges: vec![eid("e1")],
    });
    coordinator
        .apply_layer_command(LayerCommand::SetCurrent { layer_id: lid("notes") })
        .expect("current");

    let updates = coordinator
        .apply_layer_command(LayerCommand::MoveSelectionToCurrent)
        .expect("move");
    assert!(updates.node_visibility.contains(&(nid("a"), false)));
    assert!(updates.edge_visibility.contains(&(eid("e1"), false)));
}

#[test]
fn removed_edges_leave_no_trace() {
    let (mut coordinator, _) = loaded(layered_document());
    let updates = coordinator.dispatch(CanvasEvent::EdgeRemoved { edge_id: eid("e2") });

    assert!(updates.arrows_for(&eid("e2")).is_none());
    assert_eq!(coordinator.edge_state(&eid("e2")), None);
    let layers = updates.layers.expect("layers");
    assert!(layers.iter().all(|layer| !layer.edge_ids.contains(&eid("e2"))));
}

#[test]
fn disabled_styling_ignores_edges_but_keeps_layers() {
    let settings = Settings {
        edges_styling_feature_enabled: false,
        ..Settings::default()
    };
    let (coordinator, updates) = loaded_with(settings, square_pair());
    assert!(updates.paths.is_empty());
    assert!(updates.arrows.is_empty());
    assert!(updates.layers.is_some());
    assert_eq!(coordinator.edge_state(&eid("e1")), None);
}
