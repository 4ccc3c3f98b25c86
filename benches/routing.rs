// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use canvas_router::coordinator::{CanvasEvent, EdgeCoordinator};
use canvas_router::model::EdgeStyle;
use canvas_router::path::{EdgePath, FlattenSampler};
use canvas_router::render::place_arrows;
use canvas_router::routing::{EdgeRouter, PathfindingMethod, RouteRequest, RouteTuning};
use canvas_router::settings::Settings;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

mod fixtures;
mod profiler;

use fixtures::Case;

fn route_all(router: &mut EdgeRouter, method: PathfindingMethod, case: Case) -> Vec<EdgePath> {
    let doc = fixtures::grid_canvas(case, method);
    fixtures::route_inputs(&doc)
        .iter()
        .filter_map(|(from, to, obstacles)| {
            let request = RouteRequest {
                from: *from,
                to: *to,
                obstacles,
            };
            router.route(method, &request, RouteTuning::default()).ok()
        })
        .collect()
}

// Benchmark identity (keep stable):
// - Group names: `routing.route_edges`, `render.place_arrows`, `coordinator.load`.
// - Case IDs are `<method>_<size>` and must stay comparable across refactors.
fn benches_routers(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing.route_edges");

    for (method, case, id) in [
        (PathfindingMethod::Direct, Case::Medium, "direct_medium"),
        (PathfindingMethod::Square, Case::Medium, "square_medium"),
        (PathfindingMethod::AStar, Case::Small, "a_star_small"),
        (PathfindingMethod::AStar, Case::Medium, "a_star_medium"),
    ] {
        let doc = fixtures::grid_canvas(case, method);
        let inputs = fixtures::route_inputs(&doc);
        let mut router = EdgeRouter::new();
        group.bench_function(id, |b| {
            b.iter(|| {
                let mut routed = 0usize;
                for (from, to, obstacles) in &inputs {
                    let request = RouteRequest {
                        from: *from,
                        to: *to,
                        obstacles,
                    };
                    if router.route(method, black_box(&request), RouteTuning::default()).is_ok() {
                        routed += 1;
                    }
                }
                black_box(routed)
            })
        });
    }
    group.finish();
}

fn benches_arrows(c: &mut Criterion) {
    let mut group = c.benchmark_group("render.place_arrows");
    let sampler = FlattenSampler::default();
    let style = EdgeStyle::default();

    for (method, id) in [
        (PathfindingMethod::Direct, "direct_medium"),
        (PathfindingMethod::Square, "square_medium"),
    ] {
        let paths = route_all(&mut EdgeRouter::new(), method, Case::Medium);
        group.bench_function(id, |b| {
            b.iter(|| {
                let mut glyphs = 0usize;
                for path in &paths {
                    let placed = place_arrows(&path.path, &style, "#888", true, &sampler);
                    glyphs += placed.map_or(0, |placed| placed.len());
                }
                black_box(glyphs)
            })
        });
    }
    group.finish();
}

fn benches_coordinator(c: &mut Criterion) {
    let mut group = c.benchmark_group("coordinator.load");

    for (method, case, id) in [
        (PathfindingMethod::Square, Case::Medium, "square_medium"),
        (PathfindingMethod::AStar, Case::Small, "a_star_small"),
    ] {
        let doc = fixtures::grid_canvas(case, method);
        group.bench_function(id, |b| {
            b.iter(|| {
                let mut coordinator = EdgeCoordinator::new(Settings::default());
                let doc = black_box(doc.clone());
                let updates = coordinator.dispatch(CanvasEvent::DocumentLoaded { doc });
                black_box(updates.paths.len())
            })
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_routers, benches_arrows, benches_coordinator
}
criterion_main!(benches);
