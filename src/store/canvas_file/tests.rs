// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rstest::{fixture, rstest};

use super::{CanvasFile, StoreError, WriteDurability};
use crate::layers::DEFAULT_LAYER_NAME;
use crate::model::fixtures;

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("canvas-router-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[fixture]
fn tmp() -> TempDir {
    TempDir::new("store")
}

const BARE_CANVAS: &str = r#"{
    "nodes": [
        {"id": "a", "type": "text", "text": "Hello", "x": 0, "y": 0, "width": 100, "height": 60},
        {"id": "b", "type": "file", "file": "notes/b.md", "x": 300, "y": 0, "width": 100, "height": 60}
    ],
    "edges": [
        {"id": "e1", "fromNode": "a", "fromSide": "right", "toNode": "b", "toSide": "left",
         "styleAttributes": {"pathfindingMethod": "square"}}
    ],
    "metadata": {"version": "1.0-1.0", "frontmatter": {}}
}"#;

#[rstest]
fn load_synthesizes_the_default_layer(tmp: TempDir) {
    let path = tmp.path().join("bare.canvas");
    std::fs::write(&path, BARE_CANVAS).unwrap();

    let doc = CanvasFile::new(&path).load().unwrap();
    assert_eq!(doc.layers.len(), 1);
    assert_eq!(doc.layers[0].name, DEFAULT_LAYER_NAME);
    assert!(doc.layers[0].visible);
    assert!(doc.layers[0].is_empty());

    let raw = CanvasFile::new(&path).load_raw().unwrap();
    assert!(raw.layers.is_empty());
}

#[rstest]
fn existing_layers_are_left_alone(tmp: TempDir) {
    let path = tmp.path().join("layered.canvas");
    let file = CanvasFile::new(&path);
    file.save(&fixtures::layered_document()).unwrap();

    let doc = file.load().unwrap();
    assert_eq!(doc, fixtures::layered_document());
}

#[rstest]
#[case(WriteDurability::BestEffort)]
#[case(WriteDurability::Durable)]
fn save_round_trips_host_fields(tmp: TempDir, #[case] durability: WriteDurability) {
    let source = tmp.path().join("source.canvas");
    std::fs::write(&source, BARE_CANVAS).unwrap();
    let doc = CanvasFile::new(&source).load_raw().unwrap();

    let target = tmp.path().join("target.canvas");
    let file = CanvasFile::new(&target).with_durability(durability);
    assert_eq!(file.durability(), durability);
    file.save(&doc).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(written["nodes"][0]["text"], "Hello");
    assert_eq!(written["nodes"][1]["file"], "notes/b.md");
    assert_eq!(written["edges"][0]["styleAttributes"]["pathfindingMethod"], "square");
    assert_eq!(written["metadata"]["version"], "1.0-1.0");
    assert!(written.get("layers").is_none());

    let leftovers: Vec<_> = std::fs::read_dir(tmp.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(".canvas-router.tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[rstest]
fn save_replaces_an_existing_file(tmp: TempDir) {
    let path = tmp.path().join("doc.canvas");
    std::fs::write(&path, "stale").unwrap();

    CanvasFile::new(&path).save(&fixtures::two_nodes_side_by_side()).unwrap();
    let doc = CanvasFile::new(&path).load_raw().unwrap();
    assert_eq!(doc, fixtures::two_nodes_side_by_side());
}

#[rstest]
fn missing_files_report_io_errors(tmp: TempDir) {
    let path = tmp.path().join("missing.canvas");
    let err = CanvasFile::new(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert!(err.to_string().contains("missing.canvas"));
}

#[rstest]
fn malformed_json_reports_the_path(tmp: TempDir) {
    let path = tmp.path().join("broken.canvas");
    std::fs::write(&path, "{\"nodes\": [").unwrap();
    let err = CanvasFile::new(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::Json { ref path, .. } if path.ends_with("broken.canvas")));
}

#[cfg(unix)]
#[rstest]
fn save_refuses_to_follow_symlinks(tmp: TempDir) {
    let real = tmp.path().join("real.canvas");
    std::fs::write(&real, "{}").unwrap();
    let link = tmp.path().join("link.canvas");
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let err = CanvasFile::new(&link).save(&fixtures::two_nodes_side_by_side()).unwrap_err();
    assert!(matches!(err, StoreError::SymlinkRefused { .. }));
    assert_eq!(std::fs::read_to_string(&real).unwrap(), "{}");
}
