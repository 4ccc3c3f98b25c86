// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canvas Router CLI entrypoint.
//!
//! `route` prints the routed path, label center and arrows of every edge in a `.canvas`
//! file, `layers` prints (and optionally writes back) healed layer membership and `schema`
//! prints the JSON schema of the document format.

use std::collections::BTreeMap;
use std::error::Error;

use canvas_router::coordinator::{CanvasEvent, EdgeCoordinator};
use canvas_router::layers::LayerManager;
use canvas_router::model::{CanvasData, EdgeId};
use canvas_router::settings::Settings;
use canvas_router::store::{CanvasFile, WriteDurability};
use serde_json::{json, Value};

const LOG_ENV: &str = "CANVAS_ROUTER_LOG";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} route <file.canvas> [--settings <file.json>] [--edge <id>]\n  {program} layers <file.canvas> [--write] [--durable-writes]\n  {program} schema\n\n`route` prints a JSON object keyed by edge id with the routed path of each edge.\n`layers` heals layer membership and prints it; --write saves the healed document.\n\nSet {LOG_ENV} (e.g. `debug`) to control log output on stderr; the default is `warn`."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Route { file: String, settings: Option<String>, edge: Option<String> },
    Layers { file: String, write: bool, durable_writes: bool },
    Schema,
}

fn parse_command(mut args: impl Iterator<Item = String>) -> Result<Command, ()> {
    let command = args.next().ok_or(())?;
    match command.as_str() {
        "route" => {
            let mut file = None;
            let mut settings = None;
            let mut edge = None;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--settings" => {
                        if settings.is_some() {
                            return Err(());
                        }
                        settings = Some(args.next().ok_or(())?);
                    }
                    "--edge" => {
                        if edge.is_some() {
                            return Err(());
                        }
                        edge = Some(args.next().ok_or(())?);
                    }
                    _ if arg.starts_with('-') => return Err(()),
                    _ => {
                        if file.is_some() {
                            return Err(());
                        }
                        file = Some(arg);
                    }
                }
            }
            Ok(Command::Route {
                file: file.ok_or(())?,
                settings,
                edge,
            })
        }
        "layers" => {
            let mut file = None;
            let mut write = false;
            let mut durable_writes = false;
            for arg in args {
                match arg.as_str() {
                    "--write" => {
                        if write {
                            return Err(());
                        }
                        write = true;
                    }
                    "--durable-writes" => {
                        if durable_writes {
                            return Err(());
                        }
                        durable_writes = true;
                    }
                    _ if arg.starts_with('-') => return Err(()),
                    _ => {
                        if file.is_some() {
                            return Err(());
                        }
                        file = Some(arg);
                    }
                }
            }
            if durable_writes && !write {
                return Err(());
            }
            Ok(Command::Layers {
                file: file.ok_or(())?,
                write,
                durable_writes,
            })
        }
        "schema" => {
            if args.next().is_some() {
                return Err(());
            }
            Ok(Command::Schema)
        }
        _ => Err(()),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn route(
    file: &str,
    settings: Option<&str>,
    edge: Option<&str>,
) -> Result<Value, Box<dyn Error>> {
    let settings = match settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let doc = CanvasFile::new(file).load()?;
    let only = edge.map(EdgeId::new).transpose()?;
    if let Some(edge_id) = &only {
        if doc.edge(edge_id).is_none() {
            return Err(format!("no edge with id `{edge_id}` in {file}").into());
        }
    }

    let edge_ids: Vec<EdgeId> = doc.edges.iter().map(|edge| edge.id.clone()).collect();
    let mut coordinator = EdgeCoordinator::new(settings);
    let updates = coordinator.dispatch(CanvasEvent::DocumentLoaded { doc });
    let failures: BTreeMap<&EdgeId, String> = updates
        .failures
        .iter()
        .map(|failure| (&failure.edge_id, failure.error.to_string()))
        .collect();

    let mut out = serde_json::Map::new();
    for edge_id in edge_ids.iter().filter(|id| only.as_ref().map_or(true, |only| only == *id)) {
        let entry = match coordinator.routed(edge_id) {
            Some(routed) => json!({
                "method": routed.method.as_str(),
                "explicit": routed.explicit,
                "d": routed.path.svg_path(),
                "center": routed.path.center,
                "arrows": routed
                    .arrows
                    .iter()
                    .map(|glyph| json!({
                        "x": glyph.position.x,
                        "y": glyph.position.y,
                        "angle": glyph.angle_degrees,
                        "visible": glyph.visible,
                    }))
                    .collect::<Vec<_>>(),
            }),
            None => {
                let error = failures.get(edge_id).cloned().unwrap_or_else(|| {
                    "edge endpoints are missing or styling is disabled".to_owned()
                });
                json!({ "error": error })
            }
        };
        out.insert(edge_id.to_string(), entry);
    }
    Ok(Value::Object(out))
}

fn layers(file: &str, write: bool, durable_writes: bool) -> Result<Value, Box<dyn Error>> {
    let store = if durable_writes {
        CanvasFile::new(file).with_durability(WriteDurability::Durable)
    } else {
        CanvasFile::new(file)
    };
    let mut doc: CanvasData = store.load()?;
    let mut manager = LayerManager::from_layers(std::mem::take(&mut doc.layers));
    let report = manager.heal(&doc);
    doc.layers = manager.into_layers();

    if write {
        store.save(&doc)?;
    }
    Ok(json!({
        "layers": doc.layers,
        "healed": {
            "duplicates": report.duplicates,
            "stale": report.stale,
            "adopted": report.adopted,
        },
        "written": write,
    }))
}

fn main() {
    init_tracing();

    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "canvas-router".to_owned());

        let command = match parse_command(args) {
            Ok(command) => command,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let output = match command {
            Command::Route {
                file,
                settings,
                edge,
            } => route(&file, settings.as_deref(), edge.as_deref())?,
            Command::Layers {
                file,
                write,
                durable_writes,
            } => layers(&file, write, durable_writes)?,
            Command::Schema => serde_json::to_value(schemars::schema_for!(CanvasData))?,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("canvas-router: {err}");
        std::process::exit(1);
    }
}
