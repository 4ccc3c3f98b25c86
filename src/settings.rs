// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! User-facing switches for edge styling.
//!
//! Keys are the host plugin's own setting names so an exported settings file loads as is.
//! Unknown keys are ignored and missing keys take their defaults.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::EdgeStyle;
use crate::routing::RouteTuning;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Master switch; when off, edge events are ignored.
    pub edges_styling_feature_enabled: bool,
    /// Re-route while a node drag is still in progress.
    pub edge_style_update_while_dragging: bool,
    pub edge_style_square_path_rounded: bool,
    pub edge_style_pathfinder_allow_diagonal: bool,
    pub edge_style_pathfinder_path_rounded: bool,
    /// Dragging an edge end along a side stores where it was dropped.
    pub custom_edge_connection_positions: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            edges_styling_feature_enabled: true,
            edge_style_update_while_dragging: false,
            edge_style_square_path_rounded: true,
            edge_style_pathfinder_allow_diagonal: false,
            edge_style_pathfinder_path_rounded: true,
            custom_edge_connection_positions: true,
        }
    }
}

impl Settings {
    /// Reads settings from a JSON file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "settings file missing, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|source| SettingsError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Router switches for one edge; its `pathRounded`/`allowDiagonal` attributes win.
    pub fn route_tuning(&self, style: &EdgeStyle) -> RouteTuning {
        RouteTuning {
            square_rounded: style.path_rounded.unwrap_or(self.edge_style_square_path_rounded),
            a_star_rounded: style
                .path_rounded
                .unwrap_or(self.edge_style_pathfinder_path_rounded),
            allow_diagonal: style
                .allow_diagonal
                .unwrap_or(self.edge_style_pathfinder_allow_diagonal),
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read settings at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "invalid settings at {path:?}: {source}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}
