// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canvas Router: edge routing and decoration for JSON Canvas documents.
//!
//! Edges between canvas nodes are drawn as direct curves, orthogonal polylines or A* paths
//! around other nodes, decorated with direction arrows and grouped into layers. The host
//! application owns rendering; this crate turns change events into plain update values.

pub mod coordinator;
pub mod geometry;
pub mod layers;
pub mod model;
pub mod path;
pub mod render;
pub mod routing;
pub mod settings;
pub mod store;
