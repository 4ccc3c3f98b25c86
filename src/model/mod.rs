// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Document model: typed ids, canvas records and style attributes.

pub mod canvas;
pub(crate) mod fixtures;
pub mod ids;
pub mod style;

pub use canvas::{CanvasData, EdgeData, EdgeEnd, EndCap, Endpoint, Layer, NodeData};
pub use ids::{EdgeId, Id, IdError, LayerId, NodeId};
pub use style::{ArrowDensity, ArrowShape, ArrowSize, EdgeStyle, StyleAttributes};
