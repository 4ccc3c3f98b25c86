// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::geometry::Position;
use crate::model::{CanvasData, EdgeData, EdgeEnd, EdgeId, LayerId, NodeData, NodeId};

/// Change notifications delivered by the host canvas.
///
/// Events that change the document carry the new records, so the coordinator's copy of the
/// document stays in step with the host without reading back from it.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// A whole document was (re)loaded.
    DocumentLoaded { doc: CanvasData },
    NodeAdded {
        node: NodeData,
        /// Part of a batch of added nodes, e.g. an initial load.
        bulk: bool,
        pasting: bool,
    },
    /// The node's geometry changed; `keyboard` marks arrow-key nudges.
    NodeMoved { node: NodeData, keyboard: bool },
    NodeRemoved { node_id: NodeId },
    EdgeCreated { edge: EdgeData },
    EdgeChanged { edge: EdgeData },
    EdgeRemoved { edge_id: EdgeId },
    DraggingChanged { dragging: bool },
    ConnectingChanged { connecting: bool },
    SelectionChanged {
        nodes: Vec<NodeId>,
        edges: Vec<EdgeId>,
    },
    /// An edge end was dropped at `pointer` (canvas coordinates) after a connection drag.
    EdgeConnectionDragged {
        edge_id: EdgeId,
        end: EdgeEnd,
        pointer: Position,
    },
    /// A style picker choice applied to a set of edges; `None` clears the attribute.
    SetStyleAttribute {
        edges: Vec<EdgeId>,
        key: String,
        value: Option<String>,
    },
}

/// User actions on the layer panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerCommand {
    Add { name: Option<String> },
    Rename { layer_id: LayerId, name: String },
    Delete { layer_id: LayerId },
    MoveUp { layer_id: LayerId },
    MoveDown { layer_id: LayerId },
    SetVisible { layer_id: LayerId, visible: bool },
    ToggleVisible { layer_id: LayerId },
    SetCurrent { layer_id: LayerId },
    /// Moves every selected node and edge into the current layer.
    MoveSelectionToCurrent,
}
