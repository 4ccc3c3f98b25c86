// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for `.canvas` documents on disk.
//!
//! Documents are plain JSON. Saving goes through a temp file and an atomic rename so a
//! crash never leaves a half-written canvas behind.

pub mod canvas_file;

pub use canvas_file::{CanvasFile, StoreError, WriteDurability};
