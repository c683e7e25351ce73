// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - rendered output inspection and patching

mod container;
mod stl;

pub use container::{set_model_name, DEFAULT_MODEL_NAME, MODEL_ENTRY};
pub use stl::{read_stl, StlSummary};
