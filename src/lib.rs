// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! scadkit
//!
//! Fluent transform composition for OpenSCAD solids, parallel batch rendering
//! through the OpenSCAD command-line renderer, and a content-hashed STL cache.

pub mod ast;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod render;
pub mod transform;

pub use ast::{Axes, Node, NodeKind, Solid, TransformOp, Vec3};
pub use cache::{CacheStrategy, NoCache, RenderCache, StlCache};
pub use config::RenderConfig;
pub use error::{Error, Result};
pub use render::{render_tasks, RenderOptions, RenderOutcome, RenderStatus, RenderTask, Renderer};
pub use transform::{Composer, Operation, VectorSpec};

/// Write scripts for `tasks` into `output_dir` without invoking a renderer
pub fn save_scripts<I>(tasks: I, output_dir: impl Into<std::path::PathBuf>) -> Result<Vec<RenderOutcome>>
where
    I: IntoIterator<Item = RenderTask>,
{
    render_tasks(tasks, &RenderOptions::new().with_output_dir(output_dir))
}
