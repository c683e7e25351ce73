// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch rendering through the OpenSCAD command-line renderer

mod pipeline;
mod renderer;
mod task;

pub use pipeline::{
    dedup_by_target, prepare_tasks, render_tasks, worker_count, RenderOptions, RenderOutcome,
    RenderStatus, CONTAINER_EXTENSION, DEFAULT_FILE_TYPES,
};
pub use renderer::{
    find_in_path, RenderRun, Renderer, CANDIDATES, DEFAULT_BACKEND, DEFAULT_COLORSCHEME,
};
pub use task::{assembly, with_fn, with_output_dir, RenderTask};

pub(crate) use pipeline::posix;
pub(crate) use task::with_suffix;
