// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Render tasks and task-list helpers

use crate::ast::{Node, Solid, Vec3};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A solid to render, where to put it, and where it sits in an assembly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderTask {
    pub solid: Node,
    /// Output path without extension; each requested format gets its own suffix
    pub target: PathBuf,
    #[serde(default = "origin")]
    pub position: Vec3,
}

impl RenderTask {
    pub fn new(solid: Node, target: impl Into<PathBuf>) -> Self {
        Self {
            solid,
            target: target.into(),
            position: Vec3::zeros(),
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Target path with the given extension (leading dot optional)
    pub fn output(&self, extension: &str) -> PathBuf {
        with_suffix(&self.target, extension)
    }

    /// Name written into container metadata
    pub fn display_name(&self) -> String {
        self.target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

fn origin() -> Vec3 {
    Vec3::zeros()
}

/// `path` with `.extension` appended; dots already in the file name are kept
pub(crate) fn with_suffix(path: &Path, extension: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(".");
    raw.push(extension.trim_start_matches('.'));
    PathBuf::from(raw)
}

/// Place every task under `dir`
pub fn with_output_dir<I>(dir: impl AsRef<Path>, tasks: I) -> Vec<RenderTask>
where
    I: IntoIterator<Item = RenderTask>,
{
    let dir = dir.as_ref();
    tasks
        .into_iter()
        .map(|task| RenderTask {
            target: dir.join(&task.target),
            ..task
        })
        .collect()
}

/// Prefix every solid with a global `$fn` resolution
pub fn with_fn<I>(fn_: u32, tasks: I) -> Vec<RenderTask>
where
    I: IntoIterator<Item = RenderTask>,
{
    tasks
        .into_iter()
        .map(|task| RenderTask {
            solid: Node::union(vec![Node::inline(format!("$fn = {fn_};")), task.solid]),
            ..task
        })
        .collect()
}

/// One task holding every solid moved to its position
pub fn assembly<'a, I>(tasks: I, target: impl Into<PathBuf>) -> RenderTask
where
    I: IntoIterator<Item = &'a RenderTask>,
{
    let parts = tasks
        .into_iter()
        .map(|task| {
            if task.position == Vec3::zeros() {
                task.solid.clone()
            } else {
                task.solid.clone().translate(task.position)
            }
        })
        .collect();
    RenderTask::new(Node::union(parts), target)
}
