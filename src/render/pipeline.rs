// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parallel batch rendering
//!
//! Tasks are resolved against the output directory, de-duplicated by target
//! (the last task for a target wins), filtered, and fanned out over a bounded
//! worker pool. A failing task is logged and reported with zero elapsed time;
//! it never stops the rest of the batch.

use super::renderer::Renderer;
use super::task::RenderTask;
use crate::error::{Error, Result};
use crate::io::set_model_name;
use ahash::AHashMap;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info};

/// Output formats rendered when none are requested
pub const DEFAULT_FILE_TYPES: [&str; 2] = [".3mf", ".png"];

/// Extension of the ZIP based container whose model name gets patched
pub const CONTAINER_EXTENSION: &str = ".3mf";

/// Batch rendering settings
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Directory prepended to every task target
    pub output_dir: Option<PathBuf>,
    /// Without a renderer only the `.scad` scripts are written
    pub renderer: Option<Renderer>,
    pub file_types: Vec<String>,
    /// Only targets matching this pattern are rendered
    pub include_filter: Option<Regex>,
    pub remove_duplicates: bool,
    pub verbose: bool,
    /// Worker count override; defaults to [`worker_count`]
    pub parallelism: Option<usize>,
    pub progress: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            renderer: None,
            file_types: DEFAULT_FILE_TYPES.iter().map(|s| s.to_string()).collect(),
            include_filter: None,
            remove_duplicates: true,
            verbose: false,
            parallelism: None,
            progress: false,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_renderer(mut self, renderer: Option<Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_file_types<I, S>(mut self, file_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_types = file_types.into_iter().map(Into::into).collect();
        self
    }

    /// Compile and set the include filter
    pub fn with_include_filter(mut self, pattern: &str) -> Result<Self> {
        self.include_filter = Some(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn with_remove_duplicates(mut self, remove: bool) -> Self {
        self.remove_duplicates = remove;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_parallelism(mut self, workers: usize) -> Self {
        self.parallelism = Some(workers);
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}

/// How a task finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// Script written and renderer succeeded
    Rendered,
    /// Script written, no renderer configured
    ScriptOnly,
    /// Script could not be written or the renderer failed
    Failed,
}

/// Per-task report: absolute target path and renderer wall time
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    pub path: PathBuf,
    pub elapsed: Duration,
    pub status: RenderStatus,
}

/// Default worker pool size: all cores but two, at least one
pub fn worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_sub(2)
        .max(1)
}

/// Keep the last task for every target, in first-seen target order
pub fn dedup_by_target(tasks: Vec<RenderTask>) -> Vec<RenderTask> {
    let mut index: AHashMap<PathBuf, usize> = AHashMap::with_capacity(tasks.len());
    let mut unique: Vec<RenderTask> = Vec::with_capacity(tasks.len());

    for task in tasks {
        match index.get(&task.target) {
            Some(&i) => unique[i] = task,
            None => {
                index.insert(task.target.clone(), unique.len());
                unique.push(task);
            }
        }
    }

    unique
}

/// Resolve, de-duplicate and filter tasks the way [`render_tasks`] does
pub fn prepare_tasks<I>(tasks: I, options: &RenderOptions) -> Vec<RenderTask>
where
    I: IntoIterator<Item = RenderTask>,
{
    let mut tasks: Vec<RenderTask> = match &options.output_dir {
        Some(dir) => super::task::with_output_dir(dir, tasks),
        None => tasks.into_iter().collect(),
    };

    if options.remove_duplicates {
        tasks = dedup_by_target(tasks);
    }

    if let Some(filter) = &options.include_filter {
        tasks.retain(|task| filter.is_match(&posix(&task.target)));
    }

    tasks
}

/// Write every task's script and render the requested formats
pub fn render_tasks<I>(tasks: I, options: &RenderOptions) -> Result<Vec<RenderOutcome>>
where
    I: IntoIterator<Item = RenderTask>,
{
    let tasks = prepare_tasks(tasks, options);
    if tasks.is_empty() {
        info!("Nothing to generate");
        return Ok(Vec::new());
    }

    info!(
        "Will generate {}",
        tasks
            .iter()
            .map(|t| posix(&t.target))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let workers = options.parallelism.unwrap_or_else(worker_count).max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("render-{i}"))
        .build()?;

    let progress = options.progress.then(|| {
        let pb = ProgressBar::new(tasks.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    });

    let outcomes: Vec<RenderOutcome> = pool.install(|| {
        tasks
            .par_iter()
            .map(|task| {
                let outcome = render_one(task, options);
                if let Some(pb) = &progress {
                    pb.inc(1);
                }
                outcome
            })
            .collect()
    });

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    for outcome in &outcomes {
        info!(
            "Saved in {:.2}s {}",
            outcome.elapsed.as_secs_f64(),
            posix(&outcome.path)
        );
    }

    Ok(outcomes)
}

fn render_one(task: &RenderTask, options: &RenderOptions) -> RenderOutcome {
    let path = std::path::absolute(&task.target).unwrap_or_else(|_| task.target.clone());
    let failed = || RenderOutcome {
        path: path.clone(),
        elapsed: Duration::ZERO,
        status: RenderStatus::Failed,
    };

    let script = task.output("scad");
    if let Err(e) = write_script(task, &script) {
        error!("Failed to write {}: {e}", script.display());
        return failed();
    }

    let Some(renderer) = &options.renderer else {
        return RenderOutcome {
            path,
            elapsed: Duration::ZERO,
            status: RenderStatus::ScriptOnly,
        };
    };

    let outputs: Vec<PathBuf> = options.file_types.iter().map(|ext| task.output(ext)).collect();

    let run = match renderer.run(&script, &outputs) {
        Ok(run) => run,
        Err(Error::RenderProcess { reason, output, .. }) => {
            info!("Saving {}", script.display());
            error!("{}: {reason}", posix(&task.target));
            if !output.trim().is_empty() {
                error!("{output}");
            }
            return failed();
        }
        Err(e) => {
            error!("{}: {e}", posix(&task.target));
            return failed();
        }
    };

    if options.verbose {
        debug!(stdout = %run.stdout, stderr = %run.stderr, "renderer output");
    }

    let wants_container = options
        .file_types
        .iter()
        .any(|ext| ext.trim_start_matches('.') == CONTAINER_EXTENSION.trim_start_matches('.'));
    let container = task.output(CONTAINER_EXTENSION);
    if wants_container && container.exists() {
        if let Err(e) = set_model_name(&container, &task.display_name()) {
            error!("{e}");
            return failed();
        }
    }

    RenderOutcome {
        path,
        elapsed: run.elapsed,
        status: RenderStatus::Rendered,
    }
}

fn write_script(task: &RenderTask, script: &Path) -> std::io::Result<()> {
    if let Some(parent) = script.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    task.solid.save_as_scad(script)
}

/// Forward-slash form of a path, used for logs and filter matching
pub(crate) fn posix(path: &Path) -> String {
    path.to_string_lossy()
        .replace(std::path::MAIN_SEPARATOR, "/")
}
