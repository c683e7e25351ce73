// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Subprocess execution of the OpenSCAD command-line renderer

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{Duration, Instant};
use tracing::debug;

/// Geometry backend passed to OpenSCAD
pub const DEFAULT_BACKEND: &str = "Manifold";

/// Color scheme used for PNG renders
pub const DEFAULT_COLORSCHEME: &str = "BeforeDawn";

/// Binary names probed on `PATH`, most preferred first
pub const CANDIDATES: [&str; 2] = ["openscad-nightly", "openscad"];

/// How to invoke the external renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Renderer {
    pub program: PathBuf,
    /// Arguments placed before the renderer's own, e.g. when it runs through a wrapper
    pub prefix_args: Vec<String>,
    pub backend: String,
    pub colorscheme: String,
}

/// Captured result of a successful renderer run
#[derive(Debug, Clone)]
pub struct RenderRun {
    pub elapsed: Duration,
    pub stdout: String,
    pub stderr: String,
}

impl Renderer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            prefix_args: Vec::new(),
            backend: DEFAULT_BACKEND.to_string(),
            colorscheme: DEFAULT_COLORSCHEME.to_string(),
        }
    }

    /// Parse a whitespace separated command line such as `"wsl openscad"`
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program).with_prefix_args(parts.map(str::to_string)))
    }

    pub fn with_prefix_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefix_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = backend.into();
        self
    }

    pub fn with_colorscheme(mut self, colorscheme: impl Into<String>) -> Self {
        self.colorscheme = colorscheme.into();
        self
    }

    /// Use `explicit` if given, otherwise the first known renderer found on `PATH`
    pub fn discover(explicit: Option<&str>) -> Option<Self> {
        if let Some(command) = explicit {
            return Self::from_command_line(command);
        }
        CANDIDATES
            .iter()
            .find_map(|name| find_in_path(name))
            .map(Self::new)
    }

    /// Check that the renderer starts at all
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .args(&self.prefix_args)
            .arg("--version")
            .output()
            .is_ok()
    }

    /// Build the renderer command for one script and its requested outputs
    pub fn command(&self, script: &Path, outputs: &[PathBuf]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.prefix_args);
        for output in outputs {
            cmd.arg("-o").arg(output);
        }
        cmd.arg("--backend")
            .arg(&self.backend)
            .arg("--colorscheme")
            .arg(&self.colorscheme)
            .arg(script);
        cmd
    }

    /// Run the renderer and wait for it
    pub fn run(&self, script: &Path, outputs: &[PathBuf]) -> Result<RenderRun> {
        let mut cmd = self.command(script, outputs);
        debug!(command = ?cmd, "running renderer");

        let start = Instant::now();
        let output = cmd.output().map_err(|e| Error::RenderProcess {
            script: script.to_path_buf(),
            reason: format!("failed to start {}: {e}", self.program.display()),
            output: String::new(),
        })?;
        let elapsed = start.elapsed();

        let Output {
            status,
            stdout,
            stderr,
        } = output;
        let stdout = String::from_utf8_lossy(&stdout).into_owned();
        let stderr = String::from_utf8_lossy(&stderr).into_owned();

        if !status.success() {
            return Err(Error::RenderProcess {
                script: script.to_path_buf(),
                reason: format!("exited with {status}"),
                output: join_output(&stdout, &stderr),
            });
        }

        Ok(RenderRun {
            elapsed,
            stdout,
            stderr,
        })
    }
}

fn join_output(stdout: &str, stderr: &str) -> String {
    match (stdout.trim().is_empty(), stderr.trim().is_empty()) {
        (true, _) => stderr.to_string(),
        (_, true) => stdout.to_string(),
        _ => format!("{stdout}\n{stderr}"),
    }
}

/// Locate an executable by name on `PATH`
pub fn find_in_path(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths).find_map(|dir| {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        let exe = candidate.with_extension(env::consts::EXE_EXTENSION);
        (!env::consts::EXE_EXTENSION.is_empty() && exe.is_file()).then_some(exe)
    })
}
