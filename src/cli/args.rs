// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Command-line flags shared by model scripts

use crate::config::RenderConfig;
use crate::render::{RenderOptions, Renderer};
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Rendering flags, meant to be `#[command(flatten)]`ed into a model binary's CLI
#[derive(Debug, Clone, Default, Args)]
pub struct RenderArgs {
    /// Only write .scad scripts, never call OpenSCAD
    #[arg(long, alias = "skip_rendering")]
    pub skip_rendering: bool,

    /// Render PNG previews only
    #[arg(long)]
    pub preview: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// OpenSCAD command to use instead of the one found on PATH
    #[arg(long, alias = "openscad_bin", value_name = "COMMAND")]
    pub openscad_bin: Option<String>,

    /// Only render targets matching this regular expression
    #[arg(long, alias = "include_filter_regex", value_name = "REGEX")]
    pub include_filter_regex: Option<String>,

    /// Output directory
    #[arg(long, alias = "build_dir", value_name = "DIR")]
    pub build_dir: Option<PathBuf>,
}

/// Everything a model binary needs to run the pipeline
#[derive(Debug, Clone)]
pub struct RenderSession {
    pub output_dir: PathBuf,
    pub renderer: Option<Renderer>,
    pub options: RenderOptions,
    pub preview: bool,
}

impl RenderArgs {
    /// Merge flags over [`RenderConfig::load`], prepare the output directory and find OpenSCAD
    pub fn resolve(&self, default_output_dir: impl AsRef<Path>) -> Result<RenderSession> {
        let config = RenderConfig::load()?;
        self.resolve_with(config, default_output_dir)
    }

    /// Like [`RenderArgs::resolve`] with an explicit base configuration
    pub fn resolve_with(
        &self,
        mut config: RenderConfig,
        default_output_dir: impl AsRef<Path>,
    ) -> Result<RenderSession> {
        config.build_dir = self
            .build_dir
            .clone()
            .unwrap_or_else(|| default_output_dir.as_ref().to_path_buf());
        config.verbose |= self.verbose;
        if self.include_filter_regex.is_some() {
            config.include_filter = self.include_filter_regex.clone();
        }
        if self.openscad_bin.is_some() {
            config.openscad_path = self.openscad_bin.clone();
        }
        if self.preview {
            config.file_types = vec![".png".to_string()];
        }

        let output_dir = config.build_dir.clone();
        if !output_dir.exists() {
            info!(
                "Output dir \"{}\" did not exist, trying to create it now",
                output_dir.display()
            );
            std::fs::create_dir_all(&output_dir)
                .with_context(|| format!("Failed to create {}", output_dir.display()))?;
        }

        let renderer = if self.skip_rendering {
            None
        } else {
            let found = Renderer::discover(config.openscad_path.as_deref());
            if found.is_none() {
                warn!("Didn't find openscad in PATH, skipping rendering 3mf/stl/png!");
            }
            found
        };

        let options = config
            .into_options(renderer)?
            .with_progress(!self.verbose);

        Ok(RenderSession {
            output_dir,
            renderer: options.renderer.clone(),
            options,
            preview: self.preview,
        })
    }
}
