// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Render configuration system

use crate::render::{Renderer, RenderOptions, DEFAULT_BACKEND, DEFAULT_COLORSCHEME, DEFAULT_FILE_TYPES};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory
pub const CONFIG_FILE: &str = "scadkit.toml";

/// Render configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output directory for scripts and renders
    pub build_dir: PathBuf,
    /// OpenSCAD command; auto-detected when unset
    pub openscad_path: Option<String>,
    /// Formats to render
    pub file_types: Vec<String>,
    /// Regular expression selecting the targets to render
    pub include_filter: Option<String>,
    pub remove_duplicates: bool,
    /// Maximum parallel workers
    pub parallelism: Option<usize>,
    pub verbose: bool,
    pub backend: String,
    pub colorscheme: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from("build"),
            openscad_path: None, // Auto-detect
            file_types: DEFAULT_FILE_TYPES.iter().map(|s| s.to_string()).collect(),
            include_filter: None,
            remove_duplicates: true,
            parallelism: None, // Auto-detect
            verbose: false,
            backend: DEFAULT_BACKEND.to_string(),
            colorscheme: DEFAULT_COLORSCHEME.to_string(),
        }
    }
}

impl RenderConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: RenderConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        if let Ok(openscad) = std::env::var("SCADKIT_OPENSCAD") {
            config.openscad_path = Some(openscad);
        }

        if let Ok(build_dir) = std::env::var("SCADKIT_BUILD_DIR") {
            config.build_dir = PathBuf::from(build_dir);
        }

        if let Ok(parallelism) = std::env::var("SCADKIT_PARALLELISM") {
            config.parallelism = parallelism.parse().ok();
        }

        if let Ok(verbose) = std::env::var("SCADKIT_VERBOSE") {
            config.verbose = verbose.parse().unwrap_or(false);
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Apply backend and color scheme to a renderer
    pub fn configure_renderer(&self, renderer: Renderer) -> Renderer {
        renderer
            .with_backend(&self.backend)
            .with_colorscheme(&self.colorscheme)
    }

    /// Pipeline options for this configuration, with `renderer` as the backend binary
    pub fn into_options(self, renderer: Option<Renderer>) -> Result<RenderOptions> {
        let renderer = renderer.map(|r| self.configure_renderer(r));
        let mut options = RenderOptions::new()
            .with_output_dir(self.build_dir)
            .with_renderer(renderer)
            .with_file_types(self.file_types)
            .with_remove_duplicates(self.remove_duplicates)
            .with_verbose(self.verbose);
        if let Some(workers) = self.parallelism {
            options = options.with_parallelism(workers);
        }
        if let Some(pattern) = &self.include_filter {
            options = options
                .with_include_filter(pattern)
                .with_context(|| format!("Invalid include filter: {pattern}"))?;
        }
        Ok(options)
    }
}
