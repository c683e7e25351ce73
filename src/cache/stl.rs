// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Content-hashed STL render cache

use super::{logical_name, CacheStrategy, CachedSolids};
use crate::ast::Node;
use crate::error::{Error, Result};
use crate::io::read_stl;
use crate::render::{posix, render_tasks, with_suffix, RenderOptions, RenderTask, Renderer};
use sha2::{Digest, Sha256};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Format whose presence marks a cache hit
pub const PRIMARY_EXTENSION: &str = ".stl";

/// Suffix of the alias pointing at the newest render of a name
pub const LAST_SUFFIX: &str = "_last";

const ALIASED_EXTENSIONS: [&str; 2] = [PRIMARY_EXTENSION, ".scad"];

/// Hex SHA-256 of the solid's OpenSCAD script
pub fn content_hash(solid: &Node) -> String {
    let mut hasher = Sha256::new();
    hasher.update(solid.to_scad().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Renders each distinct script once and serves later requests from disk
#[derive(Debug, Clone)]
pub struct StlCache {
    cache_dir: PathBuf,
    options: RenderOptions,
}

struct Entry {
    name: String,
    /// `<cache_dir>/<name>` without hash
    logical: PathBuf,
    task: RenderTask,
}

impl StlCache {
    pub fn new(renderer: Renderer, cache_dir: impl Into<PathBuf>) -> Self {
        Self::with_options(cache_dir, RenderOptions::new().with_renderer(Some(renderer)))
    }

    /// Use `options` for rendering misses; formats, output dir and filter are fixed by the cache
    pub fn with_options(cache_dir: impl Into<PathBuf>, options: RenderOptions) -> Self {
        let options = RenderOptions {
            output_dir: None,
            include_filter: None,
            ..options
        }
        .with_file_types([PRIMARY_EXTENSION]);
        Self {
            cache_dir: cache_dir.into(),
            options,
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// `<cache_dir>/<name>_<hash>`, the extension-less target for `solid`
    pub fn hashed_target(&self, name: &Path, solid: &Node) -> PathBuf {
        self.cache_dir
            .join(append(name, &format!("_{}", content_hash(solid))))
    }

    fn entry(&self, solid: Node, name: PathBuf) -> Entry {
        let target = self.hashed_target(&name, &solid);
        Entry {
            name: logical_name(&name),
            logical: self.cache_dir.join(&name),
            task: RenderTask::new(solid, target),
        }
    }
}

impl CacheStrategy for StlCache {
    fn name(&self) -> &'static str {
        "stl"
    }

    fn cache_to_stl(&self, items: Vec<(Node, PathBuf)>) -> Result<CachedSolids> {
        let entries: Vec<Entry> = items
            .into_iter()
            .map(|(solid, name)| self.entry(solid, name))
            .collect();

        let (hits, misses): (Vec<&Entry>, Vec<&Entry>) = entries
            .iter()
            .partition(|e| e.task.output(PRIMARY_EXTENSION).exists());

        for hit in &hits {
            info!("Found {} in cache", posix(&hit.task.target));
        }

        if !misses.is_empty() {
            render_tasks(misses.iter().map(|e| e.task.clone()), &self.options)?;
            for miss in &misses {
                refresh_aliases(miss);
            }
        }

        Ok(entries
            .into_iter()
            .map(|e| {
                let stl = e.task.output(PRIMARY_EXTENSION);
                let stl = std::path::absolute(&stl).unwrap_or(stl);
                (e.name, Node::import(stl))
            })
            .collect())
    }
}

/// Point `<name>_last.*` at the freshly rendered files of `entry`
fn refresh_aliases(entry: &Entry) {
    let stl = entry.task.output(PRIMARY_EXTENSION);
    match read_stl(&stl) {
        Ok(summary) => debug!(
            "{} has {} triangles",
            posix(&stl),
            summary.triangle_count
        ),
        Err(e) => {
            warn!("Not linking {}: {e}", posix(&stl));
            return;
        }
    }

    let alias_base = append(&entry.logical, LAST_SUFFIX);
    for ext in ALIASED_EXTENSIONS {
        let alias = with_suffix(&alias_base, ext);
        let target = entry.task.output(ext);
        if let Err(e) = refresh_alias(&alias, &target) {
            warn!("Failed to update {}: {e}", posix(&alias));
        }
    }
}

/// Replace `alias` by a link to `target`, or by a copy where links are unsupported
pub fn refresh_alias(alias: &Path, target: &Path) -> Result<()> {
    if fs::symlink_metadata(alias).is_ok() {
        fs::remove_file(alias)?;
    }
    match symlink(alias, target) {
        Ok(()) => Ok(()),
        Err(e) => {
            debug!("{e}, copying instead");
            fs::copy(target, alias)?;
            Ok(())
        }
    }
}

fn symlink(alias: &Path, target: &Path) -> Result<()> {
    // Alias and target share a directory, so link by file name only
    let relative = target.file_name().map(Path::new).unwrap_or(target);
    platform_symlink(relative, alias).map_err(|source| Error::UnsupportedLink {
        alias: alias.to_path_buf(),
        source,
    })
}

#[cfg(unix)]
fn platform_symlink(original: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(original, link)
}

#[cfg(windows)]
fn platform_symlink(original: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(original, link)
}

#[cfg(not(any(unix, windows)))]
fn platform_symlink(_original: &Path, _link: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "symbolic links are not supported",
    ))
}

/// `path` with `suffix` appended to its final component
fn append(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}
