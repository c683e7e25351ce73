// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shared helpers: a shell-script stand-in for OpenSCAD and a 3MF fixture

#![allow(dead_code)]

use anyhow::Result;
use scadkit::io::MODEL_ENTRY;
use scadkit::Renderer;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Writes an STL triangle for `-o *.stl`, copies the 3MF fixture for `-o *.3mf`
/// (garbage when there is none) and logs one line per invocation.
const FAKE_OPENSCAD: &str = r#"#!/bin/sh
echo "$*" >> '@LOG@'
while [ "$#" -gt 0 ]; do
  if [ "$1" = "-o" ]; then
    shift
    case "$1" in
      *.stl) printf 'solid fake\nfacet normal 0 0 1\n  outer loop\n    vertex 0 0 0\n    vertex 1 0 0\n    vertex 0 1 0\n  endloop\nendfacet\nendsolid fake\n' > "$1" ;;
      *.3mf) if [ -n '@FIXTURE@' ]; then cp '@FIXTURE@' "$1"; else printf 'not a zip' > "$1"; fi ;;
      *) printf 'fake output' > "$1" ;;
    esac
  fi
  shift
done
"#;

const FAILING_OPENSCAD: &str = r#"#!/bin/sh
echo "$*" >> '@LOG@'
echo "ERROR: Parser error in file" >&2
exit 1
"#;

/// Fake renderer installed in a directory
pub struct FakeOpenscad {
    pub renderer: Renderer,
    pub log: PathBuf,
}

impl FakeOpenscad {
    /// Renderer that succeeds, using `fixture` for 3MF outputs
    pub fn new(dir: &Path, fixture: Option<&Path>) -> Result<Self> {
        let fixture = fixture
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        Self::install(dir, "openscad.sh", &FAKE_OPENSCAD.replace("@FIXTURE@", &fixture))
    }

    /// Renderer that always exits non-zero
    pub fn failing(dir: &Path) -> Result<Self> {
        Self::install(dir, "openscad-failing.sh", FAILING_OPENSCAD)
    }

    fn install(dir: &Path, name: &str, template: &str) -> Result<Self> {
        let script = dir.join(name);
        let log = dir.join(format!("{name}.log"));
        fs::write(&script, template.replace("@LOG@", &log.display().to_string()))?;

        // Run through `sh` so the script never needs the executable bit
        let renderer = Renderer::new("sh").with_prefix_args([script.display().to_string()]);
        Ok(Self { renderer, log })
    }

    /// Number of times the renderer was started
    pub fn calls(&self) -> usize {
        fs::read_to_string(&self.log)
            .map(|log| log.lines().count())
            .unwrap_or(0)
    }
}

/// Minimal 3MF archive carrying the default OpenSCAD model name
pub fn write_3mf_fixture(path: &Path) -> Result<()> {
    let mut zip = ZipWriter::new(File::create(path)?);
    zip.start_file("[Content_Types].xml", SimpleFileOptions::default())?;
    zip.write_all(b"<Types/>")?;
    zip.start_file(MODEL_ENTRY, SimpleFileOptions::default())?;
    zip.write_all(
        br#"<model><metadata name="Title">OpenSCAD Model</metadata><object name="OpenSCAD Model"/></model>"#,
    )?;
    zip.finish()?;
    Ok(())
}

/// Text of the model entry inside a 3MF archive
pub fn read_model_entry(path: &Path) -> Result<String> {
    use std::io::Read;

    let mut archive = zip::ZipArchive::new(File::open(path)?)?;
    let mut entry = archive.by_name(MODEL_ENTRY)?;
    let mut text = String::new();
    entry.read_to_string(&mut text)?;
    Ok(text)
}
