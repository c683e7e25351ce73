// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! 3MF (3D Manufacturing Format) display-name patching

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Archive entry holding the model XML
pub const MODEL_ENTRY: &str = "3D/3dmodel.model";

/// Object name OpenSCAD writes into every 3MF it exports
pub const DEFAULT_MODEL_NAME: &str = "OpenSCAD Model";

/// Replace the default model name inside a 3MF archive with `name`.
///
/// The archive is rebuilt next to the original and renamed over it. Every entry
/// other than [`MODEL_ENTRY`] is copied without recompression.
pub fn set_model_name(path: impl AsRef<Path>, name: &str) -> Result<()> {
    let path = path.as_ref();
    let format_error = |source| Error::ContainerFormat {
        path: path.to_path_buf(),
        source,
    };

    let mut archive = ZipArchive::new(File::open(path)?).map_err(format_error)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut writer = ZipWriter::new(NamedTempFile::new_in(dir)?);

    for i in 0..archive.len() {
        let is_model = archive.by_index_raw(i).map_err(format_error)?.name() == MODEL_ENTRY;

        if !is_model {
            let entry = archive.by_index_raw(i).map_err(format_error)?;
            writer.raw_copy_file(entry).map_err(format_error)?;
            continue;
        }

        let mut entry = archive.by_index(i).map_err(format_error)?;
        let options = SimpleFileOptions::default().compression_method(entry.compression());
        let mut text = String::new();
        entry.read_to_string(&mut text)?;
        drop(entry);

        writer
            .start_file(MODEL_ENTRY, options)
            .map_err(format_error)?;
        writer.write_all(text.replace(DEFAULT_MODEL_NAME, name).as_bytes())?;
    }

    let patched = writer.finish().map_err(format_error)?;
    patched.persist(path).map_err(|e| e.error)?;
    Ok(())
}
