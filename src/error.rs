// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types shared by the composer, render pipeline and cache

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by scadkit
#[derive(Debug, Error)]
pub enum Error {
    /// A transform call received no usable positional values and no axis override
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The external renderer could not be started or exited non-zero
    #[error("renderer failed on {script}: {reason}")]
    RenderProcess {
        script: PathBuf,
        reason: String,
        /// Captured stdout/stderr of the renderer, if it ran at all
        output: String,
    },

    /// A rendered 3MF output was not a readable ZIP archive
    #[error("not a valid 3MF container: {path}")]
    ContainerFormat {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Symbolic link alias could not be created on this host
    #[error("cannot link {alias}")]
    UnsupportedLink {
        alias: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid include filter")]
    Filter(#[from] regex::Error),

    #[error("failed to build worker pool")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
