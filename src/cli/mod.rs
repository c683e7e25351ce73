// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem for model binaries

pub mod args;
pub mod reporter;

pub use args::{RenderArgs, RenderSession};
pub use reporter::Reporter;

use tracing::Level;

/// Install the fmt subscriber; DEBUG when verbose, INFO otherwise
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    // A subscriber may already be installed by the host binary
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
