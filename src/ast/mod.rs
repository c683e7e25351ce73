// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Object tree module
//!
//! Defines the OpenSCAD object model handed to the composer and the renderer

mod node;
mod scad;
mod solid;

pub use node::{Axes, Node, NodeKind, TransformOp, Vec3};
pub use solid::Solid;
