// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Recorded transform operations

use crate::ast::{Axes, Solid, Vec3};
use serde::{Deserialize, Serialize};

/// One step of a composer, replayed onto a solid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    Translate(Vec3),
    Rotate(Vec3),
    Scale(Vec3),
    Mirror(Axes),
    Debug(bool),
}

impl Operation {
    pub fn apply<S: Solid>(&self, solid: S) -> S {
        match *self {
            Operation::Translate(v) => solid.translate(v),
            Operation::Rotate(angles) => solid.rotate(angles),
            Operation::Scale(factors) => solid.scale(factors),
            Operation::Mirror(axes) => solid.mirror(axes),
            Operation::Debug(true) => solid.debug(),
            Operation::Debug(false) => solid,
        }
    }
}
