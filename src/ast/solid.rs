// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry handle capabilities used by the transform composer

use super::node::{Axes, Node, TransformOp, Vec3};

/// A geometry handle that can be moved, turned, scaled, mirrored and highlighted.
///
/// Every method consumes the handle and returns the transformed one; what the
/// transform means numerically is up to the implementation.
pub trait Solid: Sized {
    fn translate(self, v: Vec3) -> Self;
    fn rotate(self, angles: Vec3) -> Self;
    fn scale(self, factors: Vec3) -> Self;
    fn mirror(self, axes: Axes) -> Self;
    fn debug(self) -> Self;
}

impl Solid for Node {
    fn translate(self, v: Vec3) -> Self {
        self.transformed(TransformOp::Translate(v))
    }

    fn rotate(self, angles: Vec3) -> Self {
        self.transformed(TransformOp::Rotate(angles))
    }

    fn scale(self, factors: Vec3) -> Self {
        self.transformed(TransformOp::Scale(factors))
    }

    fn mirror(self, axes: Axes) -> Self {
        self.transformed(TransformOp::Mirror(axes))
    }

    fn debug(mut self) -> Self {
        self.debug = true;
        self
    }
}
