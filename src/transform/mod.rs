// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Transform composition
//!
//! Free functions start a fresh [`Composer`] with one operation, so a placement
//! can be written as `translate_x(10.0).rotate_z(45.0)` and applied later to any
//! number of solids.

mod composer;
mod operation;
mod point;
mod spec;

pub use composer::Composer;
pub use operation::Operation;
pub use point::PointAdjust;
pub use spec::VectorSpec;

use crate::error::Result;

pub fn translate(spec: impl Into<VectorSpec>) -> Result<Composer> {
    Composer::new().translate(spec)
}

pub fn translate_x(x: f64) -> Composer {
    Composer::new().translate_x(x)
}

pub fn translate_y(y: f64) -> Composer {
    Composer::new().translate_y(y)
}

pub fn translate_z(z: f64) -> Composer {
    Composer::new().translate_z(z)
}

pub fn rotate(spec: impl Into<VectorSpec>) -> Result<Composer> {
    Composer::new().rotate(spec)
}

pub fn rotate_x(x: f64) -> Composer {
    Composer::new().rotate_x(x)
}

pub fn rotate_y(y: f64) -> Composer {
    Composer::new().rotate_y(y)
}

pub fn rotate_z(z: f64) -> Composer {
    Composer::new().rotate_z(z)
}

pub fn scale(spec: impl Into<VectorSpec>) -> Result<Composer> {
    Composer::new().scale(spec)
}

pub fn scale_x(x: f64) -> Composer {
    Composer::new().scale_x(x)
}

pub fn scale_y(y: f64) -> Composer {
    Composer::new().scale_y(y)
}

pub fn scale_z(z: f64) -> Composer {
    Composer::new().scale_z(z)
}

pub fn mirror(x: bool, y: bool, z: bool) -> Composer {
    Composer::new().mirror(x, y, z)
}

pub fn mirror_x() -> Composer {
    Composer::new().mirror_x()
}

pub fn mirror_y() -> Composer {
    Composer::new().mirror_y()
}

pub fn mirror_z() -> Composer {
    Composer::new().mirror_z()
}
