// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Per-axis edits of a single point

use crate::ast::Vec3;

/// Set/add/multiply edit applied to a point, axis by axis.
///
/// Each component becomes `(set or original + add) * mul`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointAdjust {
    pub set: [Option<f64>; 3],
    pub add: Vec3,
    pub mul: Vec3,
}

impl Default for PointAdjust {
    fn default() -> Self {
        Self {
            set: [None; 3],
            add: Vec3::zeros(),
            mul: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl PointAdjust {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_x(mut self, x: f64) -> Self {
        self.set[0] = Some(x);
        self
    }

    pub fn set_y(mut self, y: f64) -> Self {
        self.set[1] = Some(y);
        self
    }

    pub fn set_z(mut self, z: f64) -> Self {
        self.set[2] = Some(z);
        self
    }

    pub fn add(mut self, offset: Vec3) -> Self {
        self.add += offset;
        self
    }

    /// Add the same offset on all three axes
    pub fn add_all(self, offset: f64) -> Self {
        self.add(Vec3::new(offset, offset, offset))
    }

    pub fn mul(mut self, factors: Vec3) -> Self {
        self.mul.component_mul_assign(&factors);
        self
    }

    /// Multiply all three axes by the same factor
    pub fn mul_all(self, factor: f64) -> Self {
        self.mul(Vec3::new(factor, factor, factor))
    }

    pub fn apply(&self, point: Vec3) -> Vec3 {
        Vec3::from_fn(|i, _| (self.set[i].unwrap_or(point[i]) + self.add[i]) * self.mul[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity() {
        let p = Vec3::new(1.0, -2.0, 3.5);
        assert_eq!(PointAdjust::new().apply(p), p);
    }

    #[test]
    fn test_set_add_mul() {
        let edit = PointAdjust::new()
            .set_z(10.0)
            .add(Vec3::new(1.0, 0.0, 0.0))
            .add_all(0.5)
            .mul(Vec3::new(2.0, 1.0, 1.0))
            .mul_all(0.5);
        let out = edit.apply(Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(out.x, 2.5);
        assert_relative_eq!(out.y, 1.25);
        assert_relative_eq!(out.z, 5.25);
    }
}
