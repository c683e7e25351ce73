// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Fluent transform composer

use super::operation::Operation;
use super::spec::VectorSpec;
use crate::ast::{Axes, Solid, Vec3};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Ordered list of transform operations, replayable onto any number of solids.
///
/// Builder calls append one operation each and hand the composer back, so a
/// placement reads left to right in the order it is applied:
/// `translate_x(10.0).rotate_z(45.0)` first moves, then turns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Composer {
    operations: Vec<Operation>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Append a raw operation
    pub fn push(mut self, op: Operation) -> Self {
        self.operations.push(op);
        self
    }

    pub fn translate(self, spec: impl Into<VectorSpec>) -> Result<Self> {
        let v = spec.into().resolve(0.0)?;
        Ok(self.push(Operation::Translate(v)))
    }

    pub fn rotate(self, spec: impl Into<VectorSpec>) -> Result<Self> {
        let angles = spec.into().resolve(0.0)?;
        Ok(self.push(Operation::Rotate(angles)))
    }

    pub fn scale(self, spec: impl Into<VectorSpec>) -> Result<Self> {
        let factors = spec.into().resolve(1.0)?;
        Ok(self.push(Operation::Scale(factors)))
    }

    pub fn mirror(self, x: bool, y: bool, z: bool) -> Self {
        self.push(Operation::Mirror(Axes::new(x, y, z)))
    }

    pub fn debug(self, flag: bool) -> Self {
        self.push(Operation::Debug(flag))
    }

    /// Single-axis shorthand. Unlike [`Composer::translate`] the value is taken
    /// as given and never checked for finiteness; the same holds for the other
    /// `*_x`/`*_y`/`*_z` shorthands.
    pub fn translate_x(self, x: f64) -> Self {
        self.push(Operation::Translate(Vec3::new(x, 0.0, 0.0)))
    }

    pub fn translate_y(self, y: f64) -> Self {
        self.push(Operation::Translate(Vec3::new(0.0, y, 0.0)))
    }

    pub fn translate_z(self, z: f64) -> Self {
        self.push(Operation::Translate(Vec3::new(0.0, 0.0, z)))
    }

    pub fn rotate_x(self, x: f64) -> Self {
        self.push(Operation::Rotate(Vec3::new(x, 0.0, 0.0)))
    }

    pub fn rotate_y(self, y: f64) -> Self {
        self.push(Operation::Rotate(Vec3::new(0.0, y, 0.0)))
    }

    pub fn rotate_z(self, z: f64) -> Self {
        self.push(Operation::Rotate(Vec3::new(0.0, 0.0, z)))
    }

    pub fn scale_x(self, x: f64) -> Self {
        self.push(Operation::Scale(Vec3::new(x, 1.0, 1.0)))
    }

    pub fn scale_y(self, y: f64) -> Self {
        self.push(Operation::Scale(Vec3::new(1.0, y, 1.0)))
    }

    pub fn scale_z(self, z: f64) -> Self {
        self.push(Operation::Scale(Vec3::new(1.0, 1.0, z)))
    }

    pub fn mirror_x(self) -> Self {
        self.mirror(true, false, false)
    }

    pub fn mirror_y(self) -> Self {
        self.mirror(false, true, false)
    }

    pub fn mirror_z(self) -> Self {
        self.mirror(false, false, true)
    }

    /// Replay every operation, in order, onto `solid`
    pub fn apply<S: Solid>(&self, solid: S) -> S {
        self.operations
            .iter()
            .fold(solid, |solid, op| op.apply(solid))
    }

    /// Replay onto each solid independently, keeping input order
    pub fn apply_all<S, I>(&self, solids: I) -> Vec<S>
    where
        S: Solid,
        I: IntoIterator<Item = S>,
    {
        solids.into_iter().map(|solid| self.apply(solid)).collect()
    }

    /// New composer running `self` then `other`; neither operand changes
    pub fn combine(&self, other: &Composer) -> Composer {
        let mut combined = self.clone();
        combined.extend(other);
        combined
    }

    /// Append `other`'s operations onto this composer
    pub fn extend(&mut self, other: &Composer) -> &mut Self {
        self.operations.extend_from_slice(&other.operations);
        self
    }
}

impl Add for Composer {
    type Output = Composer;

    fn add(mut self, other: Composer) -> Composer {
        self.extend(&other);
        self
    }
}

impl Add<&Composer> for &Composer {
    type Output = Composer;

    fn add(self, other: &Composer) -> Composer {
        self.combine(other)
    }
}

impl AddAssign<&Composer> for Composer {
    fn add_assign(&mut self, other: &Composer) {
        self.extend(other);
    }
}

impl AddAssign for Composer {
    fn add_assign(&mut self, other: Composer) {
        self.extend(&other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_builder_appends_in_order() {
        let c = Composer::new().translate_x(1.0).rotate_z(90.0).mirror_y().debug(true);
        assert_eq!(
            c.operations(),
            &[
                Operation::Translate(Vec3::new(1.0, 0.0, 0.0)),
                Operation::Rotate(Vec3::new(0.0, 0.0, 90.0)),
                Operation::Mirror(Axes::new(false, true, false)),
                Operation::Debug(true),
            ]
        );
    }

    #[test]
    fn test_invalid_call_appends_nothing() {
        let c = Composer::new().translate_x(1.0);
        let err = c.clone().scale(VectorSpec::axes(None, None, None)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_scale_keyword_fills_with_one() {
        let c = Composer::new().scale(VectorSpec::z(3.0)).unwrap();
        assert_eq!(c.operations(), &[Operation::Scale(Vec3::new(1.0, 1.0, 3.0))]);
        assert_eq!(c, Composer::new().scale_z(3.0));
    }

    #[test]
    fn test_combine_leaves_operands_untouched() {
        let a = Composer::new().translate_x(1.0);
        let b = Composer::new().rotate_y(2.0).mirror_x();
        let c = &a + &b;
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 2);
        assert_eq!(c.operations()[0], a.operations()[0]);
        assert_eq!(&c.operations()[1..], b.operations());
    }

    #[test]
    fn test_in_place_combine_extends_receiver() {
        let mut a = Composer::new().translate_x(1.0);
        let b = Composer::new().rotate_y(2.0).mirror_x();
        a += &b;
        assert_eq!(a.len(), 3);
        assert_eq!(&a.operations()[1..], b.operations());
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Composer::new().translate_x(1.0);
        let mut copy = original.clone();
        copy += Composer::new().mirror_z();
        assert_eq!(original.len(), 1);
        assert_eq!(copy.len(), 2);
    }
}
