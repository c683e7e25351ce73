// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Vector arguments accepted by transform calls

use crate::ast::Vec3;
use crate::error::{Error, Result};

/// A vector argument in one of the two accepted forms.
///
/// `Components` is the positional form: one to three values, trailing missing
/// components take the operation's neutral value. `Axes` is the keyword form:
/// any subset of x/y/z, unset axes take the neutral value. The two forms are
/// never mixed within one call.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorSpec {
    Components(Vec<f64>),
    Axes {
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
    },
}

impl VectorSpec {
    pub fn x(x: f64) -> Self {
        Self::axes(Some(x), None, None)
    }

    pub fn y(y: f64) -> Self {
        Self::axes(None, Some(y), None)
    }

    pub fn z(z: f64) -> Self {
        Self::axes(None, None, Some(z))
    }

    pub fn axes(x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Self {
        Self::Axes { x, y, z }
    }

    /// Resolve to a full vector, filling unset components with `fill`
    pub fn resolve(&self, fill: f64) -> Result<Vec3> {
        match self {
            VectorSpec::Components(values) => {
                if values.is_empty() || values.len() > 3 {
                    return Err(Error::InvalidArgument(format!(
                        "expected 1 to 3 components, got {}",
                        values.len()
                    )));
                }
                let at = |i: usize| values.get(i).copied().unwrap_or(fill);
                finite(Vec3::new(at(0), at(1), at(2)))
            }
            VectorSpec::Axes { x, y, z } => {
                if x.is_none() && y.is_none() && z.is_none() {
                    return Err(Error::InvalidArgument(
                        "either components or at least one of x, y, z must be given".into(),
                    ));
                }
                finite(Vec3::new(
                    x.unwrap_or(fill),
                    y.unwrap_or(fill),
                    z.unwrap_or(fill),
                ))
            }
        }
    }
}

fn finite(v: Vec3) -> Result<Vec3> {
    if v.iter().all(|c| c.is_finite()) {
        Ok(v)
    } else {
        Err(Error::InvalidArgument(format!(
            "components must be finite, got [{}, {}, {}]",
            v.x, v.y, v.z
        )))
    }
}

impl From<f64> for VectorSpec {
    fn from(x: f64) -> Self {
        Self::Components(vec![x])
    }
}

impl From<(f64, f64)> for VectorSpec {
    fn from((x, y): (f64, f64)) -> Self {
        Self::Components(vec![x, y])
    }
}

impl From<(f64, f64, f64)> for VectorSpec {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::Components(vec![x, y, z])
    }
}

impl<const N: usize> From<[f64; N]> for VectorSpec {
    fn from(values: [f64; N]) -> Self {
        Self::Components(values.to_vec())
    }
}

impl From<&[f64]> for VectorSpec {
    fn from(values: &[f64]) -> Self {
        Self::Components(values.to_vec())
    }
}

impl From<Vec<f64>> for VectorSpec {
    fn from(values: Vec<f64>) -> Self {
        Self::Components(values)
    }
}

impl From<Vec3> for VectorSpec {
    fn from(v: Vec3) -> Self {
        Self::Components(vec![v.x, v.y, v.z])
    }
}
