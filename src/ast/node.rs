// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! OpenSCAD object model

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 3D Vector type alias
pub type Vec3 = nalgebra::Vector3<f64>;

/// Mirror axis selection, the 0/1 triple OpenSCAD expects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Axes {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl Axes {
    pub fn new(x: bool, y: bool, z: bool) -> Self {
        Self { x, y, z }
    }

    /// Axis flags as a 0/1 vector
    pub fn to_vec3(self) -> Vec3 {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        Vec3::new(flag(self.x), flag(self.y), flag(self.z))
    }
}

/// A solid: one node of an OpenSCAD object tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    /// Rendered with the `#` (debug highlight) modifier
    #[serde(default)]
    pub debug: bool,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self { kind, debug: false }
    }

    pub fn cube(size: Vec3) -> Self {
        Self::new(NodeKind::Cube {
            size,
            center: false,
        })
    }

    pub fn centered_cube(size: Vec3) -> Self {
        Self::new(NodeKind::Cube { size, center: true })
    }

    pub fn sphere(r: f64, fn_: u32) -> Self {
        Self::new(NodeKind::Sphere { r, fn_ })
    }

    pub fn cylinder(h: f64, r: f64, fn_: u32) -> Self {
        Self::new(NodeKind::Cylinder {
            h,
            r1: r,
            r2: r,
            center: false,
            fn_,
        })
    }

    pub fn cone(h: f64, r1: f64, r2: f64, fn_: u32) -> Self {
        Self::new(NodeKind::Cylinder {
            h,
            r1,
            r2,
            center: false,
            fn_,
        })
    }

    pub fn union(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Union(children))
    }

    pub fn difference(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Difference(children))
    }

    pub fn intersection(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Intersection(children))
    }

    /// Import a mesh file (STL, 3MF, ...) rendered earlier
    pub fn import(path: impl AsRef<Path>) -> Self {
        Self::new(NodeKind::Import(path.as_ref().to_path_buf()))
    }

    /// Raw OpenSCAD statements emitted verbatim
    pub fn inline(source: impl Into<String>) -> Self {
        Self::new(NodeKind::Inline(source.into()))
    }

    pub fn empty() -> Self {
        Self::new(NodeKind::Empty)
    }

    /// Wrap this node in a transform
    pub fn transformed(self, op: TransformOp) -> Self {
        Self::new(NodeKind::Transform {
            op,
            children: vec![self],
        })
    }
}

/// Types of object nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    // Primitives
    Cube {
        size: Vec3,
        center: bool,
    },
    Sphere {
        r: f64,
        fn_: u32,
    },
    Cylinder {
        h: f64,
        r1: f64,
        r2: f64,
        center: bool,
        fn_: u32,
    },

    // Boolean operations
    Union(Vec<Node>),
    Difference(Vec<Node>),
    Intersection(Vec<Node>),

    // Transformations
    Transform {
        op: TransformOp,
        children: Vec<Node>,
    },

    Import(PathBuf),
    Inline(String),

    // Empty node
    Empty,
}

impl NodeKind {
    /// Get child nodes
    pub fn get_children(&self) -> Vec<&Node> {
        match self {
            NodeKind::Union(children)
            | NodeKind::Difference(children)
            | NodeKind::Intersection(children)
            | NodeKind::Transform { children, .. } => children.iter().collect(),
            _ => Vec::new(),
        }
    }
}

/// Transformation operations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransformOp {
    Translate(Vec3),
    Rotate(Vec3),
    Scale(Vec3),
    Mirror(Axes),
}

impl TransformOp {
    /// OpenSCAD module name and its single vector argument
    pub fn module(&self) -> (&'static str, &'static str, Vec3) {
        match self {
            TransformOp::Translate(v) => ("translate", "v", *v),
            TransformOp::Rotate(a) => ("rotate", "a", *a),
            TransformOp::Scale(s) => ("scale", "v", *s),
            TransformOp::Mirror(axes) => ("mirror", "v", axes.to_vec3()),
        }
    }
}
