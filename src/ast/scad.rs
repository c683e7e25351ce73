// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! OpenSCAD script serialization
//!
//! The output is deterministic: the same object tree always produces the same
//! text, which is what the render cache hashes.

use super::node::{Node, NodeKind, Vec3};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const INDENT: &str = "  ";

impl Node {
    /// Serialize this object tree as an OpenSCAD script
    pub fn to_scad(&self) -> String {
        let mut out = String::new();
        write_node(self, &mut out, 0);
        out
    }

    /// Write the OpenSCAD script for this object to `path`
    pub fn save_as_scad(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        fs::write(path, self.to_scad())
    }
}

fn write_node(node: &Node, out: &mut String, depth: usize) {
    let pad = INDENT.repeat(depth);
    let modifier = if node.debug { "#" } else { "" };

    match &node.kind {
        NodeKind::Cube { size, center } => {
            let _ = writeln!(
                out,
                "{pad}{modifier}cube(size = {}, center = {center});",
                fmt_vec(size)
            );
        }
        NodeKind::Sphere { r, fn_ } => {
            let _ = writeln!(
                out,
                "{pad}{modifier}sphere(r = {}{});",
                fmt_num(*r),
                fmt_fn(*fn_)
            );
        }
        NodeKind::Cylinder {
            h,
            r1,
            r2,
            center,
            fn_,
        } => {
            let _ = writeln!(
                out,
                "{pad}{modifier}cylinder(h = {}, r1 = {}, r2 = {}, center = {center}{});",
                fmt_num(*h),
                fmt_num(*r1),
                fmt_num(*r2),
                fmt_fn(*fn_)
            );
        }
        NodeKind::Union(children) => write_group(out, &pad, modifier, "union()", children, depth),
        NodeKind::Difference(children) => {
            write_group(out, &pad, modifier, "difference()", children, depth)
        }
        NodeKind::Intersection(children) => {
            write_group(out, &pad, modifier, "intersection()", children, depth)
        }
        NodeKind::Transform { op, children } => {
            let (name, arg, v) = op.module();
            let head = format!("{name}({arg} = {})", fmt_vec(&v));
            write_group(out, &pad, modifier, &head, children, depth);
        }
        NodeKind::Import(path) => {
            let file = path
                .to_string_lossy()
                .replace('\\', "\\\\")
                .replace('"', "\\\"");
            let _ = writeln!(out, "{pad}{modifier}import(file = \"{file}\");");
        }
        NodeKind::Inline(source) => {
            for line in source.lines() {
                let _ = writeln!(out, "{pad}{line}");
            }
        }
        NodeKind::Empty => {}
    }
}

fn write_group(
    out: &mut String,
    pad: &str,
    modifier: &str,
    head: &str,
    children: &[Node],
    depth: usize,
) {
    let _ = writeln!(out, "{pad}{modifier}{head} {{");
    for child in children {
        write_node(child, out, depth + 1);
    }
    let _ = writeln!(out, "{pad}}}");
}

fn fmt_num(v: f64) -> String {
    // Avoid "-0" so that mirrored zero components hash identically
    if v == 0.0 {
        "0".to_string()
    } else {
        v.to_string()
    }
}

fn fmt_vec(v: &Vec3) -> String {
    format!("[{}, {}, {}]", fmt_num(v.x), fmt_num(v.y), fmt_num(v.z))
}

fn fmt_fn(fn_: u32) -> String {
    if fn_ == 0 {
        String::new()
    } else {
        format!(", $fn = {fn_}")
    }
}
