// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Inspection of rendered STL meshes

use crate::ast::Vec3;
use crate::error::Result;
use std::fs::File;
use std::path::Path;

/// Size and extent of an STL mesh
#[derive(Debug, Clone, PartialEq)]
pub struct StlSummary {
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub min: Vec3,
    pub max: Vec3,
}

impl StlSummary {
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Read an STL file (ASCII or binary) and summarize it
pub fn read_stl(path: impl AsRef<Path>) -> Result<StlSummary> {
    let mut file = File::open(path.as_ref())?;
    let stl = stl_io::read_stl(&mut file)?;

    let mut min = Vec3::repeat(f64::INFINITY);
    let mut max = Vec3::repeat(f64::NEG_INFINITY);
    for v in &stl.vertices {
        let p = Vec3::new(v[0] as f64, v[1] as f64, v[2] as f64);
        min = min.inf(&p);
        max = max.sup(&p);
    }
    if stl.vertices.is_empty() {
        min = Vec3::zeros();
        max = Vec3::zeros();
    }

    Ok(StlSummary {
        vertex_count: stl.vertices.len(),
        triangle_count: stl.faces.len(),
        min,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TRIANGLE: &str = "solid t
facet normal 0 0 1
  outer loop
    vertex 0 0 0
    vertex 10 0 0
    vertex 0 5 2
  endloop
endfacet
endsolid t
";

    #[test]
    fn test_read_ascii_stl() -> anyhow::Result<()> {
        let mut file = NamedTempFile::with_suffix(".stl")?;
        file.write_all(TRIANGLE.as_bytes())?;

        let summary = read_stl(file.path())?;
        assert_eq!(summary.triangle_count, 1);
        assert_eq!(summary.vertex_count, 3);
        assert_eq!(summary.size(), Vec3::new(10.0, 5.0, 2.0));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(read_stl("/nonexistent/part.stl").is_err());
    }
}
