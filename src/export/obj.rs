//! Wavefront OBJ export.
//!
//! The text layout is fixed: an optional `# name` comment, every `v x y z`
//! line in index order, every `f i j k` line in triangle order, then one
//! blank line. Coordinates use the shortest representation that reads back
//! to the same `f32`.

use std::io::{self, Write};

use crate::math::Point3;

/// Vertices and 1-based triangle indices of one mesh view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjMesh {
    pub name: Option<String>,
    pub vertices: Vec<Point3>,
    pub faces: Vec<[usize; 3]>,
}

impl ObjMesh {
    /// Render to a string.
    pub fn to_obj_string(&self) -> String {
        let mut buf = Vec::new();
        match write_obj(self, &mut buf) {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            // `Vec<u8>` never reports a write error.
            Err(_) => String::new(),
        }
    }
}

/// Write an `ObjMesh` as Wavefront OBJ text to the given writer.
pub fn write_obj<W: Write>(mesh: &ObjMesh, writer: &mut W) -> io::Result<()> {
    if let Some(name) = &mesh.name {
        writeln!(writer, "# {name}")?;
    }

    for v in &mesh.vertices {
        // `+ 0.0` folds negative zero into zero.
        writeln!(writer, "v {} {} {}", v.x + 0.0, v.y + 0.0, v.z + 0.0)?;
    }

    for [i, j, k] in &mesh.faces {
        writeln!(writer, "f {i} {j} {k}")?;
    }

    writeln!(writer)
}
