//! Mesh export.
//!
//! Only Wavefront OBJ is written: one `v` line per vertex and one `f` line
//! per triangle, with 1-based indices local to the exported view.

pub mod obj;

pub use obj::{write_obj, ObjMesh};
