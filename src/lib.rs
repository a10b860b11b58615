//! # glyph-bevel
//!
//! Turns flattened 2D glyph outlines into extruded, beveled 3D solids.
//!
//! A glyph's contours are tessellated into a front face, extruded into a
//! side wall, and wrapped in a mitered bevel tube. The result is kept as
//! four views (front, side, outline, all), each with its own 1-based vertex
//! indices, and exported as Wavefront OBJ.
//!
//! ```no_run
//! use glyph_bevel::prelude::*;
//!
//! let outline = Outline::new("box").with_contour(&[
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(10.0, 10.0),
//!     Point2::new(0.0, 10.0),
//! ]);
//! let mut names = NameRegistry::new();
//! let glyph = RawGlyph::from_outline(&outline, &mut names)?;
//! let cache = VertexCache::build(&glyph, &EarcutTessellator, &BuildSettings::default())?;
//! print!("{}", cache.to_obj(View::All)?.to_obj_string());
//! # Ok::<(), glyph_bevel::error::MeshError>(())
//! ```

pub mod batch;
pub mod bevel;
pub mod error;
pub mod export;
pub mod glyph;
pub mod math;
pub mod outline;
pub mod store;
pub mod tessellate;
pub mod types;
pub mod vertex_cache;

/// Common imports.
pub mod prelude {
    pub use crate::batch::{face_tasks, render_glyph, run_batch, FaceTask, RenderedObj};
    pub use crate::error::MeshError;
    pub use crate::export::{write_obj, ObjMesh};
    pub use crate::glyph::{NameRegistry, RawGlyph};
    pub use crate::math::{EqEps, Point2, Point3, Vector2, Vector3, EPSILON};
    pub use crate::outline::{GlyphSelector, Outline, OutlineSource, TtfOutlineSource};
    pub use crate::store::{Backing, VertexStore};
    pub use crate::tessellate::{EarcutTessellator, Tessellation, Tessellator};
    pub use crate::types::{BuildSettings, PointPair, Triangle2, Triangle3, View};
    pub use crate::vertex_cache::VertexCache;
}
