//! MeshError: failures of the glyph mesh pipeline.
//!
//! Every variant signals an invariant violation on already-validated
//! in-memory data, so none of them are retried. A failure aborts the
//! current glyph only.

use thiserror::Error;

use crate::math::Point3;

/// Unified error type for mesh construction and lookup.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A point was looked up in a view whose store does not hold it.
    #[error("vertex {point} not found")]
    VertexNotFound { point: Point3 },
    /// A 2D-only computation received a point off the z = 0 plane.
    #[error("point {point} leaks out of the XY plane")]
    NonPlanarInput { point: Point3 },
    /// Point list and contour ends disagree.
    #[error("malformed outline: {0}")]
    MalformedOutline(String),
    /// The tessellator failed or returned indices outside its point list.
    #[error("tessellation failed: {0}")]
    Tessellation(String),
}
