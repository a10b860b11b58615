//! Arena-style storage for mesh points.
//!
//! `VertexStore` assigns stable 1-based indices to mesh vertices.
//! `CornerArena` holds bevel corner positions behind typed handles so
//! squares at a shared joint can be welded together.

pub mod corner;
pub mod vertex;

pub use corner::{CornerArena, CornerId};
pub use vertex::{Backing, VertexStore};
