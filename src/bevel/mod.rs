//! Bevel geometry: squares, prismoids, and the arms that join them.
//!
//! An outline contour is folded into [`Arm`]s, one per joint. Each arm
//! owns a [`Prismoid`] along each of its edges, and each prismoid ends in
//! two [`Square`] cross-sections whose corners live in a shared
//! [`CornerArena`](crate::store::CornerArena). Squares from neighbouring
//! arms that meet at the same outline point are welded so that mitering
//! one joint moves the matching end of the next tube too.

pub mod arm;
pub mod prismoid;
pub mod square;

pub use arm::{fold_contour, Arm};
pub use prismoid::Prismoid;
pub use square::{Corner, Square};
