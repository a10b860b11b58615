//! Linear algebra type aliases and the coordinate tolerance.
//!
//! Glyph outlines arrive as `f32` from the font layer, so the whole mesh
//! pipeline works in single precision.

pub type Point2 = nalgebra::Point2<f32>;
pub type Point3 = nalgebra::Point3<f32>;
pub type Vector2 = nalgebra::Vector2<f32>;
pub type Vector3 = nalgebra::Vector3<f32>;

/// Coordinate tolerance: two values closer than this are the same vertex.
pub const EPSILON: f32 = 0.001;

/// Approximate equality within [`EPSILON`], componentwise and strict.
///
/// Not an equivalence relation: `a ≈ b` and `b ≈ c` do not imply `a ≈ c`.
pub trait EqEps {
    fn eq_eps(&self, other: &Self) -> bool;
}

impl EqEps for f32 {
    fn eq_eps(&self, other: &Self) -> bool {
        *self > *other - EPSILON && *self < *other + EPSILON
    }
}

impl EqEps for Point2 {
    fn eq_eps(&self, other: &Self) -> bool {
        self.x.eq_eps(&other.x) && self.y.eq_eps(&other.y)
    }
}

impl EqEps for Point3 {
    fn eq_eps(&self, other: &Self) -> bool {
        self.x.eq_eps(&other.x) && self.y.eq_eps(&other.y) && self.z.eq_eps(&other.z)
    }
}

/// Rotate a 2D vector by 90° clockwise.
pub fn rotate_cw(v: Vector2) -> Vector2 {
    Vector2::new(v.y, -v.x)
}

/// Rotate a 2D vector by 90° counter-clockwise.
pub fn rotate_ccw(v: Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// Drop the Z coordinate.
pub fn to_xy(p: &Point3) -> Point2 {
    Point2::new(p.x, p.y)
}

/// Lift a 2D point into 3D at height `z`.
pub fn with_z(p: &Point2, z: f32) -> Point3 {
    Point3::new(p.x, p.y, z)
}

/// True when the point lies (within tolerance) in the z = 0 plane.
pub fn is_xy_planar(p: &Point3) -> bool {
    p.z.eq_eps(&0.0)
}
