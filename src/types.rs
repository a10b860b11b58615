use std::fmt;

use crate::math::{with_z, EqEps, Point2, Point3};
use crate::store::Backing;

/// An ordered pair of 3D points: a segment, or a front/extruded pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointPair {
    pub p1: Point3,
    pub p2: Point3,
}

impl PointPair {
    pub fn new(p1: Point3, p2: Point3) -> Self {
        Self { p1, p2 }
    }

    /// Both endpoints equal within tolerance.
    pub fn eq_eps(&self, other: &Self) -> bool {
        self.p1.eq_eps(&other.p1) && self.p2.eq_eps(&other.p2)
    }
}

impl fmt::Display for PointPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.p1, self.p2)
    }
}

/// A triangle in the XY plane, as produced by a tessellator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle2 {
    pub p1: Point2,
    pub p2: Point2,
    pub p3: Point2,
}

impl Triangle2 {
    pub fn new(p1: Point2, p2: Point2, p3: Point2) -> Self {
        Self { p1, p2, p3 }
    }

    /// Twice the signed area; positive when counter-clockwise.
    pub fn signed_area(&self) -> f32 {
        let (a, b, c) = (self.p1, self.p2, self.p3);
        (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x)
    }

    /// Place the triangle at height `z`.
    pub fn lift(&self, z: f32) -> Triangle3 {
        Triangle3::new(with_z(&self.p1, z), with_z(&self.p2, z), with_z(&self.p3, z))
    }
}

/// Three ordered points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle3 {
    pub p1: Point3,
    pub p2: Point3,
    pub p3: Point3,
}

impl Triangle3 {
    pub fn new(p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self { p1, p2, p3 }
    }

    /// Z component of `(p2 - p1) × (p3 - p2)` on the XY projection.
    /// Positive means the triangle faces the viewer (+Z).
    pub fn signed_area_xy(&self) -> f32 {
        let (a, b, c) = (self.p1, self.p2, self.p3);
        (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x)
    }

    /// This triangle if front-facing, otherwise its reversal.
    pub fn front(self) -> Self {
        if self.signed_area_xy() > 0.0 {
            self
        } else {
            self.reversed()
        }
    }

    /// This triangle if back-facing (or degenerate), otherwise its reversal.
    pub fn back(self) -> Self {
        if self.signed_area_xy() <= 0.0 {
            self
        } else {
            self.reversed()
        }
    }

    pub fn reversed(self) -> Self {
        Self::new(self.p3, self.p2, self.p1)
    }

    pub fn points(&self) -> [Point3; 3] {
        [self.p1, self.p2, self.p3]
    }
}

/// One of the four mesh partitions a glyph build maintains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    Front,
    Side,
    Outline,
    All,
}

impl View {
    pub const EVERY: [View; 4] = [View::Front, View::Side, View::Outline, View::All];

    pub(crate) fn slot(self) -> usize {
        match self {
            View::Front => 0,
            View::Side => 1,
            View::Outline => 2,
            View::All => 3,
        }
    }

    /// Filename suffix used when several views are written side by side.
    pub fn file_suffix(self) -> &'static str {
        match self {
            View::Front => "FrontOnly",
            View::Side => "SideOnly",
            View::Outline => "OutlineOnly",
            View::All => "",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Front => "front",
            View::Side => "side",
            View::Outline => "outline",
            View::All => "all",
        };
        f.write_str(name)
    }
}

/// Parameters of one glyph build.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildSettings {
    /// Extrusion distance toward -Z. Zero disables the side wall and
    /// side-outline bevels.
    pub depth: f32,
    /// Full stroke thickness of the outline bevel.
    pub thickness: f32,
    /// Joints whose interior angle (degrees) is below this get a
    /// side-outline prismoid.
    pub angle_threshold: f32,
    pub x_offset: f32,
    pub y_offset: f32,
    /// Uniform scale applied after the offset, at query time.
    pub scale: f32,
    pub backing: Backing,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            depth: 15.0,
            thickness: 2.5,
            angle_threshold: 135.0,
            x_offset: 0.0,
            y_offset: 0.0,
            scale: 1.0,
            backing: Backing::Scan,
        }
    }
}

impl BuildSettings {
    pub fn half_thickness(&self) -> f32 {
        self.thickness / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn front_keeps_ccw_triangle() {
        let t = Triangle3::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert!(t.signed_area_xy() > 0.0);
        assert_eq!(t.front(), t);
    }

    #[test]
    fn front_reverses_cw_triangle() {
        let t = Triangle3::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        );
        let f = t.front();
        assert_eq!(f, Triangle3::new(t.p3, t.p2, t.p1));
        assert!(f.signed_area_xy() > 0.0);
        assert_eq!(f.back(), t);
    }

    #[test]
    fn pair_equality_is_tolerant() {
        let a = PointPair::new(Point3::new(1.0, 1.0, 0.0), Point3::new(1.0, 1.0, -15.0));
        let b = PointPair::new(Point3::new(1.0005, 1.0, 0.0), Point3::new(1.0, 0.9995, -15.0));
        assert!(a.eq_eps(&b));
    }
}
