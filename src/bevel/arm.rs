use crate::error::MeshError;
use crate::math::{is_xy_planar, rotate_cw, EqEps, Point3, Vector2, EPSILON};
use crate::types::PointPair;

use super::prismoid::Prismoid;

/// Two outline edges meeting at a joint vertex.
///
/// `upper` runs into the joint and `lower` runs out of it; each edge owns
/// one [`Prismoid`] of the arm's thickness.
#[derive(Clone, Debug)]
pub struct Arm {
    upper: PointPair,
    lower: PointPair,
    thickness: f32,
    upper_prismoid: Prismoid,
    lower_prismoid: Prismoid,
}

impl Arm {
    pub fn new(upper: PointPair, lower: PointPair, thickness: f32) -> Self {
        Self {
            upper,
            lower,
            thickness,
            upper_prismoid: Prismoid::new(upper, thickness),
            lower_prismoid: Prismoid::new(lower, thickness),
        }
    }

    pub fn upper(&self) -> PointPair {
        self.upper
    }

    pub fn lower(&self) -> PointPair {
        self.lower
    }

    pub fn joint(&self) -> Point3 {
        self.upper.p2
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn set_upper(&mut self, upper: PointPair) {
        self.upper = upper;
        self.upper_prismoid.set_centerline(upper);
    }

    pub fn set_lower(&mut self, lower: PointPair) {
        self.lower = lower;
        self.lower_prismoid.set_centerline(lower);
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.thickness = thickness;
        self.upper_prismoid.set_thickness(thickness);
        self.lower_prismoid.set_thickness(thickness);
    }

    pub fn upper_prismoid(&self) -> &Prismoid {
        &self.upper_prismoid
    }

    pub fn upper_prismoid_mut(&mut self) -> &mut Prismoid {
        &mut self.upper_prismoid
    }

    pub fn lower_prismoid(&self) -> &Prismoid {
        &self.lower_prismoid
    }

    pub fn lower_prismoid_mut(&mut self) -> &mut Prismoid {
        &mut self.lower_prismoid
    }

    /// Upper edge direction projected onto XY, Z ignored.
    pub fn upper_vec_xy(&self) -> Vector2 {
        segment_xy(&self.upper)
    }

    /// Lower edge direction projected onto XY, Z ignored.
    pub fn lower_vec_xy(&self) -> Vector2 {
        segment_xy(&self.lower)
    }

    /// Upper edge direction, failing if the edge leaves the z = 0 plane.
    pub fn checked_upper_vec_xy(&self) -> Result<Vector2, MeshError> {
        ensure_planar(&self.upper)?;
        Ok(self.upper_vec_xy())
    }

    /// Lower edge direction, failing if the edge leaves the z = 0 plane.
    pub fn checked_lower_vec_xy(&self) -> Result<Vector2, MeshError> {
        ensure_planar(&self.lower)?;
        Ok(self.lower_vec_xy())
    }

    /// Interior angle at the joint in radians, in `[0, π]`.
    ///
    /// A straight run is π; a square corner is π/2.
    pub fn angle(&self) -> Result<f32, MeshError> {
        let back = -self.checked_upper_vec_xy()?;
        let out = self.checked_lower_vec_xy()?;
        let (ax, ay) = (back.x as f64, back.y as f64);
        let (bx, by) = (out.x as f64, out.y as f64);
        let cross = ax * by - ay * bx;
        let dot = ax * bx + ay * by;
        Ok(cross.abs().atan2(dot) as f32)
    }

    pub fn angle_degrees(&self) -> Result<f32, MeshError> {
        Ok(self.angle()?.to_degrees())
    }

    /// True when the joint is sharper than `threshold_deg`. An angle within
    /// tolerance of the threshold counts as at the threshold.
    pub fn needs_side_outline(&self, threshold_deg: f32) -> Result<bool, MeshError> {
        let deg = self.angle_degrees()?;
        Ok(deg < threshold_deg && !deg.eq_eps(&threshold_deg))
    }

    /// Offset from the joint to the miter corner on the upper side of the
    /// bevel, for a bevel of half-thickness `half`.
    ///
    /// The opposite corner sits at the negated offset.
    pub fn miter_offset(&self, half: f32) -> Result<Vector2, MeshError> {
        let upper_unit = self.checked_upper_vec_xy()?.normalize();
        let lower_unit = self.checked_lower_vec_xy()?.normalize();
        let normal_unit = rotate_cw(upper_unit);

        let tangent = upper_unit + lower_unit;
        // A full reversal has no bisector; cut square to the upper edge.
        let miter_unit = if tangent.norm() < EPSILON {
            normal_unit
        } else {
            rotate_cw(tangent.normalize()).normalize()
        };
        let miter_dist = half / miter_unit.dot(&normal_unit);
        Ok(miter_unit * miter_dist)
    }
}

fn segment_xy(segment: &PointPair) -> Vector2 {
    Vector2::new(segment.p2.x - segment.p1.x, segment.p2.y - segment.p1.y)
}

fn ensure_planar(segment: &PointPair) -> Result<(), MeshError> {
    for p in [segment.p1, segment.p2] {
        if !is_xy_planar(&p) {
            return Err(MeshError::NonPlanarInput { point: p });
        }
    }
    Ok(())
}

/// Build one arm per joint of a closed contour.
///
/// Walks the contour cyclically and never beyond it. A vertex coincident
/// with its predecessor yields no arm, and neighbours are searched past
/// coincident points so no edge has zero length. A contour with fewer than
/// two distinct points yields nothing.
pub fn fold_contour(points: &[Point3], thickness: f32) -> Vec<Arm> {
    let n = points.len();
    let mut arms = Vec::with_capacity(n);
    for (i, joint) in points.iter().enumerate() {
        if points[(i + n - 1) % n].eq_eps(joint) {
            continue;
        }
        let prev = (1..n).map(|k| points[(i + n - k) % n]).find(|p| !p.eq_eps(joint));
        let next = (1..n).map(|k| points[(i + k) % n]).find(|p| !p.eq_eps(joint));
        if let (Some(prev), Some(next)) = (prev, next) {
            arms.push(Arm::new(
                PointPair::new(prev, *joint),
                PointPair::new(*joint, next),
                thickness,
            ));
        }
    }
    arms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    #[test]
    fn fold_skips_repeated_points() {
        let pts = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 0.0)];
        let arms = fold_contour(&pts, 2.0);
        // Index 2 repeats index 1 and index 0 repeats index 4.
        assert_eq!(arms.len(), 3);
        for arm in &arms {
            assert!(!arm.upper().p1.eq_eps(&arm.upper().p2));
            assert!(!arm.lower().p1.eq_eps(&arm.lower().p2));
        }
    }

    #[test]
    fn fold_of_single_point_is_empty() {
        assert!(fold_contour(&[p(1.0, 1.0)], 2.0).is_empty());
        assert!(fold_contour(&[p(1.0, 1.0), p(1.0, 1.0)], 2.0).is_empty());
    }
}
