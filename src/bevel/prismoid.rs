//! Rectangular tube swept along a centerline segment.

use crate::math::{is_xy_planar, rotate_ccw, rotate_cw, to_xy, with_z, Point3, Vector2, Vector3};
use crate::store::CornerArena;
use crate::types::{PointPair, Triangle3};

use super::square::Square;

#[derive(Clone, Copy)]
enum Anchor {
    Start,
    End,
}

/// A tube of square cross-section between `centerline.p1` and
/// `centerline.p2`.
///
/// `square1` sits at the start and `square2` at the end. Both are derived
/// on first access and dropped whenever the centerline or thickness
/// changes, so the next access allocates fresh, unbound corners.
#[derive(Clone, Debug)]
pub struct Prismoid {
    centerline: PointPair,
    thickness: f32,
    squares: Option<[Square; 2]>,
}

impl Prismoid {
    pub fn new(centerline: PointPair, thickness: f32) -> Self {
        Self {
            centerline,
            thickness,
            squares: None,
        }
    }

    pub fn centerline(&self) -> PointPair {
        self.centerline
    }

    pub fn set_centerline(&mut self, centerline: PointPair) {
        self.centerline = centerline;
        self.reset();
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.thickness = thickness;
        self.reset();
    }

    pub fn half_thickness(&self) -> f32 {
        self.thickness / 2.0
    }

    pub fn set_half_thickness(&mut self, half: f32) {
        self.set_thickness(half * 2.0);
    }

    /// Drop derived squares; they are rebuilt on next access.
    pub fn reset(&mut self) {
        self.squares = None;
    }

    pub fn is_derived(&self) -> bool {
        self.squares.is_some()
    }

    /// End squares if they have been derived, without deriving them.
    pub fn derived_squares(&self) -> Option<[Square; 2]> {
        self.squares
    }

    /// Both end squares, deriving them if needed.
    pub fn squares(&mut self, arena: &mut CornerArena) -> [Square; 2] {
        if let Some(squares) = self.squares {
            return squares;
        }
        let squares = [
            Square::alloc(arena, self.cross_section(Anchor::Start)),
            Square::alloc(arena, self.cross_section(Anchor::End)),
        ];
        self.squares = Some(squares);
        squares
    }

    pub fn square1(&mut self, arena: &mut CornerArena) -> Square {
        self.squares(arena)[0]
    }

    pub fn square2(&mut self, arena: &mut CornerArena) -> Square {
        self.squares(arena)[1]
    }

    /// All eight corners: square1 clockwise, then square2 clockwise.
    pub fn points_cw(&mut self, arena: &mut CornerArena) -> [Point3; 8] {
        let [s1, s2] = self.squares(arena);
        let (a, b) = (s1.points_cw(arena), s2.points_cw(arena));
        [a[0], a[1], a[2], a[3], b[0], b[1], b[2], b[3]]
    }

    /// The eight triangles of the four quads joining square1 to square2.
    pub fn side_triangles(&mut self, arena: &mut CornerArena) -> [Triangle3; 8] {
        let [s1, s2] = self.squares(arena);
        let [ul1, ur1, dr1, dl1] = s1.points_cw(arena);
        let [ul2, ur2, dr2, dl2] = s2.points_cw(arena);
        [
            // top
            Triangle3::new(ul1, ur1, ur2),
            Triangle3::new(ul1, ur2, ul2),
            // right
            Triangle3::new(ur1, dr2, ur2),
            Triangle3::new(ur1, dr1, dr2),
            // bottom
            Triangle3::new(dl1, dl2, dr2),
            Triangle3::new(dl1, dr2, dr1),
            // left
            Triangle3::new(ul1, ul2, dl2),
            Triangle3::new(ul1, dl2, dl1),
        ]
    }

    fn anchor(&self, anchor: Anchor) -> Point3 {
        match anchor {
            Anchor::Start => self.centerline.p1,
            Anchor::End => self.centerline.p2,
        }
    }

    fn cross_section(&self, anchor: Anchor) -> [Point3; 4] {
        let planar = is_xy_planar(&self.centerline.p1) && is_xy_planar(&self.centerline.p2);
        let dir = to_xy(&self.centerline.p2) - to_xy(&self.centerline.p1);
        if planar && dir.norm() > 0.0 {
            self.planar_section(anchor, dir)
        } else {
            self.axial_section(anchor)
        }
    }

    // Centerline in the XY plane: the section stands upright across it.
    fn planar_section(&self, anchor: Anchor, dir: Vector2) -> [Point3; 4] {
        let h = self.half_thickness();
        let at = to_xy(&self.anchor(anchor));
        let up = at + rotate_cw(dir).normalize() * h;
        let down = at + rotate_ccw(dir).normalize() * h;
        [with_z(&up, h), with_z(&up, -h), with_z(&down, -h), with_z(&down, h)]
    }

    // Centerline leaves the XY plane: the section is an XY-aligned square.
    fn axial_section(&self, anchor: Anchor) -> [Point3; 4] {
        let h = self.half_thickness();
        let at = self.anchor(anchor);
        [
            at + Vector3::new(-h, h, 0.0),
            at + Vector3::new(h, h, 0.0),
            at + Vector3::new(h, -h, 0.0),
            at + Vector3::new(-h, -h, 0.0),
        ]
    }
}
