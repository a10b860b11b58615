use crate::math::Point3;
use crate::store::{CornerArena, CornerId};

/// Corner slot of a [`Square`], clockwise from the upper left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    UpLeft,
    UpRight,
    DownRight,
    DownLeft,
}

impl Corner {
    pub const CW: [Corner; 4] = [Corner::UpLeft, Corner::UpRight, Corner::DownRight, Corner::DownLeft];

    fn slot(self) -> usize {
        match self {
            Corner::UpLeft => 0,
            Corner::UpRight => 1,
            Corner::DownRight => 2,
            Corner::DownLeft => 3,
        }
    }
}

/// Bevel cross-section: four corner handles into a [`CornerArena`].
///
/// Writing a corner writes every square bound to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Square {
    corners: [CornerId; 4],
}

impl Square {
    /// Allocate a square whose corners are given clockwise from upper left.
    pub fn alloc(arena: &mut CornerArena, points: [Point3; 4]) -> Self {
        Self {
            corners: points.map(|p| arena.alloc(p)),
        }
    }

    pub fn corner_id(&self, corner: Corner) -> CornerId {
        self.corners[corner.slot()]
    }

    pub fn get(&self, arena: &CornerArena, corner: Corner) -> Point3 {
        arena.get(self.corner_id(corner))
    }

    pub fn set(&self, arena: &mut CornerArena, corner: Corner, point: Point3) {
        arena.set(self.corner_id(corner), point);
    }

    pub fn up_left(&self, arena: &CornerArena) -> Point3 {
        self.get(arena, Corner::UpLeft)
    }

    pub fn up_right(&self, arena: &CornerArena) -> Point3 {
        self.get(arena, Corner::UpRight)
    }

    pub fn down_right(&self, arena: &CornerArena) -> Point3 {
        self.get(arena, Corner::DownRight)
    }

    pub fn down_left(&self, arena: &CornerArena) -> Point3 {
        self.get(arena, Corner::DownLeft)
    }

    /// Weld each corner to the same corner of `other`. This square's
    /// positions win.
    pub fn bind_to(&self, other: &Square, arena: &mut CornerArena) {
        for corner in Corner::CW {
            arena.bind(self.corner_id(corner), other.corner_id(corner));
        }
    }

    pub fn is_bound_to(&self, other: &Square, arena: &CornerArena) -> bool {
        Corner::CW
            .iter()
            .all(|&c| arena.is_bound(self.corner_id(c), other.corner_id(c)))
    }

    /// Corner positions clockwise from the upper left.
    pub fn points_cw(&self, arena: &CornerArena) -> [Point3; 4] {
        Corner::CW.map(|c| self.get(arena, c))
    }
}
