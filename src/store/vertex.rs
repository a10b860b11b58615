//! Index-assigning vertex store.
//!
//! Points live in one insertion-ordered vector; index `i` (1-based) is the
//! `i`-th added point. Lookups go through a swappable index strategy:
//!
//! - **Scan**: walk the vector front to back.
//! - **Hashed**: bucket points into ε-sized grid cells and probe the 27
//!   neighbouring cells.
//!
//! Both strategies use the same ε-equality and both return the lowest
//! matching index, so switching between them never changes a result.

use std::collections::HashMap;

use crate::error::MeshError;
use crate::math::{EqEps, Point3, EPSILON};

/// Lookup strategy of a [`VertexStore`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Backing {
    #[default]
    Scan,
    Hashed,
}

type Cell = (i64, i64, i64);

#[derive(Clone, Debug)]
enum Lookup {
    Scan,
    Hashed(HashMap<Cell, Vec<usize>>),
}

impl Lookup {
    fn build(backing: Backing, points: &[Point3]) -> Self {
        match backing {
            Backing::Scan => Lookup::Scan,
            Backing::Hashed => {
                let mut cells: HashMap<Cell, Vec<usize>> = HashMap::new();
                for (slot, p) in points.iter().enumerate() {
                    cells.entry(cell_of(p)).or_default().push(slot);
                }
                Lookup::Hashed(cells)
            }
        }
    }
}

fn cell_of(p: &Point3) -> Cell {
    (
        (p.x / EPSILON).floor() as i64,
        (p.y / EPSILON).floor() as i64,
        (p.z / EPSILON).floor() as i64,
    )
}

/// Deduplicating point-to-index cache with 1-based sequential indices.
#[derive(Clone, Debug)]
pub struct VertexStore {
    points: Vec<Point3>,
    lookup: Lookup,
}

impl Default for VertexStore {
    fn default() -> Self {
        Self::new(Backing::default())
    }
}

impl VertexStore {
    pub fn new(backing: Backing) -> Self {
        Self {
            points: Vec::new(),
            lookup: Lookup::build(backing, &[]),
        }
    }

    pub fn backing(&self) -> Backing {
        match self.lookup {
            Lookup::Scan => Backing::Scan,
            Lookup::Hashed(_) => Backing::Hashed,
        }
    }

    /// Swap the lookup strategy, replaying every stored point in order.
    pub fn set_backing(&mut self, backing: Backing) {
        if self.backing() != backing {
            self.lookup = Lookup::build(backing, &self.points);
        }
    }

    /// Append a point and return its index.
    ///
    /// Never merges: an ε-duplicate still gets a fresh index. Callers that
    /// want deduplication check [`contains`](Self::contains) first.
    pub fn add(&mut self, point: Point3) -> usize {
        let slot = self.points.len();
        self.points.push(point);
        if let Lookup::Hashed(cells) = &mut self.lookup {
            cells.entry(cell_of(&point)).or_default().push(slot);
        }
        slot + 1
    }

    /// Lowest index whose point is ε-equal to `point`.
    pub fn position(&self, point: &Point3) -> Option<usize> {
        let slot = match &self.lookup {
            Lookup::Scan => self.points.iter().position(|p| p.eq_eps(point)),
            Lookup::Hashed(cells) => {
                let (cx, cy, cz) = cell_of(point);
                let mut best: Option<usize> = None;
                for dx in -1..=1 {
                    for dy in -1..=1 {
                        for dz in -1..=1 {
                            let Some(slots) = cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                                continue;
                            };
                            // Slots within a cell are ascending, so the first hit is the lowest.
                            if let Some(&s) = slots.iter().find(|&&s| self.points[s].eq_eps(point)) {
                                best = Some(best.map_or(s, |b| b.min(s)));
                            }
                        }
                    }
                }
                best
            }
        };
        slot.map(|s| s + 1)
    }

    pub fn contains(&self, point: &Point3) -> bool {
        self.position(point).is_some()
    }

    pub fn index_of(&self, point: &Point3) -> Result<usize, MeshError> {
        self.position(point)
            .ok_or(MeshError::VertexNotFound { point: *point })
    }

    /// Points in ascending index order.
    pub fn vertices(&self) -> impl Iterator<Item = Point3> + '_ {
        self.points.iter().copied()
    }

    pub fn as_slice(&self) -> &[Point3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
