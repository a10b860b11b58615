//! Arena of weldable corner positions.
//!
//! Bevel squares do not own their corner points. They hold `CornerId`
//! handles into a `CornerArena`, and binding two corners merges their
//! union-find groups so the whole group reads and writes one position.
//! Merging is transitive regardless of bind order.

use crate::math::Point3;

/// Typed handle to a corner in a [`CornerArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CornerId(pub usize);

/// Union-find storage for corner positions.
#[derive(Clone, Debug, Default)]
pub struct CornerArena {
    positions: Vec<Point3>,
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl CornerArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, position: Point3) -> CornerId {
        let id = CornerId(self.positions.len());
        self.positions.push(position);
        self.parent.push(id.0);
        self.size.push(1);
        id
    }

    fn root(&self, id: CornerId) -> usize {
        let mut r = id.0;
        while self.parent[r] != r {
            r = self.parent[r];
        }
        r
    }

    // Path halving: every other node on the way up skips to its grandparent.
    fn root_mut(&mut self, id: CornerId) -> usize {
        let mut r = id.0;
        while self.parent[r] != r {
            self.parent[r] = self.parent[self.parent[r]];
            r = self.parent[r];
        }
        r
    }

    #[cfg(test)]
    fn depth(&self, id: CornerId) -> usize {
        let (mut r, mut depth) = (id.0, 0);
        while self.parent[r] != r {
            r = self.parent[r];
            depth += 1;
        }
        depth
    }

    pub fn get(&self, id: CornerId) -> Point3 {
        self.positions[self.root(id)]
    }

    /// Write the position shared by `id`'s whole group.
    pub fn set(&mut self, id: CornerId, position: Point3) {
        let r = self.root_mut(id);
        self.positions[r] = position;
    }

    /// Weld `b`'s group into `a`'s. The merged group keeps `a`'s position.
    pub fn bind(&mut self, a: CornerId, b: CornerId) {
        let (ra, rb) = (self.root_mut(a), self.root_mut(b));
        if ra == rb {
            return;
        }
        let kept = self.positions[ra];
        let (big, small) = if self.size[ra] >= self.size[rb] { (ra, rb) } else { (rb, ra) };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        self.positions[big] = kept;
    }

    pub fn is_bound(&self, a: CornerId, b: CornerId) -> bool {
        self.root(a) == self.root(b)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
