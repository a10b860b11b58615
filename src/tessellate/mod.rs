//! Front-face tessellation of glyph outlines.
//!
//! The mesh pipeline talks to a [`Tessellator`]: points and contour ends
//! in, a point list and flat triangle indices out. The returned point list
//! starts with the input points and may append extra (Steiner) points.
//!
//! [`EarcutTessellator`] is the default. It sorts contours into outer
//! rings and holes, then ear-clips each ring with its holes via `earcutr`.

use std::ops::Range;

use crate::error::MeshError;
use crate::math::Point2;
use crate::types::Triangle2;

/// Output of a [`Tessellator`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tessellation {
    /// Input points first, then any points the tessellator added.
    pub points: Vec<Point2>,
    /// Flat triangle list, three indices per triangle, 0-based into `points`.
    pub indices: Vec<usize>,
}

impl Tessellation {
    /// Points beyond the first `input_len`.
    pub fn steiner_points(&self, input_len: usize) -> &[Point2] {
        self.points.get(input_len..).unwrap_or(&[])
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Resolve index triples to triangles, rejecting out-of-range indices
    /// and a trailing partial triple.
    pub fn triangles(&self) -> Result<Vec<Triangle2>, MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::Tessellation(format!(
                "{} indices is not a whole number of triangles",
                self.indices.len()
            )));
        }
        let point = |i: usize| {
            self.points.get(i).copied().ok_or_else(|| {
                MeshError::Tessellation(format!("index {i} beyond {} points", self.points.len()))
            })
        };
        self.indices
            .chunks_exact(3)
            .map(|t| Ok(Triangle2::new(point(t[0])?, point(t[1])?, point(t[2])?)))
            .collect()
    }
}

/// Triangulates the interior of a set of closed contours.
pub trait Tessellator {
    /// `contour_ends[k]` is the index of the last point of contour `k`.
    fn tessellate(&self, points: &[Point2], contour_ends: &[usize]) -> Result<Tessellation, MeshError>;
}

/// Ear-clipping tessellator over `earcutr`.
///
/// Contours wound the same way as the largest one are outer rings; the
/// rest are holes, each assigned to the smallest outer ring containing it.
/// A hole inside no ring is filled as a ring of its own. Adds no points.
#[derive(Clone, Copy, Debug, Default)]
pub struct EarcutTessellator;

struct Ring {
    range: Range<usize>,
    area: f64,
}

impl Tessellator for EarcutTessellator {
    fn tessellate(&self, points: &[Point2], contour_ends: &[usize]) -> Result<Tessellation, MeshError> {
        let rings: Vec<Ring> = contour_ranges(points.len(), contour_ends)?
            .into_iter()
            .filter_map(|range| {
                let area = signed_area(&points[range.clone()]);
                if range.len() < 3 || area == 0.0 {
                    log::warn!("skipping degenerate contour {range:?}");
                    return None;
                }
                Some(Ring { range, area })
            })
            .collect();

        let mut indices = Vec::new();
        for (outer, holes) in group_rings(points, &rings) {
            indices.extend(earcut_group(points, &rings[outer], holes.iter().map(|&h| &rings[h]))?);
        }
        Ok(Tessellation {
            points: points.to_vec(),
            indices,
        })
    }
}

/// Split `0..len` at the given inclusive contour ends.
pub fn contour_ranges(len: usize, contour_ends: &[usize]) -> Result<Vec<Range<usize>>, MeshError> {
    let mut start = 0;
    let mut ranges = Vec::with_capacity(contour_ends.len());
    for &end in contour_ends {
        if end < start || end >= len {
            return Err(MeshError::MalformedOutline(format!(
                "contour end {end} out of order or beyond {len} points"
            )));
        }
        ranges.push(start..end + 1);
        start = end + 1;
    }
    Ok(ranges)
}

// ─── Ring grouping ──────────────────────────────────────────────────────────

fn group_rings(points: &[Point2], rings: &[Ring]) -> Vec<(usize, Vec<usize>)> {
    let Some(largest) = rings
        .iter()
        .max_by(|a, b| a.area.abs().total_cmp(&b.area.abs()))
    else {
        return Vec::new();
    };
    let outer_positive = largest.area > 0.0;
    let is_outer = |r: &Ring| (r.area > 0.0) == outer_positive;

    let mut groups: Vec<(usize, Vec<usize>)> = rings
        .iter()
        .enumerate()
        .filter(|(_, r)| is_outer(*r))
        .map(|(i, _)| (i, Vec::new()))
        .collect();

    for (h, hole) in rings.iter().enumerate().filter(|(_, r)| !is_outer(*r)) {
        let probe = points[hole.range.start];
        let host = groups
            .iter()
            .enumerate()
            .filter(|(_, (o, _))| point_in_polygon(probe, &points[rings[*o].range.clone()]))
            .min_by(|(_, (a, _)), (_, (b, _))| rings[*a].area.abs().total_cmp(&rings[*b].area.abs()))
            .map(|(g, _)| g);
        match host {
            Some(g) => groups[g].1.push(h),
            None => groups.push((h, Vec::new())),
        }
    }
    groups
}

fn earcut_group<'r>(
    points: &[Point2],
    outer: &Ring,
    holes: impl Iterator<Item = &'r Ring>,
) -> Result<Vec<usize>, MeshError> {
    let mut flat: Vec<f64> = Vec::new();
    let mut hole_indices = Vec::new();
    let mut global: Vec<usize> = Vec::new();

    for range in std::iter::once(outer.range.clone()).chain(holes.map(|h| h.range.clone())) {
        if !global.is_empty() {
            hole_indices.push(global.len());
        }
        for i in range {
            flat.push(points[i].x as f64);
            flat.push(points[i].y as f64);
            global.push(i);
        }
    }

    let local = earcutr::earcut(&flat, &hole_indices, 2)
        .map_err(|e| MeshError::Tessellation(format!("earcut failed: {e:?}")))?;
    Ok(local.into_iter().map(|i| global[i]).collect())
}

// ─── Polygon predicates ─────────────────────────────────────────────────────

/// Shoelace area; positive for counter-clockwise rings.
fn signed_area(polygon: &[Point2]) -> f64 {
    let n = polygon.len();
    let mut area = 0.0;
    for i in 0..n {
        let (a, b) = (polygon[i], polygon[(i + 1) % n]);
        area += a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64;
    }
    area * 0.5
}

/// Even-odd ray cast.
fn point_in_polygon(p: Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
