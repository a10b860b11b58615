//! Flattened glyph outlines and the output-name registry.

use std::collections::HashSet;
use std::ops::Range;

use once_cell::sync::OnceCell;

use crate::error::MeshError;
use crate::math::Point2;
use crate::outline::Outline;

/// Case-insensitive set of output names handed out during one run.
///
/// Registering a name that is already taken appends `_` until it is free,
/// so two glyphs named `a` and `A` end up in `a.obj` and `A_.obj`. Path
/// separators and control characters become `_`, so a registered name is
/// always a bare file stem.
#[derive(Clone, Debug, Default)]
pub struct NameRegistry {
    taken: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a unique filename derived from `name`.
    pub fn register(&mut self, name: &str) -> String {
        let mut filename = file_stem(name);
        while self.taken.contains(&filename.to_lowercase()) {
            filename.push('_');
        }
        self.taken.insert(filename.to_lowercase());
        filename
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}

fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    match stem.as_str() {
        "" | "." | ".." => format!("{stem}_"),
        _ => stem,
    }
}

/// One glyph's flattened outline, as delivered by an outline source.
///
/// Coordinates are stored flat (`x0, y0, x1, y1, ...`). Contour ends are
/// flat offsets into that array; each one names a coordinate of the last
/// point of its contour. Contours close implicitly.
#[derive(Debug)]
pub struct RawGlyph {
    name: String,
    filename: String,
    coords: Vec<f32>,
    contour_ends: Vec<usize>,
    vertices: OnceCell<Vec<Point2>>,
    vertex_contour_ends: OnceCell<Vec<usize>>,
    contour_end_points: OnceCell<Vec<Point2>>,
}

impl RawGlyph {
    /// Build a glyph from flat coordinates, claiming its filename in
    /// `registry`.
    pub fn new(
        name: &str,
        coords: Vec<f32>,
        contour_ends: Vec<usize>,
        registry: &mut NameRegistry,
    ) -> Result<Self, MeshError> {
        validate(&coords, &contour_ends)?;
        Ok(Self {
            name: name.to_string(),
            filename: registry.register(name),
            coords,
            contour_ends,
            vertices: OnceCell::new(),
            vertex_contour_ends: OnceCell::new(),
            contour_end_points: OnceCell::new(),
        })
    }

    /// Build a glyph from an outline whose contour ends are point indices.
    pub fn from_outline(outline: &Outline, registry: &mut NameRegistry) -> Result<Self, MeshError> {
        let coords = outline.points.iter().flat_map(|p| [p.x, p.y]).collect();
        let ends = outline.contour_ends.iter().map(|&e| e * 2 + 1).collect();
        Self::new(&outline.name, coords, ends, registry)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unique, registry-adjusted output name.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn coords(&self) -> &[f32] {
        &self.coords
    }

    /// Outline points, computed on first call.
    pub fn vertices(&self) -> &[Point2] {
        self.vertices.get_or_init(|| {
            self.coords
                .chunks_exact(2)
                .map(|c| Point2::new(c[0], c[1]))
                .collect()
        })
    }

    /// Index of the last point of each contour, computed on first call.
    pub fn contour_ends(&self) -> &[usize] {
        self.vertex_contour_ends
            .get_or_init(|| self.contour_ends.iter().map(|&e| e / 2).collect())
    }

    /// The last point of each contour, computed on first call.
    pub fn contour_end_points(&self) -> &[Point2] {
        self.contour_end_points.get_or_init(|| {
            let vertices = self.vertices();
            self.contour_ends().iter().map(|&e| vertices[e]).collect()
        })
    }

    /// Point-index range of each contour.
    pub fn contours(&self) -> Vec<Range<usize>> {
        let mut start = 0;
        self.contour_ends()
            .iter()
            .map(|&end| {
                let range = start..end + 1;
                start = end + 1;
                range
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

fn validate(coords: &[f32], contour_ends: &[usize]) -> Result<(), MeshError> {
    if coords.len() % 2 != 0 {
        return Err(MeshError::MalformedOutline(format!(
            "odd coordinate count {}",
            coords.len()
        )));
    }
    let point_count = coords.len() / 2;
    let mut next_start = 0;
    for &end in contour_ends {
        if end % 2 == 0 {
            return Err(MeshError::MalformedOutline(format!(
                "contour end {end} is an x offset, not the last y of a point"
            )));
        }
        let last = end / 2;
        if last < next_start || last >= point_count {
            return Err(MeshError::MalformedOutline(format!(
                "contour end {end} out of order or beyond {point_count} points"
            )));
        }
        next_start = last + 1;
    }
    if next_start != point_count {
        return Err(MeshError::MalformedOutline(format!(
            "contours cover {next_start} of {point_count} points"
        )));
    }
    Ok(())
}
