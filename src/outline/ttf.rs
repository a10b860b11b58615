//! TrueType/OpenType outlines via `ttf-parser`, flattened with `lyon_path`.

use lyon_path::geom::{CubicBezierSegment, LineSegment, QuadraticBezierSegment};
use lyon_path::{math, Event, Path};
use ttf_parser::{Face, GlyphId, OutlineBuilder};

use crate::math::{EqEps, Point2};

use super::{GlyphSelector, Outline, OutlineError, OutlineSource, DEFAULT_SIZE};

/// Maximum distance between a curve and its flattened polyline, in output
/// units.
pub const DEFAULT_TOLERANCE: f32 = 0.1;

// --------------------
// Path building
// --------------------

struct PathSink<'a> {
    builder: &'a mut lyon_path::path::Builder,
    scale: f32,
    open: bool,
}

impl PathSink<'_> {
    fn point(&self, x: f32, y: f32) -> math::Point {
        math::point(x * self.scale, y * self.scale)
    }
}

impl OutlineBuilder for PathSink<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        if self.open {
            self.builder.end(false);
        }
        let at = self.point(x, y);
        self.builder.begin(at);
        self.open = true;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let to = self.point(x, y);
        self.builder.line_to(to);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (ctrl, to) = (self.point(x1, y1), self.point(x, y));
        self.builder.quadratic_bezier_to(ctrl, to);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (c1, c2, to) = (self.point(x1, y1), self.point(x2, y2), self.point(x, y));
        self.builder.cubic_bezier_to(c1, c2, to);
    }

    fn close(&mut self) {
        if self.open {
            self.builder.end(true);
            self.open = false;
        }
    }
}

/// Flatten every subpath of `path` into closed contours.
///
/// A final point that repeats the contour's first point is dropped, since
/// contours close implicitly.
fn flatten(path: &Path, tolerance: f32, name: &str) -> Outline {
    let mut outline = Outline::new(name);
    let mut contour: Vec<Point2> = Vec::new();
    fn push(contour: &mut Vec<Point2>, p: math::Point) {
        contour.push(Point2::new(p.x, p.y));
    }

    for event in path.iter() {
        match event {
            Event::Begin { at } => {
                contour.clear();
                push(&mut contour, at);
            }
            Event::Line { to, .. } => push(&mut contour, to),
            Event::Quadratic { from, ctrl, to } => {
                let seg = QuadraticBezierSegment { from, ctrl, to };
                seg.for_each_flattened(tolerance, &mut |ls: &LineSegment<f32>| {
                    push(&mut contour, ls.to)
                });
            }
            Event::Cubic { from, ctrl1, ctrl2, to } => {
                let seg = CubicBezierSegment { from, ctrl1, ctrl2, to };
                seg.for_each_flattened(tolerance, &mut |ls: &LineSegment<f32>| {
                    push(&mut contour, ls.to)
                });
            }
            Event::End { .. } => {
                if contour.len() > 1 && contour[contour.len() - 1].eq_eps(&contour[0]) {
                    contour.pop();
                }
                outline.push_contour(&contour);
                contour.clear();
            }
        }
    }
    outline
}

// --------------------
// Source
// --------------------

/// Outline source over a parsed font face.
pub struct TtfOutlineSource<'a> {
    face: Face<'a>,
    size: f32,
    tolerance: f32,
}

impl<'a> TtfOutlineSource<'a> {
    pub fn parse(data: &'a [u8]) -> Result<Self, OutlineError> {
        Ok(Self::from_face(Face::parse(data, 0)?))
    }

    pub fn from_face(face: Face<'a>) -> Self {
        Self {
            face,
            size: DEFAULT_SIZE,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Output units per em.
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    fn glyph_id(&self, selector: GlyphSelector) -> Result<GlyphId, OutlineError> {
        match selector {
            GlyphSelector::Char(c) => self
                .face
                .glyph_index(c)
                .ok_or(OutlineError::MissingGlyph(selector)),
            GlyphSelector::Index(i) if i < self.face.number_of_glyphs() => Ok(GlyphId(i)),
            GlyphSelector::Index(_) => Err(OutlineError::MissingGlyph(selector)),
        }
    }
}

impl OutlineSource for TtfOutlineSource<'_> {
    fn glyphs(&self) -> Vec<GlyphSelector> {
        (0..self.face.number_of_glyphs())
            .map(GlyphSelector::Index)
            .collect()
    }

    fn glyph_name(&self, selector: GlyphSelector) -> Result<String, OutlineError> {
        let id = self.glyph_id(selector)?;
        Ok(self
            .face
            .glyph_name(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("glyph{}", id.0)))
    }

    fn outline(&self, selector: GlyphSelector) -> Result<Outline, OutlineError> {
        let id = self.glyph_id(selector)?;
        let name = self.glyph_name(selector)?;
        let units = self.face.units_per_em() as f32;
        let scale = (self.size / units).max(1e-6);

        let mut builder = Path::builder();
        let mut sink = PathSink {
            builder: &mut builder,
            scale,
            open: false,
        };
        if self.face.outline_glyph(id, &mut sink).is_none() {
            log::warn!("{selector} ({name}) has no outline");
            return Ok(Outline::new(name));
        }
        if sink.open {
            sink.builder.end(false);
        }
        let path = builder.build();
        Ok(flatten(&path, self.tolerance, &name))
    }
}
