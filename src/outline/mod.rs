//! Outline sources: where flattened glyph contours come from.
//!
//! The mesh pipeline only needs points and contour ends. A font reader is
//! one source ([`TtfOutlineSource`]); tests hand-build [`Outline`]s.

pub mod ttf;

use std::fmt;

use thiserror::Error;

use crate::math::Point2;

pub use ttf::TtfOutlineSource;

/// Size, in outline units per em, that fonts are sampled at.
pub const DEFAULT_SIZE: f32 = 72.0;

/// Which glyph to extract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlyphSelector {
    Char(char),
    Index(u16),
}

impl fmt::Display for GlyphSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphSelector::Char(c) => write!(f, "{c:?}"),
            GlyphSelector::Index(i) => write!(f, "glyph #{i}"),
        }
    }
}

/// A flattened glyph outline.
///
/// `contour_ends[k]` is the index of the last point of contour `k`. Every
/// contour closes implicitly back to its first point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outline {
    pub name: String,
    pub points: Vec<Point2>,
    pub contour_ends: Vec<usize>,
}

impl Outline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a closed contour.
    pub fn push_contour(&mut self, contour: &[Point2]) {
        if contour.is_empty() {
            return;
        }
        self.points.extend_from_slice(contour);
        self.contour_ends.push(self.points.len() - 1);
    }

    /// Builder form of [`push_contour`](Self::push_contour).
    pub fn with_contour(mut self, contour: &[Point2]) -> Self {
        self.push_contour(contour);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("font parse error: {0}")]
    Parse(#[from] ttf_parser::FaceParsingError),
    #[error("font has no glyph for {0}")]
    MissingGlyph(GlyphSelector),
}

/// Something that can produce glyph outlines.
pub trait OutlineSource {
    /// Every glyph this source can produce, in its natural order.
    fn glyphs(&self) -> Vec<GlyphSelector>;

    /// Display name of a glyph, used for `--list-names` and output files.
    fn glyph_name(&self, selector: GlyphSelector) -> Result<String, OutlineError>;

    /// Flattened outline of a glyph. A glyph with no contours (a space,
    /// say) yields an empty outline, not an error.
    fn outline(&self, selector: GlyphSelector) -> Result<Outline, OutlineError>;
}
