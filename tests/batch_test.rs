//! Tests for the batch driver: naming, per-glyph failure isolation, and
//! output failures.

use std::io;

use glyph_bevel::batch::{face_tasks, render_glyph, run_batch, GlyphError};
use glyph_bevel::error::MeshError;
use glyph_bevel::glyph::{NameRegistry, RawGlyph};
use glyph_bevel::math::Point2;
use glyph_bevel::outline::{GlyphSelector, Outline, OutlineError, OutlineSource};
use glyph_bevel::tessellate::EarcutTessellator;
use glyph_bevel::types::{BuildSettings, View};

/// Serves a triangle for every letter except `x`, whose contour ends
/// point past its points.
struct Letters;

fn triangle(name: &str) -> Outline {
    Outline::new(name).with_contour(&[
        Point2::new(0.0, 0.0),
        Point2::new(8.0, 0.0),
        Point2::new(4.0, 6.0),
    ])
}

impl OutlineSource for Letters {
    fn glyphs(&self) -> Vec<GlyphSelector> {
        ['a', 'A', 'x', 'b'].into_iter().map(GlyphSelector::Char).collect()
    }

    fn glyph_name(&self, selector: GlyphSelector) -> Result<String, OutlineError> {
        match selector {
            GlyphSelector::Char(c) if c.is_ascii_alphabetic() => Ok(c.to_string()),
            other => Err(OutlineError::MissingGlyph(other)),
        }
    }

    fn outline(&self, selector: GlyphSelector) -> Result<Outline, OutlineError> {
        let name = self.glyph_name(selector)?;
        let mut outline = triangle(&name);
        if name == "x" {
            outline.contour_ends = vec![9];
        }
        Ok(outline)
    }
}

fn collect(views: &[View]) -> (Vec<String>, glyph_bevel::batch::BatchSummary) {
    let mut names = Vec::new();
    let summary = run_batch(
        &Letters,
        &Letters.glyphs(),
        &EarcutTessellator,
        &BuildSettings::default(),
        &face_tasks(views),
        &mut NameRegistry::new(),
        |file| {
            names.push(file.file_name());
            Ok(())
        },
    )
    .unwrap();
    (names, summary)
}

#[test]
fn case_collisions_get_underscores() {
    let (names, _) = collect(&[]);
    assert_eq!(names, vec!["a.obj", "A_.obj", "b.obj"]);
}

#[test]
fn bad_glyph_is_skipped_and_siblings_still_build() {
    let (names, summary) = collect(&[View::Front, View::Outline]);
    assert_eq!(summary.built, 3);
    assert_eq!(summary.failed.len(), 1);
    let (selector, err) = &summary.failed[0];
    assert_eq!(*selector, GlyphSelector::Char('x'));
    assert!(matches!(err, GlyphError::Mesh(MeshError::MalformedOutline(_))));
    // Nothing at all is written for the failed glyph.
    assert!(names.iter().all(|n| !n.starts_with('x')));
    assert_eq!(names.len(), 6);
}

#[test]
fn output_failure_stops_the_batch() {
    let mut calls = 0;
    let result = run_batch(
        &Letters,
        &Letters.glyphs(),
        &EarcutTessellator,
        &BuildSettings::default(),
        &face_tasks(&[]),
        &mut NameRegistry::new(),
        |_| {
            calls += 1;
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        },
    );
    assert!(result.is_err());
    assert_eq!(calls, 1);
}

#[test]
fn render_glyph_names_files_after_registry() {
    let mut registry = NameRegistry::new();
    registry.register("t");
    let glyph = RawGlyph::from_outline(&triangle("t"), &mut registry).unwrap();
    let files = render_glyph(
        &glyph,
        &EarcutTessellator,
        &BuildSettings::default(),
        &face_tasks(&[View::Side, View::Front]),
    )
    .unwrap();
    let stems: Vec<&str> = files.iter().map(|f| f.file_stem.as_str()).collect();
    assert_eq!(stems, vec!["t_SideOnly", "t_FrontOnly"]);
    assert!(files[0].contents.starts_with("# t\n"));
}

#[test]
fn separator_in_glyph_name_stays_inside_out_dir() {
    let mut registry = NameRegistry::new();
    let glyph = RawGlyph::from_outline(&triangle("/"), &mut registry).unwrap();
    let files = render_glyph(
        &glyph,
        &EarcutTessellator,
        &BuildSettings::default(),
        &face_tasks(&[]),
    )
    .unwrap();
    assert_eq!(files[0].file_name(), "_.obj");
    assert!(files[0].contents.starts_with("# /\n"));

    let out = std::path::Path::new("out");
    let target = out.join(files[0].file_name());
    assert_eq!(target.parent(), Some(out));
}
