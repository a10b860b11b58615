//! Batch driver: glyphs in, OBJ text out.
//!
//! Glyphs are built strictly one after another. A glyph that fails to load
//! or build is logged and skipped; it produces no output and does not stop
//! the rest of the batch.

use std::io;

use thiserror::Error;

use crate::error::MeshError;
use crate::glyph::{NameRegistry, RawGlyph};
use crate::outline::{GlyphSelector, OutlineError, OutlineSource};
use crate::tessellate::Tessellator;
use crate::types::{BuildSettings, View};
use crate::vertex_cache::VertexCache;

/// One output file per glyph: which view, and what to append to the name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceTask {
    pub view: View,
    pub suffix: &'static str,
}

/// Output files for the requested views.
///
/// No views means one combined file. A single view gets an unsuffixed
/// file of its own. Several views each get a suffixed file.
pub fn face_tasks(selected: &[View]) -> Vec<FaceTask> {
    let mut views: Vec<View> = Vec::new();
    for &view in selected {
        if view != View::All && !views.contains(&view) {
            views.push(view);
        }
    }
    match views.len() {
        0 => vec![FaceTask { view: View::All, suffix: "" }],
        1 => vec![FaceTask { view: views[0], suffix: "" }],
        _ => views
            .into_iter()
            .map(|view| FaceTask {
                view,
                suffix: view.file_suffix(),
            })
            .collect(),
    }
}

/// OBJ text for one glyph view, ready to write to `<file_stem>.obj`.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedObj {
    pub file_stem: String,
    pub view: View,
    pub contents: String,
}

impl RenderedObj {
    pub fn file_name(&self) -> String {
        format!("{}.obj", self.file_stem)
    }
}

/// Why a single glyph produced no output.
#[derive(Debug, Error)]
pub enum GlyphError {
    #[error(transparent)]
    Outline(#[from] OutlineError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Build one glyph and render every task. Nothing is returned unless all
/// tasks succeed.
pub fn render_glyph(
    glyph: &RawGlyph,
    tessellator: &dyn Tessellator,
    settings: &BuildSettings,
    tasks: &[FaceTask],
) -> Result<Vec<RenderedObj>, MeshError> {
    let cache = VertexCache::build(glyph, tessellator, settings)?;
    tasks
        .iter()
        .map(|task| {
            Ok(RenderedObj {
                file_stem: format!("{}{}", glyph.filename(), task.suffix),
                view: task.view,
                contents: cache.to_obj(task.view)?.to_obj_string(),
            })
        })
        .collect()
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub built: usize,
    pub failed: Vec<(GlyphSelector, GlyphError)>,
}

/// Build every selected glyph in order and hand each rendered file to
/// `sink`.
///
/// Glyph failures are collected in the summary. An error from `sink` is an
/// output failure and ends the batch.
pub fn run_batch<F>(
    source: &dyn OutlineSource,
    selectors: &[GlyphSelector],
    tessellator: &dyn Tessellator,
    settings: &BuildSettings,
    tasks: &[FaceTask],
    registry: &mut NameRegistry,
    mut sink: F,
) -> io::Result<BatchSummary>
where
    F: FnMut(&RenderedObj) -> io::Result<()>,
{
    let mut summary = BatchSummary::default();
    for &selector in selectors {
        let rendered = source
            .outline(selector)
            .map_err(GlyphError::from)
            .and_then(|outline| Ok(RawGlyph::from_outline(&outline, registry)?))
            .and_then(|glyph| Ok(render_glyph(&glyph, tessellator, settings, tasks)?));
        match rendered {
            Ok(files) => {
                for file in &files {
                    sink(file)?;
                }
                summary.built += 1;
            }
            Err(err) => {
                log::error!("{selector}: {err}");
                summary.failed.push((selector, err));
            }
        }
    }
    log::debug!(
        "batch done: {} built, {} failed",
        summary.built,
        summary.failed.len()
    );
    Ok(summary)
}
