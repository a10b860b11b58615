//! Command-line front end: read a font, write one OBJ file per glyph view.
//!
//!   glyph-bevel font.ttf -c A -c B --outline-only
//!   glyph-bevel font.ttf --list-names
//!
//! Set `RUST_LOG=debug` to trace each build stage.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glyph_bevel::prelude::*;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackingArg {
    Scan,
    Hashed,
}

impl From<BackingArg> for Backing {
    fn from(arg: BackingArg) -> Self {
        match arg {
            BackingArg::Scan => Backing::Scan,
            BackingArg::Hashed => Backing::Hashed,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Extrude and bevel font glyphs into OBJ meshes")]
struct Args {
    /// TrueType/OpenType font file
    font: PathBuf,

    /// Character to convert; repeat for more. Default: every glyph in the font
    #[arg(short = 'c', long = "char")]
    chars: Vec<char>,

    /// Write the front face
    #[arg(long)]
    front_only: bool,

    /// Write the extruded side wall
    #[arg(long)]
    side_only: bool,

    /// Write the bevel outline
    #[arg(long)]
    outline_only: bool,

    /// Joints sharper than this many degrees get a side-outline tube
    #[arg(short = 'a', long, default_value_t = 135.0)]
    angle: f32,

    /// Print glyph names and exit
    #[arg(short = 'l', long)]
    list_names: bool,

    /// Echo OBJ text to stdout
    #[arg(short = 'p', long)]
    print: bool,

    /// Build but do not write files
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Uniform scale applied to output vertices
    #[arg(short = 's', long, default_value_t = 1.0)]
    size: f32,

    /// X offset applied before scaling
    #[arg(short = 'x', long, default_value_t = 0.0, allow_negative_numbers = true)]
    xoffset: f32,

    /// Y offset applied before scaling
    #[arg(short = 'y', long, default_value_t = 0.0, allow_negative_numbers = true)]
    yoffset: f32,

    /// Extrusion depth toward -Z; 0 disables the side wall
    #[arg(short = 'z', long, default_value_t = 15.0)]
    zdepth: f32,

    /// Bevel stroke thickness
    #[arg(short = 't', long = "thickness-outline", default_value_t = 2.5)]
    thickness: f32,

    /// Vertex lookup strategy
    #[arg(long, value_enum, default_value_t = BackingArg::Scan)]
    backing: BackingArg,

    /// Directory for output files
    #[arg(short = 'o', long, default_value = ".")]
    out_dir: PathBuf,
}

impl Args {
    fn settings(&self) -> BuildSettings {
        BuildSettings {
            depth: self.zdepth,
            thickness: self.thickness,
            angle_threshold: self.angle,
            x_offset: self.xoffset,
            y_offset: self.yoffset,
            scale: self.size,
            backing: self.backing.into(),
        }
    }

    fn views(&self) -> Vec<View> {
        [
            (self.front_only, View::Front),
            (self.side_only, View::Side),
            (self.outline_only, View::Outline),
        ]
        .into_iter()
        .filter_map(|(on, view)| on.then_some(view))
        .collect()
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let data = fs::read(&args.font)
        .with_context(|| format!("reading font {}", args.font.display()))?;
    let source = TtfOutlineSource::parse(&data)
        .with_context(|| format!("parsing font {}", args.font.display()))?;

    let selectors: Vec<GlyphSelector> = if args.chars.is_empty() {
        source.glyphs()
    } else {
        args.chars.iter().copied().map(GlyphSelector::Char).collect()
    };

    if args.list_names {
        for &selector in &selectors {
            match source.glyph_name(selector) {
                Ok(name) => println!("{name}"),
                Err(err) => log::error!("{selector}: {err}"),
            }
        }
        return Ok(());
    }

    if !args.dry_run {
        fs::create_dir_all(&args.out_dir)
            .with_context(|| format!("creating {}", args.out_dir.display()))?;
    }

    let tasks = face_tasks(&args.views());
    let mut registry = NameRegistry::new();
    let summary = run_batch(
        &source,
        &selectors,
        &EarcutTessellator,
        &args.settings(),
        &tasks,
        &mut registry,
        |file| {
            if args.print {
                print!("{}", file.contents);
            }
            if !args.dry_run {
                fs::write(args.out_dir.join(file.file_name()), &file.contents)?;
            }
            Ok(())
        },
    )
    .context("writing output")?;

    log::info!(
        "{} glyphs built, {} failed",
        summary.built,
        summary.failed.len()
    );
    Ok(())
}
