//! Process-wide, read-only render assets: the background template and the
//! typefaces. Everything is loaded once at startup and immutable afterwards.
//!
//! A missing or corrupt font degrades to a system sans-serif face instead of
//! failing the service; the background template has no substitute.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use tiny_skia::Pixmap;
use ttf_parser::Face;

pub const DEFAULT_BACKGROUND_PATH: &str = "assets/background.png";
pub const DEFAULT_FONT_PATH: &str = "assets/DejaVuSans.ttf";
pub const DEFAULT_BOLD_FONT_PATH: &str = "assets/DejaVuSans-Bold.ttf";

static SYSTEM_FONTS: Lazy<Database> = Lazy::new(|| {
    let mut db = Database::new();
    db.load_system_fonts();
    db
});

/// An owned font binary plus the face index inside it.
#[derive(Clone)]
pub struct Typeface {
    data: Arc<Vec<u8>>,
    index: u32,
}

impl Typeface {
    fn from_bytes(data: Vec<u8>, index: u32) -> Result<Self> {
        Face::parse(&data, index).context("font data does not parse as a TrueType face")?;
        Ok(Self {
            data: Arc::new(data),
            index,
        })
    }

    /// Parses a borrowed face view. The bytes were validated at load time,
    /// so this only fails if they were corrupted since.
    pub fn as_face(&self) -> Result<Face<'_>> {
        Face::parse(&self.data, self.index).context("cached font data no longer parses")
    }
}

/// Regular and bold faces used by the renderer. `fallback` records whether
/// any configured face had to be replaced.
#[derive(Clone)]
pub struct FontSet {
    pub regular: Typeface,
    pub bold: Typeface,
    pub fallback: bool,
}

pub fn load_background(path: &Path) -> Result<Pixmap> {
    let bytes = fs::read(path)
        .with_context(|| format!("reading background template {}", path.display()))?;
    Pixmap::decode_png(&bytes)
        .with_context(|| format!("decoding background template {}", path.display()))
}

/// Loads the regular and bold faces, degrading per face: a configured file
/// that is missing or corrupt falls back to a system sans-serif, and a bold
/// face that cannot be found anywhere falls back to the regular face.
pub fn load_fonts(font_path: &Path, bold_font_path: &Path) -> Result<FontSet> {
    let mut fallback = false;

    let regular = match load_typeface(font_path) {
        Ok(face) => face,
        Err(err) => {
            tracing::warn!(
                "font {} unavailable ({err:#}), falling back to system sans-serif",
                font_path.display()
            );
            fallback = true;
            system_typeface(Weight::NORMAL).context("no system sans-serif font available")?
        }
    };

    let bold = match load_typeface(bold_font_path) {
        Ok(face) => face,
        Err(err) => {
            tracing::warn!(
                "bold font {} unavailable ({err:#}), falling back",
                bold_font_path.display()
            );
            fallback = true;
            system_typeface(Weight::BOLD).unwrap_or_else(|| regular.clone())
        }
    };

    Ok(FontSet {
        regular,
        bold,
        fallback,
    })
}

fn load_typeface(path: &Path) -> Result<Typeface> {
    let bytes = fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    Typeface::from_bytes(bytes, 0)
}

fn system_typeface(weight: Weight) -> Option<Typeface> {
    let query = Query {
        families: &[Family::SansSerif],
        weight,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };
    let id = SYSTEM_FONTS.query(&query)?;
    SYSTEM_FONTS
        .with_face_data(id, |data, index| Typeface::from_bytes(data.to_vec(), index))?
        .ok()
}
