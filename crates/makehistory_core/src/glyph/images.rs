//! Built-in full-width images and text banners.

use crate::glyph::{ascii, GlyphError};
use crate::model::matrix::IntensityMatrix;

const GLYPH_GAP: usize = 1;

const HI: [&str; 7] = [
    "             44      44   333333   22             ",
    "             44      44     33     22             ",
    "             44      44     33     22             ",
    "             4444444444     33     22             ",
    "             44      44     33     22             ",
    "             44      44     33                    ",
    "             44      44   333333   22             ",
];

const WAVE: [&str; 7] = [
    "              1468998753               1468998753 ",
    "1            3588655679741            358865567974",
    "52         1379642112357852         13796421123578",
    "9631      257752      1369631      257752      136",
    "587532112469731         2587532112469731         2",
    "1479765568853            1479765568853            ",
    "  3578998641               3578998641             ",
];

const IMAGES: &[(&str, &[&str; 7])] = &[("hi", &HI), ("wave", &WAVE)];

/// Names of the built-in images.
pub fn image_names() -> impl Iterator<Item = &'static str> {
    IMAGES.iter().map(|(name, _)| *name)
}

/// Returns a built-in 7x50 image by name (case-insensitive).
pub fn named_image(name: &str) -> Result<IntensityMatrix, GlyphError> {
    let normalized = name.trim().to_ascii_lowercase();
    let (_, art) = IMAGES
        .iter()
        .find(|(candidate, _)| *candidate == normalized)
        .ok_or_else(|| GlyphError::UnknownImage(name.to_string()))?;
    Ok(IntensityMatrix::from_art(art.as_slice())?)
}

/// Renders `text` as a banner, one glyph per symbol with a blank column between.
///
/// # Errors
/// - `GlyphError::EmptyText` when `text` has no symbols.
/// - `GlyphError::NotFound` for the first unsupported symbol.
/// - `GlyphError::Matrix` when the banner is wider than the calendar.
pub fn render_text(text: &str) -> Result<IntensityMatrix, GlyphError> {
    let mut symbols = text.chars();
    let first = symbols.next().ok_or(GlyphError::EmptyText)?;
    let mut banner = ascii::lookup(first)?;
    for symbol in symbols {
        let glyph = ascii::lookup(symbol)?;
        // Overflow past the calendar width surfaces here as `MatrixError::TooWide`.
        banner = banner.hconcat(&glyph, GLYPH_GAP)?;
    }
    Ok(banner)
}
