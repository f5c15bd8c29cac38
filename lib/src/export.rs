//! Exporting finished art as a PNG image
//!
//! The text is re-rasterised glyph by glyph onto a transparent canvas whose
//! size follows the monospace metrics below, scaled by the display's device
//! pixel ratio. Glyphs come from the bundled DejaVu Sans Mono, which covers
//! every character set.

use crate::ascii::AsciiArt;
use crate::error::ConvertError;
use ab_glyph::{Font, FontRef, PxScale};
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use std::io::Cursor;
use std::path::Path;

/// DejaVu Sans Mono, see `assets/LICENSE-DejaVu.txt`
static FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

/// Suggested name for downloaded images
pub const DEFAULT_FILE_NAME: &str = "ascii-art.png";

/// Font size the metrics derive from, in logical pixels
pub const FONT_SIZE_PX: u32 = 8;

/// Horizontal advance per glyph in tenths of a logical pixel (0.6 em = 4.8 px)
pub const CHAR_ADVANCE_TENTHS: u32 = FONT_SIZE_PX * 6;

/// Line height in tenths of a logical pixel, equal to the advance
pub const LINE_HEIGHT_TENTHS: u32 = CHAR_ADVANCE_TENTHS;

/// Glyph color, `#4B5563`
pub const TEXT_COLOR: [u8; 3] = [0x4B, 0x55, 0x63];

/// Parse the bundled export font
pub fn export_font() -> Result<FontRef<'static>, ConvertError> {
    Ok(FontRef::try_from_slice(FONT_DATA)?)
}

/// Scale at which one em of `font` is `px_per_em` pixels tall
///
/// `PxScale` measures ascent to descent, which is taller than the em box.
fn em_scale(font: &impl Font, px_per_em: f32) -> PxScale {
    match font.units_per_em() {
        Some(units) => PxScale::from(px_per_em * font.height_unscaled() / units),
        None => PxScale::from(px_per_em),
    }
}

/// Size of the exported canvas
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CanvasSize {
    /// Size before device pixel scaling
    pub logical: (u32, u32),
    /// Size of the encoded image
    pub physical: (u32, u32),
}

/// Compute the canvas for a block of text
///
/// Logical width is `longest line * 4.8` and logical height is
/// `(line count - 1) * 4.8`, both truncated to whole pixels. The line count
/// comes from splitting on `\n`, so the empty line after the final terminator
/// adds no height. Physical size is the logical size times the device pixel
/// ratio, truncated again.
pub fn canvas_size(text: &str, device_pixel_ratio: f32) -> CanvasSize {
    let lines = text.split('\n');
    let line_count = lines.clone().count() as u32;
    let longest = lines.map(|l| l.chars().count() as u32).max().unwrap_or(0);

    let logical = (
        longest * CHAR_ADVANCE_TENTHS / 10,
        line_count.saturating_sub(1) * LINE_HEIGHT_TENTHS / 10,
    );
    let scale = device_pixel_ratio.max(0.0);
    let physical = (
        (logical.0 as f32 * scale) as u32,
        (logical.1 as f32 * scale) as u32,
    );
    CanvasSize { logical, physical }
}

/// Render text to a transparent RGBA image
///
/// Each line is drawn left-aligned with the top of its glyphs at
/// `row * line height`. Rows past the canvas height (the part after the last
/// terminator) are clipped away.
///
/// # Arguments
/// * `text` - Lines separated by `\n`
/// * `device_pixel_ratio` - Physical pixels per logical pixel
///
/// # Returns
/// The rendered image, or `EmptyOutput` if the canvas has no area
pub fn render_text(text: &str, device_pixel_ratio: f32) -> Result<RgbaImage, ConvertError> {
    let size = canvas_size(text, device_pixel_ratio);
    let (width, height) = size.physical;
    if width == 0 || height == 0 {
        return Err(ConvertError::EmptyOutput { width, height });
    }

    let font = export_font()?;
    let scale = em_scale(&font, FONT_SIZE_PX as f32 * device_pixel_ratio);
    let [r, g, b] = TEXT_COLOR;
    let color = Rgba([r, g, b, 255]);

    let mut canvas = RgbaImage::new(width, height);
    let advance = CHAR_ADVANCE_TENTHS as f32 / 10.0 * device_pixel_ratio;
    let line_height = LINE_HEIGHT_TENTHS as f32 / 10.0 * device_pixel_ratio;

    for (row, line) in text.split('\n').enumerate() {
        let top = row as f32 * line_height;
        if top >= height as f32 {
            break;
        }
        let mut buf = [0; 4];
        for (col, ch) in line.chars().enumerate().filter(|(_, ch)| *ch != ' ') {
            let left = (col as f32 * advance).round() as i32;
            draw_text_mut(
                &mut canvas,
                color,
                left,
                top.round() as i32,
                scale,
                &font,
                ch.encode_utf8(&mut buf),
            );
        }
    }

    log::debug!(
        "rendered {}x{} logical canvas at {}x scale to {}x{}",
        size.logical.0,
        size.logical.1,
        device_pixel_ratio,
        width,
        height
    );
    Ok(canvas)
}

/// Render finished art to a PNG-ready image
pub fn render_art(art: &AsciiArt, device_pixel_ratio: f32) -> Result<RgbaImage, ConvertError> {
    render_text(&art.to_string(), device_pixel_ratio)
}

/// Encode an image as PNG bytes
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ConvertError> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(ConvertError::Encode)?;
    Ok(out.into_inner())
}

/// Render art and write it to `path` as PNG
pub fn save_png(art: &AsciiArt, device_pixel_ratio: f32, path: &Path) -> Result<(), ConvertError> {
    let image = render_art(art, device_pixel_ratio)?;
    let bytes = encode_png(&image)?;
    std::fs::write(path, bytes)?;
    log::info!("saved {}x{} png to {}", image.width(), image.height(), path.display());
    Ok(())
}
