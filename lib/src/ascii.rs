use crate::config::ConversionParameters;
use crate::filters::adjusted_luminance;
use crate::lut::CharacterSet;
use crate::rasterizer::PixelBuffer;
use image::Rgba;
use rayon::prelude::*;
use std::fmt;

/// Finished ASCII art: `height` rows of exactly `width` glyphs each
///
/// The text form ends every row with `\n`, so splitting it on `\n` yields
/// `height + 1` lines with an empty last line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiArt {
    width: u32,
    rows: Vec<String>,
    character_set: CharacterSet,
}

impl AsciiArt {
    /// Characters per row
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of content rows (the trailing empty line is not counted)
    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    /// The set every glyph was drawn from
    pub fn character_set(&self) -> CharacterSet {
        self.character_set
    }

    /// Content rows without terminators
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Whether there is nothing to show or export
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text blob for the clipboard: every row followed by `\n`
    pub fn clipboard_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AsciiArt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            f.write_str(row)?;
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// Glyph index for one sampled pixel, `None` when the pixel is transparent
///
/// Inversion mirrors the quantized index rather than the luminance, so the
/// inverted index is always `len - 1 - idx`.
pub fn select_glyph_index(pixel: &Rgba<u8>, params: &ConversionParameters) -> Option<usize> {
    let lum = adjusted_luminance(pixel, params.brightness, params.contrast)?;
    let set = params.character_set;
    let index = set.index_for(lum);
    Some(if params.invert { set.mirror(index) } else { index })
}

/// Select the glyph for one sampled pixel
///
/// Transparent pixels (alpha < 128) become a space whatever the other
/// settings are. Opaque pixels go through brightness, contrast and luminance,
/// then pick a glyph from the active set.
///
/// # Arguments
/// * `pixel` - The sampled RGBA pixel
/// * `params` - Conversion settings
///
/// # Returns
/// The ASCII character to emit
pub fn select_ascii_char(pixel: &Rgba<u8>, params: &ConversionParameters) -> char {
    select_glyph_index(pixel, params).map_or(' ', |index| params.character_set.chars()[index])
}

/// Nearest-neighbor source coordinate for a grid cell
///
/// Formula: floor(cell * source_len / grid_len)
pub fn sample_coord(cell: u32, grid_len: u32, source_len: u32) -> u32 {
    ((cell as u64 * source_len as u64) / grid_len as u64) as u32
}

/// Map a pixel buffer onto a character grid
///
/// Normally the grid matches the buffer size one to one since the rasterizer
/// already scaled the image, but any grid size is accepted and sampled with
/// nearest-neighbor lookups.
///
/// # Arguments
/// * `buffer` - Scaled RGBA samples
/// * `ascii_width` - Characters per row
/// * `ascii_height` - Number of rows
/// * `params` - Conversion settings
///
/// # Returns
/// The finished ASCII art; empty when the buffer or grid has no area
pub fn map_pixels(
    buffer: &PixelBuffer,
    ascii_width: u32,
    ascii_height: u32,
    params: &ConversionParameters,
) -> AsciiArt {
    let (width, height) = buffer.dimensions();
    let empty = width == 0 || height == 0 || ascii_width == 0 || ascii_height == 0;

    let rows = if empty {
        Vec::new()
    } else {
        // Rows are independent; collect keeps them in order
        (0..ascii_height)
            .into_par_iter()
            .map(|y| {
                let sample_y = sample_coord(y, ascii_height, height);
                (0..ascii_width)
                    .map(|x| {
                        let sample_x = sample_coord(x, ascii_width, width);
                        select_ascii_char(buffer.get_pixel(sample_x, sample_y), params)
                    })
                    .collect::<String>()
            })
            .collect()
    };

    AsciiArt {
        width: if empty { 0 } else { ascii_width },
        rows,
        character_set: params.character_set,
    }
}
