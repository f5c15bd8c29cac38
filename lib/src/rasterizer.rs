//! Decoding and downscaling of source images
//!
//! The rasterizer turns encoded bytes into a [`SourceImage`] and scales it into
//! a [`PixelBuffer`] whose width is the requested character count and whose
//! height follows the source aspect ratio.

use crate::error::ConvertError;
use image::{RgbaImage, imageops};
use std::path::Path;

/// RGBA8 samples scaled to the character grid
pub type PixelBuffer = RgbaImage;

/// A decoded input bitmap
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    /// Decode an image from its encoded bytes, guessing the format
    pub fn decode(bytes: &[u8]) -> Result<Self, ConvertError> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::from_rgba(decoded.to_rgba8()))
    }

    /// Read and decode an image file
    pub fn open(path: &Path) -> Result<Self, ConvertError> {
        let bytes = std::fs::read(path)?;
        Self::decode(&bytes)
    }

    /// Wrap an already decoded RGBA bitmap
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f64 {
        self.width() as f64 / self.height() as f64
    }

    /// Borrow the decoded pixels
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Row count for a given character width and aspect ratio
///
/// Formula: round(output_width / aspect_ratio), halves rounding up
pub fn derived_height(output_width: u32, aspect_ratio: f64) -> u32 {
    (output_width as f64 / aspect_ratio).round() as u32
}

/// Scale the source image onto the character grid
///
/// Uses a triangle (bilinear) kernel. When downscaling, `imageops::resize`
/// widens the kernel by the scale factor, which averages over the covered
/// area and keeps small widths free of aliasing.
///
/// # Arguments
/// * `source` - The decoded input, left untouched
/// * `output_width` - Target width in pixels (one pixel per character)
///
/// # Returns
/// A buffer of `output_width x derived_height`, or `EmptyOutput` when either
/// side would be zero
pub fn rasterize(source: &SourceImage, output_width: u32) -> Result<PixelBuffer, ConvertError> {
    if source.width() == 0 || source.height() == 0 {
        return Err(ConvertError::EmptyOutput {
            width: source.width(),
            height: source.height(),
        });
    }

    let height = derived_height(output_width, source.aspect_ratio());
    if output_width == 0 || height == 0 {
        return Err(ConvertError::EmptyOutput {
            width: output_width,
            height,
        });
    }

    log::debug!(
        "rasterizing {}x{} source to {}x{}",
        source.width(),
        source.height(),
        output_width,
        height
    );

    Ok(imageops::resize(
        source.pixels(),
        output_width,
        height,
        imageops::FilterType::Triangle,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_derived_height() {
        assert_eq!(derived_height(20, 2.0), 10);
        assert_eq!(derived_height(100, 1.0), 100);
        assert_eq!(derived_height(100, 4.0 / 3.0), 75);
        assert_eq!(derived_height(30, 1.5), 20);
        // 25 / 2 = 12.5
        assert_eq!(derived_height(25, 2.0), 13);
    }

    #[test]
    fn test_rasterize_dimensions_follow_aspect() {
        let source = SourceImage::from_rgba(RgbaImage::new(400, 200));
        let buffer = rasterize(&source, 20).unwrap();
        assert_eq!(buffer.dimensions(), (20, 10));
    }

    #[test]
    fn test_rasterize_upscales_small_images() {
        let source = SourceImage::from_rgba(RgbaImage::from_pixel(2, 2, Rgba([255; 4])));
        let buffer = rasterize(&source, 50).unwrap();
        assert_eq!(buffer.dimensions(), (50, 50));
        assert!(buffer.pixels().all(|p| p.0 == [255; 4]));
    }

    #[test]
    fn test_rasterize_does_not_touch_source() {
        let source = SourceImage::from_rgba(RgbaImage::from_pixel(64, 32, Rgba([10, 20, 30, 255])));
        let _ = rasterize(&source, 20).unwrap();
        assert_eq!(source.pixels().dimensions(), (64, 32));
        assert_eq!(source.pixels().get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_rasterize_extreme_aspect_is_empty() {
        let source = SourceImage::from_rgba(RgbaImage::new(2000, 1));
        assert!(matches!(
            rasterize(&source, 20),
            Err(ConvertError::EmptyOutput { width: 20, height: 0 })
        ));
    }

    #[test]
    fn test_decode_png() {
        let img = RgbaImage::from_pixel(3, 5, Rgba([1, 2, 3, 255]));
        let source = SourceImage::decode(&png_bytes(&img)).unwrap();
        assert_eq!((source.width(), source.height()), (3, 5));
        assert!((source.aspect_ratio() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            SourceImage::decode(b"GIF? no"),
            Err(ConvertError::Decode(_))
        ));
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.png");
        assert!(matches!(SourceImage::open(&missing), Err(ConvertError::Io(_))));
    }
}
