use crate::ascii::{AsciiArt, map_pixels};
use crate::config::ConversionParameters;
use crate::error::ConvertError;
use crate::rasterizer::{SourceImage, rasterize};
use std::time::Instant;

/// Converts a decoded image to ASCII art
///
/// Pipeline:
/// 1. Validate the parameters
/// 2. Scale the source to `output_width x round(output_width / aspect)`
/// 3. Map every cell of the scaled buffer to a glyph
///
/// The result is a pure function of the inputs: the same image and
/// parameters always give byte-identical text.
///
/// # Arguments
/// * `source` - The decoded input image
/// * `params` - Conversion settings
///
/// # Returns
/// The ASCII art, or an error when the parameters are out of range or the
/// image would scale down to nothing
pub fn convert(source: &SourceImage, params: &ConversionParameters) -> Result<AsciiArt, ConvertError> {
    params.validate()?;
    let start = Instant::now();

    let buffer = rasterize(source, params.output_width)?;
    let (width, height) = buffer.dimensions();
    let art = map_pixels(&buffer, width, height, params);

    log::debug!(
        "converted {}x{} image to {}x{} {} art in {:.1} ms",
        source.width(),
        source.height(),
        art.width(),
        art.height(),
        params.character_set,
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(art)
}

/// Decodes encoded image bytes and converts them in one step
pub fn convert_bytes(bytes: &[u8], params: &ConversionParameters) -> Result<AsciiArt, ConvertError> {
    let source = SourceImage::decode(bytes)?;
    convert(&source, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::select_glyph_index;
    use crate::lut::CharacterSet;
    use image::{ImageFormat, Rgba, RgbaImage};
    use proptest::prelude::*;
    use std::io::Cursor;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            let v = ((x * 7 + y * 3) % 256) as u8;
            Rgba([v, v.wrapping_mul(3), 255 - v, 255])
        })
    }

    fn blocks() -> ConversionParameters {
        ConversionParameters {
            character_set: CharacterSet::Blocks,
            ..Default::default()
        }
    }

    #[test]
    fn test_white_square_blocks() {
        let source = SourceImage::from_rgba(RgbaImage::from_pixel(2, 2, Rgba([255; 4])));
        let params = ConversionParameters {
            output_width: 20,
            ..blocks()
        };
        let art = convert(&source, &params).unwrap();
        let text = art.to_string();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 21);
        assert!(lines[..20].iter().all(|l| *l == "█".repeat(20)));
        assert_eq!(lines[20], "");
    }

    #[test]
    fn test_transparent_source_is_all_spaces() {
        let source = SourceImage::from_rgba(RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0])));
        for width in [20, 57, 200] {
            let params = ConversionParameters {
                output_width: width,
                invert: true,
                ..Default::default()
            };
            let art = convert(&source, &params).unwrap();
            assert!(art.rows().iter().all(|r| r.chars().all(|c| c == ' ')));
        }
    }

    #[test]
    fn test_aspect_two_gives_half_height() {
        let source = SourceImage::from_rgba(gradient(80, 40));
        let params = ConversionParameters {
            output_width: 20,
            ..Default::default()
        };
        let text = convert(&source, &params).unwrap().to_string();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[..10].iter().all(|l| l.chars().count() == 20));
        assert!(lines[10].is_empty());
    }

    #[test]
    fn test_mid_gray_invert_indices_sum_to_last() {
        let source = SourceImage::from_rgba(RgbaImage::from_pixel(10, 10, Rgba([128, 128, 128, 255])));
        let plain = ConversionParameters {
            output_width: 20,
            ..Default::default()
        };
        let inverted = ConversionParameters { invert: true, ..plain };

        let a = convert(&source, &plain).unwrap().to_string();
        let b = convert(&source, &inverted).unwrap().to_string();
        let chars = CharacterSet::Standard.chars();
        for (ca, cb) in a.chars().zip(b.chars()).filter(|(c, _)| *c != '\n') {
            let ia = chars.iter().position(|&c| c == ca).unwrap();
            let ib = chars.iter().position(|&c| c == cb).unwrap();
            assert_eq!(ia + ib, 9);
        }
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let source = SourceImage::from_rgba(gradient(123, 77));
        let params = ConversionParameters {
            output_width: 64,
            contrast: 1.7,
            brightness: 0.8,
            character_set: CharacterSet::Lines,
            ..Default::default()
        };
        let first = convert(&source, &params).unwrap();
        let second = convert(&source, &params).unwrap();
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let source = SourceImage::from_rgba(gradient(10, 10));
        let params = ConversionParameters {
            output_width: 5,
            ..Default::default()
        };
        assert!(matches!(
            convert(&source, &params),
            Err(ConvertError::InvalidParameter { name: "output_width", .. })
        ));
    }

    #[test]
    fn test_convert_bytes() {
        let mut out = Cursor::new(Vec::new());
        gradient(40, 20).write_to(&mut out, ImageFormat::Png).unwrap();
        let params = ConversionParameters {
            output_width: 40,
            ..Default::default()
        };
        let art = convert_bytes(out.get_ref(), &params).unwrap();
        assert_eq!((art.width(), art.height()), (40, 20));

        assert!(matches!(
            convert_bytes(b"not an image", &params),
            Err(ConvertError::Decode(_))
        ));
    }

    fn any_set() -> impl Strategy<Value = CharacterSet> {
        prop::sample::select(CharacterSet::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn dimension_law_and_closure(
            src_w in 8u32..40,
            src_h in 8u32..40,
            width in 20u32..=200,
            contrast in 1u32..=30,
            brightness in 1u32..=30,
            invert in any::<bool>(),
            set in any_set(),
            seed in any::<u8>(),
        ) {
            let img = RgbaImage::from_fn(src_w, src_h, |x, y| {
                let v = (x * 31 + y * 17 + seed as u32) as u8;
                Rgba([v, v ^ 0x5a, v.wrapping_add(90), if (x + y) % 5 == 0 { 60 } else { 255 }])
            });
            let source = SourceImage::from_rgba(img);
            let params = ConversionParameters {
                output_width: width,
                contrast: contrast as f64 / 10.0,
                brightness: brightness as f64 / 10.0,
                invert,
                character_set: set,
            };
            let expected_h = (width as f64 / source.aspect_ratio()).round() as usize;

            match convert(&source, &params) {
                Ok(art) => {
                    let text = art.to_string();
                    let lines: Vec<&str> = text.split('\n').collect();
                    prop_assert_eq!(lines.len(), expected_h + 1);
                    prop_assert!(lines[expected_h].is_empty());
                    for line in &lines[..expected_h] {
                        prop_assert_eq!(line.chars().count(), width as usize);
                        prop_assert!(line.chars().all(|c| set.contains(c)));
                    }
                }
                Err(ConvertError::EmptyOutput { .. }) => prop_assert_eq!(expected_h, 0),
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
        }

        #[test]
        fn brighter_gray_never_lowers_index(a in any::<u8>(), b in any::<u8>(), set in any_set()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let params = ConversionParameters { character_set: set, ..Default::default() };
            let index = |v: u8| select_glyph_index(&Rgba([v, v, v, 255]), &params);
            prop_assert!(index(lo) <= index(hi));
        }

        #[test]
        fn invert_mirrors_index(
            r in any::<u8>(), g in any::<u8>(), b in any::<u8>(),
            contrast in 1u32..=30,
            brightness in 1u32..=30,
            set in any_set(),
        ) {
            let plain = ConversionParameters {
                contrast: contrast as f64 / 10.0,
                brightness: brightness as f64 / 10.0,
                character_set: set,
                ..Default::default()
            };
            let inverted = ConversionParameters { invert: true, ..plain };
            let pixel = Rgba([r, g, b, 255]);
            let ia = select_glyph_index(&pixel, &plain).unwrap();
            let ib = select_glyph_index(&pixel, &inverted).unwrap();
            prop_assert_eq!(ia + ib, set.len() - 1);
        }
    }
}
