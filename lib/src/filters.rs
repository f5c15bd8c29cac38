use image::Rgba;

/// Alpha values below this render as blank cells
pub const ALPHA_CUTOFF: u8 = 128;

/// Scale a channel by the brightness factor, saturating at 255
///
/// Formula: c' = min(255, c * brightness)
pub fn apply_brightness(channel: f64, brightness: f64) -> f64 {
    (channel * brightness).min(255.0)
}

/// Stretch a channel around mid-gray by the contrast factor
///
/// Formula: c' = min(255, ((c / 255 - 0.5) * contrast + 0.5) * 255)
///
/// Only the upper bound is clamped. A strong contrast pushes dark channels
/// below zero and that negative value flows into the luminance sum; the glyph
/// index clamp absorbs it later.
pub fn apply_contrast(channel: f64, contrast: f64) -> f64 {
    (((channel / 255.0 - 0.5) * contrast + 0.5) * 255.0).min(255.0)
}

/// Perceptual luminance of an RGB triple using the ITU-R BT.601 weights
///
/// Formula: L = (0.299*R + 0.587*G + 0.114*B) / 255
///
/// The weights are applied as integers over 1000 so that pure white lands on
/// exactly 1.0 instead of one ulp below it.
///
/// # Arguments
/// * `r`, `g`, `b` - Channel values, nominally [0, 255]
///
/// # Returns
/// Luminance, nominally [0.0, 1.0]
pub fn luminance(r: f64, g: f64, b: f64) -> f64 {
    (299.0 * r + 587.0 * g + 114.0 * b) / 255_000.0
}

/// Brightness, contrast and luminance for one opaque pixel
///
/// Returns `None` for pixels whose alpha is below [`ALPHA_CUTOFF`].
pub fn adjusted_luminance(pixel: &Rgba<u8>, brightness: f64, contrast: f64) -> Option<f64> {
    let [r, g, b, a] = pixel.0;
    if a < ALPHA_CUTOFF {
        return None;
    }

    let adjust = |c: u8| apply_contrast(apply_brightness(c as f64, brightness), contrast);
    Some(luminance(adjust(r), adjust(g), adjust(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_black() {
        assert_eq!(luminance(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_luminance_white_is_exactly_one() {
        assert_eq!(luminance(255.0, 255.0, 255.0), 1.0);
    }

    #[test]
    fn test_luminance_weights() {
        let red = luminance(255.0, 0.0, 0.0);
        let green = luminance(0.0, 255.0, 0.0);
        let blue = luminance(0.0, 0.0, 255.0);
        assert!((red - 0.299).abs() < 1e-12);
        assert!((green - 0.587).abs() < 1e-12);
        assert!((blue - 0.114).abs() < 1e-12);
    }

    #[test]
    fn test_brightness_saturates() {
        assert_eq!(apply_brightness(200.0, 2.0), 255.0);
        assert_eq!(apply_brightness(100.0, 0.5), 50.0);
    }

    #[test]
    fn test_contrast_identity() {
        for c in [0.0, 64.0, 128.0, 255.0] {
            assert!((apply_contrast(c, 1.0) - c).abs() < 1e-9);
        }
    }

    #[test]
    fn test_contrast_has_no_lower_clamp() {
        // (0 - 0.5) * 3 + 0.5 = -1.0
        assert!((apply_contrast(0.0, 3.0) + 255.0).abs() < 1e-9);
        assert_eq!(apply_contrast(255.0, 3.0), 255.0);
    }

    #[test]
    fn test_transparent_pixel_has_no_luminance() {
        assert_eq!(adjusted_luminance(&Rgba([255, 255, 255, 127]), 1.0, 1.0), None);
        assert!(adjusted_luminance(&Rgba([255, 255, 255, 128]), 1.0, 1.0).is_some());
    }

    #[test]
    fn test_adjusted_luminance_gray() {
        let lum = adjusted_luminance(&Rgba([128, 128, 128, 255]), 1.0, 1.0).unwrap();
        assert!((lum - 128.0 / 255.0).abs() < 1e-9);
    }
}
