use crate::error::ConvertError;
use crate::lut::CharacterSet;

/// Accepted output width range, in characters
pub const WIDTH_RANGE: (u32, u32) = (20, 200);

/// Accepted contrast and brightness range
pub const FACTOR_RANGE: (f64, f64) = (0.1, 3.0);

/// Slider step for contrast and brightness
pub const FACTOR_STEP: f64 = 0.1;

/// Parameters for one image to ASCII conversion
///
/// Together with the source image these fully determine the output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionParameters {
    /// Characters per row, 20-200, default 100
    pub output_width: u32,
    /// Contrast factor, 0.1-3.0, default 1.0
    pub contrast: f64,
    /// Brightness factor, 0.1-3.0, default 1.0
    pub brightness: f64,
    /// Swap dense and sparse glyphs, default false
    pub invert: bool,
    /// Glyph ramp, default standard
    pub character_set: CharacterSet,
}

impl Default for ConversionParameters {
    fn default() -> Self {
        Self {
            output_width: 100,
            contrast: 1.0,
            brightness: 1.0,
            invert: false,
            character_set: CharacterSet::Standard,
        }
    }
}

impl ConversionParameters {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<(), ConvertError> {
        let (min_w, max_w) = WIDTH_RANGE;
        if !(min_w..=max_w).contains(&self.output_width) {
            return Err(ConvertError::InvalidParameter {
                name: "output_width",
                value: self.output_width as f64,
                min: min_w as f64,
                max: max_w as f64,
            });
        }
        check_factor("contrast", self.contrast)?;
        check_factor("brightness", self.brightness)?;
        Ok(())
    }

    /// Copy with every value pulled into range
    ///
    /// Contrast and brightness also snap to the nearest slider step. NaN
    /// factors fall back to the default of 1.0.
    pub fn clamped(self) -> Self {
        let (min_w, max_w) = WIDTH_RANGE;
        Self {
            output_width: self.output_width.clamp(min_w, max_w),
            contrast: snap_factor(self.contrast),
            brightness: snap_factor(self.brightness),
            ..self
        }
    }
}

fn check_factor(name: &'static str, value: f64) -> Result<(), ConvertError> {
    let (min, max) = FACTOR_RANGE;
    // NaN fails the range check
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConvertError::InvalidParameter { name, value, min, max })
    }
}

fn snap_factor(value: f64) -> f64 {
    if value.is_nan() {
        return 1.0;
    }
    let (min, max) = FACTOR_RANGE;
    let stepped = (value / FACTOR_STEP).round() * FACTOR_STEP;
    // round to one decimal so 0.30000000000000004 reads back as 0.3
    ((stepped * 10.0).round() / 10.0).clamp(min, max)
}
