//! Error types for conversion and export.

use thiserror::Error;

/// Errors produced while decoding, converting or exporting.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Reading the input file or writing the output file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The platform decoder rejected the image bytes.
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// A background decode ended without reporting a result.
    #[error("decoder stopped without a result")]
    DecoderGone,

    /// A conversion parameter fell outside its accepted range.
    #[error("{name} must be between {min} and {max}, got {value}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A character set name was not found in the registry.
    #[error("unknown character set: {0}")]
    UnknownCharacterSet(String),

    /// The conversion or export would produce a zero-sized result.
    #[error("output would be empty ({width}x{height})")]
    EmptyOutput { width: u32, height: u32 },

    /// PNG encoding failed.
    #[error("failed to encode png: {0}")]
    Encode(#[source] image::ImageError),

    /// The bundled export font could not be parsed.
    #[error("invalid export font: {0}")]
    Font(#[from] ab_glyph::InvalidFont),
}

impl From<image::ImageError> for ConvertError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(io) => ConvertError::Io(io),
            other => ConvertError::Decode(other),
        }
    }
}
