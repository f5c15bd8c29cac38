//! ASCII Press - image to ASCII art converter
//!
//! Scales an image down to a character grid, maps every cell's luminance to
//! a glyph from a small ordered character set, and exports the result as text
//! or as a re-rendered PNG.
//!
//! # Example
//! ```no_run
//! use ascii_press::{CharacterSet, ConversionParameters, SourceImage, convert};
//! use std::path::Path;
//!
//! let source = SourceImage::open(Path::new("photo.jpg")).unwrap();
//! let params = ConversionParameters {
//!     output_width: 80,
//!     character_set: CharacterSet::Blocks,
//!     ..Default::default()
//! };
//! let art = convert(&source, &params).unwrap();
//! print!("{art}");
//! ascii_press::export::save_png(&art, 2.0, Path::new("ascii-art.png")).unwrap();
//! ```

pub mod ascii;
pub mod config;
pub mod error;
pub mod export;
pub mod filters;
pub mod loader;
pub mod lut;
pub mod processor;
pub mod rasterizer;
pub mod session;

// Re-export main types for convenience
pub use ascii::AsciiArt;
pub use config::ConversionParameters;
pub use error::ConvertError;
pub use lut::CharacterSet;
pub use processor::{convert, convert_bytes};
pub use rasterizer::SourceImage;
pub use session::{Action, Session};
