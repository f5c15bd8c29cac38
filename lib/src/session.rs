//! Interactive session state
//!
//! [`Session`] owns everything a front end mutates: the current parameters,
//! the selected image, an in-flight decode and the latest art. Changes go
//! through [`Session::dispatch`]; conversion itself stays a pure function of
//! an image and a [`ConversionParameters`] value.
//!
//! Selecting an image also starts a background decode for its preview, so
//! the front end never decodes on its own thread.
//!
//! Parameters are read when the decoded image arrives, not when generation
//! is requested, so tweaking a slider while a large file is still decoding
//! is reflected in the result.

use crate::ascii::AsciiArt;
use crate::config::ConversionParameters;
use crate::error::ConvertError;
use crate::loader::{ImageInput, PendingDecode, spawn_decode};
use crate::lut::CharacterSet;
use crate::processor::convert;
use crate::rasterizer::SourceImage;

/// A change requested by the user
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetOutputWidth(u32),
    SetContrast(f64),
    SetBrightness(f64),
    SetInvert(bool),
    SetCharacterSet(CharacterSet),
    /// Replace all parameters at once
    SetParameters(ConversionParameters),
    /// Choose the image the next generation will use
    SelectImage(ImageInput),
    /// Decode the selected image and convert it
    Generate,
}

/// State holder for one interactive session
#[derive(Debug, Default)]
pub struct Session {
    params: ConversionParameters,
    selected: Option<ImageInput>,
    pending: Option<PendingDecode>,
    art: Option<AsciiArt>,
    preview_pending: Option<PendingDecode>,
    preview: Option<SourceImage>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action
    ///
    /// Parameter values are clamped into their accepted ranges. `Generate`
    /// without a selected image does nothing; a second `Generate` while a
    /// decode is in flight replaces it.
    pub fn dispatch(&mut self, action: Action) {
        let mut params = self.params;
        match action {
            Action::SetOutputWidth(width) => params.output_width = width,
            Action::SetContrast(contrast) => params.contrast = contrast,
            Action::SetBrightness(brightness) => params.brightness = brightness,
            Action::SetInvert(invert) => params.invert = invert,
            Action::SetCharacterSet(set) => params.character_set = set,
            Action::SetParameters(new_params) => params = new_params,
            Action::SelectImage(input) => {
                self.preview = None;
                self.preview_pending = Some(spawn_decode(input.clone()));
                self.selected = Some(input);
                return;
            }
            Action::Generate => {
                self.generate();
                return;
            }
        }
        self.params = params.clamped();
    }

    fn generate(&mut self) {
        match &self.selected {
            Some(input) => {
                if self.pending.is_some() {
                    log::debug!("replacing in-flight decode");
                }
                self.pending = Some(spawn_decode(input.clone()));
            }
            None => log::debug!("generate ignored, no image selected"),
        }
    }

    /// Pick up a finished decode, if any
    ///
    /// Returns true when new art was produced. Decode and conversion errors
    /// are logged and leave the previous art in place.
    pub fn poll(&mut self) -> bool {
        let result = match &self.pending {
            Some(pending) => match pending.try_take() {
                Some(result) => result,
                None => return false,
            },
            None => return false,
        };
        self.pending = None;
        self.complete(result)
    }

    /// Pick up a finished preview decode, if any
    ///
    /// Returns true when a new preview arrived. A file the decoder rejects
    /// simply has no preview.
    pub fn poll_preview(&mut self) -> bool {
        let result = match &self.preview_pending {
            Some(pending) => match pending.try_take() {
                Some(result) => result,
                None => return false,
            },
            None => return false,
        };
        self.preview_pending = None;
        match result {
            Ok(image) => {
                self.preview = Some(image);
                true
            }
            Err(e) => {
                log::warn!("no preview for selected image: {e}");
                false
            }
        }
    }

    /// Block until the in-flight decode, if any, is handled
    pub fn finish(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => self.complete(pending.wait()),
            None => false,
        }
    }

    fn complete(&mut self, decoded: Result<SourceImage, ConvertError>) -> bool {
        let converted = decoded.and_then(|source| convert(&source, &self.params));
        match converted {
            Ok(art) => {
                self.art = Some(art);
                true
            }
            Err(e) => {
                log::warn!("no ascii art produced: {e}");
                false
            }
        }
    }

    pub fn params(&self) -> &ConversionParameters {
        &self.params
    }

    pub fn selected(&self) -> Option<&ImageInput> {
        self.selected.as_ref()
    }

    /// Latest successfully generated art
    pub fn art(&self) -> Option<&AsciiArt> {
        self.art.as_ref()
    }

    /// Decoded selected image, once its background decode finished
    pub fn preview(&self) -> Option<&SourceImage> {
        self.preview.as_ref()
    }

    /// Whether a decode is still running
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_previewing(&self) -> bool {
        self.preview_pending.is_some()
    }

    /// Generation needs a selected image
    pub fn can_generate(&self) -> bool {
        self.selected.is_some()
    }

    /// Copy and download need non-empty art
    pub fn can_export(&self) -> bool {
        self.art.as_ref().is_some_and(|art| !art.is_empty())
    }
}
