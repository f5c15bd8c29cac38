//! Background image decoding
//!
//! Decoding a large photo takes far longer than mapping it, so it runs on the
//! rayon pool and reports back through a channel. The caller polls the handle
//! from its event loop.

use crate::error::ConvertError;
use crate::rasterizer::SourceImage;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Where the image bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageInput {
    /// A file picked by the user
    Path(PathBuf),
    /// Bytes already in memory
    Bytes(Vec<u8>),
}

impl ImageInput {
    fn decode(self) -> Result<SourceImage, ConvertError> {
        match self {
            ImageInput::Path(path) => SourceImage::open(&path),
            ImageInput::Bytes(bytes) => SourceImage::decode(&bytes),
        }
    }
}

/// Handle to a decode running in the background
#[derive(Debug)]
pub struct PendingDecode {
    receiver: Receiver<Result<SourceImage, ConvertError>>,
}

impl PendingDecode {
    /// Decoded image if it is ready, `None` while still running
    ///
    /// A worker that vanished without sending anything counts as a failed
    /// decode.
    pub fn try_take(&self) -> Option<Result<SourceImage, ConvertError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ConvertError::DecoderGone)),
        }
    }

    /// Block until the decode finishes
    pub fn wait(self) -> Result<SourceImage, ConvertError> {
        self.receiver.recv().unwrap_or_else(|_| Err(ConvertError::DecoderGone))
    }
}

/// Start decoding on the rayon pool
pub fn spawn_decode(input: ImageInput) -> PendingDecode {
    let (sender, receiver) = mpsc::channel();
    rayon::spawn(move || {
        let result = input.decode();
        match &result {
            Ok(image) => log::info!("decoded {}x{} image", image.width(), image.height()),
            Err(e) => log::warn!("image decode failed: {e}"),
        }
        // receiver may already be dropped if a newer decode replaced this one
        let _ = sender.send(result);
    });
    PendingDecode { receiver }
}
