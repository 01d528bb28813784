//! Frame compositing: draw a (stretched) frame over a downloaded image.
//!
//! Without a frame the payload passes through untouched. Any decode or
//! encode failure falls back to the original bytes; compositing never fails
//! a run.

use std::io::Cursor;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("could not decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("could not encode PNG: {0}")]
    Encode(#[source] image::ImageError),
    #[error("could not read frame {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Decoded overlay applied to every image of a run.
#[derive(Debug, Clone)]
pub struct Frame {
    image: RgbaImage,
}

impl Frame {
    pub fn decode(bytes: &[u8]) -> Result<Self, ComposeError> {
        let image = image::load_from_memory(bytes)
            .map_err(ComposeError::Decode)?
            .to_rgba8();
        Ok(Self { image })
    }

    pub fn open(path: &Path) -> Result<Self, ComposeError> {
        let bytes = std::fs::read(path).map_err(|source| ComposeError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::decode(&bytes)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Image bytes plus MIME type, as stored in a processed catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composited {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Apply `frame` to `payload`. `None` is the identity. Failures are logged
/// and return the payload unchanged.
pub fn apply_frame(payload: &[u8], mime_type: &str, frame: Option<&Frame>) -> Composited {
    let passthrough = || Composited {
        bytes: payload.to_vec(),
        mime_type: mime_type.to_string(),
    };
    let Some(frame) = frame else {
        return passthrough();
    };
    match composite(payload, frame) {
        Ok(bytes) => Composited {
            bytes,
            mime_type: "image/png".to_string(),
        },
        Err(e) => {
            tracing::warn!(error = %e, "frame not applied, keeping original image");
            passthrough()
        }
    }
}

/// Base at the origin, frame stretched to the base's size on top with
/// "over" blending, encoded as PNG.
pub fn composite(base: &[u8], frame: &Frame) -> Result<Vec<u8>, ComposeError> {
    let mut canvas = image::load_from_memory(base)
        .map_err(ComposeError::Decode)?
        .to_rgba8();
    let (width, height) = canvas.dimensions();
    let overlay = if frame.image.dimensions() == (width, height) {
        frame.image.clone()
    } else {
        imageops::resize(&frame.image, width, height, FilterType::Triangle)
    };
    imageops::overlay(&mut canvas, &overlay, 0, 0);

    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut out, ImageFormat::Png)
        .map_err(ComposeError::Encode)?;
    Ok(out.into_inner())
}
