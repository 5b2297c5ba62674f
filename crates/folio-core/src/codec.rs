//! Decode downloaded page bytes and re-encode them in the requested raster format.

use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use thiserror::Error;

/// Output raster format chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Tiff,
    Png,
}

impl OutputFormat {
    /// Pick the format from the CLI flags. TIFF wins if both are set.
    pub fn from_flags(tif: bool, png: bool) -> Self {
        if tif {
            OutputFormat::Tiff
        } else if png {
            OutputFormat::Png
        } else {
            OutputFormat::Jpeg
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Tiff => "tif",
            OutputFormat::Png => "png",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Tiff => ImageFormat::Tiff,
            OutputFormat::Png => ImageFormat::Png,
        }
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("could not decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("could not encode image as {format:?}: {source}")]
    Encode {
        format: OutputFormat,
        #[source]
        source: image::ImageError,
    },
}

pub fn decode(bytes: &[u8]) -> Result<DynamicImage, CodecError> {
    image::load_from_memory(bytes).map_err(CodecError::Decode)
}

/// Encode `img` into an in-memory buffer in `format`.
///
/// JPEG only carries 8-bit gray or RGB, so anything else is converted to RGB8
/// first. TIFF and PNG keep the decoded pixels unchanged.
pub fn encode(img: &DynamicImage, format: OutputFormat) -> Result<Vec<u8>, CodecError> {
    let mut buf = Cursor::new(Vec::new());
    let result = match (format, img) {
        (OutputFormat::Jpeg, DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_)) => {
            img.write_to(&mut buf, format.image_format())
        }
        (OutputFormat::Jpeg, _) => {
            DynamicImage::ImageRgb8(img.to_rgb8()).write_to(&mut buf, format.image_format())
        }
        _ => img.write_to(&mut buf, format.image_format()),
    };
    result.map_err(|source| CodecError::Encode { format, source })?;
    Ok(buf.into_inner())
}

/// Decode `bytes` and re-encode them in `format`.
pub fn transcode(bytes: &[u8], format: OutputFormat) -> Result<Vec<u8>, CodecError> {
    let img = decode(bytes)?;
    tracing::debug!(
        width = img.width(),
        height = img.height(),
        ?format,
        "transcoding page"
    );
    encode(&img, format)
}
