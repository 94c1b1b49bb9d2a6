//! Decoding files into [`Image`]s.

use std::path::Path;

use image::{DynamicImage, ImageReader};
use janice_core::{Image, JaniceError, Result};

/// Decode the file at `path`, keeping its channel layout.
///
/// Missing or unreadable files are `OpenError`; content that does not decode
/// is `ReadError`.
pub fn decode_file(path: &Path) -> Result<Image> {
    let reader = ImageReader::open(path).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "cannot open media");
        JaniceError::OpenError
    })?;

    let reader = reader.with_guessed_format().map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "cannot read media header");
        JaniceError::ReadError
    })?;

    let decoded = reader.decode().map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "cannot decode media");
        JaniceError::ReadError
    })?;

    Ok(to_janice_image(decoded))
}

/// Convert to an 8-bit interleaved [`Image`].
///
/// Gray stays 1 channel, color stays 3, anything with alpha becomes 4.
/// Deeper sample types are reduced to 8 bits.
pub fn to_janice_image(img: DynamicImage) -> Image {
    let color = img.color();
    let (cols, rows) = (img.width(), img.height());

    let (channels, data) = if color.has_alpha() {
        (4, img.into_rgba8().into_raw())
    } else if color.channel_count() == 1 {
        (1, img.into_luma8().into_raw())
    } else {
        (3, img.into_rgb8().into_raw())
    };

    Image {
        channels,
        rows,
        cols,
        data,
    }
}
