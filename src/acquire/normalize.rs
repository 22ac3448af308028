use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::imageops::FilterType;
use image::{ImageReader, RgbaImage, imageops};
use tracing::debug;

use super::AcquireError;

/// Decoded buffers are kept within roughly this envelope.
const MAX_WIDTH: u32 = 720;
const MAX_HEIGHT: u32 = 1280;

/// Integer divisor applied to both dimensions so decoded buffers stay bounded.
///
/// Landscape images are bounded by width, portrait images by height; square
/// images and anything already inside the envelope pass through at factor 1.
pub fn downsample_factor(width: u32, height: u32) -> u32 {
    let factor = if width > height && width > MAX_WIDTH {
        width / MAX_WIDTH
    } else if height > width && height > MAX_HEIGHT {
        height / MAX_HEIGHT
    } else {
        1
    };
    factor.max(1)
}

/// Decode the image at `path` into a bounded RGBA buffer.
///
/// Two passes over the file: the first reads only the header dimensions, the
/// second decodes pixels and downsamples by the computed factor. Each pass
/// opens its own scoped handle so a failure mid-decode cannot leak one.
pub fn normalize(path: &Path) -> Result<RgbaImage, AcquireError> {
    let (width, height) = {
        let file = File::open(path)?;
        let reader = ImageReader::new(BufReader::new(file)).with_guessed_format()?;
        reader
            .into_dimensions()
            .map_err(|_| AcquireError::Bounds)?
    };

    let factor = downsample_factor(width, height);
    debug!(width, height, factor, "decoding image");

    let decoded = {
        let file = File::open(path)?;
        let reader = ImageReader::new(BufReader::new(file)).with_guessed_format()?;
        reader.decode()?
    };

    let buffer = decoded.to_rgba8();
    if factor > 1 {
        Ok(imageops::resize(
            &buffer,
            width / factor,
            height / factor,
            FilterType::Triangle,
        ))
    } else {
        Ok(buffer)
    }
}
