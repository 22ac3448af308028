use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::{RgbaImage, imageops};
use tracing::debug;

/// Read the EXIF Orientation tag for the file at `path`, as whole degrees.
///
/// Only the three pure-rotation tags are honored (3 -> 180, 6 -> 90,
/// 8 -> 270). Missing or unreadable metadata, mirrored orientations and any
/// I/O failure all degrade to 0 degrees; a photo shown un-rotated is better
/// than a photo not shown at all.
pub fn orientation_degrees(path: &Path) -> u32 {
    let Ok(file) = File::open(path) else {
        return 0;
    };
    let mut reader = BufReader::new(file);
    let Ok(exif) = exif::Reader::new().read_from_container(&mut reader) else {
        return 0;
    };

    let tag = exif
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0));

    let degrees = match tag {
        Some(3) => 180,
        Some(6) => 90,
        Some(8) => 270,
        _ => 0,
    };
    debug!(?tag, degrees, "read orientation metadata");
    degrees
}

/// Rotate a buffer about its center by a multiple of 90 degrees.
///
/// Always returns a fresh buffer; the source is untouched. Degrees outside
/// {90, 180, 270} return an identical copy.
pub fn rotate(image: &RgbaImage, degrees: u32) -> RgbaImage {
    match degrees {
        90 => imageops::rotate90(image),
        180 => imageops::rotate180(image),
        270 => imageops::rotate270(image),
        _ => image.clone(),
    }
}
