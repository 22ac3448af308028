use std::collections::HashMap;
use std::io::Cursor;
use std::path::PathBuf;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use tempfile::NamedTempFile;

use snapdetect::acquire::ContentResolver;

/// Uniform RGBA image.
pub fn solid_image(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// Dark image with one bright filled rectangle, the kind of high-contrast
/// shape the contour detector should pick up.
pub fn image_with_bright_rect(
    width: u32,
    height: u32,
    left: u32,
    top: u32,
    rect_w: u32,
    rect_h: u32,
) -> RgbaImage {
    let mut img = solid_image(width, height, [20, 20, 20, 255]);
    for y in top..(top + rect_h).min(height) {
        for x in left..(left + rect_w).min(width) {
            img.put_pixel(x, y, Rgba([235, 235, 235, 255]));
        }
    }
    img
}

/// Saves an image as a temp PNG file. The file is cleaned up on drop.
pub fn save_png(image: &RgbaImage) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    image
        .save_with_format(file.path(), ImageFormat::Png)
        .expect("Failed to save test image");
    file
}

/// Writes raw bytes to a temp file with the given suffix.
pub fn temp_file_with_bytes(suffix: &str, bytes: &[u8]) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    std::fs::write(file.path(), bytes).expect("Failed to write temp file");
    file
}

/// Minimal EXIF APP1 segment carrying just the Orientation tag.
pub fn exif_app1_segment(orientation: u16) -> Vec<u8> {
    let mut seg = vec![0xFF, 0xE1, 0x00, 0x22];
    seg.extend_from_slice(b"Exif\0\0");
    // TIFF header, little-endian, IFD0 at offset 8
    seg.extend_from_slice(&[0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00]);
    // one IFD entry: Orientation (0x0112), SHORT, count 1
    seg.extend_from_slice(&[0x01, 0x00]);
    seg.extend_from_slice(&[0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00]);
    seg.extend_from_slice(&orientation.to_le_bytes());
    seg.extend_from_slice(&[0x00, 0x00]);
    // no next IFD
    seg.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    seg
}

/// A decodable JPEG with an EXIF orientation tag spliced in after SOI.
pub fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([64, 128, 192]));
    let mut encoded = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Jpeg)
        .expect("Failed to encode test jpeg");

    let mut bytes = vec![0xFF, 0xD8];
    bytes.extend_from_slice(&exif_app1_segment(orientation));
    bytes.extend_from_slice(&encoded[2..]);
    bytes
}

/// Content resolver backed by a plain map, standing in for a media store.
pub struct MapResolver(pub HashMap<String, PathBuf>);

impl MapResolver {
    pub fn single(uri: &str, path: PathBuf) -> Self {
        let mut map = HashMap::new();
        map.insert(uri.to_string(), path);
        Self(map)
    }
}

impl ContentResolver for MapResolver {
    fn data_path(&self, uri: &str) -> Option<PathBuf> {
        self.0.get(uri).cloned()
    }
}
