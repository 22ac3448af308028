pub mod normalize;
pub mod orient;

use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;
use tracing::debug;

pub use normalize::{downsample_factor, normalize};
pub use orient::{orientation_degrees, rotate};

/// Failures while turning a picked image into an upright pixel buffer.
///
/// Bounds and decode failures simply yield no new image; callers keep
/// whatever they were showing before. Orientation problems never surface
/// here at all, they degrade to 0 degrees inside `orient`.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("failed to open image source: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not read image bounds")]
    Bounds,
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("picker uri does not resolve to a file path")]
    UnresolvedPath,
}

/// A picker-supplied image reference, split by scheme.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceUri {
    /// `content://...` reference, resolved through a `ContentResolver`.
    Content(String),
    /// `file://...` reference or a bare filesystem path.
    File(PathBuf),
    /// Any other scheme; resolves to no path.
    Other(String),
}

impl SourceUri {
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("content://") {
            SourceUri::Content(raw.to_string())
        } else if let Some(rest) = raw.strip_prefix("file://") {
            SourceUri::File(PathBuf::from(rest))
        } else if raw.contains("://") {
            SourceUri::Other(raw.to_string())
        } else {
            SourceUri::File(PathBuf::from(raw))
        }
    }
}

/// Maps a content reference to the backing file path, the way a platform
/// media store would. One metadata lookup, nothing more.
pub trait ContentResolver {
    fn data_path(&self, uri: &str) -> Option<PathBuf>;
}

/// Resolver for environments without a content provider; every content
/// lookup misses.
pub struct NoContentResolver;

impl ContentResolver for NoContentResolver {
    fn data_path(&self, _uri: &str) -> Option<PathBuf> {
        None
    }
}

/// Resolve a picker URI to a filesystem path, if its scheme allows one.
pub fn resolve_path(uri: &SourceUri, resolver: &dyn ContentResolver) -> Option<PathBuf> {
    match uri {
        SourceUri::Content(raw) => resolver.data_path(raw),
        SourceUri::File(path) => Some(path.clone()),
        SourceUri::Other(_) => None,
    }
}

/// Full acquisition: resolve the URI, decode within bounds, rotate upright.
pub fn acquire(uri: &SourceUri, resolver: &dyn ContentResolver) -> Result<RgbaImage, AcquireError> {
    let path = resolve_path(uri, resolver).ok_or(AcquireError::UnresolvedPath)?;
    acquire_from_path(&path)
}

/// Acquisition for an already-resolved file path.
pub fn acquire_from_path(path: &Path) -> Result<RgbaImage, AcquireError> {
    let image = normalize(path)?;
    let degrees = orientation_degrees(path);
    debug!(
        width = image.width(),
        height = image.height(),
        degrees,
        "acquired image"
    );
    if degrees == 0 {
        Ok(image)
    } else {
        Ok(rotate(&image, degrees))
    }
}
