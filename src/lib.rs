pub mod acquire;
pub mod detection;
pub mod models;
pub mod overlay;

pub use acquire::{AcquireError, ContentResolver, NoContentResolver, SourceUri};
pub use detection::{
    Category, ContourDetector, DetectionAdapter, DetectorOptions, ObjectDetector, RawDetection,
};
pub use models::{DetectionResult, PipelineState, RectF};
pub use overlay::render_overlay;
