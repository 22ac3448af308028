use anyhow::Result;
use image::RgbaImage;

use crate::models::RectF;

/// Knobs exposed by the detection capability.
#[derive(Debug, Clone)]
pub struct DetectorOptions {
    /// Upper bound on returned detections, best first.
    pub max_results: usize,
    /// Minimum score in [0, 1] for a detection to be reported.
    pub score_threshold: f32,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            max_results: 1,
            score_threshold: 0.5,
        }
    }
}

/// One candidate classification of a detected region.
#[derive(Debug, Clone)]
pub struct Category {
    pub label: String,
    pub score: f32,
}

/// Raw detector output: a located region with its candidate categories,
/// ordered best first.
#[derive(Debug, Clone)]
pub struct RawDetection {
    pub bounding_box: RectF,
    pub categories: Vec<Category>,
}

/// The object-detection capability the pipeline runs against.
///
/// Implementations are expected to honor both options: filter out anything
/// below `score_threshold` and return at most `max_results` detections.
/// Inference may be CPU-heavy; the adapter always calls this off the
/// interactive thread.
pub trait ObjectDetector: Send + Sync {
    fn detect(&self, image: &RgbaImage, options: &DetectorOptions) -> Result<Vec<RawDetection>>;
}
