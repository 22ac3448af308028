pub mod contour;
pub mod detector;

use std::sync::Arc;

use image::RgbaImage;
use tokio::sync::{Semaphore, watch};
use tokio::task;
use tracing::{debug, warn};

use crate::models::{DetectionResult, PipelineState};

pub use contour::ContourDetector;
pub use detector::{Category, DetectorOptions, ObjectDetector, RawDetection};

/// Runs the detection capability off the interactive thread and publishes a
/// tri-state result to an observable slot.
///
/// Single writer; any number of subscribers read the latest snapshot through
/// a watch channel. At most one request is in flight at a time: a request
/// dispatched while another is running is dropped rather than racing it.
pub struct DetectionAdapter {
    detector: Arc<dyn ObjectDetector>,
    options: DetectorOptions,
    state: watch::Sender<PipelineState>,
    in_flight: Arc<Semaphore>,
}

impl DetectionAdapter {
    /// Adapter with the default options: at most one result, scores below
    /// 0.5 dropped.
    pub fn new(detector: Arc<dyn ObjectDetector>) -> Self {
        Self::with_options(detector, DetectorOptions::default())
    }

    pub fn with_options(detector: Arc<dyn ObjectDetector>, options: DetectorOptions) -> Self {
        let (state, _) = watch::channel(PipelineState::Loading);
        Self {
            detector,
            options,
            state,
            in_flight: Arc::new(Semaphore::new(1)),
        }
    }

    /// Observe the pipeline state. Receivers always see the latest published
    /// value and should treat each borrow as an immutable snapshot.
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn current_state(&self) -> PipelineState {
        self.state.borrow().clone()
    }

    /// Dispatch detection for `image`. Fire-and-forget: the outcome arrives
    /// only through the observable state, as Ok (possibly with zero items)
    /// or Error. Must be called from within a tokio runtime.
    pub fn calculate_image(&self, image: RgbaImage) {
        let Ok(permit) = Arc::clone(&self.in_flight).try_acquire_owned() else {
            warn!("detection request dropped: another request is in flight");
            return;
        };

        self.state.send_replace(PipelineState::Loading);

        let detector = Arc::clone(&self.detector);
        let options = self.options.clone();
        let state = self.state.clone();

        task::spawn_blocking(move || {
            let _permit = permit;
            let next = match detector.detect(&image, &options) {
                Ok(raw) => {
                    let items: Vec<DetectionResult> =
                        raw.into_iter().filter_map(to_display_result).collect();
                    debug!(count = items.len(), "detection finished");
                    PipelineState::Ok {
                        items,
                        remote: true,
                    }
                }
                Err(err) => {
                    warn!(error = %err, "detection failed");
                    PipelineState::Error {
                        message: err.to_string(),
                        fallback: None,
                    }
                }
            };
            state.send_replace(next);
        });
    }
}

/// Collapse a raw detection to its top category; regions without any
/// category are dropped.
fn to_display_result(raw: RawDetection) -> Option<DetectionResult> {
    let category = raw.categories.into_iter().next()?;
    Some(DetectionResult {
        bounding_box: raw.bounding_box,
        label: category.label,
        percentage: (category.score * 100.0).round() as u8,
    })
}
