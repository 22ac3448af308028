use std::collections::HashMap;

use anyhow::Result;
use image::{GrayImage, Luma, RgbaImage, imageops};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::region_labelling::{Connectivity, connected_components};
use tracing::debug;

use super::detector::{Category, DetectorOptions, ObjectDetector, RawDetection};
use crate::models::RectF;

/// A connected edge region with its bounding extent.
#[derive(Debug, Clone)]
struct Region {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    pixel_count: u32,
}

impl Region {
    fn bounding_box(&self) -> RectF {
        RectF::new(
            self.min_x as f32,
            self.min_y as f32,
            (self.max_x + 1) as f32,
            (self.max_y + 1) as f32,
        )
    }
}

/// Classical-CV detector: grayscale, blur, Canny edges, then connected
/// components grouped into candidate regions. Each region is scored by its
/// edge mass relative to the most prominent region, so the best candidate
/// always scores 1.0 and weak clutter falls under the score threshold.
///
/// This fills the detector seam for the demo binary and tests; anything
/// backed by a real model plugs in through the same trait.
pub struct ContourDetector {
    pub blur_sigma: f32,
    pub low_threshold: f32,
    pub high_threshold: f32,
    /// Regions with fewer edge pixels than this are discarded as noise.
    pub min_edge_pixels: u32,
    pub label: String,
}

impl Default for ContourDetector {
    fn default() -> Self {
        Self {
            blur_sigma: 1.5,
            low_threshold: 50.0,
            high_threshold: 100.0,
            min_edge_pixels: 32,
            label: "object".to_string(),
        }
    }
}

impl ContourDetector {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_regions(&self, edges: &GrayImage) -> Vec<Region> {
        let labeled = connected_components(edges, Connectivity::Eight, Luma([0]));

        let mut extents: HashMap<u32, Region> = HashMap::new();
        for (x, y, label) in labeled.enumerate_pixels() {
            let label_val = label[0];
            if label_val == 0 {
                continue; // background
            }

            extents
                .entry(label_val)
                .and_modify(|region| {
                    region.min_x = region.min_x.min(x);
                    region.min_y = region.min_y.min(y);
                    region.max_x = region.max_x.max(x);
                    region.max_y = region.max_y.max(y);
                    region.pixel_count += 1;
                })
                .or_insert(Region {
                    min_x: x,
                    min_y: y,
                    max_x: x,
                    max_y: y,
                    pixel_count: 1,
                });
        }

        extents
            .into_values()
            .filter(|region| region.pixel_count >= self.min_edge_pixels)
            .collect()
    }
}

impl ObjectDetector for ContourDetector {
    fn detect(&self, image: &RgbaImage, options: &DetectorOptions) -> Result<Vec<RawDetection>> {
        let gray = imageops::grayscale(image);
        let blurred = gaussian_blur_f32(&gray, self.blur_sigma);
        let edges = canny(&blurred, self.low_threshold, self.high_threshold);

        let mut regions = self.find_regions(&edges);
        debug!(count = regions.len(), "candidate regions");

        let Some(max_mass) = regions.iter().map(|r| r.pixel_count).max() else {
            return Ok(Vec::new());
        };

        regions.sort_by(|a, b| b.pixel_count.cmp(&a.pixel_count));

        let detections = regions
            .into_iter()
            .map(|region| {
                let score = region.pixel_count as f32 / max_mass as f32;
                RawDetection {
                    bounding_box: region.bounding_box(),
                    categories: vec![Category {
                        label: self.label.clone(),
                        score,
                    }],
                }
            })
            .filter(|detection| {
                detection
                    .categories
                    .first()
                    .is_some_and(|c| c.score >= options.score_threshold)
            })
            .take(options.max_results)
            .collect();

        Ok(detections)
    }
}
