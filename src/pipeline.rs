// THEORY:
// The `pipeline` module is the top-level API for the detection engine. It runs the
// two scan phases in order and packages their output into a single
// `DetectionResult`:
//
//   raster -> marker scan -> (per marker) payload scan -> DetectionResult
//
// The pipeline holds only configuration. Every call allocates its own masks, so
// one pipeline can serve any number of images, sequentially or from several
// threads at once.

use crate::core_modules::marker_scanner::marker_scanner::{MIN_MARKER_EXTENT, scan_markers};
use crate::core_modules::payload_scanner::payload_scanner::{MIN_PAYLOAD_EXTENT, scan_payloads};
use crate::core_modules::raster::raster::Raster;
use crate::error::VisionResult;
use serde::Serialize;

// Re-export key data structures for the public API.
pub use crate::core_modules::pixel::pixel::{ColorClass, Pixel};
pub use crate::core_modules::region::{ClassifiedPoint, PayloadClass, Point, Region};

/// Configuration for the detector, allowing for tunable size filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Marker components must be strictly wider and taller than this.
    pub min_marker_extent: u32,
    /// Payload components must be strictly wider and taller than this.
    pub min_payload_extent: u32,
    /// Upper bound on concurrent payload scans in the parallel pipeline.
    /// `None` uses one per logical CPU.
    pub workers: Option<usize>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_marker_extent: MIN_MARKER_EXTENT,
            min_payload_extent: MIN_PAYLOAD_EXTENT,
            workers: None,
        }
    }
}

impl DetectorConfig {
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get).max(1)
    }
}

/// The output of one detection run. Both lists are in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    pub markers: Vec<Region>,
    pub points: Vec<ClassifiedPoint>,
}

impl DetectionResult {
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.points.is_empty()
    }

    /// The points found inside the marker at `marker_index`.
    pub fn points_in(&self, marker_index: usize) -> impl Iterator<Item = &ClassifiedPoint> {
        self.points
            .iter()
            .filter(move |point| point.parent_marker_index == marker_index)
    }

    pub fn to_json(&self) -> VisionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The main, top-level struct for the detection engine.
#[derive(Debug, Clone, Default)]
pub struct DetectionPipeline {
    config: DetectorConfig,
}

impl DetectionPipeline {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn detect(&self, raster: &Raster) -> DetectionResult {
        if raster.is_empty() {
            log::debug!("empty raster, nothing to scan");
            return DetectionResult::default();
        }

        // Stage 1: Marker discovery over the whole image.
        let markers = scan_markers(raster, self.config.min_marker_extent);

        // Stage 2: Payload discovery inside each marker, one fresh mask per marker.
        let points = markers
            .iter()
            .enumerate()
            .flat_map(|(index, marker)| {
                scan_payloads(raster, marker, index, self.config.min_payload_extent)
            })
            .collect();

        let result = DetectionResult { markers, points };
        log::debug!(
            "detected {} markers, {} payload points",
            result.markers.len(),
            result.points.len()
        );
        result
    }
}

/// Runs the detector with the default thresholds.
pub fn detect(raster: &Raster) -> DetectionResult {
    DetectionPipeline::default().detect(raster)
}
