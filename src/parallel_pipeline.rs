// THEORY:
// The `ParallelPipeline` produces exactly the same `DetectionResult` as the
// sequential `DetectionPipeline`, but fans the payload phase out across a bounded
// pool of tokio blocking tasks.
//
// The marker phase stays a single task: it owns one whole-image mask. Payload
// scans are independent by construction (each reads the shared raster and writes
// only its own fresh mask), so they can run in any order. `buffered` keeps the
// completed scans in submission order, which keeps marker indices and point order
// identical to the sequential run.
//
// Every blocking scan, marker or payload, holds a permit from one semaphore owned
// by the pipeline, so no more than `workers` scans run at once no matter how many
// rasters are in flight.

use crate::core_modules::marker_scanner::marker_scanner::scan_markers;
use crate::core_modules::payload_scanner::payload_scanner::scan_payloads;
use crate::core_modules::raster::raster::Raster;
use crate::core_modules::region::ClassifiedPoint;
use crate::error::VisionResult;
use crate::pipeline::{DetectionResult, DetectorConfig};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;

pub struct ParallelPipeline {
    config: DetectorConfig,
    workers: usize,
    /// One permit per blocking scan, shared by every `detect` call on this pipeline.
    permits: Arc<Semaphore>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl ParallelPipeline {
    pub fn new(config: DetectorConfig) -> Self {
        let workers = config.worker_count();
        Self {
            config,
            workers,
            permits: Arc::new(Semaphore::new(workers)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Highest number of scans that ran at the same time since construction.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Runs `scan` on the blocking pool once a permit is free.
    async fn run_blocking<T, F>(&self, scan: F) -> VisionResult<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = Arc::clone(&self.permits).acquire_owned().await?;
        let in_flight = Arc::clone(&self.in_flight);
        let peak_in_flight = Arc::clone(&self.peak_in_flight);

        let output = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak_in_flight.fetch_max(now, Ordering::SeqCst);
            let output = scan();
            in_flight.fetch_sub(1, Ordering::SeqCst);
            output
        })
        .await?;
        Ok(output)
    }

    pub async fn detect(&self, raster: Arc<Raster>) -> VisionResult<DetectionResult> {
        if raster.is_empty() {
            return Ok(DetectionResult::default());
        }

        let min_marker_extent = self.config.min_marker_extent;
        let marker_raster = Arc::clone(&raster);
        let markers = self
            .run_blocking(move || scan_markers(&marker_raster, min_marker_extent))
            .await?;

        let min_payload_extent = self.config.min_payload_extent;
        let per_marker: Vec<Vec<ClassifiedPoint>> =
            stream::iter(markers.iter().copied().enumerate())
                .map(|(index, marker)| {
                    let raster = Arc::clone(&raster);
                    self.run_blocking(move || {
                        scan_payloads(&raster, &marker, index, min_payload_extent)
                    })
                })
                .buffered(self.workers)
                .try_collect()
                .await?;

        let points: Vec<ClassifiedPoint> = per_marker.into_iter().flatten().collect();
        log::debug!(
            "parallel detection ({} workers): {} markers, {} payload points",
            self.workers,
            markers.len(),
            points.len()
        );
        Ok(DetectionResult { markers, points })
    }

    /// Detects several rasters. Results keep input order; the scan bound is shared
    /// across all of them.
    pub async fn detect_many(&self, rasters: Vec<Arc<Raster>>) -> VisionResult<Vec<DetectionResult>> {
        stream::iter(rasters)
            .map(|raster| self.detect(raster))
            .buffered(self.workers)
            .try_collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{DetectionPipeline, Pixel};

    fn scene() -> Raster {
        let mut raster = Raster::filled(120, 80, Pixel::rgb(0, 0, 0));
        for (i, x) in [0u32, 40, 80].into_iter().enumerate() {
            raster.fill_rect(x, 0, 36, 36, Pixel::rgb(0, 255, 0));
            raster.fill_rect(x + 2, 2, 12, 12, Pixel::rgb(255, 0, 0));
            if i != 1 {
                raster.fill_rect(x + 18, 18, 14, 14, Pixel::rgb(0, 0, 255));
            }
        }
        raster.fill_rect(10, 50, 30, 25, Pixel::rgb(0, 255, 0));
        raster
    }

    #[tokio::test]
    async fn matches_sequential_pipeline() {
        let raster = scene();
        let expected = DetectionPipeline::default().detect(&raster);

        let parallel = ParallelPipeline::new(DetectorConfig {
            workers: Some(3),
            ..DetectorConfig::default()
        });
        let result = parallel.detect(Arc::new(raster)).await.expect("workers succeed");

        assert_eq!(result, expected);
        assert_eq!(result.markers.len(), 4);
        assert_eq!(result.points.len(), 5);
    }

    #[tokio::test]
    async fn single_worker_still_preserves_order() {
        let raster = Arc::new(scene());
        let parallel = ParallelPipeline::new(DetectorConfig {
            workers: Some(1),
            ..DetectorConfig::default()
        });
        let result = parallel.detect(Arc::clone(&raster)).await.expect("workers succeed");
        let indices: Vec<_> = result.points.iter().map(|p| p.parent_marker_index).collect();
        let mut sorted = indices.clone();
        sorted.sort();
        assert_eq!(indices, sorted);
    }

    #[tokio::test]
    async fn empty_raster_is_empty_result() {
        let parallel = ParallelPipeline::new(DetectorConfig::default());
        let result = parallel
            .detect(Arc::new(Raster::filled(0, 0, Pixel::default())))
            .await
            .expect("no work");
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn batch_keeps_input_order() {
        let parallel = ParallelPipeline::new(DetectorConfig {
            workers: Some(2),
            ..DetectorConfig::default()
        });
        let rasters = vec![
            Arc::new(scene()),
            Arc::new(Raster::filled(10, 10, Pixel::rgb(0, 0, 0))),
            Arc::new(scene()),
        ];
        let results = parallel.detect_many(rasters).await.expect("workers succeed");
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], results[2]);
        assert!(results[1].is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn batch_never_exceeds_worker_bound() {
        let parallel = ParallelPipeline::new(DetectorConfig {
            workers: Some(2),
            ..DetectorConfig::default()
        });
        let rasters: Vec<_> = (0..6).map(|_| Arc::new(scene())).collect();

        let results = parallel.detect_many(rasters).await.expect("workers succeed");

        assert_eq!(results.len(), 6);
        assert!(parallel.peak_in_flight() >= 1);
        assert!(
            parallel.peak_in_flight() <= 2,
            "peak in flight {} exceeds 2 workers",
            parallel.peak_in_flight()
        );
    }

    #[tokio::test]
    async fn single_worker_runs_scans_one_at_a_time() {
        let parallel = ParallelPipeline::new(DetectorConfig {
            workers: Some(1),
            ..DetectorConfig::default()
        });
        let rasters = vec![Arc::new(scene()), Arc::new(scene())];
        parallel.detect_many(rasters).await.expect("workers succeed");
        assert_eq!(parallel.peak_in_flight(), 1);
    }
}
