// THEORY:
// This file is the main entry point for the `marker_vision` library crate.
// It exports the `DetectionPipeline` (and its async sibling `ParallelPipeline`)
// together with the data structures they produce as the high-level interface of
// the engine. The scan phases live in `core_modules` and are public so each one
// can be driven and tested in isolation.
//
// Data flows strictly downward:
//   pixels -> color class -> connected components -> marker boxes + payload points

pub mod annotator;
pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;

pub use core_modules::raster::raster::Raster;
pub use core_modules::utils::image_helper::image_helper::{load_raster, save};
pub use error::{VisionError, VisionResult};
pub use parallel_pipeline::ParallelPipeline;
pub use pipeline::{
    ClassifiedPoint, ColorClass, DetectionPipeline, DetectionResult, DetectorConfig,
    PayloadClass, Pixel, Point, Region, detect,
};
