//! marker_vision CLI: detect green markers and their red/blue payload blobs in images.

use anyhow::Context;
use clap::Parser;
use marker_vision::annotator::annotate;
use marker_vision::{
    DetectionPipeline, DetectionResult, DetectorConfig, ParallelPipeline, Raster, load_raster,
    save,
};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "marker_vision")]
#[command(about = "Find green marker regions and the red/blue payload points inside them")]
#[command(version)]
struct Cli {
    /// Input images (jpg, jpeg, png or bmp).
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Directory to write annotated copies into (`<stem>_annotated.png`, with the
    /// input position appended when two inputs share a stem).
    #[arg(long)]
    annotate: Option<PathBuf>,

    /// Path to write the JSON report to. Printed to stdout when omitted.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Scan payloads of different markers concurrently.
    #[arg(long)]
    parallel: bool,

    /// Maximum concurrent scans with --parallel (default: logical CPU count).
    #[arg(long)]
    workers: Option<usize>,

    /// Markers must be strictly wider and taller than this many pixels.
    #[arg(long, default_value_t = DetectorConfig::default().min_marker_extent)]
    min_marker_extent: u32,

    /// Payload blobs must be strictly wider and taller than this many pixels.
    #[arg(long, default_value_t = DetectorConfig::default().min_payload_extent)]
    min_payload_extent: u32,
}

impl Cli {
    fn config(&self) -> DetectorConfig {
        DetectorConfig {
            min_marker_extent: self.min_marker_extent,
            min_payload_extent: self.min_payload_extent,
            workers: self.workers,
        }
    }
}

#[derive(Serialize)]
struct ImageReport<'a> {
    image: &'a Path,
    #[serde(flatten)]
    result: &'a DetectionResult,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.config();

    let rasters = cli
        .images
        .iter()
        .map(|path| {
            load_raster(path)
                .map(Arc::new)
                .with_context(|| format!("failed to load {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<Arc<Raster>>>>()?;

    let results = if cli.parallel {
        let pipeline = ParallelPipeline::new(config);
        log::info!("running parallel detection with {} workers", pipeline.workers());
        pipeline.detect_many(rasters.clone()).await?
    } else {
        let pipeline = DetectionPipeline::new(config);
        rasters.iter().map(|raster| pipeline.detect(raster)).collect()
    };

    let annotated = cli
        .annotate
        .as_deref()
        .map(|dir| annotated_paths(dir, &cli.images));

    for (index, ((path, raster), result)) in cli.images.iter().zip(&rasters).zip(&results).enumerate() {
        log::info!(
            "{}: {} markers, {} payload points",
            path.display(),
            result.markers.len(),
            result.points.len()
        );

        if let Some(outputs) = &annotated {
            let out = &outputs[index];
            save(out, &annotate(raster, result))
                .with_context(|| format!("failed to write {}", out.display()))?;
            log::info!("annotated image written to {}", out.display());
        }
    }

    let json = report_json(&cli.images, &results)?;

    match &cli.json {
        Some(out) => {
            std::fs::write(out, json).with_context(|| format!("failed to write {}", out.display()))?;
            log::info!("report written to {}", out.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn report_json(images: &[PathBuf], results: &[DetectionResult]) -> serde_json::Result<String> {
    let reports: Vec<ImageReport> = images
        .iter()
        .zip(results)
        .map(|(image, result)| ImageReport { image, result })
        .collect();
    serde_json::to_string_pretty(&reports)
}

fn file_stem(image: &Path) -> String {
    image
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

/// One output path per input. Inputs whose stems collide get their position appended.
fn annotated_paths(dir: &Path, images: &[PathBuf]) -> Vec<PathBuf> {
    let stems: Vec<String> = images.iter().map(|image| file_stem(image)).collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for stem in &stems {
        *counts.entry(stem.as_str()).or_default() += 1;
    }

    stems
        .iter()
        .enumerate()
        .map(|(index, stem)| {
            if counts[stem.as_str()] > 1 {
                dir.join(format!("{stem}_{index}_annotated.png"))
            } else {
                dir.join(format!("{stem}_annotated.png"))
            }
        })
        .collect()
}
