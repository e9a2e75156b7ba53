use std::path::PathBuf;

/// Errors returned by the loading, reporting, and async detection paths.
/// The scanners themselves are total and never fail.
#[derive(thiserror::Error, Debug)]
pub enum VisionError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("unsupported image format: {path} (expected jpg, jpeg, png or bmp)")]
    UnsupportedFormat { path: PathBuf },
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
    #[error("detection worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
    #[error("scan permits closed")]
    PermitsClosed(#[from] tokio::sync::AcquireError),
}

pub type VisionResult<T> = Result<T, VisionError>;
