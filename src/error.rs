#[derive(Debug, thiserror::Error)]
pub enum CropperError {
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("zoom_clearance must be a positive number, got {0}")]
    ZoomClearance(f64),

    #[error("surface has zero width or height")]
    EmptySurface,
}

pub type Result<T> = std::result::Result<T, CropperError>;
