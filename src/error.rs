use thiserror::Error;

/// A color specification that is neither `#RRGGBB`, `#AARRGGBB` nor a known name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown color: {input:?}")]
pub struct ColorParseError {
    pub input: String,
}

/// Errors that can occur while writing the composited image to disk
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cannot export an image with zero width or height")]
    EmptyImage,

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode export: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Export worker exited without reporting a result")]
    WorkerLost,
}

/// Result type for export operations
pub type ExportResult = Result<std::path::PathBuf, ExportError>;

/// Errors that can occur while loading a background image
#[derive(Debug, Error)]
pub enum BackgroundError {
    #[error("Surface has no size yet")]
    Unsized,

    #[error("Failed to read image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Background image has zero width or height")]
    EmptyImage,
}

/// Errors that can occur while flattening the surface into an image
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositeError {
    #[error("Surface of {width}x{height} pixels is too large to composite")]
    TooLarge { width: u32, height: u32 },
}

/// Errors that can occur while loading the application config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid color in config: {0}")]
    InvalidColor(#[from] ColorParseError),

    #[error("Brush size must be a positive number, got {0}")]
    InvalidBrushSize(f32),
}
