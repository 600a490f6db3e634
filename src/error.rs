//! Error types for zoomreel

use thiserror::Error;

/// Result type alias for zoomreel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for zoomreel operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Image pool is too small to draw a combination from
    #[error("Found {found} images, at least {required} are required")]
    InsufficientImages { found: usize, required: usize },

    /// Audio track is shorter than the total visual duration
    #[error("Audio is {audio_s:.2}s but {required_s:.2}s are required")]
    AudioTooShort { audio_s: f64, required_s: f64 },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Decoding error
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Encoding error
    #[error("Encoding error: {0}")]
    Encode(String),

    /// FFmpeg process error
    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),
}
