//! zoomreel - batch zoom-effect slideshow video generation
//!
//! Builds short videos from a pool of still images plus one audio track:
//! each video shows a fixed-size selection of images, every image animated
//! with a linear zoom-in, concatenated and bound to the audio trimmed to
//! the total visual duration. Image selections are pairwise distinct
//! across the outputs of one batch run.

pub mod audio;
pub mod batch;
pub mod clip;
pub mod encoder;
pub mod error;
pub mod image_loader;
pub mod pipeline;
pub mod sampler;
pub mod zoom;

pub use batch::{generate_batch, BatchReport, OutputRecord};
pub use error::{Error, Result};
pub use sampler::{combinations_count, Combination, CombinationSampler};

use std::path::PathBuf;

/// Default number of images per video
pub const DEFAULT_COMBINATION_SIZE: usize = 8;

/// Default duration of each image clip in seconds
pub const DEFAULT_CLIP_SECONDS: f64 = 2.0;

/// Default frame rate for generated videos
pub const DEFAULT_FPS: u32 = 24;

/// Default encode quality (0-100)
pub const DEFAULT_QUALITY: u8 = 70;

/// What to do when one video of a batch fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the whole batch at the first failed video
    Abort,
    /// Log the failure, discard that combination and continue
    Skip,
}

/// Options for a batch generation run
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Folder containing the image pool (.png, .jpg, .jpeg)
    pub image_dir: PathBuf,
    /// Audio file used for every video
    pub audio_path: PathBuf,
    /// Output folder, created if absent
    pub output_dir: PathBuf,
    /// Number of videos to generate; capped by the pool's combination count
    pub target_count: usize,
    /// Images per video
    pub combination_size: usize,
    /// Seconds each image is shown
    pub clip_seconds: f64,
    /// Frame rate of the generated videos
    pub fps: u32,
    /// Quality (0-100, where 100 is highest quality)
    pub quality: u8,
    /// Per-iteration failure handling
    pub on_failure: FailurePolicy,
    /// Path to the ffmpeg executable, or None to search PATH
    pub ffmpeg_path: Option<String>,
}

impl BatchOptions {
    /// Options with the default clip shape: 8 images, 2 seconds each, 24 fps
    pub fn new(
        image_dir: impl Into<PathBuf>,
        audio_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        target_count: usize,
    ) -> Self {
        Self {
            image_dir: image_dir.into(),
            audio_path: audio_path.into(),
            output_dir: output_dir.into(),
            target_count,
            combination_size: DEFAULT_COMBINATION_SIZE,
            clip_seconds: DEFAULT_CLIP_SECONDS,
            fps: DEFAULT_FPS,
            quality: DEFAULT_QUALITY,
            on_failure: FailurePolicy::Abort,
            ffmpeg_path: None,
        }
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.combination_size == 0 {
            return Err(Error::InvalidInput(
                "Combination size must be at least 1".to_string(),
            ));
        }
        if self.clip_seconds <= 0.0 {
            return Err(Error::InvalidInput(
                "Clip duration must be positive".to_string(),
            ));
        }
        if self.fps == 0 {
            return Err(Error::InvalidInput("Frame rate must be non-zero".to_string()));
        }
        Ok(())
    }
}
