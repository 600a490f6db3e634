//! Video encoding service
//!
//! The assembly pipeline talks to encoding through the narrow [`Encoder`]
//! trait: frames in, finished file out. Concatenation is implicit in the
//! frame order, and the trimmed audio track is bound by the backend.

pub mod ffmpeg;

use crate::audio::AudioTrack;
use crate::Result;
use std::path::Path;

/// Raw video frame in RGBA format
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// RGBA pixel data (width * height * 4 bytes)
    pub data: Vec<u8>,
}

/// Encoder configuration
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Frame width (must be even)
    pub width: u32,
    /// Frame height (must be even)
    pub height: u32,
    /// Frame rate (frames per second)
    pub fps: u32,
    /// Quality (0-100, where 100 is highest quality)
    pub quality: u8,
    /// Path to the ffmpeg executable, or None to search PATH
    pub ffmpeg_path: Option<String>,
}

/// Video encoder trait
///
/// Frames are written in presentation order; `finish` finalizes the output
/// file. Dropping an unfinished encoder must abandon the output rather
/// than leave a half-written file behind an open process.
pub trait Encoder: Send {
    /// Write one frame
    fn write_frame(&mut self, frame: &Frame) -> Result<()>;

    /// Finalize the output file
    fn finish(self: Box<Self>) -> Result<()>;
}

/// Create an encoder that binds `audio`, trimmed to `audio_trim_s` seconds,
/// to the frames written into it, and writes MP4 to `output_path`
pub fn create_encoder(
    config: EncoderConfig,
    audio: &AudioTrack,
    audio_trim_s: f64,
    output_path: &Path,
) -> Result<Box<dyn Encoder>> {
    Ok(Box::new(ffmpeg::FfmpegEncoder::new(
        config,
        audio,
        audio_trim_s,
        output_path,
    )?))
}
