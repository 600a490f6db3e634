//! Video assembly pipeline
//!
//! Concatenates a sequence of clips, binds the trimmed audio track and
//! encodes the result to one MP4 file. Clips are released on every exit
//! path, including encoding failures.

use crate::audio::AudioTrack;
use crate::clip::Clip;
use crate::encoder::{create_encoder, EncoderConfig};
use crate::{Error, Result};
use log::debug;
use std::path::Path;

/// The clips and audio of one video while it is being encoded
///
/// Owns all clip resources for the duration of the encode; `render`
/// consumes the assembly and releases every clip before returning,
/// regardless of whether encoding succeeded.
pub struct VideoAssembly<'a> {
    clips: Vec<Clip>,
    audio: &'a AudioTrack,
}

impl<'a> VideoAssembly<'a> {
    /// Bind an ordered clip sequence to an audio track
    ///
    /// All clips must share dimensions and frame rate, and the audio must
    /// cover the total visual duration; audio is trimmed, never looped, so
    /// a short track fails here before any output file is touched.
    pub fn new(clips: Vec<Clip>, audio: &'a AudioTrack) -> Result<Self> {
        if clips.is_empty() {
            return Err(Error::InvalidInput("No clips provided".to_string()));
        }

        let (width, height, fps) = (clips[0].width(), clips[0].height(), clips[0].fps());
        for clip in &clips[1..] {
            if clip.width() != width || clip.height() != height {
                return Err(Error::InvalidInput(format!(
                    "Clip '{}' is {}x{}, expected {}x{}",
                    clip.source_name(),
                    clip.width(),
                    clip.height(),
                    width,
                    height
                )));
            }
            if clip.fps() != fps {
                return Err(Error::InvalidInput(format!(
                    "Clip '{}' runs at {} fps, expected {}",
                    clip.source_name(),
                    clip.fps(),
                    fps
                )));
            }
        }

        let assembly = Self { clips, audio };
        audio.ensure_covers(assembly.total_duration_s())?;

        Ok(assembly)
    }

    /// Total visual duration in seconds
    pub fn total_duration_s(&self) -> f64 {
        self.clips.iter().map(Clip::duration_s).sum()
    }

    /// Encode the assembly to `output_path`
    ///
    /// Consumes the assembly; every clip is released before this returns,
    /// on the success and failure paths alike. An abandoned encode tears
    /// down its ffmpeg process when the encoder drops.
    pub fn render(mut self, output_path: &Path, quality: u8, ffmpeg_path: Option<&str>) -> Result<()> {
        let result = Self::encode_clips(&self.clips, self.audio, output_path, quality, ffmpeg_path);

        for clip in &mut self.clips {
            clip.close();
        }

        // A failed encode may have started writing the output; remove it so
        // the output directory only ever holds finalized files
        if result.is_err() {
            let _ = std::fs::remove_file(output_path);
        }

        result
    }

    fn encode_clips(
        clips: &[Clip],
        audio: &AudioTrack,
        output_path: &Path,
        quality: u8,
        ffmpeg_path: Option<&str>,
    ) -> Result<()> {
        let first = &clips[0];
        let total_s: f64 = clips.iter().map(Clip::duration_s).sum();

        let config = EncoderConfig {
            width: first.width(),
            height: first.height(),
            fps: first.fps(),
            quality,
            ffmpeg_path: ffmpeg_path.map(str::to_string),
        };

        let mut encoder = create_encoder(config, audio, total_s, output_path)?;

        for clip in clips {
            debug!(
                "encoding {} frames from '{}'",
                clip.frame_count(),
                clip.source_name()
            );

            let fps = clip.fps() as f64;
            for frame_index in 0..clip.frame_count() {
                // Frame times stay within [0, duration) by construction
                let t = frame_index as f64 / fps;
                let frame = clip.frame_at(t)?;
                encoder.write_frame(&frame)?;
            }
        }

        encoder.finish()
    }
}
