//! Audio track handling
//!
//! The only capability the pipeline needs from audio is "how long is it"
//! and "trim it to the visual duration"; the trim itself happens inside the
//! ffmpeg encode, so this module just probes the duration up front.

use crate::encoder::ffmpeg::{find_ffmpeg, probe_path};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// One audio file with its probed duration
#[derive(Debug, Clone)]
pub struct AudioTrack {
    path: PathBuf,
    duration_s: f64,
}

impl AudioTrack {
    /// Probe an audio file's duration using ffprobe
    pub fn probe<P: AsRef<Path>>(path: P, ffmpeg_path: Option<&str>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::InvalidInput(format!(
                "Audio file not found: {}",
                path.display()
            )));
        }

        let ffmpeg = find_ffmpeg(ffmpeg_path)?;
        let ffprobe = probe_path(&ffmpeg);

        let output = Command::new(&ffprobe)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "csv=p=0",
            ])
            .arg(path)
            .output()
            .map_err(|e| Error::Ffmpeg(format!("Failed to run ffprobe: {}", e)))?;

        if !output.status.success() {
            return Err(Error::Decode(format!(
                "ffprobe failed for {}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let duration_s: f64 = text.trim().parse().map_err(|_| {
            Error::Decode(format!(
                "Failed to parse audio duration for {}: {:?}",
                path.display(),
                text.trim()
            ))
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            duration_s,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    /// Fail if the track cannot cover `required_s` seconds of video
    ///
    /// Trimming never loops or repeats audio, so a short track is an error
    /// rather than silently producing a video with a silent tail.
    pub fn ensure_covers(&self, required_s: f64) -> Result<()> {
        if self.duration_s < required_s {
            return Err(Error::AudioTooShort {
                audio_s: self.duration_s,
                required_s,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
impl AudioTrack {
    /// Build a track without probing; unit tests only
    pub(crate) fn for_tests(path: PathBuf, duration_s: f64) -> Self {
        Self { path, duration_s }
    }
}
