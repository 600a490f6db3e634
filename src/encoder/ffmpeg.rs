//! H.264 + AAC encoder using an ffmpeg external process
//!
//! Raw RGBA frames are piped into ffmpeg's stdin; the audio file is a
//! second input trimmed with an input-side `-t`, so ffmpeg itself performs
//! the concatenated-video + trimmed-audio mux into the MP4 output.

use super::{Encoder, EncoderConfig, Frame};
use crate::audio::AudioTrack;
use crate::{Error, Result};
use std::io::Write;
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// FFmpeg-based H.264/AAC encoder
pub struct FfmpegEncoder {
    process: Child,
    config: EncoderConfig,
    frame_count: u64,
}

impl FfmpegEncoder {
    pub fn new(
        config: EncoderConfig,
        audio: &AudioTrack,
        audio_trim_s: f64,
        output_path: &Path,
    ) -> Result<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(Error::InvalidInput(
                "Encoder dimensions must be non-zero".to_string(),
            ));
        }
        if config.width % 2 != 0 || config.height % 2 != 0 {
            // yuv420p output requires even dimensions
            return Err(Error::InvalidInput(format!(
                "Encoder dimensions must be even, got {}x{}",
                config.width, config.height
            )));
        }
        if config.fps == 0 {
            return Err(Error::InvalidInput(
                "Encoder fps must be non-zero".to_string(),
            ));
        }

        let ffmpeg = find_ffmpeg(config.ffmpeg_path.as_deref())?;

        // Map quality (0-100) to CRF (51-0)
        let crf = ((100 - config.quality.min(100)) as u32 * 51) / 100;

        let process = Command::new(&ffmpeg)
            .args([
                "-y",
                "-f",
                "rawvideo",
                "-pix_fmt",
                "rgba",
                "-s",
                &format!("{}x{}", config.width, config.height),
                "-r",
                &config.fps.to_string(),
                "-i",
                "pipe:0",
                "-t",
                &format!("{:.6}", audio_trim_s),
                "-i",
            ])
            .arg(audio.path())
            .args([
                "-map",
                "0:v:0",
                "-map",
                "1:a:0",
                "-c:v",
                "libx264",
                "-preset",
                "medium",
                "-crf",
                &crf.to_string(),
                "-pix_fmt",
                "yuv420p",
                "-c:a",
                "aac",
            ])
            .arg(output_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Ffmpeg(format!("Failed to start ffmpeg: {}", e)))?;

        Ok(Self {
            process,
            config,
            frame_count: 0,
        })
    }
}

impl Encoder for FfmpegEncoder {
    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        let expected = (self.config.width * self.config.height * 4) as usize;
        if frame.data.len() != expected {
            return Err(Error::Encode(format!(
                "Frame {} has {} bytes, expected {} for {}x{}",
                self.frame_count,
                frame.data.len(),
                expected,
                self.config.width,
                self.config.height
            )));
        }

        let stdin = self
            .process
            .stdin
            .as_mut()
            .ok_or_else(|| Error::Ffmpeg("FFmpeg stdin not available".to_string()))?;

        stdin
            .write_all(&frame.data)
            .map_err(|e| Error::Ffmpeg(format!("Failed to write frame: {}", e)))?;

        self.frame_count += 1;
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<()> {
        // Close stdin to signal end of input
        drop(self.process.stdin.take());

        let status = self
            .process
            .wait()
            .map_err(|e| Error::Ffmpeg(format!("FFmpeg process error: {}", e)))?;

        if !status.success() {
            return Err(Error::Encode(format!(
                "FFmpeg exited with {} after {} frames",
                status, self.frame_count
            )));
        }

        Ok(())
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        // Kill the process if it's still running
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

/// Find ffmpeg executable
pub fn find_ffmpeg(custom_path: Option<&str>) -> Result<String> {
    if let Some(path) = custom_path {
        if std::path::Path::new(path).exists() {
            return Ok(path.to_string());
        }
        return Err(Error::Ffmpeg(format!("FFmpeg not found at: {}", path)));
    }

    // Try common paths
    let paths = [
        "ffmpeg",
        "/usr/bin/ffmpeg",
        "/usr/local/bin/ffmpeg",
        "/opt/homebrew/bin/ffmpeg",
    ];

    for path in paths {
        if Command::new(path)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
        {
            return Ok(path.to_string());
        }
    }

    Err(Error::Ffmpeg("FFmpeg not found in PATH".to_string()))
}

/// Derive the ffprobe path from the ffmpeg path
pub fn probe_path(ffmpeg: &str) -> String {
    if ffmpeg.ends_with("ffmpeg") {
        ffmpeg.replace("ffmpeg", "ffprobe")
    } else {
        "ffprobe".to_string()
    }
}

/// Check that ffmpeg with libx264 and aac support is available
pub fn check_available(ffmpeg_path: Option<&str>) -> Result<()> {
    let ffmpeg = find_ffmpeg(ffmpeg_path)?;

    let output = Command::new(&ffmpeg)
        .args(["-encoders"])
        .output()
        .map_err(|e| Error::Ffmpeg(format!("Failed to run ffmpeg: {}", e)))?;

    let encoders = String::from_utf8_lossy(&output.stdout);
    if !encoders.contains("libx264") {
        return Err(Error::Ffmpeg(
            "FFmpeg does not have libx264 support".to_string(),
        ));
    }
    if !encoders.contains("aac") {
        return Err(Error::Ffmpeg("FFmpeg does not have aac support".to_string()));
    }

    Ok(())
}
