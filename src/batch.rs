//! Batch video generation
//!
//! Loops the combination sampler and the assembly pipeline until the
//! requested number of videos exists or the pool's combinatorial ceiling
//! is reached, collecting one record per finished file.

use crate::audio::AudioTrack;
use crate::clip::Clip;
use crate::encoder::ffmpeg;
use crate::image_loader::LoadedImage;
use crate::pipeline::VideoAssembly;
use crate::sampler::{Combination, CombinationSampler};
use crate::{BatchOptions, Error, FailurePolicy, Result};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Recognized image file extensions
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// One finished video and the combination that produced it
#[derive(Debug, Clone)]
pub struct OutputRecord {
    /// Path of the finalized output file
    pub path: PathBuf,
    /// The image combination rendered into the file
    pub combination: Combination,
}

/// Outcome of one batch run
#[derive(Debug)]
pub struct BatchReport {
    /// Records for every finished video, in production order
    pub records: Vec<OutputRecord>,
    /// Number of videos the caller asked for
    pub requested: usize,
    /// True when the pool's combinatorial ceiling ended the run early
    pub exhausted: bool,
    /// The most recent per-iteration failure, if any
    pub last_error: Option<Error>,
}

impl BatchReport {
    /// True when every requested video was produced
    pub fn complete(&self) -> bool {
        self.records.len() >= self.requested
    }
}

/// Generate a batch of videos per `options`
///
/// Fatal conditions (bad options, missing ffmpeg, too few images, an
/// unreadable audio file) are returned as `Err` before any video work
/// starts. Per-iteration failures are logged and handled according to
/// [`FailurePolicy`]; the report carries whatever records were produced
/// plus the last such failure.
pub fn generate_batch(options: &BatchOptions) -> Result<BatchReport> {
    options.validate()?;

    let pool = list_images(&options.image_dir)?;
    let mut sampler = CombinationSampler::new(pool, options.combination_size)?;

    let ffmpeg_path = options.ffmpeg_path.as_deref();
    ffmpeg::check_available(ffmpeg_path)?;

    let audio = AudioTrack::probe(&options.audio_path, ffmpeg_path)?;

    // The total visual duration is the same for every video; a track that
    // cannot cover it would fail every single combination, so reject it
    // before the loop rather than once per draw
    audio.ensure_covers(options.combination_size as f64 * options.clip_seconds)?;

    std::fs::create_dir_all(&options.output_dir)?;

    let planned = (options.target_count as u64).min(sampler.ceiling());
    info!(
        "generating up to {} videos from {} images ({} possible combinations)",
        planned,
        sampler.pool_len(),
        sampler.ceiling()
    );

    let mut rng = rand::thread_rng();
    let mut records: Vec<OutputRecord> = Vec::new();
    let mut last_error: Option<Error> = None;
    let mut exhausted = false;
    let mut sequence: u64 = 0;

    while records.len() < options.target_count {
        let Some(combination) = sampler.draw_unique(&mut rng) else {
            info!(
                "all {} combinations used, stopping after {} videos",
                sampler.ceiling(),
                records.len()
            );
            exhausted = true;
            break;
        };

        info!(
            "rendering video {}/{}: {}",
            records.len() + 1,
            planned,
            combination
        );

        sequence += 1;
        let output_path = next_output_path(&options.output_dir, sequence);

        match render_combination(&combination, &audio, &output_path, options) {
            Ok(()) => {
                info!("video finished: {}", output_path.display());
                records.push(OutputRecord {
                    path: output_path,
                    combination,
                });
            }
            Err(e) => {
                error!("failed to render {}: {}", combination, e);
                last_error = Some(e);

                match options.on_failure {
                    FailurePolicy::Abort => break,
                    FailurePolicy::Skip => {
                        warn!("skipping combination and continuing");
                        continue;
                    }
                }
            }
        }
    }

    Ok(BatchReport {
        records,
        requested: options.target_count,
        exhausted,
        last_error,
    })
}

/// Render one combination to `output_path`
///
/// Images are presented in the combination's canonical (sorted) order, and
/// all of them are normalized to the first image's even-floored dimensions
/// before the clips are built.
fn render_combination(
    combination: &Combination,
    audio: &AudioTrack,
    output_path: &Path,
    options: &BatchOptions,
) -> Result<()> {
    let mut images: Vec<(String, LoadedImage)> = Vec::with_capacity(combination.len());
    for name in combination.members() {
        let image = LoadedImage::from_path(options.image_dir.join(name))?;
        images.push((name.clone(), image));
    }

    let target_width = (images[0].1.width / 2) * 2;
    let target_height = (images[0].1.height / 2) * 2;

    let clips: Vec<Clip> = images
        .into_iter()
        .map(|(name, image)| {
            let image = image.resize(target_width, target_height);
            Clip::from_image(image, name, options.clip_seconds, options.fps)
        })
        .collect();

    let assembly = VideoAssembly::new(clips, audio)?;
    assembly.render(output_path, options.quality, options.ffmpeg_path.as_deref())
}

/// Scan a directory for image files
///
/// Returns the recognized filenames sorted for a deterministic pool order;
/// subdirectories are not descended into.
pub fn list_images(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(Error::InvalidInput(format!(
            "Image folder not found: {}",
            dir.display()
        )));
    }

    let mut names: Vec<String> = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let recognized = Path::new(&name)
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_lowercase();
                IMAGE_EXTENSIONS.contains(&ext.as_str())
            })
            .unwrap_or(false);

        if recognized {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// Output file path with a timestamp token plus a per-run sequence number
///
/// The sequence keeps paths distinct when two iterations finish within the
/// same millisecond.
fn next_output_path(output_dir: &Path, sequence: u64) -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);

    output_dir.join(format!("output_{}_{}.mp4", millis, sequence))
}
