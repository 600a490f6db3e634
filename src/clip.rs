//! Animated clip built from one still image

use crate::encoder::Frame;
use crate::image_loader::LoadedImage;
use crate::zoom::ZoomTransform;
use crate::{Error, Result};
use std::path::Path;

/// One still image wrapped as a fixed-duration, fixed-rate animated clip
///
/// Frames are produced on demand through the zoom transform; the clip holds
/// no per-frame state, so `frame_at` may be called for any time in any
/// order. The pixel buffer is held until [`Clip::close`] releases it.
#[derive(Debug)]
pub struct Clip {
    source_name: String,
    width: u32,
    height: u32,
    duration_s: f64,
    fps: u32,
    zoom: Option<ZoomTransform>,
}

impl Clip {
    /// Open an image file as a clip
    pub fn open<P: AsRef<Path>>(path: P, duration_s: f64, fps: u32) -> Result<Self> {
        let path = path.as_ref();
        let image = LoadedImage::from_path(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::from_image(image, name, duration_s, fps))
    }

    /// Wrap an already-loaded image as a clip
    ///
    /// Dimensions are floored to even values (required for video encoding);
    /// the source is cropped once so that the frame at time zero is still
    /// identical to the clip's own source pixels.
    pub fn from_image(image: LoadedImage, source_name: String, duration_s: f64, fps: u32) -> Self {
        let width = (image.width / 2) * 2;
        let height = (image.height / 2) * 2;

        let image = if width != image.width || height != image.height {
            image.crop(0, 0, width, height)
        } else {
            image
        };

        Self {
            source_name,
            width,
            height,
            duration_s,
            fps,
            zoom: Some(ZoomTransform::new(image)),
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Number of frames this clip contributes at its frame rate
    pub fn frame_count(&self) -> u64 {
        let count = (self.duration_s * self.fps as f64).round() as u64;
        count.max(1)
    }

    /// Render the frame for elapsed time `t` within `[0, duration)`
    pub fn frame_at(&self, t: f64) -> Result<Frame> {
        let zoom = self.zoom.as_ref().ok_or_else(|| {
            Error::InvalidInput(format!("Clip '{}' already released", self.source_name))
        })?;

        let image = zoom.frame_at(t);

        Ok(Frame {
            width: image.width,
            height: image.height,
            data: image.data,
        })
    }

    /// Release the underlying pixel buffer
    ///
    /// Independent of encoding; `frame_at` fails after this. Dropping the
    /// clip releases the buffer as well.
    pub fn close(&mut self) {
        self.zoom = None;
    }

    pub fn is_closed(&self) -> bool {
        self.zoom.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_image(width: u32, height: u32) -> LoadedImage {
        LoadedImage {
            width,
            height,
            data: vec![200u8; (width * height * 4) as usize],
        }
    }

    #[test]
    fn test_frame_count() {
        let clip = Clip::from_image(solid_image(64, 64), "a.png".to_string(), 2.0, 24);
        assert_eq!(clip.frame_count(), 48);
    }

    #[test]
    fn test_frame_count_at_least_one() {
        let clip = Clip::from_image(solid_image(64, 64), "a.png".to_string(), 0.001, 24);
        assert_eq!(clip.frame_count(), 1);
    }

    #[test]
    fn test_odd_dimensions_floored_to_even() {
        let clip = Clip::from_image(solid_image(65, 47), "a.png".to_string(), 2.0, 24);
        assert_eq!(clip.width(), 64);
        assert_eq!(clip.height(), 46);

        let frame = clip.frame_at(0.0).unwrap();
        assert_eq!(frame.width, 64);
        assert_eq!(frame.height, 46);
    }

    #[test]
    fn test_frame_after_close_fails() {
        let mut clip = Clip::from_image(solid_image(64, 64), "a.png".to_string(), 2.0, 24);
        assert!(clip.frame_at(0.5).is_ok());

        clip.close();
        assert!(clip.is_closed());
        assert!(clip.frame_at(0.5).is_err());
    }

    #[test]
    fn test_open_missing_file_fails() {
        let result = Clip::open("/nonexistent/image.png", 2.0, 24);
        assert!(result.is_err());
    }
}
