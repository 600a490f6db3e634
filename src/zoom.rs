//! Per-frame zoom transform
//!
//! Maps (source image, elapsed time) to a frame of the source's dimensions:
//! the source is scaled up linearly over time and center-cropped back, which
//! reads as a smooth zoom-in when played at a fixed frame rate.

use crate::image_loader::LoadedImage;

/// Linear zoom speed: scale factor grows by this much per second
pub const ZOOM_RATE: f64 = 0.2;

/// Time-indexed zoom view over one source image
///
/// Holds the source pixels and produces frames for arbitrary `t` in any
/// order; every call is independent of every other.
#[derive(Debug, Clone)]
pub struct ZoomTransform {
    source: LoadedImage,
}

impl ZoomTransform {
    pub fn new(source: LoadedImage) -> Self {
        Self { source }
    }

    pub fn width(&self) -> u32 {
        self.source.width
    }

    pub fn height(&self) -> u32 {
        self.source.height
    }

    /// Render the frame for elapsed time `t` (seconds)
    ///
    /// The output always has the source's dimensions. The caller is
    /// responsible for keeping `t` within the clip duration.
    pub fn frame_at(&self, t: f64) -> LoadedImage {
        let (w, h) = (self.source.width, self.source.height);

        let scale = 1.0 + ZOOM_RATE * t;
        let scaled_w = (w as f64 * scale) as u32;
        let scaled_h = (h as f64 * scale) as u32;

        // Truncation can land back on the source dimensions for small t;
        // resize and crop are both no-ops then.
        if scaled_w == w && scaled_h == h {
            return self.source.clone();
        }

        let resized = self.source.resize(scaled_w, scaled_h);

        // Center crop; integer division keeps the origin deterministic
        let x = (scaled_w - w) / 2;
        let y = (scaled_h - h) / 2;

        resized.crop(x, y, w, h)
    }
}
