//! Image loading utilities

use crate::{Error, Result};
use image::{DynamicImage, GenericImageView, ImageReader};
use std::path::Path;

/// Loaded image in RGBA format
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// RGBA pixel data
    pub data: Vec<u8>,
}

impl LoadedImage {
    /// Load an image from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let img = ImageReader::open(path).map_err(Error::Io)?.decode()?;

        Ok(Self::from_dynamic_image(img))
    }

    /// Create from a DynamicImage
    pub fn from_dynamic_image(img: DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();
        let data = rgba.into_raw();

        Self {
            width,
            height,
            data,
        }
    }

    /// Resize the image to exactly the given dimensions
    pub fn resize(&self, target_width: u32, target_height: u32) -> Self {
        if self.width == target_width && self.height == target_height {
            return self.clone();
        }

        let img = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .expect("Invalid image data");

        let dynamic = DynamicImage::ImageRgba8(img);
        let resized = dynamic.resize_exact(
            target_width,
            target_height,
            image::imageops::FilterType::Lanczos3,
        );

        Self::from_dynamic_image(resized)
    }

    /// Extract a rectangular region of the image
    ///
    /// The region must lie entirely within the image bounds.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Self {
        if x == 0 && y == 0 && width == self.width && height == self.height {
            return self.clone();
        }

        let img = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .expect("Invalid image data");

        let cropped = image::imageops::crop_imm(&img, x, y, width, height).to_image();

        Self {
            width,
            height,
            data: cropped.into_raw(),
        }
    }
}
