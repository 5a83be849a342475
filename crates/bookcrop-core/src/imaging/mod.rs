//! Image I/O capability consumed by the scan and the exporter.
//!
//! The core never touches codecs directly. It asks an [`ImageIo`]
//! implementation to read dimensions, decode and encode files;
//! [`FsImageIo`] is the filesystem implementation backed by the `image` crate.
//!
//! Inputs may be JPEG, PNG, TIFF or BMP. Every container can also be written,
//! though exports normally use JPEG or PNG.

mod buffer;
mod fs;
mod preview;

use std::path::Path;

pub use buffer::{PixelBuffer, WHITE};
pub use fs::FsImageIo;
pub use preview::{
    default_preview_scale, fit_within, preview_scale, render_default_preview, render_preview,
    Preview,
};

use crate::error::ImageIoError;

/// Image containers understood by the capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Tiff,
    Bmp,
}

impl ImageFormat {
    /// Format for a file extension (case-insensitive, without the dot).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "tif" | "tiff" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            _ => None,
        }
    }

    /// Format implied by a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Tiff => "tif",
            ImageFormat::Bmp => "bmp",
        }
    }

    /// Convert to the image crate's ImageFormat.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
        }
    }
}

/// Reads and writes image files.
pub trait ImageIo {
    /// Pixel dimensions of the image at `path`, without a full decode if possible.
    fn dimensions(&self, path: &Path) -> Result<(u32, u32), ImageIoError>;

    /// Decode the image at `path` to RGB.
    fn decode(&self, path: &Path) -> Result<PixelBuffer, ImageIoError>;

    /// Encode `image` to `path` in `format`. `jpeg_quality` applies to JPEG only.
    fn encode(
        &self,
        image: &PixelBuffer,
        path: &Path,
        format: ImageFormat,
        jpeg_quality: u8,
    ) -> Result<(), ImageIoError>;
}
