//! Filesystem image I/O backed by the `image` crate.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageReader};

use super::{ImageFormat, ImageIo, PixelBuffer};
use crate::error::ImageIoError;

/// Reads and writes images on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageIo;

fn decode_error(path: &Path, reason: impl ToString) -> ImageIoError {
    ImageIoError::Decode {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn encode_error(path: &Path, reason: impl ToString) -> ImageIoError {
    ImageIoError::Encode {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

impl ImageIo for FsImageIo {
    fn dimensions(&self, path: &Path) -> Result<(u32, u32), ImageIoError> {
        image::image_dimensions(path).map_err(|e| decode_error(path, e))
    }

    fn decode(&self, path: &Path) -> Result<PixelBuffer, ImageIoError> {
        let reader = ImageReader::open(path)
            .map_err(|e| decode_error(path, e))?
            .with_guessed_format()
            .map_err(|e| decode_error(path, e))?;

        let img = reader.decode().map_err(|e| decode_error(path, e))?;

        Ok(PixelBuffer::from_rgb_image(img.into_rgb8()))
    }

    fn encode(
        &self,
        image: &PixelBuffer,
        path: &Path,
        format: ImageFormat,
        jpeg_quality: u8,
    ) -> Result<(), ImageIoError> {
        // Validate dimensions
        if image.width == 0 || image.height == 0 {
            return Err(encode_error(
                path,
                format!(
                    "width ({}) and height ({}) must be non-zero",
                    image.width, image.height
                ),
            ));
        }

        // Validate pixel data length
        if !image.is_consistent() {
            return Err(encode_error(
                path,
                format!(
                    "expected {} bytes of pixel data, got {}",
                    image.width as usize * image.height as usize * 3,
                    image.pixels.len()
                ),
            ));
        }

        match format {
            ImageFormat::Jpeg => {
                let file = File::create(path).map_err(|e| encode_error(path, e))?;
                let mut writer = BufWriter::new(file);
                let quality = jpeg_quality.clamp(1, 100);
                let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
                encoder
                    .write_image(
                        &image.pixels,
                        image.width,
                        image.height,
                        ExtendedColorType::Rgb8,
                    )
                    .map_err(|e| encode_error(path, e))?;
                writer.flush().map_err(|e| encode_error(path, e))?;
            }
            other => {
                image::save_buffer_with_format(
                    path,
                    &image.pixels,
                    image.width,
                    image.height,
                    ExtendedColorType::Rgb8,
                    other.to_image_format(),
                )
                .map_err(|e| encode_error(path, e))?;
            }
        }

        log::debug!(
            "Wrote {}x{} {:?} to {}",
            image.width,
            image.height,
            format,
            path.display()
        );
        Ok(())
    }
}
