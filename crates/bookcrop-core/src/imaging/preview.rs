//! Preview generation.
//!
//! The preview is the original image shrunk (never enlarged) to fit a bounding
//! box with its aspect ratio kept. The ratio `preview width / original width`
//! is the scale factor the geometry transforms expect.

use super::PixelBuffer;
use crate::config::PREVIEW_MAX_SIZE;

/// A preview image and the scale it was rendered at.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub image: PixelBuffer,
    pub scale: f64,
}

/// Dimensions of `width x height` shrunk to fit inside `max_width x max_height`.
///
/// Images that already fit are returned unchanged. Zero-sized input yields `(0, 0)`.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let ratio = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    let new_width = (width as f64 * ratio).round() as u32;
    let new_height = (height as f64 * ratio).round() as u32;
    (new_width.max(1), new_height.max(1))
}

/// Scale factor from original to preview pixels for an image of this size.
///
/// Returns 1.0 for zero-sized images so callers always get a usable factor.
pub fn preview_scale(width: u32, height: u32, max_width: u32, max_height: u32) -> f64 {
    let (preview_width, _) = fit_within(width, height, max_width, max_height);
    if width == 0 || preview_width == 0 {
        return 1.0;
    }
    preview_width as f64 / width as f64
}

/// [`preview_scale`] for the standard preview bounds.
pub fn default_preview_scale(width: u32, height: u32) -> f64 {
    let (max_width, max_height) = PREVIEW_MAX_SIZE;
    preview_scale(width, height, max_width, max_height)
}

/// Render a preview of `image` fitting inside `max_width x max_height`.
///
/// Returns `None` if the source buffer is empty or malformed.
pub fn render_preview(image: &PixelBuffer, max_width: u32, max_height: u32) -> Option<Preview> {
    if image.is_empty() || !image.is_consistent() {
        return None;
    }
    let (width, height) = fit_within(image.width, image.height, max_width, max_height);
    let scale = preview_scale(image.width, image.height, max_width, max_height);

    // Fast path: if dimensions match, just clone
    if width == image.width && height == image.height {
        return Some(Preview {
            image: image.clone(),
            scale,
        });
    }

    let rgb_image = image.to_rgb_image()?;
    let resized =
        image::imageops::resize(&rgb_image, width, height, image::imageops::FilterType::Lanczos3);

    Some(Preview {
        image: PixelBuffer::from_rgb_image(resized),
        scale,
    })
}

/// [`render_preview`] for the standard preview bounds.
pub fn render_default_preview(image: &PixelBuffer) -> Option<Preview> {
    let (max_width, max_height) = PREVIEW_MAX_SIZE;
    render_preview(image, max_width, max_height)
}
