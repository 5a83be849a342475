//! Coordinate transforms between original image pixels and the scaled preview.
//!
//! # Coordinate System
//!
//! - Box positions are top-left offsets in original-image pixels
//! - Positions are signed and never clamped: a box may start left of or above
//!   the image, or lie entirely outside it
//! - Every box has the project-wide [`CropSize`]; boxes carry no size of their own
//! - The preview is a uniformly scaled copy of the original, so one scale
//!   factor (`preview width / original width`) applies to both axes
//!
//! All functions here are pure.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Top-left corner of a crop box in original-image pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoxPosition {
    pub x: i32,
    pub y: i32,
}

impl BoxPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset of this position relative to `anchor`. Exact for any two positions.
    pub fn offset_from(self, anchor: BoxPosition) -> Offset {
        Offset {
            dx: self.x as i64 - anchor.x as i64,
            dy: self.y as i64 - anchor.y as i64,
        }
    }

    /// This position moved by `offset`, clamped to the `i32` range.
    pub fn translate(self, offset: Offset) -> BoxPosition {
        BoxPosition {
            x: clamp_i32((self.x as i64).saturating_add(offset.dx)),
            y: clamp_i32((self.y as i64).saturating_add(offset.dy)),
        }
    }
}

/// A displacement in original-image pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    pub dx: i64,
    pub dy: i64,
}

/// The project-wide size of every exported crop box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropSize {
    pub width: u32,
    pub height: u32,
}

impl CropSize {
    /// Validate and build a crop size. Either side `<= 0` is rejected.
    pub fn new(width: i64, height: i64) -> Option<Self> {
        if width <= 0 || height <= 0 || width > u32::MAX as i64 || height > u32::MAX as i64 {
            return None;
        }
        Some(Self {
            width: width as u32,
            height: height as u32,
        })
    }
}

/// A crop box as drawn on the preview, in preview pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A box rectangle in original pixels, as reported after an interactive resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginalRect {
    pub position: BoxPosition,
    pub width: i64,
    pub height: i64,
}

/// An axis-aligned region inside the source image bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

fn check_scale(scale: f64) -> Result<f64, GeometryError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(GeometryError::InvalidScale(scale))
    }
}

fn round_to_i32(value: f64) -> i32 {
    value.round() as i32
}

/// Map a crop box from original pixels into preview pixels.
pub fn to_preview(
    position: BoxPosition,
    size: CropSize,
    scale: f64,
) -> Result<PreviewRect, GeometryError> {
    let scale = check_scale(scale)?;
    Ok(PreviewRect {
        x: position.x as f64 * scale,
        y: position.y as f64 * scale,
        width: size.width as f64 * scale,
        height: size.height as f64 * scale,
    })
}

/// Map a preview rectangle's top-left corner back to original pixels.
pub fn to_original(rect: &PreviewRect, scale: f64) -> Result<BoxPosition, GeometryError> {
    let scale = check_scale(scale)?;
    Ok(BoxPosition {
        x: round_to_i32(rect.x / scale),
        y: round_to_i32(rect.y / scale),
    })
}

/// Map a whole preview rectangle, size included, back to original pixels.
pub fn to_original_rect(rect: &PreviewRect, scale: f64) -> Result<OriginalRect, GeometryError> {
    let position = to_original(rect, scale)?;
    Ok(OriginalRect {
        position,
        width: (rect.width / scale).round() as i64,
        height: (rect.height / scale).round() as i64,
    })
}

/// Convert a pointer delta measured in preview pixels into original pixels.
pub fn delta_to_original(dx: f64, dy: f64, scale: f64) -> Result<Offset, GeometryError> {
    let scale = check_scale(scale)?;
    Ok(Offset {
        dx: (dx / scale).round() as i64,
        dy: (dy / scale).round() as i64,
    })
}

/// Overlap of a crop box with the source image `[0,0]-[width,height]`.
///
/// Returns `None` when the box and the image are disjoint. There is no limit
/// on how far outside the image the box may sit.
pub fn intersect(
    position: BoxPosition,
    size: CropSize,
    image_width: u32,
    image_height: u32,
) -> Option<Rect> {
    let left = (position.x as i64).max(0);
    let top = (position.y as i64).max(0);
    let right = (position.x as i64 + size.width as i64).min(image_width as i64);
    let bottom = (position.y as i64 + size.height as i64).min(image_height as i64);

    if left >= right || top >= bottom {
        return None;
    }

    Some(Rect {
        x: left as u32,
        y: top as u32,
        width: (right - left) as u32,
        height: (bottom - top) as u32,
    })
}

// Floor division keeps anchors stable for crops larger than the image.
fn floor_half(value: i64) -> i64 {
    value.div_euclid(2)
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Default position of a single-page box: centered on the image.
pub fn single_anchor(image_width: u32, image_height: u32, size: CropSize) -> BoxPosition {
    BoxPosition {
        x: clamp_i32(floor_half(image_width as i64 - size.width as i64)),
        y: clamp_i32(floor_half(image_height as i64 - size.height as i64)),
    }
}

/// Default positions of a spread's left and right boxes.
///
/// The boxes are centered on the quarter and three-quarter points and share
/// the vertically centered `y`.
pub fn double_anchors(
    image_width: u32,
    image_height: u32,
    size: CropSize,
) -> (BoxPosition, BoxPosition) {
    let half_crop = size.width as i64 / 2;
    let quarter = image_width as i64 / 4;
    let three_quarter = image_width as i64 * 3 / 4;
    let y = clamp_i32(floor_half(image_height as i64 - size.height as i64));

    (
        BoxPosition {
            x: clamp_i32(quarter - half_crop),
            y,
        },
        BoxPosition {
            x: clamp_i32(three_quarter - half_crop),
            y,
        },
    )
}


// ============================================================================
// Property-Based Tests
// ============================================================================
