//! Boundary-free cropping.
//!
//! A crop box may extend past the source image on any side, or miss it
//! entirely. The output always has exactly the crop size; any area not
//! covered by the source is white.

use crate::geometry::{intersect, BoxPosition, CropSize};
use crate::imaging::PixelBuffer;

/// Cut the box at `position` with `size` out of `source`, padding with white.
///
/// Returns `None` if a canvas of `size` cannot be allocated.
///
/// # Example
///
/// ```
/// use bookcrop_core::export::crop_with_padding;
/// use bookcrop_core::geometry::{BoxPosition, CropSize};
/// use bookcrop_core::imaging::PixelBuffer;
///
/// let source = PixelBuffer::filled(50, 10, [0, 0, 0]).unwrap();
/// let size = CropSize { width: 100, height: 10 };
/// let out = crop_with_padding(&source, BoxPosition::new(-10, 0), size).unwrap();
/// assert_eq!(out.pixel(5, 0), Some([255, 255, 255]));
/// assert_eq!(out.pixel(10, 0), Some([0, 0, 0]));
/// ```
pub fn crop_with_padding(
    source: &PixelBuffer,
    position: BoxPosition,
    size: CropSize,
) -> Option<PixelBuffer> {
    let mut canvas = PixelBuffer::white(size.width, size.height)?;

    if let Some(overlap) = intersect(position, size, source.width, source.height) {
        // The overlap starts at max(0, -x) / max(0, -y) inside the canvas.
        let dst_x = (overlap.x as i64 - position.x as i64) as u32;
        let dst_y = (overlap.y as i64 - position.y as i64) as u32;
        canvas.blit(source, overlap, dst_x, dst_y);
    }

    Some(canvas)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
