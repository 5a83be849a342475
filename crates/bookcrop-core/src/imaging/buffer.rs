//! RGB pixel buffers shared by the image I/O capability and the exporter.

use crate::geometry::Rect;

/// Value written to every channel of padding pixels.
pub const WHITE: [u8; 3] = [255, 255, 255];

/// A decoded image with RGB pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new PixelBuffer with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Byte length of an RGB buffer of this size, or `None` if it overflows `usize`.
    pub fn byte_len(width: u32, height: u32) -> Option<usize> {
        (width as usize).checked_mul(height as usize)?.checked_mul(3)
    }

    /// A buffer where every pixel is `rgb`.
    ///
    /// Returns `None` if the buffer is too large to allocate.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Option<Self> {
        let len = Self::byte_len(width, height)?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).ok()?;
        pixels.extend(rgb.iter().copied().cycle().take(len));
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// A solid white buffer, or `None` if it is too large to allocate.
    pub fn white(width: u32, height: u32) -> Option<Self> {
        Self::filled(width, height, WHITE)
    }

    /// Create a PixelBuffer from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// RGB value at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        match self.pixels.get(idx..idx + 3)? {
            &[r, g, b] => Some([r, g, b]),
            _ => None,
        }
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// True when the pixel data length matches the dimensions.
    pub fn is_consistent(&self) -> bool {
        Self::byte_len(self.width, self.height) == Some(self.pixels.len())
    }

    /// Copy `region` of `source` into this buffer with its top-left at `(dst_x, dst_y)`.
    ///
    /// Rows and columns that would land outside this buffer are skipped.
    /// Nothing is copied if either buffer's data does not match its dimensions.
    pub fn blit(&mut self, source: &PixelBuffer, region: Rect, dst_x: u32, dst_y: u32) {
        if !self.is_consistent() || !source.is_consistent() {
            return;
        }
        let region_right = (region.x as u64 + region.width as u64).min(source.width as u64);
        let region_bottom = (region.y as u64 + region.height as u64).min(source.height as u64);
        let copy_w = (region_right.saturating_sub(region.x as u64))
            .min((self.width as u64).saturating_sub(dst_x as u64)) as usize;
        let copy_h = (region_bottom.saturating_sub(region.y as u64))
            .min((self.height as u64).saturating_sub(dst_y as u64)) as usize;
        if copy_w == 0 || copy_h == 0 {
            return;
        }

        let src_stride = source.width as usize * 3;
        let dst_stride = self.width as usize * 3;

        // Copy pixel data row by row
        for row in 0..copy_h {
            let src_start = (region.y as usize + row) * src_stride + region.x as usize * 3;
            let dst_start = (dst_y as usize + row) * dst_stride + dst_x as usize * 3;
            self.pixels[dst_start..dst_start + copy_w * 3]
                .copy_from_slice(&source.pixels[src_start..src_start + copy_w * 3]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v); // R
                pixels.push(v); // G
                pixels.push(v); // B
            }
        }
        PixelBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_white_buffer() {
        let buf = PixelBuffer::white(4, 3).unwrap();
        assert_eq!(buf.pixels.len(), 36);
        assert!(buf.pixels.iter().all(|&p| p == 255));
        assert!(buf.is_consistent());
    }

    #[test]
    fn test_filled_buffer() {
        let buf = PixelBuffer::filled(2, 1, [1, 2, 3]).unwrap();
        assert_eq!(buf.pixels, vec![1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_oversized_buffer_is_refused() {
        assert_eq!(PixelBuffer::byte_len(u32::MAX, u32::MAX), None);
        assert!(PixelBuffer::white(u32::MAX, u32::MAX).is_none());
        assert_eq!(PixelBuffer::byte_len(4, 3), Some(36));
    }

    #[test]
    fn test_short_buffer_is_not_indexed() {
        let short = PixelBuffer {
            width: 10,
            height: 10,
            pixels: vec![7; 30],
        };
        assert!(!short.is_consistent());
        assert_eq!(short.pixel(0, 0), Some([7, 7, 7]));
        assert_eq!(short.pixel(5, 5), None);

        let mut dst = PixelBuffer::white(10, 10).unwrap();
        let region = Rect {
            x: 0,
            y: 0,
            width: 10,
            height: 10,
        };
        dst.blit(&short, region, 0, 0);
        assert!(dst.pixels.iter().all(|&p| p == 255));
    }

    #[test]
    fn test_pixel_lookup() {
        let img = test_image(10, 10);
        assert_eq!(img.pixel(3, 2), Some([23, 23, 23]));
        assert_eq!(img.pixel(10, 0), None);
    }

    #[test]
    fn test_blit_copies_region() {
        let src = test_image(10, 10);
        let mut dst = PixelBuffer::white(5, 5).unwrap();
        let region = Rect {
            x: 2,
            y: 3,
            width: 2,
            height: 2,
        };
        dst.blit(&src, region, 1, 1);

        assert_eq!(dst.pixel(0, 0), Some(WHITE));
        assert_eq!(dst.pixel(1, 1), Some([32, 32, 32]));
        assert_eq!(dst.pixel(2, 1), Some([33, 33, 33]));
        assert_eq!(dst.pixel(1, 2), Some([42, 42, 42]));
        assert_eq!(dst.pixel(3, 3), Some(WHITE));
    }

    #[test]
    fn test_blit_clips_to_destination() {
        let src = test_image(10, 10);
        let mut dst = PixelBuffer::white(3, 3).unwrap();
        let region = Rect {
            x: 0,
            y: 0,
            width: 10,
            height: 10,
        };
        dst.blit(&src, region, 2, 2);
        assert_eq!(dst.pixel(2, 2), Some([0, 0, 0]));
        assert_eq!(dst.pixel(1, 1), Some(WHITE));
    }

    #[test]
    fn test_rgb_image_roundtrip() {
        let img = test_image(4, 4);
        let rgb = img.to_rgb_image().unwrap();
        assert_eq!(PixelBuffer::from_rgb_image(rgb), img);
    }

    #[test]
    fn test_empty_buffer() {
        let img = PixelBuffer::new(0, 0, vec![]);
        assert!(img.is_empty());
    }
}
