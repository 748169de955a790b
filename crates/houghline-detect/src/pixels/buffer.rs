// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Row-major RGBA8 pixel buffer.
//
// One contiguous allocation with a row stride of `width * 4` bytes. Channel
// `c` of pixel `(x, y)` lives at `y * stride + x * 4 + c`
// (0 = R, 1 = G, 2 = B, 3 = A).

use houghline_core::error::{HoughError, Result};
use image::RgbaImage;

/// Bytes per pixel.
pub const CHANNELS: usize = 4;

/// An owned RGBA image, mutated in place by each pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    // -- Construction ---------------------------------------------------------

    /// A fully transparent black image.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * CHANNELS;
        Self {
            width,
            height,
            data: vec![0; len],
        }
    }

    /// An image where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        let data = rgba.iter().copied().cycle().take(pixels * CHANNELS).collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap raw interleaved RGBA bytes. The length must be `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(HoughError::InvalidArgument(format!(
                "RGBA buffer of {} bytes does not match {width}x{height} (expected {expected})",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Take ownership of an `image` crate buffer without copying.
    pub fn from_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Borrow row `y`, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.stride();
        Some(&self.data[start..start + self.stride()])
    }

    /// Read the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let offset = self.offset(x, y)?;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.data[offset..offset + CHANNELS]);
        Some(rgba)
    }

    /// Overwrite R, G and B of `(x, y)`, leaving alpha alone.
    /// Returns `false` when the pixel lies outside the image.
    pub fn set_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]) -> bool {
        match self.offset(x, y) {
            Some(offset) => {
                self.data[offset..offset + 3].copy_from_slice(&rgb);
                true
            }
            None => false,
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.stride() + x as usize * CHANNELS)
    }

    // -- Channel planes -------------------------------------------------------

    /// Split R, G and B into three row-major integer planes.
    pub fn rgb_planes(&self) -> [Vec<i32>; 3] {
        let pixels = self.pixel_count();
        let mut red = Vec::with_capacity(pixels);
        let mut green = Vec::with_capacity(pixels);
        let mut blue = Vec::with_capacity(pixels);
        for px in self.data.chunks_exact(CHANNELS) {
            red.push(px[0] as i32);
            green.push(px[1] as i32);
            blue.push(px[2] as i32);
        }
        [red, green, blue]
    }

    /// Write a single-channel plane into R, G and B of every pixel.
    ///
    /// Values are clamped to `0..=255`; alpha is untouched.
    pub fn apply_grey(&mut self, plane: &[i32]) -> Result<()> {
        if plane.len() != self.pixel_count() {
            return Err(HoughError::InvalidArgument(format!(
                "grey plane of {} values does not match {} pixels",
                plane.len(),
                self.pixel_count()
            )));
        }
        for (px, &value) in self.data.chunks_exact_mut(CHANNELS).zip(plane) {
            let v = value.clamp(0, 255) as u8;
            px[0] = v;
            px[1] = v;
            px[2] = v;
        }
        Ok(())
    }

    // -- Conversion -----------------------------------------------------------

    /// Hand the pixels to the `image` crate without copying.
    pub fn into_image(self) -> Result<RgbaImage> {
        let (width, height) = (self.width, self.height);
        RgbaImage::from_raw(width, height, self.data).ok_or_else(|| {
            HoughError::ImageError(format!("buffer does not fill a {width}x{height} image"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addressing_is_row_major() {
        let mut data = vec![0u8; 3 * 2 * 4];
        // pixel (2, 1): row 1 starts at 12, column 2 at +8
        data[12 + 8] = 10;
        data[12 + 8 + 3] = 99;
        let buffer = PixelBuffer::from_rgba(3, 2, data).unwrap();
        assert_eq!(buffer.pixel(2, 1), Some([10, 0, 0, 99]));
        assert_eq!(buffer.row(1).unwrap()[8], 10);
        assert_eq!(buffer.row(2), None);
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(matches!(
            PixelBuffer::from_rgba(2, 2, vec![0; 15]),
            Err(HoughError::InvalidArgument(_))
        ));
    }

    #[test]
    fn set_rgb_keeps_alpha() {
        let mut buffer = PixelBuffer::filled(4, 4, [1, 2, 3, 200]);
        assert!(buffer.set_rgb(3, 3, [0, 255, 0]));
        assert_eq!(buffer.pixel(3, 3), Some([0, 255, 0, 200]));
        assert!(!buffer.set_rgb(4, 0, [0, 255, 0]));
    }

    #[test]
    fn planes_then_grey_write_back() {
        let mut buffer = PixelBuffer::filled(2, 1, [10, 20, 30, 255]);
        let [r, g, b] = buffer.rgb_planes();
        assert_eq!(r, vec![10, 10]);
        assert_eq!(g, vec![20, 20]);
        assert_eq!(b, vec![30, 30]);

        buffer.apply_grey(&[-5, 400]).unwrap();
        assert_eq!(buffer.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(buffer.pixel(1, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn grey_plane_length_is_checked() {
        let mut buffer = PixelBuffer::new(3, 3);
        assert!(buffer.apply_grey(&[0; 8]).is_err());
    }

    #[test]
    fn image_conversion_keeps_bytes() {
        let buffer = PixelBuffer::filled(5, 2, [9, 8, 7, 6]);
        let bytes = buffer.as_bytes().to_vec();
        let image = buffer.into_image().unwrap();
        assert_eq!(image.dimensions(), (5, 2));
        assert_eq!(PixelBuffer::from_image(image).as_bytes(), bytes.as_slice());
    }
}
