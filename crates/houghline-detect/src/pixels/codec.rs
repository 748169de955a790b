// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image codec: decode any format the `image` crate reads into an RGBA8
// `PixelBuffer`, encode a `PixelBuffer` back out as 8-bit RGBA PNG.

use std::io::{BufWriter, Write};
use std::path::Path;

use houghline_core::error::{HoughError, Result};
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageEncoder, ImageResult};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use super::buffer::PixelBuffer;

/// Load an image file as RGBA8.
///
/// Palette, 16-bit, grey and grey+alpha inputs are all normalized to 8-bit
/// RGBA; inputs without alpha get an opaque alpha channel.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn decode(path: impl AsRef<Path>) -> Result<PixelBuffer> {
    let path = path.as_ref();
    to_pixel_buffer(image::open(path), &path.display().to_string())
}

/// Decode raw encoded bytes (PNG, JPEG, etc.) as RGBA8.
pub fn decode_bytes(data: &[u8]) -> Result<PixelBuffer> {
    to_pixel_buffer(image::load_from_memory(data), "in-memory image")
}

fn to_pixel_buffer(decoded: ImageResult<DynamicImage>, source: &str) -> Result<PixelBuffer> {
    let img =
        decoded.map_err(|err| HoughError::ImageError(format!("cannot decode {source}: {err}")))?;
    debug!(
        source,
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "Image decoded"
    );
    Ok(PixelBuffer::from_image(img.to_rgba8()))
}

/// Write `buffer` to `path` as an 8-bit RGBA PNG.
///
/// The PNG is staged in a temporary file beside `path` and renamed into
/// place, so a failed write leaves any existing file untouched.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn encode(path: impl AsRef<Path>, buffer: &PixelBuffer) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(&mut staged);
        write_png(&mut writer, buffer)?;
        writer.flush()?;
    }
    staged.persist(path).map_err(|err| HoughError::Io(err.error))?;

    info!(
        width = buffer.width(),
        height = buffer.height(),
        "Image written"
    );
    Ok(())
}

/// Encode `buffer` as PNG bytes.
pub fn encode_png_bytes(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write_png(&mut bytes, buffer)?;
    Ok(bytes)
}

fn write_png<W: Write>(writer: W, buffer: &PixelBuffer) -> Result<()> {
    PngEncoder::new(writer)
        .write_image(
            buffer.as_bytes(),
            buffer.width(),
            buffer.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|err| HoughError::ImageError(format!("PNG encoding failed: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma, Rgb};

    #[test]
    fn png_bytes_decode_to_the_same_pixels() {
        let mut buffer = PixelBuffer::filled(6, 4, [12, 34, 56, 255]);
        buffer.set_rgb(5, 3, [0, 255, 0]);
        let png = encode_png_bytes(&buffer).unwrap();
        assert_eq!(decode_bytes(&png).unwrap(), buffer);
    }

    #[test]
    fn grey_input_becomes_opaque_rgba() {
        let grey = GrayImage::from_pixel(3, 2, Luma([77u8]));
        let mut png = Vec::new();
        grey.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let buffer = decode_bytes(&png).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (3, 2));
        assert_eq!(buffer.pixel(2, 1), Some([77, 77, 77, 255]));
    }

    #[test]
    fn garbage_is_an_image_error() {
        assert!(matches!(
            decode_bytes(b"not an image"),
            Err(HoughError::ImageError(_))
        ));
    }

    #[test]
    fn file_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overlay.png");
        let buffer = PixelBuffer::filled(8, 8, [200, 10, 10, 255]);
        encode(&path, &buffer).unwrap();
        assert_eq!(decode(&path).unwrap(), buffer);
    }

    #[test]
    fn sixteen_bit_input_is_scaled_to_eight() {
        let wide = ImageBuffer::<Rgb<u16>, Vec<u16>>::from_pixel(2, 2, Rgb([65535, 0, 32896]));
        let mut png = Vec::new();
        wide.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let buffer = decode_bytes(&png).unwrap();
        assert_eq!(buffer.pixel(1, 1), Some([255, 0, 128, 255]));
    }

    #[test]
    fn failed_encode_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        // A PNG cannot have zero width.
        let result = encode(&path, &PixelBuffer::new(0, 4));
        assert!(matches!(result, Err(HoughError::ImageError(_))));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_encode_keeps_the_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let previous = PixelBuffer::filled(3, 3, [9, 9, 9, 255]);
        encode(&path, &previous).unwrap();

        assert!(encode(&path, &PixelBuffer::new(0, 4)).is_err());
        assert_eq!(decode(&path).unwrap(), previous);
    }

    #[test]
    fn missing_file_is_an_image_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = decode(dir.path().join("absent.png"));
        assert!(matches!(result, Err(HoughError::ImageError(_))));
    }
}
