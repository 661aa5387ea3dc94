//! Image dimension decoding backed by the `image` crate.
//!
//! Only the header is read; pixel data is never decoded.

use std::io::Cursor;

use biochar_core::{DimensionDecoder, EstimateError, ImageDimensions};
use image::ImageReader;

/// [`DimensionDecoder`] that sniffs the format from the bytes and reads the
/// image header.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderDecoder;

impl DimensionDecoder for HeaderDecoder {
    fn dimensions(&self, bytes: &[u8]) -> Result<ImageDimensions, EstimateError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| EstimateError::InvalidImage(format!("read failed: {e}")))?;

        if reader.format().is_none() {
            return Err(EstimateError::InvalidImage(format!(
                "unrecognized format ({} bytes)",
                bytes.len()
            )));
        }

        let (width_px, height_px) = reader
            .into_dimensions()
            .map_err(|e| EstimateError::InvalidImage(format!("header decode failed: {e}")))?;

        Ok(ImageDimensions {
            width_px,
            height_px,
        })
    }
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, ImageFormat, RgbImage};

    use super::*;

    fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        let written = DynamicImage::ImageRgb8(RgbImage::new(width, height)).write_to(&mut out, format);
        assert!(written.is_ok());
        out.into_inner()
    }

    #[test]
    fn png_dimensions() {
        let bytes = encode(40, 20, ImageFormat::Png);
        assert_eq!(
            HeaderDecoder.dimensions(&bytes).ok(),
            Some(ImageDimensions {
                width_px: 40,
                height_px: 20,
            })
        );
    }

    #[test]
    fn jpeg_dimensions() {
        let bytes = encode(64, 48, ImageFormat::Jpeg);
        assert_eq!(
            HeaderDecoder.dimensions(&bytes).ok(),
            Some(ImageDimensions {
                width_px: 64,
                height_px: 48,
            })
        );
    }

    #[test]
    fn garbage_is_invalid_image() {
        assert!(matches!(
            HeaderDecoder.dimensions(b"definitely not an image"),
            Err(EstimateError::InvalidImage(_))
        ));
    }

    #[test]
    fn empty_is_invalid_image() {
        assert!(matches!(
            HeaderDecoder.dimensions(&[]),
            Err(EstimateError::InvalidImage(_))
        ));
    }

    #[test]
    fn truncated_png_is_invalid_image() {
        let bytes = encode(40, 20, ImageFormat::Png);
        let truncated = bytes.get(..12).unwrap_or_default();
        assert!(matches!(
            HeaderDecoder.dimensions(truncated),
            Err(EstimateError::InvalidImage(_))
        ));
    }
}
