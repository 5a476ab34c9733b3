//! Explicit header validation, run separately from decoding.

use super::{CANONICAL_PIXEL_OFFSET, DecodedImage, INFO_HEADER_LEN};
use crate::error::BmpError;

/// Controls how strictly [`crate::validate`] checks a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Everything in `Standard`, plus: planes == 1, a 40-byte info header,
    /// a data size equal to stride * height, no palette, non-negative
    /// resolutions.
    Strict,

    /// Default. Accepts files this crate can turn into a pixel matrix:
    /// magic "BM", 24 bits per pixel, no compression, non-negative
    /// dimensions, a pixel offset past the headers and inside the declared
    /// file size.
    #[default]
    Standard,

    /// Only the magic bytes are checked.
    Permissive,
}

pub(crate) fn validate(image: &DecodedImage, strictness: Strictness) -> Result<(), BmpError> {
    let fh = image.file_header();
    let ih = image.info_header();

    if !fh.has_valid_magic() {
        return Err(BmpError::InvalidMagic { found: fh.magic });
    }
    if strictness == Strictness::Permissive {
        return Ok(());
    }

    if ih.bits_per_pixel != 24 {
        return Err(BmpError::UnsupportedVariant(format!(
            "{} bits per pixel; only 24-bit BMP is supported",
            ih.bits_per_pixel
        )));
    }
    if ih.compression != 0 {
        return Err(BmpError::UnsupportedVariant(format!(
            "compression method {} (only uncompressed BI_RGB is supported)",
            ih.compression
        )));
    }
    if ih.width < 0 {
        return Err(BmpError::UnsupportedVariant(format!(
            "negative width {}",
            ih.width
        )));
    }
    if ih.height < 0 {
        return Err(BmpError::UnsupportedVariant(format!(
            "negative height {} (top-down rows are not supported)",
            ih.height
        )));
    }
    if fh.pixel_offset < CANONICAL_PIXEL_OFFSET {
        return Err(BmpError::InvalidHeader(format!(
            "pixel offset {} points inside the headers",
            fh.pixel_offset
        )));
    }
    if fh.file_size != 0 {
        let end = u64::from(fh.pixel_offset) + u64::from(ih.data_size);
        if end > u64::from(fh.file_size) {
            return Err(BmpError::InvalidHeader(format!(
                "pixel data ends at {end}, past the declared file size {}",
                fh.file_size
            )));
        }
    }

    if strictness != Strictness::Strict {
        return Ok(());
    }

    if ih.planes != 1 {
        return Err(BmpError::InvalidHeader(format!(
            "planes field is {}, expected 1",
            ih.planes
        )));
    }
    if ih.header_size != INFO_HEADER_LEN as u32 {
        return Err(BmpError::InvalidHeader(format!(
            "info header size {} (expected {INFO_HEADER_LEN})",
            ih.header_size
        )));
    }
    let expected = ih
        .row_stride()
        .and_then(|s| s.checked_mul(ih.height as usize))
        .ok_or(BmpError::DimensionsTooLarge {
            width: ih.width,
            height: ih.height,
        })?;
    if ih.data_size as usize != expected {
        return Err(BmpError::InvalidHeader(format!(
            "image data size field ({}) doesn't match expected ({expected})",
            ih.data_size
        )));
    }
    if ih.palette_colors != 0 {
        return Err(BmpError::InvalidHeader(format!(
            "palette of {} colors in a 24-bit image",
            ih.palette_colors
        )));
    }
    if ih.x_pixels_per_meter < 0 || ih.y_pixels_per_meter < 0 {
        return Err(BmpError::InvalidHeader(format!(
            "negative resolution {}x{} pixels per meter",
            ih.x_pixels_per_meter, ih.y_pixels_per_meter
        )));
    }
    Ok(())
}
