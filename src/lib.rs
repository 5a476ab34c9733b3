//! # rawbmp
//!
//! Structural decoder and encoder for uncompressed 24-bit BMP files.
//!
//! A BMP is a 14-byte file header, a 40-byte BITMAPINFOHEADER, and a pixel
//! payload at an absolute offset. Scanlines are padded to 4 bytes and stored
//! bottom-up, with channels in B, G, R order. This crate keeps those bytes as
//! they are on disk and lets you look at them:
//!
//! - [`decode`] reads the headers and exactly the declared payload.
//! - [`validate`] checks the headers against format invariants. Decoding
//!   never does this on its own, so broken files can still be inspected.
//! - [`build_matrix`] turns the payload into rows of [`Sample`]s.
//! - [`encode`] and [`write_file`] write a complete file back out.
//! - [`HeaderReport`] renders the header fields as text.
//!
//! ## Non-Goals
//!
//! - RLE and bitfield compression
//! - Palette formats and bit depths other than 24
//! - Any pixel processing beyond decode/re-encode
//!
//! ## Usage
//!
//! ```
//! use rawbmp::{Sample, Strictness};
//!
//! // 2x2 image, rows given top-down in B, G, R order.
//! let pixels = [
//!     0, 0, 255,   0, 255, 0,
//!     255, 0, 0,   9, 9, 9,
//! ];
//! let image = rawbmp::DecodedImage::from_bgr24(&pixels, 2, 2)?;
//! let bytes = rawbmp::encode(&image)?;
//!
//! let decoded = rawbmp::decode_bytes(&bytes)?;
//! rawbmp::validate(&decoded, Strictness::Strict)?;
//!
//! let matrix = rawbmp::build_matrix(&decoded)?;
//! // Row 0 is the bottom scanline.
//! assert!(matches!(matrix[0][0], Sample::Present(px) if px.b == 255));
//! # Ok::<(), rawbmp::BmpError>(())
//! ```

#![forbid(unsafe_code)]

mod bmp;
mod decode;
mod error;
mod limits;
mod matrix;
mod report;

use std::io::{Read, Seek, Write};
use std::path::Path;

// Re-exports
pub use bmp::validate::Strictness;
pub use bmp::{
    CANONICAL_PIXEL_OFFSET, DecodedImage, FILE_HEADER_LEN, FileHeader, INFO_HEADER_LEN,
    InfoHeader, MAGIC, row_stride,
};
pub use decode::DecodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::{BmpError, HeaderKind, IoOp, IoTarget};
pub use limits::Limits;
pub use matrix::{Bgr, PixelMatrix, Sample};
pub use report::HeaderReport;

/// Decode a BMP from a seekable reader. See [`DecodeRequest`] for limits.
pub fn decode<R: Read + Seek>(reader: R) -> Result<DecodedImage, BmpError> {
    DecodeRequest::new().decode(reader)
}

/// Decode a BMP held in memory.
pub fn decode_bytes(data: &[u8]) -> Result<DecodedImage, BmpError> {
    DecodeRequest::new().decode_bytes(data)
}

/// Open and decode the BMP at `path`.
pub fn decode_file(path: impl AsRef<Path>) -> Result<DecodedImage, BmpError> {
    DecodeRequest::new().decode_file(path)
}

/// Check a decoded image's headers.
pub fn validate(image: &DecodedImage, strictness: Strictness) -> Result<(), BmpError> {
    bmp::validate::validate(image, strictness)
}

/// Reinterpret the payload as a matrix of BGR samples.
///
/// Fails with [`BmpError::InconsistentRowCount`] when the declared data size
/// is not a whole number of rows. Triples that run past the end of the
/// payload are [`Sample::Defaulted`] rather than an error.
pub fn build_matrix(image: &DecodedImage) -> Result<PixelMatrix, BmpError> {
    matrix::build(image, &Unstoppable)
}

/// [`build_matrix`] with cooperative cancellation, checked every 16 rows.
pub fn build_matrix_with_stop(
    image: &DecodedImage,
    stop: impl Stop,
) -> Result<PixelMatrix, BmpError> {
    matrix::build(image, &stop)
}

/// Serialize a complete BMP: file header, info header, payload.
///
/// Headers are written exactly as decoded, and bytes between the info header
/// and `pixel_offset` are zero-filled, so decoding the output yields the same
/// headers and payload. Use [`DecodedImage::canonicalize`] first to rewrite
/// the offsets and sizes. Fails with [`BmpError::InvalidHeader`] when
/// `pixel_offset` points inside the 54 header bytes.
pub fn encode(image: &DecodedImage) -> Result<Vec<u8>, BmpError> {
    bmp::encode::encode(image, &Unstoppable)
}

/// Like [`encode`], streaming into `writer`.
pub fn encode_to<W: Write>(image: &DecodedImage, writer: W) -> Result<(), BmpError> {
    bmp::encode::encode_to(image, writer, &Unstoppable)
}

/// Like [`encode_to`], with cooperative cancellation checked every 16 rows.
pub fn encode_to_with_stop<W: Write>(
    image: &DecodedImage,
    writer: W,
    stop: impl Stop,
) -> Result<(), BmpError> {
    bmp::encode::encode_to(image, writer, &stop)
}

/// Create or overwrite `path` with the encoded image.
///
/// If writing fails partway, the partially written file is left on disk.
pub fn write_file(path: impl AsRef<Path>, image: &DecodedImage) -> Result<(), BmpError> {
    bmp::encode::write_file(path.as_ref(), image, &Unstoppable)
}
