//! BMP encoder: file header, BITMAPINFOHEADER and the payload, in that order.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use enough::Stop;
use tracing::{debug, info, trace};

use super::{
    CANONICAL_PIXEL_OFFSET, DecodedImage, FileHeader, INFO_HEADER_LEN, InfoHeader, MAGIC,
    row_stride,
};
use crate::error::{BmpError, IoOp};

/// Serialize `image` into `writer`.
///
/// Both headers are written as decoded. Any gap between the end of the
/// 40-byte info header and `pixel_offset` is zero-filled so the payload lands
/// at the offset the file header states. The payload is copied verbatim; no
/// padding is added or removed. A failed write leaves whatever was already
/// written in place.
pub(crate) fn encode_to<W: Write>(
    image: &DecodedImage,
    mut writer: W,
    stop: &dyn Stop,
) -> Result<(), BmpError> {
    let file_header = image.file_header();
    let info_header = image.info_header();
    let gap = payload_gap(file_header)?;

    writer
        .write_all(&file_header.to_bytes())
        .map_err(|e| BmpError::io(IoOp::Write, e))?;
    writer
        .write_all(&info_header.to_bytes())
        .map_err(|e| BmpError::io(IoOp::Write, e))?;
    if gap > 0 {
        io::copy(&mut io::repeat(0).take(gap as u64), &mut writer)
            .map_err(|e| BmpError::io(IoOp::Write, e))?;
    }

    let data = image.data();
    let chunk = info_header
        .row_stride()
        .filter(|&s| s > 0)
        .unwrap_or(data.len().max(1));
    for (row, bytes) in data.chunks(chunk).enumerate() {
        if row % 16 == 0 {
            stop.check()?;
            trace!(row, "writing payload");
        }
        writer
            .write_all(bytes)
            .map_err(|e| BmpError::io(IoOp::Write, e))?;
    }

    debug!(
        file_size = file_header.file_size,
        pixel_offset = file_header.pixel_offset,
        gap,
        payload = data.len(),
        "encoded BMP"
    );
    Ok(())
}

/// Zero bytes between the info header and the payload.
fn payload_gap(file_header: &FileHeader) -> Result<usize, BmpError> {
    (file_header.pixel_offset as usize)
        .checked_sub(CANONICAL_PIXEL_OFFSET as usize)
        .ok_or_else(|| {
            BmpError::InvalidHeader(format!(
                "pixel offset {} points inside the headers; canonicalize before encoding",
                file_header.pixel_offset
            ))
        })
}

pub(crate) fn encode(image: &DecodedImage, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
    let offset = (image.file_header().pixel_offset as usize).max(CANONICAL_PIXEL_OFFSET as usize);
    let mut out = Vec::with_capacity(offset + image.data().len());
    encode_to(image, &mut out, stop)?;
    Ok(out)
}

/// Create or truncate `path` and write `image` to it.
///
/// On error the destination may hold a partial file; it is not removed.
pub(crate) fn write_file(
    path: &Path,
    image: &DecodedImage,
    stop: &dyn Stop,
) -> Result<(), BmpError> {
    let file = File::create(path).map_err(|e| BmpError::io(IoOp::Create, e).at_path(path))?;
    let mut writer = BufWriter::new(file);
    encode_to(image, &mut writer, stop).map_err(|e| e.at_path(path))?;
    writer
        .flush()
        .map_err(|e| BmpError::io(IoOp::Flush, e).at_path(path))?;
    info!(path = %path.display(), "wrote BMP");
    Ok(())
}

impl DecodedImage {
    /// A copy with canonical headers: a 40-byte info header directly after
    /// the file header, payload at offset 54, file size and data size
    /// matching the payload. Magic, reserved bytes and the remaining info
    /// fields are kept.
    ///
    /// [`crate::encode`] writes headers as decoded; call this first to drop
    /// gap bytes or repair size fields.
    pub fn canonicalize(&self) -> Result<DecodedImage, BmpError> {
        let len = self.data().len();
        let payload = u32::try_from(len).map_err(|_| {
            BmpError::InvalidHeader(format!(
                "payload of {len} bytes does not fit a 32-bit size field"
            ))
        })?;
        let file_size = payload.checked_add(CANONICAL_PIXEL_OFFSET).ok_or_else(|| {
            BmpError::InvalidHeader(format!("file size overflows with a {payload}-byte payload"))
        })?;

        let file_header = FileHeader {
            file_size,
            pixel_offset: CANONICAL_PIXEL_OFFSET,
            ..*self.file_header()
        };
        let info_header = InfoHeader {
            header_size: INFO_HEADER_LEN as u32,
            data_size: payload,
            ..*self.info_header()
        };
        Ok(DecodedImage::from_parts(file_header, info_header, self.data().to_vec()))
    }

    /// Build a 24-bit bottom-up image from tightly packed, top-down BGR rows.
    ///
    /// Rows are padded to the 4-byte stride and stored last row first, the
    /// way a BMP file lays them out.
    pub fn from_bgr24(pixels: &[u8], width: u32, height: u32) -> Result<Self, BmpError> {
        let too_large = || BmpError::DimensionsTooLarge {
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
        };
        let w_i32 = i32::try_from(width).map_err(|_| too_large())?;
        let h_i32 = i32::try_from(height).map_err(|_| too_large())?;
        let w = width as usize;
        let h = height as usize;

        let tight_row = w.checked_mul(3).ok_or_else(too_large)?;
        let expected = tight_row.checked_mul(h).ok_or_else(too_large)?;
        if pixels.len() < expected {
            return Err(BmpError::BufferTooSmall {
                needed: expected,
                actual: pixels.len(),
            });
        }

        let stride = row_stride(24, w).ok_or_else(too_large)?;
        let data_size = stride.checked_mul(h).ok_or_else(too_large)?;
        let data_size_u32 = u32::try_from(data_size).map_err(|_| too_large())?;
        let file_size = data_size_u32
            .checked_add(CANONICAL_PIXEL_OFFSET)
            .ok_or_else(too_large)?;

        let pad_bytes = stride - tight_row;
        let mut data = Vec::with_capacity(data_size);
        if tight_row > 0 {
            for row in pixels[..expected].chunks_exact(tight_row).rev() {
                data.extend_from_slice(row);
                data.extend(core::iter::repeat_n(0u8, pad_bytes));
            }
        }

        let file_header = FileHeader {
            magic: MAGIC,
            file_size,
            reserved: [0; 4],
            pixel_offset: CANONICAL_PIXEL_OFFSET,
        };
        let info_header = InfoHeader {
            header_size: INFO_HEADER_LEN as u32,
            width: w_i32,
            height: h_i32, // positive = bottom-up
            planes: 1,
            bits_per_pixel: 24,
            compression: 0,
            data_size: data_size_u32,
            x_pixels_per_meter: 2835, // 72 DPI
            y_pixels_per_meter: 2835,
            palette_colors: 0,
            important_colors: 0,
        };
        Ok(DecodedImage::from_parts(file_header, info_header, data))
    }
}
