//! Stream decoder: two fixed headers, an absolute seek, then the payload.
//!
//! Nothing here checks the magic bytes or the bit depth. Malformed but
//! parseable files still decode so they can be inspected; see
//! [`crate::validate`] for the explicit checks.

use std::io::{self, Read, Seek, SeekFrom};

use tracing::{debug, warn};

use super::{DecodedImage, FILE_HEADER_LEN, FileHeader, INFO_HEADER_LEN, InfoHeader};
use crate::error::{BmpError, HeaderKind, IoOp};
use crate::limits::Limits;

/// Decode a BMP from `reader`.
///
/// The pixel offset is taken relative to where `reader` was positioned on
/// entry, which is the start of the BMP stream. For a freshly opened file
/// that is byte 0.
pub(crate) fn decode_stream<R: Read + Seek>(
    mut reader: R,
    limits: Option<&Limits>,
) -> Result<DecodedImage, BmpError> {
    let base = reader
        .stream_position()
        .map_err(|e| BmpError::io(IoOp::Seek, e))?;

    let mut file_bytes = [0u8; FILE_HEADER_LEN];
    read_header(&mut reader, &mut file_bytes, HeaderKind::File)?;
    let file_header = FileHeader::from_bytes(&file_bytes);

    let mut info_bytes = [0u8; INFO_HEADER_LEN];
    read_header(&mut reader, &mut info_bytes, HeaderKind::Info)?;
    let info_header = InfoHeader::from_bytes(&info_bytes);

    debug!(
        file_size = file_header.file_size,
        pixel_offset = file_header.pixel_offset,
        header_size = info_header.header_size,
        width = info_header.width,
        height = info_header.height,
        bits_per_pixel = info_header.bits_per_pixel,
        data_size = info_header.data_size,
        "parsed BMP headers"
    );

    if let Some(limits) = limits {
        limits.check(info_header.width, info_header.height)?;
        limits.check_memory(u64::from(info_header.data_size))?;
    }

    let pixel_pos = base
        .checked_add(u64::from(file_header.pixel_offset))
        .ok_or_else(|| BmpError::InvalidHeader("pixel offset overflows the stream".into()))?;
    reader
        .seek(SeekFrom::Start(pixel_pos))
        .map_err(|e| BmpError::io(IoOp::Seek, e))?;

    let declared = info_header.data_size;
    if declared == 0 && info_header.width != 0 && info_header.height != 0 {
        warn!("header declares an empty pixel payload; no pixel bytes will be read");
    }

    // Grow as bytes arrive instead of trusting the declared size up front.
    let mut data = Vec::new();
    reader
        .by_ref()
        .take(u64::from(declared))
        .read_to_end(&mut data)
        .map_err(|e| BmpError::io(IoOp::Read, e))?;

    if data.len() < declared as usize {
        return Err(BmpError::TruncatedPixelData {
            declared,
            actual: data.len(),
        });
    }

    debug!(bytes = data.len(), offset = pixel_pos, "read pixel payload");
    Ok(DecodedImage::from_parts(file_header, info_header, data))
}

fn read_header<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    header: HeaderKind,
) -> Result<(), BmpError> {
    let filled = read_full(reader, buf)?;
    if filled < buf.len() {
        return Err(BmpError::TruncatedHeader {
            header,
            needed: buf.len(),
            actual: filled,
        });
    }
    Ok(())
}

/// Like `read_exact`, but reports how far it got instead of failing on EOF.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, BmpError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(BmpError::io(IoOp::Read, e)),
        }
    }
    Ok(filled)
}
