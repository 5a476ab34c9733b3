//! BMP header model and the fixed 54-byte on-disk layout.
//!
//! Every integer is little-endian. The file header occupies bytes `0..14`
//! and the BITMAPINFOHEADER bytes `14..54`; the pixel payload starts at the
//! absolute offset recorded in the file header.

pub(crate) mod decode;
pub(crate) mod encode;
pub(crate) mod validate;

/// The two-byte signature every Windows bitmap starts with.
pub const MAGIC: [u8; 2] = *b"BM";

/// On-disk size of [`FileHeader`].
pub const FILE_HEADER_LEN: usize = 14;

/// On-disk size of [`InfoHeader`] (BITMAPINFOHEADER).
pub const INFO_HEADER_LEN: usize = 40;

/// Offset of the pixel payload in a canonical file.
pub const CANONICAL_PIXEL_OFFSET: u32 = (FILE_HEADER_LEN + INFO_HEADER_LEN) as u32;

/// BITMAPFILEHEADER.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub magic: [u8; 2],
    /// Total file size as declared; often 0 or wrong in the wild.
    pub file_size: u32,
    pub reserved: [u8; 4],
    /// Absolute byte position of the pixel payload.
    pub pixel_offset: u32,
}

impl FileHeader {
    pub fn from_bytes(b: &[u8; FILE_HEADER_LEN]) -> Self {
        Self {
            magic: [b[0], b[1]],
            file_size: u32_at(b, 2),
            reserved: [b[6], b[7], b[8], b[9]],
            pixel_offset: u32_at(b, 10),
        }
    }

    pub fn to_bytes(&self) -> [u8; FILE_HEADER_LEN] {
        let mut out = [0u8; FILE_HEADER_LEN];
        out[0..2].copy_from_slice(&self.magic);
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..10].copy_from_slice(&self.reserved);
        out[10..14].copy_from_slice(&self.pixel_offset.to_le_bytes());
        out
    }

    pub fn has_valid_magic(&self) -> bool {
        self.magic == MAGIC
    }
}

/// BITMAPINFOHEADER.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Positive for bottom-up storage. Negative (top-down) heights are kept
    /// as read and are not special-cased anywhere in this crate.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    /// Compression tag; 0 is BI_RGB (uncompressed).
    pub compression: u32,
    /// Declared size of the pixel payload in bytes.
    pub data_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub palette_colors: u32,
    pub important_colors: u32,
}

impl InfoHeader {
    pub fn from_bytes(b: &[u8; INFO_HEADER_LEN]) -> Self {
        Self {
            header_size: u32_at(b, 0),
            width: i32_at(b, 4),
            height: i32_at(b, 8),
            planes: u16_at(b, 12),
            bits_per_pixel: u16_at(b, 14),
            compression: u32_at(b, 16),
            data_size: u32_at(b, 20),
            x_pixels_per_meter: i32_at(b, 24),
            y_pixels_per_meter: i32_at(b, 28),
            palette_colors: u32_at(b, 32),
            important_colors: u32_at(b, 36),
        }
    }

    pub fn to_bytes(&self) -> [u8; INFO_HEADER_LEN] {
        let mut out = [0u8; INFO_HEADER_LEN];
        out[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.data_size.to_le_bytes());
        out[24..28].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out[28..32].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out[32..36].copy_from_slice(&self.palette_colors.to_le_bytes());
        out[36..40].copy_from_slice(&self.important_colors.to_le_bytes());
        out
    }

    /// Padded scanline length for this header's width and bit depth.
    ///
    /// Returns `None` for a negative width or on overflow.
    pub fn row_stride(&self) -> Option<usize> {
        let width = usize::try_from(self.width).ok()?;
        row_stride(self.bits_per_pixel, width)
    }
}

/// Bytes per scanline, padded to a 4-byte boundary:
/// `ceil(bits_per_pixel * width / 32) * 4`.
pub fn row_stride(bits_per_pixel: u16, width: usize) -> Option<usize> {
    usize::from(bits_per_pixel)
        .checked_mul(width)
        .map(|bits| bits.div_ceil(32))
        .and_then(|words| words.checked_mul(4))
}

/// A decoded BMP: both headers plus the raw, still padded, bottom-up payload.
///
/// Immutable once built. The payload is an owned copy; nothing refers back
/// to the stream it was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    file_header: FileHeader,
    info_header: InfoHeader,
    data: Vec<u8>,
}

impl DecodedImage {
    /// Assemble an image from already-parsed parts.
    ///
    /// No consistency checks are made; `data` may be shorter or longer than
    /// `info.data_size`. Use [`crate::validate`] to check the headers.
    pub fn from_parts(file_header: FileHeader, info_header: InfoHeader, data: Vec<u8>) -> Self {
        Self {
            file_header,
            info_header,
            data,
        }
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    pub fn info_header(&self) -> &InfoHeader {
        &self.info_header
    }

    /// Raw pixel payload in on-disk layout (row padding included).
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_parts(self) -> (FileHeader, InfoHeader, Vec<u8>) {
        (self.file_header, self.info_header, self.data)
    }
}

fn u16_at(b: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([b[off], b[off + 1]])
}

fn u32_at(b: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

fn i32_at(b: &[u8], off: usize) -> i32 {
    i32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}
