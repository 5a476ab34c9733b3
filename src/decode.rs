use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use crate::bmp::DecodedImage;
use crate::error::{BmpError, IoOp};
use crate::limits::Limits;

/// Decode configuration.
///
/// ```no_run
/// use rawbmp::{DecodeRequest, Limits};
///
/// let limits = Limits {
///     max_memory_bytes: Some(64 * 1024 * 1024),
///     ..Limits::default()
/// };
/// let image = DecodeRequest::new()
///     .with_limits(&limits)
///     .decode_file("sample.bmp")?;
/// println!("{}x{}", image.info_header().width, image.info_header().height);
/// # Ok::<(), rawbmp::BmpError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DecodeRequest<'a> {
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject headers whose dimensions or declared payload exceed `limits`.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode from a seekable reader positioned at the start of the BMP.
    pub fn decode<R: Read + Seek>(&self, reader: R) -> Result<DecodedImage, BmpError> {
        crate::bmp::decode::decode_stream(reader, self.limits)
    }

    /// Decode from an in-memory buffer.
    pub fn decode_bytes(&self, data: &[u8]) -> Result<DecodedImage, BmpError> {
        self.decode(Cursor::new(data))
    }

    /// Open `path` and decode it. The file is closed before this returns,
    /// on success and on every error path.
    pub fn decode_file(&self, path: impl AsRef<Path>) -> Result<DecodedImage, BmpError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| BmpError::io(IoOp::Open, e).at_path(path))?;
        self.decode(BufReader::new(file)).map_err(|e| e.at_path(path))
    }
}
