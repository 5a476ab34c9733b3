use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use enough::StopReason;

/// The I/O step that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IoOp {
    Open,
    Create,
    Read,
    Seek,
    Write,
    Flush,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Create => "create",
            Self::Read => "read",
            Self::Seek => "seek",
            Self::Write => "write",
            Self::Flush => "flush",
        })
    }
}

/// What an I/O operation was acting on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IoTarget {
    /// A caller-supplied reader or writer with no known path.
    Stream,
    Path(PathBuf),
}

impl fmt::Display for IoTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream => f.write_str("<stream>"),
            Self::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Which fixed-size header was cut short.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderKind {
    File,
    Info,
}

impl fmt::Display for HeaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file header",
            Self::Info => "info header",
        })
    }
}

/// Errors from BMP decoding, validation, matrix building and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("{op} failed on {target}")]
    IoFailure {
        op: IoOp,
        target: IoTarget,
        #[source]
        source: io::Error,
    },

    #[error("truncated {header}: need {needed} bytes, got {actual}")]
    TruncatedHeader {
        header: HeaderKind,
        needed: usize,
        actual: usize,
    },

    #[error("truncated pixel data: header declares {declared} bytes, got {actual}")]
    TruncatedPixelData { declared: u32, actual: usize },

    #[error("data size {data_size} is not a multiple of the {row_stride}-byte row stride")]
    InconsistentRowCount { data_size: u32, row_stride: usize },

    #[error("invalid magic bytes {found:?}, expected \"BM\"")]
    InvalidMagic { found: [u8; 2] },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: i32, height: i32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}

impl BmpError {
    pub(crate) fn io(op: IoOp, source: io::Error) -> Self {
        BmpError::IoFailure {
            op,
            target: IoTarget::Stream,
            source,
        }
    }

    /// Attach a path to a stream-level I/O failure. Other variants pass through.
    pub(crate) fn at_path(self, path: &Path) -> Self {
        match self {
            BmpError::IoFailure {
                op,
                target: IoTarget::Stream,
                source,
            } => BmpError::IoFailure {
                op,
                target: IoTarget::Path(path.to_path_buf()),
                source,
            },
            other => other,
        }
    }
}
