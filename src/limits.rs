use crate::error::BmpError;

/// Resource limits applied while decoding untrusted headers.
///
/// All fields default to `None` (no limit). Dimensions are compared by
/// absolute value, so a negative height counts the same as a positive one.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes the decoder may allocate for the pixel payload.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check header dimensions against limits.
    pub(crate) fn check(&self, width: i32, height: i32) -> Result<(), BmpError> {
        let w = u64::from(width.unsigned_abs());
        let h = u64::from(height.unsigned_abs());
        if let Some(max_w) = self.max_width {
            if w > max_w {
                return Err(BmpError::LimitExceeded(format!(
                    "width {w} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if h > max_h {
                return Err(BmpError::LimitExceeded(format!(
                    "height {h} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = w * h;
            if pixels > max_px {
                return Err(BmpError::LimitExceeded(format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that the declared payload size is within memory limits.
    pub(crate) fn check_memory(&self, bytes: u64) -> Result<(), BmpError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes > max_mem {
                return Err(BmpError::LimitExceeded(format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}
