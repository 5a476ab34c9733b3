//! Pixel matrix: the padded payload reinterpreted as rows of BGR triples.
//!
//! Row 0 is the first scanline in the stream. For an ordinary bottom-up
//! BMP that is the bottom row of the picture; use
//! [`PixelMatrix::rows_top_down`] for display order.
//!
//! The matrix is an owned copy of the payload bytes.

use core::ops::Index;

use enough::Stop;
use tracing::{debug, trace, warn};

use crate::bmp::{DecodedImage, row_stride};
use crate::error::BmpError;

/// One pixel in on-disk channel order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

#[cfg(feature = "rgb")]
impl From<Bgr> for rgb::alt::BGR8 {
    fn from(px: Bgr) -> Self {
        rgb::alt::BGR8 {
            b: px.b,
            g: px.g,
            r: px.r,
        }
    }
}

/// A matrix cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sample {
    /// All three bytes were inside the payload.
    Present(Bgr),
    /// The triple ran past the end of the payload and was zero-filled.
    Defaulted,
}

impl Sample {
    /// The pixel value, zero for defaulted cells.
    pub fn bgr(self) -> Bgr {
        match self {
            Self::Present(px) => px,
            Self::Defaulted => Bgr::default(),
        }
    }

    pub fn is_defaulted(self) -> bool {
        matches!(self, Self::Defaulted)
    }
}

/// Rows of [`Sample`]s built from a [`DecodedImage`].
///
/// Indexing with `matrix[row]` yields that row's samples, so
/// `matrix[row][col]` addresses a single cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelMatrix {
    width: usize,
    rows: usize,
    row_stride: usize,
    samples: Vec<Sample>,
    defaulted: usize,
}

impl PixelMatrix {
    /// Number of rows derived from the declared data size.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Pixels per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Bytes per scanline in the source payload, padding included.
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// How many cells were zero-filled because the payload was short.
    pub fn defaulted_count(&self) -> usize {
        self.defaulted
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Sample> {
        if row >= self.rows || col >= self.width {
            return None;
        }
        Some(self.samples[row * self.width + col])
    }

    pub fn row(&self, row: usize) -> Option<&[Sample]> {
        (row < self.rows).then(|| self.stored_row(row))
    }

    /// The first cell of the first stored row, if the matrix has any.
    pub fn first_sample(&self) -> Option<Sample> {
        self.get(0, 0)
    }

    /// Rows in stream order (bottom scanline first for bottom-up files).
    pub fn iter_rows(&self) -> impl DoubleEndedIterator<Item = &[Sample]> + '_ {
        (0..self.rows).map(move |i| self.stored_row(i))
    }

    /// Rows in display order for a bottom-up file (top scanline first).
    pub fn rows_top_down(&self) -> impl Iterator<Item = &[Sample]> + '_ {
        self.iter_rows().rev()
    }

    /// Flatten to typed pixels in stream order. Defaulted cells become zero.
    #[cfg(feature = "rgb")]
    pub fn to_bgr8(&self) -> Vec<rgb::alt::BGR8> {
        self.samples
            .iter()
            .map(|s| rgb::alt::BGR8::from(s.bgr()))
            .collect()
    }

    /// Top-down [`imgref::ImgVec`] of typed pixels. Defaulted cells become zero.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::alt::BGR8> {
        let mut pixels = Vec::with_capacity(self.samples.len());
        for row in self.rows_top_down() {
            pixels.extend(row.iter().map(|s| rgb::alt::BGR8::from(s.bgr())));
        }
        imgref::ImgVec::new(pixels, self.width, self.rows)
    }

    fn stored_row(&self, row: usize) -> &[Sample] {
        let start = row * self.width;
        &self.samples[start..start + self.width]
    }
}

impl Index<usize> for PixelMatrix {
    type Output = [Sample];

    fn index(&self, row: usize) -> &[Sample] {
        assert!(row < self.rows, "row {row} out of range for {} rows", self.rows);
        self.stored_row(row)
    }
}

pub(crate) fn build(image: &DecodedImage, stop: &dyn Stop) -> Result<PixelMatrix, BmpError> {
    let ih = image.info_header();

    if ih.bits_per_pixel != 24 {
        return Err(BmpError::UnsupportedVariant(format!(
            "pixel matrix needs 24 bits per pixel, header says {}",
            ih.bits_per_pixel
        )));
    }
    let width = usize::try_from(ih.width).map_err(|_| {
        BmpError::UnsupportedVariant(format!("negative width {}", ih.width))
    })?;
    let stride = row_stride(ih.bits_per_pixel, width).ok_or(BmpError::DimensionsTooLarge {
        width: ih.width,
        height: ih.height,
    })?;

    let data_size = ih.data_size as usize;
    let rows = if stride == 0 {
        if data_size != 0 {
            return Err(BmpError::InconsistentRowCount {
                data_size: ih.data_size,
                row_stride: stride,
            });
        }
        0
    } else {
        if data_size % stride != 0 {
            return Err(BmpError::InconsistentRowCount {
                data_size: ih.data_size,
                row_stride: stride,
            });
        }
        data_size / stride
    };

    if rows != ih.height.unsigned_abs() as usize {
        warn!(
            rows,
            height = ih.height,
            "row count from data size differs from header height"
        );
    }

    let cells = rows.checked_mul(width).ok_or(BmpError::DimensionsTooLarge {
        width: ih.width,
        height: ih.height,
    })?;
    let data = image.data();
    let mut samples = Vec::with_capacity(cells);
    let mut defaulted = 0usize;

    for row in 0..rows {
        if row % 16 == 0 {
            stop.check()?;
            trace!(row, "building matrix rows");
        }
        let row_start = row * stride;
        for col in 0..width {
            let off = row_start + col * 3;
            match data.get(off..off + 3) {
                Some(&[b, g, r]) => samples.push(Sample::Present(Bgr { b, g, r })),
                _ => {
                    samples.push(Sample::Defaulted);
                    defaulted += 1;
                }
            }
        }
    }

    if defaulted > 0 {
        warn!(
            defaulted,
            payload = data.len(),
            declared = ih.data_size,
            "payload shorter than declared; zero-filled trailing pixels"
        );
    }
    debug!(rows, width, stride, "built pixel matrix");

    Ok(PixelMatrix {
        width,
        rows,
        row_stride: stride,
        samples,
        defaulted,
    })
}
