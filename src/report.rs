//! Human-readable header report.

use core::fmt;

use crate::bmp::DecodedImage;

/// Text rendering of a decoded image's headers.
///
/// ```
/// # let image = rawbmp::DecodedImage::from_bgr24(&[0; 12], 2, 2).unwrap();
/// let text = rawbmp::HeaderReport::new(&image).to_string();
/// assert!(text.contains("Width: 2"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct HeaderReport<'a> {
    image: &'a DecodedImage,
}

impl<'a> HeaderReport<'a> {
    pub fn new(image: &'a DecodedImage) -> Self {
        Self { image }
    }
}

impl fmt::Display for HeaderReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fh = self.image.file_header();
        let ih = self.image.info_header();

        writeln!(f, "File header:")?;
        writeln!(f, "  Magic: {}", fh.magic.escape_ascii())?;
        writeln!(f, "  File size: {} bytes", fh.file_size)?;
        writeln!(f, "  Pixel data offset: {}", fh.pixel_offset)?;
        writeln!(f, "Info header:")?;
        writeln!(f, "  Header size: {} bytes", ih.header_size)?;
        writeln!(f, "  Width: {}", ih.width)?;
        writeln!(f, "  Height: {}", ih.height)?;
        writeln!(f, "  Planes: {}", ih.planes)?;
        writeln!(f, "  Bits per pixel: {}", ih.bits_per_pixel)?;
        writeln!(f, "  Compression: {}", ih.compression)?;
        writeln!(f, "  Image data size: {} bytes", ih.data_size)?;
        writeln!(
            f,
            "  Resolution: {}x{} pixels/meter",
            ih.x_pixels_per_meter, ih.y_pixels_per_meter
        )?;
        writeln!(f, "  Palette colors: {}", ih.palette_colors)?;
        write!(f, "  Important colors: {}", ih.important_colors)
    }
}
