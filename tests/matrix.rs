//! Pixel matrix: strides, padding, row order, and the short-payload policy.

use rawbmp::*;

fn headers(width: i32, height: i32, bpp: u16, data_size: u32) -> (FileHeader, InfoHeader) {
    let file = FileHeader {
        magic: MAGIC,
        file_size: 54 + data_size,
        reserved: [0; 4],
        pixel_offset: 54,
    };
    let info = InfoHeader {
        header_size: 40,
        width,
        height,
        planes: 1,
        bits_per_pixel: bpp,
        compression: 0,
        data_size,
        x_pixels_per_meter: 0,
        y_pixels_per_meter: 0,
        palette_colors: 0,
        important_colors: 0,
    };
    (file, info)
}

fn image(width: i32, height: i32, data: Vec<u8>) -> DecodedImage {
    let (file, info) = headers(width, height, 24, data.len() as u32);
    DecodedImage::from_parts(file, info, data)
}

#[test]
fn stride_is_padded_to_four_bytes() {
    for width in 0..200usize {
        let stride = row_stride(24, width).unwrap();
        assert_eq!(stride % 4, 0, "width {width}");
        assert!(stride >= width * 3, "width {width}");
        assert!(stride < width * 3 + 4, "width {width}");
    }
    assert_eq!(row_stride(24, 1), Some(4));
    assert_eq!(row_stride(24, 2), Some(8));
    assert_eq!(row_stride(24, 3), Some(12));
    assert_eq!(row_stride(24, 4), Some(12));
    assert_eq!(row_stride(24, 5), Some(16));
    assert_eq!(row_stride(1, 33), Some(8));
    assert_eq!(row_stride(24, usize::MAX), None);
}

#[test]
fn matrix_reports_header_stride() {
    let matrix = build_matrix(&image(5, 1, vec![7; 16])).unwrap();
    assert_eq!(matrix.row_stride(), 16);
    assert_eq!(matrix.width(), 5);
    assert_eq!(matrix.rows(), 1);
}

#[test]
fn padding_bytes_are_skipped() {
    // Width 1: 3 pixel bytes + 1 padding byte per row.
    let data = vec![1, 2, 3, 0xAA, 4, 5, 6, 0xBB];
    let matrix = build_matrix(&image(1, 2, data)).unwrap();

    assert_eq!(matrix.rows(), 2);
    assert_eq!(matrix[0], [Sample::Present(Bgr { b: 1, g: 2, r: 3 })]);
    assert_eq!(matrix[1], [Sample::Present(Bgr { b: 4, g: 5, r: 6 })]);
    assert_eq!(matrix.defaulted_count(), 0);
}

#[test]
fn channels_stay_in_disk_order() {
    let matrix = build_matrix(&image(1, 1, vec![10, 20, 30, 0])).unwrap();
    let px = matrix[0][0].bgr();
    assert_eq!((px.b, px.g, px.r), (10, 20, 30));
}

#[test]
fn one_byte_short_payload_defaults_last_triple() {
    // Width 4 has no padding, so the last byte belongs to the last pixel.
    let mut data: Vec<u8> = (0..24).collect();
    data.pop();
    let (file, info) = headers(4, 2, 24, 24);
    let image = DecodedImage::from_parts(file, info, data);

    let matrix = build_matrix(&image).unwrap();
    assert_eq!(matrix.rows(), 2);
    assert_eq!(matrix.defaulted_count(), 1);
    assert_eq!(
        matrix.get(1, 2),
        Some(Sample::Present(Bgr { b: 18, g: 19, r: 20 }))
    );
    assert_eq!(matrix.get(1, 3), Some(Sample::Defaulted));
    assert_eq!(matrix[1][3].bgr(), Bgr::default());
    assert!(matrix[1][3].is_defaulted());
}

#[test]
fn empty_payload_defaults_every_cell() {
    let (file, info) = headers(2, 2, 24, 16);
    let image = DecodedImage::from_parts(file, info, Vec::new());

    let matrix = build_matrix(&image).unwrap();
    assert_eq!(matrix.rows(), 2);
    assert_eq!(matrix.defaulted_count(), 4);
    assert!(matrix.iter_rows().flatten().all(|s| s.is_defaulted()));
}

#[test]
fn partial_row_is_inconsistent() {
    // Stride for width 2 is 8; 12 bytes is one and a half rows.
    let err = build_matrix(&image(2, 2, vec![0; 12])).unwrap_err();
    assert!(
        matches!(
            err,
            BmpError::InconsistentRowCount {
                data_size: 12,
                row_stride: 8,
            }
        ),
        "{err:?}"
    );
}

#[test]
fn rows_come_from_data_size_not_height() {
    // Header claims 5 rows but only 2 are declared in the data size.
    let matrix = build_matrix(&image(2, 5, vec![0; 16])).unwrap();
    assert_eq!(matrix.rows(), 2);
}

#[test]
fn zero_width_yields_empty_matrix() {
    let matrix = build_matrix(&image(0, 3, Vec::new())).unwrap();
    assert_eq!(matrix.rows(), 0);
    assert_eq!(matrix.first_sample(), None);
    assert_eq!(matrix.iter_rows().count(), 0);

    let err = build_matrix(&image(0, 3, vec![0; 4])).unwrap_err();
    assert!(matches!(err, BmpError::InconsistentRowCount { row_stride: 0, .. }));
}

#[test]
fn non_24_bit_is_unsupported() {
    let (file, info) = headers(2, 2, 32, 16);
    let image = DecodedImage::from_parts(file, info, vec![0; 16]);
    assert!(matches!(
        build_matrix(&image),
        Err(BmpError::UnsupportedVariant(_))
    ));
}

#[test]
fn negative_width_is_unsupported() {
    assert!(matches!(
        build_matrix(&image(-2, 2, vec![0; 16])),
        Err(BmpError::UnsupportedVariant(_))
    ));
}

#[test]
fn row_zero_is_bottom_scanline() {
    // Top-down input: top row red, bottom row blue (B, G, R order).
    let pixels = [
        0, 0, 255, 0, 0, 255, //
        255, 0, 0, 255, 0, 0,
    ];
    let image = DecodedImage::from_bgr24(&pixels, 2, 2).unwrap();
    let matrix = build_matrix(&image).unwrap();

    let blue = Sample::Present(Bgr { b: 255, g: 0, r: 0 });
    let red = Sample::Present(Bgr { b: 0, g: 0, r: 255 });
    assert_eq!(matrix[0], [blue, blue]);
    assert_eq!(matrix[1], [red, red]);

    let top_down: Vec<&[Sample]> = matrix.rows_top_down().collect();
    assert_eq!(top_down[0], [red, red]);
    assert_eq!(top_down[1], [blue, blue]);
}

#[test]
fn out_of_range_lookups_are_none() {
    let matrix = build_matrix(&image(1, 1, vec![1, 2, 3, 0])).unwrap();
    assert_eq!(matrix.get(1, 0), None);
    assert_eq!(matrix.get(0, 1), None);
    assert!(matrix.row(1).is_none());
    assert_eq!(matrix.row(0).map(<[Sample]>::len), Some(1));
}

#[test]
fn unstoppable_build_matches_default() {
    let img = image(3, 2, (0..24).collect());
    let a = build_matrix(&img).unwrap();
    let b = build_matrix_with_stop(&img, Unstoppable).unwrap();
    assert_eq!(a, b);
}

#[cfg(feature = "imgref")]
#[test]
fn imgvec_is_top_down() {
    let pixels = [
        1, 2, 3, //
        4, 5, 6,
    ];
    let image = DecodedImage::from_bgr24(&pixels, 1, 2).unwrap();
    let matrix = build_matrix(&image).unwrap();

    let stored = matrix.to_bgr8();
    assert_eq!((stored[0].b, stored[0].g, stored[0].r), (4, 5, 6));

    let img = matrix.to_imgvec();
    assert_eq!(img.width(), 1);
    assert_eq!(img.height(), 2);
    let top = img.buf()[0];
    assert_eq!((top.b, top.g, top.r), (1, 2, 3));
}
