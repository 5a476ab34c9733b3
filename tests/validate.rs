use rawbmp::*;

fn good_image() -> DecodedImage {
    DecodedImage::from_bgr24(&[9; 2 * 2 * 3], 2, 2).unwrap()
}

fn with_headers(
    image: &DecodedImage,
    edit: impl FnOnce(&mut FileHeader, &mut InfoHeader),
) -> DecodedImage {
    let (mut fh, mut ih, data) = image.clone().into_parts();
    edit(&mut fh, &mut ih);
    DecodedImage::from_parts(fh, ih, data)
}

#[test]
fn well_formed_image_passes_every_level() {
    let image = good_image();
    for level in [
        Strictness::Strict,
        Strictness::Standard,
        Strictness::Permissive,
    ] {
        validate(&image, level).unwrap();
    }
}

#[test]
fn wrong_magic_fails_every_level() {
    let image = with_headers(&good_image(), |fh, _| fh.magic = *b"PM");
    for level in [
        Strictness::Strict,
        Strictness::Standard,
        Strictness::Permissive,
    ] {
        match validate(&image, level) {
            Err(BmpError::InvalidMagic { found }) => assert_eq!(&found, b"PM"),
            other => panic!("{level:?}: expected InvalidMagic, got {other:?}"),
        }
    }
}

#[test]
fn default_strictness_is_standard() {
    assert_eq!(Strictness::default(), Strictness::Standard);
}

#[test]
fn standard_rejects_other_bit_depths() {
    let image = with_headers(&good_image(), |_, ih| ih.bits_per_pixel = 32);
    assert!(matches!(
        validate(&image, Strictness::Standard),
        Err(BmpError::UnsupportedVariant(_))
    ));
    validate(&image, Strictness::Permissive).unwrap();
}

#[test]
fn standard_rejects_compression() {
    let image = with_headers(&good_image(), |_, ih| ih.compression = 1);
    assert!(matches!(
        validate(&image, Strictness::Standard),
        Err(BmpError::UnsupportedVariant(_))
    ));
}

#[test]
fn standard_rejects_top_down() {
    let image = with_headers(&good_image(), |_, ih| ih.height = -2);
    let err = validate(&image, Strictness::Standard).unwrap_err();
    assert!(err.to_string().contains("top-down"), "{err}");
}

#[test]
fn standard_rejects_offset_inside_headers() {
    let image = with_headers(&good_image(), |fh, _| fh.pixel_offset = 20);
    assert!(matches!(
        validate(&image, Strictness::Standard),
        Err(BmpError::InvalidHeader(_))
    ));
}

#[test]
fn standard_rejects_payload_past_file_size() {
    let image = with_headers(&good_image(), |fh, _| fh.file_size = 60);
    assert!(matches!(
        validate(&image, Strictness::Standard),
        Err(BmpError::InvalidHeader(_))
    ));

    // A zero file size is common and not checked.
    let zero = with_headers(&good_image(), |fh, _| fh.file_size = 0);
    validate(&zero, Strictness::Standard).unwrap();
}

#[test]
fn strict_only_checks() {
    let cases: [(&str, fn(&mut FileHeader, &mut InfoHeader)); 5] = [
        ("planes", |_, ih| ih.planes = 2),
        ("header size", |_, ih| ih.header_size = 108),
        ("data size", |fh, ih| {
            ih.data_size = 0;
            fh.file_size = 0;
        }),
        ("palette", |_, ih| ih.palette_colors = 4),
        ("resolution", |_, ih| ih.x_pixels_per_meter = -1),
    ];
    for (name, edit) in cases {
        let image = with_headers(&good_image(), edit);
        validate(&image, Strictness::Standard).unwrap();
        assert!(
            matches!(
                validate(&image, Strictness::Strict),
                Err(BmpError::InvalidHeader(_))
            ),
            "{name}"
        );
    }
}
