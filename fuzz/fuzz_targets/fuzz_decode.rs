#![no_main]
use libfuzzer_sys::fuzz_target;
use rawbmp::*;

fuzz_target!(|data: &[u8]| {
    // Cap allocations so huge declared payloads fail fast; nothing may panic.
    let limits = Limits {
        max_memory_bytes: Some(16 * 1024 * 1024),
        ..Limits::default()
    };
    let Ok(image) = DecodeRequest::new().with_limits(&limits).decode_bytes(data) else {
        return;
    };

    let _ = HeaderReport::new(&image).to_string();
    for level in [Strictness::Strict, Strictness::Standard, Strictness::Permissive] {
        let _ = validate(&image, level);
    }
    if let Ok(matrix) = build_matrix(&image) {
        assert_eq!(matrix.iter_rows().count(), matrix.rows());
        assert!(matrix.defaulted_count() <= matrix.rows() * matrix.width());
    }
});
