#![no_main]
use libfuzzer_sys::fuzz_target;
use rawbmp::*;

fuzz_target!(|data: &[u8]| {
    // Whatever decodes and re-encodes must decode back to the same headers
    // and payload. Encoding may refuse offsets that point inside the headers.
    let limits = Limits {
        max_memory_bytes: Some(16 * 1024 * 1024),
        ..Limits::default()
    };
    let Ok(decoded) = DecodeRequest::new().with_limits(&limits).decode_bytes(data) else {
        return;
    };
    let Ok(reencoded) = encode(&decoded) else {
        return;
    };
    let Ok(decoded2) = decode_bytes(&reencoded) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.data(), decoded2.data(), "roundtrip payload mismatch");
    assert_eq!(decoded2.file_header(), decoded.file_header());
    assert_eq!(decoded2.info_header(), decoded.info_header());
});
