#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, pixel_offset: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; pixel_offset.max(54) as usize];
    out[0] = b'B';
    out[1] = b'M';
    let file_size = out.len() + payload.len();
    out[2..6].copy_from_slice(&(file_size as u32).to_le_bytes());
    out[10..14].copy_from_slice(&pixel_offset.to_le_bytes());
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // info header size
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    out[34..38].copy_from_slice(&(payload.len() as u32).to_le_bytes()); // data size
    out.extend_from_slice(payload);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 1x1: 3 pixel bytes + 1 padding
    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp(1, 1, 54, &[0xff, 0, 0, 0])).unwrap();

    // 2x2 with 8-byte stride
    let payload: Vec<u8> = (0..16).collect();
    fs::write(format!("{dir}/bmp_2x2.bmp"), bmp(2, 2, 54, &payload)).unwrap();

    // Gap between headers and payload
    fs::write(format!("{dir}/bmp_gap.bmp"), bmp(2, 2, 64, &payload)).unwrap();

    // Truncated/malformed seeds for edge coverage
    let full = bmp(2, 2, 54, &payload);
    fs::write(format!("{dir}/truncated_file_header.bmp"), &full[..10]).unwrap();
    fs::write(format!("{dir}/truncated_info_header.bmp"), &full[..30]).unwrap();
    fs::write(format!("{dir}/truncated_payload.bmp"), &full[..60]).unwrap();
    fs::write(format!("{dir}/partial_row.bmp"), bmp(2, 2, 54, &payload[..12])).unwrap();
    fs::write(format!("{dir}/top_down.bmp"), bmp(2, -2, 54, &payload)).unwrap();

    println!("Seeds written to {dir}");
}
