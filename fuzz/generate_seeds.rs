#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: u32, height: u32, bpp: u16, row_bytes: u32) -> Vec<u8> {
    let stride = (row_bytes + 3) & !3;
    let data_size = stride * height;
    let mut bmp = vec![0u8; 54];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(54 + data_size).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&(width as i32).to_le_bytes());
    bmp[22..26].copy_from_slice(&(height as i32).to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&bpp.to_le_bytes());
    bmp[34..38].copy_from_slice(&data_size.to_le_bytes());
    for row in 0..height {
        for col in 0..row_bytes {
            bmp.push(if bpp == 1 && row_bytes == width { ((row + col) % 2) as u8 } else { (row * 31 + col * 7) as u8 });
        }
        bmp.extend(std::iter::repeat_n(0u8, (stride - row_bytes) as usize));
    }
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fs::write(format!("{dir}/gray8_3x2.bmp"), bmp(3, 2, 8, 3)).unwrap();
    fs::write(format!("{dir}/gray8_1x1.bmp"), bmp(1, 1, 8, 1)).unwrap();
    fs::write(format!("{dir}/mono_unpacked_5x3.bmp"), bmp(5, 3, 1, 5)).unwrap();
    fs::write(format!("{dir}/mono_packed_10x2.bmp"), bmp(10, 2, 1, 2)).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut truncated = bmp(4, 4, 8, 4);
    truncated.truncate(60);
    fs::write(format!("{dir}/gray8_truncated.bmp"), truncated).unwrap();

    println!("Generated seed corpus in {dir}/");
}
