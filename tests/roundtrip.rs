use std::sync::atomic::{AtomicUsize, Ordering};

use zenbitplane::*;

fn noise_pattern(w: usize, h: usize) -> Vec<Pixel> {
    let mut state: u32 = 0xDEAD_BEEF;
    (0..w * h)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            Pixel::Gray8(state as u8)
        })
        .collect()
}

fn checkerboard_mono(w: usize, h: usize) -> Vec<Pixel> {
    let mut pixels = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            pixels.push(Pixel::Mono((x + y) % 2 == 0));
        }
    }
    pixels
}

/// Hand-built 8-bit BMP with the given bottom-up rows and zero padding.
fn gray8_bmp(width: usize, rows: &[&[u8]]) -> Vec<u8> {
    let stride = (width + 3) & !3;
    let data_size = stride * rows.len();
    let file_size = 54 + data_size;
    let mut bmp = vec![0u8; 54];
    bmp[0] = b'B';
    bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(file_size as u32).to_le_bytes());
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&(width as i32).to_le_bytes());
    bmp[22..26].copy_from_slice(&(rows.len() as i32).to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&8u16.to_le_bytes()); // bpp
    bmp[34..38].copy_from_slice(&(data_size as u32).to_le_bytes());
    bmp[38..42].copy_from_slice(&2835u32.to_le_bytes());
    bmp[42..46].copy_from_slice(&2835u32.to_le_bytes());
    for row in rows {
        bmp.extend_from_slice(row);
        bmp.extend(std::iter::repeat_n(0u8, stride - width));
    }
    bmp
}

#[test]
fn gray8_roundtrip() {
    let pixels = noise_pattern(7, 5);
    let image = Bitmap::from_pixels(7, 5, pixels.clone()).unwrap();
    let encoded = image.encode().unwrap();

    assert_eq!(&encoded[0..2], b"BM");
    assert_eq!(encoded.len(), image.header().file_size() as usize);
    assert_eq!(encoded.len(), 54 + 8 * 5);

    let decoded = decode(&encoded).unwrap();
    assert_eq!(decoded.width(), 7);
    assert_eq!(decoded.height(), 5);
    assert_eq!(decoded.depth(), Depth::Gray8);
    assert_eq!(decoded.pixels(), &pixels[..]);
    assert_eq!(decoded, image);
}

#[test]
fn mono_unpacked_roundtrip() {
    let pixels = checkerboard_mono(5, 3);
    let image = Bitmap::from_pixels(5, 3, pixels.clone()).unwrap();
    let encoded = image.encode().unwrap();

    // Header says 1 bpp, but rows are a byte per pixel padded to 8.
    assert_eq!(u16::from_le_bytes([encoded[28], encoded[29]]), 1);
    assert_eq!(encoded.len(), 54 + 8 * 3);
    assert_eq!(&encoded[54..62], &[1, 0, 1, 0, 1, 0, 0, 0]);

    let decoded = decode(&encoded).unwrap();
    assert_eq!(decoded.pixels(), &pixels[..]);
    assert_eq!(decoded, image);
}

#[test]
fn mono_packed_roundtrip() {
    let pixels = checkerboard_mono(10, 4);
    let mut image = Bitmap::from_pixels(10, 4, pixels.clone()).unwrap();
    image.set_mono_packing(MonoPacking::Packed).unwrap();
    let encoded = image.encode().unwrap();

    assert_eq!(encoded.len(), 54 + 4 * 4);
    assert_eq!(&encoded[54..58], &[0b1010_1010, 0b1000_0000, 0, 0]);

    let decoded = DecodeRequest::new(&encoded)
        .with_mono_packing(MonoPacking::Packed)
        .decode(Unstoppable)
        .unwrap();
    assert_eq!(decoded.mono_packing(), MonoPacking::Packed);
    assert_eq!(decoded.pixels(), &pixels[..]);
    assert_eq!(decoded, image);
}

#[test]
fn handmade_file_is_reproduced_byte_for_byte() {
    let bmp = gray8_bmp(3, &[&[1, 2, 3], &[4, 5, 6]]);
    let decoded = decode(&bmp).unwrap();
    assert_eq!(decoded.encode().unwrap(), bmp);
}

#[test]
fn padding_bytes_are_discarded() {
    let mut bmp = gray8_bmp(1, &[&[10], &[20]]);
    // Garbage in the padding of the first row.
    bmp[55] = 0xAA;
    bmp[56] = 0xBB;
    let decoded = decode(&bmp).unwrap();
    assert_eq!(
        decoded.pixels(),
        &[Pixel::Gray8(10), Pixel::Gray8(20)]
    );
    // Re-encoding writes zero padding.
    let encoded = decoded.encode().unwrap();
    assert_eq!(&encoded[55..58], &[0, 0, 0]);
}

#[test]
fn bottom_row_is_row_zero() {
    let bmp = gray8_bmp(2, &[&[10, 20], &[30, 40]]);
    let image = decode(&bmp).unwrap();
    assert_eq!(image.pixel_at(0, 0), Some(&Pixel::Gray8(10)));
    assert_eq!(image.pixel_at(0, 1), Some(&Pixel::Gray8(20)));
    assert_eq!(image.pixel_at(1, 0), Some(&Pixel::Gray8(30)));
    assert_eq!(image.pixel_at_index(3), Some(&Pixel::Gray8(40)));
}

#[test]
fn truncated_pixel_data_is_rejected() {
    let bmp = gray8_bmp(2, &[&[10, 20], &[30, 40]]);
    let result = decode(&bmp[..bmp.len() - 1]);
    match result {
        Err(BmpError::TruncatedData { needed, actual }) => {
            assert_eq!(needed, bmp.len());
            assert_eq!(actual, bmp.len() - 1);
        }
        other => panic!("expected TruncatedData, got {other:?}"),
    }
}

#[test]
fn short_or_foreign_buffers_are_malformed() {
    assert!(matches!(decode(&[]), Err(BmpError::MalformedHeader(_))));
    assert!(matches!(decode(b"BM"), Err(BmpError::MalformedHeader(_))));

    let mut bmp = gray8_bmp(1, &[&[1]]);
    bmp[1] = b'A';
    assert!(matches!(decode(&bmp), Err(BmpError::MalformedHeader(_))));
}

#[test]
fn wrong_file_size_field_is_recomputed() {
    let mut bmp = gray8_bmp(2, &[&[1, 2]]);
    bmp[2..6].copy_from_slice(&9999u32.to_le_bytes());
    let image = decode(&bmp).unwrap();
    assert_eq!(image.header().file_size(), 58);
    let encoded = image.encode().unwrap();
    assert_eq!(u32::from_le_bytes(encoded[2..6].try_into().unwrap()), 58);
}

#[test]
fn colour_table_survives_roundtrip() {
    let plain = gray8_bmp(2, &[&[0, 1]]);
    let palette = [0u8, 0, 0, 0, 255, 255, 255, 0];
    let mut bmp = plain[..54].to_vec();
    bmp.extend_from_slice(&palette);
    bmp.extend_from_slice(&plain[54..]);
    let file_size = bmp.len() as u32;
    bmp[2..6].copy_from_slice(&file_size.to_le_bytes());
    bmp[10..14].copy_from_slice(&62u32.to_le_bytes());

    let image = decode(&bmp).unwrap();
    assert_eq!(image.header().data_offset(), 62);
    assert_eq!(image.header().extra_bytes(), &palette);
    assert_eq!(image.encode().unwrap(), bmp);
}

#[test]
fn header_probe_matches_decode() {
    let bmp = gray8_bmp(5, &[&[1, 2, 3, 4, 5], &[6, 7, 8, 9, 10], &[0; 5]]);
    let header = decode_header(&bmp).unwrap();
    assert_eq!(header.width(), 5);
    assert_eq!(header.height(), 3);
    assert_eq!(header.bits_per_pixel(), 8);
    assert_eq!(header.row_stride(), Some(8));
    assert_eq!(header.padding_bytes(), Some(3));
    assert_eq!(&header, decode(&bmp).unwrap().header());
}

#[test]
fn encode_after_geometry_recomputes_sizes() {
    let mut image = Bitmap::new(3, 3, Depth::Gray8).unwrap();
    image.resize_area(9, 2, 0, 0).unwrap();
    let encoded = image.encode().unwrap();
    assert_eq!(encoded.len(), 54 + 12 * 2);
    let decoded = decode(&encoded).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (9, 2));
}

// ── Cancellation ─────────────────────────────────────────────────────

/// Passes `remaining` checks, then reports cancellation.
struct CancelAfter {
    remaining: AtomicUsize,
}

impl CancelAfter {
    fn new(checks: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(checks),
        }
    }
}

impl Stop for CancelAfter {
    fn check(&self) -> Result<(), StopReason> {
        let left = self.remaining.load(Ordering::Relaxed);
        if left == 0 {
            return Err(StopReason::Cancelled);
        }
        self.remaining.store(left - 1, Ordering::Relaxed);
        Ok(())
    }
}

#[test]
fn cancelled_stop_aborts_decode() {
    let image = Bitmap::from_pixels(4, 3, noise_pattern(4, 3)).unwrap();
    let bmp = image.encode().unwrap();
    assert!(matches!(
        DecodeRequest::new(&bmp).decode(CancelAfter::new(0)),
        Err(BmpError::Cancelled(StopReason::Cancelled))
    ));
}

#[test]
fn cancelled_stop_aborts_encode() {
    let image = Bitmap::from_pixels(4, 3, noise_pattern(4, 3)).unwrap();
    assert!(matches!(
        image.encode_with_stop(&CancelAfter::new(0)),
        Err(BmpError::Cancelled(StopReason::Cancelled))
    ));
}

#[test]
fn stop_is_checked_between_rows() {
    // 40 rows: checked before the rows, then at rows 0, 16 and 32.
    let image = Bitmap::from_pixels(3, 40, noise_pattern(3, 40)).unwrap();
    let bmp = image.encode().unwrap();

    assert!(matches!(
        DecodeRequest::new(&bmp).decode(CancelAfter::new(2)),
        Err(BmpError::Cancelled(_))
    ));
    assert!(matches!(
        image.encode_with_stop(&CancelAfter::new(3)),
        Err(BmpError::Cancelled(_))
    ));

    let decoded = DecodeRequest::new(&bmp).decode(CancelAfter::new(4)).unwrap();
    assert_eq!(decoded, image);
    assert_eq!(image.encode_with_stop(&CancelAfter::new(4)).unwrap(), bmp);
}

// ── Limits ───────────────────────────────────────────────────────────

#[test]
fn limits_max_width() {
    let bmp = gray8_bmp(2, &[&[0, 0], &[0, 0]]);
    let limits = Limits {
        max_width: Some(1),
        ..Default::default()
    };
    assert!(matches!(
        DecodeRequest::new(&bmp).with_limits(&limits).decode(Unstoppable),
        Err(BmpError::LimitExceeded(_))
    ));
}

#[test]
fn limits_max_pixels_and_memory() {
    let bmp = gray8_bmp(2, &[&[0, 0], &[0, 0]]);
    let limits = Limits {
        max_pixels: Some(3),
        ..Default::default()
    };
    assert!(DecodeRequest::new(&bmp).with_limits(&limits).decode(Unstoppable).is_err());

    let limits = Limits {
        max_memory_bytes: Some(1),
        ..Default::default()
    };
    assert!(DecodeRequest::new(&bmp).with_limits(&limits).decode(Unstoppable).is_err());

    let roomy = Limits {
        max_width: Some(2),
        max_height: Some(2),
        max_pixels: Some(4),
        max_memory_bytes: Some(1 << 20),
    };
    assert!(DecodeRequest::new(&bmp).with_limits(&roomy).decode(Unstoppable).is_ok());
}

#[test]
fn memory_limit_counts_the_pixel_plane() {
    // 3 wide: 4-byte stride, but padding does not count toward the limit.
    let bmp = gray8_bmp(3, &[&[1, 2, 3], &[4, 5, 6]]);
    let plane_bytes = (3 * 2 * std::mem::size_of::<Pixel>()) as u64;

    let exact = Limits {
        max_memory_bytes: Some(plane_bytes),
        ..Default::default()
    };
    assert!(DecodeRequest::new(&bmp).with_limits(&exact).decode(Unstoppable).is_ok());

    let short = Limits {
        max_memory_bytes: Some(plane_bytes - 1),
        ..Default::default()
    };
    assert!(matches!(
        DecodeRequest::new(&bmp).with_limits(&short).decode(Unstoppable),
        Err(BmpError::LimitExceeded(_))
    ));
}

#[cfg(feature = "std")]
#[test]
fn file_wrapper_roundtrip() {
    let path = std::env::temp_dir().join(format!("zenbitplane-{}.bmp", std::process::id()));
    let image = Bitmap::from_pixels(3, 2, noise_pattern(3, 2)).unwrap();
    write_bmp(&image, &path).unwrap();
    let read = read_bmp(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(read, image);
}
