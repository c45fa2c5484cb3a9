//! BMP encoder: header, then rows bottom-up with zero padding.

use alloc::vec::Vec;

use enough::Stop;

use super::header::Header;
use super::rows::row_codec;
use crate::error::BmpError;
use crate::pixel::Pixel;

/// Encode `pixels` under `header` into a fresh buffer of exactly
/// `header.file_size()` bytes.
pub(crate) fn encode_bmp(
    header: &Header,
    pixels: &[Pixel],
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    let (width, height) = (header.width, header.height);
    let too_large = || BmpError::DimensionsTooLarge { width, height };

    let expected = width.checked_mul(height).ok_or_else(too_large)?;
    if pixels.len() != expected {
        return Err(BmpError::DepthMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    let real = header.row_bytes().ok_or_else(too_large)?;
    let pad_bytes = header.padding_bytes().ok_or_else(too_large)?;
    let file_size = header.file_size as usize;

    let mut out = Vec::with_capacity(file_size);
    header.write_to(&mut out);

    let codec = row_codec(header.depth, header.packing);
    for (row_idx, row) in pixels.chunks_exact(width).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        let row_start = out.len();
        codec.encode_row(row, &mut out)?;
        debug_assert_eq!(out.len() - row_start, real);
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    debug_assert_eq!(out.len(), file_size);
    Ok(out)
}
