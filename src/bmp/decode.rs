//! Pixel data decoder: walks the bottom-up rows after the header.

use alloc::vec::Vec;

use enough::Stop;

use super::header::Header;
use super::rows::row_codec;
use crate::error::BmpError;
use crate::pixel::Pixel;

/// Decode the pixel plane described by `header` out of `data`.
///
/// Row 0 of the result is the first row on disk, i.e. the bottom of the
/// picture.
pub(crate) fn decode_pixels(
    data: &[u8],
    header: &Header,
    stop: &dyn Stop,
) -> Result<Vec<Pixel>, BmpError> {
    let (width, height) = (header.width, header.height);
    let too_large = || BmpError::DimensionsTooLarge { width, height };

    let stride = header.row_stride().ok_or_else(too_large)?;
    let real = header.row_bytes().ok_or_else(too_large)?;
    let start = header.data_offset as usize;
    let needed = stride
        .checked_mul(height)
        .and_then(|size| size.checked_add(start))
        .ok_or_else(too_large)?;
    let pixel_data = data
        .get(start..needed)
        .ok_or(BmpError::TruncatedData {
            needed,
            actual: data.len(),
        })?;

    let codec = row_codec(header.depth, header.packing);
    log::trace!(
        "decoding {width}x{height} {:?} rows: stride={stride} real={real}",
        codec.depth()
    );

    let plane_len = width.checked_mul(height).ok_or_else(too_large)?;
    let mut pixels = Vec::with_capacity(plane_len);
    for (row_idx, row) in pixel_data.chunks_exact(stride).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        codec.decode_row(&row[..real], width, &mut pixels)?;
    }

    debug_assert_eq!(pixels.len(), plane_len);
    Ok(pixels)
}
