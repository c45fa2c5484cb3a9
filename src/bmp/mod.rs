//! Uncompressed BMP codec base: header handling, row/stride arithmetic and
//! dispatch to the per-depth row codecs.
//!
//! Use [`crate::decode`], [`crate::DecodeRequest`] or [`crate::Bitmap::encode`].

mod decode;
mod encode;
pub(crate) mod header;
mod rows;

use alloc::vec::Vec;
use enough::Stop;

use crate::bitmap::Bitmap;
use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::{MonoPacking, Pixel};

/// Decode a whole BMP buffer into a [`Bitmap`].
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    packing: MonoPacking,
    stop: &dyn Stop,
) -> Result<Bitmap, BmpError> {
    let header = header::decode_header(data, packing)?;
    check_limits(limits, header.width, header.height)?;
    stop.check()?;
    let pixels = decode::decode_pixels(data, &header, stop)?;
    Ok(Bitmap::from_decoded(header, pixels))
}

fn check_limits(limits: Option<&Limits>, width: usize, height: usize) -> Result<(), BmpError> {
    if let Some(limits) = limits {
        limits.check(width, height)?;
        let out_bytes = width
            .saturating_mul(height)
            .saturating_mul(core::mem::size_of::<Pixel>());
        limits.check_memory(out_bytes)?;
    }
    Ok(())
}

/// Encode a header and its plane to BMP bytes.
pub(crate) fn encode(
    header: &header::Header,
    pixels: &[Pixel],
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    stop.check()?;
    encode::encode_bmp(header, pixels, stop)
}
