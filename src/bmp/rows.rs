//! Per-depth row codecs.
//!
//! The codec base slices the input into rows and strips padding; a row codec
//! only ever sees the real pixel bytes of one row.

use alloc::vec::Vec;

use crate::error::BmpError;
use crate::pixel::{Depth, MonoPacking, Pixel};

/// Translates between the raw bytes of one row and [`Pixel`] values.
pub(crate) trait RowCodec: Sync {
    fn depth(&self) -> Depth;

    /// Decode `width` pixels from `raw`, appending them to `out`.
    ///
    /// `raw` is exactly `ceil(width * storage_bits / 8)` bytes.
    fn decode_row(&self, raw: &[u8], width: usize, out: &mut Vec<Pixel>) -> Result<(), BmpError>;

    /// Append the raw bytes for `row` to `out`, without padding.
    fn encode_row(&self, row: &[Pixel], out: &mut Vec<u8>) -> Result<(), BmpError>;
}

struct Gray8Rows;

struct MonoRows(MonoPacking);

static GRAY8: Gray8Rows = Gray8Rows;
static MONO_UNPACKED: MonoRows = MonoRows(MonoPacking::Unpacked);
static MONO_PACKED: MonoRows = MonoRows(MonoPacking::Packed);

/// The row codec for a depth and 1-bpp layout.
pub(crate) fn row_codec(depth: Depth, packing: MonoPacking) -> &'static dyn RowCodec {
    match (depth, packing) {
        (Depth::Gray8, _) => &GRAY8,
        (Depth::Mono, MonoPacking::Unpacked) => &MONO_UNPACKED,
        (Depth::Mono, MonoPacking::Packed) => &MONO_PACKED,
    }
}

fn mismatch(expected: Depth, px: &Pixel) -> BmpError {
    BmpError::PixelDepthMismatch {
        expected,
        actual: px.depth(),
    }
}

impl RowCodec for Gray8Rows {
    fn depth(&self) -> Depth {
        Depth::Gray8
    }

    fn decode_row(&self, raw: &[u8], width: usize, out: &mut Vec<Pixel>) -> Result<(), BmpError> {
        out.extend(raw.iter().take(width).map(|&v| Pixel::Gray8(v)));
        Ok(())
    }

    fn encode_row(&self, row: &[Pixel], out: &mut Vec<u8>) -> Result<(), BmpError> {
        for px in row {
            match *px {
                Pixel::Gray8(v) => out.push(v),
                _ => return Err(mismatch(Depth::Gray8, px)),
            }
        }
        Ok(())
    }
}

impl RowCodec for MonoRows {
    fn depth(&self) -> Depth {
        Depth::Mono
    }

    fn decode_row(&self, raw: &[u8], width: usize, out: &mut Vec<Pixel>) -> Result<(), BmpError> {
        match self.0 {
            MonoPacking::Unpacked => {
                for &v in raw.iter().take(width) {
                    if v > 1 {
                        return Err(BmpError::InvalidPixelValue {
                            depth: Depth::Mono,
                            value: u32::from(v),
                        });
                    }
                    out.push(Pixel::Mono(v == 1));
                }
            }
            MonoPacking::Packed => {
                // MSB is the leftmost pixel.
                out.extend(
                    raw.iter()
                        .flat_map(|&byte| (0..8).rev().map(move |bit| (byte >> bit) & 1 == 1))
                        .take(width)
                        .map(Pixel::Mono),
                );
            }
        }
        Ok(())
    }

    fn encode_row(&self, row: &[Pixel], out: &mut Vec<u8>) -> Result<(), BmpError> {
        match self.0 {
            MonoPacking::Unpacked => {
                for px in row {
                    match *px {
                        Pixel::Mono(on) => out.push(u8::from(on)),
                        _ => return Err(mismatch(Depth::Mono, px)),
                    }
                }
            }
            MonoPacking::Packed => {
                for chunk in row.chunks(8) {
                    let mut byte = 0u8;
                    for (i, px) in chunk.iter().enumerate() {
                        match *px {
                            Pixel::Mono(true) => byte |= 0x80 >> i,
                            Pixel::Mono(false) => {}
                            _ => return Err(mismatch(Depth::Mono, px)),
                        }
                    }
                    out.push(byte);
                }
            }
        }
        Ok(())
    }
}
