//! # zenbitplane
//!
//! Uncompressed BMP codec with an in-memory editing layer.
//!
//! A buffer decodes into a [`Bitmap`]: a [`Header`] plus a plane of [`Pixel`]
//! values. The plane can be cropped, padded, flipped, transposed and rotated
//! in place, then encoded back to a BMP buffer.
//!
//! ## Supported Formats
//!
//! - **8-bit**: one byte per pixel, stored verbatim (grayscale or raw palette index)
//! - **1-bit**: values 0/1, either one byte per pixel ([`MonoPacking::Unpacked`],
//!   the default) or standard 8-pixels-per-byte packing ([`MonoPacking::Packed`])
//!
//! Rows are padded to 4 bytes. The colour table and any extended header
//! bytes are kept verbatim and written back.
//!
//! ## Orientation
//!
//! Row 0 of the plane is the **bottom** row of the picture, matching the
//! on-disk order. `pixel_at(row, col)`, the flips and [`Bitmap::rotate`] all
//! use this convention.
//!
//! ## Non-Goals
//!
//! - RLE and bitfield compression
//! - Palette lookups or colour conversion
//! - Formats other than BMP
//!
//! ## Usage
//!
//! ```no_run
//! use zenbitplane::{Bitmap, Depth};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! let mut image = zenbitplane::decode(data)?;
//! println!("{}x{} {:?}", image.width(), image.height(), image.depth());
//!
//! image.flip_vertical();
//! image.rotate(1)?;
//! image.resize_area(64, 64, 8, 8)?;
//! image.set_pixel_at(0, 0, 1)?;
//!
//! let encoded = image.encode()?;
//! # let _ = (encoded, Bitmap::new(1, 1, Depth::Mono));
//! # Ok::<(), zenbitplane::BmpError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bitmap;
mod bmp;
mod decode;
mod error;
mod geometry;
mod limits;
mod pixel;

#[cfg(feature = "std")]
mod io;

// Re-exports
pub use bitmap::Bitmap;
pub use bmp::header::{HEADER_LEN, Header, SIGNATURE, padding_bytes, row_stride};
pub use decode::{DecodeRequest, decode};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::BmpError;
pub use limits::Limits;
pub use pixel::{Depth, MonoPacking, Pixel};

#[cfg(feature = "std")]
pub use io::{FileError, read_bmp, write_bmp};

/// Parse only the header of a BMP buffer, assuming unpacked 1-bpp rows.
pub fn decode_header(data: &[u8]) -> Result<Header, BmpError> {
    bmp::header::decode_header(data, MonoPacking::default())
}
