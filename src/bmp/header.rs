//! BITMAPFILEHEADER + BITMAPINFOHEADER parsing and serialization.
//!
//! Only the fields the codec needs are modelled. Everything between the end
//! of the 40-byte info header and the pixel data (extended V4/V5 header
//! fields, colour table) is carried through as an opaque block.

use alloc::vec::Vec;

use crate::error::BmpError;
use crate::pixel::{Depth, MonoPacking};

/// The two magic bytes every BMP file starts with.
pub const SIGNATURE: [u8; 2] = *b"BM";

/// File header (14 bytes) plus BITMAPINFOHEADER (40 bytes).
pub const HEADER_LEN: usize = 54;

const FILE_HEADER_LEN: usize = 14;
const INFO_HEADER_LEN: u32 = 40;
/// 72 DPI in pixels per meter.
const DEFAULT_PPM: u32 = 2835;

/// Number of bytes one row occupies on disk: the packed pixel bytes rounded
/// up to a multiple of 4.
///
/// Returns `None` on overflow.
pub fn row_stride(width: usize, bits_per_pixel: usize) -> Option<usize> {
    let bytes = row_bytes(width, bits_per_pixel)?;
    Some(bytes.checked_add(3)? & !3)
}

/// Zero bytes appended to every row to reach [`row_stride`].
pub fn padding_bytes(width: usize, bits_per_pixel: usize) -> Option<usize> {
    Some(row_stride(width, bits_per_pixel)? - row_bytes(width, bits_per_pixel)?)
}

/// Bytes of actual pixel values in one row, `ceil(width * bpp / 8)`.
pub(crate) fn row_bytes(width: usize, bits_per_pixel: usize) -> Option<usize> {
    Some(width.checked_mul(bits_per_pixel)?.div_ceil(8))
}

/// Bits each pixel occupies in the row bytes, which differs from the header's
/// bpp field for unpacked monochrome.
pub(crate) fn storage_bits(depth: Depth, packing: MonoPacking) -> usize {
    match (depth, packing) {
        (Depth::Mono, MonoPacking::Unpacked) => 8,
        (depth, _) => usize::from(depth.bits_per_pixel()),
    }
}

/// Parsed BMP header.
///
/// `file_size`, `data_offset` and `data_size` always describe the image as it
/// would be written now: they are recomputed whenever the dimensions change,
/// never trusted from the input file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub(crate) file_size: u32,
    pub(crate) data_offset: u32,
    pub(crate) info_size: u32,
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) depth: Depth,
    pub(crate) packing: MonoPacking,
    pub(crate) data_size: u32,
    pub(crate) pixels_per_meter: (u32, u32),
    pub(crate) colors_used: u32,
    pub(crate) colors_important: u32,
    /// Raw bytes between the info header and the pixel data.
    pub(crate) extra: Vec<u8>,
}

impl Header {
    /// Header for a fresh image with no colour table.
    pub fn new(width: usize, height: usize, depth: Depth) -> Result<Self, BmpError> {
        let mut header = Header {
            file_size: 0,
            data_offset: HEADER_LEN as u32,
            info_size: INFO_HEADER_LEN,
            width: 0,
            height: 0,
            depth,
            packing: MonoPacking::default(),
            data_size: 0,
            pixels_per_meter: (DEFAULT_PPM, DEFAULT_PPM),
            colors_used: 0,
            colors_important: 0,
            extra: Vec::new(),
        };
        header.set_dimensions(width, height)?;
        Ok(header)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    pub fn bits_per_pixel(&self) -> u16 {
        self.depth.bits_per_pixel()
    }

    pub fn mono_packing(&self) -> MonoPacking {
        self.packing
    }

    /// Total encoded length in bytes.
    pub fn file_size(&self) -> u32 {
        self.file_size
    }

    /// Byte offset of the first pixel row.
    pub fn data_offset(&self) -> u32 {
        self.data_offset
    }

    /// Length of the pixel data in bytes, padding included.
    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    /// Opaque bytes kept between the info header and the pixel data
    /// (colour table, extended header fields).
    pub fn extra_bytes(&self) -> &[u8] {
        &self.extra
    }

    /// On-disk bytes per row, padding included.
    pub fn row_stride(&self) -> Option<usize> {
        row_stride(self.width, self.storage_bits())
    }

    /// Zero bytes at the end of each row.
    pub fn padding_bytes(&self) -> Option<usize> {
        padding_bytes(self.width, self.storage_bits())
    }

    pub(crate) fn storage_bits(&self) -> usize {
        storage_bits(self.depth, self.packing)
    }

    /// Real (unpadded) bytes per row.
    pub(crate) fn row_bytes(&self) -> Option<usize> {
        row_bytes(self.width, self.storage_bits())
    }

    /// Change the dimensions and recompute every derived size field.
    ///
    /// On error the header is unchanged.
    pub(crate) fn set_dimensions(&mut self, width: usize, height: usize) -> Result<(), BmpError> {
        if width == 0 || height == 0 {
            return Err(BmpError::InvalidDimensions { width, height });
        }
        // Width and height are written as i32.
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(too_large(width, height));
        }
        let (data_offset, data_size, file_size) = self
            .sizes_for(width, height, self.packing)
            .ok_or_else(|| too_large(width, height))?;
        self.width = width;
        self.height = height;
        self.data_offset = data_offset;
        self.data_size = data_size;
        self.file_size = file_size;
        Ok(())
    }

    /// Change the 1-bpp row layout, recomputing the size fields.
    pub(crate) fn set_packing(&mut self, packing: MonoPacking) -> Result<(), BmpError> {
        let (data_offset, data_size, file_size) = self
            .sizes_for(self.width, self.height, packing)
            .ok_or_else(|| too_large(self.width, self.height))?;
        self.packing = packing;
        self.data_offset = data_offset;
        self.data_size = data_size;
        self.file_size = file_size;
        Ok(())
    }

    fn sizes_for(&self, width: usize, height: usize, packing: MonoPacking) -> Option<(u32, u32, u32)> {
        let stride = row_stride(width, storage_bits(self.depth, packing))?;
        let data_offset = HEADER_LEN.checked_add(self.extra.len())?;
        let data_size = stride.checked_mul(height)?;
        let file_size = data_offset.checked_add(data_size)?;
        Some((
            u32::try_from(data_offset).ok()?,
            u32::try_from(data_size).ok()?,
            u32::try_from(file_size).ok()?,
        ))
    }

    /// Serialize the header and the opaque extra block.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data_offset as usize);
        self.write_to(&mut out);
        out
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        // File header (14 bytes)
        out.extend_from_slice(&SIGNATURE);
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&[0u8; 4]); // reserved
        out.extend_from_slice(&self.data_offset.to_le_bytes());

        // BITMAPINFOHEADER (40 bytes). set_dimensions keeps both within i32.
        out.extend_from_slice(&self.info_size.to_le_bytes());
        out.extend_from_slice(&(self.width as i32).to_le_bytes());
        out.extend_from_slice(&(self.height as i32).to_le_bytes()); // positive = bottom-up
        out.extend_from_slice(&1u16.to_le_bytes()); // planes
        out.extend_from_slice(&self.bits_per_pixel().to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // compression: BI_RGB
        out.extend_from_slice(&self.data_size.to_le_bytes());
        out.extend_from_slice(&self.pixels_per_meter.0.to_le_bytes());
        out.extend_from_slice(&self.pixels_per_meter.1.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&self.colors_important.to_le_bytes());

        out.extend_from_slice(&self.extra);
    }
}

fn too_large(width: usize, height: usize) -> BmpError {
    BmpError::DimensionsTooLarge { width, height }
}

fn le_u16(data: &[u8], off: usize) -> Result<u16, BmpError> {
    data.get(off..off + 2)
        .and_then(|b| b.try_into().ok())
        .map(u16::from_le_bytes)
        .ok_or_else(|| BmpError::MalformedHeader(alloc::format!("no u16 at offset {off}")))
}

fn le_u32(data: &[u8], off: usize) -> Result<u32, BmpError> {
    data.get(off..off + 4)
        .and_then(|b| b.try_into().ok())
        .map(u32::from_le_bytes)
        .ok_or_else(|| BmpError::MalformedHeader(alloc::format!("no u32 at offset {off}")))
}

fn le_i32(data: &[u8], off: usize) -> Result<i32, BmpError> {
    le_u32(data, off).map(|v| v as i32)
}

/// Parse the BMP header at the start of `data`.
///
/// Pixel data is not touched, so this doubles as a cheap probe.
pub fn decode_header(data: &[u8], packing: MonoPacking) -> Result<Header, BmpError> {
    if data.len() < HEADER_LEN {
        return Err(BmpError::MalformedHeader(alloc::format!(
            "need {HEADER_LEN} header bytes, got {}",
            data.len()
        )));
    }
    if data[..2] != SIGNATURE {
        return Err(BmpError::MalformedHeader(alloc::format!(
            "bad signature {:02x?}",
            &data[..2]
        )));
    }

    let file_size_field = le_u32(data, 2)?;
    let data_offset = le_u32(data, 10)?;
    let info_size = le_u32(data, 14)?;
    let width = le_i32(data, 18)?;
    let height = le_i32(data, 22)?;
    let planes = le_u16(data, 26)?;
    let bpp = le_u16(data, 28)?;
    let compression = le_u32(data, 30)?;
    let x_ppm = le_u32(data, 38)?;
    let y_ppm = le_u32(data, 42)?;
    let colors_used = le_u32(data, 46)?;
    let colors_important = le_u32(data, 50)?;

    log::trace!(
        "bmp header: {width}x{height} bpp={bpp} offset={data_offset} info={info_size} compression={compression}"
    );

    if info_size < INFO_HEADER_LEN {
        return Err(BmpError::MalformedHeader(alloc::format!(
            "info header size {info_size} below {INFO_HEADER_LEN}"
        )));
    }
    if width <= 0 || height <= 0 {
        return Err(BmpError::MalformedHeader(alloc::format!(
            "non-positive dimensions {width}x{height}"
        )));
    }
    let depth = Depth::from_bits_per_pixel(bpp).ok_or_else(|| {
        BmpError::UnsupportedVariant(alloc::format!("{bpp} bits per pixel"))
    })?;
    if compression != 0 {
        return Err(BmpError::UnsupportedVariant(alloc::format!(
            "compression type {compression}"
        )));
    }
    let data_offset_usize = data_offset as usize;
    let info_end = FILE_HEADER_LEN.saturating_add(info_size as usize);
    if data_offset_usize < info_end || data_offset_usize > data.len() {
        return Err(BmpError::MalformedHeader(alloc::format!(
            "pixel data offset {data_offset} outside {info_end}..={}",
            data.len()
        )));
    }
    if planes != 1 {
        log::warn!("bmp planes field is {planes}, expected 1");
    }
    if file_size_field as usize != data.len() {
        log::warn!(
            "bmp file size field {file_size_field} disagrees with buffer length {}",
            data.len()
        );
    }

    let mut header = Header {
        file_size: 0,
        data_offset,
        info_size,
        width: 0,
        height: 0,
        depth,
        packing,
        data_size: 0,
        pixels_per_meter: (x_ppm, y_ppm),
        colors_used,
        colors_important,
        extra: data[HEADER_LEN..data_offset_usize].to_vec(),
    };
    header.set_dimensions(width as usize, height as usize)?;
    Ok(header)
}
