//! The decoded image: one header, one pixel plane.

use alloc::vec;
use alloc::vec::Vec;
use core::slice::ChunksExact;

use enough::{Stop, Unstoppable};

use crate::bmp::header::Header;
use crate::error::BmpError;
use crate::pixel::{Depth, MonoPacking, Pixel};

/// A BMP image held in memory.
///
/// The plane is row-major with **row 0 at the bottom** of the picture, the
/// same order BMP stores rows on disk. Row/column accessors and the geometry
/// operations all use this orientation, so `pixel_at(0, 0)` is the
/// bottom-left pixel.
///
/// `pixels().len() == width() * height()` holds after every call that
/// returns successfully; calls that fail leave the image untouched.
#[derive(Clone, Debug)]
pub struct Bitmap {
    pub(crate) header: Header,
    pub(crate) pixels: Vec<Pixel>,
    pub(crate) fill: Pixel,
}

impl PartialEq for Bitmap {
    /// Header and plane; the fill pixel is editing state, not image content.
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header && self.pixels == other.pixels
    }
}

impl Eq for Bitmap {}

impl Bitmap {
    /// Blank image filled with the depth's default pixel.
    pub fn new(width: usize, height: usize, depth: Depth) -> Result<Self, BmpError> {
        Self::with_fill(width, height, depth.default_pixel())
    }

    /// Blank image where every pixel is `fill`. The depth follows `fill`.
    pub fn with_fill(width: usize, height: usize, fill: Pixel) -> Result<Self, BmpError> {
        let header = Header::new(width, height, fill.depth())?;
        let len = plane_len(width, height)?;
        Ok(Self {
            header,
            pixels: vec![fill; len],
            fill,
        })
    }

    /// Wrap an existing row-major, bottom-up plane.
    ///
    /// Fails with [`BmpError::DepthMismatch`] if `pixels.len() != width * height`
    /// and with [`BmpError::PixelDepthMismatch`] if the pixels mix depths.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self, BmpError> {
        let expected = plane_len(width, height)?;
        if pixels.len() != expected {
            return Err(BmpError::DepthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        let depth = pixels[0].depth();
        if let Some(odd) = pixels.iter().find(|px| px.depth() != depth) {
            return Err(BmpError::PixelDepthMismatch {
                expected: depth,
                actual: odd.depth(),
            });
        }
        Ok(Self {
            header: Header::new(width, height, depth)?,
            pixels,
            fill: depth.default_pixel(),
        })
    }

    pub(crate) fn from_decoded(header: Header, pixels: Vec<Pixel>) -> Self {
        let fill = header.depth.default_pixel();
        Self {
            header,
            pixels,
            fill,
        }
    }

    /// Decode with default settings. Same as [`crate::decode`].
    pub fn decode(data: &[u8]) -> Result<Self, BmpError> {
        crate::decode(data)
    }

    /// Encode to a freshly allocated BMP buffer.
    ///
    /// Size fields are recomputed from the current dimensions; the output is
    /// exactly `header().file_size()` bytes long.
    pub fn encode(&self) -> Result<Vec<u8>, BmpError> {
        self.encode_with_stop(&Unstoppable)
    }

    /// [`Bitmap::encode`] with cooperative cancellation, checked every 16 rows.
    pub fn encode_with_stop(&self, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
        crate::bmp::encode(&self.header, &self.pixels, stop)
    }

    pub fn width(&self) -> usize {
        self.header.width
    }

    pub fn height(&self) -> usize {
        self.header.height
    }

    pub fn depth(&self) -> Depth {
        self.header.depth
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The plane, row-major, bottom row first.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Iterate rows bottom to top.
    pub fn rows(&self) -> ChunksExact<'_, Pixel> {
        self.pixels.chunks_exact(self.width())
    }

    /// Pixel used for cells that [`Bitmap::resize_area`] has no source for.
    pub fn fill(&self) -> Pixel {
        self.fill
    }

    pub fn set_fill(&mut self, fill: Pixel) -> Result<(), BmpError> {
        self.check_depth(&fill)?;
        self.fill = fill;
        Ok(())
    }

    pub fn mono_packing(&self) -> MonoPacking {
        self.header.packing
    }

    /// Choose the 1-bpp row layout used by the next [`Bitmap::encode`].
    /// Has no effect on the encoded form of 8-bit images.
    pub fn set_mono_packing(&mut self, packing: MonoPacking) -> Result<(), BmpError> {
        self.header.set_packing(packing)
    }

    /// Bounds-checked read. `None` if `row >= height` or `col >= width`.
    pub fn pixel_at(&self, row: usize, col: usize) -> Option<&Pixel> {
        let idx = self.index_of(row, col)?;
        self.pixels.get(idx)
    }

    /// Bounds-checked read by flat index into the plane.
    pub fn pixel_at_index(&self, index: usize) -> Option<&Pixel> {
        self.pixels.get(index)
    }

    /// Set one pixel's numeric value.
    ///
    /// Fails with [`BmpError::OutOfRange`] outside the plane and with
    /// [`BmpError::InvalidPixelValue`] if the depth cannot hold `value`; either
    /// way nothing changes.
    pub fn set_pixel_at(&mut self, row: usize, col: usize, value: u32) -> Result<(), BmpError> {
        let idx = self.index_of(row, col).ok_or(BmpError::OutOfRange {
            row,
            col,
            width: self.width(),
            height: self.height(),
        })?;
        self.set_pixel_at_index(idx, value)
    }

    /// Set one pixel's numeric value by flat index.
    pub fn set_pixel_at_index(&mut self, index: usize, value: u32) -> Result<(), BmpError> {
        let (width, height) = (self.width(), self.height());
        let px = self.pixels.get_mut(index).ok_or(BmpError::OutOfRange {
            row: index / width,
            col: index % width,
            width,
            height,
        })?;
        px.set_value(value)
    }

    /// Zero-copy view of the plane (bottom row first).
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, Pixel> {
        imgref::ImgRef::new(&self.pixels[..], self.width(), self.height())
    }

    fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.height() || col >= self.width() {
            return None;
        }
        Some(row * self.width() + col)
    }

    pub(crate) fn check_depth(&self, px: &Pixel) -> Result<(), BmpError> {
        if px.depth() != self.depth() {
            return Err(BmpError::PixelDepthMismatch {
                expected: self.depth(),
                actual: px.depth(),
            });
        }
        Ok(())
    }
}

pub(crate) fn plane_len(width: usize, height: usize) -> Result<usize, BmpError> {
    if width == 0 || height == 0 {
        return Err(BmpError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(BmpError::DimensionsTooLarge { width, height })
}
