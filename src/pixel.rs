use crate::error::BmpError;

/// Bit depth of a bitmap, and with it the pixel variant its plane holds.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Depth {
    /// 1 bit per pixel, values 0 or 1.
    Mono,
    /// 8 bits per pixel, values 0–255 (grayscale or raw palette index).
    Gray8,
}

impl Depth {
    /// Value of the `bitsPerPixel` header field for this depth.
    pub fn bits_per_pixel(self) -> u16 {
        match self {
            Self::Mono => 1,
            Self::Gray8 => 8,
        }
    }

    /// Depth for a `bitsPerPixel` header field, if supported.
    pub fn from_bits_per_pixel(bpp: u16) -> Option<Self> {
        match bpp {
            1 => Some(Self::Mono),
            8 => Some(Self::Gray8),
            _ => None,
        }
    }

    /// Largest numeric value a pixel of this depth can hold.
    pub fn max_value(self) -> u32 {
        match self {
            Self::Mono => 1,
            Self::Gray8 => 255,
        }
    }

    /// Pixel used to fill cells that have no source, e.g. when padding.
    ///
    /// White for monochrome, black for 8-bit.
    pub fn default_pixel(self) -> Pixel {
        match self {
            Self::Mono => Pixel::Mono(true),
            Self::Gray8 => Pixel::Gray8(0),
        }
    }
}

/// On-disk row layout for 1-bit images.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MonoPacking {
    /// One byte per pixel holding 0 or 1.
    ///
    /// Not the standard BMP layout: the header still says 1 bpp, but rows are
    /// `width` bytes (plus padding) long. This crate writes it unless told
    /// otherwise.
    #[default]
    Unpacked,
    /// Standard BMP packing: 8 pixels per byte, most significant bit first.
    Packed,
}

/// One picture element. The variant is the depth it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pixel {
    Mono(bool),
    Gray8(u8),
}

impl Pixel {
    /// Build a pixel of `depth` from a numeric value, rejecting values the
    /// depth cannot represent.
    pub fn with_value(depth: Depth, value: u32) -> Result<Self, BmpError> {
        match depth {
            Depth::Mono if value <= 1 => Ok(Self::Mono(value == 1)),
            Depth::Gray8 => u8::try_from(value)
                .map(Self::Gray8)
                .map_err(|_| BmpError::InvalidPixelValue { depth, value }),
            _ => Err(BmpError::InvalidPixelValue { depth, value }),
        }
    }

    pub fn depth(&self) -> Depth {
        match self {
            Self::Mono(_) => Depth::Mono,
            Self::Gray8(_) => Depth::Gray8,
        }
    }

    /// Numeric value, independent of depth.
    pub fn value(&self) -> u32 {
        match *self {
            Self::Mono(on) => u32::from(on),
            Self::Gray8(v) => u32::from(v),
        }
    }

    /// Replace the value, keeping the depth. On error the pixel is unchanged.
    pub fn set_value(&mut self, value: u32) -> Result<(), BmpError> {
        *self = Self::with_value(self.depth(), value)?;
        Ok(())
    }
}
