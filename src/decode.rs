use enough::{Stop, Unstoppable};

use crate::bitmap::Bitmap;
use crate::bmp::header::{Header, decode_header};
use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::MonoPacking;

/// Decode configuration for one input buffer.
///
/// ```no_run
/// use zenbitplane::{DecodeRequest, Limits, MonoPacking, Unstoppable};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let image = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .with_mono_packing(MonoPacking::Packed)
///     .decode(Unstoppable)?;
/// # Ok::<(), zenbitplane::BmpError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    packing: MonoPacking,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            packing: MonoPacking::default(),
        }
    }

    /// Reject images whose dimensions or plane size exceed `limits`
    /// before any pixel memory is allocated.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Row layout to assume for 1-bpp images. Ignored for other depths.
    pub fn with_mono_packing(mut self, packing: MonoPacking) -> Self {
        self.packing = packing;
        self
    }

    /// Parse only the header.
    pub fn header(&self) -> Result<Header, BmpError> {
        decode_header(self.data, self.packing)
    }

    /// Decode header and pixel plane. `stop` is checked every 16 rows.
    pub fn decode(self, stop: impl Stop) -> Result<Bitmap, BmpError> {
        crate::bmp::decode(self.data, self.limits, self.packing, &stop)
    }
}

/// Decode a BMP buffer with default settings (unpacked 1-bpp rows, no limits).
pub fn decode(data: &[u8]) -> Result<Bitmap, BmpError> {
    DecodeRequest::new(data).decode(Unstoppable)
}
