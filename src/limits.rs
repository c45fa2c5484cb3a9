/// Resource limits for decode operations.
///
/// Checked against the header before any pixel is read, so an oversized file
/// is rejected without allocating its plane. All fields default to `None`
/// (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size in bytes of the decoded plane, i.e.
    /// `width * height * size_of::<Pixel>()`. Row padding and the
    /// encoded buffer do not count.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Width, height and pixel count against the caps.
    pub(crate) fn check(&self, width: usize, height: usize) -> Result<(), crate::BmpError> {
        let (width, height) = (width as u64, height as u64);
        if let Some(max_w) = self.max_width {
            if width > max_w {
                return Err(crate::BmpError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if height > max_h {
                return Err(crate::BmpError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = width.saturating_mul(height);
            if pixels > max_px {
                return Err(crate::BmpError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Plane size in bytes against `max_memory_bytes`.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), crate::BmpError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes as u64 > max_mem {
                return Err(crate::BmpError::LimitExceeded(alloc::format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}
