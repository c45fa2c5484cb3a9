//! Path-based wrappers around the buffer codec.

use std::path::Path;

use crate::bitmap::Bitmap;
use crate::error::BmpError;

/// Errors from [`read_bmp`] and [`write_bmp`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Bmp(#[from] BmpError),
}

/// Read and decode a BMP file with default settings.
pub fn read_bmp(path: impl AsRef<Path>) -> Result<Bitmap, FileError> {
    let data = std::fs::read(path)?;
    Ok(crate::decode(&data)?)
}

/// Encode `image` and write it to `path`.
///
/// Encoding finishes before the file is opened, so an encode error never
/// leaves a partial file behind.
pub fn write_bmp(image: &Bitmap, path: impl AsRef<Path>) -> Result<(), FileError> {
    let data = image.encode()?;
    std::fs::write(path, data)?;
    Ok(())
}
