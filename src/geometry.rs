//! Geometry on the pixel plane: crop/pad, flips, transpose, rotation.
//!
//! Everything here works through [`Pixel`] values only, so it applies to
//! every depth. Operations that can fail build the new header first and only
//! then touch the plane.

use alloc::vec::Vec;

use crate::bitmap::{Bitmap, plane_len};
use crate::error::BmpError;
use crate::pixel::Pixel;

impl Bitmap {
    /// Crop and/or pad to `width` x `height`.
    ///
    /// Destination cell `(r, c)` takes source cell `(r + y_offset, c + x_offset)`
    /// when that lies inside the current plane, and [`Bitmap::fill`] otherwise.
    /// A smaller target crops, a larger one extends the canvas.
    ///
    /// The offsets select the crop origin in the source: they skip source
    /// rows and columns. They do not move the source into the new canvas, so
    /// growing with a non-zero offset never leaves fill below or left of the
    /// copied pixels.
    ///
    /// ```
    /// use zenbitplane::{Bitmap, Pixel};
    ///
    /// let pixels = [10, 20, 30, 40].map(Pixel::Gray8).to_vec();
    /// let mut image = Bitmap::from_pixels(2, 2, pixels)?;
    /// image.resize_area(4, 4, 1, 1)?;
    /// // (0, 0) now holds source (1, 1); everything else is fill.
    /// assert_eq!(image.pixel_at(0, 0), Some(&Pixel::Gray8(40)));
    /// assert_eq!(image.pixel_at(1, 1), Some(&image.fill()));
    /// # Ok::<(), zenbitplane::BmpError>(())
    /// ```
    pub fn resize_area(
        &mut self,
        width: usize,
        height: usize,
        x_offset: usize,
        y_offset: usize,
    ) -> Result<(), BmpError> {
        let len = plane_len(width, height)?;
        let mut header = self.header.clone();
        header.set_dimensions(width, height)?;

        let (src_w, src_h) = (self.width(), self.height());
        let mut pixels = Vec::with_capacity(len);
        for r in 0..height {
            let src_row = r.checked_add(y_offset).filter(|&sr| sr < src_h);
            for c in 0..width {
                let src_col = c.checked_add(x_offset).filter(|&sc| sc < src_w);
                let px = match (src_row, src_col) {
                    (Some(sr), Some(sc)) => self.pixels[sr * src_w + sc],
                    _ => self.fill,
                };
                pixels.push(px);
            }
        }

        log::debug!(
            "resize_area {src_w}x{src_h} -> {width}x{height} at ({x_offset}, {y_offset})"
        );
        self.header = header;
        self.pixels = pixels;
        Ok(())
    }

    /// Crop or pad anchored at the origin. This does not scale.
    pub fn resize_image(&mut self, width: usize, height: usize) -> Result<(), BmpError> {
        self.resize_area(width, height, 0, 0)
    }

    /// Reverse the row order: row `i` swaps with row `height - 1 - i`.
    pub fn flip_vertical(&mut self) {
        let width = self.width();
        let height = self.height();
        for top in 0..height / 2 {
            let bottom = height - 1 - top;
            let (head, tail) = self.pixels.split_at_mut(bottom * width);
            head[top * width..(top + 1) * width].swap_with_slice(&mut tail[..width]);
        }
        log::debug!("flip_vertical {width}x{height}");
    }

    /// Reverse the column order within every row.
    pub fn flip_horizontal(&mut self) {
        let width = self.width();
        for row in self.pixels.chunks_exact_mut(width) {
            row.reverse();
        }
        log::debug!("flip_horizontal {width}x{}", self.height());
    }

    /// Swap rows and columns: `(r, c)` moves to `(c, r)` and the dimensions swap.
    pub fn transpose(&mut self) -> Result<(), BmpError> {
        let (width, height) = (self.width(), self.height());
        // Stride depends on width, so the swapped size can overflow the header.
        let mut header = self.header.clone();
        header.set_dimensions(height, width)?;

        let mut pixels: Vec<Pixel> = Vec::with_capacity(self.pixels.len());
        for c in 0..width {
            pixels.extend((0..height).map(|r| self.pixels[r * width + c]));
        }
        self.header = header;
        self.pixels = pixels;
        Ok(())
    }

    /// Rotate by `steps` quarter turns, clockwise as viewed for positive
    /// `steps`, counter-clockwise for negative. Odd turns swap the dimensions.
    pub fn rotate(&mut self, steps: i32) -> Result<(), BmpError> {
        let turns = steps.rem_euclid(4);
        // Rows are stored bottom-up, so a clockwise quarter turn as viewed is
        // a transpose followed by reversing the rows.
        match turns {
            1 => {
                self.transpose()?;
                self.flip_vertical();
            }
            2 => {
                self.flip_vertical();
                self.flip_horizontal();
            }
            3 => {
                self.transpose()?;
                self.flip_horizontal();
            }
            _ => {}
        }
        log::debug!("rotate {steps} -> {}x{}", self.width(), self.height());
        Ok(())
    }
}
