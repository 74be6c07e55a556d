//! Owned 2-D pixel storage.

use imgref::{ImgRef, ImgVec};

use crate::error::BitmapError;

/// One 24-bit pixel in the on-disk channel order (blue, green, red).
pub type Pixel = rgb::Bgr<u8>;

/// Row-major grid of [`Pixel`]s backed by a single contiguous allocation.
///
/// Row 0 is the topmost image row, whatever order the rows have on disk.
/// Every row has exactly `width` pixels and there are exactly `height` rows.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    img: ImgVec<Pixel>,
}

impl PixelBuffer {
    /// Allocate a zero-filled (black) buffer.
    ///
    /// The allocation is fallible: an oversized request is reported as
    /// [`BitmapError::AllocationFailed`] instead of aborting the process.
    pub fn try_new(width: usize, height: usize) -> Result<Self, BitmapError> {
        let len = checked_len(width, height)?;
        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| BitmapError::AllocationFailed {
                bytes: len.saturating_mul(size_of::<Pixel>()),
            })?;
        buf.resize(len, Pixel::default());
        Ok(Self {
            img: ImgVec::new(buf, width, height),
        })
    }

    /// Wrap an existing row-major pixel vector.
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: Vec<Pixel>,
    ) -> Result<Self, BitmapError> {
        let len = checked_len(width, height)?;
        if pixels.len() != len {
            return Err(BitmapError::InvalidParameter(format!(
                "{width}x{height} buffer needs {len} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            img: ImgVec::new(pixels, width, height),
        })
    }

    pub fn width(&self) -> usize {
        self.img.width()
    }

    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Pixel at (`row`, `col`), or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Pixel> {
        if row >= self.height() || col >= self.width() {
            return None;
        }
        Some(self.img.buf()[row * self.width() + col])
    }

    /// Overwrite the pixel at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, px: Pixel) {
        assert!(
            row < self.height() && col < self.width(),
            "pixel ({row}, {col}) out of bounds for {}x{} buffer",
            self.width(),
            self.height()
        );
        let width = self.width();
        self.img.buf_mut()[row * width + col] = px;
    }

    /// The pixels of row `row`, left to right.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height`.
    pub fn row(&self, row: usize) -> &[Pixel] {
        let width = self.width();
        &self.img.buf()[row * width..(row + 1) * width]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [Pixel] {
        let width = self.width();
        &mut self.img.buf_mut()[row * width..(row + 1) * width]
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Pixel] {
        self.img.buf()
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        self.img.buf_mut()
    }

    /// Borrow as an [`imgref::ImgRef`] for interop with other imaging crates.
    pub fn as_imgref(&self) -> ImgRef<'_, Pixel> {
        self.img.as_ref()
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.img.into_buf()
    }
}

impl PartialEq for PixelBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.pixels() == other.pixels()
    }
}

impl Eq for PixelBuffer {}

fn checked_len(width: usize, height: usize) -> Result<usize, BitmapError> {
    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidParameter(format!(
            "pixel buffer dimensions must be non-zero, got {width}x{height}"
        )));
    }
    width
        .checked_mul(height)
        .filter(|len| len.checked_mul(size_of::<Pixel>()).is_some())
        .ok_or(BitmapError::DimensionsTooLarge {
            width: width as u64,
            height: height as u64,
        })
}
