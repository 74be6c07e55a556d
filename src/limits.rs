//! Caller-supplied caps on decoded and resized image size.

use crate::error::BitmapError;

/// Upper bounds applied before a [`PixelBuffer`](crate::PixelBuffer) is
/// allocated, both when decoding and when resizing.
///
/// `None` leaves that axis unbounded; the default bounds nothing. Without
/// limits, decoding is still bounded by the input length.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// `width * height`.
    pub max_pixels: Option<u64>,
    /// Bytes of the in-memory buffer: 3 per pixel, no row padding.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    fn check_dimensions(&self, width: u32, height: u32) -> Result<(), BitmapError> {
        let (w, h) = (u64::from(width), u64::from(height));
        if let Some(max) = self.max_width.filter(|&max| w > max) {
            return Err(BitmapError::LimitExceeded(format!(
                "width {w} exceeds limit {max}"
            )));
        }
        if let Some(max) = self.max_height.filter(|&max| h > max) {
            return Err(BitmapError::LimitExceeded(format!(
                "height {h} exceeds limit {max}"
            )));
        }
        if let Some(max) = self.max_pixels.filter(|&max| w * h > max) {
            return Err(BitmapError::LimitExceeded(format!(
                "{width}x{height} is {} pixels, limit {max}",
                w * h
            )));
        }
        Ok(())
    }

    fn check_buffer_bytes(&self, bytes: u64) -> Result<(), BitmapError> {
        match self.max_memory_bytes {
            Some(max) if bytes > max => Err(BitmapError::LimitExceeded(format!(
                "pixel buffer of {bytes} bytes exceeds limit {max}"
            ))),
            _ => Ok(()),
        }
    }
}

/// Check a `width` x `height` BGR buffer against `limits`, if any.
pub(crate) fn check_limits(
    limits: Option<&Limits>,
    width: u32,
    height: u32,
) -> Result<(), BitmapError> {
    let Some(limits) = limits else {
        return Ok(());
    };
    limits.check_dimensions(width, height)?;
    let bytes = (u64::from(width) * u64::from(height)).saturating_mul(3);
    limits.check_buffer_bytes(bytes)
}
