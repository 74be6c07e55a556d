//! Pixel filters: grayscale, per-channel color shift, nearest-neighbor resize.
//!
//! Every filter is a deterministic function of the input buffer and its
//! parameters.

use crate::bmp::image_data_size;
use crate::buffer::{Pixel, PixelBuffer};
use crate::error::BitmapError;
use crate::limits::{Limits, check_limits};

/// Replace every pixel with its luma, `0.299 R + 0.587 G + 0.114 B`.
///
/// The weighted sum is truncated toward zero, not rounded. It is evaluated
/// in fixed point so a pixel that is already gray maps to itself exactly,
/// which makes the filter idempotent.
pub fn grayscale(buffer: &mut PixelBuffer) {
    for px in buffer.pixels_mut() {
        let y = luma(*px);
        *px = Pixel { b: y, g: y, r: y };
    }
}

fn luma(px: Pixel) -> u8 {
    let r = u32::from(px.r);
    let g = u32::from(px.g);
    let b = u32::from(px.b);
    // max is 255 * 1000 / 1000
    ((r * 299 + g * 587 + b * 114) / 1000) as u8
}

/// Signed per-channel offsets for [`color_shift`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorShift {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
}

impl ColorShift {
    pub fn new(red: i32, green: i32, blue: i32) -> Self {
        Self { red, green, blue }
    }

    /// True when every offset is zero.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// Add each channel's offset, clamping the result to `0..=255`.
pub fn color_shift(buffer: &mut PixelBuffer, shift: ColorShift) {
    if shift.is_identity() {
        return;
    }
    for px in buffer.pixels_mut() {
        *px = Pixel {
            b: shift_channel(px.b, shift.blue),
            g: shift_channel(px.g, shift.green),
            r: shift_channel(px.r, shift.red),
        };
    }
}

fn shift_channel(value: u8, offset: i32) -> u8 {
    (i64::from(value) + i64::from(offset)).clamp(0, 255) as u8
}

/// Scale by `factor` using nearest-neighbor sampling.
///
/// The new dimensions are `floor(old * factor)`, at least 1. Destination
/// pixel `(i, j)` copies source pixel `(floor(i / factor), floor(j / factor))`,
/// clamped to the last row and column.
///
/// Returns a new buffer; `buffer` is untouched, so a failure leaves the
/// caller's image intact. The result is guaranteed to fit BMP headers.
///
/// Products are taken in `f32`, so a side longer than 2^24 pixels can lose
/// a pixel even at factor 1.0.
pub fn resize(
    buffer: &PixelBuffer,
    factor: f32,
    limits: Option<&Limits>,
) -> Result<PixelBuffer, BitmapError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(BitmapError::InvalidParameter(format!(
            "scale factor must be a finite number greater than 0, got {factor}"
        )));
    }

    let old_width = buffer.width();
    let old_height = buffer.height();
    let new_width = scaled_dimension(old_width, factor);
    let new_height = scaled_dimension(old_height, factor);

    let (Ok(w32), Ok(h32)) = (u32::try_from(new_width), u32::try_from(new_height)) else {
        return Err(BitmapError::DimensionsTooLarge {
            width: new_width,
            height: new_height,
        });
    };
    image_data_size(w32, h32)?;
    check_limits(limits, w32, h32)?;

    log::debug!("resize {old_width}x{old_height} by {factor} -> {w32}x{h32}");

    let new_width = w32 as usize;
    let new_height = h32 as usize;
    let mut out = PixelBuffer::try_new(new_width, new_height)?;

    let src_cols: Vec<usize> = (0..new_width)
        .map(|j| source_index(j, factor, old_width))
        .collect();
    for i in 0..new_height {
        let src_row = buffer.row(source_index(i, factor, old_height));
        for (dst, &src_col) in out.row_mut(i).iter_mut().zip(&src_cols) {
            *dst = src_row[src_col];
        }
    }
    Ok(out)
}

fn scaled_dimension(old: usize, factor: f32) -> u64 {
    // float-to-int `as` saturates
    ((old as f32 * factor) as u64).max(1)
}

fn source_index(dst: usize, factor: f32, old_len: usize) -> usize {
    ((dst as f32 / factor) as usize).min(old_len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_dimension_is_exact_up_to_f32_mantissa() {
        assert_eq!(scaled_dimension(16_777_216, 1.0), 16_777_216);
        assert_eq!(scaled_dimension(16_777_217, 1.0), 16_777_216);
        assert_eq!(scaled_dimension(3, 0.1), 1);
    }

    fn px(b: u8, g: u8, r: u8) -> Pixel {
        Pixel { b, g, r }
    }

    fn rgb(r: u8, g: u8, b: u8) -> Pixel {
        Pixel { b, g, r }
    }

    fn buffer(width: usize, height: usize, pixels: &[Pixel]) -> PixelBuffer {
        PixelBuffer::from_pixels(width, height, pixels.to_vec()).unwrap()
    }

    fn gradient(width: usize, height: usize) -> PixelBuffer {
        let pixels: Vec<Pixel> = (0..width * height)
            .map(|i| px((i * 7) as u8, (i * 13) as u8, (i * 29) as u8))
            .collect();
        buffer(width, height, &pixels)
    }

    #[test]
    fn grayscale_primaries_and_white() {
        let mut img = buffer(
            2,
            2,
            &[
                rgb(255, 0, 0),
                rgb(0, 255, 0),
                rgb(0, 0, 255),
                rgb(255, 255, 255),
            ],
        );
        grayscale(&mut img);
        let gray: Vec<u8> = img.pixels().iter().map(|p| p.r).collect();
        assert_eq!(gray, [76, 149, 29, 255]);
        for p in img.pixels() {
            assert_eq!(p.r, p.g);
            assert_eq!(p.g, p.b);
        }
    }

    #[test]
    fn grayscale_truncates_instead_of_rounding() {
        // 0.598 + 0.587 + 0.342 = 1.527
        let mut img = buffer(1, 1, &[rgb(2, 1, 3)]);
        grayscale(&mut img);
        assert_eq!(img.get(0, 0), Some(rgb(1, 1, 1)));

        // 0.299 * 10 + 0.587 * 10 + 0.114 * 9 = 9.886
        let mut img = buffer(1, 1, &[rgb(10, 10, 9)]);
        grayscale(&mut img);
        assert_eq!(img.get(0, 0), Some(rgb(9, 9, 9)));
    }

    #[test]
    fn grayscale_uses_original_channels() {
        // If red were overwritten first, green and blue would see the new value.
        let mut img = buffer(1, 1, &[rgb(200, 0, 100)]);
        grayscale(&mut img);
        // 59.8 + 0 + 11.4 = 71.2
        assert_eq!(img.get(0, 0), Some(rgb(71, 71, 71)));
    }

    #[test]
    fn grayscale_is_idempotent() {
        let mut once = gradient(16, 16);
        grayscale(&mut once);
        let mut twice = once.clone();
        grayscale(&mut twice);
        assert_eq!(once, twice);

        let mut levels = buffer(
            256,
            1,
            &(0..=255u8).map(|v| px(v, v, v)).collect::<Vec<_>>(),
        );
        let before = levels.clone();
        grayscale(&mut levels);
        assert_eq!(levels, before);
    }

    #[test]
    fn zero_shift_is_identity() {
        let mut img = gradient(5, 3);
        let before = img.clone();
        color_shift(&mut img, ColorShift::default());
        assert_eq!(img, before);
        assert!(ColorShift::new(0, 0, 0).is_identity());
    }

    #[test]
    fn shift_clamps_high_and_low() {
        let mut img = buffer(1, 1, &[rgb(250, 250, 250)]);
        color_shift(&mut img, ColorShift::new(50, 50, 50));
        assert_eq!(img.get(0, 0), Some(rgb(255, 255, 255)));

        let mut img = buffer(1, 1, &[rgb(250, 250, 250)]);
        color_shift(&mut img, ColorShift::new(-260, -260, -260));
        assert_eq!(img.get(0, 0), Some(rgb(0, 0, 0)));
    }

    #[test]
    fn shift_channels_independently() {
        let mut img = buffer(1, 1, &[rgb(10, 20, 30)]);
        color_shift(&mut img, ColorShift::new(5, 0, -40));
        assert_eq!(img.get(0, 0), Some(rgb(15, 20, 0)));
    }

    #[test]
    fn shift_extreme_offsets_do_not_wrap() {
        let mut img = buffer(1, 1, &[rgb(128, 128, 128)]);
        color_shift(&mut img, ColorShift::new(i32::MAX, i32::MIN, 0));
        assert_eq!(img.get(0, 0), Some(rgb(255, 0, 128)));
    }

    #[test]
    fn resize_by_one_is_identity() {
        let img = gradient(7, 5);
        let out = resize(&img, 1.0, None).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn resize_by_two_makes_blocks() {
        let src = [rgb(255, 0, 0), rgb(0, 255, 0), rgb(0, 0, 255), rgb(9, 9, 9)];
        let img = buffer(2, 2, &src);
        let out = resize(&img, 2.0, None).unwrap();
        assert_eq!((out.width(), out.height()), (4, 4));
        for i in 0..4 {
            for j in 0..4 {
                let expected = src[(i / 2) * 2 + j / 2];
                assert_eq!(out.get(i, j), Some(expected), "({i}, {j})");
            }
        }
    }

    #[test]
    fn resize_down_samples_nearest() {
        let img = gradient(4, 4);
        let out = resize(&img, 0.5, None).unwrap();
        assert_eq!((out.width(), out.height()), (2, 2));
        assert_eq!(out.get(0, 0), img.get(0, 0));
        assert_eq!(out.get(0, 1), img.get(0, 2));
        assert_eq!(out.get(1, 0), img.get(2, 0));
        assert_eq!(out.get(1, 1), img.get(2, 2));
    }

    #[test]
    fn resize_never_goes_below_one_pixel() {
        let img = gradient(3, 2);
        let out = resize(&img, 0.01, None).unwrap();
        assert_eq!((out.width(), out.height()), (1, 1));
        assert_eq!(out.get(0, 0), img.get(0, 0));
    }

    #[test]
    fn resize_floors_fractional_dimensions() {
        let img = gradient(3, 3);
        let out = resize(&img, 1.5, None).unwrap();
        assert_eq!((out.width(), out.height()), (4, 4));
        // 3 / 1.5 = 2, the last source column
        assert_eq!(out.get(3, 3), img.get(2, 2));
    }

    #[test]
    fn resize_rejects_non_positive_factors() {
        let img = gradient(2, 2);
        for factor in [0.0, -1.0, -0.0, f32::NAN, f32::INFINITY] {
            let err = resize(&img, factor, None).unwrap_err();
            assert!(
                matches!(err, BitmapError::InvalidParameter(_)),
                "factor {factor}: {err:?}"
            );
        }
    }

    #[test]
    fn resize_respects_limits() {
        let img = gradient(10, 10);
        let limits = Limits {
            max_pixels: Some(100),
            ..Default::default()
        };
        assert!(resize(&img, 1.0, Some(&limits)).is_ok());
        assert!(matches!(
            resize(&img, 1.1, Some(&limits)),
            Err(BitmapError::LimitExceeded(_))
        ));
    }

    #[test]
    fn resize_rejects_dimensions_headers_cannot_hold() {
        let img = gradient(2, 2);
        let err = resize(&img, 3.0e9, None).unwrap_err();
        assert!(matches!(err, BitmapError::DimensionsTooLarge { .. }));
    }
}
