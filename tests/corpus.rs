//! Test corpus: patterns and sizes exercising every row padding amount.

use std::io::Cursor;

use bmpfilter::bmp::padded_row_bytes;
use bmpfilter::*;

fn checkerboard(w: usize, h: usize) -> PixelBuffer {
    let mut pixels = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            if (x + y) % 2 == 0 {
                pixels.push(Pixel {
                    b: 200,
                    g: 220,
                    r: 240,
                });
            } else {
                pixels.push(Pixel {
                    b: 10,
                    g: 40,
                    r: 70,
                });
            }
        }
    }
    PixelBuffer::from_pixels(w, h, pixels).unwrap()
}

fn noise_pattern(w: usize, h: usize) -> PixelBuffer {
    let mut state: u32 = 0xDEAD_BEEF;
    let pixels = (0..w * h)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            Pixel {
                b: state as u8,
                g: (state >> 8) as u8,
                r: (state >> 16) as u8,
            }
        })
        .collect();
    PixelBuffer::from_pixels(w, h, pixels).unwrap()
}

fn encode(pixels: PixelBuffer) -> Vec<u8> {
    Bitmap::from_pixels(pixels).unwrap().to_bytes().unwrap()
}

fn decode(data: &[u8]) -> Bitmap {
    Bitmap::read_from(&mut Cursor::new(data), None).unwrap()
}

// ── Codec ───────────────────────────────────────────────────────────

#[test]
fn every_padding_amount_round_trips() {
    for w in 1..=9 {
        for h in [1, 2, 5] {
            let pixels = noise_pattern(w, h);
            let encoded = encode(pixels.clone());
            assert_eq!(encoded.len(), 54 + padded_row_bytes(w) * h, "{w}x{h}");

            let decoded = decode(&encoded);
            assert_eq!(decoded.pixels(), &pixels, "{w}x{h}");
            assert_eq!(decoded.to_bytes().unwrap(), encoded, "{w}x{h}");
        }
    }
}

#[test]
fn padding_bytes_are_zero() {
    for w in 1..=7 {
        let encoded = encode(checkerboard(w, 3));
        let row = padded_row_bytes(w);
        for chunk in encoded[54..].chunks_exact(row) {
            assert!(chunk[w * 3..].iter().all(|&b| b == 0), "width {w}");
        }
    }
}

#[test]
fn rows_are_stored_bottom_up() {
    let pixels = noise_pattern(3, 4);
    let encoded = encode(pixels.clone());
    let row = padded_row_bytes(3);
    let last_on_disk = &encoded[54 + 3 * row..54 + 3 * row + 3];
    let top = pixels.get(0, 0).unwrap();
    assert_eq!(last_on_disk, &[top.b, top.g, top.r]);
}

// ── Filters over the corpus ─────────────────────────────────────────

#[test]
fn grayscale_is_idempotent_on_noise() {
    for (w, h) in [(1, 1), (4, 3), (17, 9)] {
        let mut once = decode(&encode(noise_pattern(w, h)));
        once.grayscale();
        let mut twice = once.clone();
        twice.grayscale();
        assert_eq!(once.to_bytes().unwrap(), twice.to_bytes().unwrap());
    }
}

#[test]
fn zero_color_shift_is_identity_on_noise() {
    let encoded = encode(noise_pattern(6, 5));
    let mut bitmap = decode(&encoded);
    bitmap.color_shift(ColorShift::default());
    assert_eq!(bitmap.to_bytes().unwrap(), encoded);
}

#[test]
fn unit_resize_is_identity_on_noise() {
    for (w, h) in [(1, 1), (5, 3), (13, 7)] {
        let encoded = encode(noise_pattern(w, h));
        let mut bitmap = decode(&encoded);
        bitmap.resize(1.0, None).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (w as u32, h as u32));
        assert_eq!(bitmap.to_bytes().unwrap(), encoded);
    }
}

#[test]
fn resized_output_decodes_with_new_padding() {
    // 5 px wide (1 padding byte) scaled to 7 px wide (3 padding bytes)
    let mut bitmap = decode(&encode(checkerboard(5, 5)));
    bitmap.resize(1.5, None).unwrap();
    assert_eq!((bitmap.width(), bitmap.height()), (7, 7));
    let encoded = bitmap.to_bytes().unwrap();
    assert_eq!(encoded.len(), 54 + 24 * 7);
    assert_eq!(decode(&encoded).pixels(), bitmap.pixels());
}

#[test]
fn filters_compose_in_any_order() {
    let source = noise_pattern(8, 6);

    let mut a = Bitmap::from_pixels(source.clone()).unwrap();
    a.resize(0.5, None).unwrap();
    a.grayscale();
    a.color_shift(ColorShift::new(10, 10, 10));

    let mut b = Bitmap::from_pixels(source).unwrap();
    b.grayscale();
    b.color_shift(ColorShift::new(10, 10, 10));
    b.resize(0.5, None).unwrap();

    // per-pixel filters commute with nearest-neighbor sampling
    assert_eq!(a.to_bytes().unwrap(), b.to_bytes().unwrap());
}
