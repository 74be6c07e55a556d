#![no_main]
use std::io::Cursor;

use bmpfilter::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    let Ok(mut bitmap) = Bitmap::read_from(&mut Cursor::new(data), Some(&limits)) else {
        return;
    };

    // Re-encoding an unmodified image and decoding again must give the same pixels
    let encoded = bitmap.to_bytes().expect("decoded bitmap must re-encode");
    let decoded = Bitmap::read_from(&mut Cursor::new(&encoded), None)
        .expect("re-encoded data failed to decode");
    assert_eq!(decoded.pixels(), bitmap.pixels(), "roundtrip pixel mismatch");

    // Grayscale is idempotent
    bitmap.grayscale();
    let once = bitmap.clone();
    bitmap.grayscale();
    assert_eq!(once, bitmap);

    // Resize keeps headers consistent with the buffer
    let factor = f32::from(data.first().copied().unwrap_or(1).max(1)) / 64.0;
    if bitmap.resize(factor, Some(&limits)).is_ok() {
        let bytes = bitmap.to_bytes().expect("resized bitmap must encode");
        assert_eq!(bitmap.file_header().file_size as usize, bytes.len());
    }
});
