#![no_main]
use std::io::Cursor;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary input must never panic; cap allocations so huge claimed
    // dimensions fail fast instead of exhausting memory.
    let limits = bmpfilter::Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    let _ = bmpfilter::bmp::probe(&mut &data[..]);
    let _ = bmpfilter::Bitmap::read_from(&mut Cursor::new(data), Some(&limits));
});
