//! Pixel data region: padded rows, stored bottom-up.

use std::io::{Read, Seek, SeekFrom, Write};

use super::{PIXEL_DATA_OFFSET, padded_row_bytes};
use crate::buffer::{Pixel, PixelBuffer};
use crate::error::BitmapError;

/// Read `height` padded rows starting at the fixed pixel data offset.
///
/// The last row on disk is the top of the image, so rows are filled from
/// `height - 1` down to 0. Any short read, padding included, is reported as
/// [`BitmapError::UnexpectedEof`].
pub fn read_pixels<R: Read + Seek>(
    reader: &mut R,
    width: usize,
    height: usize,
) -> Result<PixelBuffer, BitmapError> {
    let mut buffer = PixelBuffer::try_new(width, height)?;
    reader.seek(SeekFrom::Start(PIXEL_DATA_OFFSET))?;

    let mut row_bytes = vec![0u8; padded_row_bytes(width)];
    for row in (0..height).rev() {
        reader.read_exact(&mut row_bytes)?;
        for (px, bgr) in buffer
            .row_mut(row)
            .iter_mut()
            .zip(row_bytes.chunks_exact(3))
        {
            *px = Pixel {
                b: bgr[0],
                g: bgr[1],
                r: bgr[2],
            };
        }
    }
    Ok(buffer)
}

/// Write `buffer` as padded bottom-up rows at the fixed pixel data offset.
///
/// Padding bytes are always zero.
pub fn write_pixels<W: Write + Seek>(
    writer: &mut W,
    buffer: &PixelBuffer,
) -> Result<(), BitmapError> {
    writer.seek(SeekFrom::Start(PIXEL_DATA_OFFSET))?;

    let width = buffer.width();
    // Trailing bytes past width * 3 stay zero for the whole loop.
    let mut row_bytes = vec![0u8; padded_row_bytes(width)];
    for row in (0..buffer.height()).rev() {
        for (bgr, px) in row_bytes.chunks_exact_mut(3).zip(buffer.row(row)) {
            bgr[0] = px.b;
            bgr[1] = px.g;
            bgr[2] = px.r;
        }
        writer.write_all(&row_bytes)?;
    }
    Ok(())
}
