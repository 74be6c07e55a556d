//! A decoded 24-bit bitmap: headers plus pixel buffer.

use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use crate::bmp::{
    self, FileHeader, InfoHeader, encode_file_header, encode_info_header, make_file_header,
    make_info_header, read_pixels, write_pixels,
};
use crate::buffer::PixelBuffer;
use crate::error::BitmapError;
use crate::filter::{self, ColorShift};
use crate::limits::{Limits, check_limits};

/// Headers and pixels of one image.
///
/// The header fields derived from the image size (`biWidth`, `biHeight`,
/// `biSizeImage`, `bfSize`) always agree with the buffer: headers are only
/// ever replaced together with the buffer, in [`Bitmap::resize`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    file_header: FileHeader,
    info_header: InfoHeader,
    pixels: PixelBuffer,
    resized: bool,
}

impl Bitmap {
    /// Decode a complete file.
    ///
    /// Headers are validated, and the stream length checked against the
    /// pixel data they describe, before the pixel buffer is allocated. A
    /// rejected or truncated file never triggers an allocation proportional
    /// to its claimed dimensions.
    pub fn read_from<R: Read + Seek>(
        reader: &mut R,
        limits: Option<&Limits>,
    ) -> Result<Self, BitmapError> {
        reader.seek(SeekFrom::Start(0))?;
        let (file_header, info_header) = bmp::probe(reader)?;

        // validate_headers guarantees both are positive
        let width = info_header.width as u32;
        let height = info_header.height as u32;
        check_limits(limits, width, height)?;
        ensure_pixel_data_available(reader, width, height)?;

        log::debug!("decoding {width}x{height} 24-bit bitmap");
        let pixels = read_pixels(reader, width as usize, height as usize)?;
        Ok(Self {
            file_header,
            info_header,
            pixels,
            resized: false,
        })
    }

    /// Wrap a buffer, synthesizing headers for its dimensions.
    pub fn from_pixels(pixels: PixelBuffer) -> Result<Self, BitmapError> {
        let (file_header, info_header) = headers_for(&pixels)?;
        Ok(Self {
            file_header,
            info_header,
            pixels,
            resized: false,
        })
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    pub fn info_header(&self) -> &InfoHeader {
        &self.info_header
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn into_pixels(self) -> PixelBuffer {
        self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.pixels.height() as u32
    }

    /// Whether [`Bitmap::resize`] has succeeded at least once.
    pub fn was_resized(&self) -> bool {
        self.resized
    }

    pub fn grayscale(&mut self) {
        log::debug!("applying grayscale");
        filter::grayscale(&mut self.pixels);
    }

    pub fn color_shift(&mut self, shift: ColorShift) {
        log::debug!(
            "applying color shift r={} g={} b={}",
            shift.red,
            shift.green,
            shift.blue
        );
        filter::color_shift(&mut self.pixels, shift);
    }

    /// Nearest-neighbor resize; see [`filter::resize`].
    ///
    /// On success the buffer and the size-derived header fields are replaced
    /// together. On failure nothing changes.
    pub fn resize(&mut self, factor: f32, limits: Option<&Limits>) -> Result<(), BitmapError> {
        let resized = filter::resize(&self.pixels, factor, limits)?;
        let (file_header, info_header) = headers_for(&resized)?;
        self.pixels = resized;
        self.file_header = file_header;
        self.info_header = info_header;
        self.resized = true;
        Ok(())
    }

    /// Encode: pixel data first, then both headers at the start.
    pub fn write_to<W: Write + Seek>(&self, writer: &mut W) -> Result<(), BitmapError> {
        write_pixels(writer, &self.pixels)?;
        writer.seek(SeekFrom::Start(0))?;
        encode_file_header(&self.file_header, writer)?;
        encode_info_header(&self.info_header, writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Encode into a freshly allocated byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>, BitmapError> {
        let data_size = bmp::image_data_size(self.width(), self.height())?;
        let mut out = Cursor::new(Vec::with_capacity(
            bmp::PIXEL_DATA_OFFSET as usize + data_size as usize,
        ));
        self.write_to(&mut out)?;
        Ok(out.into_inner())
    }
}

/// Fail with [`BitmapError::UnexpectedEof`] when the stream ends before the
/// last padded row. Leaves the reader at the end of the stream.
fn ensure_pixel_data_available<R: Seek>(
    reader: &mut R,
    width: u32,
    height: u32,
) -> Result<(), BitmapError> {
    let needed = bmp::PIXEL_DATA_OFFSET + u64::from(bmp::image_data_size(width, height)?);
    let available = reader.seek(SeekFrom::End(0))?;
    if available < needed {
        log::debug!("stream holds {available} bytes, {width}x{height} bitmap needs {needed}");
        return Err(BitmapError::UnexpectedEof);
    }
    Ok(())
}

fn headers_for(pixels: &PixelBuffer) -> Result<(FileHeader, InfoHeader), BitmapError> {
    let (Ok(width), Ok(height)) = (
        u32::try_from(pixels.width()),
        u32::try_from(pixels.height()),
    ) else {
        return Err(BitmapError::DimensionsTooLarge {
            width: pixels.width() as u64,
            height: pixels.height() as u64,
        });
    };
    Ok((
        make_file_header(width, height)?,
        make_info_header(width, height)?,
    ))
}
