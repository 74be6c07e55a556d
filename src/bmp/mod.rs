//! 24-bit uncompressed BMP container: header codec and pixel I/O.
//!
//! Layout: a 14-byte file header, a 40-byte `BITMAPINFOHEADER`, then pixel
//! rows stored bottom-up, each `width * 3` bytes of B,G,R followed by zero
//! padding to a 4-byte boundary. All fields are little-endian.

mod header;
mod pixels;

pub use header::{
    FileHeader, InfoHeader, decode_file_header, decode_info_header, encode_file_header,
    encode_info_header, make_file_header, make_info_header,
};
pub use pixels::{read_pixels, write_pixels};

use std::io::Read;

use crate::error::BitmapError;

/// `"BM"` read as a little-endian u16.
pub const BMP_SIGNATURE: u16 = 0x4D42;
pub const FILE_HEADER_SIZE: usize = 14;
pub const INFO_HEADER_SIZE: usize = 40;
/// Pixel data always starts right after the two headers.
pub const PIXEL_DATA_OFFSET: u64 = (FILE_HEADER_SIZE + INFO_HEADER_SIZE) as u64;
pub const BITS_PER_PIXEL: u16 = 24;
/// `BI_RGB`: no compression.
pub const COMPRESSION_NONE: u32 = 0;
/// 72 DPI.
pub const DEFAULT_PIXELS_PER_METER: i32 = 2835;

/// Bytes one row of `width` pixels occupies on disk, padding included.
pub fn padded_row_bytes(width: usize) -> usize {
    (3 * width + 3) & !3
}

/// Zero bytes appended to each row of `width` pixels.
pub fn padding_bytes(width: usize) -> usize {
    padded_row_bytes(width) - 3 * width
}

/// Size of the pixel data region (`biSizeImage`) for a `width` x `height` image.
///
/// Fails with [`BitmapError::DimensionsTooLarge`] when the dimensions do not
/// fit the signed 32-bit header fields or the whole file would exceed the
/// 32-bit `bfSize` field.
pub fn image_data_size(width: u32, height: u32) -> Result<u32, BitmapError> {
    let too_large = || BitmapError::DimensionsTooLarge {
        width: width.into(),
        height: height.into(),
    };
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(too_large());
    }
    let row = (u64::from(width) * 3 + 3) & !3;
    let size = row.checked_mul(u64::from(height)).ok_or_else(too_large)?;
    if size + PIXEL_DATA_OFFSET > u64::from(u32::MAX) {
        return Err(too_large());
    }
    Ok(size as u32)
}

/// Check that decoded headers describe an image this crate can process.
///
/// Runs before any pixel allocation, so a rejected file never costs more
/// than its 54 header bytes.
pub fn validate_headers(file: &FileHeader, info: &InfoHeader) -> Result<(), BitmapError> {
    if file.signature != BMP_SIGNATURE {
        return Err(BitmapError::UnrecognizedFormat(file.signature));
    }
    if info.bit_count != BITS_PER_PIXEL {
        return Err(BitmapError::UnsupportedVariant(format!(
            "{} bits per pixel (only 24-bit BMP is supported)",
            info.bit_count
        )));
    }
    if info.compression != COMPRESSION_NONE {
        return Err(BitmapError::UnsupportedVariant(format!(
            "compression method {} (only uncompressed BMP is supported)",
            info.compression
        )));
    }
    if info.width <= 0 || info.height <= 0 {
        return Err(BitmapError::InvalidHeader(format!(
            "BMP dimensions must be positive, got {}x{}",
            info.width, info.height
        )));
    }

    if u64::from(file.pixel_data_offset) != PIXEL_DATA_OFFSET {
        log::warn!(
            "bfOffBits is {}, reading pixel data from offset {PIXEL_DATA_OFFSET}",
            file.pixel_data_offset
        );
    }
    // A file this crate could never write back is rejected here, before
    // anything is sized from its dimensions.
    let expected = image_data_size(info.width as u32, info.height as u32)?;
    if info.image_size != 0 && info.image_size != expected {
        log::warn!(
            "biSizeImage is {} but {}x{} needs {expected} bytes",
            info.image_size,
            info.width,
            info.height
        );
    }
    Ok(())
}

/// Decode and validate both headers without touching the pixel data.
pub fn probe<R: Read>(reader: &mut R) -> Result<(FileHeader, InfoHeader), BitmapError> {
    let file = decode_file_header(reader)?;
    if file.signature != BMP_SIGNATURE {
        return Err(BitmapError::UnrecognizedFormat(file.signature));
    }
    let info = decode_info_header(reader)?;
    validate_headers(&file, &info)?;
    Ok((file, info))
}
