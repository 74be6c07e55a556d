//! File header and `BITMAPINFOHEADER` codec.

use std::io::{Read, Write};

use super::{
    BITS_PER_PIXEL, BMP_SIGNATURE, COMPRESSION_NONE, DEFAULT_PIXELS_PER_METER, FILE_HEADER_SIZE,
    INFO_HEADER_SIZE, PIXEL_DATA_OFFSET, image_data_size,
};
use crate::error::BitmapError;

/// The 14-byte BMP file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    /// `bfType`; [`BMP_SIGNATURE`] for a valid file.
    pub signature: u16,
    /// `bfSize`, informational.
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// `bfOffBits`.
    pub pixel_data_offset: u32,
}

/// The 40-byte `BITMAPINFOHEADER`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Rows are always read and written bottom-up, whatever the sign.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    /// `biSizeImage`: padded row bytes times height.
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

// ── Field access on fixed-size header blocks ────────────────────────

fn read_fixed_bytes<R: Read, const N: usize>(reader: &mut R) -> Result<[u8; N], BitmapError> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

fn get_u16_le(buf: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([buf[pos], buf[pos + 1]])
}

fn get_u32_le(buf: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([buf[pos], buf[pos + 1], buf[pos + 2], buf[pos + 3]])
}

fn get_i32_le(buf: &[u8], pos: usize) -> i32 {
    get_u32_le(buf, pos) as i32
}

// ── FileHeader ──────────────────────────────────────────────────────

impl FileHeader {
    pub fn from_bytes(raw: &[u8; FILE_HEADER_SIZE]) -> Self {
        Self {
            signature: get_u16_le(raw, 0),
            file_size: get_u32_le(raw, 2),
            reserved1: get_u16_le(raw, 6),
            reserved2: get_u16_le(raw, 8),
            pixel_data_offset: get_u32_le(raw, 10),
        }
    }

    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut out = [0u8; FILE_HEADER_SIZE];
        out[0..2].copy_from_slice(&self.signature.to_le_bytes());
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..8].copy_from_slice(&self.reserved1.to_le_bytes());
        out[8..10].copy_from_slice(&self.reserved2.to_le_bytes());
        out[10..14].copy_from_slice(&self.pixel_data_offset.to_le_bytes());
        out
    }
}

/// Read the 14-byte file header. Performs no validation.
pub fn decode_file_header<R: Read>(reader: &mut R) -> Result<FileHeader, BitmapError> {
    let raw = read_fixed_bytes::<_, FILE_HEADER_SIZE>(reader)?;
    Ok(FileHeader::from_bytes(&raw))
}

/// Write the 14-byte file header verbatim.
pub fn encode_file_header<W: Write>(
    header: &FileHeader,
    writer: &mut W,
) -> Result<(), BitmapError> {
    writer.write_all(&header.to_bytes())?;
    Ok(())
}

/// Synthesize a file header for a `width` x `height` 24-bit image.
pub fn make_file_header(width: u32, height: u32) -> Result<FileHeader, BitmapError> {
    let data_size = image_data_size(width, height)?;
    Ok(FileHeader {
        signature: BMP_SIGNATURE,
        // image_data_size guarantees this stays within u32
        file_size: PIXEL_DATA_OFFSET as u32 + data_size,
        reserved1: 0,
        reserved2: 0,
        pixel_data_offset: PIXEL_DATA_OFFSET as u32,
    })
}

// ── InfoHeader ──────────────────────────────────────────────────────

impl InfoHeader {
    pub fn from_bytes(raw: &[u8; INFO_HEADER_SIZE]) -> Self {
        Self {
            header_size: get_u32_le(raw, 0),
            width: get_i32_le(raw, 4),
            height: get_i32_le(raw, 8),
            planes: get_u16_le(raw, 12),
            bit_count: get_u16_le(raw, 14),
            compression: get_u32_le(raw, 16),
            image_size: get_u32_le(raw, 20),
            x_pixels_per_meter: get_i32_le(raw, 24),
            y_pixels_per_meter: get_i32_le(raw, 28),
            colors_used: get_u32_le(raw, 32),
            colors_important: get_u32_le(raw, 36),
        }
    }

    pub fn to_bytes(&self) -> [u8; INFO_HEADER_SIZE] {
        let mut out = [0u8; INFO_HEADER_SIZE];
        out[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bit_count.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        out[24..28].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out[28..32].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out[32..36].copy_from_slice(&self.colors_used.to_le_bytes());
        out[36..40].copy_from_slice(&self.colors_important.to_le_bytes());
        out
    }
}

/// Read the 40-byte info header. Performs no validation.
pub fn decode_info_header<R: Read>(reader: &mut R) -> Result<InfoHeader, BitmapError> {
    let raw = read_fixed_bytes::<_, INFO_HEADER_SIZE>(reader)?;
    Ok(InfoHeader::from_bytes(&raw))
}

/// Write the 40-byte info header verbatim.
pub fn encode_info_header<W: Write>(
    header: &InfoHeader,
    writer: &mut W,
) -> Result<(), BitmapError> {
    writer.write_all(&header.to_bytes())?;
    Ok(())
}

/// Synthesize an info header for a `width` x `height` 24-bit image.
pub fn make_info_header(width: u32, height: u32) -> Result<InfoHeader, BitmapError> {
    let image_size = image_data_size(width, height)?;
    Ok(InfoHeader {
        header_size: INFO_HEADER_SIZE as u32,
        // image_data_size rejects anything above i32::MAX
        width: width as i32,
        height: height as i32, // positive = bottom-up
        planes: 1,
        bit_count: BITS_PER_PIXEL,
        compression: COMPRESSION_NONE,
        image_size,
        x_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
        y_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
        colors_used: 0,
        colors_important: 0,
    })
}
