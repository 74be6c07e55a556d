//! # bmpfilter
//!
//! Decoder and encoder for uncompressed 24-bit BMP files, plus three pixel
//! filters: grayscale, per-channel color shift and nearest-neighbor resize.
//!
//! ## Format
//!
//! Only the classic layout is handled: a 14-byte file header, a 40-byte
//! `BITMAPINFOHEADER` with 24 bits per pixel and no compression, and
//! bottom-up rows of B,G,R triples padded to 4 bytes. Decoding a file and
//! encoding it again without changes reproduces it byte for byte (padding
//! is always written as zeros).
//!
//! ## Non-Goals
//!
//! - Compressed variants (RLE, bitfields), palettes, other bit depths
//! - Any other image format
//!
//! ## Usage
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! use bmpfilter::{Bitmap, ColorShift};
//!
//! let mut reader = BufReader::new(File::open("in.bmp")?);
//! let mut bitmap = Bitmap::read_from(&mut reader, None)?;
//!
//! bitmap.grayscale();
//! bitmap.color_shift(ColorShift::new(20, 0, -20));
//! bitmap.resize(0.5, None)?;
//!
//! std::fs::write("out.bmp", bitmap.to_bytes()?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! For whole-file processing with a fixed filter order, see
//! [`process_file`] and [`FilterOptions`].

#![forbid(unsafe_code)]

mod bitmap;
mod buffer;
mod error;
mod limits;
mod pipeline;

pub mod bmp;
pub mod filter;

// Re-exports
pub use bitmap::Bitmap;
pub use buffer::{Pixel, PixelBuffer};
pub use error::{BitmapError, ErrorCategory};
pub use filter::ColorShift;
pub use limits::Limits;
pub use pipeline::{FilterOptions, ProcessSummary, default_output_path, process_file};
