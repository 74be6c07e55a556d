//! File-to-file processing: open, decode, filter, encode, write.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::bitmap::Bitmap;
use crate::error::BitmapError;
use crate::filter::ColorShift;
use crate::limits::Limits;

/// Which filters to run, built once by the caller and passed by reference.
///
/// [`process_file`] applies them in a fixed order: grayscale, color shift,
/// resize.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterOptions {
    pub grayscale: bool,
    pub red_shift: Option<i32>,
    pub green_shift: Option<i32>,
    pub blue_shift: Option<i32>,
    pub scale: Option<f32>,
}

impl FilterOptions {
    /// The combined shift, or `None` when no channel was selected.
    ///
    /// Unselected channels get an offset of 0.
    pub fn color_shift(&self) -> Option<ColorShift> {
        if self.red_shift.is_none() && self.green_shift.is_none() && self.blue_shift.is_none() {
            return None;
        }
        Some(ColorShift::new(
            self.red_shift.unwrap_or(0),
            self.green_shift.unwrap_or(0),
            self.blue_shift.unwrap_or(0),
        ))
    }

    /// True when no filter is selected; the output is a re-encoded copy.
    pub fn is_identity(&self) -> bool {
        !self.grayscale && self.color_shift().is_none() && self.scale.is_none()
    }

    /// Run the selected filters on `bitmap`.
    pub fn apply(&self, bitmap: &mut Bitmap, limits: Option<&Limits>) -> Result<(), BitmapError> {
        if self.grayscale {
            bitmap.grayscale();
        }
        if let Some(shift) = self.color_shift() {
            bitmap.color_shift(shift);
        }
        if let Some(factor) = self.scale {
            bitmap.resize(factor, limits)?;
        }
        Ok(())
    }
}

/// Outcome of a successful [`process_file`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcessSummary {
    pub width: u32,
    pub height: u32,
    pub resized: bool,
}

/// Read `input`, apply `options`, write the result to `output`.
///
/// The input file is closed before the output is touched. The bitmap is
/// encoded into a temporary file next to `output`, which replaces `output`
/// only once it has been fully written and synced. On any failure an
/// existing `output` keeps its previous contents, and a missing one is not
/// created.
pub fn process_file(
    input: &Path,
    output: &Path,
    options: &FilterOptions,
    limits: Option<&Limits>,
) -> Result<ProcessSummary, BitmapError> {
    let mut bitmap = {
        let mut reader = BufReader::new(File::open(input)?);
        Bitmap::read_from(&mut reader, limits)?
    };

    options.apply(&mut bitmap, limits)?;
    replace_file(output, |file| bitmap.write_to(&mut BufWriter::new(file)))?;

    log::info!(
        "wrote {}x{} bitmap to {}",
        bitmap.width(),
        bitmap.height(),
        output.display()
    );
    Ok(ProcessSummary {
        width: bitmap.width(),
        height: bitmap.height(),
        resized: bitmap.was_resized(),
    })
}

/// Run `write` against a temporary file in `path`'s directory, then move it
/// over `path`. The temporary file is deleted if any step fails.
fn replace_file<F>(path: &Path, write: F) -> Result<(), BitmapError>
where
    F: FnOnce(&mut File) -> Result<(), BitmapError>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    write(staged.as_file_mut())?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// `dir/name.ext` becomes `dir/name_copy.ext`; without an extension,
/// `_copy` is appended.
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name: OsString = input.file_stem().map(OsString::from).unwrap_or_default();
    name.push("_copy");
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}
