//! # Image I/O
//!
//! The evolution core only ever sees `PixelGrid`s. This module connects it to image
//! files: `load_reference` decodes the target image, and `SnapshotSink`
//! implementations receive the rendering of every new best individual.
//!
//! Snapshot errors are returned to the caller instead of being swallowed; the
//! evolution loop logs them and keeps going.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::error::{GeneticError, Result};
use crate::pixel_grid::PixelGrid;

/// Decodes an image file (PNG, JPEG) into a `PixelGrid`, dropping any alpha channel.
///
/// # Errors
///
/// Returns `GeneticError::ImageDecode` if the file is missing, unreadable or in an
/// unsupported format.
pub fn load_reference<P: AsRef<Path>>(path: P) -> Result<PixelGrid> {
    let path = path.as_ref();
    let image = image::open(path)
        .map_err(|e| GeneticError::ImageDecode(format!("{}: {}", path.display(), e)))?
        .to_rgb8();
    Ok(PixelGrid::from(&image))
}

/// Receives the rendering of each new best individual.
pub trait SnapshotSink {
    fn write(&mut self, grid: &PixelGrid) -> Result<()>;
}

impl<F> SnapshotSink for F
where
    F: FnMut(&PixelGrid) -> Result<()>,
{
    fn write(&mut self, grid: &PixelGrid) -> Result<()> {
        self(grid)
    }
}

/// Writes every snapshot to the same file, replacing the previous one.
///
/// The file is truncated and rewritten on every call. The encoding is chosen from
/// the file extension.
#[derive(Debug, Clone)]
pub struct PngSnapshot {
    path: PathBuf,
}

impl PngSnapshot {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSink for PngSnapshot {
    /// # Errors
    ///
    /// Returns `GeneticError::ImageEncode` if the extension names no supported format
    /// or encoding fails, and `GeneticError::Io` if the file cannot be created or
    /// flushed.
    fn write(&mut self, grid: &PixelGrid) -> Result<()> {
        let encode_error =
            |e: image::ImageError| GeneticError::ImageEncode(format!("{}: {}", self.path.display(), e));

        let format = ImageFormat::from_path(&self.path).map_err(encode_error)?;
        let mut writer = BufWriter::new(File::create(&self.path)?);
        grid.to_rgb_image()
            .write_to(&mut writer, format)
            .map_err(encode_error)?;
        writer.flush()?;
        Ok(())
    }
}

/// Discards every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSnapshot;

impl SnapshotSink for NoSnapshot {
    fn write(&mut self, _grid: &PixelGrid) -> Result<()> {
        Ok(())
    }
}
