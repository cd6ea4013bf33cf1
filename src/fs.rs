//! File-level BMP load/save and raw buffer dumps.
//!
//! Each call opens, uses and closes its own handle. Encoding happens fully in
//! memory before the destination is created, so argument errors never touch
//! the filesystem. An I/O error mid-write can leave a partial file behind;
//! removing it is up to the caller.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use enough::Unstoppable;

use crate::bmp::{self, RowOrder};
use crate::error::BitmapError;
use crate::image::ImageBuffer;
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// Save packed RGB pixels as a bottom-up 24-bit BMP file.
pub fn save_bmp(
    path: impl AsRef<Path>,
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<(), BitmapError> {
    save_bmp_with_order(path, pixels, width, height, RowOrder::BottomUp)
}

/// Save packed RGB pixels as a 24-bit BMP file with the given row order.
pub fn save_bmp_with_order(
    path: impl AsRef<Path>,
    pixels: &[u8],
    width: u32,
    height: u32,
    order: RowOrder,
) -> Result<(), BitmapError> {
    let path = path.as_ref();
    let encoded = bmp::encode(pixels, width, height, order, &Unstoppable)?;
    write_file(path, &encoded)?;
    tracing::debug!(path = %path.display(), width, height, "saved BMP");
    Ok(())
}

/// Load a 24-bit BMP file as packed RGB, row 0 at the top.
pub fn load_bmp(path: impl AsRef<Path>) -> Result<ImageBuffer, BitmapError> {
    load(path.as_ref(), None)
}

/// Like [`load_bmp`], rejecting images that exceed `limits`.
pub fn load_bmp_with_limits(
    path: impl AsRef<Path>,
    limits: &Limits,
) -> Result<ImageBuffer, BitmapError> {
    load(path.as_ref(), Some(limits))
}

/// Write `bytes` to `path` verbatim.
///
/// Handy for dumping a staged device buffer for offline inspection.
pub fn save_raw(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), BitmapError> {
    let path = path.as_ref();
    write_file(path, bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved raw buffer");
    Ok(())
}

impl ImageBuffer {
    /// Save this image as a bottom-up 24-bit BMP file. Only `Rgb8` images can
    /// be saved; convert other layouts first.
    pub fn save_bmp(&self, path: impl AsRef<Path>) -> Result<(), BitmapError> {
        if self.layout() != PixelLayout::Rgb8 {
            return Err(BitmapError::LayoutMismatch {
                expected: PixelLayout::Rgb8,
                actual: self.layout(),
            });
        }
        save_bmp(path, self.pixels(), self.width(), self.height())
    }
}

fn load(path: &Path, limits: Option<&Limits>) -> Result<ImageBuffer, BitmapError> {
    let mut file = File::open(path).map_err(|source| open_error(path, source))?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    drop(file);

    let image = bmp::decode(&data, limits, &Unstoppable)?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "loaded BMP"
    );
    Ok(image)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), BitmapError> {
    let mut file = File::create(path).map_err(|source| open_error(path, source))?;
    file.write_all(bytes)?;
    Ok(())
}

fn open_error(path: &Path, source: std::io::Error) -> BitmapError {
    tracing::debug!(path = %path.display(), error = %source, "failed to open");
    BitmapError::Open {
        path: path.to_path_buf(),
        source,
    }
}
