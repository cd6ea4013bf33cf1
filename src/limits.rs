//! Resource caps for decoding untrusted BMP data.

use crate::bmp::BmpInfo;
use crate::error::BitmapError;

/// Resource caps applied once a BMP header validates, before any pixel data
/// is read or output memory is touched.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes a decode touches: the stored pixel rows including their
    /// padding, plus the packed RGB output.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Reject a decode of `info` that would exceed any cap.
    pub(crate) fn check_info(&self, info: &BmpInfo) -> Result<(), BitmapError> {
        let (width, height) = (u64::from(info.width), u64::from(info.height));

        if let Some(max) = self.max_width
            && info.width > max
        {
            return Err(exceeded("width", width, max.into()));
        }
        if let Some(max) = self.max_height
            && info.height > max
        {
            return Err(exceeded("height", height, max.into()));
        }
        let pixels = width * height;
        if let Some(max) = self.max_pixels
            && pixels > max
        {
            return Err(exceeded("pixel count", pixels, max));
        }
        if let Some(max) = self.max_memory_bytes {
            let bytes = (info.pixel_data_len as u64).saturating_add(pixels.saturating_mul(3));
            if bytes > max {
                return Err(exceeded("stored plus decoded bytes", bytes, max));
            }
        }
        Ok(())
    }
}

fn exceeded(what: &str, value: u64, max: u64) -> BitmapError {
    tracing::debug!(what, value, max, "BMP exceeds decode limit");
    BitmapError::LimitExceeded(format!("BMP {what} {value} exceeds limit {max}"))
}
