//! Uncompressed 24-bit BMP (BITMAPINFOHEADER) decoder and encoder.
//!
//! In memory, pixels are tightly packed RGB with row 0 at the top. On disk,
//! pixels are BGR, each row is zero-padded to a multiple of 4 bytes, and rows
//! run bottom-up (positive stored height) or top-down (negative stored
//! height). The pixel data always starts at byte 54.

mod decode;
mod encode;
mod header;

use crate::error::BitmapError;
use crate::image::ImageBuffer;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use enough::Stop;

/// On-disk row order of a BMP file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RowOrder {
    /// Last image row first; stored height is positive. The conventional layout.
    #[default]
    BottomUp,
    /// First image row first; stored height is negative.
    TopDown,
}

/// Validated header information of a supported BMP file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpInfo {
    pub width: u32,
    pub height: u32,
    pub row_order: RowOrder,
    /// Bytes per stored row including padding.
    pub padded_row_bytes: usize,
    /// Bytes of pixel data following the headers.
    pub pixel_data_len: usize,
}

impl BmpInfo {
    /// Size of the decoded RGB buffer.
    pub fn output_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

/// Validate headers without decoding pixels.
pub(crate) fn probe(data: &[u8]) -> Result<BmpInfo, BitmapError> {
    header::BmpHeader::parse(data)?.validate()
}

/// Decode to a freshly allocated RGB image.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<ImageBuffer, BitmapError> {
    let info = probe(data)?;
    if let Some(limits) = limits {
        limits.check_info(&info)?;
    }
    let out_bytes = crate::image::checked_len(info.width, info.height, PixelLayout::Rgb8)?;
    let raw = decode::pixel_data(data, &info)?;
    stop.check()?;
    let mut pixels = vec![0u8; out_bytes];
    decode::decode_pixels(raw, &info, &mut pixels, stop)?;
    tracing::debug!(
        width = info.width,
        height = info.height,
        row_order = ?info.row_order,
        "decoded BMP"
    );
    Ok(ImageBuffer::from_parts(
        pixels,
        info.width,
        info.height,
        PixelLayout::Rgb8,
    ))
}

/// Decode into caller-owned memory of exactly `width * height * 3` bytes.
pub(crate) fn decode_into(
    data: &[u8],
    out: &mut [u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<BmpInfo, BitmapError> {
    let info = probe(data)?;
    if let Some(limits) = limits {
        limits.check_info(&info)?;
    }
    let expected = crate::image::checked_len(info.width, info.height, PixelLayout::Rgb8)?;
    if out.len() != expected {
        return Err(BitmapError::BufferSizeMismatch {
            expected,
            actual: out.len(),
        });
    }
    let raw = decode::pixel_data(data, &info)?;
    stop.check()?;
    decode::decode_pixels(raw, &info, out, stop)?;
    Ok(info)
}

/// Encode RGB pixels to BMP.
pub(crate) fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    order: RowOrder,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    encode::encode_bmp(pixels, width, height, order, stop)
}
