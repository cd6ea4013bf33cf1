//! # zenstage
//!
//! CPU-side image plumbing for staging GPU compute buffers: a 24-bit BMP
//! codec and conversions between the packed pixel layouts kernels consume.
//!
//! ## Image buffers
//!
//! [`ImageBuffer`] is the interchange type: `width * height * bytes_per_pixel`
//! tightly packed bytes, row 0 at the top, no padding. Whoever uploads it to a
//! device sees exactly that layout. [`decode_bmp_into`] decodes straight into
//! memory the caller already owns, such as a mapped staging region.
//!
//! ## Supported formats
//!
//! - **BMP**: uncompressed 24-bit with a 40-byte BITMAPINFOHEADER, bottom-up
//!   or top-down rows. Pixel data always starts at byte 54.
//! - **Layouts**: Gray8 (luminance), Rgb8, Rgba8, and GrayS16 for signed
//!   single-channel kernel output.
//!
//! ## Non-Goals
//!
//! - Palettized, RLE, bitfield, 16-bit and 32-bit BMPs
//! - Device context setup, kernel compilation, and device memory allocation
//! - On-screen display
//!
//! ## Usage
//!
//! ```no_run
//! use zenstage::{Conversion, Unstoppable};
//!
//! let image = zenstage::load_bmp("input.bmp")?;
//! let luma = image.convert(Conversion::RgbToLuminance)?;
//! let back = luma.convert(Conversion::LuminanceToRgb)?;
//! back.save_bmp("output.bmp")?;
//!
//! let encoded = zenstage::encode_bmp(back.pixels(), back.width(), back.height(), Unstoppable)?;
//! let info = zenstage::probe_bmp(&encoded)?;
//! assert_eq!(info.width, back.width());
//! # Ok::<(), zenstage::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod image;
mod limits;
mod pixel;

pub mod bmp;
pub mod convert;

mod fs;

// Re-exports
pub use bmp::{BmpInfo, RowOrder};
pub use convert::{
    Conversion, gray_to_rgb, luminance_to_rgb, rgb_to_gray, rgb_to_luminance, rgb_to_rgba,
    rgba_to_rgb,
};
pub use enough::{Stop, Unstoppable};
pub use error::{BitmapError, ErrorKind};
pub use image::ImageBuffer;
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;

pub use fs::{load_bmp, load_bmp_with_limits, save_bmp, save_bmp_with_order, save_raw};

/// Decode a 24-bit BMP to packed RGB, row 0 at the top.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<ImageBuffer, BitmapError> {
    bmp::decode(data, None, &stop)
}

/// Decode a 24-bit BMP, rejecting images that exceed `limits`.
pub fn decode_bmp_with_limits(
    data: &[u8],
    limits: &Limits,
    stop: impl Stop,
) -> Result<ImageBuffer, BitmapError> {
    bmp::decode(data, Some(limits), &stop)
}

/// Decode a 24-bit BMP into `out`, which must be exactly
/// `width * height * 3` bytes (see [`BmpInfo::output_len`]).
pub fn decode_bmp_into(
    data: &[u8],
    out: &mut [u8],
    stop: impl Stop,
) -> Result<BmpInfo, BitmapError> {
    bmp::decode_into(data, out, None, &stop)
}

/// Like [`decode_bmp_into`], rejecting images that exceed `limits` before
/// `out` is written.
pub fn decode_bmp_into_with_limits(
    data: &[u8],
    out: &mut [u8],
    limits: &Limits,
    stop: impl Stop,
) -> Result<BmpInfo, BitmapError> {
    bmp::decode_into(data, out, Some(limits), &stop)
}

/// Validate BMP headers and report dimensions without decoding pixels.
pub fn probe_bmp(data: &[u8]) -> Result<BmpInfo, BitmapError> {
    bmp::probe(data)
}

/// Encode packed RGB pixels as a bottom-up 24-bit BMP.
pub fn encode_bmp(
    pixels: &[u8],
    width: u32,
    height: u32,
    stop: impl Stop,
) -> Result<Vec<u8>, BitmapError> {
    bmp::encode(pixels, width, height, RowOrder::BottomUp, &stop)
}

/// Encode packed RGB pixels as a 24-bit BMP with the given row order.
pub fn encode_bmp_with_order(
    pixels: &[u8],
    width: u32,
    height: u32,
    order: RowOrder,
    stop: impl Stop,
) -> Result<Vec<u8>, BitmapError> {
    bmp::encode(pixels, width, height, order, &stop)
}
