//! Pixel layout conversions between luminance/gray, RGB, and RGBA.
//!
//! The slice functions write into a caller-supplied destination whose length
//! must match the target layout exactly. [`ImageBuffer::convert`] allocates
//! the destination instead.
//!
//! Two single-channel derivations are provided on purpose: *luminance* uses
//! ITU-R BT.709 weights, *gray* uses ITU-R BT.601 weights. Both round half up
//! (add 0.5, truncate) and saturate to `0..=255`.

use crate::error::BitmapError;
use crate::image::{ImageBuffer, checked_len};
use crate::pixel::PixelLayout;

const BT709: [f32; 3] = [0.2126, 0.7152, 0.0722];
const BT601: [f32; 3] = [0.299, 0.587, 0.114];

/// A named layout conversion.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Conversion {
    /// Gray8 → Rgb8, value replicated into R, G, B.
    LuminanceToRgb,
    /// Rgb8 → Gray8, BT.709 weights.
    RgbToLuminance,
    /// Gray8 → Rgb8, value replicated into R, G, B.
    GrayToRgb,
    /// Rgb8 → Gray8, BT.601 weights.
    RgbToGray,
    /// Rgb8 → Rgba8, alpha = 255.
    RgbToRgba,
    /// Rgba8 → Rgb8, alpha discarded.
    RgbaToRgb,
}

impl Conversion {
    pub fn source_layout(self) -> PixelLayout {
        match self {
            Self::LuminanceToRgb | Self::GrayToRgb => PixelLayout::Gray8,
            Self::RgbToLuminance | Self::RgbToGray | Self::RgbToRgba => PixelLayout::Rgb8,
            Self::RgbaToRgb => PixelLayout::Rgba8,
        }
    }

    pub fn target_layout(self) -> PixelLayout {
        match self {
            Self::LuminanceToRgb | Self::GrayToRgb | Self::RgbaToRgb => PixelLayout::Rgb8,
            Self::RgbToLuminance | Self::RgbToGray => PixelLayout::Gray8,
            Self::RgbToRgba => PixelLayout::Rgba8,
        }
    }

    /// Run this conversion from `src` into `dst`.
    pub fn apply(
        self,
        src: &[u8],
        dst: &mut [u8],
        width: u32,
        height: u32,
    ) -> Result<(), BitmapError> {
        match self {
            Self::LuminanceToRgb => luminance_to_rgb(src, dst, width, height),
            Self::RgbToLuminance => rgb_to_luminance(src, dst, width, height),
            Self::GrayToRgb => gray_to_rgb(src, dst, width, height),
            Self::RgbToGray => rgb_to_gray(src, dst, width, height),
            Self::RgbToRgba => rgb_to_rgba(src, dst, width, height),
            Self::RgbaToRgb => rgba_to_rgb(src, dst, width, height),
        }
    }
}

impl ImageBuffer {
    /// Convert into a newly allocated buffer; `self` is left untouched.
    pub fn convert(&self, conversion: Conversion) -> Result<ImageBuffer, BitmapError> {
        if self.layout() != conversion.source_layout() {
            return Err(BitmapError::LayoutMismatch {
                expected: conversion.source_layout(),
                actual: self.layout(),
            });
        }
        let target = conversion.target_layout();
        let len = checked_len(self.width(), self.height(), target)?;
        let mut out = vec![0u8; len];
        conversion.apply(self.pixels(), &mut out, self.width(), self.height())?;
        tracing::trace!(?conversion, width = self.width(), height = self.height(), "converted");
        Ok(ImageBuffer::from_parts(out, self.width(), self.height(), target))
    }
}

/// Replicate each luminance byte into R, G and B.
pub fn luminance_to_rgb(
    src: &[u8],
    dst: &mut [u8],
    width: u32,
    height: u32,
) -> Result<(), BitmapError> {
    check_buffers(src, dst, width, height, PixelLayout::Gray8, PixelLayout::Rgb8)?;
    replicate(src, dst);
    Ok(())
}

/// BT.709 luminance of each RGB pixel.
pub fn rgb_to_luminance(
    src: &[u8],
    dst: &mut [u8],
    width: u32,
    height: u32,
) -> Result<(), BitmapError> {
    check_buffers(src, dst, width, height, PixelLayout::Rgb8, PixelLayout::Gray8)?;
    weighted(src, dst, BT709);
    Ok(())
}

/// Replicate each gray byte into R, G and B.
pub fn gray_to_rgb(
    src: &[u8],
    dst: &mut [u8],
    width: u32,
    height: u32,
) -> Result<(), BitmapError> {
    check_buffers(src, dst, width, height, PixelLayout::Gray8, PixelLayout::Rgb8)?;
    replicate(src, dst);
    Ok(())
}

/// BT.601 gray value of each RGB pixel.
pub fn rgb_to_gray(
    src: &[u8],
    dst: &mut [u8],
    width: u32,
    height: u32,
) -> Result<(), BitmapError> {
    check_buffers(src, dst, width, height, PixelLayout::Rgb8, PixelLayout::Gray8)?;
    weighted(src, dst, BT601);
    Ok(())
}

/// Copy RGB and set alpha to 255.
pub fn rgb_to_rgba(
    src: &[u8],
    dst: &mut [u8],
    width: u32,
    height: u32,
) -> Result<(), BitmapError> {
    check_buffers(src, dst, width, height, PixelLayout::Rgb8, PixelLayout::Rgba8)?;
    for (rgb, rgba) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        rgba[..3].copy_from_slice(rgb);
        rgba[3] = 255;
    }
    Ok(())
}

/// Copy RGB and drop alpha.
pub fn rgba_to_rgb(
    src: &[u8],
    dst: &mut [u8],
    width: u32,
    height: u32,
) -> Result<(), BitmapError> {
    check_buffers(src, dst, width, height, PixelLayout::Rgba8, PixelLayout::Rgb8)?;
    for (rgba, rgb) in src.chunks_exact(4).zip(dst.chunks_exact_mut(3)) {
        rgb.copy_from_slice(&rgba[..3]);
    }
    Ok(())
}

fn check_buffers(
    src: &[u8],
    dst: &[u8],
    width: u32,
    height: u32,
    from: PixelLayout,
    to: PixelLayout,
) -> Result<(), BitmapError> {
    let src_len = checked_len(width, height, from)?;
    let dst_len = checked_len(width, height, to)?;
    if src.len() != src_len {
        return Err(BitmapError::BufferSizeMismatch {
            expected: src_len,
            actual: src.len(),
        });
    }
    if dst.len() != dst_len {
        return Err(BitmapError::BufferSizeMismatch {
            expected: dst_len,
            actual: dst.len(),
        });
    }
    Ok(())
}

fn replicate(src: &[u8], dst: &mut [u8]) {
    for (&v, rgb) in src.iter().zip(dst.chunks_exact_mut(3)) {
        rgb.fill(v);
    }
}

fn weighted(src: &[u8], dst: &mut [u8], [wr, wg, wb]: [f32; 3]) {
    for (rgb, out) in src.chunks_exact(3).zip(dst.iter_mut()) {
        let r = f32::from(rgb[0]);
        let g = f32::from(rgb[1]);
        let b = f32::from(rgb[2]);
        // float -> int `as` saturates
        *out = (wr * r + wg * g + wb * b + 0.5) as u8;
    }
}
