/// Pixel memory layout of an [`crate::ImageBuffer`].
///
/// All layouts are interleaved with no row padding.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// Single channel, 8-bit luminance/gray.
    Gray8,
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
    /// Single channel, signed 16-bit (native endian).
    GrayS16,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::GrayS16 => 2,
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray8 | Self::GrayS16 => 1,
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    /// Byte length of a tightly packed `width` x `height` image, or `None`
    /// on overflow.
    pub(crate) fn buffer_len(&self, width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|wh| wh.checked_mul(self.bytes_per_pixel()))
    }
}

/// Pixel types that can view an [`crate::ImageBuffer`]'s bytes directly.
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy {
    /// The layout whose bytes this type reinterprets.
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGB8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGBA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }
}
