#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::BitmapError;
use crate::pixel::PixelLayout;

/// Owned, tightly packed image: `width * height * bytes_per_pixel` bytes,
/// row 0 is the top row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    layout: PixelLayout,
}

impl ImageBuffer {
    /// Wrap `pixels` as an image, validating dimensions and length.
    pub fn new(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<Self, BitmapError> {
        let expected = checked_len(width, height, layout)?;
        if pixels.len() != expected {
            return Err(BitmapError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            layout,
        })
    }

    /// A zero-filled image.
    pub fn zeroed(width: u32, height: u32, layout: PixelLayout) -> Result<Self, BitmapError> {
        let len = checked_len(width, height, layout)?;
        Ok(Self {
            pixels: vec![0u8; len],
            width,
            height,
            layout,
        })
    }

    /// Caller guarantees the length invariant.
    pub(crate) fn from_parts(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Self {
        debug_assert_eq!(Some(pixels.len()), layout.buffer_len(width, height));
        Self {
            pixels,
            width,
            height,
            layout,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Bytes per row (no padding).
    pub fn stride(&self) -> usize {
        self.width as usize * self.layout.bytes_per_pixel()
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access to the pixel data. The length cannot change.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Row `y` counted from the top, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.stride();
        let start = y as usize * stride;
        self.pixels.get(start..start + stride)
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`BitmapError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], BitmapError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.layout != P::layout() {
            return Err(BitmapError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, BitmapError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Copy into an [`imgref::ImgVec`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, BitmapError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}

pub(crate) fn checked_len(
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> Result<usize, BitmapError> {
    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidDimensions { width, height });
    }
    layout
        .buffer_len(width, height)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}
