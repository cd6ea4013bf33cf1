//! BMP encoder: uncompressed 24-bit BMP from packed RGB.

use enough::Stop;

use super::RowOrder;
use super::header::{BmpHeader, PIXEL_DATA_OFFSET, padded_row_bytes};
use crate::error::BitmapError;
use crate::image::checked_len;
use crate::pixel::PixelLayout;

/// Encode RGB pixels to BMP format.
pub(crate) fn encode_bmp(
    pixels: &[u8],
    width: u32,
    height: u32,
    order: RowOrder,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    let expected = checked_len(width, height, PixelLayout::Rgb8)?;
    if pixels.len() != expected {
        return Err(BitmapError::BufferSizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }
    // Both dimensions are stored as i32; a top-down height is stored negated.
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(BitmapError::DimensionsTooLarge { width, height });
    }

    let w = width as usize;
    let h = height as usize;
    let row_stride =
        padded_row_bytes(width).ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let pixel_data_size = row_stride
        .checked_mul(h)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let file_size = pixel_data_size
        .checked_add(PIXEL_DATA_OFFSET as usize)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    if u32::try_from(file_size).is_err() {
        return Err(BitmapError::DimensionsTooLarge { width, height });
    }

    stop.check()?;

    let mut out = Vec::with_capacity(file_size);
    BmpHeader::for_image(width, height, order, pixel_data_size as u32).write(&mut out);

    let pad_bytes = row_stride - w * 3;
    let write_row = |row: usize, out: &mut Vec<u8>| {
        let src = &pixels[row * w * 3..(row + 1) * w * 3];
        for rgb in src.chunks_exact(3) {
            out.push(rgb[2]);
            out.push(rgb[1]);
            out.push(rgb[0]);
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    };

    match order {
        RowOrder::BottomUp => {
            for row in (0..h).rev() {
                if row % 16 == 0 {
                    stop.check()?;
                }
                write_row(row, &mut out);
            }
        }
        RowOrder::TopDown => {
            for row in 0..h {
                if row % 16 == 0 {
                    stop.check()?;
                }
                write_row(row, &mut out);
            }
        }
    }

    debug_assert_eq!(out.len(), file_size);
    tracing::debug!(width, height, row_order = ?order, bytes = out.len(), "encoded BMP");
    Ok(out)
}
