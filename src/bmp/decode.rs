//! BMP pixel data decoder: BGR padded rows → packed top-down RGB.

use enough::Stop;

use super::BmpInfo;
use super::RowOrder;
use super::header::PIXEL_DATA_OFFSET;
use crate::error::BitmapError;

/// The stored pixel rows described by `info`, or `UnexpectedEof` if the input
/// is too short. Bytes past the pixel data are ignored.
pub(crate) fn pixel_data<'a>(data: &'a [u8], info: &BmpInfo) -> Result<&'a [u8], BitmapError> {
    let start = PIXEL_DATA_OFFSET as usize;
    let end = start
        .checked_add(info.pixel_data_len)
        .ok_or(BitmapError::UnexpectedEof)?;
    data.get(start..end).ok_or_else(|| {
        tracing::debug!(
            needed = end,
            actual = data.len(),
            "BMP pixel data truncated"
        );
        BitmapError::UnexpectedEof
    })
}

/// Convert stored rows (`raw`, from [`pixel_data`]) into `out`.
///
/// `out` must be exactly `width * height * 3` bytes. On error its contents are
/// unspecified.
pub(crate) fn decode_pixels(
    raw: &[u8],
    info: &BmpInfo,
    out: &mut [u8],
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let h = info.height as usize;
    let row_bytes = info.width as usize * 3;

    for (stored_idx, stored_row) in raw.chunks_exact(info.padded_row_bytes).enumerate() {
        if stored_idx % 16 == 0 {
            stop.check()?;
        }
        let y = match info.row_order {
            RowOrder::BottomUp => h - 1 - stored_idx,
            RowOrder::TopDown => stored_idx,
        };
        let dst = &mut out[y * row_bytes..(y + 1) * row_bytes];
        // Padding bytes past `row_bytes` are skipped.
        for (bgr, rgb) in stored_row[..row_bytes]
            .chunks_exact(3)
            .zip(dst.chunks_exact_mut(3))
        {
            rgb[0] = bgr[2];
            rgb[1] = bgr[1];
            rgb[2] = bgr[0];
        }
    }

    Ok(())
}
