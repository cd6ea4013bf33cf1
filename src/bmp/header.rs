//! BITMAPFILEHEADER + BITMAPINFOHEADER model for the 24-bit uncompressed subset.

use super::{BmpInfo, RowOrder};
use crate::error::BitmapError;

pub(crate) const MAGIC: [u8; 2] = *b"BM";
/// Magic + BITMAPFILEHEADER fields.
pub(crate) const FILE_HEADER_LEN: u32 = 14;
pub(crate) const INFO_HEADER_LEN: u32 = 40;
/// Offset of the first pixel row. The magic counts toward the file header.
pub(crate) const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_LEN + INFO_HEADER_LEN;
pub(crate) const BITS_PER_PIXEL: u16 = 24;
const COMPRESSION_NONE: u32 = 0;
/// 72 DPI.
const PIXELS_PER_METER: i32 = 2835;

/// Row length on disk: `width * 3` rounded up to a multiple of 4.
pub(crate) fn padded_row_bytes(width: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(3)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FileHeader {
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub offset: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct InfoHeader {
    pub size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub raw_bitmap_size: u32,
    pub x_resolution: i32,
    pub y_resolution: i32,
    pub colors_used: u32,
    pub important_colors: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BmpHeader {
    pub file: FileHeader,
    pub info: InfoHeader,
}

impl BmpHeader {
    /// Header for a 24-bit image with the given on-disk row order.
    ///
    /// Callers have already checked that the dimensions fit the `i32`/`u32` fields.
    pub(crate) fn for_image(
        width: u32,
        height: u32,
        order: RowOrder,
        pixel_data_size: u32,
    ) -> Self {
        let stored_height = match order {
            RowOrder::BottomUp => height as i32,
            RowOrder::TopDown => -(height as i32),
        };
        Self {
            file: FileHeader {
                file_size: PIXEL_DATA_OFFSET + pixel_data_size,
                reserved1: 0,
                reserved2: 0,
                offset: PIXEL_DATA_OFFSET,
            },
            info: InfoHeader {
                size: INFO_HEADER_LEN,
                width: width as i32,
                height: stored_height,
                planes: 1,
                bits_per_pixel: BITS_PER_PIXEL,
                compression: COMPRESSION_NONE,
                raw_bitmap_size: pixel_data_size,
                x_resolution: PIXELS_PER_METER,
                y_resolution: PIXELS_PER_METER,
                colors_used: 0,
                important_colors: 0,
            },
        }
    }

    /// Read the raw header fields. The magic and the pixel data offset are
    /// checked as soon as the file header is read, so a truncated file in an
    /// unsupported layout is reported as invalid rather than short.
    pub(crate) fn parse(data: &[u8]) -> Result<Self, BitmapError> {
        let mut c = Cursor::new(data);
        if data.len() < 2 || c.read_fixed_bytes::<2>()? != MAGIC {
            return Err(BitmapError::UnrecognizedFormat);
        }
        let file = FileHeader {
            file_size: c.get_u32_le()?,
            reserved1: c.get_u16_le()?,
            reserved2: c.get_u16_le()?,
            offset: c.get_u32_le()?,
        };
        if file.offset != PIXEL_DATA_OFFSET {
            return Err(invalid(format!(
                "pixel data offset is {}, expected {PIXEL_DATA_OFFSET}",
                file.offset
            )));
        }
        let info = InfoHeader {
            size: c.get_u32_le()?,
            width: c.get_i32_le()?,
            height: c.get_i32_le()?,
            planes: c.get_u16_le()?,
            bits_per_pixel: c.get_u16_le()?,
            compression: c.get_u32_le()?,
            raw_bitmap_size: c.get_u32_le()?,
            x_resolution: c.get_i32_le()?,
            y_resolution: c.get_i32_le()?,
            colors_used: c.get_u32_le()?,
            important_colors: c.get_u32_le()?,
        };
        Ok(Self { file, info })
    }

    /// Check the header describes the supported subset and derive the layout
    /// of the pixel data.
    pub(crate) fn validate(&self) -> Result<BmpInfo, BitmapError> {
        let info = &self.info;

        if info.size != INFO_HEADER_LEN {
            return Err(invalid(format!(
                "info header size is {}, expected {INFO_HEADER_LEN}",
                info.size
            )));
        }
        if info.planes != 1 {
            return Err(invalid(format!("planes field is {}, expected 1", info.planes)));
        }
        if info.compression != COMPRESSION_NONE {
            return Err(unsupported(format!(
                "compression type {} (only uncompressed is supported)",
                info.compression
            )));
        }
        if info.bits_per_pixel != BITS_PER_PIXEL {
            return Err(unsupported(format!(
                "bit depth {} (only 24-bit is supported)",
                info.bits_per_pixel
            )));
        }
        if info.colors_used != 0 || info.important_colors != 0 {
            return Err(invalid(format!(
                "palette fields must be zero for 24-bit (colors used {}, important {})",
                info.colors_used, info.important_colors
            )));
        }
        if info.width <= 0 {
            return Err(invalid(format!("width is {}", info.width)));
        }
        if info.height == 0 {
            return Err(invalid("height is zero".into()));
        }

        let row_order = if info.height > 0 {
            RowOrder::BottomUp
        } else {
            RowOrder::TopDown
        };
        let width = info.width as u32;
        let height = info.height.unsigned_abs();
        let padded_row_bytes =
            padded_row_bytes(width).ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        let pixel_data_len = padded_row_bytes
            .checked_mul(height as usize)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;

        Ok(BmpInfo {
            width,
            height,
            row_order,
            padded_row_bytes,
            pixel_data_len,
        })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        let (file, info) = (&self.file, &self.info);

        // File header (14 bytes)
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&file.file_size.to_le_bytes());
        out.extend_from_slice(&file.reserved1.to_le_bytes());
        out.extend_from_slice(&file.reserved2.to_le_bytes());
        out.extend_from_slice(&file.offset.to_le_bytes());

        // BITMAPINFOHEADER (40 bytes)
        out.extend_from_slice(&info.size.to_le_bytes());
        out.extend_from_slice(&info.width.to_le_bytes());
        out.extend_from_slice(&info.height.to_le_bytes()); // positive = bottom-up
        out.extend_from_slice(&info.planes.to_le_bytes());
        out.extend_from_slice(&info.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&info.compression.to_le_bytes());
        out.extend_from_slice(&info.raw_bitmap_size.to_le_bytes());
        out.extend_from_slice(&info.x_resolution.to_le_bytes());
        out.extend_from_slice(&info.y_resolution.to_le_bytes());
        out.extend_from_slice(&info.colors_used.to_le_bytes());
        out.extend_from_slice(&info.important_colors.to_le_bytes());
    }
}

fn invalid(reason: String) -> BitmapError {
    tracing::debug!(%reason, "rejecting BMP header");
    BitmapError::InvalidHeader(reason)
}

fn unsupported(reason: String) -> BitmapError {
    tracing::debug!(%reason, "unsupported BMP variant");
    BitmapError::UnsupportedVariant(reason)
}

// ── Cursor for reading little-endian fields from &[u8] ──────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let end = self.pos.checked_add(N).ok_or(BitmapError::UnexpectedEof)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(BitmapError::UnexpectedEof)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos = end;
        Ok(buf)
    }

    fn get_u16_le(&mut self) -> Result<u16, BitmapError> {
        self.read_fixed_bytes().map(u16::from_le_bytes)
    }

    fn get_u32_le(&mut self) -> Result<u32, BitmapError> {
        self.read_fixed_bytes().map(u32::from_le_bytes)
    }

    fn get_i32_le(&mut self) -> Result<i32, BitmapError> {
        self.read_fixed_bytes().map(i32::from_le_bytes)
    }
}
