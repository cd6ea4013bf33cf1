//! Test corpus: BMP roundtrips over patterns and sizes, plus malformed input.

use enough::Unstoppable;
use zenstage::*;

fn checkerboard(w: usize, h: usize, bpp: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * bpp];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * bpp;
            if (x + y) % 2 == 0 {
                for c in 0..bpp {
                    pixels[off + c] = 200 + (c as u8 * 20);
                }
            } else {
                for c in 0..bpp {
                    pixels[off + c] = 10 + (c as u8 * 30);
                }
            }
        }
    }
    pixels
}

fn noise_pattern(w: usize, h: usize, bpp: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * bpp];
    let mut state: u32 = 0xDEAD_BEEF;
    for p in pixels.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    pixels
}

/// Offsets into the 54-byte header.
const OFFSET_FIELD: usize = 10;
const HEIGHT_FIELD: usize = 22;
const BPP_FIELD: usize = 28;
const COMPRESSION_FIELD: usize = 30;
const COLORS_USED_FIELD: usize = 46;

fn put_u32(data: &mut [u8], off: usize, v: u32) {
    data[off..off + 4].copy_from_slice(&v.to_le_bytes());
}

// ── Roundtrips ──────────────────────────────────────────────────────

#[test]
fn flat_bmp_roundtrip() {
    let pixels = checkerboard(10, 8, 3);
    let encoded = encode_bmp(&pixels, 10, 8, Unstoppable).unwrap();
    let decoded = decode_bmp(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn noise_roundtrip_both_orders() {
    for order in [RowOrder::BottomUp, RowOrder::TopDown] {
        for (w, h) in [(1, 1), (2, 3), (5, 7), (17, 16), (33, 2)] {
            let pixels = noise_pattern(w, h, 3);
            let encoded =
                encode_bmp_with_order(&pixels, w as u32, h as u32, order, Unstoppable).unwrap();
            let decoded = decode_bmp(&encoded, Unstoppable).unwrap();
            assert_eq!(decoded.width(), w as u32);
            assert_eq!(decoded.height(), h as u32);
            assert_eq!(decoded.pixels(), &pixels[..], "{w}x{h} {order:?}");
        }
    }
}

#[test]
fn single_pixel_bmp() {
    let pixels = vec![12u8, 34, 56];
    let encoded = encode_bmp(&pixels, 1, 1, Unstoppable).unwrap();
    assert_eq!(encoded.len(), 54 + 4);
    let decoded = decode_bmp(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn padding_matches_row_formula() {
    for w in 1..=24u32 {
        let pixels = checkerboard(w as usize, 2, 3);
        let encoded = encode_bmp(&pixels, w, 2, Unstoppable).unwrap();
        let padded = (w as usize * 3).div_ceil(4) * 4;
        assert_eq!(encoded.len(), 54 + padded * 2, "width {w}");
        assert_eq!(probe_bmp(&encoded).unwrap().padded_row_bytes, padded);
        // Padding bytes are zero.
        for row in encoded[54..].chunks_exact(padded) {
            assert!(row[w as usize * 3..].iter().all(|&b| b == 0));
        }
    }
}

#[test]
fn trailing_bytes_ignored() {
    let pixels = checkerboard(3, 3, 3);
    let mut encoded = encode_bmp(&pixels, 3, 3, Unstoppable).unwrap();
    encoded.extend_from_slice(&[0xAA; 9]);
    let decoded = decode_bmp(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn flipped_height_sign_flips_image() {
    // Rewriting a bottom-up file's height as negative reads the rows in reverse.
    let pixels = noise_pattern(4, 3, 3);
    let mut encoded = encode_bmp(&pixels, 4, 3, Unstoppable).unwrap();
    encoded[HEIGHT_FIELD..HEIGHT_FIELD + 4].copy_from_slice(&(-3i32).to_le_bytes());
    let decoded = decode_bmp(&encoded, Unstoppable).unwrap();
    let rows: Vec<&[u8]> = pixels.chunks_exact(12).rev().collect();
    assert_eq!(decoded.pixels(), rows.concat().as_slice());
}

// ── Malformed input ─────────────────────────────────────────────────

#[test]
fn bad_magic_rejected() {
    let mut encoded = encode_bmp(&[0u8; 12], 2, 2, Unstoppable).unwrap();
    encoded[0] = b'P';
    let err = decode_bmp(&encoded, Unstoppable).unwrap_err();
    assert!(matches!(err, BitmapError::UnrecognizedFormat));
    assert_eq!(err.kind(), ErrorKind::FormatInvalid);
}

#[test]
fn empty_input_rejected() {
    let err = decode_bmp(&[], Unstoppable).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FormatInvalid);
}

#[test]
fn non_24_bit_rejected() {
    for bpp in [1u16, 8, 16, 32] {
        let mut encoded = encode_bmp(&[0u8; 12], 2, 2, Unstoppable).unwrap();
        encoded[BPP_FIELD..BPP_FIELD + 2].copy_from_slice(&bpp.to_le_bytes());
        let err = decode_bmp(&encoded, Unstoppable).unwrap_err();
        assert!(matches!(err, BitmapError::UnsupportedVariant(_)), "{bpp}");
        assert_eq!(err.kind(), ErrorKind::FormatUnsupported);
    }
}

#[test]
fn compressed_rejected() {
    let mut encoded = encode_bmp(&[0u8; 12], 2, 2, Unstoppable).unwrap();
    put_u32(&mut encoded, COMPRESSION_FIELD, 1);
    let err = decode_bmp(&encoded, Unstoppable).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FormatUnsupported);
}

#[test]
fn offset_other_than_54_rejected() {
    let mut encoded = encode_bmp(&[0u8; 12], 2, 2, Unstoppable).unwrap();
    put_u32(&mut encoded, OFFSET_FIELD, 56);
    let err = decode_bmp(&encoded, Unstoppable).unwrap_err();
    assert!(matches!(err, BitmapError::InvalidHeader(_)));
}

#[test]
fn truncated_palettized_file_is_invalid_not_short() {
    // 8-bit palettized files put pixels after a 1024-byte palette.
    let mut data = encode_bmp(&[0u8; 12], 2, 2, Unstoppable).unwrap();
    put_u32(&mut data, OFFSET_FIELD, 1078);
    data.truncate(20);
    let err = decode_bmp(&data, Unstoppable).unwrap_err();
    assert!(matches!(err, BitmapError::InvalidHeader(_)));
    assert_eq!(err.kind(), ErrorKind::FormatInvalid);
    assert_eq!(probe_bmp(&data).unwrap_err().kind(), ErrorKind::FormatInvalid);
}

#[test]
fn palette_count_rejected() {
    let mut encoded = encode_bmp(&[0u8; 12], 2, 2, Unstoppable).unwrap();
    put_u32(&mut encoded, COLORS_USED_FIELD, 256);
    let err = decode_bmp(&encoded, Unstoppable).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FormatInvalid);
}

#[test]
fn zero_height_rejected() {
    let mut encoded = encode_bmp(&[0u8; 12], 2, 2, Unstoppable).unwrap();
    put_u32(&mut encoded, HEIGHT_FIELD, 0);
    assert!(matches!(
        decode_bmp(&encoded, Unstoppable),
        Err(BitmapError::InvalidHeader(_))
    ));
}

#[test]
fn truncated_pixels_rejected() {
    let encoded = encode_bmp(&checkerboard(4, 4, 3), 4, 4, Unstoppable).unwrap();
    let err = decode_bmp(&encoded[..encoded.len() - 1], Unstoppable).unwrap_err();
    assert!(matches!(err, BitmapError::UnexpectedEof));
    assert_eq!(err.kind(), ErrorKind::IoFailure);
}

#[test]
fn truncated_header_rejected() {
    let encoded = encode_bmp(&[0u8; 3], 1, 1, Unstoppable).unwrap();
    let err = decode_bmp(&encoded[..20], Unstoppable).unwrap_err();
    assert!(matches!(err, BitmapError::UnexpectedEof));
}

#[test]
fn garbage_never_panics() {
    let noise = noise_pattern(64, 64, 1);
    for len in [0, 1, 2, 14, 53, 54, 55, 200, noise.len()] {
        let mut data = noise[..len].to_vec();
        if len >= 2 {
            data[0] = b'B';
            data[1] = b'M';
        }
        let _ = decode_bmp(&data, Unstoppable);
        let _ = probe_bmp(&data);
    }
}

// ── Encoder preconditions ───────────────────────────────────────────

#[test]
fn encode_rejects_zero_dimensions() {
    let err = encode_bmp(&[], 0, 3, Unstoppable).unwrap_err();
    assert!(matches!(
        err,
        BitmapError::InvalidDimensions {
            width: 0,
            height: 3
        }
    ));
}

#[test]
fn encode_rejects_wrong_length() {
    let err = encode_bmp(&[0u8; 11], 2, 2, Unstoppable).unwrap_err();
    assert!(matches!(
        err,
        BitmapError::BufferSizeMismatch {
            expected: 12,
            actual: 11
        }
    ));
}

// ── Limits ──────────────────────────────────────────────────────────

#[test]
fn limits_max_width() {
    let encoded = encode_bmp(&[0u8; 12], 2, 2, Unstoppable).unwrap();
    let limits = Limits {
        max_width: Some(1),
        ..Default::default()
    };
    assert!(decode_bmp_with_limits(&encoded, &limits, Unstoppable).is_err());
}

#[test]
fn limits_max_height() {
    let encoded = encode_bmp(&[0u8; 12], 2, 2, Unstoppable).unwrap();
    let limits = Limits {
        max_height: Some(1),
        ..Default::default()
    };
    assert!(decode_bmp_with_limits(&encoded, &limits, Unstoppable).is_err());
}

#[test]
fn limits_max_memory_bmp() {
    let encoded = encode_bmp(&[0u8; 12], 2, 2, Unstoppable).unwrap();
    let limits = Limits {
        max_memory_bytes: Some(1),
        ..Default::default()
    };
    let err = decode_bmp_with_limits(&encoded, &limits, Unstoppable).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LimitExceeded);
}

#[test]
fn limits_checked_before_pixel_data() {
    // Header claims a huge image but the data is missing: limits fire first.
    let mut encoded = encode_bmp(&[0u8; 3], 1, 1, Unstoppable).unwrap();
    put_u32(&mut encoded, 18, 100_000);
    put_u32(&mut encoded, HEIGHT_FIELD, 100_000);
    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    let err = decode_bmp_with_limits(&encoded, &limits, Unstoppable).unwrap_err();
    assert!(matches!(err, BitmapError::LimitExceeded(_)));
}

#[test]
fn memory_limit_counts_stored_and_decoded_bytes() {
    // 1x1: one 4-byte padded stored row plus 3 decoded bytes.
    let encoded = encode_bmp(&[1u8, 2, 3], 1, 1, Unstoppable).unwrap();
    let fits = Limits {
        max_memory_bytes: Some(7),
        ..Default::default()
    };
    assert!(decode_bmp_with_limits(&encoded, &fits, Unstoppable).is_ok());

    let tight = Limits {
        max_memory_bytes: Some(6),
        ..Default::default()
    };
    let err = decode_bmp_with_limits(&encoded, &tight, Unstoppable).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LimitExceeded);
}

#[test]
fn decode_into_applies_limits_before_writing() {
    let encoded = encode_bmp(&checkerboard(4, 3, 3), 4, 3, Unstoppable).unwrap();
    let limits = Limits {
        max_height: Some(2),
        ..Default::default()
    };
    let mut out = vec![0xAAu8; 4 * 3 * 3];
    let err =
        decode_bmp_into_with_limits(&encoded, &mut out, &limits, Unstoppable).unwrap_err();
    assert!(matches!(err, BitmapError::LimitExceeded(_)));
    assert!(out.iter().all(|&b| b == 0xAA));

    let roomy = Limits {
        max_height: Some(3),
        ..Default::default()
    };
    let info = decode_bmp_into_with_limits(&encoded, &mut out, &roomy, Unstoppable).unwrap();
    assert_eq!((info.width, info.height), (4, 3));
    assert_eq!(out, checkerboard(4, 3, 3));
}
