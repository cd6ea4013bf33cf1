#![no_main]
use libfuzzer_sys::fuzz_target;
use zenstage::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    let Ok(decoded) = decode_bmp_with_limits(data, &limits, enough::Unstoppable) else {
        return;
    };

    for order in [RowOrder::BottomUp, RowOrder::TopDown] {
        let reencoded = encode_bmp_with_order(
            decoded.pixels(),
            decoded.width(),
            decoded.height(),
            order,
            enough::Unstoppable,
        )
        .expect("decoded image must re-encode");
        let decoded2 = decode_bmp(&reencoded, enough::Unstoppable)
            .expect("re-encoded data failed to decode");

        assert_eq!(decoded.pixels(), decoded2.pixels(), "roundtrip pixel mismatch");
        assert_eq!(decoded.width(), decoded2.width());
        assert_eq!(decoded.height(), decoded2.height());
    }
});
