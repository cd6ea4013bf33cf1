#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic
    let limits = zenstage::Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    let _ = zenstage::decode_bmp_with_limits(data, &limits, enough::Unstoppable);
    let _ = zenstage::probe_bmp(data);
});
