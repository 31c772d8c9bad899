#![no_main]
use libfuzzer_sys::fuzz_target;
use robtop::binary::{from_bytes, BinaryOptions, ByteOrder};
use robtop::database::Database;

fuzz_target!(|data: &[u8]| {
    let strict = BinaryOptions::new();
    let lenient = BinaryOptions::new()
        .order(ByteOrder::Big)
        .skip_malformed_levels(true);
    let _ = from_bytes::<Database>(data, &strict);
    let _ = from_bytes::<Database>(data, &lenient);
});
