#![no_main]
use libfuzzer_sys::fuzz_target;
use robtop::binary::{from_bytes, to_bytes, BinaryOptions};
use robtop::models::Object;
use robtop::text::RobTopString;

fuzz_target!(|data: &[u8]| {
    let options = BinaryOptions::new();
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(object) = Object::from_robtop(text) {
            let _ = Object::from_robtop(&object.to_robtop());
            if let Ok(bytes) = to_bytes(&object, &options) {
                let _ = from_bytes::<Object>(&bytes, &options);
            }
        }
    }

    let _ = from_bytes::<Object>(data, &options);
});
