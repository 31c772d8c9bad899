#![no_main]
use libfuzzer_sys::fuzz_target;
use robtop::compression::Identity;
use robtop::database::Database;
use robtop::plist::{parse, PlistWriter};

fuzz_target!(|data: &[u8]| {
    if let Ok(dict) = parse(data) {
        let out = PlistWriter::builder().ignore_falsy(false).build().write(&dict);
        let reparsed = parse(out.as_bytes()).unwrap();
        assert_eq!(reparsed.len(), dict.len());
    }

    let _ = Database::load(data, b"", &Identity, false);
});
