#![no_main]
use libfuzzer_sys::fuzz_target;
use robtop::binary::{from_bytes, to_bytes, BinaryOptions};
use robtop::models::Editor;
use robtop::text::RobTopString;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(editor) = Editor::from_robtop(text) {
        let _ = editor.length();
        let _ = editor.free_group();
        let _ = editor.free_color_id();
        let options = BinaryOptions::new();
        if let Ok(bytes) = to_bytes(&editor, &options) {
            let _ = from_bytes::<Editor>(&bytes, &options);
        }
        let _ = Editor::from_robtop(&editor.to_robtop());
    }
});
