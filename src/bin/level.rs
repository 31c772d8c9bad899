//! Summarize a level string read from stdin
//!
//! Accepts both plain level strings and, with the `compression` feature, the
//! compressed form stored in saves.
//!
//! ```text
//! objects: 1024
//! triggers: 37
//! start positions: 2
//! groups: 12 (next free 13)
//! length: 94.12s
//! binary: 18944 bytes
//! ```

use robtop::binary::{to_bytes, BinaryOptions};
use robtop::models::Editor;
use robtop::text::RobTopString;
use std::error;
use std::io::{self, Read};

#[cfg(feature = "compression")]
fn decompress(data: &str) -> Result<String, Box<dyn error::Error>> {
    use robtop::compression::{GameCodec, SaveCodec};
    let decoded = GameCodec.decode(data.as_bytes(), false)?;
    Ok(String::from_utf8(decoded)?)
}

#[cfg(not(feature = "compression"))]
fn decompress(_data: &str) -> Result<String, Box<dyn error::Error>> {
    Err("compressed level strings require the compression feature".into())
}

fn level_string(data: String) -> Result<String, Box<dyn error::Error>> {
    if data.is_empty() || Editor::can_be_in(&data) {
        Ok(data)
    } else {
        decompress(&data)
    }
}

fn main() -> Result<(), Box<dyn error::Error>> {
    let mut data = String::new();
    io::stdin().read_to_string(&mut data)?;
    let data = level_string(data.trim().to_string())?;

    let editor = Editor::from_robtop(&data)?;
    let groups = editor.groups();
    let binary = to_bytes(&editor, &BinaryOptions::new())?;

    println!("objects: {}", editor.objects.len());
    println!("triggers: {}", editor.triggers().len());
    println!("start positions: {}", editor.start_positions().len());
    println!("groups: {} (next free {})", groups.len(), editor.free_group());
    println!("length: {:.2}s", editor.length());
    println!("binary: {} bytes", binary.len());
    Ok(())
}
