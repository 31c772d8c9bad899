/*!

Text and binary codecs for [RobTop](https://en.wikipedia.org/wiki/Geometry_Dash)
save files, level strings and level objects.

The game stores its data in two text forms: flat separated strings (level
objects, level headers, color channels) and an XML property list dialect (the
save files and every level record in them). This crate decodes both into typed
records and adds a compact, schema-less binary form for every record so data
can be cached and shipped without going through text again.

## Features

- ✔ Dual codec: every record decodes from its RobTop text form and round trips
  through binary
- ✔ Forgiving: unknown objects and triggers fall back to generic records, and
  malformed levels can be skipped in lenient mode
- ✔ Faithful: keys the crate doesn't model (newer game options) survive a round trip
- ✔ Safe: fuzzed against malicious input, no panics on bad data
- ✔ Serializable: every record derives [serde](https://serde.rs) `Serialize`
  behind the `derive` feature

## Quick Start

Decode a level string, inspect it, and move it through binary.

```rust
use robtop::binary::{from_bytes, to_bytes, BinaryOptions};
use robtop::models::Editor;
use robtop::text::RobTopString;

let editor = Editor::from_robtop("kA4,1;1,1,2,15,3,15;1,29,2,45,3,15,7,255,8,0,9,0;").unwrap();
assert_eq!(editor.objects.len(), 2);
assert_eq!(editor.triggers().len(), 1);

let options = BinaryOptions::new();
let data = to_bytes(&editor, &options).unwrap();
assert_eq!(from_bytes::<Editor>(&data, &options).unwrap(), editor);
```

## Saves

A save is a pair of property lists. [`database::Database::load`] parses both
after undoing the on-disk transform chosen with a [`compression::SaveCodec`].
[`compression::Identity`] reads already decoded files, while
`compression::GameCodec` (behind the `compression` feature) undoes the xor,
base64 and gzip framing the game writes.

```rust
use robtop::compression::Identity;
use robtop::database::Database;

let main = br#"<?xml version="1.0"?><plist version="1.0" gjver="2.0"><dict><k>playerName</k><s>Kappa</s><k>GS_value</k><d><k>1</k><s>2048</s></d></dict></plist>"#;
let levels = br#"<?xml version="1.0"?><plist version="1.0" gjver="2.0"><dict><k>LLM_02</k><i>38</i></dict></plist>"#;

let database = Database::load(main, levels, &Identity, false).unwrap();
assert_eq!(database.player_name, "Kappa");
assert_eq!(database.statistics.jumps, 2048);
assert!(database.show_song_markers);
```

## Binary options

The binary format has no header of its own. Byte order, the version stamp and
whether malformed level blocks are skipped are all chosen through
[`binary::BinaryOptions`].

```rust
use robtop::binary::{from_bytes, to_bytes, BinaryOptions, ByteOrder};
use robtop::database::Database;

let options = BinaryOptions::new().order(ByteOrder::Big).skip_malformed_levels(true);
let data = to_bytes(&Database::default(), &options).unwrap();
assert_eq!(from_bytes::<Database>(&data, &options).unwrap(), Database::default());
```
*/

pub mod binary;
pub mod compression;
pub mod database;
mod errors;
pub mod models;
mod ordered_set;
pub mod plist;
pub mod prefix;
pub mod text;
pub(crate) mod util;
pub mod version;

pub use self::errors::{Error, ErrorKind};
pub use self::ordered_set::OrderedSet;
pub use self::version::RobTopVersion;
