//! The XML property list dialect that stores the game's save files
//!
//! Besides the standard tags, the game uses single letter tags (`<d>`, `<k>`,
//! `<s>`, `<i>`, `<r>`, `<t/>`, `<a>`) and represents arrays as dictionaries
//! flagged with `_isArr` whose keys are `k_0`, `k_1`, and so on.
//!
//! ```
//! use robtop::plist::{parse, PlistWriter, Value};
//!
//! let data = br#"<?xml version="1.0"?><plist version="1.0" gjver="2.0"><dict><k>bgVolume</k><r>0.5</r><k>playerName</k><s>Lightning</s></dict></plist>"#;
//! let dict = parse(data).unwrap();
//! assert_eq!(dict["bgVolume"], Value::Real(0.5));
//! assert_eq!(dict["playerName"], Value::from("Lightning"));
//!
//! let out = PlistWriter::builder().build().write(&dict);
//! assert_eq!(out.as_bytes(), &data[..]);
//! ```
mod lexer;
mod parser;
mod value;
mod writer;

pub use self::parser::parse;
pub use self::value::{array_from_values, array_values, Dict, Value, ARRAY_KEY};
pub use self::writer::{PlistWriter, PlistWriterBuilder};

use crate::text::RobTopView;
use crate::Error;

/// A record stored as a property list dictionary
pub trait PlistRecord: Sized {
    fn from_plist(view: RobTopView<'_, Value>) -> Result<Self, Error>;
    fn to_plist(&self) -> Dict;

    /// Decode from a dictionary value
    fn from_value(value: &Value, record: &'static str) -> Result<Self, Error> {
        match value {
            Value::Dict(dict) => Self::from_plist(RobTopView::new(dict)),
            _ => Err(Error::schema(record, "expected a dictionary")),
        }
    }
}
