//! Conversions between RobTop text tokens and typed values
//!
//! RobTop text is a family of flat `key<sep>value<sep>key<sep>value` strings
//! where every record picks its own separator and the type of each value is
//! implied by its key.
//!
//! ```
//! use robtop::text::{float_str, split_pairs, RobTopView};
//!
//! let map = split_pairs("1,1,2,15,3,7.5", ',');
//! let view = RobTopView::new(&map);
//! assert_eq!(view.get_or::<i32>("1", 0).unwrap(), 1);
//! assert_eq!(view.get_or::<f32>("3", 0.0).unwrap(), 7.5);
//! assert_eq!(view.get_or::<i32>("4", -1).unwrap(), -1);
//! assert_eq!(float_str(15.0), "15");
//! ```
mod base64;
mod pairs;
mod timely;
mod token;
mod view;

pub use self::base64::{decode_base64, decode_base64_str, encode_base64};
pub use self::pairs::{join_list, join_pairs, split_list, split_pairs, Pairs, RobTopMap};
pub use self::timely::{TimelyId, WEEKLY_ID_ADD};
pub use self::token::{bool_str, float_str, int_bool, RobTopEnum, Token};
pub use self::view::{RobTopView, ViewValue};

/// A record with a single string form such as an object or a color channel
pub trait RobTopString: Sized {
    fn from_robtop(text: &str) -> Result<Self, crate::Error>;
    fn to_robtop(&self) -> String;
}
