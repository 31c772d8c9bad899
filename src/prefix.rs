//! Collections stored as `{prefix}{id}` keys scattered through a flat mapping

use crate::ordered_set::OrderedSet;
use crate::plist::{Dict, Value};
use crate::text::{RobTopView, Token, ViewValue};
use std::hash::Hash;

/// Scan every key of the mapping for the prefix and collect the parsed ids.
///
/// Keys whose remainder doesn't parse as an id belong to some other family
/// and are ignored.
///
/// ```
/// use robtop::prefix::scan_prefix;
/// use robtop::text::{split_pairs, RobTopView};
///
/// let map = split_pairs("c_1:1:d_5:1:c_20:1:demon_3:1", ':');
/// let ids = scan_prefix::<_, u32>(RobTopView::new(&map), "c_");
/// assert_eq!(ids.into_vec(), vec![1, 20]);
/// ```
pub fn scan_prefix<V, T>(view: RobTopView<'_, V>, prefix: &str) -> OrderedSet<T>
where
    V: ViewValue,
    T: Token + Hash + Eq,
{
    view.iter()
        .filter_map(|(key, _)| key.strip_prefix(prefix))
        .filter_map(T::parse_token_strict)
        .collect()
}

/// Flatten the ids back into `{prefix}{id}: "1"` entries
pub fn flatten_prefix<'a, T>(dict: &mut Dict, prefix: &str, ids: impl IntoIterator<Item = &'a T>)
where
    T: Token + 'a,
{
    for id in ids {
        let mut key = String::from(prefix);
        id.write_token(&mut key);
        dict.insert(key, Value::from("1"));
    }
}

trait StrictToken: Sized {
    fn parse_token_strict(token: &str) -> Option<Self>;
}

impl<T: Token> StrictToken for T {
    /// Ids are plain digits, so reject what the lenient token parser accepts
    fn parse_token_strict(token: &str) -> Option<Self> {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
            T::parse_token(token)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::RobTopView;

    #[test]
    fn interleaved_families_round_trip() {
        let mut dict = Dict::new();
        for key in ["c_1", "n_2", "demon_7", "c_9", "star_100003", "unrelated", "n_", "c_x"] {
            dict.insert(String::from(key), Value::from("1"));
        }

        let view = RobTopView::new(&dict);
        let normal = scan_prefix::<_, u32>(view, "c_");
        let official = scan_prefix::<_, u32>(view, "n_");
        let demons = scan_prefix::<_, u32>(view, "demon_");
        let stars = scan_prefix::<_, i64>(view, "star_");
        assert_eq!(normal.clone().into_vec(), vec![1, 9]);
        assert_eq!(official.clone().into_vec(), vec![2]);

        let mut out = Dict::new();
        flatten_prefix(&mut out, "c_", &normal);
        flatten_prefix(&mut out, "n_", &official);
        flatten_prefix(&mut out, "demon_", &demons);
        flatten_prefix(&mut out, "star_", &stars);

        let mut expected = dict.clone();
        expected.shift_remove("unrelated");
        expected.shift_remove("n_");
        expected.shift_remove("c_x");
        assert_eq!(out.len(), expected.len());
        assert!(expected.keys().all(|k| out.contains_key(k)));
    }
}
