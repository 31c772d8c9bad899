use super::Token;
use indexmap::IndexMap;

/// A flat RobTop key to value mapping in the order the keys appeared
pub type RobTopMap = IndexMap<String, String>;

/// Split `key<sep>value<sep>key<sep>value` into a mapping.
///
/// A trailing key without a value maps to an empty string. Later duplicate
/// keys overwrite earlier ones.
///
/// ```
/// use robtop::text::split_pairs;
/// let map = split_pairs("1_255_2_0_3", '_');
/// assert_eq!(map["1"], "255");
/// assert_eq!(map["3"], "");
/// ```
pub fn split_pairs(text: &str, separator: char) -> RobTopMap {
    let mut result = RobTopMap::new();
    let mut parts = text.split(separator);
    while let Some(key) = parts.next() {
        let value = parts.next().unwrap_or("");
        if key.is_empty() && value.is_empty() {
            continue;
        }
        result.insert(key.to_string(), value.to_string());
    }
    result
}

/// Inverse of [`split_pairs`]
pub fn join_pairs(map: &RobTopMap, separator: char) -> String {
    let mut out = String::new();
    for (i, (key, value)) in map.iter().enumerate() {
        if i != 0 {
            out.push(separator);
        }
        out.push_str(key);
        out.push(separator);
        out.push_str(value);
    }
    out
}

/// Split a separated list, dropping empty entries
pub fn split_list(text: &str, separator: char) -> impl Iterator<Item = &str> {
    text.split(separator).filter(|x| !x.is_empty())
}

/// Join tokens with a separator
pub fn join_list<T: Token>(items: impl IntoIterator<Item = T>, separator: char) -> String {
    let mut out = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i != 0 {
            out.push(separator);
        }
        item.write_token(&mut out);
    }
    out
}

/// Accumulates the key value pairs of a record being encoded
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Pairs {
    map: RobTopMap,
}

impl Pairs {
    pub fn new() -> Self {
        Pairs::default()
    }

    /// Always write the value
    pub fn put<T: Token>(&mut self, key: &str, value: T) -> &mut Self {
        self.map.insert(key.to_string(), value.to_token());
        self
    }

    /// Write the value only when it differs from the default
    pub fn put_non_default<T: Token + PartialEq>(
        &mut self,
        key: &str,
        value: T,
        default: T,
    ) -> &mut Self {
        if value != default {
            self.put(key, value);
        }
        self
    }

    /// Write a `1` only when the flag is set
    pub fn put_flag(&mut self, key: &str, value: bool) -> &mut Self {
        if value {
            self.put(key, true);
        }
        self
    }

    /// Write a preformatted value
    pub fn put_str(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.map.insert(key.to_string(), value.into());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn into_map(self) -> RobTopMap {
        self.map
    }

    pub fn join(&self, separator: char) -> String {
        join_pairs(&self.map, separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_then_join() {
        let text = "1,1,2,15,3,15";
        let map = split_pairs(text, ',');
        assert_eq!(map.len(), 3);
        assert_eq!(join_pairs(&map, ','), text);
    }

    #[test]
    fn empty_input() {
        assert!(split_pairs("", ',').is_empty());
    }

    #[test]
    fn pairs_skip_defaults() {
        let mut pairs = Pairs::new();
        pairs
            .put("1", 5)
            .put_non_default("2", 0.0f32, 0.0)
            .put_non_default("3", 1.5f32, 0.0)
            .put_flag("4", false)
            .put_flag("5", true);
        assert_eq!(pairs.join(','), "1,5,3,1.5,5,1");
    }

    #[test]
    fn list_helpers() {
        assert_eq!(split_list("1.2..3", '.').collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert_eq!(join_list(vec![1, 2, 3], '.'), "1.2.3");
    }
}
