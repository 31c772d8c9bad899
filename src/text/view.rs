use super::{RobTopEnum, Token};
use crate::Error;
use indexmap::IndexMap;
use std::borrow::Cow;

/// A value stored in a mapping that a [`RobTopView`] can look into
pub trait ViewValue {
    /// Convert the value into the requested token type
    fn extract<T: Token>(&self) -> Option<T>;

    /// The value as text, for error messages and string fields
    fn text(&self) -> Cow<'_, str>;

    /// True when the value is an empty token, which decodes as absent
    fn is_blank(&self) -> bool;
}

impl ViewValue for String {
    #[inline]
    fn extract<T: Token>(&self) -> Option<T> {
        T::parse_token(self)
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }

    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

/// A read-only lookup over a decoded mapping that substitutes defaults for
/// missing keys.
///
/// Missing keys are never an error. A present key whose token can't be
/// parsed as the requested type is a token error naming the key.
#[derive(Debug)]
pub struct RobTopView<'a, V> {
    map: &'a IndexMap<String, V>,
}

impl<'a, V> Clone for RobTopView<'a, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, V> Copy for RobTopView<'a, V> {}

impl<'a, V: ViewValue> RobTopView<'a, V> {
    pub fn new(map: &'a IndexMap<String, V>) -> Self {
        RobTopView { map }
    }

    /// The underlying mapping
    pub fn map(&self) -> &'a IndexMap<String, V> {
        self.map
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn raw(&self, key: &str) -> Option<&'a V> {
        self.map.get(key)
    }

    /// Iterate over every entry in the mapping
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a V)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Lookup and convert a value, where absent and blank tokens are `None`
    pub fn get_option<T: Token>(&self, key: &str) -> Result<Option<T>, Error> {
        match self.map.get(key) {
            None => Ok(None),
            Some(value) => match value.extract::<T>() {
                Some(x) => Ok(Some(x)),
                None if value.is_blank() => Ok(None),
                None => Err(Error::token(key, &value.text(), T::EXPECTED)),
            },
        }
    }

    /// Lookup a value, falling back to the default when absent
    pub fn get_or<T: Token>(&self, key: &str, default: T) -> Result<T, Error> {
        self.get_option(key).map(|x| x.unwrap_or(default))
    }

    /// Lookup a value, falling back to the type's default when absent
    pub fn get_or_default<T: Token + Default>(&self, key: &str) -> Result<T, Error> {
        self.get_option(key).map(|x| x.unwrap_or_default())
    }

    /// Lookup a value that the record can't be decoded without
    pub fn get_required<T: Token>(&self, key: &str, record: &'static str) -> Result<T, Error> {
        self.get_option(key)?
            .ok_or_else(|| Error::schema(record, format!("missing required key {}", key)))
    }

    /// Lookup an enumeration, where an unknown value is an error
    pub fn get_enum<E: RobTopEnum>(&self, key: &str) -> Result<Option<E>, Error> {
        match self.get_option::<i64>(key)? {
            None => Ok(None),
            Some(value) => E::from_value(value)
                .map(Some)
                .ok_or_else(|| Error::token(key, &value.to_string(), E::NAME)),
        }
    }

    /// Lookup an enumeration with a default for when the key is absent
    pub fn get_enum_or<E: RobTopEnum>(&self, key: &str, default: E) -> Result<E, Error> {
        self.get_enum(key).map(|x| x.unwrap_or(default))
    }

    /// Lookup an enumeration, substituting the fallback for both absent and
    /// unknown values
    pub fn get_enum_lossy<E: RobTopEnum>(&self, key: &str, fallback: E) -> Result<E, Error> {
        match self.get_option::<i64>(key)? {
            None => Ok(fallback),
            Some(value) => Ok(E::from_value(value).unwrap_or(fallback)),
        }
    }

    /// Lookup a string value
    pub fn get_string(&self, key: &str) -> String {
        self.map
            .get(key)
            .map(|x| x.text().into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::split_pairs;
    use crate::ErrorKind;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Speed {
        Slow,
        Normal,
    }

    impl RobTopEnum for Speed {
        const NAME: &'static str = "speed";

        fn from_value(value: i64) -> Option<Self> {
            match value {
                0 => Some(Speed::Normal),
                1 => Some(Speed::Slow),
                _ => None,
            }
        }

        fn value(self) -> i64 {
            match self {
                Speed::Normal => 0,
                Speed::Slow => 1,
            }
        }
    }

    #[test]
    fn missing_keys_use_defaults() {
        let map = split_pairs("1,5,2,", ',');
        let view = RobTopView::new(&map);
        assert_eq!(view.get_or("1", 0i32).unwrap(), 5);
        assert_eq!(view.get_or("2", 7i32).unwrap(), 7);
        assert_eq!(view.get_or("3", 9i32).unwrap(), 9);
        assert!(!view.get_or("2", true).unwrap());
    }

    #[test]
    fn malformed_token_names_key() {
        let map = split_pairs("kA4,fast", ',');
        let view = RobTopView::new(&map);
        let err = view.get_or("kA4", 0i32).unwrap_err();
        match err.kind() {
            ErrorKind::Token { key, token, .. } => {
                assert_eq!(key, "kA4");
                assert_eq!(token, "fast");
            }
            _ => panic!("unexpected error {}", err),
        }
    }

    #[test]
    fn enums_need_explicit_fallback() {
        let map = split_pairs("a,1,b,9", ',');
        let view = RobTopView::new(&map);
        assert_eq!(view.get_enum::<Speed>("a").unwrap(), Some(Speed::Slow));
        assert!(view.get_enum::<Speed>("b").is_err());
        assert!(view.get_enum_or("b", Speed::Normal).is_err());
        assert_eq!(view.get_enum_lossy("b", Speed::Normal).unwrap(), Speed::Normal);
        assert_eq!(view.get_enum_or("c", Speed::Normal).unwrap(), Speed::Normal);
    }

    #[test]
    fn required_keys() {
        let map = split_pairs("2,0", ',');
        let view = RobTopView::new(&map);
        let err = view.get_required::<i32>("1", "object").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Schema { record: "object", .. }));
    }
}
