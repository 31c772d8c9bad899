use crate::text::{float_str, RobTopView, Token, ViewValue};
use crate::Error;
use indexmap::IndexMap;
use std::borrow::Cow;

/// A dictionary that preserves key order
pub type Dict = IndexMap<String, Value>;

/// Marks a dictionary that holds an array
pub const ARRAY_KEY: &str = "_isArr";

/// A property list value
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
#[cfg_attr(feature = "derive", serde(untagged))]
pub enum Value {
    Dict(Dict),
    Array(Vec<Value>),
    String(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
}

impl Value {
    /// Values that the game omits when writing its saves
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Dict(x) => x.is_empty(),
            Value::Array(x) => x.is_empty(),
            Value::String(x) => x.is_empty(),
            Value::Integer(x) => *x == 0,
            Value::Real(x) => *x == 0.0,
            Value::Bool(x) => !*x,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(x) => Some(x),
            _ => None,
        }
    }
}

impl ViewValue for Value {
    fn extract<T: Token>(&self) -> Option<T> {
        match self {
            Value::String(x) => T::parse_token(x),
            Value::Integer(x) => T::from_integer(*x),
            Value::Real(x) => T::from_real(*x),
            Value::Bool(x) => T::from_integer(i64::from(*x)),
            Value::Dict(_) | Value::Array(_) => None,
        }
    }

    fn text(&self) -> Cow<'_, str> {
        match self {
            Value::String(x) => Cow::Borrowed(x.as_str()),
            Value::Integer(x) => Cow::Owned(x.to_string()),
            Value::Real(x) => Cow::Owned(float_str(*x)),
            Value::Bool(x) => Cow::Borrowed(if *x { "true" } else { "false" }),
            Value::Dict(_) => Cow::Borrowed("<dict>"),
            Value::Array(_) => Cow::Borrowed("<array>"),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Value::String(x) if x.trim().is_empty())
    }
}

impl<'a> RobTopView<'a, Value> {
    /// Lookup a nested dictionary. Absent keys (and the falsy values the game
    /// drops in place of empty dictionaries) yield `None`.
    pub fn get_dict(&self, key: &str) -> Result<Option<RobTopView<'a, Value>>, Error> {
        match self.raw(key) {
            None => Ok(None),
            Some(Value::Dict(x)) => Ok(Some(RobTopView::new(x))),
            Some(x) if x.is_falsy() => Ok(None),
            Some(_) => Err(Error::schema("dictionary", format!("{} is not a dictionary", key))),
        }
    }

    /// Lookup an array stored either natively or as an `_isArr` dictionary
    pub fn get_array(&self, key: &str) -> Result<Vec<&'a Value>, Error> {
        match self.raw(key) {
            None => Ok(Vec::new()),
            Some(Value::Array(x)) => Ok(x.iter().collect()),
            Some(Value::Dict(x)) => Ok(array_values(x)),
            Some(x) if x.is_falsy() => Ok(Vec::new()),
            Some(_) => Err(Error::schema("array", format!("{} is not an array", key))),
        }
    }
}

/// The elements of an `_isArr` dictionary in `k_<index>` order
pub fn array_values(dict: &Dict) -> Vec<&Value> {
    let mut items: Vec<(usize, &Value)> = dict
        .iter()
        .filter_map(|(key, value)| {
            let index = key.strip_prefix("k_")?.parse::<usize>().ok()?;
            Some((index, value))
        })
        .collect();
    items.sort_by_key(|(index, _)| *index);
    items.into_iter().map(|(_, value)| value).collect()
}

/// Build an `_isArr` dictionary from elements
pub fn array_from_values(values: impl IntoIterator<Item = Value>) -> Dict {
    let mut dict = Dict::new();
    dict.insert(String::from(ARRAY_KEY), Value::Bool(true));
    for (i, value) in values.into_iter().enumerate() {
        dict.insert(format!("k_{}", i), value);
    }
    dict
}

macro_rules! value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(x: $ty) -> Self {
                    Value::Integer(i64::from(x))
                }
            }
        )*
    };
}

value_from_int!(i8, u8, i16, u16, i32, u32, i64);

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        // go through the shortest text form so 0.1f32 stays 0.1
        Value::Real(x.to_string().parse().unwrap_or(f64::from(x)))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Real(x)
    }
}

impl From<bool> for Value {
    fn from(x: bool) -> Self {
        Value::Bool(x)
    }
}

impl From<String> for Value {
    fn from(x: String) -> Self {
        Value::String(x)
    }
}

impl From<&str> for Value {
    fn from(x: &str) -> Self {
        Value::String(String::from(x))
    }
}

impl From<Dict> for Value {
    fn from(x: Dict) -> Self {
        Value::Dict(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays_sort_by_index() {
        let mut dict = Dict::new();
        dict.insert(String::from("k_1"), Value::from(2));
        dict.insert(String::from(ARRAY_KEY), Value::Bool(true));
        dict.insert(String::from("k_0"), Value::from(1));
        assert_eq!(array_values(&dict), vec![&Value::from(1), &Value::from(2)]);
    }

    #[test]
    fn view_converts_typed_values() {
        let mut dict = Dict::new();
        dict.insert(String::from("a"), Value::from(3));
        dict.insert(String::from("b"), Value::from("4"));
        dict.insert(String::from("c"), Value::Real(2.5));
        dict.insert(String::from("d"), Value::Bool(true));
        let view = RobTopView::new(&dict);
        assert_eq!(view.get_or("a", 0i32).unwrap(), 3);
        assert_eq!(view.get_or("b", 0i32).unwrap(), 4);
        assert_eq!(view.get_or("c", 0.0f64).unwrap(), 2.5);
        assert!(view.get_or("d", false).unwrap());
        assert_eq!(view.get_or("a", String::new()).unwrap(), "3");
        assert!(view.get_dict("a").is_err());
        assert!(view.get_dict("e").unwrap().is_none());
    }
}
