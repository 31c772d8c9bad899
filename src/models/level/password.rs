use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::Error;
use std::fmt;

const ADD: u32 = 1_000_000;
const NO_PASSWORD: u32 = 1;

/// Whether a level can be copied, and the password needed to do so
///
/// ```
/// use robtop::models::Password;
///
/// let password = Password::from_value(1_012_345);
/// assert_eq!(password, Password::Protected(12_345));
/// assert_eq!(password.to_value(), 1_012_345);
/// assert_eq!(Password::from_value(1), Password::Free);
/// assert_eq!(Password::from_value(0), Password::NotCopyable);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub enum Password {
    #[default]
    NotCopyable,
    /// Copyable without a password
    Free,
    /// Copyable with a password below one million
    Protected(u32),
}

impl Password {
    pub fn from_value(value: u32) -> Self {
        match value {
            0 => Password::NotCopyable,
            NO_PASSWORD => Password::Free,
            _ => Password::Protected(value % ADD),
        }
    }

    pub fn to_value(self) -> u32 {
        match self {
            Password::NotCopyable => 0,
            Password::Free => NO_PASSWORD,
            Password::Protected(password) => password + ADD,
        }
    }

    pub fn is_copyable(self) -> bool {
        self != Password::NotCopyable
    }

    pub fn password(self) -> Option<u32> {
        match self {
            Password::Protected(password) => Some(password),
            _ => None,
        }
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Password::NotCopyable => f.write_str("not copyable"),
            Password::Free => f.write_str("copyable, no password"),
            Password::Protected(password) => write!(f, "copyable, password {}", password),
        }
    }
}

impl FromBinary for Password {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        reader.read_u32(order).map(Password::from_value)
    }
}

impl ToBinary for Password {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u32(self.to_value(), order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};
    use rstest::*;

    #[rstest]
    #[case(0, Password::NotCopyable)]
    #[case(1, Password::Free)]
    #[case(1_000_000, Password::Protected(0))]
    #[case(1_123_456, Password::Protected(123_456))]
    fn stored_values(#[case] value: u32, #[case] expected: Password) {
        assert_eq!(Password::from_value(value), expected);
        assert_eq!(expected.to_value(), value);
    }

    #[test]
    fn display() {
        assert_eq!(Password::Protected(7).to_string(), "copyable, password 7");
        assert_eq!(Password::Free.to_string(), "copyable, no password");
    }

    #[test]
    fn binary_keeps_password() {
        let options = BinaryOptions::new();
        let data = to_bytes(&Password::Protected(42), &options).unwrap();
        assert_eq!(data, 1_000_042u32.to_le_bytes());
        assert_eq!(from_bytes::<Password>(&data, &options).unwrap(), Password::Protected(42));
    }
}
