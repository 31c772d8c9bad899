use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::{Error, ErrorKind};
use std::fmt;

const MINOR_LIMIT: u8 = 10;

/// A `major.minor` version pair stored by the game as `major * 10 + minor`,
/// so the minor version is a single digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct RobTopVersion {
    major: u8,
    minor: u8,
}

impl RobTopVersion {
    pub const CURRENT_GAME: RobTopVersion = RobTopVersion::new(2, 2);
    pub const CURRENT_BINARY: RobTopVersion = RobTopVersion::new(3, 8);

    /// # Panics
    ///
    /// When `minor` is not a single digit. See [`RobTopVersion::try_new`].
    pub const fn new(major: u8, minor: u8) -> Self {
        assert!(minor < MINOR_LIMIT, "minor version must be a single digit");
        RobTopVersion { major, minor }
    }

    /// A version, or `None` when `minor` is not a single digit
    pub const fn try_new(major: u8, minor: u8) -> Option<Self> {
        if minor < MINOR_LIMIT {
            Some(RobTopVersion { major, minor })
        } else {
            None
        }
    }

    pub const fn major(self) -> u8 {
        self.major
    }

    pub const fn minor(self) -> u8 {
        self.minor
    }

    /// Split a packed value like `22` into `2.2`
    pub fn from_value(value: i64) -> Self {
        let value = value.clamp(0, 2559);
        RobTopVersion {
            major: (value / 10) as u8,
            minor: (value % 10) as u8,
        }
    }

    pub fn to_value(self) -> i64 {
        i64::from(self.major) * 10 + i64::from(self.minor)
    }

    /// Decode the level game version field, which has historical gaps
    /// where `1..=7` mean `1.0..=1.6` and `10` and `11` mean `1.7` and `1.8`
    pub fn from_game_version(value: i64) -> Self {
        match value {
            1..=7 => RobTopVersion::new(1, (value - 1) as u8),
            10 => RobTopVersion::new(1, 7),
            11 => RobTopVersion::new(1, 8),
            _ => RobTopVersion::from_value(value),
        }
    }

    /// Inverse of [`RobTopVersion::from_game_version`]
    pub fn to_game_version(self) -> i64 {
        match (self.major, self.minor) {
            (1, minor @ 0..=6) => i64::from(minor) + 1,
            (1, 7) => 10,
            (1, 8) => 11,
            _ => self.to_value(),
        }
    }
}

impl Default for RobTopVersion {
    fn default() -> Self {
        RobTopVersion::CURRENT_GAME
    }
}

impl fmt::Display for RobTopVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromBinary for RobTopVersion {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let offset = reader.offset();
        let major = reader.read_u8(order)?;
        let minor = reader.read_u8(order)?;
        RobTopVersion::try_new(major, minor).ok_or_else(|| {
            Error::new(ErrorKind::Discriminant {
                record: "minor version",
                tag: i64::from(minor),
                offset: offset + 1,
            })
        })
    }
}

impl ToBinary for RobTopVersion {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u8(self.major, order);
        writer.write_u8(self.minor, order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};
    use rstest::*;

    #[rstest]
    #[case(1, RobTopVersion::new(1, 0))]
    #[case(7, RobTopVersion::new(1, 6))]
    #[case(10, RobTopVersion::new(1, 7))]
    #[case(11, RobTopVersion::new(1, 8))]
    #[case(19, RobTopVersion::new(1, 9))]
    #[case(22, RobTopVersion::new(2, 2))]
    fn game_version_quirks(#[case] value: i64, #[case] expected: RobTopVersion) {
        let version = RobTopVersion::from_game_version(value);
        assert_eq!(version, expected);
        assert_eq!(version.to_game_version(), value);
    }

    #[rstest]
    #[case(0, Some(RobTopVersion::new(0, 0)))]
    #[case(9, Some(RobTopVersion::new(3, 9)))]
    #[case(10, None)]
    #[case(255, None)]
    fn minor_is_a_single_digit(#[case] minor: u8, #[case] expected: Option<RobTopVersion>) {
        let major = expected.map_or(3, RobTopVersion::major);
        assert_eq!(RobTopVersion::try_new(major, minor), expected);
        if let Some(version) = expected {
            assert_eq!(RobTopVersion::from_value(version.to_value()), version);
        }
    }

    #[test]
    #[should_panic]
    fn two_digit_minor_panics() {
        let _ = RobTopVersion::new(3, 12);
    }

    #[test]
    fn two_digit_minor_in_binary_is_rejected() {
        let options = BinaryOptions::new();
        let err = from_bytes::<RobTopVersion>(&[3, 12], &options).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::Discriminant { tag: 12, offset: 1, .. }
        ));
        let data = to_bytes(&RobTopVersion::new(3, 9), &options).unwrap();
        assert_eq!(from_bytes::<RobTopVersion>(&data, &options).unwrap(), RobTopVersion::new(3, 9));
    }

    #[test]
    fn display() {
        assert_eq!(RobTopVersion::CURRENT_BINARY.to_string(), "3.8");
        assert_eq!(RobTopVersion::from_value(38), RobTopVersion::CURRENT_BINARY);
    }
}
