use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::{Error, ErrorKind};

/// Weekly level ids are stored offset by this constant above daily ids
pub const WEEKLY_ID_ADD: i64 = 100_000;

const WEEKLY_ID_ADD_U32: u32 = WEEKLY_ID_ADD as u32;

const DAILY_TAG: u8 = 0;
const WEEKLY_TAG: u8 = 1;

/// A daily or weekly level id, stored in text as a single integer where
/// weekly ids are offset by [`WEEKLY_ID_ADD`]
///
/// Any packed value at or above the offset is weekly, so a daily id only has
/// a text form below the offset and a weekly id only up to `u32::MAX` minus
/// it. The binary form tags the kind and has no such limit.
///
/// ```
/// use robtop::text::TimelyId;
/// assert_eq!(TimelyId::Weekly(12).encode(), 100_012);
/// assert_eq!(TimelyId::decode(100_012), TimelyId::Weekly(12));
/// assert_eq!(TimelyId::decode(12), TimelyId::Daily(12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub enum TimelyId {
    Daily(u32),
    Weekly(u32),
}

impl Default for TimelyId {
    fn default() -> Self {
        TimelyId::Daily(0)
    }
}

impl TimelyId {
    pub fn new(id: u32, weekly: bool) -> Self {
        if weekly {
            TimelyId::Weekly(id)
        } else {
            TimelyId::Daily(id)
        }
    }

    /// The id local to its kind
    pub fn id(self) -> u32 {
        match self {
            TimelyId::Daily(id) | TimelyId::Weekly(id) => id,
        }
    }

    pub fn is_weekly(self) -> bool {
        matches!(self, TimelyId::Weekly(_))
    }

    /// Whether the packed text form decodes back to this id
    pub fn has_text_form(self) -> bool {
        match self {
            TimelyId::Daily(id) => id < WEEKLY_ID_ADD_U32,
            TimelyId::Weekly(id) => id <= u32::MAX - WEEKLY_ID_ADD_U32,
        }
    }

    /// The packed representation
    pub fn encode(self) -> i64 {
        match self {
            TimelyId::Daily(id) => i64::from(id),
            TimelyId::Weekly(id) => i64::from(id) + WEEKLY_ID_ADD,
        }
    }

    /// Unpack a text value: a nonzero quotient by the offset is weekly, and
    /// the weekly id is whatever lies above the offset
    pub fn decode(value: u32) -> Self {
        match value.checked_sub(WEEKLY_ID_ADD_U32) {
            Some(id) => TimelyId::Weekly(id),
            None => TimelyId::Daily(value),
        }
    }
}

/// A kind byte then the `u32` id
impl FromBinary for TimelyId {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let offset = reader.offset();
        let tag = reader.read_u8(order)?;
        let id = reader.read_u32(order)?;
        match tag {
            DAILY_TAG => Ok(TimelyId::Daily(id)),
            WEEKLY_TAG => Ok(TimelyId::Weekly(id)),
            _ => Err(Error::new(ErrorKind::Discriminant {
                record: "timely id",
                tag: i64::from(tag),
                offset,
            })),
        }
    }
}

impl ToBinary for TimelyId {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        let tag = if self.is_weekly() { WEEKLY_TAG } else { DAILY_TAG };
        writer.write_u8(tag, order);
        writer.write_u32(self.id(), order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};
    use quickcheck_macros::quickcheck;
    use rstest::*;

    #[rstest]
    #[case(0, TimelyId::Daily(0))]
    #[case(99_999, TimelyId::Daily(99_999))]
    #[case(100_000, TimelyId::Weekly(0))]
    #[case(100_210, TimelyId::Weekly(210))]
    #[case(250_000, TimelyId::Weekly(150_000))]
    #[case(u32::MAX, TimelyId::Weekly(u32::MAX - 100_000))]
    fn packed_values(#[case] value: u32, #[case] expected: TimelyId) {
        assert_eq!(TimelyId::decode(value), expected);
        assert_eq!(expected.encode(), i64::from(value));
    }

    #[test]
    fn large_daily_ids_have_no_text_form() {
        assert!(TimelyId::Daily(99_999).has_text_form());
        assert!(!TimelyId::Daily(150_000).has_text_form());
        assert!(TimelyId::Weekly(u32::MAX - 100_000).has_text_form());
        assert!(!TimelyId::Weekly(u32::MAX).has_text_form());
    }

    #[rstest]
    #[case(TimelyId::Daily(150_000))]
    #[case(TimelyId::Weekly(u32::MAX))]
    #[case(TimelyId::Daily(0))]
    fn binary_keeps_kind(#[case] id: TimelyId) {
        let options = BinaryOptions::new();
        let data = to_bytes(&id, &options).unwrap();
        assert_eq!(data.len(), 5);
        assert_eq!(from_bytes::<TimelyId>(&data, &options).unwrap(), id);
    }

    #[test]
    fn unknown_kind_is_discriminant_error() {
        let err = from_bytes::<TimelyId>(&[2, 0, 0, 0, 0], &BinaryOptions::new()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Discriminant { tag: 2, .. }));
    }

    #[quickcheck]
    fn text_form_survives(n: u32, weekly: bool) -> bool {
        let id = TimelyId::new(n, weekly);
        if !id.has_text_form() {
            return true;
        }
        u32::try_from(id.encode()).map(TimelyId::decode) == Ok(id)
    }

    #[quickcheck]
    fn binary_survives(n: u32, weekly: bool) -> bool {
        let id = TimelyId::new(n, weekly);
        let options = BinaryOptions::new();
        from_bytes::<TimelyId>(&to_bytes(&id, &options).unwrap(), &options).ok() == Some(id)
    }
}
