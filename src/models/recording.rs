use super::object::{flag_at, pack_flags};
use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::text::{float_str, RobTopString, Token};
use crate::Error;

const SEPARATOR: char = ';';
const ONE: &str = "1";

/// A single input of a level's verification recording
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct RecordingItem {
    pub timestamp: f32,
    pub previous: bool,
    pub next: bool,
    pub secondary: bool,
}

impl RecordingItem {
    fn write(&self, out: &mut String) {
        if self.previous {
            out.push_str(ONE);
            out.push(SEPARATOR);
        }
        out.push_str(&float_str(f64::from(self.timestamp)));
        out.push(SEPARATOR);
        if self.next {
            out.push_str(ONE);
        }
        out.push(SEPARATOR);
        if self.secondary {
            out.push(SEPARATOR);
        }
    }
}

impl FromBinary for RecordingItem {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let timestamp = reader.read_f32(order)?;
        let flags = reader.read_u8(order)?;
        Ok(RecordingItem {
            timestamp,
            previous: flag_at(flags, 0),
            next: flag_at(flags, 1),
            secondary: flag_at(flags, 2),
        })
    }
}

impl ToBinary for RecordingItem {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_f32(self.timestamp, order);
        writer.write_u8(pack_flags(&[self.previous, self.next, self.secondary]), order);
    }
}

/// The inputs of a level's verification, where every item has the shape
/// `[1;]timestamp;[1];[;]`
///
/// ```
/// use robtop::models::Recording;
/// use robtop::text::RobTopString;
///
/// let recording = Recording::from_robtop("1;0.5;1;2.25;;;").unwrap();
/// assert_eq!(recording.items.len(), 2);
/// assert!(recording.items[0].previous && recording.items[0].next);
/// assert!(recording.items[1].secondary);
/// assert_eq!(recording.to_robtop(), "1;0.5;1;2.25;;;");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
#[cfg_attr(feature = "derive", serde(transparent))]
pub struct Recording {
    pub items: Vec<RecordingItem>,
}

impl Recording {
    pub fn new(items: Vec<RecordingItem>) -> Self {
        Recording { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn is_timestamp(token: &str) -> bool {
    f32::parse_token(token).is_some()
}

impl RobTopString for Recording {
    fn from_robtop(text: &str) -> Result<Self, Error> {
        let tokens: Vec<&str> = text.split(SEPARATOR).collect();
        let mut items = Vec::new();
        let mut i = 0;

        // the final token is whatever follows the last separator
        while i + 1 < tokens.len() {
            let previous = tokens[i] == ONE && tokens.get(i + 1).map_or(false, |x| is_timestamp(x));
            if previous {
                i += 1;
            }

            let timestamp = f32::parse_token(tokens[i])
                .ok_or_else(|| Error::token("timestamp", tokens[i], f32::EXPECTED))?;
            i += 1;

            let next = match tokens.get(i) {
                Some(&"") if i + 1 < tokens.len() => false,
                Some(&ONE) if i + 1 < tokens.len() => true,
                _ => return Err(Error::schema("recording", "truncated item")),
            };
            i += 1;

            let secondary = tokens[i].is_empty() && i + 1 < tokens.len();
            if secondary {
                i += 1;
            }

            items.push(RecordingItem {
                timestamp,
                previous,
                next,
                secondary,
            });
        }

        match tokens.get(i) {
            None | Some(&"") => Ok(Recording { items }),
            Some(_) => Err(Error::schema("recording", "trailing data")),
        }
    }

    fn to_robtop(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            item.write(&mut out);
        }
        out
    }
}

impl FromBinary for Recording {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Vec::from_binary(reader, order).map(Recording::new)
    }
}

impl ToBinary for Recording {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.items.to_binary(writer, order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};
    use rstest::*;

    fn item(timestamp: f32, previous: bool, next: bool, secondary: bool) -> RecordingItem {
        RecordingItem {
            timestamp,
            previous,
            next,
            secondary,
        }
    }

    #[rstest]
    #[case("", vec![])]
    #[case("0.5;;", vec![item(0.5, false, false, false)])]
    #[case("1;;", vec![item(1.0, false, false, false)])]
    #[case("1;1;1;", vec![item(1.0, true, true, false)])]
    #[case("3;1;;4.5;;", vec![item(3.0, false, true, true), item(4.5, false, false, false)])]
    fn parses_items(#[case] text: &str, #[case] expected: Vec<RecordingItem>) {
        let recording = Recording::from_robtop(text).unwrap();
        assert_eq!(recording.items, expected);
        assert_eq!(recording.to_robtop(), text);
    }

    #[rstest]
    #[case("0.5")]
    #[case("0.5;")]
    #[case("abc;;")]
    fn malformed(#[case] text: &str) {
        assert!(Recording::from_robtop(text).is_err());
    }

    #[test]
    fn binary_packs_flags() {
        let options = BinaryOptions::new();
        let recording = Recording::new(vec![item(2.0, true, false, true)]);
        let data = to_bytes(&recording, &options).unwrap();
        assert_eq!(data[data.len() - 1], 0b101);
        assert_eq!(from_bytes::<Recording>(&data, &options).unwrap(), recording);
    }
}
