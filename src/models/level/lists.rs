use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::text::{join_list, split_list, RobTopString, Token};
use crate::Error;

const CAPACITY_SEPARATOR: char = '_';
const PROGRESS_SEPARATOR: char = ',';

fn parse_list(text: &str, separator: char, key: &str) -> Result<Vec<u32>, Error> {
    split_list(text, separator)
        .map(|x| u32::parse_token(x).ok_or_else(|| Error::token(key, x, u32::EXPECTED)))
        .collect()
}

macro_rules! int_list {
    ($(#[$meta:meta])* $name:ident, $separator:expr, $key:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "derive", derive(serde::Serialize))]
        #[cfg_attr(feature = "derive", serde(transparent))]
        pub struct $name {
            pub items: Vec<u32>,
        }

        impl $name {
            pub fn new(items: Vec<u32>) -> Self {
                $name { items }
            }

            pub fn is_empty(&self) -> bool {
                self.items.is_empty()
            }
        }

        impl RobTopString for $name {
            fn from_robtop(text: &str) -> Result<Self, Error> {
                parse_list(text, $separator, $key).map($name::new)
            }

            fn to_robtop(&self) -> String {
                join_list(self.items.iter().copied(), $separator)
            }
        }

        impl FromBinary for $name {
            fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
                Vec::from_binary(reader, order).map($name::new)
            }
        }

        impl ToBinary for $name {
            fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
                self.items.to_binary(writer, order)
            }
        }
    };
}

int_list!(
    /// Per kind object counts that the game allocates ahead of loading a
    /// level, as `_` separated integers
    Capacity,
    CAPACITY_SEPARATOR,
    "capacity"
);

int_list!(
    /// Practice checkpoints reached as `,` separated percentages
    Progress,
    PROGRESS_SEPARATOR,
    "progress"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_items_are_dropped() {
        let capacity = Capacity::from_robtop("25_100__25_").unwrap();
        assert_eq!(capacity.items, vec![25, 100, 25]);
        assert_eq!(capacity.to_robtop(), "25_100_25");
    }

    #[test]
    fn progress_uses_commas() {
        let progress = Progress::from_robtop("12,45,90").unwrap();
        assert_eq!(progress.items, vec![12, 45, 90]);
        assert_eq!(progress.to_robtop(), "12,45,90");
        assert!(Progress::from_robtop("").unwrap().is_empty());
    }

    #[test]
    fn bad_item_names_the_list() {
        let err = Capacity::from_robtop("1_x").unwrap_err();
        assert!(err.to_string().contains("capacity"));
    }
}
