use super::Variables;
use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::plist::{Dict, PlistRecord, Value};
use crate::prefix::{flatten_prefix, scan_prefix};
use crate::text::RobTopView;
use crate::{Error, OrderedSet};

macro_rules! values {
    ($($field:ident = $prefix:expr,)*) => {
        /// The value keeper: game options plus the unlocked icons of every
        /// kind, stored as `{prefix}{id}: "1"`
        ///
        /// ```
        /// use robtop::database::Values;
        /// use robtop::plist::{Dict, PlistRecord, Value};
        /// use robtop::text::RobTopView;
        ///
        /// let mut dict = Dict::new();
        /// dict.insert("i_12".to_string(), Value::from("1"));
        /// dict.insert("ship_3".to_string(), Value::from("1"));
        /// dict.insert("gv_0001".to_string(), Value::from("0"));
        /// let values = Values::from_plist(RobTopView::new(&dict)).unwrap();
        /// assert!(values.cubes.contains(&12));
        /// assert!(values.ships.contains(&3));
        /// assert!(!values.variables.follow_player());
        /// ```
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        #[cfg_attr(feature = "derive", derive(serde::Serialize))]
        pub struct Values {
            pub variables: Variables,
            $(pub $field: OrderedSet<u32>,)*
        }

        impl PlistRecord for Values {
            fn from_plist(view: RobTopView<'_, Value>) -> Result<Self, Error> {
                Ok(Values {
                    variables: Variables::from_view(view)?,
                    $($field: scan_prefix(view, $prefix),)*
                })
            }

            fn to_plist(&self) -> Dict {
                let mut dict = Dict::new();
                self.variables.write(&mut dict);
                $(flatten_prefix(&mut dict, $prefix, &self.$field);)*
                dict
            }
        }

        impl FromBinary for Values {
            fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
                Ok(Values {
                    variables: Variables::from_binary(reader, order)?,
                    $($field: OrderedSet::from_binary(reader, order)?,)*
                })
            }
        }

        impl ToBinary for Values {
            fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
                self.variables.to_binary(writer, order);
                $(self.$field.to_binary(writer, order);)*
            }
        }
    };
}

values! {
    cubes = "i_",
    ships = "ship_",
    balls = "ball_",
    ufos = "bird_",
    waves = "dart_",
    robots = "robot_",
    spiders = "spider_",
    explosions = "death_",
    streaks = "special_",
    colors_1 = "c0_",
    colors_2 = "c1_",
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};

    #[test]
    fn prefixes_are_kept_apart() {
        let mut dict = Dict::new();
        for key in ["i_1", "i_2", "c0_1", "c1_4", "special_2", "death_7"] {
            dict.insert(key.to_string(), Value::from("1"));
        }
        let values = Values::from_plist(RobTopView::new(&dict)).unwrap();
        assert_eq!(values.cubes.clone().into_vec(), vec![1, 2]);
        assert_eq!(values.colors_1.clone().into_vec(), vec![1]);
        assert_eq!(values.colors_2.clone().into_vec(), vec![4]);
        assert_eq!(values.streaks.clone().into_vec(), vec![2]);
        assert_eq!(values.explosions.clone().into_vec(), vec![7]);
        assert!(values.variables.is_empty());
    }

    #[test]
    fn plist_round_trip() {
        let mut values = Values::default();
        values.variables.set_show_percentage(false);
        values.robots.extend([1, 5]);
        values.spiders.insert(3);

        let dict = values.to_plist();
        assert_eq!(dict["gv_0040"], Value::from("0"));
        assert_eq!(dict["robot_5"], Value::from("1"));

        let decoded = Values::from_plist(RobTopView::new(&dict)).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn binary_round_trip() {
        let mut values = Values::default();
        values.variables.set_buttons_per_row(8);
        values.waves.insert(11);
        let options = BinaryOptions::new();
        let data = to_bytes(&values, &options).unwrap();
        assert_eq!(from_bytes::<Values>(&data, &options).unwrap(), values);
    }
}
