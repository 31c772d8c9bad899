use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::plist::{Dict, PlistRecord, Value};
use crate::text::RobTopView;
use crate::Error;

macro_rules! unlock_values {
    ($($field:ident = $key:expr, $bit:expr;)*) => {
        /// Story progress flags stored under `unlockValueKeeper`. Only set
        /// flags are written, and in binary they pack into a `u32` mask.
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        #[cfg_attr(feature = "derive", derive(serde::Serialize))]
        pub struct UnlockValues {
            $(pub $field: bool,)*
        }

        impl UnlockValues {
            pub fn bits(&self) -> u32 {
                let mut bits = 0;
                $(bits |= u32::from(self.$field) << $bit;)*
                bits
            }

            pub fn from_bits(bits: u32) -> Self {
                UnlockValues {
                    $($field: bits & (1 << $bit) != 0,)*
                }
            }
        }

        impl PlistRecord for UnlockValues {
            fn from_plist(view: RobTopView<'_, Value>) -> Result<Self, Error> {
                Ok(UnlockValues {
                    $($field: view.get_or_default($key)?,)*
                })
            }

            fn to_plist(&self) -> Dict {
                let mut dict = Dict::new();
                $(
                    if self.$field {
                        dict.insert(String::from($key), Value::from("1"));
                    }
                )*
                dict
            }
        }
    };
}

unlock_values! {
    the_challenge_unlocked = "ugv_1", 0;
    gubflub_hint_1 = "ugv_2", 1;
    gubflub_hint_2 = "ugv_3", 2;
    the_challenge_completed = "ugv_4", 3;
    treasure_room_unlocked = "ugv_5", 4;
    chamber_of_time_unlocked = "ugv_6", 5;
    chamber_of_time_discovered = "ugv_7", 6;
    master_emblem_shown = "ugv_8", 7;
    gate_keeper_dialog = "ugv_9", 8;
    scratch_dialog = "ugv_10", 9;
    secret_shop_unlocked = "ugv_11", 10;
    demon_guardian_dialog = "ugv_12", 11;
    demon_freed = "ugv_13", 12;
    demon_key_1 = "ugv_14", 13;
    demon_key_2 = "ugv_15", 14;
    demon_key_3 = "ugv_16", 15;
    shop_keeper_dialog = "ugv_17", 16;
    world_online_levels = "ugv_18", 17;
    demon_discovered = "ugv_19", 18;
    community_shop_unlocked = "ugv_20", 19;
    potbor_dialog = "ugv_21", 20;
    youtube_chest_unlocked = "ugv_22", 21;
    facebook_chest_unlocked = "ugv_23", 22;
    x_chest_unlocked = "ugv_24", 23;
}

impl FromBinary for UnlockValues {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        reader.read_u32(order).map(UnlockValues::from_bits)
    }
}

impl ToBinary for UnlockValues {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u32(self.bits(), order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};
    use quickcheck_macros::quickcheck;

    #[test]
    fn only_set_flags_are_written() {
        let unlocks = UnlockValues {
            demon_key_2: true,
            x_chest_unlocked: true,
            ..UnlockValues::default()
        };
        let dict = unlocks.to_plist();
        assert_eq!(dict.keys().collect::<Vec<_>>(), vec!["ugv_15", "ugv_24"]);
        assert_eq!(UnlockValues::from_plist(RobTopView::new(&dict)).unwrap(), unlocks);
    }

    #[test]
    fn binary_is_a_mask() {
        let unlocks = UnlockValues {
            the_challenge_unlocked: true,
            scratch_dialog: true,
            ..UnlockValues::default()
        };
        let options = BinaryOptions::new();
        let data = to_bytes(&unlocks, &options).unwrap();
        assert_eq!(data, vec![0b0000_0001, 0b0000_0010, 0, 0]);
        assert_eq!(from_bytes::<UnlockValues>(&data, &options).unwrap(), unlocks);
    }

    #[quickcheck]
    fn bits_survive(bits: u32) -> bool {
        let bits = bits & 0x00ff_ffff;
        UnlockValues::from_bits(bits).bits() == bits
    }
}
