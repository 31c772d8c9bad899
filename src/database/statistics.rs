use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::models::CollectedCoins;
use crate::plist::{Dict, PlistRecord, Value};
use crate::text::{RobTopView, Token};
use crate::Error;
use indexmap::IndexMap;

const UNIQUE: &str = "unique_";
const SCROLL_COIN: &str = "unique_secret04";
const VAULT_COIN: &str = "unique_secret06";
const CHAMBER_COIN: &str = "unique_secretB03";

const SCROLL_BIT: u8 = 0;
const VAULT_BIT: u8 = 1;
const CHAMBER_BIT: u8 = 2;

fn coin_from_position(position: u8) -> Option<CollectedCoins> {
    match position {
        1 => Some(CollectedCoins::FIRST),
        2 => Some(CollectedCoins::SECOND),
        3 => Some(CollectedCoins::THIRD),
        _ => None,
    }
}

/// Parse an official coin key of the form `unique_{level}_{position}`
fn official_coin(key: &str) -> Option<(u32, CollectedCoins)> {
    let (level, position) = key.strip_prefix(UNIQUE)?.split_once('_')?;
    let level = level.parse().ok()?;
    let coin = coin_from_position(position.parse().ok()?)?;
    Some((level, coin))
}

macro_rules! statistics {
    ($($field:ident = $key:expr,)*) => {
        /// Player statistics stored under `GS_value`. Counters are keyed by
        /// their index and secret coins by their `unique_` name.
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        #[cfg_attr(feature = "derive", derive(serde::Serialize))]
        pub struct Statistics {
            $(pub $field: u32,)*
            pub scroll_coin: bool,
            pub vault_coin: bool,
            pub chamber_coin: bool,
            /// Coins collected in official levels, by level id
            pub official_coins: IndexMap<u32, CollectedCoins>,
        }

        impl Statistics {
            fn read_counters(&mut self, view: RobTopView<'_, Value>) -> Result<(), Error> {
                $(self.$field = view.get_or_default($key)?;)*
                Ok(())
            }

            fn write_counters(&self, dict: &mut Dict) {
                $(dict.insert(String::from($key), Value::String(self.$field.to_token()));)*
            }

            fn read_counters_binary(
                &mut self,
                reader: &mut Reader<'_>,
                order: ByteOrder,
            ) -> Result<(), Error> {
                $(self.$field = reader.read_u32(order)?;)*
                Ok(())
            }

            fn write_counters_binary(&self, writer: &mut Writer, order: ByteOrder) {
                $(writer.write_u32(self.$field, order);)*
            }
        }
    };
}

statistics! {
    jumps = "1",
    attempts = "2",
    official_levels = "3",
    normal_levels = "4",
    demons = "5",
    stars = "6",
    map_packs = "7",
    secret_coins = "8",
    destroyed = "9",
    liked = "10",
    rated = "11",
    user_coins = "12",
    diamonds = "13",
    orbs = "14",
    timely_levels = "15",
    fire_shards = "16",
    ice_shards = "17",
    poison_shards = "18",
    shadow_shards = "19",
    lava_shards = "20",
    bonus_shards = "21",
    total_orbs = "22",
    earth_shards = "23",
    blood_shards = "24",
    metal_shards = "25",
    light_shards = "26",
    soul_shards = "27",
    moons = "28",
}

impl PlistRecord for Statistics {
    fn from_plist(view: RobTopView<'_, Value>) -> Result<Self, Error> {
        let mut statistics = Statistics {
            scroll_coin: view.get_or_default(SCROLL_COIN)?,
            vault_coin: view.get_or_default(VAULT_COIN)?,
            chamber_coin: view.get_or_default(CHAMBER_COIN)?,
            ..Statistics::default()
        };
        statistics.read_counters(view)?;

        for (key, _) in view.iter() {
            if let Some((level, coin)) = official_coin(key) {
                let coins = statistics.official_coins.entry(level).or_default();
                *coins = *coins | coin;
            }
        }

        Ok(statistics)
    }

    fn to_plist(&self) -> Dict {
        let mut dict = Dict::new();
        self.write_counters(&mut dict);

        let secrets = [
            (SCROLL_COIN, self.scroll_coin),
            (VAULT_COIN, self.vault_coin),
            (CHAMBER_COIN, self.chamber_coin),
        ];
        for (key, collected) in secrets {
            if collected {
                dict.insert(String::from(key), Value::from("1"));
            }
        }

        for (level, &coins) in &self.official_coins {
            for position in 1..=3 {
                if let Some(coin) = coin_from_position(position) {
                    if coins.contains(coin) {
                        let key = format!("{}{}_{}", UNIQUE, level, position);
                        dict.insert(key, Value::from("1"));
                    }
                }
            }
        }

        dict
    }
}

impl FromBinary for Statistics {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let mut statistics = Statistics::default();
        statistics.read_counters_binary(reader, order)?;

        let secrets = reader.read_u8(order)?;
        statistics.scroll_coin = secrets & (1 << SCROLL_BIT) != 0;
        statistics.vault_coin = secrets & (1 << VAULT_BIT) != 0;
        statistics.chamber_coin = secrets & (1 << CHAMBER_BIT) != 0;

        let count = reader.read_count(order, 5)?;
        for _ in 0..count {
            let level = reader.read_u32(order)?;
            let coins = CollectedCoins::from_binary(reader, order)?;
            statistics.official_coins.insert(level, coins);
        }

        Ok(statistics)
    }
}

impl ToBinary for Statistics {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.write_counters_binary(writer, order);

        let secrets = u8::from(self.scroll_coin) << SCROLL_BIT
            | u8::from(self.vault_coin) << VAULT_BIT
            | u8::from(self.chamber_coin) << CHAMBER_BIT;
        writer.write_u8(secrets, order);

        writer.write_count(self.official_coins.len(), order);
        for (&level, coins) in &self.official_coins {
            writer.write_u32(level, order);
            coins.to_binary(writer, order);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};

    #[test]
    fn counters_and_coins() {
        let mut dict = Dict::new();
        dict.insert("1".into(), Value::from("2048"));
        dict.insert("6".into(), Value::from("120"));
        dict.insert("unique_secret06".into(), Value::from("1"));
        dict.insert("unique_3_1".into(), Value::from("1"));
        dict.insert("unique_3_3".into(), Value::from("1"));
        dict.insert("unique_3_4".into(), Value::from("1"));

        let statistics = Statistics::from_plist(RobTopView::new(&dict)).unwrap();
        assert_eq!(statistics.jumps, 2048);
        assert_eq!(statistics.stars, 120);
        assert!(statistics.vault_coin);
        assert!(!statistics.scroll_coin);
        assert_eq!(
            statistics.official_coins[&3],
            CollectedCoins::FIRST | CollectedCoins::THIRD
        );
    }

    #[test]
    fn plist_round_trip() {
        let mut statistics = Statistics {
            attempts: 40_000,
            moons: 12,
            chamber_coin: true,
            ..Statistics::default()
        };
        statistics.official_coins.insert(1, CollectedCoins::ALL);

        let dict = statistics.to_plist();
        assert_eq!(dict["2"], Value::from("40000"));
        assert!(dict.contains_key("unique_secretB03"));
        assert!(dict.contains_key("unique_1_2"));

        let decoded = Statistics::from_plist(RobTopView::new(&dict)).unwrap();
        assert_eq!(decoded, statistics);
    }

    #[test]
    fn bad_counter_names_key() {
        let mut dict = Dict::new();
        dict.insert("13".into(), Value::from("lots"));
        let err = Statistics::from_plist(RobTopView::new(&dict)).unwrap_err();
        assert!(err.to_string().contains("13"));
    }

    #[test]
    fn binary_round_trip() {
        let mut statistics = Statistics {
            diamonds: 9000,
            scroll_coin: true,
            ..Statistics::default()
        };
        statistics.official_coins.insert(18, CollectedCoins::SECOND);
        let options = BinaryOptions::new();
        let data = to_bytes(&statistics, &options).unwrap();
        assert_eq!(from_bytes::<Statistics>(&data, &options).unwrap(), statistics);
    }
}
