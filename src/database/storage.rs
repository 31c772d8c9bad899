use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::models::{ChestType, CollectedCoins, Quest, RewardItem};
use crate::plist::{Dict, PlistRecord, Value};
use crate::text::{float_str, RobTopEnum, RobTopView, TimelyId, Token, WEEKLY_ID_ADD};
use crate::Error;
use indexmap::IndexMap;

const VERIFIED_COINS: &str = "GS_3";
const UNVERIFIED_COINS: &str = "GS_4";
const MAP_PACK_STARS: &str = "GS_5";
const PURCHASED_ITEMS: &str = "GS_6";
const NORMAL_RECORDS: &str = "GS_7";
const NORMAL_STARS: &str = "GS_9";
const OFFICIAL_RECORDS: &str = "GS_10";
const CHEST_REWARDS: &str = "GS_11";
const ACTIVE_QUESTS: &str = "GS_12";
const DIAMONDS: &str = "GS_14";
const UPCOMING_QUESTS: &str = "GS_15";
const TIMELY_RECORDS: &str = "GS_16";
const TIMELY_STARS: &str = "GS_17";
const GAUNTLET_RECORDS: &str = "GS_18";
const TREASURE_CHEST_REWARDS: &str = "GS_19";
const TOTAL_KEYS: &str = "GS_20";
const REWARDS: &str = "GS_21";
const AD_REWARDS: &str = "GS_22";
const NEW_GAUNTLET_RECORDS: &str = "GS_23";
const NEW_TIMELY_RECORDS: &str = "GS_24";
const WEEKLY_REWARDS: &str = "GS_25";

const MAP_PACK_PREFIX: &str = "pack_";
const GAUNTLET_PREFIX: &str = "g_";
const GAUNTLET_COIN: &str = "g";
const QUEST_DIAMONDS_PREFIX: char = 'c';
const TIMELY_PREFIX: char = 'd';
const OFFICIAL_REWARD_WIDTH: usize = 4;

fn parse_key<T: Token>(key: &str, token: &str, expected: &'static str) -> Result<T, Error> {
    T::parse_token(token).ok_or_else(|| Error::token(key, token, expected))
}

fn coin_from_position(key: &str, position: &str) -> Result<CollectedCoins, Error> {
    match parse_key::<u8>(key, position, "a coin position")? {
        1 => Ok(CollectedCoins::FIRST),
        2 => Ok(CollectedCoins::SECOND),
        3 => Ok(CollectedCoins::THIRD),
        _ => Err(Error::token(key, position, "a coin position")),
    }
}

fn coin_positions(coins: CollectedCoins) -> impl Iterator<Item = u8> {
    [
        (1, CollectedCoins::FIRST),
        (2, CollectedCoins::SECOND),
        (3, CollectedCoins::THIRD),
    ]
    .into_iter()
    .filter(move |(_, coin)| coins.contains(*coin))
    .map(|(position, _)| position)
}

fn ones(keys: impl IntoIterator<Item = String>, dict: &mut Dict) {
    for key in keys {
        dict.insert(key, Value::from("1"));
    }
}

/// Coins collected in a daily or weekly level, which is keyed by its timely
/// id but also remembers the level it refers to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct TimelyCoins {
    pub level_id: u32,
    pub coins: CollectedCoins,
}

impl FromBinary for TimelyCoins {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(TimelyCoins {
            level_id: reader.read_u32(order)?,
            coins: CollectedCoins::from_binary(reader, order)?,
        })
    }
}

impl ToBinary for TimelyCoins {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u32(self.level_id, order);
        self.coins.to_binary(writer, order);
    }
}

/// User coins collected, keyed as `{level}_{position}` with an optional
/// `_g` suffix for gauntlet levels or `_{timely id}` suffix for timely ones
///
/// ```
/// use robtop::database::Coins;
/// use robtop::models::CollectedCoins;
/// use robtop::plist::{Dict, Value};
///
/// let mut dict = Dict::new();
/// for key in ["128_1", "128_2", "55_3_g", "77_1_100004"] {
///     dict.insert(key.to_string(), Value::from("1"));
/// }
/// let coins = Coins::from_dict(&dict).unwrap();
/// assert_eq!(coins.normal[&128], CollectedCoins::FIRST | CollectedCoins::SECOND);
/// assert_eq!(coins.gauntlet[&55], CollectedCoins::THIRD);
/// assert_eq!(coins.weekly[&4].level_id, 77);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Coins {
    pub normal: IndexMap<u32, CollectedCoins>,
    pub gauntlet: IndexMap<u32, CollectedCoins>,
    pub daily: IndexMap<u32, TimelyCoins>,
    pub weekly: IndexMap<u32, TimelyCoins>,
}

impl Coins {
    pub fn from_dict(dict: &Dict) -> Result<Self, Error> {
        let mut coins = Coins::default();

        for key in dict.keys() {
            let mut parts = key.split('_');
            let (level, position) = match (parts.next(), parts.next()) {
                (Some(level), Some(position)) => (level, position),
                _ => return Err(Error::token(key, key, "a coin key")),
            };
            let level_id: u32 = parse_key(key, level, "a level id")?;
            let coin = coin_from_position(key, position)?;

            match parts.next() {
                None => {
                    let entry = coins.normal.entry(level_id).or_default();
                    *entry = *entry | coin;
                }
                Some(GAUNTLET_COIN) => {
                    let entry = coins.gauntlet.entry(level_id).or_default();
                    *entry = *entry | coin;
                }
                Some(timely) => {
                    let timely: u32 = parse_key(key, timely, "a timely id")?;
                    let (map, id) = match TimelyId::decode(timely) {
                        TimelyId::Daily(id) => (&mut coins.daily, id),
                        TimelyId::Weekly(id) => (&mut coins.weekly, id),
                    };
                    let entry = map.entry(id).or_default();
                    entry.level_id = level_id;
                    entry.coins = entry.coins | coin;
                }
            }
        }

        Ok(coins)
    }

    pub fn to_dict(&self) -> Dict {
        let mut dict = Dict::new();

        for (level, &coins) in &self.normal {
            ones(
                coin_positions(coins).map(|x| format!("{}_{}", level, x)),
                &mut dict,
            );
        }

        for (level, &coins) in &self.gauntlet {
            ones(
                coin_positions(coins).map(|x| format!("{}_{}_{}", level, x, GAUNTLET_COIN)),
                &mut dict,
            );
        }

        let timely = self
            .daily
            .iter()
            .map(|(&id, coins)| (TimelyId::Daily(id), coins))
            .chain(
                self.weekly
                    .iter()
                    .map(|(&id, coins)| (TimelyId::Weekly(id), coins)),
            );

        for (id, timely_coins) in timely {
            let level = timely_coins.level_id;
            ones(
                coin_positions(timely_coins.coins)
                    .map(|x| format!("{}_{}_{}", level, x, id.encode())),
                &mut dict,
            );
        }

        dict
    }

    /// The level that a daily id refers to
    pub fn daily_level_id(&self, daily_id: u32) -> Option<u32> {
        self.daily.get(&daily_id).map(|x| x.level_id)
    }

    /// The level that a weekly id refers to
    pub fn weekly_level_id(&self, weekly_id: u32) -> Option<u32> {
        self.weekly.get(&weekly_id).map(|x| x.level_id)
    }
}

impl FromBinary for Coins {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(Coins {
            normal: IndexMap::from_binary(reader, order)?,
            gauntlet: IndexMap::from_binary(reader, order)?,
            daily: IndexMap::from_binary(reader, order)?,
            weekly: IndexMap::from_binary(reader, order)?,
        })
    }
}

impl ToBinary for Coins {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.normal.to_binary(writer, order);
        self.gauntlet.to_binary(writer, order);
        self.daily.to_binary(writer, order);
        self.weekly.to_binary(writer, order);
    }
}

/// Diamonds earned by completing a quest, keyed `c{order}{count}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct QuestDiamonds {
    /// A single digit position of the quest
    pub order: u8,
    pub count: u32,
    pub diamonds: u32,
}

impl FromBinary for QuestDiamonds {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(QuestDiamonds {
            order: reader.read_u8(order)?,
            count: reader.read_u32(order)?,
            diamonds: reader.read_u32(order)?,
        })
    }
}

impl ToBinary for QuestDiamonds {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u8(self.order, order);
        writer.write_u32(self.count, order);
        writer.write_u32(self.diamonds, order);
    }
}

/// Orbs granted for watching an ad at a unix timestamp
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct AdReward {
    pub timestamp: f64,
    pub orbs: u32,
}

impl FromBinary for AdReward {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(AdReward {
            timestamp: reader.read_f64(order)?,
            orbs: reader.read_u32(order)?,
        })
    }
}

impl ToBinary for AdReward {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_f64(self.timestamp, order);
        writer.write_u32(self.orbs, order);
    }
}

fn read_id_map(
    view: RobTopView<'_, Value>,
    key: &str,
    prefix: &str,
) -> Result<IndexMap<u32, u32>, Error> {
    let mut result = IndexMap::new();
    if let Some(inner) = view.get_dict(key)? {
        for (name, _) in inner.iter() {
            let id = name
                .strip_prefix(prefix)
                .ok_or_else(|| Error::token(key, name, "a prefixed id"))?;
            result.insert(parse_key(key, id, "an id")?, inner.get_or_default(name)?);
        }
    }
    Ok(result)
}

/// Split a map keyed by packed timely ids into its daily and weekly halves
fn read_timely_map(
    view: RobTopView<'_, Value>,
    key: &str,
) -> Result<(IndexMap<u32, u32>, IndexMap<u32, u32>), Error> {
    let mut daily = IndexMap::new();
    let mut weekly = IndexMap::new();
    if let Some(inner) = view.get_dict(key)? {
        for (name, _) in inner.iter() {
            let value = inner.get_or_default(name)?;
            match TimelyId::decode(parse_key(key, name, "a timely id")?) {
                TimelyId::Daily(id) => daily.insert(id, value),
                TimelyId::Weekly(id) => weekly.insert(id, value),
            };
        }
    }
    Ok((daily, weekly))
}

fn write_id_map(prefix: &str, map: &IndexMap<u32, u32>) -> Value {
    let dict: Dict = map
        .iter()
        .map(|(id, value)| (format!("{}{}", prefix, id), Value::String(value.to_token())))
        .collect();
    Value::Dict(dict)
}

fn write_timely_map(daily: &IndexMap<u32, u32>, weekly: &IndexMap<u32, u32>) -> Value {
    let daily = daily.iter().map(|(&id, value)| (TimelyId::Daily(id), value));
    let weekly = weekly.iter().map(|(&id, value)| (TimelyId::Weekly(id), value));
    let dict: Dict = daily
        .chain(weekly)
        .map(|(id, value)| (id.encode().to_string(), Value::String(value.to_token())))
        .collect();
    Value::Dict(dict)
}

/// Decode every entry of a nested dictionary as a reward item
fn read_reward_items<'a>(
    view: RobTopView<'a, Value>,
    key: &str,
) -> Result<Vec<(&'a str, RewardItem)>, Error> {
    let mut result = Vec::new();
    if let Some(inner) = view.get_dict(key)? {
        for (name, value) in inner.iter() {
            result.push((name, RewardItem::from_value(value, "reward item")?));
        }
    }
    Ok(result)
}

fn read_quests(view: RobTopView<'_, Value>, key: &str) -> Result<Vec<Quest>, Error> {
    let mut result = Vec::new();
    if let Some(inner) = view.get_dict(key)? {
        for (_, value) in inner.iter() {
            result.push(Quest::from_value(value, "quest")?);
        }
    }
    Ok(result)
}

fn write_quests(quests: &[Quest]) -> Value {
    let dict: Dict = quests
        .iter()
        .map(|quest| (quest.order.to_string(), Value::Dict(quest.to_plist())))
        .collect();
    Value::Dict(dict)
}

fn write_reward_items<'a>(items: impl Iterator<Item = (String, &'a RewardItem)>) -> Dict {
    items
        .map(|(key, item)| (key, Value::Dict(item.to_plist())))
        .collect()
}

/// Progress, rewards and quests stored under the `GS_` keys of the main save
///
/// Daily and weekly entries share their dictionaries in the save, where
/// weekly ids are offset by [`WEEKLY_ID_ADD`]. They are kept apart here.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Storage {
    pub verified_coins: Coins,
    pub unverified_coins: Coins,
    pub map_pack_stars: IndexMap<u32, u32>,
    /// Shop item id to the price paid
    pub purchased_items: IndexMap<u32, u32>,
    pub normal_records: IndexMap<u32, u32>,
    pub normal_stars: IndexMap<u32, u32>,
    pub official_records: IndexMap<u32, u32>,
    pub small_chest_rewards: IndexMap<u32, RewardItem>,
    pub large_chest_rewards: IndexMap<u32, RewardItem>,
    pub active_quests: Vec<Quest>,
    pub quest_diamonds: Vec<QuestDiamonds>,
    pub daily_diamonds: IndexMap<u32, u32>,
    pub upcoming_quests: Vec<Quest>,
    pub daily_records: IndexMap<u32, u32>,
    pub weekly_records: IndexMap<u32, u32>,
    pub daily_stars: IndexMap<u32, u32>,
    pub weekly_stars: IndexMap<u32, u32>,
    pub gauntlet_records: IndexMap<u32, u32>,
    pub treasure_chest_rewards: IndexMap<u32, RewardItem>,
    pub total_keys: u32,
    pub official_rewards: IndexMap<u32, RewardItem>,
    pub gauntlet_rewards: IndexMap<u32, RewardItem>,
    pub ad_rewards: Vec<AdReward>,
    pub new_gauntlet_records: IndexMap<u32, u32>,
    pub new_daily_records: IndexMap<u32, u32>,
    pub new_weekly_records: IndexMap<u32, u32>,
    pub weekly_rewards: IndexMap<u32, RewardItem>,
}

impl Storage {
    fn read_coins(view: RobTopView<'_, Value>, key: &str) -> Result<Coins, Error> {
        match view.get_dict(key)? {
            Some(inner) => Coins::from_dict(inner.map()),
            None => Ok(Coins::default()),
        }
    }

    fn read_chest_rewards(&mut self, view: RobTopView<'_, Value>) -> Result<(), Error> {
        for (name, item) in read_reward_items(view, CHEST_REWARDS)? {
            let (chest, id) = name
                .split_once('_')
                .ok_or_else(|| Error::token(CHEST_REWARDS, name, "a chest key"))?;
            let chest = ChestType::from_value(parse_key(CHEST_REWARDS, chest, "a chest type")?);
            let id = parse_key(CHEST_REWARDS, id, "a chest id")?;
            match chest {
                Some(ChestType::Small) => self.small_chest_rewards.insert(id, item),
                Some(ChestType::Large) => self.large_chest_rewards.insert(id, item),
                _ => return Err(Error::token(CHEST_REWARDS, name, ChestType::NAME)),
            };
        }
        Ok(())
    }

    fn read_diamonds(&mut self, view: RobTopView<'_, Value>) -> Result<(), Error> {
        let inner = match view.get_dict(DIAMONDS)? {
            Some(inner) => inner,
            None => return Ok(()),
        };

        for (name, _) in inner.iter() {
            let diamonds = inner.get_or_default(name)?;
            let mut chars = name.chars();
            match chars.next() {
                Some(QUEST_DIAMONDS_PREFIX) => {
                    let rest = chars.as_str();
                    if rest.len() < 2 || !rest.is_char_boundary(1) {
                        return Err(Error::token(DIAMONDS, name, "a quest diamonds key"));
                    }
                    let (order, count) = rest.split_at(1);
                    self.quest_diamonds.push(QuestDiamonds {
                        order: parse_key(DIAMONDS, order, "a quest order")?,
                        count: parse_key(DIAMONDS, count, "a quest count")?,
                        diamonds,
                    });
                }
                Some(TIMELY_PREFIX) => {
                    let id = parse_key(DIAMONDS, chars.as_str(), "a daily id")?;
                    self.daily_diamonds.insert(id, diamonds);
                }
                _ => log::debug!("unknown diamonds entry: {}", name),
            }
        }

        Ok(())
    }

    fn read_rewards(&mut self, view: RobTopView<'_, Value>) -> Result<(), Error> {
        for (name, item) in read_reward_items(view, REWARDS)? {
            match name.strip_prefix(GAUNTLET_PREFIX) {
                Some(id) => {
                    let id = parse_key(REWARDS, id, "a gauntlet id")?;
                    self.gauntlet_rewards.insert(id, item);
                }
                None => {
                    let id = parse_key(REWARDS, name, "a reward id")?;
                    self.official_rewards.insert(id, item);
                }
            }
        }

        for (name, item) in read_reward_items(view, WEEKLY_REWARDS)? {
            let id = name
                .strip_prefix(TIMELY_PREFIX)
                .ok_or_else(|| Error::token(WEEKLY_REWARDS, name, "a weekly key"))?;
            let id: u32 = parse_key(WEEKLY_REWARDS, id, "a weekly id")?;
            self.weekly_rewards.insert(TimelyId::decode(id).id(), item);
        }

        Ok(())
    }

    fn read_ad_rewards(&mut self, view: RobTopView<'_, Value>) -> Result<(), Error> {
        if let Some(inner) = view.get_dict(AD_REWARDS)? {
            for (name, _) in inner.iter() {
                self.ad_rewards.push(AdReward {
                    timestamp: parse_key(AD_REWARDS, name, "a timestamp")?,
                    orbs: inner.get_or_default(name)?,
                });
            }
        }
        Ok(())
    }

    fn chest_rewards_dict(&self) -> Dict {
        let chest_key = |chest: ChestType, id: u32| format!("{}_{}", chest.value(), id);
        let small = self
            .small_chest_rewards
            .iter()
            .map(|(&id, item)| (chest_key(ChestType::Small, id), item));
        let large = self
            .large_chest_rewards
            .iter()
            .map(|(&id, item)| (chest_key(ChestType::Large, id), item));
        write_reward_items(small.chain(large))
    }

    fn diamonds_dict(&self) -> Dict {
        let quests = self.quest_diamonds.iter().map(|x| {
            let key = format!("{}{}{}", QUEST_DIAMONDS_PREFIX, x.order, x.count);
            (key, Value::String(x.diamonds.to_token()))
        });
        let daily = self.daily_diamonds.iter().map(|(id, diamonds)| {
            let key = format!("{}{}", TIMELY_PREFIX, id);
            (key, Value::String(diamonds.to_token()))
        });
        quests.chain(daily).collect()
    }

    fn rewards_dict(&self) -> Dict {
        let official = self.official_rewards.iter().map(|(id, item)| {
            (format!("{:0width$}", id, width = OFFICIAL_REWARD_WIDTH), item)
        });
        let gauntlet = self
            .gauntlet_rewards
            .iter()
            .map(|(id, item)| (format!("{}{}", GAUNTLET_PREFIX, id), item));
        write_reward_items(official.chain(gauntlet))
    }

    fn weekly_rewards_dict(&self) -> Dict {
        let weekly = self.weekly_rewards.iter().map(|(&id, item)| {
            let key = format!("{}{}", TIMELY_PREFIX, i64::from(id) + WEEKLY_ID_ADD);
            (key, item)
        });
        write_reward_items(weekly)
    }

    fn ad_rewards_dict(&self) -> Dict {
        self.ad_rewards
            .iter()
            .map(|x| (float_str(x.timestamp), Value::String(x.orbs.to_token())))
            .collect()
    }
}

impl PlistRecord for Storage {
    fn from_plist(view: RobTopView<'_, Value>) -> Result<Self, Error> {
        let (daily_records, weekly_records) = read_timely_map(view, TIMELY_RECORDS)?;
        let (daily_stars, weekly_stars) = read_timely_map(view, TIMELY_STARS)?;
        let (new_daily_records, new_weekly_records) = read_timely_map(view, NEW_TIMELY_RECORDS)?;

        let treasure_chest_rewards = read_reward_items(view, TREASURE_CHEST_REWARDS)?
            .into_iter()
            .map(|(name, item)| Ok((parse_key(TREASURE_CHEST_REWARDS, name, "a chest id")?, item)))
            .collect::<Result<_, Error>>()?;

        let mut storage = Storage {
            verified_coins: Storage::read_coins(view, VERIFIED_COINS)?,
            unverified_coins: Storage::read_coins(view, UNVERIFIED_COINS)?,
            map_pack_stars: read_id_map(view, MAP_PACK_STARS, MAP_PACK_PREFIX)?,
            purchased_items: read_id_map(view, PURCHASED_ITEMS, "")?,
            normal_records: read_id_map(view, NORMAL_RECORDS, "")?,
            normal_stars: read_id_map(view, NORMAL_STARS, "")?,
            official_records: read_id_map(view, OFFICIAL_RECORDS, "")?,
            active_quests: read_quests(view, ACTIVE_QUESTS)?,
            upcoming_quests: read_quests(view, UPCOMING_QUESTS)?,
            daily_records,
            weekly_records,
            daily_stars,
            weekly_stars,
            gauntlet_records: read_id_map(view, GAUNTLET_RECORDS, "")?,
            treasure_chest_rewards,
            total_keys: view.get_or_default(TOTAL_KEYS)?,
            new_gauntlet_records: read_id_map(view, NEW_GAUNTLET_RECORDS, "")?,
            new_daily_records,
            new_weekly_records,
            ..Storage::default()
        };

        storage.read_chest_rewards(view)?;
        storage.read_diamonds(view)?;
        storage.read_rewards(view)?;
        storage.read_ad_rewards(view)?;
        Ok(storage)
    }

    fn to_plist(&self) -> Dict {
        let treasure = self
            .treasure_chest_rewards
            .iter()
            .map(|(id, item)| (id.to_string(), item));

        let mut dict = Dict::new();
        dict.insert(VERIFIED_COINS.into(), Value::Dict(self.verified_coins.to_dict()));
        dict.insert(UNVERIFIED_COINS.into(), Value::Dict(self.unverified_coins.to_dict()));
        dict.insert(MAP_PACK_STARS.into(), write_id_map(MAP_PACK_PREFIX, &self.map_pack_stars));
        dict.insert(PURCHASED_ITEMS.into(), write_id_map("", &self.purchased_items));
        dict.insert(NORMAL_RECORDS.into(), write_id_map("", &self.normal_records));
        dict.insert(NORMAL_STARS.into(), write_id_map("", &self.normal_stars));
        dict.insert(OFFICIAL_RECORDS.into(), write_id_map("", &self.official_records));
        dict.insert(CHEST_REWARDS.into(), Value::Dict(self.chest_rewards_dict()));
        dict.insert(ACTIVE_QUESTS.into(), write_quests(&self.active_quests));
        dict.insert(DIAMONDS.into(), Value::Dict(self.diamonds_dict()));
        dict.insert(UPCOMING_QUESTS.into(), write_quests(&self.upcoming_quests));
        dict.insert(
            TIMELY_RECORDS.into(),
            write_timely_map(&self.daily_records, &self.weekly_records),
        );
        dict.insert(
            TIMELY_STARS.into(),
            write_timely_map(&self.daily_stars, &self.weekly_stars),
        );
        dict.insert(GAUNTLET_RECORDS.into(), write_id_map("", &self.gauntlet_records));
        dict.insert(
            TREASURE_CHEST_REWARDS.into(),
            Value::Dict(write_reward_items(treasure)),
        );
        dict.insert(TOTAL_KEYS.into(), self.total_keys.into());
        dict.insert(REWARDS.into(), Value::Dict(self.rewards_dict()));
        dict.insert(AD_REWARDS.into(), Value::Dict(self.ad_rewards_dict()));
        dict.insert(
            NEW_GAUNTLET_RECORDS.into(),
            write_id_map("", &self.new_gauntlet_records),
        );
        dict.insert(
            NEW_TIMELY_RECORDS.into(),
            write_timely_map(&self.new_daily_records, &self.new_weekly_records),
        );
        dict.insert(WEEKLY_REWARDS.into(), Value::Dict(self.weekly_rewards_dict()));
        dict
    }
}

impl FromBinary for Storage {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(Storage {
            verified_coins: Coins::from_binary(reader, order)?,
            unverified_coins: Coins::from_binary(reader, order)?,
            map_pack_stars: IndexMap::from_binary(reader, order)?,
            purchased_items: IndexMap::from_binary(reader, order)?,
            normal_records: IndexMap::from_binary(reader, order)?,
            normal_stars: IndexMap::from_binary(reader, order)?,
            official_records: IndexMap::from_binary(reader, order)?,
            small_chest_rewards: IndexMap::from_binary(reader, order)?,
            large_chest_rewards: IndexMap::from_binary(reader, order)?,
            active_quests: Vec::from_binary(reader, order)?,
            quest_diamonds: Vec::from_binary(reader, order)?,
            daily_diamonds: IndexMap::from_binary(reader, order)?,
            upcoming_quests: Vec::from_binary(reader, order)?,
            daily_records: IndexMap::from_binary(reader, order)?,
            weekly_records: IndexMap::from_binary(reader, order)?,
            daily_stars: IndexMap::from_binary(reader, order)?,
            weekly_stars: IndexMap::from_binary(reader, order)?,
            gauntlet_records: IndexMap::from_binary(reader, order)?,
            treasure_chest_rewards: IndexMap::from_binary(reader, order)?,
            total_keys: reader.read_u32(order)?,
            official_rewards: IndexMap::from_binary(reader, order)?,
            gauntlet_rewards: IndexMap::from_binary(reader, order)?,
            ad_rewards: Vec::from_binary(reader, order)?,
            new_gauntlet_records: IndexMap::from_binary(reader, order)?,
            new_daily_records: IndexMap::from_binary(reader, order)?,
            new_weekly_records: IndexMap::from_binary(reader, order)?,
            weekly_rewards: IndexMap::from_binary(reader, order)?,
        })
    }
}

impl ToBinary for Storage {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.verified_coins.to_binary(writer, order);
        self.unverified_coins.to_binary(writer, order);
        self.map_pack_stars.to_binary(writer, order);
        self.purchased_items.to_binary(writer, order);
        self.normal_records.to_binary(writer, order);
        self.normal_stars.to_binary(writer, order);
        self.official_records.to_binary(writer, order);
        self.small_chest_rewards.to_binary(writer, order);
        self.large_chest_rewards.to_binary(writer, order);
        self.active_quests.to_binary(writer, order);
        self.quest_diamonds.to_binary(writer, order);
        self.daily_diamonds.to_binary(writer, order);
        self.upcoming_quests.to_binary(writer, order);
        self.daily_records.to_binary(writer, order);
        self.weekly_records.to_binary(writer, order);
        self.daily_stars.to_binary(writer, order);
        self.weekly_stars.to_binary(writer, order);
        self.gauntlet_records.to_binary(writer, order);
        self.treasure_chest_rewards.to_binary(writer, order);
        writer.write_u32(self.total_keys, order);
        self.official_rewards.to_binary(writer, order);
        self.gauntlet_rewards.to_binary(writer, order);
        self.ad_rewards.to_binary(writer, order);
        self.new_gauntlet_records.to_binary(writer, order);
        self.new_daily_records.to_binary(writer, order);
        self.new_weekly_records.to_binary(writer, order);
        self.weekly_rewards.to_binary(writer, order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};
    use crate::models::{Reward, RewardItemType};

    fn reward_item(id: u32) -> RewardItem {
        RewardItem {
            id,
            location: 1,
            rewards: vec![Reward {
                item_type: RewardItemType::Orb,
                amount: 50,
                ..Reward::default()
            }],
        }
    }

    fn storage() -> Storage {
        let mut storage = Storage {
            total_keys: 12,
            ..Storage::default()
        };
        storage.verified_coins.normal.insert(128, CollectedCoins::ALL);
        storage.verified_coins.weekly.insert(
            4,
            TimelyCoins {
                level_id: 77,
                coins: CollectedCoins::SECOND,
            },
        );
        storage.map_pack_stars.insert(18, 4);
        storage.normal_records.insert(30_029_017, 100);
        storage.small_chest_rewards.insert(3, reward_item(3));
        storage.large_chest_rewards.insert(3, reward_item(4));
        storage.quest_diamonds.push(QuestDiamonds {
            order: 2,
            count: 10,
            diamonds: 15,
        });
        storage.daily_diamonds.insert(1501, 5);
        storage.daily_records.insert(1501, 90);
        storage.weekly_records.insert(210, 100);
        storage.official_rewards.insert(7, reward_item(7));
        storage.gauntlet_rewards.insert(7, reward_item(8));
        storage.weekly_rewards.insert(210, reward_item(9));
        storage.ad_rewards.push(AdReward {
            timestamp: 1_690_000_000.5,
            orbs: 25,
        });
        storage
    }

    #[test]
    fn keys_follow_save_format() {
        let dict = storage().to_plist();
        let nested = |key: &str| dict[key].as_dict().unwrap().clone();

        assert!(nested(VERIFIED_COINS).contains_key("77_2_100004"));
        assert!(nested(VERIFIED_COINS).contains_key("128_3"));
        assert!(nested(MAP_PACK_STARS).contains_key("pack_18"));
        assert!(nested(CHEST_REWARDS).contains_key("1_3"));
        assert!(nested(CHEST_REWARDS).contains_key("2_3"));
        assert!(nested(DIAMONDS).contains_key("c210"));
        assert!(nested(DIAMONDS).contains_key("d1501"));
        assert!(nested(TIMELY_RECORDS).contains_key("100210"));
        assert!(nested(REWARDS).contains_key("0007"));
        assert!(nested(REWARDS).contains_key("g_7"));
        assert!(nested(WEEKLY_REWARDS).contains_key("d100210"));
        assert!(nested(AD_REWARDS).contains_key("1690000000.5"));
    }

    #[test]
    fn plist_round_trip() {
        let storage = storage();
        let dict = storage.to_plist();
        let decoded = Storage::from_plist(RobTopView::new(&dict)).unwrap();
        assert_eq!(decoded, storage);
        assert_eq!(decoded.verified_coins.weekly_level_id(4), Some(77));
    }

    #[test]
    fn missing_sections_are_empty() {
        let dict = Dict::new();
        let storage = Storage::from_plist(RobTopView::new(&dict)).unwrap();
        assert_eq!(storage, Storage::default());
    }

    #[test]
    fn bad_coin_key_names_it() {
        let mut dict = Dict::new();
        dict.insert("12_x".into(), Value::from("1"));
        let err = Coins::from_dict(&dict).unwrap_err();
        assert!(err.to_string().contains("12_x"));
    }

    #[test]
    fn binary_round_trip() {
        let storage = storage();
        let options = BinaryOptions::new();
        let data = to_bytes(&storage, &options).unwrap();
        assert_eq!(from_bytes::<Storage>(&data, &options).unwrap(), storage);
    }
}
