use super::{InternalType, RewardItemType, INTERNAL_TYPE};
use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::plist::{array_from_values, Dict, PlistRecord, Value};
use crate::text::{RobTopEnum, RobTopView};
use crate::Error;

const QUEST_ID: &str = "1";
const QUEST_AMOUNT: &str = "2";
const QUEST_TARGET_AMOUNT: &str = "3";
const QUEST_DIAMONDS: &str = "4";
const QUEST_COUNT: &str = "5";
const QUEST_COMPLETED: &str = "6";
const QUEST_NAME: &str = "7";
const QUEST_ORDER: &str = "8";

const REWARD_ITEM_TYPE: &str = "1";
const REWARD_CUSTOM_ID: &str = "2";
const REWARD_AMOUNT: &str = "3";
const REWARD_MAGIC: &str = "4";

const REWARD_ITEM_ID: &str = "1";
const REWARD_ITEM_LOCATION: &str = "2";
const REWARD_ITEM_REWARDS: &str = "3";

/// One of the three quests offered at a time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Quest {
    pub id: u32,
    pub amount: u32,
    pub target_amount: u32,
    pub diamonds: u32,
    pub count: u32,
    pub completed: bool,
    pub name: String,
    pub order: u32,
}

impl PlistRecord for Quest {
    fn from_plist(view: RobTopView<'_, Value>) -> Result<Self, Error> {
        Ok(Quest {
            id: view.get_or_default(QUEST_ID)?,
            amount: view.get_or_default(QUEST_AMOUNT)?,
            target_amount: view.get_or_default(QUEST_TARGET_AMOUNT)?,
            diamonds: view.get_or_default(QUEST_DIAMONDS)?,
            count: view.get_or_default(QUEST_COUNT)?,
            completed: view.get_or_default(QUEST_COMPLETED)?,
            name: view.get_string(QUEST_NAME),
            order: view.get_or_default(QUEST_ORDER)?,
        })
    }

    fn to_plist(&self) -> Dict {
        let mut dict = Dict::new();
        dict.insert(INTERNAL_TYPE.into(), InternalType::Quest.value().into());
        dict.insert(QUEST_ID.into(), self.id.into());
        dict.insert(QUEST_AMOUNT.into(), self.amount.into());
        dict.insert(QUEST_TARGET_AMOUNT.into(), self.target_amount.into());
        dict.insert(QUEST_DIAMONDS.into(), self.diamonds.into());
        dict.insert(QUEST_COUNT.into(), self.count.into());
        dict.insert(QUEST_NAME.into(), self.name.as_str().into());
        dict.insert(QUEST_ORDER.into(), self.order.into());
        if self.completed {
            dict.insert(QUEST_COMPLETED.into(), true.into());
        }
        dict
    }
}

impl FromBinary for Quest {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(Quest {
            id: reader.read_u32(order)?,
            amount: reader.read_u32(order)?,
            target_amount: reader.read_u32(order)?,
            diamonds: reader.read_u32(order)?,
            count: reader.read_u32(order)?,
            completed: reader.read_bool(order)?,
            name: reader.read_string(order)?,
            order: reader.read_u32(order)?,
        })
    }
}

impl ToBinary for Quest {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u32(self.id, order);
        writer.write_u32(self.amount, order);
        writer.write_u32(self.target_amount, order);
        writer.write_u32(self.diamonds, order);
        writer.write_u32(self.count, order);
        writer.write_bool(self.completed, order);
        writer.write_string(&self.name, order);
        writer.write_u32(self.order, order);
    }
}

/// A single reward handed out by a chest or a level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Reward {
    pub item_type: RewardItemType,
    pub custom_id: u32,
    pub amount: u32,
    pub magic: u32,
}

impl PlistRecord for Reward {
    fn from_plist(view: RobTopView<'_, Value>) -> Result<Self, Error> {
        Ok(Reward {
            item_type: view.get_enum_or(REWARD_ITEM_TYPE, RewardItemType::Unknown)?,
            custom_id: view.get_or_default(REWARD_CUSTOM_ID)?,
            amount: view.get_or_default(REWARD_AMOUNT)?,
            magic: view.get_or_default(REWARD_MAGIC)?,
        })
    }

    fn to_plist(&self) -> Dict {
        let mut dict = Dict::new();
        dict.insert(INTERNAL_TYPE.into(), InternalType::Reward.value().into());
        dict.insert(REWARD_ITEM_TYPE.into(), self.item_type.value().into());
        dict.insert(REWARD_CUSTOM_ID.into(), self.custom_id.into());
        dict.insert(REWARD_AMOUNT.into(), self.amount.into());
        dict.insert(REWARD_MAGIC.into(), self.magic.into());
        dict
    }
}

impl FromBinary for Reward {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(Reward {
            item_type: RewardItemType::from_binary(reader, order)?,
            custom_id: reader.read_u32(order)?,
            amount: reader.read_u32(order)?,
            magic: reader.read_u32(order)?,
        })
    }
}

impl ToBinary for Reward {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.item_type.to_binary(writer, order);
        writer.write_u32(self.custom_id, order);
        writer.write_u32(self.amount, order);
        writer.write_u32(self.magic, order);
    }
}

/// The contents of an opened chest or a collected level reward
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct RewardItem {
    pub id: u32,
    pub location: u32,
    pub rewards: Vec<Reward>,
}

impl PlistRecord for RewardItem {
    fn from_plist(view: RobTopView<'_, Value>) -> Result<Self, Error> {
        let rewards = view
            .get_array(REWARD_ITEM_REWARDS)?
            .into_iter()
            .map(|value| Reward::from_value(value, "reward"))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RewardItem {
            id: view.get_or_default(REWARD_ITEM_ID)?,
            location: view.get_or_default(REWARD_ITEM_LOCATION)?,
            rewards,
        })
    }

    fn to_plist(&self) -> Dict {
        let rewards = self.rewards.iter().map(|x| Value::Dict(x.to_plist()));

        let mut dict = Dict::new();
        dict.insert(INTERNAL_TYPE.into(), InternalType::RewardItem.value().into());
        dict.insert(REWARD_ITEM_ID.into(), self.id.into());
        dict.insert(REWARD_ITEM_LOCATION.into(), self.location.into());
        dict.insert(
            REWARD_ITEM_REWARDS.into(),
            Value::Dict(array_from_values(rewards)),
        );
        dict
    }
}

impl FromBinary for RewardItem {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(RewardItem {
            id: reader.read_u32(order)?,
            location: reader.read_u32(order)?,
            rewards: Vec::from_binary(reader, order)?,
        })
    }
}

impl ToBinary for RewardItem {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u32(self.id, order);
        writer.write_u32(self.location, order);
        self.rewards.to_binary(writer, order);
    }
}
