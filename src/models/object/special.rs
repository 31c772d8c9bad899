use super::{flag_at, keys, pack_flags, ObjectFields};
use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::models::{GameMode, ItemMode, Speed};
use crate::text::{decode_base64_str, encode_base64, Pairs, RobTopEnum, RobTopView};
use crate::Error;

/// Where the editor starts playtesting, overriding the level's start settings
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct StartPosition {
    pub game_mode: GameMode,
    pub mini_mode: bool,
    pub speed: Speed,
    pub dual_mode: bool,
    pub flip_gravity: bool,
}

impl ObjectFields for StartPosition {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(StartPosition {
            game_mode: view.get_enum_or(keys::START_GAME_MODE, GameMode::Cube)?,
            mini_mode: view.get_or(keys::START_MINI_MODE, false)?,
            speed: view.get_enum_or(keys::START_SPEED, Speed::Normal)?,
            dual_mode: view.get_or(keys::START_DUAL_MODE, false)?,
            flip_gravity: view.get_or(keys::START_FLIP_GRAVITY, false)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::START_GAME_MODE, self.game_mode.value())
            .put(keys::START_MINI_MODE, self.mini_mode)
            .put(keys::START_SPEED, self.speed.value())
            .put(keys::START_DUAL_MODE, self.dual_mode)
            .put(keys::START_POSITION, true)
            .put(keys::START_FLIP_GRAVITY, self.flip_gravity);
    }
}

impl FromBinary for StartPosition {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let game_mode = GameMode::from_binary(reader, order)?;
        let speed = Speed::from_binary(reader, order)?;
        let flags = reader.read_u8(order)?;
        Ok(StartPosition {
            game_mode,
            speed,
            mini_mode: flag_at(flags, 0),
            dual_mode: flag_at(flags, 1),
            flip_gravity: flag_at(flags, 2),
        })
    }
}

impl ToBinary for StartPosition {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.game_mode.to_binary(writer, order);
        self.speed.to_binary(writer, order);
        let flags = pack_flags(&[self.mini_mode, self.dual_mode, self.flip_gravity]);
        writer.write_u8(flags, order);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct SecretCoin {
    pub coin_id: u8,
}

impl ObjectFields for SecretCoin {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(SecretCoin {
            coin_id: view.get_or(keys::COIN_ID, 0)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs.put(keys::COIN_ID, self.coin_id);
    }
}

impl FromBinary for SecretCoin {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let coin_id = reader.read_u8(order)?;
        Ok(SecretCoin { coin_id })
    }
}

impl ToBinary for SecretCoin {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u8(self.coin_id, order);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct RotatingObject {
    /// Degrees per second
    pub rotation_speed: f32,
    pub disable_rotation: bool,
}

impl ObjectFields for RotatingObject {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(RotatingObject {
            rotation_speed: view.get_or(keys::ROTATION_SPEED, 0.0)?,
            disable_rotation: view.get_or(keys::DISABLE_ROTATION, false)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put_non_default(keys::ROTATION_SPEED, self.rotation_speed, 0.0)
            .put_flag(keys::DISABLE_ROTATION, self.disable_rotation);
    }
}

impl FromBinary for RotatingObject {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(RotatingObject {
            rotation_speed: reader.read_f32(order)?,
            disable_rotation: reader.read_bool(order)?,
        })
    }
}

impl ToBinary for RotatingObject {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_f32(self.rotation_speed, order);
        writer.write_bool(self.disable_rotation, order);
    }
}

/// Free text placed in the level, stored as base64
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Text {
    pub content: String,
}

impl ObjectFields for Text {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        let content = match view.raw(keys::CONTENT) {
            Some(encoded) if !encoded.is_empty() => decode_base64_str(encoded)?,
            _ => String::new(),
        };
        Ok(Text { content })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs.put_str(keys::CONTENT, encode_base64(self.content.as_bytes()));
    }
}

impl FromBinary for Text {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let content = reader.read_string(order)?;
        Ok(Text { content })
    }
}

impl ToBinary for Text {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_string(&self.content, order);
    }
}

const DEFAULT_PORTAL_OFFSET: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Teleport {
    pub portal_offset: f32,
    pub smooth: bool,
}

impl Default for Teleport {
    fn default() -> Self {
        Teleport {
            portal_offset: DEFAULT_PORTAL_OFFSET,
            smooth: false,
        }
    }
}

impl ObjectFields for Teleport {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(Teleport {
            portal_offset: view.get_or(keys::PORTAL_OFFSET, DEFAULT_PORTAL_OFFSET)?,
            smooth: view.get_or(keys::SMOOTH, false)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::PORTAL_OFFSET, self.portal_offset)
            .put_flag(keys::SMOOTH, self.smooth);
    }
}

impl FromBinary for Teleport {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(Teleport {
            portal_offset: reader.read_f32(order)?,
            smooth: reader.read_bool(order)?,
        })
    }
}

impl ToBinary for Teleport {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_f32(self.portal_offset, order);
        writer.write_bool(self.smooth, order);
    }
}

const DEFAULT_ANIMATION_SPEED: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct PulsatingObject {
    pub randomize_start: bool,
    pub animation_speed: f32,
}

impl Default for PulsatingObject {
    fn default() -> Self {
        PulsatingObject {
            randomize_start: false,
            animation_speed: DEFAULT_ANIMATION_SPEED,
        }
    }
}

impl ObjectFields for PulsatingObject {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(PulsatingObject {
            randomize_start: view.get_or(keys::RANDOMIZE_START, false)?,
            animation_speed: view.get_or(keys::ANIMATION_SPEED, DEFAULT_ANIMATION_SPEED)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::ANIMATION_SPEED, self.animation_speed)
            .put_flag(keys::RANDOMIZE_START, self.randomize_start);
    }
}

impl FromBinary for PulsatingObject {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(PulsatingObject {
            randomize_start: reader.read_bool(order)?,
            animation_speed: reader.read_f32(order)?,
        })
    }
}

impl ToBinary for PulsatingObject {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_bool(self.randomize_start, order);
        writer.write_f32(self.animation_speed, order);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct CollisionBlock {
    pub block_id: u16,
    pub dynamic: bool,
}

impl ObjectFields for CollisionBlock {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(CollisionBlock {
            block_id: view.get_or(keys::BLOCK_ID, 0)?,
            dynamic: view.get_or(keys::DYNAMIC, false)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::BLOCK_ID, self.block_id)
            .put_flag(keys::DYNAMIC, self.dynamic);
    }
}

impl FromBinary for CollisionBlock {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(CollisionBlock {
            block_id: reader.read_u16(order)?,
            dynamic: reader.read_bool(order)?,
        })
    }
}

impl ToBinary for CollisionBlock {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u16(self.block_id, order);
        writer.write_bool(self.dynamic, order);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Orb {
    pub multi_activate: bool,
}

impl ObjectFields for Orb {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(Orb {
            multi_activate: view.get_or(keys::ORB_MULTI_ACTIVATE, false)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs.put_flag(keys::ORB_MULTI_ACTIVATE, self.multi_activate);
    }
}

impl FromBinary for Orb {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let multi_activate = reader.read_bool(order)?;
        Ok(Orb { multi_activate })
    }
}

impl ToBinary for Orb {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_bool(self.multi_activate, order);
    }
}

/// An orb that spawns or toggles a group when used
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct TriggerOrb {
    pub orb: Orb,
    pub activate_group: bool,
    pub target_group_id: u16,
}

impl ObjectFields for TriggerOrb {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(TriggerOrb {
            orb: Orb::from_view(view)?,
            activate_group: view.get_or(keys::ACTIVATE_GROUP, false)?,
            target_group_id: view.get_or(keys::TARGET_GROUP_ID, 0)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        self.orb.write_pairs(pairs);
        pairs
            .put_flag(keys::ACTIVATE_GROUP, self.activate_group)
            .put(keys::TARGET_GROUP_ID, self.target_group_id);
    }
}

impl FromBinary for TriggerOrb {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let flags = reader.read_u8(order)?;
        Ok(TriggerOrb {
            orb: Orb {
                multi_activate: flag_at(flags, 0),
            },
            activate_group: flag_at(flags, 1),
            target_group_id: reader.read_u16(order)?,
        })
    }
}

impl ToBinary for TriggerOrb {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        let flags = pack_flags(&[self.orb.multi_activate, self.activate_group]);
        writer.write_u8(flags, order);
        writer.write_u16(self.target_group_id, order);
    }
}

/// Displays the value of an item counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct ItemCounter {
    pub item_id: u16,
}

impl ObjectFields for ItemCounter {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(ItemCounter {
            item_id: view.get_or(keys::ITEM_ID, 0)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs.put_non_default(keys::ITEM_ID, self.item_id, 0);
    }
}

impl FromBinary for ItemCounter {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let item_id = reader.read_u16(order)?;
        Ok(ItemCounter { item_id })
    }
}

impl ToBinary for ItemCounter {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u16(self.item_id, order);
    }
}

/// A collectible that adds to (or subtracts from) an item counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct PickupItem {
    pub item_id: u16,
    pub subtract_count: bool,
}

impl ObjectFields for PickupItem {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(PickupItem {
            item_id: view.get_or(keys::ITEM_ID, 0)?,
            subtract_count: view.get_or(keys::SUBTRACT_COUNT, false)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put_flag(keys::SUBTRACT_COUNT, self.subtract_count)
            .put(keys::ITEM_ID, self.item_id)
            .put(keys::ITEM_MODE, ItemMode::Pickup.value());
    }
}

impl FromBinary for PickupItem {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(PickupItem {
            item_id: reader.read_u16(order)?,
            subtract_count: reader.read_bool(order)?,
        })
    }
}

impl ToBinary for PickupItem {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u16(self.item_id, order);
        writer.write_bool(self.subtract_count, order);
    }
}

/// A collectible that spawns or toggles a group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct ToggleItem {
    pub target_group_id: u16,
    pub activate_group: bool,
}

impl ObjectFields for ToggleItem {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(ToggleItem {
            target_group_id: view.get_or(keys::TARGET_GROUP_ID, 0)?,
            activate_group: view.get_or(keys::ACTIVATE_GROUP, false)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::TARGET_GROUP_ID, self.target_group_id)
            .put_flag(keys::ACTIVATE_GROUP, self.activate_group)
            .put(keys::ITEM_MODE, ItemMode::Toggle.value());
    }
}

impl FromBinary for ToggleItem {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(ToggleItem {
            target_group_id: reader.read_u16(order)?,
            activate_group: reader.read_bool(order)?,
        })
    }
}

impl ToBinary for ToggleItem {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u16(self.target_group_id, order);
        writer.write_bool(self.activate_group, order);
    }
}

#[cfg(test)]
mod tests {
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};
    use crate::models::object::{PickupItem, StartPosition, Text, ToggleItem};
    use crate::models::{GameMode, Object, ObjectData, Speed};
    use crate::text::RobTopString;
    use rstest::*;

    #[test]
    fn start_position_writes_every_setting() {
        let mut object = Object::new(31, 0.0, 105.0);
        object.data = ObjectData::StartPosition(StartPosition {
            game_mode: GameMode::Wave,
            speed: Speed::Fast,
            dual_mode: true,
            ..StartPosition::default()
        });
        let text = object.to_robtop();
        assert_eq!(text, "1,31,2,0,3,105,kA2,4,kA3,0,kA4,2,kA8,1,kA9,1,kA11,0");
        assert_eq!(Object::from_robtop(&text).unwrap(), object);
    }

    #[test]
    fn text_content_is_base64() {
        let object = Object::from_robtop("1,914,2,15,3,15,31,aGVsbG8gd29ybGQ=").unwrap();
        assert_eq!(
            object.data,
            ObjectData::Text(Text {
                content: String::from("hello world")
            })
        );
        let options = BinaryOptions::new();
        let data = to_bytes(&object, &options).unwrap();
        assert_eq!(from_bytes::<Object>(&data, &options).unwrap(), object);
    }

    #[rstest]
    #[case("1,1275,79,1,80,3,78,1", ObjectData::PickupItem(PickupItem { item_id: 3, subtract_count: true }))]
    #[case("1,1275,79,2,51,9", ObjectData::ToggleItem(ToggleItem { target_group_id: 9, activate_group: false }))]
    #[case("1,1587,51,4,56,1", ObjectData::ToggleItem(ToggleItem { target_group_id: 4, activate_group: true }))]
    fn items_dispatch_on_mode(#[case] text: &str, #[case] expected: ObjectData) {
        let object = Object::from_robtop(text).unwrap();
        assert_eq!(object.data, expected);
        assert_eq!(Object::from_robtop(&object.to_robtop()).unwrap(), object);
    }

    #[test]
    fn teleport_defaults() {
        let object = Object::from_robtop("1,747,2,0,3,0").unwrap();
        assert_eq!(object.to_robtop(), "1,747,2,0,3,0,54,100");
    }

    #[test]
    fn rotating_objects_skip_zero_speed() {
        let object = Object::from_robtop("1,1705,97,0,98,1").unwrap();
        assert_eq!(object.to_robtop(), "1,1705,2,0,3,0,98,1");
    }
}
