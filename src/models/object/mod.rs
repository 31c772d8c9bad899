//! Level objects and their specialised kinds
//!
//! An object is a flat comma separated string of numeric keys. The object id
//! under key `1` decides which kind of record the remaining keys describe.
//!
//! ```
//! use robtop::models::{Object, ObjectData};
//! use robtop::text::RobTopString;
//!
//! let object = Object::from_robtop("1,1,2,15,3,45,6,90").unwrap();
//! assert_eq!(object.id, 1);
//! assert_eq!(object.rotation, 90.0);
//! assert_eq!(object.data, ObjectData::Generic);
//! assert_eq!(object.to_robtop(), "1,1,2,15,3,45,6,90");
//! ```
mod color;
pub mod ids;
pub(crate) mod keys;
mod movement;
mod special;
mod trigger;

pub use self::color::{ColorTrigger, ColorTriggerMode, PulseSource, PulseTarget, PulseTrigger};
pub use self::movement::{
    EasingSettings, FollowPlayerYTrigger, FollowTrigger, MoveMode, MoveTrigger, RotateTrigger,
    ShakeTrigger,
};
pub use self::special::{
    CollisionBlock, ItemCounter, Orb, PickupItem, PulsatingObject, RotatingObject, SecretCoin,
    StartPosition, Teleport, Text, ToggleItem, TriggerOrb,
};
pub use self::trigger::{
    AlphaTrigger, AnimateTrigger, CollisionTrigger, CountTrigger, InstantCountTrigger,
    OnDeathTrigger, PickupTrigger, SpawnTrigger, StopTrigger, ToggleTrigger, TouchTrigger, Trigger,
    TriggerKind,
};

use super::{Hsv, LegacyColorId, SpecialColorId};
use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::text::{split_list, split_pairs, Pairs, RobTopString, RobTopView, Token};
use crate::{Error, ErrorKind, OrderedSet};

const SEPARATOR: char = ',';
const GROUP_SEPARATOR: char = '.';

const H_FLIPPED_BIT: u16 = 1;
const V_FLIPPED_BIT: u16 = 2;
const HAS_ROTATION_AND_SCALE: u16 = 4;
const DO_NOT_FADE_BIT: u16 = 8;
const DO_NOT_ENTER_BIT: u16 = 16;
const HAS_Z: u16 = 32;
const HAS_EDITOR_LAYER: u16 = 64;
const HAS_COLORS: u16 = 128;
const HAS_GROUPS: u16 = 256;
const GROUP_PARENT_BIT: u16 = 512;
const HIGH_DETAIL_BIT: u16 = 1024;
const DISABLE_GLOW_BIT: u16 = 2048;
const SPECIAL_CHECKED_BIT: u16 = 4096;
const HAS_LINK: u16 = 8192;
const UNKNOWN_BIT: u16 = 16384;

const DEFAULT_SCALE: f32 = 1.0;

/// The text and binary fields that an object kind adds on top of the
/// common object fields
pub(crate) trait ObjectFields: Sized + FromBinary + ToBinary {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error>;

    fn write_pairs(&self, pairs: &mut Pairs);
}

/// Pack flags into a byte with the first flag in the lowest bit
pub(crate) fn pack_flags(flags: &[bool]) -> u8 {
    flags
        .iter()
        .enumerate()
        .fold(0, |acc, (i, &set)| acc | (u8::from(set) << i))
}

#[inline]
pub(crate) fn flag_at(byte: u8, index: u8) -> bool {
    byte & (1 << index) != 0
}

pub(crate) fn read_hsv_string(
    view: RobTopView<'_, String>,
    key: &str,
) -> Result<Option<Hsv>, Error> {
    match view.raw(key) {
        Some(text) if !text.is_empty() => Hsv::from_robtop(text).map(Some),
        _ => Ok(None),
    }
}

/// A placed object of a level
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Object {
    pub id: u16,
    pub x: f32,
    pub y: f32,
    pub h_flipped: bool,
    pub v_flipped: bool,
    pub rotation: f32,
    pub scale: f32,
    pub do_not_fade: bool,
    pub do_not_enter: bool,
    pub z_layer: i8,
    pub z_order: i16,
    pub base_editor_layer: u16,
    pub additional_editor_layer: u16,
    pub base_color_id: u16,
    pub detail_color_id: u16,
    pub base_hsv: Hsv,
    pub detail_hsv: Hsv,
    pub group_ids: OrderedSet<u16>,
    pub group_parent: bool,
    pub high_detail: bool,
    pub disable_glow: bool,
    pub special_checked: bool,
    pub link_id: u32,
    pub unknown: bool,
    pub data: ObjectData,
}

impl Default for Object {
    fn default() -> Self {
        Object::new(0, 0.0, 0.0)
    }
}

/// What an object does beyond being placed, selected by its id
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
#[cfg_attr(feature = "derive", serde(tag = "kind"))]
pub enum ObjectData {
    /// Decorations, blocks and every id without a dedicated record
    Generic,
    StartPosition(StartPosition),
    SecretCoin(SecretCoin),
    Rotating(RotatingObject),
    Text(Text),
    Teleport(Teleport),
    Pulsating(PulsatingObject),
    CollisionBlock(CollisionBlock),
    Orb(Orb),
    TriggerOrb(TriggerOrb),
    ItemCounter(ItemCounter),
    PickupItem(PickupItem),
    ToggleItem(ToggleItem),
    Trigger(Trigger),
}

const GENERIC_TAG: u8 = 0;
const START_POSITION_TAG: u8 = 1;
const SECRET_COIN_TAG: u8 = 2;
const ROTATING_TAG: u8 = 3;
const TEXT_TAG: u8 = 4;
const TELEPORT_TAG: u8 = 5;
const PULSATING_TAG: u8 = 6;
const COLLISION_BLOCK_TAG: u8 = 7;
const ORB_TAG: u8 = 8;
const TRIGGER_ORB_TAG: u8 = 9;
const ITEM_COUNTER_TAG: u8 = 10;
const PICKUP_ITEM_TAG: u8 = 11;
const TOGGLE_ITEM_TAG: u8 = 12;
const TRIGGER_TAG: u8 = 13;

impl ObjectData {
    /// Decode the kind specific fields of the object with the given id
    pub fn from_view(id: u16, view: RobTopView<'_, String>) -> Result<ObjectData, Error> {
        let data = match id {
            ids::START_POSITION => ObjectData::StartPosition(StartPosition::from_view(view)?),
            ids::SECRET_COIN => ObjectData::SecretCoin(SecretCoin::from_view(view)?),
            ids::TEXT => ObjectData::Text(Text::from_view(view)?),
            ids::TELEPORT => ObjectData::Teleport(Teleport::from_view(view)?),
            ids::COLLISION_BLOCK => ObjectData::CollisionBlock(CollisionBlock::from_view(view)?),
            ids::TRIGGER_ORB => ObjectData::TriggerOrb(TriggerOrb::from_view(view)?),
            ids::ITEM_COUNTER => ObjectData::ItemCounter(ItemCounter::from_view(view)?),
            x if ids::is_orb(x) => ObjectData::Orb(Orb::from_view(view)?),
            x if ids::is_pulsating(x) => ObjectData::Pulsating(PulsatingObject::from_view(view)?),
            x if ids::is_rotating(x) => ObjectData::Rotating(RotatingObject::from_view(view)?),
            x if ids::is_item(x) => {
                if view.get_or::<i64>(keys::ITEM_MODE, 0)? == 1 {
                    ObjectData::PickupItem(PickupItem::from_view(view)?)
                } else {
                    ObjectData::ToggleItem(ToggleItem::from_view(view)?)
                }
            }
            _ => match Trigger::from_view(id, view)? {
                Some(trigger) => ObjectData::Trigger(trigger),
                None => {
                    log::debug!("object id {} has no dedicated record", id);
                    ObjectData::Generic
                }
            },
        };
        Ok(data)
    }

    pub fn write_pairs(&self, pairs: &mut Pairs) {
        match self {
            ObjectData::Generic => {}
            ObjectData::StartPosition(x) => x.write_pairs(pairs),
            ObjectData::SecretCoin(x) => x.write_pairs(pairs),
            ObjectData::Rotating(x) => x.write_pairs(pairs),
            ObjectData::Text(x) => x.write_pairs(pairs),
            ObjectData::Teleport(x) => x.write_pairs(pairs),
            ObjectData::Pulsating(x) => x.write_pairs(pairs),
            ObjectData::CollisionBlock(x) => x.write_pairs(pairs),
            ObjectData::Orb(x) => x.write_pairs(pairs),
            ObjectData::TriggerOrb(x) => x.write_pairs(pairs),
            ObjectData::ItemCounter(x) => x.write_pairs(pairs),
            ObjectData::PickupItem(x) => x.write_pairs(pairs),
            ObjectData::ToggleItem(x) => x.write_pairs(pairs),
            ObjectData::Trigger(x) => x.write_pairs(pairs),
        }
    }

    fn tag(&self) -> u8 {
        match self {
            ObjectData::Generic => GENERIC_TAG,
            ObjectData::StartPosition(_) => START_POSITION_TAG,
            ObjectData::SecretCoin(_) => SECRET_COIN_TAG,
            ObjectData::Rotating(_) => ROTATING_TAG,
            ObjectData::Text(_) => TEXT_TAG,
            ObjectData::Teleport(_) => TELEPORT_TAG,
            ObjectData::Pulsating(_) => PULSATING_TAG,
            ObjectData::CollisionBlock(_) => COLLISION_BLOCK_TAG,
            ObjectData::Orb(_) => ORB_TAG,
            ObjectData::TriggerOrb(_) => TRIGGER_ORB_TAG,
            ObjectData::ItemCounter(_) => ITEM_COUNTER_TAG,
            ObjectData::PickupItem(_) => PICKUP_ITEM_TAG,
            ObjectData::ToggleItem(_) => TOGGLE_ITEM_TAG,
            ObjectData::Trigger(_) => TRIGGER_TAG,
        }
    }
}

impl FromBinary for ObjectData {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let offset = reader.offset();
        let data = match reader.read_u8(order)? {
            GENERIC_TAG => ObjectData::Generic,
            START_POSITION_TAG => ObjectData::StartPosition(FromBinary::from_binary(reader, order)?),
            SECRET_COIN_TAG => ObjectData::SecretCoin(FromBinary::from_binary(reader, order)?),
            ROTATING_TAG => ObjectData::Rotating(FromBinary::from_binary(reader, order)?),
            TEXT_TAG => ObjectData::Text(FromBinary::from_binary(reader, order)?),
            TELEPORT_TAG => ObjectData::Teleport(FromBinary::from_binary(reader, order)?),
            PULSATING_TAG => ObjectData::Pulsating(FromBinary::from_binary(reader, order)?),
            COLLISION_BLOCK_TAG => ObjectData::CollisionBlock(FromBinary::from_binary(reader, order)?),
            ORB_TAG => ObjectData::Orb(FromBinary::from_binary(reader, order)?),
            TRIGGER_ORB_TAG => ObjectData::TriggerOrb(FromBinary::from_binary(reader, order)?),
            ITEM_COUNTER_TAG => ObjectData::ItemCounter(FromBinary::from_binary(reader, order)?),
            PICKUP_ITEM_TAG => ObjectData::PickupItem(FromBinary::from_binary(reader, order)?),
            TOGGLE_ITEM_TAG => ObjectData::ToggleItem(FromBinary::from_binary(reader, order)?),
            TRIGGER_TAG => ObjectData::Trigger(FromBinary::from_binary(reader, order)?),
            tag => {
                return Err(Error::new(ErrorKind::Discriminant {
                    record: "object",
                    tag: i64::from(tag),
                    offset,
                }))
            }
        };
        Ok(data)
    }
}

impl ToBinary for ObjectData {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u8(self.tag(), order);
        match self {
            ObjectData::Generic => {}
            ObjectData::StartPosition(x) => x.to_binary(writer, order),
            ObjectData::SecretCoin(x) => x.to_binary(writer, order),
            ObjectData::Rotating(x) => x.to_binary(writer, order),
            ObjectData::Text(x) => x.to_binary(writer, order),
            ObjectData::Teleport(x) => x.to_binary(writer, order),
            ObjectData::Pulsating(x) => x.to_binary(writer, order),
            ObjectData::CollisionBlock(x) => x.to_binary(writer, order),
            ObjectData::Orb(x) => x.to_binary(writer, order),
            ObjectData::TriggerOrb(x) => x.to_binary(writer, order),
            ObjectData::ItemCounter(x) => x.to_binary(writer, order),
            ObjectData::PickupItem(x) => x.to_binary(writer, order),
            ObjectData::ToggleItem(x) => x.to_binary(writer, order),
            ObjectData::Trigger(x) => x.to_binary(writer, order),
        }
    }
}

fn parse_groups(view: RobTopView<'_, String>) -> Result<OrderedSet<u16>, Error> {
    let mut groups = OrderedSet::new();
    if let Some(text) = view.raw(keys::GROUP_IDS) {
        for token in split_list(text, GROUP_SEPARATOR) {
            let id = u16::parse_token(token)
                .ok_or_else(|| Error::token(keys::GROUP_IDS, token, u16::EXPECTED))?;
            groups.insert(id);
        }
    }

    let single: u16 = view.get_or(keys::SINGLE_GROUP_ID, 0)?;
    if single != 0 {
        groups.insert(single);
    }
    Ok(groups)
}

impl Object {
    /// A generic object at the given position with every other field at
    /// its default
    pub fn new(id: u16, x: f32, y: f32) -> Self {
        Object::with_data(id, x, y, ObjectData::Generic)
    }

    pub fn with_data(id: u16, x: f32, y: f32, data: ObjectData) -> Self {
        Object {
            id,
            x,
            y,
            h_flipped: false,
            v_flipped: false,
            rotation: 0.0,
            scale: DEFAULT_SCALE,
            do_not_fade: false,
            do_not_enter: false,
            z_layer: 0,
            z_order: 0,
            base_editor_layer: 0,
            additional_editor_layer: 0,
            base_color_id: 0,
            detail_color_id: 0,
            base_hsv: Hsv::default(),
            detail_hsv: Hsv::default(),
            group_ids: OrderedSet::new(),
            group_parent: false,
            high_detail: false,
            disable_glow: false,
            special_checked: false,
            link_id: 0,
            unknown: false,
            data,
        }
    }

    /// A trigger placed at the given position, with the id of its kind
    pub fn trigger(x: f32, y: f32, trigger: Trigger) -> Self {
        Object::with_data(trigger.kind.object_id(), x, y, ObjectData::Trigger(trigger))
    }

    pub fn is_trigger(&self) -> bool {
        matches!(self.data, ObjectData::Trigger(_))
    }

    pub fn is_start_position(&self) -> bool {
        matches!(self.data, ObjectData::StartPosition(_))
    }

    fn base_from_view(view: RobTopView<'_, String>) -> Result<Object, Error> {
        let id = view.get_required(keys::ID, "object")?;

        let legacy_color = view
            .get_enum_lossy(keys::LEGACY_COLOR_ID, LegacyColorId::Default)?
            .migrate();
        let (base_color_id, detail_color_id) = if legacy_color != 0 {
            (legacy_color, legacy_color)
        } else {
            (
                view.get_or(keys::BASE_COLOR_ID, 0)?,
                view.get_or(keys::DETAIL_COLOR_ID, 0)?,
            )
        };

        Ok(Object {
            id,
            x: view.get_or(keys::X, 0.0)?,
            y: view.get_or(keys::Y, 0.0)?,
            h_flipped: view.get_or(keys::H_FLIPPED, false)?,
            v_flipped: view.get_or(keys::V_FLIPPED, false)?,
            rotation: view.get_or(keys::ROTATION, 0.0)?,
            scale: view.get_or(keys::SCALE, DEFAULT_SCALE)?,
            do_not_fade: view.get_or(keys::DO_NOT_FADE, false)?,
            do_not_enter: view.get_or(keys::DO_NOT_ENTER, false)?,
            z_layer: view.get_or(keys::Z_LAYER, 0)?,
            z_order: view.get_or(keys::Z_ORDER, 0)?,
            base_editor_layer: view.get_or(keys::BASE_EDITOR_LAYER, 0)?,
            additional_editor_layer: view.get_or(keys::ADDITIONAL_EDITOR_LAYER, 0)?,
            base_color_id,
            detail_color_id,
            base_hsv: read_hsv_string(view, keys::BASE_HSV)?.unwrap_or_default(),
            detail_hsv: read_hsv_string(view, keys::DETAIL_HSV)?.unwrap_or_default(),
            group_ids: parse_groups(view)?,
            group_parent: view.get_or(keys::GROUP_PARENT, false)?,
            high_detail: view.get_or(keys::HIGH_DETAIL, false)?,
            disable_glow: view.get_or(keys::DISABLE_GLOW, false)?,
            special_checked: view.get_or(keys::SPECIAL_CHECKED, false)?,
            link_id: view.get_or(keys::LINK_ID, 0)?,
            unknown: view.get_or(keys::UNKNOWN, false)?,
            data: ObjectData::Generic,
        })
    }

    /// Decode an object, migrating color triggers of old levels to the
    /// modern color trigger.
    ///
    /// An old background trigger that also tints the ground becomes two
    /// triggers, so the second one is returned alongside.
    pub fn from_view_migrating(
        view: RobTopView<'_, String>,
    ) -> Result<(Object, Option<Object>), Error> {
        let mut object = Object::base_from_view(view)?;

        let channel = match ids::compatibility_channel(object.id) {
            Some(channel) => channel,
            None => {
                object.data = ObjectData::from_view(object.id, view)?;
                return Ok((object, None));
            }
        };

        log::debug!(
            "migrating color trigger {} to target channel {}",
            object.id,
            channel
        );
        let tint_ground =
            object.id == ids::BACKGROUND_TRIGGER && view.get_or(keys::TINT_GROUND, false)?;
        object.id = ids::COLOR_TRIGGER;
        object.data = ObjectData::Trigger(Trigger::compatibility_from_view(view, channel)?);

        let ground = if tint_ground {
            let mut ground = object.clone();
            if let ObjectData::Trigger(Trigger {
                kind: TriggerKind::Color(color),
                ..
            }) = &mut ground.data
            {
                color.target_channel_id = SpecialColorId::Ground.id();
            }
            Some(ground)
        } else {
            None
        };

        Ok((object, ground))
    }

    pub fn from_view(view: RobTopView<'_, String>) -> Result<Object, Error> {
        Object::from_view_migrating(view).map(|(object, _)| object)
    }

    pub fn to_pairs(&self) -> Pairs {
        let mut pairs = Pairs::new();
        pairs
            .put(keys::ID, self.id)
            .put(keys::X, self.x)
            .put(keys::Y, self.y)
            .put_non_default(keys::ROTATION, self.rotation, 0.0)
            .put_non_default(keys::SCALE, self.scale, DEFAULT_SCALE)
            .put_flag(keys::H_FLIPPED, self.h_flipped)
            .put_flag(keys::V_FLIPPED, self.v_flipped)
            .put_flag(keys::DO_NOT_FADE, self.do_not_fade)
            .put_flag(keys::DO_NOT_ENTER, self.do_not_enter)
            .put_non_default(keys::Z_LAYER, self.z_layer, 0)
            .put_non_default(keys::Z_ORDER, self.z_order, 0)
            .put_non_default(keys::BASE_EDITOR_LAYER, self.base_editor_layer, 0)
            .put_non_default(keys::ADDITIONAL_EDITOR_LAYER, self.additional_editor_layer, 0)
            .put_non_default(keys::BASE_COLOR_ID, self.base_color_id, 0)
            .put_non_default(keys::DETAIL_COLOR_ID, self.detail_color_id, 0);

        if !self.base_hsv.is_default() {
            pairs
                .put_str(keys::BASE_HSV, self.base_hsv.to_robtop())
                .put(keys::BASE_HSV_MODIFIED, true);
        }

        if !self.detail_hsv.is_default() {
            pairs
                .put_str(keys::DETAIL_HSV, self.detail_hsv.to_robtop())
                .put(keys::DETAIL_HSV_MODIFIED, true);
        }

        if !self.group_ids.is_empty() {
            pairs.put_str(
                keys::GROUP_IDS,
                crate::text::join_list(self.group_ids.iter().copied(), GROUP_SEPARATOR),
            );
        }

        pairs
            .put_flag(keys::GROUP_PARENT, self.group_parent)
            .put_flag(keys::HIGH_DETAIL, self.high_detail)
            .put_flag(keys::DISABLE_GLOW, self.disable_glow)
            .put_flag(keys::SPECIAL_CHECKED, self.special_checked)
            .put_non_default(keys::LINK_ID, self.link_id, 0)
            .put_flag(keys::UNKNOWN, self.unknown);

        self.data.write_pairs(&mut pairs);
        pairs
    }

    fn has_colors(&self) -> bool {
        self.base_color_id != 0
            || self.detail_color_id != 0
            || !self.base_hsv.is_default()
            || !self.detail_hsv.is_default()
    }

    /// The flag word that gates the optional binary sub-blocks
    pub fn flags(&self) -> u16 {
        let mut flags = 0;
        for (set, bit) in [
            (self.h_flipped, H_FLIPPED_BIT),
            (self.v_flipped, V_FLIPPED_BIT),
            (
                self.rotation != 0.0 || self.scale != DEFAULT_SCALE,
                HAS_ROTATION_AND_SCALE,
            ),
            (self.do_not_fade, DO_NOT_FADE_BIT),
            (self.do_not_enter, DO_NOT_ENTER_BIT),
            (self.z_layer != 0 || self.z_order != 0, HAS_Z),
            (
                self.base_editor_layer != 0 || self.additional_editor_layer != 0,
                HAS_EDITOR_LAYER,
            ),
            (self.has_colors(), HAS_COLORS),
            (!self.group_ids.is_empty(), HAS_GROUPS),
            (self.group_parent, GROUP_PARENT_BIT),
            (self.high_detail, HIGH_DETAIL_BIT),
            (self.disable_glow, DISABLE_GLOW_BIT),
            (self.special_checked, SPECIAL_CHECKED_BIT),
            (self.link_id != 0, HAS_LINK),
            (self.unknown, UNKNOWN_BIT),
        ] {
            if set {
                flags |= bit;
            }
        }
        flags
    }
}

impl RobTopString for Object {
    fn from_robtop(text: &str) -> Result<Self, Error> {
        let map = split_pairs(text, SEPARATOR);
        Object::from_view(RobTopView::new(&map))
    }

    fn to_robtop(&self) -> String {
        self.to_pairs().join(SEPARATOR)
    }
}

impl FromBinary for Object {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let id = reader.read_u16(order)?;
        let x = reader.read_f32(order)?;
        let y = reader.read_f32(order)?;
        let flags = reader.read_u16(order)?;
        let has = |bit: u16| flags & bit != 0;

        let mut object = Object::new(id, x, y);
        object.h_flipped = has(H_FLIPPED_BIT);
        object.v_flipped = has(V_FLIPPED_BIT);
        object.do_not_fade = has(DO_NOT_FADE_BIT);
        object.do_not_enter = has(DO_NOT_ENTER_BIT);
        object.group_parent = has(GROUP_PARENT_BIT);
        object.high_detail = has(HIGH_DETAIL_BIT);
        object.disable_glow = has(DISABLE_GLOW_BIT);
        object.special_checked = has(SPECIAL_CHECKED_BIT);
        object.unknown = has(UNKNOWN_BIT);

        if has(HAS_ROTATION_AND_SCALE) {
            object.rotation = reader.read_f32(order)?;
            object.scale = reader.read_f32(order)?;
        }

        if has(HAS_Z) {
            object.z_layer = reader.read_i8(order)?;
            object.z_order = reader.read_i16(order)?;
        }

        if has(HAS_EDITOR_LAYER) {
            object.base_editor_layer = reader.read_u16(order)?;
            object.additional_editor_layer = reader.read_u16(order)?;
        }

        if has(HAS_COLORS) {
            object.base_color_id = reader.read_u16(order)?;
            object.detail_color_id = reader.read_u16(order)?;
            object.base_hsv = Hsv::from_binary(reader, order)?;
            object.detail_hsv = Hsv::from_binary(reader, order)?;
        }

        if has(HAS_GROUPS) {
            let count = reader.read_short_count(order, 2)?;
            for _ in 0..count {
                object.group_ids.insert(reader.read_u16(order)?);
            }
        }

        if has(HAS_LINK) {
            object.link_id = reader.read_u32(order)?;
        }

        object.data = ObjectData::from_binary(reader, order)?;
        Ok(object)
    }
}

impl ToBinary for Object {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        let flags = self.flags();
        writer.write_u16(self.id, order);
        writer.write_f32(self.x, order);
        writer.write_f32(self.y, order);
        writer.write_u16(flags, order);

        if flags & HAS_ROTATION_AND_SCALE != 0 {
            writer.write_f32(self.rotation, order);
            writer.write_f32(self.scale, order);
        }

        if flags & HAS_Z != 0 {
            writer.write_i8(self.z_layer, order);
            writer.write_i16(self.z_order, order);
        }

        if flags & HAS_EDITOR_LAYER != 0 {
            writer.write_u16(self.base_editor_layer, order);
            writer.write_u16(self.additional_editor_layer, order);
        }

        if flags & HAS_COLORS != 0 {
            writer.write_u16(self.base_color_id, order);
            writer.write_u16(self.detail_color_id, order);
            self.base_hsv.to_binary(writer, order);
            self.detail_hsv.to_binary(writer, order);
        }

        if flags & HAS_GROUPS != 0 {
            writer.write_short_count(self.group_ids.len(), order);
            for id in &self.group_ids {
                writer.write_u16(*id, order);
            }
        }

        if flags & HAS_LINK != 0 {
            writer.write_u32(self.link_id, order);
        }

        self.data.to_binary(writer, order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};
    use crate::models::{PlayerColor, Rgb};
    use rstest::*;

    fn little() -> BinaryOptions {
        BinaryOptions::new().order(ByteOrder::Little)
    }

    #[test]
    fn rotation_only_sets_single_flag() {
        let mut object = Object::new(1, 15.0, 45.0);
        object.rotation = 90.0;
        assert_eq!(object.flags(), HAS_ROTATION_AND_SCALE);

        let data = to_bytes(&object, &little()).unwrap();
        assert_eq!(&data[10..12], &[4, 0]);
        // id, position, flags, rotation and scale, then the generic tag
        assert_eq!(data.len(), 2 + 8 + 2 + 8 + 1);

        let decoded = from_bytes::<Object>(&data, &little()).unwrap();
        assert_eq!(decoded.rotation, 90.0);
        assert_eq!(decoded.scale, 1.0);
        assert!(decoded.group_ids.is_empty());
        assert_eq!(decoded.base_color_id, 0);
        assert_eq!(decoded, object);
    }

    #[test]
    fn every_sub_block_round_trips() {
        let mut object = Object::new(1, -3.5, 1e6);
        object.h_flipped = true;
        object.scale = 0.5;
        object.z_layer = -3;
        object.z_order = 12;
        object.additional_editor_layer = 4;
        object.detail_color_id = 1005;
        object.base_hsv = Hsv::new(20, 0.5, 1.0, true, false);
        object.group_ids.extend(vec![5, 2, 9]);
        object.link_id = 77;
        object.unknown = true;

        for options in [little(), BinaryOptions::new().order(ByteOrder::Big)] {
            let data = to_bytes(&object, &options).unwrap();
            assert_eq!(from_bytes::<Object>(&data, &options).unwrap(), object);
        }
    }

    #[test]
    fn text_writes_non_defaults_only() {
        let mut object = Object::new(8, 15.0, 45.5);
        object.group_ids.extend(vec![3, 1]);
        object.base_hsv = Hsv::new(-20, 1.0, 1.0, false, false);
        let text = object.to_robtop();
        assert_eq!(text, "1,8,2,15,3,45.5,43,-20a1a1a0a0,41,1,57,3.1");
        assert_eq!(Object::from_robtop(&text).unwrap(), object);
    }

    #[rstest]
    #[case("1,1,2,0,3,0,57,1.2,33,7", vec![1, 2, 7])]
    #[case("1,1,2,0,3,0,33,2,57,2.3", vec![2, 3])]
    #[case("1,1,57,", vec![])]
    fn single_group_is_appended(#[case] text: &str, #[case] expected: Vec<u16>) {
        let object = Object::from_robtop(text).unwrap();
        assert_eq!(object.group_ids.into_vec(), expected);
    }

    #[test]
    fn legacy_color_sets_both_channels() {
        let object = Object::from_robtop("1,1,19,3,21,7").unwrap();
        assert_eq!(object.base_color_id, 1);
        assert_eq!(object.detail_color_id, 1);

        let object = Object::from_robtop("1,1,19,0,21,7").unwrap();
        assert_eq!(object.base_color_id, 7);
    }

    #[test]
    fn missing_id_is_schema_error() {
        let err = Object::from_robtop("2,15,3,15").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Schema { .. }));
    }

    #[test]
    fn unknown_binary_tag() {
        let mut data = to_bytes(&Object::new(1, 0.0, 0.0), &little()).unwrap();
        *data.last_mut().unwrap() = 200;
        let err = from_bytes::<Object>(&data, &little()).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::Discriminant { tag: 200, offset: 12, .. }
        ));
    }

    #[test]
    fn every_group_overflows_the_short_count() {
        let mut object = Object::new(1, 0.0, 0.0);
        object.group_ids = (0..=u16::MAX).collect();
        let err = to_bytes(&object, &little()).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::CountOverflow { count: 65_536, .. }
        ));

        object.group_ids = (1..=u16::MAX).collect();
        let data = to_bytes(&object, &little()).unwrap();
        assert_eq!(from_bytes::<Object>(&data, &little()).unwrap(), object);
    }

    #[test]
    fn background_trigger_tints_ground() {
        let text = "1,29,2,5,3,5,7,10,8,20,9,30,10,0.5,14,1";
        let map = split_pairs(text, SEPARATOR);
        let (object, ground) = Object::from_view_migrating(RobTopView::new(&map)).unwrap();
        assert_eq!(object.id, ids::COLOR_TRIGGER);

        let color = match &object.data {
            ObjectData::Trigger(Trigger {
                kind: TriggerKind::Color(color),
                ..
            }) => color.clone(),
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(color.target_channel_id, 1000);
        assert_eq!(color.duration, 0.5);
        assert_eq!(
            color.mode,
            ColorTriggerMode::Normal {
                color: Rgb::new(10, 20, 30),
                opacity: 1.0
            }
        );

        let ground = ground.unwrap();
        match ground.data {
            ObjectData::Trigger(Trigger {
                kind: TriggerKind::Color(color),
                ..
            }) => assert_eq!(color.target_channel_id, 1001),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn compatibility_triggers_target_their_channel() {
        let object = Object::from_robtop("1,744,15,1").unwrap();
        match object.data {
            ObjectData::Trigger(Trigger {
                kind: TriggerKind::Color(color),
                ..
            }) => {
                assert_eq!(color.target_channel_id, 1003);
                assert!(matches!(
                    color.mode,
                    ColorTriggerMode::Player {
                        player_color: PlayerColor::Color1,
                        ..
                    }
                ));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
