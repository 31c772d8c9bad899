use super::{
    flag_at, ids, keys, pack_flags, ColorTrigger, FollowPlayerYTrigger, FollowTrigger,
    MoveTrigger, ObjectFields, PulseTrigger, RotateTrigger, ShakeTrigger,
};
use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::models::{InstantCountComparison, ToggleType};
use crate::text::{Pairs, RobTopEnum, RobTopView};
use crate::{Error, ErrorKind};

const DEFAULT_OPACITY: f32 = 1.0;

/// Implements the binary codec of a record as its fields written in order
macro_rules! field_binary {
    ($name:ident { $($field:ident),* $(,)? }) => {
        impl FromBinary for $name {
            fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
                Ok($name {
                    $($field: FromBinary::from_binary(reader, order)?,)*
                })
            }
        }

        impl ToBinary for $name {
            fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
                $(self.$field.to_binary(writer, order);)*
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct AlphaTrigger {
    pub target_group_id: u16,
    pub duration: f32,
    pub opacity: f32,
}

impl Default for AlphaTrigger {
    fn default() -> Self {
        AlphaTrigger {
            target_group_id: 0,
            duration: 0.0,
            opacity: DEFAULT_OPACITY,
        }
    }
}

impl ObjectFields for AlphaTrigger {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(AlphaTrigger {
            target_group_id: view.get_or(keys::TARGET_GROUP_ID, 0)?,
            duration: view.get_or(keys::DURATION, 0.0)?,
            opacity: view.get_or(keys::OPACITY, DEFAULT_OPACITY)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::DURATION, self.duration)
            .put(keys::TARGET_GROUP_ID, self.target_group_id)
            .put(keys::OPACITY, self.opacity);
    }
}

field_binary!(AlphaTrigger { target_group_id, duration, opacity });

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct SpawnTrigger {
    pub target_group_id: u16,
    pub delay: f32,
    pub editor_disable: bool,
}

impl ObjectFields for SpawnTrigger {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(SpawnTrigger {
            target_group_id: view.get_or(keys::TARGET_GROUP_ID, 0)?,
            delay: view.get_or(keys::SPAWN_DELAY, 0.0)?,
            editor_disable: view.get_or(keys::EDITOR_DISABLE, false)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::TARGET_GROUP_ID, self.target_group_id)
            .put(keys::SPAWN_DELAY, self.delay)
            .put_flag(keys::EDITOR_DISABLE, self.editor_disable);
    }
}

field_binary!(SpawnTrigger { target_group_id, delay, editor_disable });

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct StopTrigger {
    pub target_group_id: u16,
}

impl ObjectFields for StopTrigger {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(StopTrigger {
            target_group_id: view.get_or(keys::TARGET_GROUP_ID, 0)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs.put(keys::TARGET_GROUP_ID, self.target_group_id);
    }
}

field_binary!(StopTrigger { target_group_id });

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct ToggleTrigger {
    pub target_group_id: u16,
    pub activate_group: bool,
}

impl ToggleTrigger {
    pub fn toggle(&mut self) {
        self.activate_group = !self.activate_group;
    }
}

impl ObjectFields for ToggleTrigger {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(ToggleTrigger {
            target_group_id: view.get_or(keys::TARGET_GROUP_ID, 0)?,
            activate_group: view.get_or(keys::ACTIVATE_GROUP, false)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::TARGET_GROUP_ID, self.target_group_id)
            .put_flag(keys::ACTIVATE_GROUP, self.activate_group);
    }
}

field_binary!(ToggleTrigger { target_group_id, activate_group });

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct AnimateTrigger {
    pub target_group_id: u16,
    pub animation_id: u16,
}

impl ObjectFields for AnimateTrigger {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(AnimateTrigger {
            target_group_id: view.get_or(keys::TARGET_GROUP_ID, 0)?,
            animation_id: view.get_or(keys::ANIMATION_ID, 0)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::TARGET_GROUP_ID, self.target_group_id)
            .put(keys::ANIMATION_ID, self.animation_id);
    }
}

field_binary!(AnimateTrigger { target_group_id, animation_id });

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct TouchTrigger {
    pub target_group_id: u16,
    pub hold_mode: bool,
    pub dual_mode: bool,
    pub toggle_type: ToggleType,
}

impl ObjectFields for TouchTrigger {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(TouchTrigger {
            target_group_id: view.get_or(keys::TARGET_GROUP_ID, 0)?,
            hold_mode: view.get_or(keys::HOLD_MODE, false)?,
            dual_mode: view.get_or(keys::DUAL_MODE, false)?,
            toggle_type: view.get_enum_or(keys::TOGGLE_TYPE, ToggleType::Spawn)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::TARGET_GROUP_ID, self.target_group_id)
            .put_flag(keys::HOLD_MODE, self.hold_mode)
            .put_flag(keys::DUAL_MODE, self.dual_mode)
            .put(keys::TOGGLE_TYPE, self.toggle_type.value());
    }
}

impl FromBinary for TouchTrigger {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let target_group_id = reader.read_u16(order)?;
        let flags = reader.read_u8(order)?;
        Ok(TouchTrigger {
            target_group_id,
            hold_mode: flag_at(flags, 0),
            dual_mode: flag_at(flags, 1),
            toggle_type: ToggleType::from_binary(reader, order)?,
        })
    }
}

impl ToBinary for TouchTrigger {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u16(self.target_group_id, order);
        writer.write_u8(pack_flags(&[self.hold_mode, self.dual_mode]), order);
        self.toggle_type.to_binary(writer, order);
    }
}

/// Adds to an item counter, where a negative count subtracts
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct CountTrigger {
    pub item_id: u16,
    pub count: i32,
    pub activate_group: bool,
    pub multi_activate: bool,
}

impl ObjectFields for CountTrigger {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        let count: i32 = view.get_or(keys::COUNT, 0)?;
        let subtract = view.get_or(keys::SUBTRACT_COUNT, false)?;
        Ok(CountTrigger {
            item_id: view.get_or(keys::ITEM_ID, 0)?,
            count: if subtract { -count } else { count },
            activate_group: view.get_or(keys::ACTIVATE_GROUP, false)?,
            multi_activate: view.get_or(keys::TRIGGER_MULTI_ACTIVATE, false)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::ITEM_ID, self.item_id)
            .put_flag(keys::SUBTRACT_COUNT, self.count < 0)
            .put(keys::COUNT, self.count.unsigned_abs())
            .put_flag(keys::ACTIVATE_GROUP, self.activate_group)
            .put_flag(keys::TRIGGER_MULTI_ACTIVATE, self.multi_activate);
    }
}

field_binary!(CountTrigger { item_id, count, activate_group, multi_activate });

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct InstantCountTrigger {
    pub item_id: u16,
    pub count: i32,
    pub activate_group: bool,
    pub comparison: InstantCountComparison,
}

impl ObjectFields for InstantCountTrigger {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(InstantCountTrigger {
            item_id: view.get_or(keys::ITEM_ID, 0)?,
            count: view.get_or(keys::COUNT, 0)?,
            activate_group: view.get_or(keys::ACTIVATE_GROUP, false)?,
            comparison: view.get_enum_or(keys::COMPARISON, InstantCountComparison::Equals)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::ITEM_ID, self.item_id)
            .put(keys::COUNT, self.count)
            .put_flag(keys::ACTIVATE_GROUP, self.activate_group)
            .put(keys::COMPARISON, self.comparison.value());
    }
}

field_binary!(InstantCountTrigger { item_id, count, activate_group, comparison });

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct PickupTrigger {
    pub item_id: u16,
    pub count: i32,
}

impl ObjectFields for PickupTrigger {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(PickupTrigger {
            item_id: view.get_or(keys::ITEM_ID, 0)?,
            count: view.get_or(keys::COUNT, 0)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::ITEM_ID, self.item_id)
            .put(keys::COUNT, self.count);
    }
}

field_binary!(PickupTrigger { item_id, count });

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct OnDeathTrigger {
    pub target_group_id: u16,
    pub activate_group: bool,
}

impl ObjectFields for OnDeathTrigger {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(OnDeathTrigger {
            target_group_id: view.get_or(keys::TARGET_GROUP_ID, 0)?,
            activate_group: view.get_or(keys::ACTIVATE_GROUP, false)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::TARGET_GROUP_ID, self.target_group_id)
            .put_flag(keys::ACTIVATE_GROUP, self.activate_group);
    }
}

field_binary!(OnDeathTrigger { target_group_id, activate_group });

/// Fires when two collision blocks touch
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct CollisionTrigger {
    pub block_a_id: u16,
    pub block_b_id: u16,
    pub target_group_id: u16,
    pub activate_group: bool,
    pub trigger_on_exit: bool,
}

impl ObjectFields for CollisionTrigger {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(CollisionTrigger {
            block_a_id: view.get_or(keys::BLOCK_ID, 0)?,
            block_b_id: view.get_or(keys::BLOCK_B_ID, 0)?,
            target_group_id: view.get_or(keys::TARGET_GROUP_ID, 0)?,
            activate_group: view.get_or(keys::ACTIVATE_GROUP, false)?,
            trigger_on_exit: view.get_or(keys::TRIGGER_ON_EXIT, false)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::BLOCK_ID, self.block_a_id)
            .put(keys::BLOCK_B_ID, self.block_b_id)
            .put_flag(keys::ACTIVATE_GROUP, self.activate_group)
            .put_flag(keys::TRIGGER_ON_EXIT, self.trigger_on_exit)
            .put(keys::TARGET_GROUP_ID, self.target_group_id);
    }
}

field_binary!(CollisionTrigger {
    block_a_id,
    block_b_id,
    target_group_id,
    activate_group,
    trigger_on_exit,
});

/// The behavior of a trigger, selected by its object id
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
#[cfg_attr(feature = "derive", serde(tag = "type"))]
pub enum TriggerKind {
    Color(ColorTrigger),
    Alpha(AlphaTrigger),
    Pulse(PulseTrigger),
    Move(MoveTrigger),
    Spawn(SpawnTrigger),
    Stop(StopTrigger),
    Toggle(ToggleTrigger),
    Rotate(RotateTrigger),
    Follow(FollowTrigger),
    Shake(ShakeTrigger),
    Animate(AnimateTrigger),
    Touch(TouchTrigger),
    Count(CountTrigger),
    InstantCount(InstantCountTrigger),
    Pickup(PickupTrigger),
    FollowPlayerY(FollowPlayerYTrigger),
    OnDeath(OnDeathTrigger),
    Collision(CollisionTrigger),
}

/// Variant, binary tag and object id of every trigger kind
macro_rules! impl_trigger_kind {
    ($($variant:ident = $tag:literal => $id:ident),* $(,)?) => {
        impl TriggerKind {
            /// The object id of triggers of this kind
            pub fn object_id(&self) -> u16 {
                match self {
                    $(TriggerKind::$variant(_) => ids::$id,)*
                }
            }

            fn tag(&self) -> u8 {
                match self {
                    $(TriggerKind::$variant(_) => $tag,)*
                }
            }

            /// Decode the trigger fields for an object id, if it is a trigger
            pub(crate) fn from_view(
                id: u16,
                view: RobTopView<'_, String>,
            ) -> Result<Option<TriggerKind>, Error> {
                let kind = match id {
                    $(ids::$id => TriggerKind::$variant(ObjectFields::from_view(view)?),)*
                    _ => return Ok(None),
                };
                Ok(Some(kind))
            }

            pub(crate) fn write_pairs(&self, pairs: &mut Pairs) {
                match self {
                    $(TriggerKind::$variant(x) => x.write_pairs(pairs),)*
                }
            }

            fn read_tagged(
                tag: u8,
                reader: &mut Reader<'_>,
                order: ByteOrder,
            ) -> Result<TriggerKind, Error> {
                match tag {
                    $($tag => Ok(TriggerKind::$variant(FromBinary::from_binary(reader, order)?)),)*
                    _ => Err(Error::new(ErrorKind::Discriminant {
                        record: "trigger",
                        tag: i64::from(tag),
                        offset: reader.offset() - 1,
                    })),
                }
            }

            fn write_fields(&self, writer: &mut Writer, order: ByteOrder) {
                match self {
                    $(TriggerKind::$variant(x) => x.to_binary(writer, order),)*
                }
            }
        }
    };
}

impl_trigger_kind! {
    Color = 0 => COLOR_TRIGGER,
    Alpha = 1 => ALPHA_TRIGGER,
    Pulse = 2 => PULSE_TRIGGER,
    Move = 3 => MOVE_TRIGGER,
    Spawn = 4 => SPAWN_TRIGGER,
    Stop = 5 => STOP_TRIGGER,
    Toggle = 6 => TOGGLE_TRIGGER,
    Rotate = 7 => ROTATE_TRIGGER,
    Follow = 8 => FOLLOW_TRIGGER,
    Shake = 9 => SHAKE_TRIGGER,
    Animate = 10 => ANIMATE_TRIGGER,
    Touch = 11 => TOUCH_TRIGGER,
    Count = 12 => COUNT_TRIGGER,
    InstantCount = 13 => INSTANT_COUNT_TRIGGER,
    Pickup = 14 => PICKUP_TRIGGER,
    FollowPlayerY = 15 => FOLLOW_PLAYER_Y_TRIGGER,
    OnDeath = 16 => ON_DEATH_TRIGGER,
    Collision = 17 => COLLISION_TRIGGER,
}

const TOUCH_TRIGGERED_BIT: u8 = 0;
const SPAWN_TRIGGERED_BIT: u8 = 1;
const MULTI_TRIGGER_BIT: u8 = 2;

/// Settings shared by every trigger along with its kind
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Trigger {
    pub touch_triggered: bool,
    pub spawn_triggered: bool,
    pub multi_trigger: bool,
    pub kind: TriggerKind,
}

impl From<TriggerKind> for Trigger {
    fn from(kind: TriggerKind) -> Self {
        Trigger::new(kind)
    }
}

impl Trigger {
    pub fn new(kind: TriggerKind) -> Self {
        Trigger {
            touch_triggered: false,
            spawn_triggered: false,
            multi_trigger: false,
            kind,
        }
    }

    fn with_view(view: RobTopView<'_, String>, kind: TriggerKind) -> Result<Trigger, Error> {
        Ok(Trigger {
            touch_triggered: view.get_or(keys::TOUCH_TRIGGERED, false)?,
            spawn_triggered: view.get_or(keys::SPAWN_TRIGGERED, false)?,
            multi_trigger: view.get_or(keys::MULTI_TRIGGER, false)?,
            kind,
        })
    }

    /// Decode a trigger, or `None` when the object id is not a trigger
    pub fn from_view(id: u16, view: RobTopView<'_, String>) -> Result<Option<Trigger>, Error> {
        match TriggerKind::from_view(id, view)? {
            Some(kind) => Trigger::with_view(view, kind).map(Some),
            None => Ok(None),
        }
    }

    /// Decode a color trigger of an old level that always targets `channel`
    pub fn compatibility_from_view(
        view: RobTopView<'_, String>,
        channel: u16,
    ) -> Result<Trigger, Error> {
        let mut color = ColorTrigger::from_view(view)?;
        color.target_channel_id = channel;
        Trigger::with_view(view, TriggerKind::Color(color))
    }

    pub(crate) fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put_flag(keys::TOUCH_TRIGGERED, self.touch_triggered)
            .put_flag(keys::SPAWN_TRIGGERED, self.spawn_triggered)
            .put_flag(keys::MULTI_TRIGGER, self.multi_trigger);
        self.kind.write_pairs(pairs);
    }
}

impl FromBinary for Trigger {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let flags = reader.read_u8(order)?;
        let tag = reader.read_u8(order)?;
        Ok(Trigger {
            touch_triggered: flag_at(flags, TOUCH_TRIGGERED_BIT),
            spawn_triggered: flag_at(flags, SPAWN_TRIGGERED_BIT),
            multi_trigger: flag_at(flags, MULTI_TRIGGER_BIT),
            kind: TriggerKind::read_tagged(tag, reader, order)?,
        })
    }
}

impl ToBinary for Trigger {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        let flags = pack_flags(&[self.touch_triggered, self.spawn_triggered, self.multi_trigger]);
        writer.write_u8(flags, order);
        writer.write_u8(self.kind.tag(), order);
        self.kind.write_fields(writer, order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};
    use crate::text::split_pairs;
    use rstest::*;

    fn decode(id: u16, text: &str) -> Option<Trigger> {
        let map = split_pairs(text, ',');
        Trigger::from_view(id, RobTopView::new(&map)).unwrap()
    }

    fn encode(trigger: &Trigger) -> String {
        let mut pairs = Pairs::new();
        trigger.write_pairs(&mut pairs);
        pairs.join(',')
    }

    #[test]
    fn negative_count_subtracts() {
        let trigger = decode(ids::COUNT_TRIGGER, "80,3,77,5,78,1").unwrap();
        assert_eq!(
            trigger.kind,
            TriggerKind::Count(CountTrigger {
                item_id: 3,
                count: -5,
                ..CountTrigger::default()
            })
        );
        assert_eq!(encode(&trigger), "80,3,78,1,77,5");
    }

    #[test]
    fn color_triggers_are_copied() {
        let trigger = decode(ids::COLOR_TRIGGER, "23,4,10,0.5,7,0,8,128,9,255").unwrap();
        let copy = trigger;
        assert_eq!(copy, trigger);
        match copy.kind {
            TriggerKind::Color(color) => {
                let mode = color.mode;
                assert_eq!(mode, color.mode);
                assert_eq!(color.target_channel_id, 4);
            }
            kind => panic!("unexpected kind {:?}", kind),
        }
    }

    #[test]
    fn shared_flags_come_first() {
        let trigger = decode(ids::STOP_TRIGGER, "51,9,11,1,87,1").unwrap();
        assert!(trigger.touch_triggered);
        assert!(!trigger.spawn_triggered);
        assert!(trigger.multi_trigger);
        assert_eq!(encode(&trigger), "11,1,87,1,51,9");
    }

    #[test]
    fn non_trigger_ids_are_skipped() {
        assert_eq!(decode(1, "51,9"), None);
    }

    #[test]
    fn touch_always_writes_toggle_type() {
        let trigger = decode(ids::TOUCH_TRIGGER, "51,2,81,1").unwrap();
        assert_eq!(encode(&trigger), "51,2,81,1,82,0");
    }

    #[test]
    fn compatibility_overrides_channel() {
        let map = split_pairs("23,5,10,2,7,0", ',');
        let trigger = Trigger::compatibility_from_view(RobTopView::new(&map), 1002).unwrap();
        match trigger.kind {
            TriggerKind::Color(color) => {
                assert_eq!(color.target_channel_id, 1002);
                assert_eq!(color.duration, 2.0);
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[rstest]
    #[case(TriggerKind::Alpha(AlphaTrigger::default()))]
    #[case(TriggerKind::Spawn(SpawnTrigger { target_group_id: 4, delay: 0.5, editor_disable: true }))]
    #[case(TriggerKind::Touch(TouchTrigger { target_group_id: 1, hold_mode: true, dual_mode: false, toggle_type: ToggleType::ToggleOff }))]
    #[case(TriggerKind::InstantCount(InstantCountTrigger { item_id: 2, count: -3, activate_group: true, comparison: InstantCountComparison::Smaller }))]
    #[case(TriggerKind::Collision(CollisionTrigger { block_a_id: 1, block_b_id: 2, target_group_id: 3, activate_group: false, trigger_on_exit: true }))]
    #[case(TriggerKind::Rotate(RotateTrigger { target_rotation: 720.0, ..RotateTrigger::default() }))]
    fn binary_keeps_kind(#[case] kind: TriggerKind) {
        let trigger = Trigger {
            spawn_triggered: true,
            ..Trigger::new(kind)
        };
        let options = BinaryOptions::new();
        let data = to_bytes(&trigger, &options).unwrap();
        assert_eq!(data[0], 0b010);
        assert_eq!(from_bytes::<Trigger>(&data, &options).unwrap(), trigger);
    }

    #[test]
    fn unknown_kind_tag() {
        let err = from_bytes::<Trigger>(&[0, 42], &BinaryOptions::new()).unwrap_err();
        match err.kind() {
            ErrorKind::Discriminant { record, tag, offset } => {
                assert_eq!(*record, "trigger");
                assert_eq!(*tag, 42);
                assert_eq!(*offset, 1);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn object_ids_match_kinds() {
        let kind = TriggerKind::FollowPlayerY(FollowPlayerYTrigger::default());
        assert_eq!(kind.object_id(), ids::FOLLOW_PLAYER_Y_TRIGGER);
        assert_eq!(
            decode(kind.object_id(), "").map(|trigger| trigger.kind),
            Some(kind)
        );
    }
}
