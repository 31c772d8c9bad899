use super::{flag_at, keys, pack_flags, ObjectFields};
use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::models::{Easing, MoveTarget};
use crate::text::{Pairs, RobTopEnum, RobTopView};
use crate::util::divmod_f32;
use crate::Error;

const DEFAULT_EASING_RATE: f32 = 2.0;
const FULL_ROTATION: f32 = 360.0;

/// How a movement accelerates
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct EasingSettings {
    pub easing: Easing,
    pub rate: f32,
}

impl Default for EasingSettings {
    fn default() -> Self {
        EasingSettings {
            easing: Easing::None,
            rate: DEFAULT_EASING_RATE,
        }
    }
}

impl ObjectFields for EasingSettings {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(EasingSettings {
            easing: view.get_enum_or(keys::EASING, Easing::None)?,
            rate: view.get_or(keys::EASING_RATE, DEFAULT_EASING_RATE)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::EASING, self.easing.value())
            .put(keys::EASING_RATE, self.rate);
    }
}

impl FromBinary for EasingSettings {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(EasingSettings {
            easing: Easing::from_binary(reader, order)?,
            rate: reader.read_f32(order)?,
        })
    }
}

impl ToBinary for EasingSettings {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.easing.to_binary(writer, order);
        writer.write_f32(self.rate, order);
    }
}

/// Either a fixed offset or a move towards another group
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub enum MoveMode {
    Offset {
        x_offset: f32,
        y_offset: f32,
        locked_to_player_x: bool,
        locked_to_player_y: bool,
    },
    Target {
        additional_group_id: u16,
        target: MoveTarget,
    },
}

impl Default for MoveMode {
    fn default() -> Self {
        MoveMode::Offset {
            x_offset: 0.0,
            y_offset: 0.0,
            locked_to_player_x: false,
            locked_to_player_y: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct MoveTrigger {
    pub target_group_id: u16,
    pub duration: f32,
    pub easing: EasingSettings,
    pub mode: MoveMode,
}

impl ObjectFields for MoveTrigger {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        let mode = if view.get_or(keys::USE_TARGET, false)? {
            MoveMode::Target {
                additional_group_id: view.get_or(keys::ADDITIONAL_GROUP_ID, 0)?,
                target: view.get_enum_or(keys::TARGET_TYPE, MoveTarget::Both)?,
            }
        } else {
            MoveMode::Offset {
                x_offset: view.get_or(keys::X_OFFSET, 0.0)?,
                y_offset: view.get_or(keys::Y_OFFSET, 0.0)?,
                locked_to_player_x: view.get_or(keys::LOCKED_TO_PLAYER_X, false)?,
                locked_to_player_y: view.get_or(keys::LOCKED_TO_PLAYER_Y, false)?,
            }
        };

        Ok(MoveTrigger {
            target_group_id: view.get_or(keys::TARGET_GROUP_ID, 0)?,
            duration: view.get_or(keys::DURATION, 0.0)?,
            easing: EasingSettings::from_view(view)?,
            mode,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs.put(keys::DURATION, self.duration);
        self.easing.write_pairs(pairs);
        pairs.put(keys::TARGET_GROUP_ID, self.target_group_id);

        match self.mode {
            MoveMode::Offset {
                x_offset,
                y_offset,
                locked_to_player_x,
                locked_to_player_y,
            } => {
                pairs
                    .put(keys::X_OFFSET, x_offset)
                    .put(keys::Y_OFFSET, y_offset)
                    .put_flag(keys::LOCKED_TO_PLAYER_X, locked_to_player_x)
                    .put_flag(keys::LOCKED_TO_PLAYER_Y, locked_to_player_y);
            }
            MoveMode::Target {
                additional_group_id,
                target,
            } => {
                pairs
                    .put(keys::ADDITIONAL_GROUP_ID, additional_group_id)
                    .put(keys::TARGET_TYPE, target.value())
                    .put(keys::USE_TARGET, true);
            }
        }
    }
}

impl FromBinary for MoveTrigger {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let target_group_id = reader.read_u16(order)?;
        let duration = reader.read_f32(order)?;
        let easing = EasingSettings::from_binary(reader, order)?;
        let flags = reader.read_u8(order)?;

        let mode = if flag_at(flags, 0) {
            MoveMode::Target {
                additional_group_id: reader.read_u16(order)?,
                target: MoveTarget::from_binary(reader, order)?,
            }
        } else {
            MoveMode::Offset {
                x_offset: reader.read_f32(order)?,
                y_offset: reader.read_f32(order)?,
                locked_to_player_x: flag_at(flags, 1),
                locked_to_player_y: flag_at(flags, 2),
            }
        };

        Ok(MoveTrigger {
            target_group_id,
            duration,
            easing,
            mode,
        })
    }
}

impl ToBinary for MoveTrigger {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u16(self.target_group_id, order);
        writer.write_f32(self.duration, order);
        self.easing.to_binary(writer, order);

        match self.mode {
            MoveMode::Offset {
                x_offset,
                y_offset,
                locked_to_player_x,
                locked_to_player_y,
            } => {
                let flags = pack_flags(&[false, locked_to_player_x, locked_to_player_y]);
                writer.write_u8(flags, order);
                writer.write_f32(x_offset, order);
                writer.write_f32(y_offset, order);
            }
            MoveMode::Target {
                additional_group_id,
                target,
            } => {
                writer.write_u8(pack_flags(&[true]), order);
                writer.write_u16(additional_group_id, order);
                target.to_binary(writer, order);
            }
        }
    }
}

/// Rotates a group around the center of another
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct RotateTrigger {
    pub target_group_id: u16,
    pub additional_group_id: u16,
    pub duration: f32,
    pub easing: EasingSettings,
    /// Degrees, where every full turn is stored separately in text
    pub target_rotation: f32,
    pub rotation_locked: bool,
}

impl ObjectFields for RotateTrigger {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        let rotations: f32 = view.get_or(keys::ROTATIONS, 0.0)?;
        let degrees: f32 = view.get_or(keys::DEGREES, 0.0)?;
        Ok(RotateTrigger {
            target_group_id: view.get_or(keys::TARGET_GROUP_ID, 0)?,
            additional_group_id: view.get_or(keys::ADDITIONAL_GROUP_ID, 0)?,
            duration: view.get_or(keys::DURATION, 0.0)?,
            easing: EasingSettings::from_view(view)?,
            target_rotation: rotations * FULL_ROTATION + degrees,
            rotation_locked: view.get_or(keys::ROTATION_LOCKED, false)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        let (rotations, degrees) = divmod_f32(self.target_rotation, FULL_ROTATION);
        pairs
            .put(keys::DURATION, self.duration)
            .put(keys::TARGET_GROUP_ID, self.target_group_id)
            .put(keys::ADDITIONAL_GROUP_ID, self.additional_group_id);
        self.easing.write_pairs(pairs);
        pairs
            .put(keys::ROTATIONS, rotations)
            .put(keys::DEGREES, degrees)
            .put_flag(keys::ROTATION_LOCKED, self.rotation_locked);
    }
}

impl FromBinary for RotateTrigger {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(RotateTrigger {
            target_group_id: reader.read_u16(order)?,
            additional_group_id: reader.read_u16(order)?,
            duration: reader.read_f32(order)?,
            easing: EasingSettings::from_binary(reader, order)?,
            target_rotation: reader.read_f32(order)?,
            rotation_locked: reader.read_bool(order)?,
        })
    }
}

impl ToBinary for RotateTrigger {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u16(self.target_group_id, order);
        writer.write_u16(self.additional_group_id, order);
        writer.write_f32(self.duration, order);
        self.easing.to_binary(writer, order);
        writer.write_f32(self.target_rotation, order);
        writer.write_bool(self.rotation_locked, order);
    }
}

const DEFAULT_MODIFIER: f32 = 1.0;

/// Makes a group copy the movement of another, scaled per axis
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct FollowTrigger {
    pub target_group_id: u16,
    pub additional_group_id: u16,
    pub duration: f32,
    pub easing: EasingSettings,
    pub x_modifier: f32,
    pub y_modifier: f32,
}

impl Default for FollowTrigger {
    fn default() -> Self {
        FollowTrigger {
            target_group_id: 0,
            additional_group_id: 0,
            duration: 0.0,
            easing: EasingSettings::default(),
            x_modifier: DEFAULT_MODIFIER,
            y_modifier: DEFAULT_MODIFIER,
        }
    }
}

impl ObjectFields for FollowTrigger {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(FollowTrigger {
            target_group_id: view.get_or(keys::TARGET_GROUP_ID, 0)?,
            additional_group_id: view.get_or(keys::ADDITIONAL_GROUP_ID, 0)?,
            duration: view.get_or(keys::DURATION, 0.0)?,
            easing: EasingSettings::from_view(view)?,
            x_modifier: view.get_or(keys::X_MODIFIER, DEFAULT_MODIFIER)?,
            y_modifier: view.get_or(keys::Y_MODIFIER, DEFAULT_MODIFIER)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::DURATION, self.duration)
            .put(keys::TARGET_GROUP_ID, self.target_group_id)
            .put(keys::ADDITIONAL_GROUP_ID, self.additional_group_id);
        self.easing.write_pairs(pairs);
        pairs
            .put(keys::X_MODIFIER, self.x_modifier)
            .put(keys::Y_MODIFIER, self.y_modifier);
    }
}

impl FromBinary for FollowTrigger {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(FollowTrigger {
            target_group_id: reader.read_u16(order)?,
            additional_group_id: reader.read_u16(order)?,
            duration: reader.read_f32(order)?,
            easing: EasingSettings::from_binary(reader, order)?,
            x_modifier: reader.read_f32(order)?,
            y_modifier: reader.read_f32(order)?,
        })
    }
}

impl ToBinary for FollowTrigger {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u16(self.target_group_id, order);
        writer.write_u16(self.additional_group_id, order);
        writer.write_f32(self.duration, order);
        self.easing.to_binary(writer, order);
        writer.write_f32(self.x_modifier, order);
        writer.write_f32(self.y_modifier, order);
    }
}

const DEFAULT_SPEED: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct FollowPlayerYTrigger {
    pub target_group_id: u16,
    pub duration: f32,
    pub delay: f32,
    pub speed: f32,
    pub max_speed: f32,
    pub offset: f32,
}

impl Default for FollowPlayerYTrigger {
    fn default() -> Self {
        FollowPlayerYTrigger {
            target_group_id: 0,
            duration: 0.0,
            delay: 0.0,
            speed: DEFAULT_SPEED,
            max_speed: 0.0,
            offset: 0.0,
        }
    }
}

impl ObjectFields for FollowPlayerYTrigger {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(FollowPlayerYTrigger {
            target_group_id: view.get_or(keys::TARGET_GROUP_ID, 0)?,
            duration: view.get_or(keys::DURATION, 0.0)?,
            delay: view.get_or(keys::FOLLOW_DELAY, 0.0)?,
            speed: view.get_or(keys::SPEED, DEFAULT_SPEED)?,
            max_speed: view.get_or(keys::MAX_SPEED, 0.0)?,
            offset: view.get_or(keys::OFFSET, 0.0)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::TARGET_GROUP_ID, self.target_group_id)
            .put(keys::DURATION, self.duration)
            .put(keys::FOLLOW_DELAY, self.delay)
            .put(keys::SPEED, self.speed)
            .put(keys::MAX_SPEED, self.max_speed)
            .put(keys::OFFSET, self.offset);
    }
}

impl FromBinary for FollowPlayerYTrigger {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(FollowPlayerYTrigger {
            target_group_id: reader.read_u16(order)?,
            duration: reader.read_f32(order)?,
            delay: reader.read_f32(order)?,
            speed: reader.read_f32(order)?,
            max_speed: reader.read_f32(order)?,
            offset: reader.read_f32(order)?,
        })
    }
}

impl ToBinary for FollowPlayerYTrigger {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u16(self.target_group_id, order);
        writer.write_f32(self.duration, order);
        writer.write_f32(self.delay, order);
        writer.write_f32(self.speed, order);
        writer.write_f32(self.max_speed, order);
        writer.write_f32(self.offset, order);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct ShakeTrigger {
    pub duration: f32,
    pub strength: f32,
    pub interval: f32,
}

impl ObjectFields for ShakeTrigger {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(ShakeTrigger {
            duration: view.get_or(keys::DURATION, 0.0)?,
            strength: view.get_or(keys::STRENGTH, 0.0)?,
            interval: view.get_or(keys::INTERVAL, 0.0)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::DURATION, self.duration)
            .put(keys::STRENGTH, self.strength)
            .put(keys::INTERVAL, self.interval);
    }
}

impl FromBinary for ShakeTrigger {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(ShakeTrigger {
            duration: reader.read_f32(order)?,
            strength: reader.read_f32(order)?,
            interval: reader.read_f32(order)?,
        })
    }
}

impl ToBinary for ShakeTrigger {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_f32(self.duration, order);
        writer.write_f32(self.strength, order);
        writer.write_f32(self.interval, order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};
    use crate::text::split_pairs;
    use rstest::*;

    fn decode<T: ObjectFields>(text: &str) -> T {
        let map = split_pairs(text, ',');
        T::from_view(RobTopView::new(&map)).unwrap()
    }

    fn encode<T: ObjectFields>(value: &T) -> String {
        let mut pairs = Pairs::new();
        value.write_pairs(&mut pairs);
        pairs.join(',')
    }

    #[test]
    fn move_dispatches_on_use_target() {
        let trigger: MoveTrigger = decode("10,0.5,51,3,71,4,100,1,101,2,30,3");
        assert_eq!(trigger.easing.easing, Easing::EaseOut);
        assert_eq!(trigger.easing.rate, 2.0);
        assert_eq!(
            trigger.mode,
            MoveMode::Target {
                additional_group_id: 4,
                target: MoveTarget::YOnly
            }
        );
        assert_eq!(encode(&trigger), "10,0.5,30,3,85,2,51,3,71,4,101,2,100,1");

        let offset: MoveTrigger = decode("28,30,29,-60,58,1");
        assert_eq!(
            offset.mode,
            MoveMode::Offset {
                x_offset: 30.0,
                y_offset: -60.0,
                locked_to_player_x: true,
                locked_to_player_y: false
            }
        );
    }

    #[rstest]
    #[case(MoveMode::default())]
    #[case(MoveMode::Offset { x_offset: 1.5, y_offset: 0.0, locked_to_player_x: false, locked_to_player_y: true })]
    #[case(MoveMode::Target { additional_group_id: 7, target: MoveTarget::XOnly })]
    fn move_binary(#[case] mode: MoveMode) {
        let trigger = MoveTrigger {
            target_group_id: 2,
            duration: 1.0,
            mode,
            ..MoveTrigger::default()
        };
        let options = BinaryOptions::new();
        let data = to_bytes(&trigger, &options).unwrap();
        assert_eq!(from_bytes::<MoveTrigger>(&data, &options).unwrap(), trigger);
    }

    #[rstest]
    #[case(0.0, "0", "0")]
    #[case(450.0, "1", "90")]
    #[case(-90.0, "-1", "270")]
    fn rotation_splits_full_turns(#[case] rotation: f32, #[case] turns: &str, #[case] degrees: &str) {
        let trigger = RotateTrigger {
            target_rotation: rotation,
            ..RotateTrigger::default()
        };
        let text = encode(&trigger);
        let map = split_pairs(&text, ',');
        assert_eq!(map[keys::ROTATIONS], turns);
        assert_eq!(map[keys::DEGREES], degrees);
        assert_eq!(decode::<RotateTrigger>(&text), trigger);
    }

    #[test]
    fn follow_modifiers_default_to_one() {
        let trigger: FollowTrigger = decode("51,1,71,2");
        assert_eq!(trigger.x_modifier, 1.0);
        assert_eq!(trigger.y_modifier, 1.0);
        let player_y: FollowPlayerYTrigger = decode("51,1");
        assert_eq!(player_y.speed, 1.0);
    }
}
