use super::{flag_at, keys, pack_flags, read_hsv_string, ObjectFields};
use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::models::{Hsv, PlayerColor, PulseMode, PulseTargetType, PulseType, Rgb};
use crate::text::{Pairs, RobTopEnum, RobTopString, RobTopView};
use crate::{Error, ErrorKind};

const DEFAULT_OPACITY: f32 = 1.0;

fn read_rgb(view: RobTopView<'_, String>) -> Result<Rgb, Error> {
    Ok(Rgb::saturating(
        view.get_or(keys::RED, 255)?,
        view.get_or(keys::GREEN, 255)?,
        view.get_or(keys::BLUE, 255)?,
    ))
}

fn write_rgb(pairs: &mut Pairs, color: Rgb) {
    pairs
        .put(keys::RED, color.r)
        .put(keys::GREEN, color.g)
        .put(keys::BLUE, color.b);
}

/// Changes the color of a channel over a duration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct ColorTrigger {
    pub target_channel_id: u16,
    pub duration: f32,
    pub blending: bool,
    pub mode: ColorTriggerMode,
}

impl Default for ColorTrigger {
    fn default() -> Self {
        ColorTrigger {
            target_channel_id: 0,
            duration: 0.0,
            blending: false,
            mode: ColorTriggerMode::Normal {
                color: Rgb::WHITE,
                opacity: DEFAULT_OPACITY,
            },
        }
    }
}

/// The color a color trigger applies
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub enum ColorTriggerMode {
    Player {
        player_color: PlayerColor,
        opacity: f32,
    },
    Normal {
        color: Rgb,
        opacity: f32,
    },
    /// Copy another channel with an HSV adjustment, where no opacity means
    /// the opacity is copied too
    Copied {
        copied_id: u16,
        hsv: Hsv,
        opacity: Option<f32>,
    },
}

const PLAYER_MODE: u8 = 0;
const NORMAL_MODE: u8 = 1;
const COPIED_MODE: u8 = 2;

const MODE_SHIFT: u8 = 1;
const MODE_MASK: u8 = 0b11;
const PLAYER_COLOR_SHIFT: u8 = 3;
const PLAYER_COLOR_MASK: u8 = 0b11;
const COPY_OPACITY_INDEX: u8 = 5;

impl ColorTriggerMode {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        let player_color = PlayerColor::from_flags(
            view.get_or(keys::PLAYER_COLOR_1, false)?,
            view.get_or(keys::PLAYER_COLOR_2, false)?,
        );
        let opacity = view.get_or(keys::OPACITY, DEFAULT_OPACITY)?;

        if player_color.is_used() {
            return Ok(ColorTriggerMode::Player {
                player_color,
                opacity,
            });
        }

        let copied_id: u16 = view.get_or(keys::COPIED_COLOR_ID, 0)?;
        if copied_id != 0 {
            let copy_opacity = view.get_or(keys::COPY_OPACITY, false)?;
            return Ok(ColorTriggerMode::Copied {
                copied_id,
                hsv: read_hsv_string(view, keys::COPIED_HSV)?.unwrap_or_default(),
                opacity: if copy_opacity { None } else { Some(opacity) },
            });
        }

        Ok(ColorTriggerMode::Normal {
            color: read_rgb(view)?,
            opacity,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        match *self {
            ColorTriggerMode::Player {
                player_color,
                opacity,
            } => {
                let (first, second) = player_color.flags();
                pairs
                    .put_flag(keys::PLAYER_COLOR_1, first)
                    .put_flag(keys::PLAYER_COLOR_2, second)
                    .put(keys::OPACITY, opacity);
            }
            ColorTriggerMode::Normal { color, opacity } => {
                write_rgb(pairs, color);
                pairs.put(keys::OPACITY, opacity);
            }
            ColorTriggerMode::Copied {
                copied_id,
                hsv,
                opacity,
            } => {
                pairs
                    .put(keys::COPIED_COLOR_ID, copied_id)
                    .put_str(keys::COPIED_HSV, hsv.to_robtop())
                    .put(keys::COPY_OPACITY, opacity.is_none());
                if let Some(opacity) = opacity {
                    pairs.put(keys::OPACITY, opacity);
                }
            }
        }
    }
}

impl ColorTrigger {
    fn packed(&self) -> u8 {
        let (mode, player_color, copy_opacity) = match self.mode {
            ColorTriggerMode::Player { player_color, .. } => (PLAYER_MODE, player_color as u8, false),
            ColorTriggerMode::Normal { .. } => (NORMAL_MODE, 0, false),
            ColorTriggerMode::Copied { opacity, .. } => (COPIED_MODE, 0, opacity.is_none()),
        };
        u8::from(self.blending)
            | mode << MODE_SHIFT
            | player_color << PLAYER_COLOR_SHIFT
            | u8::from(copy_opacity) << COPY_OPACITY_INDEX
    }
}

impl ObjectFields for ColorTrigger {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        Ok(ColorTrigger {
            target_channel_id: view.get_or(keys::TARGET_COLOR_ID, 0)?,
            duration: view.get_or(keys::DURATION, 0.0)?,
            blending: view.get_or(keys::BLENDING, false)?,
            mode: ColorTriggerMode::from_view(view)?,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::TARGET_COLOR_ID, self.target_channel_id)
            .put(keys::DURATION, self.duration)
            .put_flag(keys::BLENDING, self.blending);
        self.mode.write_pairs(pairs);
    }
}

impl FromBinary for ColorTrigger {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let target_channel_id = reader.read_u16(order)?;
        let duration = reader.read_f32(order)?;
        let offset = reader.offset();
        let packed = reader.read_u8(order)?;

        let mode = match (packed >> MODE_SHIFT) & MODE_MASK {
            PLAYER_MODE => {
                let value = (packed >> PLAYER_COLOR_SHIFT) & PLAYER_COLOR_MASK;
                let player_color = PlayerColor::from_value(i64::from(value))
                    .unwrap_or(PlayerColor::NotUsed);
                ColorTriggerMode::Player {
                    player_color,
                    opacity: reader.read_f32(order)?,
                }
            }
            NORMAL_MODE => ColorTriggerMode::Normal {
                color: Rgb::from_binary(reader, order)?,
                opacity: reader.read_f32(order)?,
            },
            COPIED_MODE => {
                let copied_id = reader.read_u16(order)?;
                let hsv = Hsv::from_binary(reader, order)?;
                let opacity = if flag_at(packed, COPY_OPACITY_INDEX) {
                    None
                } else {
                    Some(reader.read_f32(order)?)
                };
                ColorTriggerMode::Copied {
                    copied_id,
                    hsv,
                    opacity,
                }
            }
            tag => {
                return Err(Error::new(ErrorKind::Discriminant {
                    record: "color trigger",
                    tag: i64::from(tag),
                    offset,
                }))
            }
        };

        Ok(ColorTrigger {
            target_channel_id,
            duration,
            blending: flag_at(packed, 0),
            mode,
        })
    }
}

impl ToBinary for ColorTrigger {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u16(self.target_channel_id, order);
        writer.write_f32(self.duration, order);
        writer.write_u8(self.packed(), order);
        match self.mode {
            ColorTriggerMode::Player { opacity, .. } => writer.write_f32(opacity, order),
            ColorTriggerMode::Normal { color, opacity } => {
                color.to_binary(writer, order);
                writer.write_f32(opacity, order);
            }
            ColorTriggerMode::Copied {
                copied_id,
                hsv,
                opacity,
            } => {
                writer.write_u16(copied_id, order);
                hsv.to_binary(writer, order);
                if let Some(opacity) = opacity {
                    writer.write_f32(opacity, order);
                }
            }
        }
    }
}

/// What a pulse flashes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub enum PulseSource {
    Color(Rgb),
    Hsv { copied_id: u16, hsv: Hsv },
}

/// What a pulse applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub enum PulseTarget {
    Channel(u16),
    Group { id: u16, pulse_type: PulseType },
}

/// Briefly flashes a color over a channel or a group
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct PulseTrigger {
    pub fade_in: f32,
    pub hold: f32,
    pub fade_out: f32,
    pub exclusive: bool,
    pub source: PulseSource,
    pub target: PulseTarget,
}

impl Default for PulseTrigger {
    fn default() -> Self {
        PulseTrigger {
            fade_in: 0.0,
            hold: 0.0,
            fade_out: 0.0,
            exclusive: false,
            source: PulseSource::Color(Rgb::WHITE),
            target: PulseTarget::Channel(0),
        }
    }
}

const PULSE_TYPE_SHIFT: u8 = 3;
const PULSE_TYPE_MASK: u8 = 0b11;

impl ObjectFields for PulseTrigger {
    fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        let source = match view.get_enum_or(keys::PULSE_MODE, PulseMode::Color)? {
            PulseMode::Color => PulseSource::Color(read_rgb(view)?),
            PulseMode::Hsv => PulseSource::Hsv {
                copied_id: view.get_or(keys::COPIED_COLOR_ID, 0)?,
                hsv: read_hsv_string(view, keys::COPIED_HSV)?.unwrap_or_default(),
            },
        };

        // channel pulses store the channel under the target group key
        let id = view.get_or(keys::TARGET_GROUP_ID, 0)?;
        let target = match view.get_enum_or(keys::PULSE_TARGET_TYPE, PulseTargetType::ColorChannel)? {
            PulseTargetType::ColorChannel => PulseTarget::Channel(id),
            PulseTargetType::Group => PulseTarget::Group {
                id,
                pulse_type: PulseType::from_flags(
                    view.get_or(keys::MAIN_ONLY, false)?,
                    view.get_or(keys::DETAIL_ONLY, false)?,
                ),
            },
        };

        Ok(PulseTrigger {
            fade_in: view.get_or(keys::FADE_IN, 0.0)?,
            hold: view.get_or(keys::HOLD, 0.0)?,
            fade_out: view.get_or(keys::FADE_OUT, 0.0)?,
            exclusive: view.get_or(keys::EXCLUSIVE, false)?,
            source,
            target,
        })
    }

    fn write_pairs(&self, pairs: &mut Pairs) {
        pairs
            .put(keys::FADE_IN, self.fade_in)
            .put(keys::HOLD, self.hold)
            .put(keys::FADE_OUT, self.fade_out)
            .put_flag(keys::EXCLUSIVE, self.exclusive);

        match self.source {
            PulseSource::Color(color) => {
                write_rgb(pairs, color);
                pairs.put(keys::PULSE_MODE, PulseMode::Color.value());
            }
            PulseSource::Hsv { copied_id, hsv } => {
                pairs
                    .put(keys::COPIED_COLOR_ID, copied_id)
                    .put_str(keys::COPIED_HSV, hsv.to_robtop())
                    .put(keys::PULSE_MODE, PulseMode::Hsv.value());
            }
        }

        match self.target {
            PulseTarget::Channel(id) => {
                pairs
                    .put(keys::TARGET_GROUP_ID, id)
                    .put(keys::PULSE_TARGET_TYPE, PulseTargetType::ColorChannel.value());
            }
            PulseTarget::Group { id, pulse_type } => {
                pairs
                    .put(keys::TARGET_GROUP_ID, id)
                    .put(keys::PULSE_TARGET_TYPE, PulseTargetType::Group.value())
                    .put_flag(keys::MAIN_ONLY, pulse_type.is_main_only())
                    .put_flag(keys::DETAIL_ONLY, pulse_type.is_detail_only());
            }
        }
    }
}

impl FromBinary for PulseTrigger {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let fade_in = reader.read_f32(order)?;
        let hold = reader.read_f32(order)?;
        let fade_out = reader.read_f32(order)?;
        let offset = reader.offset();
        let flags = reader.read_u8(order)?;

        let source = if flag_at(flags, 1) {
            PulseSource::Hsv {
                copied_id: reader.read_u16(order)?,
                hsv: Hsv::from_binary(reader, order)?,
            }
        } else {
            PulseSource::Color(Rgb::from_binary(reader, order)?)
        };

        let id = reader.read_u16(order)?;
        let target = if flag_at(flags, 2) {
            let value = (flags >> PULSE_TYPE_SHIFT) & PULSE_TYPE_MASK;
            let pulse_type = PulseType::from_value(i64::from(value)).ok_or_else(|| {
                Error::new(ErrorKind::Discriminant {
                    record: "pulse type",
                    tag: i64::from(value),
                    offset,
                })
            })?;
            PulseTarget::Group { id, pulse_type }
        } else {
            PulseTarget::Channel(id)
        };

        Ok(PulseTrigger {
            fade_in,
            hold,
            fade_out,
            exclusive: flag_at(flags, 0),
            source,
            target,
        })
    }
}

impl ToBinary for PulseTrigger {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_f32(self.fade_in, order);
        writer.write_f32(self.hold, order);
        writer.write_f32(self.fade_out, order);

        let (is_group, pulse_type, id) = match self.target {
            PulseTarget::Channel(id) => (false, 0, id),
            PulseTarget::Group { id, pulse_type } => (true, pulse_type as u8, id),
        };
        let is_hsv = matches!(self.source, PulseSource::Hsv { .. });
        let flags = pack_flags(&[self.exclusive, is_hsv, is_group]) | pulse_type << PULSE_TYPE_SHIFT;
        writer.write_u8(flags, order);

        match self.source {
            PulseSource::Color(color) => color.to_binary(writer, order),
            PulseSource::Hsv { copied_id, hsv } => {
                writer.write_u16(copied_id, order);
                hsv.to_binary(writer, order);
            }
        }
        writer.write_u16(id, order);
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

    fn binary_round_trip<T: ObjectFields + PartialEq + std::fmt::Debug>(value: &T) {
        let options = BinaryOptions::new();
        let data = to_bytes(value, &options).unwrap();
        assert_eq!(&from_bytes::<T>(&data, &options).unwrap(), value);
    }

    #[test]
    fn both_player_colors_mean_default() {
        let trigger = ColorTrigger {
            target_channel_id: 1000,
            mode: ColorTriggerMode::Player {
                player_color: PlayerColor::Default,
                opacity: 1.0,
            },
            ..ColorTrigger::default()
        };
        let text = encode(&trigger);
        assert_eq!(text, "23,1000,10,0,15,1,16,1,35,1");
        assert_eq!(decode::<ColorTrigger>(&text), trigger);
        binary_round_trip(&trigger);
    }

    #[rstest]
    #[case("15,1", PlayerColor::Color1)]
    #[case("16,1", PlayerColor::Color2)]
    #[case("15,1,16,1", PlayerColor::Default)]
    fn player_color_priority(#[case] text: &str, #[case] expected: PlayerColor) {
        let trigger: ColorTrigger = decode(text);
        assert!(matches!(
            trigger.mode,
            ColorTriggerMode::Player { player_color, .. } if player_color == expected
        ));
    }

    #[test]
    fn copied_channel_without_opacity() {
        let trigger: ColorTrigger = decode("23,3,50,5,49,10a1a1a0a0,60,1,35,0.5,17,1");
        assert!(trigger.blending);
        assert_eq!(
            trigger.mode,
            ColorTriggerMode::Copied {
                copied_id: 5,
                hsv: Hsv::new(10, 1.0, 1.0, false, false),
                opacity: None,
            }
        );
        assert_eq!(encode(&trigger), "23,3,10,0,17,1,50,5,49,10a1a1a0a0,60,1");
        binary_round_trip(&trigger);
    }

    #[test]
    fn normal_color_defaults_to_white() {
        let trigger: ColorTrigger = decode("23,1");
        assert_eq!(
            trigger.mode,
            ColorTriggerMode::Normal {
                color: Rgb::WHITE,
                opacity: 1.0
            }
        );
        binary_round_trip(&trigger);
    }

    #[rstest]
    #[case("65,1", PulseType::Main)]
    #[case("66,1", PulseType::Detail)]
    #[case("65,1,66,1", PulseType::Both)]
    #[case("", PulseType::Both)]
    fn pulse_group_type(#[case] flags: &str, #[case] expected: PulseType) {
        let text = format!("45,0.5,48,1,50,3,51,12,52,1,{}", flags);
        let pulse: PulseTrigger = decode(&text);
        assert_eq!(
            pulse.target,
            PulseTarget::Group {
                id: 12,
                pulse_type: expected
            }
        );
        assert!(matches!(pulse.source, PulseSource::Hsv { copied_id: 3, .. }));
        assert_eq!(decode::<PulseTrigger>(&encode(&pulse)), pulse);
        binary_round_trip(&pulse);
    }

    #[test]
    fn pulse_channel_uses_group_key() {
        let pulse: PulseTrigger = decode("7,255,8,0,9,0,51,1004");
        assert_eq!(pulse.target, PulseTarget::Channel(1004));
        assert_eq!(pulse.source, PulseSource::Color(Rgb::new(255, 0, 0)));
        assert_eq!(
            encode(&pulse),
            "45,0,46,0,47,0,7,255,8,0,9,0,48,0,51,1004,52,0"
        );
        binary_round_trip(&pulse);
    }
}
