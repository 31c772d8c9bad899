use super::enums::robtop_enum;
use super::{Hsv, Rgb};
use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::text::{split_list, split_pairs, Pairs, RobTopEnum, RobTopString, RobTopView};
use crate::{Error, ErrorKind};
use indexmap::IndexMap;

const SEPARATOR: char = '_';
const CHANNELS_SEPARATOR: char = '|';

const RED: &str = "1";
const GREEN: &str = "2";
const BLUE: &str = "3";
const PLAYER_COLOR: &str = "4";
const BLENDING: &str = "5";
const ID: &str = "6";
const OPACITY: &str = "7";
const OPACITY_TOGGLED: &str = "8";
const COPIED_ID: &str = "9";
const COLOR_HSV: &str = "10";
const COPY_OPACITY: &str = "17";

const RECORD: &str = "color channel";

robtop_enum! {
    /// The player color a color channel follows
    pub enum ChannelPlayer: u8 {
        #[default]
        Color1 = 1,
        Color2 = 2,
    }
}

/// A color channel following one of the player colors
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct PlayerColorChannel {
    pub id: u16,
    pub player_color: ChannelPlayer,
    pub opacity: f32,
    pub blending: bool,
}

/// A color channel with a fixed color
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct NormalColorChannel {
    pub id: u16,
    pub color: Rgb,
    pub opacity: f32,
    pub blending: bool,
}

/// A color channel deriving its color from another channel.
///
/// `opacity` is `None` when the opacity is copied as well.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct CopiedColorChannel {
    pub id: u16,
    pub copied_id: u16,
    pub hsv: Hsv,
    pub opacity: Option<f32>,
    pub blending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
#[cfg_attr(feature = "derive", serde(tag = "type", rename_all = "snake_case"))]
pub enum ColorChannel {
    Player(PlayerColorChannel),
    Normal(NormalColorChannel),
    Copied(CopiedColorChannel),
}

impl NormalColorChannel {
    pub fn new(id: u16, color: Rgb) -> Self {
        NormalColorChannel {
            id,
            color,
            opacity: 1.0,
            blending: false,
        }
    }
}

impl PlayerColorChannel {
    pub fn new(id: u16, player_color: ChannelPlayer) -> Self {
        PlayerColorChannel {
            id,
            player_color,
            opacity: 1.0,
            blending: false,
        }
    }
}

impl CopiedColorChannel {
    pub fn new(id: u16, copied_id: u16) -> Self {
        CopiedColorChannel {
            id,
            copied_id,
            hsv: Hsv::default(),
            opacity: None,
            blending: false,
        }
    }
}

fn player_color(view: RobTopView<'_, String>) -> Result<Option<ChannelPlayer>, Error> {
    let value = view.get_or::<i64>(PLAYER_COLOR, -1)?;
    Ok(ChannelPlayer::from_value(value))
}

fn read_rgb(view: RobTopView<'_, String>) -> Result<Rgb, Error> {
    Ok(Rgb::saturating(
        view.get_or(RED, 255)?,
        view.get_or(GREEN, 255)?,
        view.get_or(BLUE, 255)?,
    ))
}

impl ColorChannel {
    pub fn id(&self) -> u16 {
        match self {
            ColorChannel::Player(x) => x.id,
            ColorChannel::Normal(x) => x.id,
            ColorChannel::Copied(x) => x.id,
        }
    }

    pub fn is_blending(&self) -> bool {
        match self {
            ColorChannel::Player(x) => x.blending,
            ColorChannel::Normal(x) => x.blending,
            ColorChannel::Copied(x) => x.blending,
        }
    }

    /// Decode from a view, picking the variant from the player color and
    /// copied id keys
    pub fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        let id = view.get_or::<u16>(ID, 0)?;
        if id == 0 {
            return Err(Error::schema(RECORD, "missing color channel id"));
        }

        let opacity = view.get_or::<f32>(OPACITY, 1.0)?;
        let blending = view.get_or(BLENDING, false)?;

        if let Some(player_color) = player_color(view)? {
            return Ok(ColorChannel::Player(PlayerColorChannel {
                id,
                player_color,
                opacity,
                blending,
            }));
        }

        let copied_id = view.get_or::<u16>(COPIED_ID, 0)?;
        if copied_id != 0 {
            let hsv = match view.raw(COLOR_HSV) {
                Some(x) if !x.is_empty() => Hsv::from_robtop(x)?,
                _ => Hsv::default(),
            };
            let copy_opacity = view.get_or(COPY_OPACITY, false)?;
            return Ok(ColorChannel::Copied(CopiedColorChannel {
                id,
                copied_id,
                hsv,
                opacity: if copy_opacity { None } else { Some(opacity) },
                blending,
            }));
        }

        Ok(ColorChannel::Normal(NormalColorChannel {
            id,
            color: read_rgb(view)?,
            opacity,
            blending,
        }))
    }

    pub fn to_pairs(&self) -> Pairs {
        let mut pairs = Pairs::new();
        pairs.put(ID, self.id());
        match self {
            ColorChannel::Player(x) => {
                pairs
                    .put(PLAYER_COLOR, x.player_color.value())
                    .put(OPACITY, x.opacity)
                    .put(OPACITY_TOGGLED, true);
            }
            ColorChannel::Normal(x) => {
                pairs
                    .put(RED, x.color.r)
                    .put(GREEN, x.color.g)
                    .put(BLUE, x.color.b)
                    .put(OPACITY, x.opacity)
                    .put(OPACITY_TOGGLED, true);
            }
            ColorChannel::Copied(x) => {
                pairs
                    .put(COPIED_ID, x.copied_id)
                    .put_str(COLOR_HSV, x.hsv.to_robtop())
                    .put(COPY_OPACITY, x.opacity.is_none())
                    .put(OPACITY_TOGGLED, true);
                if let Some(opacity) = x.opacity {
                    pairs.put(OPACITY, opacity);
                }
            }
        }
        pairs.put_flag(BLENDING, self.is_blending());
        pairs
    }
}

impl RobTopString for ColorChannel {
    fn from_robtop(text: &str) -> Result<Self, Error> {
        let map = split_pairs(text, SEPARATOR);
        ColorChannel::from_view(RobTopView::new(&map))
    }

    fn to_robtop(&self) -> String {
        self.to_pairs().join(SEPARATOR)
    }
}

const PLAYER_TAG: u8 = 0;
const NORMAL_TAG: u8 = 1;
const COPIED_TAG: u8 = 2;

impl FromBinary for ColorChannel {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let offset = reader.offset();
        let tag = reader.read_u8(order)?;
        let id = reader.read_u16(order)?;
        let channel = match tag {
            PLAYER_TAG => ColorChannel::Player(PlayerColorChannel {
                id,
                player_color: ChannelPlayer::from_binary(reader, order)?,
                opacity: reader.read_f32(order)?,
                blending: reader.read_bool(order)?,
            }),
            NORMAL_TAG => ColorChannel::Normal(NormalColorChannel {
                id,
                color: Rgb::from_binary(reader, order)?,
                opacity: reader.read_f32(order)?,
                blending: reader.read_bool(order)?,
            }),
            COPIED_TAG => ColorChannel::Copied(CopiedColorChannel {
                id,
                copied_id: reader.read_u16(order)?,
                hsv: Hsv::from_binary(reader, order)?,
                opacity: Option::<f32>::from_binary(reader, order)?,
                blending: reader.read_bool(order)?,
            }),
            _ => {
                return Err(Error::new(ErrorKind::Discriminant {
                    record: RECORD,
                    tag: i64::from(tag),
                    offset,
                }))
            }
        };
        Ok(channel)
    }
}

impl ToBinary for ColorChannel {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        match self {
            ColorChannel::Player(x) => {
                writer.write_u8(PLAYER_TAG, order);
                writer.write_u16(x.id, order);
                x.player_color.to_binary(writer, order);
                writer.write_f32(x.opacity, order);
                writer.write_bool(x.blending, order);
            }
            ColorChannel::Normal(x) => {
                writer.write_u8(NORMAL_TAG, order);
                writer.write_u16(x.id, order);
                x.color.to_binary(writer, order);
                writer.write_f32(x.opacity, order);
                writer.write_bool(x.blending, order);
            }
            ColorChannel::Copied(x) => {
                writer.write_u8(COPIED_TAG, order);
                writer.write_u16(x.id, order);
                writer.write_u16(x.copied_id, order);
                x.hsv.to_binary(writer, order);
                x.opacity.to_binary(writer, order);
                writer.write_bool(x.blending, order);
            }
        }
    }
}

/// Color channels keyed by their id in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
#[cfg_attr(feature = "derive", serde(transparent))]
pub struct ColorChannels {
    channels: IndexMap<u16, ColorChannel>,
}

impl ColorChannels {
    pub fn new() -> Self {
        ColorChannels::default()
    }

    /// Insert the channel, replacing any channel with the same id in place
    pub fn insert(&mut self, channel: ColorChannel) -> Option<ColorChannel> {
        self.channels.insert(channel.id(), channel)
    }

    pub fn get(&self, id: u16) -> Option<&ColorChannel> {
        self.channels.get(&id)
    }

    pub fn remove(&mut self, id: u16) -> Option<ColorChannel> {
        self.channels.shift_remove(&id)
    }

    pub fn contains(&self, id: u16) -> bool {
        self.channels.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorChannel> {
        self.channels.values()
    }
}

impl FromIterator<ColorChannel> for ColorChannels {
    fn from_iter<I: IntoIterator<Item = ColorChannel>>(iter: I) -> Self {
        let mut result = ColorChannels::new();
        result.extend(iter);
        result
    }
}

impl Extend<ColorChannel> for ColorChannels {
    fn extend<I: IntoIterator<Item = ColorChannel>>(&mut self, iter: I) {
        for channel in iter {
            self.insert(channel);
        }
    }
}

impl RobTopString for ColorChannels {
    fn from_robtop(text: &str) -> Result<Self, Error> {
        split_list(text, CHANNELS_SEPARATOR)
            .map(ColorChannel::from_robtop)
            .collect()
    }

    fn to_robtop(&self) -> String {
        let mut out = String::new();
        for channel in self.iter() {
            out.push_str(&channel.to_robtop());
            out.push(CHANNELS_SEPARATOR);
        }
        out
    }
}

impl FromBinary for ColorChannels {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let count = reader.read_short_count(order, 4)?;
        let mut result = ColorChannels::new();
        for _ in 0..count {
            result.insert(ColorChannel::from_binary(reader, order)?);
        }
        Ok(result)
    }
}

impl ToBinary for ColorChannels {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_short_count(self.len(), order);
        for channel in self.iter() {
            channel.to_binary(writer, order);
        }
    }
}

/// A channel from the header keys of levels made before numbered channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum LegacyColorChannel {
    Player(ChannelPlayer, bool),
    Normal(Rgb, bool),
}

impl LegacyColorChannel {
    pub(crate) fn from_robtop(text: &str) -> Result<Self, Error> {
        let map = split_pairs(text, SEPARATOR);
        let view = RobTopView::new(&map);
        let blending = view.get_or(BLENDING, false)?;
        match player_color(view)? {
            Some(player) => Ok(LegacyColorChannel::Player(player, blending)),
            None => Ok(LegacyColorChannel::Normal(read_rgb(view)?, blending)),
        }
    }

    pub(crate) fn migrate(self, id: u16) -> ColorChannel {
        match self {
            LegacyColorChannel::Player(player_color, blending) => {
                ColorChannel::Player(PlayerColorChannel {
                    blending,
                    ..PlayerColorChannel::new(id, player_color)
                })
            }
            LegacyColorChannel::Normal(color, blending) => {
                ColorChannel::Normal(NormalColorChannel {
                    blending,
                    ..NormalColorChannel::new(id, color)
                })
            }
        }
    }
}
