use super::color_channel::LegacyColorChannel;
use super::{
    ChannelPlayer, ColorChannel, ColorChannels, GameMode, Guidelines, Rgb, SpecialColorId, Speed,
};
use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::text::{split_pairs, Pairs, RobTopEnum, RobTopString, RobTopView};
use crate::Error;

const SEPARATOR: char = ',';

const GAME_MODE: &str = "kA2";
const MINI_MODE: &str = "kA3";
const SPEED: &str = "kA4";
const BACKGROUND_ID: &str = "kA6";
const GROUND_ID: &str = "kA7";
const DUAL_MODE: &str = "kA8";
const START_POSITION: &str = "kA9";
const TWO_PLAYER: &str = "kA10";
const FLIP_GRAVITY: &str = "kA11";
const SONG_OFFSET: &str = "kA13";
const GUIDELINES: &str = "kA14";
const SONG_FADE_IN: &str = "kA15";
const SONG_FADE_OUT: &str = "kA16";
const GROUND_LINE_ID: &str = "kA17";
const FONT_ID: &str = "kA18";
const PLATFORMER_MODE: &str = "kA22";
const COLOR_CHANNELS: &str = "kS38";
const COLOR_CHANNELS_PAGE: &str = "kS39";

/// Whole channel strings of levels predating `kS38`
const LEGACY_CHANNELS: [(&str, u16); 9] = [
    ("kS29", SpecialColorId::Background as u16),
    ("kS30", SpecialColorId::Ground as u16),
    ("kS31", SpecialColorId::Line as u16),
    ("kS32", SpecialColorId::Object as u16),
    ("kS33", 1),
    ("kS34", 2),
    ("kS35", 3),
    ("kS36", 4),
    ("kS37", SpecialColorId::Line3d as u16),
];

/// Red, green, blue and player color keys of the oldest levels
const LEGACY_RGB: [([&str; 3], &str, u16); 5] = [
    (["kS1", "kS2", "kS3"], "kS16", SpecialColorId::Background as u16),
    (["kS4", "kS5", "kS6"], "kS17", SpecialColorId::Ground as u16),
    (["kS7", "kS8", "kS9"], "kS18", SpecialColorId::Line as u16),
    (["kS10", "kS11", "kS12"], "kS19", SpecialColorId::Object as u16),
    (["kS13", "kS14", "kS15"], "kS20", 1),
];

const MINI_MODE_BIT: u8 = 1;
const DUAL_MODE_BIT: u8 = 2;
const TWO_PLAYER_BIT: u8 = 4;
const FLIP_GRAVITY_BIT: u8 = 8;
const SONG_FADE_IN_BIT: u8 = 16;
const SONG_FADE_OUT_BIT: u8 = 32;
const PLATFORMER_MODE_BIT: u8 = 64;

/// Level wide settings stored as the first entry of a level string
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Header {
    pub game_mode: GameMode,
    pub mini_mode: bool,
    pub speed: Speed,
    pub background_id: u16,
    pub ground_id: u16,
    pub dual_mode: bool,
    pub two_player: bool,
    pub flip_gravity: bool,
    pub song_offset: f32,
    pub guidelines: Guidelines,
    pub song_fade_in: bool,
    pub song_fade_out: bool,
    pub ground_line_id: u16,
    pub font_id: u16,
    pub platformer_mode: bool,
    pub color_channels: ColorChannels,
    pub color_channels_page: u16,
}

fn legacy_rgb_channel(
    view: RobTopView<'_, String>,
    keys: [&str; 3],
    player_key: &str,
    id: u16,
) -> Result<Option<ColorChannel>, Error> {
    if !keys.iter().chain(&[player_key]).any(|key| view.contains(key)) {
        return Ok(None);
    }

    let player = view.get_option::<i64>(player_key)?.and_then(ChannelPlayer::from_value);
    let legacy = match player {
        Some(player) => LegacyColorChannel::Player(player, false),
        None => {
            let [r, g, b] = keys;
            let color = Rgb::saturating(
                view.get_or(r, 255)?,
                view.get_or(g, 255)?,
                view.get_or(b, 255)?,
            );
            LegacyColorChannel::Normal(color, false)
        }
    };
    Ok(Some(legacy.migrate(id)))
}

impl Header {
    pub fn from_view(view: RobTopView<'_, String>) -> Result<Self, Error> {
        let mut color_channels = ColorChannels::new();

        for (keys, player_key, id) in LEGACY_RGB {
            if let Some(channel) = legacy_rgb_channel(view, keys, player_key, id)? {
                color_channels.insert(channel);
            }
        }

        for (key, id) in LEGACY_CHANNELS {
            match view.raw(key) {
                Some(text) if !text.is_empty() => {
                    color_channels.insert(LegacyColorChannel::from_robtop(text)?.migrate(id));
                }
                _ => {}
            }
        }

        if let Some(text) = view.raw(COLOR_CHANNELS) {
            color_channels.extend(ColorChannels::from_robtop(text)?.iter().copied());
        }

        let guidelines = match view.raw(GUIDELINES) {
            Some(text) => Guidelines::from_robtop(text)?,
            None => Guidelines::new(),
        };

        Ok(Header {
            game_mode: view.get_enum_or(GAME_MODE, GameMode::Cube)?,
            mini_mode: view.get_or(MINI_MODE, false)?,
            speed: view.get_enum_or(SPEED, Speed::Normal)?,
            background_id: view.get_or(BACKGROUND_ID, 0)?,
            ground_id: view.get_or(GROUND_ID, 0)?,
            dual_mode: view.get_or(DUAL_MODE, false)?,
            two_player: view.get_or(TWO_PLAYER, false)?,
            flip_gravity: view.get_or(FLIP_GRAVITY, false)?,
            song_offset: view.get_or(SONG_OFFSET, 0.0)?,
            guidelines,
            song_fade_in: view.get_or(SONG_FADE_IN, false)?,
            song_fade_out: view.get_or(SONG_FADE_OUT, false)?,
            ground_line_id: view.get_or(GROUND_LINE_ID, 0)?,
            font_id: view.get_or(FONT_ID, 0)?,
            platformer_mode: view.get_or(PLATFORMER_MODE, false)?,
            color_channels,
            color_channels_page: view.get_or(COLOR_CHANNELS_PAGE, 0)?,
        })
    }

    pub fn to_pairs(&self) -> Pairs {
        let mut pairs = Pairs::new();
        pairs
            .put(GAME_MODE, self.game_mode.value())
            .put(MINI_MODE, self.mini_mode)
            .put(SPEED, self.speed.value())
            .put(BACKGROUND_ID, self.background_id)
            .put(GROUND_ID, self.ground_id)
            .put(DUAL_MODE, self.dual_mode)
            .put(START_POSITION, false)
            .put(TWO_PLAYER, self.two_player)
            .put(FLIP_GRAVITY, self.flip_gravity)
            .put(SONG_OFFSET, self.song_offset)
            .put_str(GUIDELINES, self.guidelines.to_robtop())
            .put(SONG_FADE_IN, self.song_fade_in)
            .put(SONG_FADE_OUT, self.song_fade_out)
            .put(GROUND_LINE_ID, self.ground_line_id)
            .put(FONT_ID, self.font_id)
            .put(PLATFORMER_MODE, self.platformer_mode)
            .put_str(COLOR_CHANNELS, self.color_channels.to_robtop())
            .put(COLOR_CHANNELS_PAGE, self.color_channels_page);
        pairs
    }

    fn flags(&self) -> u8 {
        let mut flags = 0;
        for (set, bit) in [
            (self.mini_mode, MINI_MODE_BIT),
            (self.dual_mode, DUAL_MODE_BIT),
            (self.two_player, TWO_PLAYER_BIT),
            (self.flip_gravity, FLIP_GRAVITY_BIT),
            (self.song_fade_in, SONG_FADE_IN_BIT),
            (self.song_fade_out, SONG_FADE_OUT_BIT),
            (self.platformer_mode, PLATFORMER_MODE_BIT),
        ] {
            if set {
                flags |= bit;
            }
        }
        flags
    }
}

impl RobTopString for Header {
    fn from_robtop(text: &str) -> Result<Self, Error> {
        let map = split_pairs(text, SEPARATOR);
        Header::from_view(RobTopView::new(&map))
    }

    fn to_robtop(&self) -> String {
        self.to_pairs().join(SEPARATOR)
    }
}

impl FromBinary for Header {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let game_mode = GameMode::from_binary(reader, order)?;
        let speed = Speed::from_binary(reader, order)?;
        let flags = reader.read_u8(order)?;
        let has = |bit: u8| flags & bit != 0;
        Ok(Header {
            game_mode,
            speed,
            mini_mode: has(MINI_MODE_BIT),
            dual_mode: has(DUAL_MODE_BIT),
            two_player: has(TWO_PLAYER_BIT),
            flip_gravity: has(FLIP_GRAVITY_BIT),
            song_fade_in: has(SONG_FADE_IN_BIT),
            song_fade_out: has(SONG_FADE_OUT_BIT),
            platformer_mode: has(PLATFORMER_MODE_BIT),
            background_id: reader.read_u16(order)?,
            ground_id: reader.read_u16(order)?,
            ground_line_id: reader.read_u16(order)?,
            font_id: reader.read_u16(order)?,
            song_offset: reader.read_f32(order)?,
            guidelines: Guidelines::from_binary(reader, order)?,
            color_channels: ColorChannels::from_binary(reader, order)?,
            color_channels_page: reader.read_u16(order)?,
        })
    }
}

impl ToBinary for Header {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.game_mode.to_binary(writer, order);
        self.speed.to_binary(writer, order);
        writer.write_u8(self.flags(), order);
        writer.write_u16(self.background_id, order);
        writer.write_u16(self.ground_id, order);
        writer.write_u16(self.ground_line_id, order);
        writer.write_u16(self.font_id, order);
        writer.write_f32(self.song_offset, order);
        self.guidelines.to_binary(writer, order);
        self.color_channels.to_binary(writer, order);
        writer.write_u16(self.color_channels_page, order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};
    use crate::models::{GuidelineColor, NormalColorChannel, PlayerColorChannel};

    #[test]
    fn text_round_trip() {
        let mut header = Header {
            game_mode: GameMode::Ship,
            speed: Speed::Faster,
            two_player: true,
            song_offset: 1.25,
            font_id: 3,
            ..Header::default()
        };
        header.guidelines.add(2.0, GuidelineColor::Yellow);
        header
            .color_channels
            .insert(ColorChannel::Normal(NormalColorChannel::new(1000, Rgb::new(0, 102, 255))));

        let text = header.to_robtop();
        assert!(text.starts_with("kA2,1,kA3,0,kA4,3,"));
        assert_eq!(Header::from_robtop(&text).unwrap(), header);
    }

    #[test]
    fn binary_round_trip() {
        let mut header = Header {
            mini_mode: true,
            platformer_mode: true,
            color_channels_page: 2,
            ..Header::default()
        };
        header
            .color_channels
            .insert(ColorChannel::Player(PlayerColorChannel::new(1005, ChannelPlayer::Color1)));
        let options = BinaryOptions::new();
        let data = to_bytes(&header, &options).unwrap();
        assert_eq!(from_bytes::<Header>(&data, &options).unwrap(), header);
    }

    #[test]
    fn legacy_channels_migrate() {
        let header = Header::from_robtop("kS1,10,kS2,20,kS3,30,kS20,2,kS33,1_40_2_50_3_60").unwrap();
        let ids: Vec<_> = header.color_channels.iter().map(|x| x.id()).collect();
        assert_eq!(ids, vec![1000, 1]);
        assert_eq!(
            header.color_channels.get(1000),
            Some(&ColorChannel::Normal(NormalColorChannel::new(1000, Rgb::new(10, 20, 30))))
        );
        assert_eq!(
            header.color_channels.get(1),
            Some(&ColorChannel::Normal(NormalColorChannel::new(1, Rgb::new(40, 50, 60))))
        );
    }

    #[test]
    fn modern_channels_win() {
        let header = Header::from_robtop("kS29,1_1_2_1_3_1,kS38,1_9_2_9_3_9_6_1000|").unwrap();
        assert_eq!(
            header.color_channels.get(1000),
            Some(&ColorChannel::Normal(NormalColorChannel::new(1000, Rgb::new(9, 9, 9))))
        );
    }
}
