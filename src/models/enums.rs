//! Closed enumerations stored as integers in both formats

/// Declare an enumeration with its integer values, text conversion and a
/// binary form of the given width. Unknown binary values are a discriminant
/// error since there is no way to represent them.
macro_rules! robtop_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident: $repr:ty {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:expr,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        #[cfg_attr(feature = "derive", derive(serde::Serialize))]
        #[repr($repr)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value,
            )*
        }

        impl $crate::text::RobTopEnum for $name {
            const NAME: &'static str = stringify!($name);

            fn from_value(value: i64) -> Option<Self> {
                match value {
                    $(x if x == $value => Some($name::$variant),)*
                    _ => None,
                }
            }

            #[inline]
            fn value(self) -> i64 {
                self as $repr as i64
            }
        }

        impl $crate::binary::FromBinary for $name {
            fn from_binary(
                reader: &mut $crate::binary::Reader<'_>,
                order: $crate::binary::ByteOrder,
            ) -> Result<Self, $crate::Error> {
                use $crate::text::RobTopEnum;
                let offset = reader.offset();
                let raw = <$repr as $crate::binary::FromBinary>::from_binary(reader, order)?;
                $name::from_value(i64::from(raw)).ok_or_else(|| {
                    $crate::Error::new($crate::ErrorKind::Discriminant {
                        record: stringify!($name),
                        tag: i64::from(raw),
                        offset,
                    })
                })
            }
        }

        impl $crate::binary::ToBinary for $name {
            #[inline]
            fn to_binary(&self, writer: &mut $crate::binary::Writer, order: $crate::binary::ByteOrder) {
                $crate::binary::ToBinary::to_binary(&(*self as $repr), writer, order)
            }
        }
    };
}

pub(crate) use robtop_enum;

robtop_enum! {
    /// Player speed at the start of a level
    pub enum Speed: u8 {
        #[default]
        Normal = 0,
        Slow = 1,
        Fast = 2,
        Faster = 3,
        Fastest = 4,
    }
}

robtop_enum! {
    pub enum GameMode: u8 {
        #[default]
        Cube = 0,
        Ship = 1,
        Ball = 2,
        Ufo = 3,
        Wave = 4,
        Robot = 5,
        Spider = 6,
    }
}

robtop_enum! {
    pub enum Easing: u8 {
        #[default]
        None = 0,
        EaseInOut = 1,
        EaseIn = 2,
        EaseOut = 3,
        ElasticInOut = 4,
        ElasticIn = 5,
        ElasticOut = 6,
        BounceInOut = 7,
        BounceIn = 8,
        BounceOut = 9,
        ExponentialInOut = 10,
        ExponentialIn = 11,
        ExponentialOut = 12,
        SineInOut = 13,
        SineIn = 14,
        SineOut = 15,
        BackInOut = 16,
        BackIn = 17,
        BackOut = 18,
    }
}

robtop_enum! {
    /// Whether a pulse applies a color or a copied HSV
    pub enum PulseMode: u8 {
        #[default]
        Color = 0,
        Hsv = 1,
    }
}

robtop_enum! {
    pub enum PulseTargetType: u8 {
        #[default]
        ColorChannel = 0,
        Group = 1,
    }
}

robtop_enum! {
    /// Which colors of a group a pulse affects
    pub enum PulseType: u8 {
        Main = 1,
        Detail = 2,
        #[default]
        Both = 3,
    }
}

impl PulseType {
    /// Exactly one of the flags selects that color, otherwise both pulse
    pub fn from_flags(main_only: bool, detail_only: bool) -> PulseType {
        if main_only ^ detail_only {
            if main_only {
                PulseType::Main
            } else {
                PulseType::Detail
            }
        } else {
            PulseType::Both
        }
    }

    pub fn is_main_only(self) -> bool {
        self == PulseType::Main
    }

    pub fn is_detail_only(self) -> bool {
        self == PulseType::Detail
    }
}

robtop_enum! {
    /// Axes a targeted move follows, stored as which axis alone is used
    pub enum MoveTarget: u8 {
        #[default]
        Both = 0,
        XOnly = 1,
        YOnly = 2,
    }
}

robtop_enum! {
    pub enum TouchToggleMode: u8 {
        #[default]
        Default = 0,
        On = 1,
        Off = 2,
    }
}

robtop_enum! {
    pub enum InstantCountComparison: u8 {
        #[default]
        Equals = 0,
        Larger = 1,
        Smaller = 2,
    }
}

robtop_enum! {
    pub enum ToggleType: u8 {
        #[default]
        Spawn = 0,
        ToggleOn = 1,
        ToggleOff = 2,
    }
}

robtop_enum! {
    pub enum ItemMode: u8 {
        #[default]
        Default = 0,
        Pickup = 1,
        Toggle = 2,
    }
}

robtop_enum! {
    /// Color ids of levels made before color channels were numbered
    pub enum LegacyColorId: u8 {
        #[default]
        Default = 0,
        Player1 = 1,
        Player2 = 2,
        Color1 = 3,
        Color2 = 4,
        LightBackground = 5,
        Color3 = 6,
        Color4 = 7,
        Line3d = 8,
    }
}

impl LegacyColorId {
    /// The modern color channel id
    pub fn migrate(self) -> u16 {
        match self {
            LegacyColorId::Default => 0,
            LegacyColorId::Player1 => SpecialColorId::Player1.id(),
            LegacyColorId::Player2 => SpecialColorId::Player2.id(),
            LegacyColorId::Color1 => 1,
            LegacyColorId::Color2 => 2,
            LegacyColorId::LightBackground => SpecialColorId::LightBackground.id(),
            LegacyColorId::Color3 => 3,
            LegacyColorId::Color4 => 4,
            LegacyColorId::Line3d => SpecialColorId::Line3d.id(),
        }
    }
}

robtop_enum! {
    /// Color channels with a fixed meaning
    pub enum SpecialColorId: u16 {
        #[default]
        Background = 1000,
        Ground = 1001,
        Line = 1002,
        Line3d = 1003,
        Object = 1004,
        Player1 = 1005,
        Player2 = 1006,
        LightBackground = 1007,
        SecondaryGround = 1009,
        Black = 1010,
        White = 1011,
        Lighter = 1012,
    }
}

impl SpecialColorId {
    pub fn id(self) -> u16 {
        self as u16
    }
}

robtop_enum! {
    /// Which player color a channel or color trigger follows.
    ///
    /// `Default` follows both and is written as both text flags.
    pub enum PlayerColor: u8 {
        Default = 0,
        Color1 = 1,
        Color2 = 2,
        #[default]
        NotUsed = 3,
    }
}

impl PlayerColor {
    /// Priority table where both flags together take precedence
    pub fn from_flags(color_1: bool, color_2: bool) -> PlayerColor {
        match (color_1, color_2) {
            (true, true) => PlayerColor::Default,
            (true, false) => PlayerColor::Color1,
            (false, true) => PlayerColor::Color2,
            (false, false) => PlayerColor::NotUsed,
        }
    }

    /// Inverse of [`PlayerColor::from_flags`]
    pub fn flags(self) -> (bool, bool) {
        match self {
            PlayerColor::Default => (true, true),
            PlayerColor::Color1 => (true, false),
            PlayerColor::Color2 => (false, true),
            PlayerColor::NotUsed => (false, false),
        }
    }

    pub fn is_used(self) -> bool {
        self != PlayerColor::NotUsed
    }
}

robtop_enum! {
    pub enum RewardItemType: u8 {
        #[default]
        Unknown = 0,
        FireShard = 1,
        IceShard = 2,
        PoisonShard = 3,
        ShadowShard = 4,
        LavaShard = 5,
        Key = 6,
        Orb = 7,
        Diamond = 8,
        Custom = 9,
    }
}

robtop_enum! {
    pub enum QuestType: u8 {
        #[default]
        Unknown = 0,
        Orbs = 1,
        Coins = 2,
        Stars = 3,
    }
}

robtop_enum! {
    pub enum ChestType: u8 {
        #[default]
        Unknown = 0,
        Small = 1,
        Large = 2,
    }
}

robtop_enum! {
    pub enum Quality: u8 {
        #[default]
        Auto = 0,
        Low = 1,
        Medium = 2,
        High = 3,
    }
}

robtop_enum! {
    pub enum LevelType: u8 {
        #[default]
        Null = 0,
        Official = 1,
        Created = 2,
        Saved = 3,
        Online = 4,
    }
}

robtop_enum! {
    /// Editor object filter
    pub enum Filter: u8 {
        #[default]
        None = 0,
        Detail = 1,
        Static = 2,
        Custom = 3,
    }
}

robtop_enum! {
    pub enum CommentStrategy: u8 {
        #[default]
        Recent = 0,
        MostLiked = 1,
    }
}

robtop_enum! {
    pub enum LevelLeaderboardStrategy: u8 {
        Friends = 0,
        #[default]
        All = 1,
        Weekly = 2,
    }
}

robtop_enum! {
    pub enum IconType: u8 {
        #[default]
        Cube = 0,
        Ship = 1,
        Ball = 2,
        Ufo = 3,
        Wave = 4,
        Robot = 5,
        Spider = 6,
        Swing = 7,
        Jetpack = 8,
    }
}

robtop_enum! {
    pub enum LevelLength: u8 {
        #[default]
        Tiny = 0,
        Short = 1,
        Medium = 2,
        Long = 3,
        Xl = 4,
        Platformer = 5,
    }
}

robtop_enum! {
    pub enum Difficulty: u8 {
        #[default]
        Unknown = 0,
        Auto = 1,
        Easy = 2,
        Normal = 3,
        Hard = 4,
        Harder = 5,
        Insane = 6,
        Demon = 7,
        EasyDemon = 8,
        MediumDemon = 9,
        HardDemon = 10,
        InsaneDemon = 11,
        ExtremeDemon = 12,
    }
}

impl Difficulty {
    pub fn is_demon(self) -> bool {
        self >= Difficulty::Demon
    }
}

robtop_enum! {
    pub enum DemonDifficulty: u8 {
        #[default]
        Demon = 0,
        EasyDemon = 1,
        MediumDemon = 2,
        HardDemon = 3,
        InsaneDemon = 4,
        ExtremeDemon = 5,
    }
}

impl DemonDifficulty {
    pub fn into_difficulty(self) -> Difficulty {
        match self {
            DemonDifficulty::Demon => Difficulty::Demon,
            DemonDifficulty::EasyDemon => Difficulty::EasyDemon,
            DemonDifficulty::MediumDemon => Difficulty::MediumDemon,
            DemonDifficulty::HardDemon => Difficulty::HardDemon,
            DemonDifficulty::InsaneDemon => Difficulty::InsaneDemon,
            DemonDifficulty::ExtremeDemon => Difficulty::ExtremeDemon,
        }
    }

    /// The demon difficulty of a demon, `None` for everything else
    pub fn from_difficulty(difficulty: Difficulty) -> Option<DemonDifficulty> {
        match difficulty {
            Difficulty::Demon => Some(DemonDifficulty::Demon),
            Difficulty::EasyDemon => Some(DemonDifficulty::EasyDemon),
            Difficulty::MediumDemon => Some(DemonDifficulty::MediumDemon),
            Difficulty::HardDemon => Some(DemonDifficulty::HardDemon),
            Difficulty::InsaneDemon => Some(DemonDifficulty::InsaneDemon),
            Difficulty::ExtremeDemon => Some(DemonDifficulty::ExtremeDemon),
            _ => None,
        }
    }
}

robtop_enum! {
    pub enum TimelyType: u8 {
        #[default]
        NotTimely = 0,
        Daily = 1,
        Weekly = 2,
        Event = 3,
    }
}

robtop_enum! {
    pub enum SpecialRateType: u8 {
        #[default]
        None = 0,
        Epic = 1,
        Legendary = 2,
        Mythic = 3,
    }
}

robtop_enum! {
    /// The `kCEK` tag of property list records
    pub enum InternalType: u8 {
        #[default]
        Level = 4,
        Song = 6,
        Quest = 7,
        RewardItem = 8,
        Reward = 9,
    }
}

robtop_enum! {
    pub enum LikeType: u8 {
        #[default]
        Level = 1,
        LevelComment = 2,
        UserComment = 3,
    }
}

/// Guideline colors are stored as floats, where values between the named
/// ones are rounded to orange or transparent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub enum GuidelineColor {
    #[default]
    Default,
    Transparent,
    Orange,
    Yellow,
    Green,
}

impl GuidelineColor {
    pub fn from_value(value: f32) -> GuidelineColor {
        if value == 0.0 {
            GuidelineColor::Default
        } else if value == 0.7 {
            GuidelineColor::Transparent
        } else if value == 0.8 {
            GuidelineColor::Orange
        } else if value == 0.9 {
            GuidelineColor::Yellow
        } else if value == 1.0 {
            GuidelineColor::Green
        } else if 0.8 < value && value < 1.0 {
            GuidelineColor::Orange
        } else {
            GuidelineColor::Transparent
        }
    }

    pub fn value(self) -> f32 {
        match self {
            GuidelineColor::Default => 0.0,
            GuidelineColor::Transparent => 0.7,
            GuidelineColor::Orange => 0.8,
            GuidelineColor::Yellow => 0.9,
            GuidelineColor::Green => 1.0,
        }
    }
}

/// Which of a level's three secret coins were collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
#[cfg_attr(feature = "derive", serde(transparent))]
pub struct CollectedCoins(u8);

impl CollectedCoins {
    pub const NONE: CollectedCoins = CollectedCoins(0);
    pub const FIRST: CollectedCoins = CollectedCoins(1);
    pub const SECOND: CollectedCoins = CollectedCoins(2);
    pub const THIRD: CollectedCoins = CollectedCoins(4);
    pub const ALL: CollectedCoins = CollectedCoins(7);

    pub fn new(first: bool, second: bool, third: bool) -> Self {
        CollectedCoins(u8::from(first) | u8::from(second) << 1 | u8::from(third) << 2)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn from_bits(bits: u8) -> Self {
        CollectedCoins(bits & Self::ALL.0)
    }

    pub fn first(self) -> bool {
        self.0 & Self::FIRST.0 != 0
    }

    pub fn second(self) -> bool {
        self.0 & Self::SECOND.0 != 0
    }

    pub fn third(self) -> bool {
        self.0 & Self::THIRD.0 != 0
    }

    pub fn contains(self, other: CollectedCoins) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for CollectedCoins {
    type Output = CollectedCoins;

    fn bitor(self, rhs: Self) -> Self::Output {
        CollectedCoins(self.0 | rhs.0)
    }
}

impl crate::binary::FromBinary for CollectedCoins {
    fn from_binary(
        reader: &mut crate::binary::Reader<'_>,
        order: crate::binary::ByteOrder,
    ) -> Result<Self, crate::Error> {
        reader.read_u8(order).map(CollectedCoins::from_bits)
    }
}

impl crate::binary::ToBinary for CollectedCoins {
    fn to_binary(&self, writer: &mut crate::binary::Writer, order: crate::binary::ByteOrder) {
        writer.write_u8(self.0, order)
    }
}

/// How far an online level got through the rating process. Each rank
/// includes the ranks below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub enum RateType {
    #[default]
    None,
    NotRated,
    Rated,
    Featured,
    Epic,
    Legendary,
    Mythic,
}

impl RateType {
    /// Derive the rank from the level's stars, score and special rate
    pub fn compute(stars: u32, score: i32, special: SpecialRateType) -> RateType {
        match special {
            SpecialRateType::Mythic => RateType::Mythic,
            SpecialRateType::Legendary => RateType::Legendary,
            SpecialRateType::Epic => RateType::Epic,
            SpecialRateType::None if score > 0 => RateType::Featured,
            SpecialRateType::None if stars > 0 => RateType::Rated,
            SpecialRateType::None => RateType::NotRated,
        }
    }

    /// The flag bits of every rank this rank includes
    pub fn bits(self) -> u8 {
        match self {
            RateType::None => 0,
            RateType::NotRated => 1,
            RateType::Rated => 3,
            RateType::Featured => 7,
            RateType::Epic => 15,
            RateType::Legendary => 31,
            RateType::Mythic => 63,
        }
    }

    /// Inverse of [`RateType::bits`]
    pub fn from_bits(bits: u8) -> Option<RateType> {
        match bits {
            0 => Some(RateType::None),
            1 => Some(RateType::NotRated),
            3 => Some(RateType::Rated),
            7 => Some(RateType::Featured),
            15 => Some(RateType::Epic),
            31 => Some(RateType::Legendary),
            63 => Some(RateType::Mythic),
            _ => None,
        }
    }

    pub fn special(self) -> SpecialRateType {
        match self {
            RateType::Epic => SpecialRateType::Epic,
            RateType::Legendary => SpecialRateType::Legendary,
            RateType::Mythic => SpecialRateType::Mythic,
            _ => SpecialRateType::None,
        }
    }
}

impl crate::binary::FromBinary for RateType {
    fn from_binary(
        reader: &mut crate::binary::Reader<'_>,
        order: crate::binary::ByteOrder,
    ) -> Result<Self, crate::Error> {
        let offset = reader.offset();
        let bits = reader.read_u8(order)?;
        RateType::from_bits(bits).ok_or_else(|| {
            crate::Error::new(crate::ErrorKind::Discriminant {
                record: "RateType",
                tag: i64::from(bits),
                offset,
            })
        })
    }
}

impl crate::binary::ToBinary for RateType {
    fn to_binary(&self, writer: &mut crate::binary::Writer, order: crate::binary::ByteOrder) {
        writer.write_u8(self.bits(), order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};
    use crate::ErrorKind;
    use rstest::*;

    #[rstest]
    #[case(true, true, PlayerColor::Default)]
    #[case(true, false, PlayerColor::Color1)]
    #[case(false, true, PlayerColor::Color2)]
    #[case(false, false, PlayerColor::NotUsed)]
    fn player_color_priority(#[case] one: bool, #[case] two: bool, #[case] expected: PlayerColor) {
        let color = PlayerColor::from_flags(one, two);
        assert_eq!(color, expected);
        assert_eq!(color.flags(), (one, two));
    }

    #[rstest]
    #[case(true, false, PulseType::Main)]
    #[case(false, true, PulseType::Detail)]
    #[case(true, true, PulseType::Both)]
    #[case(false, false, PulseType::Both)]
    fn pulse_type_xor(#[case] main: bool, #[case] detail: bool, #[case] expected: PulseType) {
        assert_eq!(PulseType::from_flags(main, detail), expected);
    }

    #[rstest]
    #[case(0.0, GuidelineColor::Default)]
    #[case(0.7, GuidelineColor::Transparent)]
    #[case(0.85, GuidelineColor::Orange)]
    #[case(0.9, GuidelineColor::Yellow)]
    #[case(0.5, GuidelineColor::Transparent)]
    #[case(1.0, GuidelineColor::Green)]
    fn guideline_rounding(#[case] value: f32, #[case] expected: GuidelineColor) {
        assert_eq!(GuidelineColor::from_value(value), expected);
    }

    #[test]
    fn legacy_colors_migrate() {
        assert_eq!(LegacyColorId::Player1.migrate(), 1005);
        assert_eq!(LegacyColorId::Color3.migrate(), 3);
        assert_eq!(LegacyColorId::Line3d.migrate(), 1003);
    }

    #[test]
    fn unknown_binary_value_is_discriminant_error() {
        let options = BinaryOptions::new();
        assert_eq!(from_bytes::<Speed>(&[2], &options).unwrap(), Speed::Fast);
        let err = from_bytes::<Speed>(&[9], &options).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Discriminant { tag: 9, offset: 0, .. }));

        let data = to_bytes(&SpecialColorId::Object, &options).unwrap();
        assert_eq!(data, vec![0xec, 0x03]);
    }

    #[test]
    fn rate_type_ranks() {
        assert_eq!(RateType::compute(0, 0, SpecialRateType::None), RateType::NotRated);
        assert_eq!(RateType::compute(10, 0, SpecialRateType::None), RateType::Rated);
        assert_eq!(RateType::compute(10, 5, SpecialRateType::None), RateType::Featured);
        assert_eq!(RateType::compute(10, 5, SpecialRateType::Epic).bits(), 15);
        assert_eq!(RateType::from_bits(31), Some(RateType::Legendary));
        assert_eq!(RateType::from_bits(2), None);
    }
}
