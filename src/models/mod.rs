//! Typed records of save and level data
//!
//! Every record decodes from the RobTop form it is stored in (a separated
//! string or a property list dictionary) and round trips through the binary
//! format defined in [`crate::binary`].
mod color;
mod color_channel;
mod editor;
mod enums;
mod guidelines;
mod header;
mod hsv;
mod level;
mod like;
pub mod object;
mod recording;
mod rewards;
mod song;

pub use self::color::Rgb;
pub use self::color_channel::{
    ChannelPlayer, ColorChannel, ColorChannels, CopiedColorChannel, NormalColorChannel,
    PlayerColorChannel,
};
pub use self::editor::{objects_from_robtop, objects_to_robtop, Editor};
pub use self::enums::{
    ChestType, CollectedCoins, CommentStrategy, DemonDifficulty, Difficulty, Easing, Filter,
    GameMode, GuidelineColor, IconType, InstantCountComparison, InternalType, ItemMode,
    LegacyColorId, LevelLeaderboardStrategy, LevelLength, LevelType, LikeType, MoveTarget,
    PlayerColor, PulseMode, PulseTargetType, PulseType, Quality, QuestType, RateType,
    RewardItemType, SpecialColorId, SpecialRateType, Speed, TimelyType, ToggleType,
    TouchToggleMode,
};
pub use self::guidelines::{Guideline, Guidelines};
pub use self::header::Header;
pub use self::hsv::Hsv;
pub use self::level::{
    leaderboard_seed, Capacity, CreatedLevel, CustomLevel, DifficultyParameters, GauntletLevel,
    Level, LevelBase, LevelRecord, Levels, OfficialLevel, Password, Progress, SavedLevel,
    TimelyLevel, UserReference,
};
pub use self::like::{Folder, Like};
pub use self::object::{Object, ObjectData, Trigger, TriggerKind};
pub use self::recording::{Recording, RecordingItem};
pub use self::rewards::{Quest, Reward, RewardItem};
pub use self::song::{Artist, Song, SongReference};

/// The key holding the [`InternalType`] of property list records
pub(crate) const INTERNAL_TYPE: &str = "kCEK";
