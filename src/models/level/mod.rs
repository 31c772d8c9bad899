//! Levels stored in the save, keyed by `k`-prefixed numbers
//!
//! Every kind of level shares the fields of [`LevelBase`]. Custom levels
//! (created in the editor or downloaded) add the fields of [`CustomLevel`],
//! and downloaded levels the fields of [`SavedLevel`] on top of that.
//!
//! ```
//! use robtop::models::{Level, OfficialLevel, Difficulty};
//! use robtop::plist::PlistRecord;
//!
//! let mut level = OfficialLevel::default();
//! level.base.id = 1;
//! level.base.name = String::from("Stereo Madness");
//! level.difficulty = Difficulty::Easy;
//!
//! let dict = level.to_plist();
//! assert_eq!(dict["k7"], 1.into());
//! assert_eq!(dict["k21"], 1.into());
//!
//! let decoded = Level::from_value(&dict.into(), "level").unwrap();
//! assert_eq!(decoded, Level::Official(level));
//! ```
mod difficulty;
mod lists;
mod password;

pub use self::difficulty::DifficultyParameters;
pub use self::lists::{Capacity, Progress};
pub use self::password::Password;

use super::object::{flag_at, pack_flags};
use super::{
    CollectedCoins, Difficulty, InternalType, LevelLength, LevelType, RateType, Recording,
    SongReference, SpecialRateType, INTERNAL_TYPE,
};
use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::plist::{array_from_values, Dict, PlistRecord, Value, ARRAY_KEY};
use crate::text::{decode_base64_str, encode_base64, RobTopEnum, RobTopString, RobTopView, TimelyId};
use crate::{Error, ErrorKind, RobTopVersion};
use indexmap::IndexMap;

const ID: &str = "k1";
const NAME: &str = "k2";
const DESCRIPTION: &str = "k3";
const DATA: &str = "k4";
const CREATOR_NAME: &str = "k5";
const CREATOR_ID: &str = "k6";
const DIRECT_DIFFICULTY: &str = "k7";
const OFFICIAL_SONG_ID: &str = "k8";
const DIFFICULTY_DENOMINATOR: &str = "k9";
const DIFFICULTY_NUMERATOR: &str = "k10";
const DOWNLOADS: &str = "k11";
const VERIFIED: &str = "k14";
const UPLOADED: &str = "k15";
const VERSION: &str = "k16";
const GAME_VERSION: &str = "k17";
const ATTEMPTS: &str = "k18";
const NORMAL_RECORD: &str = "k19";
const PRACTICE_RECORD: &str = "k20";
const TYPE: &str = "k21";
const RATING: &str = "k22";
const LENGTH: &str = "k23";
const DEMON: &str = "k25";
const STARS: &str = "k26";
const SCORE: &str = "k27";
const AUTO: &str = "k33";
const RECORDING: &str = "k34";
const HIDDEN: &str = "k35";
const JUMPS: &str = "k36";
const REQUIRED_COINS: &str = "k37";
const PASSWORD: &str = "k41";
const ORIGINAL_ID: &str = "k42";
const TWO_PLAYER: &str = "k43";
const SONG_ID: &str = "k45";
const REVISION: &str = "k46";
const OBJECT_COUNT: &str = "k48";
const BINARY_VERSION: &str = "k50";
const CREATOR_ACCOUNT_ID: &str = "k60";
const FIRST_COIN: &str = "k61";
const SECOND_COIN: &str = "k62";
const THIRD_COIN: &str = "k63";
const COINS: &str = "k64";
const VERIFIED_COINS: &str = "k65";
const REQUESTED_STARS: &str = "k66";
const CAPACITY: &str = "k67";
const HIGH_OBJECT_COUNT: &str = "k69";
const ORB_PERCENTAGE: &str = "k71";
const LOW_DETAIL: &str = "k72";
const LOW_DETAIL_TOGGLED: &str = "k73";
const TIMELY_ID: &str = "k74";
const SPECIAL_RATE_TYPE: &str = "k75";
const DEMON_DIFFICULTY: &str = "k76";
const GAUNTLET: &str = "k77";
const UNLISTED: &str = "k79";
const EDITOR_SECONDS: &str = "k80";
const COPIES_SECONDS: &str = "k81";
const FAVORITE: &str = "k82";
const ORDER: &str = "k83";
const FOLDER_ID: &str = "k84";
const BEST_CLICKS: &str = "k85";
const BEST_SECONDS: &str = "k86";
const LEADERBOARD_SEED: &str = "k87";
const PROGRESS: &str = "k88";
const CHECK: &str = "k89";
const LEADERBOARD_RECORD: &str = "k90";

const CHECK_MULTIPLY: i64 = 1482;
const CLICKS_ADD: i64 = 3991;
const RECORD_ADD: i64 = 8354;
const SECONDS_ADD: i64 = 4085;
const TOTAL_SUBTRACT: i64 = 50_028_039;

const OFFICIAL_TAG: u8 = 0;
const CREATED_TAG: u8 = 1;
const SAVED_TAG: u8 = 2;
const TIMELY_TAG: u8 = 3;
const GAUNTLET_TAG: u8 = 4;

const RECORD: &str = "level";

fn put(dict: &mut Dict, key: &str, value: impl Into<Value>) {
    dict.insert(key.to_string(), value.into());
}

/// The seed the game checks a leaderboard submission against
pub fn leaderboard_seed(clicks: u32, record: u8, seconds: u32, check: bool) -> i64 {
    let seconds = i64::from(seconds) + SECONDS_ADD;
    CHECK_MULTIPLY * i64::from(check)
        + (i64::from(clicks) + CLICKS_ADD) * (i64::from(record) + RECORD_ADD)
        + seconds * seconds
        - TOTAL_SUBTRACT
}

/// Fields every level has
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct LevelBase {
    pub id: u32,
    pub name: String,
    pub version: u32,
    pub attempts: u32,
    pub normal_record: u8,
    pub practice_record: u8,
    pub stars: u8,
    pub jumps: u32,
    pub binary_version: RobTopVersion,
    pub coins: u8,
    pub capacity: Capacity,
    pub orb_percentage: u8,
    pub best_clicks: u32,
    pub best_seconds: u32,
    pub progress: Progress,
    pub check: bool,
    pub leaderboard_record: u8,
}

impl Default for LevelBase {
    fn default() -> Self {
        LevelBase {
            id: 0,
            name: String::new(),
            version: 1,
            attempts: 0,
            normal_record: 0,
            practice_record: 0,
            stars: 0,
            jumps: 0,
            binary_version: RobTopVersion::CURRENT_BINARY,
            coins: 0,
            capacity: Capacity::default(),
            orb_percentage: 0,
            best_clicks: 0,
            best_seconds: 0,
            progress: Progress::default(),
            check: false,
            leaderboard_record: 0,
        }
    }
}

impl LevelBase {
    pub fn leaderboard_seed(&self) -> i64 {
        leaderboard_seed(
            self.best_clicks,
            self.leaderboard_record,
            self.best_seconds,
            self.check,
        )
    }

    fn from_view(view: RobTopView<'_, Value>) -> Result<Self, Error> {
        let binary_version = view
            .get_option::<i64>(BINARY_VERSION)?
            .map_or(RobTopVersion::CURRENT_BINARY, RobTopVersion::from_value);

        Ok(LevelBase {
            id: view.get_or_default(ID)?,
            name: view.get_string(NAME),
            version: view.get_or(VERSION, 1)?,
            attempts: view.get_or_default(ATTEMPTS)?,
            normal_record: view.get_or_default(NORMAL_RECORD)?,
            practice_record: view.get_or_default(PRACTICE_RECORD)?,
            stars: view.get_or_default(STARS)?,
            jumps: view.get_or_default(JUMPS)?,
            binary_version,
            coins: view.get_or_default(COINS)?,
            capacity: Capacity::from_robtop(&view.get_string(CAPACITY))?,
            orb_percentage: view.get_or_default(ORB_PERCENTAGE)?,
            best_clicks: view.get_or_default(BEST_CLICKS)?,
            best_seconds: view.get_or_default(BEST_SECONDS)?,
            progress: Progress::from_robtop(&view.get_string(PROGRESS))?,
            check: view.get_or_default(CHECK)?,
            leaderboard_record: view.get_or_default(LEADERBOARD_RECORD)?,
        })
    }

    fn write(&self, level_type: LevelType, dict: &mut Dict) {
        put(dict, INTERNAL_TYPE, InternalType::Level.value());
        put(dict, TYPE, level_type.value());
        put(dict, ID, self.id);
        put(dict, NAME, self.name.as_str());
        put(dict, VERSION, self.version);
        put(dict, ATTEMPTS, self.attempts);
        put(dict, NORMAL_RECORD, self.normal_record);
        put(dict, PRACTICE_RECORD, self.practice_record);
        put(dict, STARS, self.stars);
        put(dict, JUMPS, self.jumps);
        put(dict, BINARY_VERSION, self.binary_version.to_value());
        put(dict, COINS, self.coins);
        put(dict, CAPACITY, self.capacity.to_robtop());
        put(dict, ORB_PERCENTAGE, self.orb_percentage);
        put(dict, BEST_CLICKS, self.best_clicks);
        put(dict, BEST_SECONDS, self.best_seconds);
        put(dict, PROGRESS, self.progress.to_robtop());
        put(dict, CHECK, self.check);
        put(dict, LEADERBOARD_RECORD, self.leaderboard_record);
        put(dict, LEADERBOARD_SEED, self.leaderboard_seed());
    }
}

impl FromBinary for LevelBase {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(LevelBase {
            id: reader.read_u32(order)?,
            name: reader.read_string(order)?,
            version: reader.read_u32(order)?,
            attempts: reader.read_u32(order)?,
            normal_record: reader.read_u8(order)?,
            practice_record: reader.read_u8(order)?,
            stars: reader.read_u8(order)?,
            jumps: reader.read_u32(order)?,
            binary_version: RobTopVersion::from_binary(reader, order)?,
            coins: reader.read_u8(order)?,
            capacity: Capacity::from_binary(reader, order)?,
            orb_percentage: reader.read_u8(order)?,
            best_clicks: reader.read_u32(order)?,
            best_seconds: reader.read_u32(order)?,
            progress: Progress::from_binary(reader, order)?,
            check: reader.read_bool(order)?,
            leaderboard_record: reader.read_u8(order)?,
        })
    }
}

impl ToBinary for LevelBase {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u32(self.id, order);
        writer.write_string(&self.name, order);
        writer.write_u32(self.version, order);
        writer.write_u32(self.attempts, order);
        writer.write_u8(self.normal_record, order);
        writer.write_u8(self.practice_record, order);
        writer.write_u8(self.stars, order);
        writer.write_u32(self.jumps, order);
        self.binary_version.to_binary(writer, order);
        writer.write_u8(self.coins, order);
        self.capacity.to_binary(writer, order);
        writer.write_u8(self.orb_percentage, order);
        writer.write_u32(self.best_clicks, order);
        writer.write_u32(self.best_seconds, order);
        self.progress.to_binary(writer, order);
        writer.write_bool(self.check, order);
        writer.write_u8(self.leaderboard_record, order);
    }
}

/// A level shipped with the game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct OfficialLevel {
    pub base: LevelBase,
    pub difficulty: Difficulty,
    pub required_coins: u8,
}

/// Official levels store the difficulty directly, one below the
/// [`Difficulty`] value, with every demon folded into a single value
fn official_difficulty(view: RobTopView<'_, Value>) -> Result<Difficulty, Error> {
    let direct = match view.get_option::<i64>(DIRECT_DIFFICULTY)? {
        Some(direct) => direct,
        None => return Ok(Difficulty::Unknown),
    };

    if view.get_or_default::<bool>(DEMON)? {
        return match view.get_option::<u8>(DEMON_DIFFICULTY)? {
            None => Ok(Difficulty::Demon),
            Some(demon_value) => Ok(DifficultyParameters {
                demon_value,
                demon: true,
                ..DifficultyParameters::default()
            }
            .into_difficulty()),
        };
    }

    Difficulty::from_value(direct + 1)
        .ok_or_else(|| Error::token(DIRECT_DIFFICULTY, &direct.to_string(), Difficulty::NAME))
}

impl PlistRecord for OfficialLevel {
    fn from_plist(view: RobTopView<'_, Value>) -> Result<Self, Error> {
        Ok(OfficialLevel {
            base: LevelBase::from_view(view)?,
            difficulty: official_difficulty(view)?,
            required_coins: view.get_or_default(REQUIRED_COINS)?,
        })
    }

    fn to_plist(&self) -> Dict {
        let parameters = DifficultyParameters::from_difficulty(self.difficulty);
        let direct = if self.difficulty.is_demon() {
            Difficulty::Demon
        } else {
            self.difficulty
        };

        let mut dict = Dict::new();
        self.base.write(LevelType::Official, &mut dict);
        put(&mut dict, DIRECT_DIFFICULTY, direct.value() - 1);
        put(&mut dict, AUTO, parameters.auto);
        put(&mut dict, DEMON, parameters.demon);
        put(&mut dict, DEMON_DIFFICULTY, parameters.demon_value);
        put(&mut dict, REQUIRED_COINS, self.required_coins);
        dict
    }
}

impl FromBinary for OfficialLevel {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(OfficialLevel {
            base: LevelBase::from_binary(reader, order)?,
            difficulty: Difficulty::from_binary(reader, order)?,
            required_coins: reader.read_u8(order)?,
        })
    }
}

impl ToBinary for OfficialLevel {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.base.to_binary(writer, order);
        self.difficulty.to_binary(writer, order);
        writer.write_u8(self.required_coins, order);
    }
}

/// The player that made a level
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct UserReference {
    pub id: u32,
    pub name: String,
    pub account_id: u32,
}

impl FromBinary for UserReference {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(UserReference {
            id: reader.read_u32(order)?,
            name: reader.read_string(order)?,
            account_id: reader.read_u32(order)?,
        })
    }
}

impl ToBinary for UserReference {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u32(self.id, order);
        writer.write_string(&self.name, order);
        writer.write_u32(self.account_id, order);
    }
}

/// Fields of levels made in the editor, whether by the player or others
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct CustomLevel {
    pub base: LevelBase,
    pub song: SongReference,
    pub creator: UserReference,
    pub description: String,
    /// The level string as stored, usually compressed
    pub data: String,
    pub length: LevelLength,
    pub password: Password,
    pub original_id: u32,
    pub two_player: bool,
    pub object_count: u32,
    pub high_object_count: bool,
    pub requested_stars: u8,
    pub low_detail: bool,
    pub low_detail_toggled: bool,
    pub editor_seconds: u32,
    pub copies_seconds: u32,
    pub order: u32,
    pub folder_id: u32,
}

impl CustomLevel {
    /// True unless the level was copied from another one
    pub fn is_original(&self) -> bool {
        self.original_id == 0
    }

    fn from_view(view: RobTopView<'_, Value>) -> Result<Self, Error> {
        let song = match view.get_option(OFFICIAL_SONG_ID)? {
            Some(id) => SongReference::official(id),
            None => SongReference::custom(view.get_or_default(SONG_ID)?),
        };

        let description = match view.get_string(DESCRIPTION) {
            x if x.is_empty() => x,
            x => decode_base64_str(&x)?,
        };

        Ok(CustomLevel {
            base: LevelBase::from_view(view)?,
            song,
            creator: UserReference {
                id: view.get_or_default(CREATOR_ID)?,
                name: view.get_string(CREATOR_NAME),
                account_id: view.get_or_default(CREATOR_ACCOUNT_ID)?,
            },
            description,
            data: view.get_string(DATA),
            length: view.get_enum_or(LENGTH, LevelLength::Tiny)?,
            password: Password::from_value(view.get_or_default(PASSWORD)?),
            original_id: view.get_or_default(ORIGINAL_ID)?,
            two_player: view.get_or_default(TWO_PLAYER)?,
            object_count: view.get_or_default(OBJECT_COUNT)?,
            high_object_count: view.get_or_default(HIGH_OBJECT_COUNT)?,
            requested_stars: view.get_or_default(REQUESTED_STARS)?,
            low_detail: view.get_or_default(LOW_DETAIL)?,
            low_detail_toggled: view.get_or_default(LOW_DETAIL_TOGGLED)?,
            editor_seconds: view.get_or_default(EDITOR_SECONDS)?,
            copies_seconds: view.get_or_default(COPIES_SECONDS)?,
            order: view.get_or_default(ORDER)?,
            folder_id: view.get_or_default(FOLDER_ID)?,
        })
    }

    fn write(&self, level_type: LevelType, dict: &mut Dict) {
        self.base.write(level_type, dict);
        put(dict, CREATOR_ID, self.creator.id);
        put(dict, CREATOR_NAME, self.creator.name.as_str());
        put(dict, CREATOR_ACCOUNT_ID, self.creator.account_id);
        put(dict, DESCRIPTION, encode_base64(self.description.as_bytes()));
        put(dict, DATA, self.data.as_str());
        put(dict, LENGTH, self.length.value());
        put(dict, PASSWORD, self.password.to_value());
        put(dict, ORIGINAL_ID, self.original_id);
        put(dict, TWO_PLAYER, self.two_player);
        put(dict, OBJECT_COUNT, self.object_count);
        put(dict, HIGH_OBJECT_COUNT, self.high_object_count);
        put(dict, REQUESTED_STARS, self.requested_stars);
        put(dict, LOW_DETAIL, self.low_detail);
        put(dict, LOW_DETAIL_TOGGLED, self.low_detail_toggled);
        put(dict, EDITOR_SECONDS, self.editor_seconds);
        put(dict, COPIES_SECONDS, self.copies_seconds);
        put(dict, ORDER, self.order);
        put(dict, FOLDER_ID, self.folder_id);
        if self.song.custom {
            put(dict, SONG_ID, self.song.id);
        } else {
            put(dict, OFFICIAL_SONG_ID, self.song.id);
        }
    }
}

#[cfg(feature = "compression")]
impl CustomLevel {
    /// The level string with the storage compression undone. Data that is
    /// already a plain level string is returned as is.
    pub fn processed_data(&self) -> Result<String, Error> {
        use crate::compression::{GameCodec, SaveCodec};

        if self.data.is_empty() || super::Editor::can_be_in(&self.data) {
            return Ok(self.data.clone());
        }

        let data = GameCodec.decode(self.data.as_bytes(), false)?;
        String::from_utf8(data).map_err(|e| Error::new(ErrorKind::Utf8 { offset: e.utf8_error().valid_up_to() }))
    }

    /// Compress and store a level string
    pub fn set_processed_data(&mut self, processed: &str) -> Result<(), Error> {
        use crate::compression::{GameCodec, SaveCodec};

        let data = GameCodec.encode(processed.as_bytes(), false)?;
        self.data = String::from_utf8(data).map_err(|e| Error::new(ErrorKind::Utf8 { offset: e.utf8_error().valid_up_to() }))?;
        Ok(())
    }

    /// Decode the level string into its header and objects
    pub fn open_editor(&self) -> Result<super::Editor, Error> {
        super::Editor::from_robtop(&self.processed_data()?)
    }

    pub fn save_editor(&mut self, editor: &super::Editor) -> Result<(), Error> {
        self.set_processed_data(&editor.to_robtop())
    }
}

const TWO_PLAYER_BIT: u8 = 0;
const HIGH_OBJECT_COUNT_BIT: u8 = 1;
const LOW_DETAIL_BIT: u8 = 2;
const LOW_DETAIL_TOGGLED_BIT: u8 = 3;

impl FromBinary for CustomLevel {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let base = LevelBase::from_binary(reader, order)?;
        let song = SongReference::from_binary(reader, order)?;
        let creator = UserReference::from_binary(reader, order)?;
        let description = reader.read_string(order)?;
        let data = reader.read_string(order)?;
        let length = LevelLength::from_binary(reader, order)?;
        let password = Password::from_binary(reader, order)?;
        let original_id = reader.read_u32(order)?;
        let flags = reader.read_u8(order)?;

        Ok(CustomLevel {
            base,
            song,
            creator,
            description,
            data,
            length,
            password,
            original_id,
            two_player: flag_at(flags, TWO_PLAYER_BIT),
            high_object_count: flag_at(flags, HIGH_OBJECT_COUNT_BIT),
            low_detail: flag_at(flags, LOW_DETAIL_BIT),
            low_detail_toggled: flag_at(flags, LOW_DETAIL_TOGGLED_BIT),
            object_count: reader.read_u32(order)?,
            requested_stars: reader.read_u8(order)?,
            editor_seconds: reader.read_u32(order)?,
            copies_seconds: reader.read_u32(order)?,
            order: reader.read_u32(order)?,
            folder_id: reader.read_u32(order)?,
        })
    }
}

impl ToBinary for CustomLevel {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.base.to_binary(writer, order);
        self.song.to_binary(writer, order);
        self.creator.to_binary(writer, order);
        writer.write_string(&self.description, order);
        writer.write_string(&self.data, order);
        self.length.to_binary(writer, order);
        self.password.to_binary(writer, order);
        writer.write_u32(self.original_id, order);
        let flags = pack_flags(&[
            self.two_player,
            self.high_object_count,
            self.low_detail,
            self.low_detail_toggled,
        ]);
        writer.write_u8(flags, order);
        writer.write_u32(self.object_count, order);
        writer.write_u8(self.requested_stars, order);
        writer.write_u32(self.editor_seconds, order);
        writer.write_u32(self.copies_seconds, order);
        writer.write_u32(self.order, order);
        writer.write_u32(self.folder_id, order);
    }
}

/// A level the player made
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct CreatedLevel {
    pub custom: CustomLevel,
    pub revision: u32,
    pub verified: bool,
    pub uploaded: bool,
    pub recording: Recording,
    pub collected_coins: CollectedCoins,
    pub unlisted: bool,
}

impl PlistRecord for CreatedLevel {
    fn from_plist(view: RobTopView<'_, Value>) -> Result<Self, Error> {
        let collected_coins = CollectedCoins::new(
            view.get_or_default(FIRST_COIN)?,
            view.get_or_default(SECOND_COIN)?,
            view.get_or_default(THIRD_COIN)?,
        );

        Ok(CreatedLevel {
            custom: CustomLevel::from_view(view)?,
            revision: view.get_or_default(REVISION)?,
            verified: view.get_or_default(VERIFIED)?,
            uploaded: view.get_or_default(UPLOADED)?,
            recording: Recording::from_robtop(&view.get_string(RECORDING))?,
            collected_coins,
            unlisted: view.get_or_default(UNLISTED)?,
        })
    }

    fn to_plist(&self) -> Dict {
        let mut dict = Dict::new();
        self.custom.write(LevelType::Created, &mut dict);
        put(&mut dict, REVISION, self.revision);
        put(&mut dict, VERIFIED, self.verified);
        put(&mut dict, UPLOADED, self.uploaded);
        put(&mut dict, RECORDING, self.recording.to_robtop());
        put(&mut dict, FIRST_COIN, self.collected_coins.first());
        put(&mut dict, SECOND_COIN, self.collected_coins.second());
        put(&mut dict, THIRD_COIN, self.collected_coins.third());
        put(&mut dict, UNLISTED, self.unlisted);
        dict
    }
}

const VERIFIED_BIT: u8 = 0;
const UPLOADED_BIT: u8 = 1;
const UNLISTED_BIT: u8 = 2;

impl FromBinary for CreatedLevel {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let custom = CustomLevel::from_binary(reader, order)?;
        let revision = reader.read_u32(order)?;
        let flags = reader.read_u8(order)?;
        let recording = Recording::from_binary(reader, order)?;
        let collected_coins = CollectedCoins::from_bits(reader.read_u8(order)?);
        Ok(CreatedLevel {
            custom,
            revision,
            verified: flag_at(flags, VERIFIED_BIT),
            uploaded: flag_at(flags, UPLOADED_BIT),
            recording,
            collected_coins,
            unlisted: flag_at(flags, UNLISTED_BIT),
        })
    }
}

impl ToBinary for CreatedLevel {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.custom.to_binary(writer, order);
        writer.write_u32(self.revision, order);
        writer.write_u8(pack_flags(&[self.verified, self.uploaded, self.unlisted]), order);
        self.recording.to_binary(writer, order);
        writer.write_u8(self.collected_coins.bits(), order);
    }
}

/// A level downloaded from the servers
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct SavedLevel {
    pub custom: CustomLevel,
    pub difficulty: Difficulty,
    pub downloads: u32,
    pub game_version: RobTopVersion,
    pub rating: i32,
    pub score: u32,
    pub rate_type: RateType,
    pub hidden: bool,
    pub verified_coins: bool,
    pub favorite: bool,
}

impl Default for SavedLevel {
    fn default() -> Self {
        SavedLevel {
            custom: CustomLevel::default(),
            difficulty: Difficulty::Unknown,
            downloads: 0,
            game_version: RobTopVersion::CURRENT_GAME,
            rating: 0,
            score: 0,
            rate_type: RateType::NotRated,
            hidden: false,
            verified_coins: false,
            favorite: false,
        }
    }
}

impl SavedLevel {
    pub fn stars(&self) -> u8 {
        self.custom.base.stars
    }

    pub fn is_rated(&self) -> bool {
        self.rate_type >= RateType::Rated
    }

    pub fn is_featured(&self) -> bool {
        self.rate_type >= RateType::Featured
    }

    fn from_view(view: RobTopView<'_, Value>) -> Result<Self, Error> {
        let parameters = DifficultyParameters {
            numerator: view.get_or_default(DIFFICULTY_NUMERATOR)?,
            denominator: view.get_or_default(DIFFICULTY_DENOMINATOR)?,
            demon_value: view.get_or_default(DEMON_DIFFICULTY)?,
            auto: view.get_or_default(AUTO)?,
            demon: view.get_or_default(DEMON)?,
        };

        let custom = CustomLevel::from_view(view)?;
        let score = view.get_or_default::<i64>(SCORE)?.clamp(0, i64::from(u32::MAX)) as u32;
        let special = view.get_enum_lossy(SPECIAL_RATE_TYPE, SpecialRateType::None)?;
        let rate_type = RateType::compute(u32::from(custom.base.stars), score as i32, special);
        let game_version = view
            .get_option::<i64>(GAME_VERSION)?
            .map_or(RobTopVersion::CURRENT_GAME, RobTopVersion::from_game_version);

        Ok(SavedLevel {
            custom,
            difficulty: parameters.into_difficulty(),
            downloads: view.get_or_default(DOWNLOADS)?,
            game_version,
            rating: view.get_or_default(RATING)?,
            score,
            rate_type,
            hidden: view.get_or_default(HIDDEN)?,
            verified_coins: view.get_or_default(VERIFIED_COINS)?,
            favorite: view.get_or_default(FAVORITE)?,
        })
    }

    fn write(&self, dict: &mut Dict) {
        let parameters = DifficultyParameters::from_difficulty(self.difficulty);
        self.custom.write(LevelType::Saved, dict);
        put(dict, DIFFICULTY_NUMERATOR, parameters.numerator);
        put(dict, DIFFICULTY_DENOMINATOR, parameters.denominator);
        put(dict, DEMON_DIFFICULTY, parameters.demon_value);
        put(dict, AUTO, parameters.auto);
        put(dict, DEMON, parameters.demon);
        put(dict, DOWNLOADS, self.downloads);
        put(dict, GAME_VERSION, self.game_version.to_game_version());
        put(dict, RATING, self.rating);
        put(dict, SCORE, self.score);
        put(dict, SPECIAL_RATE_TYPE, self.rate_type.special().value());
        put(dict, HIDDEN, self.hidden);
        put(dict, VERIFIED_COINS, self.verified_coins);
        put(dict, FAVORITE, self.favorite);
    }
}

impl PlistRecord for SavedLevel {
    fn from_plist(view: RobTopView<'_, Value>) -> Result<Self, Error> {
        SavedLevel::from_view(view)
    }

    fn to_plist(&self) -> Dict {
        let mut dict = Dict::new();
        self.write(&mut dict);
        dict
    }
}

const HIDDEN_BIT: u8 = 0;
const VERIFIED_COINS_BIT: u8 = 1;
const FAVORITE_BIT: u8 = 2;

impl FromBinary for SavedLevel {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let custom = CustomLevel::from_binary(reader, order)?;
        let difficulty = Difficulty::from_binary(reader, order)?;
        let downloads = reader.read_u32(order)?;
        let game_version = RobTopVersion::from_binary(reader, order)?;
        let rating = reader.read_i32(order)?;
        let score = reader.read_u32(order)?;
        let rate_type = RateType::from_binary(reader, order)?;
        let flags = reader.read_u8(order)?;
        Ok(SavedLevel {
            custom,
            difficulty,
            downloads,
            game_version,
            rating,
            score,
            rate_type,
            hidden: flag_at(flags, HIDDEN_BIT),
            verified_coins: flag_at(flags, VERIFIED_COINS_BIT),
            favorite: flag_at(flags, FAVORITE_BIT),
        })
    }
}

impl ToBinary for SavedLevel {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.custom.to_binary(writer, order);
        self.difficulty.to_binary(writer, order);
        writer.write_u32(self.downloads, order);
        self.game_version.to_binary(writer, order);
        writer.write_i32(self.rating, order);
        writer.write_u32(self.score, order);
        self.rate_type.to_binary(writer, order);
        let flags = pack_flags(&[self.hidden, self.verified_coins, self.favorite]);
        writer.write_u8(flags, order);
    }
}

/// A saved level that was featured as a daily or weekly level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct TimelyLevel {
    pub saved: SavedLevel,
    pub timely_id: TimelyId,
}

impl PlistRecord for TimelyLevel {
    fn from_plist(view: RobTopView<'_, Value>) -> Result<Self, Error> {
        Ok(TimelyLevel {
            saved: SavedLevel::from_view(view)?,
            timely_id: TimelyId::decode(view.get_or_default(TIMELY_ID)?),
        })
    }

    fn to_plist(&self) -> Dict {
        let mut dict = Dict::new();
        self.saved.write(&mut dict);
        put(&mut dict, TIMELY_ID, self.timely_id.encode());
        dict
    }
}

impl FromBinary for TimelyLevel {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(TimelyLevel {
            saved: SavedLevel::from_binary(reader, order)?,
            timely_id: TimelyId::from_binary(reader, order)?,
        })
    }
}

impl ToBinary for TimelyLevel {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.saved.to_binary(writer, order);
        self.timely_id.to_binary(writer, order);
    }
}

/// A saved level that belongs to a gauntlet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct GauntletLevel {
    pub saved: SavedLevel,
}

impl PlistRecord for GauntletLevel {
    fn from_plist(view: RobTopView<'_, Value>) -> Result<Self, Error> {
        SavedLevel::from_view(view).map(|saved| GauntletLevel { saved })
    }

    fn to_plist(&self) -> Dict {
        let mut dict = Dict::new();
        self.saved.write(&mut dict);
        put(&mut dict, GAUNTLET, true);
        dict
    }
}

impl FromBinary for GauntletLevel {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        SavedLevel::from_binary(reader, order).map(|saved| GauntletLevel { saved })
    }
}

impl ToBinary for GauntletLevel {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.saved.to_binary(writer, order)
    }
}

/// A level record that can live in a [`Levels`] collection. In binary each
/// level is prefixed by a tag naming its kind.
pub trait LevelRecord: PlistRecord + Sized {
    fn base(&self) -> &LevelBase;

    fn id(&self) -> u32 {
        self.base().id
    }

    /// Write the kind tag and the fields
    fn write_tagged(&self, writer: &mut Writer, order: ByteOrder);

    /// Read the fields of a level whose tag was already read at `offset`
    fn read_tagged(
        tag: u8,
        offset: usize,
        reader: &mut Reader<'_>,
        order: ByteOrder,
    ) -> Result<Self, Error>;
}

fn unknown_level_tag(tag: u8, offset: usize) -> Error {
    Error::new(ErrorKind::Discriminant {
        record: RECORD,
        tag: i64::from(tag),
        offset,
    })
}

macro_rules! level_record {
    ($($ty:ident = $tag:expr, $($field:ident).+;)*) => {
        $(
            impl LevelRecord for $ty {
                fn base(&self) -> &LevelBase {
                    &self.$($field).+
                }

                fn write_tagged(&self, writer: &mut Writer, order: ByteOrder) {
                    writer.write_u8($tag, order);
                    self.to_binary(writer, order);
                }

                fn read_tagged(
                    tag: u8,
                    offset: usize,
                    reader: &mut Reader<'_>,
                    order: ByteOrder,
                ) -> Result<Self, Error> {
                    if tag != $tag {
                        return Err(unknown_level_tag(tag, offset));
                    }
                    $ty::from_binary(reader, order)
                }
            }
        )*
    };
}

level_record! {
    OfficialLevel = OFFICIAL_TAG, base;
    CreatedLevel = CREATED_TAG, custom.base;
    SavedLevel = SAVED_TAG, custom.base;
    TimelyLevel = TIMELY_TAG, saved.custom.base;
    GauntletLevel = GAUNTLET_TAG, saved.custom.base;
}

/// Any kind of level
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
#[cfg_attr(feature = "derive", serde(tag = "type"))]
pub enum Level {
    Official(OfficialLevel),
    Created(CreatedLevel),
    Saved(SavedLevel),
    Timely(TimelyLevel),
    Gauntlet(GauntletLevel),
}

impl Level {
    pub fn level_type(&self) -> LevelType {
        match self {
            Level::Official(_) => LevelType::Official,
            Level::Created(_) => LevelType::Created,
            Level::Saved(_) | Level::Timely(_) | Level::Gauntlet(_) => LevelType::Saved,
        }
    }
}

impl PlistRecord for Level {
    /// Dispatch on the level type, where saved levels that carry a timely id
    /// or the gauntlet flag become timely and gauntlet levels
    fn from_plist(view: RobTopView<'_, Value>) -> Result<Self, Error> {
        match view.get_enum_or(TYPE, LevelType::Null)? {
            LevelType::Official => OfficialLevel::from_plist(view).map(Level::Official),
            LevelType::Created => CreatedLevel::from_plist(view).map(Level::Created),
            LevelType::Saved | LevelType::Online => {
                if view.get_or_default::<bool>(GAUNTLET)? {
                    GauntletLevel::from_plist(view).map(Level::Gauntlet)
                } else if view.contains(TIMELY_ID) {
                    TimelyLevel::from_plist(view).map(Level::Timely)
                } else {
                    SavedLevel::from_plist(view).map(Level::Saved)
                }
            }
            LevelType::Null => Err(Error::schema(RECORD, "missing level type")),
        }
    }

    fn to_plist(&self) -> Dict {
        match self {
            Level::Official(x) => x.to_plist(),
            Level::Created(x) => x.to_plist(),
            Level::Saved(x) => x.to_plist(),
            Level::Timely(x) => x.to_plist(),
            Level::Gauntlet(x) => x.to_plist(),
        }
    }
}

impl LevelRecord for Level {
    fn base(&self) -> &LevelBase {
        match self {
            Level::Official(x) => x.base(),
            Level::Created(x) => x.base(),
            Level::Saved(x) => x.base(),
            Level::Timely(x) => x.base(),
            Level::Gauntlet(x) => x.base(),
        }
    }

    fn write_tagged(&self, writer: &mut Writer, order: ByteOrder) {
        match self {
            Level::Official(x) => x.write_tagged(writer, order),
            Level::Created(x) => x.write_tagged(writer, order),
            Level::Saved(x) => x.write_tagged(writer, order),
            Level::Timely(x) => x.write_tagged(writer, order),
            Level::Gauntlet(x) => x.write_tagged(writer, order),
        }
    }

    fn read_tagged(
        tag: u8,
        offset: usize,
        reader: &mut Reader<'_>,
        order: ByteOrder,
    ) -> Result<Self, Error> {
        match tag {
            OFFICIAL_TAG => OfficialLevel::from_binary(reader, order).map(Level::Official),
            CREATED_TAG => CreatedLevel::from_binary(reader, order).map(Level::Created),
            SAVED_TAG => SavedLevel::from_binary(reader, order).map(Level::Saved),
            TIMELY_TAG => TimelyLevel::from_binary(reader, order).map(Level::Timely),
            GAUNTLET_TAG => GauntletLevel::from_binary(reader, order).map(Level::Gauntlet),
            _ => Err(unknown_level_tag(tag, offset)),
        }
    }
}

impl FromBinary for Level {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let offset = reader.offset();
        let tag = reader.read_u8(order)?;
        Level::read_tagged(tag, offset, reader, order)
    }
}

impl ToBinary for Level {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.write_tagged(writer, order)
    }
}

/// Levels keyed by their id in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
#[cfg_attr(feature = "derive", serde(transparent))]
pub struct Levels<T> {
    levels: IndexMap<u32, T>,
}

impl<T> Default for Levels<T> {
    fn default() -> Self {
        Levels {
            levels: IndexMap::new(),
        }
    }
}

impl<T: LevelRecord> Levels<T> {
    pub fn new() -> Self {
        Levels::default()
    }

    /// Insert a level, replacing and returning one with the same id
    pub fn insert(&mut self, level: T) -> Option<T> {
        self.levels.insert(level.id(), level)
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.levels.get(&id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut T> {
        self.levels.get_mut(&id)
    }

    pub fn remove(&mut self, id: u32) -> Option<T> {
        self.levels.shift_remove(&id)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.levels.values()
    }

    /// Decode the values of a dictionary, ignoring its keys and the array
    /// marker, so both `{id: level}` and `_isArr` dictionaries load
    pub fn from_dict(dict: &Dict) -> Result<Self, Error> {
        dict.iter()
            .filter(|(key, _)| key.as_str() != ARRAY_KEY)
            .map(|(_, value)| T::from_value(value, RECORD))
            .collect()
    }

    /// Encode as `{id: level}`
    pub fn to_dict(&self) -> Dict {
        self.levels
            .iter()
            .map(|(id, level)| (id.to_string(), Value::Dict(level.to_plist())))
            .collect()
    }

    /// Encode as an `_isArr` dictionary
    pub fn to_array(&self) -> Dict {
        array_from_values(self.iter().map(|level| Value::Dict(level.to_plist())))
    }
}

impl<T: LevelRecord> FromIterator<T> for Levels<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut levels = Levels::default();
        for level in iter {
            levels.insert(level);
        }
        levels
    }
}

fn read_level_block<T: LevelRecord>(
    block: &mut Reader<'_>,
    order: ByteOrder,
) -> Result<T, Error> {
    let offset = block.offset();
    let tag = block.read_u8(order)?;
    T::read_tagged(tag, offset, block, order)
}

/// A `u32` count of length prefixed blocks, each holding a tagged level.
/// With lenient decoding a block that fails to decode is skipped.
impl<T: LevelRecord> FromBinary for Levels<T> {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let count = reader.read_count(order, 4)?;
        let mut levels = Levels::default();
        for _ in 0..count {
            let mut block = reader.read_block(order)?;
            match read_level_block::<T>(&mut block, order) {
                Ok(level) => {
                    levels.insert(level);
                }
                Err(e) if reader.skip_malformed() => {
                    log::debug!("skipping malformed level: {}", e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(levels)
    }
}

impl<T: LevelRecord> ToBinary for Levels<T> {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_count(self.len(), order);
        for level in self.iter() {
            writer.write_block(order, |w| level.write_tagged(w, order));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};
    use crate::models::{DemonDifficulty, RecordingItem};
    use rstest::*;

    fn custom(id: u32) -> CustomLevel {
        CustomLevel {
            base: LevelBase {
                id,
                name: String::from("Bloodbath"),
                attempts: 3010,
                normal_record: 61,
                stars: 10,
                capacity: Capacity::new(vec![25, 100, 25]),
                progress: Progress::new(vec![12, 57]),
                ..LevelBase::default()
            },
            song: SongReference::custom(467_339),
            creator: UserReference {
                id: 1_249_399,
                name: String::from("Riot"),
                account_id: 37_415,
            },
            description: String::from("Whose blood will be spilt"),
            length: LevelLength::Long,
            password: Password::Free,
            object_count: 24_735,
            ..CustomLevel::default()
        }
    }

    fn saved(id: u32) -> SavedLevel {
        SavedLevel {
            custom: custom(id),
            difficulty: Difficulty::ExtremeDemon,
            downloads: 1_000_000,
            rating: 50_000,
            score: 1,
            rate_type: RateType::Epic,
            favorite: true,
            ..SavedLevel::default()
        }
    }

    #[test]
    fn leaderboard_seed_formula() {
        assert_eq!(leaderboard_seed(0, 0, 0, false), 3991 * 8354 + 4085 * 4085 - 50_028_039);
        assert_eq!(
            leaderboard_seed(10, 100, 60, true) - leaderboard_seed(10, 100, 60, false),
            1482
        );
    }

    #[rstest]
    #[case(None, None, None, Difficulty::Unknown)]
    #[case(Some(0), None, None, Difficulty::Auto)]
    #[case(Some(2), None, None, Difficulty::Normal)]
    #[case(Some(5), None, None, Difficulty::Insane)]
    #[case(Some(6), Some(true), None, Difficulty::Demon)]
    #[case(Some(6), Some(true), Some(6), Difficulty::ExtremeDemon)]
    #[case(Some(6), Some(true), Some(0), Difficulty::HardDemon)]
    fn official_difficulty_keys(
        #[case] direct: Option<i64>,
        #[case] demon: Option<bool>,
        #[case] demon_value: Option<i64>,
        #[case] expected: Difficulty,
    ) {
        let mut dict = Dict::new();
        put(&mut dict, TYPE, 1);
        if let Some(direct) = direct {
            put(&mut dict, DIRECT_DIFFICULTY, direct);
        }
        if let Some(demon) = demon {
            put(&mut dict, DEMON, demon);
        }
        if let Some(value) = demon_value {
            put(&mut dict, DEMON_DIFFICULTY, value);
        }
        let level = OfficialLevel::from_plist(RobTopView::new(&dict)).unwrap();
        assert_eq!(level.difficulty, expected);
    }

    #[test]
    fn official_demons_fold_direct_difficulty() {
        let level = OfficialLevel {
            difficulty: Difficulty::EasyDemon,
            ..OfficialLevel::default()
        };
        let dict = level.to_plist();
        assert_eq!(dict[DIRECT_DIFFICULTY], Value::Integer(6));
        assert_eq!(dict[DEMON], Value::Bool(true));
        assert_eq!(dict[DEMON_DIFFICULTY], Value::Integer(3));
        assert_eq!(OfficialLevel::from_plist(RobTopView::new(&dict)).unwrap(), level);
    }

    #[test]
    fn custom_song_and_description() {
        let level = CreatedLevel {
            custom: custom(1),
            ..CreatedLevel::default()
        };
        let dict = level.to_plist();
        assert_eq!(dict[SONG_ID], Value::Integer(467_339));
        assert!(!dict.contains_key(OFFICIAL_SONG_ID));
        assert_eq!(dict[DESCRIPTION], Value::from("V2hvc2UgYmxvb2Qgd2lsbCBiZSBzcGlsdA=="));
        assert_eq!(dict[PASSWORD], Value::Integer(1));
        assert_eq!(dict[CAPACITY], Value::from("25_100_25"));
        assert_eq!(CreatedLevel::from_plist(RobTopView::new(&dict)).unwrap(), level);
    }

    #[test]
    fn created_level_keeps_recording_and_coins() {
        let level = CreatedLevel {
            custom: custom(2),
            revision: 4,
            verified: true,
            recording: Recording::new(vec![RecordingItem {
                timestamp: 1.5,
                next: true,
                ..RecordingItem::default()
            }]),
            collected_coins: CollectedCoins::FIRST | CollectedCoins::THIRD,
            ..CreatedLevel::default()
        };
        let dict = level.to_plist();
        assert_eq!(dict[RECORDING], Value::from("1.5;1;"));
        assert_eq!(dict[SECOND_COIN], Value::Bool(false));
        assert_eq!(CreatedLevel::from_plist(RobTopView::new(&dict)).unwrap(), level);
    }

    #[test]
    fn saved_level_rate_type_follows_keys() {
        let mut dict = saved(3).to_plist();
        assert_eq!(dict[SPECIAL_RATE_TYPE], Value::Integer(1));
        assert_eq!(Level::from_value(&Value::Dict(dict.clone()), RECORD).unwrap(), Level::Saved(saved(3)));

        put(&mut dict, SPECIAL_RATE_TYPE, 0);
        put(&mut dict, SCORE, -5);
        let level = SavedLevel::from_plist(RobTopView::new(&dict)).unwrap();
        assert_eq!(level.score, 0);
        assert_eq!(level.rate_type, RateType::Rated);
    }

    #[test]
    fn level_dispatch() {
        let timely = TimelyLevel {
            saved: saved(4),
            timely_id: TimelyId::Weekly(12),
        };
        let dict = timely.to_plist();
        assert_eq!(dict[TIMELY_ID], Value::Integer(100_012));
        assert_eq!(dict[TYPE], Value::Integer(3));
        assert_eq!(Level::from_value(&Value::Dict(dict), RECORD).unwrap(), Level::Timely(timely));

        let gauntlet = GauntletLevel { saved: saved(5) };
        let dict = gauntlet.to_plist();
        assert_eq!(Level::from_value(&Value::Dict(dict), RECORD).unwrap(), Level::Gauntlet(gauntlet));

        assert!(Level::from_plist(RobTopView::new(&Dict::new())).is_err());
    }

    #[test]
    fn levels_binary_round_trip() {
        let options = BinaryOptions::new();
        let levels: Levels<Level> = vec![
            Level::Saved(saved(1)),
            Level::Official(OfficialLevel {
                base: LevelBase {
                    id: 2,
                    ..LevelBase::default()
                },
                difficulty: DemonDifficulty::HardDemon.into_difficulty(),
                required_coins: 0,
            }),
            Level::Timely(TimelyLevel {
                saved: saved(3),
                timely_id: TimelyId::Daily(7),
            }),
        ]
        .into_iter()
        .collect();

        let data = to_bytes(&levels, &options).unwrap();
        assert_eq!(from_bytes::<Levels<Level>>(&data, &options).unwrap(), levels);
    }

    #[test]
    fn timely_level_binary_keeps_large_daily_id() {
        let options = BinaryOptions::new();
        let timely = TimelyLevel {
            saved: saved(6),
            timely_id: TimelyId::Daily(150_000),
        };
        let data = to_bytes(&timely, &options).unwrap();
        assert_eq!(from_bytes::<TimelyLevel>(&data, &options).unwrap(), timely);
    }

    #[test]
    fn wrong_kind_is_skipped_only_when_lenient() {
        let levels: Levels<Level> = vec![Level::Saved(saved(1))].into_iter().collect();
        let mut data = to_bytes(&levels, &BinaryOptions::new()).unwrap();
        // the tag byte of the first block
        data[8] = 9;

        let err = from_bytes::<Levels<SavedLevel>>(&data, &BinaryOptions::new()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Discriminant { tag: 9, offset: 8, .. }));

        let lenient = BinaryOptions::new().skip_malformed_levels(true);
        let decoded = from_bytes::<Levels<SavedLevel>>(&data, &lenient).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn array_and_id_dictionaries() {
        let levels: Levels<SavedLevel> = vec![saved(10), saved(11)].into_iter().collect();
        let by_id = levels.to_dict();
        assert_eq!(by_id.keys().collect::<Vec<_>>(), vec!["10", "11"]);
        assert_eq!(Levels::<SavedLevel>::from_dict(&by_id).unwrap(), levels);

        let array = levels.to_array();
        assert_eq!(array.keys().next().map(String::as_str), Some(ARRAY_KEY));
        assert_eq!(Levels::<SavedLevel>::from_dict(&array).unwrap(), levels);
    }
}
