//! The player's save: the main property list and the created levels one
//!
//! A save is split across two files. The main one holds settings, progress
//! and every downloaded level under camel case and `GJA_`, `GLM_`, `GS_` and
//! `MDLM_` keys. The levels one holds the created levels. Each section of the
//! main file decodes into its own record so a failure can be traced back to
//! the key it came from.
//!
//! ```
//! use robtop::compression::Identity;
//! use robtop::database::Database;
//!
//! let mut database = Database::default();
//! database.player_name = String::from("Kappa");
//! database.values.cubes.insert(4);
//!
//! let (main, levels) = database.dump(&Identity, false).unwrap();
//! let loaded = Database::load(&main, &levels, &Identity, false).unwrap();
//! assert_eq!(loaded, database);
//! ```
mod completed;
mod statistics;
mod storage;
mod unlock_values;
mod values;
mod variables;

pub use self::completed::{Completed, CompletedPair, Stars};
pub use self::statistics::Statistics;
pub use self::storage::{AdReward, Coins, QuestDiamonds, Storage, TimelyCoins};
pub use self::unlock_values::UnlockValues;
pub use self::values::Values;
pub use self::variables::Variables;

use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::compression::SaveCodec;
use crate::models::{
    objects_from_robtop, objects_to_robtop, CreatedLevel, Folder, GauntletLevel, IconType,
    LevelRecord, Levels, Like, Object, OfficialLevel, Quality, SavedLevel, Song, TimelyLevel,
};
use crate::plist::{parse, Dict, PlistRecord, PlistWriter, Value};
use crate::text::{RobTopEnum, RobTopString, RobTopView, TimelyId, Token};
use crate::version::RobTopVersion;
use crate::{Error, OrderedSet};
use indexmap::IndexMap;

const VOLUME: &str = "bgVolume";
const SFX_VOLUME: &str = "sfxVolume";
const UDID: &str = "playerUDID";
const PLAYER_NAME: &str = "playerName";
const USER_ID: &str = "playerUserID";
const CUBE_ID: &str = "playerFrame";
const SHIP_ID: &str = "playerShip";
const BALL_ID: &str = "playerBall";
const UFO_ID: &str = "playerBird";
const WAVE_ID: &str = "playerDart";
const ROBOT_ID: &str = "playerRobot";
const SPIDER_ID: &str = "playerSpider";
const COLOR_1_ID: &str = "playerColor";
const COLOR_2_ID: &str = "playerColor2";
const TRAIL_ID: &str = "playerStreak";
const EXPLOSION_ID: &str = "playerDeathEffect";
const ICON_TYPE: &str = "playerIconType";
const GLOW: &str = "playerGlow";
const SECRET_VALUE: &str = "secretNumber";
const MODERATOR: &str = "hasRP";
const VALUES: &str = "valueKeeper";
const UNLOCK_VALUES: &str = "unlockValueKeeper";
const CUSTOM_OBJECTS: &str = "customObjectDict";
const ACHIEVEMENTS: &str = "reportedAchievements";
const SHOW_SONG_MARKERS: &str = "showSongMarkers";
const SHOW_PROGRESS_BAR: &str = "showProgressBar";
const CLICKED_ICONS: &str = "clickedGarage";
const CLICKED_EDITOR: &str = "clickedEditor";
const CLICKED_PRACTICE: &str = "clickedPractice";
const SHOWN_EDITOR_GUIDE: &str = "showedEditorGuide";
const SHOWN_LOW_DETAIL: &str = "showLowDetailDialog";
const BOOTUPS: &str = "bootups";
const RATED_GAME: &str = "hasRatedGame";
const RESOLUTION: &str = "resolution";
const QUALITY: &str = "texQuality";
const COMPLETED: &str = "GS_completed";
const STATISTICS: &str = "GS_value";
const NAME: &str = "GJA_001";
const PASSWORD: &str = "GJA_002";
const ACCOUNT_ID: &str = "GJA_003";
const SESSION_ID: &str = "GJA_004";
const OFFICIAL_LEVELS: &str = "GLM_01";
const SAVED_LEVELS: &str = "GLM_03";
const FOLLOWED: &str = "GLM_06";
const LAST_PLAYED: &str = "GLM_07";
const TIMELY_LEVELS: &str = "GLM_10";
const DAILY_ID: &str = "GLM_11";
const LIKED: &str = "GLM_12";
const RATED: &str = "GLM_13";
const REPORTED: &str = "GLM_14";
const DEMON_RATED: &str = "GLM_15";
const GAUNTLET_LEVELS: &str = "GLM_16";
const WEEKLY_ID: &str = "GLM_17";
const SAVED_FOLDERS: &str = "GLM_18";
const CREATED_FOLDERS: &str = "GLM_19";
const SONGS: &str = "MDLM_001";
const PRIORITY: &str = "MDLM_002";
const CREATED_LEVELS: &str = "LLM_01";
const LEVELS_BINARY_VERSION: &str = "LLM_02";
/// Section name for the `GS_` keys spread over the main dictionary
const STORAGE: &str = "storage";

const DEFAULT_VOLUME: f64 = 1.0;
const DEFAULT_ICON_ID: u16 = 1;
const DEFAULT_COLOR_1_ID: u16 = 0;
const DEFAULT_COLOR_2_ID: u16 = 3;

/// Every section of a save
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Database {
    pub volume: f64,
    pub sfx_volume: f64,
    pub udid: String,
    pub player_name: String,
    /// Account name
    pub name: String,
    pub user_id: u32,
    pub account_id: u32,
    #[cfg_attr(feature = "derive", serde(skip_serializing))]
    pub password: String,
    pub session_id: u32,
    pub cube_id: u16,
    pub ship_id: u16,
    pub ball_id: u16,
    pub ufo_id: u16,
    pub wave_id: u16,
    pub robot_id: u16,
    pub spider_id: u16,
    pub color_1_id: u16,
    pub color_2_id: u16,
    pub trail_id: u16,
    pub explosion_id: u16,
    pub icon_type: IconType,
    pub glow: bool,
    pub secret_value: i64,
    pub moderator: bool,
    pub values: Values,
    pub unlock_values: UnlockValues,
    /// Object groups saved in the editor for reuse
    pub custom_objects: Vec<Vec<Object>>,
    pub storage: Storage,
    pub completed: Completed,
    pub statistics: Statistics,
    pub show_song_markers: bool,
    pub show_progress_bar: bool,
    pub clicked_icons: bool,
    pub clicked_editor: bool,
    pub clicked_practice: bool,
    pub shown_editor_guide: bool,
    pub shown_low_detail: bool,
    pub bootups: u32,
    pub rated_game: bool,
    pub resolution: i32,
    pub quality: Quality,
    /// Achievement progress by achievement name
    pub achievements: IndexMap<String, u32>,
    pub official_levels: Levels<OfficialLevel>,
    pub saved_levels: Levels<SavedLevel>,
    /// Followed account ids
    pub followed: OrderedSet<u32>,
    pub last_played: OrderedSet<u32>,
    pub timely_levels: Levels<TimelyLevel>,
    pub daily_id: u32,
    pub weekly_id: u32,
    pub liked: OrderedSet<Like>,
    pub rated: OrderedSet<u32>,
    pub reported: OrderedSet<u32>,
    pub demon_rated: OrderedSet<u32>,
    pub gauntlet_levels: Levels<GauntletLevel>,
    pub saved_folders: Vec<Folder>,
    pub created_folders: Vec<Folder>,
    pub songs: Vec<Song>,
    pub priority: u32,
    pub created_levels: Levels<CreatedLevel>,
    /// Binary version the levels file was written with
    pub binary_version: RobTopVersion,
}

impl Default for Database {
    fn default() -> Self {
        Database {
            volume: DEFAULT_VOLUME,
            sfx_volume: DEFAULT_VOLUME,
            udid: String::new(),
            player_name: String::new(),
            name: String::new(),
            user_id: 0,
            account_id: 0,
            password: String::new(),
            session_id: 0,
            cube_id: DEFAULT_ICON_ID,
            ship_id: DEFAULT_ICON_ID,
            ball_id: DEFAULT_ICON_ID,
            ufo_id: DEFAULT_ICON_ID,
            wave_id: DEFAULT_ICON_ID,
            robot_id: DEFAULT_ICON_ID,
            spider_id: DEFAULT_ICON_ID,
            color_1_id: DEFAULT_COLOR_1_ID,
            color_2_id: DEFAULT_COLOR_2_ID,
            trail_id: DEFAULT_ICON_ID,
            explosion_id: DEFAULT_ICON_ID,
            icon_type: IconType::Cube,
            glow: false,
            secret_value: 0,
            moderator: false,
            values: Values::default(),
            unlock_values: UnlockValues::default(),
            custom_objects: Vec::new(),
            storage: Storage::default(),
            completed: Completed::default(),
            statistics: Statistics::default(),
            show_song_markers: true,
            show_progress_bar: true,
            clicked_icons: true,
            clicked_editor: true,
            clicked_practice: true,
            shown_editor_guide: true,
            shown_low_detail: true,
            bootups: 0,
            rated_game: false,
            resolution: 0,
            quality: Quality::Auto,
            achievements: IndexMap::new(),
            official_levels: Levels::new(),
            saved_levels: Levels::new(),
            followed: OrderedSet::new(),
            last_played: OrderedSet::new(),
            timely_levels: Levels::new(),
            daily_id: 0,
            weekly_id: 0,
            liked: OrderedSet::new(),
            rated: OrderedSet::new(),
            reported: OrderedSet::new(),
            demon_rated: OrderedSet::new(),
            gauntlet_levels: Levels::new(),
            saved_folders: Vec::new(),
            created_folders: Vec::new(),
            songs: Vec::new(),
            priority: 0,
            created_levels: Levels::new(),
            binary_version: RobTopVersion::CURRENT_BINARY,
        }
    }
}

/// Decode a nested record, where an absent section is the default record
fn section<T: PlistRecord + Default>(view: RobTopView<'_, Value>, key: &str) -> Result<T, Error> {
    log::trace!("decoding section {}", key);
    let inner = view.get_dict(key).map_err(|e| e.in_section(key))?;
    match inner {
        Some(inner) => T::from_plist(inner).map_err(|e| e.in_section(key)),
        None => Ok(T::default()),
    }
}

fn levels<T: LevelRecord>(view: RobTopView<'_, Value>, key: &str) -> Result<Levels<T>, Error> {
    log::trace!("decoding levels {}", key);
    match view.get_dict(key).map_err(|e| e.in_section(key))? {
        Some(inner) => Levels::from_dict(inner.map()).map_err(|e| e.in_section(key)),
        None => Ok(Levels::new()),
    }
}

/// Decode each key of a `{key: "1"}` dictionary
fn keys<T>(
    view: RobTopView<'_, Value>,
    key: &str,
    parse: impl Fn(&str) -> Result<T, Error>,
) -> Result<Vec<T>, Error> {
    let inner = match view.get_dict(key).map_err(|e| e.in_section(key))? {
        Some(inner) => inner,
        None => return Ok(Vec::new()),
    };

    inner
        .iter()
        .map(|(name, _)| parse(name).map_err(|e| e.in_section(key)))
        .collect()
}

fn id_key(name: &str) -> Result<u32, Error> {
    u32::parse_token(name).ok_or_else(|| Error::token(name, name, u32::EXPECTED))
}

fn entries(view: RobTopView<'_, Value>, key: &str) -> Result<Vec<(String, String)>, Error> {
    let inner = match view.get_dict(key).map_err(|e| e.in_section(key))? {
        Some(inner) => inner,
        None => return Ok(Vec::new()),
    };
    Ok(inner
        .iter()
        .map(|(name, _)| (name.to_string(), inner.get_string(name)))
        .collect())
}

fn folders(view: RobTopView<'_, Value>, key: &str) -> Result<Vec<Folder>, Error> {
    entries(view, key)?
        .iter()
        .map(|(id, name)| Folder::from_entry(id, name).map_err(|e| e.in_section(key)))
        .collect()
}

fn ones<T: Token>(ids: impl IntoIterator<Item = T>) -> Value {
    let dict: Dict = ids
        .into_iter()
        .map(|id| (id.to_token(), Value::from("1")))
        .collect();
    Value::Dict(dict)
}

fn folders_dict(folders: &[Folder]) -> Value {
    let dict: Dict = folders
        .iter()
        .map(|folder| (folder.id.to_string(), Value::from(folder.name.as_str())))
        .collect();
    Value::Dict(dict)
}

impl Database {
    /// Decode the property list dictionaries of both save files
    pub fn from_plist_parts(main: &Dict, levels_dict: &Dict) -> Result<Self, Error> {
        let view = RobTopView::new(main);
        let defaults = Database::default();

        let achievements = entries(view, ACHIEVEMENTS)?
            .into_iter()
            .map(|(name, progress)| {
                u32::parse_token(&progress)
                    .map(|progress| (name.clone(), progress))
                    .ok_or_else(|| Error::token(&name, &progress, u32::EXPECTED).in_section(ACHIEVEMENTS))
            })
            .collect::<Result<_, _>>()?;

        log::trace!("decoding section {}", CUSTOM_OBJECTS);
        let custom_objects = entries(view, CUSTOM_OBJECTS)?
            .iter()
            .map(|(_, text)| objects_from_robtop(text).map_err(|e| e.in_section(CUSTOM_OBJECTS)))
            .collect::<Result<_, _>>()?;

        log::trace!("decoding section {}", SONGS);
        let songs = match view.get_dict(SONGS).map_err(|e| e.in_section(SONGS))? {
            Some(inner) => inner
                .iter()
                .map(|(_, value)| Song::from_value(value, "song").map_err(|e| e.in_section(SONGS)))
                .collect::<Result<_, _>>()?,
            None => Vec::new(),
        };

        let weekly_id = view.get_or_default::<u32>(WEEKLY_ID)?;

        let storage = Storage::from_plist(view).map_err(|e| e.in_section(STORAGE))?;

        let levels_view = RobTopView::new(levels_dict);
        let binary_version = levels_view
            .get_option::<i64>(LEVELS_BINARY_VERSION)?
            .map_or(RobTopVersion::CURRENT_BINARY, RobTopVersion::from_value);

        Ok(Database {
            volume: view.get_or(VOLUME, defaults.volume)?,
            sfx_volume: view.get_or(SFX_VOLUME, defaults.sfx_volume)?,
            udid: view.get_string(UDID),
            player_name: view.get_string(PLAYER_NAME),
            name: view.get_string(NAME),
            user_id: view.get_or_default(USER_ID)?,
            account_id: view.get_or_default(ACCOUNT_ID)?,
            password: view.get_string(PASSWORD),
            session_id: view.get_or_default(SESSION_ID)?,
            cube_id: view.get_or(CUBE_ID, DEFAULT_ICON_ID)?,
            ship_id: view.get_or(SHIP_ID, DEFAULT_ICON_ID)?,
            ball_id: view.get_or(BALL_ID, DEFAULT_ICON_ID)?,
            ufo_id: view.get_or(UFO_ID, DEFAULT_ICON_ID)?,
            wave_id: view.get_or(WAVE_ID, DEFAULT_ICON_ID)?,
            robot_id: view.get_or(ROBOT_ID, DEFAULT_ICON_ID)?,
            spider_id: view.get_or(SPIDER_ID, DEFAULT_ICON_ID)?,
            color_1_id: view.get_or(COLOR_1_ID, DEFAULT_COLOR_1_ID)?,
            color_2_id: view.get_or(COLOR_2_ID, DEFAULT_COLOR_2_ID)?,
            trail_id: view.get_or(TRAIL_ID, DEFAULT_ICON_ID)?,
            explosion_id: view.get_or(EXPLOSION_ID, DEFAULT_ICON_ID)?,
            icon_type: view.get_enum_or(ICON_TYPE, IconType::Cube)?,
            glow: view.get_or_default(GLOW)?,
            secret_value: view.get_or_default(SECRET_VALUE)?,
            moderator: view.get_or_default(MODERATOR)?,
            values: section(view, VALUES)?,
            unlock_values: section(view, UNLOCK_VALUES)?,
            custom_objects,
            storage,
            completed: section(view, COMPLETED)?,
            statistics: section(view, STATISTICS)?,
            show_song_markers: view.get_or(SHOW_SONG_MARKERS, true)?,
            show_progress_bar: view.get_or(SHOW_PROGRESS_BAR, true)?,
            clicked_icons: view.get_or(CLICKED_ICONS, true)?,
            clicked_editor: view.get_or(CLICKED_EDITOR, true)?,
            clicked_practice: view.get_or(CLICKED_PRACTICE, true)?,
            shown_editor_guide: view.get_or(SHOWN_EDITOR_GUIDE, true)?,
            shown_low_detail: view.get_or(SHOWN_LOW_DETAIL, true)?,
            bootups: view.get_or_default(BOOTUPS)?,
            rated_game: view.get_or_default(RATED_GAME)?,
            resolution: view.get_or_default(RESOLUTION)?,
            quality: view.get_enum_or(QUALITY, Quality::Auto)?,
            achievements,
            official_levels: levels(view, OFFICIAL_LEVELS)?,
            saved_levels: levels(view, SAVED_LEVELS)?,
            followed: keys(view, FOLLOWED, id_key)?.into_iter().collect(),
            last_played: keys(view, LAST_PLAYED, id_key)?.into_iter().collect(),
            timely_levels: levels(view, TIMELY_LEVELS)?,
            daily_id: view.get_or_default(DAILY_ID)?,
            weekly_id: TimelyId::decode(weekly_id).id(),
            liked: keys(view, LIKED, Like::from_robtop)?.into_iter().collect(),
            rated: keys(view, RATED, id_key)?.into_iter().collect(),
            reported: keys(view, REPORTED, id_key)?.into_iter().collect(),
            demon_rated: keys(view, DEMON_RATED, id_key)?.into_iter().collect(),
            gauntlet_levels: levels(view, GAUNTLET_LEVELS)?,
            saved_folders: folders(view, SAVED_FOLDERS)?,
            created_folders: folders(view, CREATED_FOLDERS)?,
            songs,
            priority: view.get_or_default(PRIORITY)?,
            created_levels: levels(levels_view, CREATED_LEVELS)?,
            binary_version,
        })
    }

    /// Encode into the property list dictionaries of both save files
    pub fn to_plist_parts(&self) -> (Dict, Dict) {
        log::trace!("encoding main save");
        let mut main = Dict::new();
        let mut put = |key: &str, value: Value| {
            main.insert(key.to_string(), value);
        };

        put(VOLUME, Value::Real(self.volume));
        put(SFX_VOLUME, Value::Real(self.sfx_volume));
        put(UDID, self.udid.as_str().into());
        put(PLAYER_NAME, self.player_name.as_str().into());
        put(USER_ID, self.user_id.into());
        put(CUBE_ID, self.cube_id.into());
        put(SHIP_ID, self.ship_id.into());
        put(BALL_ID, self.ball_id.into());
        put(UFO_ID, self.ufo_id.into());
        put(WAVE_ID, self.wave_id.into());
        put(ROBOT_ID, self.robot_id.into());
        put(SPIDER_ID, self.spider_id.into());
        put(COLOR_1_ID, self.color_1_id.into());
        put(COLOR_2_ID, self.color_2_id.into());
        put(TRAIL_ID, self.trail_id.into());
        put(EXPLOSION_ID, self.explosion_id.into());
        put(ICON_TYPE, self.icon_type.value().into());
        put(GLOW, self.glow.into());
        put(MODERATOR, self.moderator.into());
        put(SECRET_VALUE, self.secret_value.into());
        put(SHOW_SONG_MARKERS, self.show_song_markers.into());
        put(SHOW_PROGRESS_BAR, self.show_progress_bar.into());
        put(CLICKED_ICONS, self.clicked_icons.into());
        put(CLICKED_EDITOR, self.clicked_editor.into());
        put(CLICKED_PRACTICE, self.clicked_practice.into());
        put(SHOWN_EDITOR_GUIDE, self.shown_editor_guide.into());
        put(SHOWN_LOW_DETAIL, self.shown_low_detail.into());
        put(RATED_GAME, self.rated_game.into());
        put(BOOTUPS, self.bootups.into());
        put(RESOLUTION, self.resolution.into());
        put(QUALITY, self.quality.value().into());
        put(DAILY_ID, self.daily_id.into());
        put(WEEKLY_ID, TimelyId::Weekly(self.weekly_id).encode().into());
        put(NAME, self.name.as_str().into());
        put(PASSWORD, self.password.as_str().into());
        put(ACCOUNT_ID, self.account_id.into());
        put(SESSION_ID, self.session_id.into());

        let achievements: Dict = self
            .achievements
            .iter()
            .map(|(name, progress)| (name.clone(), Value::String(progress.to_token())))
            .collect();
        put(ACHIEVEMENTS, Value::Dict(achievements));
        put(VALUES, Value::Dict(self.values.to_plist()));
        put(UNLOCK_VALUES, Value::Dict(self.unlock_values.to_plist()));

        let custom_objects: Dict = self
            .custom_objects
            .iter()
            .enumerate()
            .map(|(index, objects)| {
                let key = format!("-{}", index + 1);
                (key, Value::String(objects_to_robtop(objects)))
            })
            .collect();
        put(CUSTOM_OBJECTS, Value::Dict(custom_objects));

        for (key, value) in self.storage.to_plist() {
            put(&key, value);
        }

        put(COMPLETED, Value::Dict(self.completed.to_plist()));
        put(STATISTICS, Value::Dict(self.statistics.to_plist()));
        put(OFFICIAL_LEVELS, Value::Dict(self.official_levels.to_dict()));
        put(SAVED_LEVELS, Value::Dict(self.saved_levels.to_dict()));
        put(FOLLOWED, ones(self.followed.iter().copied()));
        put(LAST_PLAYED, ones(self.last_played.iter().copied()));
        put(TIMELY_LEVELS, Value::Dict(self.timely_levels.to_dict()));

        let liked: Dict = self
            .liked
            .iter()
            .map(|like| (like.to_robtop(), Value::from("1")))
            .collect();
        put(LIKED, Value::Dict(liked));
        put(RATED, ones(self.rated.iter().copied()));
        put(REPORTED, ones(self.reported.iter().copied()));
        put(DEMON_RATED, ones(self.demon_rated.iter().copied()));
        put(GAUNTLET_LEVELS, Value::Dict(self.gauntlet_levels.to_dict()));
        put(SAVED_FOLDERS, folders_dict(&self.saved_folders));
        put(CREATED_FOLDERS, folders_dict(&self.created_folders));

        let songs: Dict = self
            .songs
            .iter()
            .map(|song| (song.id.to_string(), Value::Dict(song.to_plist())))
            .collect();
        put(SONGS, Value::Dict(songs));
        put(PRIORITY, self.priority.into());

        log::trace!("encoding levels save");
        let mut levels = Dict::new();
        levels.insert(
            String::from(CREATED_LEVELS),
            Value::Dict(self.created_levels.to_array()),
        );
        levels.insert(
            String::from(LEVELS_BINARY_VERSION),
            Value::Integer(self.binary_version.to_value()),
        );

        (main, levels)
    }

    /// Load a save from the raw contents of its main and levels files
    pub fn load<C: SaveCodec>(
        main: &[u8],
        levels: &[u8],
        codec: &C,
        apply_xor: bool,
    ) -> Result<Self, Error> {
        let main = parse(&codec.decode(main, apply_xor)?)?;
        let levels = parse(&codec.decode(levels, apply_xor)?)?;
        Database::from_plist_parts(&main, &levels)
    }

    /// Write the contents of the main and levels files.
    ///
    /// Every value is written, including falsy ones, since several flags
    /// default to true when absent.
    pub fn dump<C: SaveCodec>(&self, codec: &C, apply_xor: bool) -> Result<(Vec<u8>, Vec<u8>), Error> {
        let writer = PlistWriter::builder()
            .short(true)
            .ignore_falsy(false)
            .declaration(true)
            .build();
        let (main, levels) = self.to_plist_parts();
        let main = codec.encode(writer.write(&main).as_bytes(), apply_xor)?;
        let levels = codec.encode(writer.write(&levels).as_bytes(), apply_xor)?;
        Ok((main, levels))
    }
}

/// Read a binary section, naming it on failure
fn read_section<T: FromBinary>(
    reader: &mut Reader<'_>,
    order: ByteOrder,
    name: &str,
) -> Result<T, Error> {
    log::trace!("reading binary section {} at {}", name, reader.offset());
    T::from_binary(reader, order).map_err(|e| e.in_section(name))
}

/// The binary version stamp followed by every section in declaration order
impl FromBinary for Database {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let version = RobTopVersion::from_binary(reader, order)?;
        reader.set_version(version);

        Ok(Database {
            volume: reader.read_f64(order)?,
            sfx_volume: reader.read_f64(order)?,
            udid: reader.read_string(order)?,
            player_name: reader.read_string(order)?,
            name: reader.read_string(order)?,
            user_id: reader.read_u32(order)?,
            account_id: reader.read_u32(order)?,
            password: reader.read_string(order)?,
            session_id: reader.read_u32(order)?,
            cube_id: reader.read_u16(order)?,
            ship_id: reader.read_u16(order)?,
            ball_id: reader.read_u16(order)?,
            ufo_id: reader.read_u16(order)?,
            wave_id: reader.read_u16(order)?,
            robot_id: reader.read_u16(order)?,
            spider_id: reader.read_u16(order)?,
            color_1_id: reader.read_u16(order)?,
            color_2_id: reader.read_u16(order)?,
            trail_id: reader.read_u16(order)?,
            explosion_id: reader.read_u16(order)?,
            icon_type: IconType::from_binary(reader, order)?,
            glow: reader.read_bool(order)?,
            secret_value: reader.read_i64(order)?,
            moderator: reader.read_bool(order)?,
            values: read_section(reader, order, VALUES)?,
            unlock_values: read_section(reader, order, UNLOCK_VALUES)?,
            custom_objects: read_section(reader, order, CUSTOM_OBJECTS)?,
            storage: read_section(reader, order, STORAGE)?,
            completed: read_section(reader, order, COMPLETED)?,
            statistics: read_section(reader, order, STATISTICS)?,
            show_song_markers: reader.read_bool(order)?,
            show_progress_bar: reader.read_bool(order)?,
            clicked_icons: reader.read_bool(order)?,
            clicked_editor: reader.read_bool(order)?,
            clicked_practice: reader.read_bool(order)?,
            shown_editor_guide: reader.read_bool(order)?,
            shown_low_detail: reader.read_bool(order)?,
            bootups: reader.read_u32(order)?,
            rated_game: reader.read_bool(order)?,
            resolution: reader.read_i32(order)?,
            quality: Quality::from_binary(reader, order)?,
            achievements: read_section(reader, order, ACHIEVEMENTS)?,
            official_levels: read_section(reader, order, OFFICIAL_LEVELS)?,
            saved_levels: read_section(reader, order, SAVED_LEVELS)?,
            followed: read_section(reader, order, FOLLOWED)?,
            last_played: read_section(reader, order, LAST_PLAYED)?,
            timely_levels: read_section(reader, order, TIMELY_LEVELS)?,
            daily_id: reader.read_u32(order)?,
            weekly_id: reader.read_u32(order)?,
            liked: read_section(reader, order, LIKED)?,
            rated: read_section(reader, order, RATED)?,
            reported: read_section(reader, order, REPORTED)?,
            demon_rated: read_section(reader, order, DEMON_RATED)?,
            gauntlet_levels: read_section(reader, order, GAUNTLET_LEVELS)?,
            saved_folders: read_section(reader, order, SAVED_FOLDERS)?,
            created_folders: read_section(reader, order, CREATED_FOLDERS)?,
            songs: read_section(reader, order, SONGS)?,
            priority: reader.read_u32(order)?,
            created_levels: read_section(reader, order, CREATED_LEVELS)?,
            binary_version: version,
        })
    }
}

impl ToBinary for Database {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.binary_version.to_binary(writer, order);
        writer.set_version(self.binary_version);

        writer.write_f64(self.volume, order);
        writer.write_f64(self.sfx_volume, order);
        writer.write_string(&self.udid, order);
        writer.write_string(&self.player_name, order);
        writer.write_string(&self.name, order);
        writer.write_u32(self.user_id, order);
        writer.write_u32(self.account_id, order);
        writer.write_string(&self.password, order);
        writer.write_u32(self.session_id, order);
        for id in [
            self.cube_id,
            self.ship_id,
            self.ball_id,
            self.ufo_id,
            self.wave_id,
            self.robot_id,
            self.spider_id,
            self.color_1_id,
            self.color_2_id,
            self.trail_id,
            self.explosion_id,
        ] {
            writer.write_u16(id, order);
        }
        self.icon_type.to_binary(writer, order);
        writer.write_bool(self.glow, order);
        writer.write_i64(self.secret_value, order);
        writer.write_bool(self.moderator, order);
        self.values.to_binary(writer, order);
        self.unlock_values.to_binary(writer, order);
        self.custom_objects.to_binary(writer, order);
        self.storage.to_binary(writer, order);
        self.completed.to_binary(writer, order);
        self.statistics.to_binary(writer, order);
        for flag in [
            self.show_song_markers,
            self.show_progress_bar,
            self.clicked_icons,
            self.clicked_editor,
            self.clicked_practice,
            self.shown_editor_guide,
            self.shown_low_detail,
        ] {
            writer.write_bool(flag, order);
        }
        writer.write_u32(self.bootups, order);
        writer.write_bool(self.rated_game, order);
        writer.write_i32(self.resolution, order);
        self.quality.to_binary(writer, order);
        self.achievements.to_binary(writer, order);
        self.official_levels.to_binary(writer, order);
        self.saved_levels.to_binary(writer, order);
        self.followed.to_binary(writer, order);
        self.last_played.to_binary(writer, order);
        self.timely_levels.to_binary(writer, order);
        writer.write_u32(self.daily_id, order);
        writer.write_u32(self.weekly_id, order);
        self.liked.to_binary(writer, order);
        self.rated.to_binary(writer, order);
        self.reported.to_binary(writer, order);
        self.demon_rated.to_binary(writer, order);
        self.gauntlet_levels.to_binary(writer, order);
        self.saved_folders.to_binary(writer, order);
        self.created_folders.to_binary(writer, order);
        self.songs.to_binary(writer, order);
        writer.write_u32(self.priority, order);
        self.created_levels.to_binary(writer, order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};
    use crate::compression::Identity;
    use crate::models::{Artist, LikeType};
    use crate::ErrorKind;

    fn database() -> Database {
        let mut database = Database {
            player_name: String::from("Kappa"),
            user_id: 2_536_811,
            ship_id: 12,
            icon_type: IconType::Wave,
            glow: true,
            show_progress_bar: false,
            daily_id: 1_900,
            weekly_id: 210,
            quality: Quality::High,
            ..Database::default()
        };
        database.achievements.insert(String::from("geometry.ach.level01a"), 1);
        database.custom_objects.push(objects_from_robtop("1,1,2,15,3,15;").unwrap());
        database.followed.insert(71);
        database.liked.insert(Like {
            like_type: LikeType::Level,
            id: 30_029_017,
            liked: true,
            other_id: 0,
        });
        database.saved_folders.push(Folder::new(1, "Demons"));
        database.songs.push(Song {
            id: 546_561,
            name: String::from("At the Speed of Light"),
            artist: Artist {
                id: 48_541,
                name: String::from("Dimrain47"),
            },
            size: 9.56,
            priority: 0,
            download_url: None,
        });
        database.values.variables.set_follow_player(false);
        database.statistics.jumps = 100;
        database.completed.map_packs.insert(18);
        database.storage.total_keys = 7;
        database
    }

    #[test]
    fn empty_save_round_trips() {
        let (main, levels) = Database::default().dump(&Identity, false).unwrap();
        let loaded = Database::load(&main, &levels, &Identity, false).unwrap();
        assert_eq!(loaded, Database::default());
    }

    #[test]
    fn plist_round_trip() {
        let database = database();
        let (main, levels) = database.to_plist_parts();
        assert_eq!(main[WEEKLY_ID], Value::Integer(100_210));
        assert_eq!(main[SHOW_PROGRESS_BAR], Value::Bool(false));
        assert!(main[LIKED].as_dict().unwrap().contains_key("like_1_30029017_1_0"));
        assert!(levels[CREATED_LEVELS].as_dict().unwrap().contains_key("_isArr"));

        let decoded = Database::from_plist_parts(&main, &levels).unwrap();
        assert_eq!(decoded, database);
    }

    #[test]
    fn dump_and_load() {
        let database = database();
        let (main, levels) = database.dump(&Identity, false).unwrap();
        assert!(main.starts_with(b"<?xml"));
        let loaded = Database::load(&main, &levels, &Identity, false).unwrap();
        assert_eq!(loaded, database);
    }

    #[test]
    fn absent_flags_default_to_true() {
        let database = Database::from_plist_parts(&Dict::new(), &Dict::new()).unwrap();
        assert!(database.show_song_markers);
        assert!(database.clicked_editor);
        assert_eq!(database.volume, 1.0);
        assert_eq!(database.color_2_id, 3);
        assert_eq!(database.binary_version, RobTopVersion::CURRENT_BINARY);
    }

    #[test]
    fn section_failures_name_the_key() {
        let mut main = Dict::new();
        let mut statistics = Dict::new();
        statistics.insert(String::from("3"), Value::from("many"));
        main.insert(String::from(STATISTICS), Value::Dict(statistics));

        let err = Database::from_plist_parts(&main, &Dict::new()).unwrap_err();
        match err.kind() {
            ErrorKind::Section { section, .. } => assert_eq!(section, STATISTICS),
            kind => panic!("unexpected error {:?}", kind),
        }
    }

    #[test]
    fn binary_round_trip() {
        let database = database();
        let options = BinaryOptions::new();
        let data = to_bytes(&database, &options).unwrap();
        assert_eq!(&data[..2], &[3, 8]);
        assert_eq!(from_bytes::<Database>(&data, &options).unwrap(), database);
    }

    #[test]
    fn older_binary_stamp_survives() {
        let mut database = database();
        database.binary_version = RobTopVersion::new(3, 7);
        let options = BinaryOptions::new();
        let data = to_bytes(&database, &options).unwrap();
        assert_eq!(&data[..2], &[3, 7]);

        let decoded = from_bytes::<Database>(&data, &options).unwrap();
        assert_eq!(decoded.binary_version, RobTopVersion::new(3, 7));
        assert_eq!(decoded, database);
    }

    #[test]
    fn storage_failures_are_sectioned() {
        let mut main = Dict::new();
        main.insert(String::from("GS_20"), Value::from("many"));

        let err = Database::from_plist_parts(&main, &Dict::new()).unwrap_err();
        match err.into_kind() {
            ErrorKind::Section { section, source } => {
                assert_eq!(section, STORAGE);
                assert!(matches!(source.kind(), ErrorKind::Token { key, .. } if key == "GS_20"));
            }
            kind => panic!("unexpected error {:?}", kind),
        }
    }

    #[test]
    fn negative_weekly_id_is_rejected() {
        let mut main = Dict::new();
        main.insert(String::from(WEEKLY_ID), Value::Integer(-1));
        let err = Database::from_plist_parts(&main, &Dict::new()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Token { key, .. } if key == WEEKLY_ID));
    }

    #[test]
    fn truncated_binary_fails() {
        let options = BinaryOptions::new();
        let data = to_bytes(&database(), &options).unwrap();
        assert!(from_bytes::<Database>(&data[..data.len() / 2], &options).is_err());
    }
}
