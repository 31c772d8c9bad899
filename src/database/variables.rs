use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::models::{CommentStrategy, Filter, LevelLeaderboardStrategy};
use crate::plist::{Dict, Value};
use crate::text::{bool_str, int_bool, RobTopEnum, RobTopView, Token};
use crate::Error;
use indexmap::IndexMap;

const PREFIX: &str = "gv_";
const FILTER: &str = "gv_0005";
const SELECT_FILTER: &str = "gv_0064";
const FILTER_ID: &str = "gv_0006";
const BUTTONS_PER_ROW: &str = "gv_0049";
const BUTTON_ROWS: &str = "gv_0050";
const COMMENT_STRATEGY: &str = "gv_0069";
const CREATED_LEVELS_FOLDER_ID: &str = "gv_0091";
const SAVED_LEVELS_FOLDER_ID: &str = "gv_0092";
const LEVEL_LEADERBOARD_STRATEGY: &str = "gv_0098";

const INT_KEYS: &[&str] = &[
    FILTER,
    SELECT_FILTER,
    FILTER_ID,
    BUTTONS_PER_ROW,
    BUTTON_ROWS,
    COMMENT_STRATEGY,
    CREATED_LEVELS_FOLDER_ID,
    SAVED_LEVELS_FOLDER_ID,
    LEVEL_LEADERBOARD_STRATEGY,
];

/// Game options stored as `gv_` entries of the value keeper
///
/// Every entry is kept in order as found, including the ones without an
/// accessor, so options added by newer game versions survive a round trip.
/// Absent options read as the game's defaults.
///
/// ```
/// use robtop::database::Variables;
/// use robtop::models::Filter;
///
/// let mut variables = Variables::new();
/// assert!(variables.follow_player());
/// variables.set_follow_player(false);
/// variables.set_filter(Filter::Static);
/// assert!(!variables.follow_player());
/// assert_eq!(variables.get("gv_0001"), Some("0"));
/// assert_eq!(variables.get("gv_0064"), Some("2"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
#[cfg_attr(feature = "derive", serde(transparent))]
pub struct Variables {
    entries: IndexMap<String, String>,
}

macro_rules! bool_variables {
    ($($getter:ident, $setter:ident = $key:expr, $default:expr;)*) => {
        const BOOL_KEYS: &[&str] = &[$($key,)*];

        impl Variables {
            $(
                pub fn $getter(&self) -> bool {
                    self.get_bool($key, $default)
                }

                pub fn $setter(&mut self, value: bool) {
                    self.set($key, bool_str(value));
                }
            )*
        }
    };
}

bool_variables! {
    follow_player, set_follow_player = "gv_0001", true;
    play_music, set_play_music = "gv_0002", true;
    swipe, set_swipe = "gv_0003", false;
    free_move, set_free_move = "gv_0004", false;
    rotate_toggled, set_rotate_toggled = "gv_0007", false;
    snap_toggled, set_snap_toggled = "gv_0008", false;
    ignore_damage, set_ignore_damage = "gv_0009", true;
    flip_two_player_controls, set_flip_two_player_controls = "gv_0010", false;
    always_limit_controls, set_always_limit_controls = "gv_0011", false;
    shown_comment_rules, set_shown_comment_rules = "gv_0012", true;
    increase_max_history, set_increase_max_history = "gv_0013", true;
    disable_explosion_shake, set_disable_explosion_shake = "gv_0014", false;
    flip_pause_button, set_flip_pause_button = "gv_0015", false;
    shown_song_terms, set_shown_song_terms = "gv_0016", false;
    no_song_limit, set_no_song_limit = "gv_0018", true;
    in_memory_songs, set_in_memory_songs = "gv_0019", true;
    higher_audio_quality, set_higher_audio_quality = "gv_0022", true;
    smooth_fix, set_smooth_fix = "gv_0023", false;
    show_cursor_in_game, set_show_cursor_in_game = "gv_0024", false;
    windowed, set_windowed = "gv_0025", false;
    auto_retry, set_auto_retry = "gv_0026", true;
    auto_checkpoints, set_auto_checkpoints = "gv_0027", true;
    disable_analog_stick, set_disable_analog_stick = "gv_0028", false;
    shown_options, set_shown_options = "gv_0029", true;
    vsync, set_vsync = "gv_0030", true;
    call_gl_finish, set_call_gl_finish = "gv_0031", false;
    force_timer, set_force_timer = "gv_0032", false;
    change_song_path, set_change_song_path = "gv_0033", false;
    game_center, set_game_center = "gv_0034", false;
    preview_mode, set_preview_mode = "gv_0036", true;
    show_ground, set_show_ground = "gv_0037", false;
    show_grid, set_show_grid = "gv_0038", true;
    grid_on_top, set_grid_on_top = "gv_0039", false;
    show_percentage, set_show_percentage = "gv_0040", true;
    show_object_info, set_show_object_info = "gv_0041", true;
    increase_max_levels, set_increase_max_levels = "gv_0042", true;
    show_effect_lines, set_show_effect_lines = "gv_0043", true;
    show_trigger_boxes, set_show_trigger_boxes = "gv_0044", true;
    debug_draw, set_debug_draw = "gv_0045", false;
    hide_ui_on_test, set_hide_ui_on_test = "gv_0046", false;
    shown_profile_info, set_shown_profile_info = "gv_0047", true;
    viewed_self_profile, set_viewed_self_profile = "gv_0048", true;
    shown_newgrounds_message, set_shown_newgrounds_message = "gv_0051", true;
    fast_practice_reset, set_fast_practice_reset = "gv_0052", false;
    free_games, set_free_games = "gv_0053", false;
    check_server_online, set_check_server_online = "gv_0055", false;
    disable_high_detail_alert, set_disable_high_detail_alert = "gv_0056", true;
    hold_to_swipe, set_hold_to_swipe = "gv_0057", false;
    show_duration_lines, set_show_duration_lines = "gv_0058", false;
    swipe_cycle, set_swipe_cycle = "gv_0059", false;
    default_mini_icon, set_default_mini_icon = "gv_0060", false;
    switch_spider_teleport_color, set_switch_spider_teleport_color = "gv_0061", false;
    switch_dash_fire_color, set_switch_dash_fire_color = "gv_0062", false;
    shown_unverified_coins_message, set_shown_unverified_coins_message = "gv_0063", true;
    enable_move_optimization, set_enable_move_optimization = "gv_0065", false;
    high_capacity, set_high_capacity = "gv_0066", true;
    high_start_position_accuracy, set_high_start_position_accuracy = "gv_0067", true;
    quick_checkpoints, set_quick_checkpoints = "gv_0068", false;
    shown_unlisted_level_message, set_shown_unlisted_level_message = "gv_0070", true;
    disable_gravity_effect, set_disable_gravity_effect = "gv_0072", false;
    new_completed_filter, set_new_completed_filter = "gv_0073", false;
    show_restart_button, set_show_restart_button = "gv_0074", true;
    disable_level_comments, set_disable_level_comments = "gv_0075", false;
    disable_user_comments, set_disable_user_comments = "gv_0076", false;
    featured_levels_only, set_featured_levels_only = "gv_0077", false;
    hide_background, set_hide_background = "gv_0078", false;
    hide_grid_on_play, set_hide_grid_on_play = "gv_0079", true;
    disable_shake, set_disable_shake = "gv_0081", false;
    disable_high_detail_alert_other, set_disable_high_detail_alert_other = "gv_0082", true;
    disable_song_alert, set_disable_song_alert = "gv_0083", true;
    manual_order, set_manual_order = "gv_0084", false;
    small_comments, set_small_comments = "gv_0088", false;
    hide_description, set_hide_description = "gv_0089", true;
    auto_load_comments, set_auto_load_comments = "gv_0090", true;
    increase_local_levels_per_page, set_increase_local_levels_per_page = "gv_0093", true;
    more_comments, set_more_comments = "gv_0094", false;
    just_do_not, set_just_do_not = "gv_0095", false;
    switch_wave_trail_color, set_switch_wave_trail_color = "gv_0096", false;
    enable_link_controls, set_enable_link_controls = "gv_0097", false;
    show_record, set_show_record = "gv_0099", true;
    // the game writes this one without padding
    practice_death_effect, set_practice_death_effect = "gv_100", false;
    force_smooth_fix, set_force_smooth_fix = "gv_0101", false;
    smooth_fix_in_editor, set_smooth_fix_in_editor = "gv_0102", false;
}

impl Variables {
    pub fn new() -> Self {
        Variables::default()
    }

    /// The raw value of an entry
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key)
            .and_then(|x| int_bool(x).ok())
            .unwrap_or(default)
    }

    fn get_int<T: Token>(&self, key: &str, default: T) -> T {
        self.get(key).and_then(T::parse_token).unwrap_or(default)
    }

    fn get_enum<E: RobTopEnum>(&self, key: &str, default: E) -> E {
        self.get(key)
            .and_then(i64::parse_token)
            .and_then(E::from_value)
            .unwrap_or(default)
    }

    /// The editor filter. Setting it also updates the selected filter that
    /// the game keeps as a copy.
    pub fn filter(&self) -> Filter {
        self.get_enum(FILTER, Filter::None)
    }

    pub fn set_filter(&mut self, filter: Filter) {
        let value = filter.value().to_string();
        self.set(SELECT_FILTER, value.clone());
        self.set(FILTER, value);
    }

    pub fn filter_id(&self) -> u32 {
        self.get_int(FILTER_ID, 0)
    }

    pub fn set_filter_id(&mut self, id: u32) {
        self.set(FILTER_ID, id.to_token());
    }

    /// Editor buttons per row
    pub fn buttons_per_row(&self) -> u32 {
        self.get_int(BUTTONS_PER_ROW, 6)
    }

    pub fn set_buttons_per_row(&mut self, value: u32) {
        self.set(BUTTONS_PER_ROW, value.to_token());
    }

    /// Editor button rows
    pub fn button_rows(&self) -> u32 {
        self.get_int(BUTTON_ROWS, 2)
    }

    pub fn set_button_rows(&mut self, value: u32) {
        self.set(BUTTON_ROWS, value.to_token());
    }

    pub fn comment_strategy(&self) -> CommentStrategy {
        self.get_enum(COMMENT_STRATEGY, CommentStrategy::Recent)
    }

    pub fn set_comment_strategy(&mut self, strategy: CommentStrategy) {
        self.set(COMMENT_STRATEGY, strategy.value().to_string());
    }

    pub fn created_levels_folder_id(&self) -> u32 {
        self.get_int(CREATED_LEVELS_FOLDER_ID, 0)
    }

    pub fn set_created_levels_folder_id(&mut self, id: u32) {
        self.set(CREATED_LEVELS_FOLDER_ID, id.to_token());
    }

    pub fn saved_levels_folder_id(&self) -> u32 {
        self.get_int(SAVED_LEVELS_FOLDER_ID, 0)
    }

    pub fn set_saved_levels_folder_id(&mut self, id: u32) {
        self.set(SAVED_LEVELS_FOLDER_ID, id.to_token());
    }

    pub fn level_leaderboard_strategy(&self) -> LevelLeaderboardStrategy {
        self.get_enum(LEVEL_LEADERBOARD_STRATEGY, LevelLeaderboardStrategy::All)
    }

    pub fn set_level_leaderboard_strategy(&mut self, strategy: LevelLeaderboardStrategy) {
        self.set(LEVEL_LEADERBOARD_STRATEGY, strategy.value().to_string());
    }

    /// Collect the `gv_` entries of a mapping. Known options must hold
    /// tokens of their type.
    pub fn from_view(view: RobTopView<'_, Value>) -> Result<Self, Error> {
        let mut entries = IndexMap::new();
        for (key, _) in view.iter() {
            if !key.starts_with(PREFIX) {
                continue;
            }

            if BOOL_KEYS.contains(&key) {
                view.get_or_default::<bool>(key)?;
            } else if INT_KEYS.contains(&key) {
                view.get_or_default::<i64>(key)?;
            }

            entries.insert(key.to_string(), view.get_string(key));
        }
        Ok(Variables { entries })
    }

    pub fn write(&self, dict: &mut Dict) {
        for (key, value) in &self.entries {
            dict.insert(key.clone(), Value::String(value.clone()));
        }
    }
}

impl FromBinary for Variables {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        IndexMap::from_binary(reader, order).map(|entries| Variables { entries })
    }
}

impl ToBinary for Variables {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.entries.to_binary(writer, order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};
    use rstest::*;

    fn view_of(entries: &[(&str, &str)]) -> Dict {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect()
    }

    #[rstest]
    #[case("gv_0001", "0", false)]
    #[case("gv_0001", "1", true)]
    #[case("gv_0003", "1", true)]
    #[case("gv_0099", "", false)]
    fn bools_read_back(#[case] key: &str, #[case] value: &str, #[case] expected: bool) {
        let dict = view_of(&[(key, value)]);
        let variables = Variables::from_view(RobTopView::new(&dict)).unwrap();
        let actual = match key {
            "gv_0001" => variables.follow_player(),
            "gv_0003" => variables.swipe(),
            _ => variables.show_record(),
        };
        assert_eq!(actual, expected);
    }

    #[test]
    fn absent_options_use_defaults() {
        let variables = Variables::new();
        assert!(variables.show_grid());
        assert!(!variables.debug_draw());
        assert_eq!(variables.buttons_per_row(), 6);
        assert_eq!(variables.button_rows(), 2);
        assert_eq!(variables.level_leaderboard_strategy(), LevelLeaderboardStrategy::All);
    }

    #[test]
    fn unknown_entries_survive() {
        let dict = view_of(&[("gv_0130", "7"), ("i_3", "1"), ("gv_0002", "0")]);
        let variables = Variables::from_view(RobTopView::new(&dict)).unwrap();
        assert_eq!(variables.len(), 2);
        assert_eq!(variables.get("gv_0130"), Some("7"));
        assert!(!variables.play_music());

        let mut out = Dict::new();
        variables.write(&mut out);
        assert_eq!(out.keys().collect::<Vec<_>>(), vec!["gv_0130", "gv_0002"]);
    }

    #[test]
    fn malformed_known_option_names_key() {
        let dict = view_of(&[("gv_0049", "wide")]);
        let err = Variables::from_view(RobTopView::new(&dict)).unwrap_err();
        assert!(err.to_string().contains("gv_0049"));
    }

    #[test]
    fn binary_round_trip() {
        let mut variables = Variables::new();
        variables.set_filter(Filter::Custom);
        variables.set_hide_background(true);
        let options = BinaryOptions::new();
        let data = to_bytes(&variables, &options).unwrap();
        assert_eq!(from_bytes::<Variables>(&data, &options).unwrap(), variables);
    }
}
