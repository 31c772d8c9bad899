//! Text keys of level objects. Keys are shared between object kinds, so the
//! same number may mean different things depending on the object id.

pub(crate) const ID: &str = "1";
pub(crate) const X: &str = "2";
pub(crate) const Y: &str = "3";
pub(crate) const H_FLIPPED: &str = "4";
pub(crate) const V_FLIPPED: &str = "5";
pub(crate) const ROTATION: &str = "6";
pub(crate) const RED: &str = "7";
pub(crate) const GREEN: &str = "8";
pub(crate) const BLUE: &str = "9";
pub(crate) const DURATION: &str = "10";
pub(crate) const TOUCH_TRIGGERED: &str = "11";
pub(crate) const COIN_ID: &str = "12";
pub(crate) const SPECIAL_CHECKED: &str = "13";
pub(crate) const TINT_GROUND: &str = "14";
pub(crate) const PLAYER_COLOR_1: &str = "15";
pub(crate) const PLAYER_COLOR_2: &str = "16";
pub(crate) const BLENDING: &str = "17";
pub(crate) const LEGACY_COLOR_ID: &str = "19";
pub(crate) const BASE_EDITOR_LAYER: &str = "20";
pub(crate) const BASE_COLOR_ID: &str = "21";
pub(crate) const DETAIL_COLOR_ID: &str = "22";
pub(crate) const TARGET_COLOR_ID: &str = "23";
pub(crate) const Z_LAYER: &str = "24";
pub(crate) const Z_ORDER: &str = "25";
pub(crate) const X_OFFSET: &str = "28";
pub(crate) const Y_OFFSET: &str = "29";
pub(crate) const EASING: &str = "30";
pub(crate) const CONTENT: &str = "31";
pub(crate) const SCALE: &str = "32";
pub(crate) const SINGLE_GROUP_ID: &str = "33";
pub(crate) const GROUP_PARENT: &str = "34";
pub(crate) const OPACITY: &str = "35";
pub(crate) const UNKNOWN: &str = "36";
pub(crate) const BASE_HSV_MODIFIED: &str = "41";
pub(crate) const DETAIL_HSV_MODIFIED: &str = "42";
pub(crate) const BASE_HSV: &str = "43";
pub(crate) const DETAIL_HSV: &str = "44";
pub(crate) const FADE_IN: &str = "45";
pub(crate) const HOLD: &str = "46";
pub(crate) const FADE_OUT: &str = "47";
pub(crate) const PULSE_MODE: &str = "48";
pub(crate) const COPIED_HSV: &str = "49";
pub(crate) const COPIED_COLOR_ID: &str = "50";
pub(crate) const TARGET_GROUP_ID: &str = "51";
pub(crate) const PULSE_TARGET_TYPE: &str = "52";
pub(crate) const PORTAL_OFFSET: &str = "54";
pub(crate) const SMOOTH: &str = "55";
pub(crate) const ACTIVATE_GROUP: &str = "56";
pub(crate) const GROUP_IDS: &str = "57";
pub(crate) const LOCKED_TO_PLAYER_X: &str = "58";
pub(crate) const LOCKED_TO_PLAYER_Y: &str = "59";
pub(crate) const COPY_OPACITY: &str = "60";
pub(crate) const ADDITIONAL_EDITOR_LAYER: &str = "61";
pub(crate) const SPAWN_TRIGGERED: &str = "62";
pub(crate) const SPAWN_DELAY: &str = "63";
pub(crate) const DO_NOT_FADE: &str = "64";
pub(crate) const MAIN_ONLY: &str = "65";
pub(crate) const DETAIL_ONLY: &str = "66";
pub(crate) const DO_NOT_ENTER: &str = "67";
pub(crate) const DEGREES: &str = "68";
pub(crate) const ROTATIONS: &str = "69";
pub(crate) const ROTATION_LOCKED: &str = "70";
pub(crate) const ADDITIONAL_GROUP_ID: &str = "71";
pub(crate) const X_MODIFIER: &str = "72";
pub(crate) const Y_MODIFIER: &str = "73";
pub(crate) const STRENGTH: &str = "75";
pub(crate) const ANIMATION_ID: &str = "76";
pub(crate) const COUNT: &str = "77";
pub(crate) const SUBTRACT_COUNT: &str = "78";
pub(crate) const ITEM_MODE: &str = "79";
pub(crate) const ITEM_ID: &str = "80";
pub(crate) const BLOCK_ID: &str = "80";
pub(crate) const HOLD_MODE: &str = "81";
pub(crate) const TOGGLE_TYPE: &str = "82";
pub(crate) const INTERVAL: &str = "84";
pub(crate) const EASING_RATE: &str = "85";
pub(crate) const EXCLUSIVE: &str = "86";
pub(crate) const MULTI_TRIGGER: &str = "87";
pub(crate) const COMPARISON: &str = "88";
pub(crate) const DUAL_MODE: &str = "89";
pub(crate) const SPEED: &str = "90";
pub(crate) const FOLLOW_DELAY: &str = "91";
pub(crate) const OFFSET: &str = "92";
pub(crate) const TRIGGER_ON_EXIT: &str = "93";
pub(crate) const DYNAMIC: &str = "94";
pub(crate) const BLOCK_B_ID: &str = "95";
pub(crate) const DISABLE_GLOW: &str = "96";
pub(crate) const ROTATION_SPEED: &str = "97";
pub(crate) const DISABLE_ROTATION: &str = "98";
pub(crate) const ORB_MULTI_ACTIVATE: &str = "99";
pub(crate) const USE_TARGET: &str = "100";
pub(crate) const TARGET_TYPE: &str = "101";
pub(crate) const EDITOR_DISABLE: &str = "102";
pub(crate) const HIGH_DETAIL: &str = "103";
pub(crate) const TRIGGER_MULTI_ACTIVATE: &str = "104";
pub(crate) const MAX_SPEED: &str = "105";
pub(crate) const RANDOMIZE_START: &str = "106";
pub(crate) const ANIMATION_SPEED: &str = "107";
pub(crate) const LINK_ID: &str = "108";

pub(crate) const START_GAME_MODE: &str = "kA2";
pub(crate) const START_MINI_MODE: &str = "kA3";
pub(crate) const START_SPEED: &str = "kA4";
pub(crate) const START_DUAL_MODE: &str = "kA8";
pub(crate) const START_POSITION: &str = "kA9";
pub(crate) const START_FLIP_GRAVITY: &str = "kA11";
