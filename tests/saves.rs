use robtop::binary::{from_bytes, to_bytes, BinaryOptions, ByteOrder};
use robtop::compression::Identity;
use robtop::database::Database;
use robtop::models::{IconType, Object};
use robtop::{ErrorKind, RobTopVersion};
use rstest::*;

const MAIN: &[u8] = br#"<?xml version="1.0"?><plist version="1.0" gjver="2.0"><dict><k>bgVolume</k><r>0.25</r><k>playerName</k><s>Kappa</s><k>playerUserID</k><i>2536811</i><k>playerShip</k><i>12</i><k>playerIconType</k><i>4</i><k>playerGlow</k><t /><k>showProgressBar</k><f /><k>valueKeeper</k><d><k>gv_0001</k><s>0</s><k>gv_0999</k><s>1</s><k>i_12</k><s>1</s><k>ship_3</k><s>1</s></d><k>unlockValueKeeper</k><d><k>ugv_1</k><s>1</s></d><k>GS_value</k><d><k>1</k><s>2048</s></d><k>GLM_03</k><d><k>30029017</k><d><k>kCEK</k><i>4</i><k>k1</k><i>30029017</i><k>k2</k><s>Bloodbath</s><k>k21</k><i>3</i><k>k18</k><i>15</i></d></d><k>GLM_06</k><d><k>71</k><s>1</s></d><k>GLM_17</k><i>100210</i><k>customObjectDict</k><d><k>c_1</k><s>1,1,2,15,3,15;</s></d></dict></plist>"#;

const LEVELS: &[u8] = br#"<?xml version="1.0"?><plist version="1.0" gjver="2.0"><dict><k>LLM_01</k><d><k>_isArr</k><t /><k>k_0</k><d><k>kCEK</k><i>4</i><k>k1</k><i>0</i><k>k2</k><s>Unnamed 0</s><k>k21</k><i>2</i><k>k4</k><s>kA4,0;1,1,2,15,3,15;</s></d></d><k>LLM_02</k><i>38</i></dict></plist>"#;

fn database() -> Database {
    Database::load(MAIN, LEVELS, &Identity, false).unwrap()
}

#[test]
fn save_decodes() {
    let database = database();
    assert_eq!(database.volume, 0.25);
    assert_eq!(database.sfx_volume, 1.0);
    assert_eq!(database.player_name, "Kappa");
    assert_eq!(database.user_id, 2_536_811);
    assert_eq!(database.ship_id, 12);
    assert_eq!(database.icon_type, IconType::Wave);
    assert!(database.glow);
    assert!(!database.show_progress_bar);
    assert!(database.show_song_markers);
    assert_eq!(database.weekly_id, 210);
    assert_eq!(database.statistics.jumps, 2048);
    assert!(database.unlock_values.the_challenge_unlocked);
    assert!(!database.values.variables.follow_player());
    assert_eq!(database.values.variables.get("gv_0999"), Some("1"));
    assert!(database.values.cubes.contains(&12));
    assert!(database.followed.contains(&71));
    assert_eq!(database.custom_objects, vec![vec![Object::new(1, 15.0, 15.0)]]);
    assert_eq!(database.binary_version, RobTopVersion::new(3, 8));

    let level = database.saved_levels.get(30_029_017).unwrap();
    assert_eq!(level.custom.base.name, "Bloodbath");
    assert_eq!(level.custom.base.attempts, 15);

    let created = database.created_levels.iter().next().unwrap();
    assert_eq!(created.custom.base.name, "Unnamed 0");
    assert_eq!(created.custom.data, "kA4,0;1,1,2,15,3,15;");
}

#[test]
fn save_survives_dump() {
    let database = database();
    let (main, levels) = database.dump(&Identity, false).unwrap();
    assert_eq!(Database::load(&main, &levels, &Identity, false).unwrap(), database);
}

#[rstest]
#[case(ByteOrder::Little)]
#[case(ByteOrder::Big)]
fn save_survives_binary(#[case] order: ByteOrder) {
    let database = database();
    let options = BinaryOptions::new().order(order);
    let data = to_bytes(&database, &options).unwrap();
    assert_eq!(from_bytes::<Database>(&data, &options).unwrap(), database);
}

#[test]
fn broken_section_is_named() {
    let main = br#"<?xml version="1.0"?><plist version="1.0" gjver="2.0"><dict><k>GS_value</k><d><k>1</k><s>many</s></d></dict></plist>"#;
    let err = Database::load(main, LEVELS, &Identity, false).unwrap_err();
    match err.kind() {
        ErrorKind::Section { section, .. } => assert_eq!(section, "GS_value"),
        kind => panic!("unexpected error: {:?}", kind),
    }
}

#[test]
fn broken_plist_is_an_error() {
    let err = Database::load(b"<plist><dict><k>a</k>", LEVELS, &Identity, false).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Plist { .. }));
}

#[cfg(feature = "compression")]
mod compressed {
    use super::*;
    use robtop::compression::GameCodec;

    #[test]
    fn save_survives_game_framing() {
        let database = database();
        let (main, levels) = database.dump(&GameCodec, true).unwrap();
        assert!(!main.starts_with(b"<?xml"));
        assert_eq!(Database::load(&main, &levels, &GameCodec, true).unwrap(), database);
    }

    #[test]
    fn created_level_opens_in_editor() {
        let mut database = database();
        let level = database.created_levels.iter().next().unwrap().clone();
        let mut editor = level.custom.open_editor().unwrap();
        assert_eq!(editor.objects.len(), 1);

        editor.objects.push(Object::new(8, 45.0, 15.0));
        let mut level = level;
        level.custom.save_editor(&editor).unwrap();
        assert!(!level.custom.data.contains(';'));
        assert_eq!(level.custom.open_editor().unwrap(), editor);

        database.created_levels.insert(level);
        let (main, levels) = database.dump(&GameCodec, true).unwrap();
        assert_eq!(Database::load(&main, &levels, &GameCodec, true).unwrap(), database);
    }
}
