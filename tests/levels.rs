use quickcheck_macros::quickcheck;
use robtop::binary::{from_bytes, to_bytes, BinaryOptions, ByteOrder};
use robtop::models::object::SpawnTrigger;
use robtop::models::{
    objects_from_robtop, objects_to_robtop, Editor, Object, ObjectData, Trigger, TriggerKind,
};
use robtop::text::RobTopString;
use rstest::*;

const LEVEL: &str = "kS38,1_40_2_125_3_255_11_255_12_255_13_255_4_-1_6_1000_7_1_15_1_18_0_8_1|,kA13,0,kA15,0,kA16,0,kA14,,kA6,0,kA7,0,kA17,0,kA18,0,kS39,0,kA2,0,kA3,0,kA8,0,kA4,0,kA9,0,kA10,0,kA11,0;1,1,2,15,3,15;1,8,2,75,3,15,57,2.4;1,1,2,105,3,75,57,3;1,901,2,135,3,45,51,2,28,30,29,0,10,0.5;1,31,2,165,3,15;";

#[test]
fn level_string_decodes() {
    let editor = Editor::from_robtop(LEVEL).unwrap();
    assert_eq!(editor.objects.len(), 5);
    assert_eq!(editor.triggers().len(), 1);
    assert_eq!(editor.start_positions().len(), 1);
    assert!(editor.groups().contains(&2));
    assert!(editor.groups().contains(&4));
    assert_eq!(editor.free_group(), 1);
    assert_eq!(editor.x_length(), 165.0);
}

#[test]
fn level_string_survives_text() {
    let editor = Editor::from_robtop(LEVEL).unwrap();
    let text = editor.to_robtop();
    assert_eq!(Editor::from_robtop(&text).unwrap(), editor);
}

#[rstest]
#[case(ByteOrder::Little)]
#[case(ByteOrder::Big)]
#[case(ByteOrder::Native)]
fn level_string_survives_binary(#[case] order: ByteOrder) {
    let editor = Editor::from_robtop(LEVEL).unwrap();
    let options = BinaryOptions::new().order(order);
    let data = to_bytes(&editor, &options).unwrap();
    assert_eq!(from_bytes::<Editor>(&data, &options).unwrap(), editor);
}

#[test]
fn binary_is_smaller_than_text() {
    let editor = Editor::from_robtop(LEVEL).unwrap();
    let data = to_bytes(&editor, &BinaryOptions::new()).unwrap();
    assert!(data.len() < LEVEL.len());
}

#[test]
fn headerless_objects() {
    let objects = objects_from_robtop("1,1,2,15,3,15;1,1,2,45,3,15;").unwrap();
    assert_eq!(objects.len(), 2);
    assert_eq!(objects_from_robtop(&objects_to_robtop(&objects)).unwrap(), objects);
}

#[test]
fn unknown_objects_stay_generic() {
    let object = Object::from_robtop("1,4000,2,15,3,15,500,7").unwrap();
    assert_eq!(object.id, 4000);
    assert!(matches!(object.data, ObjectData::Generic));
}

#[test]
fn truncated_binary_is_an_error() {
    let editor = Editor::from_robtop(LEVEL).unwrap();
    let options = BinaryOptions::new();
    let data = to_bytes(&editor, &options).unwrap();
    for len in [0, 1, data.len() / 2, data.len() - 1] {
        assert!(from_bytes::<Editor>(&data[..len], &options).is_err());
    }
}

#[test]
fn bad_token_names_its_key() {
    let err = Object::from_robtop("1,1,2,abc,3,15").unwrap_err();
    match err.kind() {
        robtop::ErrorKind::Token { key, token, .. } => {
            assert_eq!(key, "2");
            assert_eq!(token, "abc");
        }
        kind => panic!("unexpected error: {:?}", kind),
    }
}

#[quickcheck]
fn spawn_triggers_survive(group: u16, delay: u16, x: i16, y: i16) -> bool {
    let trigger = Trigger::new(TriggerKind::Spawn(SpawnTrigger {
        target_group_id: group,
        delay: f32::from(delay) / 4.0,
        editor_disable: group % 2 == 0,
    }));
    let object = Object::trigger(f32::from(x), f32::from(y), trigger);

    let text = Object::from_robtop(&object.to_robtop()).unwrap();
    let options = BinaryOptions::new();
    let binary = from_bytes::<Object>(&to_bytes(&object, &options).unwrap(), &options).unwrap();
    text == object && binary == object
}
