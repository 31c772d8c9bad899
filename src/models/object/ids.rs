//! Object ids with a dedicated record kind

pub const START_POSITION: u16 = 31;
pub const SECRET_COIN: u16 = 142;
pub const TEXT: u16 = 914;
pub const TELEPORT: u16 = 747;
pub const COLLISION_BLOCK: u16 = 1816;
pub const TRIGGER_ORB: u16 = 1594;
pub const ITEM_COUNTER: u16 = 1615;

pub const COLOR_TRIGGER: u16 = 899;
pub const MOVE_TRIGGER: u16 = 901;
pub const PULSE_TRIGGER: u16 = 1006;
pub const ALPHA_TRIGGER: u16 = 1007;
pub const TOGGLE_TRIGGER: u16 = 1049;
pub const SPAWN_TRIGGER: u16 = 1268;
pub const ROTATE_TRIGGER: u16 = 1346;
pub const FOLLOW_TRIGGER: u16 = 1347;
pub const SHAKE_TRIGGER: u16 = 1520;
pub const ANIMATE_TRIGGER: u16 = 1585;
pub const TOUCH_TRIGGER: u16 = 1595;
pub const COUNT_TRIGGER: u16 = 1611;
pub const STOP_TRIGGER: u16 = 1616;
pub const INSTANT_COUNT_TRIGGER: u16 = 1811;
pub const ON_DEATH_TRIGGER: u16 = 1812;
pub const FOLLOW_PLAYER_Y_TRIGGER: u16 = 1814;
pub const COLLISION_TRIGGER: u16 = 1815;
pub const PICKUP_TRIGGER: u16 = 1817;

/// The background color trigger of old levels, which may also tint the ground
pub const BACKGROUND_TRIGGER: u16 = 29;

/// The speed a speed portal switches to
pub fn speed_change(id: u16) -> Option<crate::models::Speed> {
    use crate::models::Speed;
    match id {
        200 => Some(Speed::Slow),
        201 => Some(Speed::Normal),
        202 => Some(Speed::Fast),
        203 => Some(Speed::Faster),
        1334 => Some(Speed::Fastest),
        _ => None,
    }
}

pub fn is_orb(id: u16) -> bool {
    matches!(id, 36 | 84 | 141 | 1022 | 1330 | 1333 | 1704 | 1751)
}

pub fn is_pulsating(id: u16) -> bool {
    matches!(id, 1839..=1842)
}

pub fn is_item(id: u16) -> bool {
    matches!(id, 1275 | 1587 | 1589 | 1598 | 1614)
}

/// Saws and other decorations that spin on their own
pub fn is_rotating(id: u16) -> bool {
    matches!(
        id,
        85..=87
            | 97
            | 137..=139
            | 154..=156
            | 180..=188
            | 222..=224
            | 375..=378
            | 394..=396
            | 678..=680
            | 740..=742
            | 997..=1000
            | 1019..=1021
            | 1055..=1061
            | 1521..=1528
            | 1582
            | 1619
            | 1620
            | 1705..=1710
            | 1734..=1736
            | 1752
            | 1831..=1834
    )
}

/// The color channel that a color trigger of old levels targets
pub fn compatibility_channel(id: u16) -> Option<u16> {
    let channel = match id {
        BACKGROUND_TRIGGER => 1000,
        30 => 1001,
        104 => 1002,
        105 => 1004,
        221 => 1,
        717 => 2,
        718 => 3,
        743 => 4,
        744 => 1003,
        900 => 1009,
        _ => return None,
    };
    Some(channel)
}
