use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::text::{RobTopString, Token};
use crate::Error;

const SEPARATOR: char = 'a';

const H_BOUND: i16 = 180;
const H_NORMAL_BOUND: i64 = 360;

const H_MASK: u32 = 0x1ff;
const S_SHIFT: u32 = 9;
const V_SHIFT: u32 = 18;
const S_CHECKED_BIT: u32 = 1 << 27;
const V_CHECKED_BIT: u32 = 1 << 28;

/// Hundredths are offset so checked values down to `-1` stay positive
const SV_OFFSET: f32 = 100.0;
const SV_SCALE: f32 = 100.0;

/// Hue, saturation and value adjustments of a color.
///
/// A checked saturation or value is additive within `[-1, 1]`, an unchecked
/// one is a multiplier within `[0, 2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Hsv {
    pub h: i16,
    pub s: f32,
    pub v: f32,
    pub s_checked: bool,
    pub v_checked: bool,
}

impl Default for Hsv {
    fn default() -> Self {
        Hsv {
            h: 0,
            s: 1.0,
            v: 1.0,
            s_checked: false,
            v_checked: false,
        }
    }
}

/// Hues outside `[-180, 180]` wrap into it
fn rotate_h(h: i64) -> i16 {
    let bound = i64::from(H_BOUND);
    if (-bound..=bound).contains(&h) {
        return h as i16;
    }
    let wrapped = (h.rem_euclid(H_NORMAL_BOUND) + bound).rem_euclid(H_NORMAL_BOUND) - bound;
    wrapped as i16
}

fn clamp_sv(value: f32, checked: bool) -> f32 {
    if checked {
        value.clamp(-1.0, 1.0)
    } else {
        value.clamp(0.0, 2.0)
    }
}

fn pack_sv(value: f32) -> u32 {
    ((value * SV_SCALE).round() + SV_OFFSET).clamp(0.0, H_MASK as f32) as u32
}

fn unpack_sv(bits: u32) -> f32 {
    ((bits & H_MASK) as f32 - SV_OFFSET) / SV_SCALE
}

impl Hsv {
    pub fn new(h: i16, s: f32, v: f32, s_checked: bool, v_checked: bool) -> Self {
        Hsv {
            h,
            s,
            v,
            s_checked,
            v_checked,
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Hsv::default()
    }

    /// The packed 32 bit form
    pub fn to_bits(&self) -> u32 {
        let h = (i32::from(rotate_h(i64::from(self.h))) + i32::from(H_BOUND)) as u32 & H_MASK;
        let mut bits = h | pack_sv(self.s) << S_SHIFT | pack_sv(self.v) << V_SHIFT;
        if self.s_checked {
            bits |= S_CHECKED_BIT;
        }
        if self.v_checked {
            bits |= V_CHECKED_BIT;
        }
        bits
    }

    pub fn from_bits(bits: u32) -> Self {
        Hsv {
            h: (bits & H_MASK) as i16 - H_BOUND,
            s: unpack_sv(bits >> S_SHIFT),
            v: unpack_sv(bits >> V_SHIFT),
            s_checked: bits & S_CHECKED_BIT != 0,
            v_checked: bits & V_CHECKED_BIT != 0,
        }
    }
}

fn parse_part<T: Token>(part: Option<&str>, default: T) -> Result<T, Error> {
    match part {
        None => Ok(default),
        Some(token) if token.trim().is_empty() => Ok(default),
        Some(token) => T::parse_token(token).ok_or_else(|| Error::token("hsv", token, T::EXPECTED)),
    }
}

impl RobTopString for Hsv {
    fn from_robtop(text: &str) -> Result<Self, Error> {
        let mut parts = text.split(SEPARATOR);
        let h = parse_part::<f64>(parts.next(), 0.0)?;
        let s = parse_part::<f32>(parts.next(), 1.0)?;
        let v = parse_part::<f32>(parts.next(), 1.0)?;
        let s_checked = parse_part::<bool>(parts.next(), false)? || s < 0.0;
        let v_checked = parse_part::<bool>(parts.next(), false)? || v < 0.0;

        // saturating, so huge hues still wrap instead of pinning to the i16 range
        let h = h.round() as i64;
        Ok(Hsv {
            h: rotate_h(h),
            s: clamp_sv(s, s_checked),
            v: clamp_sv(v, v_checked),
            s_checked,
            v_checked,
        })
    }

    fn to_robtop(&self) -> String {
        let mut out = String::new();
        self.h.write_token(&mut out);
        out.push(SEPARATOR);
        self.s.write_token(&mut out);
        out.push(SEPARATOR);
        self.v.write_token(&mut out);
        out.push(SEPARATOR);
        self.s_checked.write_token(&mut out);
        out.push(SEPARATOR);
        self.v_checked.write_token(&mut out);
        out
    }
}

impl FromBinary for Hsv {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        reader.read_u32(order).map(Hsv::from_bits)
    }
}

impl ToBinary for Hsv {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u32(self.to_bits(), order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[test]
    fn packed_value_keeps_asymmetric_checks() {
        let hsv = Hsv::new(45, 0.5, 1.5, false, true);
        let bits = hsv.to_bits();
        assert_eq!(bits & H_MASK, 225);
        assert_eq!(bits & S_CHECKED_BIT, 0);
        assert_ne!(bits & V_CHECKED_BIT, 0);
        assert_eq!(Hsv::from_bits(bits), hsv);
    }

    #[rstest]
    #[case("45a0.5a1.5a0a1", Hsv::new(45, 0.5, 1.5, false, true))]
    #[case("200a1a1a0a0", Hsv::new(-160, 1.0, 1.0, false, false))]
    #[case("-190a1a1a0a0", Hsv::new(170, 1.0, 1.0, false, false))]
    #[case("12.6a3a-0.5a0a0", Hsv::new(13, 2.0, -0.5, false, true))]
    #[case("0a1a1a1a0", Hsv::new(0, 1.0, 1.0, true, false))]
    #[case("40000a1a1a0a0", Hsv::new(40, 1.0, 1.0, false, false))]
    #[case("32767a1a1a0a0", Hsv::new(7, 1.0, 1.0, false, false))]
    #[case("-32768a1a1a0a0", Hsv::new(-8, 1.0, 1.0, false, false))]
    #[case("1e30a1a1a0a0", Hsv::new(rotate_h(i64::MAX), 1.0, 1.0, false, false))]
    fn text_decoding(#[case] text: &str, #[case] expected: Hsv) {
        assert_eq!(Hsv::from_robtop(text).unwrap(), expected);
    }

    #[rstest]
    #[case(i16::MAX, 7)]
    #[case(i16::MIN, -8)]
    #[case(540, -180)]
    #[case(-540, -180)]
    fn extreme_hues_pack(#[case] h: i16, #[case] expected: i16) {
        let bits = Hsv::new(h, 1.0, 1.0, false, false).to_bits();
        assert_eq!(Hsv::from_bits(bits).h, expected);
    }

    #[test]
    fn text_encoding() {
        assert_eq!(Hsv::new(45, 0.5, 1.5, false, true).to_robtop(), "45a0.5a1.5a0a1");
        assert_eq!(Hsv::default().to_robtop(), "0a1a1a0a0");
    }

    #[test]
    fn malformed_part() {
        assert!(Hsv::from_robtop("xa1a1a0a0").is_err());
    }
}
