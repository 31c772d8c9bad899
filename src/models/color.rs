use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::Error;

/// An opaque 24 bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Unpack a `0xRRGGBB` value
    pub const fn from_value(value: u32) -> Self {
        Rgb::new((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    pub const fn to_value(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Build from text channels, which may be out of range in hand edited
    /// saves
    pub(crate) fn saturating(r: i64, g: i64, b: i64) -> Self {
        let clamp = |x: i64| x.clamp(0, 255) as u8;
        Rgb::new(clamp(r), clamp(g), clamp(b))
    }
}

impl FromBinary for Rgb {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let r = reader.read_u8(order)?;
        let g = reader.read_u8(order)?;
        let b = reader.read_u8(order)?;
        Ok(Rgb::new(r, g, b))
    }
}

impl ToBinary for Rgb {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u8(self.r, order);
        writer.write_u8(self.g, order);
        writer.write_u8(self.b, order);
    }
}
