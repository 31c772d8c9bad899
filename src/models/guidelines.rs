use super::GuidelineColor;
use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::text::{split_list, RobTopString, Token};
use crate::Error;

const SEPARATOR: char = '~';

/// A colored marker on the song timeline
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Guideline {
    pub timestamp: f32,
    pub color: GuidelineColor,
}

/// Guidelines in the order they were placed, unique by timestamp
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
#[cfg_attr(feature = "derive", serde(transparent))]
pub struct Guidelines {
    entries: Vec<Guideline>,
}

impl Guidelines {
    pub fn new() -> Self {
        Guidelines::default()
    }

    /// Add a guideline, replacing the color of an existing one at the same
    /// timestamp
    pub fn add(&mut self, timestamp: f32, color: GuidelineColor) {
        match self.entries.iter_mut().find(|x| x.timestamp == timestamp) {
            Some(existing) => existing.color = color,
            None => self.entries.push(Guideline { timestamp, color }),
        }
    }

    pub fn get(&self, timestamp: f32) -> Option<GuidelineColor> {
        self.entries
            .iter()
            .find(|x| x.timestamp == timestamp)
            .map(|x| x.color)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Guideline> {
        self.entries.iter()
    }
}

fn parse_float(token: &str) -> Result<f32, Error> {
    f32::parse_token(token).ok_or_else(|| Error::token("guidelines", token, f32::EXPECTED))
}

impl RobTopString for Guidelines {
    fn from_robtop(text: &str) -> Result<Self, Error> {
        let mut result = Guidelines::new();
        let mut parts = split_list(text, SEPARATOR);
        while let (Some(timestamp), Some(value)) = (parts.next(), parts.next()) {
            let color = GuidelineColor::from_value(parse_float(value)?);
            result.add(parse_float(timestamp)?, color);
        }
        Ok(result)
    }

    fn to_robtop(&self) -> String {
        let mut out = String::new();
        for (i, guideline) in self.entries.iter().enumerate() {
            if i != 0 {
                out.push(SEPARATOR);
            }
            guideline.timestamp.write_token(&mut out);
            out.push(SEPARATOR);
            guideline.color.value().write_token(&mut out);
        }
        out
    }
}

impl FromBinary for Guidelines {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let count = reader.read_count(order, 8)?;
        let mut result = Guidelines::new();
        for _ in 0..count {
            let timestamp = reader.read_f32(order)?;
            let color = GuidelineColor::from_value(reader.read_f32(order)?);
            result.add(timestamp, color);
        }
        Ok(result)
    }
}

impl ToBinary for Guidelines {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_count(self.len(), order);
        for guideline in self.iter() {
            writer.write_f32(guideline.timestamp, order);
            writer.write_f32(guideline.color.value(), order);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_keeps_order() {
        let guidelines = Guidelines::from_robtop("1.5~0.8~0.5~1~3~0.85~").unwrap();
        let colors: Vec<_> = guidelines.iter().map(|x| x.color).collect();
        assert_eq!(
            colors,
            vec![GuidelineColor::Orange, GuidelineColor::Green, GuidelineColor::Orange]
        );
        assert_eq!(guidelines.to_robtop(), "1.5~0.8~0.5~1~3~0.8");
    }

    #[test]
    fn duplicate_timestamp_replaces() {
        let mut guidelines = Guidelines::new();
        guidelines.add(1.0, GuidelineColor::Yellow);
        guidelines.add(1.0, GuidelineColor::Green);
        assert_eq!(guidelines.len(), 1);
        assert_eq!(guidelines.get(1.0), Some(GuidelineColor::Green));
    }
}
