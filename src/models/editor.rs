use super::object::{ids, ObjectData};
use super::{Header, Object, Speed, Trigger};
use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::text::{split_pairs, RobTopString, RobTopView};
use crate::{Error, OrderedSet};

const OBJECT_SEPARATOR: char = ';';
const PAIR_SEPARATOR: char = ',';

/// Smallest object size in binary: id, position and flags
const MIN_OBJECT_SIZE: usize = 12;

/// Units travelled per second at each speed
fn units_per_second(speed: Speed) -> f32 {
    match speed {
        Speed::Slow => 251.16,
        Speed::Normal => 311.58,
        Speed::Fast => 387.42,
        Speed::Faster => 468.0,
        Speed::Fastest => 576.0,
    }
}

/// A decoded level string: the header followed by every object
///
/// ```
/// use robtop::models::Editor;
/// use robtop::text::RobTopString;
///
/// let editor = Editor::from_robtop("kA4,1;1,1,2,15,3,15;1,8,2,45,3,15;").unwrap();
/// assert_eq!(editor.objects.len(), 2);
/// assert_eq!(editor.x_length(), 45.0);
/// assert!(editor.to_robtop().ends_with(';'));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Editor {
    pub header: Header,
    pub objects: Vec<Object>,
}

impl Editor {
    pub fn new(header: Header, objects: Vec<Object>) -> Self {
        Editor { header, objects }
    }

    /// Whether the text looks like a level string rather than compressed data
    pub fn can_be_in(text: &str) -> bool {
        text.contains(OBJECT_SEPARATOR)
    }

    /// Every group id an object belongs to
    pub fn groups(&self) -> OrderedSet<u16> {
        let mut groups = OrderedSet::new();
        for object in &self.objects {
            for &group in object.group_ids.iter() {
                groups.insert(group);
            }
        }
        groups
    }

    /// The lowest group id that no object uses
    pub fn free_group(&self) -> u16 {
        first_free(&self.groups())
    }

    /// Every color id used by an object or defined in the header
    pub fn color_ids(&self) -> OrderedSet<u16> {
        let mut ids = OrderedSet::new();
        for object in &self.objects {
            ids.insert(object.base_color_id);
            ids.insert(object.detail_color_id);
        }
        for channel in self.header.color_channels.iter() {
            ids.insert(channel.id());
        }
        ids
    }

    pub fn free_color_id(&self) -> u16 {
        first_free(&self.color_ids())
    }

    pub fn start_positions(&self) -> Vec<&Object> {
        sorted_by_x(self.objects.iter().filter(|x| x.is_start_position()))
    }

    pub fn triggers(&self) -> Vec<&Trigger> {
        sorted_by_x(self.objects.iter().filter(|x| x.is_trigger()))
            .into_iter()
            .filter_map(|object| match &object.data {
                ObjectData::Trigger(trigger) => Some(trigger),
                _ => None,
            })
            .collect()
    }

    pub fn speed_changes(&self) -> Vec<&Object> {
        sorted_by_x(
            self.objects
                .iter()
                .filter(|x| ids::speed_change(x.id).is_some()),
        )
    }

    /// The position of the rightmost object
    pub fn x_length(&self) -> f32 {
        self.objects
            .iter()
            .map(|object| object.x)
            .fold(0.0, f32::max)
    }

    /// Seconds it takes to reach the rightmost object, following speed
    /// portals along the way
    pub fn length(&self) -> f32 {
        self.time_to(self.x_length())
    }

    /// Seconds it takes to travel from the start to `distance`
    pub fn time_to(&self, distance: f32) -> f32 {
        let mut speed = units_per_second(self.header.speed);
        let mut last_x = 0.0;
        let mut total = 0.0;

        for portal in self.speed_changes() {
            if portal.x > distance {
                break;
            }
            total += (portal.x - last_x) / speed;
            if let Some(next) = ids::speed_change(portal.id) {
                speed = units_per_second(next);
            }
            last_x = portal.x;
        }

        total + (distance - last_x) / speed
    }
}

fn first_free(used: &OrderedSet<u16>) -> u16 {
    (1..=u16::MAX).find(|id| !used.contains(id)).unwrap_or(0)
}

fn sorted_by_x<'a>(objects: impl Iterator<Item = &'a Object>) -> Vec<&'a Object> {
    let mut objects: Vec<_> = objects.collect();
    objects.sort_by(|a, b| a.x.total_cmp(&b.x));
    objects
}

impl RobTopString for Editor {
    fn from_robtop(text: &str) -> Result<Self, Error> {
        let mut entries = text.split(OBJECT_SEPARATOR).filter(|x| !x.is_empty());

        let header = match entries.next() {
            Some(entry) => Header::from_robtop(entry)?,
            None => Header::default(),
        };

        let objects = read_objects(entries)?;
        Ok(Editor { header, objects })
    }

    fn to_robtop(&self) -> String {
        let mut out = self.header.to_robtop();
        out.push(OBJECT_SEPARATOR);
        write_objects(&self.objects, &mut out);
        out
    }
}

fn read_objects<'a>(entries: impl Iterator<Item = &'a str>) -> Result<Vec<Object>, Error> {
    let mut objects = Vec::new();
    for entry in entries {
        let map = split_pairs(entry, PAIR_SEPARATOR);
        let (object, ground) = Object::from_view_migrating(RobTopView::new(&map))?;
        objects.push(object);
        objects.extend(ground);
    }
    Ok(objects)
}

fn write_objects(objects: &[Object], out: &mut String) {
    for object in objects {
        out.push_str(&object.to_robtop());
        out.push(OBJECT_SEPARATOR);
    }
}

/// Decode `;` separated objects that have no header, as the saved custom
/// objects of the editor are stored. Old color triggers are migrated.
///
/// ```
/// use robtop::models::objects_from_robtop;
///
/// let objects = objects_from_robtop("1,1,2,15,3,15;1,8,2,45,3,15;").unwrap();
/// assert_eq!(objects.len(), 2);
/// assert_eq!(objects[1].id, 8);
/// ```
pub fn objects_from_robtop(text: &str) -> Result<Vec<Object>, Error> {
    read_objects(text.split(OBJECT_SEPARATOR).filter(|x| !x.is_empty()))
}

pub fn objects_to_robtop(objects: &[Object]) -> String {
    let mut out = String::new();
    write_objects(objects, &mut out);
    out
}

impl FromBinary for Editor {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let header = Header::from_binary(reader, order)?;
        let count = reader.read_count(order, MIN_OBJECT_SIZE)?;
        let mut objects = Vec::with_capacity(count);
        for _ in 0..count {
            objects.push(Object::from_binary(reader, order)?);
        }
        Ok(Editor { header, objects })
    }
}

impl ToBinary for Editor {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.header.to_binary(writer, order);
        writer.write_count(self.objects.len(), order);
        for object in &self.objects {
            object.to_binary(writer, order);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};
    use crate::models::SpecialColorId;
    use crate::models::TriggerKind;

    #[test]
    fn empty_string_has_default_header() {
        let editor = Editor::from_robtop("").unwrap();
        assert_eq!(editor, Editor::default());
        assert_eq!(editor.length(), 0.0);
    }

    #[test]
    fn background_trigger_tinting_ground_is_split() {
        let editor = Editor::from_robtop("kA2,0;1,29,2,15,3,15,14,1;").unwrap();
        assert_eq!(editor.objects.len(), 2);

        let targets: Vec<u16> = editor
            .triggers()
            .into_iter()
            .filter_map(|trigger| match &trigger.kind {
                TriggerKind::Color(color) => Some(color.target_channel_id),
                _ => None,
            })
            .collect();
        assert_eq!(targets, vec![SpecialColorId::Background.id(), SpecialColorId::Ground.id()]);
    }

    #[test]
    fn speed_portals_change_travel_time() {
        let editor = Editor::from_robtop("kA4,0;1,200,2,311.58,3,15;1,1,2,562.74,3,15;").unwrap();
        let expected = 1.0 + (562.74 - 311.58) / 251.16;
        assert!((editor.length() - expected).abs() < 1e-4);
        assert!((editor.time_to(311.58) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn free_ids_skip_used_ones() {
        let mut editor = Editor::default();
        let mut object = Object::new(1, 0.0, 0.0);
        object.group_ids.insert(1);
        object.group_ids.insert(2);
        object.base_color_id = 1;
        editor.objects.push(object);
        assert_eq!(editor.free_group(), 3);
        assert_eq!(editor.free_color_id(), 2);
    }

    #[test]
    fn binary_keeps_objects() {
        let options = BinaryOptions::new();
        let editor = Editor::from_robtop("kA4,2;1,1,2,15,3,45;1,31,2,30,3,15;").unwrap();
        let data = to_bytes(&editor, &options).unwrap();
        assert_eq!(from_bytes::<Editor>(&data, &options).unwrap(), editor);
        assert_eq!(editor.start_positions().len(), 1);
    }
}
