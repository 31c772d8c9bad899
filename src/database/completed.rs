use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::plist::{Dict, PlistRecord, Value};
use crate::prefix::{flatten_prefix, scan_prefix};
use crate::text::{RobTopView, TimelyId};
use crate::{Error, OrderedSet};

const OFFICIAL: &str = "n_";
const NORMAL: &str = "c_";
const DEMON: &str = "demon_";
const TIMELY: &str = "d_";
const TIMELY_DEMON: &str = "ddemon_";
const TIMELY_STAR: &str = "dstar_";
const GAUNTLET: &str = "g_";
const GAUNTLET_DEMON: &str = "gdemon_";
const GAUNTLET_STAR: &str = "gstar_";
const MAP_PACK: &str = "pack_";
const STAR: &str = "star_";

/// Levels completed along with the demons among them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct CompletedPair {
    pub levels: OrderedSet<u32>,
    pub demons: OrderedSet<u32>,
}

impl FromBinary for CompletedPair {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(CompletedPair {
            levels: OrderedSet::from_binary(reader, order)?,
            demons: OrderedSet::from_binary(reader, order)?,
        })
    }
}

impl ToBinary for CompletedPair {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.levels.to_binary(writer, order);
        self.demons.to_binary(writer, order);
    }
}

/// Levels whose stars were collected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Stars {
    pub normal: OrderedSet<u32>,
    pub daily: OrderedSet<u32>,
    pub weekly: OrderedSet<u32>,
    pub gauntlet: OrderedSet<u32>,
}

impl FromBinary for Stars {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(Stars {
            normal: OrderedSet::from_binary(reader, order)?,
            daily: OrderedSet::from_binary(reader, order)?,
            weekly: OrderedSet::from_binary(reader, order)?,
            gauntlet: OrderedSet::from_binary(reader, order)?,
        })
    }
}

impl ToBinary for Stars {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.normal.to_binary(writer, order);
        self.daily.to_binary(writer, order);
        self.weekly.to_binary(writer, order);
        self.gauntlet.to_binary(writer, order);
    }
}

/// Completed levels, stored under `GS_completed` as `{prefix}{id}: "1"`
///
/// Timely demons are always weekly levels and are stored with the weekly
/// offset added, while timely stars mix daily and weekly ids.
///
/// ```
/// use robtop::database::Completed;
/// use robtop::plist::{Dict, PlistRecord, Value};
/// use robtop::text::RobTopView;
///
/// let mut dict = Dict::new();
/// for key in ["c_1", "demon_1", "dstar_7", "dstar_100009"] {
///     dict.insert(key.to_string(), Value::from("1"));
/// }
/// let completed = Completed::from_plist(RobTopView::new(&dict)).unwrap();
/// assert!(completed.normal.demons.contains(&1));
/// assert!(completed.stars.daily.contains(&7));
/// assert!(completed.stars.weekly.contains(&9));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Completed {
    pub official: OrderedSet<u32>,
    pub normal: CompletedPair,
    pub timely: CompletedPair,
    pub gauntlet: CompletedPair,
    pub map_packs: OrderedSet<u32>,
    pub stars: Stars,
}

impl PlistRecord for Completed {
    fn from_plist(view: RobTopView<'_, Value>) -> Result<Self, Error> {
        let mut stars = Stars {
            normal: scan_prefix(view, STAR),
            gauntlet: scan_prefix(view, GAUNTLET_STAR),
            ..Stars::default()
        };

        for id in scan_prefix::<_, u32>(view, TIMELY_STAR) {
            match TimelyId::decode(id) {
                TimelyId::Daily(id) => stars.daily.insert(id),
                TimelyId::Weekly(id) => stars.weekly.insert(id),
            };
        }

        // only weekly levels can be timely demons
        let timely_demons = scan_prefix::<_, u32>(view, TIMELY_DEMON)
            .into_iter()
            .map(TimelyId::decode)
            .filter(|id| id.is_weekly())
            .map(TimelyId::id)
            .collect();

        Ok(Completed {
            official: scan_prefix(view, OFFICIAL),
            normal: CompletedPair {
                levels: scan_prefix(view, NORMAL),
                demons: scan_prefix(view, DEMON),
            },
            timely: CompletedPair {
                levels: scan_prefix(view, TIMELY),
                demons: timely_demons,
            },
            gauntlet: CompletedPair {
                levels: scan_prefix(view, GAUNTLET),
                demons: scan_prefix(view, GAUNTLET_DEMON),
            },
            map_packs: scan_prefix(view, MAP_PACK),
            stars,
        })
    }

    fn to_plist(&self) -> Dict {
        let weekly = |ids: &OrderedSet<u32>| -> Vec<i64> {
            ids.iter()
                .map(|&id| TimelyId::Weekly(id).encode())
                .collect()
        };

        let mut dict = Dict::new();
        flatten_prefix(&mut dict, OFFICIAL, &self.official);
        flatten_prefix(&mut dict, NORMAL, &self.normal.levels);
        flatten_prefix(&mut dict, DEMON, &self.normal.demons);
        flatten_prefix(&mut dict, TIMELY, &self.timely.levels);
        flatten_prefix(&mut dict, TIMELY_DEMON, &weekly(&self.timely.demons));
        flatten_prefix(&mut dict, GAUNTLET, &self.gauntlet.levels);
        flatten_prefix(&mut dict, GAUNTLET_DEMON, &self.gauntlet.demons);
        flatten_prefix(&mut dict, MAP_PACK, &self.map_packs);
        flatten_prefix(&mut dict, STAR, &self.stars.normal);
        flatten_prefix(&mut dict, TIMELY_STAR, &self.stars.daily);
        flatten_prefix(&mut dict, TIMELY_STAR, &weekly(&self.stars.weekly));
        flatten_prefix(&mut dict, GAUNTLET_STAR, &self.stars.gauntlet);
        dict
    }
}

impl FromBinary for Completed {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(Completed {
            official: OrderedSet::from_binary(reader, order)?,
            normal: CompletedPair::from_binary(reader, order)?,
            timely: CompletedPair::from_binary(reader, order)?,
            gauntlet: CompletedPair::from_binary(reader, order)?,
            map_packs: OrderedSet::from_binary(reader, order)?,
            stars: Stars::from_binary(reader, order)?,
        })
    }
}

impl ToBinary for Completed {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.official.to_binary(writer, order);
        self.normal.to_binary(writer, order);
        self.timely.to_binary(writer, order);
        self.gauntlet.to_binary(writer, order);
        self.map_packs.to_binary(writer, order);
        self.stars.to_binary(writer, order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};

    fn dict(keys: &[&str]) -> Dict {
        keys.iter()
            .map(|key| (key.to_string(), Value::from("1")))
            .collect()
    }

    #[test]
    fn families_do_not_overlap() {
        let dict = dict(&["d_5", "ddemon_100005", "demon_5", "gdemon_5", "g_3", "gstar_3"]);
        let completed = Completed::from_plist(RobTopView::new(&dict)).unwrap();
        assert_eq!(completed.timely.levels.clone().into_vec(), vec![5]);
        assert_eq!(completed.timely.demons.clone().into_vec(), vec![5]);
        assert_eq!(completed.normal.demons.clone().into_vec(), vec![5]);
        assert_eq!(completed.gauntlet.demons.clone().into_vec(), vec![5]);
        assert_eq!(completed.gauntlet.levels.clone().into_vec(), vec![3]);
        assert_eq!(completed.stars.gauntlet.clone().into_vec(), vec![3]);
        assert!(completed.normal.levels.is_empty());
    }

    #[test]
    fn daily_demons_are_dropped() {
        let dict = dict(&["ddemon_12", "ddemon_100013"]);
        let completed = Completed::from_plist(RobTopView::new(&dict)).unwrap();
        assert_eq!(completed.timely.demons.into_vec(), vec![13]);
    }

    #[test]
    fn plist_round_trip() {
        let mut completed = Completed::default();
        completed.official.insert(1);
        completed.normal.levels.insert(30_029_017);
        completed.timely.demons.insert(42);
        completed.map_packs.insert(18);
        completed.stars.daily.insert(7);
        completed.stars.weekly.insert(7);

        let dict = completed.to_plist();
        assert!(dict.contains_key("ddemon_100042"));
        assert!(dict.contains_key("dstar_7"));
        assert!(dict.contains_key("dstar_100007"));
        assert_eq!(dict["pack_18"], Value::from("1"));

        let decoded = Completed::from_plist(RobTopView::new(&dict)).unwrap();
        assert_eq!(decoded, completed);
    }

    #[test]
    fn binary_round_trip() {
        let mut completed = Completed::default();
        completed.gauntlet.levels.extend([1, 2, 3]);
        completed.stars.normal.insert(99);
        let options = BinaryOptions::new();
        let data = to_bytes(&completed, &options).unwrap();
        assert_eq!(from_bytes::<Completed>(&data, &options).unwrap(), completed);
    }
}
