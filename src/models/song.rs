use super::{InternalType, INTERNAL_TYPE};
use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::plist::{Dict, PlistRecord, Value};
use crate::text::{RobTopEnum, RobTopView};
use crate::Error;

const ID: &str = "1";
const NAME: &str = "2";
const ARTIST_ID: &str = "3";
const ARTIST_NAME: &str = "4";
const SIZE: &str = "5";
const PRIORITY: &str = "9";
const DOWNLOAD_URL: &str = "10";

const CUSTOM_BIT: u32 = 1 << 31;
const ID_MASK: u32 = !CUSTOM_BIT;

/// A song used by a level, which is either one of the official soundtracks
/// or a custom song from the song server
///
/// ```
/// use robtop::models::SongReference;
///
/// let song = SongReference::custom(546_561);
/// assert_eq!(song.to_value(), 546_561 | 1 << 31);
/// assert_eq!(SongReference::from_value(song.to_value()), song);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct SongReference {
    pub id: u32,
    pub custom: bool,
}

impl SongReference {
    pub fn official(id: u32) -> Self {
        SongReference { id, custom: false }
    }

    pub fn custom(id: u32) -> Self {
        SongReference { id, custom: true }
    }

    /// Unpack an id whose highest bit marks a custom song
    pub fn from_value(value: u32) -> Self {
        SongReference {
            id: value & ID_MASK,
            custom: value & CUSTOM_BIT != 0,
        }
    }

    pub fn to_value(self) -> u32 {
        if self.custom {
            self.id | CUSTOM_BIT
        } else {
            self.id
        }
    }
}

impl FromBinary for SongReference {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        reader.read_u32(order).map(SongReference::from_value)
    }
}

impl ToBinary for SongReference {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u32(self.to_value(), order)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Artist {
    pub id: u32,
    pub name: String,
}

impl FromBinary for Artist {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(Artist {
            id: reader.read_u32(order)?,
            name: reader.read_string(order)?,
        })
    }
}

impl ToBinary for Artist {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u32(self.id, order);
        writer.write_string(&self.name, order);
    }
}

/// A custom song the save knows about (`MDLM_001`)
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Song {
    pub id: u32,
    pub name: String,
    pub artist: Artist,
    /// Size in megabytes
    pub size: f32,
    pub priority: u32,
    pub download_url: Option<String>,
}

impl Song {
    pub fn reference(&self) -> SongReference {
        SongReference::custom(self.id)
    }
}

impl PlistRecord for Song {
    fn from_plist(view: RobTopView<'_, Value>) -> Result<Self, Error> {
        let download_url = view.get_string(DOWNLOAD_URL);
        Ok(Song {
            id: view.get_or_default(ID)?,
            name: view.get_string(NAME),
            artist: Artist {
                id: view.get_or_default(ARTIST_ID)?,
                name: view.get_string(ARTIST_NAME),
            },
            size: view.get_or_default(SIZE)?,
            priority: view.get_or_default(PRIORITY)?,
            download_url: Some(download_url).filter(|x| !x.is_empty()),
        })
    }

    fn to_plist(&self) -> Dict {
        let mut dict = Dict::new();
        dict.insert(INTERNAL_TYPE.into(), InternalType::Song.value().into());
        dict.insert(ID.into(), self.id.into());
        dict.insert(NAME.into(), self.name.as_str().into());
        dict.insert(ARTIST_ID.into(), self.artist.id.into());
        dict.insert(ARTIST_NAME.into(), self.artist.name.as_str().into());
        dict.insert(SIZE.into(), self.size.into());
        dict.insert(PRIORITY.into(), self.priority.into());
        dict.insert(
            DOWNLOAD_URL.into(),
            self.download_url.as_deref().unwrap_or_default().into(),
        );
        dict
    }
}

impl FromBinary for Song {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let id = reader.read_u32(order)?;
        let name = reader.read_string(order)?;
        let artist = Artist::from_binary(reader, order)?;
        let size = reader.read_f32(order)?;
        let priority = reader.read_u32(order)?;
        let download_url = reader.read_string(order)?;
        Ok(Song {
            id,
            name,
            artist,
            size,
            priority,
            download_url: Some(download_url).filter(|x| !x.is_empty()),
        })
    }
}

impl ToBinary for Song {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u32(self.id, order);
        writer.write_string(&self.name, order);
        self.artist.to_binary(writer, order);
        writer.write_f32(self.size, order);
        writer.write_u32(self.priority, order);
        writer.write_string(self.download_url.as_deref().unwrap_or_default(), order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};
    use crate::plist::parse;

    fn song() -> Song {
        Song {
            id: 546_561,
            name: String::from("At the Speed of Light"),
            artist: Artist {
                id: 48_541,
                name: String::from("Dimrain47"),
            },
            size: 9.56,
            priority: 0,
            download_url: None,
        }
    }

    #[test]
    fn custom_bit_is_split() {
        assert_eq!(SongReference::from_value(5), SongReference::official(5));
        assert_eq!(
            SongReference::from_value(0x8000_0005),
            SongReference::custom(5)
        );
    }

    #[test]
    fn plist_keys() {
        let dict = song().to_plist();
        assert_eq!(dict["kCEK"], Value::Integer(6));
        assert_eq!(dict["4"], Value::from("Dimrain47"));
        assert_eq!(dict["10"], Value::from(""));
        assert_eq!(Song::from_plist(RobTopView::new(&dict)).unwrap(), song());
    }

    #[test]
    fn decodes_saved_song() {
        let data = br#"<?xml version="1.0"?><plist version="1.0" gjver="2.0"><dict><k>kCEK</k><i>6</i><k>1</k><i>1</i><k>2</k><s>Chaoz Fantasy</s><k>3</k><i>2</i><k>4</k><s>ParagonX9</s><k>5</k><r>4.2</r><k>10</k><s>https://example.com/1.mp3</s></dict></plist>"#;
        let dict = parse(data).unwrap();
        let song = Song::from_plist(RobTopView::new(&dict)).unwrap();
        assert_eq!(song.artist.name, "ParagonX9");
        assert_eq!(song.size, 4.2);
        assert_eq!(song.priority, 0);
        assert_eq!(song.download_url.as_deref(), Some("https://example.com/1.mp3"));
    }

    #[test]
    fn binary_round_trip() {
        let options = BinaryOptions::new();
        let mut expected = song();
        expected.download_url = Some(String::from("https://example.com/a.mp3"));
        let data = to_bytes(&expected, &options).unwrap();
        assert_eq!(from_bytes::<Song>(&data, &options).unwrap(), expected);
    }
}
