use super::LikeType;
use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::text::{split_list, RobTopEnum, RobTopString, Token};
use crate::{Error, ErrorKind};

const SEPARATOR: char = '_';
const LIKE: &str = "like";

/// A like or dislike the player left on a level or a comment, stored as
/// the key `like_{type}_{id}_{liked}_{other_id}`
///
/// ```
/// use robtop::models::{Like, LikeType};
/// use robtop::text::RobTopString;
///
/// let like = Like::from_robtop("like_2_1337_0_42").unwrap();
/// assert_eq!(like.like_type, LikeType::LevelComment);
/// assert!(!like.liked);
/// assert_eq!(like.to_robtop(), "like_2_1337_0_42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Like {
    pub like_type: LikeType,
    pub id: u32,
    pub liked: bool,
    /// The level of a level comment or the account of a user comment
    pub other_id: u32,
}

impl Like {
    /// True for keys that hold a like
    pub fn can_be_in(text: &str) -> bool {
        text.starts_with(LIKE) && text.contains(SEPARATOR)
    }
}

fn like_error(text: &str) -> Error {
    Error::schema("like", format!("unable to parse {:?}", text))
}

impl RobTopString for Like {
    fn from_robtop(text: &str) -> Result<Self, Error> {
        let mut parts = split_list(text, SEPARATOR);
        if parts.next() != Some(LIKE) {
            return Err(like_error(text));
        }

        let mut next = |name: &str| -> Result<i64, Error> {
            let token = parts.next().ok_or_else(|| like_error(text))?;
            i64::parse_token(token).ok_or_else(|| Error::token(name, token, i64::EXPECTED))
        };

        let type_value = next("type")?;
        let id = next("id")?;
        let liked = next("liked")?;
        let other_id = next("other id")?;

        let like_type = LikeType::from_value(type_value)
            .ok_or_else(|| Error::token("type", &type_value.to_string(), LikeType::NAME))?;

        Ok(Like {
            like_type,
            id: u32::try_from(id).map_err(|_| like_error(text))?,
            liked: liked != 0,
            other_id: u32::try_from(other_id).map_err(|_| like_error(text))?,
        })
    }

    fn to_robtop(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}{sep}{}{sep}{}",
            LIKE,
            self.like_type.value(),
            self.id,
            u8::from(self.liked),
            self.other_id,
            sep = SEPARATOR
        )
    }
}

impl FromBinary for Like {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(Like {
            like_type: LikeType::from_binary(reader, order)?,
            id: reader.read_u32(order)?,
            liked: reader.read_bool(order)?,
            other_id: reader.read_u32(order)?,
        })
    }
}

impl ToBinary for Like {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.like_type.to_binary(writer, order);
        writer.write_u32(self.id, order);
        writer.write_bool(self.liked, order);
        writer.write_u32(self.other_id, order);
    }
}

/// A named level folder, stored as a `"{id}": name` entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct Folder {
    pub id: u32,
    pub name: String,
}

impl Folder {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Folder {
            id,
            name: name.into(),
        }
    }

    /// Build from a dictionary entry, where the key must be a folder id
    pub fn from_entry(key: &str, name: &str) -> Result<Self, Error> {
        let id = u32::parse_token(key).ok_or_else(|| {
            Error::new(ErrorKind::Token {
                key: key.to_string(),
                token: key.to_string(),
                expected: "a folder id",
            })
        })?;
        Ok(Folder::new(id, name))
    }
}

impl FromBinary for Folder {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        Ok(Folder {
            id: reader.read_u32(order)?,
            name: reader.read_string(order)?,
        })
    }
}

impl ToBinary for Folder {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_u32(self.id, order);
        writer.write_string(&self.name, order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions, ByteOrder};
    use rstest::*;

    #[rstest]
    #[case("like_1_30029017_1_0", LikeType::Level, true)]
    #[case("like_3_71_0_16", LikeType::UserComment, false)]
    fn like_keys(#[case] text: &str, #[case] like_type: LikeType, #[case] liked: bool) {
        let like = Like::from_robtop(text).unwrap();
        assert_eq!(like.like_type, like_type);
        assert_eq!(like.liked, liked);
        assert_eq!(like.to_robtop(), text);
    }

    #[rstest]
    #[case("like_1_2_1")]
    #[case("dislike_1_2_1_0")]
    #[case("like_7_2_1_0")]
    #[case("like_1_x_1_0")]
    fn malformed_likes(#[case] text: &str) {
        assert!(Like::from_robtop(text).is_err());
    }

    #[test]
    fn like_binary() {
        let options = BinaryOptions::new().order(ByteOrder::Big);
        let like = Like::from_robtop("like_2_99_1_5").unwrap();
        let data = to_bytes(&like, &options).unwrap();
        assert_eq!(data.len(), 10);
        assert_eq!(from_bytes::<Like>(&data, &options).unwrap(), like);
    }

    #[test]
    fn folder_entries() {
        assert_eq!(Folder::from_entry("3", "demons").unwrap(), Folder::new(3, "demons"));
        assert!(Folder::from_entry("three", "demons").is_err());
    }
}
