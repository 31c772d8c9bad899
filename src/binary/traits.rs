use super::{BinaryOptions, ByteOrder, Reader, Writer};
use crate::Error;
use indexmap::IndexMap;
use std::hash::Hash;

/// A record that can be decoded from the binary format
pub trait FromBinary: Sized {
    /// Read the record's fields in the exact order [`ToBinary`] wrote them
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error>;
}

/// A record that can be encoded into the binary format
pub trait ToBinary {
    /// Append the record's fields to the writer
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder);
}

/// Decode a record that spans the entirety of the data
///
/// ```
/// use robtop::binary::{from_bytes, to_bytes, BinaryOptions};
/// use robtop::models::Hsv;
///
/// let options = BinaryOptions::new();
/// let hsv = Hsv::new(45, 0.5, 1.5, false, true);
/// let data = to_bytes(&hsv, &options)?;
/// assert_eq!(from_bytes::<Hsv>(&data, &options)?, hsv);
/// # Ok::<(), robtop::Error>(())
/// ```
pub fn from_bytes<T: FromBinary>(data: &[u8], options: &BinaryOptions) -> Result<T, Error> {
    let mut reader = Reader::new(data).with_options(
        options.binary_version(),
        options.skips_malformed_levels(),
    );
    T::from_binary(&mut reader, options.byte_order())
}

/// Encode a record into a new buffer, failing when a count or length
/// doesn't fit its prefix
pub fn to_bytes<T: ToBinary + ?Sized>(value: &T, options: &BinaryOptions) -> Result<Vec<u8>, Error> {
    let mut writer = Writer::new().with_version(options.binary_version());
    value.to_binary(&mut writer, options.byte_order());
    writer.finish()
}

macro_rules! primitive_binary {
    ($($ty:ty => $read:ident, $write:ident;)*) => {
        $(
            impl FromBinary for $ty {
                #[inline]
                fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
                    reader.$read(order)
                }
            }

            impl ToBinary for $ty {
                #[inline]
                fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
                    writer.$write(*self, order)
                }
            }
        )*
    };
}

primitive_binary! {
    i8 => read_i8, write_i8;
    u8 => read_u8, write_u8;
    i16 => read_i16, write_i16;
    u16 => read_u16, write_u16;
    i32 => read_i32, write_i32;
    u32 => read_u32, write_u32;
    i64 => read_i64, write_i64;
    u64 => read_u64, write_u64;
    f32 => read_f32, write_f32;
    f64 => read_f64, write_f64;
    bool => read_bool, write_bool;
}

impl FromBinary for String {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        reader.read_string(order)
    }
}

impl ToBinary for String {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_string(self, order)
    }
}

impl ToBinary for str {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_string(self, order)
    }
}

/// Sequences are a `u32` count followed by exactly that many elements
impl<T: FromBinary> FromBinary for Vec<T> {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let count = reader.read_count(order, 1)?;
        let mut result = Vec::with_capacity(count);
        for _ in 0..count {
            result.push(T::from_binary(reader, order)?);
        }
        Ok(result)
    }
}

impl<T: ToBinary> ToBinary for Vec<T> {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        self.as_slice().to_binary(writer, order)
    }
}

impl<T: ToBinary> ToBinary for [T] {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_count(self.len(), order);
        for item in self {
            item.to_binary(writer, order);
        }
    }
}

/// Maps are a `u32` count followed by key and value pairs in insertion order
impl<K, V> FromBinary for IndexMap<K, V>
where
    K: FromBinary + Hash + Eq,
    V: FromBinary,
{
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let count = reader.read_count(order, 2)?;
        let mut result = IndexMap::with_capacity(count);
        for _ in 0..count {
            let key = K::from_binary(reader, order)?;
            let value = V::from_binary(reader, order)?;
            result.insert(key, value);
        }
        Ok(result)
    }
}

impl<K: ToBinary, V: ToBinary> ToBinary for IndexMap<K, V> {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_count(self.len(), order);
        for (key, value) in self {
            key.to_binary(writer, order);
            value.to_binary(writer, order);
        }
    }
}

impl<T: FromBinary> FromBinary for Option<T> {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        if reader.read_bool(order)? {
            T::from_binary(reader, order).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl<T: ToBinary> ToBinary for Option<T> {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_bool(self.is_some(), order);
        if let Some(value) = self {
            value.to_binary(writer, order);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[quickcheck]
    fn vec_round_trip(data: Vec<i32>) -> bool {
        let options = BinaryOptions::new().order(ByteOrder::Big);
        let bytes = to_bytes(&data, &options).unwrap();
        from_bytes::<Vec<i32>>(&bytes, &options).unwrap() == data
    }

    #[quickcheck]
    fn string_round_trip(data: String) -> bool {
        let options = BinaryOptions::new();
        let bytes = to_bytes(&data, &options).unwrap();
        from_bytes::<String>(&bytes, &options).unwrap() == data
    }

    #[quickcheck]
    fn map_round_trip(data: Vec<(u32, String)>) -> bool {
        let map: IndexMap<u32, String> = data.into_iter().collect();
        let options = BinaryOptions::new();
        from_bytes::<IndexMap<u32, String>>(&to_bytes(&map, &options).unwrap(), &options).unwrap() == map
    }

    #[test]
    fn truncated_vec_fails() {
        let options = BinaryOptions::new();
        let mut bytes = to_bytes(&vec![1u32, 2, 3], &options).unwrap();
        bytes.pop();
        assert!(from_bytes::<Vec<u32>>(&bytes, &options).is_err());
    }
}
