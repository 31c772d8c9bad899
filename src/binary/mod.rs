//! The fixed layout binary format defined by this crate
//!
//! Every record writes its fields in declaration order with no embedded
//! schema. Byte order is a parameter of every read and write so a caller can
//! pick little, big, or the target's native endianness.
//!
//! ```
//! use robtop::binary::{ByteOrder, Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.write_u16(0x0102, ByteOrder::Big);
//! writer.write_f32(1.5, ByteOrder::Little);
//! let data = writer.into_inner();
//! assert_eq!(&data[..2], &[0x01, 0x02]);
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.read_u16(ByteOrder::Big).unwrap(), 0x0102);
//! assert_eq!(reader.read_f32(ByteOrder::Little).unwrap(), 1.5);
//! assert!(reader.is_empty());
//! ```
mod options;
mod order;
mod reader;
mod traits;
mod writer;

pub use self::options::BinaryOptions;
pub use self::order::ByteOrder;
pub use self::reader::Reader;
pub use self::traits::{from_bytes, to_bytes, FromBinary, ToBinary};
pub use self::writer::Writer;
