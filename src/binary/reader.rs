use super::order::Convert;
use super::ByteOrder;
use crate::{util::get_split, version::RobTopVersion, Error, ErrorKind};

/// A cursor over binary data that tracks the absolute offset of every read
///
/// The reader also carries the binary version stamp of the data and whether
/// malformed length prefixed blocks may be skipped.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
    version: RobTopVersion,
    skip_malformed: bool,
}

macro_rules! read_number {
    ($(#[$doc:meta] $name:ident, $ty:ty, $n:expr;)*) => {
        $(
            #[$doc]
            #[inline]
            pub fn $name(&mut self, order: ByteOrder) -> Result<$ty, Error> {
                let bytes = self.read_array::<$n>()?;
                Ok(<$ty>::from_order(bytes, order))
            }
        )*
    };
}

impl<'a> Reader<'a> {
    /// Create a reader at the start of the given data
    pub fn new(data: &'a [u8]) -> Self {
        Reader {
            data,
            offset: 0,
            version: RobTopVersion::CURRENT_BINARY,
            skip_malformed: false,
        }
    }

    pub(crate) fn with_options(mut self, version: RobTopVersion, skip_malformed: bool) -> Self {
        self.version = version;
        self.skip_malformed = skip_malformed;
        self
    }

    /// The number of bytes consumed from the start of the outermost data
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The binary version the data was written with
    #[inline]
    pub fn version(&self) -> RobTopVersion {
        self.version
    }

    pub(crate) fn set_version(&mut self, version: RobTopVersion) {
        self.version = version;
    }

    /// Whether malformed length prefixed blocks may be skipped
    #[inline]
    pub fn skip_malformed(&self) -> bool {
        self.skip_malformed
    }

    /// Remaining unread bytes
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        self.data
    }

    /// Returns true if all data has been read
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let (head, rest) =
            get_split::<N>(self.data).ok_or_else(|| Error::eof(self.offset, N - self.data.len()))?;
        self.data = rest;
        self.offset += N;
        Ok(head)
    }

    /// Read exactly `len` raw bytes
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
        if len > self.data.len() {
            return Err(Error::eof(self.offset, len - self.data.len()));
        }

        let (head, rest) = self.data.split_at(len);
        self.data = rest;
        self.offset += len;
        Ok(head)
    }

    read_number! {
        /// Read a signed byte
        read_i8, i8, 1;
        /// Read an unsigned byte
        read_u8, u8, 1;
        /// Read a signed 16 bit integer
        read_i16, i16, 2;
        /// Read an unsigned 16 bit integer
        read_u16, u16, 2;
        /// Read a signed 32 bit integer
        read_i32, i32, 4;
        /// Read an unsigned 32 bit integer
        read_u32, u32, 4;
        /// Read a signed 64 bit integer
        read_i64, i64, 8;
        /// Read an unsigned 64 bit integer
        read_u64, u64, 8;
        /// Read a 32 bit float
        read_f32, f32, 4;
        /// Read a 64 bit float
        read_f64, f64, 8;
    }

    /// Read a boolean stored as a single byte, where any nonzero value is true
    #[inline]
    pub fn read_bool(&mut self, order: ByteOrder) -> Result<bool, Error> {
        self.read_u8(order).map(|x| x != 0)
    }

    /// Read a `u32` element count and check that the remaining data could
    /// hold that many elements of at least `min_size` bytes
    pub fn read_count(&mut self, order: ByteOrder, min_size: usize) -> Result<usize, Error> {
        let offset = self.offset;
        let count = self.read_u32(order)? as usize;
        self.check_count(offset, count, min_size)
    }

    /// Read a `u16` element count, see [`Reader::read_count`]
    pub fn read_short_count(&mut self, order: ByteOrder, min_size: usize) -> Result<usize, Error> {
        let offset = self.offset;
        let count = usize::from(self.read_u16(order)?);
        self.check_count(offset, count, min_size)
    }

    fn check_count(&self, offset: usize, count: usize, min_size: usize) -> Result<usize, Error> {
        match count.checked_mul(min_size) {
            Some(needed) if needed <= self.data.len() => Ok(count),
            _ => Err(Error::new(ErrorKind::SequenceLength { offset, count })),
        }
    }

    /// Read a `u32` byte length followed by UTF-8 data
    pub fn read_string(&mut self, order: ByteOrder) -> Result<String, Error> {
        let offset = self.offset;
        let len = self.read_count(order, 1)?;
        let data = self.read_bytes(len)?;
        std::str::from_utf8(data)
            .map(String::from)
            .map_err(|_| Error::new(ErrorKind::Utf8 { offset }))
    }

    /// Read a `u32` byte length and return a reader confined to that many bytes.
    ///
    /// The outer reader is advanced past the block regardless of how much of
    /// the block is later consumed.
    pub fn read_block(&mut self, order: ByteOrder) -> Result<Reader<'a>, Error> {
        let len = self.read_count(order, 1)?;
        let start = self.offset;
        let data = self.read_bytes(len)?;
        Ok(Reader {
            data,
            offset: start,
            version: self.version,
            skip_malformed: self.skip_malformed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[test]
    fn eof_reports_offset_and_shortfall() {
        let mut reader = Reader::new(&[1, 2, 3]);
        assert_eq!(reader.read_u16(ByteOrder::Little).unwrap(), 0x0201);
        let err = reader.read_u32(ByteOrder::Little).unwrap_err();
        match err.kind() {
            ErrorKind::Eof { offset, needed } => {
                assert_eq!(*offset, 2);
                assert_eq!(*needed, 3);
            }
            _ => panic!("unexpected error: {}", err),
        }
    }

    #[rstest]
    #[case(ByteOrder::Little, &[0x00, 0x00, 0xc0, 0x3f])]
    #[case(ByteOrder::Big, &[0x3f, 0xc0, 0x00, 0x00])]
    fn read_float(#[case] order: ByteOrder, #[case] data: &[u8]) {
        let mut reader = Reader::new(data);
        assert_eq!(reader.read_f32(order).unwrap(), 1.5);
        assert!(reader.is_empty());
    }

    #[test]
    fn oversized_count_is_rejected() {
        let data = [0xff, 0xff, 0xff, 0x0f, 1, 2];
        let mut reader = Reader::new(&data);
        let err = reader.read_count(ByteOrder::Little, 2).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::SequenceLength { offset: 0, .. }
        ));
    }

    #[test]
    fn block_advances_outer_reader() {
        let data = [2, 0, 0, 0, 7, 8, 9];
        let mut reader = Reader::new(&data);
        let mut block = reader.read_block(ByteOrder::Little).unwrap();
        assert_eq!(block.offset(), 4);
        assert_eq!(block.read_u8(ByteOrder::Little).unwrap(), 7);
        assert_eq!(reader.read_u8(ByteOrder::Little).unwrap(), 9);
    }

    #[test]
    fn invalid_utf8_string() {
        let data = [1, 0, 0, 0, 0xff];
        let err = Reader::new(&data)
            .read_string(ByteOrder::Little)
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Utf8 { offset: 0 }));
    }
}
