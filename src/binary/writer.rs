use super::order::Convert;
use super::ByteOrder;
use crate::version::RobTopVersion;
use crate::{Error, ErrorKind};

/// Appends binary values to an in-memory buffer
///
/// A count or length that doesn't fit its prefix is written saturated and
/// the first such overflow is reported by [`Writer::finish`].
#[derive(Debug)]
pub struct Writer {
    buf: Vec<u8>,
    version: RobTopVersion,
    overflow: Option<Error>,
}

impl Default for Writer {
    fn default() -> Self {
        Writer::new()
    }
}

macro_rules! write_number {
    ($(#[$doc:meta] $name:ident, $ty:ty;)*) => {
        $(
            #[$doc]
            #[inline]
            pub fn $name(&mut self, value: $ty, order: ByteOrder) {
                self.buf.extend_from_slice(&value.to_order(order));
            }
        )*
    };
}

impl Writer {
    /// Create an empty writer stamped with the current binary version
    pub fn new() -> Self {
        Writer {
            buf: Vec::new(),
            version: RobTopVersion::CURRENT_BINARY,
            overflow: None,
        }
    }

    pub(crate) fn with_version(mut self, version: RobTopVersion) -> Self {
        self.version = version;
        self
    }

    /// The binary version being written
    #[inline]
    pub fn version(&self) -> RobTopVersion {
        self.version
    }

    pub(crate) fn set_version(&mut self, version: RobTopVersion) {
        self.version = version;
    }

    /// Number of bytes written so far
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes this writer, returning the written bytes even when a count
    /// overflowed its prefix
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    /// Consumes this writer, returning the written bytes or the first count
    /// that overflowed its prefix
    pub fn finish(self) -> Result<Vec<u8>, Error> {
        match self.overflow {
            Some(err) => Err(err),
            None => Ok(self.buf),
        }
    }

    fn checked_count<T: TryFrom<usize>>(&mut self, count: usize, max: T) -> T {
        match T::try_from(count) {
            Ok(count) => count,
            Err(_) => {
                if self.overflow.is_none() {
                    log::warn!("count of {} overflows its prefix at {}", count, self.buf.len());
                    self.overflow = Some(Error::new(ErrorKind::CountOverflow {
                        offset: self.buf.len(),
                        count,
                    }));
                }
                max
            }
        }
    }

    /// Append raw bytes
    #[inline]
    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    write_number! {
        /// Write a signed byte
        write_i8, i8;
        /// Write an unsigned byte
        write_u8, u8;
        /// Write a signed 16 bit integer
        write_i16, i16;
        /// Write an unsigned 16 bit integer
        write_u16, u16;
        /// Write a signed 32 bit integer
        write_i32, i32;
        /// Write an unsigned 32 bit integer
        write_u32, u32;
        /// Write a signed 64 bit integer
        write_i64, i64;
        /// Write an unsigned 64 bit integer
        write_u64, u64;
        /// Write a 32 bit float
        write_f32, f32;
        /// Write a 64 bit float
        write_f64, f64;
    }

    /// Write a boolean as a single byte
    #[inline]
    pub fn write_bool(&mut self, value: bool, order: ByteOrder) {
        self.write_u8(u8::from(value), order);
    }

    /// Write a `u32` element count
    #[inline]
    pub fn write_count(&mut self, count: usize, order: ByteOrder) {
        let count = self.checked_count(count, u32::MAX);
        self.write_u32(count, order);
    }

    /// Write a `u16` element count
    #[inline]
    pub fn write_short_count(&mut self, count: usize, order: ByteOrder) {
        let count = self.checked_count(count, u16::MAX);
        self.write_u16(count, order);
    }

    /// Write a `u32` byte length followed by the UTF-8 data
    pub fn write_string(&mut self, value: &str, order: ByteOrder) {
        self.write_count(value.len(), order);
        self.buf.extend_from_slice(value.as_bytes());
    }

    /// Write a `u32` byte length prefixed block, where the length is patched
    /// in after the closure has written the body
    pub fn write_block<F>(&mut self, order: ByteOrder, body: F)
    where
        F: FnOnce(&mut Writer),
    {
        let start = self.buf.len();
        self.write_u32(0, order);
        body(self);
        let len = self.buf.len() - start - 4;
        let len = self.checked_count(len, u32::MAX);
        self.buf[start..start + 4].copy_from_slice(&len.to_order(order));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::Reader;

    #[test]
    fn block_length_is_patched() {
        let mut writer = Writer::new();
        writer.write_block(ByteOrder::Big, |w| {
            w.write_u16(5, ByteOrder::Big);
            w.write_string("ab", ByteOrder::Big);
        });
        let data = writer.into_inner();
        assert_eq!(&data[..4], &[0, 0, 0, 8]);

        let mut reader = Reader::new(&data);
        let mut block = reader.read_block(ByteOrder::Big).unwrap();
        assert_eq!(block.read_u16(ByteOrder::Big).unwrap(), 5);
        assert_eq!(block.read_string(ByteOrder::Big).unwrap(), "ab");
        assert!(reader.is_empty());
    }

    #[test]
    fn short_count_overflow_is_reported() {
        let mut writer = Writer::new();
        writer.write_u8(7, ByteOrder::Little);
        writer.write_short_count(70_000, ByteOrder::Little);
        writer.write_short_count(80_000, ByteOrder::Little);

        let err = writer.finish().unwrap_err();
        match err.kind() {
            ErrorKind::CountOverflow { offset, count } => {
                assert_eq!(*offset, 1);
                assert_eq!(*count, 70_000);
            }
            kind => panic!("unexpected error {:?}", kind),
        }
    }

    #[test]
    fn counts_in_range_finish() {
        let mut writer = Writer::new();
        writer.write_short_count(usize::from(u16::MAX), ByteOrder::Big);
        writer.write_count(65_536, ByteOrder::Big);
        assert_eq!(writer.finish().unwrap(), vec![0xff, 0xff, 0, 1, 0, 0]);
    }

    #[test]
    fn bool_is_single_byte() {
        let mut writer = Writer::new();
        writer.write_bool(true, ByteOrder::Native);
        writer.write_bool(false, ByteOrder::Native);
        assert_eq!(writer.into_inner(), vec![1, 0]);
    }
}
