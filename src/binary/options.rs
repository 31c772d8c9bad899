use super::ByteOrder;
use crate::version::RobTopVersion;

/// Configuration for reading and writing binary data
///
/// ```
/// use robtop::binary::{BinaryOptions, ByteOrder};
///
/// let options = BinaryOptions::new()
///     .order(ByteOrder::Big)
///     .skip_malformed_levels(true);
/// assert_eq!(options.byte_order(), ByteOrder::Big);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryOptions {
    order: ByteOrder,
    version: RobTopVersion,
    skip_malformed: bool,
}

impl Default for BinaryOptions {
    fn default() -> Self {
        BinaryOptions::new()
    }
}

impl BinaryOptions {
    /// Little endian, current binary version, strict decoding
    pub fn new() -> Self {
        BinaryOptions {
            order: ByteOrder::Little,
            version: RobTopVersion::CURRENT_BINARY,
            skip_malformed: false,
        }
    }

    /// Byte order threaded through every read and write
    pub fn order(mut self, order: ByteOrder) -> Self {
        self.order = order;
        self
    }

    /// Binary version carried by the reader and writer. A `Database` writes
    /// its own `binary_version` stamp instead and reads it back from the data.
    pub fn version(mut self, version: RobTopVersion) -> Self {
        self.version = version;
        self
    }

    /// Skip levels whose length prefixed block fails to decode instead of
    /// aborting the whole collection
    pub fn skip_malformed_levels(mut self, skip: bool) -> Self {
        self.skip_malformed = skip;
        self
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    pub fn binary_version(&self) -> RobTopVersion {
        self.version
    }

    pub fn skips_malformed_levels(&self) -> bool {
        self.skip_malformed
    }
}
