/// Byte order of multi-byte binary values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Least significant byte first
    #[default]
    Little,

    /// Most significant byte first
    Big,

    /// Whatever the target platform uses
    Native,
}

impl ByteOrder {
    /// Resolve the native order into little or big
    pub const fn resolve(self) -> ByteOrder {
        match self {
            ByteOrder::Native if cfg!(target_endian = "big") => ByteOrder::Big,
            ByteOrder::Native => ByteOrder::Little,
            x => x,
        }
    }
}

macro_rules! order_conversions {
    ($($ty:ty),*) => {
        $(
            impl crate::binary::order::Convert<{ std::mem::size_of::<$ty>() }> for $ty {
                #[inline]
                fn from_order(bytes: [u8; std::mem::size_of::<$ty>()], order: ByteOrder) -> Self {
                    match order {
                        ByteOrder::Little => <$ty>::from_le_bytes(bytes),
                        ByteOrder::Big => <$ty>::from_be_bytes(bytes),
                        ByteOrder::Native => <$ty>::from_ne_bytes(bytes),
                    }
                }

                #[inline]
                fn to_order(self, order: ByteOrder) -> [u8; std::mem::size_of::<$ty>()] {
                    match order {
                        ByteOrder::Little => self.to_le_bytes(),
                        ByteOrder::Big => self.to_be_bytes(),
                        ByteOrder::Native => self.to_ne_bytes(),
                    }
                }
            }
        )*
    };
}

/// Fixed width numbers that can be converted from and to bytes of a given order
pub(crate) trait Convert<const N: usize>: Sized {
    fn from_order(bytes: [u8; N], order: ByteOrder) -> Self;
    fn to_order(self, order: ByteOrder) -> [u8; N];
}

order_conversions!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_resolves() {
        let expected = if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        };
        assert_eq!(ByteOrder::Native.resolve(), expected);
        assert_eq!(ByteOrder::Big.resolve(), ByteOrder::Big);
    }

    #[test]
    fn conversions_respect_order() {
        assert_eq!(0x0102u16.to_order(ByteOrder::Big), [1, 2]);
        assert_eq!(0x0102u16.to_order(ByteOrder::Little), [2, 1]);
        assert_eq!(u16::from_order([1, 2], ByteOrder::Big), 0x0102);
        assert_eq!(
            i32::from_order((-7i32).to_order(ByteOrder::Native), ByteOrder::Native),
            -7
        );
    }
}
