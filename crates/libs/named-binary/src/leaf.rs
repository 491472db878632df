//! Fixed-size leaf values.
//!
//! Leaves are written in machine-native byte order. Streams are not portable
//! across architectures of different endianness.

/// A value transferred as a single raw byte run.
pub trait Leaf: Copy {
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default;

    fn to_native(self) -> Self::Bytes;
    fn from_native(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_numeric_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Leaf for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                #[inline]
                fn to_native(self) -> Self::Bytes {
                    self.to_ne_bytes()
                }

                #[inline]
                fn from_native(bytes: Self::Bytes) -> Self {
                    <$ty>::from_ne_bytes(bytes)
                }
            }
        )*
    };
}

impl_numeric_leaf!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

/// Any non-zero byte reads back as `true`.
impl Leaf for bool {
    type Bytes = [u8; 1];

    fn to_native(self) -> Self::Bytes {
        [u8::from(self)]
    }

    fn from_native(bytes: Self::Bytes) -> Self {
        bytes[0] != 0
    }
}

/// Element count written ahead of a variable-length sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SizeTag(pub u64);

impl Leaf for SizeTag {
    type Bytes = [u8; 8];

    fn to_native(self) -> Self::Bytes {
        self.0.to_ne_bytes()
    }

    fn from_native(bytes: Self::Bytes) -> Self {
        Self(u64::from_ne_bytes(bytes))
    }
}
