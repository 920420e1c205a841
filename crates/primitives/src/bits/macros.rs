/// Wrap a fixed-size byte array in a newtype, delegating all methods to the
/// underlying [`crate::FixedBytes`].
///
/// This functionally creates a new named FixedBytes that cannot be
/// type-confused for another named FixedBytes.
///
/// # Example
///
/// ```
/// use evmabi_primitives::wrap_fixed_bytes;
///
/// // These hashes are the same length, and have the same functionality, but
/// // are distinct types
/// wrap_fixed_bytes!(KeccakOutput<32>);
/// wrap_fixed_bytes!(MerkleTreeItem<32>);
/// ```
#[macro_export]
macro_rules! wrap_fixed_bytes {
    (
        $(#[$attrs:meta])*
        $name:ident<$n:literal>
    ) => {
        $(#[$attrs])*
        #[derive(
            $crate::derive_more::AsRef,
            $crate::derive_more::AsMut,
            $crate::derive_more::Deref,
            $crate::derive_more::DerefMut,
            $crate::derive_more::From,
            Hash,
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Default,
            $crate::derive_more::Index,
            $crate::derive_more::IndexMut,
            $crate::derive_more::FromStr,
            $crate::derive_more::LowerHex,
            $crate::derive_more::UpperHex,
        )]
        pub struct $name(pub $crate::FixedBytes<$n>);

        impl From<[u8; $n]> for $name {
            #[inline]
            fn from(value: [u8; $n]) -> Self {
                Self(value.into())
            }
        }

        impl From<$name> for [u8; $n] {
            #[inline]
            fn from(value: $name) -> Self {
                value.0 .0
            }
        }

        impl<'a> From<&'a [u8; $n]> for $name {
            #[inline]
            fn from(value: &'a [u8; $n]) -> Self {
                Self(value.into())
            }
        }

        impl AsRef<[u8]> for $name {
            #[inline]
            fn as_ref(&self) -> &[u8] {
                &self.0 .0
            }
        }

        impl AsMut<[u8]> for $name {
            #[inline]
            fn as_mut(&mut self) -> &mut [u8] {
                &mut self.0 .0
            }
        }

        impl $name {
            /// Array of zero bytes.
            pub const ZERO: Self = Self($crate::FixedBytes::ZERO);

            /// Returns a new fixed hash from the given bytes array.
            #[inline]
            pub const fn new(bytes: [u8; $n]) -> Self {
                Self($crate::FixedBytes(bytes))
            }

            /// Returns the size of this hash in bytes.
            #[inline]
            pub const fn len_bytes() -> usize {
                $n
            }

            /// Extracts a byte slice containing the entire fixed hash.
            #[inline]
            pub const fn as_bytes(&self) -> &[u8] {
                self.0.as_bytes()
            }

            /// Extracts a reference to the byte array containing the entire fixed hash.
            #[inline]
            pub const fn as_fixed_bytes(&self) -> &[u8; $n] {
                self.0.as_fixed_bytes()
            }

            /// Returns the inner bytes array.
            #[inline]
            pub const fn to_fixed_bytes(self) -> [u8; $n] {
                self.0.to_fixed_bytes()
            }

            /// Create a new fixed-hash from the given slice `src`.
            ///
            /// # Note
            ///
            /// The given bytes are interpreted in big endian order.
            ///
            /// # Panics
            ///
            /// If the length of `src` and the number of bytes in `Self` do not match.
            #[track_caller]
            pub fn from_slice(src: &[u8]) -> Self {
                Self($crate::FixedBytes::from_slice(src))
            }

            /// Returns `true` if no bits are set.
            #[inline]
            pub fn is_zero(&self) -> bool {
                self.as_bytes().iter().all(|&byte| byte == 0u8)
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                ::core::fmt::Debug::fmt(&self.0, f)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        $crate::impl_serde!($name);
    };
}

#[doc(hidden)]
#[macro_export]
#[cfg(feature = "serde")]
macro_rules! impl_serde {
    ($t:ty) => {
        impl serde::Serialize for $t {
            #[inline]
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&self.0, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $t {
            #[inline]
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                serde::Deserialize::deserialize(deserializer).map(Self)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
#[cfg(not(feature = "serde"))]
macro_rules! impl_serde {
    ($t:ty) => {};
}
