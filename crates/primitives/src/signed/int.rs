use super::{errors, utils::twos_complement, Sign};
use core::{cmp, fmt};
use ruint::Uint;

#[cfg(not(feature = "std"))]
use alloc::format;

const fn sign_bit(bits: usize) -> u64 {
    if bits == 0 {
        return 0
    }
    let bits = bits % 64;
    if bits == 0 {
        1 << 63
    } else {
        1 << (bits - 1)
    }
}

const fn mask(bits: usize) -> u64 {
    if bits == 0 {
        return 0
    }
    let bits = bits % 64;
    if bits == 0 {
        u64::MAX
    } else {
        (1 << bits) - 1
    }
}

const fn max<const BITS: usize, const LIMBS: usize>() -> Signed<BITS, LIMBS> {
    let mut limbs = [u64::MAX; LIMBS];
    limbs[LIMBS - 1] &= Signed::<BITS, LIMBS>::MASK;
    limbs[LIMBS - 1] &= !Signed::<BITS, LIMBS>::SIGN_BIT;
    Signed(Uint::from_limbs(limbs))
}

const fn min<const BITS: usize, const LIMBS: usize>() -> Signed<BITS, LIMBS> {
    let mut limbs = [0; LIMBS];
    limbs[LIMBS - 1] = Signed::<BITS, LIMBS>::SIGN_BIT;
    Signed(Uint::from_limbs(limbs))
}

const fn zero<const BITS: usize, const LIMBS: usize>() -> Signed<BITS, LIMBS> {
    Signed(Uint::from_limbs([0; LIMBS]))
}

const fn one<const BITS: usize, const LIMBS: usize>() -> Signed<BITS, LIMBS> {
    let mut limbs = [0; LIMBS];
    limbs[0] = 1;
    Signed(Uint::from_limbs(limbs))
}

/// Two's-complement signed integer wrapping a [`ruint::Uint`].
///
/// This type only supports construction, bit-width range checks, big-endian
/// byte round-tripping, and ordering: the ABI codec never performs arithmetic
/// on decoded values, it only moves them between Solidity words and Rust
/// integers.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Signed<const BITS: usize, const LIMBS: usize>(pub(crate) Uint<BITS, LIMBS>);

impl<const BITS: usize, const LIMBS: usize> fmt::Debug for Signed<BITS, LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<const BITS: usize, const LIMBS: usize> fmt::Display for Signed<BITS, LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, abs) = self.into_sign_and_abs();
        fmt::Display::fmt(&sign, f)?;
        write!(f, "{abs}")
    }
}

impl<const BITS: usize, const LIMBS: usize> fmt::LowerHex for Signed<BITS, LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, abs) = self.into_sign_and_abs();
        fmt::Display::fmt(&sign, f)?;
        write!(f, "{abs:x}")
    }
}

impl<const BITS: usize, const LIMBS: usize> fmt::UpperHex for Signed<BITS, LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, abs) = self.into_sign_and_abs();
        fmt::Display::fmt(&sign, f)?;
        let mut buffer = format!("{abs:x}");
        buffer.make_ascii_uppercase();
        f.write_str(&buffer)
    }
}

impl<const BITS: usize, const LIMBS: usize> cmp::PartialOrd for Signed<BITS, LIMBS> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<const BITS: usize, const LIMBS: usize> cmp::Ord for Signed<BITS, LIMBS> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        use cmp::Ordering::*;
        use Sign::*;

        match (self.into_sign_and_abs(), other.into_sign_and_abs()) {
            ((Positive, _), (Negative, _)) => Greater,
            ((Negative, _), (Positive, _)) => Less,
            ((Positive, this), (Positive, other)) => this.cmp(&other),
            ((Negative, this), (Negative, other)) => other.cmp(&this),
        }
    }
}

impl<const BITS: usize, const LIMBS: usize> Signed<BITS, LIMBS> {
    const MASK: u64 = mask(BITS);
    const SIGN_BIT: u64 = sign_bit(BITS);

    /// Number of bits.
    pub const BITS: usize = BITS;

    /// The minimum value.
    pub const MIN: Self = min();

    /// The maximum value.
    pub const MAX: Self = max();

    /// Zero.
    pub const ZERO: Self = zero();

    /// One.
    pub const ONE: Self = one();

    /// Minus one.
    pub const MINUS_ONE: Self = Self(Uint::<BITS, LIMBS>::MAX);

    /// Coerces an unsigned integer into a signed one. If the unsigned
    /// integer is greater than or equal to `1 << (BITS - 1)`, the result
    /// will be a negative value in two's complement.
    #[inline(always)]
    pub const fn from_raw(val: Uint<BITS, LIMBS>) -> Self {
        Self(val)
    }

    /// Attempt to perform the conversion via a `TryInto` implementation, and
    /// panic on failure. Shortcut for `val.try_into().unwrap()`.
    #[inline(always)]
    pub fn unchecked_from<T>(val: T) -> Self
    where
        T: TryInto<Self>,
        <T as TryInto<Self>>::Error: fmt::Debug,
    {
        val.try_into().unwrap()
    }

    /// Returns the inner two's-complement representation.
    #[inline(always)]
    pub const fn into_raw(self) -> Uint<BITS, LIMBS> {
        self.0
    }

    /// Returns the sign of `self`.
    #[inline(always)]
    pub const fn sign(self) -> Sign {
        if let Some(limb) = self.0.as_limbs().last() {
            if *limb >= Self::SIGN_BIT {
                return Sign::Negative
            }
        }
        Sign::Positive
    }

    /// Returns `true` if `self` is zero.
    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        super::utils::const_eq(self, Self::ZERO)
    }

    /// Returns `true` if `self` is strictly positive.
    #[inline(always)]
    pub const fn is_positive(self) -> bool {
        !self.is_zero() && matches!(self.sign(), Sign::Positive)
    }

    /// Returns `true` if `self` is strictly negative.
    #[inline(always)]
    pub const fn is_negative(self) -> bool {
        matches!(self.sign(), Sign::Negative)
    }

    /// Returns the least number of bits needed to represent `self`.
    #[inline(always)]
    pub fn bits(self) -> u32 {
        let unsigned = self.unsigned_abs();
        let unsigned_bits = unsigned.bit_len();

        // A negative power of two (`0b11..1100..00`) needs the same number
        // of bits as its absolute value; every other negative number needs
        // one more bit than its absolute value to represent the sign.
        let bits = if self.0.count_zeros() == self.0.trailing_zeros() {
            unsigned_bits
        } else {
            unsigned_bits + 1
        };

        bits as _
    }

    /// Creates a `Signed` from a sign and an absolute value, reporting
    /// whether the conversion overflowed the target bit width.
    #[inline(always)]
    pub fn overflowing_from_sign_and_abs(sign: Sign, abs: Uint<BITS, LIMBS>) -> (Self, bool) {
        let value = Self(match sign {
            Sign::Positive => abs,
            Sign::Negative => twos_complement(abs),
        });

        (value, value.sign() != sign)
    }

    /// Creates a `Signed` from a sign and an absolute value. Returns `None`
    /// if the value does not fit in `BITS` bits.
    #[inline(always)]
    pub fn checked_from_sign_and_abs(sign: Sign, abs: Uint<BITS, LIMBS>) -> Option<Self> {
        let (result, overflow) = Self::overflowing_from_sign_and_abs(sign, abs);
        if overflow {
            None
        } else {
            Some(result)
        }
    }

    /// Parses a `Signed` from a decimal string, with an optional leading
    /// `+` or `-`.
    pub fn from_dec_str(value: &str) -> Result<Self, errors::ParseSignedError> {
        let (sign, value) = match value.as_bytes().first() {
            Some(b'+') => (Sign::Positive, &value[1..]),
            Some(b'-') => (Sign::Negative, &value[1..]),
            _ => (Sign::Positive, value),
        };
        let abs = Uint::<BITS, LIMBS>::from_str_radix(value, 10)?;
        Self::checked_from_sign_and_abs(sign, abs).ok_or(errors::ParseSignedError::IntegerOverflow)
    }

    /// Parses a `Signed` from a hex string, with an optional leading `+`,
    /// `-`, and `0x` prefix.
    pub fn from_hex_str(value: &str) -> Result<Self, errors::ParseSignedError> {
        let (sign, value) = match value.as_bytes().first() {
            Some(b'+') => (Sign::Positive, &value[1..]),
            Some(b'-') => (Sign::Negative, &value[1..]),
            _ => (Sign::Positive, value),
        };

        let value = value.strip_prefix("0x").unwrap_or(value);

        if value.len() > 64 {
            return Err(errors::ParseSignedError::IntegerOverflow)
        }

        let abs = Uint::<BITS, LIMBS>::from_str_radix(value, 16)?;
        Self::checked_from_sign_and_abs(sign, abs).ok_or(errors::ParseSignedError::IntegerOverflow)
    }

    /// Splits a `Signed` into its sign and absolute value.
    #[inline(always)]
    pub fn into_sign_and_abs(self) -> (Sign, Uint<BITS, LIMBS>) {
        let sign = self.sign();
        let abs = match sign {
            Sign::Positive => self.0,
            Sign::Negative => twos_complement(self.0),
        };
        (sign, abs)
    }

    /// Returns the absolute value as an unsigned integer, without wrapping
    /// or panicking.
    #[inline(always)]
    pub fn unsigned_abs(self) -> Uint<BITS, LIMBS> {
        self.into_sign_and_abs().1
    }

    /// Converts to a 32-byte big-endian two's-complement representation.
    ///
    /// # Panics
    ///
    /// If `BITS` is not exactly 256.
    #[inline(always)]
    #[track_caller]
    pub fn to_big_endian(self) -> [u8; 32] {
        self.0.to_be_bytes()
    }

    /// Converts to a 32-byte little-endian two's-complement representation.
    ///
    /// # Panics
    ///
    /// If `BITS` is not exactly 256.
    #[inline(always)]
    #[track_caller]
    pub fn to_little_endian(self) -> [u8; 32] {
        self.0.to_le_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::I256;

    #[test]
    fn sign_and_abs_roundtrip() {
        let neg = I256::unchecked_from(-42i128);
        assert!(neg.is_negative());
        assert_eq!(neg.unsigned_abs(), Uint::<256, 4>::from(42u64));
    }

    #[test]
    fn ordering_crosses_sign() {
        let neg = I256::unchecked_from(-1i128);
        let pos = I256::unchecked_from(1i128);
        assert!(neg < pos);
    }

    #[test]
    fn display_roundtrip() {
        let neg = I256::unchecked_from(-42i128);
        assert_eq!(neg.to_string(), "-42");
    }

    #[test]
    fn min_max_bit_width() {
        assert!(I256::MAX.is_positive());
        assert!(I256::MIN.is_negative());
    }

    #[test]
    fn checked_from_sign_and_abs_overflows() {
        let too_big = Uint::<8, 1>::from(200u64);
        assert!(crate::I8::checked_from_sign_and_abs(Sign::Positive, too_big).is_none());
    }
}
