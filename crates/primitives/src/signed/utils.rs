use ruint::Uint;

/// Compute the two's complement of a fixed-width unsigned integer.
#[inline(always)]
pub(crate) fn twos_complement<const BITS: usize, const LIMBS: usize>(
    u: Uint<BITS, LIMBS>,
) -> Uint<BITS, LIMBS> {
    (!u).overflowing_add(Uint::<BITS, LIMBS>::from(1)).0
}

/// Compile-time equality of two signed integers.
#[inline(always)]
pub const fn const_eq<const BITS: usize, const LIMBS: usize>(
    left: super::Signed<BITS, LIMBS>,
    right: super::Signed<BITS, LIMBS>,
) -> bool {
    let mut i = 0;
    let llimbs = left.into_raw().as_limbs();
    let rlimbs = right.into_raw().as_limbs();
    loop {
        if llimbs[i] != rlimbs[i] {
            return false
        }
        i += 1;
        if i == LIMBS {
            break
        }
    }
    true
}
