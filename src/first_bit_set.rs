//! Position of the most significant set bit.
//!
//! Values returned range from 0 to 64 for 64-bit inputs and 0 to 128 for
//! 128-bit inputs. 0 means no bit was set, 1 is the lowest bit, and 64/128
//! the highest bit of the respective width. Signed inputs are measured by
//! magnitude, so `i64::MIN` reports bit 64.

/// The highest bit position a signed 64-bit magnitude can occupy.
pub(crate) const MAX_I64_BIT_POS: u32 = 63;

/// The highest bit position a signed 128-bit magnitude can occupy.
pub(crate) const MAX_I128_BIT_POS: u32 = 127;

#[inline(always)]
pub(crate) const fn first_bit_set_u64(val: u64) -> u32 {
    u64::BITS - val.leading_zeros()
}

#[inline(always)]
pub(crate) const fn first_bit_set_i64(val: i64) -> u32 {
    first_bit_set_u64(val.unsigned_abs())
}

#[inline(always)]
pub(crate) const fn first_bit_set_u128(val: u128) -> u32 {
    u128::BITS - val.leading_zeros()
}

#[inline(always)]
pub(crate) const fn first_bit_set_i128(val: i128) -> u32 {
    first_bit_set_u128(val.unsigned_abs())
}
