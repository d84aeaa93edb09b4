//! Rounding modes used when reducing a number's decimal places.
//!
//! Dropping decimal digits splits a scaled value into an integer quotient
//! and a fractional residue. Each mode is a pure decision over that pair:
//! given the quotient, the residue magnitude, the tie threshold
//! (`10^dropped / 2`) and the sign of the original value, it yields an
//! adjustment of -1, 0 or +1 to apply to the quotient. The sign flag is
//! passed explicitly because a quotient of zero cannot carry it.

use core::fmt;

/// The set of supported rounding modes.
///
/// The examples below show the result of rounding 22.77, 22.50, 22.11 and
/// their negations to zero decimal places.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RoundingMode {
    /// Floor function, rounds towards negative infinity.
    ///
    /// 22.77 -> 22, 22.50 -> 22, 22.11 -> 22,
    /// -22.11 -> -23, -22.50 -> -23, -22.77 -> -23
    Down = 0,

    /// Ceiling function, rounds towards positive infinity.
    ///
    /// 22.77 -> 23, 22.50 -> 23, 22.11 -> 23,
    /// -22.11 -> -22, -22.50 -> -22, -22.77 -> -22
    Up,

    /// Truncation, rounds towards zero.
    ///
    /// 22.77 -> 22, 22.50 -> 22, -22.50 -> -22, -22.77 -> -22
    TowardsZero,

    /// Rounds the magnitude up.
    ///
    /// 22.77 -> 23, 22.50 -> 23, 22.11 -> 23,
    /// -22.11 -> -23, -22.50 -> -23, -22.77 -> -23
    AwayFromZero,

    /// Nearest value; a tie of exactly one half rounds up (+0.5).
    ///
    /// 22.50 -> 23, -22.50 -> -22
    ToNearestHalfUp,

    /// Nearest value; a tie rounds down (-0.5).
    ///
    /// 22.50 -> 22, -22.50 -> -23
    ToNearestHalfDown,

    /// Nearest value; a tie rounds the magnitude up.
    ///
    /// 22.50 -> 23, -22.50 -> -23
    ToNearestHalfAwayFromZero,

    /// Nearest value; a tie rounds the magnitude down.
    ///
    /// 22.50 -> 22, -22.50 -> -22
    ToNearestHalfTowardsZero,

    /// Nearest value; a tie rounds to the nearest even value. This is the
    /// IEEE 754 default, also known as banker's rounding, and is the
    /// default mode of this library.
    ///
    /// 22.50 -> 22, 23.50 -> 24, -22.50 -> -22, -23.50 -> -24
    ToNearestHalfToEven,

    /// Nearest value; a tie rounds to the nearest odd value.
    ///
    /// 22.50 -> 23, 23.50 -> 23, -22.50 -> -23, -23.50 -> -23
    ToNearestHalfToOdd,
}

impl RoundingMode {
    pub(crate) const fn from_u8(val: u8) -> RoundingMode {
        match val {
            0 => RoundingMode::Down,
            1 => RoundingMode::Up,
            2 => RoundingMode::TowardsZero,
            3 => RoundingMode::AwayFromZero,
            4 => RoundingMode::ToNearestHalfUp,
            5 => RoundingMode::ToNearestHalfDown,
            6 => RoundingMode::ToNearestHalfAwayFromZero,
            7 => RoundingMode::ToNearestHalfTowardsZero,
            8 => RoundingMode::ToNearestHalfToEven,
            _ => RoundingMode::ToNearestHalfToOdd,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            RoundingMode::Down => "DOWN",
            RoundingMode::Up => "UP",
            RoundingMode::TowardsZero => "TOWARDS_ZERO",
            RoundingMode::AwayFromZero => "AWAY_FROM_ZERO",
            RoundingMode::ToNearestHalfUp => "TO_NEAREST_HALF_UP",
            RoundingMode::ToNearestHalfDown => "TO_NEAREST_HALF_DOWN",
            RoundingMode::ToNearestHalfAwayFromZero => {
                "TO_NEAREST_HALF_AWAY_FROM_ZERO"
            }
            RoundingMode::ToNearestHalfTowardsZero => {
                "TO_NEAREST_HALF_TOWARDS_ZERO"
            }
            RoundingMode::ToNearestHalfToEven => "TO_NEAREST_HALF_TO_EVEN",
            RoundingMode::ToNearestHalfToOdd => "TO_NEAREST_HALF_TO_ODD",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applies `mode` to a split value, returning the adjusted integer quotient.
///
/// `integer_val` is the signed quotient after the digits were divided away,
/// `decimal_val` the magnitude of the removed residue, `half_range` the tie
/// threshold (`10^dropped / 2`), and `negative` the sign of the original
/// value (needed when `integer_val` is zero).
#[inline]
pub(crate) fn round128(
    mode: RoundingMode,
    integer_val: i128,
    decimal_val: i128,
    half_range: i128,
    negative: bool,
) -> i128 {
    integer_val + adjustment(mode, integer_val, decimal_val, half_range, negative)
}

#[inline]
pub(crate) fn round64(
    mode: RoundingMode,
    integer_val: i64,
    decimal_val: i64,
    half_range: i64,
    negative: bool,
) -> i64 {
    round128(
        mode,
        integer_val as i128,
        decimal_val as i128,
        half_range as i128,
        negative,
    ) as i64
}

fn adjustment(
    mode: RoundingMode,
    integer_val: i128,
    decimal_val: i128,
    half_range: i128,
    negative: bool,
) -> i128 {
    match mode {
        RoundingMode::Down => {
            if negative && decimal_val != 0 {
                -1
            } else {
                0
            }
        }
        RoundingMode::Up => {
            if !negative && decimal_val != 0 {
                1
            } else {
                0
            }
        }
        RoundingMode::TowardsZero => 0,
        RoundingMode::AwayFromZero => {
            if decimal_val != 0 {
                if negative { -1 } else { 1 }
            } else {
                0
            }
        }
        RoundingMode::ToNearestHalfUp => {
            if negative {
                if decimal_val > half_range { -1 } else { 0 }
            } else if decimal_val >= half_range {
                1
            } else {
                0
            }
        }
        RoundingMode::ToNearestHalfDown => {
            if negative {
                if decimal_val >= half_range { -1 } else { 0 }
            } else if decimal_val > half_range {
                1
            } else {
                0
            }
        }
        RoundingMode::ToNearestHalfAwayFromZero => {
            if decimal_val >= half_range {
                if negative { -1 } else { 1 }
            } else {
                0
            }
        }
        RoundingMode::ToNearestHalfTowardsZero => {
            if decimal_val > half_range {
                if negative { -1 } else { 1 }
            } else {
                0
            }
        }
        RoundingMode::ToNearestHalfToEven => {
            let odd = integer_val & 1 != 0;
            let round = if odd {
                decimal_val >= half_range
            } else {
                decimal_val > half_range
            };

            if round {
                if negative { -1 } else { 1 }
            } else {
                0
            }
        }
        RoundingMode::ToNearestHalfToOdd => {
            let odd = integer_val & 1 != 0;
            let round = if odd {
                decimal_val > half_range
            } else {
                decimal_val >= half_range
            };

            if round {
                if negative { -1 } else { 1 }
            } else {
                0
            }
        }
    }
}
