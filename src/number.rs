use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::{Product, Sum};
use core::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub,
    SubAssign,
};
use core::str::FromStr;
use core::sync::atomic::{AtomicU8, Ordering as AtomicOrdering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::DecimalError;
use crate::first_bit_set::{
    MAX_I64_BIT_POS, MAX_I128_BIT_POS, first_bit_set_i64, first_bit_set_i128,
    first_bit_set_u64,
};
use crate::precision::{
    PrecisionPolicy, product_decimal_places, quotient_decimal_places,
};
use crate::rounding::{RoundingMode, round64, round128};
use crate::shift_table::{
    MAX_DIGITS_64, MAX_DIGITS_128, SHIFT_TABLE_64, SHIFT_TABLE_128,
    integer_digits_of_precision_128,
};

/// Sign selector for the part-wise constructors.
///
/// A negative integer part passed to those constructors overrides this flag;
/// the flag exists so values like `-0.51` (integer part zero) can be built.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sign {
    Negative,
    Positive,
}

/// The scaled backing integer. The fast 64-bit representation is used
/// whenever the value fits 63 magnitude bits and is not exactly `-2^63`;
/// that one value stays 128-bit so taking its absolute value cannot
/// overflow.
#[derive(Copy, Clone, Debug)]
enum Value {
    V64(i64),
    V128(i128),
}

/// A signed fixed-point decimal: an integer scaled by `10^decimal_places`,
/// with the decimal-place count carried per instance.
///
/// The largest representable magnitude is
/// `9223372036854775807.99999999999999` (integer part `2^63 - 1`, fourteen
/// decimal places). Operations whose integer portion would exceed that fail
/// with [`DecimalError::Overflow`].
///
/// Multiplication may have to reduce the precision of its factors to keep
/// the product representable, and division may have to cap the precision of
/// its quotient. Two extremes to illustrate:
///
/// ```text
/// 123456789012.12345678901234 * 74709314.17104198834225
///   is computed as 123456789012.12345679 * 74709314.17104198834
///   = 9223372036854775806.79500247491567
///
/// 3676299675362152112.41203440812031 / 0.39858520947355
///   can only carry five decimal places:
///   = 9223372036854544405.23297
/// ```
///
/// These limits only matter near the top of the range; everyday financial
/// magnitudes are unaffected.
#[derive(Copy, Clone)]
pub struct Number {
    mult_policy: PrecisionPolicy,
    div_policy: PrecisionPolicy,
    rounding_mode: RoundingMode,
    decimal_places: u8,
    value: Value,
}

// ============================================================================
// Constants
// ============================================================================

impl Number {
    /// The largest magnitude the integer portion may reach. Operations
    /// producing a larger integer portion fail with
    /// [`DecimalError::Overflow`].
    pub const MAX_INTEGER_VALUE: u64 = i64::MAX as u64;

    /// Upper bound on decimal places. Multiplication and division results
    /// are capped here, and [`Number::set_decimal_places`] rejects anything
    /// larger.
    pub const MAX_DECIMAL_PLACES: u32 = 14;

    /// The largest fractional value, following directly from
    /// [`Number::MAX_DECIMAL_PLACES`].
    pub const MAX_FRACTIONAL_VALUE: u64 = 100_000_000_000_000 - 1;

    /// Extra decimal places carried through a division so the final
    /// adjustment to the target precision rounds on a real digit.
    pub const DIVISION_EXTRA_DP_FOR_ROUNDING: u32 = 1;

    /// Separator emitted by [`Display`](core::fmt::Display) and accepted by
    /// [`FromStr`].
    pub const DECIMAL_SEPARATOR: char = '.';

    /// Initial process-wide default multiplication precision policy.
    pub const DEFAULT_MULT_PRECISION_POLICY: PrecisionPolicy =
        PrecisionPolicy::MaxOperandPlus2;

    /// Initial process-wide default division precision policy.
    pub const DEFAULT_DIV_PRECISION_POLICY: PrecisionPolicy =
        PrecisionPolicy::MaxOperandPlus2;

    /// Initial process-wide default rounding mode.
    pub const DEFAULT_ROUNDING_MODE: RoundingMode =
        RoundingMode::ToNearestHalfToEven;
}

// ============================================================================
// Process-Wide Defaults
// ============================================================================

static DEFAULT_MULT_POLICY: AtomicU8 =
    AtomicU8::new(Number::DEFAULT_MULT_PRECISION_POLICY as u8);

static DEFAULT_DIV_POLICY: AtomicU8 =
    AtomicU8::new(Number::DEFAULT_DIV_PRECISION_POLICY as u8);

static DEFAULT_ROUNDING_MODE: AtomicU8 =
    AtomicU8::new(Number::DEFAULT_ROUNDING_MODE as u8);

impl Number {
    /// Replaces the process-wide default multiplication precision policy.
    /// Every subsequently constructed `Number` snapshots it; existing
    /// instances are unaffected.
    pub fn set_default_mult_precision_policy(policy: PrecisionPolicy) {
        DEFAULT_MULT_POLICY.store(policy as u8, AtomicOrdering::Relaxed);
    }

    /// Replaces the process-wide default division precision policy.
    pub fn set_default_div_precision_policy(policy: PrecisionPolicy) {
        DEFAULT_DIV_POLICY.store(policy as u8, AtomicOrdering::Relaxed);
    }

    /// Replaces the process-wide default rounding mode.
    pub fn set_default_rounding_mode(mode: RoundingMode) {
        DEFAULT_ROUNDING_MODE.store(mode as u8, AtomicOrdering::Relaxed);
    }

    fn default_mult_policy() -> PrecisionPolicy {
        PrecisionPolicy::from_u8(DEFAULT_MULT_POLICY.load(AtomicOrdering::Relaxed))
    }

    fn default_div_policy() -> PrecisionPolicy {
        PrecisionPolicy::from_u8(DEFAULT_DIV_POLICY.load(AtomicOrdering::Relaxed))
    }

    fn default_rounding_mode() -> RoundingMode {
        RoundingMode::from_u8(DEFAULT_ROUNDING_MODE.load(AtomicOrdering::Relaxed))
    }
}

// ============================================================================
// Construction
// ============================================================================

impl Number {
    /// Builds a number from its integer magnitude, fractional part,
    /// decimal-place count and sign.
    ///
    /// A negative `integer` forces the sign negative regardless of `sign`.
    /// A non-zero `fractional` needs a non-zero `decimal_places` to be
    /// representable.
    ///
    /// ```
    /// use findec::{Number, Sign};
    ///
    /// let n = Number::from_parts(123, 45, 2, Sign::Positive).unwrap();
    /// assert_eq!(n.to_string(), "123.45");
    ///
    /// // The sign flag covers values whose integer part is zero.
    /// let n = Number::from_parts(0, 51, 2, Sign::Negative).unwrap();
    /// assert_eq!(n.to_string(), "-0.51");
    /// ```
    ///
    /// # Errors
    ///
    /// [`DecimalError::BadValue`] when `decimal_places` exceeds
    /// [`Number::MAX_DECIMAL_PLACES`] or `fractional` does not fit in
    /// `decimal_places` digits. [`Number::validate`] checks the same
    /// conditions without constructing.
    pub fn from_parts(
        integer: i64,
        fractional: u64,
        decimal_places: u32,
        sign: Sign,
    ) -> crate::Result<Number> {
        if !Self::validate(integer, fractional, decimal_places, sign) {
            return Err(DecimalError::BadValue);
        }

        let (magnitude, sign) = if integer < 0 {
            (integer.unsigned_abs(), Sign::Negative)
        } else {
            (integer as u64, sign)
        };

        Ok(Self::assemble(magnitude, fractional, decimal_places, sign))
    }

    /// Like [`Number::from_parts`] for an unsigned integer magnitude.
    ///
    /// # Errors
    ///
    /// [`DecimalError::BadValue`] additionally when `integer` exceeds
    /// [`Number::MAX_INTEGER_VALUE`].
    pub fn from_parts_unsigned(
        integer: u64,
        fractional: u64,
        decimal_places: u32,
        sign: Sign,
    ) -> crate::Result<Number> {
        if !Self::validate_unsigned(integer, fractional, decimal_places, sign) {
            return Err(DecimalError::BadValue);
        }

        Ok(Self::assemble(integer, fractional, decimal_places, sign))
    }

    /// Returns `true` iff [`Number::from_parts`] would accept these inputs.
    ///
    /// Meant for vetting externally sourced values (user input, wire
    /// messages) before construction.
    pub fn validate(
        integer: i64,
        fractional: u64,
        decimal_places: u32,
        _sign: Sign,
    ) -> bool {
        // The negative bound is one wider than the positive one: the
        // i64::MIN magnitude lands in the 128-bit backing.
        let integer_ok = if integer < 0 {
            integer.unsigned_abs() <= Self::MAX_INTEGER_VALUE + 1
        } else {
            integer as u64 <= Self::MAX_INTEGER_VALUE
        };

        integer_ok && Self::validate_fraction(fractional, decimal_places)
    }

    /// Returns `true` iff [`Number::from_parts_unsigned`] would accept
    /// these inputs.
    pub fn validate_unsigned(
        integer: u64,
        fractional: u64,
        decimal_places: u32,
        _sign: Sign,
    ) -> bool {
        integer <= Self::MAX_INTEGER_VALUE
            && Self::validate_fraction(fractional, decimal_places)
    }

    fn validate_fraction(fractional: u64, decimal_places: u32) -> bool {
        decimal_places <= Self::MAX_DECIMAL_PLACES
            && fractional < SHIFT_TABLE_64[decimal_places as usize].value as u64
    }

    /// Assembles the scaled backing value. Callers have validated the
    /// inputs; `integer` may be `2^63` (the `i64::MIN` magnitude), which the
    /// bit heuristic routes to the 128-bit representation.
    fn assemble(
        integer: u64,
        fractional: u64,
        decimal_places: u32,
        sign: Sign,
    ) -> Number {
        let bits_sum = first_bit_set_u64(integer)
            + SHIFT_TABLE_64[decimal_places as usize].first_bit_set;

        let value = if bits_sum > MAX_I64_BIT_POS {
            let mut val = integer as i128
                * SHIFT_TABLE_64[decimal_places as usize].value as i128
                + fractional as i128;

            if sign == Sign::Negative {
                val = -val;
            }

            Value::V128(val)
        } else {
            let mut val = integer as i64
                * SHIFT_TABLE_64[decimal_places as usize].value
                + fractional as i64;

            if sign == Sign::Negative {
                val = -val;
            }

            Value::V64(val)
        };

        let mut number = Number {
            mult_policy: Self::default_mult_policy(),
            div_policy: Self::default_div_policy(),
            rounding_mode: Self::default_rounding_mode(),
            decimal_places: decimal_places as u8,
            value,
        };

        // The bit heuristic overestimates, the value may still fit 64 bits.
        number.auto_resize();

        number
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::from(0i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        let (magnitude, sign) = if value < 0 {
            (value.unsigned_abs(), Sign::Negative)
        } else {
            (value as u64, Sign::Positive)
        };

        Self::assemble(magnitude, 0, 0, sign)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self::from(value as i64)
    }
}

impl From<i16> for Number {
    fn from(value: i16) -> Self {
        Self::from(value as i64)
    }
}

impl From<i8> for Number {
    fn from(value: i8) -> Self {
        Self::from(value as i64)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Self::assemble(value as u64, 0, 0, Sign::Positive)
    }
}

impl From<u16> for Number {
    fn from(value: u16) -> Self {
        Self::from(value as u32)
    }
}

impl From<u8> for Number {
    fn from(value: u8) -> Self {
        Self::from(value as u32)
    }
}

impl TryFrom<u64> for Number {
    type Error = DecimalError;

    fn try_from(value: u64) -> crate::Result<Self> {
        Self::from_parts_unsigned(value, 0, 0, Sign::Positive)
    }
}

// ============================================================================
// Floating-Point Construction
// ============================================================================

impl Number {
    // 2^63 as f64; any integer part at or above this is out of range.
    const MAX_INTEGER_BOUND_F64: f64 = 9_223_372_036_854_775_808.0;

    /// Builds a number from an `f64`, keeping only the decimal places needed
    /// to represent it (trailing zero decimals are stripped).
    ///
    /// Prefer the integer or string constructors when exactness matters;
    /// the binary fraction of a float rarely is the decimal one.
    ///
    /// # Errors
    ///
    /// [`DecimalError::BadValue`] for NaN, infinities, or an integer part
    /// at or beyond `2^63`.
    pub fn from_f64(value: f64) -> crate::Result<Number> {
        Self::from_f64_with(
            value,
            Self::MAX_DECIMAL_PLACES + 1,
            Self::default_rounding_mode(),
        )
    }

    /// Builds a number from an `f64` with explicit decimal places and
    /// rounding mode.
    ///
    /// The value is captured at full [`Number::MAX_DECIMAL_PLACES`]
    /// precision and then adjusted to `decimal_places` using `mode`.
    /// Passing a `decimal_places` above the maximum means "use the fewest
    /// decimal places that represent the value exactly".
    ///
    /// # Errors
    ///
    /// [`DecimalError::BadValue`] for NaN, infinities, or an integer part
    /// at or beyond `2^63`.
    pub fn from_f64_with(
        value: f64,
        decimal_places: u32,
        mode: RoundingMode,
    ) -> crate::Result<Number> {
        if value.is_nan() || value.is_infinite() {
            return Err(DecimalError::BadValue);
        }

        let minimize = decimal_places > Self::MAX_DECIMAL_PLACES;

        // Clear the sign bit; f64::abs is not available without std.
        let magnitude = f64::from_bits(value.to_bits() & (u64::MAX >> 1));

        if magnitude >= Self::MAX_INTEGER_BOUND_F64 {
            return Err(DecimalError::BadValue);
        }

        let int_part = magnitude as u64;
        let fract = magnitude - int_part as f64;
        let fractional = (fract
            * SHIFT_TABLE_64[Self::MAX_DECIMAL_PLACES as usize].value as f64)
            as u64;

        let sign = if value < 0.0 { Sign::Negative } else { Sign::Positive };

        let mut number =
            Self::assemble(int_part, fractional, Self::MAX_DECIMAL_PLACES, sign);
        number.rounding_mode = mode;

        if minimize {
            number.make_compact(MAX_DIGITS_128);
        } else {
            number.set_decimal_places(decimal_places)?;
        }

        Ok(number)
    }

    /// `f32` version of [`Number::from_f64`].
    pub fn from_f32(value: f32) -> crate::Result<Number> {
        Self::from_f64(value as f64)
    }

    /// `f32` version of [`Number::from_f64_with`].
    pub fn from_f32_with(
        value: f32,
        decimal_places: u32,
        mode: RoundingMode,
    ) -> crate::Result<Number> {
        Self::from_f64_with(value as f64, decimal_places, mode)
    }

    /// Returns the value as an `f64`, computed as
    /// `integer + fractional / 10^decimal_places` with the sign applied
    /// last. Large values lose precision, as they must.
    pub fn to_f64(&self) -> f64 {
        let val = self.integer_value() as f64
            + self.fractional_value() as f64
                / SHIFT_TABLE_64[self.decimal_places as usize].value as f64;

        if self.is_negative() { -val } else { val }
    }

    /// Returns the value as an `f32`.
    pub fn to_f32(&self) -> f32 {
        self.to_f64() as f32
    }
}

impl TryFrom<f64> for Number {
    type Error = DecimalError;

    fn try_from(value: f64) -> crate::Result<Self> {
        Self::from_f64(value)
    }
}

impl TryFrom<f32> for Number {
    type Error = DecimalError;

    fn try_from(value: f32) -> crate::Result<Self> {
        Self::from_f32(value)
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl FromStr for Number {
    type Err = DecimalError;

    /// Parses the canonical decimal form: an optional single `+` or `-`, one
    /// or more integer digits, then optionally `.` followed by one to
    /// fourteen fraction digits. No whitespace, no exponent, no thousands
    /// separators.
    fn from_str(s: &str) -> crate::Result<Self> {
        let bytes = s.as_bytes();

        if bytes.is_empty() {
            return Err(DecimalError::BadValue);
        }

        let (negative, mut pos) = match bytes[0] {
            b'-' => (true, 1),
            b'+' => (false, 1),
            _ => (false, 0),
        };

        let int_start = pos;
        let mut integer: u64 = 0;

        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            integer = integer
                .checked_mul(10)
                .and_then(|v| v.checked_add((bytes[pos] - b'0') as u64))
                .ok_or(DecimalError::BadValue)?;
            pos += 1;
        }

        if pos == int_start || integer > Self::MAX_INTEGER_VALUE {
            return Err(DecimalError::BadValue);
        }

        let mut fractional: u64 = 0;
        let mut decimal_places: u32 = 0;

        if pos < bytes.len() && bytes[pos] == b'.' {
            pos += 1;
            let frac_start = pos;

            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                if decimal_places == Self::MAX_DECIMAL_PLACES {
                    return Err(DecimalError::BadValue);
                }
                fractional = fractional * 10 + (bytes[pos] - b'0') as u64;
                decimal_places += 1;
                pos += 1;
            }

            if pos == frac_start {
                return Err(DecimalError::BadValue);
            }
        }

        if pos != bytes.len() {
            return Err(DecimalError::BadValue);
        }

        let sign = if negative { Sign::Negative } else { Sign::Positive };

        Ok(Self::assemble(integer, fractional, decimal_places, sign))
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl Number {
    /// The magnitude of the integer portion. Unsigned so that the absolute
    /// value of the minimum representable number still fits; query
    /// [`Number::is_negative`] for the sign.
    ///
    /// Returns 0 for `-0.51`, 1 for `-1.51`, 2 for `2.51`.
    #[inline]
    pub fn integer_value(&self) -> u64 {
        match self.value {
            Value::V64(val) => {
                (val / SHIFT_TABLE_64[self.decimal_places as usize].value)
                    .unsigned_abs()
            }
            Value::V128(val) => {
                (val / SHIFT_TABLE_128[self.decimal_places as usize].value)
                    .unsigned_abs() as u64
            }
        }
    }

    /// The fractional portion as an unsigned integer.
    ///
    /// Returns 51 for `-0.51`, 0 for `10.0` and for `10`.
    #[inline]
    pub fn fractional_value(&self) -> u64 {
        match self.value {
            Value::V64(val) => {
                (val % SHIFT_TABLE_64[self.decimal_places as usize].value)
                    .unsigned_abs()
            }
            Value::V128(val) => {
                (val % SHIFT_TABLE_128[self.decimal_places as usize].value)
                    .unsigned_abs() as u64
            }
        }
    }

    /// The number of decimal places currently in use.
    ///
    /// Returns 0 for `10`, 1 for `10.0`, 2 for `10.21`.
    #[inline]
    pub fn decimal_places(&self) -> u32 {
        self.decimal_places as u32
    }

    /// `true` if the value is strictly negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        match self.value {
            Value::V64(val) => val < 0,
            Value::V128(val) => val < 0,
        }
    }

    /// `true` if the value is strictly positive; zero is not positive.
    #[inline]
    pub fn is_positive(&self) -> bool {
        match self.value {
            Value::V64(val) => val > 0,
            Value::V128(val) => val > 0,
        }
    }

    /// `true` if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        match self.value {
            Value::V64(val) => val == 0,
            Value::V128(val) => val == 0,
        }
    }

    /// `true` while the value is held in the fast 64-bit backing rather
    /// than the emulated 128-bit one. Diagnostic only; the backing width is
    /// not part of the numeric contract.
    #[inline]
    pub fn is_64bit(&self) -> bool {
        matches!(self.value, Value::V64(_))
    }

    /// The multiplication precision policy of this instance.
    pub fn mult_precision_policy(&self) -> PrecisionPolicy {
        self.mult_policy
    }

    /// The division precision policy of this instance.
    pub fn div_precision_policy(&self) -> PrecisionPolicy {
        self.div_policy
    }

    /// The rounding mode of this instance.
    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding_mode
    }

    /// Sets the multiplication precision policy of this instance.
    pub fn set_mult_precision_policy(&mut self, policy: PrecisionPolicy) {
        self.mult_policy = policy;
    }

    /// Sets the division precision policy of this instance.
    pub fn set_div_precision_policy(&mut self, policy: PrecisionPolicy) {
        self.div_policy = policy;
    }

    /// Sets the rounding mode of this instance.
    pub fn set_rounding_mode(&mut self, mode: RoundingMode) {
        self.rounding_mode = mode;
    }
}

// ============================================================================
// Backing-Width Transitions
// ============================================================================

impl Number {
    #[inline]
    fn as_i128(&self) -> i128 {
        match self.value {
            Value::V64(val) => val as i128,
            Value::V128(val) => val,
        }
    }

    #[inline]
    fn upsize(&mut self) {
        if let Value::V64(val) = self.value {
            self.value = Value::V128(val as i128);
        }
    }

    /// Moves back to the 64-bit backing when the value fits, and keeps
    /// `-2^63` pinned in the 128-bit backing (its 64-bit form has no
    /// positive counterpart, which would break `abs`).
    fn auto_resize(&mut self) {
        match self.value {
            Value::V64(val) => {
                if val == i64::MIN {
                    self.value = Value::V128(val as i128);
                }
            }
            Value::V128(val) => {
                if first_bit_set_i128(val) <= MAX_I64_BIT_POS {
                    self.value = Value::V64(val as i64);
                }
            }
        }
    }
}

// ============================================================================
// Decimal-Place Adjustment and Compaction
// ============================================================================

impl Number {
    /// Changes the number of decimal places in use. Reducing them rounds
    /// the last kept digit with the instance's rounding mode.
    ///
    /// ```
    /// use findec::Number;
    ///
    /// let mut n: Number = "2.349".parse().unwrap();
    /// n.set_decimal_places(1).unwrap();
    /// assert_eq!(n.to_string(), "2.3");
    ///
    /// n.set_decimal_places(4).unwrap();
    /// assert_eq!(n.to_string(), "2.3000");
    /// ```
    ///
    /// # Errors
    ///
    /// [`DecimalError::BadValue`] when `target` exceeds
    /// [`Number::MAX_DECIMAL_PLACES`].
    pub fn set_decimal_places(&mut self, target: u32) -> crate::Result<()> {
        // The multiplication and division paths park results at a
        // decimal-place count beyond the public maximum before calling
        // here, so the current count must not index the 64-bit table
        // unchecked.
        if target == self.decimal_places() {
            return Ok(());
        }

        if target > Self::MAX_DECIMAL_PLACES {
            return Err(DecimalError::BadValue);
        }

        if target > self.decimal_places() {
            match self.value {
                Value::V64(val) => self.increase_decimal_places_64(val, target),
                Value::V128(val) => self.increase_decimal_places_128(val, target),
            }
        } else {
            match self.value {
                Value::V64(val) => self.decrease_decimal_places_64(val, target),
                Value::V128(val) => self.decrease_decimal_places_128(val, target),
            }
        }

        self.decimal_places = target as u8;
        self.auto_resize();

        Ok(())
    }

    fn increase_decimal_places_64(&mut self, val: i64, target: u32) {
        let diff = (target - self.decimal_places()) as usize;

        if first_bit_set_i64(val) + SHIFT_TABLE_64[diff].first_bit_set
            > MAX_I64_BIT_POS
        {
            self.increase_decimal_places_128(val as i128, target);
        } else {
            self.value = Value::V64(val * SHIFT_TABLE_64[diff].value);
        }
    }

    fn increase_decimal_places_128(&mut self, val: i128, target: u32) {
        let diff = (target - self.decimal_places()) as usize;

        // No overflow possible: the target is within MAX_DECIMAL_PLACES and
        // every valid value keeps three bits of 128-bit headroom.
        self.value = Value::V128(val * SHIFT_TABLE_128[diff].value);
    }

    fn decrease_decimal_places_64(&mut self, val: i64, target: u32) {
        // Multiplication can leave more decimal places behind than the
        // 64-bit table spans.
        if self.decimal_places() - target > MAX_DIGITS_64 {
            return self.decrease_decimal_places_128(val as i128, target);
        }

        let sval = &SHIFT_TABLE_64[(self.decimal_places() - target) as usize];

        self.value = Value::V64(round64(
            self.rounding_mode,
            val / sval.value,
            (val % sval.value).unsigned_abs() as i64,
            sval.half_range,
            val < 0,
        ));
    }

    fn decrease_decimal_places_128(&mut self, orig: i128, target: u32) {
        let orig_decimal_places = self.decimal_places();

        let sval = &SHIFT_TABLE_128[(orig_decimal_places - target) as usize];

        let rounded = round128(
            self.rounding_mode,
            orig / sval.value,
            (orig % sval.value).unsigned_abs() as i128,
            sval.half_range,
            orig < 0,
        );

        self.value = Value::V128(rounded);

        // Rounding may nudge a value whose integer portion sat exactly at
        // the maximum one ulp over it. Pull that single case back toward
        // zero instead of failing; the 64-bit path cannot reach it.
        if Self::overflow_check_value(rounded, target) {
            let orig_int_abs = (orig
                / SHIFT_TABLE_128[orig_decimal_places as usize].value)
                .unsigned_abs();

            if orig_int_abs == Self::MAX_INTEGER_VALUE as u128 {
                self.value =
                    Value::V128(rounded + if orig < 0 { 1 } else { -1 });
            }
        }
    }

    /// Strips up to `max_dp_reduce` trailing fractional zeros, lowering the
    /// decimal-place count without changing the value. Returns the count
    /// removed.
    fn make_compact(&mut self, max_dp_reduce: u32) -> u32 {
        let limit = self.decimal_places().min(max_dp_reduce);

        let squeezed = match &mut self.value {
            Value::V64(val) if *val != 0 => Self::squeeze_zeros64(val, limit),
            Value::V128(val) if *val != 0 => Self::squeeze_zeros128(val, limit),
            // A zero value has nothing but removable decimal places.
            _ => limit,
        };

        self.decimal_places -= squeezed as u8;
        self.auto_resize();

        squeezed
    }

    /// Removes up to `max_squeeze` trailing decimal zeros from `val` in
    /// place, returning how many were removed.
    pub fn squeeze_zeros64(val: &mut i64, max_squeeze: u32) -> u32 {
        let mut wide = *val as i128;
        let squeezed = Self::squeeze_zeros128(&mut wide, max_squeeze);
        *val = wide as i64;

        squeezed
    }

    /// Removes up to `max_squeeze` trailing decimal zeros from `val` in
    /// place, returning how many were removed.
    ///
    /// ```
    /// use findec::Number;
    ///
    /// let mut val = 123000i128;
    /// assert_eq!(Number::squeeze_zeros128(&mut val, 2), 2);
    /// assert_eq!(val, 1230);
    /// ```
    pub fn squeeze_zeros128(val: &mut i128, max_squeeze: u32) -> u32 {
        if *val == 0 {
            return 0;
        }

        let mut max_squeeze = max_squeeze;
        let mut idx = 0usize;
        let mut squeezed = 0u32;

        loop {
            let next = &SHIFT_TABLE_64[idx + 1];

            if next.decimal_places > max_squeeze
                || *val % next.value as i128 != 0
            {
                break;
            }

            idx += 1;

            // Chunk out fourteen zeros at a time so the scan index stays
            // small no matter how many zeros a 128-bit value carries.
            if idx == Self::MAX_DECIMAL_PLACES as usize {
                *val /= SHIFT_TABLE_128[Self::MAX_DECIMAL_PLACES as usize].value;
                squeezed += Self::MAX_DECIMAL_PLACES;
                max_squeeze -= Self::MAX_DECIMAL_PLACES;
                idx = 0;
            }
        }

        if idx > 0 {
            *val /= SHIFT_TABLE_64[idx].value as i128;
            squeezed += idx as u32;
        }

        squeezed
    }
}

// ============================================================================
// Integer-Range Overflow Check
// ============================================================================

impl Number {
    /// `true` when the integer portion has escaped `+-MAX_INTEGER_VALUE`.
    /// A value in the 64-bit backing never can (auto-resize keeps `-2^63`
    /// out of it), so only the 128-bit backing is inspected, against the
    /// precomputed per-decimal-place thresholds.
    fn integer_overflow_check(&self) -> bool {
        match self.value {
            Value::V64(_) => false,
            Value::V128(val) => {
                Self::overflow_check_value(val, self.decimal_places())
            }
        }
    }

    fn overflow_check_value(value: i128, decimal_places: u32) -> bool {
        let sval = &SHIFT_TABLE_128[decimal_places as usize];

        if value < 0 {
            value < sval.overflow_check_neg
        } else {
            value > sval.overflow_check_pos
        }
    }
}

// ============================================================================
// Addition and Subtraction
// ============================================================================

impl Number {
    fn add_sub(
        &mut self,
        rhs: &Number,
        op64: fn(i64, i64) -> Option<i64>,
        op128: fn(i128, i128) -> i128,
    ) -> crate::Result<()> {
        let mut rhs = *rhs;

        if self.decimal_places() > rhs.decimal_places() {
            rhs.set_decimal_places(self.decimal_places())?;
        } else if self.decimal_places() < rhs.decimal_places() {
            self.set_decimal_places(rhs.decimal_places())?;
        }

        match (self.value, rhs.value) {
            (Value::V64(a), Value::V64(b)) => match op64(a, b) {
                Some(result) => self.value = Value::V64(result),
                // 64-bit overflow; the 128-bit retry cannot overflow thanks
                // to the three-bit headroom of valid values.
                None => self.value = Value::V128(op128(a as i128, b as i128)),
            },
            _ => {
                self.value = Value::V128(op128(self.as_i128(), rhs.as_i128()));
            }
        }

        self.auto_resize();

        if self.integer_overflow_check() {
            return Err(DecimalError::Overflow);
        }

        Ok(())
    }

    /// `self + rhs`, failing with [`DecimalError::Overflow`] when the
    /// result's integer portion leaves the representable range.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn try_add(self, rhs: Number) -> crate::Result<Number> {
        let mut out = self;
        out.add_sub(&rhs, i64::checked_add, |a, b| a + b)?;

        Ok(out)
    }

    /// `self - rhs`, failing with [`DecimalError::Overflow`] when the
    /// result's integer portion leaves the representable range.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn try_sub(self, rhs: Number) -> crate::Result<Number> {
        let mut out = self;
        out.add_sub(&rhs, i64::checked_sub, |a, b| a - b)?;

        Ok(out)
    }

    /// [`Number::try_add`] flattened to an `Option`.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn checked_add(self, rhs: Number) -> Option<Number> {
        self.try_add(rhs).ok()
    }

    /// [`Number::try_sub`] flattened to an `Option`.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn checked_sub(self, rhs: Number) -> Option<Number> {
        self.try_sub(rhs).ok()
    }
}

// ============================================================================
// Multiplication
// ============================================================================

impl Number {
    fn mul_in_place(&mut self, rhs: &Number) -> crate::Result<()> {
        // Of the two operand policies, the one yielding more decimal places
        // wins; evaluating both keeps the choice symmetric.
        let target_decimal_places = product_decimal_places(
            self.decimal_places(),
            rhs.decimal_places(),
            Self::MAX_DECIMAL_PLACES,
            self.mult_policy,
        )
        .max(product_decimal_places(
            self.decimal_places(),
            rhs.decimal_places(),
            Self::MAX_DECIMAL_PLACES,
            rhs.mult_policy,
        ));

        let mut resulting_decimal_places = 0u32;

        match (self.value, rhs.value) {
            (Value::V64(_), Value::V64(_)) => {
                self.mult64(rhs, &mut resulting_decimal_places)?;
            }
            _ => {
                self.mult128(*rhs, &mut resulting_decimal_places)?;
            }
        }

        // The product's true decimal places may exceed the public maximum
        // until the adjustment below; set_decimal_places handles that
        // transient state.
        self.decimal_places = resulting_decimal_places as u8;

        // Only ever adjust downward here. If factor precision had to be
        // dropped, synthesizing it back would claim precision the result
        // does not have (and would sidestep the overflow check).
        if target_decimal_places < resulting_decimal_places {
            self.set_decimal_places(target_decimal_places)?;
        }

        self.auto_resize();

        if self.integer_overflow_check() {
            return Err(DecimalError::Overflow);
        }

        Ok(())
    }

    fn mult64(
        &mut self,
        rhs: &Number,
        resulting_decimal_places: &mut u32,
    ) -> crate::Result<()> {
        let (Value::V64(a), Value::V64(b)) = (self.value, rhs.value) else {
            return self.mult128(*rhs, resulting_decimal_places);
        };

        if first_bit_set_i64(a) + first_bit_set_i64(b) > MAX_I64_BIT_POS {
            return self.mult128(*rhs, resulting_decimal_places);
        }

        self.value = Value::V64(a * b);
        *resulting_decimal_places = self.decimal_places() + rhs.decimal_places();

        Ok(())
    }

    fn mult128(
        &mut self,
        mut rhs: Number,
        resulting_decimal_places: &mut u32,
    ) -> crate::Result<()> {
        self.upsize();
        rhs.upsize();

        let required_bits =
            first_bit_set_i128(self.as_i128()) + first_bit_set_i128(rhs.as_i128());

        if required_bits > MAX_I128_BIT_POS {
            self.mult_reduce_precision(required_bits - MAX_I128_BIT_POS, &mut rhs)?;
        }

        self.value = Value::V128(self.as_i128() * rhs.as_i128());
        *resulting_decimal_places = self.decimal_places() + rhs.decimal_places();

        Ok(())
    }

    /// Lowers the factors' decimal places until their product fits the
    /// 128-bit backing. Trailing zeros are reclaimed first; then the factor
    /// with the larger integer-digit count is penalized (its low fractional
    /// digits matter least to the product); any rest is split evenly, with
    /// an odd leftover going to the factor with more decimal places and,
    /// on a tie, to the one with the larger magnitude so that the operation
    /// stays commutative.
    fn mult_reduce_precision(
        &mut self,
        excess_bits: u32,
        rhs: &mut Number,
    ) -> crate::Result<()> {
        let mut dp_excess = SHIFT_TABLE_128
            .iter()
            .find(|sv| excess_bits <= sv.first_bit_set)
            .ok_or(DecimalError::BadValue)?
            .decimal_places;

        // More decimal places needed than the factors carry: the product
        // cannot be represented.
        if dp_excess > self.decimal_places() + rhs.decimal_places() {
            return Err(DecimalError::Overflow);
        }

        let n1_integer_digits =
            integer_digits_of_precision_128(self.as_i128(), self.decimal_places());
        let n2_integer_digits =
            integer_digits_of_precision_128(rhs.as_i128(), rhs.decimal_places());

        dp_excess -= self.make_compact(dp_excess);
        dp_excess -= rhs.make_compact(dp_excess);

        let mut n1_dp = self.decimal_places();
        let mut n2_dp = rhs.decimal_places();

        if n1_integer_digits > n2_integer_digits {
            let saved = (n1_integer_digits - n2_integer_digits).min(dp_excess);

            if saved > n1_dp {
                return Err(DecimalError::Overflow);
            }

            n1_dp -= saved;
            dp_excess -= saved;
        } else if n2_integer_digits > n1_integer_digits {
            let saved = (n2_integer_digits - n1_integer_digits).min(dp_excess);

            if saved > n2_dp {
                return Err(DecimalError::Overflow);
            }

            n2_dp -= saved;
            dp_excess -= saved;
        }

        if dp_excess > 0 {
            // The magnitudes now match; take the rest from both sides
            // equally.
            let half = dp_excess / 2;

            if half > n1_dp || half > n2_dp {
                return Err(DecimalError::Overflow);
            }

            n1_dp -= half;
            n2_dp -= half;

            if dp_excess & 1 == 1 {
                if n1_dp > n2_dp {
                    n1_dp -= 1;
                } else if n2_dp > n1_dp {
                    n2_dp -= 1;
                } else if n1_dp == 0 {
                    return Err(DecimalError::Overflow);
                } else if self.abs() > rhs.abs() {
                    n1_dp -= 1;
                } else {
                    n2_dp -= 1;
                }
            }
        }

        self.set_decimal_places(n1_dp)?;
        rhs.set_decimal_places(n2_dp)?;

        // The reductions may have auto-resized a factor down to 64 bits.
        self.upsize();
        rhs.upsize();

        Ok(())
    }

    /// `self * rhs` under the operands' precision policies.
    ///
    /// # Errors
    ///
    /// [`DecimalError::Overflow`] when the product's integer portion leaves
    /// the representable range or the factors' precision cannot be reduced
    /// enough to form it.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn try_mul(self, rhs: Number) -> crate::Result<Number> {
        let mut out = self;
        out.mul_in_place(&rhs)?;

        Ok(out)
    }

    /// [`Number::try_mul`] flattened to an `Option`.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn checked_mul(self, rhs: Number) -> Option<Number> {
        self.try_mul(rhs).ok()
    }
}

// ============================================================================
// Division
// ============================================================================

impl Number {
    fn div_in_place(&mut self, rhs: &Number) -> crate::Result<()> {
        if rhs.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }

        let mut quotient_decimal_places = quotient_decimal_places(
            self.decimal_places(),
            rhs.decimal_places(),
            Self::MAX_DECIMAL_PLACES,
            self.div_policy,
        )
        .max(quotient_decimal_places(
            self.decimal_places(),
            rhs.decimal_places(),
            Self::MAX_DECIMAL_PLACES,
            rhs.div_policy,
        ));

        let mut required_dividend_shift = quotient_decimal_places;

        // Shift beyond what the target precision asks for; the surplus digit
        // feeds the final rounding.
        let mut excess_dividend_shift = 0u32;

        if self.decimal_places() < rhs.decimal_places() {
            required_dividend_shift +=
                rhs.decimal_places() - self.decimal_places();
        } else if self.decimal_places() > rhs.decimal_places() {
            let dp_shift = self.decimal_places() - rhs.decimal_places();

            if required_dividend_shift >= dp_shift {
                required_dividend_shift -= dp_shift;
            } else {
                excess_dividend_shift = dp_shift - required_dividend_shift;
                required_dividend_shift = 0;
            }
        }

        if excess_dividend_shift < Self::DIVISION_EXTRA_DP_FOR_ROUNDING {
            let delta =
                Self::DIVISION_EXTRA_DP_FOR_ROUNDING - excess_dividend_shift;

            excess_dividend_shift += delta;
            required_dividend_shift += delta;
        }

        match (self.value, rhs.value) {
            (Value::V64(_), Value::V64(_)) => self.div64(
                rhs,
                &mut quotient_decimal_places,
                &mut required_dividend_shift,
                &mut excess_dividend_shift,
            )?,
            _ => self.div128(
                *rhs,
                &mut quotient_decimal_places,
                &mut required_dividend_shift,
                &mut excess_dividend_shift,
            )?,
        }

        self.decimal_places =
            (quotient_decimal_places + excess_dividend_shift) as u8;

        self.set_decimal_places(quotient_decimal_places)?;

        self.auto_resize();

        if self.integer_overflow_check() {
            return Err(DecimalError::Overflow);
        }

        Ok(())
    }

    fn div64(
        &mut self,
        rhs: &Number,
        quotient_decimal_places: &mut u32,
        required_dividend_shift: &mut u32,
        excess_dividend_shift: &mut u32,
    ) -> crate::Result<()> {
        let (Value::V64(a), Value::V64(b)) = (self.value, rhs.value) else {
            return self.div128(
                *rhs,
                quotient_decimal_places,
                required_dividend_shift,
                excess_dividend_shift,
            );
        };

        let shift = *required_dividend_shift;
        let shift_room = MAX_I64_BIT_POS - first_bit_set_i64(a);

        let need_128 = shift > MAX_DIGITS_64
            || shift_room < SHIFT_TABLE_64[shift as usize].first_bit_set;

        if need_128 {
            return self.div128(
                *rhs,
                quotient_decimal_places,
                required_dividend_shift,
                excess_dividend_shift,
            );
        }

        self.value = Value::V64(a * SHIFT_TABLE_64[shift as usize].value / b);

        Ok(())
    }

    fn div128(
        &mut self,
        mut rhs: Number,
        quotient_decimal_places: &mut u32,
        required_dividend_shift: &mut u32,
        excess_dividend_shift: &mut u32,
    ) -> crate::Result<()> {
        self.upsize();
        rhs.upsize();

        let shift_room = MAX_I128_BIT_POS - first_bit_set_i128(self.as_i128());

        if shift_room
            >= SHIFT_TABLE_128[*required_dividend_shift as usize].first_bit_set
        {
            self.value = Value::V128(
                self.as_i128()
                    * SHIFT_TABLE_128[*required_dividend_shift as usize].value
                    / rhs.as_i128(),
            );

            return Ok(());
        }

        // The full shift does not fit. Shift the dividend as far left as the
        // width allows, then work down what remains.
        let sval = SHIFT_TABLE_128
            .iter()
            .find(|sv| shift_room < sv.first_bit_set)
            .ok_or(DecimalError::BadValue)?;

        // The entry just below the found one is the largest shift that fits.
        if sval.decimal_places > 0 {
            self.value = Value::V128(
                self.as_i128()
                    * SHIFT_TABLE_128[(sval.decimal_places - 1) as usize].value,
            );
            *required_dividend_shift -= sval.decimal_places - 1;
        }

        // A compact divisor needs less dividend shift for the same quotient.
        let mut divisor = rhs.as_i128();
        let squeezed = Self::squeeze_zeros128(&mut divisor, MAX_DIGITS_128);

        *excess_dividend_shift += squeezed;

        // Dividing by one is exact; no rounding digit needed.
        let round_places = if divisor.unsigned_abs() == 1 {
            0
        } else {
            Self::DIVISION_EXTRA_DP_FOR_ROUNDING
        };

        if *excess_dividend_shift > round_places {
            let space = (*required_dividend_shift)
                .min(*excess_dividend_shift - round_places);

            *excess_dividend_shift -= space;
            *required_dividend_shift -= space;

            if *required_dividend_shift == 0 {
                self.value = Value::V128(self.as_i128() / divisor);
                return Ok(());
            }
        }

        // Still short on shift: give up the rounding digit.
        let delta = (*required_dividend_shift).min(*excess_dividend_shift);

        *required_dividend_shift -= delta;
        *excess_dividend_shift -= delta;

        if *required_dividend_shift == 0 {
            self.value = Value::V128(self.as_i128() / divisor);
            return Ok(());
        }

        // Last resort: surrender quotient decimal places. Trimming the
        // divisor instead would skew large-by-small quotients dramatically;
        // a client who wants that trade-off can reduce the divisor's
        // precision explicitly.
        let delta = (*quotient_decimal_places).min(*required_dividend_shift);

        *quotient_decimal_places -= delta;
        *required_dividend_shift -= delta;

        if *required_dividend_shift == 0 {
            self.value = Value::V128(self.as_i128() / divisor);
            return Ok(());
        }

        Err(DecimalError::Overflow)
    }

    /// `self / rhs` under the operands' precision policies.
    ///
    /// # Errors
    ///
    /// [`DecimalError::DivisionByZero`] for a zero divisor;
    /// [`DecimalError::Overflow`] when the quotient cannot be represented
    /// even after shedding all of its decimal places.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn try_div(self, rhs: Number) -> crate::Result<Number> {
        let mut out = self;
        out.div_in_place(&rhs)?;

        Ok(out)
    }

    /// [`Number::try_div`] flattened to an `Option`.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn checked_div(self, rhs: Number) -> Option<Number> {
        self.try_div(rhs).ok()
    }
}

// ============================================================================
// Remainder
// ============================================================================

impl Number {
    fn rem_in_place(&mut self, rhs: &Number) -> crate::Result<()> {
        if rhs.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }

        if self.decimal_places() == rhs.decimal_places() {
            self.remainder_equal_decimal_places(rhs);
        } else {
            let aligned = self.decimal_places().max(rhs.decimal_places());

            if self.decimal_places() == aligned {
                let mut rhs = *rhs;
                rhs.set_decimal_places(aligned)?;
                self.remainder_equal_decimal_places(&rhs);
            } else {
                self.set_decimal_places(aligned)?;
                self.remainder_equal_decimal_places(rhs);
            }
        }

        Ok(())
    }

    fn remainder_equal_decimal_places(&mut self, rhs: &Number) {
        match (self.value, rhs.value) {
            (Value::V64(a), Value::V64(b)) => {
                self.value = Value::V64(a % b);
            }
            _ => {
                self.value = Value::V128(self.as_i128() % rhs.as_i128());
                self.auto_resize();
            }
        }
    }

    /// The remainder of `self / rhs`: `self - n * rhs` with `n` the
    /// towards-zero integer quotient, so the result carries the sign of
    /// `self`.
    ///
    /// # Errors
    ///
    /// [`DecimalError::DivisionByZero`] for a zero divisor.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn try_rem(self, rhs: Number) -> crate::Result<Number> {
        let mut out = self;
        out.rem_in_place(&rhs)?;

        Ok(out)
    }

    /// [`Number::try_rem`] flattened to an `Option`.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn checked_rem(self, rhs: Number) -> Option<Number> {
        self.try_rem(rhs).ok()
    }
}

// ============================================================================
// Mathematical Operations
// ============================================================================

impl Number {
    /// One, carrying `self`'s policies and rounding mode, so derived
    /// operations behave like operations on `self`.
    fn one_like(&self) -> Number {
        let mut one = Number::from(1i64);

        one.mult_policy = self.mult_policy;
        one.div_policy = self.div_policy;
        one.rounding_mode = self.rounding_mode;

        one
    }

    /// The multiplicative inverse `1 / self`, under `self`'s division
    /// precision policy.
    ///
    /// # Errors
    ///
    /// [`DecimalError::DivisionByZero`] when `self` is zero.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn try_recip(self) -> crate::Result<Number> {
        self.one_like().try_div(self)
    }

    /// Raises `self` to an integer power by repeated squaring; a negative
    /// exponent inverts the positive power. Each step applies the usual
    /// multiplication (or division) precision policy.
    ///
    /// # Errors
    ///
    /// [`DecimalError::Overflow`] when an intermediate product leaves the
    /// representable range, [`DecimalError::DivisionByZero`] for a negative
    /// power of zero.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn try_powi(self, exp: i32) -> crate::Result<Number> {
        if exp < 0 {
            let positive = self.try_powi_unsigned((exp as i64).unsigned_abs() as u32)?;
            return self.one_like().try_div(positive);
        }

        self.try_powi_unsigned(exp as u32)
    }

    fn try_powi_unsigned(self, mut exp: u32) -> crate::Result<Number> {
        let mut base = self;
        let mut result = self.one_like();

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.try_mul(base)?;
            }
            if exp > 1 {
                base = base.try_mul(base)?;
            }
            exp >>= 1;
        }

        Ok(result)
    }
}

// ============================================================================
// Sign Operations
// ============================================================================

impl Number {
    /// The absolute value. Never overflows: the one value without a 64-bit
    /// positive counterpart is kept in the 128-bit backing.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn abs(self) -> Number {
        let mut out = self;

        match out.value {
            Value::V64(val) => out.value = Value::V64(val.abs()),
            Value::V128(val) => out.value = Value::V128(val.abs()),
        }

        out
    }

    /// Flips the sign in place.
    pub fn negate(&mut self) {
        *self = -*self;
    }

    /// The sign of the value as -1, 0 or 1.
    #[inline]
    pub fn signum(&self) -> i32 {
        if self.is_positive() {
            1
        } else if self.is_negative() {
            -1
        } else {
            0
        }
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(mut self) -> Number {
        match self.value {
            Value::V64(val) => self.value = Value::V64(-val),
            Value::V128(val) => {
                self.value = Value::V128(-val);
                self.auto_resize();
            }
        }

        self
    }
}

// ============================================================================
// Operator Overloading
// ============================================================================

impl Add for Number {
    type Output = Number;

    fn add(self, rhs: Number) -> Number {
        self.try_add(rhs).expect("attempt to add with overflow")
    }
}

impl Sub for Number {
    type Output = Number;

    fn sub(self, rhs: Number) -> Number {
        self.try_sub(rhs).expect("attempt to subtract with overflow")
    }
}

impl Mul for Number {
    type Output = Number;

    fn mul(self, rhs: Number) -> Number {
        self.try_mul(rhs).expect("attempt to multiply with overflow")
    }
}

impl Div for Number {
    type Output = Number;

    fn div(self, rhs: Number) -> Number {
        self.try_div(rhs)
            .expect("attempt to divide by zero or overflow")
    }
}

impl Rem for Number {
    type Output = Number;

    fn rem(self, rhs: Number) -> Number {
        self.try_rem(rhs)
            .expect("attempt to calculate the remainder with a divisor of zero")
    }
}

impl AddAssign for Number {
    fn add_assign(&mut self, rhs: Number) {
        *self = *self + rhs;
    }
}

impl SubAssign for Number {
    fn sub_assign(&mut self, rhs: Number) {
        *self = *self - rhs;
    }
}

impl MulAssign for Number {
    fn mul_assign(&mut self, rhs: Number) {
        *self = *self * rhs;
    }
}

impl DivAssign for Number {
    fn div_assign(&mut self, rhs: Number) {
        *self = *self / rhs;
    }
}

impl RemAssign for Number {
    fn rem_assign(&mut self, rhs: Number) {
        *self = *self % rhs;
    }
}

// ============================================================================
// Relational Operators
// ============================================================================

impl Ord for Number {
    fn cmp(&self, other: &Number) -> Ordering {
        let own_dp = self.decimal_places();
        let other_dp = other.decimal_places();

        let mut a = self.as_i128();
        let mut b = other.as_i128();

        // Scale the lower-precision side up; every valid value keeps enough
        // 128-bit headroom for fourteen more decimal places.
        if own_dp > other_dp {
            b *= SHIFT_TABLE_128[(own_dp - other_dp) as usize].value;
        } else if other_dp > own_dp {
            a *= SHIFT_TABLE_128[(other_dp - own_dp) as usize].value;
        }

        a.cmp(&b)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Number) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Number) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equality ignores decimal-place scaling, so the hash must too:
        // hash the compacted value and the decimal places that remain.
        let mut val = self.as_i128();

        let decimal_places = if val == 0 {
            0
        } else {
            let squeezed = Self::squeeze_zeros128(&mut val, self.decimal_places());
            self.decimal_places() - squeezed
        };

        val.hash(state);
        decimal_places.hash(state);
    }
}

// ============================================================================
// Formatting
// ============================================================================

impl fmt::Display for Number {
    /// Sign, integer portion, and (iff decimal places are in use) the
    /// separator and the fractional portion zero-padded to exactly the
    /// decimal-place count. Never a leading `+`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }

        write!(f, "{}", self.integer_value())?;

        if self.decimal_places() > 0 {
            write!(
                f,
                "{}{:0width$}",
                Self::DECIMAL_SEPARATOR,
                self.fractional_value(),
                width = self.decimal_places() as usize
            )?;
        }

        Ok(())
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // {:#?} shows raw internals
            f.debug_struct("Number")
                .field("value", &self.value)
                .field("decimal_places", &self.decimal_places)
                .field("mult_policy", &self.mult_policy)
                .field("div_policy", &self.div_policy)
                .field("rounding_mode", &self.rounding_mode)
                .finish()
        } else {
            write!(f, "Number({})", self)
        }
    }
}

// ============================================================================
// Iterator Trait Implementations
// ============================================================================

impl Sum for Number {
    fn sum<I: Iterator<Item = Number>>(iter: I) -> Number {
        iter.fold(Number::default(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Number> for Number {
    fn sum<I: Iterator<Item = &'a Number>>(iter: I) -> Number {
        iter.fold(Number::default(), |acc, x| acc + *x)
    }
}

impl Product for Number {
    fn product<I: Iterator<Item = Number>>(iter: I) -> Number {
        iter.fold(Number::from(1i64), |acc, x| acc * x)
    }
}

impl<'a> Product<&'a Number> for Number {
    fn product<I: Iterator<Item = &'a Number>>(iter: I) -> Number {
        iter.fold(Number::from(1i64), |acc, x| acc * *x)
    }
}

// ============================================================================
// Serde Support
// ============================================================================

#[cfg(feature = "serde")]
impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // The canonical string is the one stable wire form; collect_str
        // avoids allocating it.
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Number {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumberVisitor;

        impl de::Visitor<'_> for NumberVisitor {
            type Value = Number;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal number string")
            }

            fn visit_str<E>(self, v: &str) -> core::result::Result<Number, E>
            where
                E: de::Error,
            {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(NumberVisitor)
    }
}

// ============================================================================
// Tests
// ============================================================================








#[cfg(test)]
mod multiplication_tests {
    use super::test_support::*;
    use super::*;
    use crate::PrecisionPolicy::*;

    type PolicyCases<'a> = &'a [(PrecisionPolicy, &'a str)];

    /// Runs all eight sign/order permutations for every policy row.
    fn check_mult(op1: &str, op2: &str, cases: PolicyCases<'_>) {
        for &(policy, expected) in cases {
            let neg1 = negate_str(op1);
            let neg2 = negate_str(op2);
            let neg_expected = negate_str(expected);

            let variants: [(&str, &str, &str); 4] = [
                (op1, op2, expected),
                (&neg1, op2, &neg_expected),
                (op1, &neg2, &neg_expected),
                (&neg1, &neg2, expected),
            ];

            for (a, b, want) in variants {
                let x = num_with_policy(a, policy);
                let y = num_with_policy(b, policy);
                let label = format!("{a} * {b} [{policy}]");

                assert_same(x.try_mul(y).unwrap(), want, &label);
                assert_same(y.try_mul(x).unwrap(), want, &format!("swap {label}"));

                let mut z = x;
                z *= y;
                assert_same(z, want, &format!("assign {label}"));
            }
        }
    }

    fn check_mult_overflow(op1: &str, op2: &str) {
        let neg1 = negate_str(op1);
        let x = num_with_policy(op1, MaxPrecision);
        let y = num_with_policy(op2, MaxPrecision);
        let nx = num_with_policy(&neg1, MaxPrecision);

        assert_eq!(x.try_mul(y), Err(DecimalError::Overflow), "{op1} * {op2}");
        assert_eq!(y.try_mul(x), Err(DecimalError::Overflow), "{op2} * {op1}");
        assert_eq!(nx.try_mul(y), Err(DecimalError::Overflow), "-{op1} * {op2}");
        assert_eq!(x.checked_mul(y), None);
    }

    #[test]
    fn test_zero_and_identity_factors() {
        check_mult("0", "0", &[(MaxPrecision, "0")]);
        check_mult("0", "1", &[(MaxPrecision, "0")]);
        check_mult("0.0", "1", &[(MaxPrecision, "0.0")]);

        check_mult(
            "123456789012345678.12345678901234",
            "0",
            &[
                (MinOperand, "0"),
                (MinOperandPlus2, "0.00"),
                (MaxOperand, "0.00000000000000"),
                (MaxOperandPlus2, "0.00000000000000"),
                (MaxPrecision, "0.00000000000000"),
            ],
        );

        check_mult(
            "123456789012345678.12345678901234",
            "0.0",
            &[
                (MinOperand, "0.0"),
                (MinOperandPlus2, "0.000"),
                (MaxOperand, "0.00000000000000"),
                (MaxPrecision, "0.00000000000000"),
            ],
        );

        check_mult(
            "123456789012345678.12345678901234",
            "1",
            &[
                (MinOperand, "123456789012345678"),
                (MinOperandPlus2, "123456789012345678.12"),
                (MaxOperand, "123456789012345678.12345678901234"),
                (MaxOperandPlus2, "123456789012345678.12345678901234"),
                (MaxPrecision, "123456789012345678.12345678901234"),
            ],
        );

        check_mult(
            "123456789012345678.12345678901234",
            "1.0",
            &[
                (MinOperand, "123456789012345678.1"),
                (MinOperandPlus2, "123456789012345678.123"),
                (MaxOperand, "123456789012345678.12345678901234"),
                (MaxPrecision, "123456789012345678.12345678901234"),
            ],
        );
    }

    #[test]
    fn test_64_bit_factors() {
        check_mult(
            "12345.12345",
            "54321.54321",
            &[
                (MinOperand, "670606156.92196"),
                (MinOperandPlus2, "670606156.9219593"),
                (MaxOperand, "670606156.92196"),
                (MaxOperandPlus2, "670606156.9219593"),
                (MaxPrecision, "670606156.9219592745"),
            ],
        );
    }

    #[test]
    fn test_64_bit_factors_128_bit_product() {
        check_mult(
            "1234567.123456",
            "54321.98543210",
            &[
                (MinOperand, "67064137295.326434"),
                (MinOperandPlus2, "67064137295.32643421"),
                (MaxOperand, "67064137295.32643421"),
                (MaxOperandPlus2, "67064137295.3264342053"),
                (MaxPrecision, "67064137295.32643420533760"),
            ],
        );
    }

    #[test]
    fn test_mixed_width_factors() {
        check_mult(
            "67064137295.3264342053",
            "123.123",
            &[
                (MinOperand, "8257137776212.477"),
                (MinOperandPlus2, "8257137776212.47656"),
                (MaxOperand, "8257137776212.4765586592"),
                (MaxOperandPlus2, "8257137776212.476558659152"),
                (MaxPrecision, "8257137776212.4765586591519"),
            ],
        );
    }

    #[test]
    fn test_factor_precision_reduction() {
        // The first factor is several orders of magnitude larger, so it
        // gives up six decimal places and the second three; effectively
        // 123456789012.12345679 * 74709314.17104198834.
        check_mult(
            "123456789012.12345678901234",
            "74709314.17104198834225",
            &[
                (MinOperand, "9223372036854775806.79500247491567"),
                (MinOperandPlus2, "9223372036854775806.79500247491567"),
                (MaxOperand, "9223372036854775806.79500247491567"),
                (MaxOperandPlus2, "9223372036854775806.79500247491567"),
                (MaxPrecision, "9223372036854775806.79500247491567"),
            ],
        );
    }

    #[test]
    fn test_factor_precision_reduction_reclaims_zeros_first() {
        // Trailing zeros of the second factor cover part of the excess, so
        // the first factor only loses four decimal places.
        check_mult(
            "123456789012.12345678901234",
            "74709314.17104198800000",
            &[
                (MinOperand, "9223372036854775764.74498489662266"),
                (MaxOperand, "9223372036854775764.74498489662266"),
                (MaxPrecision, "9223372036854775764.74498489662266"),
            ],
        );

        // Enough zeros to absorb the whole excess: the result is exact.
        check_mult(
            "123456789012.12345678901234",
            "74709314.17104000000000",
            &[
                (MinOperand, "9223372036854530332.64935070812743"),
                (MaxOperand, "9223372036854530332.64935070812743"),
                (MaxPrecision, "9223372036854530332.64935070812743"),
            ],
        );

        check_mult(
            "123456789012.12345000000000",
            "74709314.17104000000000",
            &[
                (MinOperand, "9223372036854529825.44689488800000"),
                (MaxOperand, "9223372036854529825.44689488800000"),
                (MaxPrecision, "9223372036854529825.44689488800000"),
            ],
        );
    }

    #[test]
    fn test_equal_magnitude_tiebreak() {
        // Equal integer digit counts and equal decimal places: the larger
        // magnitude factor gives up the one excess decimal place.
        check_mult(
            "3037000499.1234567899",
            "3037000499.9876543211",
            &[
                (MinOperand, "9223372034300693999.3696769711"),
                (MinOperandPlus2, "9223372034300693999.369676971102"),
                (MaxOperand, "9223372034300693999.3696769711"),
                (MaxOperandPlus2, "9223372034300693999.369676971102"),
                (MaxPrecision, "9223372034300693999.36967697110152"),
            ],
        );
    }

    #[test]
    fn test_full_precision_fraction_product() {
        check_mult(
            "0.99999999999999",
            "0.99999999999999",
            &[
                (MinOperand, "0.99999999999998"),
                (MaxOperand, "0.99999999999998"),
                (MaxPrecision, "0.99999999999998"),
            ],
        );
    }

    #[test]
    fn test_product_at_the_range_edge() {
        check_mult(
            "922337203685477580.7",
            "10",
            &[
                (MinOperand, "9223372036854775807"),
                (MinOperandPlus2, "9223372036854775807.0"),
                (MaxOperand, "9223372036854775807.0"),
                (MaxOperandPlus2, "9223372036854775807.0"),
                (MaxPrecision, "9223372036854775807.0"),
            ],
        );
    }

    #[test]
    fn test_multiplication_overflow() {
        check_mult_overflow("922337203685477580.8", "10");
        check_mult_overflow("67064137295.3264342053", "12234902340980023.123");
        check_mult_overflow(
            "9223372036854775807.99999999999999",
            "9223372036854775807.99999999999999",
        );
    }

    #[test]
    fn test_differing_policies_use_the_more_precise_one() {
        let mut a = num("1.11");
        let mut b = num("2.2");

        a.set_mult_precision_policy(MinOperand);
        b.set_mult_precision_policy(MaxPrecision);

        // MaxPrecision yields 3 decimal places, MinOperand only 1.
        assert_same(a.try_mul(b).unwrap(), "2.442", "mixed policy");
        assert_same(b.try_mul(a).unwrap(), "2.442", "mixed policy swapped");
    }
}



#[cfg(test)]
mod set_decimal_places_tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_increase() {
        let mut n = num("1.5");
        n.set_decimal_places(4).unwrap();
        check_number("1.5 -> 4dp", n, "1.5000", 1, 5000, 4, false, true);

        let mut n = num("-1.5");
        n.set_decimal_places(4).unwrap();
        assert_eq!(n.to_string(), "-1.5000");
    }

    #[test]
    fn test_increase_upgrades_backing_width() {
        let mut n = num("922337203685477580.7");
        assert!(n.is_64bit());

        n.set_decimal_places(2).unwrap();
        check_number(
            "widened",
            n,
            "922337203685477580.70",
            922337203685477580,
            70,
            2,
            false,
            false,
        );
    }

    #[test]
    fn test_decrease_applies_instance_rounding_mode() {
        let cases: &[(RoundingMode, &str, &str)] = &[
            (RoundingMode::Down, "2.25", "2.2"),
            (RoundingMode::Down, "-2.25", "-2.3"),
            (RoundingMode::Up, "2.25", "2.3"),
            (RoundingMode::Up, "-2.25", "-2.2"),
            (RoundingMode::TowardsZero, "2.25", "2.2"),
            (RoundingMode::TowardsZero, "-2.25", "-2.2"),
            (RoundingMode::AwayFromZero, "2.21", "2.3"),
            (RoundingMode::AwayFromZero, "-2.21", "-2.3"),
            (RoundingMode::ToNearestHalfUp, "2.25", "2.3"),
            (RoundingMode::ToNearestHalfUp, "-2.25", "-2.2"),
            (RoundingMode::ToNearestHalfDown, "2.25", "2.2"),
            (RoundingMode::ToNearestHalfDown, "-2.25", "-2.3"),
            (RoundingMode::ToNearestHalfAwayFromZero, "2.25", "2.3"),
            (RoundingMode::ToNearestHalfAwayFromZero, "-2.25", "-2.3"),
            (RoundingMode::ToNearestHalfTowardsZero, "2.25", "2.2"),
            (RoundingMode::ToNearestHalfTowardsZero, "-2.25", "-2.2"),
            (RoundingMode::ToNearestHalfToEven, "2.25", "2.2"),
            (RoundingMode::ToNearestHalfToEven, "2.35", "2.4"),
            (RoundingMode::ToNearestHalfToEven, "-2.25", "-2.2"),
            (RoundingMode::ToNearestHalfToEven, "-2.35", "-2.4"),
            (RoundingMode::ToNearestHalfToOdd, "2.25", "2.3"),
            (RoundingMode::ToNearestHalfToOdd, "2.35", "2.3"),
        ];

        for &(mode, input, expected) in cases {
            let mut n = num(input);
            n.set_rounding_mode(mode);
            n.set_decimal_places(1).unwrap();
            assert_eq!(n.to_string(), expected, "{input} @ {mode}");
        }
    }

    #[test]
    fn test_decrease_in_128_bit_backing() {
        let mut n = num("9223372036854775806.99999999999999");
        n.set_rounding_mode(RoundingMode::ToNearestHalfToEven);
        n.set_decimal_places(0).unwrap();
        check_number(
            "rounded to max",
            n,
            "9223372036854775807",
            9223372036854775807,
            0,
            0,
            false,
            true,
        );
    }

    #[test]
    fn test_rounding_compensation_at_the_maximum() {
        // Rounding up would take the integer portion one past the maximum;
        // the adjustment steps one unit back toward zero instead.
        let mut n = num("9223372036854775807.99999999999999");
        n.set_rounding_mode(RoundingMode::ToNearestHalfToEven);
        n.set_decimal_places(0).unwrap();
        assert_eq!(n.to_string(), "9223372036854775807");

        let mut n = num("-9223372036854775807.99999999999999");
        n.set_rounding_mode(RoundingMode::ToNearestHalfToEven);
        n.set_decimal_places(0).unwrap();
        assert_eq!(n.to_string(), "-9223372036854775807");

        let mut n = num("9223372036854775807.99999999999999");
        n.set_rounding_mode(RoundingMode::ToNearestHalfToEven);
        n.set_decimal_places(2).unwrap();
        assert_eq!(n.to_string(), "9223372036854775807.99");
    }

    #[test]
    fn test_target_above_maximum_fails() {
        let mut n = num("1.5");
        assert_eq!(n.set_decimal_places(15), Err(DecimalError::BadValue));
        // Unchanged on failure.
        assert_eq!(n.to_string(), "1.5");

        assert!(n.set_decimal_places(14).is_ok());
    }

    #[test]
    fn test_noop() {
        let mut n = num("1.50");
        n.set_decimal_places(2).unwrap();
        assert_eq!(n.to_string(), "1.50");
    }
}




#[cfg(test)]
mod hash_tests {
    use super::test_support::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(s: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        num(s).hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_equal_values_hash_equal() {
        assert_eq!(hash_of("1"), hash_of("1.00"));
        assert_eq!(hash_of("0"), hash_of("0.00000000000000"));
        assert_eq!(hash_of("-1.2"), hash_of("-1.200"));
        assert_eq!(hash_of("0"), hash_of("-0.0"));
    }

    #[test]
    fn test_distinct_values_usually_hash_distinct() {
        assert_ne!(hash_of("1"), hash_of("-1"));
        assert_ne!(hash_of("1.2"), hash_of("1.21"));
    }
}




#[cfg(test)]
mod property_tests {
    use super::test_support::*;
    use super::*;
    use proptest::prelude::*;

    fn arb_number() -> impl Strategy<Value = Number> {
        (any::<i64>(), 0u32..=Number::MAX_DECIMAL_PLACES).prop_map(
            |(raw, dp)| {
                let pow = 10i64.pow(dp);
                let integer = raw / pow;
                let fraction = (raw % pow).unsigned_abs();
                let sign =
                    if raw < 0 { Sign::Negative } else { Sign::Positive };

                let mut n =
                    Number::from_parts(integer, fraction, dp, sign).unwrap();
                n.set_mult_precision_policy(PrecisionPolicy::MaxPrecision);
                n.set_div_precision_policy(PrecisionPolicy::MaxPrecision);
                n.set_rounding_mode(RoundingMode::ToNearestHalfToEven);
                n
            },
        )
    }

    proptest! {
        #[test]
        fn prop_addition_commutes(a in arb_number(), b in arb_number()) {
            let ab = a.try_add(b);
            let ba = b.try_add(a);

            match (ab, ba) {
                (Ok(x), Ok(y)) => {
                    prop_assert_eq!(x, y);
                    prop_assert_eq!(x.decimal_places(), y.decimal_places());
                }
                (Err(x), Err(y)) => prop_assert_eq!(x, y),
                (x, y) => prop_assert!(false, "mismatch: {:?} vs {:?}", x, y),
            }
        }

        #[test]
        fn prop_multiplication_commutes(a in arb_number(), b in arb_number()) {
            let ab = a.try_mul(b);
            let ba = b.try_mul(a);

            match (ab, ba) {
                (Ok(x), Ok(y)) => {
                    prop_assert_eq!(x, y);
                    prop_assert_eq!(x.decimal_places(), y.decimal_places());
                }
                (Err(x), Err(y)) => prop_assert_eq!(x, y),
                (x, y) => prop_assert!(false, "mismatch: {:?} vs {:?}", x, y),
            }
        }

        #[test]
        fn prop_subtraction_antisymmetric(a in arb_number(), b in arb_number()) {
            if let (Ok(x), Ok(y)) = (a.try_sub(b), b.try_sub(a)) {
                prop_assert_eq!(x, -y);
            }
        }

        #[test]
        fn prop_add_then_sub_returns(a in arb_number(), b in arb_number()) {
            if let Ok(sum) = a.try_add(b) {
                let back = sum.try_sub(b).unwrap();
                prop_assert_eq!(back, a);
            }
        }

        #[test]
        fn prop_remainder_carries_dividend_sign(
            a in arb_number(),
            b in arb_number(),
        ) {
            prop_assume!(!b.is_zero());

            let r = a.try_rem(b).unwrap();
            prop_assert!(r.is_zero() || r.is_negative() == a.is_negative());
            prop_assert!(r.abs() < b.abs());
        }

        #[test]
        fn prop_string_round_trip(
            negative in any::<bool>(),
            integer in 0u64..=9223372036854775807,
            fraction in 0u64..100_000_000_000_000u64,
            dp in 1u32..=14,
        ) {
            let pow = 10u64.pow(dp);
            let fraction = fraction % pow;

            let rendered = if negative && (integer != 0 || fraction != 0) {
                format!("-{integer}.{fraction:0width$}", width = dp as usize)
            } else {
                format!("{integer}.{fraction:0width$}", width = dp as usize)
            };

            let parsed = num(&rendered);
            prop_assert_eq!(parsed.to_string(), rendered);
            prop_assert_eq!(parsed.integer_value(), integer);
            prop_assert_eq!(parsed.fractional_value(), fraction);
            prop_assert_eq!(parsed.decimal_places(), dp);
        }

        #[test]
        fn prop_validate_matches_from_parts(
            integer in any::<i64>(),
            fraction in any::<u64>(),
            dp in 0u32..=16,
        ) {
            for sign in [Sign::Positive, Sign::Negative] {
                prop_assert_eq!(
                    Number::validate(integer, fraction, dp, sign),
                    Number::from_parts(integer, fraction, dp, sign).is_ok()
                );
            }
        }

        #[test]
        fn prop_compact_equality(a in arb_number()) {
            // Widening the decimal places never changes the value.
            let mut widened = a;
            if widened.decimal_places() < Number::MAX_DECIMAL_PLACES {
                widened
                    .set_decimal_places(Number::MAX_DECIMAL_PLACES)
                    .unwrap();
                prop_assert_eq!(widened, a);
            }
        }
    }
}
