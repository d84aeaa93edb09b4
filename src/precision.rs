//! Precision policies for multiplication and division results.
//!
//! A policy maps the two operands' decimal-place counts to the decimal
//! places the result should carry. Product precision is additionally capped
//! by `da + db` (a product has no more real fractional digits than that),
//! and everything is capped by the library-wide maximum.

use core::fmt;

/// Controls how many decimal places the result of a multiplication or
/// division keeps.
///
/// When the two operands carry different policies, the one yielding more
/// decimal places wins.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PrecisionPolicy {
    /// Result keeps `min(da, db)` decimal places.
    MinOperand = 0,
    MinOperandPlus1,
    MinOperandPlus2,
    MinOperandPlus3,
    MinOperandPlus4,
    MinOperandPlus5,
    /// Result keeps `max(da, db)` decimal places.
    MaxOperand,
    MaxOperandPlus1,
    MaxOperandPlus2,
    MaxOperandPlus3,
    MaxOperandPlus4,
    MaxOperandPlus5,
    /// Result keeps as many decimal places as the representation allows.
    MaxPrecision,
}

impl PrecisionPolicy {
    pub(crate) const fn from_u8(val: u8) -> PrecisionPolicy {
        match val {
            0 => PrecisionPolicy::MinOperand,
            1 => PrecisionPolicy::MinOperandPlus1,
            2 => PrecisionPolicy::MinOperandPlus2,
            3 => PrecisionPolicy::MinOperandPlus3,
            4 => PrecisionPolicy::MinOperandPlus4,
            5 => PrecisionPolicy::MinOperandPlus5,
            6 => PrecisionPolicy::MaxOperand,
            7 => PrecisionPolicy::MaxOperandPlus1,
            8 => PrecisionPolicy::MaxOperandPlus2,
            9 => PrecisionPolicy::MaxOperandPlus3,
            10 => PrecisionPolicy::MaxOperandPlus4,
            11 => PrecisionPolicy::MaxOperandPlus5,
            _ => PrecisionPolicy::MaxPrecision,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            PrecisionPolicy::MinOperand => "MIN_OPERAND",
            PrecisionPolicy::MinOperandPlus1 => "MIN_OPERAND_PLUS_1",
            PrecisionPolicy::MinOperandPlus2 => "MIN_OPERAND_PLUS_2",
            PrecisionPolicy::MinOperandPlus3 => "MIN_OPERAND_PLUS_3",
            PrecisionPolicy::MinOperandPlus4 => "MIN_OPERAND_PLUS_4",
            PrecisionPolicy::MinOperandPlus5 => "MIN_OPERAND_PLUS_5",
            PrecisionPolicy::MaxOperand => "MAX_OPERAND",
            PrecisionPolicy::MaxOperandPlus1 => "MAX_OPERAND_PLUS_1",
            PrecisionPolicy::MaxOperandPlus2 => "MAX_OPERAND_PLUS_2",
            PrecisionPolicy::MaxOperandPlus3 => "MAX_OPERAND_PLUS_3",
            PrecisionPolicy::MaxOperandPlus4 => "MAX_OPERAND_PLUS_4",
            PrecisionPolicy::MaxOperandPlus5 => "MAX_OPERAND_PLUS_5",
            PrecisionPolicy::MaxPrecision => "MAX_PRECISION",
        }
    }

    /// The base operand selector and additive bump of the policy; `None`
    /// for [`PrecisionPolicy::MaxPrecision`].
    const fn operand_plus(&self) -> Option<(bool, u32)> {
        match self {
            PrecisionPolicy::MinOperand => Some((true, 0)),
            PrecisionPolicy::MinOperandPlus1 => Some((true, 1)),
            PrecisionPolicy::MinOperandPlus2 => Some((true, 2)),
            PrecisionPolicy::MinOperandPlus3 => Some((true, 3)),
            PrecisionPolicy::MinOperandPlus4 => Some((true, 4)),
            PrecisionPolicy::MinOperandPlus5 => Some((true, 5)),
            PrecisionPolicy::MaxOperand => Some((false, 0)),
            PrecisionPolicy::MaxOperandPlus1 => Some((false, 1)),
            PrecisionPolicy::MaxOperandPlus2 => Some((false, 2)),
            PrecisionPolicy::MaxOperandPlus3 => Some((false, 3)),
            PrecisionPolicy::MaxOperandPlus4 => Some((false, 4)),
            PrecisionPolicy::MaxOperandPlus5 => Some((false, 5)),
            PrecisionPolicy::MaxPrecision => None,
        }
    }
}

impl fmt::Display for PrecisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decimal places for the product of operands carrying `factor1_dp` and
/// `factor2_dp` decimal places.
pub(crate) fn product_decimal_places(
    factor1_dp: u32,
    factor2_dp: u32,
    max_dp: u32,
    policy: PrecisionPolicy,
) -> u32 {
    let full = factor1_dp + factor2_dp;

    let wanted = match policy.operand_plus() {
        Some((true, bump)) => factor1_dp.min(factor2_dp) + bump,
        Some((false, bump)) => factor1_dp.max(factor2_dp) + bump,
        None => full,
    };

    wanted.min(full).min(max_dp)
}

/// Decimal places for the quotient of operands carrying `dividend_dp` and
/// `divisor_dp` decimal places.
pub(crate) fn quotient_decimal_places(
    dividend_dp: u32,
    divisor_dp: u32,
    max_dp: u32,
    policy: PrecisionPolicy,
) -> u32 {
    let wanted = match policy.operand_plus() {
        Some((true, bump)) => dividend_dp.min(divisor_dp) + bump,
        Some((false, bump)) => dividend_dp.max(divisor_dp) + bump,
        None => max_dp,
    };

    wanted.min(max_dp)
}
