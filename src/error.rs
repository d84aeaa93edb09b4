use core::fmt;

/// Errors produced by decimal construction and arithmetic.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DecimalError {
    /// A finite result could not be represented: the integer portion of the
    /// outcome exceeds [`Number::MAX_INTEGER_VALUE`], or an operation ran
    /// out of operand precision to shed.
    ///
    /// [`Number::MAX_INTEGER_VALUE`]: crate::Number::MAX_INTEGER_VALUE
    Overflow,

    /// Division or remainder by a value equal to zero.
    DivisionByZero,

    /// Constructor input validation failed: out-of-range integer, too many
    /// decimal places, out-of-range fractional part, NaN/infinity, or a
    /// malformed decimal string.
    BadValue,
}

/// Convenience alias used by all fallible operations in this crate.
pub type Result<T> = core::result::Result<T, DecimalError>;

impl fmt::Display for DecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimalError::Overflow => f.write_str("decimal overflow"),
            DecimalError::DivisionByZero => f.write_str("division by zero"),
            DecimalError::BadValue => f.write_str("bad decimal value"),
        }
    }
}

impl core::error::Error for DecimalError {}
