//! Fixed-point decimal numbers for financial calculations
//!
//! This library provides a signed decimal value type with an explicit,
//! per-instance decimal-place count (up to 14), exact arithmetic, thirteen
//! precision policies for multiplication and division results, and ten
//! rounding modes. Values live in a fast 64-bit backing and fall back to
//! 128 bits only when they must.
//!
//! ```
//! use findec::Number;
//!
//! let price: Number = "12345.12345".parse().unwrap();
//! let qty: Number = "54321.54321".parse().unwrap();
//! // The default precision policy keeps max(5, 5) + 2 decimal places.
//! assert_eq!((price * qty).to_string(), "670606156.9219593");
//! ```

#![cfg_attr(not(test), no_std)]

mod error;
mod first_bit_set;
mod number;
mod precision;
mod rounding;
mod shift_table;

pub use error::{DecimalError, Result};
pub use number::{Number, Sign};
pub use precision::PrecisionPolicy;
pub use rounding::RoundingMode;
