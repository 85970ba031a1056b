//! Exact conversion between human-denominated SUI amounts and MIST.
//!
//! Amounts arrive from the intent pipeline as decimal strings ("0.1") and
//! must be converted to the chain's atomic unit without floating-point
//! drift. Conversion uses `rust_decimal` and truncates toward zero, so a
//! sub-atomic remainder is dropped rather than rounded up; under-conversion
//! can never send more than the user asked for.

use rust_decimal::{prelude::ToPrimitive, Decimal};
use std::str::FromStr;
use thiserror::Error;

/// Number of MIST in one SUI.
pub const MIST_PER_SUI: u64 = 1_000_000_000;

/// Errors that can occur during amount conversion.
#[derive(Debug, Error)]
pub enum AmountError {
	/// The amount string is not a valid non-negative decimal number.
	#[error("Invalid amount '{amount}': {reason}")]
	InvalidAmount { amount: String, reason: String },
}

impl AmountError {
	fn invalid(amount: &str, reason: impl Into<String>) -> Self {
		AmountError::InvalidAmount {
			amount: amount.to_string(),
			reason: reason.into(),
		}
	}
}

/// Converts a human-readable SUI amount string into MIST.
///
/// The value is scaled by [`MIST_PER_SUI`] with exact decimal arithmetic
/// and truncated to an integer. Truncation is deliberate: fractional MIST
/// below the scale are dropped, never rounded up.
///
/// # Errors
///
/// Returns [`AmountError::InvalidAmount`] if the string does not parse as
/// a decimal number, is negative, or the scaled value does not fit in u64.
pub fn to_atomic_units(amount: &str) -> Result<u64, AmountError> {
	let value = Decimal::from_str(amount.trim())
		.map_err(|e| AmountError::invalid(amount, format!("not a decimal number: {}", e)))?;

	if value.is_sign_negative() {
		return Err(AmountError::invalid(amount, "amount must not be negative"));
	}

	let scaled = value
		.checked_mul(Decimal::from(MIST_PER_SUI))
		.ok_or_else(|| AmountError::invalid(amount, "amount overflows the MIST scale"))?;

	scaled
		.trunc()
		.to_u64()
		.ok_or_else(|| AmountError::invalid(amount, "amount does not fit in u64 MIST"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_whole_sui_scales_exactly() {
		assert_eq!(to_atomic_units("1").unwrap(), 1_000_000_000);
		assert_eq!(to_atomic_units("2").unwrap(), 2_000_000_000);
	}

	#[test]
	fn test_fractional_sui_scales_without_drift() {
		// 0.1 * 10^9 has an exact decimal representation; a float path
		// would produce 100000000.00000001-style drift.
		assert_eq!(to_atomic_units("0.1").unwrap(), 100_000_000);
		assert_eq!(to_atomic_units("0.000000001").unwrap(), 1);
	}

	#[test]
	fn test_sub_atomic_remainder_truncates_down() {
		assert_eq!(to_atomic_units("0.0000000019").unwrap(), 1);
		assert_eq!(to_atomic_units("0.0000000001").unwrap(), 0);
	}

	#[test]
	fn test_zero_is_structurally_valid() {
		assert_eq!(to_atomic_units("0").unwrap(), 0);
		assert_eq!(to_atomic_units("0.0").unwrap(), 0);
	}

	#[test]
	fn test_negative_amount_rejected() {
		assert!(to_atomic_units("-0.1").is_err());
		assert!(to_atomic_units("-1").is_err());
	}

	#[test]
	fn test_non_numeric_amount_rejected() {
		assert!(to_atomic_units("abc").is_err());
		assert!(to_atomic_units("").is_err());
		assert!(to_atomic_units("0.1 SUI").is_err());
	}

	#[test]
	fn test_conversion_is_pure() {
		let first = to_atomic_units("12.345").unwrap();
		let second = to_atomic_units("12.345").unwrap();
		assert_eq!(first, second);
		assert_eq!(first, 12_345_000_000);
	}

	#[test]
	fn test_surrounding_whitespace_tolerated() {
		assert_eq!(to_atomic_units(" 0.5 ").unwrap(), 500_000_000);
	}
}
