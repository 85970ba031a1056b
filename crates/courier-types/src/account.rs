//! Address and signature types for the Sui chain.
//!
//! Addresses are carried as `0x`-prefixed hex strings. The pipeline only
//! enforces the prefix; full address validation is delegated to the chain,
//! which rejects malformed addresses at broadcast time.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when constructing an address.
#[derive(Debug, Error)]
pub enum AddressError {
	/// The address is missing the required `0x` prefix.
	#[error("Address '{0}' is missing the 0x prefix")]
	MissingPrefix(String),
	/// The address has a prefix but no content after it.
	#[error("Address has no content after the 0x prefix")]
	Empty,
}

/// A Sui address as a `0x`-prefixed hex string.
///
/// Construction checks only that the prefix is present and followed by at
/// least one character. Checksum and length validation belong to the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SuiAddress(String);

impl SuiAddress {
	/// Creates an address from a string, enforcing the `0x` prefix.
	pub fn new(address: impl Into<String>) -> Result<Self, AddressError> {
		let address = address.into();
		if !address.starts_with("0x") {
			return Err(AddressError::MissingPrefix(address));
		}
		if address.len() == 2 {
			return Err(AddressError::Empty);
		}
		Ok(Self(address))
	}

	/// Returns the address as a string slice, including the prefix.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SuiAddress {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl TryFrom<String> for SuiAddress {
	type Error = AddressError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl From<SuiAddress> for String {
	fn from(address: SuiAddress) -> Self {
		address.0
	}
}

/// A serialized Sui signature (flag || sig || pubkey, base64-encoded).
///
/// Produced by the account layer and passed to the chain verbatim; nothing
/// in the pipeline inspects its contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(pub String);

impl Signature {
	/// Returns the base64-encoded signature string.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_address_accepts_prefixed_hex() {
		let address = SuiAddress::new("0xabc").unwrap();
		assert_eq!(address.as_str(), "0xabc");
	}

	#[test]
	fn test_address_rejects_missing_prefix() {
		let result = SuiAddress::new("abc123");
		assert!(matches!(result.unwrap_err(), AddressError::MissingPrefix(_)));
	}

	#[test]
	fn test_address_rejects_bare_prefix() {
		let result = SuiAddress::new("0x");
		assert!(matches!(result.unwrap_err(), AddressError::Empty));
	}

	#[test]
	fn test_address_deserializes_with_validation() {
		let address: SuiAddress = serde_json::from_str("\"0xabc\"").unwrap();
		assert_eq!(address.as_str(), "0xabc");

		let result: Result<SuiAddress, _> = serde_json::from_str("\"abc\"");
		assert!(result.is_err());
	}

	#[test]
	fn test_address_display_round_trips() {
		let address = SuiAddress::new("0xdeadbeef").unwrap();
		assert_eq!(address.to_string(), "0xdeadbeef");
	}
}
