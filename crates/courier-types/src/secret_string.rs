//! Secure string type for handling sensitive data.
//!
//! Wraps key material and API credentials so they cannot leak through
//! `Debug` or `Display` formatting. Access goes through `with_exposed`,
//! which keeps the exposure site explicit and greppable.

use serde::Deserialize;
use std::fmt;

/// A string whose contents are hidden from all formatting output.
#[derive(Clone, Deserialize)]
#[serde(from = "String")]
pub struct SecretString(String);

impl SecretString {
	/// Runs `f` with the secret exposed and returns its result.
	pub fn with_exposed<R>(&self, f: impl FnOnce(&str) -> R) -> R {
		f(&self.0)
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SecretString([REDACTED])")
	}
}
