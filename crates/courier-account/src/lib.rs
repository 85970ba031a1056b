//! Account management module for the sui-courier pipeline.
//!
//! This module provides abstractions for the signing key store: retrieving
//! the signer's address and signing raw transaction bytes. The pipeline
//! treats the key store as a collaborator; the local implementation decodes
//! a Sui `suiprivkey` export into an Ed25519 keypair.

use async_trait::async_trait;
use courier_types::{ConfigSchema, ImplementationRegistry, Signature, SuiAddress};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// A cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// The key file could not be read or decoded.
	#[error("Key file error: {0}")]
	KeyFile(String),
	/// A signing operation failed.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
}

/// Trait defining the interface for account implementations.
///
/// An account exposes its chain address and signs already-assembled
/// transaction bytes. It never mutates anything: the keypair is loaded
/// once at startup and shared read-only for the process lifetime.
#[async_trait]
pub trait AccountInterface: Send + Sync {
	/// Returns the configuration schema for this account implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Returns the address associated with this account.
	async fn address(&self) -> Result<SuiAddress, AccountError>;

	/// Signs raw transaction bytes, producing a chain-ready signature.
	///
	/// The bytes are the BCS transaction data as returned by the node's
	/// transaction builder; the implementation applies the chain's signing
	/// envelope before producing the signature.
	async fn sign_tx_bytes(&self, tx_bytes: &[u8]) -> Result<Signature, AccountError>;
}

/// Factory function type for account implementations.
pub type AccountFactory = fn(&toml::Value) -> Result<Box<dyn AccountInterface>, AccountError>;

/// Registry trait for account implementations.
pub trait AccountRegistry: ImplementationRegistry<Factory = AccountFactory> {}

/// Get all registered account implementations.
///
/// Returns a vector of (name, factory) tuples for all available account
/// implementations, used when wiring the pipeline from configuration.
pub fn get_all_implementations() -> Vec<(&'static str, AccountFactory)> {
	use implementations::local;

	vec![(local::Registry::NAME, local::Registry::factory())]
}

/// Service that manages account operations.
///
/// Wraps the configured account implementation behind a stable surface for
/// the delivery layer.
pub struct AccountService {
	implementation: Box<dyn AccountInterface>,
}

impl AccountService {
	/// Creates a new AccountService with the specified implementation.
	pub fn new(implementation: Box<dyn AccountInterface>) -> Self {
		Self { implementation }
	}

	/// Returns the signer's address.
	pub async fn address(&self) -> Result<SuiAddress, AccountError> {
		self.implementation.address().await
	}

	/// Signs raw transaction bytes with the managed account.
	pub async fn sign_tx_bytes(&self, tx_bytes: &[u8]) -> Result<Signature, AccountError> {
		self.implementation.sign_tx_bytes(tx_bytes).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_account_error_display() {
		let err = AccountError::InvalidKey("bad key".to_string());
		assert_eq!(format!("{}", err), "Invalid key: bad key");

		let err = AccountError::SigningFailed("boom".to_string());
		assert_eq!(format!("{}", err), "Signing failed: boom");
	}

	#[test]
	fn test_get_all_implementations_includes_local() {
		let impls = get_all_implementations();
		assert!(impls.iter().any(|(name, _)| *name == "local"));
	}
}
