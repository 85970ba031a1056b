//! Local Ed25519 key store.
//!
//! Decodes a Sui `suiprivkey` bech32 export into an Ed25519 keypair. The
//! key can be supplied inline in configuration or through a key file in
//! the wallet-export format: a JSON object with an `exportedPrivateKey`
//! field. Addresses are derived as blake2b-256 over the scheme flag and
//! the public key; signatures carry the Sui intent envelope.

use crate::{AccountError, AccountInterface};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bech32::Hrp;
use blake2::{digest::consts::U32, Blake2b, Digest};
use courier_types::{ConfigSchema, Field, FieldType, Schema, Signature, SuiAddress};
use ed25519_dalek::{Signer, SigningKey};
use serde::Deserialize;
use std::path::Path;

type Blake2b256 = Blake2b<U32>;

/// Human-readable part of a Sui private key export.
const SUI_PRIVKEY_HRP: &str = "suiprivkey";
/// Signature scheme flag for Ed25519 keys.
const ED25519_FLAG: u8 = 0x00;
/// Sui intent envelope for transaction data: scope, version, app id.
const TX_INTENT_PREFIX: [u8; 3] = [0, 0, 0];

/// Wallet key-export file shape.
#[derive(Debug, Deserialize)]
struct KeyFile {
	#[serde(rename = "exportedPrivateKey")]
	exported_private_key: String,
}

/// Local key store holding an Ed25519 keypair in memory.
pub struct LocalKeystore {
	signing_key: SigningKey,
	address: SuiAddress,
}

impl std::fmt::Debug for LocalKeystore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LocalKeystore")
			.field("address", &self.address)
			.finish_non_exhaustive()
	}
}

impl LocalKeystore {
	/// Creates a keystore from a bech32 `suiprivkey` export string.
	pub fn from_bech32(exported: &str) -> Result<Self, AccountError> {
		let (hrp, data) = bech32::decode(exported.trim())
			.map_err(|e| AccountError::InvalidKey(format!("not a bech32 key export: {}", e)))?;

		let expected_hrp = Hrp::parse(SUI_PRIVKEY_HRP)
			.map_err(|e| AccountError::InvalidKey(format!("bad hrp constant: {}", e)))?;
		if hrp != expected_hrp {
			return Err(AccountError::InvalidKey(format!(
				"unexpected key prefix '{}', expected '{}'",
				hrp, SUI_PRIVKEY_HRP
			)));
		}

		if data.len() != 33 {
			return Err(AccountError::InvalidKey(format!(
				"key payload must be 33 bytes (flag + seed), got {}",
				data.len()
			)));
		}
		if data[0] != ED25519_FLAG {
			return Err(AccountError::InvalidKey(format!(
				"unsupported signature scheme flag {:#04x}, only Ed25519 is supported",
				data[0]
			)));
		}

		let seed: [u8; 32] = data[1..33]
			.try_into()
			.map_err(|_| AccountError::InvalidKey("seed must be 32 bytes".to_string()))?;
		let signing_key = SigningKey::from_bytes(&seed);
		let address = derive_address(&signing_key)?;

		Ok(Self {
			signing_key,
			address,
		})
	}

	/// Creates a keystore from a wallet key-export JSON file.
	pub fn from_key_file(path: impl AsRef<Path>) -> Result<Self, AccountError> {
		let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
			AccountError::KeyFile(format!("cannot read {}: {}", path.as_ref().display(), e))
		})?;
		let key_file: KeyFile = serde_json::from_str(&contents)
			.map_err(|e| AccountError::KeyFile(format!("invalid key file: {}", e)))?;
		Self::from_bech32(&key_file.exported_private_key)
	}
}

/// Derives the Sui address for an Ed25519 key: blake2b-256(flag || pubkey).
fn derive_address(signing_key: &SigningKey) -> Result<SuiAddress, AccountError> {
	let mut hasher = Blake2b256::new();
	hasher.update([ED25519_FLAG]);
	hasher.update(signing_key.verifying_key().to_bytes());
	let digest = hasher.finalize();

	SuiAddress::new(format!("0x{}", hex::encode(digest)))
		.map_err(|e| AccountError::InvalidKey(format!("derived address rejected: {}", e)))
}

/// Configuration schema for the local key store.
pub struct LocalKeystoreSchema;

impl LocalKeystoreSchema {
	/// Static validation method for use before instance creation.
	pub fn validate_config(config: &toml::Value) -> Result<(), courier_types::ValidationError> {
		let instance = Self;
		instance.validate(config)
	}
}

impl ConfigSchema for LocalKeystoreSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), courier_types::ValidationError> {
		let schema = Schema::new(
			vec![],
			vec![
				Field::new("key_file", FieldType::String),
				Field::new("private_key", FieldType::String).with_validator(|value| {
					match value.as_str() {
						Some(key) if key.trim().starts_with(SUI_PRIVKEY_HRP) => Ok(()),
						Some(_) => Err(format!(
							"private_key must be a bech32 '{}' export",
							SUI_PRIVKEY_HRP
						)),
						None => Err("Expected string value for private_key".to_string()),
					}
				}),
			],
		);
		schema.validate(config)?;

		let table = config.as_table();
		let has_any = table
			.map(|t| t.contains_key("key_file") || t.contains_key("private_key"))
			.unwrap_or(false);
		if !has_any {
			return Err(courier_types::ValidationError::MissingField(
				"key_file or private_key".to_string(),
			));
		}
		Ok(())
	}
}

#[async_trait]
impl AccountInterface for LocalKeystore {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(LocalKeystoreSchema)
	}

	async fn address(&self) -> Result<SuiAddress, AccountError> {
		Ok(self.address.clone())
	}

	async fn sign_tx_bytes(&self, tx_bytes: &[u8]) -> Result<Signature, AccountError> {
		// Sui signs blake2b-256 of the intent envelope, not the raw bytes.
		let mut message = Vec::with_capacity(TX_INTENT_PREFIX.len() + tx_bytes.len());
		message.extend_from_slice(&TX_INTENT_PREFIX);
		message.extend_from_slice(tx_bytes);

		let mut hasher = Blake2b256::new();
		hasher.update(&message);
		let digest = hasher.finalize();

		let signature = self.signing_key.sign(&digest);

		// Serialized form: flag || signature || pubkey, base64-encoded.
		let mut serialized = Vec::with_capacity(1 + 64 + 32);
		serialized.push(ED25519_FLAG);
		serialized.extend_from_slice(&signature.to_bytes());
		serialized.extend_from_slice(&self.signing_key.verifying_key().to_bytes());

		Ok(Signature(BASE64.encode(serialized)))
	}
}

/// Factory function to create a local key store from configuration.
///
/// `private_key` (inline bech32 export) takes precedence over `key_file`
/// (wallet-export JSON) when both are present.
pub fn create_account(config: &toml::Value) -> Result<Box<dyn AccountInterface>, AccountError> {
	LocalKeystoreSchema::validate_config(config)
		.map_err(|e| AccountError::InvalidKey(format!("Invalid configuration: {}", e)))?;

	if let Some(private_key) = config.get("private_key").and_then(|v| v.as_str()) {
		return Ok(Box::new(LocalKeystore::from_bech32(private_key)?));
	}

	let key_file = config
		.get("key_file")
		.and_then(|v| v.as_str())
		.ok_or_else(|| AccountError::KeyFile("key_file is not a string".to_string()))?;
	Ok(Box::new(LocalKeystore::from_key_file(key_file)?))
}

/// Registry for the local account implementation.
pub struct Registry;

impl courier_types::ImplementationRegistry for Registry {
	const NAME: &'static str = "local";
	type Factory = crate::AccountFactory;

	fn factory() -> Self::Factory {
		create_account
	}
}

impl crate::AccountRegistry for Registry {}
