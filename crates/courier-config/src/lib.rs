//! Configuration module for the sui-courier pipeline.
//!
//! Loads the pipeline configuration from a TOML file and validates it at
//! the structural level. Implementation-specific sections are kept as raw
//! TOML values; each implementation validates its own section through its
//! `ConfigSchema` when its factory runs.
//!
//! Credentials never live in the file itself: the provider API key is
//! resolved from the environment, and key material is referenced by path.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error parsing the TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the courier pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	/// Identity of this courier instance.
	pub courier: CourierConfig,
	/// Completion provider used by the intent parser.
	pub provider: SectionConfig,
	/// Account (key store) used for signing.
	pub account: SectionConfig,
	/// Chain delivery used for submission.
	pub chain: SectionConfig,
}

/// Configuration specific to the courier instance.
#[derive(Debug, Clone, Deserialize)]
pub struct CourierConfig {
	/// Unique identifier for this instance, used in log output.
	pub id: String,
}

/// A pluggable-implementation section.
///
/// `primary` selects which implementation to use; `implementations` maps
/// implementation names to their raw TOML configuration tables.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionConfig {
	/// Which implementation to use.
	pub primary: String,
	/// Map of implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

impl SectionConfig {
	/// Returns the raw configuration table for the primary implementation.
	pub fn primary_config(&self) -> Result<&toml::Value, ConfigError> {
		self.implementations.get(&self.primary).ok_or_else(|| {
			ConfigError::Validation(format!(
				"No configuration for primary implementation '{}'",
				self.primary
			))
		})
	}
}

impl Config {
	/// Loads configuration from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let contents = std::fs::read_to_string(path)?;
		Self::from_toml_str(&contents)
	}

	/// Parses configuration from a TOML string and validates it.
	pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
		let config: Config = toml::from_str(contents)?;
		config.validate()?;
		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.courier.id.is_empty() {
			return Err(ConfigError::Validation(
				"courier.id must not be empty".to_string(),
			));
		}
		for (name, section) in [
			("provider", &self.provider),
			("account", &self.account),
			("chain", &self.chain),
		] {
			section.primary_config().map_err(|_| {
				ConfigError::Validation(format!(
					"Section '{}' selects primary '{}' but has no matching implementation table",
					name, section.primary
				))
			})?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const VALID_CONFIG: &str = r#"
		[courier]
		id = "courier-test"

		[provider]
		primary = "openai"
		[provider.implementations.openai]
		model = "gpt-4.1-mini"

		[account]
		primary = "local"
		[account.implementations.local]
		key_file = "./key.json"

		[chain]
		primary = "sui"
		[chain.implementations.sui]
		network = "testnet"
	"#;

	#[test]
	fn test_valid_config_parses() {
		let config = Config::from_toml_str(VALID_CONFIG).unwrap();
		assert_eq!(config.courier.id, "courier-test");
		assert_eq!(config.provider.primary, "openai");
		assert!(config.provider.primary_config().is_ok());
	}

	#[test]
	fn test_missing_section_rejected() {
		let result = Config::from_toml_str("[courier]\nid = \"x\"\n");
		assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
	}

	#[test]
	fn test_primary_without_table_rejected() {
		let broken = VALID_CONFIG.replace("primary = \"sui\"", "primary = \"other\"");
		let result = Config::from_toml_str(&broken);
		assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
	}

	#[test]
	fn test_empty_id_rejected() {
		let broken = VALID_CONFIG.replace("id = \"courier-test\"", "id = \"\"");
		let result = Config::from_toml_str(&broken);
		assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
	}
}
