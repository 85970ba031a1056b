//! Pipeline assembly from configuration.
//!
//! Resolves each configured implementation name against its crate's
//! registry, builds the services, and wires them into a [`Pipeline`].
//! The signer address is fetched once here; the pipeline holds it
//! read-only for the process lifetime.

use courier_account::{AccountError, AccountService};
use courier_config::{Config, ConfigError};
use courier_core::Pipeline;
use courier_delivery::{DeliveryError, DeliveryService};
use courier_intent::{IntentError, IntentService};
use courier_types::truncate_id;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while assembling the pipeline.
#[derive(Debug, Error)]
pub enum BuildError {
	/// The configuration references an unknown implementation.
	#[error("Configuration error: {0}")]
	Config(String),
	/// The account implementation could not be created.
	#[error(transparent)]
	Account(#[from] AccountError),
	/// The completion provider could not be created.
	#[error(transparent)]
	Provider(#[from] IntentError),
	/// The delivery implementation could not be created.
	#[error(transparent)]
	Delivery(#[from] DeliveryError),
}

impl From<ConfigError> for BuildError {
	fn from(err: ConfigError) -> Self {
		BuildError::Config(err.to_string())
	}
}

fn find_factory<F>(
	implementations: Vec<(&'static str, F)>,
	name: &str,
	kind: &str,
) -> Result<F, BuildError> {
	implementations
		.into_iter()
		.find(|(n, _)| *n == name)
		.map(|(_, factory)| factory)
		.ok_or_else(|| BuildError::Config(format!("unknown {} implementation '{}'", kind, name)))
}

/// Builds the pipeline with all configured implementations.
pub async fn build_pipeline(config: &Config) -> Result<Pipeline, BuildError> {
	let account_factory = find_factory(
		courier_account::get_all_implementations(),
		&config.account.primary,
		"account",
	)?;
	let account = Arc::new(AccountService::new(account_factory(
		config.account.primary_config()?,
	)?));
	let sender = account.address().await?;
	info!(sender = %truncate_id(sender.as_str()), "Loaded signer");

	let provider_factory = find_factory(
		courier_intent::get_all_implementations(),
		&config.provider.primary,
		"provider",
	)?;
	let intent = Arc::new(IntentService::new(provider_factory(
		config.provider.primary_config()?,
	)?));

	let delivery_factory = find_factory(
		courier_delivery::get_all_implementations(),
		&config.chain.primary,
		"chain",
	)?;
	let delivery = Arc::new(DeliveryService::new(delivery_factory(
		config.chain.primary_config()?,
		account.clone(),
	)?));

	Ok(Pipeline::new(intent, delivery, sender))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_find_factory_unknown_name() {
		let impls: Vec<(&'static str, u8)> = vec![("local", 1)];
		let result = find_factory(impls, "kms", "account");
		assert!(matches!(result.unwrap_err(), BuildError::Config(msg) if msg.contains("kms")));
	}

	#[test]
	fn test_find_factory_known_name() {
		let impls: Vec<(&'static str, u8)> = vec![("local", 1), ("other", 2)];
		assert_eq!(find_factory(impls, "other", "account").unwrap(), 2);
	}

	#[tokio::test]
	async fn test_build_pipeline_rejects_unknown_account() {
		let config = Config::from_toml_str(
			r#"
			[courier]
			id = "test"

			[provider]
			primary = "openai"
			[provider.implementations.openai]
			api_key = "sk-test"

			[account]
			primary = "vault"
			[account.implementations.vault]
			token = "t"

			[chain]
			primary = "sui"
			[chain.implementations.sui]
			network = "testnet"
			"#,
		)
		.unwrap();

		let result = build_pipeline(&config).await;
		assert!(matches!(result.unwrap_err(), BuildError::Config(_)));
	}
}
