//! Intent parsing module for the sui-courier pipeline.
//!
//! This module turns a line of free-form user text into a validated
//! transfer intent. Parsing is a single exchange with a completion
//! provider under a fixed system prompt describing the exact JSON
//! contract; validation is the actual enforcement point and never trusts
//! the provider to have obeyed the prompt.

use async_trait::async_trait;
use courier_types::{ConfigSchema, ImplementationRegistry};
use thiserror::Error;
use tracing::debug;

/// Schema validation of raw provider output.
pub mod schema;

pub use schema::IntentOutcome;

/// Re-export implementations
pub mod implementations {
	pub mod openai;
}

/// The parser's entire protocol with the provider: the exact JSON shape,
/// the literal field names, and the JSON-only output rule. Mirrors what
/// the validator in [`schema`] enforces.
const SYSTEM_PROMPT: &str = r#"You are an intent parser.
Convert user text into JSON.

You MUST follow this exact schema:

{
  "type": "transfer",
  "to": "0xADDRESS",
  "amount": "SUI_AMOUNT"
}

Rules:
- Use EXACT property names: type, to, amount
- "type" MUST be exactly "transfer"
- "to" MUST be the recipient address
- "amount" MUST be a string in SUI (example: "0.1")
- Output ONLY valid JSON
- No explanations
- No markdown

If missing data, output:
{ "error": "MISSING_FIELD" }"#;

/// Errors that can occur during intent parsing and validation.
#[derive(Debug, Error)]
pub enum IntentError {
	/// The completion call itself failed (network, auth, quota).
	#[error("Provider error: {0}")]
	Provider(String),
	/// The provider returned no content.
	#[error("Provider returned an empty completion")]
	EmptyCompletion,
	/// The provider did not emit valid JSON at all.
	#[error("Malformed provider response: {0}")]
	MalformedResponse(String),
	/// The provider emitted JSON that violates the intent schema.
	#[error("Intent schema violation: {0}")]
	SchemaViolation(String),
	/// The provider configuration is invalid.
	#[error("Invalid provider configuration: {0}")]
	InvalidConfig(String),
}

/// Trait defining the interface for completion provider implementations.
///
/// One request, one response, no streaming. Retry and backoff policy is a
/// caller-level concern and never happens inside the pipeline.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait CompletionInterface: Send + Sync {
	/// Returns the configuration schema for this provider implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Sends one completion request and returns the raw response text.
	async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, IntentError>;
}

/// Factory function type for completion provider implementations.
pub type CompletionFactory = fn(&toml::Value) -> Result<Box<dyn CompletionInterface>, IntentError>;

/// Registry trait for completion provider implementations.
pub trait CompletionRegistry: ImplementationRegistry<Factory = CompletionFactory> {}

/// Get all registered completion provider implementations.
pub fn get_all_implementations() -> Vec<(&'static str, CompletionFactory)> {
	use implementations::openai;

	vec![(openai::Registry::NAME, openai::Registry::factory())]
}

/// Service composing the intent parser and validator.
///
/// `interpret` is the single entry point: one provider exchange followed
/// by schema validation into a tagged [`IntentOutcome`].
pub struct IntentService {
	implementation: Box<dyn CompletionInterface>,
}

impl IntentService {
	/// Creates a new IntentService with the specified provider.
	pub fn new(implementation: Box<dyn CompletionInterface>) -> Self {
		Self { implementation }
	}

	/// Runs one completion exchange and returns the raw candidate JSON.
	///
	/// The raw output is logged verbatim before any validation, as a
	/// diagnostic aid.
	pub async fn parse_raw(&self, user_text: &str) -> Result<String, IntentError> {
		let raw = self
			.implementation
			.complete(SYSTEM_PROMPT, user_text)
			.await?;

		debug!(raw = %raw, "Raw provider output");

		if raw.trim().is_empty() {
			return Err(IntentError::EmptyCompletion);
		}
		Ok(raw)
	}

	/// Parses and validates user text into an intent outcome.
	pub async fn interpret(&self, user_text: &str) -> Result<IntentOutcome, IntentError> {
		let raw = self.parse_raw(user_text).await?;
		schema::validate_intent(&raw)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use courier_types::Schema;

	/// Provider double that always returns a canned response.
	struct CannedCompletion(&'static str);

	#[async_trait]
	impl CompletionInterface for CannedCompletion {
		fn config_schema(&self) -> Box<dyn ConfigSchema> {
			struct Empty;
			impl ConfigSchema for Empty {
				fn validate(
					&self,
					config: &toml::Value,
				) -> Result<(), courier_types::ValidationError> {
					Schema::new(vec![], vec![]).validate(config)
				}
			}
			Box::new(Empty)
		}

		async fn complete(
			&self,
			_system_prompt: &str,
			_user_text: &str,
		) -> Result<String, IntentError> {
			Ok(self.0.to_string())
		}
	}

	#[tokio::test]
	async fn test_interpret_accepts_transfer_json() {
		let service = IntentService::new(Box::new(CannedCompletion(
			r#"{ "type": "transfer", "to": "0xabc", "amount": "0.1" }"#,
		)));
		let outcome = service.interpret("send 0.1 SUI to 0xabc").await.unwrap();
		match outcome {
			IntentOutcome::Transfer(intent) => {
				assert_eq!(intent.to.as_str(), "0xabc");
				assert_eq!(intent.amount, "0.1");
			},
			other => panic!("expected transfer outcome, got {:?}", other),
		}
	}

	#[tokio::test]
	async fn test_interpret_reports_incomplete_intent() {
		let service =
			IntentService::new(Box::new(CannedCompletion(r#"{ "error": "MISSING_FIELD" }"#)));
		let outcome = service.interpret("hello").await.unwrap();
		assert!(matches!(outcome, IntentOutcome::Incomplete));
	}

	#[tokio::test]
	async fn test_interpret_rejects_empty_completion() {
		let service = IntentService::new(Box::new(CannedCompletion("   ")));
		let result = service.interpret("send 1 SUI to 0xabc").await;
		assert!(matches!(result.unwrap_err(), IntentError::EmptyCompletion));
	}

	#[tokio::test]
	async fn test_interpret_rejects_prose() {
		let service = IntentService::new(Box::new(CannedCompletion(
			"Sure! Here is your JSON: { \"type\": \"transfer\" }",
		)));
		let result = service.interpret("send 1 SUI to 0xabc").await;
		assert!(matches!(
			result.unwrap_err(),
			IntentError::MalformedResponse(_)
		));
	}

	#[test]
	fn test_system_prompt_names_the_wire_fields() {
		// The prompt is the only instruction the provider gets; it must
		// spell out the exact field names the validator enforces.
		assert!(SYSTEM_PROMPT.contains("\"type\": \"transfer\""));
		assert!(SYSTEM_PROMPT.contains("type, to, amount"));
		assert!(SYSTEM_PROMPT.contains("MISSING_FIELD"));
	}
}
