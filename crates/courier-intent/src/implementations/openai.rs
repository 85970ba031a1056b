//! OpenAI-compatible completion provider.
//!
//! Issues one chat-completions request per intent with temperature pinned
//! to zero so extraction stays as reproducible as the provider allows.
//! The API key is read from configuration or the `OPENAI_API_KEY`
//! environment variable; it never appears in log output.

use crate::{CompletionInterface, IntentError};
use async_trait::async_trait;
use courier_types::{ConfigSchema, Field, FieldType, Schema, SecretString};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4.1-mini";
const DEFAULT_MAX_TOKENS: u32 = 256;
/// Determinism knob: minimal randomness for reproducible extraction.
/// Advisory only; the validator is what actually enforces the contract.
const TEMPERATURE: f64 = 0.0;

/// Environment variable consulted when no api_key is configured.
const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
	model: &'a str,
	messages: Vec<ChatMessage<'a>>,
	temperature: f64,
	max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
	role: &'a str,
	content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
	choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
	message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
	content: Option<String>,
}

/// Completion provider speaking the OpenAI chat-completions protocol.
pub struct OpenAiCompletion {
	client: Client,
	api_key: SecretString,
	model: String,
	base_url: String,
	max_tokens: u32,
}

impl OpenAiCompletion {
	/// Creates a new provider instance from configuration.
	pub fn new(config: &toml::Value) -> Result<Self, IntentError> {
		let schema = OpenAiConfigSchema;
		schema
			.validate(config)
			.map_err(|e| IntentError::InvalidConfig(e.to_string()))?;

		let api_key = config
			.get("api_key")
			.and_then(|v| v.as_str())
			.map(SecretString::from)
			.or_else(|| std::env::var(API_KEY_ENV).ok().map(SecretString::from))
			.ok_or_else(|| {
				IntentError::InvalidConfig(format!(
					"no api_key configured and {} is not set",
					API_KEY_ENV
				))
			})?;

		let model = config
			.get("model")
			.and_then(|v| v.as_str())
			.unwrap_or(DEFAULT_MODEL)
			.to_string();

		let base_url = config
			.get("base_url")
			.and_then(|v| v.as_str())
			.unwrap_or(DEFAULT_BASE_URL)
			.trim_end_matches('/')
			.to_string();

		let max_tokens = config
			.get("max_tokens")
			.and_then(|v| v.as_integer())
			.unwrap_or(DEFAULT_MAX_TOKENS as i64) as u32;

		Ok(Self {
			client: Client::new(),
			api_key,
			model,
			base_url,
			max_tokens,
		})
	}
}

/// Configuration schema for the OpenAI provider.
pub struct OpenAiConfigSchema;

impl ConfigSchema for OpenAiConfigSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), courier_types::ValidationError> {
		let schema = Schema::new(
			vec![],
			vec![
				Field::new("api_key", FieldType::String),
				Field::new("model", FieldType::String),
				Field::new("base_url", FieldType::String).with_validator(|value| {
					match value.as_str() {
						Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
							Ok(())
						},
						Some(_) => Err("base_url must be an http(s) URL".to_string()),
						None => Err("Expected string value for base_url".to_string()),
					}
				}),
				Field::new(
					"max_tokens",
					FieldType::Integer {
						min: Some(1),
						max: Some(32_768),
					},
				),
			],
		);
		schema.validate(config)
	}
}

#[async_trait]
impl CompletionInterface for OpenAiCompletion {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(OpenAiConfigSchema)
	}

	async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, IntentError> {
		let request = ChatRequest {
			model: &self.model,
			messages: vec![
				ChatMessage {
					role: "system",
					content: system_prompt,
				},
				ChatMessage {
					role: "user",
					content: user_text,
				},
			],
			temperature: TEMPERATURE,
			max_tokens: self.max_tokens,
		};

		let response = self
			.client
			.post(format!("{}/chat/completions", self.base_url))
			.bearer_auth(self.api_key.with_exposed(|key| key.to_string()))
			.json(&request)
			.send()
			.await
			.map_err(|e| IntentError::Provider(format!("request failed: {}", e)))?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			let brief: String = body.trim().chars().take(200).collect();
			return Err(IntentError::Provider(format!(
				"provider returned HTTP {}: {}",
				status, brief
			)));
		}

		let completion: ChatResponse = response
			.json()
			.await
			.map_err(|e| IntentError::Provider(format!("invalid provider envelope: {}", e)))?;

		completion
			.choices
			.into_iter()
			.next()
			.and_then(|choice| choice.message.content)
			.ok_or(IntentError::EmptyCompletion)
	}
}

/// Factory function to create an OpenAI provider from configuration.
pub fn create_provider(
	config: &toml::Value,
) -> Result<Box<dyn CompletionInterface>, IntentError> {
	Ok(Box::new(OpenAiCompletion::new(config)?))
}

/// Registry for the OpenAI completion implementation.
pub struct Registry;

impl courier_types::ImplementationRegistry for Registry {
	const NAME: &'static str = "openai";
	type Factory = crate::CompletionFactory;

	fn factory() -> Self::Factory {
		create_provider
	}
}

impl crate::CompletionRegistry for Registry {}
