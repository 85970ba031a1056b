//! Schema validation of raw provider output.
//!
//! The provider's JSON is treated as an untyped value until this step
//! tags it: a well-formed transfer, the provider's own missing-field
//! declaration, or a violation. Extra keys are ignored; required keys and
//! the literal `type` discriminator are strict.

use crate::IntentError;
use courier_types::{SuiAddress, TransferIntent};
use serde_json::Value;

/// Marker value the provider emits when it cannot extract a complete
/// intent from the input text.
const MISSING_FIELD_MARKER: &str = "MISSING_FIELD";

/// Tagged result of schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
	/// A well-typed transfer intent, ready for the transaction builder.
	Transfer(TransferIntent),
	/// The provider declared it could not extract a complete intent.
	/// Callers should ask the user for more information; this is a
	/// terminal outcome, not a bug.
	Incomplete,
}

/// Parses raw provider text and validates it against the intent schema.
///
/// # Errors
///
/// - [`IntentError::MalformedResponse`] if the text is not valid JSON.
/// - [`IntentError::SchemaViolation`] if the JSON does not match the
///   intent shape, naming the offending field(s).
pub fn validate_intent(raw: &str) -> Result<IntentOutcome, IntentError> {
	let value: Value = serde_json::from_str(raw)
		.map_err(|e| IntentError::MalformedResponse(e.to_string()))?;
	validate_value(&value)
}

/// Validates an already-parsed JSON value against the intent schema.
pub fn validate_value(value: &Value) -> Result<IntentOutcome, IntentError> {
	let object = value.as_object().ok_or_else(|| {
		IntentError::SchemaViolation(format!("expected a JSON object, got {}", json_kind(value)))
	})?;

	// The escape shape takes priority over field checks: it is the
	// provider's declared outcome, not a malformed intent. An `error`
	// key with any other value is not the escape; it falls through to
	// field validation and is ignored like any other extra key.
	if object.get("error").and_then(Value::as_str) == Some(MISSING_FIELD_MARKER) {
		return Ok(IntentOutcome::Incomplete);
	}

	let mut violations = Vec::new();

	match object.get("type").map(|v| v.as_str()) {
		Some(Some("transfer")) => {},
		Some(Some(other)) => violations.push(format!(
			"field 'type' must be \"transfer\", got \"{}\"",
			other
		)),
		Some(None) => violations.push("field 'type' must be a string".to_string()),
		None => violations.push("missing field 'type'".to_string()),
	}

	let to = match object.get("to").map(|v| v.as_str()) {
		Some(Some(to)) => match SuiAddress::new(to) {
			Ok(address) => Some(address),
			Err(e) => {
				violations.push(format!("field 'to': {}", e));
				None
			},
		},
		Some(None) => {
			violations.push("field 'to' must be a string".to_string());
			None
		},
		None => {
			violations.push("missing field 'to'".to_string());
			None
		},
	};

	let amount = match object.get("amount").map(|v| v.as_str()) {
		Some(Some(amount)) => Some(amount.to_string()),
		Some(None) => {
			violations.push("field 'amount' must be a string".to_string());
			None
		},
		None => {
			violations.push("missing field 'amount'".to_string());
			None
		},
	};

	if !violations.is_empty() {
		return Err(IntentError::SchemaViolation(violations.join("; ")));
	}

	// Both are Some here: violations would be non-empty otherwise.
	match (to, amount) {
		(Some(to), Some(amount)) => Ok(IntentOutcome::Transfer(TransferIntent { to, amount })),
		_ => Err(IntentError::SchemaViolation(
			"incomplete intent fields".to_string(),
		)),
	}
}

fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn violation_message(raw: &str) -> String {
		match validate_intent(raw).unwrap_err() {
			IntentError::SchemaViolation(msg) => msg,
			other => panic!("expected schema violation, got {:?}", other),
		}
	}

	#[test]
	fn test_valid_transfer_accepted() {
		let outcome =
			validate_intent(r#"{ "type": "transfer", "to": "0xabc", "amount": "0.1" }"#).unwrap();
		match outcome {
			IntentOutcome::Transfer(intent) => {
				assert_eq!(intent.to.as_str(), "0xabc");
				assert_eq!(intent.amount, "0.1");
			},
			other => panic!("expected transfer, got {:?}", other),
		}
	}

	#[test]
	fn test_unknown_extra_keys_ignored() {
		let outcome = validate_intent(
			r#"{ "type": "transfer", "to": "0xabc", "amount": "1", "note": "gift" }"#,
		)
		.unwrap();
		assert!(matches!(outcome, IntentOutcome::Transfer(_)));
	}

	#[test]
	fn test_missing_field_marker_is_incomplete() {
		let outcome = validate_intent(r#"{ "error": "MISSING_FIELD" }"#).unwrap();
		assert_eq!(outcome, IntentOutcome::Incomplete);
	}

	#[test]
	fn test_extra_error_key_on_complete_intent_ignored() {
		let outcome = validate_intent(
			r#"{ "type": "transfer", "to": "0xabc", "amount": "1", "error": "note" }"#,
		)
		.unwrap();
		assert!(matches!(outcome, IntentOutcome::Transfer(_)));
	}

	#[test]
	fn test_unknown_error_marker_is_violation_not_incomplete() {
		// Only the MISSING_FIELD value is the escape; anything else is
		// an extra key, so the bare object fails on its missing fields.
		let msg = violation_message(r#"{ "error": "SOMETHING_ELSE" }"#);
		assert!(msg.contains("missing field 'type'"));
		assert!(msg.contains("missing field 'to'"));
		assert!(msg.contains("missing field 'amount'"));
	}

	#[test]
	fn test_missing_required_fields_all_named() {
		let msg = violation_message(r#"{ "type": "transfer" }"#);
		assert!(msg.contains("missing field 'to'"));
		assert!(msg.contains("missing field 'amount'"));
	}

	#[test]
	fn test_wrong_type_discriminator_rejected() {
		let msg = violation_message(r#"{ "type": "stake", "to": "0xabc", "amount": "1" }"#);
		assert!(msg.contains("\"transfer\""));
	}

	#[test]
	fn test_destination_without_prefix_rejected() {
		let msg = violation_message(r#"{ "type": "transfer", "to": "abc", "amount": "1" }"#);
		assert!(msg.contains("field 'to'"));
	}

	#[test]
	fn test_numeric_amount_rejected() {
		// The wire contract requires the amount as a string.
		let msg = violation_message(r#"{ "type": "transfer", "to": "0xabc", "amount": 0.1 }"#);
		assert!(msg.contains("field 'amount'"));
	}

	#[test]
	fn test_non_object_rejected() {
		let msg = violation_message(r#"["transfer", "0xabc", "0.1"]"#);
		assert!(msg.contains("expected a JSON object"));
	}

	#[test]
	fn test_non_json_is_malformed_not_violation() {
		let result = validate_intent("send it!");
		assert!(matches!(
			result.unwrap_err(),
			IntentError::MalformedResponse(_)
		));
	}
}
