//! Configuration validation utilities.
//!
//! A small framework for validating the TOML configuration tables handed
//! to implementation factories. Supports required/optional fields, type
//! checking, and custom per-field validators with detailed errors.

use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Debug, Error)]
pub enum ValidationError {
	/// A required field is missing.
	#[error("Missing required field: {0}")]
	MissingField(String),
	/// A field has an invalid value.
	#[error("Invalid value for field '{field}': {message}")]
	InvalidValue { field: String, message: String },
	/// A field has the wrong type.
	#[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
	TypeMismatch {
		field: String,
		expected: String,
		actual: String,
	},
}

/// The type a configuration field must have.
#[derive(Debug)]
pub enum FieldType {
	/// A string value.
	String,
	/// An integer value with optional inclusive bounds.
	Integer {
		min: Option<i64>,
		max: Option<i64>,
	},
	/// A boolean value.
	Boolean,
}

/// Custom validator run after type checking; returns an error message on
/// failure.
pub type FieldValidator = Box<dyn Fn(&toml::Value) -> Result<(), String> + Send + Sync>;

/// A named field in a configuration schema.
pub struct Field {
	pub name: String,
	pub field_type: FieldType,
	pub validator: Option<FieldValidator>,
}

impl std::fmt::Debug for Field {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Field")
			.field("name", &self.name)
			.field("field_type", &self.field_type)
			.field("validator", &self.validator.is_some())
			.finish()
	}
}

impl Field {
	/// Creates a new field with the given name and type.
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			validator: None,
		}
	}

	/// Adds a custom validator to this field.
	pub fn with_validator<F>(mut self, validator: F) -> Self
	where
		F: Fn(&toml::Value) -> Result<(), String> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(validator));
		self
	}
}

/// A validation schema: required fields that must be present plus optional
/// fields that are type-checked when present.
#[derive(Debug)]
pub struct Schema {
	pub required: Vec<Field>,
	pub optional: Vec<Field>,
}

impl Schema {
	/// Creates a new schema with required and optional fields.
	pub fn new(required: Vec<Field>, optional: Vec<Field>) -> Self {
		Self { required, optional }
	}

	/// Validates a TOML value against this schema.
	///
	/// Checks required-field presence, field types, and any custom
	/// validators. Unknown extra fields are ignored.
	pub fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let table = config
			.as_table()
			.ok_or_else(|| ValidationError::TypeMismatch {
				field: "root".to_string(),
				expected: "table".to_string(),
				actual: config.type_str().to_string(),
			})?;

		for field in &self.required {
			let value = table
				.get(&field.name)
				.ok_or_else(|| ValidationError::MissingField(field.name.clone()))?;
			validate_field(field, value)?;
		}

		for field in &self.optional {
			if let Some(value) = table.get(&field.name) {
				validate_field(field, value)?;
			}
		}

		Ok(())
	}
}

fn validate_field(field: &Field, value: &toml::Value) -> Result<(), ValidationError> {
	validate_field_type(&field.name, value, &field.field_type)?;

	if let Some(validator) = &field.validator {
		validator(value).map_err(|msg| ValidationError::InvalidValue {
			field: field.name.clone(),
			message: msg,
		})?;
	}

	Ok(())
}

fn validate_field_type(
	field_name: &str,
	value: &toml::Value,
	expected_type: &FieldType,
) -> Result<(), ValidationError> {
	let mismatch = |expected: &str| ValidationError::TypeMismatch {
		field: field_name.to_string(),
		expected: expected.to_string(),
		actual: value.type_str().to_string(),
	};

	match expected_type {
		FieldType::String => {
			if !value.is_str() {
				return Err(mismatch("string"));
			}
		},
		FieldType::Integer { min, max } => {
			let int_val = value.as_integer().ok_or_else(|| mismatch("integer"))?;

			if let Some(min_val) = min {
				if int_val < *min_val {
					return Err(ValidationError::InvalidValue {
						field: field_name.to_string(),
						message: format!("Value {} is less than minimum {}", int_val, min_val),
					});
				}
			}

			if let Some(max_val) = max {
				if int_val > *max_val {
					return Err(ValidationError::InvalidValue {
						field: field_name.to_string(),
						message: format!("Value {} is greater than maximum {}", int_val, max_val),
					});
				}
			}
		},
		FieldType::Boolean => {
			if !value.is_bool() {
				return Err(mismatch("boolean"));
			}
		},
	}

	Ok(())
}

/// Trait implemented by each pluggable implementation to describe and
/// validate its own configuration section.
pub trait ConfigSchema: Send + Sync {
	/// Validates the given TOML configuration against this schema.
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	fn table(pairs: &[(&str, toml::Value)]) -> toml::Value {
		toml::Value::Table(
			pairs
				.iter()
				.map(|(k, v)| (k.to_string(), v.clone()))
				.collect(),
		)
	}

	#[test]
	fn test_required_field_missing() {
		let schema = Schema::new(vec![Field::new("model", FieldType::String)], vec![]);
		let result = schema.validate(&table(&[]));
		assert!(matches!(
			result.unwrap_err(),
			ValidationError::MissingField(name) if name == "model"
		));
	}

	#[test]
	fn test_type_mismatch_reported() {
		let schema = Schema::new(vec![Field::new("model", FieldType::String)], vec![]);
		let result = schema.validate(&table(&[("model", toml::Value::Integer(3))]));
		assert!(matches!(
			result.unwrap_err(),
			ValidationError::TypeMismatch { field, .. } if field == "model"
		));
	}

	#[test]
	fn test_integer_bounds_enforced() {
		let schema = Schema::new(
			vec![Field::new(
				"gas_budget",
				FieldType::Integer {
					min: Some(1),
					max: None,
				},
			)],
			vec![],
		);
		assert!(schema
			.validate(&table(&[("gas_budget", toml::Value::Integer(0))]))
			.is_err());
		assert!(schema
			.validate(&table(&[("gas_budget", toml::Value::Integer(5))]))
			.is_ok());
	}

	#[test]
	fn test_custom_validator_runs() {
		let schema = Schema::new(
			vec![
				Field::new("url", FieldType::String).with_validator(|v| match v.as_str() {
					Some(s) if s.starts_with("https://") => Ok(()),
					_ => Err("must be an https URL".to_string()),
				}),
			],
			vec![],
		);
		let result = schema.validate(&table(&[(
			"url",
			toml::Value::String("http://example.com".to_string()),
		)]));
		assert!(matches!(
			result.unwrap_err(),
			ValidationError::InvalidValue { field, .. } if field == "url"
		));
	}

	#[test]
	fn test_unknown_fields_ignored() {
		let schema = Schema::new(vec![], vec![Field::new("model", FieldType::String)]);
		let result = schema.validate(&table(&[("extra", toml::Value::Boolean(true))]));
		assert!(result.is_ok());
	}
}
