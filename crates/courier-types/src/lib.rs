//! Common types module for the sui-courier intent pipeline.
//!
//! This module defines the core data types and structures shared across
//! the pipeline crates. It provides a centralized location for shared
//! types to ensure consistency across all components.

/// Address and signature types for the Sui chain.
pub mod account;
/// Exact conversion between human-denominated SUI amounts and MIST.
pub mod amount;
/// The validated user intent produced by the intent pipeline.
pub mod intent;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Secure string type for handling sensitive data.
pub mod secret_string;
/// Unsigned transaction plans and execution receipts.
pub mod transaction;
/// Small formatting helpers shared across crates.
pub mod utils;
/// Configuration validation types for ensuring type-safe configurations.
pub mod validation;

// Re-export all types for convenient access
pub use account::{AddressError, Signature, SuiAddress};
pub use amount::{to_atomic_units, AmountError, MIST_PER_SUI};
pub use intent::TransferIntent;
pub use registry::ImplementationRegistry;
pub use secret_string::SecretString;
pub use transaction::{Command, CommandResult, CoinSource, ExecutionReceipt, TransactionPlan};
pub use utils::truncate_id;
pub use validation::{ConfigSchema, Field, FieldType, Schema, ValidationError};
