//! Transaction delivery module for the sui-courier pipeline.
//!
//! This module handles the submission of built transaction plans to the
//! chain: sign-and-submit in one step, exactly one attempt per intent.
//! A failed submission is terminal for that invocation; there is no retry
//! and no idempotency key, so callers must not blindly resubmit.

use async_trait::async_trait;
use courier_account::AccountService;
use courier_types::{
	truncate_id, ConfigSchema, ExecutionReceipt, ImplementationRegistry, TransactionPlan,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Re-export implementations
pub mod implementations {
	pub mod sui_rpc;
}

/// Errors that can occur during transaction delivery operations.
#[derive(Debug, Error)]
pub enum DeliveryError {
	/// Network communication with the node failed.
	#[error("Network error: {0}")]
	Network(String),
	/// The chain rejected or failed the transaction.
	#[error("Execution failed: {0}")]
	Execution(String),
	/// The signer does not hold enough gas coins to fund the transfer.
	#[error("Insufficient balance: {0}")]
	InsufficientBalance(String),
	/// The transaction plan does not have the expected shape.
	#[error("Invalid transaction plan: {0}")]
	InvalidPlan(String),
	/// Signing through the account service failed.
	#[error("Signing failed: {0}")]
	Signing(String),
	/// The delivery configuration is invalid.
	#[error("Invalid delivery configuration: {0}")]
	InvalidConfig(String),
}

/// Trait defining the interface for transaction delivery implementations.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait DeliveryInterface: Send + Sync {
	/// Returns the configuration schema for this delivery implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Signs and submits a transaction plan in one step.
	///
	/// Returns the chain's execution receipt, or an error that propagates
	/// unchanged to the caller. Implementations make exactly one
	/// submission attempt.
	async fn sign_and_execute(
		&self,
		plan: &TransactionPlan,
	) -> Result<ExecutionReceipt, DeliveryError>;
}

/// Factory function type for delivery implementations.
///
/// Delivery owns no keys; it borrows signing capability from the shared
/// account service.
pub type DeliveryFactory =
	fn(&toml::Value, Arc<AccountService>) -> Result<Box<dyn DeliveryInterface>, DeliveryError>;

/// Registry trait for delivery implementations.
pub trait DeliveryRegistry: ImplementationRegistry<Factory = DeliveryFactory> {}

/// Get all registered delivery implementations.
pub fn get_all_implementations() -> Vec<(&'static str, DeliveryFactory)> {
	use implementations::sui_rpc;

	vec![(sui_rpc::Registry::NAME, sui_rpc::Registry::factory())]
}

/// Service that coordinates transaction execution.
///
/// Thin wrapper over the configured delivery implementation; the single
/// place the pipeline goes through to reach the chain.
pub struct DeliveryService {
	implementation: Box<dyn DeliveryInterface>,
}

impl DeliveryService {
	/// Creates a new DeliveryService with the specified implementation.
	pub fn new(implementation: Box<dyn DeliveryInterface>) -> Self {
		Self { implementation }
	}

	/// Submits the plan to the chain: one attempt, errors unchanged.
	pub async fn sign_and_execute(
		&self,
		plan: &TransactionPlan,
	) -> Result<ExecutionReceipt, DeliveryError> {
		let receipt = self.implementation.sign_and_execute(plan).await?;
		info!(digest = %truncate_id(&receipt.digest), "Transaction executed");
		Ok(receipt)
	}
}
