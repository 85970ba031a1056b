//! The pipeline context and per-request orchestration.
//!
//! A [`Pipeline`] is an explicit context object built once from
//! configuration and shared read-only across invocations; nothing here
//! is process-global, so tests run pipelines with distinct collaborators
//! side by side.

use crate::builder;
use courier_delivery::{DeliveryError, DeliveryService};
use courier_intent::{IntentError, IntentOutcome, IntentService};
use courier_types::{AmountError, ExecutionReceipt, SuiAddress, TransferIntent};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors surfaced by a pipeline run, one variant per failing stage.
#[derive(Debug, Error)]
pub enum PipelineError {
	/// Intent parsing or validation failed.
	#[error(transparent)]
	Intent(#[from] IntentError),
	/// The intent's amount did not convert to MIST.
	#[error(transparent)]
	Amount(#[from] AmountError),
	/// Submission to the chain failed.
	#[error(transparent)]
	Delivery(#[from] DeliveryError),
}

/// Terminal outcome of one pipeline run.
#[derive(Debug)]
pub enum PipelineOutcome {
	/// The transfer was built, signed, and submitted.
	Executed {
		intent: TransferIntent,
		receipt: ExecutionReceipt,
	},
	/// The provider could not extract a complete intent; ask the user
	/// for more information. Nothing was submitted.
	Incomplete,
}

/// The intent pipeline: parse, validate, build, execute.
///
/// Strictly sequential; each stage completes or fails before the next
/// begins, and a failed submission is terminal for the invocation.
pub struct Pipeline {
	intent: Arc<IntentService>,
	delivery: Arc<DeliveryService>,
	sender: SuiAddress,
}

impl std::fmt::Debug for Pipeline {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Pipeline")
			.field("sender", &self.sender)
			.finish_non_exhaustive()
	}
}

impl Pipeline {
	/// Creates a pipeline over the given services and signer address.
	pub fn new(
		intent: Arc<IntentService>,
		delivery: Arc<DeliveryService>,
		sender: SuiAddress,
	) -> Self {
		Self {
			intent,
			delivery,
			sender,
		}
	}

	/// Runs the full pipeline for one line of user text.
	pub async fn handle(&self, user_text: &str) -> Result<PipelineOutcome, PipelineError> {
		let intent = match self.intent.interpret(user_text).await? {
			IntentOutcome::Transfer(intent) => intent,
			IntentOutcome::Incomplete => return Ok(PipelineOutcome::Incomplete),
		};

		info!(to = %intent.to, amount = %intent.amount, "Parsed transfer intent");

		let plan = builder::build_transfer(&intent, self.sender.clone())?;
		let receipt = self.delivery.sign_and_execute(&plan).await?;

		Ok(PipelineOutcome::Executed { intent, receipt })
	}
}
