//! Unsigned transaction plans and execution receipts.
//!
//! A [`TransactionPlan`] is the pipeline's unsigned transaction: an ordered
//! list of dependent commands in the style of a Sui programmable transaction
//! block. The plan is a pure description; mapping it onto concrete RPC calls
//! is the delivery layer's job.

use crate::account::SuiAddress;
use serde::{Deserialize, Serialize};

/// Source coin for a split command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoinSource {
	/// The signer's gas coin.
	Gas,
}

/// Handle to the output of an earlier command in the same plan.
///
/// The index refers to the producing command's position in the plan's
/// command list; consuming commands must come after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult(pub u16);

/// A single command in a transaction plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
	/// Split a new coin of exactly `amount` MIST off the source coin.
	SplitCoins {
		source: CoinSource,
		amount: u64,
	},
	/// Transfer the object produced by an earlier command to `recipient`.
	TransferObjects {
		object: CommandResult,
		recipient: SuiAddress,
	},
}

/// An unsigned transaction: the sender plus an ordered command list.
///
/// Ownership passes to the delivery layer at submission and the plan is
/// discarded afterwards regardless of outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPlan {
	/// Address whose gas coin funds and pays for the transaction.
	pub sender: SuiAddress,
	/// Commands executed in order; later commands may reference earlier
	/// results through [`CommandResult`].
	pub commands: Vec<Command>,
}

/// Opaque execution evidence returned by the chain.
///
/// The pipeline reports the digest and passes the raw response through
/// without interpreting it further.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReceipt {
	/// Transaction digest assigned by the chain.
	pub digest: String,
	/// Full node response, untouched.
	pub raw: serde_json::Value,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_command_serializes_tagged() {
		let command = Command::SplitCoins {
			source: CoinSource::Gas,
			amount: 100_000_000,
		};
		let json = serde_json::to_value(&command).unwrap();
		assert_eq!(json["command"], "split_coins");
		assert_eq!(json["source"], "gas");
		assert_eq!(json["amount"], 100_000_000);
	}

	#[test]
	fn test_plan_round_trips_through_serde() {
		let plan = TransactionPlan {
			sender: SuiAddress::new("0x1").unwrap(),
			commands: vec![
				Command::SplitCoins {
					source: CoinSource::Gas,
					amount: 42,
				},
				Command::TransferObjects {
					object: CommandResult(0),
					recipient: SuiAddress::new("0xabc").unwrap(),
				},
			],
		};
		let json = serde_json::to_string(&plan).unwrap();
		let back: TransactionPlan = serde_json::from_str(&json).unwrap();
		assert_eq!(back, plan);
	}
}
