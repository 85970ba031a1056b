//! The validated user intent produced by the intent pipeline.

use crate::account::SuiAddress;
use serde::{Deserialize, Serialize};

/// A validated transfer intent.
///
/// Constructed exactly once per user request from validated model output,
/// never mutated, and consumed exactly once by the transaction builder.
/// The amount stays a decimal string in SUI until the builder converts it
/// to MIST; keeping it textual preserves exactly what was validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferIntent {
	/// Recipient address for the transfer.
	pub to: SuiAddress,
	/// Human-denominated amount in SUI, e.g. "0.1".
	pub amount: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_intent_serializes_with_wire_field_names() {
		let intent = TransferIntent {
			to: SuiAddress::new("0xabc").unwrap(),
			amount: "0.1".to_string(),
		};
		let json = serde_json::to_value(&intent).unwrap();
		assert_eq!(json["to"], "0xabc");
		assert_eq!(json["amount"], "0.1");
	}
}
