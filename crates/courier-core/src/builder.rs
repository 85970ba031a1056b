//! Pure construction of transfer transaction plans.
//!
//! No I/O happens here: a validated intent plus the sender address maps
//! to exactly two dependent commands. The split's output is what the
//! transfer consumes, so command order is load-bearing.

use courier_types::{
	to_atomic_units, AmountError, Command, CommandResult, CoinSource, SuiAddress, TransactionPlan,
	TransferIntent,
};

/// Builds the transaction plan for a transfer intent.
///
/// Command 0 splits exactly the converted MIST amount off the signer's
/// gas coin; command 1 transfers the resulting coin object to the
/// intent's destination.
///
/// # Errors
///
/// Propagates [`AmountError::InvalidAmount`] if the intent's amount does
/// not convert.
pub fn build_transfer(
	intent: &TransferIntent,
	sender: SuiAddress,
) -> Result<TransactionPlan, AmountError> {
	let amount = to_atomic_units(&intent.amount)?;

	Ok(TransactionPlan {
		sender,
		commands: vec![
			Command::SplitCoins {
				source: CoinSource::Gas,
				amount,
			},
			Command::TransferObjects {
				object: CommandResult(0),
				recipient: intent.to.clone(),
			},
		],
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn intent(amount: &str) -> TransferIntent {
		TransferIntent {
			to: SuiAddress::new("0xabc").unwrap(),
			amount: amount.to_string(),
		}
	}

	fn sender() -> SuiAddress {
		SuiAddress::new("0x1").unwrap()
	}

	#[test]
	fn test_build_produces_split_then_transfer() {
		let plan = build_transfer(&intent("0.1"), sender()).unwrap();

		assert_eq!(plan.sender.as_str(), "0x1");
		assert_eq!(plan.commands.len(), 2);
		assert_eq!(
			plan.commands[0],
			Command::SplitCoins {
				source: CoinSource::Gas,
				amount: 100_000_000,
			}
		);
		assert_eq!(
			plan.commands[1],
			Command::TransferObjects {
				object: CommandResult(0),
				recipient: SuiAddress::new("0xabc").unwrap(),
			}
		);
	}

	#[test]
	fn test_transfer_references_split_output() {
		let plan = build_transfer(&intent("1"), sender()).unwrap();
		let Command::TransferObjects { object, .. } = &plan.commands[1] else {
			panic!("second command must be a transfer");
		};
		// The handle must point at the split, not a raw quantity.
		assert_eq!(*object, CommandResult(0));
	}

	#[test]
	fn test_invalid_amount_aborts_building() {
		assert!(build_transfer(&intent("lots"), sender()).is_err());
		assert!(build_transfer(&intent("-1"), sender()).is_err());
	}

	#[test]
	fn test_zero_amount_passes_through() {
		let plan = build_transfer(&intent("0"), sender()).unwrap();
		assert_eq!(
			plan.commands[0],
			Command::SplitCoins {
				source: CoinSource::Gas,
				amount: 0,
			}
		);
	}
}
