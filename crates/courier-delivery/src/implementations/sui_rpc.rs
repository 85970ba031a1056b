//! Sui JSON-RPC delivery implementation.
//!
//! Maps a two-command transfer plan onto the node's transaction builder:
//! look up the sender's gas coins, assemble transaction bytes with
//! `unsafe_paySui` (which splits from gas and transfers in one call,
//! matching the plan's split + transfer shape), sign the bytes locally
//! through the account service, and submit with
//! `sui_executeTransactionBlock`, waiting for local execution.

use crate::{DeliveryError, DeliveryInterface};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use courier_account::AccountService;
use courier_types::{
	Command, CommandResult, CoinSource, ConfigSchema, ExecutionReceipt, Field, FieldType, Schema,
	SuiAddress, TransactionPlan,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Coin type of the native gas asset.
const SUI_COIN_TYPE: &str = "0x2::sui::SUI";
/// Default gas budget in MIST when none is configured.
const DEFAULT_GAS_BUDGET: u64 = 10_000_000;
/// Default network when neither `network` nor `rpc_url` is configured.
const DEFAULT_NETWORK: &str = "testnet";

/// Returns the public fullnode URL for a named network.
fn fullnode_url(network: &str) -> Option<&'static str> {
	match network {
		"mainnet" => Some("https://fullnode.mainnet.sui.io:443"),
		"testnet" => Some("https://fullnode.testnet.sui.io:443"),
		"devnet" => Some("https://fullnode.devnet.sui.io:443"),
		"localnet" => Some("http://127.0.0.1:9000"),
		_ => None,
	}
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
	jsonrpc: &'static str,
	id: u32,
	method: &'a str,
	params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
	result: Option<T>,
	error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
	code: i64,
	message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoinPage {
	data: Vec<CoinInfo>,
	has_next_page: bool,
	next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoinInfo {
	coin_object_id: String,
	balance: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionBytes {
	tx_bytes: String,
}

/// Delivery implementation speaking Sui JSON-RPC over HTTP.
pub struct SuiRpcDelivery {
	client: Client,
	rpc_url: String,
	gas_budget: u64,
	account: Arc<AccountService>,
}

impl SuiRpcDelivery {
	/// Creates a new delivery instance from configuration.
	pub fn new(config: &toml::Value, account: Arc<AccountService>) -> Result<Self, DeliveryError> {
		let schema = SuiRpcConfigSchema;
		schema
			.validate(config)
			.map_err(|e| DeliveryError::InvalidConfig(e.to_string()))?;

		let rpc_url = match config.get("rpc_url").and_then(|v| v.as_str()) {
			Some(url) => url.to_string(),
			None => {
				let network = config
					.get("network")
					.and_then(|v| v.as_str())
					.unwrap_or(DEFAULT_NETWORK);
				fullnode_url(network)
					.ok_or_else(|| {
						DeliveryError::InvalidConfig(format!("unknown network '{}'", network))
					})?
					.to_string()
			},
		};

		let gas_budget = config
			.get("gas_budget")
			.and_then(|v| v.as_integer())
			.unwrap_or(DEFAULT_GAS_BUDGET as i64) as u64;

		Ok(Self {
			client: Client::new(),
			rpc_url,
			gas_budget,
			account,
		})
	}

	async fn call<T: DeserializeOwned>(
		&self,
		method: &str,
		params: Value,
	) -> Result<T, DeliveryError> {
		let request = RpcRequest {
			jsonrpc: "2.0",
			id: 1,
			method,
			params,
		};

		let response = self
			.client
			.post(&self.rpc_url)
			.json(&request)
			.send()
			.await
			.map_err(|e| DeliveryError::Network(format!("{} request failed: {}", method, e)))?;

		let envelope: RpcResponse<T> = response
			.json()
			.await
			.map_err(|e| DeliveryError::Network(format!("{} invalid response: {}", method, e)))?;

		if let Some(error) = envelope.error {
			return Err(DeliveryError::Execution(format!(
				"{}: {} (code {})",
				method, error.message, error.code
			)));
		}
		envelope
			.result
			.ok_or_else(|| DeliveryError::Network(format!("{} response missing result", method)))
	}

	/// Picks gas coin object ids covering the transfer amount plus the
	/// gas budget. The coin listing is paginated, so the cursor is
	/// followed until the required total is covered or the listing is
	/// exhausted.
	async fn select_gas_coins(
		&self,
		sender: &SuiAddress,
		amount: u64,
	) -> Result<Vec<String>, DeliveryError> {
		let required = amount.saturating_add(self.gas_budget);
		let mut coins: Vec<(String, u64)> = Vec::new();
		let mut total: u64 = 0;
		let mut cursor: Option<String> = None;

		loop {
			let page: CoinPage = self
				.call(
					"suix_getCoins",
					json!([sender.as_str(), SUI_COIN_TYPE, &cursor]),
				)
				.await?;

			for entry in coin_entries(page.data)? {
				total = total.saturating_add(entry.1);
				coins.push(entry);
			}
			if total >= required || !page.has_next_page {
				break;
			}
			// A next page without a cursor would refetch the first page.
			cursor = match page.next_cursor {
				Some(next) => Some(next),
				None => break,
			};
		}

		select_coins_covering(coins, required)
	}
}

/// Parses the node's string balances, rejecting any coin whose balance
/// is not a valid u64 rather than treating it as empty.
fn coin_entries(coins: Vec<CoinInfo>) -> Result<Vec<(String, u64)>, DeliveryError> {
	coins
		.into_iter()
		.map(|coin| {
			let balance = coin.balance.parse::<u64>().map_err(|e| {
				DeliveryError::Network(format!(
					"coin {} reported unparseable balance '{}': {}",
					coin.coin_object_id, coin.balance, e
				))
			})?;
			Ok((coin.coin_object_id, balance))
		})
		.collect()
}

/// Greedy coin selection: take coins in listed order until the required
/// total is covered.
fn select_coins_covering(
	coins: Vec<(String, u64)>,
	required: u64,
) -> Result<Vec<String>, DeliveryError> {
	let mut selected = Vec::new();
	let mut total: u64 = 0;

	for (id, balance) in coins {
		selected.push(id);
		total = total.saturating_add(balance);
		if total >= required {
			return Ok(selected);
		}
	}

	Err(DeliveryError::InsufficientBalance(format!(
		"need {} MIST (amount + gas budget), found {}",
		required, total
	)))
}

/// Decomposes a plan into its transfer parts, enforcing the expected
/// split-then-transfer shape and the data dependency between the two.
fn transfer_parts(plan: &TransactionPlan) -> Result<(u64, &SuiAddress), DeliveryError> {
	match plan.commands.as_slice() {
		[Command::SplitCoins {
			source: CoinSource::Gas,
			amount,
		}, Command::TransferObjects {
			object: CommandResult(0),
			recipient,
		}] => Ok((*amount, recipient)),
		_ => Err(DeliveryError::InvalidPlan(
			"expected a gas split followed by a transfer of its result".to_string(),
		)),
	}
}

/// Configuration schema for the Sui RPC delivery.
pub struct SuiRpcConfigSchema;

impl ConfigSchema for SuiRpcConfigSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), courier_types::ValidationError> {
		let schema = Schema::new(
			vec![],
			vec![
				Field::new("network", FieldType::String).with_validator(|value| {
					match value.as_str() {
						Some(network) if fullnode_url(network).is_some() => Ok(()),
						Some(network) => Err(format!(
							"unknown network '{}', expected mainnet/testnet/devnet/localnet",
							network
						)),
						None => Err("Expected string value for network".to_string()),
					}
				}),
				Field::new("rpc_url", FieldType::String).with_validator(|value| {
					match value.as_str() {
						Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
							Ok(())
						},
						Some(_) => Err("rpc_url must be an http(s) URL".to_string()),
						None => Err("Expected string value for rpc_url".to_string()),
					}
				}),
				Field::new(
					"gas_budget",
					FieldType::Integer {
						min: Some(1),
						max: None,
					},
				),
			],
		);
		schema.validate(config)
	}
}

#[async_trait]
impl DeliveryInterface for SuiRpcDelivery {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(SuiRpcConfigSchema)
	}

	async fn sign_and_execute(
		&self,
		plan: &TransactionPlan,
	) -> Result<ExecutionReceipt, DeliveryError> {
		let (amount, recipient) = transfer_parts(plan)?;

		let coins = self.select_gas_coins(&plan.sender, amount).await?;
		debug!(coins = coins.len(), amount, "Assembling pay transaction");

		// The node's transaction builder performs the split + transfer
		// described by the plan and returns BCS bytes to sign.
		let tx: TransactionBytes = self
			.call(
				"unsafe_paySui",
				json!([
					plan.sender.as_str(),
					coins,
					[recipient.as_str()],
					[amount.to_string()],
					self.gas_budget.to_string(),
				]),
			)
			.await?;

		let raw_bytes = BASE64
			.decode(&tx.tx_bytes)
			.map_err(|e| DeliveryError::Execution(format!("invalid tx bytes from node: {}", e)))?;

		let signature = self
			.account
			.sign_tx_bytes(&raw_bytes)
			.await
			.map_err(|e| DeliveryError::Signing(e.to_string()))?;

		let result: Value = self
			.call(
				"sui_executeTransactionBlock",
				json!([
					tx.tx_bytes,
					[signature.as_str()],
					{ "showEffects": true },
					"WaitForLocalExecution",
				]),
			)
			.await?;

		let digest = result
			.get("digest")
			.and_then(|d| d.as_str())
			.ok_or_else(|| {
				DeliveryError::Execution("execution response missing digest".to_string())
			})?
			.to_string();

		// An on-chain abort still comes back as an RPC success; surface
		// it as an execution failure rather than a success receipt.
		if let Some("failure") = result
			.pointer("/effects/status/status")
			.and_then(|s| s.as_str())
		{
			let reason = result
				.pointer("/effects/status/error")
				.and_then(|e| e.as_str())
				.unwrap_or("unknown on-chain failure");
			return Err(DeliveryError::Execution(format!(
				"transaction {} failed: {}",
				digest, reason
			)));
		}

		Ok(ExecutionReceipt {
			digest,
			raw: result,
		})
	}
}

/// Factory function to create a Sui RPC delivery from configuration.
pub fn create_delivery(
	config: &toml::Value,
	account: Arc<AccountService>,
) -> Result<Box<dyn DeliveryInterface>, DeliveryError> {
	Ok(Box::new(SuiRpcDelivery::new(config, account)?))
}

/// Registry for the Sui RPC delivery implementation.
pub struct Registry;

impl courier_types::ImplementationRegistry for Registry {
	const NAME: &'static str = "sui";
	type Factory = crate::DeliveryFactory;

	fn factory() -> Self::Factory {
		create_delivery
	}
}

impl crate::DeliveryRegistry for Registry {}
