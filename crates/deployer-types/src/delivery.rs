//! Deployment result types.

use alloy::primitives::{Address, B256};
use serde::Serialize;

/// A mined contract creation. Reverted deployments are errors, never receipts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentReceipt {
	/// Address of the instantiated contract.
	pub contract_address: Address,
	pub transaction_hash: B256,
	pub block_number: u64,
}
