//! Alloy-based EVM deployment.
//!
//! Sends a contract-creation transaction through an HTTP provider that signs
//! with a local private key, then waits for the receipt.

use crate::{ContractArtifact, DeliveryError, DeploymentInterface};
use alloy::{
	network::{EthereumWallet, TransactionBuilder},
	providers::{DynProvider, Provider, ProviderBuilder},
	rpc::types::TransactionRequest,
	signers::{local::PrivateKeySigner, Signer},
	transports::http::reqwest::Url,
};
use async_trait::async_trait;
use deployer_types::{ConstructorArgs, DeploymentReceipt};

/// Utility function to truncate a transaction hash for display.
fn truncate_hash(hash: &[u8]) -> String {
	let hash_str = hex::encode(hash);
	if hash_str.len() <= 8 {
		hash_str
	} else {
		format!("{}..", &hash_str[..8])
	}
}

/// Deploys through a JSON-RPC endpoint with a local signer.
pub struct AlloyDeployer {
	provider: DynProvider,
	chain_id: u64,
	confirmations: u64,
}

impl AlloyDeployer {
	/// Builds the provider. No request is made until [`deploy`](DeploymentInterface::deploy).
	pub fn new(
		rpc_url: &str,
		chain_id: u64,
		signer: PrivateKeySigner,
		confirmations: u64,
	) -> Result<Self, DeliveryError> {
		let url: Url = rpc_url
			.parse()
			.map_err(|e| DeliveryError::Config(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;

		let signer = signer.with_chain_id(Some(chain_id));
		tracing::debug!(deployer = %signer.address(), chain_id, "Using local signer");

		let wallet = EthereumWallet::from(signer);
		let provider = ProviderBuilder::new()
			.wallet(wallet)
			.connect_http(url)
			.erased();

		Ok(Self {
			provider,
			chain_id,
			confirmations,
		})
	}

	pub fn chain_id(&self) -> u64 {
		self.chain_id
	}

	pub fn confirmations(&self) -> u64 {
		self.confirmations
	}
}

#[async_trait]
impl DeploymentInterface for AlloyDeployer {
	async fn deploy(
		&self,
		artifact: &ContractArtifact,
		args: &ConstructorArgs,
	) -> Result<DeploymentReceipt, DeliveryError> {
		// Refuse to broadcast to a network other than the one the arguments
		// were resolved for
		let remote_chain_id = self
			.provider
			.get_chain_id()
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get chain id: {}", e)))?;
		if remote_chain_id != self.chain_id {
			return Err(DeliveryError::Config(format!(
				"RPC endpoint serves chain {} but the profile expects chain {}",
				remote_chain_id, self.chain_id
			)));
		}

		let request = TransactionRequest::default().with_deploy_code(artifact.creation_code(args));

		let pending_tx =
			self.provider.send_transaction(request).await.map_err(|e| {
				DeliveryError::Network(format!("Failed to send transaction: {}", e))
			})?;

		let tx_hash = *pending_tx.tx_hash();
		tracing::info!(
			tx_hash = %truncate_hash(tx_hash.as_slice()),
			"Submitted deployment, waiting for {} confirmations",
			self.confirmations
		);

		let receipt = pending_tx
			.with_required_confirmations(self.confirmations)
			.get_receipt()
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get receipt: {}", e)))?;

		if !receipt.status() {
			return Err(DeliveryError::Reverted(format!(
				"transaction {} failed in block {}",
				receipt.transaction_hash,
				receipt.block_number.unwrap_or(0)
			)));
		}

		let contract_address = receipt.contract_address.ok_or_else(|| {
			DeliveryError::Network(format!(
				"Receipt for {} has no contract address",
				receipt.transaction_hash
			))
		})?;

		Ok(DeploymentReceipt {
			contract_address,
			transaction_hash: receipt.transaction_hash,
			block_number: receipt.block_number.unwrap_or(0),
		})
	}
}

/// Creates an [`AlloyDeployer`] from a hex private key and endpoint.
pub fn create_http_deployer(
	rpc_url: &str,
	chain_id: u64,
	private_key: &str,
	confirmations: u64,
) -> Result<Box<dyn DeploymentInterface>, DeliveryError> {
	let signer: PrivateKeySigner = private_key
		.parse()
		.map_err(|e| DeliveryError::Config(format!("Invalid private key: {}", e)))?;

	Ok(Box::new(AlloyDeployer::new(
		rpc_url,
		chain_id,
		signer,
		confirmations,
	)?))
}

#[cfg(test)]
mod tests {
	use super::*;

	// Well-known anvil development key
	const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	#[test]
	fn test_truncate_hash() {
		assert_eq!(truncate_hash(&[0xab; 32]), "abababab..");
		assert_eq!(truncate_hash(&[0x01, 0x02]), "0102");
	}

	#[test]
	fn test_construction_is_offline() {
		let signer: PrivateKeySigner = DEV_KEY.parse().unwrap();
		let deployer = AlloyDeployer::new("http://127.0.0.1:8545", 84532, signer, 2).unwrap();
		assert_eq!(deployer.chain_id(), 84532);
		assert_eq!(deployer.confirmations(), 2);
	}

	#[test]
	fn test_invalid_inputs() {
		let signer: PrivateKeySigner = DEV_KEY.parse().unwrap();
		assert!(matches!(
			AlloyDeployer::new("not a url", 1, signer, 1),
			Err(DeliveryError::Config(_))
		));

		assert!(matches!(
			create_http_deployer("http://127.0.0.1:8545", 1, "0x1234", 1),
			Err(DeliveryError::Config(_))
		));
		assert!(create_http_deployer("http://127.0.0.1:8545", 1, DEV_KEY, 1).is_ok());
	}
}
