//! Contract deployment for the oracle request deployer.
//!
//! The [`DeploymentInterface`] trait is the boundary to the broadcast layer:
//! given an artifact and ordered constructor arguments it deploys the
//! contract and reports where it landed. Failures are passed through to
//! the caller without retries.

use async_trait::async_trait;
use deployer_types::{ConstructorArgs, DeployError, DeploymentReceipt};
use thiserror::Error;
use tracing::{error, info};

pub mod artifact;
pub mod implementations;

pub use artifact::ContractArtifact;

#[derive(Debug, Error)]
pub enum DeliveryError {
	#[error("Network error: {0}")]
	Network(String),
	#[error("Deployment reverted: {0}")]
	Reverted(String),
	#[error("Artifact error: {0}")]
	Artifact(String),
	#[error("Configuration error: {0}")]
	Config(String),
}

impl From<DeliveryError> for DeployError {
	fn from(err: DeliveryError) -> Self {
		match err {
			DeliveryError::Artifact(msg) => DeployError::Artifact(msg),
			DeliveryError::Config(msg) => DeployError::Config(msg),
			other => DeployError::Deployment(other.to_string()),
		}
	}
}

#[async_trait]
pub trait DeploymentInterface: Send + Sync {
	/// Broadcasts the contract creation and waits for inclusion.
	async fn deploy(
		&self,
		artifact: &ContractArtifact,
		args: &ConstructorArgs,
	) -> Result<DeploymentReceipt, DeliveryError>;
}

pub struct DeploymentService {
	deployer: Box<dyn DeploymentInterface>,
}

impl DeploymentService {
	pub fn new(deployer: Box<dyn DeploymentInterface>) -> Self {
		Self { deployer }
	}

	pub async fn deploy(
		&self,
		artifact: &ContractArtifact,
		args: &ConstructorArgs,
	) -> Result<DeploymentReceipt, DeployError> {
		info!(
			contract = %artifact.name(),
			variant = %args.variant(),
			"Deploying with {} constructor arguments",
			args.len()
		);

		match self.deployer.deploy(artifact, args).await {
			Ok(receipt) => {
				info!(
					contract_address = %receipt.contract_address,
					tx_hash = %receipt.transaction_hash,
					block = receipt.block_number,
					"Contract deployed"
				);
				Ok(receipt)
			}
			Err(e) => {
				error!("Deployment of {} failed: {}", artifact.name(), e);
				Err(e.into())
			}
		}
	}
}
