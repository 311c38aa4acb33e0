//! Ties configuration, parameter resolution and deployment together.

use crate::cli::Target;
use deployer_config::DeployerConfig;
use deployer_delivery::{
	implementations::evm::create_http_deployer, ContractArtifact, DeploymentService,
};
use deployer_params::{format_units, ParameterResolver, FEE_DECIMALS};
use deployer_types::{Bytes, ConstructorArgs, ContractVariant, DeployError, DeploymentReceipt};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Arguments resolved for one network, ready to print or deploy.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
	pub network: String,
	pub chain_id: u64,
	pub variant: ContractVariant,
	pub args: ConstructorArgs,
	/// ABI-encoded constructor arguments
	pub encoded: Bytes,
}

/// Creation payload produced by a dry run.
#[derive(Debug, Clone, Serialize)]
pub struct DryRun {
	pub contract: String,
	#[serde(flatten)]
	pub resolution: Resolution,
	pub creation_code: Bytes,
}

pub struct DeployerService {
	config: DeployerConfig,
}

impl DeployerService {
	pub fn new(config: DeployerConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &DeployerConfig {
		&self.config
	}

	/// Resolves constructor arguments. Nothing is sent anywhere.
	pub fn resolve(&self, target: &Target) -> Result<Resolution, DeployError> {
		let resolver = ParameterResolver::from_config(&self.config, target.network.as_deref())?;
		let variant = target.variant.unwrap_or(self.config.deployer.variant);
		let args = resolver.resolve(variant)?;

		Ok(Resolution {
			network: resolver.network().to_string(),
			chain_id: resolver.profile().chain_id.0,
			variant,
			encoded: Bytes::from(args.abi_encode()),
			args,
		})
	}

	/// Resolves every configured network with the configured variant, so a
	/// bad fee or job id is reported before anything is deployed.
	pub fn check_profiles(&self) -> Result<(), DeployError> {
		for (name, profile) in &self.config.networks {
			ParameterResolver::new(name, profile).resolve(self.config.deployer.variant)?;
		}
		Ok(())
	}

	/// Loads the artifact from `path`, falling back to the configured one.
	pub fn load_artifact(&self, path: Option<&Path>) -> Result<ContractArtifact, DeployError> {
		let path = path
			.or(self.config.deployer.artifact.as_deref())
			.ok_or_else(|| DeployError::Config("no contract artifact configured".to_string()))?;
		info!("Loading contract artifact from {:?}", path);
		Ok(ContractArtifact::from_file(path)?)
	}

	pub fn dry_run(&self, target: &Target, artifact: Option<&Path>) -> Result<DryRun, DeployError> {
		// Resolve first so configuration mistakes surface before artifact ones
		let resolution = self.resolve(target)?;
		let artifact = self.load_artifact(artifact)?;

		Ok(DryRun {
			contract: artifact.name().to_string(),
			creation_code: artifact.creation_code(&resolution.args),
			resolution,
		})
	}

	/// Resolves, then broadcasts through the network's RPC endpoint.
	pub async fn deploy(
		&self,
		target: &Target,
		artifact: Option<&Path>,
	) -> Result<DeploymentReceipt, DeployError> {
		let resolution = self.resolve(target)?;
		let artifact = self.load_artifact(artifact)?;

		let deployer = self.deployment_service(&resolution.network)?;
		deployer.deploy(&artifact, &resolution.args).await
	}

	fn deployment_service(&self, network: &str) -> Result<DeploymentService, DeployError> {
		let (_, profile) = self
			.config
			.network(Some(network))
			.ok_or_else(|| DeployError::Config(format!("network '{}' is not configured", network)))?;

		let rpc_url = profile.rpc_url.as_deref().ok_or_else(|| {
			DeployError::Config(format!("network '{}' has no rpc_url", network))
		})?;
		let private_key = self.config.deployer.private_key.as_deref().ok_or_else(|| {
			DeployError::Config(
				"no private key configured (set DEPLOYER_PRIVATE_KEY)".to_string(),
			)
		})?;

		let deployer = create_http_deployer(
			rpc_url,
			profile.chain_id.0,
			private_key,
			profile.confirmations,
		)?;
		Ok(DeploymentService::new(deployer))
	}

	/// Human-readable listing of every network, marking active candidates.
	pub fn describe_profiles(&self) -> Vec<String> {
		let mut lines = Vec::new();
		for (name, profile) in &self.config.networks {
			let default = if *name == self.config.deployer.default_network {
				" (default)"
			} else {
				""
			};
			lines.push(format!("{}{} chain {}", name, default, profile.chain_id));

			let fee = deployer_params::parse_fee(&profile.fee)
				.map(|fee| format!("{} ({} base units)", format_units(fee, FEE_DECIMALS), fee))
				.unwrap_or_else(|e| format!("{} (invalid: {})", profile.fee, e));
			lines.push(format!("  fee: {}", fee));
			lines.push(format!("  token: {}", profile.token_address));
			if let Some(class) = profile.required_class {
				lines.push(format!("  required class: {}", class));
			}

			for (kind, set) in [("oracles", &profile.oracle), ("jobs", &profile.job)] {
				lines.push(format!("  {}:", kind));
				for (key, value) in &set.candidates {
					let marker = if *key == set.active { "*" } else { " " };
					lines.push(format!("   {} {} = {}", marker, key, value));
				}
			}
		}
		lines
	}
}
