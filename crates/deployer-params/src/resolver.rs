//! Builds constructor arguments from a network profile.

use crate::{encode_job_id, fee::format_units, parse_fee, FEE_DECIMALS};
use deployer_config::{CandidateSet, DeployerConfig, NetworkProfile};
use deployer_types::{Address, ConstructorArgs, ContractVariant, DeployError, Result};
use std::str::FromStr;
use tracing::{debug, info};

/// Resolves the constructor arguments for one network.
#[derive(Debug, Clone, Copy)]
pub struct ParameterResolver<'a> {
	network: &'a str,
	profile: &'a NetworkProfile,
}

impl<'a> ParameterResolver<'a> {
	pub fn new(network: &'a str, profile: &'a NetworkProfile) -> Self {
		Self { network, profile }
	}

	/// Looks up `network` (or the default network) in `config`.
	pub fn from_config(config: &'a DeployerConfig, network: Option<&str>) -> Result<Self> {
		let (name, profile) = config.network(network).ok_or_else(|| {
			DeployError::Config(format!(
				"network '{}' is not configured",
				network.unwrap_or(config.deployer.default_network.as_str())
			))
		})?;
		Ok(Self::new(name, profile))
	}

	pub fn network(&self) -> &str {
		self.network
	}

	pub fn profile(&self) -> &NetworkProfile {
		self.profile
	}

	/// Produces `(oracle, jobId, fee, token[, requiredClass])` for `variant`.
	pub fn resolve(&self, variant: ContractVariant) -> Result<ConstructorArgs> {
		let oracle_text = active(self.network, "oracle", &self.profile.oracle)?;
		let oracle = parse_address(self.network, "oracle", oracle_text)?;

		let job_text = active(self.network, "job", &self.profile.job)?;
		let job_id = encode_job_id(job_text)?;

		let fee = parse_fee(&self.profile.fee)?;

		let token = parse_address(self.network, "token", &self.profile.token_address)?;

		let required_class = if variant.requires_class() {
			Some(self.profile.required_class.ok_or_else(|| {
				DeployError::Config(format!(
					"network '{}': the {} variant needs required_class",
					self.network, variant
				))
			})?)
		} else {
			None
		};

		let args = ConstructorArgs {
			oracle,
			job_id,
			fee,
			token,
			required_class,
		};

		debug!(
			network = %self.network,
			oracle_key = %self.profile.oracle.active,
			job_key = %self.profile.job.active,
			"Resolved constructor arguments: {}",
			args
		);
		info!(
			network = %self.network,
			chain_id = %self.profile.chain_id,
			%variant,
			oracle = %args.oracle,
			job = %job_text,
			fee = %format_units(args.fee, FEE_DECIMALS),
			"Constructor arguments ready"
		);

		Ok(args)
	}
}

fn active<'p>(network: &str, kind: &str, set: &'p CandidateSet) -> Result<&'p str> {
	set.active_value().ok_or_else(|| {
		DeployError::Config(format!(
			"network '{}': no {} candidate named '{}' (known: {})",
			network,
			kind,
			set.active,
			set.candidates
				.keys()
				.map(String::as_str)
				.collect::<Vec<_>>()
				.join(", ")
		))
	})
}

fn parse_address(network: &str, kind: &str, value: &str) -> Result<Address> {
	Address::from_str(value.trim()).map_err(|e| {
		DeployError::Config(format!(
			"network '{}': {} address '{}' is invalid: {}",
			network, kind, value, e
		))
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::{address, U256};
	use deployer_config::profiles::base_sepolia;

	const OBSERVED_ORACLE: Address = address!("0xD67D6508D4E5611cd6a463Dd0969Fa153Be91101");
	const OBSERVED_TOKEN: Address = address!("0xE4aB69C077896252FAFBD49EFD26B5D171A32410");

	#[test]
	fn test_observed_deployment() {
		let profile = base_sepolia();
		let args = ParameterResolver::new("base-sepolia", &profile)
			.resolve(ContractVariant::Base)
			.unwrap();

		assert_eq!(args.oracle, OBSERVED_ORACLE);
		assert_eq!(args.job_id.to_text(), "73d384dc04d7407caa40813c439565b1");
		assert_eq!(args.fee, U256::from(50_000_000_000_000_000u64));
		assert_eq!(args.token, OBSERVED_TOKEN);
		assert_eq!(args.required_class, None);
		assert_eq!(args.len(), 4);
	}

	#[test]
	fn test_class_gated_variant() {
		let profile = base_sepolia();
		let args = ParameterResolver::new("base-sepolia", &profile)
			.resolve(ContractVariant::ClassGated)
			.unwrap();

		assert_eq!(args.len(), 5);
		assert_eq!(args.required_class, Some(128));
		assert_eq!(
			args.to_sol_values().last(),
			Some(&alloy::dyn_abi::DynSolValue::Uint(U256::from(128), 8))
		);
	}

	#[test]
	fn test_class_gated_without_class() {
		let mut profile = base_sepolia();
		profile.required_class = None;

		let resolver = ParameterResolver::new("base-sepolia", &profile);
		assert!(resolver.resolve(ContractVariant::Base).is_ok());
		let err = resolver.resolve(ContractVariant::ClassGated).unwrap_err();
		assert!(matches!(err, DeployError::Config(_)));
		assert!(err
			.to_string()
			.contains("the class-gated variant needs required_class"));
	}

	#[test]
	fn test_overlong_job_blocks_resolution() {
		let mut profile = base_sepolia();
		profile.job.candidates.insert(
			"typo".to_string(),
			"73d384dc04d7407caa40813c439565b1x".to_string(),
		);
		profile.job.select("typo").unwrap();

		let err = ParameterResolver::new("base-sepolia", &profile)
			.resolve(ContractVariant::Base)
			.unwrap_err();
		assert!(matches!(err, DeployError::Encoding(_)));
	}

	#[test]
	fn test_unselected_candidates() {
		let mut profile = base_sepolia();
		profile.oracle.active = "retired".to_string();
		let err = ParameterResolver::new("base-sepolia", &profile)
			.resolve(ContractVariant::Base)
			.unwrap_err();
		assert!(matches!(err, DeployError::Config(_)));
		assert!(err.to_string().contains("no oracle candidate named 'retired'"));

		let mut profile = base_sepolia();
		profile.job.active = "job-99".to_string();
		let err = ParameterResolver::new("base-sepolia", &profile)
			.resolve(ContractVariant::Base)
			.unwrap_err();
		assert!(matches!(err, DeployError::Config(_)));
	}

	#[test]
	fn test_invalid_addresses() {
		let mut profile = base_sepolia();
		profile
			.oracle
			.candidates
			.insert("primary".to_string(), "0xnot-an-address".to_string());
		assert!(matches!(
			ParameterResolver::new("base-sepolia", &profile)
				.resolve(ContractVariant::Base)
				.unwrap_err(),
			DeployError::Config(_)
		));

		let mut profile = base_sepolia();
		profile.token_address = "0xE4aB69C0".to_string();
		assert!(matches!(
			ParameterResolver::new("base-sepolia", &profile)
				.resolve(ContractVariant::Base)
				.unwrap_err(),
			DeployError::Config(_)
		));
	}

	#[test]
	fn test_malformed_fee() {
		let mut profile = base_sepolia();
		profile.fee = "0,05".to_string();
		assert!(matches!(
			ParameterResolver::new("base-sepolia", &profile)
				.resolve(ContractVariant::Base)
				.unwrap_err(),
			DeployError::Parse(_)
		));
	}

	#[test]
	fn test_switching_to_retained_candidates() {
		let mut profile = base_sepolia();
		profile.oracle.select("operator-b7bc").unwrap();
		profile.job.select("job-01").unwrap();

		let args = ParameterResolver::new("base-sepolia", &profile)
			.resolve(ContractVariant::Base)
			.unwrap();
		assert_eq!(
			args.oracle,
			address!("0xb7Bc0c64C8C9805dd9AC11360E67505439b96017")
		);
		assert_eq!(args.job_id.to_text(), "592623f3138e43b685f7c6b706385ba5");
	}

	#[test]
	fn test_from_config() {
		let config = DeployerConfig::default();
		let resolver = ParameterResolver::from_config(&config, None).unwrap();
		assert_eq!(resolver.network(), "base-sepolia");

		let err = ParameterResolver::from_config(&config, Some("mainnet")).unwrap_err();
		assert!(matches!(err, DeployError::Config(_)));
		assert!(err.to_string().contains("'mainnet'"));
	}
}
