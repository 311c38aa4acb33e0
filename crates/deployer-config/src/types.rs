//! Configuration types for the deployer.

use crate::profiles::builtin_profiles;
use deployer_types::{ChainId, ContractVariant};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Complete deployer configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeployerConfig {
	/// Deployer identity and defaults
	pub deployer: DeployerSettings,
	/// One profile per network, keyed by network name
	pub networks: BTreeMap<String, NetworkProfile>,
}

/// Deployer identity and defaults
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeployerSettings {
	/// Name used in logs
	pub name: String,
	/// Network used when none is given on the command line
	pub default_network: String,
	/// Constructor variant to deploy
	#[serde(default)]
	pub variant: ContractVariant,
	/// Compiled contract artifact (Truffle or Foundry JSON)
	pub artifact: Option<PathBuf>,
	/// Hex private key of the deploying account
	pub private_key: Option<String>,
	/// Log level
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

/// Everything needed to build constructor arguments on one network.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NetworkProfile {
	/// EIP-155 chain id
	pub chain_id: ChainId,
	/// RPC endpoint URL
	pub rpc_url: Option<String>,
	/// Block confirmations to wait for after broadcast
	#[serde(default = "default_confirmations")]
	pub confirmations: u64,
	/// Fee per request in display units, e.g. "0.05"
	pub fee: String,
	/// Fee token contract
	pub token_address: String,
	/// Minimum oracle class for the class-gated variant
	pub required_class: Option<u8>,
	/// Oracle operator addresses
	pub oracle: CandidateSet,
	/// Textual job identifiers
	pub job: CandidateSet,
}

/// A named list of retained values with exactly one active entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CandidateSet {
	/// Key of the active candidate
	pub active: String,
	/// All retained candidates by key
	pub candidates: BTreeMap<String, String>,
}

impl CandidateSet {
	pub fn new<K, V>(active: impl Into<String>, candidates: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			active: active.into(),
			candidates: candidates
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}

	/// Value of the active candidate, if the active key names one.
	pub fn active_value(&self) -> Option<&str> {
		self.candidates.get(&self.active).map(String::as_str)
	}

	/// Switches the active key. Fails if no candidate has that key.
	pub fn select(&mut self, key: &str) -> Result<(), String> {
		if !self.candidates.contains_key(key) {
			return Err(format!("'{}' is not a known candidate", key));
		}
		self.active = key.to_string();
		Ok(())
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_confirmations() -> u64 {
	1
}

impl DeployerConfig {
	/// Profile for `network`, or for the default network when `None`.
	pub fn network(&self, network: Option<&str>) -> Option<(&str, &NetworkProfile)> {
		let name = network.unwrap_or(self.deployer.default_network.as_str());
		self.networks
			.get_key_value(name)
			.map(|(k, v)| (k.as_str(), v))
	}
}

/// Default configuration
impl Default for DeployerConfig {
	fn default() -> Self {
		Self {
			deployer: DeployerSettings {
				name: "oracle-deployer".to_string(),
				default_network: crate::profiles::BASE_SEPOLIA.to_string(),
				variant: ContractVariant::Base,
				artifact: Some(PathBuf::from("build/contracts/AIChainlinkRequest.json")),
				private_key: None,
				log_level: default_log_level(),
			},
			networks: builtin_profiles(),
		}
	}
}
