//! Configuration loading from files and environment.

use crate::types::*;
use crate::ConfigError;
use anyhow::{Context, Result};
use deployer_types::Address;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
	/// Load configuration from file
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<DeployerConfig> {
		let path = path.as_ref();
		info!("Loading configuration from {:?}", path);

		if !path.exists() {
			return Err(ConfigError::FileNotFound(path.display().to_string()).into());
		}

		let contents = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {:?}", path))?;
		let contents = Self::substitute_env_vars(&contents)?;

		let config = match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => Self::from_toml(&contents)?,
			Some("json") => Self::from_json(&contents)?,
			Some("yaml") | Some("yml") => Self::from_yaml(&contents)?,
			_ => anyhow::bail!("Unsupported config format: {:?}", path),
		};

		Self::validate_config(&config)?;
		Ok(config)
	}

	/// Load from TOML string
	pub fn from_toml(contents: &str) -> Result<DeployerConfig> {
		toml::from_str(contents)
			.map_err(|e| ConfigError::ParseError(format!("Failed to parse TOML: {}", e)).into())
	}

	/// Load from JSON string
	pub fn from_json(contents: &str) -> Result<DeployerConfig> {
		serde_json::from_str(contents).context("Failed to parse JSON")
	}

	/// Load from YAML string
	pub fn from_yaml(contents: &str) -> Result<DeployerConfig> {
		serde_yaml::from_str(contents).context("Failed to parse YAML")
	}

	/// Serialize to TOML, used by `generate-config`
	pub fn to_toml(config: &DeployerConfig) -> Result<String> {
		toml::to_string(config).context("Failed to serialize configuration")
	}

	/// Load from environment variables with optional file override
	pub fn from_env_and_file(file_path: Option<&Path>) -> Result<DeployerConfig> {
		// Start with built-in profiles
		let mut config = if let Some(path) = file_path {
			Self::from_file(path)?
		} else {
			DeployerConfig::default()
		};

		// Override with environment variables
		Self::apply_env_overrides(&mut config, utf8_env_vars())?;

		Self::validate_config(&config)?;
		Ok(config)
	}

	/// Replace `${VAR_NAME}` patterns with the variable's value.
	///
	/// Lines starting with `#` are comments in TOML and YAML and are left as is.
	pub fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
		let re = regex::Regex::new(r"\$\{([^}]+)\}")
			.map_err(|e| ConfigError::ParseError(e.to_string()))?;

		let mut result = String::with_capacity(content.len());
		for line in content.split_inclusive('\n') {
			if line.trim_start().starts_with('#') {
				result.push_str(line);
				continue;
			}

			let mut replaced = line.to_string();
			for cap in re.captures_iter(line) {
				let full_match = &cap[0];
				let var_name = &cap[1];

				let env_value = std::env::var(var_name)
					.map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;

				replaced = replaced.replace(full_match, &env_value);
			}
			result.push_str(&replaced);
		}

		Ok(result)
	}

	/// Apply environment variable overrides
	pub fn apply_env_overrides<I>(config: &mut DeployerConfig, vars: I) -> Result<(), ConfigError>
	where
		I: IntoIterator<Item = (String, String)>,
	{
		let mut active_oracle = None;
		let mut active_job = None;

		for (key, value) in vars {
			match key.as_str() {
				"DEPLOYER_PRIVATE_KEY" => {
					debug!("Overriding private key from environment");
					config.deployer.private_key = Some(value);
				}
				"DEPLOYER_NETWORK" => {
					debug!("Overriding default network from environment");
					config.deployer.default_network = value;
				}
				"DEPLOYER_VARIANT" => {
					config.deployer.variant = value.parse().map_err(ConfigError::ValidationError)?;
				}
				"DEPLOYER_ACTIVE_ORACLE" => active_oracle = Some(value),
				"DEPLOYER_ACTIVE_JOB" => active_job = Some(value),
				_ => {
					if let Some(network) = key.strip_prefix("RPC_URL_") {
						for (name, profile) in config.networks.iter_mut() {
							if env_key(name) == network {
								debug!("Overriding RPC URL for {} from environment", name);
								profile.rpc_url = Some(value.clone());
							}
						}
					}
				}
			}
		}

		// Active selections apply to the default network, which may itself
		// have been overridden above.
		let network = config.deployer.default_network.clone();
		if let Some(profile) = config.networks.get_mut(&network) {
			if let Some(key) = active_oracle {
				debug!("Overriding active oracle for {} from environment", network);
				profile
					.oracle
					.select(&key)
					.map_err(|e| ConfigError::ValidationError(format!("oracle {}", e)))?;
			}
			if let Some(key) = active_job {
				debug!("Overriding active job for {} from environment", network);
				profile
					.job
					.select(&key)
					.map_err(|e| ConfigError::ValidationError(format!("job {}", e)))?;
			}
		}

		Ok(())
	}

	/// Validate configuration
	pub fn validate_config(config: &DeployerConfig) -> Result<(), ConfigError> {
		if let Some(key) = &config.deployer.private_key {
			if !key.starts_with("0x") {
				return Err(ConfigError::ValidationError(
					"Private key must start with 0x".to_string(),
				));
			}
		}

		if !config
			.networks
			.contains_key(&config.deployer.default_network)
		{
			return Err(ConfigError::ValidationError(format!(
				"Default network '{}' not configured",
				config.deployer.default_network
			)));
		}

		for (name, profile) in &config.networks {
			validate_candidates(name, "oracle", &profile.oracle)?;
			validate_candidates(name, "job", &profile.job)?;

			for (key, value) in &profile.oracle.candidates {
				Address::from_str(value).map_err(|e| {
					ConfigError::ValidationError(format!(
						"Network '{}': oracle '{}' is not a valid address: {}",
						name, key, e
					))
				})?;
			}

			Address::from_str(&profile.token_address).map_err(|e| {
				ConfigError::ValidationError(format!(
					"Network '{}': token address is invalid: {}",
					name, e
				))
			})?;

			if profile.fee.trim().is_empty() {
				return Err(ConfigError::ValidationError(format!(
					"Network '{}': fee must not be empty",
					name
				)));
			}
		}

		Ok(())
	}
}

fn validate_candidates(network: &str, kind: &str, set: &CandidateSet) -> Result<(), ConfigError> {
	if set.candidates.is_empty() {
		return Err(ConfigError::ValidationError(format!(
			"Network '{}': no {} candidates configured",
			network, kind
		)));
	}
	if set.active_value().is_none() {
		return Err(ConfigError::ValidationError(format!(
			"Network '{}': active {} '{}' is not among the candidates",
			network, kind, set.active
		)));
	}
	Ok(())
}

/// Process environment, skipping entries that are not valid UTF-8.
fn utf8_env_vars() -> impl Iterator<Item = (String, String)> {
	std::env::vars_os()
		.filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
}

/// `base-sepolia` -> `BASE_SEPOLIA`
fn env_key(network: &str) -> String {
	network.to_uppercase().replace('-', "_")
}

/// Load configuration from standard locations
pub fn load_config(path: Option<&Path>) -> Result<DeployerConfig> {
	// Check for config file in order:
	// 1. Explicit path
	// 2. Environment variable DEPLOYER_CONFIG
	// 3. ./deployer.toml
	// 4. Built-in profiles with env overrides

	if let Some(path) = path {
		return ConfigLoader::from_env_and_file(Some(path));
	}

	if let Ok(path) = std::env::var("DEPLOYER_CONFIG") {
		return ConfigLoader::from_env_and_file(Some(Path::new(&path)));
	}

	let paths = ["./deployer.toml", "./config/deployer.toml"];
	for path in &paths {
		if Path::new(path).exists() {
			return ConfigLoader::from_env_and_file(Some(Path::new(path)));
		}
	}

	ConfigLoader::from_env_and_file(None)
}
