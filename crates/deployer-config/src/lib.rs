//! Network profiles and configuration loading for the deployer.

pub mod loader;
pub mod profiles;
pub mod types;

pub use loader::{load_config, ConfigLoader};
pub use profiles::{builtin_profiles, BASE_SEPOLIA};
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),
}
