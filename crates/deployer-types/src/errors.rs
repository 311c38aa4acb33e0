//! Error types for parameter resolution and deployment.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeployError>;

/// Every variant is fatal to the deployment attempt it came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeployError {
	/// Missing or invalid selection among the configured candidates.
	#[error("Configuration error: {0}")]
	Config(String),

	/// Value does not fit its fixed-width on-chain representation.
	#[error("Encoding error: {0}")]
	Encoding(String),

	/// Malformed decimal amount.
	#[error("Parse error: {0}")]
	Parse(String),

	#[error("Artifact error: {0}")]
	Artifact(String),

	/// Raised by the broadcast layer and passed through untouched.
	#[error("Deployment error: {0}")]
	Deployment(String),
}
