//! Compiled contract artifacts.

use crate::DeliveryError;
use deployer_types::{Bytes, ConstructorArgs};
use std::path::Path;

/// Creation bytecode of a compiled contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractArtifact {
	pub contract_name: Option<String>,
	pub bytecode: Bytes,
}

impl ContractArtifact {
	pub fn new(contract_name: Option<String>, bytecode: Bytes) -> Result<Self, DeliveryError> {
		if bytecode.is_empty() {
			return Err(DeliveryError::Artifact(
				"artifact has no creation bytecode".to_string(),
			));
		}
		Ok(Self {
			contract_name,
			bytecode,
		})
	}

	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DeliveryError> {
		let path = path.as_ref();
		let contents = std::fs::read_to_string(path).map_err(|e| {
			DeliveryError::Artifact(format!("Failed to read {}: {}", path.display(), e))
		})?;
		Self::from_json(&contents)
	}

	/// Accepts Truffle (`"bytecode": "0x.."`) and Foundry
	/// (`"bytecode": { "object": "0x.." }`) artifacts.
	pub fn from_json(contents: &str) -> Result<Self, DeliveryError> {
		let value: serde_json::Value = serde_json::from_str(contents)
			.map_err(|e| DeliveryError::Artifact(format!("Invalid artifact JSON: {}", e)))?;

		let bytecode = match value.get("bytecode") {
			Some(serde_json::Value::String(code)) => code.as_str(),
			Some(serde_json::Value::Object(obj)) => obj
				.get("object")
				.and_then(|v| v.as_str())
				.ok_or_else(|| {
					DeliveryError::Artifact("bytecode.object is missing".to_string())
				})?,
			_ => {
				return Err(DeliveryError::Artifact(
					"artifact has no bytecode field".to_string(),
				))
			}
		};

		let raw = bytecode.strip_prefix("0x").unwrap_or(bytecode);
		if raw.contains("__") {
			return Err(DeliveryError::Artifact(
				"bytecode contains unlinked library placeholders".to_string(),
			));
		}
		let decoded = hex::decode(raw)
			.map_err(|e| DeliveryError::Artifact(format!("Invalid bytecode hex: {}", e)))?;

		let contract_name = value
			.get("contractName")
			.and_then(|v| v.as_str())
			.map(str::to_string);

		Self::new(contract_name, Bytes::from(decoded))
	}

	/// Creation bytecode followed by the ABI-encoded constructor arguments.
	pub fn creation_code(&self, args: &ConstructorArgs) -> Bytes {
		let encoded = args.abi_encode();
		let mut code = Vec::with_capacity(self.bytecode.len() + encoded.len());
		code.extend_from_slice(&self.bytecode);
		code.extend_from_slice(&encoded);
		Bytes::from(code)
	}

	pub fn name(&self) -> &str {
		self.contract_name.as_deref().unwrap_or("<unnamed>")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use deployer_types::{Address, JobId, B256, U256};
	use std::io::Write;

	fn args() -> ConstructorArgs {
		ConstructorArgs {
			oracle: Address::repeat_byte(0x11),
			job_id: JobId(B256::repeat_byte(0x22)),
			fee: U256::from(5),
			token: Address::repeat_byte(0x33),
			required_class: None,
		}
	}

	#[test]
	fn test_truffle_artifact() {
		let artifact = ContractArtifact::from_json(
			r#"{ "contractName": "AIChainlinkRequest", "bytecode": "0x6080604052" }"#,
		)
		.unwrap();
		assert_eq!(artifact.name(), "AIChainlinkRequest");
		assert_eq!(&artifact.bytecode[..], &[0x60u8, 0x80, 0x60, 0x40, 0x52]);
	}

	#[test]
	fn test_foundry_artifact() {
		let artifact =
			ContractArtifact::from_json(r#"{ "bytecode": { "object": "6080604052" } }"#).unwrap();
		assert_eq!(artifact.name(), "<unnamed>");
		assert_eq!(artifact.bytecode.len(), 5);
	}

	#[test]
	fn test_invalid_artifacts() {
		for json in [
			"not json",
			r#"{ "abi": [] }"#,
			r#"{ "bytecode": "0x" }"#,
			r#"{ "bytecode": "0xzz" }"#,
			r#"{ "bytecode": { "sourceMap": "" } }"#,
			r#"{ "bytecode": "0x6080__$lib$__6040" }"#,
		] {
			let err = ContractArtifact::from_json(json).unwrap_err();
			assert!(matches!(err, DeliveryError::Artifact(_)), "{}", json);
		}
	}

	#[test]
	fn test_creation_code_appends_arguments() {
		let artifact = ContractArtifact::from_json(r#"{ "bytecode": "0x6080604052" }"#).unwrap();
		let code = artifact.creation_code(&args());

		assert_eq!(code.len(), 5 + 4 * 32);
		assert_eq!(&code[..5], &artifact.bytecode[..]);
		assert_eq!(&code[5..], args().abi_encode().as_slice());
	}

	#[test]
	fn test_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(br#"{ "contractName": "X", "bytecode": "0x00" }"#)
			.unwrap();
		let artifact = ContractArtifact::from_file(file.path()).unwrap();
		assert_eq!(artifact.name(), "X");

		assert!(ContractArtifact::from_file("/nonexistent/artifact.json").is_err());
	}
}
