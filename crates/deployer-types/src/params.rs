//! Constructor parameter types for the oracle request contract.

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width of the on-chain job identifier field.
pub const JOB_ID_LEN: usize = 32;

/// Which constructor signature is being targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractVariant {
	/// `(address oracle, bytes32 jobId, uint256 fee, address link)`
	#[default]
	Base,
	/// Base signature followed by `uint8 requiredClass`.
	ClassGated,
}

impl ContractVariant {
	pub fn requires_class(&self) -> bool {
		matches!(self, ContractVariant::ClassGated)
	}

	/// Number of constructor arguments for this variant.
	pub fn arity(&self) -> usize {
		match self {
			ContractVariant::Base => 4,
			ContractVariant::ClassGated => 5,
		}
	}
}

impl fmt::Display for ContractVariant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ContractVariant::Base => write!(f, "base"),
			ContractVariant::ClassGated => write!(f, "class-gated"),
		}
	}
}

impl FromStr for ContractVariant {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"base" => Ok(ContractVariant::Base),
			"class-gated" | "class_gated" | "gated" => Ok(ContractVariant::ClassGated),
			other => Err(format!(
				"Unknown contract variant '{}' (expected 'base' or 'class-gated')",
				other
			)),
		}
	}
}

/// A job identifier in its fixed-width on-chain form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub B256);

impl JobId {
	pub fn as_bytes(&self) -> &[u8; JOB_ID_LEN] {
		&self.0 .0
	}

	/// Recovers the textual identifier by dropping the zero padding.
	pub fn to_text(&self) -> String {
		let bytes = self.as_bytes();
		let end = bytes
			.iter()
			.rposition(|b| *b != 0)
			.map(|i| i + 1)
			.unwrap_or(0);
		String::from_utf8_lossy(&bytes[..end]).into_owned()
	}
}

impl fmt::Display for JobId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Ordered constructor arguments for one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructorArgs {
	/// Oracle operator contract authorised to fulfil requests.
	pub oracle: Address,
	pub job_id: JobId,
	/// Fee per request in the token's smallest unit.
	pub fee: U256,
	/// Fee token contract.
	pub token: Address,
	/// Only present for [`ContractVariant::ClassGated`].
	#[serde(skip_serializing_if = "Option::is_none")]
	pub required_class: Option<u8>,
}

impl ConstructorArgs {
	pub fn variant(&self) -> ContractVariant {
		if self.required_class.is_some() {
			ContractVariant::ClassGated
		} else {
			ContractVariant::Base
		}
	}

	pub fn len(&self) -> usize {
		self.variant().arity()
	}

	pub fn is_empty(&self) -> bool {
		false
	}

	/// Arguments in constructor order.
	pub fn to_sol_values(&self) -> Vec<DynSolValue> {
		let mut values = vec![
			DynSolValue::Address(self.oracle),
			DynSolValue::FixedBytes(self.job_id.0, JOB_ID_LEN),
			DynSolValue::Uint(self.fee, 256),
			DynSolValue::Address(self.token),
		];
		if let Some(class) = self.required_class {
			values.push(DynSolValue::Uint(U256::from(class), 8));
		}
		values
	}

	/// ABI encoding appended to the contract creation code.
	pub fn abi_encode(&self) -> Vec<u8> {
		DynSolValue::Tuple(self.to_sol_values()).abi_encode_params()
	}
}

impl fmt::Display for ConstructorArgs {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"({}, {}, {}, {}",
			self.oracle, self.job_id, self.fee, self.token
		)?;
		if let Some(class) = self.required_class {
			write!(f, ", {}", class)?;
		}
		write!(f, ")")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::address;

	fn job_id(text: &str) -> JobId {
		let mut bytes = [0u8; JOB_ID_LEN];
		bytes[..text.len()].copy_from_slice(text.as_bytes());
		JobId(B256::from(bytes))
	}

	fn sample_args(required_class: Option<u8>) -> ConstructorArgs {
		ConstructorArgs {
			oracle: address!("0xD67D6508D4E5611cd6a463Dd0969Fa153Be91101"),
			job_id: job_id("650647e01b5f4bdfa78221c0d15af6c6"),
			fee: U256::from(50_000_000_000_000_000u64),
			token: address!("0xE4aB69C077896252FAFBD49EFD26B5D171A32410"),
			required_class,
		}
	}

	#[test]
	fn test_variant_parsing() {
		assert_eq!("base".parse::<ContractVariant>(), Ok(ContractVariant::Base));
		assert_eq!(
			"class-gated".parse::<ContractVariant>(),
			Ok(ContractVariant::ClassGated)
		);
		assert!("gold".parse::<ContractVariant>().is_err());
		assert_eq!(ContractVariant::ClassGated.to_string(), "class-gated");
	}

	#[test]
	fn test_argument_count_follows_variant() {
		let base = sample_args(None);
		assert_eq!(base.variant(), ContractVariant::Base);
		assert_eq!(base.len(), 4);
		assert_eq!(base.to_sol_values().len(), 4);

		let gated = sample_args(Some(128));
		assert_eq!(gated.variant(), ContractVariant::ClassGated);
		assert_eq!(gated.len(), 5);
		assert_eq!(gated.to_sol_values().len(), 5);

		assert!(!ContractVariant::Base.requires_class());
		assert!(ContractVariant::ClassGated.requires_class());
	}

	#[test]
	fn test_sol_values_order() {
		let args = sample_args(Some(128));
		let values = args.to_sol_values();

		assert_eq!(values[0], DynSolValue::Address(args.oracle));
		assert_eq!(values[1], DynSolValue::FixedBytes(args.job_id.0, 32));
		assert_eq!(values[2], DynSolValue::Uint(args.fee, 256));
		assert_eq!(values[3], DynSolValue::Address(args.token));
		assert_eq!(values[4], DynSolValue::Uint(U256::from(128u8), 8));
	}

	#[test]
	fn test_abi_encoding_layout() {
		let base = sample_args(None).abi_encode();
		assert_eq!(base.len(), 4 * 32);

		// Addresses are left-padded, bytes32 is stored as-is
		assert_eq!(&base[12..32], sample_args(None).oracle.as_slice());
		assert_eq!(&base[32..64], sample_args(None).job_id.as_bytes());
		assert_eq!(
			U256::from_be_slice(&base[64..96]),
			U256::from(50_000_000_000_000_000u64)
		);
		assert_eq!(&base[108..128], sample_args(None).token.as_slice());

		let gated = sample_args(Some(128)).abi_encode();
		assert_eq!(gated.len(), 5 * 32);
		assert_eq!(&gated[..128], &base[..]);
		assert_eq!(U256::from_be_slice(&gated[128..160]), U256::from(128u8));
	}

	#[test]
	fn test_job_id_text_roundtrip() {
		let id = job_id("73d384dc04d7407caa40813c439565b1");
		assert_eq!(id.to_text(), "73d384dc04d7407caa40813c439565b1");

		let short = job_id("abc");
		assert_eq!(short.to_text(), "abc");
		assert!(short.as_bytes()[3..].iter().all(|b| *b == 0));
	}
}
