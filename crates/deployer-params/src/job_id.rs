//! Fixed-width job identifier encoding.

use deployer_types::{DeployError, JobId, Result, B256, JOB_ID_LEN};

/// Encodes a textual job id as its ASCII bytes right-padded with zeros to
/// 32 bytes. Identifiers that do not fit are rejected, never truncated.
pub fn encode_job_id(text: &str) -> Result<JobId> {
	if text.is_empty() {
		return Err(DeployError::Encoding("job identifier is empty".to_string()));
	}

	if !text.is_ascii() {
		return Err(DeployError::Encoding(format!(
			"job identifier '{}' contains non-ASCII characters",
			text
		)));
	}

	let bytes = text.as_bytes();
	if bytes.len() > JOB_ID_LEN {
		return Err(DeployError::Encoding(format!(
			"job identifier '{}' is {} bytes, exceeds the {}-byte field",
			text,
			bytes.len(),
			JOB_ID_LEN
		)));
	}

	let mut padded = [0u8; JOB_ID_LEN];
	padded[..bytes.len()].copy_from_slice(bytes);
	Ok(JobId(B256::from(padded)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_full_width_identifier() {
		let text = "73d384dc04d7407caa40813c439565b1";
		let id = encode_job_id(text).unwrap();

		assert_eq!(id.as_bytes(), text.as_bytes());
		assert_eq!(
			id.to_string(),
			"0x3733643338346463303464373430376361613430383133633433393536356231"
		);
	}

	#[test]
	fn test_short_identifier_is_zero_padded() {
		let id = encode_job_id("job-7").unwrap();

		assert_eq!(&id.as_bytes()[..5], b"job-7");
		assert!(id.as_bytes()[5..].iter().all(|b| *b == 0));
		assert_eq!(id.to_text(), "job-7");
	}

	#[test]
	fn test_encoding_is_stable() {
		let first = encode_job_id("650647e01b5f4bdfa78221c0d15af6c6").unwrap();
		let second = encode_job_id(&first.to_text()).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn test_overlong_identifier_is_rejected() {
		// One byte past the field width
		let err = encode_job_id("73d384dc04d7407caa40813c439565b1f").unwrap_err();
		assert!(matches!(err, DeployError::Encoding(_)));
		assert!(err.to_string().contains("33 bytes"));

		assert!(encode_job_id(&"a".repeat(64)).is_err());
	}

	#[test]
	fn test_invalid_text() {
		assert!(matches!(
			encode_job_id("").unwrap_err(),
			DeployError::Encoding(_)
		));
		assert!(matches!(
			encode_job_id("jöb").unwrap_err(),
			DeployError::Encoding(_)
		));
	}
}
