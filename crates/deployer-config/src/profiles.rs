//! Built-in network profiles.
//!
//! Every oracle operator and job ever used on a network stays in its
//! profile so an operator can switch back with a one-line change to
//! `active` (or `DEPLOYER_ACTIVE_ORACLE` / `DEPLOYER_ACTIVE_JOB`).

use crate::types::{CandidateSet, NetworkProfile};
use deployer_types::ChainId;
use std::collections::BTreeMap;

/// Key of the Base Sepolia profile.
pub const BASE_SEPOLIA: &str = "base-sepolia";

/// LINK token on Base Sepolia.
pub const BASE_SEPOLIA_LINK: &str = "0xE4aB69C077896252FAFBD49EFD26B5D171A32410";

/// Minimum oracle class enforced by the class-gated contract.
pub const DEFAULT_REQUIRED_CLASS: u8 = 128;

const BASE_SEPOLIA_ORACLES: [(&str, &str); 4] = [
	("primary", "0xD67D6508D4E5611cd6a463Dd0969Fa153Be91101"),
	("operator-1f38", "0x1f3829ca4Bce27ECbB55CAA8b0F8B51E4ba2cCF6"),
	("operator-4b37", "0x4b37bA768432DDc2F792b623036b6476F53B9E69"),
	("operator-b7bc", "0xb7Bc0c64C8C9805dd9AC11360E67505439b96017"),
];

// Oldest first.
const BASE_SEPOLIA_JOBS: [&str; 27] = [
	"592623f3138e43b685f7c6b706385ba5",
	"6abbdd9d2db94b9fa4ce8aa1b98fd3fb",
	"fc5b8f3685fc4adcbb1791d76df0e5d9",
	"023fed925b3b4f5a81448584b6c37ec7",
	"26118a0be4fc41b580b1f0c224f873f8",
	"ec082e473385427d87586f1298bd1ffd",
	"3bf4c221925d4cb0ba797e44870f3894",
	"bea58b33d7e04546955ddd21b0b57028",
	"702e620837044470a53cd34a62ea0286",
	"76e2d0b031d041849e0a0a51284eba06",
	"5e12e54e2a0443cf85734263c7798d35",
	"a1c72316b062480cb27ebf3083d1d1c8",
	"602fb8d1c8d74ba4b038e9f59350360c",
	"af7418ef55a145bdabd026a23e8fa48c",
	"4bff49c03130491cb22640c048b49fad",
	"7c846f5960e94f809940fbc99cdbd411",
	"1dac3696de4c49ac94088adbfa3c535a",
	"2daafda4b3934490884b8ca02e9adb2f",
	"d309437ca8e14c1fb7f12087468062df",
	"afc834cc5639442d8f66bd5920672d9a",
	"83b21a71ff404d788a3892f9e96de6f2",
	"a88c2d4c25714f27987747a1df8ac904",
	"c4ee20c9f07849af9157bb00fbc80556",
	"b11a3da0cd204087a52cc10356b48037",
	"4b84b91ea6a8471b8045aa5b10fa9595",
	"650647e01b5f4bdfa78221c0d15af6c6",
	"73d384dc04d7407caa40813c439565b1",
];

/// Key under which the n-th (1-based) job of a history is stored.
pub fn job_key(n: usize) -> String {
	format!("job-{:02}", n)
}

/// Base Sepolia profile with its full oracle and job history.
pub fn base_sepolia() -> NetworkProfile {
	let jobs = BASE_SEPOLIA_JOBS
		.iter()
		.enumerate()
		.map(|(i, job)| (job_key(i + 1), *job));

	NetworkProfile {
		chain_id: ChainId::BASE_SEPOLIA,
		rpc_url: Some("https://sepolia.base.org".to_string()),
		confirmations: 1,
		oracle: CandidateSet::new("primary", BASE_SEPOLIA_ORACLES),
		job: CandidateSet::new(job_key(BASE_SEPOLIA_JOBS.len()), jobs),
		fee: "0.05".to_string(),
		token_address: BASE_SEPOLIA_LINK.to_string(),
		required_class: Some(DEFAULT_REQUIRED_CLASS),
	}
}

/// All built-in profiles by network key.
pub fn builtin_profiles() -> BTreeMap<String, NetworkProfile> {
	BTreeMap::from([(BASE_SEPOLIA.to_string(), base_sepolia())])
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_base_sepolia_active_selection() {
		let profile = base_sepolia();
		assert_eq!(
			profile.oracle.active_value(),
			Some("0xD67D6508D4E5611cd6a463Dd0969Fa153Be91101")
		);
		assert_eq!(
			profile.job.active_value(),
			Some("73d384dc04d7407caa40813c439565b1")
		);
		assert_eq!(profile.fee, "0.05");
		assert_eq!(profile.token_address, BASE_SEPOLIA_LINK);
		assert_eq!(profile.required_class, Some(128));
	}

	#[test]
	fn test_history_is_retained() {
		let profile = base_sepolia();
		assert_eq!(profile.oracle.candidates.len(), 4);
		assert_eq!(profile.job.candidates.len(), 27);
		assert_eq!(
			profile.job.candidates.get("job-01").map(String::as_str),
			Some("592623f3138e43b685f7c6b706385ba5")
		);
	}

	#[test]
	fn test_job_keys_sort_chronologically() {
		let profile = base_sepolia();
		let last = profile.job.candidates.keys().last().unwrap();
		assert_eq!(last, &profile.job.active);
	}
}
