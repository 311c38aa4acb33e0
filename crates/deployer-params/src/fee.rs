//! Exact conversion between display-unit decimals and base-unit integers.

use deployer_types::{DeployError, Result, U256};

/// Decimals of the fee token (LINK uses the ether scale).
pub const FEE_DECIMALS: u8 = 18;

/// Parses a fee expressed in whole tokens, e.g. `"0.05"`.
pub fn parse_fee(amount: &str) -> Result<U256> {
	parse_units(amount, FEE_DECIMALS)
}

/// Scales a non-negative decimal string by `10^decimals`.
///
/// Only plain digits with an optional single `.` are accepted. More
/// fractional digits than `decimals` is an error rather than a rounding.
/// `alloy::primitives::utils::parse_units` drops excess fractional digits
/// and accepts signs, so it is not used for amounts that end up on chain.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256> {
	let amount = amount.trim();
	if amount.is_empty() {
		return Err(DeployError::Parse("amount is empty".to_string()));
	}

	let (integer, fraction) = match amount.split_once('.') {
		Some((integer, fraction)) => (integer, fraction),
		None => (amount, ""),
	};

	let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
	if integer.is_empty() || !is_digits(integer) || !is_digits(fraction) {
		return Err(DeployError::Parse(format!(
			"'{}' is not a valid decimal amount",
			amount
		)));
	}
	if amount.ends_with('.') {
		return Err(DeployError::Parse(format!(
			"'{}' has no digits after the decimal point",
			amount
		)));
	}
	if fraction.len() > decimals as usize {
		return Err(DeployError::Parse(format!(
			"'{}' has {} fractional digits, at most {} are supported",
			amount,
			fraction.len(),
			decimals
		)));
	}

	// integer ++ fraction ++ zero padding is the scaled value in base 10
	let mut digits = String::with_capacity(integer.len() + decimals as usize);
	digits.push_str(integer);
	digits.push_str(fraction);
	digits.extend(std::iter::repeat('0').take(decimals as usize - fraction.len()));

	U256::from_str_radix(&digits, 10)
		.map_err(|e| DeployError::Parse(format!("'{}' is out of range: {}", amount, e)))
}

/// Inverse of [`parse_units`], without trailing fractional zeros.
pub fn format_units(value: U256, decimals: u8) -> String {
	match alloy::primitives::utils::format_units(value, decimals) {
		Ok(formatted) if formatted.contains('.') => formatted
			.trim_end_matches('0')
			.trim_end_matches('.')
			.to_string(),
		Ok(formatted) => formatted,
		// Only more than 77 decimals is rejected; show base units
		Err(_) => value.to_string(),
	}
}
