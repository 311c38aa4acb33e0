//! Configuration validation utility
//!
//! Checks structure, addresses and candidate selections only. Fees and job
//! ids are checked by `oracle-deployer validate`, which also resolves them.
//!
//! Usage: cargo run --bin validate-config deployer.toml

use std::env;
use std::process;

use deployer_config::ConfigLoader;

fn main() {
	let args: Vec<String> = env::args().collect();

	if args.len() != 2 {
		eprintln!("Usage: {} <config-file>", args[0]);
		eprintln!("Fees and job ids are not checked; use `oracle-deployer validate` for that.");
		process::exit(1);
	}

	let config_path = &args[1];

	println!("Validating configuration file: {}", config_path);

	match ConfigLoader::from_file(config_path) {
		Ok(config) => {
			println!("✅ Configuration is valid!");
			println!("Deployer name: {}", config.deployer.name);
			println!("Default network: {}", config.deployer.default_network);
			println!("Variant: {}", config.deployer.variant);
			for (name, profile) in &config.networks {
				println!(
					"Network {} (chain {}): oracle '{}', job '{}'",
					name, profile.chain_id, profile.oracle.active, profile.job.active
				);
			}
		}
		Err(e) => {
			eprintln!("❌ Configuration validation failed:");
			eprintln!("{:#}", e);
			process::exit(1);
		}
	}
}
