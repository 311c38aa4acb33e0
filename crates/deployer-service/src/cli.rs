//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use deployer_types::ContractVariant;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "oracle-deployer")]
#[command(about = "Resolve constructor arguments for the oracle request contract and deploy it", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
	/// Path to configuration file (built-in profiles are used when absent)
	#[arg(short, long, env = "DEPLOYER_CONFIG")]
	pub config: Option<PathBuf>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, env = "DEPLOYER_LOG_LEVEL")]
	pub log_level: Option<String>,

	/// Print results as JSON
	#[arg(long, global = true)]
	pub json: bool,

	/// Subcommand to execute
	#[command(subcommand)]
	pub command: Command,
}

/// Network and variant selection shared by `resolve` and `deploy`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct Target {
	/// Network profile key (defaults to the configured default network)
	#[arg(short, long)]
	pub network: Option<String>,

	/// Contract variant: base or class-gated (defaults to the configured variant)
	#[arg(long)]
	pub variant: Option<ContractVariant>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Print the resolved constructor arguments without broadcasting
	Resolve {
		#[command(flatten)]
		target: Target,
	},

	/// Deploy the contract with the resolved constructor arguments
	Deploy {
		#[command(flatten)]
		target: Target,

		/// Compiled contract artifact (Truffle or Foundry JSON)
		#[arg(short, long)]
		artifact: Option<PathBuf>,

		/// Print the creation payload instead of broadcasting it
		#[arg(long)]
		dry_run: bool,
	},

	/// List configured networks and their candidates
	Profiles,

	/// Validate a configuration file and resolve every network it defines
	Validate {
		/// Configuration file to validate
		config: PathBuf,
	},

	/// Write the built-in profiles to a configuration file
	GenerateConfig {
		/// Output path for the generated configuration
		#[arg(short, long, default_value = "deployer.toml")]
		output: PathBuf,
	},
}
