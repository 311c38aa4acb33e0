use anyhow::{Context, Result};
use clap::Parser;
use deployer_config::{load_config, ConfigLoader, DeployerConfig};
use deployer_params::{format_units, FEE_DECIMALS};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod service;

use cli::{Args, Command, Target};
use service::DeployerService;

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();
	let json = args.json;

	match args.command {
		Command::Resolve { target } => {
			let service = load_service(args.config.as_deref(), args.log_level)?;
			print_resolution(&service, &target, json)
		}
		Command::Deploy {
			target,
			artifact,
			dry_run: true,
		} => {
			let service = load_service(args.config.as_deref(), args.log_level)?;
			print_dry_run(&service, &target, artifact.as_deref(), json)
		}
		Command::Deploy {
			target, artifact, ..
		} => {
			let service = load_service(args.config.as_deref(), args.log_level)?;
			deploy(&service, &target, artifact.as_deref(), json).await
		}
		Command::Profiles => {
			let service = load_service(args.config.as_deref(), args.log_level)?;
			print_profiles(&service, json)
		}
		Command::Validate { config } => {
			setup_tracing(args.log_level.as_deref().unwrap_or("info"))?;
			validate_config(&config)
		}
		Command::GenerateConfig { output } => {
			setup_tracing(args.log_level.as_deref().unwrap_or("info"))?;
			generate_config(&output)
		}
	}
}

/// Loads the configuration and starts tracing at the configured level.
fn load_service(config: Option<&Path>, log_level: Option<String>) -> Result<DeployerService> {
	let config = load_config(config).context("Failed to load configuration")?;
	let log_level = log_level.unwrap_or_else(|| config.deployer.log_level.clone());
	setup_tracing(&log_level)?;

	info!(
		"{} using default network {}",
		config.deployer.name, config.deployer.default_network
	);
	Ok(DeployerService::new(config))
}

fn print_resolution(service: &DeployerService, target: &Target, json: bool) -> Result<()> {
	let resolution = service
		.resolve(target)
		.context("Failed to resolve constructor arguments")?;
	if json {
		println!("{}", serde_json::to_string_pretty(&resolution)?);
		return Ok(());
	}

	println!("network:        {} (chain {})", resolution.network, resolution.chain_id);
	println!("variant:        {}", resolution.variant);
	println!("oracle:         {}", resolution.args.oracle);
	println!(
		"job id:         {} ({})",
		resolution.args.job_id,
		resolution.args.job_id.to_text()
	);
	println!(
		"fee:            {} ({})",
		resolution.args.fee,
		format_units(resolution.args.fee, FEE_DECIMALS)
	);
	println!("token:          {}", resolution.args.token);
	if let Some(class) = resolution.args.required_class {
		println!("required class: {}", class);
	}
	println!("encoded:        {}", resolution.encoded);
	Ok(())
}

fn print_dry_run(
	service: &DeployerService,
	target: &Target,
	artifact: Option<&Path>,
	json: bool,
) -> Result<()> {
	let payload = service.dry_run(target, artifact).context("Dry run failed")?;
	if json {
		println!("{}", serde_json::to_string_pretty(&payload)?);
	} else {
		println!("contract:      {}", payload.contract);
		println!("network:       {}", payload.resolution.network);
		println!("arguments:     {}", payload.resolution.args);
		println!("creation code: {}", payload.creation_code);
	}
	Ok(())
}

async fn deploy(
	service: &DeployerService,
	target: &Target,
	artifact: Option<&Path>,
	json: bool,
) -> Result<()> {
	let receipt = service
		.deploy(target, artifact)
		.await
		.context("Deployment failed")?;
	if json {
		println!("{}", serde_json::to_string_pretty(&receipt)?);
	} else {
		println!("contract address: {}", receipt.contract_address);
		println!("transaction:      {}", receipt.transaction_hash);
		println!("block:            {}", receipt.block_number);
	}
	Ok(())
}

fn print_profiles(service: &DeployerService, json: bool) -> Result<()> {
	if json {
		println!("{}", serde_json::to_string_pretty(&service.config().networks)?);
	} else {
		for line in service.describe_profiles() {
			println!("{}", line);
		}
	}
	Ok(())
}

fn validate_config(path: &Path) -> Result<()> {
	info!("Validating configuration file: {:?}", path);

	let config = ConfigLoader::from_file(path).context("Failed to load configuration")?;
	let service = DeployerService::new(config);
	service
		.check_profiles()
		.context("Configuration does not resolve")?;

	let config = service.config();
	info!("Configuration is valid");
	info!("Deployer name: {}", config.deployer.name);
	for (name, profile) in &config.networks {
		info!(
			"  Network: {} (chain {}), oracle '{}', job '{}'",
			name, profile.chain_id, profile.oracle.active, profile.job.active
		);
	}

	Ok(())
}

fn generate_config(output: &Path) -> Result<()> {
	if output.exists() {
		anyhow::bail!("Refusing to overwrite existing file {:?}", output);
	}

	let contents = ConfigLoader::to_toml(&DeployerConfig::default())?;
	std::fs::write(output, contents)
		.with_context(|| format!("Failed to write configuration to {:?}", output))?;

	info!("Wrote configuration to {:?}", output);
	Ok(())
}

fn setup_tracing(log_level: &str) -> Result<()> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	tracing_subscriber::registry()
		.with(env_filter)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.try_init()
		.context("Failed to initialize tracing")?;

	Ok(())
}
