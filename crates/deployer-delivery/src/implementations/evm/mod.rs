pub mod alloy;

pub use self::alloy::{create_http_deployer, AlloyDeployer};
