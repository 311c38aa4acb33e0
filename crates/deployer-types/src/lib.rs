//! Shared types for the oracle request deployer.
//!
//! Value objects that flow from configuration, through parameter
//! resolution, into the deployment call.

pub mod chains;
pub mod delivery;
pub mod errors;
pub mod params;

pub use chains::*;
pub use delivery::*;
pub use errors::*;
pub use params::*;

// Re-export commonly used ethereum types
pub use alloy::primitives::{Address, Bytes, B256, U256};
