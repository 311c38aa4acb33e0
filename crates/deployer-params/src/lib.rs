//! Constructor parameter resolution for the oracle request contract.
//!
//! Turns a [`NetworkProfile`](deployer_config::NetworkProfile) into the
//! ordered constructor arguments for the selected [`ContractVariant`].
//! Nothing in this crate performs I/O.
//!
//! [`ContractVariant`]: deployer_types::ContractVariant

pub mod fee;
pub mod job_id;
pub mod resolver;

pub use fee::{format_units, parse_fee, parse_units, FEE_DECIMALS};
pub use job_id::encode_job_id;
pub use resolver::ParameterResolver;
