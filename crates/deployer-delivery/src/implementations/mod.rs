//! Concrete deployment backends.

/// EVM deployment over JSON-RPC.
pub mod evm;
