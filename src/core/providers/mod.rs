//! Upstream monitoring providers
//!
//! One module per provider. HetrixTools is currently the only upstream.

pub mod hetrix;
