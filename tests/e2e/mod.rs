//! End-to-end tests against the real HetrixTools API
//!
//! Ignored by default; run with `cargo test -- --ignored` and a live
//! `HETRIX_API_TOKEN` in the environment.

mod live_api;
