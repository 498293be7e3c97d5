//! Integration tests
//!
//! Route-level tests that drive the actix application against a mock
//! upstream and verify status codes, bodies, and cache headers.

mod routes_tests;
