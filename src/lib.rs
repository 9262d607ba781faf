// ABOUTME: Library root for openfaas-deploy - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod error;
pub mod output;
pub mod process;
pub mod types;
