//! Mode routing
//!
//! The service has a single long-running mode; other CLI commands are
//! one-shot and live in `crate::cli`.

pub mod server;

pub use server::run_server;
