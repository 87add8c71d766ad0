//! linkvault - URL shortener service
//!
//! Hands out random 6-character codes for long URLs and redirects them,
//! counting every access. All state lives in a shared key-value store;
//! uniqueness comes from conditional inserts and click counts from atomic
//! increments, so any number of instances can serve side by side.
//!
//! # Architecture
//! - `services`: the code registry (create, resolve, describe)
//! - `storage`: `MappingStore` trait with memory and Redis backends
//! - `api`: HTTP routes, JSON envelopes, CORS headers
//! - `config`: static configuration loaded at startup
//! - `runtime`: startup wiring and server mode
//! - `system`: logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
