//! Mapping store backends
//!
//! - `memory`: process-local DashMap, for single-node deployments and tests
//! - `redis`: shared store, atomic operations run as server-side scripts

mod memory;
mod redis;

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;
