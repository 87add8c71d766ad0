//! Service layer for business logic
//!
//! The HTTP layer talks to the registry only; the registry talks to the store.

mod registry;

pub use registry::*;
