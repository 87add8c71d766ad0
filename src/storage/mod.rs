use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::StoreConfig;
use crate::errors::{Result, ShortenerError};

pub mod backend;
pub mod models;

pub use backend::{MemoryStore, RedisStore};
pub use models::{InsertOutcome, Mapping};

/// Shared key-value store holding mappings.
///
/// Every method is a single atomic step on the store side. Callers never
/// compose a read with a later write.
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Write `mapping` only if no record with its short code exists.
    async fn put_if_absent(&self, mapping: &Mapping) -> Result<InsertOutcome>;

    /// Add one to `clicks`, set `lastAccessed`, and return the updated record.
    ///
    /// Returns `Ok(None)` when the code is not mapped.
    async fn increment_clicks(&self, code: &str, accessed_at: i64) -> Result<Option<Mapping>>;

    /// Plain read, no side effects.
    async fn get(&self, code: &str) -> Result<Option<Mapping>>;

    /// Round-trip to the backing store.
    async fn ping(&self) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

pub struct StoreFactory;

impl StoreFactory {
    pub async fn create(config: &StoreConfig) -> Result<Arc<dyn MappingStore>> {
        let store: Arc<dyn MappingStore> = match config.backend.as_str() {
            "memory" => Arc::new(MemoryStore::new(&config.table_name)),
            "redis" => Arc::new(RedisStore::connect(&config.redis.url, &config.table_name).await?),
            other => {
                return Err(ShortenerError::config(format!(
                    "unknown store backend '{}'. Valid: {}",
                    other,
                    StoreConfig::SUPPORTED_BACKENDS.join(", ")
                )));
            }
        };

        info!(
            "Mapping store ready: backend={}, table={}",
            store.backend_name(),
            config.table_name
        );
        Ok(store)
    }
}
