use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::trace;

use crate::errors::Result;
use crate::storage::{InsertOutcome, Mapping, MappingStore};

/// In-process store.
///
/// DashMap shard locks give the same guarantees the shared backends get
/// from conditional writes: the vacancy check and the insert happen under
/// one guard, and so does the click increment.
pub struct MemoryStore {
    table: String,
    mappings: DashMap<String, Mapping>,
}

impl MemoryStore {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            mappings: DashMap::new(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[async_trait]
impl MappingStore for MemoryStore {
    async fn put_if_absent(&self, mapping: &Mapping) -> Result<InsertOutcome> {
        match self.mappings.entry(mapping.short_code.clone()) {
            Entry::Occupied(_) => {
                trace!("{}: conditional insert rejected for {}", self.table, mapping.short_code);
                Ok(InsertOutcome::Conflict)
            }
            Entry::Vacant(slot) => {
                slot.insert(mapping.clone());
                Ok(InsertOutcome::Inserted)
            }
        }
    }

    async fn increment_clicks(&self, code: &str, accessed_at: i64) -> Result<Option<Mapping>> {
        let Some(mut entry) = self.mappings.get_mut(code) else {
            return Ok(None);
        };
        entry.clicks = entry.clicks.saturating_add(1);
        entry.last_accessed = accessed_at;
        Ok(Some(entry.value().clone()))
    }

    async fn get(&self, code: &str) -> Result<Option<Mapping>> {
        Ok(self.mappings.get(code).map(|entry| entry.value().clone()))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_put_if_absent_rejects_existing_code() {
        let store = MemoryStore::new("UrlShortener");
        let first = Mapping::new("abc123", "https://a.example", 1);
        let second = Mapping::new("abc123", "https://b.example", 2);

        assert_eq!(store.put_if_absent(&first).await.unwrap(), InsertOutcome::Inserted);
        assert_eq!(store.put_if_absent(&second).await.unwrap(), InsertOutcome::Conflict);

        let stored = store.get("abc123").await.unwrap().unwrap();
        assert_eq!(stored.long_url, "https://a.example");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_increment_missing_code() {
        let store = MemoryStore::new("UrlShortener");
        assert!(store.increment_clicks("zzzzzz", 10).await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_increment_updates_clicks_and_last_accessed() {
        let store = MemoryStore::new("UrlShortener");
        store
            .put_if_absent(&Mapping::new("abc123", "https://a.example", 1))
            .await
            .unwrap();

        let updated = store.increment_clicks("abc123", 42).await.unwrap().unwrap();
        assert_eq!(updated.clicks, 1);
        assert_eq!(updated.last_accessed, 42);
        assert_eq!(updated.created_at, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_not_lost() {
        let store = Arc::new(MemoryStore::new("UrlShortener"));
        store
            .put_if_absent(&Mapping::new("abc123", "https://a.example", 1))
            .await
            .unwrap();

        let handles: Vec<_> = (0..200)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.increment_clicks("abc123", i).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.get("abc123").await.unwrap().unwrap().clicks, 200);
    }
}
