//! Code registry tests
//!
//! Create/resolve semantics against the in-memory store, plus stub stores
//! for the collision budget and store failures.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use linkvault::errors::{Result, ShortenerError};
use linkvault::services::{CodeRegistry, MAX_CREATE_ATTEMPTS};
use linkvault::storage::{InsertOutcome, Mapping, MappingStore, MemoryStore};
use linkvault::utils::{MAX_URL_LEN, is_valid_short_code};

// =============================================================================
// Test Setup
// =============================================================================

fn memory_registry() -> (Arc<MemoryStore>, CodeRegistry) {
    let store = Arc::new(MemoryStore::new("UrlShortener"));
    let registry = CodeRegistry::new(store.clone());
    (store, registry)
}

/// Store whose conditional insert always reports a conflict.
#[derive(Default)]
struct AlwaysConflictStore {
    attempts: AtomicU32,
}

#[async_trait]
impl MappingStore for AlwaysConflictStore {
    async fn put_if_absent(&self, _mapping: &Mapping) -> Result<InsertOutcome> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Ok(InsertOutcome::Conflict)
    }

    async fn increment_clicks(&self, _code: &str, _accessed_at: i64) -> Result<Option<Mapping>> {
        Ok(None)
    }

    async fn get(&self, _code: &str) -> Result<Option<Mapping>> {
        Ok(None)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "always-conflict"
    }
}

/// Store that conflicts a fixed number of times, then accepts.
struct ConflictThenInsertStore {
    conflicts_left: AtomicU32,
    inner: MemoryStore,
}

#[async_trait]
impl MappingStore for ConflictThenInsertStore {
    async fn put_if_absent(&self, mapping: &Mapping) -> Result<InsertOutcome> {
        let left = self.conflicts_left.load(Ordering::SeqCst);
        if left > 0 {
            self.conflicts_left.store(left - 1, Ordering::SeqCst);
            return Ok(InsertOutcome::Conflict);
        }
        self.inner.put_if_absent(mapping).await
    }

    async fn increment_clicks(&self, code: &str, accessed_at: i64) -> Result<Option<Mapping>> {
        self.inner.increment_clicks(code, accessed_at).await
    }

    async fn get(&self, code: &str) -> Result<Option<Mapping>> {
        self.inner.get(code).await
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "conflict-then-insert"
    }
}

/// Store where every call fails.
#[derive(Default)]
struct FailingStore {
    calls: AtomicU32,
}

#[async_trait]
impl MappingStore for FailingStore {
    async fn put_if_absent(&self, _mapping: &Mapping) -> Result<InsertOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ShortenerError::store_connection("connection reset"))
    }

    async fn increment_clicks(&self, _code: &str, _accessed_at: i64) -> Result<Option<Mapping>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ShortenerError::store_operation("throttled"))
    }

    async fn get(&self, _code: &str) -> Result<Option<Mapping>> {
        Err(ShortenerError::store_operation("throttled"))
    }

    async fn ping(&self) -> Result<()> {
        Err(ShortenerError::store_connection("down"))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

// =============================================================================
// create / resolve
// =============================================================================

#[tokio::test]
async fn test_create_then_resolve_returns_long_url() {
    let (store, registry) = memory_registry();
    let url = "https://example.com/some/very/long/path?with=query";

    let code = registry.create(url).await.unwrap();
    assert!(is_valid_short_code(&code));

    let stored = store.get(&code).await.unwrap().unwrap();
    assert_eq!(stored.long_url, url);
    assert_eq!(stored.clicks, 0);
    assert_eq!(stored.last_accessed, 0);
    assert!(stored.created_at > 0);

    assert_eq!(registry.resolve(&code).await.unwrap(), url);
}

#[tokio::test]
async fn test_create_accepts_max_length_url() {
    let (_, registry) = memory_registry();
    let url = "a".repeat(MAX_URL_LEN);

    let code = registry.create(&url).await.unwrap();
    assert_eq!(registry.resolve(&code).await.unwrap(), url);
}

#[tokio::test]
async fn test_create_rejects_empty_and_oversized_without_writing() {
    let (store, registry) = memory_registry();

    let err = registry.create("").await.unwrap_err();
    assert!(matches!(err, ShortenerError::InvalidInput(_)));

    let err = registry.create(&"a".repeat(MAX_URL_LEN + 1)).await.unwrap_err();
    assert!(matches!(err, ShortenerError::InvalidInput(_)));

    assert!(store.is_empty());
}

#[tokio::test]
async fn test_resolve_increments_by_one_per_call() {
    let (store, registry) = memory_registry();
    let code = registry.create("https://example.com").await.unwrap();

    for expected in 1..=3 {
        let mapping = registry.resolve_mapping(&code).await.unwrap();
        assert_eq!(mapping.clicks, expected);
        assert!(mapping.last_accessed > 0);
    }
    assert_eq!(store.get(&code).await.unwrap().unwrap().clicks, 3);
}

#[tokio::test]
async fn test_resolve_rejects_malformed_codes() {
    let (_, registry) = memory_registry();

    for code in ["abc", "ab_123", "abc1234", "", "abc 12"] {
        let err = registry.resolve(code).await.unwrap_err();
        assert!(
            matches!(err, ShortenerError::InvalidCode(_)),
            "expected InvalidCode for {code:?}"
        );
    }
}

#[tokio::test]
async fn test_resolve_unmapped_code_is_not_found() {
    let (_, registry) = memory_registry();
    let err = registry.resolve("zzzzzz").await.unwrap_err();
    assert!(matches!(err, ShortenerError::NotFound(_)));
}

#[test]
fn test_describe_lists_endpoints() {
    let (_, registry) = memory_registry();
    let value = serde_json::to_value(registry.describe()).unwrap();

    assert_eq!(value["message"], "URL Shortener API");
    assert_eq!(value["endpoints"]["shorten"], "POST /shorten");
    assert_eq!(value["endpoints"]["redirect"], "GET /{shortCode}");
}

// =============================================================================
// collision budget
// =============================================================================

#[tokio::test]
async fn test_create_gives_up_after_retry_budget() {
    let store = Arc::new(AlwaysConflictStore::default());
    let registry = CodeRegistry::new(store.clone());

    let err = registry.create("https://example.com").await.unwrap_err();
    assert!(matches!(err, ShortenerError::ExhaustedRetries(_)));
    assert_eq!(err.http_status(), 500);
    assert_eq!(store.attempts.load(Ordering::SeqCst), MAX_CREATE_ATTEMPTS);
}

#[tokio::test]
async fn test_create_recovers_from_collisions_within_budget() {
    let store = Arc::new(ConflictThenInsertStore {
        conflicts_left: AtomicU32::new(MAX_CREATE_ATTEMPTS - 2),
        inner: MemoryStore::new("UrlShortener"),
    });
    let registry = CodeRegistry::new(store.clone());

    let code = registry.create("https://example.com").await.unwrap();
    assert_eq!(
        store.get(&code).await.unwrap().unwrap().long_url,
        "https://example.com"
    );
}

// =============================================================================
// store failures
// =============================================================================

#[tokio::test]
async fn test_store_failure_on_create_is_not_retried() {
    let store = Arc::new(FailingStore::default());
    let registry = CodeRegistry::new(store.clone());

    let err = registry.create("https://example.com").await.unwrap_err();
    assert!(matches!(err, ShortenerError::StoreConnection(_)));
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_store_failure_on_resolve_propagates() {
    let registry = CodeRegistry::new(Arc::new(FailingStore::default()));

    let err = registry.resolve("abc123").await.unwrap_err();
    assert!(matches!(err, ShortenerError::StoreOperation(_)));
    assert_eq!(err.http_status(), 500);
}

// =============================================================================
// concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_resolves_lose_no_clicks() {
    let (store, registry) = memory_registry();
    let registry = Arc::new(registry);
    let code = registry.create("https://example.com").await.unwrap();

    let handles: Vec<_> = (0..500)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let code = code.clone();
            tokio::spawn(async move { registry.resolve(&code).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.get(&code).await.unwrap().unwrap().clicks, 500);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_creates_yield_unique_codes() {
    let (store, registry) = memory_registry();
    let registry = Arc::new(registry);

    let handles: Vec<_> = (0..300)
        .map(|i| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { registry.create(&format!("https://example.com/{i}")).await })
        })
        .collect();

    let mut codes = HashSet::new();
    for handle in handles {
        let code = handle.await.unwrap().unwrap();
        assert!(codes.insert(code), "duplicate short code handed out");
    }

    assert_eq!(store.len(), 300);
    for code in &codes {
        let mapping = store.get(code).await.unwrap().unwrap();
        assert_eq!(&mapping.short_code, code);
    }
}
