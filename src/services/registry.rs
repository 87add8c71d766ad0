//! Code registry
//!
//! Owns the short-code protocol: random code generation with bounded
//! collision retry on create, and atomic click accounting on resolve.
//! All state lives in the injected [`MappingStore`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::{Result, ShortenerError};
use crate::storage::{InsertOutcome, Mapping, MappingStore};
use crate::utils::{
    CODE_LEN, MAX_URL_LEN, generate_random_code, is_reserved_short_code, is_valid_short_code,
    unix_now,
};

/// Conditional inserts attempted before giving up on a create.
pub const MAX_CREATE_ATTEMPTS: u32 = 5;

/// Public error messages, also used as response bodies.
pub const MSG_URL_REQUIRED: &str = "URL is required";
pub const MSG_URL_TOO_LONG: &str = "URL too long";
pub const MSG_INVALID_CODE: &str = "Invalid short code";
pub const MSG_CODE_NOT_FOUND: &str = "Short code not found";

/// Static description served at `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescription {
    pub message: &'static str,
    pub endpoints: EndpointDescription,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointDescription {
    pub shorten: &'static str,
    pub redirect: &'static str,
}

pub struct CodeRegistry {
    store: Arc<dyn MappingStore>,
}

impl CodeRegistry {
    pub fn new(store: Arc<dyn MappingStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn MappingStore> {
        &self.store
    }

    /// Store `long_url` under a fresh random code and return the code.
    ///
    /// A conflicting code is resampled, up to [`MAX_CREATE_ATTEMPTS`] inserts
    /// in total. Store failures are returned as-is without retrying.
    pub async fn create(&self, long_url: &str) -> Result<String> {
        validate_long_url(long_url)?;

        let created_at = unix_now();
        for attempt in 1..=MAX_CREATE_ATTEMPTS {
            let code = fresh_code();
            let mapping = Mapping::new(code.as_str(), long_url, created_at);

            match self.store.put_if_absent(&mapping).await? {
                InsertOutcome::Inserted => {
                    info!("Registry: created '{}' -> '{}'", code, long_url);
                    return Ok(code);
                }
                InsertOutcome::Conflict => {
                    debug!(
                        "Registry: code '{}' already taken (attempt {}/{})",
                        code, attempt, MAX_CREATE_ATTEMPTS
                    );
                }
            }
        }

        warn!(
            "Registry: no free short code after {} attempts",
            MAX_CREATE_ATTEMPTS
        );
        Err(ShortenerError::exhausted_retries(format!(
            "Failed to generate unique code after {} attempts",
            MAX_CREATE_ATTEMPTS
        )))
    }

    /// Record one access of `code` and return its long URL.
    pub async fn resolve(&self, code: &str) -> Result<String> {
        self.resolve_mapping(code).await.map(|m| m.long_url)
    }

    /// Same as [`resolve`](Self::resolve) but returns the updated mapping.
    pub async fn resolve_mapping(&self, code: &str) -> Result<Mapping> {
        if !is_valid_short_code(code) {
            return Err(ShortenerError::invalid_code(MSG_INVALID_CODE));
        }

        match self.store.increment_clicks(code, unix_now()).await? {
            Some(mapping) => {
                debug!("Registry: '{}' resolved, clicks={}", code, mapping.clicks);
                Ok(mapping)
            }
            None => Err(ShortenerError::not_found(MSG_CODE_NOT_FOUND)),
        }
    }

    pub fn describe(&self) -> ServiceDescription {
        ServiceDescription {
            message: "URL Shortener API",
            endpoints: EndpointDescription {
                shorten: "POST /shorten",
                redirect: "GET /{shortCode}",
            },
        }
    }
}

/// Random code that is not shadowed by a fixed route.
///
/// Reserved draws are resampled here so they never consume an insert attempt.
fn fresh_code() -> String {
    loop {
        let code = generate_random_code(CODE_LEN);
        if !is_reserved_short_code(&code) {
            return code;
        }
    }
}

/// Length is counted in characters, not bytes.
pub fn validate_long_url(long_url: &str) -> Result<()> {
    if long_url.is_empty() {
        return Err(ShortenerError::invalid_input(MSG_URL_REQUIRED));
    }
    if long_url.chars().count() > MAX_URL_LEN {
        return Err(ShortenerError::invalid_input(MSG_URL_TOO_LONG));
    }
    Ok(())
}
