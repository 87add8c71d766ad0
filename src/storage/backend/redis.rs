use std::collections::HashMap;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Script};
use tracing::{debug, error, trace};

use crate::errors::{Result, ShortenerError};
use crate::storage::{InsertOutcome, Mapping, MappingStore};

/// Insert the hash only if the key does not exist. Returns 1 on insert, 0 on conflict.
const INSERT_IF_ABSENT: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 1 then
    return 0
end
redis.call('HSET', KEYS[1],
    'shortCode', ARGV[1],
    'longUrl', ARGV[2],
    'clicks', ARGV[3],
    'createdAt', ARGV[4],
    'lastAccessed', ARGV[5])
return 1
"#;

/// Increment clicks, stamp lastAccessed, return the whole hash. Nil when absent.
const INCREMENT_AND_FETCH: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 0 then
    return false
end
redis.call('HINCRBY', KEYS[1], 'clicks', 1)
redis.call('HSET', KEYS[1], 'lastAccessed', ARGV[1])
return redis.call('HGETALL', KEYS[1])
"#;

/// Redis-backed store: one hash per mapping at `{table}:{shortCode}`.
pub struct RedisStore {
    connection: ConnectionManager,
    key_prefix: String,
    insert_script: Script,
    increment_script: Script,
}

impl RedisStore {
    pub async fn connect(url: &str, table: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(|e| {
            ShortenerError::config(format!("invalid redis url '{}': {}", url, e))
        })?;

        let connection = ConnectionManager::new(client).await.map_err(|e| {
            error!("Failed to connect to Redis at {}: {}", url, e);
            ShortenerError::store_connection(format!("redis connect failed: {e}"))
        })?;
        debug!("Redis connection manager established for table '{}'", table);

        Ok(Self {
            connection,
            key_prefix: format!("{}:", table),
            insert_script: Script::new(INSERT_IF_ABSENT),
            increment_script: Script::new(INCREMENT_AND_FETCH),
        })
    }

    fn make_key(&self, code: &str) -> String {
        format!("{}{}", self.key_prefix, code)
    }
}

/// Rebuild a mapping from a Redis hash.
fn mapping_from_fields(fields: HashMap<String, String>) -> Result<Mapping> {
    fn field<'a>(fields: &'a HashMap<String, String>, name: &str) -> Result<&'a str> {
        fields
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ShortenerError::serialization(format!("mapping hash missing '{name}'")))
    }

    fn number<T: std::str::FromStr>(fields: &HashMap<String, String>, name: &str) -> Result<T> {
        field(fields, name)?
            .parse()
            .map_err(|_| ShortenerError::serialization(format!("mapping field '{name}' is not a number")))
    }

    Ok(Mapping {
        short_code: field(&fields, "shortCode")?.to_string(),
        long_url: field(&fields, "longUrl")?.to_string(),
        clicks: number(&fields, "clicks")?,
        created_at: number(&fields, "createdAt")?,
        last_accessed: number(&fields, "lastAccessed")?,
    })
}

#[async_trait]
impl MappingStore for RedisStore {
    async fn put_if_absent(&self, mapping: &Mapping) -> Result<InsertOutcome> {
        let mut conn = self.connection.clone();
        let inserted: i64 = self
            .insert_script
            .key(self.make_key(&mapping.short_code))
            .arg(&mapping.short_code)
            .arg(&mapping.long_url)
            .arg(mapping.clicks)
            .arg(mapping.created_at)
            .arg(mapping.last_accessed)
            .invoke_async(&mut conn)
            .await?;

        if inserted == 1 {
            Ok(InsertOutcome::Inserted)
        } else {
            trace!("Conditional insert rejected for {}", mapping.short_code);
            Ok(InsertOutcome::Conflict)
        }
    }

    async fn increment_clicks(&self, code: &str, accessed_at: i64) -> Result<Option<Mapping>> {
        let mut conn = self.connection.clone();
        let fields: Option<HashMap<String, String>> = self
            .increment_script
            .key(self.make_key(code))
            .arg(accessed_at)
            .invoke_async(&mut conn)
            .await?;

        fields.map(mapping_from_fields).transpose()
    }

    async fn get(&self, code: &str) -> Result<Option<Mapping>> {
        let mut conn = self.connection.clone();
        let fields: HashMap<String, String> = conn.hgetall(self.make_key(code)).await?;
        if fields.is_empty() {
            return Ok(None);
        }
        mapping_from_fields(fields).map(Some)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
