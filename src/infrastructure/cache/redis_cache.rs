//! # Redis Product Cache
//!
//! Redis-backed implementation of [`ProductCache`].
//!
//! Products are stored as JSON strings under `{key_prefix}{barcode}`, with
//! an optional expiry.

use crate::context::LookupContext;
use crate::domain::entities::Product;
use crate::domain::value_objects::Barcode;
use crate::infrastructure::cache::error::{CacheError, CacheResult};
use crate::infrastructure::cache::traits::ProductCache;
use async_trait::async_trait;
use redis::{AsyncCommands, RedisError, aio::ConnectionManager};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Default prefix for product keys.
pub const DEFAULT_KEY_PREFIX: &str = "getproduct:product:";

/// Redis implementation of [`ProductCache`].
#[derive(Clone)]
pub struct RedisProductCache {
    conn: ConnectionManager,
    key_prefix: String,
    ttl: Option<Duration>,
}

impl fmt::Debug for RedisProductCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisProductCache")
            .field("connection", &"ConnectionManager")
            .field("key_prefix", &self.key_prefix)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl RedisProductCache {
    /// Connects to Redis at `redis_url`.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Connection` if the URL is invalid or the server
    /// cannot be reached.
    pub async fn connect(
        redis_url: &str,
        key_prefix: impl Into<String>,
        ttl: Option<Duration>,
    ) -> CacheResult<Self> {
        info!("Connecting to Redis product cache at {}", redis_url);

        let client = redis::Client::open(redis_url)
            .map_err(|e| CacheError::connection(format!("Failed to create Redis client: {e}")))?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::connection(format!("Failed to connect to Redis: {e}")))?;

        info!("Successfully connected to Redis product cache");

        Ok(Self {
            conn,
            key_prefix: key_prefix.into(),
            ttl,
        })
    }

    fn key(&self, barcode: &Barcode) -> String {
        cache_key(&self.key_prefix, barcode)
    }
}

#[async_trait]
impl ProductCache for RedisProductCache {
    async fn fetch(&self, ctx: &LookupContext, barcode: &Barcode) -> CacheResult<Option<Product>> {
        let key = self.key(barcode);
        debug!("Cache GET: {}", key);

        let mut conn = self.conn.clone();
        let data = ctx
            .run(conn.get::<_, Option<String>>(&key))
            .await?
            .map_err(map_redis_error)?;

        match data {
            Some(json) => {
                let product = decode_product(&json)?;
                debug!("Cache HIT: {}", key);
                Ok(Some(product))
            }
            None => {
                debug!("Cache MISS: {}", key);
                Ok(None)
            }
        }
    }

    async fn add(&self, ctx: &LookupContext, product: &Product) -> CacheResult<()> {
        let key = self.key(product.barcode());
        let json = encode_product(product)?;
        let expiry = expiry_secs(self.ttl);
        debug!("Cache SET: {} (expiry: {:?}s)", key, expiry);

        let mut conn = self.conn.clone();
        let written = match expiry {
            Some(secs) => ctx.run(conn.set_ex::<_, _, ()>(&key, json, secs)).await?,
            None => ctx.run(conn.set::<_, _, ()>(&key, json)).await?,
        };
        written.map_err(map_redis_error)
    }

    async fn delete(&self, ctx: &LookupContext, barcode: &Barcode) -> CacheResult<()> {
        let key = self.key(barcode);
        debug!("Cache DELETE: {}", key);

        let mut conn = self.conn.clone();
        ctx.run(conn.del::<_, ()>(&key))
            .await?
            .map_err(map_redis_error)
    }
}

/// Encodes a product as the JSON value stored in Redis.
///
/// # Errors
///
/// Returns `CacheError::Serialization` if the product cannot be encoded.
pub fn encode_product(product: &Product) -> CacheResult<String> {
    serde_json::to_string(product)
        .map_err(|e| CacheError::serialization(format!("Failed to serialize product: {e}")))
}

/// Decodes a JSON value read from Redis.
///
/// # Errors
///
/// Returns `CacheError::Serialization` if the value is not a valid product.
pub fn decode_product(json: &str) -> CacheResult<Product> {
    serde_json::from_str(json).map_err(|e| {
        CacheError::serialization(format!("Failed to deserialize cached product: {e}"))
    })
}

/// Expiry in whole seconds for `SET EX`, `None` for entries that never
/// expire. Sub-second TTLs are rounded up to one second.
#[must_use]
pub fn expiry_secs(ttl: Option<Duration>) -> Option<u64> {
    ttl.map(|ttl| ttl.as_secs().max(1))
}

/// Builds the Redis key for a barcode.
#[must_use]
pub fn cache_key(prefix: &str, barcode: &Barcode) -> String {
    format!("{prefix}{barcode}")
}

fn map_redis_error(error: RedisError) -> CacheError {
    if error.is_io_error() || error.is_connection_dropped() || error.is_connection_refusal() {
        CacheError::connection(error.to_string())
    } else {
        CacheError::backend(error.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_prefixes_barcode() {
        let barcode = Barcode::new("4601234567890").unwrap();
        assert_eq!(
            cache_key(DEFAULT_KEY_PREFIX, &barcode),
            "getproduct:product:4601234567890"
        );
        assert_eq!(cache_key("", &barcode), "4601234567890");
    }

    #[tokio::test]
    async fn connect_rejects_invalid_url() {
        let result = RedisProductCache::connect("not-a-redis-url", DEFAULT_KEY_PREFIX, None).await;
        assert!(matches!(result, Err(CacheError::Connection(_))));
    }

    #[test]
    fn encoded_product_decodes_to_same_product() {
        let product = Product::builder(Barcode::new("111").unwrap())
            .name("Milk")
            .unit("l")
            .build();

        let json = encode_product(&product).unwrap();
        assert!(json.contains("\"barcode\":\"111\""));
        assert!(!json.contains("rating"));
        assert_eq!(decode_product(&json).unwrap(), product);
    }

    #[test]
    fn decode_fills_missing_fields() {
        let product = decode_product(r#"{"barcode":"222","name":"Bread"}"#).unwrap();
        assert_eq!(product.name(), "Bread");
        assert_eq!(product.manufacturer(), "");
    }

    #[test]
    fn decode_rejects_corrupt_value() {
        assert!(matches!(
            decode_product("not json"),
            Err(CacheError::Serialization(_))
        ));
        assert!(matches!(
            decode_product(r#"{"barcode":"  ","name":"Blank"}"#),
            Err(CacheError::Serialization(_))
        ));
    }

    #[test]
    fn expiry_follows_ttl() {
        assert_eq!(expiry_secs(None), None);
        assert_eq!(expiry_secs(Some(Duration::from_secs(600))), Some(600));
        assert_eq!(expiry_secs(Some(Duration::from_millis(1500))), Some(1));
    }

    #[test]
    fn sub_second_ttl_rounds_up() {
        assert_eq!(expiry_secs(Some(Duration::from_millis(200))), Some(1));
        assert_eq!(expiry_secs(Some(Duration::ZERO)), Some(1));
    }
}
