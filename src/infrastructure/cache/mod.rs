//! # Product Caches
//!
//! Optional local store consulted before fanning a lookup out.
//!
//! - [`ProductCache`]: fetch, add and delete a product by barcode
//! - [`InMemoryProductCache`]: process-local `HashMap` storage
//! - [`RedisProductCache`]: shared Redis storage

pub mod error;
pub mod in_memory;
pub mod redis_cache;
pub mod traits;

pub use error::{CacheError, CacheResult};
pub use in_memory::InMemoryProductCache;
pub use redis_cache::RedisProductCache;
pub use traits::ProductCache;
