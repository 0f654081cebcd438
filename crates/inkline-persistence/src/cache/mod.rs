//! # Cache Module
//!
//! Redis cache layer for hot-path data access.

pub mod redis_client;

pub use redis_client::{shared_cache, CacheClient, CacheConfig, CacheTtl, SharedCacheClient};
