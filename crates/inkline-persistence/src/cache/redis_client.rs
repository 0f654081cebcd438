//! # Redis Cache Layer
//!
//! Redis client wrapper with typed operations for marketplace hot paths:
//! the artist directory, single artist storefronts, and per-user booking
//! lists. Profiles are never cached — profile reads must observe the
//! datastore directly so read-after-write retries see fresh state.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::error::Result;
use inkline_domain::{Artist, Booking};

/// Cache TTL configuration
#[derive(Debug, Clone, Copy)]
pub struct CacheTtl {
    pub artist_directory: Duration,
    pub artist_profile: Duration,
    pub customer_bookings: Duration,
    pub artist_bookings: Duration,
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self {
            artist_directory: Duration::from_secs(300),
            artist_profile: Duration::from_secs(120),
            customer_bookings: Duration::from_secs(30),
            artist_bookings: Duration::from_secs(30),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub url: String,
    pub pool_size: usize,
    pub ttl: CacheTtl,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            pool_size: 10,
            ttl: CacheTtl::default(),
        }
    }
}

/// Redis cache client with connection pooling
#[derive(Clone)]
pub struct CacheClient {
    conn: ConnectionManager,
    config: CacheConfig,
}

impl CacheClient {
    /// Create a new cache client
    pub async fn new(config: CacheConfig) -> Result<Self> {
        let client = Client::open(config.url.as_str())?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn, config })
    }

    /// Get raw connection for advanced operations
    pub fn connection(&self) -> ConnectionManager {
        self.conn.clone()
    }

    // =========================================================================
    // GENERIC OPERATIONS
    // =========================================================================

    /// Get a JSON value from cache
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let parsed = serde_json::from_str(&json)?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a JSON value in cache with TTL
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(value)?;
        let _: () = conn.set_ex(key, json, ttl.as_secs()).await?;
        Ok(())
    }

    /// Delete a key from cache
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let deleted: i64 = conn.del(key).await?;
        Ok(deleted > 0)
    }

    /// Delete multiple keys
    pub async fn delete_many(&self, keys: &[String]) -> Result<i64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.conn.clone();
        let deleted: i64 = conn.del(keys).await?;
        Ok(deleted)
    }

    // =========================================================================
    // ARTIST DIRECTORY OPERATIONS
    // =========================================================================

    /// Get the cached artist directory listing
    pub async fn get_artist_directory(&self) -> Result<Option<Vec<Artist>>> {
        self.get_json("artists:directory").await
    }

    /// Cache the artist directory listing
    pub async fn set_artist_directory(&self, artists: &[Artist]) -> Result<()> {
        self.set_json("artists:directory", &artists, self.config.ttl.artist_directory)
            .await
    }

    /// Get a cached artist storefront
    pub async fn get_artist(&self, artist_id: Uuid) -> Result<Option<Artist>> {
        self.get_json(&format!("artist:{artist_id}")).await
    }

    /// Cache an artist storefront
    pub async fn set_artist(&self, artist: &Artist) -> Result<()> {
        self.set_json(
            &format!("artist:{}", artist.id),
            artist,
            self.config.ttl.artist_profile,
        )
        .await
    }

    // =========================================================================
    // BOOKING LIST OPERATIONS
    // =========================================================================

    /// Get a customer's cached booking list
    pub async fn get_customer_bookings(&self, customer_id: Uuid) -> Result<Option<Vec<Booking>>> {
        self.get_json(&format!("bookings:customer:{customer_id}")).await
    }

    /// Cache a customer's booking list
    pub async fn set_customer_bookings(
        &self,
        customer_id: Uuid,
        bookings: &[Booking],
    ) -> Result<()> {
        self.set_json(
            &format!("bookings:customer:{customer_id}"),
            &bookings,
            self.config.ttl.customer_bookings,
        )
        .await
    }

    /// Get an artist's cached booking list
    pub async fn get_artist_bookings(&self, artist_id: Uuid) -> Result<Option<Vec<Booking>>> {
        self.get_json(&format!("bookings:artist:{artist_id}")).await
    }

    /// Cache an artist's booking list
    pub async fn set_artist_bookings(&self, artist_id: Uuid, bookings: &[Booking]) -> Result<()> {
        self.set_json(
            &format!("bookings:artist:{artist_id}"),
            &bookings,
            self.config.ttl.artist_bookings,
        )
        .await
    }

    // =========================================================================
    // CACHE INVALIDATION
    // =========================================================================

    /// Invalidate all cache keys for an artist storefront
    pub async fn invalidate_artist(&self, artist_id: Uuid) -> Result<()> {
        let keys = vec![
            format!("artist:{artist_id}"),
            "artists:directory".to_string(),
        ];

        self.delete_many(&keys).await?;
        Ok(())
    }

    /// Invalidate the booking lists touched by a booking write
    pub async fn invalidate_bookings(&self, customer_id: Uuid, artist_id: Uuid) -> Result<()> {
        let keys = vec![
            format!("bookings:customer:{customer_id}"),
            format!("bookings:artist:{artist_id}"),
        ];

        self.delete_many(&keys).await?;
        Ok(())
    }
}

/// Shared cache client wrapper
pub type SharedCacheClient = Arc<CacheClient>;

/// Create a shared cache client
pub fn shared_cache(client: CacheClient) -> SharedCacheClient {
    Arc::new(client)
}
