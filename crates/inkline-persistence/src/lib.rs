//! # Inkline Persistence Library
//!
//! Persistence layer for the Inkline booking marketplace.
//!
//! ## Architecture
//!
//! This crate implements the Repository pattern over an external hosted
//! datastore, with a Redis cache-aside layer for the hot read paths and a
//! read-after-write retry utility for lookups racing replication:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Application Layer                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Repository Traits                          │
//! │   (ProfileRepository, ArtistRepository, BookingRepository)   │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                   │
//!                    ▼                   ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │     Redis Cache         │   │        ScyllaDB              │
//! │ (Directory, Bookings)   │   │   (Source of Truth)          │
//! └─────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! The datastore acknowledges writes before replicas serve them, so
//! [`retry::fetch_with_retry`] wraps single-record lookups issued right
//! after a write (see [`retry`] for the policy contract).
//!
//! ## Features
//!
//! - `scylla`: Enable ScyllaDB backend (default; implies `redis`)
//! - `redis`: Enable Redis cache layer (default)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inkline_persistence::{
//!     cache::{CacheClient, CacheConfig},
//!     repository::{ScyllaArtistRepository, ScyllaClient, ScyllaConfig},
//!     retry::{fetch_with_retry, RetryPolicy},
//! };
//!
//! // Initialize clients
//! let scylla = Arc::new(ScyllaClient::new(ScyllaConfig::default()).await?);
//! let cache = Arc::new(CacheClient::new(CacheConfig::default()).await?);
//!
//! // Create repository with caching
//! let artists = ScyllaArtistRepository::new(scylla, Some(cache));
//!
//! // Lookup racing replication after artist onboarding
//! let artist = fetch_with_retry(RetryPolicy::artist_read(), || {
//!     artists.get_by_user(user_id)
//! })
//! .await?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

#[cfg(feature = "redis")]
pub mod cache;
pub mod error;
pub mod repository;
pub mod retry;

// Re-export commonly used types
#[cfg(feature = "redis")]
pub use cache::{CacheClient, CacheConfig, SharedCacheClient};
pub use error::{PersistenceError, Result};
pub use repository::{ArtistRepository, BookingRepository, ProfileRepository};
#[cfg(feature = "scylla")]
pub use repository::{
    ScyllaArtistRepository, ScyllaBookingRepository, ScyllaClient, ScyllaConfig,
    ScyllaProfileRepository,
};
pub use retry::{fetch_with_retry, FetchError, RetryPolicy};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the persistence layer with default configuration
///
/// # Errors
///
/// Returns an error if either ScyllaDB or Redis connection fails.
#[cfg(feature = "scylla")]
pub async fn init_default() -> Result<(ScyllaClient, CacheClient)> {
    let scylla = ScyllaClient::new(ScyllaConfig::default()).await?;
    let cache = CacheClient::new(CacheConfig::default()).await?;
    Ok((scylla, cache))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
