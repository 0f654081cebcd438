//! # API Context
//!
//! Application state and dependency injection for GraphQL resolvers.
//!
//! All backend clients are constructed once in `main` and injected here;
//! nothing in the crate reaches for a process-wide singleton.

use std::sync::Arc;

use inkline_persistence::{
    CacheClient, RetryPolicy, ScyllaArtistRepository, ScyllaBookingRepository, ScyllaClient,
    ScyllaProfileRepository, SharedCacheClient,
};

/// Application context shared across all GraphQL resolvers
#[derive(Clone)]
pub struct ApiContext {
    /// User profile repository
    pub profiles: Arc<ScyllaProfileRepository>,

    /// Artist storefront repository
    pub artists: Arc<ScyllaArtistRepository>,

    /// Booking repository
    pub bookings: Arc<ScyllaBookingRepository>,

    /// Redis cache client
    pub cache: SharedCacheClient,

    /// Retry policy for profile reads racing replication
    pub profile_read: RetryPolicy,

    /// Retry policy for artist reads racing replication
    pub artist_read: RetryPolicy,
}

impl ApiContext {
    /// Create a new API context with real dependencies
    pub fn new(
        scylla: ScyllaClient,
        cache: CacheClient,
        profile_read: RetryPolicy,
        artist_read: RetryPolicy,
    ) -> Self {
        let scylla = Arc::new(scylla);
        let cache = Arc::new(cache);

        let profiles = Arc::new(ScyllaProfileRepository::new(scylla.clone()));
        let artists = Arc::new(ScyllaArtistRepository::new(
            scylla.clone(),
            Some(cache.clone()),
        ));
        let bookings = Arc::new(ScyllaBookingRepository::new(scylla, Some(cache.clone())));

        Self {
            profiles,
            artists,
            bookings,
            cache,
            profile_read,
            artist_read,
        }
    }
}
