//! # Repository Traits
//!
//! Abstract repository interfaces for domain entities.
//! Implementations can be swapped for different backends (ScyllaDB, mock, etc.)
//!
//! Single-record reads return `Ok(None)` for "zero matching rows"; every
//! other failure is an `Err`. Read-after-write callers rely on that split
//! to drive [`crate::retry::fetch_with_retry`].

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use inkline_domain::{
    Artist, ArtistSearchFilter, ArtistUpdate, Booking, BookingStatus, ProfileUpdate, UserProfile,
};

// =============================================================================
// PROFILE REPOSITORY
// =============================================================================

/// Repository for UserProfile entity operations
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Create a new profile
    async fn create(&self, profile: &UserProfile) -> Result<()>;

    /// Get profile by identity-provider subject id
    async fn get_by_id(&self, user_id: Uuid) -> Result<Option<UserProfile>>;

    /// Apply a partial update; returns the updated profile, or `None` if the
    /// profile does not exist
    async fn update(&self, user_id: Uuid, update: &ProfileUpdate) -> Result<Option<UserProfile>>;

    /// List every profile (admin oversight)
    async fn list_all(&self) -> Result<Vec<UserProfile>>;
}

// =============================================================================
// ARTIST REPOSITORY
// =============================================================================

/// Repository for Artist entity operations
#[async_trait]
pub trait ArtistRepository: Send + Sync {
    /// Create a new artist storefront
    async fn create(&self, artist: &Artist) -> Result<()>;

    /// Get artist by artist id
    async fn get_by_id(&self, artist_id: Uuid) -> Result<Option<Artist>>;

    /// Get artist by owning user id
    async fn get_by_user(&self, user_id: Uuid) -> Result<Option<Artist>>;

    /// List the full artist directory
    async fn list_all(&self) -> Result<Vec<Artist>>;

    /// Apply a partial update; returns the updated artist, or `None` if the
    /// artist does not exist
    async fn update(&self, artist_id: Uuid, update: &ArtistUpdate) -> Result<Option<Artist>>;

    /// Search the directory by free text and filter criteria
    async fn search(&self, filter: &ArtistSearchFilter) -> Result<Vec<Artist>>;
}

// =============================================================================
// BOOKING REPOSITORY
// =============================================================================

/// Repository for Booking entity operations
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Create a new booking request
    async fn create(&self, booking: &Booking) -> Result<()>;

    /// Get booking by id
    async fn get_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>>;

    /// Bookings placed by a customer, most recent appointment first
    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Booking>>;

    /// Bookings received by an artist, soonest appointment first
    async fn list_by_artist(&self, artist_id: Uuid) -> Result<Vec<Booking>>;

    /// List every booking (admin oversight)
    async fn list_all(&self) -> Result<Vec<Booking>>;

    /// Transition a booking's status; returns the updated booking, or `None`
    /// if the booking does not exist
    async fn update_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>>;
}
