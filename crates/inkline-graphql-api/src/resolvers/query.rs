//! # GraphQL Query Resolver
//!
//! Read operations for the booking marketplace API.
//!
//! The two lookups that race replication after a write — a profile read
//! right after signup and an artist read right after onboarding — run
//! through `fetch_with_retry` with the policies configured at startup.
//! Every other read goes straight to the repository.

use async_graphql::{Context, Object, Result, ID};
use uuid::Uuid;

use crate::context::ApiContext;
use crate::error::ApiError;
use crate::schema::*;
use inkline_domain::ArtistSearchFilter;
use inkline_persistence::{
    fetch_with_retry, ArtistRepository, BookingRepository, ProfileRepository,
};

/// GraphQL Query root
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    // =========================================================================
    // PROFILE QUERIES
    // =========================================================================

    /// Get a user profile by identity-provider subject id
    ///
    /// Retries while the profile a signup just created is not yet visible;
    /// returns NOT_FOUND once the retry budget is exhausted.
    #[graphql(name = "profile")]
    async fn get_profile(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Identity-provider subject id")]
        user_id: ID,
    ) -> Result<Profile> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let user_uuid = Uuid::parse_str(&user_id).map_err(ApiError::from)?;

        tracing::debug!(user_id = %user_uuid, "Fetching user profile");

        let profile = fetch_with_retry(api_ctx.profile_read, || {
            api_ctx.profiles.get_by_id(user_uuid)
        })
        .await
        .map_err(|e| ApiError::from_fetch("user_profile", user_uuid, e))?;

        Ok(Profile::from(profile))
    }

    /// List every user profile (admin oversight)
    #[graphql(name = "allProfiles")]
    async fn get_all_profiles(&self, ctx: &Context<'_>) -> Result<Vec<Profile>> {
        let api_ctx = ctx.data::<ApiContext>()?;

        let profiles = api_ctx
            .profiles
            .list_all()
            .await
            .map_err(ApiError::from)?
            .into_iter()
            .map(Profile::from)
            .collect();

        Ok(profiles)
    }

    // =========================================================================
    // ARTIST QUERIES
    // =========================================================================

    /// Get an artist storefront by artist id
    #[graphql(name = "artist")]
    async fn get_artist(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Artist id")]
        id: ID,
    ) -> Result<Option<Artist>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let artist_uuid = Uuid::parse_str(&id).map_err(ApiError::from)?;

        let artist = api_ctx
            .artists
            .get_by_id(artist_uuid)
            .await
            .map_err(ApiError::from)?;

        Ok(artist.map(Artist::from))
    }

    /// Get the artist storefront owned by a user
    ///
    /// This is the lookup issued right after artist onboarding, before the
    /// new storefront row is guaranteed visible; it retries under the
    /// configured artist-read policy.
    #[graphql(name = "artistByUser")]
    async fn get_artist_by_user(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Owning user profile id")]
        user_id: ID,
    ) -> Result<Artist> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let user_uuid = Uuid::parse_str(&user_id).map_err(ApiError::from)?;

        tracing::debug!(user_id = %user_uuid, "Fetching artist by owning user");

        let artist = fetch_with_retry(api_ctx.artist_read, || {
            api_ctx.artists.get_by_user(user_uuid)
        })
        .await
        .map_err(|e| ApiError::from_fetch("artist", user_uuid, e))?;

        Ok(Artist::from(artist))
    }

    /// List the full artist directory
    #[graphql(name = "artists")]
    async fn get_artists(&self, ctx: &Context<'_>) -> Result<Vec<Artist>> {
        let api_ctx = ctx.data::<ApiContext>()?;

        let artists = api_ctx
            .artists
            .list_all()
            .await
            .map_err(ApiError::from)?
            .into_iter()
            .map(Artist::from)
            .collect();

        Ok(artists)
    }

    /// Search the artist directory
    #[graphql(name = "searchArtists")]
    async fn search_artists(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Free-text match against bio and specialties")]
        query: Option<String>,
        #[graphql(desc = "Additional filter criteria")]
        filter: Option<ArtistSearchInput>,
    ) -> Result<Vec<Artist>> {
        let api_ctx = ctx.data::<ApiContext>()?;

        let filter = ArtistSearchFilter {
            text: query.filter(|q| !q.trim().is_empty()),
            specialties: filter
                .as_ref()
                .map(|f| f.specialties.clone())
                .unwrap_or_default(),
            min_rating: filter.as_ref().and_then(|f| f.min_rating),
            max_hourly_rate: filter.as_ref().and_then(|f| f.max_hourly_rate),
        };

        tracing::debug!(?filter, "Searching artist directory");

        let artists = api_ctx
            .artists
            .search(&filter)
            .await
            .map_err(ApiError::from)?
            .into_iter()
            .map(Artist::from)
            .collect();

        Ok(artists)
    }

    // =========================================================================
    // BOOKING QUERIES
    // =========================================================================

    /// Get a booking by id
    #[graphql(name = "booking")]
    async fn get_booking(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Booking id")]
        id: ID,
    ) -> Result<Option<Booking>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let booking_uuid = Uuid::parse_str(&id).map_err(ApiError::from)?;

        let booking = api_ctx
            .bookings
            .get_by_id(booking_uuid)
            .await
            .map_err(ApiError::from)?;

        Ok(booking.map(Booking::from))
    }

    /// Bookings placed by a customer, most recent appointment first
    #[graphql(name = "bookingsByCustomer")]
    async fn get_bookings_by_customer(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Customer profile id")]
        customer_id: ID,
    ) -> Result<Vec<Booking>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let customer_uuid = Uuid::parse_str(&customer_id).map_err(ApiError::from)?;

        let bookings = api_ctx
            .bookings
            .list_by_customer(customer_uuid)
            .await
            .map_err(ApiError::from)?
            .into_iter()
            .map(Booking::from)
            .collect();

        Ok(bookings)
    }

    /// Bookings received by an artist, soonest appointment first
    #[graphql(name = "bookingsByArtist")]
    async fn get_bookings_by_artist(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Artist id")]
        artist_id: ID,
    ) -> Result<Vec<Booking>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let artist_uuid = Uuid::parse_str(&artist_id).map_err(ApiError::from)?;

        let bookings = api_ctx
            .bookings
            .list_by_artist(artist_uuid)
            .await
            .map_err(ApiError::from)?
            .into_iter()
            .map(Booking::from)
            .collect();

        Ok(bookings)
    }

    /// List every booking (admin oversight)
    #[graphql(name = "allBookings")]
    async fn get_all_bookings(&self, ctx: &Context<'_>) -> Result<Vec<Booking>> {
        let api_ctx = ctx.data::<ApiContext>()?;

        let bookings = api_ctx
            .bookings
            .list_all()
            .await
            .map_err(ApiError::from)?
            .into_iter()
            .map(Booking::from)
            .collect();

        Ok(bookings)
    }
}
