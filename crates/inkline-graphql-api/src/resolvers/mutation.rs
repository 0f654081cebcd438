//! # GraphQL Mutation Resolver
//!
//! Write operations for the booking marketplace API.

use async_graphql::{Context, Object, Result, ID};
use chrono::Utc;
use uuid::Uuid;

use crate::context::ApiContext;
use crate::error::ApiError;
use crate::schema::*;
use inkline_domain as domain;
use inkline_persistence::{ArtistRepository, BookingRepository, ProfileRepository};

/// GraphQL Mutation root
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    // =========================================================================
    // PROFILE MUTATIONS
    // =========================================================================

    /// Create a user profile after signup
    #[graphql(name = "createProfile")]
    async fn create_profile(
        &self,
        ctx: &Context<'_>,
        input: CreateProfileInput,
    ) -> Result<Profile> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let user_uuid = Uuid::parse_str(&input.user_id).map_err(ApiError::from)?;

        if input.email.trim().is_empty() {
            return Err(ApiError::InvalidInput("email must not be empty".to_string()).into());
        }

        tracing::info!(user_id = %user_uuid, role = ?input.role, "Creating user profile");

        let now = Utc::now();
        let profile = domain::UserProfile {
            id: user_uuid,
            email: input.email,
            full_name: input.full_name,
            avatar_url: input.avatar_url,
            role: input.role.into(),
            created_at: now,
            updated_at: now,
        };

        api_ctx
            .profiles
            .create(&profile)
            .await
            .map_err(ApiError::from)?;

        Ok(Profile::from(profile))
    }

    /// Partially update a user profile
    #[graphql(name = "updateProfile")]
    async fn update_profile(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Identity-provider subject id")]
        user_id: ID,
        input: UpdateProfileInput,
    ) -> Result<Profile> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let user_uuid = Uuid::parse_str(&user_id).map_err(ApiError::from)?;

        let update = domain::ProfileUpdate {
            full_name: input.full_name,
            avatar_url: input.avatar_url,
        };
        if update.is_empty() {
            return Err(ApiError::InvalidInput("no fields to update".to_string()).into());
        }

        tracing::info!(user_id = %user_uuid, "Updating user profile");

        let profile = api_ctx
            .profiles
            .update(user_uuid, &update)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::NotFound {
                entity_type: "user_profile".to_string(),
                id: user_uuid.to_string(),
            })?;

        Ok(Profile::from(profile))
    }

    // =========================================================================
    // ARTIST MUTATIONS
    // =========================================================================

    /// Create an artist storefront for a user
    #[graphql(name = "createArtistProfile")]
    async fn create_artist_profile(
        &self,
        ctx: &Context<'_>,
        input: CreateArtistInput,
    ) -> Result<Artist> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let user_uuid = Uuid::parse_str(&input.user_id).map_err(ApiError::from)?;

        if input.hourly_rate.is_some_and(|rate| rate < 0.0) {
            return Err(ApiError::InvalidInput("hourly rate must not be negative".to_string()).into());
        }

        let artist_id = Uuid::new_v4();
        tracing::info!(%artist_id, user_id = %user_uuid, "Creating artist storefront");

        let now = Utc::now();
        let artist = domain::Artist {
            id: artist_id,
            user_id: user_uuid,
            bio: input.bio,
            specialties: input.specialties,
            hourly_rate: input.hourly_rate,
            portfolio_images: input.portfolio_images,
            availability: input
                .availability
                .map(availability_from_inputs)
                .unwrap_or_default(),
            rating: None,
            total_reviews: 0,
            created_at: now,
            updated_at: now,
        };

        api_ctx
            .artists
            .create(&artist)
            .await
            .map_err(ApiError::from)?;

        Ok(Artist::from(artist))
    }

    /// Partially update an artist storefront
    #[graphql(name = "updateArtistProfile")]
    async fn update_artist_profile(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Artist id")]
        artist_id: ID,
        input: UpdateArtistInput,
    ) -> Result<Artist> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let artist_uuid = Uuid::parse_str(&artist_id).map_err(ApiError::from)?;

        if input.hourly_rate.is_some_and(|rate| rate < 0.0) {
            return Err(ApiError::InvalidInput("hourly rate must not be negative".to_string()).into());
        }

        let update = domain::ArtistUpdate {
            bio: input.bio,
            specialties: input.specialties,
            hourly_rate: input.hourly_rate,
            portfolio_images: input.portfolio_images,
            availability: input.availability.map(availability_from_inputs),
        };
        if update.is_empty() {
            return Err(ApiError::InvalidInput("no fields to update".to_string()).into());
        }

        tracing::info!(artist_id = %artist_uuid, "Updating artist storefront");

        let artist = api_ctx
            .artists
            .update(artist_uuid, &update)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::NotFound {
                entity_type: "artist".to_string(),
                id: artist_uuid.to_string(),
            })?;

        Ok(Artist::from(artist))
    }

    // =========================================================================
    // BOOKING MUTATIONS
    // =========================================================================

    /// Request a booking with an artist
    ///
    /// New bookings always start in PENDING until the artist responds.
    #[graphql(name = "createBooking")]
    async fn create_booking(
        &self,
        ctx: &Context<'_>,
        input: CreateBookingInput,
    ) -> Result<Booking> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let customer_uuid = Uuid::parse_str(&input.customer_id).map_err(ApiError::from)?;
        let artist_uuid = Uuid::parse_str(&input.artist_id).map_err(ApiError::from)?;

        if input.duration_hours <= 0.0 {
            return Err(ApiError::InvalidInput("duration must be positive".to_string()).into());
        }

        let booking_id = Uuid::new_v4();
        tracing::info!(
            %booking_id,
            customer_id = %customer_uuid,
            artist_id = %artist_uuid,
            appointment_date = %input.appointment_date,
            "Creating booking"
        );

        let now = Utc::now();
        let booking = domain::Booking {
            id: booking_id,
            customer_id: customer_uuid,
            artist_id: artist_uuid,
            appointment_date: input.appointment_date,
            duration_hours: input.duration_hours,
            status: domain::BookingStatus::Pending,
            description: input.description,
            total_amount: input.total_amount,
            created_at: now,
            updated_at: now,
        };

        api_ctx
            .bookings
            .create(&booking)
            .await
            .map_err(ApiError::from)?;

        Ok(Booking::from(booking))
    }

    /// Transition a booking's status
    #[graphql(name = "updateBookingStatus")]
    async fn update_booking_status(
        &self,
        ctx: &Context<'_>,
        input: UpdateBookingStatusInput,
    ) -> Result<Booking> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let booking_uuid = Uuid::parse_str(&input.booking_id).map_err(ApiError::from)?;

        tracing::info!(
            booking_id = %booking_uuid,
            status = ?input.status,
            "Updating booking status"
        );

        let booking = api_ctx
            .bookings
            .update_status(booking_uuid, input.status.into())
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::NotFound {
                entity_type: "booking".to_string(),
                id: booking_uuid.to_string(),
            })?;

        Ok(Booking::from(booking))
    }
}
