//! # GraphQL Input Types
//!
//! Input object definitions for mutations and queries.

use async_graphql::InputObject;
use chrono::{DateTime, NaiveTime, Utc};

use super::enums::*;
use inkline_domain as domain;

// =============================================================================
// AVAILABILITY INPUTS
// =============================================================================

/// A recurring weekly availability window
#[derive(Debug, Clone, InputObject)]
pub struct AvailabilityWindowInput {
    /// Day of week the window repeats on
    pub day: DayOfWeek,
    /// Start of the window (time of day)
    pub start: NaiveTime,
    /// End of the window (exclusive)
    pub end: NaiveTime,
}

impl From<AvailabilityWindowInput> for domain::AvailabilityWindow {
    fn from(w: AvailabilityWindowInput) -> Self {
        Self {
            day: w.day.into(),
            start: w.start,
            end: w.end,
        }
    }
}

pub(crate) fn availability_from_inputs(
    windows: Vec<AvailabilityWindowInput>,
) -> domain::Availability {
    domain::Availability {
        windows: windows
            .into_iter()
            .map(domain::AvailabilityWindow::from)
            .collect(),
    }
}

// =============================================================================
// PROFILE INPUTS
// =============================================================================

/// Input for creating a user profile after signup
#[derive(Debug, Clone, InputObject)]
pub struct CreateProfileInput {
    /// Identity-provider subject id
    pub user_id: String,
    /// Account email
    pub email: String,
    /// Display name
    pub full_name: Option<String>,
    /// Avatar image URL
    pub avatar_url: Option<String>,
    /// Account role
    pub role: UserRole,
}

/// Input for partially updating a profile
#[derive(Debug, Clone, InputObject)]
pub struct UpdateProfileInput {
    /// New display name
    pub full_name: Option<String>,
    /// New avatar image URL
    pub avatar_url: Option<String>,
}

// =============================================================================
// ARTIST INPUTS
// =============================================================================

/// Input for creating an artist storefront
#[derive(Debug, Clone, InputObject)]
pub struct CreateArtistInput {
    /// Owning user profile id
    pub user_id: String,
    /// Storefront biography
    pub bio: Option<String>,
    /// Tattoo styles offered
    #[graphql(default)]
    pub specialties: Vec<String>,
    /// Published hourly rate
    pub hourly_rate: Option<f64>,
    /// Portfolio image URLs
    #[graphql(default)]
    pub portfolio_images: Vec<String>,
    /// Weekly availability windows
    pub availability: Option<Vec<AvailabilityWindowInput>>,
}

/// Input for partially updating an artist storefront
#[derive(Debug, Clone, InputObject)]
pub struct UpdateArtistInput {
    /// New biography
    pub bio: Option<String>,
    /// Replacement specialty list
    pub specialties: Option<Vec<String>>,
    /// New hourly rate
    pub hourly_rate: Option<f64>,
    /// Replacement portfolio image list
    pub portfolio_images: Option<Vec<String>>,
    /// Replacement availability schedule
    pub availability: Option<Vec<AvailabilityWindowInput>>,
}

/// Artist directory search criteria
#[derive(Debug, Clone, InputObject)]
pub struct ArtistSearchInput {
    /// Artist must cover at least one of these specialties
    #[graphql(default)]
    pub specialties: Vec<String>,
    /// Minimum average review score
    pub min_rating: Option<f32>,
    /// Maximum published hourly rate
    pub max_hourly_rate: Option<f64>,
}

// =============================================================================
// BOOKING INPUTS
// =============================================================================

/// Input for requesting a booking
#[derive(Debug, Clone, InputObject)]
pub struct CreateBookingInput {
    /// Customer profile id
    pub customer_id: String,
    /// Artist id
    pub artist_id: String,
    /// Scheduled start of the appointment
    pub appointment_date: DateTime<Utc>,
    /// Appointment length in hours
    pub duration_hours: f32,
    /// Description of the requested work
    pub description: Option<String>,
    /// Quoted total amount
    pub total_amount: Option<f64>,
}

/// Input for transitioning a booking's status
#[derive(Debug, Clone, InputObject)]
pub struct UpdateBookingStatusInput {
    /// Booking id
    pub booking_id: String,
    /// New status
    pub status: BookingStatus,
}
