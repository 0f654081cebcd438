//! # GraphQL Output Types
//!
//! Object type definitions for GraphQL responses.

use async_graphql::{Object, SimpleObject, ID};
use chrono::{DateTime, NaiveTime, Utc};

use super::enums::*;
use inkline_domain as domain;

// =============================================================================
// VALUE OBJECTS
// =============================================================================

/// A recurring weekly window in which an artist takes appointments
#[derive(Debug, Clone, SimpleObject)]
pub struct AvailabilityWindow {
    /// Day of week the window repeats on
    pub day: DayOfWeek,
    /// Start of the window (time of day)
    pub start: NaiveTime,
    /// End of the window (exclusive)
    pub end: NaiveTime,
}

impl From<domain::AvailabilityWindow> for AvailabilityWindow {
    fn from(w: domain::AvailabilityWindow) -> Self {
        Self {
            day: w.day.into(),
            start: w.start,
            end: w.end,
        }
    }
}

// =============================================================================
// PROFILE TYPES
// =============================================================================

/// User profile - one per account, regardless of role
#[derive(Debug, Clone, SimpleObject)]
pub struct Profile {
    /// Identity-provider subject id
    pub id: ID,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<domain::UserProfile> for Profile {
    fn from(p: domain::UserProfile) -> Self {
        Self {
            id: ID(p.id.to_string()),
            email: p.email,
            full_name: p.full_name,
            avatar_url: p.avatar_url,
            role: p.role.into(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

// =============================================================================
// ARTIST TYPES
// =============================================================================

/// Artist storefront
#[derive(Debug, Clone)]
pub struct Artist {
    pub id: String,
    pub user_id: String,
    pub bio: Option<String>,
    pub specialties: Vec<String>,
    pub hourly_rate: Option<f64>,
    pub portfolio_images: Vec<String>,
    pub availability: Vec<AvailabilityWindow>,
    pub rating: Option<f32>,
    pub total_reviews: i32,
    pub bookable: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[Object]
impl Artist {
    /// Unique artist identifier
    async fn id(&self) -> ID {
        ID(self.id.clone())
    }

    /// Owning user profile id
    async fn user_id(&self) -> ID {
        ID(self.user_id.clone())
    }

    /// Storefront biography
    async fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    /// Tattoo styles offered
    async fn specialties(&self) -> &[String] {
        &self.specialties
    }

    /// Published hourly rate
    async fn hourly_rate(&self) -> Option<f64> {
        self.hourly_rate
    }

    /// Portfolio image URLs
    async fn portfolio_images(&self) -> &[String] {
        &self.portfolio_images
    }

    /// Weekly availability windows
    async fn availability(&self) -> &[AvailabilityWindow] {
        &self.availability
    }

    /// Average review score (0-5), absent until the first review
    async fn rating(&self) -> Option<f32> {
        self.rating
    }

    /// Number of reviews received
    async fn total_reviews(&self) -> i32 {
        self.total_reviews
    }

    /// Whether the storefront can accept bookings right now
    async fn bookable(&self) -> bool {
        self.bookable
    }

    /// Storefront creation timestamp
    async fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last storefront update
    async fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl From<domain::Artist> for Artist {
    fn from(a: domain::Artist) -> Self {
        let bookable = a.is_bookable();
        Self {
            id: a.id.to_string(),
            user_id: a.user_id.to_string(),
            bio: a.bio,
            specialties: a.specialties,
            hourly_rate: a.hourly_rate,
            portfolio_images: a.portfolio_images,
            availability: a
                .availability
                .windows
                .into_iter()
                .map(AvailabilityWindow::from)
                .collect(),
            rating: a.rating,
            total_reviews: a.total_reviews,
            bookable,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

// =============================================================================
// BOOKING TYPES
// =============================================================================

/// A requested or scheduled appointment
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: String,
    pub customer_id: String,
    pub artist_id: String,
    pub appointment_date: DateTime<Utc>,
    pub duration_hours: f32,
    pub status: BookingStatus,
    pub description: Option<String>,
    pub total_amount: Option<f64>,
    pub end_time: DateTime<Utc>,
    pub open: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[Object]
impl Booking {
    /// Unique booking identifier
    async fn id(&self) -> ID {
        ID(self.id.clone())
    }

    /// Customer profile id
    async fn customer_id(&self) -> ID {
        ID(self.customer_id.clone())
    }

    /// Artist id
    async fn artist_id(&self) -> ID {
        ID(self.artist_id.clone())
    }

    /// Scheduled start of the appointment
    async fn appointment_date(&self) -> DateTime<Utc> {
        self.appointment_date
    }

    /// Appointment length in hours
    async fn duration_hours(&self) -> f32 {
        self.duration_hours
    }

    /// Scheduled end of the appointment
    async fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    /// Booking lifecycle status
    async fn status(&self) -> BookingStatus {
        self.status
    }

    /// Whether the booking still awaits or is undergoing service
    async fn open(&self) -> bool {
        self.open
    }

    /// Customer's description of the requested work
    async fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Quoted total amount
    async fn total_amount(&self) -> Option<f64> {
        self.total_amount
    }

    /// Booking creation timestamp
    async fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last booking update
    async fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl From<domain::Booking> for Booking {
    fn from(b: domain::Booking) -> Self {
        let end_time = b.end_time();
        let open = b.is_open();
        Self {
            id: b.id.to_string(),
            customer_id: b.customer_id.to_string(),
            artist_id: b.artist_id.to_string(),
            appointment_date: b.appointment_date,
            duration_hours: b.duration_hours,
            status: b.status.into(),
            description: b.description,
            total_amount: b.total_amount,
            end_time,
            open,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}
