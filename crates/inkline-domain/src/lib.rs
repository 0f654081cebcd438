//! # Inkline Booking Marketplace - Domain Model
//!
//! Core domain entities, value objects, and enums for the tattoo-artist
//! booking marketplace. These types are the single source of truth across
//! all layers: persistence and API.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// ENUMS
// =============================================================================

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Customer,
    Artist,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::Artist => "ARTIST",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CUSTOMER" => Ok(Self::Customer),
            "ARTIST" => Ok(Self::Artist),
            "ADMIN" => Ok(Self::Admin),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Terminal statuses admit no further transitions
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

/// Day of week for availability windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "MONDAY",
            Self::Tuesday => "TUESDAY",
            Self::Wednesday => "WEDNESDAY",
            Self::Thursday => "THURSDAY",
            Self::Friday => "FRIDAY",
            Self::Saturday => "SATURDAY",
            Self::Sunday => "SUNDAY",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MONDAY" => Ok(Self::Monday),
            "TUESDAY" => Ok(Self::Tuesday),
            "WEDNESDAY" => Ok(Self::Wednesday),
            "THURSDAY" => Ok(Self::Thursday),
            "FRIDAY" => Ok(Self::Friday),
            "SATURDAY" => Ok(Self::Saturday),
            "SUNDAY" => Ok(Self::Sunday),
            other => Err(DomainError::UnknownDay(other.to_string())),
        }
    }
}

// =============================================================================
// VALUE OBJECTS
// =============================================================================

/// A recurring weekly window in which an artist takes appointments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub day: DayOfWeek,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl AvailabilityWindow {
    #[must_use]
    pub fn contains(&self, day: DayOfWeek, time: NaiveTime) -> bool {
        self.day == day && time >= self.start && time < self.end
    }
}

/// Weekly availability schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub windows: Vec<AvailabilityWindow>,
}

impl Availability {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Whether any window covers the given day and time-of-day
    #[must_use]
    pub fn accepts(&self, day: DayOfWeek, time: NaiveTime) -> bool {
        self.windows.iter().any(|w| w.contains(day, time))
    }
}

// =============================================================================
// ENTITY TYPES
// =============================================================================

/// User profile - one row per account, regardless of role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Identity-provider subject id; primary key
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.avatar_url.is_none()
    }
}

/// Artist entity - public storefront attached to a user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: Uuid,
    /// Owning user profile id
    pub user_id: Uuid,

    // Storefront
    pub bio: Option<String>,
    pub specialties: Vec<String>,
    pub hourly_rate: Option<f64>,
    pub portfolio_images: Vec<String>,
    pub availability: Availability,

    // Reputation
    pub rating: Option<f32>,
    pub total_reviews: i32,

    // Metadata
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Artist {
    /// Fold a new review score into the running average
    pub fn apply_review(&mut self, score: f32) {
        let previous_total = self.rating.unwrap_or(0.0) * self.total_reviews as f32;
        self.total_reviews += 1;
        self.rating = Some((previous_total + score) / self.total_reviews as f32);
    }

    /// Bookable artists have a published rate and at least one open window
    #[must_use]
    pub fn is_bookable(&self) -> bool {
        self.hourly_rate.is_some() && !self.availability.is_empty()
    }
}

/// Partial artist update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistUpdate {
    pub bio: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub hourly_rate: Option<f64>,
    pub portfolio_images: Option<Vec<String>>,
    pub availability: Option<Availability>,
}

impl ArtistUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bio.is_none()
            && self.specialties.is_none()
            && self.hourly_rate.is_none()
            && self.portfolio_images.is_none()
            && self.availability.is_none()
    }
}

/// Booking entity - a requested or scheduled appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub artist_id: Uuid,

    pub appointment_date: DateTime<Utc>,
    pub duration_hours: f32,
    pub status: BookingStatus,
    pub description: Option<String>,
    pub total_amount: Option<f64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Scheduled end of the appointment
    #[must_use]
    pub fn end_time(&self) -> DateTime<Utc> {
        self.appointment_date + Duration::minutes((self.duration_hours * 60.0).round() as i64)
    }

    /// A booking still awaiting or undergoing service
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }
}

// =============================================================================
// QUERY/FILTER TYPES
// =============================================================================

/// Artist directory search criteria
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistSearchFilter {
    /// Free-text match against bio and specialties
    pub text: Option<String>,
    /// Artist must cover at least one of these specialties
    pub specialties: Vec<String>,
    pub min_rating: Option<f32>,
    pub max_hourly_rate: Option<f64>,
}

impl ArtistSearchFilter {
    #[must_use]
    pub fn matches(&self, artist: &Artist) -> bool {
        if let Some(ref text) = self.text {
            let needle = text.to_lowercase();
            let in_bio = artist
                .bio
                .as_deref()
                .is_some_and(|b| b.to_lowercase().contains(&needle));
            let in_specialties = artist
                .specialties
                .iter()
                .any(|s| s.to_lowercase().contains(&needle));
            if !in_bio && !in_specialties {
                return false;
            }
        }

        if !self.specialties.is_empty() {
            let overlap = artist.specialties.iter().any(|s| {
                self.specialties
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(s))
            });
            if !overlap {
                return false;
            }
        }

        if let Some(min_rating) = self.min_rating {
            if artist.rating.unwrap_or(0.0) < min_rating {
                return false;
            }
        }

        if let Some(max_rate) = self.max_hourly_rate {
            match artist.hourly_rate {
                Some(rate) if rate <= max_rate => {}
                _ => return false,
            }
        }

        true
    }
}

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: i32,
    pub offset: i32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Unknown user role: {0}")]
    UnknownRole(String),

    #[error("Unknown booking status: {0}")]
    UnknownStatus(String),

    #[error("Unknown day of week: {0}")]
    UnknownDay(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;

    fn sample_artist() -> Artist {
        Artist {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            bio: Some("Fine-line blackwork and traditional Americana".to_string()),
            specialties: vec!["blackwork".to_string(), "traditional".to_string()],
            hourly_rate: Some(140.0),
            portfolio_images: vec![],
            availability: Availability {
                windows: vec![AvailabilityWindow {
                    day: DayOfWeek::Tuesday,
                    start: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                    end: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
                }],
            },
            rating: None,
            total_reviews: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn role_round_trips_through_wire_form() {
        for role in [UserRole::Customer, UserRole::Artist, UserRole::Admin] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        assert!("OPERATOR".parse::<UserRole>().is_err());
    }

    #[test]
    fn status_terminality() {
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Confirmed.is_terminal());
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
    }

    #[test]
    fn review_average_accumulates() {
        let mut artist = sample_artist();
        artist.apply_review(4.0);
        artist.apply_review(5.0);

        assert_eq!(artist.total_reviews, 2);
        assert!((artist.rating.unwrap() - 4.5).abs() < f32::EPSILON);
    }

    #[test]
    fn availability_window_bounds() {
        let artist = sample_artist();
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let six_pm = NaiveTime::from_hms_opt(18, 0, 0).unwrap();

        assert!(artist.availability.accepts(DayOfWeek::Tuesday, ten));
        // end is exclusive
        assert!(!artist.availability.accepts(DayOfWeek::Tuesday, six_pm));
        assert!(!artist.availability.accepts(DayOfWeek::Wednesday, ten));
    }

    #[test]
    fn booking_end_time_respects_fractional_hours() {
        let start = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            artist_id: Uuid::new_v4(),
            appointment_date: start,
            duration_hours: 2.5,
            status: BookingStatus::Pending,
            description: None,
            total_amount: None,
            created_at: start,
            updated_at: start,
        };

        assert_eq!(booking.end_time(), start + Duration::minutes(150));
        assert!(booking.is_open());
    }

    #[test]
    fn search_filter_matches_text_and_bounds() {
        let artist = sample_artist();

        let by_text = ArtistSearchFilter {
            text: Some("blackwork".to_string()),
            ..Default::default()
        };
        assert!(by_text.matches(&artist));

        let by_rate = ArtistSearchFilter {
            max_hourly_rate: Some(100.0),
            ..Default::default()
        };
        assert!(!by_rate.matches(&artist));

        let by_specialty = ArtistSearchFilter {
            specialties: vec!["Traditional".to_string()],
            ..Default::default()
        };
        assert!(by_specialty.matches(&artist));
    }

    #[test]
    fn profile_serde_round_trip() {
        let profile = UserProfile {
            id: Uuid::new_v4(),
            email: SafeEmail().fake(),
            full_name: Some("Mara Voss".to_string()),
            avatar_url: None,
            role: UserRole::Artist,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"ARTIST\""));
        let back: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
