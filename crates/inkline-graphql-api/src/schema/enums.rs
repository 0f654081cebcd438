//! # GraphQL Enum Types
//!
//! Enum definitions for the GraphQL schema.

use async_graphql::Enum;
use inkline_domain as domain;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Books appointments with artists
    Customer,
    /// Offers appointments through a storefront
    Artist,
    /// Oversees users and bookings
    Admin,
}

impl From<domain::UserRole> for UserRole {
    fn from(r: domain::UserRole) -> Self {
        match r {
            domain::UserRole::Customer => Self::Customer,
            domain::UserRole::Artist => Self::Artist,
            domain::UserRole::Admin => Self::Admin,
        }
    }
}

impl From<UserRole> for domain::UserRole {
    fn from(r: UserRole) -> Self {
        match r {
            UserRole::Customer => Self::Customer,
            UserRole::Artist => Self::Artist,
            UserRole::Admin => Self::Admin,
        }
    }
}

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Requested by the customer, awaiting the artist
    Pending,
    /// Accepted by the artist
    Confirmed,
    /// Appointment took place
    Completed,
    /// Withdrawn by either party
    Cancelled,
}

impl From<domain::BookingStatus> for BookingStatus {
    fn from(s: domain::BookingStatus) -> Self {
        match s {
            domain::BookingStatus::Pending => Self::Pending,
            domain::BookingStatus::Confirmed => Self::Confirmed,
            domain::BookingStatus::Completed => Self::Completed,
            domain::BookingStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<BookingStatus> for domain::BookingStatus {
    fn from(s: BookingStatus) -> Self {
        match s {
            BookingStatus::Pending => Self::Pending,
            BookingStatus::Confirmed => Self::Confirmed,
            BookingStatus::Completed => Self::Completed,
            BookingStatus::Cancelled => Self::Cancelled,
        }
    }
}

/// Day of week for availability windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<domain::DayOfWeek> for DayOfWeek {
    fn from(d: domain::DayOfWeek) -> Self {
        match d {
            domain::DayOfWeek::Monday => Self::Monday,
            domain::DayOfWeek::Tuesday => Self::Tuesday,
            domain::DayOfWeek::Wednesday => Self::Wednesday,
            domain::DayOfWeek::Thursday => Self::Thursday,
            domain::DayOfWeek::Friday => Self::Friday,
            domain::DayOfWeek::Saturday => Self::Saturday,
            domain::DayOfWeek::Sunday => Self::Sunday,
        }
    }
}

impl From<DayOfWeek> for domain::DayOfWeek {
    fn from(d: DayOfWeek) -> Self {
        match d {
            DayOfWeek::Monday => Self::Monday,
            DayOfWeek::Tuesday => Self::Tuesday,
            DayOfWeek::Wednesday => Self::Wednesday,
            DayOfWeek::Thursday => Self::Thursday,
            DayOfWeek::Friday => Self::Friday,
            DayOfWeek::Saturday => Self::Saturday,
            DayOfWeek::Sunday => Self::Sunday,
        }
    }
}
