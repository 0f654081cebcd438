//! # Repository Module
//!
//! Repository pattern implementations for domain entity persistence.

pub mod traits;

#[cfg(feature = "scylla")]
pub mod scylla_impl;

pub use traits::{ArtistRepository, BookingRepository, ProfileRepository};

#[cfg(feature = "scylla")]
pub use scylla_impl::{
    ScyllaArtistRepository, ScyllaBookingRepository, ScyllaClient, ScyllaConfig,
    ScyllaProfileRepository,
};
