//! ScyllaDB repository implementation.
//!
//! One table per entity plus denormalized lookup tables for the secondary
//! access paths (`artists_by_user`, `bookings_by_customer`,
//! `bookings_by_artist`). Writes rewrite every copy of the row; reads pick
//! the table matching their key.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scylla::{Session, SessionBuilder};
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::SharedCacheClient;
use crate::error::{PersistenceError, Result};
use crate::repository::traits::{ArtistRepository, BookingRepository, ProfileRepository};
use inkline_domain::{
    Artist, ArtistSearchFilter, ArtistUpdate, Availability, Booking, BookingStatus, ProfileUpdate,
    UserProfile, UserRole,
};

// =============================================================================
// SCYLLA CONFIGURATION
// =============================================================================

/// ScyllaDB connection configuration.
#[derive(Debug, Clone)]
pub struct ScyllaConfig {
    pub hosts: Vec<String>,
    pub keyspace: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for ScyllaConfig {
    fn default() -> Self {
        Self {
            hosts: vec!["localhost:9042".to_string()],
            keyspace: "inkline".to_string(),
            username: None,
            password: None,
        }
    }
}

// =============================================================================
// SCYLLA CLIENT
// =============================================================================

/// ScyllaDB client wrapper.
pub struct ScyllaClient {
    session: Arc<Session>,
    pub config: ScyllaConfig,
}

impl ScyllaClient {
    /// Create a new ScyllaDB client.
    pub async fn new(config: ScyllaConfig) -> Result<Self> {
        let mut builder = SessionBuilder::new().known_nodes(&config.hosts);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.user(user, pass);
        }

        let session = builder.build().await?;

        // Use keyspace
        session
            .query_unpaged(format!("USE {}", config.keyspace), ())
            .await?;

        Ok(Self {
            session: Arc::new(session),
            config,
        })
    }

    /// Get session reference.
    pub fn session(&self) -> &Session {
        &self.session
    }
}

fn scylla_err<E: std::fmt::Display>(e: E) -> PersistenceError {
    PersistenceError::Scylla(e.to_string())
}

// =============================================================================
// ROW TYPES
// =============================================================================

type ProfileRow = (
    Uuid,           // id
    String,         // email
    Option<String>, // full_name
    Option<String>, // avatar_url
    String,         // role
    DateTime<Utc>,  // created_at
    DateTime<Utc>,  // updated_at
);

type ArtistRow = (
    Uuid,                // id
    Uuid,                // user_id
    Option<String>,      // bio
    Option<Vec<String>>, // specialties
    Option<f64>,         // hourly_rate
    Option<Vec<String>>, // portfolio_images
    Option<String>,      // availability (JSON)
    Option<f32>,         // rating
    i32,                 // total_reviews
    DateTime<Utc>,       // created_at
    DateTime<Utc>,       // updated_at
);

type BookingRow = (
    Uuid,           // id
    Uuid,           // customer_id
    Uuid,           // artist_id
    DateTime<Utc>,  // appointment_date
    f32,            // duration_hours
    String,         // status
    Option<String>, // description
    Option<f64>,    // total_amount
    DateTime<Utc>,  // created_at
    DateTime<Utc>,  // updated_at
);

fn profile_from_row(row: ProfileRow) -> Result<UserProfile> {
    let (id, email, full_name, avatar_url, role, created_at, updated_at) = row;

    let role: UserRole = role.parse().map_err(|e| PersistenceError::CorruptRow {
        entity_type: "user_profile",
        detail: format!("{e}"),
    })?;

    Ok(UserProfile {
        id,
        email,
        full_name,
        avatar_url,
        role,
        created_at,
        updated_at,
    })
}

fn artist_from_row(row: ArtistRow) -> Result<Artist> {
    let (
        id,
        user_id,
        bio,
        specialties,
        hourly_rate,
        portfolio_images,
        availability,
        rating,
        total_reviews,
        created_at,
        updated_at,
    ) = row;

    Ok(Artist {
        id,
        user_id,
        bio,
        specialties: specialties.unwrap_or_default(),
        hourly_rate,
        portfolio_images: portfolio_images.unwrap_or_default(),
        availability: decode_availability(availability.as_deref())?,
        rating,
        total_reviews,
        created_at,
        updated_at,
    })
}

fn booking_from_row(row: BookingRow) -> Result<Booking> {
    let (
        id,
        customer_id,
        artist_id,
        appointment_date,
        duration_hours,
        status,
        description,
        total_amount,
        created_at,
        updated_at,
    ) = row;

    let status: BookingStatus = status.parse().map_err(|e| PersistenceError::CorruptRow {
        entity_type: "booking",
        detail: format!("{e}"),
    })?;

    Ok(Booking {
        id,
        customer_id,
        artist_id,
        appointment_date,
        duration_hours,
        status,
        description,
        total_amount,
        created_at,
        updated_at,
    })
}

/// Availability is stored as a JSON text column.
fn encode_availability(availability: &Availability) -> Result<String> {
    Ok(serde_json::to_string(availability)?)
}

fn decode_availability(json: Option<&str>) -> Result<Availability> {
    match json {
        None => Ok(Availability::default()),
        Some(raw) => serde_json::from_str(raw).map_err(|e| PersistenceError::CorruptRow {
            entity_type: "artist",
            detail: format!("availability: {e}"),
        }),
    }
}

// =============================================================================
// PROFILE REPOSITORY
// =============================================================================

/// Repository for user profile operations.
///
/// Profiles are deliberately uncached: the read-after-write retry at the API
/// layer needs every lookup to observe the datastore directly.
pub struct ScyllaProfileRepository {
    client: Arc<ScyllaClient>,
}

impl ScyllaProfileRepository {
    /// Create a new profile repository.
    pub fn new(client: Arc<ScyllaClient>) -> Self {
        Self { client }
    }

    async fn insert(&self, profile: &UserProfile) -> Result<()> {
        let query = r#"
            INSERT INTO user_profiles (
                id, email, full_name, avatar_url, role,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        self.client
            .session()
            .query_unpaged(
                query,
                (
                    profile.id,
                    &profile.email,
                    &profile.full_name,
                    &profile.avatar_url,
                    profile.role.as_str(),
                    profile.created_at,
                    profile.updated_at,
                ),
            )
            .await?;

        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for ScyllaProfileRepository {
    async fn create(&self, profile: &UserProfile) -> Result<()> {
        tracing::debug!(user_id = %profile.id, role = %profile.role, "Creating user profile");
        self.insert(profile).await
    }

    async fn get_by_id(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        let query = r#"
            SELECT id, email, full_name, avatar_url, role,
                   created_at, updated_at
            FROM user_profiles
            WHERE id = ?
        "#;

        let result = self
            .client
            .session()
            .query_unpaged(query, (user_id,))
            .await?;

        let rows = result.into_rows_result().map_err(scylla_err)?;
        let row = rows.maybe_first_row::<ProfileRow>().map_err(scylla_err)?;

        row.map(profile_from_row).transpose()
    }

    async fn update(&self, user_id: Uuid, update: &ProfileUpdate) -> Result<Option<UserProfile>> {
        if update.is_empty() {
            return Err(PersistenceError::InvalidQuery(
                "profile update contains no fields".to_string(),
            ));
        }

        let Some(mut profile) = self.get_by_id(user_id).await? else {
            return Ok(None);
        };

        if let Some(full_name) = &update.full_name {
            profile.full_name = Some(full_name.clone());
        }
        if let Some(avatar_url) = &update.avatar_url {
            profile.avatar_url = Some(avatar_url.clone());
        }
        profile.updated_at = Utc::now();

        self.insert(&profile).await?;
        Ok(Some(profile))
    }

    async fn list_all(&self) -> Result<Vec<UserProfile>> {
        let query = r#"
            SELECT id, email, full_name, avatar_url, role,
                   created_at, updated_at
            FROM user_profiles
        "#;

        let result = self.client.session().query_unpaged(query, ()).await?;

        let rows = result.into_rows_result().map_err(scylla_err)?;
        let mut profiles = Vec::new();
        for row in rows.rows::<ProfileRow>().map_err(scylla_err)? {
            profiles.push(profile_from_row(row.map_err(scylla_err)?)?);
        }

        Ok(profiles)
    }
}

// =============================================================================
// ARTIST REPOSITORY
// =============================================================================

/// Repository for artist storefront operations with cache-aside reads.
pub struct ScyllaArtistRepository {
    client: Arc<ScyllaClient>,
    cache: Option<SharedCacheClient>,
}

impl ScyllaArtistRepository {
    /// Create a new artist repository.
    pub fn new(client: Arc<ScyllaClient>, cache: Option<SharedCacheClient>) -> Self {
        Self { client, cache }
    }

    /// Write the artist row into both access-path tables.
    async fn insert(&self, artist: &Artist) -> Result<()> {
        let availability = encode_availability(&artist.availability)?;

        for table in ["artists", "artists_by_user"] {
            let query = format!(
                r#"
                INSERT INTO {table} (
                    id, user_id, bio, specialties, hourly_rate,
                    portfolio_images, availability, rating, total_reviews,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#
            );

            self.client
                .session()
                .query_unpaged(
                    query,
                    (
                        artist.id,
                        artist.user_id,
                        &artist.bio,
                        &artist.specialties,
                        artist.hourly_rate,
                        &artist.portfolio_images,
                        &availability,
                        artist.rating,
                        artist.total_reviews,
                        artist.created_at,
                        artist.updated_at,
                    ),
                )
                .await?;
        }

        Ok(())
    }

    async fn query_one(&self, table: &str, key_column: &str, key: Uuid) -> Result<Option<Artist>> {
        let query = format!(
            r#"
            SELECT id, user_id, bio, specialties, hourly_rate,
                   portfolio_images, availability, rating, total_reviews,
                   created_at, updated_at
            FROM {table}
            WHERE {key_column} = ?
            "#
        );

        let result = self.client.session().query_unpaged(query, (key,)).await?;

        let rows = result.into_rows_result().map_err(scylla_err)?;
        let row = rows.maybe_first_row::<ArtistRow>().map_err(scylla_err)?;

        row.map(artist_from_row).transpose()
    }
}

#[async_trait]
impl ArtistRepository for ScyllaArtistRepository {
    async fn create(&self, artist: &Artist) -> Result<()> {
        tracing::debug!(artist_id = %artist.id, user_id = %artist.user_id, "Creating artist");
        self.insert(artist).await?;

        if let Some(ref cache) = self.cache {
            let _ = cache.invalidate_artist(artist.id).await;
        }

        Ok(())
    }

    async fn get_by_id(&self, artist_id: Uuid) -> Result<Option<Artist>> {
        if let Some(ref cache) = self.cache {
            if let Ok(Some(artist)) = cache.get_artist(artist_id).await {
                tracing::debug!(%artist_id, "Artist cache hit");
                return Ok(Some(artist));
            }
        }

        let artist = self.query_one("artists", "id", artist_id).await?;

        if let (Some(artist), Some(cache)) = (&artist, &self.cache) {
            let _ = cache.set_artist(artist).await;
        }

        Ok(artist)
    }

    async fn get_by_user(&self, user_id: Uuid) -> Result<Option<Artist>> {
        // Uncached: this is the read-after-write path right after artist
        // onboarding, so it must observe the datastore directly.
        self.query_one("artists_by_user", "user_id", user_id).await
    }

    async fn list_all(&self) -> Result<Vec<Artist>> {
        if let Some(ref cache) = self.cache {
            if let Ok(Some(artists)) = cache.get_artist_directory().await {
                tracing::debug!("Artist directory cache hit");
                return Ok(artists);
            }
        }

        let query = r#"
            SELECT id, user_id, bio, specialties, hourly_rate,
                   portfolio_images, availability, rating, total_reviews,
                   created_at, updated_at
            FROM artists
        "#;

        let result = self.client.session().query_unpaged(query, ()).await?;

        let rows = result.into_rows_result().map_err(scylla_err)?;
        let mut artists = Vec::new();
        for row in rows.rows::<ArtistRow>().map_err(scylla_err)? {
            artists.push(artist_from_row(row.map_err(scylla_err)?)?);
        }

        if let Some(ref cache) = self.cache {
            let _ = cache.set_artist_directory(&artists).await;
        }

        Ok(artists)
    }

    async fn update(&self, artist_id: Uuid, update: &ArtistUpdate) -> Result<Option<Artist>> {
        if update.is_empty() {
            return Err(PersistenceError::InvalidQuery(
                "artist update contains no fields".to_string(),
            ));
        }

        let Some(mut artist) = self.query_one("artists", "id", artist_id).await? else {
            return Ok(None);
        };

        if let Some(bio) = &update.bio {
            artist.bio = Some(bio.clone());
        }
        if let Some(specialties) = &update.specialties {
            artist.specialties = specialties.clone();
        }
        if let Some(hourly_rate) = update.hourly_rate {
            artist.hourly_rate = Some(hourly_rate);
        }
        if let Some(portfolio_images) = &update.portfolio_images {
            artist.portfolio_images = portfolio_images.clone();
        }
        if let Some(availability) = &update.availability {
            artist.availability = availability.clone();
        }
        artist.updated_at = Utc::now();

        self.insert(&artist).await?;

        if let Some(ref cache) = self.cache {
            let _ = cache.invalidate_artist(artist_id).await;
        }

        Ok(Some(artist))
    }

    async fn search(&self, filter: &ArtistSearchFilter) -> Result<Vec<Artist>> {
        // The directory is small enough to filter in-process; CQL has no
        // text-match operator for the bio column anyway.
        let artists = self.list_all().await?;
        Ok(artists
            .into_iter()
            .filter(|artist| filter.matches(artist))
            .collect())
    }
}

// =============================================================================
// BOOKING REPOSITORY
// =============================================================================

/// Repository for booking operations with cache-aside list reads.
pub struct ScyllaBookingRepository {
    client: Arc<ScyllaClient>,
    cache: Option<SharedCacheClient>,
}

impl ScyllaBookingRepository {
    /// Create a new booking repository.
    pub fn new(client: Arc<ScyllaClient>, cache: Option<SharedCacheClient>) -> Self {
        Self { client, cache }
    }

    /// Write the booking into the primary table and both list tables.
    async fn insert(&self, booking: &Booking) -> Result<()> {
        for table in ["bookings", "bookings_by_customer", "bookings_by_artist"] {
            let query = format!(
                r#"
                INSERT INTO {table} (
                    id, customer_id, artist_id, appointment_date,
                    duration_hours, status, description, total_amount,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#
            );

            self.client
                .session()
                .query_unpaged(
                    query,
                    (
                        booking.id,
                        booking.customer_id,
                        booking.artist_id,
                        booking.appointment_date,
                        booking.duration_hours,
                        booking.status.as_str(),
                        &booking.description,
                        booking.total_amount,
                        booking.created_at,
                        booking.updated_at,
                    ),
                )
                .await?;
        }

        Ok(())
    }

    async fn query_list(&self, table: &str, key_column: &str, key: Uuid) -> Result<Vec<Booking>> {
        let query = format!(
            r#"
            SELECT id, customer_id, artist_id, appointment_date,
                   duration_hours, status, description, total_amount,
                   created_at, updated_at
            FROM {table}
            WHERE {key_column} = ?
            "#
        );

        let result = self.client.session().query_unpaged(query, (key,)).await?;

        let rows = result.into_rows_result().map_err(scylla_err)?;
        let mut bookings = Vec::new();
        for row in rows.rows::<BookingRow>().map_err(scylla_err)? {
            bookings.push(booking_from_row(row.map_err(scylla_err)?)?);
        }

        Ok(bookings)
    }
}

#[async_trait]
impl BookingRepository for ScyllaBookingRepository {
    async fn create(&self, booking: &Booking) -> Result<()> {
        tracing::debug!(
            booking_id = %booking.id,
            customer_id = %booking.customer_id,
            artist_id = %booking.artist_id,
            "Creating booking"
        );
        self.insert(booking).await?;

        if let Some(ref cache) = self.cache {
            let _ = cache
                .invalidate_bookings(booking.customer_id, booking.artist_id)
                .await;
        }

        Ok(())
    }

    async fn get_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>> {
        let query = r#"
            SELECT id, customer_id, artist_id, appointment_date,
                   duration_hours, status, description, total_amount,
                   created_at, updated_at
            FROM bookings
            WHERE id = ?
        "#;

        let result = self
            .client
            .session()
            .query_unpaged(query, (booking_id,))
            .await?;

        let rows = result.into_rows_result().map_err(scylla_err)?;
        let row = rows.maybe_first_row::<BookingRow>().map_err(scylla_err)?;

        row.map(booking_from_row).transpose()
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Booking>> {
        if let Some(ref cache) = self.cache {
            if let Ok(Some(bookings)) = cache.get_customer_bookings(customer_id).await {
                tracing::debug!(%customer_id, "Customer bookings cache hit");
                return Ok(bookings);
            }
        }

        // bookings_by_customer clusters on appointment_date DESC
        let bookings = self
            .query_list("bookings_by_customer", "customer_id", customer_id)
            .await?;

        if let Some(ref cache) = self.cache {
            let _ = cache.set_customer_bookings(customer_id, &bookings).await;
        }

        Ok(bookings)
    }

    async fn list_by_artist(&self, artist_id: Uuid) -> Result<Vec<Booking>> {
        if let Some(ref cache) = self.cache {
            if let Ok(Some(bookings)) = cache.get_artist_bookings(artist_id).await {
                tracing::debug!(%artist_id, "Artist bookings cache hit");
                return Ok(bookings);
            }
        }

        // bookings_by_artist clusters on appointment_date ASC
        let bookings = self
            .query_list("bookings_by_artist", "artist_id", artist_id)
            .await?;

        if let Some(ref cache) = self.cache {
            let _ = cache.set_artist_bookings(artist_id, &bookings).await;
        }

        Ok(bookings)
    }

    async fn list_all(&self) -> Result<Vec<Booking>> {
        let query = r#"
            SELECT id, customer_id, artist_id, appointment_date,
                   duration_hours, status, description, total_amount,
                   created_at, updated_at
            FROM bookings
        "#;

        let result = self.client.session().query_unpaged(query, ()).await?;

        let rows = result.into_rows_result().map_err(scylla_err)?;
        let mut bookings = Vec::new();
        for row in rows.rows::<BookingRow>().map_err(scylla_err)? {
            bookings.push(booking_from_row(row.map_err(scylla_err)?)?);
        }

        Ok(bookings)
    }

    async fn update_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>> {
        let Some(mut booking) = self.get_by_id(booking_id).await? else {
            return Ok(None);
        };

        booking.status = status;
        booking.updated_at = Utc::now();

        // appointment_date is the clustering key of both list tables, so the
        // rewrite lands on the existing denormalized rows.
        self.insert(&booking).await?;

        if let Some(ref cache) = self.cache {
            let _ = cache
                .invalidate_bookings(booking.customer_id, booking.artist_id)
                .await;
        }

        Ok(Some(booking))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;
    use inkline_domain::{AvailabilityWindow, DayOfWeek};

    #[test]
    fn availability_column_round_trips() {
        let availability = Availability {
            windows: vec![AvailabilityWindow {
                day: DayOfWeek::Friday,
                start: chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                end: chrono::NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
            }],
        };

        let encoded = encode_availability(&availability).unwrap();
        let decoded = decode_availability(Some(&encoded)).unwrap();
        assert_eq!(decoded, availability);
    }

    #[test]
    fn null_availability_column_decodes_to_empty_schedule() {
        let decoded = decode_availability(None).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn corrupt_availability_column_is_reported() {
        let result = decode_availability(Some("{not json"));
        assert!(matches!(
            result,
            Err(PersistenceError::CorruptRow {
                entity_type: "artist",
                ..
            })
        ));
    }

    #[test]
    fn unknown_role_is_a_corrupt_row() {
        let row: ProfileRow = (
            Uuid::new_v4(),
            SafeEmail().fake(),
            None,
            None,
            "SUPERUSER".to_string(),
            Utc::now(),
            Utc::now(),
        );

        assert!(matches!(
            profile_from_row(row),
            Err(PersistenceError::CorruptRow {
                entity_type: "user_profile",
                ..
            })
        ));
    }
}
