//! # API Configuration
//!
//! Environment-based configuration for the GraphQL API service.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use inkline_persistence::RetryPolicy;

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub server_addr: SocketAddr,

    /// Enable GraphQL Playground
    pub enable_playground: bool,

    /// Enable GraphQL introspection
    pub enable_introspection: bool,

    /// Maximum query depth
    pub max_query_depth: usize,

    /// Maximum query complexity
    pub max_query_complexity: usize,

    /// ScyllaDB configuration
    pub scylla: ScyllaSettings,

    /// Redis configuration
    pub redis: RedisSettings,

    /// Read-after-write retry policy for profile lookups
    pub profile_read: RetrySettings,

    /// Read-after-write retry policy for artist lookups
    pub artist_read: RetrySettings,

    /// Logging level
    pub log_level: String,

    /// CORS allowed origins
    pub cors_origins: Vec<String>,
}

/// ScyllaDB connection configuration
#[derive(Debug, Clone)]
pub struct ScyllaSettings {
    pub hosts: Vec<String>,
    pub keyspace: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Redis connection configuration
#[derive(Debug, Clone)]
pub struct RedisSettings {
    pub url: String,
    pub pool_size: usize,
}

/// Bounded-retry settings for reads racing replication
#[derive(Debug, Clone, Copy)]
pub struct RetrySettings {
    pub attempts: u32,
    pub delay_ms: u64,
}

impl RetrySettings {
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.attempts, Duration::from_millis(self.delay_ms))
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let profile_defaults = RetryPolicy::profile_read();
        let artist_defaults = RetryPolicy::artist_read();

        Self {
            server_addr: env::var("SERVER_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
                .parse()
                .expect("Invalid SERVER_ADDR"),

            enable_playground: env::var("ENABLE_PLAYGROUND")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),

            enable_introspection: env::var("ENABLE_INTROSPECTION")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),

            max_query_depth: env::var("MAX_QUERY_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),

            max_query_complexity: env::var("MAX_QUERY_COMPLEXITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),

            scylla: ScyllaSettings {
                hosts: env::var("SCYLLA_HOSTS")
                    .unwrap_or_else(|_| "127.0.0.1:9042".to_string())
                    .split(',')
                    .map(String::from)
                    .collect(),
                keyspace: env::var("SCYLLA_KEYSPACE").unwrap_or_else(|_| "inkline".to_string()),
                username: env::var("SCYLLA_USERNAME").ok(),
                password: env::var("SCYLLA_PASSWORD").ok(),
            },

            redis: RedisSettings {
                url: env::var("REDIS_URL")
                    .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
                pool_size: env::var("REDIS_POOL_SIZE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            },

            profile_read: RetrySettings {
                attempts: env::var("PROFILE_READ_ATTEMPTS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(profile_defaults.max_attempts),
                delay_ms: env::var("PROFILE_READ_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(profile_defaults.delay.as_millis() as u64),
            },

            artist_read: RetrySettings {
                attempts: env::var("ARTIST_READ_ATTEMPTS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(artist_defaults.max_attempts),
                delay_ms: env::var("ARTIST_READ_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(artist_defaults.delay.as_millis() as u64),
            },

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".to_string())
                .split(',')
                .map(String::from)
                .collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_settings_build_policies() {
        let settings = RetrySettings {
            attempts: 4,
            delay_ms: 250,
        };

        assert_eq!(
            settings.policy(),
            RetryPolicy::new(4, Duration::from_millis(250))
        );
    }
}
