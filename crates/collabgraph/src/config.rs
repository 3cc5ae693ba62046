use std::{env, time::Duration};

use collabgraph_core::research::PROFILE_TTL_SECONDS;

/// Store configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Profile cache TTL in seconds (default: 60)
    pub profile_ttl_seconds: u64,
    /// Maximum number of in-memory cache entries (default: 10,000)
    #[cfg_attr(not(feature = "memory"), allow(dead_code))]
    pub cache_max_entries: usize,
    /// Path to SQLite database file (default: "collabgraph.db")
    #[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
    pub sqlite_path: String,
    /// Redis connection URL
    #[cfg_attr(not(feature = "redis"), allow(dead_code))]
    pub redis_url: String,
    /// Neo4j Bolt URI (default: "bolt://localhost:7687")
    #[cfg_attr(not(feature = "neo4j"), allow(dead_code))]
    pub neo4j_uri: String,
    #[cfg_attr(not(feature = "neo4j"), allow(dead_code))]
    pub neo4j_username: String,
    #[cfg_attr(not(feature = "neo4j"), allow(dead_code))]
    pub neo4j_password: String,
    #[cfg_attr(not(feature = "neo4j"), allow(dead_code))]
    pub neo4j_database: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PROFILE_TTL_SECONDS` - Profile cache TTL in seconds (default: 60)
    /// - `CACHE_MAX_ENTRIES` - Maximum in-memory cache entries (default: 10,000)
    /// - `SQLITE_PATH` - SQLite database path (default: "collabgraph.db")
    /// - `REDIS_URL` - Redis connection URL; when unset it is built from
    ///   `REDIS_HOST` (default "localhost"), `REDIS_PORT` (default 6379) and
    ///   `REDIS_PASSWORD`
    /// - `NEO4J_URI`, `NEO4J_USERNAME`, `NEO4J_PASSWORD`, `NEO4J_DATABASE`
    pub fn from_env() -> Self {
        Self {
            profile_ttl_seconds: env::var("PROFILE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(PROFILE_TTL_SECONDS),
            cache_max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "collabgraph.db".to_string()),
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| {
                redis_url_from_parts(
                    &env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string()),
                    env::var("REDIS_PORT")
                        .ok()
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(6379),
                    env::var("REDIS_PASSWORD").ok().as_deref(),
                )
            }),
            neo4j_uri: env::var("NEO4J_URI")
                .unwrap_or_else(|_| "bolt://localhost:7687".to_string()),
            neo4j_username: env::var("NEO4J_USERNAME").unwrap_or_else(|_| "neo4j".to_string()),
            neo4j_password: env::var("NEO4J_PASSWORD").unwrap_or_default(),
            neo4j_database: env::var("NEO4J_DATABASE").unwrap_or_else(|_| "neo4j".to_string()),
        }
    }

    /// Get profile TTL as a Duration.
    pub fn profile_ttl(&self) -> Duration {
        Duration::from_secs(self.profile_ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Builds a Redis URL from host, port and an optional password.
///
/// An empty password is treated as none.
pub fn redis_url_from_parts(host: &str, port: u16, password: Option<&str>) -> String {
    match password.filter(|p| !p.is_empty()) {
        Some(password) => format!("redis://:{password}@{host}:{port}"),
        None => format!("redis://{host}:{port}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            profile_ttl_seconds: 60,
            cache_max_entries: 10_000,
            sqlite_path: "test.db".to_string(),
            redis_url: "redis://localhost:6379".to_string(),
            neo4j_uri: "bolt://localhost:7687".to_string(),
            neo4j_username: "neo4j".to_string(),
            neo4j_password: String::new(),
            neo4j_database: "neo4j".to_string(),
        }
    }

    #[test]
    fn test_profile_ttl_conversion() {
        let config = Config {
            profile_ttl_seconds: 90,
            ..config()
        };

        assert_eq!(config.profile_ttl(), Duration::from_secs(90));
    }

    #[test]
    fn test_redis_url_without_password() {
        assert_eq!(
            redis_url_from_parts("cache.internal", 6380, None),
            "redis://cache.internal:6380"
        );
    }

    #[test]
    fn test_redis_url_with_password() {
        assert_eq!(
            redis_url_from_parts("localhost", 6379, Some("s3cret")),
            "redis://:s3cret@localhost:6379"
        );
    }

    #[test]
    fn test_redis_url_empty_password_is_ignored() {
        assert_eq!(
            redis_url_from_parts("localhost", 6379, Some("")),
            "redis://localhost:6379"
        );
    }

    #[test]
    fn test_default_values() {
        for key in [
            "PROFILE_TTL_SECONDS",
            "CACHE_MAX_ENTRIES",
            "SQLITE_PATH",
            "REDIS_URL",
            "REDIS_HOST",
            "REDIS_PORT",
            "REDIS_PASSWORD",
            "NEO4J_URI",
            "NEO4J_DATABASE",
        ] {
            env::remove_var(key);
        }

        let config = Config::from_env();

        assert_eq!(config.profile_ttl_seconds, 60);
        assert_eq!(config.cache_max_entries, 10_000);
        assert_eq!(config.sqlite_path, "collabgraph.db");
        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.neo4j_uri, "bolt://localhost:7687");
        assert_eq!(config.neo4j_database, "neo4j");
    }
}
