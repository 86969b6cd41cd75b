//! Bootstrap settings loaded from environment variables.
//!
//! The cache works with zero configuration (in-process [`MemoryStore`]); these
//! settings exist for hosts that want to bind the Redis store and a default
//! TTL at startup without writing wiring code.
//!
//! ## Configuration Methods
//!
//! ### Method 1: Full URL (simpler for local development)
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! ```
//!
//! ### Method 2: Individual components (recommended for production)
//!
//! ```bash
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! ## Optional Variables
//!
//! - `REDIS_URL` / `REDIS_HOST` - Redis connection (selects the Redis store if set)
//! - `CACHE_TTL_SECONDS` - Default `expire_in` seeded into [`CacheSettings::default_options`]

use std::env;
use std::sync::Arc;

use anyhow::Result;

use crate::error::CacheResult;
use crate::options::StoreOptions;
use crate::store::{MemoryStore, RedisStore, Store};

/// Cache bootstrap settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Redis connection string. `None` selects the in-process [`MemoryStore`].
    pub redis_url: Option<String>,
    /// Default TTL (seconds) seeded into [`Self::default_options`].
    /// Interpreted only by stores with expiration support.
    pub cache_ttl_seconds: Option<u64>,
}

impl CacheSettings {
    /// Loads settings from environment variables.
    pub fn from_env() -> Self {
        Self {
            redis_url: Self::load_redis_url(),
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok();
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        // Empty password means no authentication
        let url = match password {
            Some(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        };

        Some(url)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `redis_url` does not start with `redis://` or `rediss://`
    /// - `cache_ttl_seconds` is zero
    pub fn validate(&self) -> Result<()> {
        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                redis_url
            );
        }

        if self.cache_ttl_seconds == Some(0) {
            anyhow::bail!("CACHE_TTL_SECONDS must be greater than 0");
        }

        Ok(())
    }

    /// Returns whether the network-backed store is configured.
    pub fn is_network_store_enabled(&self) -> bool {
        self.redis_url.is_some()
    }

    /// Baseline passthrough options carrying the configured default TTL.
    pub fn default_options(&self) -> StoreOptions {
        let mut options = StoreOptions::new();
        if let Some(ttl) = self.cache_ttl_seconds {
            options.set_expire_in(ttl);
        }
        options
    }

    /// Builds the store these settings describe: Redis when configured,
    /// [`MemoryStore`] otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CacheError::StoreUnavailable`] or
    /// [`crate::error::CacheError::Configuration`] when the Redis connection
    /// cannot be established.
    pub async fn build_store(&self) -> CacheResult<Arc<dyn Store>> {
        match self.redis_url {
            Some(ref url) => Ok(Arc::new(RedisStore::connect(url).await?)),
            None => Ok(Arc::new(MemoryStore::new())),
        }
    }

    /// Prints a settings summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Cache settings loaded:");

        if let Some(ref redis_url) = self.redis_url {
            tracing::info!("  Store: redis ({})", mask_connection_string(redis_url));
        } else {
            tracing::info!("  Store: memory");
        }

        match self.cache_ttl_seconds {
            Some(ttl) => tracing::info!("  Default TTL: {}s", ttl),
            None => tracing::info!("  Default TTL: none"),
        }
    }
}

/// Masks the password in connection strings for logging.
///
/// `redis://:password@host:port/db` → `redis://:***@host:port/db`
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates settings from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
pub fn load_from_env() -> Result<CacheSettings> {
    let settings = CacheSettings::from_env();
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_mask_connection_string() {
        assert_eq!(
            mask_connection_string("redis://:password@localhost:6379/0"),
            "redis://:***@localhost:6379/0"
        );

        assert_eq!(
            mask_connection_string("redis://localhost:6379/0"),
            "redis://localhost:6379/0"
        );
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = CacheSettings {
            redis_url: Some("redis://localhost:6379/0".to_string()),
            cache_ttl_seconds: Some(3600),
        };

        assert!(settings.validate().is_ok());

        settings.redis_url = Some("http://localhost:6379".to_string());
        assert!(settings.validate().is_err());

        settings.redis_url = Some("rediss://localhost:6380/0".to_string());
        assert!(settings.validate().is_ok());

        settings.cache_ttl_seconds = Some(0);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_default_options_carry_ttl() {
        let settings = CacheSettings {
            redis_url: None,
            cache_ttl_seconds: Some(120),
        };
        assert_eq!(settings.default_options().expire_in(), Some(120));

        let settings = CacheSettings {
            redis_url: None,
            cache_ttl_seconds: None,
        };
        assert!(settings.default_options().is_empty());
    }

    #[test]
    #[serial]
    fn test_load_redis_url_from_components() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("REDIS_HOST", "redis-host");
            env::set_var("REDIS_PORT", "6380");
            env::set_var("REDIS_DB", "1");
        }

        let url = CacheSettings::load_redis_url().unwrap();
        assert_eq!(url, "redis://redis-host:6380/1");

        // Test with password
        unsafe {
            env::set_var("REDIS_PASSWORD", "secret");
        }
        let url = CacheSettings::load_redis_url().unwrap();
        assert_eq!(url, "redis://:secret@redis-host:6380/1");

        // Test with empty password (should be treated as no password)
        unsafe {
            env::set_var("REDIS_PASSWORD", "");
        }
        let url = CacheSettings::load_redis_url().unwrap();
        assert_eq!(url, "redis://redis-host:6380/1");

        // Cleanup
        unsafe {
            env::remove_var("REDIS_HOST");
            env::remove_var("REDIS_PORT");
            env::remove_var("REDIS_DB");
            env::remove_var("REDIS_PASSWORD");
        }
    }

    #[test]
    #[serial]
    fn test_redis_url_priority() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("REDIS_URL", "redis://from-url:6379/0");
            env::set_var("REDIS_HOST", "from-components");
        }

        let url = CacheSettings::load_redis_url().unwrap();

        // REDIS_URL should take priority
        assert!(url.contains("from-url"));
        assert!(!url.contains("from-components"));

        // Cleanup
        unsafe {
            env::remove_var("REDIS_URL");
            env::remove_var("REDIS_HOST");
        }
    }
}
