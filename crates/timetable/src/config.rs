use std::{env, str::FromStr, time::Duration};

use timetable_client::client::{DEFAULT_BASE_URL, DEFAULT_INSTITUTION_ID};
use timetable_client::ClientConfig;
use timetable_core::cache::CacheTtl;
use timetable_core::retry::RetryPolicy;
use uuid::Uuid;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Upstream API root (default: the hosted Scientia public API)
    pub base_url: String,
    /// Institution identity requests are scoped to
    pub institution_id: Uuid,
    /// Retries after a failed upstream request (default: 3)
    pub max_retries: u32,
    /// Fixed delay between retries in milliseconds (default: 5,000)
    pub retry_delay_ms: u64,
    /// Per-request upstream timeout in seconds (default: 30)
    pub timeout_seconds: u64,
    /// Category listing TTL in seconds (default: 86,400)
    pub category_ttl_seconds: u64,
    /// Category item TTL in seconds (default: 86,400)
    pub item_ttl_seconds: u64,
    /// Timetable TTL in seconds (default: 43,200)
    pub timetable_ttl_seconds: u64,
    /// Maximum number of cache entries (default: 10,000)
    /// Note: Only used when the `memory` feature is enabled.
    pub cache_max_entries: usize,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    pub redis_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SCIENTIA_BASE_URL` - Upstream API root
    /// - `SCIENTIA_INSTITUTION_ID` - Institution identity
    /// - `UPSTREAM_MAX_RETRIES` - Retries per request (default: 3)
    /// - `UPSTREAM_RETRY_DELAY_MS` - Delay between retries (default: 5,000)
    /// - `UPSTREAM_TIMEOUT_SECONDS` - Request timeout (default: 30)
    /// - `CATEGORY_CACHE_TTL_SECONDS` - Category TTL (default: 86,400)
    /// - `ITEM_CACHE_TTL_SECONDS` - Item TTL (default: 86,400)
    /// - `TIMETABLE_CACHE_TTL_SECONDS` - Timetable TTL (default: 43,200)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = CacheTtl::default();

        Self {
            base_url: lookup("SCIENTIA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            institution_id: parse_var(&lookup, "SCIENTIA_INSTITUTION_ID")
                .unwrap_or(DEFAULT_INSTITUTION_ID),
            max_retries: parse_var(&lookup, "UPSTREAM_MAX_RETRIES")
                .unwrap_or(RetryPolicy::DEFAULT_MAX_RETRIES),
            retry_delay_ms: parse_var(&lookup, "UPSTREAM_RETRY_DELAY_MS")
                .unwrap_or(RetryPolicy::DEFAULT_DELAY.as_millis() as u64),
            timeout_seconds: parse_var(&lookup, "UPSTREAM_TIMEOUT_SECONDS").unwrap_or(30),
            category_ttl_seconds: parse_var(&lookup, "CATEGORY_CACHE_TTL_SECONDS")
                .unwrap_or(defaults.category.as_secs()),
            item_ttl_seconds: parse_var(&lookup, "ITEM_CACHE_TTL_SECONDS")
                .unwrap_or(defaults.item.as_secs()),
            timetable_ttl_seconds: parse_var(&lookup, "TIMETABLE_CACHE_TTL_SECONDS")
                .unwrap_or(defaults.timetable.as_secs()),
            cache_max_entries: parse_var(&lookup, "CACHE_MAX_ENTRIES").unwrap_or(10_000),
            redis_url: lookup("REDIS_URL").unwrap_or_else(|| "redis://localhost:6379".to_string()),
        }
    }

    /// Get the cache TTLs.
    pub fn cache_ttl(&self) -> CacheTtl {
        CacheTtl {
            category: Duration::from_secs(self.category_ttl_seconds),
            item: Duration::from_secs(self.item_ttl_seconds),
            timetable: Duration::from_secs(self.timetable_ttl_seconds),
        }
    }

    /// Get the upstream retry policy.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(self.max_retries, Duration::from_millis(self.retry_delay_ms))
    }

    /// Get the upstream client settings.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            institution_id: self.institution_id,
            retry_policy: self.retry_policy(),
            timeout: Duration::from_secs(self.timeout_seconds),
        }
    }
}

/// Reads and parses one variable, `None` when unset or unparseable.
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    lookup(name).and_then(|value| value.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
