//! Cache-aside resolution layer.
//!
//! [`TimetableResolver`] sits between callers and the upstream scheduling
//! service. Every read probes the cache first and only goes upstream on a
//! miss, writing what it fetched back to the cache:
//!
//! - **Categories**: paginated listings, cached only when fetched unsearched
//! - **Items**: raw codes resolved by identity or by fuzzy name search
//! - **Timetables**: cached over the whole academic year, filtered per request
//!
//! Cache failures never fail a read. A failed or undecodable cache read is a
//! miss and a failed cache write is logged and skipped. Upstream failures
//! always propagate.

mod categories;
mod error;
mod items;
mod timetables;

#[cfg(test)]
mod testing;

pub use error::{ResolveError, Result};

use std::sync::Arc;
use std::time::Duration;

use timetable_core::cache::{probe, Cache, CacheProbe, CacheTtl, SerializationError};
use timetable_core::source::TimetableSource;
use timetable_core::timetable::{Matcher, PartialRatioMatcher};

/// Cache-aside resolver over an upstream source.
///
/// # Type Parameters
///
/// * `S` - The upstream source implementation
/// * `C` - The cache implementation
pub struct TimetableResolver<S, C>
where
    S: TimetableSource,
    C: Cache,
{
    source: Arc<S>,
    cache: Arc<C>,
    ttl: CacheTtl,
    matcher: Arc<dyn Matcher>,
}

impl<S, C> TimetableResolver<S, C>
where
    S: TimetableSource,
    C: Cache,
{
    /// Creates a new resolver.
    ///
    /// # Arguments
    ///
    /// * `source` - The upstream source to fetch from on cache misses
    /// * `cache` - The cache implementation
    /// * `ttl` - Expiry for each kind of cache entry
    pub fn new(source: Arc<S>, cache: Arc<C>, ttl: CacheTtl) -> Self {
        Self {
            source,
            cache,
            ttl,
            matcher: Arc::new(PartialRatioMatcher::default()),
        }
    }

    /// Replaces the name matcher used for fuzzy searches of cached listings.
    pub fn with_matcher(mut self, matcher: Arc<dyn Matcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Reads and decodes a cache entry, treating every failure as a miss.
    async fn probe_cache<T>(
        &self,
        key: &str,
        decode: impl FnOnce(&[u8]) -> std::result::Result<T, SerializationError>,
    ) -> CacheProbe<T> {
        let cached = match self.cache.get(key).await {
            Ok(cached) => cached,
            Err(err) => {
                tracing::warn!(key, error = %err, "Cache read failed");
                return CacheProbe::Miss;
            }
        };

        match probe(cached.as_deref(), decode) {
            Ok(CacheProbe::Hit(value)) => {
                tracing::trace!(key, "Cache hit");
                CacheProbe::Hit(value)
            }
            Ok(CacheProbe::Miss) => {
                tracing::trace!(key, "Cache miss");
                CacheProbe::Miss
            }
            Err(err) => {
                // Deserialization failed - treat as cache miss
                tracing::warn!(key, error = %err, "Cache deserialization failed");
                CacheProbe::Miss
            }
        }
    }

    /// Writes an encoded value to the cache, logging instead of failing.
    async fn populate_cache(
        &self,
        key: &str,
        encoded: std::result::Result<Vec<u8>, SerializationError>,
        ttl: Duration,
    ) {
        let bytes = match encoded {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(key, error = %err, "Cache serialization failed");
                return;
            }
        };

        match self.cache.set(key, &bytes, Some(ttl)).await {
            Ok(()) => tracing::debug!(key, ttl_secs = ttl.as_secs(), "Cache populated"),
            Err(err) => tracing::warn!(key, error = %err, "Failed to populate cache"),
        }
    }
}
