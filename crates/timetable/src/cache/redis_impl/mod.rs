//! Redis cache backend implementation.
//!
//! Provides a shared cache for multi-instance deployments, so every
//! instance resolves against the same category, item and timetable entries.

mod cache;
mod error;

pub use cache::RedisCache;
