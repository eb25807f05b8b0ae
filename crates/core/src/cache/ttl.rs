use std::time::Duration;

/// Expiry applied to each kind of cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtl {
    pub category: Duration,
    pub item: Duration,
    pub timetable: Duration,
}

impl CacheTtl {
    pub const DEFAULT_CATEGORY: Duration = Duration::from_secs(24 * 60 * 60);
    pub const DEFAULT_ITEM: Duration = Duration::from_secs(24 * 60 * 60);
    pub const DEFAULT_TIMETABLE: Duration = Duration::from_secs(12 * 60 * 60);
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self {
            category: Self::DEFAULT_CATEGORY,
            item: Self::DEFAULT_ITEM,
            timetable: Self::DEFAULT_TIMETABLE,
        }
    }
}
