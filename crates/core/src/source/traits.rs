use async_trait::async_trait;
use uuid::Uuid;

use crate::timetable::{CategoryItem, CategoryItemTimetable, CategoryPage, CategoryType};

use super::{DateWindow, Result};

/// Read access to the upstream scheduling service.
///
/// Implementations talk to the network; callers layer caching on top.
#[async_trait]
pub trait TimetableSource: Send + Sync {
    /// Fetches one page (1-based) of a category listing, optionally filtered
    /// by a server-side search query.
    async fn fetch_category_page(
        &self,
        category_type: CategoryType,
        page: u32,
        query: Option<&str>,
    ) -> Result<CategoryPage>;

    /// Fetches the items with the given identities.
    ///
    /// Identities unknown to upstream are silently absent from the result.
    async fn fetch_category_items(
        &self,
        category_type: CategoryType,
        identities: &[Uuid],
    ) -> Result<Vec<CategoryItem>>;

    /// Fetches the unfiltered timetables of the given items within `window`.
    async fn fetch_timetables(
        &self,
        category_type: CategoryType,
        identities: &[Uuid],
        window: DateWindow,
    ) -> Result<Vec<CategoryItemTimetable>>;
}
