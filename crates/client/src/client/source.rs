//! [`TimetableSource`] implementation backed by the HTTP API.

use async_trait::async_trait;
use timetable_core::source::{DateWindow, Result, TimetableSource};
use timetable_core::timetable::{CategoryItem, CategoryItemTimetable, CategoryPage, CategoryType};
use uuid::Uuid;

use super::ScientiaClient;

#[async_trait]
impl TimetableSource for ScientiaClient {
    async fn fetch_category_page(
        &self,
        category_type: CategoryType,
        page: u32,
        query: Option<&str>,
    ) -> Result<CategoryPage> {
        Ok(self.get_category_page(category_type, page, query).await?)
    }

    async fn fetch_category_items(
        &self,
        category_type: CategoryType,
        identities: &[Uuid],
    ) -> Result<Vec<CategoryItem>> {
        Ok(self.get_category_items(category_type, identities).await?)
    }

    async fn fetch_timetables(
        &self,
        category_type: CategoryType,
        identities: &[Uuid],
        window: DateWindow,
    ) -> Result<Vec<CategoryItemTimetable>> {
        Ok(self.get_timetables(category_type, identities, window).await?)
    }
}
