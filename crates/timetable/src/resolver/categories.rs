//! Category listings: paginated fetch and cached fuzzy read.

use futures_util::future::try_join_all;

use timetable_core::cache::{category_key, deserialize_category, serialize_category, Cache};
use timetable_core::source::TimetableSource;
use timetable_core::timetable::{
    filter_items_by_name, Category, CategoryItemSummary, CategoryType,
};

use super::{ResolveError, Result, TimetableResolver};

/// Trims a search query, treating a blank one as absent.
pub(crate) fn normalize_query(query: Option<&str>) -> Option<&str> {
    query.map(str::trim).filter(|q| !q.is_empty())
}

impl<S, C> TimetableResolver<S, C>
where
    S: TimetableSource,
    C: Cache,
{
    /// Fetches a full category listing from upstream.
    ///
    /// Page 1 is fetched first to learn the page count, then every remaining
    /// page is fetched concurrently. If any page fails the whole fetch fails
    /// and nothing is cached. The listing is cached only when `cache` is set
    /// and no search query was given, so a search never replaces the
    /// canonical listing.
    pub async fn fetch_category(
        &self,
        category_type: CategoryType,
        query: Option<&str>,
        cache: bool,
    ) -> Result<Category> {
        let query = normalize_query(query);

        tracing::debug!(%category_type, query, "Fetching category from upstream");
        let first = self
            .source
            .fetch_category_page(category_type, 1, query)
            .await?;
        let total_pages = first.total_pages;
        let count = first.count;
        let mut items = first.results;

        if total_pages > 1 {
            let pages = try_join_all((2..=total_pages).map(|page| async move {
                self.source
                    .fetch_category_page(category_type, page, query)
                    .await
                    .map_err(|source| ResolveError::PartialPageFailure {
                        page,
                        total_pages,
                        source,
                    })
            }))
            .await?;

            for page in pages {
                items.extend(page.results);
            }
        }

        let category = Category::new(items, count);

        if query.is_none() && cache {
            self.populate_cache(
                &category_key(category_type),
                serialize_category(&category),
                self.ttl.category,
            )
            .await;
        }

        Ok(category)
    }

    /// Reads a category listing from the cache only.
    ///
    /// Returns `None` when the listing is not cached. With a non-blank query
    /// the listing is fuzzy-filtered on item names, best match first, and
    /// truncated to `limit`; `count` is then the number of matches.
    pub async fn read_category(
        &self,
        category_type: CategoryType,
        query: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Option<Category>> {
        let Some(category) = self
            .probe_cache(&category_key(category_type), deserialize_category)
            .await
            .into_option()
        else {
            return Ok(None);
        };

        let Some(query) = normalize_query(query) else {
            return Ok(Some(category));
        };

        let matches = filter_items_by_name(self.matcher.as_ref(), &category.items, query, limit);
        tracing::trace!(%category_type, query, matches = matches.len(), "Filtered cached category");
        Ok(Some(Category::from_items(matches)))
    }

    /// Lists item summaries, preferring the cached listing.
    ///
    /// Falls back to a live fetch when the listing is not cached. An
    /// unsearched live fetch populates the cache.
    pub async fn list_category(
        &self,
        category_type: CategoryType,
        query: Option<&str>,
    ) -> Result<Vec<CategoryItemSummary>> {
        let category = match self.read_category(category_type, query, None).await? {
            Some(category) => category,
            None => self.fetch_category(category_type, query, true).await?,
        };
        Ok(category.summaries())
    }
}
