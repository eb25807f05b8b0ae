//! Raw code resolution to canonical category items.

use uuid::Uuid;

use timetable_core::cache::{deserialize_item, item_key, serialize_item, Cache, CacheProbe};
use timetable_core::source::TimetableSource;
use timetable_core::timetable::{CategoryItem, CategoryType, RawCode};

use super::{ResolveError, Result, TimetableResolver};

impl<S, C> TimetableResolver<S, C>
where
    S: TimetableSource,
    C: Cache,
{
    /// Resolves a raw code to a category item.
    ///
    /// A code that parses as an identity is looked up by identity only and is
    /// never searched for as text. Any other code is fuzzy-matched against
    /// the cached listing, then searched for upstream.
    pub async fn resolve(&self, category_type: CategoryType, raw_code: &str) -> Result<CategoryItem> {
        match RawCode::parse(raw_code) {
            RawCode::Identity(identity) => {
                self.resolve_identity(category_type, identity, raw_code)
                    .await
            }
            RawCode::Text(text) => self.resolve_text(category_type, &text, raw_code).await,
        }
    }

    /// Resolves groups of raw codes, one code at a time in caller order.
    ///
    /// Results are grouped by category type in the order each type first
    /// appears. The first failure aborts the batch.
    pub async fn resolve_all(
        &self,
        groups: &[(CategoryType, Vec<String>)],
    ) -> Result<Vec<(CategoryType, Vec<CategoryItem>)>> {
        let mut resolved: Vec<(CategoryType, Vec<CategoryItem>)> = Vec::new();

        for (category_type, codes) in groups {
            for code in codes {
                let item = self.resolve(*category_type, code).await?;
                match resolved.iter_mut().find(|(t, _)| t == category_type) {
                    Some((_, items)) => items.push(item),
                    None => resolved.push((*category_type, vec![item])),
                }
            }
        }

        Ok(resolved)
    }

    async fn resolve_identity(
        &self,
        category_type: CategoryType,
        identity: Uuid,
        raw_code: &str,
    ) -> Result<CategoryItem> {
        let key = item_key(identity);

        if let CacheProbe::Hit(item) = self.probe_cache(&key, deserialize_item).await {
            return Ok(item);
        }

        tracing::debug!(%category_type, item_id = %identity, "Fetching item from upstream");
        let item = self
            .source
            .fetch_category_items(category_type, &[identity])
            .await?
            .into_iter()
            .find(|item| item.identity == identity)
            .ok_or_else(|| ResolveError::InvalidCode(raw_code.to_string()))?;

        self.populate_cache(&key, serialize_item(&item), self.ttl.item)
            .await;
        Ok(item)
    }

    async fn resolve_text(
        &self,
        category_type: CategoryType,
        code: &str,
        raw_code: &str,
    ) -> Result<CategoryItem> {
        if code.is_empty() {
            return Err(ResolveError::InvalidCode(raw_code.to_string()));
        }

        let cached = self.read_category(category_type, Some(code), Some(1)).await?;
        let listing_cached = cached.is_some();
        if let Some(item) = cached.and_then(|category| category.items.into_iter().next()) {
            tracing::trace!(
                %category_type,
                code,
                item_id = %item.identity,
                "Resolved code from cached category"
            );
            return Ok(item);
        }

        let searched = self.fetch_category(category_type, Some(code), true).await?;
        let Some(item) = searched.items.into_iter().next() else {
            return Err(ResolveError::InvalidCode(raw_code.to_string()));
        };

        if !listing_cached {
            // Warm the full listing so later lookups of this type stay local.
            if let Err(err) = self.fetch_category(category_type, None, true).await {
                tracing::warn!(%category_type, error = %err, "Failed to warm category cache");
            }
        }

        Ok(item)
    }
}
