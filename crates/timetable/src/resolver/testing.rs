//! Hand-written mocks shared by the resolver tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use timetable_core::cache::{
    category_key, deserialize_category, deserialize_item, deserialize_timetable, item_key,
    serialize_category, serialize_item, serialize_timetable, timetable_key, Cache, CacheError,
    CacheTtl, Result as CacheResult,
};
use timetable_core::source::{DateWindow, Result as SourceResult, SourceError, TimetableSource};
use timetable_core::timetable::{
    Category, CategoryItem, CategoryItemTimetable, CategoryPage, CategoryType, Event,
};

use super::TimetableResolver;

/// Upstream serves a fixed page size.
const PAGE_SIZE: usize = 20;

pub fn item(category_type: CategoryType, name: &str) -> CategoryItem {
    CategoryItem::new(Uuid::new_v4(), category_type, name)
}

pub fn module(name: &str) -> CategoryItem {
    item(CategoryType::Modules, name)
}

pub fn at(month: u32, day: u32) -> DateTime<Utc> {
    let year = if month >= 8 { 2024 } else { 2025 };
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0).unwrap()
}

pub fn event_at(name: &str, start: DateTime<Utc>) -> Event {
    Event::new(Uuid::new_v4(), name, start, start + chrono::Duration::hours(1))
}

/// A timetable with one event per month from August to April.
pub fn year_timetable(category_type: CategoryType, identity: Uuid) -> CategoryItemTimetable {
    let events = [8, 9, 10, 11, 12, 1, 2, 3, 4]
        .into_iter()
        .map(|month| event_at(&format!("event-{}", month), at(month, 2)))
        .collect();
    CategoryItemTimetable::new(category_type, identity, identity.to_string()).with_events(events)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimetableRequest {
    pub category_type: CategoryType,
    pub identities: Vec<Uuid>,
    pub window: DateWindow,
}

/// Mock upstream that tracks calls.
pub struct MockSource {
    listings: RwLock<HashMap<CategoryType, Vec<CategoryItem>>>,
    timetables: RwLock<HashMap<Uuid, CategoryItemTimetable>>,
    failing_pages: RwLock<HashSet<u32>>,
    fail_timetables: AtomicBool,
    queries: RwLock<Vec<Option<String>>>,
    timetable_requests: RwLock<Vec<TimetableRequest>>,
    page_calls: AtomicUsize,
    pages_in_flight: AtomicUsize,
    peak_pages_in_flight: AtomicUsize,
    item_calls: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            listings: RwLock::new(HashMap::new()),
            timetables: RwLock::new(HashMap::new()),
            failing_pages: RwLock::new(HashSet::new()),
            fail_timetables: AtomicBool::new(false),
            queries: RwLock::new(Vec::new()),
            timetable_requests: RwLock::new(Vec::new()),
            page_calls: AtomicUsize::new(0),
            pages_in_flight: AtomicUsize::new(0),
            peak_pages_in_flight: AtomicUsize::new(0),
            item_calls: AtomicUsize::new(0),
        }
    }

    pub async fn add_listing(&self, category_type: CategoryType, items: Vec<CategoryItem>) {
        self.listings
            .write()
            .await
            .entry(category_type)
            .or_default()
            .extend(items);
    }

    pub async fn add_timetable(&self, timetable: CategoryItemTimetable) {
        self.timetables
            .write()
            .await
            .insert(timetable.identity, timetable);
    }

    pub async fn fail_page(&self, page: u32) {
        self.failing_pages.write().await.insert(page);
    }

    pub fn fail_timetables(&self) {
        self.fail_timetables.store(true, Ordering::SeqCst);
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    /// Most page requests ever outstanding at the same time.
    pub fn peak_pages_in_flight(&self) -> usize {
        self.peak_pages_in_flight.load(Ordering::SeqCst)
    }

    pub fn item_calls(&self) -> usize {
        self.item_calls.load(Ordering::SeqCst)
    }

    pub async fn queries(&self) -> Vec<Option<String>> {
        self.queries.read().await.clone()
    }

    pub async fn timetable_requests(&self) -> Vec<TimetableRequest> {
        self.timetable_requests.read().await.clone()
    }

    async fn serve_page(
        &self,
        category_type: CategoryType,
        page: u32,
        query: Option<&str>,
    ) -> SourceResult<CategoryPage> {
        if self.failing_pages.read().await.contains(&page) {
            return Err(Self::unavailable());
        }

        let listings = self.listings.read().await;
        let matching: Vec<CategoryItem> = listings
            .get(&category_type)
            .into_iter()
            .flatten()
            .filter(|item| match query {
                Some(q) => item.name.to_lowercase().contains(&q.to_lowercase()),
                None => true,
            })
            .cloned()
            .collect();

        let total_pages = matching.len().div_ceil(PAGE_SIZE).max(1) as u32;
        let results = matching
            .iter()
            .skip((page as usize - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .cloned()
            .collect();

        Ok(CategoryPage {
            total_pages,
            count: matching.len() as u64,
            results,
        })
    }

    fn unavailable() -> SourceError {
        SourceError::Unavailable {
            status: Some(503),
            body: "Service Unavailable".to_string(),
        }
    }
}

#[async_trait]
impl TimetableSource for MockSource {
    async fn fetch_category_page(
        &self,
        category_type: CategoryType,
        page: u32,
        query: Option<&str>,
    ) -> SourceResult<CategoryPage> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        self.queries
            .write()
            .await
            .push(query.map(str::to_string));

        let in_flight = self.pages_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_pages_in_flight
            .fetch_max(in_flight, Ordering::SeqCst);

        // Hand control back so concurrently polled requests can start.
        tokio::task::yield_now().await;
        let result = self.serve_page(category_type, page, query).await;

        self.pages_in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn fetch_category_items(
        &self,
        category_type: CategoryType,
        identities: &[Uuid],
    ) -> SourceResult<Vec<CategoryItem>> {
        self.item_calls.fetch_add(1, Ordering::SeqCst);
        let listings = self.listings.read().await;
        Ok(listings
            .get(&category_type)
            .into_iter()
            .flatten()
            .filter(|item| identities.contains(&item.identity))
            .cloned()
            .collect())
    }

    async fn fetch_timetables(
        &self,
        category_type: CategoryType,
        identities: &[Uuid],
        window: DateWindow,
    ) -> SourceResult<Vec<CategoryItemTimetable>> {
        self.timetable_requests.write().await.push(TimetableRequest {
            category_type,
            identities: identities.to_vec(),
            window,
        });

        if self.fail_timetables.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }

        let timetables = self.timetables.read().await;
        Ok(identities
            .iter()
            .filter_map(|id| timetables.get(id).cloned())
            .collect())
    }
}

/// Mock cache backed by a map, recording the TTL of each write.
pub struct MockCache {
    store: RwLock<HashMap<String, (Vec<u8>, Option<Duration>)>>,
    set_calls: AtomicUsize,
}

impl MockCache {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            set_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    pub async fn ttl_of(&self, key: &str) -> Option<Duration> {
        self.store.read().await.get(key).and_then(|(_, ttl)| *ttl)
    }

    pub async fn put_raw(&self, key: &str, value: &[u8]) {
        self.store
            .write()
            .await
            .insert(key.to_string(), (value.to_vec(), None));
    }

    async fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.store.read().await.get(key).map(|(v, _)| v.clone())
    }

    pub async fn put_category(&self, category_type: CategoryType, category: &Category) {
        let bytes = serialize_category(category).unwrap();
        self.put_raw(&category_key(category_type), &bytes).await;
    }

    pub async fn get_category(&self, category_type: CategoryType) -> Option<Category> {
        let bytes = self.raw(&category_key(category_type)).await?;
        Some(deserialize_category(&bytes).unwrap())
    }

    pub async fn put_item(&self, item: &CategoryItem) {
        let bytes = serialize_item(item).unwrap();
        self.put_raw(&item_key(item.identity), &bytes).await;
    }

    pub async fn get_item(&self, identity: Uuid) -> Option<CategoryItem> {
        let bytes = self.raw(&item_key(identity)).await?;
        Some(deserialize_item(&bytes).unwrap())
    }

    pub async fn put_timetable(&self, timetable: &CategoryItemTimetable) {
        let bytes = serialize_timetable(timetable).unwrap();
        self.put_raw(&timetable_key(timetable.identity), &bytes)
            .await;
    }

    pub async fn get_timetable(&self, identity: Uuid) -> Option<CategoryItemTimetable> {
        let bytes = self.raw(&timetable_key(identity)).await?;
        Some(deserialize_timetable(&bytes).unwrap())
    }
}

#[async_trait]
impl Cache for MockCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        Ok(self.raw(key).await)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> CacheResult<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        self.store
            .write()
            .await
            .insert(key.to_string(), (value.to_vec(), ttl));
        Ok(())
    }
}

/// Cache whose every operation fails, as when the backend is unreachable.
pub struct FailingCache;

#[async_trait]
impl Cache for FailingCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
        Err(CacheError::ConnectionFailed("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &[u8], _ttl: Option<Duration>) -> CacheResult<()> {
        Err(CacheError::ConnectionFailed("connection refused".to_string()))
    }
}

/// Builds a resolver over `source` and an empty [`MockCache`].
pub fn resolver(
    source: MockSource,
) -> (
    TimetableResolver<MockSource, MockCache>,
    Arc<MockSource>,
    Arc<MockCache>,
) {
    let source = Arc::new(source);
    let cache = Arc::new(MockCache::new());
    let resolver = TimetableResolver::new(source.clone(), cache.clone(), CacheTtl::default());
    (resolver, source, cache)
}
