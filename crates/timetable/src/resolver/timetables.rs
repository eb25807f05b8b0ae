//! Item timetables: cached over the academic year, filtered per request.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use timetable_core::cache::{
    deserialize_timetable, serialize_timetable, timetable_key, Cache, CacheProbe,
};
use timetable_core::source::{RangeRequest, TimetableSource};
use timetable_core::timetable::{filter_events_by_range, CategoryItemTimetable, CategoryType, Event};

use super::{Result, TimetableResolver};

impl<S, C> TimetableResolver<S, C>
where
    S: TimetableSource,
    C: Cache,
{
    /// Gathers the events of several items of one category type.
    ///
    /// Missing bounds default to the current academic year. Cached timetables
    /// are used as-is; all misses are fetched from upstream in one request
    /// covering the whole academic year and cached unfiltered. Events are
    /// then filtered to `[start, end]` on their start time and returned in
    /// the order of `identities`.
    pub async fn gather_events(
        &self,
        category_type: CategoryType,
        identities: &[Uuid],
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Event>> {
        let request = range_request(start, end)?;
        self.gather_type_events(category_type, identities, &request)
            .await
    }

    /// Gathers events for items of several category types.
    ///
    /// Makes at most one upstream request per category type and returns the
    /// events of each type in the order types first appear.
    pub async fn gather_all_events(
        &self,
        groups: &[(CategoryType, Vec<Uuid>)],
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Event>> {
        let request = range_request(start, end)?;

        let mut merged: Vec<(CategoryType, Vec<Uuid>)> = Vec::new();
        for (category_type, identities) in groups {
            match merged.iter_mut().find(|(t, _)| t == category_type) {
                Some((_, ids)) => ids.extend(identities.iter().copied()),
                None => merged.push((*category_type, identities.clone())),
            }
        }

        let mut events = Vec::new();
        for (category_type, identities) in &merged {
            events.extend(
                self.gather_type_events(*category_type, identities, &request)
                    .await?,
            );
        }
        Ok(events)
    }

    async fn gather_type_events(
        &self,
        category_type: CategoryType,
        identities: &[Uuid],
        request: &RangeRequest,
    ) -> Result<Vec<Event>> {
        let mut timetables: HashMap<Uuid, CategoryItemTimetable> = HashMap::new();
        let mut seen = HashSet::new();
        let mut misses = Vec::new();

        for &identity in identities {
            if !seen.insert(identity) {
                continue;
            }
            match self
                .probe_cache(&timetable_key(identity), deserialize_timetable)
                .await
            {
                CacheProbe::Hit(timetable) => {
                    timetables.insert(identity, timetable);
                }
                CacheProbe::Miss => misses.push(identity),
            }
        }

        if !misses.is_empty() {
            tracing::debug!(
                %category_type,
                misses = misses.len(),
                hits = timetables.len(),
                "Fetching timetables from upstream"
            );
            let fetched = self
                .source
                .fetch_timetables(category_type, &misses, request.academic_year)
                .await?;

            for timetable in fetched {
                self.populate_cache(
                    &timetable_key(timetable.identity),
                    serialize_timetable(&timetable),
                    self.ttl.timetable,
                )
                .await;
                timetables.insert(timetable.identity, timetable);
            }
        }

        let mut events = Vec::new();
        for identity in identities {
            match timetables.get(identity) {
                Some(timetable) => events.extend(filter_events_by_range(
                    timetable.events.clone(),
                    request.range.start,
                    request.range.end,
                )),
                None => {
                    tracing::warn!(%category_type, item_id = %identity, "No timetable returned for item")
                }
            }
        }
        Ok(events)
    }
}

/// Resolves the caller's bounds, flagging ranges outside the academic year.
fn range_request(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<RangeRequest> {
    let request = RangeRequest::resolve(start, end, Utc::now())?;
    if request.outside_academic_year() {
        tracing::warn!(
            start = %request.range.start,
            end = %request.range.end,
            "Requested range is not within the current academic year"
        );
    }
    Ok(request)
}
