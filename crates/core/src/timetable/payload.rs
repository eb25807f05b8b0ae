//! Upstream wire payloads and their conversion into domain types.
//!
//! The scheduling service uses PascalCase JSON. These structs mirror only
//! the fields the domain needs; unknown fields are ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use super::error::PayloadError;
use super::extras::ExtraEventData;
use super::location::Location;
use super::operations::{derive_item_code, extract_group_name, parse_weeks};
use super::types::{CategoryItem, CategoryItemTimetable, CategoryPage, CategoryType, Event};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CategoryPagePayload {
    total_pages: u32,
    count: u64,
    #[serde(default)]
    results: Vec<CategoryItemPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CategoryItemPayload {
    identity: Uuid,
    name: String,
    #[serde(default, deserialize_with = "crate::serde::deserialize_blank_as_none")]
    description: Option<String>,
    category_type_identity: Uuid,
    #[serde(default)]
    parent_category_identities: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CategoryEventsPayload {
    #[serde(default)]
    category_events: Vec<TimetablePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TimetablePayload {
    category_type_identity: Uuid,
    identity: Uuid,
    name: String,
    #[serde(default)]
    results: Vec<EventPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EventPayload {
    identity: Uuid,
    #[serde(deserialize_with = "crate::serde::deserialize_utc_timestamp")]
    start_date_time: DateTime<Utc>,
    #[serde(deserialize_with = "crate::serde::deserialize_utc_timestamp")]
    end_date_time: DateTime<Utc>,
    #[serde(default)]
    status_identity: Option<String>,
    #[serde(default, deserialize_with = "crate::serde::deserialize_blank_as_none")]
    location: Option<String>,
    #[serde(default, deserialize_with = "crate::serde::deserialize_blank_as_none")]
    description: Option<String>,
    name: String,
    #[serde(default)]
    event_type: String,
    #[serde(deserialize_with = "crate::serde::deserialize_utc_timestamp")]
    last_modified: DateTime<Utc>,
    #[serde(default)]
    extra_properties: Vec<ExtraPropertyPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ExtraPropertyPayload {
    rank: i64,
    #[serde(default)]
    value: Option<String>,
}

impl TryFrom<CategoryItemPayload> for CategoryItem {
    type Error = PayloadError;

    fn try_from(payload: CategoryItemPayload) -> Result<Self, Self::Error> {
        let category_type = CategoryType::from_identity(payload.category_type_identity)?;
        let code = derive_item_code(category_type, &payload.name);
        Ok(Self {
            identity: payload.identity,
            name: payload.name,
            code,
            description: payload.description,
            category_type,
            parent_categories: payload.parent_category_identities,
        })
    }
}

impl From<EventPayload> for Event {
    fn from(payload: EventPayload) -> Self {
        let mut module_name = None;
        let mut staff_member = None;
        let mut weeks = None;

        for property in payload.extra_properties {
            let Some(value) = property.value else {
                continue;
            };
            match property.rank {
                1 => module_name = Some(value),
                2 => staff_member = Some(value),
                3 => weeks = Some(parse_weeks(&value)),
                _ => {}
            }
        }

        let group_name = extract_group_name(&payload.name, payload.description.as_deref());
        let locations = payload
            .location
            .as_deref()
            .map(Location::parse_all)
            .unwrap_or_default();
        let extras = ExtraEventData::from_event(
            &payload.name,
            &payload.event_type,
            payload.description.as_deref(),
            module_name.as_deref(),
            group_name.as_deref(),
            &locations,
        );

        Self {
            identity: payload.identity,
            start: payload.start_date_time,
            end: payload.end_date_time,
            status_identity: payload.status_identity.unwrap_or_default(),
            locations,
            description: payload.description,
            name: payload.name,
            event_type: payload.event_type,
            last_modified: payload.last_modified,
            module_name,
            staff_member,
            weeks,
            group_name,
            extras,
        }
    }
}

impl TryFrom<TimetablePayload> for CategoryItemTimetable {
    type Error = PayloadError;

    fn try_from(payload: TimetablePayload) -> Result<Self, Self::Error> {
        Ok(Self {
            category_type: CategoryType::from_identity(payload.category_type_identity)?,
            identity: payload.identity,
            name: payload.name,
            events: payload.results.into_iter().map(Event::from).collect(),
        })
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, PayloadError> {
    serde_json::from_value(value).map_err(|e| PayloadError::Malformed(e.to_string()))
}

/// Parses one page of a category listing (`TotalPages`, `Count`, `Results`).
pub fn parse_category_page(value: Value) -> Result<CategoryPage, PayloadError> {
    let payload: CategoryPagePayload = decode(value)?;
    let results = payload
        .results
        .into_iter()
        .map(CategoryItem::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CategoryPage {
        total_pages: payload.total_pages,
        count: payload.count,
        results,
    })
}

/// Parses the JSON array returned by an items-by-identity lookup.
pub fn parse_category_items(value: Value) -> Result<Vec<CategoryItem>, PayloadError> {
    let payload: Vec<CategoryItemPayload> = decode(value)?;
    payload.into_iter().map(CategoryItem::try_from).collect()
}

/// Parses a timetables response (`CategoryEvents`).
pub fn parse_timetables(value: Value) -> Result<Vec<CategoryItemTimetable>, PayloadError> {
    let payload: CategoryEventsPayload = decode(value)?;
    payload
        .category_events
        .into_iter()
        .map(CategoryItemTimetable::try_from)
        .collect()
}
