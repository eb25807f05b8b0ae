//! Timetable API operations.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use timetable_core::source::DateWindow;
use timetable_core::timetable::{parse_timetables, CategoryItemTimetable, CategoryType};
use uuid::Uuid;

use super::categories::identities_body;
use super::ScientiaClient;
use crate::error::{ClientError, Result};

/// Formats a range bound the way the events endpoint expects it.
fn format_range_bound(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Request body for the events endpoint, Monday to Saturday.
fn events_body(category_type: CategoryType, identities: &[Uuid]) -> Value {
    let days: Vec<Value> = (1..=6).map(|day| json!({ "DayOfWeek": day })).collect();
    json!({
        "ViewOptions": { "Days": days },
        "CategoryTypesWithIdentities": [identities_body(category_type, identities)],
    })
}

impl ScientiaClient {
    /// Fetch the timetables of several items of one type in a single request.
    pub async fn get_timetables(
        &self,
        category_type: CategoryType,
        identities: &[Uuid],
        window: DateWindow,
    ) -> Result<Vec<CategoryItemTimetable>> {
        let path = format!(
            "CategoryTypes/Categories/Events/Filter/{}",
            self.institution_id
        );
        let params = [
            ("startRange", format_range_bound(window.start)),
            ("endRange", format_range_bound(window.end)),
        ];
        let body = events_body(category_type, identities);

        let value = self.send(&path, &params, Some(&body)).await?;
        parse_timetables(value).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}
