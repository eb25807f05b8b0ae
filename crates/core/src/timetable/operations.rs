use chrono::{DateTime, Utc};

use super::location::Location;
use super::types::{CategoryType, Event};

/// Keeps events whose start lies within `[start, end]`, inclusive on both ends.
///
/// Filtering an already filtered list with the same bounds returns it unchanged.
pub fn filter_events_by_range(
    events: Vec<Event>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<Event> {
    events
        .into_iter()
        .filter(|event| start <= event.start && event.start <= end)
        .collect()
}

/// Derives the human-facing code of a category item from its name.
///
/// Locations are normalised to space separated `CAMPUS.ROOM` codes; every
/// other type uses the first word of the name.
pub fn derive_item_code(category_type: CategoryType, name: &str) -> String {
    match category_type {
        CategoryType::Locations => Location::parse_all(name)
            .iter()
            .map(Location::to_string)
            .collect::<Vec<_>>()
            .join(" "),
        _ => name.split_whitespace().next().unwrap_or_default().to_string(),
    }
}

/// Parses an upstream weeks string such as `"1-4, 6, 8-9"` into week numbers.
///
/// Unparseable groups are skipped.
pub fn parse_weeks(weeks: &str) -> Vec<u32> {
    let mut parsed = Vec::new();

    for group in weeks.split(',').map(str::trim).filter(|g| !g.is_empty()) {
        match group.split_once('-') {
            Some((from, to)) => {
                if let (Ok(from), Ok(to)) = (from.trim().parse::<u32>(), to.trim().parse::<u32>()) {
                    parsed.extend(from..=to);
                }
            }
            None => {
                if let Ok(week) = group.parse::<u32>() {
                    parsed.push(week);
                }
            }
        }
    }

    parsed
}

/// Extracts a group letter from an event name or description.
///
/// Checks the lower-cased, whitespace-free name then description for `group`
/// and then for `grp`, taking the character right after the marker,
/// upper-cased. A `grp` match wins over a `group` match.
pub fn extract_group_name(name: &str, description: Option<&str>) -> Option<String> {
    let candidates: Vec<String> = [Some(name), description]
        .into_iter()
        .flatten()
        .map(|value| {
            value
                .to_lowercase()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect()
        })
        .collect();

    let mut group = None;
    for marker in ["group", "grp"] {
        let found = candidates.iter().find_map(|value| {
            let index = value.find(marker)? + marker.len();
            value[index..].chars().next()
        });
        if let Some(c) = found {
            group = Some(c.to_uppercase().to_string());
        }
    }

    group
}
