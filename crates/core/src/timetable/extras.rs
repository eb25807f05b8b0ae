//! Display text derived from an event for calendars and listings.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::event_name::EventNameData;
use super::location::{building_name, campus_name, Location};

static SEMESTER_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[1|1,2|2|2,3|3|3,1|TM|AY]\]").expect("valid regex"));

static SMALL_WORDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(a|an|and|at|but|by|de|en|for|if|in|of|on|or|the|to|via|vs?\.?)\b")
        .expect("valid regex")
});

static INTERNAL_CAPS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+[A-Z]+\S*").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Summaries, locations and description of an event, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtraEventData {
    /// Activities parsed from the event name; empty when the name is unstructured.
    pub event_name_data: Vec<EventNameData>,
    /// e.g. `"CSC1003 Computer Programming I (Group A)"`.
    pub summary: String,
    /// e.g. `"CSC1003 Computer Programming I (Lecture, Group A)"`.
    pub summary_long: String,
    /// e.g. `"L129, L130"`.
    pub location: String,
    /// e.g. `"L129, L130 (McNulty Building, Glasnevin)"`.
    pub location_long: String,
    /// e.g. `"Lecture, On Campus"`.
    pub description: String,
}

impl ExtraEventData {
    pub fn from_event(
        name: &str,
        event_type: &str,
        description: Option<&str>,
        module_name: Option<&str>,
        group_name: Option<&str>,
        locations: &[Location],
    ) -> Self {
        let event_name_data = EventNameData::parse_all(name);

        let title = match module_name.filter(|m| !m.is_empty()) {
            Some(module_name) => SEMESTER_CODE_RE.replace_all(module_name, "").into_owned(),
            None => name.to_string(),
        };

        let activity = match description {
            Some(d) if d.trim().eq_ignore_ascii_case("lab") => Some("Lab"),
            _ => event_name_data.first().map(|d| d.activity_type.display()),
        };

        let detail = match (activity, group_name) {
            (Some(activity), Some(group)) => Some(format!("({}, Group {})", activity, group)),
            (Some(activity), None) => Some(format!("({})", activity)),
            (None, Some(group)) => Some(format!("(Group {})", group)),
            (None, None) => None,
        };
        let summary_long = match detail {
            Some(detail) => title_case(format!("{} {}", title, detail).trim()),
            None => title_case(title.trim()),
        };

        let mut summary = title_case(&title);
        if let Some(group) = group_name {
            summary = format!("{} (Group {})", summary, group).trim().to_string();
        }

        let (location, location_long) = describe_locations(locations, event_type);

        let delivery = event_name_data
            .first()
            .and_then(|d| d.delivery_type)
            .map_or(event_type, |d| d.display());
        let description = if delivery.trim().eq_ignore_ascii_case("booking") {
            match description {
                Some(description) => format!("{}, {}", description, delivery),
                None => delivery.to_string(),
            }
        } else {
            match activity {
                Some(activity) => format!("{}, {}", activity, delivery),
                None => delivery.to_string(),
            }
        };

        Self {
            event_name_data,
            summary,
            summary_long,
            location,
            location_long,
            description,
        }
    }
}

/// Short and long location text. Rooms are grouped per building and ordered
/// by floor then room; unparsed locations are listed verbatim. With no
/// locations both fall back to the event type.
fn describe_locations(locations: &[Location], event_type: &str) -> (String, String) {
    if locations.is_empty() {
        return (event_type.to_string(), event_type.to_string());
    }

    // `None` groups unparsed locations.
    let mut groups: Vec<(Option<(&str, &str)>, Vec<&Location>)> = Vec::new();
    for location in locations {
        let key = location
            .is_parsed()
            .then_some((location.campus.as_str(), location.building.as_str()));
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(location),
            None => groups.push((key, vec![location])),
        }
    }

    let mut short = Vec::new();
    let mut long = Vec::new();
    for (key, mut members) in groups {
        match key {
            None => {
                let originals = members
                    .iter()
                    .filter_map(|l| l.original.as_deref())
                    .collect::<Vec<_>>()
                    .join(", ");
                short.push(originals.clone());
                long.push(originals);
            }
            Some((campus, building)) => {
                members.sort_by(|a, b| {
                    a.floor_rank()
                        .cmp(&b.floor_rank())
                        .then_with(|| a.room.cmp(&b.room))
                });
                let rooms = members
                    .iter()
                    .map(|l| l.room_code())
                    .collect::<Vec<_>>()
                    .join(", ");
                long.push(format!(
                    "{} ({}, {})",
                    rooms,
                    building_name(campus, building).unwrap_or("[unknown]"),
                    campus_name(campus).unwrap_or("[unknown]"),
                ));
                short.push(rooms);
            }
        }
    }

    (short.join(", "), long.join(", "))
}

/// Title-cases text, keeping words with internal capitals (codes) as they
/// are and lower-casing small words except at either end.
pub fn title_case(text: &str) -> String {
    let words: Vec<&str> = WHITESPACE_RE.split(text).collect();
    title_case_words(&words, true).join(" ")
}

fn title_case_words(words: &[&str], first_or_last: bool) -> Vec<String> {
    let last = words.len().saturating_sub(1);
    words
        .iter()
        .enumerate()
        .map(|(index, word)| {
            let at_edge = index == 0 || index == last;
            if word.contains('-') {
                let parts: Vec<&str> = word.split('-').collect();
                return title_case_words(&parts, at_edge).join("-");
            }
            if INTERNAL_CAPS_RE.is_match(word) {
                word.to_string()
            } else if !(first_or_last && at_edge) && SMALL_WORDS_RE.is_match(word) {
                word.to_lowercase()
            } else {
                capitalize(word)
            }
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
