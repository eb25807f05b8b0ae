use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::CategoryTypeError;
use super::extras::ExtraEventData;
use super::location::Location;

/// A category type known to the upstream scheduling service.
///
/// Each variant is bound to a fixed upstream identity, which is also the
/// value used in `category:<type>` cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryType {
    Modules,
    Locations,
    ProgrammesOfStudy,
}

impl CategoryType {
    /// All category types, in display order.
    pub const ALL: [CategoryType; 3] = [
        CategoryType::Modules,
        CategoryType::Locations,
        CategoryType::ProgrammesOfStudy,
    ];

    /// Returns the upstream identity of this category type.
    pub fn identity(&self) -> Uuid {
        match self {
            CategoryType::Modules => Uuid::from_u128(0x525fe79b_73c3_4b5c_8186_83c652b3adcc),
            CategoryType::Locations => Uuid::from_u128(0x1e042cb1_547d_41d4_ae93_a1f2c3d34538),
            CategoryType::ProgrammesOfStudy => {
                Uuid::from_u128(0x241e4d36_60e0_49f8_b27e_99416745d98d)
            }
        }
    }

    /// Looks up a category type by its upstream identity.
    pub fn from_identity(identity: Uuid) -> Result<Self, CategoryTypeError> {
        Self::ALL
            .into_iter()
            .find(|t| t.identity() == identity)
            .ok_or_else(|| CategoryTypeError::UnknownIdentity(identity.to_string()))
    }

    /// Human-readable name used by the CLI and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Modules => "modules",
            CategoryType::Locations => "locations",
            CategoryType::ProgrammesOfStudy => "courses",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = CategoryTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "module" | "modules" => Ok(CategoryType::Modules),
            "location" | "locations" => Ok(CategoryType::Locations),
            "course" | "courses" | "programme" | "programmes" | "programmes_of_study" => {
                Ok(CategoryType::ProgrammesOfStudy)
            }
            other => match Uuid::parse_str(other) {
                Ok(identity) => Self::from_identity(identity),
                Err(_) => Err(CategoryTypeError::UnknownName(s.to_string())),
            },
        }
    }
}

/// An item belonging to a category: a course, module or location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryItem {
    /// Upstream-assigned identity, stable across fetches.
    pub identity: Uuid,
    /// Full upstream name.
    ///
    /// - Courses: `"COMSCI1"`
    /// - Modules: `"CSC1003[1] Computer Programming I"`
    /// - Locations: `"GLA.C117 & C122"`
    pub name: String,
    /// Code derived from the name.
    ///
    /// - Courses: `"COMSCI1"`
    /// - Modules: `"CSC1003[1]"`
    /// - Locations: `"GLA.C117 GLA.C122"`
    pub code: String,
    /// Full title or short description; `None` when upstream sends a blank one.
    pub description: Option<String>,
    pub category_type: CategoryType,
    /// Identities of the faculties this item belongs to.
    pub parent_categories: Vec<Uuid>,
}

impl CategoryItem {
    /// Creates an item, deriving its code from the name.
    pub fn new(identity: Uuid, category_type: CategoryType, name: impl Into<String>) -> Self {
        let name = name.into();
        let code = super::operations::derive_item_code(category_type, &name);
        Self {
            identity,
            name,
            code,
            description: None,
            category_type,
            parent_categories: Vec::new(),
        }
    }

    /// Sets the description for this item.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the parent categories for this item.
    pub fn with_parent_categories(mut self, parents: Vec<Uuid>) -> Self {
        self.parent_categories = parents;
        self
    }

    /// Projects this item to its summary.
    pub fn summary(&self) -> CategoryItemSummary {
        CategoryItemSummary {
            identity: self.identity,
            name: self.name.clone(),
        }
    }
}

/// Identity and name of a category item, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryItemSummary {
    pub identity: Uuid,
    pub name: String,
}

/// A full or filtered listing of category items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Category {
    pub items: Vec<CategoryItem>,
    /// Server-side match count, or the filtered length for a filtered read.
    pub count: u64,
}

impl Category {
    pub fn new(items: Vec<CategoryItem>, count: u64) -> Self {
        Self { items, count }
    }

    /// Creates a category whose count is its own length.
    pub fn from_items(items: Vec<CategoryItem>) -> Self {
        let count = items.len() as u64;
        Self { items, count }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn summaries(&self) -> Vec<CategoryItemSummary> {
        self.items.iter().map(CategoryItem::summary).collect()
    }
}

/// One page of an upstream category listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPage {
    pub total_pages: u32,
    pub count: u64,
    pub results: Vec<CategoryItem>,
}

/// The full, uncropped timetable of one category item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryItemTimetable {
    pub category_type: CategoryType,
    pub identity: Uuid,
    pub name: String,
    pub events: Vec<Event>,
}

impl CategoryItemTimetable {
    pub fn new(category_type: CategoryType, identity: Uuid, name: impl Into<String>) -> Self {
        Self {
            category_type,
            identity,
            name: name.into(),
            events: Vec::new(),
        }
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }
}

/// A single scheduled occurrence on a timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub identity: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Shared by events of the same activity type and number (e.g. all of L1).
    pub status_identity: String,
    /// Rooms the event takes place in; empty for online events.
    pub locations: Vec<Location>,
    pub description: Option<String>,
    pub name: String,
    /// Usually `"On Campus"`, `"Synchronous (Online, live)"`,
    /// `"Asynchronous (Recorded)"` or `"Booking"`.
    pub event_type: String,
    pub last_modified: DateTime<Utc>,
    pub module_name: Option<String>,
    pub staff_member: Option<String>,
    pub weeks: Option<Vec<u32>>,
    pub group_name: Option<String>,
    pub extras: ExtraEventData,
}

impl Event {
    /// Creates an event with the required fields; descriptive fields are empty.
    pub fn new(
        identity: Uuid,
        name: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            identity,
            start,
            end,
            status_identity: String::new(),
            locations: Vec::new(),
            description: None,
            name: name.into(),
            event_type: String::new(),
            last_modified: start,
            module_name: None,
            staff_member: None,
            weeks: None,
            group_name: None,
            extras: ExtraEventData::default(),
        }
        .with_refreshed_extras()
    }

    /// Sets the locations from an upstream location string.
    pub fn with_location(mut self, location: &str) -> Self {
        self.locations = Location::parse_all(location);
        self.with_refreshed_extras()
    }

    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self.with_refreshed_extras()
    }

    /// Recomputes the display data from the other fields.
    pub fn with_refreshed_extras(mut self) -> Self {
        self.extras = ExtraEventData::from_event(
            &self.name,
            &self.event_type,
            self.description.as_deref(),
            self.module_name.as_deref(),
            self.group_name.as_deref(),
            &self.locations,
        );
        self
    }
}
