mod code;
mod error;
mod event_name;
mod extras;
mod location;
mod matching;
mod operations;
mod payload;
mod types;

pub use code::RawCode;
pub use error::{CategoryTypeError, PayloadError};
pub use event_name::{ActivityType, DeliveryType, EventNameData, Semester};
pub use extras::{title_case, ExtraEventData};
pub use location::{building_name, campus_name, Location};
pub use matching::{filter_items_by_name, Matcher, PartialRatioMatcher, DEFAULT_SCORE_CUTOFF};
pub use operations::{
    derive_item_code, extract_group_name, filter_events_by_range, parse_weeks,
};
pub use payload::{parse_category_items, parse_category_page, parse_timetables};
pub use types::{
    Category, CategoryItem, CategoryItemSummary, CategoryItemTimetable, CategoryPage,
    CategoryType, Event,
};
