use uuid::Uuid;

use crate::timetable::CategoryType;

/// Returns the cache key for the full listing of a category type.
pub fn category_key(category_type: CategoryType) -> String {
    format!("category:{}", category_type.identity())
}

/// Returns the cache key for a single category item.
pub fn item_key(item_id: Uuid) -> String {
    format!("item:{}", item_id)
}

/// Returns the cache key for the timetable of a category item.
pub fn timetable_key(item_id: Uuid) -> String {
    format!("timetable:{}", item_id)
}
