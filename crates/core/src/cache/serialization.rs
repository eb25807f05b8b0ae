//! Pure functions for serializing/deserializing domain types to/from cache bytes.
//!
//! These functions use JSON serialization for cache storage, providing human-readable
//! cache values that are easy to debug and inspect.

use crate::timetable::{Category, CategoryItem, CategoryItemTimetable};
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a category listing to JSON bytes.
pub fn serialize_category(category: &Category) -> Result<Vec<u8>> {
    serde_json::to_vec(category).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a category listing.
pub fn deserialize_category(bytes: &[u8]) -> Result<Category> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes a category item to JSON bytes.
///
/// # Arguments
/// * `item` - The category item to serialize
///
/// # Returns
/// JSON-encoded bytes representing the item
pub fn serialize_item(item: &CategoryItem) -> Result<Vec<u8>> {
    serde_json::to_vec(item).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a category item.
///
/// # Arguments
/// * `bytes` - JSON-encoded bytes
///
/// # Returns
/// The deserialized category item
pub fn deserialize_item(bytes: &[u8]) -> Result<CategoryItem> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes an unfiltered item timetable to JSON bytes.
pub fn serialize_timetable(timetable: &CategoryItemTimetable) -> Result<Vec<u8>> {
    serde_json::to_vec(timetable).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to an item timetable.
pub fn deserialize_timetable(bytes: &[u8]) -> Result<CategoryItemTimetable> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
