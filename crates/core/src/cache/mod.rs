mod error;
mod keys;
mod probe;
mod serialization;
mod traits;
mod ttl;

pub use error::{CacheError, Result};
pub use keys::{category_key, item_key, timetable_key};
pub use probe::{probe, CacheProbe};
pub use serialization::{
    deserialize_category, deserialize_item, deserialize_timetable, serialize_category,
    serialize_item, serialize_timetable, SerializationError,
};
pub use traits::Cache;
pub use ttl::CacheTtl;
