pub mod cache;
pub mod retry;
pub mod serde;
pub mod source;
pub mod timetable;
