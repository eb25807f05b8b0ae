mod error;
mod traits;
mod types;

pub use error::{DateRangeError, Result, SourceError};
pub use traits::TimetableSource;
pub use types::{DateWindow, RangeRequest};
