//! timetable_client - HTTP client for the Scientia timetable API.

pub mod client;
pub mod error;

pub use client::{ClientConfig, ScientiaClient};
pub use error::{ClientError, Result};
