pub mod cache;
pub mod cli;
pub mod config;
pub mod output;
pub mod resolver;

pub use config::Config;
pub use resolver::{ResolveError, TimetableResolver};
