//! Output formatting functions.

use serde::Serialize;

use crate::cli::OutputFormat;

/// Format a value for output.
pub fn format_output<T: Serialize>(value: &T, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::Pretty => serde_json::to_string_pretty(value),
    }
}
