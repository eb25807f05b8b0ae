//! CLI command definitions.

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use timetable_core::serde::parse_utc_timestamp;
use timetable_core::timetable::CategoryType;

/// Cache-aside timetable sync for the Scientia scheduling service.
#[derive(Debug, Parser)]
#[command(name = "timetable-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Upstream API root. Overrides SCIENTIA_BASE_URL.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Emit logs as JSON lines on stderr.
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON output.
    Json,
    /// Indented JSON output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the items of a category (modules, locations or courses).
    Categories {
        /// Category type.
        category_type: CategoryType,

        /// Fuzzy search on item names.
        #[arg(long)]
        query: Option<String>,

        /// Maximum number of items to print.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Resolve codes or identities to category items.
    Resolve {
        /// Category type.
        category_type: CategoryType,

        /// Codes (e.g. CSC1003[1]) or item identities.
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Gather the events of several items.
    Events {
        /// Module codes or identities.
        #[arg(long)]
        modules: Vec<String>,

        /// Location codes or identities.
        #[arg(long)]
        locations: Vec<String>,

        /// Course codes or identities.
        #[arg(long)]
        courses: Vec<String>,

        /// Range start (date or timestamp). Defaults to the academic year start.
        #[arg(long, value_parser = parse_instant)]
        start: Option<DateTime<Utc>>,

        /// Range end (date or timestamp). Defaults to the academic year end.
        #[arg(long, value_parser = parse_instant)]
        end: Option<DateTime<Utc>>,
    },
}

impl Commands {
    /// Raw codes of an `events` command grouped by category type.
    /// Types with no codes are left out.
    pub fn event_groups(&self) -> Vec<(CategoryType, Vec<String>)> {
        let Commands::Events {
            modules,
            locations,
            courses,
            ..
        } = self
        else {
            return Vec::new();
        };

        [
            (CategoryType::Modules, modules),
            (CategoryType::Locations, locations),
            (CategoryType::ProgrammesOfStudy, courses),
        ]
        .into_iter()
        .filter(|(_, codes)| !codes.is_empty())
        .map(|(category_type, codes)| (category_type, codes.clone()))
        .collect()
    }
}

/// Parses a UTC instant from a timestamp or a bare `YYYY-MM-DD` date (midnight).
fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(date) = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| format!("invalid date '{}'", s));
    }
    parse_utc_timestamp(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_categories() {
        let cli = Cli::try_parse_from([
            "timetable-sync",
            "categories",
            "modules",
            "--query",
            "programming",
            "--limit",
            "5",
        ])
        .unwrap();

        match cli.command {
            Commands::Categories {
                category_type,
                query,
                limit,
            } => {
                assert_eq!(category_type, CategoryType::Modules);
                assert_eq!(query.as_deref(), Some("programming"));
                assert_eq!(limit, Some(5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.format, OutputFormat::Pretty);
        assert!(!cli.json_logs);
    }

    #[test]
    fn test_parse_unknown_category_type() {
        let result = Cli::try_parse_from(["timetable-sync", "categories", "clubs"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_requires_codes() {
        let result = Cli::try_parse_from(["timetable-sync", "resolve", "modules"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_events() {
        let cli = Cli::try_parse_from([
            "timetable-sync",
            "--format",
            "json",
            "events",
            "--modules",
            "CSC1003[1]",
            "--modules",
            "CSC1061[1]",
            "--locations",
            "GLA.L129",
            "--start",
            "2024-10-01",
            "--end",
            "2024-10-07T23:59:59Z",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(
            cli.command.event_groups(),
            vec![
                (
                    CategoryType::Modules,
                    vec!["CSC1003[1]".to_string(), "CSC1061[1]".to_string()]
                ),
                (CategoryType::Locations, vec!["GLA.L129".to_string()]),
            ]
        );

        let Commands::Events { start, end, .. } = cli.command else {
            panic!("expected events command");
        };
        assert_eq!(start, Some(Utc.with_ymd_and_hms(2024, 10, 1, 0, 0, 0).unwrap()));
        assert_eq!(end, Some(Utc.with_ymd_and_hms(2024, 10, 7, 23, 59, 59).unwrap()));
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        assert!(parse_instant("next tuesday").is_err());
    }

    #[test]
    fn test_event_groups_empty_for_other_commands() {
        let cli = Cli::try_parse_from(["timetable-sync", "resolve", "courses", "COMSCI1"]).unwrap();
        assert!(cli.command.event_groups().is_empty());
    }
}
