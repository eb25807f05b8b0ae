//! Campus room codes such as `GLA.L129`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^((?P<campus>[A-Z]{3})\.)?(?P<building>VB|[A-Z][AC-FH-Z]?)(?P<floor>[BG1-9])(?P<room>[0-9\-A-Za-z ()]+)$",
    )
    .expect("valid regex")
});

/// Floors from lowest to highest: basement, ground, then numbered.
const FLOOR_ORDER: &str = "BG123456789";

/// A single room, or an unparseable location kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// `"GLA"`, `"SPC"` or `"AHC"`; empty when the code has no campus prefix.
    pub campus: String,
    /// Building code, e.g. `"L"` or `"SA"`.
    pub building: String,
    /// `"B"` (basement), `"G"` (ground) or a floor number.
    pub floor: String,
    /// Room code. Not guaranteed to be numeric.
    pub room: String,
    /// The raw location text when it could not be parsed.
    pub original: Option<String>,
}

impl Location {
    /// Parses an upstream location string into rooms.
    ///
    /// Comma separated entries are split, and `GLA.C117 & C122` expands to
    /// both rooms on the shared campus. Entries that don't look like a room
    /// are dropped; if none parse, a single unparsed location holding the
    /// trimmed input is returned.
    pub fn parse_all(location: &str) -> Vec<Location> {
        let mut codes = Vec::new();
        for entry in location.split(',').map(str::trim) {
            match entry.split_once('.') {
                Some((campus, rooms)) if entry.contains('&') => {
                    codes.extend(
                        rooms
                            .split('&')
                            .map(|room| format!("{}.{}", campus.trim(), room.trim())),
                    );
                }
                _ => codes.push(entry.to_string()),
            }
        }

        let parsed: Vec<Location> = codes.iter().filter_map(|code| Self::parse(code)).collect();
        if !parsed.is_empty() {
            return parsed;
        }

        vec![Location {
            campus: String::new(),
            building: String::new(),
            floor: String::new(),
            room: String::new(),
            original: Some(location.trim().to_string()),
        }]
    }

    fn parse(code: &str) -> Option<Location> {
        let caps = LOCATION_RE.captures(code)?;
        Some(Location {
            campus: caps
                .name("campus")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            building: caps.name("building")?.as_str().to_string(),
            floor: caps.name("floor")?.as_str().to_string(),
            room: caps.name("room")?.as_str().to_string(),
            original: None,
        })
    }

    /// True when the location was parsed into campus, building, floor and room.
    pub fn is_parsed(&self) -> bool {
        self.original.is_none()
    }

    /// Room code without the campus, e.g. `"L129"`.
    pub fn room_code(&self) -> String {
        format!("{}{}{}", self.building, self.floor, self.room)
    }

    /// Position of the floor from the lowest floor up; unknown floors sort last.
    pub fn floor_rank(&self) -> usize {
        FLOOR_ORDER.find(self.floor.as_str()).unwrap_or(FLOOR_ORDER.len())
    }

    /// Long description, e.g. `"1.29, McNulty Building (L), Glasnevin (GLA)"`.
    ///
    /// Unparsed locations are returned as-is.
    pub fn pretty_string(&self, include_code: bool) -> String {
        if let Some(original) = &self.original {
            return original.clone();
        }

        let mut pretty = format!(
            "{}.{}, {} ({}), {} ({})",
            self.floor,
            self.room,
            building_name(&self.campus, &self.building).unwrap_or("[unknown]"),
            self.building,
            campus_name(&self.campus).unwrap_or("[unknown]"),
            self.campus,
        );
        if include_code {
            pretty.push_str(&format!(", ({})", self));
        }
        pretty
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(original) = &self.original {
            return f.write_str(original);
        }
        if !self.campus.is_empty() {
            write!(f, "{}.", self.campus)?;
        }
        f.write_str(&self.room_code())
    }
}

/// Full name of a campus code.
pub fn campus_name(campus: &str) -> Option<&'static str> {
    match campus {
        "AHC" => Some("All Hallows"),
        "GLA" => Some("Glasnevin"),
        "SPC" => Some("St Patrick's"),
        _ => None,
    }
}

/// Full name of a building on a campus.
pub fn building_name(campus: &str, building: &str) -> Option<&'static str> {
    let name = match (campus, building) {
        ("GLA", "A") => "Albert College",
        ("GLA", "B") => "Invent Building",
        ("GLA", "C") => "Henry Grattan Building",
        ("GLA", "CA") => "Henry Grattan Extension",
        ("GLA", "D") => "BEA Orpen Building",
        ("GLA", "E") => "Estates Office",
        ("GLA", "F") => "Multi-Storey Car Park",
        ("GLA", "FT") => "The Polaris Building",
        ("GLA", "G") => "NICB Building",
        ("GLA", "GA") => "NRF Building",
        ("GLA", "H") => "Nursing Building",
        ("GLA", "J") => "Hamilton Building",
        ("GLA", "KA") => "U Building / Student Centre",
        ("GLA", "L") => "McNulty Building",
        ("GLA", "M") => "Interfaith Centre",
        ("GLA", "N") => "Marconi Building",
        ("GLA", "P") => "Pavilion",
        ("GLA", "PR") => "Restaurant",
        ("GLA", "Q") => "Business School",
        ("GLA", "QA") => "MacCormac Reception",
        ("GLA", "R") => "Creche",
        ("GLA", "S") => "Stokes Building",
        ("GLA", "SA") => "Stokes Annex",
        ("GLA", "T") => "Terence Larkin Theatre",
        ("GLA", "U") => "Accommodation & Sports Club",
        ("GLA", "V1") => "Larkfield Residences",
        ("GLA", "V2") => "Hampstead Residences",
        ("GLA", "VA") => "Postgraduate Residences A",
        ("GLA", "VB") => "Postgraduate Residences B",
        ("GLA", "W") => "College Park Residences",
        ("GLA", "X") => "Lonsdale Building",
        ("GLA", "Y") => "O'Reilly Library",
        ("GLA", "Z") => "The Helix",
        ("SPC", "A") => "Block A",
        ("SPC", "B") => "Block B",
        ("SPC", "C") => "Block C",
        ("SPC", "D") => "Block D",
        ("SPC", "E") => "Block E",
        ("SPC", "F") => "Block F",
        ("SPC", "G") => "Block G",
        ("SPC", "S") => "Block S / Sports Hall",
        ("AHC", "C") => "Chapel",
        ("AHC", "OD") => "O'Donnell House",
        ("AHC", "P") => "Purcell House",
        ("AHC", "S") => "Senior House",
        _ => return None,
    };
    Some(name)
}
