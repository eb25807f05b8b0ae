//! Structured data parsed from upstream event names.
//!
//! Event names encode modules, semester, delivery type, activity and group,
//! e.g. `CSC1003[1]OC/L1/01` is lecture 1 of CSC1003 in semester 1, on
//! campus, for group 1. Names are hand-typed upstream, so a few common typos
//! are corrected before parsing.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const SEMESTER: &str = r"(?:1|1,2|2|2,3|3|3,1|TM|AY)";

static EVENT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?P<modules_semester>[A-Z]{{2,3}}\d{{4}}(?:/(?:[A-Z]{{2,3}}\d{{4}}|\d{{2,4}}))*(?:\[{SEMESTER}\][A-Z]{{2,3}}\d{{4}})*\[{SEMESTER}\])(?:(?P<delivery_type>OC|0C|AY|AS|ASY|SY|HY)/)?(?:(?P<activity_type>[PLTWSE])\d{{1,2}})[^/\n]*(?:/(?P<group_number>\d{{2}}))?"
    ))
    .expect("valid regex")
});

/// `HIS1080/HIS1076[2]`: several full codes sharing one semester.
static SHARED_SEMESTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<modules>(?:[A-Z]{{2,3}}\d{{4}}/?)+)\[(?P<semester>{SEMESTER})\]$"
    ))
    .expect("valid regex")
});

/// `HIS1013[2]HIS1014[2]`: each code with its own semester.
static MODULE_SEMESTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?P<module>[A-Z]{{2,3}}\d{{4}})\[(?P<semester>{SEMESTER})\]"
    ))
    .expect("valid regex")
});

/// `TRA1017/1018[2]` or `SPA1035/30[1]`: one subject prefix, abbreviated numbers.
static SHARED_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<prefix>[A-Z]{{3}})(?P<codes>\d{{4}}/(?:\d{{4}}|\d{{2}}))\[(?P<semester>{SEMESTER})\]$"
    ))
    .expect("valid regex")
});

const TYPO_CORRECTIONS: [(&str, &str); 12] = [
    (" ", ""),
    ("//", "/"),
    ("(", "["),
    (")", "]"),
    ("{", "["),
    ("}", "]"),
    ("]/", "]"),
    ("][", "]"),
    ("[[", "["),
    ("]]", "]"),
    ("/]", "/"),
    ("[/", "/"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Semester {
    One,
    Two,
    Three,
    OneAndTwo,
    OneAndThree,
    TwoAndThree,
    /// Semesters 1, 2 and 3.
    YearLong,
    TwelveMonth,
}

impl Semester {
    fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "1" => Semester::One,
            "2" => Semester::Two,
            "3" => Semester::Three,
            "1,2" => Semester::OneAndTwo,
            "1,3" | "3,1" => Semester::OneAndThree,
            "2,3" => Semester::TwoAndThree,
            "AY" => Semester::YearLong,
            "TM" => Semester::TwelveMonth,
            _ => return None,
        })
    }

    pub fn display(&self) -> &'static str {
        match self {
            Semester::One => "Semester 1",
            Semester::Two => "Semester 2",
            Semester::Three => "Semester 3",
            Semester::OneAndTwo => "Semester 1 And 2",
            Semester::OneAndThree => "Semester 1 And 3",
            Semester::TwoAndThree => "Semester 2 And 3",
            Semester::YearLong => "Year Long",
            Semester::TwelveMonth => "Twelve Month",
        }
    }
}

/// How an event is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryType {
    OnCampus,
    /// Recorded.
    Asynchronous,
    /// Online, live.
    Synchronous,
    Hybrid,
}

impl DeliveryType {
    fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "OC" | "0C" => DeliveryType::OnCampus,
            "AY" | "AS" | "ASY" => DeliveryType::Asynchronous,
            "SY" => DeliveryType::Synchronous,
            "HY" => DeliveryType::Hybrid,
            _ => return None,
        })
    }

    pub fn display(&self) -> &'static str {
        match self {
            DeliveryType::OnCampus => "On Campus",
            DeliveryType::Asynchronous => "Asynchronous (Recorded)",
            DeliveryType::Synchronous => "Synchronous (Online, live)",
            DeliveryType::Hybrid => "Hybrid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Practical,
    Lecture,
    Tutorial,
    Workshop,
    Seminar,
    Examination,
}

impl ActivityType {
    fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "P" => ActivityType::Practical,
            "L" => ActivityType::Lecture,
            "T" => ActivityType::Tutorial,
            "W" => ActivityType::Workshop,
            "S" => ActivityType::Seminar,
            "E" => ActivityType::Examination,
            _ => return None,
        })
    }

    pub fn display(&self) -> &'static str {
        match self {
            ActivityType::Practical => "Practical",
            ActivityType::Lecture => "Lecture",
            ActivityType::Tutorial => "Tutorial",
            ActivityType::Workshop => "Workshop",
            ActivityType::Seminar => "Seminar",
            ActivityType::Examination => "Examination",
        }
    }
}

/// One activity parsed from an event name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventNameData {
    /// Module codes the event is for, e.g. `["HIS1013", "HIS1014"]`.
    pub module_codes: Vec<String>,
    pub semester: Semester,
    pub delivery_type: Option<DeliveryType>,
    pub activity_type: ActivityType,
    pub group_number: Option<u32>,
}

impl EventNameData {
    /// Parses every activity found in an event name.
    ///
    /// Returns an empty list when the name doesn't follow the naming scheme
    /// (bookings, exams entered by hand, ...).
    pub fn parse_all(name: &str) -> Vec<EventNameData> {
        let mut data = name.to_uppercase();
        for (typo, correction) in TYPO_CORRECTIONS {
            data = data.replace(typo, correction);
        }

        EVENT_NAME_RE
            .captures_iter(&data)
            .filter_map(|caps| {
                let (module_codes, semester) =
                    split_modules_semester(caps.name("modules_semester")?.as_str())?;
                Some(EventNameData {
                    module_codes,
                    semester,
                    delivery_type: caps
                        .name("delivery_type")
                        .and_then(|m| DeliveryType::from_code(m.as_str())),
                    activity_type: ActivityType::from_code(caps.name("activity_type")?.as_str())?,
                    group_number: caps
                        .name("group_number")
                        .and_then(|m| m.as_str().parse().ok()),
                })
            })
            .collect()
    }
}

/// Splits the module/semester prefix of an event name.
///
/// The shared-semester form must be tried first: the per-module form also
/// matches part of it.
fn split_modules_semester(prefix: &str) -> Option<(Vec<String>, Semester)> {
    if let Some(caps) = SHARED_SEMESTER_RE.captures(prefix) {
        let modules = caps
            .name("modules")?
            .as_str()
            .split('/')
            .filter(|module| !module.trim().is_empty())
            .map(str::to_string)
            .collect();
        return Some((modules, Semester::from_code(caps.name("semester")?.as_str())?));
    }

    let pairs: Vec<_> = MODULE_SEMESTER_RE.captures_iter(prefix).collect();
    if let Some(first) = pairs.first() {
        let semester = Semester::from_code(first.name("semester")?.as_str())?;
        let modules = pairs
            .iter()
            .filter_map(|caps| caps.name("module"))
            .map(|m| m.as_str().to_string())
            .collect();
        return Some((modules, semester));
    }

    let caps = SHARED_PREFIX_RE.captures(prefix)?;
    let subject = caps.name("prefix")?.as_str();
    let codes: Vec<&str> = caps.name("codes")?.as_str().split('/').collect();
    let base = codes.first()?.get(..2)?;
    let modules = codes
        .iter()
        .map(|code| match code.len() {
            2 => format!("{}{}{}", subject, base, code),
            _ => format!("{}{}", subject, code),
        })
        .collect();
    Some((modules, Semester::from_code(caps.name("semester")?.as_str())?))
}
