use chrono::{DateTime, Datelike, TimeZone, Utc};

use super::DateRangeError;

/// A time window with inclusive start and end instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// Creates a new window, validating that start <= end.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The academic year containing `now`: Aug 1 to May 1 of the following year.
    ///
    /// The academic year starts in the current calendar year from August
    /// onwards, otherwise it started the previous calendar year.
    pub fn academic_year(now: DateTime<Utc>) -> Self {
        let start_year = if now.month() >= 8 {
            now.year()
        } else {
            now.year() - 1
        };
        Self {
            start: midnight_utc(start_year, 8, 1),
            end: midnight_utc(start_year + 1, 5, 1),
        }
    }

    /// Returns true if `other` lies entirely within this window.
    pub fn contains(&self, other: &DateWindow) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns true if `instant` lies within this window (inclusive).
    pub fn includes(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

fn midnight_utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// A caller's requested range, resolved against the academic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRequest {
    /// The range to filter events to.
    pub range: DateWindow,
    /// The academic-year window requested from upstream.
    pub academic_year: DateWindow,
}

impl RangeRequest {
    /// Resolves optional caller bounds, defaulting each missing bound to the
    /// academic year containing `now`.
    ///
    /// Fails if the resolved start is after the resolved end.
    pub fn resolve(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Self, DateRangeError> {
        let academic_year = DateWindow::academic_year(now);
        let range = DateWindow::new(
            start.unwrap_or(academic_year.start),
            end.unwrap_or(academic_year.end),
        )?;
        Ok(Self {
            range,
            academic_year,
        })
    }

    /// True when part of the requested range falls outside the academic year,
    /// which upstream's own window may not cover.
    pub fn outside_academic_year(&self) -> bool {
        !self.academic_year.contains(&self.range)
    }
}
