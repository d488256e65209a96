use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{RecorderError, Result};

/// A validated calendar day. Persisted as a `[day, month, year]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "[i32; 3]", into = "[i32; 3]")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(day: u32, month: u32, year: i32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(CalendarDate)
            .ok_or(RecorderError::InvalidDate { day, month, year })
    }

    /// Parses the `dd.mm.yyyy` text form. Single-digit day and month are accepted.
    pub fn parse(text: &str) -> Result<Self> {
        let malformed = || RecorderError::MalformedRecord(format!("`{text}` is not a dd.mm.yyyy date"));
        let mut parts = text.trim().split('.');
        let mut next = || parts.next().ok_or_else(malformed);
        let day = next()?.parse::<u32>().map_err(|_| malformed())?;
        let month = next()?.parse::<u32>().map_err(|_| malformed())?;
        let year = next()?.parse::<i32>().map_err(|_| malformed())?;
        if parts.next().is_some() {
            return Err(malformed());
        }
        Self::new(day, month, year)
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Inclusive range test.
    pub fn is_within(&self, start: CalendarDate, end: CalendarDate) -> bool {
        start <= *self && *self <= end
    }

    pub fn next_day(&self) -> CalendarDate {
        // NaiveDate only runs out at year 262143.
        CalendarDate(self.0.succ_opt().unwrap_or(NaiveDate::MAX))
    }

    pub fn previous_day(&self) -> CalendarDate {
        CalendarDate(self.0.pred_opt().unwrap_or(NaiveDate::MIN))
    }

    pub fn to_text(&self) -> String {
        format!("{:02}.{:02}.{}", self.day(), self.month(), self.year())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl TryFrom<[i32; 3]> for CalendarDate {
    type Error = RecorderError;

    fn try_from([day, month, year]: [i32; 3]) -> Result<Self> {
        match (u32::try_from(day), u32::try_from(month)) {
            (Ok(day), Ok(month)) => CalendarDate::new(day, month, year),
            _ => Err(RecorderError::MalformedRecord(format!(
                "negative date component in [{day}, {month}, {year}]"
            ))),
        }
    }
}

impl From<CalendarDate> for [i32; 3] {
    fn from(date: CalendarDate) -> Self {
        [date.day() as i32, date.month() as i32, date.year()]
    }
}
