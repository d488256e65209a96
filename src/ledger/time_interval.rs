use std::fmt;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::date::CalendarDate;
use crate::errors::{RecorderError, Result};

/// Recurrence and bucketing granularity. The discriminant is the persisted index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "usize", into = "usize")]
pub enum Interval {
    #[default]
    Never = 0,
    Daily = 1,
    Weekly = 2,
    Monthly = 3,
    Yearly = 4,
}

impl Interval {
    pub const ALL: [Interval; 5] = [
        Interval::Never,
        Interval::Daily,
        Interval::Weekly,
        Interval::Monthly,
        Interval::Yearly,
    ];

    pub fn from_index(index: usize) -> Result<Interval> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(RecorderError::InvalidInterval(index))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Interval::Never => "Never",
            Interval::Daily => "Daily",
            Interval::Weekly => "Weekly",
            Interval::Monthly => "Monthly",
            Interval::Yearly => "Yearly",
        }
    }

    /// Case-insensitive label lookup used by the CLI and config.
    pub fn from_label(label: &str) -> Option<Interval> {
        Self::ALL
            .into_iter()
            .find(|interval| interval.label().eq_ignore_ascii_case(label.trim()))
    }

    pub fn is_never(self) -> bool {
        matches!(self, Interval::Never)
    }

    /// First day of the period containing `date`. `Never` is the identity partition.
    pub fn period_start(self, date: CalendarDate) -> CalendarDate {
        let naive = date.as_naive();
        let start = match self {
            Interval::Never | Interval::Daily => naive,
            Interval::Weekly => {
                let delta = naive.weekday().num_days_from_monday() as i64;
                naive
                    .checked_sub_signed(Duration::days(delta))
                    .unwrap_or(NaiveDate::MIN)
            }
            Interval::Monthly => naive.with_day(1).unwrap_or(naive),
            Interval::Yearly => naive.with_ordinal(1).unwrap_or(naive),
        };
        start.into()
    }

    /// Last day of the period containing `date`. A period cut off by the end
    /// of the calendar ends on the last representable day.
    pub fn period_end(self, date: CalendarDate) -> CalendarDate {
        match self {
            Interval::Never | Interval::Daily => date,
            _ => match self.checked_next_occurrence(self.period_start(date)) {
                Some(next) => next.previous_day(),
                None => NaiveDate::MAX.into(),
            },
        }
    }

    /// `date` advanced by one calendar unit, saturating at the end of the calendar.
    pub fn next_occurrence(self, date: CalendarDate) -> CalendarDate {
        self.checked_next_occurrence(date)
            .unwrap_or_else(|| NaiveDate::MAX.into())
    }

    /// `date` advanced by one calendar unit, or `None` past the end of the
    /// calendar. Month and year steps clamp the day to the length of the
    /// target month.
    pub fn checked_next_occurrence(self, date: CalendarDate) -> Option<CalendarDate> {
        let naive = date.as_naive();
        let next = match self {
            Interval::Never | Interval::Daily => naive.succ_opt(),
            Interval::Weekly => naive.checked_add_signed(Duration::weeks(1)),
            Interval::Monthly => naive.checked_add_months(Months::new(1)),
            Interval::Yearly => naive.checked_add_months(Months::new(12)),
        };
        next.map(CalendarDate::from)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<usize> for Interval {
    type Error = RecorderError;

    fn try_from(index: usize) -> Result<Self> {
        Interval::from_index(index)
    }
}

impl From<Interval> for usize {
    fn from(interval: Interval) -> Self {
        interval.index()
    }
}
