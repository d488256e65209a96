use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use super::{category::CategoryTable, date::CalendarDate, time_interval::Interval};
use crate::errors::Result;

/// Number of fraction digits kept on every amount.
pub const MONEY_SCALE: u32 = 2;

/// How long a recurring entry keeps repeating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecurrenceEnd {
    #[default]
    Infinite,
    /// Last date (inclusive) an occurrence may fall on.
    Until(CalendarDate),
}

impl RecurrenceEnd {
    pub fn until(&self) -> Option<CalendarDate> {
        match self {
            RecurrenceEnd::Infinite => None,
            RecurrenceEnd::Until(date) => Some(*date),
        }
    }
}

/// A single recorded movement of money.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEntry {
    amount: Decimal,
    type_index: usize,
    subtype_index: usize,
    name: String,
    location: String,
    date: CalendarDate,
    repeat: Interval,
    duration: RecurrenceEnd,
}

impl TransactionEntry {
    pub fn new(amount: Decimal, type_index: usize, subtype_index: usize, date: CalendarDate) -> Self {
        Self {
            amount: round_money(amount),
            type_index,
            subtype_index,
            name: String::new(),
            location: String::new(),
            date,
            repeat: Interval::Never,
            duration: RecurrenceEnd::Infinite,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_recurrence(mut self, repeat: Interval, duration: RecurrenceEnd) -> Self {
        self.repeat = repeat;
        self.duration = duration;
        self
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn type_index(&self) -> usize {
        self.type_index
    }

    pub fn subtype_index(&self) -> usize {
        self.subtype_index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn repeat(&self) -> Interval {
        self.repeat
    }

    /// Stored duration policy. Meaningless while `repeat` is `Never`.
    pub fn duration(&self) -> RecurrenceEnd {
        self.duration
    }

    pub fn is_recurring(&self) -> bool {
        !self.repeat.is_never()
    }

    /// Bound on generated occurrences, if the entry recurs and is not infinite.
    pub fn effective_until(&self) -> Option<CalendarDate> {
        if self.is_recurring() {
            self.duration.until()
        } else {
            None
        }
    }

    /// Copy of this entry placed on `date` with the recurrence stripped.
    pub fn occurrence_on(&self, date: CalendarDate) -> TransactionEntry {
        TransactionEntry {
            date,
            repeat: Interval::Never,
            duration: RecurrenceEnd::Infinite,
            ..self.clone()
        }
    }

    pub fn signed_contribution(&self, categories: &CategoryTable) -> Result<Decimal> {
        categories.signed_contribution(self.type_index, self.amount)
    }

    /// Validates `change` against this entry and returns the updated copy.
    /// `self` is never modified, so a rejection leaves the prior value intact.
    pub fn apply(
        &self,
        change: EntryChange,
        categories: &CategoryTable,
    ) -> std::result::Result<TransactionEntry, EditRejection> {
        let mut next = self.clone();
        match change {
            EntryChange::Amount(amount) => next.amount = round_money(amount),
            EntryChange::Type(type_index) => {
                if !categories.contains(type_index, 0) {
                    return Err(EditRejection::UnknownCategory {
                        type_index,
                        subtype_index: 0,
                    });
                }
                next.type_index = type_index;
                next.subtype_index = 0;
            }
            EntryChange::Subtype(subtype_index) => {
                if !categories.contains(self.type_index, subtype_index) {
                    return Err(EditRejection::UnknownCategory {
                        type_index: self.type_index,
                        subtype_index,
                    });
                }
                next.subtype_index = subtype_index;
            }
            EntryChange::Name(name) => next.name = name,
            EntryChange::Location(location) => next.location = location,
            EntryChange::Date { day, month, year } => {
                let date = validated(day, month, year)?;
                next.date = date;
                if let RecurrenceEnd::Until(until) = next.duration {
                    if until < date {
                        next.duration = RecurrenceEnd::Until(date);
                    }
                }
            }
            EntryChange::Repeat(repeat) => next.repeat = repeat,
            EntryChange::Infinite(infinite) => {
                if !self.is_recurring() {
                    return Err(EditRejection::NotRecurring);
                }
                next.duration = match (infinite, self.duration) {
                    (true, _) => RecurrenceEnd::Infinite,
                    (false, RecurrenceEnd::Until(until)) => RecurrenceEnd::Until(until.max(self.date)),
                    (false, RecurrenceEnd::Infinite) => RecurrenceEnd::Until(self.date),
                };
            }
            EntryChange::Until { day, month, year } => {
                if !self.is_recurring() {
                    return Err(EditRejection::NotRecurring);
                }
                let until = validated(day, month, year)?;
                if until < self.date {
                    return Err(EditRejection::UntilBeforeDate {
                        until,
                        date: self.date,
                    });
                }
                next.duration = RecurrenceEnd::Until(until);
            }
        }
        Ok(next)
    }
}

/// Rounds half away from zero to [`MONEY_SCALE`] digits.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

fn validated(day: u32, month: u32, year: i32) -> std::result::Result<CalendarDate, EditRejection> {
    CalendarDate::new(day, month, year).map_err(|_| EditRejection::InvalidDate { day, month, year })
}

/// A single field replacement requested by the entry editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryChange {
    Amount(Decimal),
    /// Selecting a new type resets the subtype to the first one.
    Type(usize),
    Subtype(usize),
    Name(String),
    Location(String),
    Date { day: u32, month: u32, year: i32 },
    Repeat(Interval),
    Infinite(bool),
    Until { day: u32, month: u32, year: i32 },
}

/// Why a field edit was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditRejection {
    #[error("{day:02}.{month:02}.{year} is not a valid date")]
    InvalidDate { day: u32, month: u32, year: i32 },
    #[error("end date {until} lies before the entry date {date}")]
    UntilBeforeDate {
        until: CalendarDate,
        date: CalendarDate,
    },
    #[error("category {type_index}/{subtype_index} does not exist")]
    UnknownCategory {
        type_index: usize,
        subtype_index: usize,
    },
    #[error("entry does not repeat")]
    NotRecurring,
}
