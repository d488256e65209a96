use tracing::debug;

use super::{date::CalendarDate, time_interval::Interval, transaction::TransactionEntry};

/// Occurrence dates of `entry` after its own date, up to `limit_end` and its
/// `until` bound. The entry's own date is never yielded.
struct Occurrences {
    repeat: Interval,
    current: CalendarDate,
    end: CalendarDate,
}

impl Occurrences {
    fn new(entry: &TransactionEntry, limit_end: CalendarDate) -> Option<Self> {
        if !entry.is_recurring() || limit_end < entry.date() {
            return None;
        }
        let end = match entry.effective_until() {
            Some(until) => until.min(limit_end),
            None => limit_end,
        };
        Some(Self {
            repeat: entry.repeat(),
            current: entry.date(),
            end,
        })
    }
}

impl Iterator for Occurrences {
    type Item = CalendarDate;

    fn next(&mut self) -> Option<CalendarDate> {
        let next = self.repeat.checked_next_occurrence(self.current)?;
        if next > self.end {
            return None;
        }
        self.current = next;
        Some(next)
    }
}

/// Concrete occurrences of a recurring entry up to `horizon_end`, each as a
/// non-recurring copy. Returns nothing for single entries or a horizon that
/// lies before the entry date.
pub fn expand(entry: &TransactionEntry, horizon_end: CalendarDate) -> Vec<TransactionEntry> {
    Occurrences::new(entry, horizon_end)
        .into_iter()
        .flatten()
        .map(|date| entry.occurrence_on(date))
        .collect()
}

/// True as soon as one generated occurrence lands inside `[start, end]`.
pub fn is_repeated_into_range(
    entry: &TransactionEntry,
    start: CalendarDate,
    end: CalendarDate,
) -> bool {
    Occurrences::new(entry, end)
        .into_iter()
        .flatten()
        .any(|date| date >= start)
}

/// Originals plus every occurrence up to the latest entry date, sorted
/// ascending by date. Entries on the same date keep their input order, with
/// generated occurrences after the originals.
pub fn expand_all(entries: &[TransactionEntry]) -> Vec<TransactionEntry> {
    let Some(horizon) = entries.iter().map(TransactionEntry::date).max() else {
        return Vec::new();
    };
    let mut expanded = entries.to_vec();
    for entry in entries.iter().filter(|entry| entry.is_recurring()) {
        expanded.extend(expand(entry, horizon));
    }
    debug!(
        originals = entries.len(),
        generated = expanded.len() - entries.len(),
        horizon = %horizon,
        "expanded recurring entries"
    );
    expanded.sort_by_key(TransactionEntry::date);
    expanded
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::ledger::RecurrenceEnd;

    fn date(day: u32, month: u32, year: i32) -> CalendarDate {
        CalendarDate::new(day, month, year).unwrap()
    }

    fn weekly(end: RecurrenceEnd) -> TransactionEntry {
        TransactionEntry::new(Decimal::new(2000, 2), 0, 0, date(1, 1, 2024))
            .with_name("Market")
            .with_recurrence(Interval::Weekly, end)
    }

    fn dates(entries: &[TransactionEntry]) -> Vec<CalendarDate> {
        entries.iter().map(TransactionEntry::date).collect()
    }

    #[test]
    fn weekly_expansion_stops_at_horizon() {
        let occurrences = expand(&weekly(RecurrenceEnd::Infinite), date(31, 1, 2024));
        assert_eq!(
            dates(&occurrences),
            vec![date(8, 1, 2024), date(15, 1, 2024), date(22, 1, 2024), date(29, 1, 2024)]
        );
        assert!(occurrences.iter().all(|entry| !entry.is_recurring()));
    }

    #[test]
    fn weekly_expansion_respects_until() {
        let occurrences = expand(
            &weekly(RecurrenceEnd::Until(date(20, 1, 2024))),
            date(31, 1, 2024),
        );
        assert_eq!(dates(&occurrences), vec![date(8, 1, 2024), date(15, 1, 2024)]);
    }

    #[test]
    fn single_entries_and_past_horizons_expand_to_nothing() {
        let single = TransactionEntry::new(Decimal::ONE, 0, 0, date(1, 1, 2024));
        assert!(expand(&single, date(31, 12, 2024)).is_empty());
        assert!(expand(&weekly(RecurrenceEnd::Infinite), date(31, 12, 2023)).is_empty());
        assert!(expand(&weekly(RecurrenceEnd::Infinite), date(1, 1, 2024)).is_empty());
    }

    #[test]
    fn until_on_the_entry_date_yields_nothing() {
        let entry = weekly(RecurrenceEnd::Until(date(1, 1, 2024)));
        assert!(expand(&entry, date(31, 1, 2024)).is_empty());
    }

    #[test]
    fn range_query_matches_without_materialising() {
        let entry = weekly(RecurrenceEnd::Until(date(20, 1, 2024)));
        assert!(is_repeated_into_range(&entry, date(14, 1, 2024), date(16, 1, 2024)));
        assert!(!is_repeated_into_range(&entry, date(16, 1, 2024), date(21, 1, 2024)));
        assert!(!is_repeated_into_range(&entry, date(22, 1, 2024), date(31, 1, 2024)));
        // The original date itself is not a generated occurrence.
        assert!(!is_repeated_into_range(&entry, date(1, 1, 2024), date(7, 1, 2024)));
    }

    #[test]
    fn expand_all_uses_latest_entry_as_horizon() {
        let salary = TransactionEntry::new(Decimal::new(300000, 2), 9, 0, date(31, 1, 2024))
            .with_recurrence(Interval::Monthly, RecurrenceEnd::Infinite);
        let last = TransactionEntry::new(Decimal::new(999, 2), 0, 0, date(15, 4, 2024));
        let expanded = expand_all(&[salary, last]);
        assert_eq!(
            dates(&expanded),
            vec![date(31, 1, 2024), date(29, 2, 2024), date(29, 3, 2024), date(15, 4, 2024)]
        );
    }

    #[test]
    fn expand_all_of_nothing_is_empty() {
        assert!(expand_all(&[]).is_empty());
    }
}
