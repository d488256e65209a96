use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    category::CategoryTable, date::CalendarDate, time_interval::Interval,
    transaction::TransactionEntry,
};
use crate::errors::Result;

/// A contiguous calendar period with its aggregated balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    start: CalendarDate,
    end: CalendarDate,
    balance: Decimal,
    count: usize,
}

impl Bucket {
    /// An empty bucket covering the period of `interval` that starts at `start`.
    fn open(start: CalendarDate, interval: Interval) -> Self {
        Self {
            start,
            end: interval.period_end(start),
            balance: Decimal::ZERO,
            count: 0,
        }
    }

    fn add(&mut self, contribution: Decimal) {
        self.balance += contribution;
        self.count += 1;
    }

    pub fn start(&self) -> CalendarDate {
        self.start
    }

    pub fn end(&self) -> CalendarDate {
        self.end
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        date.is_within(self.start, self.end)
    }
}

/// What happens to periods without any transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmptyBuckets {
    #[default]
    Show,
    /// Drop an empty bucket once the walk has moved past it.
    Suppress,
}

/// Folds date-sorted, already expanded entries into gap-free buckets of
/// `interval` granularity. Returns no buckets for an empty input or for
/// `Interval::Never`, where the flat entry list is the display unit.
pub fn aggregate(
    sorted_entries: &[TransactionEntry],
    interval: Interval,
    categories: &CategoryTable,
    empty_buckets: EmptyBuckets,
) -> Result<Vec<Bucket>> {
    let Some(first) = sorted_entries.first() else {
        return Ok(Vec::new());
    };
    if interval.is_never() {
        return Ok(Vec::new());
    }

    let mut buckets = Vec::new();
    let mut current = Bucket::open(interval.period_start(first.date()), interval);
    for entry in sorted_entries {
        debug_assert!(entry.date() >= current.start, "entries must be sorted by date");
        while entry.date() > current.end {
            let next_start = current.end.next_day();
            let closed = std::mem::replace(&mut current, Bucket::open(next_start, interval));
            if !(closed.is_empty() && empty_buckets == EmptyBuckets::Suppress) {
                buckets.push(closed);
            }
        }
        current.add(entry.signed_contribution(categories)?);
    }
    buckets.push(current);

    debug!(
        interval = %interval,
        entries = sorted_entries.len(),
        buckets = buckets.len(),
        "aggregated entries into buckets"
    );
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::recurring::expand_all;
    use crate::ledger::RecurrenceEnd;

    const INCOME: usize = 9;
    const FOOD: usize = 0;

    fn date(day: u32, month: u32, year: i32) -> CalendarDate {
        CalendarDate::new(day, month, year).unwrap()
    }

    fn entry(cents: i64, type_index: usize, on: CalendarDate) -> TransactionEntry {
        TransactionEntry::new(Decimal::new(cents, 2), type_index, 0, on)
    }

    #[test]
    fn monthly_bucket_sums_signed_contributions() {
        let entries = [
            entry(10000, INCOME, date(5, 1, 2024)),
            entry(3000, FOOD, date(12, 1, 2024)),
            entry(2000, FOOD, date(20, 1, 2024)),
        ];
        let buckets = aggregate(
            &entries,
            Interval::Monthly,
            &CategoryTable::default(),
            EmptyBuckets::Show,
        )
        .unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].start(), date(1, 1, 2024));
        assert_eq!(buckets[0].end(), date(31, 1, 2024));
        assert_eq!(buckets[0].balance(), Decimal::new(5000, 2));
        assert_eq!(buckets[0].count(), 3);
    }

    #[test]
    fn empty_months_are_filled_unless_suppressed() {
        let entries = [
            entry(100, INCOME, date(1, 1, 2024)),
            entry(100, INCOME, date(1, 3, 2024)),
        ];
        let categories = CategoryTable::default();

        let shown = aggregate(&entries, Interval::Monthly, &categories, EmptyBuckets::Show).unwrap();
        let starts: Vec<_> = shown.iter().map(Bucket::start).collect();
        assert_eq!(starts, vec![date(1, 1, 2024), date(1, 2, 2024), date(1, 3, 2024)]);
        assert_eq!(shown[1].count(), 0);
        assert_eq!(shown[1].balance(), Decimal::ZERO);
        assert_eq!(shown[1].end(), date(29, 2, 2024));

        let suppressed =
            aggregate(&entries, Interval::Monthly, &categories, EmptyBuckets::Suppress).unwrap();
        let starts: Vec<_> = suppressed.iter().map(Bucket::start).collect();
        assert_eq!(starts, vec![date(1, 1, 2024), date(1, 3, 2024)]);
    }

    #[test]
    fn suppression_never_drops_a_bucket_that_received_entries() {
        let entries = [
            entry(100, FOOD, date(1, 1, 2024)),
            entry(100, FOOD, date(31, 1, 2024)),
            entry(100, FOOD, date(30, 4, 2024)),
        ];
        let buckets = aggregate(
            &entries,
            Interval::Monthly,
            &CategoryTable::default(),
            EmptyBuckets::Suppress,
        )
        .unwrap();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].count(), 2);
        assert_eq!(buckets[1].start(), date(1, 4, 2024));
        assert_eq!(buckets.iter().map(Bucket::count).sum::<usize>(), 3);
    }

    #[test]
    fn weekly_buckets_are_monday_aligned_and_contiguous() {
        let entries = [
            entry(100, FOOD, date(3, 1, 2024)),
            entry(100, FOOD, date(24, 1, 2024)),
        ];
        let buckets = aggregate(
            &entries,
            Interval::Weekly,
            &CategoryTable::default(),
            EmptyBuckets::Show,
        )
        .unwrap();
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[0].start(), date(1, 1, 2024));
        for pair in buckets.windows(2) {
            assert_eq!(pair[0].end().next_day(), pair[1].start());
        }
        assert!(buckets[3].contains(date(24, 1, 2024)));
    }

    #[test]
    fn never_and_empty_inputs_produce_no_buckets() {
        let categories = CategoryTable::default();
        assert!(aggregate(&[], Interval::Monthly, &categories, EmptyBuckets::Show)
            .unwrap()
            .is_empty());
        let entries = [entry(100, FOOD, date(1, 1, 2024))];
        assert!(aggregate(&entries, Interval::Never, &categories, EmptyBuckets::Show)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn unknown_category_aborts_aggregation() {
        let entries = [entry(100, 99, date(1, 1, 2024))];
        let err = aggregate(
            &entries,
            Interval::Yearly,
            &CategoryTable::default(),
            EmptyBuckets::Show,
        )
        .unwrap_err();
        assert!(err.is_integrity_fault());
    }

    #[test]
    fn reaggregating_flattened_buckets_is_idempotent() {
        let categories = CategoryTable::default();
        let rent = entry(80000, 4, date(3, 1, 2024))
            .with_recurrence(Interval::Monthly, RecurrenceEnd::Infinite);
        let raw = vec![
            rent,
            entry(250000, INCOME, date(28, 1, 2024)),
            entry(1999, FOOD, date(17, 5, 2024)),
        ];
        let expanded = expand_all(&raw);
        let first = aggregate(&expanded, Interval::Monthly, &categories, EmptyBuckets::Show).unwrap();

        // Each bucket becomes `count` income entries on its start date, the first
        // carrying the whole balance.
        let flattened: Vec<_> = first
            .iter()
            .flat_map(|bucket| {
                (0..bucket.count()).map(move |index| {
                    let amount = if index == 0 { bucket.balance() } else { Decimal::ZERO };
                    TransactionEntry::new(amount, INCOME, 0, bucket.start())
                })
            })
            .collect();
        let second =
            aggregate(&flattened, Interval::Monthly, &categories, EmptyBuckets::Show).unwrap();
        assert_eq!(first, second);
    }
}
