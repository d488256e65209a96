mod common;

use budget_recorder::{
    core::services::{ServiceError, SummaryService, TransactionService, View, ViewRequest},
    currency::MoneyFormat,
    ledger::{
        aggregate, expand, expand_all, is_repeated_into_range, BucketSortKey, CategoryTable,
        EmptyBuckets, EntryChange, EntrySortKey, Interval, RecurrenceEnd, SortDirection,
        TransactionEntry, TransactionStore,
    },
};
use common::{date, sample_store};
use rust_decimal::Decimal;

#[test]
fn weekly_expansion_respects_horizon_and_until() {
    let weekly = TransactionEntry::new(Decimal::ONE, 0, 0, date(1, 1, 2024))
        .with_recurrence(Interval::Weekly, RecurrenceEnd::Infinite);
    let dates: Vec<_> = expand(&weekly, date(31, 1, 2024))
        .iter()
        .map(|entry| entry.date())
        .collect();
    assert_eq!(
        dates,
        vec![date(8, 1, 2024), date(15, 1, 2024), date(22, 1, 2024), date(29, 1, 2024)]
    );

    let bounded = weekly.with_recurrence(Interval::Weekly, RecurrenceEnd::Until(date(20, 1, 2024)));
    assert_eq!(expand(&bounded, date(31, 1, 2024)).len(), 2);
    assert!(is_repeated_into_range(&bounded, date(10, 1, 2024), date(16, 1, 2024)));
    assert!(!is_repeated_into_range(&bounded, date(16, 1, 2024), date(31, 1, 2024)));
}

#[test]
fn buckets_tile_the_whole_range() {
    let entries = expand_all(&sample_store().entries());
    let categories = CategoryTable::default();
    for interval in [Interval::Daily, Interval::Weekly, Interval::Monthly, Interval::Yearly] {
        let buckets = aggregate(&entries, interval, &categories, EmptyBuckets::Show).unwrap();
        let first = buckets.first().unwrap();
        let last = buckets.last().unwrap();
        assert!(first.contains(entries[0].date()), "{interval}");
        assert!(last.contains(entries[entries.len() - 1].date()), "{interval}");
        for pair in buckets.windows(2) {
            assert_eq!(pair[0].end().next_day(), pair[1].start(), "{interval}");
        }
        let total: usize = buckets.iter().map(|bucket| bucket.count()).sum();
        assert_eq!(total, entries.len(), "{interval}");
    }
}

#[test]
fn monthly_balances_combine_income_and_expenses() {
    let buckets = SummaryService::buckets(&sample_store(), Interval::Monthly, EmptyBuckets::Show)
        .unwrap();
    let balances: Vec<_> = buckets.iter().map(|bucket| bucket.balance()).collect();
    // January: salary minus three weekly rent shares (01, 08, 15).
    assert_eq!(
        balances,
        vec![
            Decimal::new(240000, 2),
            Decimal::new(300000, 2),
            Decimal::new(295450, 2),
        ]
    );
    assert_eq!(buckets[0].count(), 4);
}

#[test]
fn suppressing_empty_buckets_keeps_every_entry() {
    let mut store = TransactionStore::default();
    store.add(TransactionEntry::new(Decimal::TEN, 9, 0, date(3, 1, 2024)));
    store.add(TransactionEntry::new(Decimal::TEN, 9, 0, date(28, 1, 2024)));

    let shown = SummaryService::buckets(&store, Interval::Weekly, EmptyBuckets::Show).unwrap();
    let hidden = SummaryService::buckets(&store, Interval::Weekly, EmptyBuckets::Suppress).unwrap();
    assert_eq!(shown.len(), 4);
    assert_eq!(hidden.len(), 2);
    assert!(hidden.iter().all(|bucket| !bucket.is_empty()));
}

#[test]
fn view_honours_sort_and_limit() {
    let request = ViewRequest {
        entry_sort: EntrySortKey::Amount,
        entry_direction: SortDirection::Ascending,
        display_limit: 3,
        ..ViewRequest::default()
    };
    let view = SummaryService::view(&sample_store(), &request, &MoneyFormat::default()).unwrap();
    let View::Entries(rows) = view else {
        panic!("Never interval yields entry rows");
    };
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].money, "45.50 €");
    assert!(rows.iter().skip(1).all(|row| row.money == "200.00 €"));

    let request = ViewRequest {
        interval: Interval::Yearly,
        bucket_sort: BucketSortKey::Balance,
        ..ViewRequest::default()
    };
    let view = SummaryService::view(&sample_store(), &request, &MoneyFormat::with_symbol("EUR"))
        .unwrap();
    let View::Buckets(rows) = view else {
        panic!("Yearly interval yields bucket rows");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].start, "01.01.2024");
    assert_eq!(rows[0].end, "31.12.2024");
    assert_eq!(rows[0].balance, "8354.50 EUR");
}

#[test]
fn edits_flow_into_the_next_view() {
    let mut store = sample_store();
    let (salary, _) = store.iter().next().unwrap();
    TransactionService::edit(
        &mut store,
        salary,
        EntryChange::Until {
            day: 31,
            month: 1,
            year: 2024,
        },
    )
    .unwrap();

    let buckets = SummaryService::buckets(&store, Interval::Monthly, EmptyBuckets::Show).unwrap();
    assert_eq!(buckets.len(), 3);
    assert!(buckets[1].is_empty());

    let err = TransactionService::edit(
        &mut store,
        salary,
        EntryChange::Until {
            day: 1,
            month: 12,
            year: 2023,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ServiceError::Rejected(_)));
    assert_eq!(
        store.get(salary).unwrap().duration(),
        RecurrenceEnd::Until(date(31, 1, 2024))
    );
}
