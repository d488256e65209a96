//! Builds the display projection of a transaction store.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::currency::MoneyFormat;
use crate::errors::Result;
use crate::ledger::{
    aggregate, expand_all, sort_by_key_direction, Bucket, BucketSortKey, CalendarDate,
    CategoryTable, EmptyBuckets, EntrySortKey, Interval, SortDirection, TransactionEntry,
    TransactionStore,
};

use super::ServiceResult;

pub const DISPLAY_LIMIT_MAX: usize = 500;
pub const DISPLAY_LIMIT_DEFAULT: usize = 100;

/// What the caller wants to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRequest {
    pub interval: Interval,
    pub entry_sort: EntrySortKey,
    pub entry_direction: SortDirection,
    pub bucket_sort: BucketSortKey,
    pub bucket_direction: SortDirection,
    pub empty_buckets: EmptyBuckets,
    pub display_limit: usize,
    /// Last day shown; later occurrences are dropped before aggregation.
    #[serde(default)]
    pub until: Option<CalendarDate>,
}

impl Default for ViewRequest {
    fn default() -> Self {
        Self {
            interval: Interval::Never,
            entry_sort: EntrySortKey::Date,
            entry_direction: SortDirection::Descending,
            bucket_sort: BucketSortKey::Start,
            bucket_direction: SortDirection::Descending,
            empty_buckets: EmptyBuckets::Show,
            display_limit: DISPLAY_LIMIT_DEFAULT,
            until: None,
        }
    }
}

impl ViewRequest {
    pub fn limit(&self) -> usize {
        self.display_limit.min(DISPLAY_LIMIT_MAX)
    }
}

/// One formatted transaction line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRow {
    pub money: String,
    pub type_name: String,
    pub subtype_name: String,
    pub name: String,
    pub location: String,
    pub date: String,
    pub repeat: String,
    pub duration: String,
    pub until: String,
}

/// One formatted bucket line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketRow {
    pub start: String,
    pub end: String,
    pub balance: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum View {
    Entries(Vec<EntryRow>),
    Buckets(Vec<BucketRow>),
}

impl View {
    pub fn len(&self) -> usize {
        match self {
            View::Entries(rows) => rows.len(),
            View::Buckets(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Expanded entries, sorted ascending by date.
    pub fn expanded_entries(store: &TransactionStore) -> Vec<TransactionEntry> {
        expand_all(&store.entries())
    }

    /// Buckets of `interval` over every expanded entry, in date order.
    pub fn buckets(
        store: &TransactionStore,
        interval: Interval,
        empty_buckets: EmptyBuckets,
    ) -> ServiceResult<Vec<Bucket>> {
        let expanded = Self::expanded_entries(store);
        Ok(aggregate(&expanded, interval, store.categories(), empty_buckets)?)
    }

    /// Expands, aggregates (unless the interval is `Never`), sorts and truncates.
    pub fn view(
        store: &TransactionStore,
        request: &ViewRequest,
        money: &MoneyFormat,
    ) -> ServiceResult<View> {
        let mut expanded = Self::expanded_entries(store);
        if let Some(until) = request.until {
            expanded.retain(|entry| entry.date() <= until);
        }
        let view = if request.interval.is_never() {
            sort_by_key_direction(&mut expanded, &request.entry_sort, request.entry_direction);
            let rows = expanded
                .iter()
                .take(request.limit())
                .map(|entry| entry_row(entry, store.categories(), money))
                .collect::<Result<Vec<_>>>()?;
            View::Entries(rows)
        } else {
            let mut buckets = aggregate(
                &expanded,
                request.interval,
                store.categories(),
                request.empty_buckets,
            )?;
            sort_by_key_direction(&mut buckets, &request.bucket_sort, request.bucket_direction);
            let rows = buckets
                .iter()
                .take(request.limit())
                .map(|bucket| bucket_row(bucket, money))
                .collect();
            View::Buckets(rows)
        };
        debug!(interval = %request.interval, rows = view.len(), "view built");
        Ok(view)
    }
}

fn entry_row(
    entry: &TransactionEntry,
    categories: &CategoryTable,
    money: &MoneyFormat,
) -> Result<EntryRow> {
    let (duration, until) = if entry.is_recurring() {
        match entry.effective_until() {
            Some(until) => ("Limited".to_string(), until.to_text()),
            None => ("Infinite".to_string(), String::new()),
        }
    } else {
        (String::new(), String::new())
    };
    Ok(EntryRow {
        money: money.format(entry.amount()),
        type_name: categories.type_name(entry.type_index())?.to_string(),
        subtype_name: categories
            .subtype_name(entry.type_index(), entry.subtype_index())?
            .to_string(),
        name: entry.name().to_string(),
        location: entry.location().to_string(),
        date: entry.date().to_text(),
        repeat: entry.repeat().label().to_string(),
        duration,
        until,
    })
}

fn bucket_row(bucket: &Bucket, money: &MoneyFormat) -> BucketRow {
    BucketRow {
        start: bucket.start().to_text(),
        end: bucket.end().to_text(),
        balance: money.format(bucket.balance()),
        count: bucket.count(),
    }
}
