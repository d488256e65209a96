//! Stable single-key ordering for entry and bucket lists.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{bucket::Bucket, transaction::TransactionEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Header marker used by table renderers.
    pub fn marker(self) -> &'static str {
        match self {
            SortDirection::Ascending => "[^]",
            SortDirection::Descending => "[v]",
        }
    }
}

/// A field of `T` that a list can be ordered by.
pub trait SortKey<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntrySortKey {
    Amount,
    Type,
    Subtype,
    Name,
    Location,
    Date,
    Repeat,
    Infinite,
    Until,
}

impl EntrySortKey {
    pub const ALL: [EntrySortKey; 9] = [
        EntrySortKey::Amount,
        EntrySortKey::Type,
        EntrySortKey::Subtype,
        EntrySortKey::Name,
        EntrySortKey::Location,
        EntrySortKey::Date,
        EntrySortKey::Repeat,
        EntrySortKey::Infinite,
        EntrySortKey::Until,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EntrySortKey::Amount => "Money",
            EntrySortKey::Type => "Type",
            EntrySortKey::Subtype => "Subtype",
            EntrySortKey::Name => "Name",
            EntrySortKey::Location => "Location",
            EntrySortKey::Date => "Date",
            EntrySortKey::Repeat => "Repeat",
            EntrySortKey::Infinite => "Duration",
            EntrySortKey::Until => "Until",
        }
    }

    /// Matches either the column label or the key name, ignoring case.
    pub fn from_label(label: &str) -> Option<EntrySortKey> {
        let label = label.trim();
        Self::ALL.into_iter().find(|key| {
            key.label().eq_ignore_ascii_case(label)
                || format!("{key:?}").eq_ignore_ascii_case(label)
        })
    }
}

impl SortKey<TransactionEntry> for EntrySortKey {
    fn compare(&self, a: &TransactionEntry, b: &TransactionEntry) -> Ordering {
        match self {
            EntrySortKey::Amount => a.amount().cmp(&b.amount()),
            EntrySortKey::Type => a.type_index().cmp(&b.type_index()),
            EntrySortKey::Subtype => a.subtype_index().cmp(&b.subtype_index()),
            EntrySortKey::Name => a.name().cmp(b.name()),
            EntrySortKey::Location => a.location().cmp(b.location()),
            EntrySortKey::Date => a.date().cmp(&b.date()),
            EntrySortKey::Repeat => a.repeat().cmp(&b.repeat()),
            EntrySortKey::Infinite => recurs_forever(a).cmp(&recurs_forever(b)),
            EntrySortKey::Until => a.effective_until().cmp(&b.effective_until()),
        }
    }
}

/// Duration and Until order by what their columns show, so a one-off entry
/// that still carries a stored bound sorts as blank.
fn recurs_forever(entry: &TransactionEntry) -> bool {
    entry.is_recurring() && entry.effective_until().is_none()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BucketSortKey {
    Balance,
    Count,
    Start,
    End,
}

impl BucketSortKey {
    pub const ALL: [BucketSortKey; 4] = [
        BucketSortKey::Balance,
        BucketSortKey::Count,
        BucketSortKey::Start,
        BucketSortKey::End,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BucketSortKey::Balance => "Balance",
            BucketSortKey::Count => "Entries",
            BucketSortKey::Start => "Start",
            BucketSortKey::End => "End",
        }
    }

    /// Matches either the column label or the key name, ignoring case.
    pub fn from_label(label: &str) -> Option<BucketSortKey> {
        let label = label.trim();
        Self::ALL.into_iter().find(|key| {
            key.label().eq_ignore_ascii_case(label)
                || format!("{key:?}").eq_ignore_ascii_case(label)
        })
    }
}

impl SortKey<Bucket> for BucketSortKey {
    fn compare(&self, a: &Bucket, b: &Bucket) -> Ordering {
        match self {
            BucketSortKey::Balance => a.balance().cmp(&b.balance()),
            BucketSortKey::Count => a.count().cmp(&b.count()),
            BucketSortKey::Start => a.start().cmp(&b.start()),
            BucketSortKey::End => a.end().cmp(&b.end()),
        }
    }
}

/// Stable sort; equal keys keep their relative order in both directions.
pub fn sort_by_key_direction<T, K: SortKey<T>>(items: &mut [T], key: &K, direction: SortDirection) {
    items.sort_by(|a, b| match direction {
        SortDirection::Ascending => key.compare(a, b),
        SortDirection::Descending => key.compare(b, a),
    });
}
