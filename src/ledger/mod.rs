//! Transaction models and the recurrence / bucketing engine.

pub mod bucket;
pub mod category;
pub mod date;
pub mod recurring;
pub mod sorting;
pub mod store;
pub mod time_interval;
pub mod transaction;

pub use bucket::{aggregate, Bucket, EmptyBuckets};
pub use category::{CategoryKind, CategoryTable, CategoryType};
pub use date::CalendarDate;
pub use recurring::{expand, expand_all, is_repeated_into_range};
pub use sorting::{sort_by_key_direction, BucketSortKey, EntrySortKey, SortDirection, SortKey};
pub use store::{EntryId, TransactionStore};
pub use time_interval::Interval;
pub use transaction::{EditRejection, EntryChange, RecurrenceEnd, TransactionEntry};
