use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{category::CategoryTable, date::CalendarDate, transaction::TransactionEntry};

/// Session-local handle for a stored entry. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// In-memory transaction collection in insertion order, plus the category
/// table the entries index into.
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    entries: Vec<(EntryId, TransactionEntry)>,
    categories: CategoryTable,
}

impl TransactionStore {
    pub fn new(categories: CategoryTable) -> Self {
        Self {
            entries: Vec::new(),
            categories,
        }
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    pub fn add(&mut self, entry: TransactionEntry) -> EntryId {
        let id = EntryId::new();
        self.entries.push((id, entry));
        id
    }

    pub fn get(&self, id: EntryId) -> Option<&TransactionEntry> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, entry)| entry)
    }

    /// Swaps in `entry` at the same position and returns the superseded value.
    pub fn replace(&mut self, id: EntryId, entry: TransactionEntry) -> Option<TransactionEntry> {
        let slot = self
            .entries
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)?;
        Some(std::mem::replace(&mut slot.1, entry))
    }

    pub fn remove(&mut self, id: EntryId) -> Option<TransactionEntry> {
        let index = self.entries.iter().position(|(entry_id, _)| *entry_id == id)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &TransactionEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    /// Snapshot of the entries in insertion order.
    pub fn entries(&self) -> Vec<TransactionEntry> {
        self.entries.iter().map(|(_, entry)| entry.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Date of the latest entry, the default recurrence horizon.
    pub fn latest_date(&self) -> Option<CalendarDate> {
        self.entries.iter().map(|(_, entry)| entry.date()).max()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn entry(day: u32) -> TransactionEntry {
        TransactionEntry::new(Decimal::ONE, 0, 0, CalendarDate::new(day, 1, 2024).unwrap())
    }

    #[test]
    fn replace_keeps_position() {
        let mut store = TransactionStore::default();
        let first = store.add(entry(1));
        let second = store.add(entry(2));
        let previous = store.replace(first, entry(9)).unwrap();
        assert_eq!(previous.date().day(), 1);
        let order: Vec<_> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![first, second]);
        assert_eq!(store.latest_date().unwrap().day(), 9);
    }

    #[test]
    fn remove_unknown_id_is_none() {
        let mut store = TransactionStore::default();
        let id = store.add(entry(1));
        assert!(store.remove(id).is_some());
        assert!(store.remove(id).is_none());
        assert!(store.is_empty());
        assert_eq!(store.latest_date(), None);
    }
}
