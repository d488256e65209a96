//! Business logic helpers for managing transaction entries.

use tracing::{debug, warn};

use crate::core::services::{ServiceError, ServiceResult};
use crate::ledger::{EntryChange, EntryId, TransactionEntry, TransactionStore};

/// Provides validated add / edit / remove helpers for stored entries.
pub struct TransactionService;

impl TransactionService {
    /// Adds a new entry after checking its category indices against the store's table.
    pub fn add(store: &mut TransactionStore, entry: TransactionEntry) -> ServiceResult<EntryId> {
        store
            .categories()
            .subtype_name(entry.type_index(), entry.subtype_index())?;
        let id = store.add(entry);
        debug!(%id, "entry added");
        Ok(id)
    }

    /// Applies `change` to the entry identified by `id`. A rejected change leaves
    /// the stored entry untouched.
    pub fn edit(
        store: &mut TransactionStore,
        id: EntryId,
        change: EntryChange,
    ) -> ServiceResult<&TransactionEntry> {
        let current = store.get(id).ok_or(ServiceError::NotFound(id))?;
        let updated = current.apply(change, store.categories()).map_err(|rejection| {
            warn!(%id, %rejection, "edit rejected");
            rejection
        })?;
        store.replace(id, updated);
        store.get(id).ok_or(ServiceError::NotFound(id))
    }

    /// Removes the entry identified by `id`, returning the removed instance.
    pub fn remove(store: &mut TransactionStore, id: EntryId) -> ServiceResult<TransactionEntry> {
        store.remove(id).ok_or(ServiceError::NotFound(id))
    }
}
