pub mod json_backend;

use crate::{errors::Result, ledger::TransactionStore};

/// Abstraction over persistence backends capable of storing a transaction store.
pub trait StorageBackend {
    fn load(&self) -> Result<TransactionStore>;
    fn save(&self, store: &TransactionStore) -> Result<()>;
}

pub use json_backend::{
    DatabaseDocument, JsonStorage, PersistedEntry, DOCUMENT_TYPE, VERSION_MAJOR, VERSION_MINOR,
    VERSION_PATCH,
};
