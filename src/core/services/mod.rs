pub mod summary_service;
pub mod transaction_service;

pub use summary_service::{BucketRow, EntryRow, SummaryService, View, ViewRequest};
pub use transaction_service::TransactionService;

use crate::errors::RecorderError;
use crate::ledger::{EditRejection, EntryId};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Recorder(#[from] RecorderError),
    #[error("Edit rejected: {0}")]
    Rejected(#[from] EditRejection),
    #[error("Entry not found: {0}")]
    NotFound(EntryId),
}
