use thiserror::Error;

/// Error type that captures recorder failures.
#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("Invalid date: {day:02}.{month:02}.{year} is not a calendar day")]
    InvalidDate { day: u32, month: u32, year: i32 },
    #[error("Invalid category index: type {type_index}, subtype {subtype_index:?}")]
    InvalidCategoryIndex {
        type_index: usize,
        subtype_index: Option<usize>,
    },
    #[error("Invalid interval index: {0}")]
    InvalidInterval(usize),
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    #[error("Incompatible database version {found} (expected major {expected})")]
    IncompatibleVersion { found: u32, expected: u32 },
    #[error("Unknown document type: {0}")]
    UnknownDocument(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RecorderError>;

impl RecorderError {
    /// Data-integrity faults abort the current load or view instead of being
    /// corrected in place.
    pub fn is_integrity_fault(&self) -> bool {
        matches!(
            self,
            RecorderError::InvalidCategoryIndex { .. }
                | RecorderError::InvalidInterval(_)
                | RecorderError::MalformedRecord(_)
                | RecorderError::IncompatibleVersion { .. }
                | RecorderError::UnknownDocument(_)
        )
    }
}
