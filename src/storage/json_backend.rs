use chrono::Local;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

use crate::{
    errors::{RecorderError, Result},
    ledger::{CalendarDate, CategoryTable, Interval, RecurrenceEnd, TransactionEntry, TransactionStore},
    utils::persistence::{copy_existing, write_atomic},
};

use super::StorageBackend;

pub const DOCUMENT_TYPE: &str = "database";
pub const VERSION_MAJOR: u32 = 1;
pub const VERSION_MINOR: u32 = 0;
pub const VERSION_PATCH: u32 = 0;

const BACKUP_DATE_FORMAT: &str = "%Y-%m-%d";

/// Just enough of a document to decide whether the rest can be read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentHeader {
    json_type: String,
    #[serde(default)]
    version_major: u32,
    #[serde(default)]
    version_minor: u32,
    #[serde(default)]
    version_patch: u32,
}

/// On-disk shape of a database file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseDocument {
    pub json_type: String,
    pub version_major: u32,
    pub version_minor: u32,
    pub version_patch: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<CategoryTable>,
    #[serde(default)]
    pub data_entries: Vec<PersistedEntry>,
}

/// One stored transaction. `duration` only appears for recurring entries and
/// `until` only when that recurrence is bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedEntry {
    pub money: Decimal,
    #[serde(rename = "type")]
    pub type_index: usize,
    #[serde(rename = "subtype")]
    pub subtype_index: usize,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub date: CalendarDate,
    #[serde(default)]
    pub repeat: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<CalendarDate>,
}

impl From<&TransactionEntry> for PersistedEntry {
    fn from(entry: &TransactionEntry) -> Self {
        let (duration, until) = if entry.is_recurring() {
            match entry.duration() {
                RecurrenceEnd::Infinite => (Some(true), None),
                RecurrenceEnd::Until(until) => (Some(false), Some(until)),
            }
        } else {
            (None, None)
        };
        Self {
            money: entry.amount(),
            type_index: entry.type_index(),
            subtype_index: entry.subtype_index(),
            name: entry.name().to_string(),
            location: entry.location().to_string(),
            date: entry.date(),
            repeat: entry.repeat().index(),
            duration,
            until,
        }
    }
}

impl PersistedEntry {
    pub fn into_entry(self) -> Result<TransactionEntry> {
        let repeat = Interval::from_index(self.repeat)?;
        let duration = if repeat.is_never() {
            RecurrenceEnd::Infinite
        } else {
            match (self.duration, self.until) {
                (Some(true), _) | (None, None) => RecurrenceEnd::Infinite,
                (Some(false) | None, Some(until)) => RecurrenceEnd::Until(until),
                (Some(false), None) => {
                    return Err(RecorderError::MalformedRecord(format!(
                        "entry dated {} is bounded but has no until date",
                        self.date
                    )))
                }
            }
        };
        Ok(
            TransactionEntry::new(self.money, self.type_index, self.subtype_index, self.date)
                .with_name(self.name)
                .with_location(self.location)
                .with_recurrence(repeat, duration),
        )
    }
}

impl DatabaseDocument {
    pub fn from_store(store: &TransactionStore) -> Self {
        Self {
            json_type: DOCUMENT_TYPE.into(),
            version_major: VERSION_MAJOR,
            version_minor: VERSION_MINOR,
            version_patch: VERSION_PATCH,
            categories: Some(store.categories().clone()),
            data_entries: store.iter().map(|(_, entry)| entry.into()).collect(),
        }
    }

    /// Rebuilds a store, failing on the first entry whose category does not exist.
    pub fn into_store(self) -> Result<TransactionStore> {
        let categories = self.categories.unwrap_or_default();
        let mut store = TransactionStore::new(categories);
        for record in self.data_entries {
            let entry = record.into_entry()?;
            store
                .categories()
                .subtype_name(entry.type_index(), entry.subtype_index())?;
            store.add(entry);
        }
        Ok(store)
    }
}

/// Reads and validates a database document from its JSON text.
pub fn parse_document(data: &str) -> Result<DatabaseDocument> {
    let header: DocumentHeader = serde_json::from_str(data)?;
    if header.json_type != DOCUMENT_TYPE {
        return Err(RecorderError::UnknownDocument(header.json_type));
    }
    if header.version_major != VERSION_MAJOR {
        return Err(RecorderError::IncompatibleVersion {
            found: header.version_major,
            expected: VERSION_MAJOR,
        });
    }
    if header.version_minor != VERSION_MINOR {
        warn!(
            found = header.version_minor,
            expected = VERSION_MINOR,
            "database minor version differs"
        );
    }
    if header.version_patch != VERSION_PATCH {
        warn!(
            found = header.version_patch,
            expected = VERSION_PATCH,
            "database patch version differs"
        );
    }
    Ok(serde_json::from_str(data)?)
}

/// JSON file backend with one dated backup copy per save day.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    database_path: PathBuf,
    backup_dir: Option<PathBuf>,
}

impl JsonStorage {
    pub fn new(database_path: impl Into<PathBuf>, backup_dir: Option<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            backup_dir,
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Where the current file is copied before the next save overwrites it.
    pub fn backup_path(&self) -> Option<PathBuf> {
        let dir = self.backup_dir.as_ref()?;
        let stem = self
            .database_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("database");
        let stamp = Local::now().format(BACKUP_DATE_FORMAT);
        Some(dir.join(format!("{}_{}.json", stem, stamp)))
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<TransactionStore> {
        let data = fs::read_to_string(&self.database_path)?;
        let store = parse_document(&data)?.into_store()?;
        info!(
            path = %self.database_path.display(),
            entries = store.len(),
            "database loaded"
        );
        Ok(store)
    }

    fn save(&self, store: &TransactionStore) -> Result<()> {
        if let Some(backup) = self.backup_path() {
            if copy_existing(&self.database_path, &backup)? {
                info!(backup = %backup.display(), "database backed up");
            }
        }
        let json = serde_json::to_string_pretty(&DatabaseDocument::from_store(store))?;
        write_atomic(&self.database_path, &json)?;
        info!(
            path = %self.database_path.display(),
            entries = store.len(),
            "database saved"
        );
        Ok(())
    }
}
