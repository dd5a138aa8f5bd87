//! Persistence boundary for the user table.
//!
//! The core never touches the filesystem directly: it talks to a [`Store`],
//! which loads and saves one whole JSON document (last write wins, no partial
//! updates). Two implementations are provided:
//!
//! - [`JsonFileStore`]: a single JSON file, by default under the user config
//!   directory (`<config>/webjump/symbols.json`).
//! - [`MemoryStore`]: an in-process document, for tests and embedders that
//!   manage persistence themselves.
//!
//! Corrupt, unreadable, or absent data is never fatal: loading the user table
//! falls back to a freshly mirrored table (see [`crate::user_defaults`]) and
//! logs what happened.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;
use std::{fs, io};
use thiserror::Error;
use tracing::warn;

use crate::symbols::{Group, GroupKind, SymbolTable, user_defaults};

/// Error type for store I/O. Callers inside the crate recover from these
/// (load errors degrade to a fresh table, save errors are logged); the type is
/// public so embedders with their own `Store` can surface real causes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One-document persistent store.
///
/// `load` returns `Ok(None)` both when nothing was ever saved and when the
/// stored bytes are not valid JSON; corrupt data is treated as absent.
pub trait Store {
    fn load(&self) -> Result<Option<Value>, StoreError>;
    fn save(&self, value: &Value) -> Result<(), StoreError>;
}

/// Whole-file JSON store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this store reads and writes.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("webjump"))
            .unwrap_or_else(|| PathBuf::from(".webjump"))
            .join("symbols.json")
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self { path: Self::default_path() }
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> Result<Option<Value>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)
            .map_err(|source| StoreError::Read { path: self.path.clone(), source })?;
        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "stored table is not valid JSON, treating as absent");
                Ok(None)
            }
        }
    }

    fn save(&self, value: &Value) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| StoreError::Write { path: self.path.clone(), source })?;
        }
        let text = serde_json::to_string_pretty(value).expect("JSON value serializes");
        fs::write(&self.path, text).map_err(|source| StoreError::Write { path: self.path.clone(), source })
    }
}

/// In-process store holding a single JSON document. Clones share the same
/// document, so a clone kept outside a [`crate::Context`] observes every save
/// made through it.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Rc<RefCell<Option<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the currently stored document, if any.
    pub fn snapshot(&self) -> Option<Value> {
        self.value.borrow().clone()
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Option<Value>, StoreError> {
        Ok(self.value.borrow().clone())
    }

    fn save(&self, value: &Value) -> Result<(), StoreError> {
        *self.value.borrow_mut() = Some(value.clone());
        Ok(())
    }
}

// --- Wire model --------------------------------------------------------------

// The runtime table carries command function pointers, which are code, not
// data. The persisted user table is templates-only, so the wire model only
// knows about name + engines.

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct StoredTable(BTreeMap<char, StoredGroup>);

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct StoredGroup {
    name: String,
    #[serde(default)]
    engines: BTreeMap<String, String>,
}

impl StoredTable {
    pub(crate) fn from_table(table: &SymbolTable) -> Self {
        let groups = table
            .iter()
            .filter_map(|(symbol, group)| match &group.kind {
                GroupKind::Templates(engines) => Some((
                    *symbol,
                    StoredGroup { name: group.name.clone(), engines: engines.clone() },
                )),
                GroupKind::Commands(_) => None,
            })
            .collect();
        Self(groups)
    }

    pub(crate) fn into_table(self) -> SymbolTable {
        self.0
            .into_iter()
            .map(|(symbol, stored)| {
                (symbol, Group { name: stored.name, kind: GroupKind::Templates(stored.engines) })
            })
            .collect()
    }
}

/// Load the user table through `store`, recovering to a fresh mirrored table
/// on absence, unreadable storage, or a document of the wrong shape.
pub(crate) fn load_user_symbols(store: &dyn Store) -> SymbolTable {
    let value = match store.load() {
        Ok(Some(value)) => value,
        Ok(None) => return user_defaults(),
        Err(err) => {
            warn!(error = %err, "could not load user table, starting fresh");
            return user_defaults();
        }
    };
    match serde_json::from_value::<StoredTable>(value) {
        Ok(stored) => stored.into_table(),
        Err(err) => {
            warn!(error = %err, "user table has unexpected shape, starting fresh");
            user_defaults()
        }
    }
}

/// Persist the user table through `store` as one whole document.
pub(crate) fn save_user_symbols(store: &dyn Store, table: &SymbolTable) {
    let value = serde_json::to_value(StoredTable::from_table(table)).expect("stored table serializes");
    if let Err(err) = store.save(&value) {
        warn!(error = %err, "could not persist user table");
    }
}
