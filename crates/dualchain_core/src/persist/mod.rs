//! Persistence contracts and adapter selection.
//!
//! # Responsibility
//! - Define the snapshot wire shape shared by every backend.
//! - Define the adapter contract the service is parameterized over.
//! - Select the configured backend at startup.
//!
//! # Invariants
//! - A saved snapshot always carries both chains in full; saves are
//!   whole-state replacements, never deltas.
//! - Adapters report failure instead of masking it; the service decides
//!   what failure means (empty start on load, retained state on save).

use crate::db::DbError;
use crate::model::node::Node;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod bound_file;
pub mod local;

pub use bound_file::{AccessMode, BoundFileStore, FsPermissionGate, PermissionGate};
pub use local::LocalSnapshotStore;

pub type PersistResult<T> = Result<T, PersistError>;

/// Persisted shape of the whole store: both chains, entry order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub main: Vec<Node>,
    pub sub: Vec<Node>,
}

/// Adapter-level failure. Load failures are soft (the service starts
/// empty); save failures are surfaced to the caller and never retried
/// automatically.
#[derive(Debug)]
pub enum PersistError {
    Io(std::io::Error),
    Serde(serde_json::Error),
    Db(DbError),
    /// The grant on the bound file was missing or revoked.
    PermissionDenied { path: PathBuf, mode: AccessMode },
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "snapshot i/o failure: {err}"),
            Self::Serde(err) => write!(f, "malformed snapshot data: {err}"),
            Self::Db(err) => write!(f, "snapshot database failure: {err}"),
            Self::PermissionDenied { path, mode } => write!(
                f,
                "{mode} permission denied for bound file `{}`",
                path.display()
            ),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serde(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::PermissionDenied { .. } => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

impl From<DbError> for PersistError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Contract every persistence backend fulfills.
///
/// `load` returns `Ok(None)` when no prior data exists; malformed prior
/// data is an error so the caller can distinguish "fresh start" from
/// "ignored corrupt data" in logs.
pub trait SnapshotStore {
    fn load(&mut self) -> PersistResult<Option<Snapshot>>;
    fn save(&mut self, snapshot: &Snapshot) -> PersistResult<()>;
    /// Stable backend name for log lines.
    fn backend(&self) -> &'static str;
}

/// Startup persistence selection. One adapter is chosen per session;
/// there are no duplicated dual-write code paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceConfig {
    /// SQLite key-value store at the given path.
    LocalDb { path: PathBuf },
    /// In-memory SQLite store; state lives only for the session.
    LocalDbInMemory,
    /// User-bound JSON file, permission re-checked on every access.
    BoundFile { path: PathBuf },
}

/// Opens the configured backend.
///
/// # Errors
/// - Database open/migration failures for the local store.
pub fn open_snapshot_store(config: PersistenceConfig) -> PersistResult<Box<dyn SnapshotStore>> {
    match config {
        PersistenceConfig::LocalDb { path } => {
            Ok(Box::new(LocalSnapshotStore::open(path)?))
        }
        PersistenceConfig::LocalDbInMemory => {
            Ok(Box::new(LocalSnapshotStore::open_in_memory()?))
        }
        PersistenceConfig::BoundFile { path } => Ok(Box::new(BoundFileStore::new(path))),
    }
}
