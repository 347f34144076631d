//! User-bound external file backend.
//!
//! # Responsibility
//! - Persist the whole snapshot as one JSON blob at a user-chosen path.
//! - Re-check the access grant before every read and write; the grant can
//!   be revoked at any time after binding.
//!
//! # Invariants
//! - Writes are all-or-nothing: the full serialized snapshot is flushed
//!   to a sibling temp file and renamed over the target. Success is
//!   reported only after flush.
//! - A missing or empty file reads as "no prior data"; content whose
//!   `main`/`sub` is not a sequence is a malformed-data error.

use crate::persist::{PersistError, PersistResult, Snapshot, SnapshotStore};
use log::warn;
use std::fmt::{Display, Formatter};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Access mode a grant is checked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Read,
    ReadWrite,
}

impl Display for AccessMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::ReadWrite => f.write_str("readwrite"),
        }
    }
}

/// The revocable grant guarding the bound file.
///
/// The UI shell supplies an implementation that prompts the user; the
/// default implementation answers from filesystem metadata only.
pub trait PermissionGate {
    fn ensure(&mut self, path: &Path, mode: AccessMode) -> bool;
}

/// Grant check backed by filesystem metadata: write access is refused
/// when the target exists and is marked read-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPermissionGate;

impl PermissionGate for FsPermissionGate {
    fn ensure(&mut self, path: &Path, mode: AccessMode) -> bool {
        match fs::metadata(path) {
            Ok(meta) => mode == AccessMode::Read || !meta.permissions().readonly(),
            // A not-yet-created file can still be written.
            Err(_) => true,
        }
    }
}

/// Single-blob JSON file store.
pub struct BoundFileStore {
    path: PathBuf,
    gate: Box<dyn PermissionGate>,
}

impl BoundFileStore {
    /// Binds `path` with the default metadata-based grant check.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_gate(path, Box::new(FsPermissionGate))
    }

    /// Binds `path` with a caller-supplied grant check.
    pub fn with_gate(path: impl Into<PathBuf>, gate: Box<dyn PermissionGate>) -> Self {
        Self {
            path: path.into(),
            gate,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_grant(&mut self, mode: AccessMode) -> PersistResult<()> {
        if self.gate.ensure(&self.path, mode) {
            return Ok(());
        }
        warn!(
            "event=grant_check module=persist status=denied mode={} path={}",
            mode,
            self.path.display()
        );
        Err(PersistError::PermissionDenied {
            path: self.path.clone(),
            mode,
        })
    }
}

impl SnapshotStore for BoundFileStore {
    fn load(&mut self) -> PersistResult<Option<Snapshot>> {
        self.ensure_grant(AccessMode::Read)?;

        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &Snapshot) -> PersistResult<()> {
        self.ensure_grant(AccessMode::ReadWrite)?;

        let raw = serde_json::to_string_pretty(snapshot)?;

        // Replace the whole file content via temp-and-rename so a failed
        // write never leaves a truncated snapshot behind.
        let tmp_path = self.path.with_extension("tmp");
        {
            let mut tmp = File::create(&tmp_path)?;
            tmp.write_all(raw.as_bytes())?;
            tmp.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "bound_file"
    }
}
