//! Local key-value snapshot store backed by SQLite.
//!
//! # Responsibility
//! - Persist each chain under its own key as a serialized node sequence.
//! - Keep reads tolerant of a partially populated table.
//!
//! # Invariants
//! - The two chain keys are independent; a missing key reads as an empty
//!   chain, not an error.
//! - Both keys are written in one transaction so a snapshot is never half
//!   replaced.

use crate::db::{open_db, open_db_in_memory};
use crate::model::node::{Lane, Node};
use crate::persist::{PersistResult, Snapshot, SnapshotStore};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

fn chain_key(lane: Lane) -> &'static str {
    match lane {
        Lane::Main => "timeline_main",
        Lane::Sub => "timeline_sub",
    }
}

/// SQLite-backed key→string store, one key per chain.
pub struct LocalSnapshotStore {
    conn: Connection,
}

impl LocalSnapshotStore {
    /// Opens (and migrates) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens an in-memory store for tests and throwaway sessions.
    pub fn open_in_memory() -> PersistResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    fn read_chain(&self, lane: Lane) -> PersistResult<Option<Vec<Node>>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?1;",
                [chain_key(lane)],
                |row| row.get(0),
            )
            .optional()?;

        match value {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn write_chain(conn: &Connection, lane: Lane, nodes: &[Node]) -> PersistResult<()> {
        let raw = serde_json::to_string(nodes)?;
        conn.execute(
            "INSERT INTO snapshots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![chain_key(lane), raw],
        )?;
        Ok(())
    }
}

impl SnapshotStore for LocalSnapshotStore {
    fn load(&mut self) -> PersistResult<Option<Snapshot>> {
        let main = self.read_chain(Lane::Main)?;
        let sub = self.read_chain(Lane::Sub)?;

        if main.is_none() && sub.is_none() {
            return Ok(None);
        }

        Ok(Some(Snapshot {
            main: main.unwrap_or_default(),
            sub: sub.unwrap_or_default(),
        }))
    }

    fn save(&mut self, snapshot: &Snapshot) -> PersistResult<()> {
        let tx = self.conn.transaction()?;
        Self::write_chain(&tx, Lane::Main, &snapshot.main)?;
        Self::write_chain(&tx, Lane::Sub, &snapshot.sub)?;
        tx.commit()?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "local_db"
    }
}
