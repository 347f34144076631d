//! Timeline use-case service.
//!
//! # Responsibility
//! - Validate raw add input before any mutation happens.
//! - Check the destroy confirmation secret; the store itself is unguarded.
//! - Save the full snapshot after every successful mutation and report
//!   the outcome to the caller.
//!
//! # Invariants
//! - In-memory state is the source of truth. A failed save changes
//!   nothing in memory; the next successful save carries the full
//!   current state.
//! - Saves are never retried automatically and never overlap: all
//!   mutations run synchronously on one caller.

use crate::model::input::{NodeInput, NodeInputError};
use crate::model::node::{Lane, Node};
use crate::persist::{PersistError, SnapshotStore};
use crate::store::chain_store::{AddedNodes, ChainStore};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service-level configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Shared secret confirming chain destruction, compared by exact
    /// string equality.
    pub destroy_secret: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            // Default operator passphrase; deployments should override.
            destroy_secret: "0218".to_string(),
        }
    }
}

/// Durability outcome of the save following a mutation. A failure is
/// non-fatal by design: the caller notifies the user and moves on.
#[derive(Debug)]
pub enum SaveStatus {
    Durable,
    Failed(PersistError),
}

impl SaveStatus {
    pub fn is_durable(&self) -> bool {
        matches!(self, Self::Durable)
    }
}

/// Result of a successful add: the created node(s) plus save outcome.
#[derive(Debug)]
pub struct AddOutcome {
    pub added: AddedNodes,
    pub persisted: SaveStatus,
}

/// Result of a confirmed destroy.
#[derive(Debug)]
pub struct DestroyOutcome {
    pub lane: Lane,
    pub removed: usize,
    pub persisted: SaveStatus,
}

/// Destroy rejection. The store is untouched when this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyError {
    ConfirmationRejected,
}

impl Display for DestroyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfirmationRejected => {
                write!(f, "destroy confirmation rejected: wrong or missing secret")
            }
        }
    }
}

impl Error for DestroyError {}

/// Single-owner service tying the chain store to one injected
/// persistence adapter, selected at startup by configuration.
pub struct TimelineService {
    chains: ChainStore,
    store: Box<dyn SnapshotStore>,
    config: ServiceConfig,
}

impl TimelineService {
    /// Creates a service with empty chains over the given adapter.
    /// Call [`load`](Self::load) to pick up prior data.
    pub fn new(store: Box<dyn SnapshotStore>, config: ServiceConfig) -> Self {
        Self {
            chains: ChainStore::new(),
            store,
            config,
        }
    }

    /// Read access for rendering.
    pub fn chains(&self) -> &ChainStore {
        &self.chains
    }

    /// Loads prior data from the adapter.
    ///
    /// A load failure or malformed snapshot initializes both chains
    /// empty and is never fatal. Returns whether prior data was loaded.
    pub fn load(&mut self) -> bool {
        match self.store.load() {
            Ok(Some(snapshot)) => {
                info!(
                    "event=snapshot_load module=service status=ok backend={} main={} sub={}",
                    self.store.backend(),
                    snapshot.main.len(),
                    snapshot.sub.len()
                );
                self.chains = ChainStore::from_snapshot(snapshot);
                true
            }
            Ok(None) => {
                info!(
                    "event=snapshot_load module=service status=empty backend={}",
                    self.store.backend()
                );
                self.chains = ChainStore::new();
                false
            }
            Err(err) => {
                warn!(
                    "event=snapshot_load module=service status=error backend={} error={}",
                    self.store.backend(),
                    err
                );
                self.chains = ChainStore::new();
                false
            }
        }
    }

    /// Validates input, appends to the chains and saves.
    ///
    /// # Errors
    /// - Input validation failures; no node is created and nothing is
    ///   saved.
    ///
    /// A save failure does not fail the add: the outcome's `persisted`
    /// field carries it for user notification.
    pub fn add_node(
        &mut self,
        input: &NodeInput,
        also_main: bool,
    ) -> Result<AddOutcome, NodeInputError> {
        let draft = input.validate()?;
        let added = self.chains.add_node(draft, also_main);
        let persisted = self.save_current();
        Ok(AddOutcome { added, persisted })
    }

    /// Destroys one chain after confirming the shared secret.
    ///
    /// # Errors
    /// - `ConfirmationRejected` on a wrong secret; the store is untouched.
    pub fn destroy_chain(
        &mut self,
        lane: Lane,
        confirmation: &str,
    ) -> Result<DestroyOutcome, DestroyError> {
        if confirmation != self.config.destroy_secret {
            warn!(
                "event=destroy_chain module=service status=rejected lane={}",
                lane
            );
            return Err(DestroyError::ConfirmationRejected);
        }

        let removed = self.chains.lane(lane).len();
        self.chains.destroy_chain(lane);
        let persisted = self.save_current();
        Ok(DestroyOutcome {
            lane,
            removed,
            persisted,
        })
    }

    /// Resolves a node's pairing partner; `None` when unset or dangling.
    pub fn find_pair(&self, node: &Node, lane: Lane) -> Option<&Node> {
        self.chains.find_pair(node, lane)
    }

    /// Swaps in a newly bound adapter.
    ///
    /// Prior content of the new backend wins when present and well
    /// formed; otherwise the current in-memory state is written out to
    /// seed it. Returns whether the backend's content was adopted.
    pub fn rebind(&mut self, store: Box<dyn SnapshotStore>) -> bool {
        self.store = store;
        match self.store.load() {
            Ok(Some(snapshot)) => {
                info!(
                    "event=rebind module=service status=adopted backend={}",
                    self.store.backend()
                );
                self.chains = ChainStore::from_snapshot(snapshot);
                true
            }
            Ok(None) | Err(_) => {
                info!(
                    "event=rebind module=service status=seeded backend={}",
                    self.store.backend()
                );
                let _ = self.save_current();
                false
            }
        }
    }

    /// Best-effort final save, e.g. on shutdown. Failures are logged and
    /// swallowed. Returns whether the save succeeded.
    pub fn flush(&mut self) -> bool {
        self.save_current().is_durable()
    }

    fn save_current(&mut self) -> SaveStatus {
        let snapshot = self.chains.snapshot();
        match self.store.save(&snapshot) {
            Ok(()) => {
                info!(
                    "event=snapshot_save module=service status=ok backend={} main={} sub={}",
                    self.store.backend(),
                    snapshot.main.len(),
                    snapshot.sub.len()
                );
                SaveStatus::Durable
            }
            Err(err) => {
                warn!(
                    "event=snapshot_save module=service status=error backend={} error={}",
                    self.store.backend(),
                    err
                );
                SaveStatus::Failed(err)
            }
        }
    }
}
