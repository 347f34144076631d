//! Core domain logic for the dual-timeline chain store.
//! This crate is the single source of truth for pairing invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod persist;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::input::{NodeDraft, NodeInput, NodeInputError};
pub use model::node::{Lane, Node, NodeId};
pub use persist::{
    open_snapshot_store, AccessMode, BoundFileStore, FsPermissionGate, LocalSnapshotStore,
    PermissionGate, PersistError, PersistResult, PersistenceConfig, Snapshot, SnapshotStore,
};
pub use service::timeline_service::{
    AddOutcome, DestroyError, DestroyOutcome, SaveStatus, ServiceConfig, TimelineService,
};
pub use store::chain_store::{AddedNodes, ChainStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
