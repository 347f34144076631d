//! Chain store: the owned state object behind every operation.
//!
//! # Responsibility
//! - Append nodes to the sub chain, optionally mirrored into main with
//!   symmetric pairing.
//! - Destroy one chain wholesale, cascading reference cleanup where the
//!   surviving chain holds links into the destroyed one.
//! - Resolve pairing references, treating dangling ones as absent.
//!
//! # Invariants
//! - Insertion order is entry order; sequences are never re-sorted by
//!   timestamp.
//! - `add_node` performs no input validation; callers pass a `NodeDraft`
//!   that already passed `NodeInput::validate`.
//! - Destruction is irreversible and unguarded here; confirmation is the
//!   service layer's concern.

use crate::model::input::NodeDraft;
use crate::model::node::{Lane, Node};
use crate::persist::Snapshot;
use log::info;
use uuid::Uuid;

/// Nodes created by one add operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedNodes {
    /// The node appended to `sub`. Always present.
    pub sub: Node,
    /// The mirrored node appended to `main`, when requested.
    pub main: Option<Node>,
}

/// Explicitly owned dual-chain state. Constructed empty or restored from a
/// snapshot; there is no ambient global instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainStore {
    main: Vec<Node>,
    sub: Vec<Node>,
}

impl ChainStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from a persisted snapshot, preserving order and
    /// every field as loaded. Dangling `pair_id`s are kept; they resolve
    /// to nothing at lookup time.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            main: snapshot.main,
            sub: snapshot.sub,
        }
    }

    /// Clones the current state into the persisted shape.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            main: self.main.clone(),
            sub: self.sub.clone(),
        }
    }

    /// Nodes in the given lane, in entry order.
    pub fn lane(&self, lane: Lane) -> &[Node] {
        match lane {
            Lane::Main => &self.main,
            Lane::Sub => &self.sub,
        }
    }

    pub fn main(&self) -> &[Node] {
        &self.main
    }

    pub fn sub(&self) -> &[Node] {
        &self.sub
    }

    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.sub.is_empty()
    }

    /// Appends a node built from `draft` to the sub chain.
    ///
    /// With `also_main`, a second node with identical content, timestamp
    /// and duration but its own fresh ID is appended to the main chain,
    /// and the two nodes' `pair_id`s are set to each other. This is the
    /// only place pairing is ever established.
    pub fn add_node(&mut self, draft: NodeDraft, also_main: bool) -> AddedNodes {
        let mut sub_node = draft.into_node();

        let main_node = if also_main {
            let mut mirrored = sub_node.clone();
            mirrored.id = Uuid::new_v4();
            sub_node.pair_id = Some(mirrored.id);
            mirrored.pair_id = Some(sub_node.id);
            Some(mirrored)
        } else {
            None
        };

        info!(
            "event=add_node module=store status=ok sub_id={} paired={}",
            sub_node.id,
            main_node.is_some()
        );

        self.sub.push(sub_node.clone());
        if let Some(ref mirrored) = main_node {
            self.main.push(mirrored.clone());
        }

        AddedNodes {
            sub: sub_node,
            main: main_node,
        }
    }

    /// Clears one chain entirely. Irreversible.
    ///
    /// Destroying `main` also clears `pair_id` on every surviving `sub`
    /// node, since those references are the ones resolved for display.
    /// Destroying `sub` leaves `main` nodes untouched; their `pair_id`s
    /// dangle and read as unpaired from then on.
    pub fn destroy_chain(&mut self, lane: Lane) {
        let removed = self.lane(lane).len();
        match lane {
            Lane::Main => {
                self.main.clear();
                for node in &mut self.sub {
                    node.pair_id = None;
                }
            }
            Lane::Sub => {
                self.sub.clear();
            }
        }
        info!(
            "event=destroy_chain module=store status=ok lane={} removed={}",
            lane, removed
        );
    }

    /// Resolves `node`'s pairing partner in the lane opposite to `lane`.
    ///
    /// Returns `None` when `pair_id` is unset or dangles.
    pub fn find_pair(&self, node: &Node, lane: Lane) -> Option<&Node> {
        let pair_id = node.pair_id?;
        self.lane(lane.opposite())
            .iter()
            .find(|candidate| candidate.id == pair_id)
    }
}
