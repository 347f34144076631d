//! In-memory chain state and its mutation operations.
//!
//! # Responsibility
//! - Own the two ordered node sequences and the pairing invariants.
//! - Keep mutations synchronous; persistence is layered on top.
//!
//! # Invariants
//! - Pairing is created only inside `add_node`, never between
//!   pre-existing nodes.
//! - Destroying `main` clears pairing references on surviving `sub`
//!   nodes; destroying `sub` leaves `main` untouched.

pub mod chain_store;
