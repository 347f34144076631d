//! Domain model for the dual-timeline chains.
//!
//! # Responsibility
//! - Define the canonical node record shared by both chains.
//! - Validate raw caller input before it reaches the chain store.
//!
//! # Invariants
//! - Every node is identified by a stable `NodeId` unique across both chains.
//! - Pairing is symmetric and established at creation time only.

pub mod input;
pub mod node;
