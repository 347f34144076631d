//! Use-case orchestration over the chain store and persistence adapter.
//!
//! # Responsibility
//! - Gate mutations behind input validation and destroy confirmation.
//! - Drive the save-after-mutate flow and surface save failures without
//!   losing in-memory state.

pub mod timeline_service;
