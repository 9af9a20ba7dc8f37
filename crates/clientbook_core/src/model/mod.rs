//! Domain model for the client directory.
//!
//! # Responsibility
//! - Define canonical data structures used by the record store gateway.
//! - Keep sparse update/search descriptors beside the records they target.
//!
//! # Invariants
//! - Every client is identified by a stable backend-assigned `ClientId`.
//! - Phones are owned records; they never outlive their client.

pub mod client;
