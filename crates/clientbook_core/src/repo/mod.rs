//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record store gateway contract for clients and phones.
//! - Isolate SQL details from caller code.
//!
//! # Invariants
//! - Write paths validate required fields before any SQL mutation.
//! - Backend constraint rejections surface as semantic errors
//!   (`UniqueViolation`, `ForeignKeyViolation`) instead of raw driver errors.

pub mod client_repo;
