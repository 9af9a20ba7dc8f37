//! Core record store gateway for the client directory.
//! This crate is the single source of truth for client/phone invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{init_schema, open_db, open_db_in_memory};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::client::{
    Client, ClientId, ClientSearch, ClientUpdate, ClientValidationError, Phone,
};
pub use repo::client_repo::{
    ClientMatch, ClientRepository, RepoError, RepoResult, SqliteClientRepository,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
