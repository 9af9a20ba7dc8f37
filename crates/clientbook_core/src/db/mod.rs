//! SQLite connection bootstrap and schema initialization entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the client directory.
//! - Provide the explicit, destructive schema (re)initialization call.
//!
//! # Invariants
//! - Opening a connection never touches application tables; only
//!   `init_schema` is destructive, and only when explicitly called.
//! - Returned connections have `foreign_keys=ON` so phone ownership is
//!   enforced by the backend.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::init_schema;

pub type DbResult<T> = Result<T, DbError>;

/// Transport-level database failure.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
