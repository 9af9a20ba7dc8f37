//! Record store gateway contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert, sparse update, delete and conjunctive search over the
//!   `clients` and `phones` tables.
//! - Keep all SQL inside the persistence boundary.
//!
//! # Invariants
//! - Column names in dynamically built statements come from closed
//!   enumerations only; caller text never lands in a structural position.
//! - Every operation runs on the single connection supplied by the caller;
//!   multi-statement operations issue no transaction of their own, so a
//!   caller needing atomicity must wrap the calls in one.
//! - Update/delete of a nonexistent id is a silent no-op, not an error.

use crate::db::DbError;
use crate::model::client::{
    validate_client_names, Client, ClientId, ClientSearch, ClientUpdate, ClientValidationError,
    Phone,
};
use rusqlite::types::Value;
use rusqlite::{ffi, params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CLIENT_MATCH_SELECT_SQL: &str = "SELECT
    c.id,
    c.first_name,
    c.last_name,
    c.email,
    p.phone
FROM clients c
LEFT JOIN phones p ON p.client_id = c.id";

const REQUIRED_TABLES: [&str; 2] = ["clients", "phones"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Gateway error taxonomy for client/phone persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ClientValidationError),
    Db(DbError),
    /// Backend rejected a duplicate value in a unique column
    /// (`clients.email` or `phones.phone`).
    UniqueViolation(String),
    /// Backend rejected a phone referencing a nonexistent client.
    ForeignKeyViolation(String),
    /// The connection has no initialized client directory schema.
    MissingRequiredTable(&'static str),
    /// `find_clients` was called with zero criteria.
    EmptySearch,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UniqueViolation(detail) => {
                write!(f, "unique constraint violated: {detail}")
            }
            Self::ForeignKeyViolation(detail) => {
                write!(f, "foreign key constraint violated: {detail}")
            }
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run init_schema first")
            }
            Self::EmptySearch => {
                write!(f, "client search requires at least one non-empty criterion")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::UniqueViolation(_)
            | Self::ForeignKeyViolation(_)
            | Self::MissingRequiredTable(_)
            | Self::EmptySearch => None,
        }
    }
}

impl From<ClientValidationError> for RepoError {
    fn from(value: ClientValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        // Constraint rejections are part of the gateway contract; everything
        // else stays a transport error.
        if let rusqlite::Error::SqliteFailure(code, ref message) = value {
            let detail = message
                .clone()
                .unwrap_or_else(|| code.to_string());
            match code.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    return Self::UniqueViolation(detail);
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                    return Self::ForeignKeyViolation(detail);
                }
                _ => {}
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Joined search result row: one client paired with one of its phones, or
/// with no phone when the client owns none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientMatch {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Record store gateway contract.
pub trait ClientRepository {
    /// Inserts a client and returns the persisted row with its generated id.
    fn create_client(
        &self,
        first_name: &str,
        last_name: &str,
        email: Option<&str>,
    ) -> RepoResult<Client>;
    /// Inserts a phone owned by `client_id` and returns the persisted row.
    fn add_phone(&self, client_id: ClientId, phone: &str) -> RepoResult<Phone>;
    /// Applies each present non-empty field of `update` to the client row.
    fn update_client(&self, id: ClientId, update: &ClientUpdate) -> RepoResult<()>;
    /// Deletes the phone row matching both `client_id` and `phone`; returns
    /// the affected client id, or `None` when no row matched.
    fn delete_phone(&self, client_id: ClientId, phone: &str) -> RepoResult<Option<ClientId>>;
    /// Deletes all phones owned by `id`, then the client row itself.
    fn delete_client(&self, id: ClientId) -> RepoResult<()>;
    /// Returns joined rows for clients matching ALL supplied criteria.
    fn find_clients(&self, search: &ClientSearch) -> RepoResult<Vec<ClientMatch>>;
}

/// SQLite-backed record store gateway.
pub struct SqliteClientRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClientRepository<'conn> {
    /// Constructs a gateway over a connection whose schema is initialized.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ClientRepository for SqliteClientRepository<'_> {
    fn create_client(
        &self,
        first_name: &str,
        last_name: &str,
        email: Option<&str>,
    ) -> RepoResult<Client> {
        validate_client_names(first_name, last_name)?;

        let mut stmt = self.conn.prepare(
            "INSERT INTO clients (first_name, last_name, email)
             VALUES (?1, ?2, ?3)
             RETURNING id, first_name, last_name, email;",
        )?;
        let client = stmt.query_row(params![first_name, last_name, email], parse_client_row)?;

        Ok(client)
    }

    fn add_phone(&self, client_id: ClientId, phone: &str) -> RepoResult<Phone> {
        let mut stmt = self.conn.prepare(
            "INSERT INTO phones (client_id, phone)
             VALUES (?1, ?2)
             RETURNING client_id, phone;",
        )?;
        let persisted = stmt.query_row(params![client_id, phone], |row| {
            Ok(Phone {
                client_id: row.get("client_id")?,
                phone: row.get("phone")?,
            })
        })?;

        Ok(persisted)
    }

    fn update_client(&self, id: ClientId, update: &ClientUpdate) -> RepoResult<()> {
        // One isolated statement per field, mirroring the sparse-update
        // contract. `column` is always one of the closed set declared in
        // `ClientUpdate::assignments`.
        for (column, value) in update.assignments() {
            self.conn.execute(
                &format!("UPDATE clients SET {column} = ?1 WHERE id = ?2;"),
                params![value, id],
            )?;
        }

        Ok(())
    }

    fn delete_phone(&self, client_id: ClientId, phone: &str) -> RepoResult<Option<ClientId>> {
        let mut stmt = self.conn.prepare(
            "DELETE FROM phones
             WHERE client_id = ?1 AND phone = ?2
             RETURNING client_id;",
        )?;

        // phones.phone is unique, so at most one row can match.
        let mut rows = stmt.query(params![client_id, phone])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }

        Ok(None)
    }

    fn delete_client(&self, id: ClientId) -> RepoResult<()> {
        // Phones go first to keep referential integrity; no transaction here,
        // see the module invariants.
        self.conn
            .execute("DELETE FROM phones WHERE client_id = ?1;", [id])?;
        self.conn
            .execute("DELETE FROM clients WHERE id = ?1;", [id])?;

        Ok(())
    }

    fn find_clients(&self, search: &ClientSearch) -> RepoResult<Vec<ClientMatch>> {
        let criteria = search.criteria();
        if criteria.is_empty() {
            return Err(RepoError::EmptySearch);
        }

        let mut sql = format!("{CLIENT_MATCH_SELECT_SQL} WHERE ");
        let mut bind_values: Vec<Value> = Vec::new();

        for (index, (column, value)) in criteria.iter().enumerate() {
            if index > 0 {
                sql.push_str(" AND ");
            }
            // `column` comes from the closed set in `ClientSearch::criteria`.
            sql.push_str(column);
            sql.push_str(" = ?");
            bind_values.push(Value::Text((*value).to_string()));
        }

        sql.push_str(" ORDER BY c.id ASC, p.phone ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut matches = Vec::new();

        while let Some(row) = rows.next()? {
            matches.push(ClientMatch {
                id: row.get("id")?,
                first_name: row.get("first_name")?,
                last_name: row.get("last_name")?,
                email: row.get("email")?,
                phone: row.get("phone")?,
            });
        }

        Ok(matches)
    }
}

fn parse_client_row(row: &Row<'_>) -> rusqlite::Result<Client> {
    Ok(Client {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    for table in REQUIRED_TABLES {
        let present: bool = conn.query_row(
            "SELECT EXISTS (
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
             );",
            [table],
            |row| row.get(0),
        )?;
        if !present {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}
