//! Client and phone domain records.
//!
//! # Responsibility
//! - Define the persisted shapes for clients and their phone numbers.
//! - Define the sparse descriptors used by partial update and search.
//!
//! # Invariants
//! - `Client::id` is backend-assigned and never reused.
//! - `first_name` and `last_name` are non-empty for every persisted client.
//! - A `Phone` row always references an existing client.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Backend-assigned identifier for a client row.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ClientId = i64;

/// Persisted client record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Auto-incremented primary key, immutable once created.
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    /// Optional, but unique across all clients when set.
    pub email: Option<String>,
}

/// Persisted phone record. Immutable once created; the only mutation
/// supported is delete-and-re-add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    /// Owning client. Enforced by a foreign key on the backend.
    pub client_id: ClientId,
    /// Unique across all phones globally, regardless of owner.
    pub phone: String,
}

/// Validation failure for client write paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientValidationError {
    EmptyFirstName,
    EmptyLastName,
}

impl Display for ClientValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFirstName => write!(f, "first_name must not be empty"),
            Self::EmptyLastName => write!(f, "last_name must not be empty"),
        }
    }
}

impl Error for ClientValidationError {}

/// Checks the required-name invariant for a client about to be persisted.
pub fn validate_client_names(
    first_name: &str,
    last_name: &str,
) -> Result<(), ClientValidationError> {
    if first_name.trim().is_empty() {
        return Err(ClientValidationError::EmptyFirstName);
    }
    if last_name.trim().is_empty() {
        return Err(ClientValidationError::EmptyLastName);
    }
    Ok(())
}

/// Sparse update descriptor for `update_client`.
///
/// A field is applied only when it is `Some` and non-empty; `Some("")` is
/// treated the same as `None` (non-empty means apply). There is no way to
/// clear a stored value through this type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl ClientUpdate {
    /// Returns `(column, value)` pairs for every field that participates in
    /// the update. Column names come from a closed enumeration, never from
    /// caller input.
    pub fn assignments(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        for (column, value) in [
            ("first_name", self.first_name.as_deref()),
            ("last_name", self.last_name.as_deref()),
            ("email", self.email.as_deref()),
        ] {
            if let Some(value) = value {
                if !value.is_empty() {
                    pairs.push((column, value));
                }
            }
        }
        pairs
    }

    /// True when no field would be applied.
    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }
}

/// Conjunctive search descriptor for `find_clients`.
///
/// Uses the same presence rule as [`ClientUpdate`]: a criterion participates
/// only when supplied and non-empty. All supplied criteria must match
/// simultaneously (AND).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSearch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ClientSearch {
    pub fn by_last_name(last_name: impl Into<String>) -> Self {
        Self {
            last_name: Some(last_name.into()),
            ..Self::default()
        }
    }

    /// Active `(column, value)` criteria in declaration order.
    pub fn criteria(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        for (column, value) in [
            ("c.first_name", self.first_name.as_deref()),
            ("c.last_name", self.last_name.as_deref()),
            ("c.email", self.email.as_deref()),
            ("p.phone", self.phone.as_deref()),
        ] {
            if let Some(value) = value {
                if !value.is_empty() {
                    pairs.push((column, value));
                }
            }
        }
        pairs
    }

    /// True when no criterion is supplied. Searching with an empty
    /// descriptor is a caller error, not a match-everything query.
    pub fn is_empty(&self) -> bool {
        self.criteria().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        validate_client_names, Client, ClientSearch, ClientUpdate, ClientValidationError,
    };

    #[test]
    fn names_must_be_non_empty() {
        assert_eq!(
            validate_client_names("", "Ivanov"),
            Err(ClientValidationError::EmptyFirstName)
        );
        assert_eq!(
            validate_client_names("Yakov", "   "),
            Err(ClientValidationError::EmptyLastName)
        );
        assert!(validate_client_names("Yakov", "Ivanov").is_ok());
    }

    #[test]
    fn update_skips_absent_and_empty_fields() {
        let update = ClientUpdate {
            first_name: Some(String::new()),
            last_name: Some("Ivanov".to_string()),
            email: None,
        };

        assert_eq!(update.assignments(), vec![("last_name", "Ivanov")]);
        assert!(!update.is_empty());
        assert!(ClientUpdate::default().is_empty());
    }

    #[test]
    fn search_criteria_preserve_declaration_order() {
        let search = ClientSearch {
            first_name: None,
            last_name: Some("Ivanov".to_string()),
            email: Some(String::new()),
            phone: Some("5555".to_string()),
        };

        assert_eq!(
            search.criteria(),
            vec![("c.last_name", "Ivanov"), ("p.phone", "5555")]
        );
        assert!(ClientSearch::default().is_empty());
    }

    #[test]
    fn client_serde_roundtrip_keeps_optional_email() {
        let client = Client {
            id: 7,
            first_name: "Yakov".to_string(),
            last_name: "Ivanov".to_string(),
            email: None,
        };

        let json = serde_json::to_string(&client).unwrap();
        let parsed: Client = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, client);
        assert_eq!(parsed.email, None);
    }
}
