use std::fmt;

use thiserror::Error;

/// The entity kinds held by the record stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Property,
    Inquiry,
    User,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Property => "Property",
            EntityKind::Inquiry => "Inquiry",
            EntityKind::User => "User",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by the record stores and the services on top of them
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// The runtime shut down while a write task was still pending.
    #[error("{kind} write aborted before completion")]
    Aborted { kind: EntityKind },
}

impl StoreError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
