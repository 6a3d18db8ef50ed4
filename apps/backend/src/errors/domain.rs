//! Domain-level error type used across services and adapters.
//!
//! This error type is HTTP-agnostic. Handlers should return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Domain-level not found entities (minimal set; extend as needed)
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Room,
    Player,
    Target,
    Requester,
    Voter,
    CatalogItem,
    ImpostorWord,
    Other(String),
}

/// Domain-level invalid state kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidStateKind {
    /// Room is past WAITING; late joins are rejected
    RoomNotWaiting,
    /// An eliminated player attempted an action reserved for active players
    EliminatedPlayer,
    /// Operation does not apply to the room's game mode
    WrongGameMode,
    Other(String),
}

/// Domain-level conflict kinds (extend as needed)
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Display name already taken within the room (case-insensitive)
    DuplicateName,
    /// Could not allocate an unused room code
    RoomCodeExhausted,
    Other(String),
}

/// Kinds of catalog shortfall that block a round from starting
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentKind {
    /// Selected pack has fewer items than players
    PackTooSmall,
    /// No impostor words configured at all
    NoWordsConfigured,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(String),
    /// Operation not legal in the room's current lifecycle state
    InvalidState(InvalidStateKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Catalog cannot supply enough content for the requested round
    InsufficientContent(ContentKind, String),
    /// Infrastructure/operational failures
    Infra(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(d) => write!(f, "validation error: {d}"),
            DomainError::InvalidState(kind, d) => write!(f, "invalid state {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::InsufficientContent(kind, d) => {
                write!(f, "insufficient content {kind:?}: {d}")
            }
            DomainError::Infra(d) => write!(f, "infra error: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn invalid_state(kind: InvalidStateKind, detail: impl Into<String>) -> Self {
        Self::InvalidState(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn insufficient_content(kind: ContentKind, detail: impl Into<String>) -> Self {
        Self::InsufficientContent(kind, detail.into())
    }
    pub fn infra(detail: impl Into<String>) -> Self {
        Self::Infra(detail.into())
    }
}
