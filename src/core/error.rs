//! Error types and front-door mapping.
//!
//! Marquee defines the error conditions the registry and resolution core
//! report to callers. Expected conditions (missing entities, name
//! conflicts, bad input, broken references) carry a specific reason and
//! are recoverable; storage failures abort the whole unit of work and the
//! caller is expected to retry.

use thiserror::Error;

/// Common Marquee error conditions.
#[derive(Debug, Error)]
pub enum MarqueeError {
    /// No non-deleted screen with this id or name.
    #[error("screen not found: {lookup}")]
    ScreenNotFound { lookup: String },

    /// No non-deleted group with this id or name.
    #[error("group not found: {lookup}")]
    GroupNotFound { lookup: String },

    /// No non-deleted configuration with this id.
    #[error("configuration not found: {config_id}")]
    ConfigurationNotFound { config_id: u64 },

    /// Another non-deleted entity of the same kind already uses this name.
    #[error("{kind} \"{name}\" already exists")]
    DuplicateName { kind: EntityKind, name: String },

    /// Missing or malformed required input.
    #[error("invalid {kind}: {message}")]
    Validation { kind: EntityKind, message: String },

    /// A referenced configuration or group does not exist or is tombstoned.
    #[error("{kind} reference is dangling: {reference}")]
    Referential { kind: EntityKind, reference: String },

    /// Commit failure in the storage collaborator. The whole operation
    /// failed and left no partial writes.
    #[error("storage error: {message}")]
    Storage { message: String },

    /// The mutating caller carried no authenticated identity.
    #[error("user is not authenticated")]
    Unauthenticated,
}

/// Entity kinds named in error reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Screen,
    Group,
    Configuration,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Screen => write!(f, "screen"),
            Self::Group => write!(f, "group"),
            Self::Configuration => write!(f, "configuration"),
        }
    }
}

impl MarqueeError {
    /// Create a ScreenNotFound error from any lookup key.
    pub fn screen_not_found(lookup: impl std::fmt::Display) -> Self {
        Self::ScreenNotFound {
            lookup: lookup.to_string(),
        }
    }

    /// Create a GroupNotFound error from any lookup key.
    pub fn group_not_found(lookup: impl std::fmt::Display) -> Self {
        Self::GroupNotFound {
            lookup: lookup.to_string(),
        }
    }

    /// Create a Validation error.
    pub fn validation(kind: EntityKind, message: impl Into<String>) -> Self {
        Self::Validation {
            kind,
            message: message.into(),
        }
    }

    /// Create a Storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Check if this error indicates the operation should be retried.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}

/// Result type using MarqueeError.
pub type MarqueeResult<T> = Result<T, MarqueeError>;

// ============================================================================
// Front-door error mapping
// ============================================================================

/// HTTP status codes for the REST front door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpCode {
    BadRequest = 400,
    Unauthorized = 401,
    NotFound = 404,
    Conflict = 409,
    UnprocessableEntity = 422,
    InternalServerError = 500,
}

/// Mapping from MarqueeError to the HTTP front-door collaborator's status
/// codes. The front door itself lives outside this crate; it only needs a
/// stable status and reason per condition.
pub struct HttpErrorMapping;

impl HttpErrorMapping {
    /// Map a MarqueeError to an HTTP status code.
    pub fn to_status_code(error: &MarqueeError) -> HttpCode {
        match error {
            MarqueeError::ScreenNotFound { .. } => HttpCode::NotFound,
            MarqueeError::GroupNotFound { .. } => HttpCode::NotFound,
            MarqueeError::ConfigurationNotFound { .. } => HttpCode::NotFound,
            MarqueeError::DuplicateName { .. } => HttpCode::Conflict,
            MarqueeError::Validation { .. } => HttpCode::BadRequest,
            MarqueeError::Referential { .. } => HttpCode::UnprocessableEntity,
            MarqueeError::Storage { .. } => HttpCode::InternalServerError,
            MarqueeError::Unauthenticated => HttpCode::Unauthorized,
        }
    }

    /// Get a response body message suitable for REST clients.
    pub fn to_error_message(error: &MarqueeError) -> String {
        match error {
            MarqueeError::ScreenNotFound { .. } => "Screen not found".to_string(),
            MarqueeError::GroupNotFound { .. } => "Group not found".to_string(),
            MarqueeError::ConfigurationNotFound { .. } => "Configuration not found".to_string(),
            MarqueeError::DuplicateName { kind, name } => match kind {
                EntityKind::Group => "Group with this name already exists".to_string(),
                _ => format!("{kind} \"{name}\" already exists"),
            },
            MarqueeError::Storage { .. } => "Error on updating DB".to_string(),
            MarqueeError::Unauthenticated => "User is not authenticated".to_string(),
            other => other.to_string(),
        }
    }
}
