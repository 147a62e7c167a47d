//! Configuration error types

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use thiserror::Error;
use tinct_theme::{TokenGroup, TokenValue};

use crate::source::SourceId;

/// One side of a conflicting declaration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Claim {
    pub origin: SourceId,
    pub value: TokenValue,
}

impl Display for Claim {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` from {}", self.value, self.origin)
    }
}

/// Load-time failures. Every one of them is fatal to the load.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A content pattern is empty or not valid glob syntax
    #[error("{origin}: invalid content pattern `{pattern}`: {reason}")]
    InvalidPattern {
        pattern: String,
        reason: String,
        origin: SourceId,
    },

    /// One declaration gives the same token two different values
    #[error("{origin}: {group}.{name} is declared twice with different values (`{first}`, then `{second}`)")]
    DuplicateToken {
        group: TokenGroup,
        name: String,
        first: TokenValue,
        second: TokenValue,
        origin: SourceId,
    },

    /// Two declarations of the same configuration disagree and no precedence was chosen
    #[error("{group}.{name} is declared as {first} and as {second}; refusing to pick one without an explicit precedence")]
    AmbiguousSource {
        group: TokenGroup,
        name: String,
        first: Claim,
        second: Claim,
    },

    /// A token value is malformed for its group
    #[error("{origin}: invalid value for {group}.{name}: {reason}")]
    InvalidToken {
        group: TokenGroup,
        name: String,
        reason: String,
        origin: SourceId,
    },

    /// A token name is outside `[A-Za-z0-9][A-Za-z0-9_.-]*`
    #[error("{origin}: invalid token name `{name}` in {group}")]
    InvalidTokenName {
        group: TokenGroup,
        name: String,
        origin: SourceId,
    },

    /// `theme.extend` names a group outside the closed set
    #[error("{origin}: unknown token group `{group}` under theme.extend (expected `colors` or `animation`)")]
    UnknownGroup { group: String, origin: SourceId },

    #[error("{origin}: {message}")]
    Parse { origin: SourceId, message: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported declaration format for {} (expected .toml or .json)", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("no configuration sources were given")]
    NoSources,

    #[error("configuration state is already initialized")]
    AlreadyInitialized,
}

impl ConfigError {
    /// The declaration the error is attributed to, when there is exactly one
    pub fn origin(&self) -> Option<&SourceId> {
        match self {
            ConfigError::InvalidPattern { origin, .. }
            | ConfigError::DuplicateToken { origin, .. }
            | ConfigError::InvalidToken { origin, .. }
            | ConfigError::InvalidTokenName { origin, .. }
            | ConfigError::UnknownGroup { origin, .. }
            | ConfigError::Parse { origin, .. } => Some(origin),
            _ => None,
        }
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
