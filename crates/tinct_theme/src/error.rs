//! Token error types

use thiserror::Error;
use tinct_core::{ColorParseError, MotionParseError, VarRef, VarRefError};

/// A token was read as a kind of value it does not hold
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenTypeError {
    #[error("expected a literal value, found indirect reference `{0}`")]
    Indirect(VarRef),

    #[error("expected a variable reference, found literal `{0}`")]
    Literal(String),

    #[error("literal is not a color: {0}")]
    NotAColor(#[from] ColorParseError),

    #[error("literal is not an animation: {0}")]
    NotAMotion(#[from] MotionParseError),
}

/// A declared value is not acceptable for its group
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenValueError {
    #[error("value is empty")]
    Empty,

    #[error("malformed variable reference: {0}")]
    Reference(#[from] VarRefError),

    #[error("invalid color: {0}")]
    Color(#[from] ColorParseError),

    #[error("invalid animation: {0}")]
    Motion(#[from] MotionParseError),
}

/// Render-time resolution failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("variable `{name}` is not set in context `{context}` and has no fallback")]
    UnresolvedVariable { context: String, name: String },

    #[error("`{value}` is not a color: {source}")]
    InvalidColor {
        value: String,
        source: ColorParseError,
    },

    #[error("variable `{name}` must be a #RRGGBB color, got `{value}`")]
    NotSixDigitHex { name: String, value: String },
}

/// Result type for token value reads
pub type Result<T> = std::result::Result<T, TokenTypeError>;
