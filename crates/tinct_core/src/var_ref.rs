//! Runtime variable references
//!
//! A token value written as `var(--name)` is not a value at all: it names a
//! variable that the rendering environment supplies later. The optional second
//! argument, `var(--name, fallback)`, is kept verbatim and only consulted by
//! whoever resolves the reference.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Function name, matched ASCII case-insensitively
const FUNCTION: &str = "var";

/// A parsed `var(--name[, fallback])` reference
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VarRef {
    name: String,
    fallback: Option<String>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VarRefError {
    #[error("`{0}` is not wrapped in var(...)")]
    NotAReference(String),

    #[error("unbalanced parentheses in `{0}`")]
    Unbalanced(String),

    #[error("variable name in `{0}` must start with `--`")]
    MissingDashes(String),

    #[error("variable name in `{0}` is empty or contains characters outside [A-Za-z0-9_-]")]
    BadName(String),

    #[error("empty fallback in `{0}`")]
    EmptyFallback(String),

    #[error("whitespace between `var` and `(` in `{0}`")]
    SpaceBeforeParen(String),
}

/// Text after the `var` function name, if `value` starts with one
fn after_function_name(value: &str) -> Option<&str> {
    let head = value.get(..FUNCTION.len())?;
    if !head.eq_ignore_ascii_case(FUNCTION) {
        return None;
    }
    let rest = &value[FUNCTION.len()..];
    rest.trim_start().starts_with('(').then_some(rest)
}

impl VarRef {
    /// Build a reference without a fallback. `name` must include the `--` prefix.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// True if `value` uses the reserved wrapping, whether or not it is well formed.
    ///
    /// The function name is case-insensitive, and `var (` counts so that the
    /// near miss is reported by [`VarRef::parse`] instead of read as a literal.
    pub fn is_reference(value: &str) -> bool {
        after_function_name(value.trim_start()).is_some()
    }

    /// Parse `var(--name)` or `var(--name, fallback)`.
    pub fn parse(input: &str) -> Result<Self, VarRefError> {
        let trimmed = input.trim();
        let rest = after_function_name(trimmed)
            .ok_or_else(|| VarRefError::NotAReference(trimmed.to_string()))?;
        let after = rest
            .strip_prefix('(')
            .ok_or_else(|| VarRefError::SpaceBeforeParen(trimmed.to_string()))?;

        // Find the paren that closes `var(`; fallbacks may nest, e.g. rgb(0, 0, 0).
        let mut depth = 1usize;
        let mut close = None;
        for (i, c) in after.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }
        let close = close.ok_or_else(|| VarRefError::Unbalanced(trimmed.to_string()))?;
        if !after[close + 1..].trim().is_empty() {
            return Err(VarRefError::Unbalanced(trimmed.to_string()));
        }

        let content = &after[..close];
        let (raw_name, fallback) = match content.find(',') {
            Some(comma) => (&content[..comma], Some(content[comma + 1..].trim())),
            None => (content, None),
        };

        let name = raw_name.trim();
        let ident = name
            .strip_prefix("--")
            .ok_or_else(|| VarRefError::MissingDashes(trimmed.to_string()))?;
        if ident.is_empty()
            || !ident
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(VarRefError::BadName(trimmed.to_string()));
        }

        let fallback = match fallback {
            Some("") => return Err(VarRefError::EmptyFallback(trimmed.to_string())),
            Some(f) => Some(f.to_string()),
            None => None,
        };

        Ok(Self {
            name: name.to_string(),
            fallback,
        })
    }

    /// Variable name including the leading `--`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }
}

impl fmt::Display for VarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fallback {
            Some(fallback) => write!(f, "var({}, {})", self.name, fallback),
            None => write!(f, "var({})", self.name),
        }
    }
}

impl TryFrom<String> for VarRef {
    type Error = VarRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VarRef> for String {
    fn from(value: VarRef) -> Self {
        value.to_string()
    }
}
