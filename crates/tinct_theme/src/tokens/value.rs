//! Token values

use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};
use tinct_core::{Color, MotionSpec, VarRef};

use crate::error::{Result, TokenTypeError, TokenValueError};
use crate::tokens::TokenGroup;

/// A declared token value.
///
/// Whether a value is literal or indirect is decided by [`TokenValue::classify`]
/// at declaration time. Indirect values are opaque to this crate; the rendering
/// environment resolves them (see [`crate::VariableContext`]).
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum TokenValue {
    /// A fully resolved value: a color, or an animation shorthand
    Literal(String),
    /// A runtime variable reference, `var(--name)`
    Indirect(VarRef),
}

impl TokenValue {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    pub fn indirect(name: impl Into<String>) -> Self {
        Self::Indirect(VarRef::new(name))
    }

    /// Tag a raw declared string.
    ///
    /// Anything wrapped in `var(` is indirect and must parse as a reference;
    /// everything else is kept verbatim as a literal.
    pub fn classify(raw: &str) -> std::result::Result<Self, TokenValueError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TokenValueError::Empty);
        }
        if VarRef::is_reference(trimmed) {
            return Ok(Self::Indirect(VarRef::parse(trimmed)?));
        }
        Ok(Self::Literal(trimmed.to_string()))
    }

    /// Check a value against the rules of the group it is declared in.
    ///
    /// Palette literals that start with `#` must be valid hex colors; other
    /// palette literals (`currentColor`, `rgb(...)`) are accepted as written.
    /// Motion literals must parse as animation shorthands. Indirect values
    /// were already checked by [`TokenValue::classify`].
    pub fn validate_for(&self, group: TokenGroup) -> std::result::Result<(), TokenValueError> {
        let Self::Literal(value) = self else {
            return Ok(());
        };
        match group {
            TokenGroup::Palette if value.starts_with('#') => {
                Color::parse_hex(value)?;
            }
            TokenGroup::Palette => {}
            TokenGroup::Motion => {
                MotionSpec::parse_list(value)?;
            }
        }
        Ok(())
    }

    pub fn is_indirect(&self) -> bool {
        matches!(self, Self::Indirect(_))
    }

    /// The literal string; fails for indirect values rather than casting them.
    pub fn as_literal(&self) -> Result<&str> {
        match self {
            Self::Literal(value) => Ok(value),
            Self::Indirect(var) => Err(TokenTypeError::Indirect(var.clone())),
        }
    }

    pub fn as_var_ref(&self) -> Result<&VarRef> {
        match self {
            Self::Indirect(var) => Ok(var),
            Self::Literal(value) => Err(TokenTypeError::Literal(value.clone())),
        }
    }

    /// Read a literal as a hex color
    pub fn as_color(&self) -> Result<Color> {
        Ok(Color::parse_hex(self.as_literal()?)?)
    }

    /// Read a literal as one or more animation shorthands
    pub fn as_motion(&self) -> Result<Vec<MotionSpec>> {
        Ok(MotionSpec::parse_list(self.as_literal()?)?)
    }
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(value) => f.write_str(value),
            Self::Indirect(var) => Display::fmt(var, f),
        }
    }
}

impl Serialize for TokenValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinct_core::VarRefError;

    #[test]
    fn classify_tags_by_wrapping() {
        assert_eq!(
            TokenValue::classify("#3b82f6").unwrap(),
            TokenValue::literal("#3b82f6")
        );
        assert_eq!(
            TokenValue::classify(" var(--primary-color) ").unwrap(),
            TokenValue::indirect("--primary-color")
        );
        assert_eq!(TokenValue::classify("   "), Err(TokenValueError::Empty));
        assert!(matches!(
            TokenValue::classify("var(primary)"),
            Err(TokenValueError::Reference(VarRefError::MissingDashes(_)))
        ));
    }

    #[test]
    fn uppercase_and_spaced_references_are_not_literals() {
        assert_eq!(
            TokenValue::classify("VAR(--primary-color)").unwrap(),
            TokenValue::indirect("--primary-color")
        );
        assert!(matches!(
            TokenValue::classify("var (--primary-color)"),
            Err(TokenValueError::Reference(VarRefError::SpaceBeforeParen(_)))
        ));
    }

    #[test]
    fn indirect_does_not_read_as_literal() {
        let value = TokenValue::indirect("--primary-color");
        assert_eq!(
            value.as_literal(),
            Err(TokenTypeError::Indirect(VarRef::new("--primary-color")))
        );
        assert!(matches!(
            value.as_color(),
            Err(TokenTypeError::Indirect(_))
        ));
        assert_eq!(value.as_var_ref().unwrap().name(), "--primary-color");
    }

    #[test]
    fn literal_reads() {
        let color = TokenValue::literal("#ef4444");
        assert_eq!(color.as_color().unwrap(), Color::from_hex(0xEF4444));
        assert!(color.as_var_ref().is_err());

        let motion = TokenValue::literal("slideUp 0.3s ease-out");
        assert_eq!(motion.as_motion().unwrap()[0].name, "slideUp");
        assert!(matches!(
            TokenValue::literal("currentColor").as_color(),
            Err(TokenTypeError::NotAColor(_))
        ));
    }

    #[test]
    fn group_validation() {
        assert!(TokenValue::literal("#10b981")
            .validate_for(TokenGroup::Palette)
            .is_ok());
        assert!(TokenValue::literal("currentColor")
            .validate_for(TokenGroup::Palette)
            .is_ok());
        assert!(matches!(
            TokenValue::literal("#10b98").validate_for(TokenGroup::Palette),
            Err(TokenValueError::Color(_))
        ));
        assert!(TokenValue::literal("bounceIn 0.6s ease-out")
            .validate_for(TokenGroup::Motion)
            .is_ok());
        assert!(matches!(
            TokenValue::literal("#10b981").validate_for(TokenGroup::Motion),
            Err(TokenValueError::Motion(_))
        ));
        assert!(TokenValue::indirect("--fade")
            .validate_for(TokenGroup::Motion)
            .is_ok());
    }

    #[test]
    fn serializes_as_declared_string() {
        let json = serde_json::to_string(&TokenValue::indirect("--primary-color")).unwrap();
        assert_eq!(json, "\"var(--primary-color)\"");
    }
}
