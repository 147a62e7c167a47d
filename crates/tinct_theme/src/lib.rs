//! tinct Theme Tokens
//!
//! The token extension table and the vocabulary it extends.
//!
//! # Overview
//!
//! - **Token groups**: a closed set, [`TokenGroup::Palette`] and [`TokenGroup::Motion`]
//! - **Token values**: [`TokenValue::Literal`] or [`TokenValue::Indirect`], decided once
//!   when the value is declared and never re-inspected downstream
//! - **Extension table**: [`ExtensionTable`] answers `resolve(group, name)`; `None`
//!   means "use the generator's built-in"
//! - **Built-in vocabulary**: [`BuiltinVocabulary`] models the generator defaults the
//!   table extends, and [`ExtendedVocabulary`] layers one over the other
//! - **Render-time variables**: [`VariableContext`] resolves indirect tokens long after
//!   configuration load
//!
//! # Quick Start
//!
//! ```rust
//! use tinct_theme::{ExtensionTable, TokenGroup, TokenValue, VariableContext};
//!
//! let mut table = ExtensionTable::new();
//! table.insert(TokenGroup::Palette, "primary", TokenValue::classify("var(--primary-color)").unwrap());
//!
//! // Indirect values pass through untouched...
//! let primary = table.resolve(TokenGroup::Palette, "primary").unwrap();
//! assert!(primary.is_indirect());
//!
//! // ...until a rendering context supplies the variable.
//! let mut dark = VariableContext::new("dark");
//! dark.set("--primary-color", "#60a5fa");
//! assert_eq!(dark.render(primary).unwrap(), "#60a5fa");
//! ```

pub mod builtin;
pub mod context;
pub mod error;
pub mod tokens;
pub mod vocabulary;

pub use builtin::BuiltinVocabulary;
pub use context::VariableContext;
pub use error::{RenderError, TokenTypeError, TokenValueError};
pub use tokens::*;
pub use vocabulary::{ExtendedVocabulary, ReferenceRow, TokenOrigin, VocabularyEntry};
