//! tinct Configuration
//!
//! Loads theme-extension declarations into a single immutable [`ResolvedConfig`].
//!
//! # Overview
//!
//! - **Content scope**: [`ScopePatterns`] lists the files the generator scans;
//!   patterns are validated, never matched
//! - **Declarations**: TOML or JSON files with exactly `content` and `theme.extend`
//! - **Precedence**: sources that disagree on a token are rejected unless the
//!   caller opts into [`Precedence::Ordered`]
//! - **State**: [`ConfigState`] holds the loaded config for the rest of the run
//!
//! # Quick Start
//!
//! ```rust
//! use tinct_config::{ConfigLoader, Source};
//! use tinct_theme::TokenGroup;
//!
//! let source = Source::from_toml_str("tinct.toml", r##"
//! content = ["./templates/**/*.html", "./static/js/**/*.js", "./**/*.py"]
//!
//! [theme.extend.colors]
//! primary = "var(--primary-color)"
//! danger = "#ef4444"
//! "##).unwrap();
//!
//! let config = ConfigLoader::new().source(source).load().unwrap();
//! assert!(config.resolve(TokenGroup::Palette, "primary").unwrap().is_indirect());
//! assert!(config.resolve(TokenGroup::Palette, "red-500").is_none());
//! ```

pub mod content;
pub mod declaration;
pub mod error;
pub mod loader;
pub mod resolved;
pub mod source;
pub mod state;

pub use content::{ArtifactClass, PatternError, ScopePattern, ScopePatterns};
pub use declaration::{Declaration, Format};
pub use error::{Claim, ConfigError, Result};
pub use loader::{ConfigLoader, Precedence, Source};
pub use resolved::ResolvedConfig;
pub use source::SourceId;
pub use state::ConfigState;
