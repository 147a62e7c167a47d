//! tinct core value primitives
//!
//! The small, dependency-light types every other tinct crate builds on:
//!
//! - **Colors**: [`Color`] with strict `#rgb` / `#rgba` / `#rrggbb` / `#rrggbbaa` parsing
//! - **Variable references**: [`VarRef`] for the reserved `var(--name)` wrapping
//! - **Motion shorthands**: [`MotionSpec`] and [`Easing`] for animation presets
//!   such as `fadeIn 0.5s ease-in-out`
//!
//! # Example
//!
//! ```rust
//! use tinct_core::{Color, VarRef};
//!
//! let danger = Color::parse_hex("#ef4444").unwrap();
//! assert_eq!(danger.to_hex(), "#ef4444");
//!
//! let primary = VarRef::parse("var(--primary-color)").unwrap();
//! assert_eq!(primary.name(), "--primary-color");
//! ```

pub mod color;
pub mod easing;
pub mod motion;
pub mod var_ref;

pub use color::{Color, ColorParseError};
pub use easing::Easing;
pub use motion::{IterationCount, MotionParseError, MotionSpec};
pub use var_ref::{VarRef, VarRefError};
