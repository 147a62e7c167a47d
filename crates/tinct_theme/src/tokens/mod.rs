//! Token declarations
//!
//! - Groups (palette, motion)
//! - Values (literal or indirect)
//! - The extension table that maps one to the other

mod group;
mod table;
mod value;

pub use group::*;
pub use table::*;
pub use value::*;
