//! Declaration provenance

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Where a declaration came from; every load error names one
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum SourceId {
    /// A declaration file on disk
    File(PathBuf),
    /// A declaration embedded in code or passed as a string
    Embedded(String),
}

impl SourceId {
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn embedded(label: impl Into<String>) -> Self {
        Self::Embedded(label.into())
    }
}

impl Display for SourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceId::File(path) => write!(f, "{}", path.display()),
            SourceId::Embedded(label) => write!(f, "<{label}>"),
        }
    }
}
