//! The loaded configuration

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tinct_theme::{ExtendedVocabulary, ExtensionTable, TokenGroup, TokenMap, TokenValue};

use crate::content::ScopePatterns;
use crate::source::SourceId;

/// A fully validated configuration, immutable once loaded.
///
/// Equality compares the content scope and the extension table; the list
/// of sources is provenance only.
#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    content: ScopePatterns,
    extend: ExtensionTable,
    sources: Vec<SourceId>,
}

impl ResolvedConfig {
    pub(crate) fn new(content: ScopePatterns, extend: ExtensionTable, sources: Vec<SourceId>) -> Self {
        Self {
            content,
            extend,
            sources,
        }
    }

    /// Paths the generator scans for style usage
    pub fn scope_patterns(&self) -> &ScopePatterns {
        &self.content
    }

    pub fn extension_table(&self) -> &ExtensionTable {
        &self.extend
    }

    /// Declared value for `name`, or `None` to fall back to the built-in
    pub fn resolve(&self, group: TokenGroup, name: &str) -> Option<&TokenValue> {
        self.extend.resolve(group, name)
    }

    pub fn all_tokens(&self, group: TokenGroup) -> &TokenMap {
        self.extend.all_tokens(group)
    }

    /// The extension table layered over the standard built-in vocabulary
    pub fn vocabulary(&self) -> ExtendedVocabulary<'_> {
        ExtendedVocabulary::standard(&self.extend)
    }

    /// Declarations this config was loaded from, in load order
    pub fn sources(&self) -> &[SourceId] {
        &self.sources
    }
}

impl PartialEq for ResolvedConfig {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content && self.extend == other.extend
    }
}

impl Eq for ResolvedConfig {}

/// Serializes back into declaration shape: `{ content, theme: { extend } }`
impl Serialize for ResolvedConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Theme<'a>(&'a ExtensionTable);

        impl Serialize for Theme<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("extend", self.0)?;
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("content", &self.content)?;
        map.serialize_entry("theme", &Theme(&self.extend))?;
        map.end()
    }
}
