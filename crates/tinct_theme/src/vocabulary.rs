//! Extended vocabulary: extension table layered over the built-ins
//!
//! This is the consumer's view. A name declared in the extension table shadows
//! the built-in of the same name; anything else falls back to the built-in
//! definition unchanged.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::builtin::BuiltinVocabulary;
use crate::tokens::{ExtensionTable, TokenGroup, TokenValue};

/// Where a vocabulary entry came from
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenOrigin {
    Extension,
    Builtin,
}

impl Display for TokenOrigin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TokenOrigin::Extension => "extension",
            TokenOrigin::Builtin => "builtin",
        })
    }
}

/// One resolved vocabulary entry, borrowed from its source
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VocabularyEntry<'a> {
    Extension(&'a TokenValue),
    Builtin(&'a str),
}

impl<'a> VocabularyEntry<'a> {
    pub fn origin(&self) -> TokenOrigin {
        match self {
            VocabularyEntry::Extension(_) => TokenOrigin::Extension,
            VocabularyEntry::Builtin(_) => TokenOrigin::Builtin,
        }
    }

    /// The entry as a token value (built-ins are always literal)
    pub fn to_value(&self) -> TokenValue {
        match self {
            VocabularyEntry::Extension(value) => (*value).clone(),
            VocabularyEntry::Builtin(value) => TokenValue::literal(*value),
        }
    }
}

impl Display for VocabularyEntry<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VocabularyEntry::Extension(value) => Display::fmt(value, f),
            VocabularyEntry::Builtin(value) => f.write_str(value),
        }
    }
}

/// Row of a token reference listing
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReferenceRow {
    pub group: TokenGroup,
    pub name: String,
    pub value: String,
    pub origin: TokenOrigin,
    /// True when an extension entry hides a built-in of the same name
    pub shadows_builtin: bool,
}

/// A built-in vocabulary extended by a declared table
#[derive(Clone, Copy, Debug)]
pub struct ExtendedVocabulary<'a> {
    builtin: &'a BuiltinVocabulary,
    table: &'a ExtensionTable,
}

impl<'a> ExtendedVocabulary<'a> {
    pub fn new(builtin: &'a BuiltinVocabulary, table: &'a ExtensionTable) -> Self {
        Self { builtin, table }
    }

    /// Extend the standard generator defaults
    pub fn standard(table: &'a ExtensionTable) -> Self {
        Self::new(BuiltinVocabulary::standard(), table)
    }

    /// Extension entry if declared, otherwise the built-in
    pub fn lookup(&self, group: TokenGroup, name: &str) -> Option<VocabularyEntry<'a>> {
        if let Some(value) = self.table.resolve(group, name) {
            return Some(VocabularyEntry::Extension(value));
        }
        self.builtin
            .get(group, name)
            .map(VocabularyEntry::Builtin)
    }

    /// True if `name` is declared in the table and also exists as a built-in
    pub fn is_shadowed(&self, group: TokenGroup, name: &str) -> bool {
        self.table.resolve(group, name).is_some() && self.builtin.contains(group, name)
    }

    /// Every name in `group`: built-ins first in their order, then extension-only names
    pub fn names(&self, group: TokenGroup) -> Vec<&'a str> {
        let builtin = self.builtin.all(group).keys().map(|k| k.as_str());
        let added = self
            .table
            .all_tokens(group)
            .keys()
            .map(|k| k.as_str())
            .filter(|k| !self.builtin.contains(group, k));
        builtin.chain(added).collect()
    }

    /// A reference listing of `group`, suitable for documentation output
    pub fn reference(&self, group: TokenGroup) -> Vec<ReferenceRow> {
        self.names(group)
            .into_iter()
            .filter_map(|name| {
                self.lookup(group, name).map(|entry| ReferenceRow {
                    group,
                    name: name.to_string(),
                    value: entry.to_string(),
                    origin: entry.origin(),
                    shadows_builtin: self.is_shadowed(group, name),
                })
            })
            .collect()
    }
}
