//! The generator's built-in token vocabulary
//!
//! An [`crate::ExtensionTable`] only ever adds to this set. It is modelled here
//! so the fallback path ("the table says absent, use the built-in") can be
//! exercised and documented without the generator itself.

pub mod motion;
pub mod palette;

use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::tokens::TokenGroup;

static STANDARD: OnceLock<BuiltinVocabulary> = OnceLock::new();

/// Built-in `name -> literal` definitions per group
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuiltinVocabulary {
    palette: IndexMap<String, String>,
    motion: IndexMap<String, String>,
}

impl BuiltinVocabulary {
    /// An empty vocabulary (every lookup falls through)
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard generator defaults, built once per process
    pub fn standard() -> &'static BuiltinVocabulary {
        STANDARD.get_or_init(|| {
            let mut vocab = BuiltinVocabulary::default();

            for (name, value) in palette::KEYWORDS {
                vocab.insert(TokenGroup::Palette, name, value);
            }
            for (family, values) in palette::FAMILIES {
                for (shade, value) in palette::SHADES.iter().zip(values.iter()) {
                    vocab.insert(TokenGroup::Palette, format!("{family}-{shade}"), *value);
                }
            }
            for (name, value) in motion::PRESETS {
                vocab.insert(TokenGroup::Motion, name, value);
            }

            vocab
        })
    }

    /// Add or replace a built-in definition
    pub fn insert(
        &mut self,
        group: TokenGroup,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        let map = match group {
            TokenGroup::Palette => &mut self.palette,
            TokenGroup::Motion => &mut self.motion,
        };
        map.insert(name.into(), value.into());
    }

    pub fn get(&self, group: TokenGroup, name: &str) -> Option<&str> {
        self.all(group).get(name).map(|s| s.as_str())
    }

    pub fn contains(&self, group: TokenGroup, name: &str) -> bool {
        self.all(group).contains_key(name)
    }

    pub fn all(&self, group: TokenGroup) -> &IndexMap<String, String> {
        match group {
            TokenGroup::Palette => &self.palette,
            TokenGroup::Motion => &self.motion,
        }
    }
}
