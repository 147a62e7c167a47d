//! Declaration files
//!
//! A declaration has exactly two top-level fields:
//!
//! ```toml
//! content = ["./templates/**/*.html", "./static/js/**/*.js", "./**/*.py"]
//!
//! [theme.extend.colors]
//! primary = "var(--primary-color)"
//! danger = "#ef4444"
//!
//! [theme.extend.animation]
//! fade-in = "fadeIn 0.5s ease-in-out"
//! ```
//!
//! JSON declarations have the same shape. Token maps are read entry by entry,
//! so a JSON object that repeats a key is seen as two declarations rather than
//! silently collapsed into one.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tinct_theme::{ExtensionTable, TokenGroup, TokenValue};

use crate::content::ScopePatterns;
use crate::error::{ConfigError, Result};
use crate::source::SourceId;

/// Shade key that maps to the bare token name
const DEFAULT_SHADE: &str = "DEFAULT";

/// Map entries in document order, duplicates kept
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entries<V>(pub Vec<(String, V)>);

impl<V> Default for Entries<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = Entries<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of named entries")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// A declared token value before classification
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// `primary = "#3b82f6"`
    Flat(String),
    /// `primary = { 50 = "...", DEFAULT = "..." }`
    Shades(Entries<String>),
}

/// `theme` table; only `extend` is accepted
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeDeclaration {
    #[serde(default)]
    pub extend: Entries<Entries<RawValue>>,
}

/// One parsed declaration, not yet validated
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Declaration {
    pub content: Vec<String>,
    #[serde(default)]
    pub theme: ThemeDeclaration,
}

/// Supported declaration file formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(Format::Toml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

impl Declaration {
    pub fn from_toml_str(src: &str, origin: &SourceId) -> Result<Self> {
        toml::from_str(src).map_err(|e| ConfigError::Parse {
            origin: origin.clone(),
            message: e.to_string(),
        })
    }

    pub fn from_json_str(src: &str, origin: &SourceId) -> Result<Self> {
        serde_json::from_str(src).map_err(|e| ConfigError::Parse {
            origin: origin.clone(),
            message: e.to_string(),
        })
    }

    pub fn parse(src: &str, format: Format, origin: &SourceId) -> Result<Self> {
        match format {
            Format::Toml => Self::from_toml_str(src, origin),
            Format::Json => Self::from_json_str(src, origin),
        }
    }

    /// Read a `.toml` or `.json` declaration file
    pub fn from_path(path: &Path) -> Result<Self> {
        let format = Format::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Declaration::from_path - read {} ({:?})", path.display(), format);
        Self::parse(&src, format, &SourceId::file(path))
    }

    /// Validate the content patterns
    pub fn scope(&self, origin: &SourceId) -> Result<ScopePatterns> {
        ScopePatterns::new(&self.content, origin)
    }

    /// Validate and classify every token into an [`ExtensionTable`].
    ///
    /// Fails on an unknown group, a malformed name or value, or a token
    /// declared twice with different values. Re-declaring the same value is
    /// only logged.
    pub fn extension_table(&self, origin: &SourceId) -> Result<ExtensionTable> {
        let mut table = ExtensionTable::new();
        let mut seen: IndexMap<(TokenGroup, String), TokenValue> = IndexMap::new();

        for (group_key, tokens) in &self.theme.extend.0 {
            let group = TokenGroup::from_key(group_key).ok_or_else(|| ConfigError::UnknownGroup {
                group: group_key.clone(),
                origin: origin.clone(),
            })?;

            for (name, raw) in &tokens.0 {
                for (flat_name, raw_value) in flatten(group, name, raw, origin)? {
                    if !is_valid_name(&flat_name) {
                        return Err(ConfigError::InvalidTokenName {
                            group,
                            name: flat_name,
                            origin: origin.clone(),
                        });
                    }

                    let value = classify(group, &flat_name, raw_value, origin)?;
                    let key = (group, flat_name);
                    if let Some(first) = seen.get(&key) {
                        if *first != value {
                            return Err(ConfigError::DuplicateToken {
                                group,
                                name: key.1,
                                first: first.clone(),
                                second: value,
                                origin: origin.clone(),
                            });
                        }
                        tracing::warn!(
                            "{origin}: {group}.{} is declared more than once with the same value",
                            key.1
                        );
                        continue;
                    }

                    table.insert(group, key.1.clone(), value.clone());
                    seen.insert(key, value);
                }
            }
        }

        Ok(table)
    }
}

/// Expand shade tables into `name-shade` entries; `DEFAULT` becomes `name`
fn flatten<'a>(
    group: TokenGroup,
    name: &'a str,
    raw: &'a RawValue,
    origin: &SourceId,
) -> Result<Vec<(String, &'a str)>> {
    match raw {
        RawValue::Flat(value) => Ok(vec![(name.to_string(), value.as_str())]),
        RawValue::Shades(_) if group != TokenGroup::Palette => Err(ConfigError::InvalidToken {
            group,
            name: name.to_string(),
            reason: "nested values are only allowed for colors".to_string(),
            origin: origin.clone(),
        }),
        RawValue::Shades(shades) if shades.0.is_empty() => Err(ConfigError::InvalidToken {
            group,
            name: name.to_string(),
            reason: "shade table is empty".to_string(),
            origin: origin.clone(),
        }),
        RawValue::Shades(shades) => Ok(shades
            .0
            .iter()
            .map(|(shade, value)| {
                let flat = if shade == DEFAULT_SHADE {
                    name.to_string()
                } else {
                    format!("{name}-{shade}")
                };
                (flat, value.as_str())
            })
            .collect()),
    }
}

fn classify(group: TokenGroup, name: &str, raw: &str, origin: &SourceId) -> Result<TokenValue> {
    let invalid = |reason: String| ConfigError::InvalidToken {
        group,
        name: name.to_string(),
        reason,
        origin: origin.clone(),
    };
    let value = TokenValue::classify(raw).map_err(|e| invalid(e.to_string()))?;
    value
        .validate_for(group)
        .map_err(|e| invalid(e.to_string()))?;
    Ok(value)
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
}
