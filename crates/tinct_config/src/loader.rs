//! Multi-source loading
//!
//! Sources are validated one by one, then combined. Content patterns are
//! concatenated in source order. Tokens are combined according to the
//! loader's [`Precedence`].

use std::path::Path;

use rustc_hash::FxHashMap;
use tinct_theme::{ExtensionTable, TokenGroup};

use crate::declaration::Declaration;
use crate::error::{Claim, ConfigError, Result};
use crate::resolved::ResolvedConfig;
use crate::source::SourceId;

/// A parsed declaration and where it came from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    pub id: SourceId,
    pub declaration: Declaration,
}

impl Source {
    pub fn new(id: SourceId, declaration: Declaration) -> Self {
        Self { id, declaration }
    }

    /// Read a `.toml` or `.json` declaration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Ok(Self::new(SourceId::file(path), Declaration::from_path(path)?))
    }

    /// Parse an embedded TOML declaration
    pub fn from_toml_str(label: impl Into<String>, src: &str) -> Result<Self> {
        let id = SourceId::embedded(label);
        let declaration = Declaration::from_toml_str(src, &id)?;
        Ok(Self::new(id, declaration))
    }

    /// Parse an embedded JSON declaration
    pub fn from_json_str(label: impl Into<String>, src: &str) -> Result<Self> {
        let id = SourceId::embedded(label);
        let declaration = Declaration::from_json_str(src, &id)?;
        Ok(Self::new(id, declaration))
    }
}

/// How tokens declared by more than one source are combined
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Precedence {
    /// Sources must agree; differing values are an [`ConfigError::AmbiguousSource`]
    #[default]
    Exclusive,
    /// Later sources override earlier ones per `(group, name)`
    Ordered,
}

/// Builder that turns declarations into a single [`ResolvedConfig`]
#[derive(Clone, Debug, Default)]
pub struct ConfigLoader {
    precedence: Precedence,
    sources: Vec<Source>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    pub fn sources(mut self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.sources.extend(sources);
        self
    }

    /// Validate and combine all sources.
    ///
    /// Nothing is returned unless every source is valid and, under
    /// [`Precedence::Exclusive`], every shared token agrees.
    pub fn load(&self) -> Result<ResolvedConfig> {
        let Some((first, rest)) = self.sources.split_first() else {
            return Err(ConfigError::NoSources);
        };

        let mut content = first.declaration.scope(&first.id)?;
        let mut extend = first.declaration.extension_table(&first.id)?;
        let mut owners: FxHashMap<(TokenGroup, String), &SourceId> = FxHashMap::default();
        record_owners(&mut owners, &extend, &first.id);

        for source in rest {
            let scope = source.declaration.scope(&source.id)?;
            let table = source.declaration.extension_table(&source.id)?;

            if self.precedence == Precedence::Exclusive {
                check_agreement(&extend, &table, &owners, &source.id)?;
            }

            content.append(scope);
            extend.merge(&table);
            record_owners(&mut owners, &table, &source.id);
        }

        for dup in content.duplicates() {
            tracing::debug!("ConfigLoader::load - pattern `{dup}` appears in more than one place");
        }
        let missing = content.missing_coverage();
        if !missing.is_empty() {
            let missing: Vec<String> = missing.iter().map(ToString::to_string).collect();
            tracing::warn!(
                "content patterns do not cover: {} (styles used only there will not be generated)",
                missing.join(", ")
            );
        }

        let sources: Vec<SourceId> = self.sources.iter().map(|s| s.id.clone()).collect();
        tracing::debug!(
            "ConfigLoader::load - {} source(s), {} pattern(s), {} token(s), {:?}",
            sources.len(),
            content.len(),
            extend.len(),
            self.precedence
        );

        Ok(ResolvedConfig::new(content, extend, sources))
    }
}

fn record_owners<'a>(
    owners: &mut FxHashMap<(TokenGroup, String), &'a SourceId>,
    table: &ExtensionTable,
    id: &'a SourceId,
) {
    for (group, name, _) in table.iter() {
        owners.insert((group, name.to_string()), id);
    }
}

/// Fail on the first `(group, name)` in `incoming` whose value differs from `current`
fn check_agreement(
    current: &ExtensionTable,
    incoming: &ExtensionTable,
    owners: &FxHashMap<(TokenGroup, String), &SourceId>,
    incoming_id: &SourceId,
) -> Result<()> {
    for (group, name, value) in incoming.iter() {
        let Some(existing) = current.resolve(group, name) else {
            continue;
        };
        if existing == value {
            continue;
        }
        let first_origin = owners
            .get(&(group, name.to_string()))
            .map(|id| (*id).clone())
            .unwrap_or_else(|| incoming_id.clone());
        return Err(ConfigError::AmbiguousSource {
            group,
            name: name.to_string(),
            first: Claim {
                origin: first_origin,
                value: existing.clone(),
            },
            second: Claim {
                origin: incoming_id.clone(),
                value: value.clone(),
            },
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ScopePatterns;
    use tinct_theme::TokenValue;

    const BASE: &str = r##"
content = ["./templates/**/*.html", "./static/js/**/*.js", "./**/*.py"]
[theme.extend.colors]
primary = "#3b82f6"
"##;

    #[test]
    fn zero_sources_is_an_error() {
        assert!(matches!(
            ConfigLoader::new().load(),
            Err(ConfigError::NoSources)
        ));
    }

    #[test]
    fn identical_values_merge_under_exclusive() {
        let config = ConfigLoader::new()
            .source(Source::from_toml_str("a", BASE).unwrap())
            .source(Source::from_toml_str("b", BASE).unwrap())
            .load()
            .unwrap();
        assert_eq!(config.extension_table().len(), 1);
        assert_eq!(config.scope_patterns().len(), 6);
        assert_eq!(config.sources().len(), 2);
    }

    #[test]
    fn ambiguous_claims_name_both_sources() {
        let other = BASE.replace("#3b82f6", "#1e40af");
        let err = ConfigLoader::new()
            .source(Source::from_toml_str("a", BASE).unwrap())
            .source(Source::from_toml_str("b", &other).unwrap())
            .load()
            .unwrap_err();
        match err {
            ConfigError::AmbiguousSource {
                group,
                name,
                first,
                second,
            } => {
                assert_eq!(group, TokenGroup::Palette);
                assert_eq!(name, "primary");
                assert_eq!(first.origin, SourceId::embedded("a"));
                assert_eq!(first.value, TokenValue::literal("#3b82f6"));
                assert_eq!(second.origin, SourceId::embedded("b"));
                assert_eq!(second.value, TokenValue::literal("#1e40af"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn builtin_scope_covers_every_class() {
        assert!(ScopePatterns::builtin().missing_coverage().is_empty());
    }
}
