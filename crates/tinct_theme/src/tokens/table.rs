//! The token extension table

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::tokens::{TokenGroup, TokenValue};

/// Ordered `name -> value` mapping for one group
pub type TokenMap = IndexMap<String, TokenValue>;

/// Tokens declared on top of the generator's built-in vocabulary.
///
/// Every entry extends the vocabulary; nothing here removes a built-in. A name
/// that collides with a built-in shadows it for consumers of the extended
/// vocabulary only. Entries keep their declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtensionTable {
    palette: TokenMap,
    motion: TokenMap,
}

impl ExtensionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a declared token.
    ///
    /// `None` means the table does not declare `name`, and the caller should use
    /// its own built-in definition.
    pub fn resolve(&self, group: TokenGroup, name: &str) -> Option<&TokenValue> {
        self.all_tokens(group).get(name)
    }

    /// Every token declared in `group`, in declaration order
    pub fn all_tokens(&self, group: TokenGroup) -> &TokenMap {
        match group {
            TokenGroup::Palette => &self.palette,
            TokenGroup::Motion => &self.motion,
        }
    }

    fn tokens_mut(&mut self, group: TokenGroup) -> &mut TokenMap {
        match group {
            TokenGroup::Palette => &mut self.palette,
            TokenGroup::Motion => &mut self.motion,
        }
    }

    /// Declare a token, returning the value it replaced (if any).
    ///
    /// A replaced name keeps its original position.
    pub fn insert(
        &mut self,
        group: TokenGroup,
        name: impl Into<String>,
        value: TokenValue,
    ) -> Option<TokenValue> {
        self.tokens_mut(group).insert(name.into(), value)
    }

    /// Layer `other` over `self`: last declared wins per `(group, name)`.
    ///
    /// Groups `other` does not mention are left untouched; a group is never
    /// replaced wholesale.
    pub fn merge(&mut self, other: &ExtensionTable) {
        for (group, name, value) in other.iter() {
            if let Some(previous) = self.insert(group, name, value.clone()) {
                if previous != *value {
                    tracing::debug!(
                        "ExtensionTable::merge - {group}.{name}: {previous} -> {value}"
                    );
                }
            }
        }
    }

    /// Iterate all `(group, name, value)` entries, palette first
    pub fn iter(&self) -> impl Iterator<Item = (TokenGroup, &str, &TokenValue)> {
        TokenGroup::all().iter().flat_map(move |group| {
            self.all_tokens(*group)
                .iter()
                .map(move |(name, value)| (*group, name.as_str(), value))
        })
    }

    /// Number of declared tokens across all groups
    pub fn len(&self) -> usize {
        self.palette.len() + self.motion.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of indirect tokens across all groups
    pub fn indirect_count(&self) -> usize {
        self.iter().filter(|(_, _, v)| v.is_indirect()).count()
    }
}

/// Serializes in declaration shape: `{ "colors": {..}, "animation": {..} }`
impl Serialize for ExtensionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let groups: Vec<_> = TokenGroup::all()
            .iter()
            .filter(|g| !self.all_tokens(**g).is_empty())
            .collect();
        let mut map = serializer.serialize_map(Some(groups.len()))?;
        for group in groups {
            map.serialize_entry(group.key(), self.all_tokens(*group))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(entries: &[(TokenGroup, &str, &str)]) -> ExtensionTable {
        let mut t = ExtensionTable::new();
        for (group, name, raw) in entries {
            t.insert(*group, *name, TokenValue::classify(raw).unwrap());
        }
        t
    }

    #[test]
    fn resolve_returns_declared_or_absent() {
        let t = table(&[(TokenGroup::Palette, "danger", "#ef4444")]);
        assert_eq!(
            t.resolve(TokenGroup::Palette, "danger"),
            Some(&TokenValue::literal("#ef4444"))
        );
        assert_eq!(t.resolve(TokenGroup::Palette, "success"), None);
        assert_eq!(t.resolve(TokenGroup::Motion, "danger"), None);
    }

    #[test]
    fn merge_is_last_wins_per_name() {
        let mut base = table(&[
            (TokenGroup::Palette, "secondary", "#6b7280"),
            (TokenGroup::Palette, "accent", "#10b981"),
            (TokenGroup::Motion, "fade-in", "fadeIn 0.5s ease-in-out"),
        ]);
        let overlay = table(&[(TokenGroup::Palette, "secondary", "#3b82f6")]);

        base.merge(&overlay);

        assert_eq!(
            base.resolve(TokenGroup::Palette, "secondary"),
            Some(&TokenValue::literal("#3b82f6"))
        );
        // Untouched names and groups survive.
        assert_eq!(
            base.resolve(TokenGroup::Palette, "accent"),
            Some(&TokenValue::literal("#10b981"))
        );
        assert_eq!(base.all_tokens(TokenGroup::Motion).len(), 1);
    }

    #[test]
    fn insert_keeps_declaration_order() {
        let mut t = table(&[
            (TokenGroup::Palette, "primary", "#3b82f6"),
            (TokenGroup::Palette, "secondary", "#6b7280"),
        ]);
        t.insert(TokenGroup::Palette, "primary", TokenValue::literal("#000"));
        let names: Vec<_> = t.all_tokens(TokenGroup::Palette).keys().cloned().collect();
        assert_eq!(names, vec!["primary".to_string(), "secondary".to_string()]);
    }

    #[test]
    fn iter_and_counts() {
        let t = table(&[
            (TokenGroup::Motion, "fade-in", "fadeIn 0.5s"),
            (TokenGroup::Palette, "primary", "var(--primary-color)"),
        ]);
        let groups: Vec<_> = t.iter().map(|(g, n, _)| (g, n)).collect();
        assert_eq!(
            groups,
            vec![
                (TokenGroup::Palette, "primary"),
                (TokenGroup::Motion, "fade-in")
            ]
        );
        assert_eq!(t.len(), 2);
        assert_eq!(t.indirect_count(), 1);
    }

    #[test]
    fn serializes_in_declaration_shape() {
        let t = table(&[(TokenGroup::Palette, "primary", "var(--primary-color)")]);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "colors": { "primary": "var(--primary-color)" } })
        );
    }
}
