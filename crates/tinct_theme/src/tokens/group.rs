//! Token groups

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The closed set of token groups an extension table may declare
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenGroup {
    /// Color tokens, declared under `theme.extend.colors`
    Palette,
    /// Animation presets, declared under `theme.extend.animation`
    Motion,
}

impl TokenGroup {
    /// Key used for this group under `theme.extend`
    pub fn key(self) -> &'static str {
        match self {
            Self::Palette => "colors",
            Self::Motion => "animation",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Palette => "palette",
            Self::Motion => "motion",
        }
    }

    /// Map a `theme.extend` key back to its group
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|g| g.key() == key)
    }

    /// Full group list, in declaration order.
    pub fn all() -> &'static [TokenGroup] {
        const GROUPS: [TokenGroup; 2] = [TokenGroup::Palette, TokenGroup::Motion];
        &GROUPS
    }
}

impl Display for TokenGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for group in TokenGroup::all() {
            assert_eq!(TokenGroup::from_key(group.key()), Some(*group));
        }
        assert_eq!(TokenGroup::from_key("spacing"), None);
    }
}
