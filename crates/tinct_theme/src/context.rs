//! Render-time variable contexts
//!
//! Indirect tokens are resolved here, strictly after configuration load. The
//! same [`crate::ExtensionTable`] can be rendered against several contexts
//! (light/dark, per-site settings) without being reloaded.

use std::borrow::Cow;

use rustc_hash::FxHashMap;
use tinct_core::{Color, VarRef};

use crate::error::RenderError;
use crate::tokens::TokenValue;

/// Site-settings colors and their defaults, exposed as `--<name>` variables
const SITE_SETTINGS: [(&str, &str); 8] = [
    ("--primary-color", "#1e40af"),
    ("--header-color", "#ffffff"),
    ("--footer-color", "#1f2937"),
    ("--accent-color", "#fbbf24"),
    ("--header-text-color", "#1f2937"),
    ("--sidebar-text-color", "#ffffff"),
    ("--sidebar-color", "#1e40af"),
    ("--top-nav-text-color", "#1f2937"),
];

/// A named set of runtime variable values
#[derive(Clone, Debug, Default)]
pub struct VariableContext {
    name: String,
    variables: FxHashMap<String, String>,
}

impl VariableContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: FxHashMap::default(),
        }
    }

    /// Context seeded with the default site-settings colors
    pub fn site_settings() -> Self {
        let mut ctx = Self::new("site-settings");
        for (name, value) in SITE_SETTINGS {
            ctx.set(name, value);
        }
        ctx
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a variable; the `--` prefix is added when missing
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.variables.insert(normalize(name.as_ref()), value.into());
    }

    /// Set a variable that must be a `#RRGGBB` color
    pub fn set_color(&mut self, name: impl AsRef<str>, hex: &str) -> Result<(), RenderError> {
        let name = normalize(name.as_ref());
        let hex = hex.trim();
        let color = Color::parse_hex(hex).map_err(|source| RenderError::InvalidColor {
            value: hex.to_string(),
            source,
        })?;
        if hex.len() != 7 {
            return Err(RenderError::NotSixDigitHex {
                name,
                value: hex.to_string(),
            });
        }
        self.variables.insert(name, color.to_hex());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(&normalize(name)).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Resolve a reference: the variable, else its fallback
    pub fn resolve_ref<'a>(&'a self, var: &'a VarRef) -> Result<&'a str, RenderError> {
        self.variables
            .get(var.name())
            .map(|s| s.as_str())
            .or_else(|| var.fallback())
            .ok_or_else(|| RenderError::UnresolvedVariable {
                context: self.name.clone(),
                name: var.name().to_string(),
            })
    }

    /// Concrete string for a token value in this context
    pub fn render<'a>(&'a self, value: &'a TokenValue) -> Result<Cow<'a, str>, RenderError> {
        match value {
            TokenValue::Literal(literal) => Ok(Cow::Borrowed(literal)),
            TokenValue::Indirect(var) => {
                let resolved = self.resolve_ref(var)?;
                tracing::trace!("{}: {} -> {}", self.name, var, resolved);
                Ok(Cow::Borrowed(resolved))
            }
        }
    }

    /// Render a palette token and parse it as a hex color
    pub fn render_color(&self, value: &TokenValue) -> Result<Color, RenderError> {
        let rendered = self.render(value)?;
        Color::parse_hex(&rendered).map_err(|source| RenderError::InvalidColor {
            value: rendered.into_owned(),
            source,
        })
    }
}

fn normalize(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") {
        name.to_string()
    } else {
        format!("--{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_token_renders_per_context() {
        let token = TokenValue::indirect("--primary-color");

        let mut light = VariableContext::new("light");
        light.set("--primary-color", "#3b82f6");
        let mut dark = VariableContext::new("dark");
        dark.set("primary-color", "#60a5fa");

        assert_eq!(light.render(&token).unwrap(), "#3b82f6");
        assert_eq!(dark.render(&token).unwrap(), "#60a5fa");
        assert_ne!(
            light.render_color(&token).unwrap(),
            dark.render_color(&token).unwrap()
        );
    }

    #[test]
    fn literals_pass_through() {
        let ctx = VariableContext::new("empty");
        let token = TokenValue::literal("#ef4444");
        assert_eq!(ctx.render(&token).unwrap(), "#ef4444");
    }

    #[test]
    fn fallback_then_error() {
        let ctx = VariableContext::new("empty");
        let with_fallback =
            TokenValue::Indirect(VarRef::new("--accent").with_fallback("#10b981"));
        assert_eq!(ctx.render(&with_fallback).unwrap(), "#10b981");

        let bare = TokenValue::indirect("--accent");
        assert_eq!(
            ctx.render(&bare),
            Err(RenderError::UnresolvedVariable {
                context: "empty".into(),
                name: "--accent".into()
            })
        );
    }

    #[test]
    fn site_settings_colors_are_strict_hex() {
        let mut ctx = VariableContext::site_settings();
        assert_eq!(ctx.get("primary-color"), Some("#1e40af"));
        assert_eq!(ctx.len(), 8);

        ctx.set_color("primary-color", "#DC2626").unwrap();
        assert_eq!(ctx.get("--primary-color"), Some("#dc2626"));

        assert!(matches!(
            ctx.set_color("primary-color", "#fff"),
            Err(RenderError::NotSixDigitHex { .. })
        ));
        assert!(matches!(
            ctx.set_color("primary-color", "red"),
            Err(RenderError::InvalidColor { .. })
        ));
        // Failed writes leave the previous value.
        assert_eq!(ctx.get("--primary-color"), Some("#dc2626"));
    }
}
