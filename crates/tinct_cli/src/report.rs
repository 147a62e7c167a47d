//! Human and machine readable output

use std::fmt::Write;

use anyhow::{Context, Result};
use tinct_config::ResolvedConfig;
use tinct_theme::{ReferenceRow, TokenGroup};

/// Summary printed by `tinct check`
pub fn summary(config: &ResolvedConfig) -> String {
    let scope = config.scope_patterns();
    let table = config.extension_table();
    let mut out = String::new();

    let sources: Vec<String> = config.sources().iter().map(ToString::to_string).collect();
    let _ = writeln!(out, "sources: {}", sources.join(", "));

    let _ = writeln!(out, "content ({} patterns):", scope.len());
    for pattern in scope.iter() {
        let _ = writeln!(out, "  {}", pattern.as_str());
    }
    for dup in scope.duplicates() {
        let _ = writeln!(out, "  note: `{dup}` is listed more than once");
    }
    for class in scope.missing_coverage() {
        let _ = writeln!(out, "  warning: no pattern covers {class}");
    }

    for group in TokenGroup::all() {
        let tokens = config.all_tokens(*group);
        let indirect = tokens.values().filter(|v| v.is_indirect()).count();
        let _ = writeln!(
            out,
            "{}: {} token(s), {} indirect",
            group.display_name(),
            tokens.len(),
            indirect
        );
    }
    let _ = writeln!(out, "ok: {} token(s) extend the built-ins", table.len());
    out
}

/// Token reference rows for the requested groups
pub fn reference(config: &ResolvedConfig, group: Option<TokenGroup>) -> Vec<ReferenceRow> {
    let vocab = config.vocabulary();
    let groups: Vec<TokenGroup> = match group {
        Some(group) => vec![group],
        None => TokenGroup::all().to_vec(),
    };
    groups
        .into_iter()
        .flat_map(|group| vocab.reference(group))
        .collect()
}

pub fn reference_text(rows: &[ReferenceRow]) -> String {
    let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for row in rows {
        let marker = if row.shadows_builtin { " (shadows built-in)" } else { "" };
        let _ = writeln!(
            out,
            "{:<7} {:<width$}  {:<9} {}{}",
            row.group.display_name(),
            row.name,
            row.origin.to_string(),
            row.value,
            marker,
        );
    }
    out
}

pub fn reference_json(rows: &[ReferenceRow]) -> Result<String> {
    serde_json::to_string_pretty(rows).context("Failed to serialize token reference")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinct_config::{ConfigLoader, Source};
    use tinct_theme::TokenOrigin;

    fn config() -> ResolvedConfig {
        ConfigLoader::new()
            .source(
                Source::from_toml_str(
                    "tinct.toml",
                    r##"
content = ["./**/*.py"]
[theme.extend.colors]
primary = "var(--primary-color)"
white = "#fafafa"
"##,
                )
                .unwrap(),
            )
            .load()
            .unwrap()
    }

    #[test]
    fn summary_mentions_coverage_gaps() {
        let text = summary(&config());
        assert!(text.contains("content (1 patterns):"));
        assert!(text.contains("warning: no pattern covers markup templates"));
        assert!(text.contains("palette: 2 token(s), 1 indirect"));
    }

    #[test]
    fn reference_lists_extension_and_builtins() {
        let rows = reference(&config(), Some(TokenGroup::Palette));
        assert!(rows.iter().all(|r| r.group == TokenGroup::Palette));
        assert!(rows
            .iter()
            .any(|r| r.name == "primary" && r.origin == TokenOrigin::Extension));
        assert!(rows.iter().any(|r| r.name == "blue-500" && r.origin == TokenOrigin::Builtin));

        let text = reference_text(&rows);
        assert!(text.contains("(shadows built-in)"));

        let json: serde_json::Value = serde_json::from_str(&reference_json(&rows).unwrap()).unwrap();
        assert_eq!(json[0]["group"], "palette");
    }
}
