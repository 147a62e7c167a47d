//! Starter declaration scaffolding

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use tinct_config::{ConfigLoader, ScopePatterns, Source};

use crate::config::DEFAULT_FILE;

const STARTER_COLORS: [(&str, &str); 6] = [
    ("primary", "#3b82f6"),
    ("secondary", "#6b7280"),
    ("accent", "#10b981"),
    ("success", "#10b981"),
    ("warning", "#f59e0b"),
    ("danger", "#ef4444"),
];

const STARTER_ANIMATIONS: [(&str, &str); 3] = [
    ("fade-in", "fadeIn 0.5s ease-in-out"),
    ("slide-up", "slideUp 0.3s ease-out"),
    ("bounce-in", "bounceIn 0.6s ease-out"),
];

#[derive(Debug, Serialize)]
struct StarterDeclaration {
    content: Vec<String>,
    theme: StarterTheme,
}

#[derive(Debug, Serialize)]
struct StarterTheme {
    extend: StarterExtend,
}

#[derive(Debug, Serialize)]
struct StarterExtend {
    colors: IndexMap<String, String>,
    animation: IndexMap<String, String>,
}

fn pairs(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl StarterDeclaration {
    fn new() -> Self {
        Self {
            content: ScopePatterns::builtin()
                .as_strs()
                .into_iter()
                .map(String::from)
                .collect(),
            theme: StarterTheme {
                extend: StarterExtend {
                    colors: pairs(&STARTER_COLORS),
                    animation: pairs(&STARTER_ANIMATIONS),
                },
            },
        }
    }

    fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize starter declaration")
    }
}

/// Write a starter `tinct.toml` into `dir`, never overwriting
pub fn init_declaration(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(DEFAULT_FILE);
    if path.exists() {
        anyhow::bail!("{} already exists; refusing to overwrite it", path.display());
    }

    fs::write(&path, StarterDeclaration::new().to_toml()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    // The starter must pass full validation
    validate_declaration(&path)
        .with_context(|| format!("Generated declaration {} is invalid", path.display()))?;

    tracing::info!("Created {}", path.display());
    Ok(path)
}

/// Parse and fully validate one declaration file: patterns, names and values
fn validate_declaration(path: &Path) -> Result<()> {
    ConfigLoader::new().source(Source::from_path(path)?).load()?;
    Ok(())
}
