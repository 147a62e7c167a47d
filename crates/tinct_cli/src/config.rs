//! Declaration file discovery and loading

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use tinct_config::{ConfigLoader, Precedence, ResolvedConfig, Source};

/// Declaration file looked up when a directory is given
pub const DEFAULT_FILE: &str = "tinct.toml";

/// Map each argument to a declaration file; directories resolve to `tinct.toml`
pub fn declaration_paths(args: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let args: Vec<&Path> = if args.is_empty() {
        vec![Path::new(".")]
    } else {
        args.iter().map(PathBuf::as_path).collect()
    };

    args.into_iter()
        .map(|arg| {
            let path = if arg.is_dir() {
                arg.join(DEFAULT_FILE)
            } else {
                arg.to_path_buf()
            };
            if !path.exists() {
                anyhow::bail!(
                    "No declaration found at {}. Run `tinct init` to create one.",
                    path.display()
                );
            }
            Ok(path)
        })
        .collect()
}

/// Load and combine the declarations at `args`
pub fn load(args: &[PathBuf], ordered: bool) -> Result<ResolvedConfig> {
    let paths = declaration_paths(args)?;
    let precedence = if ordered {
        Precedence::Ordered
    } else {
        Precedence::Exclusive
    };

    let mut loader = ConfigLoader::new().precedence(precedence);
    for path in &paths {
        let source = Source::from_path(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        loader = loader.source(source);
    }

    let names: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    loader
        .load()
        .with_context(|| format!("Invalid configuration in {}", names.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn directories_resolve_to_the_default_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_FILE), "content = [\"./**/*.py\"]\n").unwrap();

        let paths = declaration_paths(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(paths, vec![dir.path().join(DEFAULT_FILE)]);

        let config = load(&paths, false).unwrap();
        assert_eq!(config.scope_patterns().len(), 1);
    }

    #[test]
    fn missing_declaration_suggests_init() {
        let dir = tempfile::tempdir().unwrap();
        let err = declaration_paths(&[dir.path().to_path_buf()]).unwrap_err();
        assert!(err.to_string().contains("tinct init"));
    }

    #[test]
    fn conflicts_need_ordered() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.toml");
        let b = dir.path().join("b.json");
        fs::write(
            &a,
            "content = [\"./**/*.py\"]\n[theme.extend.colors]\nprimary = \"#3b82f6\"\n",
        )
        .unwrap();
        fs::write(
            &b,
            r#"{ "content": ["./**/*.py"], "theme": { "extend": { "colors": { "primary": "var(--primary-color)" } } } }"#,
        )
        .unwrap();

        let files = vec![a, b];
        assert!(load(&files, false).is_err());
        assert!(load(&files, true).is_ok());
    }
}
