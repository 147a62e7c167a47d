//! Content scope declarations
//!
//! Content patterns tell the generator which files may reference tokens. They
//! are validated syntactically here; nothing touches the filesystem.
//!
//! The grammar is the generator's: `*`, `**`, `?`, `[...]` classes, `{a,b}`
//! alternatives, and a leading `!` for exclusions.

use std::collections::{BTreeSet, HashSet};
use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::error::{ConfigError, Result};
use crate::source::SourceId;

/// Upper bound on `{a,b}` expansion per pattern
const MAX_ALTERNATIVES: usize = 256;

/// Patterns every project starts from: templates, client scripts, server sources
const BUILTIN_PATTERNS: [&str; 4] = [
    "./templates/**/*.html",
    "./*/templates/**/*.html",
    "./static/js/**/*.js",
    "./**/*.py",
];

const MARKUP_EXTENSIONS: [&str; 18] = [
    "html", "htm", "xhtml", "jinja", "jinja2", "j2", "djhtml", "hbs", "handlebars", "mustache",
    "twig", "njk", "liquid", "vue", "svelte", "astro", "md", "mdx",
];
const CLIENT_SCRIPT_EXTENSIONS: [&str; 8] = ["js", "mjs", "cjs", "jsx", "ts", "tsx", "mts", "cts"];
const SERVER_SOURCE_EXTENSIONS: [&str; 11] = [
    "py", "rb", "php", "go", "rs", "java", "kt", "cs", "ex", "exs", "erb",
];

/// The kinds of source artifact that can reference tokens
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactClass {
    Markup,
    ClientScript,
    ServerSource,
    Other,
}

impl ArtifactClass {
    /// Classes a complete declaration is expected to cover
    pub fn required() -> &'static [ArtifactClass] {
        const REQUIRED: [ArtifactClass; 3] = [
            ArtifactClass::Markup,
            ArtifactClass::ClientScript,
            ArtifactClass::ServerSource,
        ];
        &REQUIRED
    }

    fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        if MARKUP_EXTENSIONS.contains(&ext.as_str()) {
            ArtifactClass::Markup
        } else if CLIENT_SCRIPT_EXTENSIONS.contains(&ext.as_str()) {
            ArtifactClass::ClientScript
        } else if SERVER_SOURCE_EXTENSIONS.contains(&ext.as_str()) {
            ArtifactClass::ServerSource
        } else {
            ArtifactClass::Other
        }
    }
}

impl Display for ArtifactClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ArtifactClass::Markup => "markup templates",
            ArtifactClass::ClientScript => "client-side scripts",
            ArtifactClass::ServerSource => "server-side sources",
            ArtifactClass::Other => "other files",
        })
    }
}

/// Why a single pattern was rejected
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("pattern has leading or trailing whitespace")]
    SurroundingWhitespace,

    #[error("unbalanced `{0}`")]
    Unbalanced(char),

    #[error("empty `{{}}` alternative set")]
    EmptyAlternatives,

    #[error("expands to more than {} alternatives", MAX_ALTERNATIVES)]
    TooManyAlternatives,

    #[error("{0}")]
    Glob(String),
}

/// One validated content pattern
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct ScopePattern {
    raw: String,
    exclusion: bool,
    alternatives: Vec<String>,
}

impl ScopePattern {
    /// Validate one pattern against the generator grammar.
    pub fn parse(raw: &str) -> std::result::Result<Self, PatternError> {
        if raw.trim().is_empty() {
            return Err(PatternError::Empty);
        }
        if raw.trim() != raw {
            return Err(PatternError::SurroundingWhitespace);
        }

        let (exclusion, body) = match raw.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        if body.is_empty() {
            return Err(PatternError::Empty);
        }

        check_balanced(body)?;
        let alternatives = expand_braces(body)?;
        for alt in &alternatives {
            glob::Pattern::new(alt).map_err(|e| PatternError::Glob(e.to_string()))?;
        }

        Ok(Self {
            raw: raw.to_string(),
            exclusion,
            alternatives,
        })
    }

    /// The pattern as declared
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// True for `!`-prefixed patterns, which remove files from the scope
    pub fn is_exclusion(&self) -> bool {
        self.exclusion
    }

    /// The pattern with `{a,b}` groups expanded (without the `!` prefix)
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// Artifact classes this pattern can match, judged by file extension
    pub fn classes(&self) -> BTreeSet<ArtifactClass> {
        self.alternatives
            .iter()
            .map(|alt| {
                let file = alt.rsplit('/').next().unwrap_or(alt);
                match file.rsplit_once('.') {
                    Some((_, ext)) if is_plain_extension(ext) => ArtifactClass::from_extension(ext),
                    _ => ArtifactClass::Other,
                }
            })
            .collect()
    }
}

impl Display for ScopePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// The ordered, non-empty set of content patterns.
///
/// Matching is a union, so order only matters for reproducible output.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScopePatterns {
    patterns: Vec<ScopePattern>,
}

impl ScopePatterns {
    /// Validate declared patterns. Textual duplicates are reported with a warning,
    /// not rejected; the generator de-duplicates matched files itself.
    pub fn new<I, S>(raw: I, origin: &SourceId) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns = Vec::new();
        for pattern in raw {
            let pattern = pattern.as_ref();
            let parsed = ScopePattern::parse(pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
                origin: origin.clone(),
            })?;
            patterns.push(parsed);
        }

        if patterns.is_empty() {
            return Err(ConfigError::InvalidPattern {
                pattern: String::new(),
                reason: "no content patterns declared".to_string(),
                origin: origin.clone(),
            });
        }

        let scope = Self { patterns };
        scope.warn_duplicates(origin);
        Ok(scope)
    }

    /// The statically declared default scope
    pub fn builtin() -> Self {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .map(|raw| ScopePattern {
                raw: raw.to_string(),
                exclusion: false,
                alternatives: vec![raw.to_string()],
            })
            .collect();
        Self { patterns }
    }

    /// Append another declaration's patterns, keeping order
    pub fn append(&mut self, other: ScopePatterns) {
        self.patterns.extend(other.patterns);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScopePattern> {
        self.patterns.iter()
    }

    pub fn as_strs(&self) -> Vec<&str> {
        self.patterns.iter().map(ScopePattern::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Patterns that appear more than once, each listed once in first-seen order
    pub fn duplicates(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut dups = Vec::new();
        for pattern in &self.patterns {
            let raw = pattern.as_str();
            if !seen.insert(raw) && reported.insert(raw) {
                dups.push(raw);
            }
        }
        dups
    }

    pub(crate) fn warn_duplicates(&self, origin: &SourceId) {
        for dup in self.duplicates() {
            tracing::warn!("{origin}: content pattern `{dup}` is declared more than once");
        }
    }

    /// Artifact classes covered by the inclusion patterns
    pub fn coverage(&self) -> BTreeSet<ArtifactClass> {
        self.patterns
            .iter()
            .filter(|p| !p.is_exclusion())
            .flat_map(ScopePattern::classes)
            .collect()
    }

    /// Required artifact classes no inclusion pattern covers
    pub fn missing_coverage(&self) -> Vec<ArtifactClass> {
        let covered = self.coverage();
        ArtifactClass::required()
            .iter()
            .copied()
            .filter(|class| !covered.contains(class))
            .collect()
    }
}

impl Serialize for ScopePatterns {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.patterns.iter().map(ScopePattern::as_str))
    }
}

fn is_plain_extension(ext: &str) -> bool {
    !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Characters outside `[...]` classes and not escaped with a backslash, with byte offsets
fn structural_chars(s: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    let mut escaped = false;
    let mut in_class = false;
    s.char_indices().filter(move |&(_, c)| {
        if escaped {
            escaped = false;
            return false;
        }
        match c {
            '\\' => {
                escaped = true;
                false
            }
            '[' if !in_class => {
                in_class = true;
                false
            }
            ']' if in_class => {
                in_class = false;
                false
            }
            _ => !in_class,
        }
    })
}

/// True when `s` ends inside an unterminated `[...]` class
fn has_open_class(s: &str) -> bool {
    let mut escaped = false;
    let mut in_class = false;
    for c in s.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '[' => in_class = true,
            ']' => in_class = false,
            _ => {}
        }
    }
    in_class
}

fn check_balanced(body: &str) -> std::result::Result<(), PatternError> {
    let mut braces = 0i32;
    for (_, c) in structural_chars(body) {
        match c {
            '{' => braces += 1,
            '}' => braces -= 1,
            ']' => return Err(PatternError::Unbalanced(']')),
            _ => {}
        }
        if braces < 0 {
            return Err(PatternError::Unbalanced('}'));
        }
    }
    if has_open_class(body) {
        return Err(PatternError::Unbalanced('['));
    }
    if braces != 0 {
        return Err(PatternError::Unbalanced('{'));
    }
    Ok(())
}

/// Expand `{a,b}` groups into plain glob alternatives. Input must be balanced.
///
/// Braces inside `[...]` classes or escaped with a backslash are literal.
fn expand_braces(pattern: &str) -> std::result::Result<Vec<String>, PatternError> {
    let mut open = None;
    let mut close = None;
    let mut depth = 0usize;
    for (i, c) in structural_chars(pattern) {
        match c {
            '{' => {
                if depth == 0 {
                    open = Some(i);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }
    let Some(open) = open else {
        return Ok(vec![pattern.to_string()]);
    };
    let close = close.ok_or(PatternError::Unbalanced('{'))?;

    let inner = &pattern[open + 1..close];
    if inner.is_empty() {
        return Err(PatternError::EmptyAlternatives);
    }

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    let mut out = Vec::new();
    for option in split_alternatives(inner) {
        for rest in expand_braces(&format!("{prefix}{option}{suffix}"))? {
            out.push(rest);
            if out.len() > MAX_ALTERNATIVES {
                return Err(PatternError::TooManyAlternatives);
            }
        }
    }
    Ok(out)
}

/// Split on commas that are not inside a nested `{}` group, a class, or escaped
fn split_alternatives(inner: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in structural_chars(inner) {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&inner[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn origin() -> SourceId {
        SourceId::embedded("test")
    }

    #[test]
    fn builtin_patterns_validate_and_cover_every_class() {
        let builtin = ScopePatterns::builtin();
        let reparsed = ScopePatterns::new(builtin.as_strs(), &origin()).unwrap();
        assert_eq!(reparsed, builtin);
        assert!(builtin.missing_coverage().is_empty());
    }

    #[test]
    fn rejects_empty_and_whitespace_patterns() {
        assert_eq!(ScopePattern::parse(""), Err(PatternError::Empty));
        assert_eq!(ScopePattern::parse("   "), Err(PatternError::Empty));
        assert_eq!(ScopePattern::parse("!"), Err(PatternError::Empty));
        assert_eq!(
            ScopePattern::parse(" ./a/*.html"),
            Err(PatternError::SurroundingWhitespace)
        );
    }

    #[test]
    fn rejects_unsupported_syntax() {
        assert_eq!(
            ScopePattern::parse("./templates/{a,b/*.html"),
            Err(PatternError::Unbalanced('{'))
        );
        assert_eq!(
            ScopePattern::parse("./templates/a}.html"),
            Err(PatternError::Unbalanced('}'))
        );
        assert_eq!(
            ScopePattern::parse("./templates/{}.html"),
            Err(PatternError::EmptyAlternatives)
        );
        assert!(matches!(
            ScopePattern::parse("./templates/***/x.html"),
            Err(PatternError::Glob(_))
        ));
        assert!(matches!(
            ScopePattern::parse("./templates/[a-.html"),
            Err(PatternError::Unbalanced('['))
        ));
    }

    #[test]
    fn braces_in_classes_and_escapes_are_literal() {
        let class = ScopePattern::parse("./templates/[{]*.html").unwrap();
        assert_eq!(class.alternatives(), &["./templates/[{]*.html".to_string()]);
        assert!(glob::Pattern::new(&class.alternatives()[0]).is_ok());

        let escaped = ScopePattern::parse(r"./templates/\{legacy*.html").unwrap();
        assert_eq!(escaped.alternatives(), &[r"./templates/\{legacy*.html".to_string()]);

        let mixed = ScopePattern::parse("./{a[,}]x,b}/*.html").unwrap();
        assert_eq!(
            mixed.alternatives(),
            &["./a[,}]x/*.html".to_string(), "./b/*.html".to_string()]
        );

        let scope = ScopePatterns::new(["./templates/[{]*.html", "./**/*.py"], &origin()).unwrap();
        assert_eq!(scope.len(), 2);
    }

    #[test]
    fn expands_alternatives() {
        let p = ScopePattern::parse("./src/**/*.{html,js,py}").unwrap();
        assert_eq!(
            p.alternatives(),
            &[
                "./src/**/*.html".to_string(),
                "./src/**/*.js".to_string(),
                "./src/**/*.py".to_string()
            ]
        );
        assert_eq!(
            p.classes().into_iter().collect::<Vec<_>>(),
            vec![
                ArtifactClass::Markup,
                ArtifactClass::ClientScript,
                ArtifactClass::ServerSource
            ]
        );
    }

    #[test]
    fn exclusions_do_not_count_toward_coverage() {
        let scope = ScopePatterns::new(
            ["./templates/**/*.html", "!./node_modules/**/*.js"],
            &origin(),
        )
        .unwrap();
        assert!(scope.iter().nth(1).unwrap().is_exclusion());
        assert_eq!(
            scope.missing_coverage(),
            vec![ArtifactClass::ClientScript, ArtifactClass::ServerSource]
        );
    }

    #[test]
    fn duplicates_are_reported_not_rejected() {
        let scope = ScopePatterns::new(
            ["./**/*.py", "./static/js/**/*.js", "./**/*.py", "./**/*.py"],
            &origin(),
        )
        .unwrap();
        assert_eq!(scope.len(), 4);
        assert_eq!(scope.duplicates(), vec!["./**/*.py"]);
    }

    #[test]
    fn empty_declaration_is_invalid() {
        let err = ScopePatterns::new(Vec::<String>::new(), &origin()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn invalid_pattern_error_names_pattern_and_origin() {
        let err = ScopePatterns::new(["./ok/*.html", ""], &SourceId::file("tinct.toml")).unwrap_err();
        match err {
            ConfigError::InvalidPattern {
                pattern, origin, ..
            } => {
                assert_eq!(pattern, "");
                assert_eq!(origin, SourceId::file("tinct.toml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
