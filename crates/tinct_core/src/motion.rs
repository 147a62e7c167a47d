//! Animation shorthand values for motion tokens
//!
//! Motion tokens hold CSS `animation` shorthands such as
//! `fadeIn 0.5s ease-in-out` or `ping 1s cubic-bezier(0, 0, 0.2, 1) infinite`.
//! Parsing is used to validate literals at load time; the literal string itself
//! is what the generator receives.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::easing::Easing;

const DIRECTIONS: [&str; 4] = ["normal", "reverse", "alternate", "alternate-reverse"];
const FILL_MODES: [&str; 3] = ["forwards", "backwards", "both"];
const PLAY_STATES: [&str; 2] = ["running", "paused"];

/// How many times an animation runs
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IterationCount {
    Count(f32),
    Infinite,
}

impl Default for IterationCount {
    fn default() -> Self {
        IterationCount::Count(1.0)
    }
}

/// One parsed animation shorthand
#[derive(Clone, Debug, PartialEq)]
pub struct MotionSpec {
    /// Keyframes name (`none` for the empty animation)
    pub name: String,
    pub duration: Duration,
    pub delay: Duration,
    pub easing: Easing,
    pub iterations: IterationCount,
    /// Direction, fill-mode and play-state keywords, in declaration order
    pub modifiers: Vec<String>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MotionParseError {
    #[error("animation value is empty")]
    Empty,

    #[error("animation `{0}` has no keyframes name")]
    MissingName(String),

    #[error("animation `{value}` names two keyframes (`{first}` and `{second}`)")]
    TwoNames {
        value: String,
        first: String,
        second: String,
    },

    #[error("animation `{value}` has more than two time values")]
    TooManyTimes { value: String },

    #[error("animation `{value}` has an invalid component `{component}`")]
    BadComponent { value: String, component: String },

    #[error("unbalanced parentheses in animation `{0}`")]
    Unbalanced(String),
}

impl MotionSpec {
    /// The empty animation (`animation: none`)
    pub fn none() -> Self {
        Self {
            name: "none".to_string(),
            duration: Duration::ZERO,
            delay: Duration::ZERO,
            easing: Easing::default(),
            iterations: IterationCount::default(),
            modifiers: Vec::new(),
        }
    }

    /// Parse a comma-separated list of animation shorthands.
    pub fn parse_list(input: &str) -> Result<Vec<Self>, MotionParseError> {
        split_top_level(input, ',')
            .map_err(|_| MotionParseError::Unbalanced(input.trim().to_string()))?
            .into_iter()
            .map(Self::parse)
            .collect()
    }

    /// Parse a single animation shorthand.
    pub fn parse(input: &str) -> Result<Self, MotionParseError> {
        let value = input.trim();
        if value.is_empty() {
            return Err(MotionParseError::Empty);
        }
        if value == "none" {
            return Ok(Self::none());
        }

        let components = split_top_level(value, ' ')
            .map_err(|_| MotionParseError::Unbalanced(value.to_string()))?;

        let mut name: Option<String> = None;
        let mut times: Vec<Duration> = Vec::new();
        let mut easing = None;
        let mut iterations = None;
        let mut modifiers = Vec::new();

        for component in components {
            let bad = || MotionParseError::BadComponent {
                value: value.to_string(),
                component: component.to_string(),
            };

            if let Some(time) = parse_time(component) {
                if times.len() == 2 {
                    return Err(MotionParseError::TooManyTimes {
                        value: value.to_string(),
                    });
                }
                times.push(time);
            } else if let Some(e) = Easing::parse(component) {
                if easing.replace(e).is_some() {
                    return Err(bad());
                }
            } else if component == "infinite" {
                if iterations.replace(IterationCount::Infinite).is_some() {
                    return Err(bad());
                }
            } else if let Ok(count) = component.parse::<f32>() {
                if count < 0.0 || !count.is_finite() || iterations.is_some() {
                    return Err(bad());
                }
                iterations = Some(IterationCount::Count(count));
            } else if DIRECTIONS.contains(&component)
                || FILL_MODES.contains(&component)
                || PLAY_STATES.contains(&component)
                || (component == "none" && name.is_some())
            {
                modifiers.push(component.to_string());
            } else if is_ident(component) {
                if let Some(first) = name.take() {
                    return Err(MotionParseError::TwoNames {
                        value: value.to_string(),
                        first,
                        second: component.to_string(),
                    });
                }
                name = Some(component.to_string());
            } else {
                return Err(bad());
            }
        }

        let name = name.ok_or_else(|| MotionParseError::MissingName(value.to_string()))?;
        let mut times = times.into_iter();

        Ok(Self {
            name,
            duration: times.next().unwrap_or(Duration::ZERO),
            delay: times.next().unwrap_or(Duration::ZERO),
            easing: easing.unwrap_or_default(),
            iterations: iterations.unwrap_or_default(),
            modifiers,
        })
    }
}

impl fmt::Display for MotionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name == "none" && self.duration.is_zero() && self.modifiers.is_empty() {
            return f.write_str("none");
        }
        write!(f, "{} {}ms {}", self.name, self.duration.as_millis(), self.easing)?;
        if !self.delay.is_zero() {
            write!(f, " {}ms", self.delay.as_millis())?;
        }
        match self.iterations {
            IterationCount::Infinite => f.write_str(" infinite")?,
            IterationCount::Count(n) if n != 1.0 => write!(f, " {n}")?,
            IterationCount::Count(_) => {}
        }
        for m in &self.modifiers {
            write!(f, " {m}")?;
        }
        Ok(())
    }
}

fn parse_time(s: &str) -> Option<Duration> {
    let (number, nanos_per_unit) = if let Some(n) = s.strip_suffix("ms") {
        (n, 1e6)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1e9)
    } else {
        return None;
    };
    let value = number.parse::<f64>().ok()?;
    if value < 0.0 || !value.is_finite() {
        return None;
    }
    Some(Duration::from_nanos((value * nanos_per_unit).round() as u64))
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '-' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Split on `sep` outside parentheses, dropping empty pieces for whitespace splits.
fn split_top_level(s: &str, sep: char) -> Result<Vec<&str>, ()> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(());
                }
            }
            c if depth == 0 && (c == sep || (sep == ' ' && c.is_whitespace())) => {
                out.push(s[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(());
    }
    out.push(s[start..].trim());
    if sep == ' ' {
        out.retain(|piece| !piece.is_empty());
    }
    Ok(out)
}
