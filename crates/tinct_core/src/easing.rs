//! CSS timing functions for motion presets

use std::fmt;

/// Where a `steps()` timing function jumps
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StepPosition {
    Start,
    #[default]
    End,
}

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    Linear,
    #[default]
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier(f32, f32, f32, f32),
    Steps(u32, StepPosition),
}

impl Easing {
    /// Parse a single timing function (`ease-out`, `cubic-bezier(0, 0, 0.2, 1)`, `steps(4, start)`).
    ///
    /// Returns `None` when `input` is not a timing function at all; malformed
    /// function arguments also yield `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim();
        match s {
            "linear" => return Some(Easing::Linear),
            "ease" => return Some(Easing::Ease),
            "ease-in" => return Some(Easing::EaseIn),
            "ease-out" => return Some(Easing::EaseOut),
            "ease-in-out" => return Some(Easing::EaseInOut),
            "step-start" => return Some(Easing::Steps(1, StepPosition::Start)),
            "step-end" => return Some(Easing::Steps(1, StepPosition::End)),
            _ => {}
        }

        if let Some(args) = function_args(s, "cubic-bezier") {
            let nums: Vec<f32> = args
                .split(',')
                .map(|a| a.trim().parse::<f32>())
                .collect::<Result<_, _>>()
                .ok()?;
            let [x1, y1, x2, y2] = nums.as_slice() else {
                return None;
            };
            // x coordinates must stay inside [0, 1] for the curve to be a function of time
            if !(0.0..=1.0).contains(x1) || !(0.0..=1.0).contains(x2) {
                return None;
            }
            return Some(Easing::CubicBezier(*x1, *y1, *x2, *y2));
        }

        if let Some(args) = function_args(s, "steps") {
            let mut parts = args.split(',').map(str::trim);
            let count = parts.next()?.parse::<u32>().ok().filter(|n| *n > 0)?;
            let position = match parts.next() {
                None | Some("end") | Some("jump-end") => StepPosition::End,
                Some("start") | Some("jump-start") => StepPosition::Start,
                Some(_) => return None,
            };
            if parts.next().is_some() {
                return None;
            }
            return Some(Easing::Steps(count, position));
        }

        None
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("linear"),
            Easing::Ease => f.write_str("ease"),
            Easing::EaseIn => f.write_str("ease-in"),
            Easing::EaseOut => f.write_str("ease-out"),
            Easing::EaseInOut => f.write_str("ease-in-out"),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
            Easing::Steps(n, StepPosition::End) => write!(f, "steps({n})"),
            Easing::Steps(n, StepPosition::Start) => write!(f, "steps({n}, start)"),
        }
    }
}

fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}
