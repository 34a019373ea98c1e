//! Easing functions for track timing.
//!
//! Implements the CSS timing functions a transition can be configured with:
//! - Linear
//! - Ease, EaseIn, EaseOut, EaseInOut (standard CSS curves)
//! - CubicBezier (custom bezier curves)
//! - Steps (stepped animations)
//!
//! Timing functions are usually configured as text, so [`EasingFunction`]
//! implements [`FromStr`] for the CSS syntax:
//!
//! ```
//! use navslide_scene::animation::easing::EasingFunction;
//!
//! let curve: EasingFunction = "cubic-bezier(0.3, 0.4, 0, 0.9)".parse().unwrap();
//! assert_eq!(curve, EasingFunction::CubicBezier { x1: 0.3, y1: 0.4, x2: 0.0, y2: 0.9 });
//! assert_eq!("ease-out".parse::<EasingFunction>().unwrap(), EasingFunction::EaseOut);
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Position for stepped animations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPosition {
    /// Jump at the start of each interval (CSS `jump-start` / `start`).
    Start,
    /// Jump at the end of each interval (CSS `jump-end` / `end`).
    #[default]
    End,
    /// Jump at both start and end (CSS `jump-both`).
    Both,
    /// No jump at start or end (CSS `jump-none`).
    None,
}

/// Easing function for track timing.
///
/// Maps linear progress in `[0, 1]` to eased progress. Bezier curves may
/// overshoot outside that range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// CSS `ease`, equivalent to `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    #[default]
    Ease,
    /// CSS `ease-in`, equivalent to `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,
    /// CSS `ease-out`, equivalent to `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,
    /// CSS `ease-in-out`, equivalent to `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
    /// Custom cubic bezier curve through control points (x1, y1) and (x2, y2).
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// Stepped animation with `count` discrete intervals.
    Steps { count: u32, position: StepPosition },
}

/// Error returned when a timing function string cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EasingParseError {
    #[error("unknown timing function `{0}`")]
    Unknown(String),

    #[error("`{function}` expects {expected} arguments, got {got}")]
    Arity {
        function: &'static str,
        expected: &'static str,
        got: usize,
    },

    #[error("invalid number `{0}` in timing function")]
    Number(String),

    #[error("bezier x values must be in [0, 1], got {x1} and {x2}")]
    BezierRange { x1: f64, x2: f64 },

    #[error("steps() needs a positive interval count")]
    ZeroSteps,

    #[error("unknown step position `{0}`")]
    StepPosition(String),
}

impl EasingFunction {
    /// Evaluate the easing function at `t`, clamped to `[0, 1]`.
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match *self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, t),
            Self::Steps { count, position } => stepped(count, position, t),
        }
    }

    /// Create a custom cubic bezier easing function.
    ///
    /// Fails when either x control value lies outside `[0, 1]`.
    pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, EasingParseError> {
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(EasingParseError::BezierRange { x1, x2 });
        }
        Ok(Self::CubicBezier { x1, y1, x2, y2 })
    }

    /// Create a stepped easing function.
    pub fn steps(count: u32, position: StepPosition) -> Result<Self, EasingParseError> {
        if count == 0 {
            return Err(EasingParseError::ZeroSteps);
        }
        Ok(Self::Steps { count, position })
    }
}

impl FromStr for EasingFunction {
    type Err = EasingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();

        match s.as_str() {
            "linear" => return Ok(Self::Linear),
            "ease" => return Ok(Self::Ease),
            "ease-in" => return Ok(Self::EaseIn),
            "ease-out" => return Ok(Self::EaseOut),
            "ease-in-out" => return Ok(Self::EaseInOut),
            "step-start" => return Self::steps(1, StepPosition::Start),
            "step-end" => return Self::steps(1, StepPosition::End),
            _ => {}
        }

        let (name, args) = split_call(&s).ok_or_else(|| EasingParseError::Unknown(s.clone()))?;
        match name {
            "cubic-bezier" => {
                let values = args
                    .iter()
                    .map(|a| parse_number(a))
                    .collect::<Result<Vec<_>, _>>()?;
                let [x1, y1, x2, y2] = values.as_slice() else {
                    return Err(EasingParseError::Arity {
                        function: "cubic-bezier",
                        expected: "4",
                        got: values.len(),
                    });
                };
                Self::cubic_bezier(*x1, *y1, *x2, *y2)
            }
            "steps" => {
                let (count, position) = match args.as_slice() {
                    [count] => (*count, StepPosition::End),
                    [count, position] => (*count, parse_step_position(position)?),
                    _ => {
                        return Err(EasingParseError::Arity {
                            function: "steps",
                            expected: "1 or 2",
                            got: args.len(),
                        });
                    }
                };
                let count = count
                    .parse::<u32>()
                    .map_err(|_| EasingParseError::Number(count.to_string()))?;
                Self::steps(count, position)
            }
            _ => Err(EasingParseError::Unknown(s.clone())),
        }
    }
}

/// Split `name(a, b, c)` into its name and trimmed arguments.
fn split_call(s: &str) -> Option<(&str, Vec<&str>)> {
    let open = s.find('(')?;
    let inner = s[open + 1..].strip_suffix(')')?;
    let name = s[..open].trim();
    let args = if inner.trim().is_empty() {
        Vec::new()
    } else {
        inner.split(',').map(str::trim).collect()
    };
    Some((name, args))
}

fn parse_number(s: &str) -> Result<f64, EasingParseError> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| EasingParseError::Number(s.to_string()))
}

fn parse_step_position(s: &str) -> Result<StepPosition, EasingParseError> {
    match s {
        "start" | "jump-start" => Ok(StepPosition::Start),
        "end" | "jump-end" => Ok(StepPosition::End),
        "jump-both" => Ok(StepPosition::Both),
        "jump-none" => Ok(StepPosition::None),
        other => Err(EasingParseError::StepPosition(other.to_string())),
    }
}

/// Evaluate a cubic bezier timing curve at progress `x`.
///
/// Solves the curve's x polynomial for its parameter with Newton-Raphson,
/// falling back to bisection when the slope flattens, then evaluates y.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let t = solve_curve_x(x1, x2, x);
    sample_curve(y1, y2, t)
}

fn solve_curve_x(x1: f64, x2: f64, x: f64) -> f64 {
    let mut t = x;
    for _ in 0..8 {
        let err = sample_curve(x1, x2, t) - x;
        if err.abs() < 1e-7 {
            return t;
        }
        let slope = sample_curve_derivative(x1, x2, t);
        if slope.abs() < 1e-6 {
            break;
        }
        t -= err / slope;
    }

    // Bisection keeps steep curves well behaved.
    let (mut lo, mut hi) = (0.0, 1.0);
    t = x;
    for _ in 0..32 {
        let value = sample_curve(x1, x2, t);
        if (value - x).abs() < 1e-7 {
            break;
        }
        if value < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    t
}

/// One coordinate of a bezier from (0, 0) to (1, 1) with control values p1 and p2.
#[inline]
fn sample_curve(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

#[inline]
fn sample_curve_derivative(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

fn stepped(count: u32, position: StepPosition, t: f64) -> f64 {
    if count == 0 {
        return t;
    }
    let n = f64::from(count);

    match position {
        StepPosition::Start => (t * n).ceil() / n,
        StepPosition::End => (t * n).floor() / n,
        StepPosition::Both => ((t * (n + 1.0)).floor() / n).min(1.0),
        StepPosition::None if count == 1 => 0.5,
        StepPosition::None => ((t * n).floor() / (n - 1.0)).min(1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 0.001;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_linear() {
        let ease = EasingFunction::Linear;
        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert!(approx_eq(ease.evaluate(t), t));
        }
    }

    #[test]
    fn test_ease_boundaries_and_monotonic() {
        let ease = EasingFunction::Ease;
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));

        let mid = ease.evaluate(0.5);
        assert!(mid > 0.7 && mid < 0.9, "CSS ease mid-point should be ~0.8, got {}", mid);
        assert!(ease.evaluate(0.25) < mid);
        assert!(mid < ease.evaluate(0.75));
    }

    #[test]
    fn test_ease_in_out_symmetry() {
        let ease = EasingFunction::EaseInOut;
        assert!(approx_eq(ease.evaluate(0.5), 0.5));
        assert!(approx_eq(ease.evaluate(0.25) + ease.evaluate(0.75), 1.0));
    }

    #[test]
    fn test_default_slide_curve() {
        let curve: EasingFunction = "cubic-bezier(0.3, 0.4, 0, 0.9)".parse().unwrap();
        assert!(approx_eq(curve.evaluate(0.0), 0.0));
        assert!(approx_eq(curve.evaluate(1.0), 1.0));
        // Front-loaded: most of the motion happens early.
        assert!(curve.evaluate(0.5) > 0.7);
    }

    #[test]
    fn test_linear_bezier() {
        let linear = EasingFunction::cubic_bezier(0.0, 0.0, 1.0, 1.0).unwrap();
        assert!(approx_eq(linear.evaluate(0.5), 0.5));
        assert!(approx_eq(linear.evaluate(0.2), 0.2));
    }

    #[test]
    fn test_steps() {
        let end = EasingFunction::steps(4, StepPosition::End).unwrap();
        assert!(approx_eq(end.evaluate(0.24), 0.0));
        assert!(approx_eq(end.evaluate(0.25), 0.25));
        assert!(approx_eq(end.evaluate(0.99), 0.75));
        assert!(approx_eq(end.evaluate(1.0), 1.0));

        let start = EasingFunction::steps(4, StepPosition::Start).unwrap();
        assert!(approx_eq(start.evaluate(0.01), 0.25));
        assert!(approx_eq(start.evaluate(0.76), 1.0));
    }

    #[test]
    fn test_clamping() {
        let ease = EasingFunction::Ease;
        assert!(approx_eq(ease.evaluate(-0.5), 0.0));
        assert!(approx_eq(ease.evaluate(1.5), 1.0));
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!("linear".parse::<EasingFunction>(), Ok(EasingFunction::Linear));
        assert_eq!(" Ease-In-Out ".parse::<EasingFunction>(), Ok(EasingFunction::EaseInOut));
        assert_eq!(
            "step-start".parse::<EasingFunction>(),
            Ok(EasingFunction::Steps {
                count: 1,
                position: StepPosition::Start
            })
        );
    }

    #[test]
    fn test_parse_steps() {
        assert_eq!(
            "steps(3, jump-both)".parse::<EasingFunction>(),
            Ok(EasingFunction::Steps {
                count: 3,
                position: StepPosition::Both
            })
        );
        assert_eq!("steps(0)".parse::<EasingFunction>(), Err(EasingParseError::ZeroSteps));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "bounce".parse::<EasingFunction>(),
            Err(EasingParseError::Unknown(_))
        ));
        assert!(matches!(
            "cubic-bezier(0.1, 0.2, 0.3)".parse::<EasingFunction>(),
            Err(EasingParseError::Arity { got: 3, .. })
        ));
        assert!(matches!(
            "cubic-bezier(1.5, 0, 0.5, 1)".parse::<EasingFunction>(),
            Err(EasingParseError::BezierRange { .. })
        ));
        assert!(matches!(
            "cubic-bezier(a, 0, 0.5, 1)".parse::<EasingFunction>(),
            Err(EasingParseError::Number(_))
        ));
    }

    #[test]
    fn test_default() {
        assert_eq!(EasingFunction::default(), EasingFunction::Ease);
        assert_eq!(StepPosition::default(), StepPosition::End);
    }
}
