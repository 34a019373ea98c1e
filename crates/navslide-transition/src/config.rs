//! Timing parameters of a slide animator.

use navslide_config::{DEFAULT_DURATION, DEFAULT_TIMING, TransitionConfig};
use navslide_scene::animation::EasingFunction;

use crate::error::{Result, TransitionError};

/// Immutable timing shared by every transition one animator runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideTiming {
    /// Curve applied to every timed step except plain fades.
    pub easing: EasingFunction,
    /// Seconds between the initial state and the start of visible motion.
    pub delay: f64,
    /// Seconds of visible motion.
    pub duration: f64,
}

impl SlideTiming {
    pub fn new(easing: EasingFunction, delay: f64, duration: f64) -> Result<Self> {
        check_seconds("delay", delay)?;
        check_seconds("duration", duration)?;
        Ok(Self {
            easing,
            delay,
            duration,
        })
    }

    /// Parse a CSS timing function string such as `ease-out`.
    pub fn with_timing(timing: &str, delay: f64, duration: f64) -> Result<Self> {
        Self::new(timing.parse()?, delay, duration)
    }

    /// Time from the first step of a track to its last.
    pub fn total(&self) -> f64 {
        self.delay + self.duration
    }
}

impl Default for SlideTiming {
    fn default() -> Self {
        Self {
            easing: default_easing(),
            delay: 0.0,
            duration: DEFAULT_DURATION,
        }
    }
}

impl TryFrom<&TransitionConfig> for SlideTiming {
    type Error = TransitionError;

    fn try_from(config: &TransitionConfig) -> Result<Self> {
        Self::with_timing(&config.timing, config.delay, config.duration)
    }
}

fn default_easing() -> EasingFunction {
    DEFAULT_TIMING
        .parse()
        .unwrap_or(EasingFunction::CubicBezier {
            x1: 0.3,
            y1: 0.4,
            x2: 0.0,
            y2: 0.9,
        })
}

fn check_seconds(key: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TransitionError::InvalidSeconds { key, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let timing = SlideTiming::default();
        assert_eq!(
            timing.easing,
            EasingFunction::CubicBezier {
                x1: 0.3,
                y1: 0.4,
                x2: 0.0,
                y2: 0.9
            }
        );
        assert_eq!(timing.delay, 0.0);
        assert_eq!(timing.duration, 0.4);
    }

    #[test]
    fn test_from_config() {
        let config = TransitionConfig {
            timing: "ease-in".into(),
            delay: 0.1,
            duration: 0.3,
        };
        let timing = SlideTiming::try_from(&config).unwrap();
        assert_eq!(timing.easing, EasingFunction::EaseIn);
        assert_eq!(timing.delay, 0.1);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            SlideTiming::with_timing("bounce", 0.0, 0.4),
            Err(TransitionError::InvalidTiming(_))
        ));
        assert!(matches!(
            SlideTiming::with_timing("linear", -1.0, 0.4),
            Err(TransitionError::InvalidSeconds { key: "delay", .. })
        ));
        assert!(SlideTiming::with_timing("linear", 0.0, f64::NAN).is_err());
    }
}
