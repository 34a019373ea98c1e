//! Interpolation for style values.
//!
//! Interpolation is the core mechanism that moves a track step from its
//! captured starting style to its target style. Lengths in the same unit
//! interpolate within that unit; mixed units are resolved to pixels against
//! the animated element's own box first.

use super::types::{Length, StyleValue, Translate};

/// Trait for types that can be interpolated between two values.
///
/// When `t = 0.0` the result is `self`, when `t = 1.0` it is `to`.
pub trait Interpolate: Sized {
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

#[inline]
fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        lerp(*self, *to, t)
    }
}

impl Interpolate for i32 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        lerp(f64::from(*self), f64::from(*to), t).round() as i32
    }
}

impl Interpolate for [f32; 4] {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        let t = t as f32;
        [
            self[0] + (to[0] - self[0]) * t,
            self[1] + (to[1] - self[1]) * t,
            self[2] + (to[2] - self[2]) * t,
            self[3] + (to[3] - self[3]) * t,
        ]
    }
}

impl Length {
    /// Interpolate towards `to`, resolving against `basis` only when units differ.
    pub fn lerp(self, to: Length, t: f64, basis: f64) -> Length {
        match (self, to) {
            (Length::Px(a), Length::Px(b)) => Length::Px(lerp(a, b, t)),
            (Length::Percent(a), Length::Percent(b)) => Length::Percent(lerp(a, b, t)),
            (a, b) => Length::Px(lerp(a.to_px(basis), b.to_px(basis), t)),
        }
    }
}

impl Translate {
    /// Interpolate towards `to` for an element of the given box size.
    pub fn lerp(self, to: Translate, t: f64, width: f64, height: f64) -> Translate {
        Translate {
            x: self.x.lerp(to.x, t, width),
            y: self.y.lerp(to.y, t, height),
        }
    }
}

impl StyleValue {
    /// Interpolate towards `to` for an element of the given box size.
    ///
    /// Values of different kinds cannot be blended and flip at the midpoint.
    pub fn lerp(&self, to: &StyleValue, t: f64, width: f64, height: f64) -> StyleValue {
        match (self, to) {
            (Self::F64 { value: a }, Self::F64 { value: b }) => a.interpolate(b, t).into(),
            (Self::Int { value: a }, Self::Int { value: b }) => a.interpolate(b, t).into(),
            (Self::Color { rgba: a }, Self::Color { rgba: b }) => a.interpolate(b, t).into(),
            (Self::Transform { translate: a }, Self::Transform { translate: b }) => {
                a.lerp(*b, t, width, height).into()
            }
            _ if t < 0.5 => *self,
            _ => *to,
        }
    }
}
