//! Core style types for the track system.
//!
//! - `Length`: pixel or box-relative percentage lengths
//! - `Translate`: the translation a slide transition animates
//! - `StyleProperty` / `StyleValue`: the animatable properties and their values
//! - `Style`: an ordered property map, used both as an element's inline style and
//!   as the target of a track step
//! - `AnimationId`: unique identifier for a running track or track group

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a running track or group of tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationId(pub u64);

impl AnimationId {
    /// Generate a new unique ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for AnimationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Current state of a running track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    /// Created but no tick has reached it yet.
    #[default]
    Pending,
    /// Working through its steps.
    Running,
    /// Every step has executed.
    Finished,
}

/// A length in literal pixels or as a percentage of the element's own box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl Default for Length {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

impl Length {
    pub const ZERO: Length = Length::Px(0.0);

    /// Resolve to pixels against the size of the box along the same axis.
    pub fn to_px(self, basis: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => basis * pct / 100.0,
        }
    }

    /// True when the length resolves to zero regardless of the box.
    pub fn is_zero(self) -> bool {
        match self {
            Self::Px(v) | Self::Percent(v) => v == 0.0,
        }
    }
}

/// 2D translation, the only transform the slide choreography uses.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Translate {
    pub x: Length,
    pub y: Length,
}

impl Translate {
    /// Horizontal-only translation.
    pub fn x(x: Length) -> Self {
        Self { x, y: Length::ZERO }
    }

    /// Resolve to a pixel offset for a box of the given size.
    pub fn to_px(self, width: f64, height: f64) -> (f64, f64) {
        (self.x.to_px(width), self.y.to_px(height))
    }
}

/// Animatable style properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleProperty {
    Transform,
    Opacity,
    BackgroundColor,
    ZIndex,
}

impl StyleProperty {
    /// Value a property has when no style sets it.
    pub fn initial_value(self) -> StyleValue {
        match self {
            Self::Transform => StyleValue::Transform {
                translate: Translate::default(),
            },
            Self::Opacity => StyleValue::F64 { value: 1.0 },
            Self::BackgroundColor => StyleValue::Color { rgba: [0.0; 4] },
            Self::ZIndex => StyleValue::Int { value: 0 },
        }
    }
}

/// A typed style value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StyleValue {
    /// Numeric value (opacity).
    F64 { value: f64 },
    /// Integer value (z-index).
    Int { value: i32 },
    /// RGBA color, components in [0, 1].
    Color { rgba: [f32; 4] },
    /// Translation.
    Transform { translate: Translate },
}

impl StyleValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64 { value } => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int { value } => Some(*value),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<[f32; 4]> {
        match self {
            Self::Color { rgba } => Some(*rgba),
            _ => None,
        }
    }

    pub fn as_translate(&self) -> Option<Translate> {
        match self {
            Self::Transform { translate } => Some(*translate),
            _ => None,
        }
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::F64 { value }
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        Self::Int { value }
    }
}

impl From<[f32; 4]> for StyleValue {
    fn from(rgba: [f32; 4]) -> Self {
        Self::Color { rgba }
    }
}

impl From<Translate> for StyleValue {
    fn from(translate: Translate) -> Self {
        Self::Transform { translate }
    }
}

/// An ordered map of style properties.
///
/// Serves as an element's inline style and as the target state of a track step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Style {
    values: BTreeMap<StyleProperty, StyleValue>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: horizontal translation.
    pub fn translate_x(self, x: Length) -> Self {
        self.with(StyleProperty::Transform, Translate::x(x))
    }

    /// Builder: opacity.
    pub fn opacity(self, opacity: f64) -> Self {
        self.with(StyleProperty::Opacity, opacity)
    }

    /// Builder: arbitrary property.
    pub fn with(mut self, property: StyleProperty, value: impl Into<StyleValue>) -> Self {
        self.values.insert(property, value.into());
        self
    }

    pub fn set(&mut self, property: StyleProperty, value: impl Into<StyleValue>) {
        self.values.insert(property, value.into());
    }

    pub fn get(&self, property: StyleProperty) -> Option<&StyleValue> {
        self.values.get(&property)
    }

    /// The set value, or the property's initial value.
    pub fn computed(&self, property: StyleProperty) -> StyleValue {
        self.get(property)
            .copied()
            .unwrap_or_else(|| property.initial_value())
    }

    pub fn remove(&mut self, property: StyleProperty) -> Option<StyleValue> {
        self.values.remove(&property)
    }

    /// Overwrite every property `other` sets.
    pub fn apply(&mut self, other: &Style) {
        for (property, value) in other.iter() {
            self.values.insert(property, *value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &StyleValue)> {
        self.values.iter().map(|(p, v)| (*p, v))
    }

    pub fn properties(&self) -> impl Iterator<Item = StyleProperty> + '_ {
        self.values.keys().copied()
    }

    pub fn opacity_value(&self) -> Option<f64> {
        self.get(StyleProperty::Opacity).and_then(StyleValue::as_f64)
    }

    pub fn translate_value(&self) -> Option<Translate> {
        self.get(StyleProperty::Transform)
            .and_then(StyleValue::as_translate)
    }
}
