//! The choreography of an iOS style slide.
//!
//! Every track follows the same shape:
//!
//! ```text
//! save style → initial state (0s) → wait(delay) → final state (duration) → restore style
//! ```
//!
//! Toolbar path, per element group:
//!
//! ```text
//!                 push/enter          push/leave           pop/enter            pop/leave
//! content group   x 100% → 0          0,1 → -25%,0.9       -25%,0.9 → 0,1       0 → 100%
//! toolbar         op 0 → 1            -                    -                    op 1 → 0
//! center          x 125% → 0          0,1 → -title,0       -title,0 → 0,1       0 → 125%
//! back label      +title,0 → 0,1      0,1 → -label,0       x -label → 0         0,1 → +title,0
//! other items     op 0 → 1            op 1 → 0             op 0 → 1             op 1 → 0
//! ```
//!
//! Moves follow the timing curve. The `other` fades run linearly, and so does
//! the opacity of a header element that moves and fades at once (push/enter
//! label, push/leave center, pop/enter center, pop/leave label).
//!
//! Without the toolbar path the whole pages slide using the content rules.

use std::fmt;

use navslide_scene::animation::{
    EasingFunction, Length, Style, StyleProperty, StyleStep, Track,
};
use navslide_scene::tree::NodeId;

use crate::config::SlideTiming;
use crate::decompose::Decomposition;
use crate::delta::Delta;

/// Which way the navigation stack moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Push,
    Pop,
}

/// Identifies one track of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKey {
    EnterContent,
    LeaveContent,
    EnterToolbar,
    LeaveToolbar,
    EnterCenter,
    LeaveCenter,
    EnterBackLabel,
    LeaveBackLabel,
    EnterOther,
    LeaveOther,
    EnterPage,
    LeavePage,
}

impl TrackKey {
    /// The track that carries finalization for the chosen path.
    pub fn finalizing(animate_toolbar: bool) -> Self {
        if animate_toolbar {
            Self::LeaveContent
        } else {
            Self::LeavePage
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::EnterContent => "enter/content",
            Self::LeaveContent => "leave/content",
            Self::EnterToolbar => "enter/toolbar",
            Self::LeaveToolbar => "leave/toolbar",
            Self::EnterCenter => "enter/center",
            Self::LeaveCenter => "leave/center",
            Self::EnterBackLabel => "enter/back-label",
            Self::LeaveBackLabel => "leave/back-label",
            Self::EnterOther => "enter/other",
            Self::LeaveOther => "leave/other",
            Self::EnterPage => "enter/page",
            Self::LeavePage => "leave/page",
        }
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Keyed tracks of one transition, in start order.
#[derive(Debug, Default)]
pub struct TrackSet {
    tracks: Vec<(TrackKey, Track)>,
}

impl TrackSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: TrackKey, track: Track) {
        self.tracks.retain(|(k, _)| *k != key);
        self.tracks.push((key, track));
    }

    pub fn get(&self, key: TrackKey) -> Option<&Track> {
        self.tracks.iter().find(|(k, _)| *k == key).map(|(_, t)| t)
    }

    pub fn contains(&self, key: TrackKey) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: TrackKey) -> Option<Track> {
        let index = self.tracks.iter().position(|(k, _)| *k == key)?;
        Some(self.tracks.remove(index).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = TrackKey> + '_ {
        self.tracks.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TrackKey, &Track)> {
        self.tracks.iter().map(|(k, t)| (*k, t))
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// The longest track, earliest wins ties.
    pub fn longest(&self) -> Option<(TrackKey, f64)> {
        self.tracks
            .iter()
            .map(|(k, t)| (*k, t.duration()))
            .fold(None, |best, (key, duration)| match best {
                Some((_, longest)) if longest >= duration => best,
                _ => Some((key, duration)),
            })
    }

    pub fn into_vec(self) -> Vec<(TrackKey, Track)> {
        self.tracks
    }
}

/// Builds the keyed tracks of one transition.
struct Builder<'a> {
    timing: &'a SlideTiming,
    finalizing: TrackKey,
    set: TrackSet,
}

impl Builder<'_> {
    fn slide(&mut self, key: TrackKey, targets: Vec<NodeId>, from: Style, to: Style) {
        let step = StyleStep::new(to, self.timing.duration).eased(self.timing.easing);
        self.add(key, targets, from, step);
    }

    /// Header motion: the transform follows the timing curve, opacity runs linearly.
    fn split(&mut self, key: TrackKey, targets: Vec<NodeId>, from: Style, to: Style) {
        let step = StyleStep::new(to, self.timing.duration)
            .eased(self.timing.easing)
            .ease_property(StyleProperty::Opacity, EasingFunction::Linear);
        self.add(key, targets, from, step);
    }

    /// Plain fades run linearly.
    fn fade(&mut self, key: TrackKey, targets: Vec<NodeId>, from: f64, to: f64) {
        let step = StyleStep::new(Style::new().opacity(to), self.timing.duration)
            .eased(EasingFunction::Linear);
        self.add(key, targets, Style::new().opacity(from), step);
    }

    fn add(&mut self, key: TrackKey, targets: Vec<NodeId>, from: Style, to: StyleStep) {
        if targets.is_empty() && key != self.finalizing {
            return;
        }
        let track = Track::new(key.label(), targets)
            .save_style()
            .queue(from, 0.0)
            .wait(self.timing.delay)
            .queue_step(to)
            .restore_style();
        self.set.insert(key, track);
    }
}

fn x(length: Length) -> Style {
    Style::new().translate_x(length)
}

fn x_op(length: Length, opacity: f64) -> Style {
    Style::new().translate_x(length).opacity(opacity)
}

fn pct(value: f64) -> Length {
    Length::Percent(value)
}

fn px(value: f64) -> Length {
    Length::Px(value)
}

/// Build every track of a slide transition.
///
/// Tracks without targets are left out, except the finalizing one
/// (`TrackKey::finalizing(animate_toolbar)`), which is always present.
pub fn build_timeline(
    direction: Direction,
    enter: &Decomposition,
    leave: &Decomposition,
    delta: Delta,
    animate_toolbar: bool,
    timing: &SlideTiming,
) -> TrackSet {
    let mut b = Builder {
        timing,
        finalizing: TrackKey::finalizing(animate_toolbar),
        set: TrackSet::new(),
    };
    let title = delta.title_or_zero();
    let label = delta.label_or_zero();

    if !animate_toolbar {
        let (enter_page, leave_page) = (vec![enter.page], vec![leave.page]);
        match direction {
            Direction::Push => {
                b.slide(TrackKey::EnterPage, enter_page, x(pct(100.0)), x(pct(0.0)));
                b.slide(
                    TrackKey::LeavePage,
                    leave_page,
                    x_op(pct(0.0), 1.0),
                    x_op(pct(-25.0), 0.9),
                );
            }
            Direction::Pop => {
                b.slide(
                    TrackKey::EnterPage,
                    enter_page,
                    x_op(pct(-25.0), 0.9),
                    x_op(pct(0.0), 1.0),
                );
                b.slide(TrackKey::LeavePage, leave_page, x(pct(0.0)), x(pct(100.0)));
            }
        }
        return b.set;
    }

    let toolbar = |d: &Decomposition| d.toolbar.into_iter().collect::<Vec<_>>();
    let center = |d: &Decomposition| d.toolbar_center.into_iter().collect::<Vec<_>>();
    let back_label = |d: &Decomposition| d.back_button_label.into_iter().collect::<Vec<_>>();

    match direction {
        Direction::Push => {
            b.slide(
                TrackKey::EnterContent,
                enter.content_group(),
                x(pct(100.0)),
                x(pct(0.0)),
            );
            b.slide(
                TrackKey::EnterToolbar,
                toolbar(enter),
                Style::new().opacity(0.0),
                Style::new().opacity(1.0),
            );
            b.slide(
                TrackKey::EnterCenter,
                center(enter),
                x_op(pct(125.0), 1.0),
                x_op(pct(0.0), 1.0),
            );
            b.split(
                TrackKey::EnterBackLabel,
                back_label(enter),
                x_op(px(title), 0.0),
                x_op(px(0.0), 1.0),
            );
            b.fade(TrackKey::EnterOther, enter.other.clone(), 0.0, 1.0);

            b.slide(
                TrackKey::LeaveContent,
                leave.content_group(),
                x_op(pct(0.0), 1.0),
                x_op(pct(-25.0), 0.9),
            );
            b.split(
                TrackKey::LeaveCenter,
                center(leave),
                x_op(px(0.0), 1.0),
                x_op(px(-title), 0.0),
            );
            b.slide(
                TrackKey::LeaveBackLabel,
                back_label(leave),
                x_op(px(0.0), 1.0),
                x_op(px(-label), 0.0),
            );
            b.fade(TrackKey::LeaveOther, leave.other.clone(), 1.0, 0.0);
        }
        Direction::Pop => {
            b.slide(
                TrackKey::EnterContent,
                enter.content_group(),
                x_op(pct(-25.0), 0.9),
                x_op(pct(0.0), 1.0),
            );
            b.split(
                TrackKey::EnterCenter,
                center(enter),
                x_op(px(-title), 0.0),
                x_op(px(0.0), 1.0),
            );
            b.slide(
                TrackKey::EnterBackLabel,
                back_label(enter),
                x(px(-label)),
                x(px(0.0)),
            );
            b.fade(TrackKey::EnterOther, enter.other.clone(), 0.0, 1.0);

            b.slide(
                TrackKey::LeaveContent,
                leave.content_group(),
                x(pct(0.0)),
                x(pct(100.0)),
            );
            b.slide(
                TrackKey::LeaveToolbar,
                toolbar(leave),
                Style::new().opacity(1.0),
                Style::new().opacity(0.0),
            );
            b.slide(TrackKey::LeaveCenter, center(leave), x(pct(0.0)), x(pct(125.0)));
            b.split(
                TrackKey::LeaveBackLabel,
                back_label(leave),
                x_op(px(0.0), 1.0),
                x_op(px(title), 0.0),
            );
            b.fade(TrackKey::LeaveOther, leave.other.clone(), 1.0, 0.0);
        }
    }
    b.set
}

#[cfg(test)]
mod tests {
    use super::*;
    use navslide_scene::animation::{Step, Translate};

    fn decomposition(base: u32) -> Decomposition {
        Decomposition {
            page: NodeId(base),
            target: NodeId(base),
            content: Some(NodeId(base + 1)),
            background: Some(NodeId(base + 2)),
            bottom_bar: None,
            toolbar: Some(NodeId(base + 3)),
            toolbar_center: Some(NodeId(base + 4)),
            back_button_icon: Some(NodeId(base + 5)),
            back_button_label: Some(NodeId(base + 6)),
            other: vec![NodeId(base + 7)],
        }
    }

    fn translate_of(style: &Style) -> Option<Length> {
        style.translate_value().map(|t: Translate| t.x)
    }

    fn timing() -> SlideTiming {
        SlideTiming::default()
    }

    #[test]
    fn test_push_content_track_shape() {
        let tracks = build_timeline(
            Direction::Push,
            &decomposition(0),
            &decomposition(100),
            Delta::default(),
            true,
            &timing(),
        );

        let enter = tracks.get(TrackKey::EnterContent).unwrap();
        assert_eq!(enter.targets(), &[NodeId(1), NodeId(2)]);
        assert!(matches!(enter.steps()[0], Step::SaveStyle));
        assert!(matches!(enter.steps()[2], Step::Wait { seconds } if seconds == 0.0));
        assert!(matches!(enter.steps()[4], Step::RestoreStyle));

        let steps: Vec<_> = enter.style_steps().collect();
        assert_eq!(steps.len(), 2);
        assert_eq!(translate_of(&steps[0].style), Some(Length::Percent(100.0)));
        assert_eq!(steps[0].duration, 0.0);
        assert_eq!(translate_of(&steps[1].style), Some(Length::Percent(0.0)));
        assert_eq!(steps[1].duration, 0.4);
        assert_eq!(steps[1].easing, Some(timing().easing));

        assert!(!tracks.contains(TrackKey::LeaveToolbar));
        assert!(!tracks.contains(TrackKey::EnterPage));
    }

    #[test]
    fn test_pop_uses_deltas() {
        let delta = Delta {
            title: Some(90.0),
            label: Some(20.0),
        };
        let tracks = build_timeline(
            Direction::Pop,
            &decomposition(0),
            &decomposition(100),
            delta,
            true,
            &timing(),
        );

        let center = tracks.get(TrackKey::EnterCenter).unwrap();
        let first = center.style_steps().next().unwrap();
        assert_eq!(translate_of(&first.style), Some(Length::Px(-90.0)));
        assert_eq!(first.style.opacity_value(), Some(0.0));

        let label = tracks.get(TrackKey::LeaveBackLabel).unwrap();
        let last = label.style_steps().last().unwrap();
        assert_eq!(translate_of(&last.style), Some(Length::Px(90.0)));

        assert!(tracks.contains(TrackKey::LeaveToolbar));
        assert!(!tracks.contains(TrackKey::EnterToolbar));
    }

    #[test]
    fn test_pop_enter_label_only_slides() {
        let delta = Delta {
            title: Some(90.0),
            label: Some(20.0),
        };
        let tracks = build_timeline(
            Direction::Pop,
            &decomposition(0),
            &decomposition(100),
            delta,
            true,
            &timing(),
        );
        let label = tracks.get(TrackKey::EnterBackLabel).unwrap();
        let steps: Vec<_> = label.style_steps().collect();
        assert_eq!(translate_of(&steps[0].style), Some(Length::Px(-20.0)));
        assert_eq!(translate_of(&steps[1].style), Some(Length::Px(0.0)));
        for step in steps {
            assert_eq!(step.style.opacity_value(), None);
        }
    }

    fn last(tracks: &TrackSet, key: TrackKey) -> StyleStep {
        tracks.get(key).unwrap().style_steps().last().cloned().unwrap()
    }

    #[test]
    fn test_track_curves() {
        let timing = timing();
        let push = build_timeline(
            Direction::Push,
            &decomposition(0),
            &decomposition(100),
            Delta::default(),
            true,
            &timing,
        );

        let toolbar = last(&push, TrackKey::EnterToolbar);
        assert_eq!(toolbar.easing, Some(timing.easing));
        assert_eq!(toolbar.easing_for(StyleProperty::Opacity), timing.easing);

        let other = last(&push, TrackKey::EnterOther);
        assert_eq!(other.easing, Some(EasingFunction::Linear));

        for key in [TrackKey::EnterBackLabel, TrackKey::LeaveCenter] {
            let step = last(&push, key);
            assert_eq!(step.easing_for(StyleProperty::Transform), timing.easing, "{key}");
            assert_eq!(
                step.easing_for(StyleProperty::Opacity),
                EasingFunction::Linear,
                "{key}"
            );
        }
        let leave_label = last(&push, TrackKey::LeaveBackLabel);
        assert_eq!(leave_label.easing_for(StyleProperty::Opacity), timing.easing);

        let pop = build_timeline(
            Direction::Pop,
            &decomposition(0),
            &decomposition(100),
            Delta::default(),
            true,
            &timing,
        );
        for key in [TrackKey::EnterCenter, TrackKey::LeaveBackLabel] {
            let step = last(&pop, key);
            assert_eq!(
                step.easing_for(StyleProperty::Opacity),
                EasingFunction::Linear,
                "{key}"
            );
        }
        assert!(last(&pop, TrackKey::LeaveToolbar).property_easing.is_empty());
    }

    #[test]
    fn test_absent_delta_translates_by_zero() {
        let tracks = build_timeline(
            Direction::Push,
            &decomposition(0),
            &decomposition(100),
            Delta {
                title: Some(50.0),
                label: None,
            },
            true,
            &timing(),
        );
        let label = tracks.get(TrackKey::LeaveBackLabel).unwrap();
        let last = label.style_steps().last().unwrap();
        assert_eq!(translate_of(&last.style), Some(Length::Px(0.0)));
    }

    #[test]
    fn test_empty_groups_are_omitted_except_finalizing() {
        let empty = Decomposition::default();
        let tracks = build_timeline(
            Direction::Push,
            &empty,
            &empty,
            Delta::default(),
            true,
            &timing(),
        );
        assert_eq!(tracks.keys().collect::<Vec<_>>(), vec![TrackKey::LeaveContent]);
        assert!(tracks.get(TrackKey::LeaveContent).unwrap().has_no_targets());
    }

    #[test]
    fn test_fallback_slides_whole_pages() {
        let tracks = build_timeline(
            Direction::Pop,
            &decomposition(0),
            &decomposition(100),
            Delta::default(),
            false,
            &timing(),
        );
        assert_eq!(
            tracks.keys().collect::<Vec<_>>(),
            vec![TrackKey::EnterPage, TrackKey::LeavePage]
        );

        let enter = tracks.get(TrackKey::EnterPage).unwrap();
        assert_eq!(enter.targets(), &[NodeId(0)]);
        let first = enter.style_steps().next().unwrap();
        assert_eq!(translate_of(&first.style), Some(Length::Percent(-25.0)));
        assert_eq!(first.style.opacity_value(), Some(0.9));

        let leave = tracks.get(TrackKey::LeavePage).unwrap();
        let last = leave.style_steps().last().unwrap();
        assert_eq!(translate_of(&last.style), Some(Length::Percent(100.0)));
    }

    #[test]
    fn test_delay_precedes_motion_on_every_track() {
        let timing = SlideTiming::new(EasingFunction::EaseOut, 0.1, 0.3).unwrap();
        let tracks = build_timeline(
            Direction::Push,
            &decomposition(0),
            &decomposition(100),
            Delta::default(),
            true,
            &timing,
        );
        for (key, track) in tracks.iter() {
            assert!(
                matches!(track.steps()[2], Step::Wait { seconds } if seconds == 0.1),
                "{key}"
            );
            assert!((track.duration() - 0.4).abs() < 1e-9, "{key}");
        }
    }

    #[test]
    fn test_longest_prefers_earliest_on_tie() {
        let tracks = build_timeline(
            Direction::Push,
            &decomposition(0),
            &decomposition(100),
            Delta::default(),
            true,
            &timing(),
        );
        assert_eq!(tracks.longest().map(|(k, _)| k), Some(TrackKey::EnterContent));
    }
}
