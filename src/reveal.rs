//! Scroll reveal recipes, one per kind of page element.
//!
//! Each builder returns a one-shot [`Trigger`] for the scheduler. The
//! parameters mirror the page's design: a generic fade-up for anything
//! tagged `data-reveal`, class flips for skill cards and education rows,
//! sideways slides for the experience timeline, a staggered pop for the
//! certification grid and a three-part entrance for section headers.

use crate::scheduler::Trigger;
use crate::tween::{stagger, Ease, Pose, TweenSpec};

pub const REVEALED_CLASS: &str = "revealed";

pub const REVEAL_START: f64 = 0.88;
pub const SKILL_START: f64 = 0.90;
pub const COUNTER_START: f64 = 0.90;
pub const EDUCATION_START: f64 = 0.88;
pub const TIMELINE_START: f64 = 0.85;
pub const CERTS_START: f64 = 0.85;
pub const HEADER_START: f64 = 0.85;

const REVEAL_DISTANCE: f64 = 40.0;
const REVEAL_DURATION: f64 = 0.8;
const REVEAL_STAGGER: f64 = 0.08;
const REVEAL_STAGGER_GROUP: usize = 4;

const COUNTER_DURATION: f64 = 1.5;

const TIMELINE_DISTANCE: f64 = 60.0;
const TIMELINE_DURATION: f64 = 0.9;

const CERT_DURATION: f64 = 0.7;
const CERT_STAGGER: f64 = 0.12;
const CERT_START_SCALE: f64 = 0.95;

const PARALLAX_MAX_Y_PERCENT: f64 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn offset(self) -> f64 {
        match self {
            Self::Left => -TIMELINE_DISTANCE,
            Self::Right => TIMELINE_DISTANCE,
        }
    }
}

pub struct HeaderParts<T> {
    pub tag: Option<T>,
    pub title: Option<T>,
    pub subtitle: Option<T>,
}

/// Parses an explicit `data-delay` value in seconds.
pub fn parse_delay(raw: Option<&str>) -> Option<f64> {
    raw?.trim()
        .parse::<f64>()
        .ok()
        .filter(|delay| delay.is_finite() && *delay >= 0.0)
}

pub fn default_delay(index: usize) -> f64 {
    (index % REVEAL_STAGGER_GROUP) as f64 * REVEAL_STAGGER
}

/// Generic reveals outside the hero with their stagger index. The index
/// counts every `[data-reveal]` element in document order, hero ones
/// included, although only the non-hero ones are returned.
pub fn generic_reveals<T>(elements: impl IntoIterator<Item = (T, bool)>) -> Vec<(usize, T)> {
    elements
        .into_iter()
        .enumerate()
        .filter(|(_, (_, in_hero))| !in_hero)
        .map(|(index, (element, _))| (index, element))
        .collect()
}

pub fn fade_up<T: Clone>(target: T, index: usize, delay_override: Option<f64>) -> Trigger<T> {
    let delay = delay_override.unwrap_or_else(|| default_delay(index));
    let spec = TweenSpec::from_to(
        Pose::hidden().with_y(REVEAL_DISTANCE),
        Pose::shown().with_y(0.0),
        REVEAL_DURATION,
    )
    .delay(delay)
    .on_complete_class(REVEALED_CLASS);

    Trigger::new(target.clone(), REVEAL_START).tween(target, spec)
}

pub fn skill_card<T>(target: T) -> Trigger<T> {
    Trigger::new(target, SKILL_START).enter_class(REVEALED_CLASS)
}

pub fn education_item<T>(target: T) -> Trigger<T> {
    Trigger::new(target, EDUCATION_START).enter_class(REVEALED_CLASS)
}

pub fn counter<T: Clone>(target: T, value: i64) -> Trigger<T> {
    let spec = TweenSpec::from_to(Pose::counter(0.0), Pose::counter(value as f64), COUNTER_DURATION)
        .ease(Ease::Power2Out);
    Trigger::new(target.clone(), COUNTER_START).tween(target, spec)
}

/// Leading integer of a `data-count` value, so `"12+"` and `"12.5"` count
/// to 12.
pub fn parse_count(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim_start();
    let sign_len = usize::from(raw.starts_with(['+', '-']));
    let digits_len = raw[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    raw[..sign_len + digits_len].parse::<i64>().ok()
}

pub fn timeline_card<T: Clone>(target: T, side: Side) -> Trigger<T> {
    let spec = TweenSpec::from_to(
        Pose::hidden().with_x(side.offset()),
        Pose::shown().with_x(0.0),
        TIMELINE_DURATION,
    );
    Trigger::new(target.clone(), TIMELINE_START).tween(target, spec)
}

pub fn cert_grid<T>(grid: T, cards: Vec<T>) -> Trigger<T> {
    let spec = TweenSpec::from_to(
        Pose::hidden().with_y(REVEAL_DISTANCE).with_scale(CERT_START_SCALE),
        Pose::shown().with_y(0.0).with_scale(1.0),
        CERT_DURATION,
    );
    Trigger::new(grid, CERTS_START).tweens(stagger(cards, &spec, CERT_STAGGER))
}

pub fn section_header<T>(header: T, parts: HeaderParts<T>) -> Trigger<T> {
    let rise = |distance: f64, duration: f64, delay: f64| {
        TweenSpec::from_to(
            Pose::hidden().with_y(distance),
            Pose::shown().with_y(0.0),
            duration,
        )
        .delay(delay)
    };

    let mut trigger = Trigger::new(header, HEADER_START);
    if let Some(tag) = parts.tag {
        trigger = trigger.tween(tag, rise(20.0, 0.6, 0.0));
    }
    if let Some(title) = parts.title {
        trigger = trigger.tween(title, rise(30.0, 0.8, 0.15));
    }
    if let Some(subtitle) = parts.subtitle {
        trigger = trigger.tween(subtitle, rise(20.0, 0.7, 0.35));
    }
    trigger
}

/// Scrubbed hero backdrop offset: 0% while the hero top sits at the viewport
/// top, 30% once its bottom has scrolled past.
pub fn parallax_y_percent(scroll_y: f64, hero_top: f64, hero_height: f64) -> f64 {
    if hero_height <= 0.0 {
        return 0.0;
    }
    let progress = ((scroll_y - hero_top) / hero_height).clamp(0.0, 1.0);
    progress * PARALLAX_MAX_Y_PERCENT
}

pub fn parallax_pose(scroll_y: f64, hero_top: f64, hero_height: f64) -> Pose {
    Pose::default().with_y_percent(parallax_y_percent(scroll_y, hero_top, hero_height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fade_up_staggers_by_index_in_groups_of_four() {
        let delays: Vec<f64> = (0..6)
            .map(|index| fade_up("el", index, None).planned()[0].1.delay)
            .collect();
        let expected = [0.0, 0.08, 0.16, 0.24, 0.0, 0.08];
        for (delay, expected) in delays.iter().zip(expected) {
            assert!((delay - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn hero_elements_still_take_a_stagger_slot() {
        let elements = vec![
            ("hero-subtext", true),
            ("about-copy", false),
            ("stat-1", false),
            ("stat-2", false),
            ("stat-3", false),
        ];
        let delays: Vec<(&str, f64)> = generic_reveals(elements)
            .into_iter()
            .map(|(index, element)| (element, default_delay(index)))
            .collect();

        let expected = [("about-copy", 0.08), ("stat-1", 0.16), ("stat-2", 0.24), ("stat-3", 0.0)];
        assert_eq!(delays.len(), expected.len());
        for ((element, delay), (expected_element, expected_delay)) in delays.iter().zip(expected) {
            assert_eq!(*element, expected_element);
            assert!((delay - expected_delay).abs() < 1e-12);
        }
    }

    #[test]
    fn explicit_delay_wins() {
        let trigger = fade_up("el", 3, parse_delay(Some("0.5")));
        let (_, spec) = &trigger.planned()[0];
        assert_eq!(spec.delay, 0.5);
        assert_eq!(spec.complete_class, Some(REVEALED_CLASS));
        assert_eq!(trigger.start(), REVEAL_START);
    }

    #[test]
    fn bad_delays_are_ignored() {
        assert_eq!(parse_delay(Some("soon")), None);
        assert_eq!(parse_delay(Some("-1")), None);
        assert_eq!(parse_delay(None), None);
        assert_eq!(parse_delay(Some(" 0.2 ")), Some(0.2));
    }

    #[test]
    fn class_only_reveals_have_no_tweens() {
        let skill = skill_card("skill");
        assert!(skill.planned().is_empty());
        assert_eq!(skill.enter_class_name(), Some(REVEALED_CLASS));
        assert_eq!(skill.start(), SKILL_START);
        assert_eq!(education_item("edu").start(), EDUCATION_START);
    }

    #[test]
    fn timeline_cards_slide_in_from_their_side() {
        let left = timeline_card("l", Side::Left);
        let right = timeline_card("r", Side::Right);
        assert_eq!(left.planned()[0].1.from.and_then(|pose| pose.x), Some(-60.0));
        assert_eq!(right.planned()[0].1.from.and_then(|pose| pose.x), Some(60.0));
        assert_eq!(right.planned()[0].1.to, Pose::shown().with_x(0.0));
    }

    #[test]
    fn cert_grid_animates_every_card() {
        let trigger = cert_grid("grid", vec!["a", "b", "c"]);
        let targets: Vec<&str> = trigger.planned().iter().map(|(target, _)| *target).collect();
        assert_eq!(targets, vec!["a", "b", "c"]);
        assert_eq!(*trigger.target(), "grid");
        assert!((trigger.planned()[2].1.delay - 0.24).abs() < 1e-12);
    }

    #[test]
    fn header_skips_missing_parts() {
        let trigger = section_header(
            "header",
            HeaderParts {
                tag: Some("tag"),
                title: None,
                subtitle: Some("sub"),
            },
        );
        let delays: Vec<(&str, f64)> = trigger
            .planned()
            .iter()
            .map(|(target, spec)| (*target, spec.delay))
            .collect();
        assert_eq!(delays, vec![("tag", 0.0), ("sub", 0.35)]);
    }

    #[test]
    fn counter_counts_up_to_target() {
        let trigger = counter("stat", 12);
        assert_eq!(trigger.planned()[0].1.to.count, Some(12.0));
        assert_eq!(parse_count(Some("12")), Some(12));
        assert_eq!(parse_count(Some("x")), None);
    }

    #[test]
    fn counts_use_the_leading_integer() {
        assert_eq!(parse_count(Some("12.5")), Some(12));
        assert_eq!(parse_count(Some("12+")), Some(12));
        assert_eq!(parse_count(Some("  -3 items")), Some(-3));
        assert_eq!(parse_count(Some("+7")), Some(7));
        assert_eq!(parse_count(Some("-")), None);
        assert_eq!(parse_count(Some("")), None);
        assert_eq!(parse_count(None), None);
    }

    #[test]
    fn parallax_is_clamped() {
        assert_eq!(parallax_y_percent(0.0, 0.0, 800.0), 0.0);
        assert_eq!(parallax_y_percent(400.0, 0.0, 800.0), 15.0);
        assert_eq!(parallax_y_percent(5_000.0, 0.0, 800.0), 30.0);
        assert_eq!(parallax_y_percent(100.0, 0.0, 0.0), 0.0);
    }
}
