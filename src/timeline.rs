//! Hero entrance: a fixed sequence played once on load. Every step starts at
//! an absolute offset from the moment the timeline is played.

use crate::tween::{stagger, Pose, TweenSpec};

pub const LINE_STAGGER: f64 = 0.15;

pub struct HeroTargets<T> {
    pub badge: Option<T>,
    pub lines: Vec<T>,
    pub subtext: Option<T>,
    pub role: Option<T>,
    pub cta: Option<T>,
    pub socials: Option<T>,
    pub scroll_indicator: Option<T>,
}

impl<T> Default for HeroTargets<T> {
    fn default() -> Self {
        Self {
            badge: None,
            lines: Vec::new(),
            subtext: None,
            role: None,
            cta: None,
            socials: None,
            scroll_indicator: None,
        }
    }
}

fn rise(distance: f64, duration: f64, at: f64) -> TweenSpec {
    TweenSpec::from_to(
        Pose::hidden().with_y(distance),
        Pose::shown().with_y(0.0),
        duration,
    )
    .delay(at)
}

pub fn entrance<T>(hero: HeroTargets<T>) -> Vec<(T, TweenSpec)> {
    let mut steps = Vec::new();

    if let Some(badge) = hero.badge {
        steps.push((badge, rise(30.0, 0.8, 0.3)));
    }
    steps.extend(stagger(hero.lines, &rise(60.0, 1.0, 0.5), LINE_STAGGER));
    if let Some(subtext) = hero.subtext {
        steps.push((subtext, rise(30.0, 0.8, 1.1)));
    }
    if let Some(role) = hero.role {
        steps.push((role, rise(20.0, 0.6, 1.4)));
    }
    if let Some(cta) = hero.cta {
        steps.push((cta, rise(20.0, 0.6, 1.6)));
    }
    if let Some(socials) = hero.socials {
        steps.push((socials, rise(20.0, 0.6, 1.8)));
    }
    if let Some(indicator) = hero.scroll_indicator {
        steps.push((
            indicator,
            TweenSpec::from_to(Pose::hidden(), Pose::shown(), 1.0).delay(2.2),
        ));
    }

    steps
}

/// Guards the entrance so it can only be played once.
#[derive(Debug, Default)]
pub struct EntranceTimeline {
    played: bool,
}

impl EntranceTimeline {
    pub fn play<T>(&mut self, hero: HeroTargets<T>) -> Option<Vec<(T, TweenSpec)>> {
        if self.played {
            return None;
        }
        self.played = true;
        Some(entrance(hero))
    }

    pub fn has_played(&self) -> bool {
        self.played
    }
}
