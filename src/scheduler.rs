//! The one owned animation scheduler.
//!
//! Tweens, one-shot visibility triggers and the merged pose of every target
//! live here. A host drives it by calling [`Scheduler::advance`] once per
//! animation frame and [`Scheduler::scroll`] whenever the viewport moves.
//! Rendering goes through a [`Stage`], so tests can swap the DOM for a
//! recorder and step time by hand.

use crate::tween::{Ease, Pose, TweenSpec};

/// Elapsed frame time above this is treated as a stall.
pub const LAG_THRESHOLD: f64 = 0.5;
pub const LAG_STEP: f64 = 1.0 / 30.0;
pub const REDUCED_MOTION_TIME_SCALE: f64 = 100.0;

/// Rendering backend a scheduler writes to.
pub trait Stage<T> {
    fn apply(&mut self, target: &T, pose: &Pose);
    fn add_class(&mut self, target: &T, class: &str);
}

struct ActiveTween<T> {
    target: T,
    from: Option<Pose>,
    to: Pose,
    start: f64,
    duration: f64,
    ease: Ease,
    complete_class: Option<&'static str>,
    primed: bool,
    started: bool,
}

/// Fires once when its target's top reaches `start` of the viewport height.
pub struct Trigger<T> {
    target: T,
    start: f64,
    tweens: Vec<(T, TweenSpec)>,
    enter_class: Option<&'static str>,
    fired: bool,
}

impl<T> Trigger<T> {
    pub fn new(target: T, start: f64) -> Self {
        Self {
            target,
            start,
            tweens: Vec::new(),
            enter_class: None,
            fired: false,
        }
    }

    pub fn tween(mut self, target: T, spec: TweenSpec) -> Self {
        self.tweens.push((target, spec));
        self
    }

    pub fn tweens(mut self, tweens: impl IntoIterator<Item = (T, TweenSpec)>) -> Self {
        self.tweens.extend(tweens);
        self
    }

    pub fn enter_class(mut self, class: &'static str) -> Self {
        self.enter_class = Some(class);
        self
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn planned(&self) -> &[(T, TweenSpec)] {
        &self.tweens
    }

    pub fn enter_class_name(&self) -> Option<&'static str> {
        self.enter_class
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    fn reached(&self, top: f64, viewport_height: f64) -> bool {
        top <= viewport_height * self.start
    }
}

pub struct Scheduler<T> {
    clock: f64,
    time_scale: f64,
    tweens: Vec<ActiveTween<T>>,
    triggers: Vec<Trigger<T>>,
    poses: Vec<(T, Pose)>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            clock: 0.0,
            time_scale: 1.0,
            tweens: Vec::new(),
            triggers: Vec::new(),
            poses: Vec::new(),
        }
    }
}

impl<T: Clone + PartialEq> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn active_tweens(&self) -> usize {
        self.tweens.len()
    }

    pub fn pending_triggers(&self) -> usize {
        self.triggers.iter().filter(|trigger| !trigger.fired).count()
    }

    pub fn pose_of(&self, target: &T) -> Option<Pose> {
        self.poses
            .iter()
            .find(|(candidate, _)| candidate == target)
            .map(|(_, pose)| *pose)
    }

    pub fn tween(&mut self, target: T, spec: TweenSpec) {
        self.tweens.push(ActiveTween {
            target,
            from: spec.from,
            to: spec.to,
            start: self.clock + spec.delay.max(0.0),
            duration: spec.duration.max(0.0),
            ease: spec.ease,
            complete_class: spec.complete_class,
            primed: false,
            started: false,
        });
    }

    /// Tweens from the current pose, replacing whatever else animates the
    /// same properties of the target.
    pub fn tween_to(&mut self, target: T, spec: TweenSpec) {
        let to = spec.to;
        self.tweens.retain(|tween| {
            tween.target != target || !overlaps(&tween.to, &to)
        });
        self.tween(target, TweenSpec { from: None, ..spec });
    }

    pub fn trigger(&mut self, trigger: Trigger<T>) {
        self.triggers.push(trigger);
    }

    /// Evaluates unfired triggers against the viewport. `probe` reports a
    /// target's top edge relative to the viewport, `None` when it is gone.
    /// Returns how many triggers fired.
    pub fn scroll(
        &mut self,
        viewport_height: f64,
        probe: impl Fn(&T) -> Option<f64>,
        stage: &mut impl Stage<T>,
    ) -> usize {
        let mut fired = Vec::new();
        for trigger in self.triggers.iter_mut().filter(|trigger| !trigger.fired) {
            let Some(top) = probe(&trigger.target) else {
                continue;
            };
            if trigger.reached(top, viewport_height) {
                trigger.fired = true;
                if let Some(class) = trigger.enter_class {
                    stage.add_class(&trigger.target, class);
                }
                fired.append(&mut trigger.tweens);
            }
        }

        let count = self.triggers.iter().filter(|trigger| trigger.fired).count();
        self.triggers.retain(|trigger| !trigger.fired);
        for (target, spec) in fired {
            self.tween(target, spec);
        }
        count
    }

    pub fn advance(&mut self, dt: f64, stage: &mut impl Stage<T>) {
        self.clock += dt.max(0.0) * self.time_scale;
        let clock = self.clock;

        let mut finished = Vec::new();
        for (index, tween) in self.tweens.iter_mut().enumerate() {
            if clock < tween.start {
                if let (Some(from), false) = (tween.from, tween.primed) {
                    tween.primed = true;
                    let pose = merge_pose(&mut self.poses, &tween.target, &from);
                    stage.apply(&tween.target, &pose);
                }
                continue;
            }

            if !tween.started {
                tween.started = true;
                if tween.from.is_none() {
                    let current = self
                        .poses
                        .iter()
                        .find(|(candidate, _)| *candidate == tween.target)
                        .map(|(_, pose)| *pose)
                        .unwrap_or_default();
                    tween.from = Some(current);
                }
            }

            let progress = if tween.duration <= 0.0 {
                1.0
            } else {
                ((clock - tween.start) / tween.duration).min(1.0)
            };
            let from = tween.from.unwrap_or_default();
            let sampled = Pose::lerp(&from, &tween.to, tween.ease.apply(progress));
            let pose = merge_pose(&mut self.poses, &tween.target, &sampled);
            stage.apply(&tween.target, &pose);

            if progress >= 1.0 {
                if let Some(class) = tween.complete_class {
                    stage.add_class(&tween.target, class);
                }
                finished.push(index);
            }
        }

        for index in finished.into_iter().rev() {
            self.tweens.remove(index);
        }
    }

    /// Fast-forwards running tweens and drops every pending trigger.
    pub fn reduce_motion(&mut self) {
        self.time_scale = REDUCED_MOTION_TIME_SCALE;
        self.triggers.clear();
    }
}

/// Frame delta in seconds from two timestamps in milliseconds, with stalls
/// clamped to a single short step.
pub fn frame_delta(previous_ms: Option<f64>, now_ms: f64) -> f64 {
    let Some(previous_ms) = previous_ms else {
        return 0.0;
    };
    let elapsed = ((now_ms - previous_ms) / 1_000.0).max(0.0);
    if elapsed > LAG_THRESHOLD {
        LAG_STEP
    } else {
        elapsed
    }
}

fn merge_pose<T: Clone + PartialEq>(poses: &mut Vec<(T, Pose)>, target: &T, update: &Pose) -> Pose {
    if let Some((_, pose)) = poses.iter_mut().find(|(candidate, _)| candidate == target) {
        *pose = pose.merged(update);
        return *pose;
    }
    poses.push((target.clone(), *update));
    *update
}

fn overlaps(a: &Pose, b: &Pose) -> bool {
    (a.opacity.is_some() && b.opacity.is_some())
        || (a.x.is_some() && b.x.is_some())
        || (a.y.is_some() && b.y.is_some())
        || (a.scale.is_some() && b.scale.is_some())
        || (a.y_percent.is_some() && b.y_percent.is_some())
        || (a.count.is_some() && b.count.is_some())
}
