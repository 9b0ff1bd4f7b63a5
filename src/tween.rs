//! Poses, easing curves and tween descriptions.
//!
//! A [`Pose`] only carries the properties a tween touches; everything left
//! as `None` is untouched on the target.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power2Out,
    Power2InOut,
    Power3Out,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power2InOut => {
                if t < 0.5 {
                    4.0 * t.powi(3)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    pub opacity: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub scale: Option<f64>,
    pub y_percent: Option<f64>,
    pub count: Option<f64>,
}

impl Pose {
    pub fn hidden() -> Self {
        Self {
            opacity: Some(0.0),
            ..Self::default()
        }
    }

    pub fn shown() -> Self {
        Self {
            opacity: Some(1.0),
            ..Self::default()
        }
    }

    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn scaled(scale: f64) -> Self {
        Self {
            scale: Some(scale),
            ..Self::default()
        }
    }

    pub fn counter(value: f64) -> Self {
        Self {
            count: Some(value),
            ..Self::default()
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    pub fn with_y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_y_percent(mut self, y_percent: f64) -> Self {
        self.y_percent = Some(y_percent);
        self
    }

    /// Fields set on `other` win.
    pub fn merged(self, other: &Pose) -> Self {
        Self {
            opacity: other.opacity.or(self.opacity),
            x: other.x.or(self.x),
            y: other.y.or(self.y),
            scale: other.scale.or(self.scale),
            y_percent: other.y_percent.or(self.y_percent),
            count: other.count.or(self.count),
        }
    }

    /// Interpolates every field `to` sets. Missing start values fall back to
    /// the identity (opaque, untranslated, unscaled, zero).
    pub fn lerp(from: &Pose, to: &Pose, t: f64) -> Pose {
        let mix = |start: Option<f64>, end: Option<f64>, identity: f64| {
            end.map(|end| {
                let start = start.unwrap_or(identity);
                start + (end - start) * t
            })
        };

        Pose {
            opacity: mix(from.opacity, to.opacity, 1.0),
            x: mix(from.x, to.x, 0.0),
            y: mix(from.y, to.y, 0.0),
            scale: mix(from.scale, to.scale, 1.0),
            y_percent: mix(from.y_percent, to.y_percent, 0.0),
            count: mix(from.count, to.count, 0.0),
        }
    }

    /// CSS transform for the positional fields, if any is set.
    pub fn transform(&self) -> Option<String> {
        if self.x.is_none() && self.y.is_none() && self.scale.is_none() && self.y_percent.is_none() {
            return None;
        }

        let mut parts = Vec::with_capacity(3);
        if self.x.is_some() || self.y.is_some() {
            parts.push(format!(
                "translate({:.2}px, {:.2}px)",
                self.x.unwrap_or(0.0),
                self.y.unwrap_or(0.0)
            ));
        }
        if let Some(y_percent) = self.y_percent {
            parts.push(format!("translateY({y_percent:.2}%)"));
        }
        if let Some(scale) = self.scale {
            parts.push(format!("scale({scale:.4})"));
        }
        Some(parts.join(" "))
    }

    pub fn count_text(&self) -> Option<String> {
        self.count.map(|value| format!("{}", value.round() as i64))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TweenSpec {
    pub from: Option<Pose>,
    pub to: Pose,
    pub duration: f64,
    pub delay: f64,
    pub ease: Ease,
    pub complete_class: Option<&'static str>,
}

impl TweenSpec {
    pub fn from_to(from: Pose, to: Pose, duration: f64) -> Self {
        Self {
            from: Some(from),
            to,
            duration,
            delay: 0.0,
            ease: Ease::Power3Out,
            complete_class: None,
        }
    }

    /// Starts from whatever the target currently shows.
    pub fn to(to: Pose, duration: f64) -> Self {
        Self {
            from: None,
            ..Self::from_to(Pose::default(), to, duration)
        }
    }

    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn on_complete_class(mut self, class: &'static str) -> Self {
        self.complete_class = Some(class);
        self
    }
}

/// Same tween for every target, each starting `each` seconds after the
/// previous one.
pub fn stagger<T>(targets: Vec<T>, spec: &TweenSpec, each: f64) -> Vec<(T, TweenSpec)> {
    targets
        .into_iter()
        .enumerate()
        .map(|(index, target)| {
            let delay = spec.delay + index as f64 * each;
            (target, spec.clone().delay(delay))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eases_hit_both_ends() {
        for ease in [Ease::Linear, Ease::Power2Out, Ease::Power2InOut, Ease::Power3Out] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
            assert_eq!(ease.apply(2.0), 1.0);
        }
        assert!((Ease::Power2InOut.apply(0.5) - 0.5).abs() < 1e-12);
        assert!(Ease::Power3Out.apply(0.5) > Ease::Power2Out.apply(0.5));
    }

    #[test]
    fn lerp_only_touches_target_fields() {
        let from = Pose::hidden().with_y(40.0);
        let to = Pose::shown().with_y(0.0);
        let mid = Pose::lerp(&from, &to, 0.5);

        assert_eq!(mid.opacity, Some(0.5));
        assert_eq!(mid.y, Some(20.0));
        assert_eq!(mid.x, None);
        assert_eq!(mid.scale, None);
    }

    #[test]
    fn lerp_uses_identity_for_missing_start() {
        let mid = Pose::lerp(&Pose::default(), &Pose::scaled(2.0), 0.5);
        assert_eq!(mid.scale, Some(1.5));
    }

    #[test]
    fn merged_keeps_untouched_fields() {
        let base = Pose::at(10.0, 20.0).with_opacity(0.3);
        let merged = base.merged(&Pose::scaled(1.04));
        assert_eq!(merged, Pose::at(10.0, 20.0).with_opacity(0.3).with_scale(1.04));
    }

    #[test]
    fn transform_composes_present_parts() {
        assert_eq!(Pose::shown().transform(), None);
        assert_eq!(
            Pose::at(-60.0, 0.0).with_scale(0.95).transform().as_deref(),
            Some("translate(-60.00px, 0.00px) scale(0.9500)")
        );
        assert_eq!(
            Pose::default().with_y_percent(30.0).transform().as_deref(),
            Some("translateY(30.00%)")
        );
    }

    #[test]
    fn counter_text_rounds() {
        assert_eq!(Pose::counter(11.6).count_text().as_deref(), Some("12"));
        assert_eq!(Pose::shown().count_text(), None);
    }

    #[test]
    fn stagger_offsets_from_base_delay() {
        let spec = TweenSpec::to(Pose::shown(), 0.7).delay(0.1);
        let tweens = stagger(vec!["a", "b", "c"], &spec, 0.12);
        let delays: Vec<f64> = tweens.iter().map(|(_, spec)| spec.delay).collect();
        assert!((delays[0] - 0.1).abs() < 1e-12);
        assert!((delays[1] - 0.22).abs() < 1e-12);
        assert!((delays[2] - 0.34).abs() < 1e-12);
    }
}
