//! Pointer-relative card effects: the glow origin that follows the cursor
//! across project cards and the 3D tilt with a glare highlight.

pub const TILT_MAX_DEG: f64 = 8.0;
pub const TILT_PERSPECTIVE_PX: f64 = 1_000.0;
pub const TILT_SPEED_MS: u32 = 400;
pub const TILT_MAX_GLARE: f64 = 0.15;

pub const SKILL_HOVER_SCALE: f64 = 1.04;
pub const SKILL_HOVER_IN: f64 = 0.25;
pub const SKILL_HOVER_OUT: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CardRect {
    /// Pointer position as fractions of the card, `None` for an empty rect.
    fn fraction(&self, client_x: f64, client_y: f64) -> Option<(f64, f64)> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some((
            (client_x - self.left) / self.width,
            (client_y - self.top) / self.height,
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub x_percent: f64,
    pub y_percent: f64,
}

impl Glow {
    pub fn style(&self) -> String {
        format!("--mx: {:.1}%; --my: {:.1}%;", self.x_percent, self.y_percent)
    }
}

pub fn glow_origin(client_x: f64, client_y: f64, rect: &CardRect) -> Option<Glow> {
    let (fx, fy) = rect.fraction(client_x, client_y)?;
    Some(Glow {
        x_percent: fx * 100.0,
        y_percent: fy * 100.0,
    })
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub glare: f64,
}

impl Tilt {
    pub fn flat() -> Self {
        Self {
            rotate_x: 0.0,
            rotate_y: 0.0,
            glare: 0.0,
        }
    }

    pub fn transform(&self) -> String {
        format!(
            "perspective({TILT_PERSPECTIVE_PX:.0}px) rotateX({:.2}deg) rotateY({:.2}deg) scale3d(1, 1, 1)",
            self.rotate_x, self.rotate_y
        )
    }

    pub fn style(&self) -> String {
        format!(
            "transform: {}; transition: transform {TILT_SPEED_MS}ms ease-out; --glare: {:.3};",
            self.transform(),
            self.glare
        )
    }
}

/// Pointer in the top-left corner tips that corner towards the viewer.
pub fn tilt(client_x: f64, client_y: f64, rect: &CardRect) -> Option<Tilt> {
    let (fx, fy) = rect.fraction(client_x, client_y)?;
    let fx = fx.clamp(0.0, 1.0);
    let fy = fy.clamp(0.0, 1.0);

    Some(Tilt {
        rotate_x: fy * TILT_MAX_DEG - TILT_MAX_DEG / 2.0,
        rotate_y: TILT_MAX_DEG / 2.0 - fx * TILT_MAX_DEG,
        glare: fy * TILT_MAX_GLARE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> CardRect {
        CardRect {
            left: 100.0,
            top: 50.0,
            width: 200.0,
            height: 100.0,
        }
    }

    #[test]
    fn glow_follows_pointer_in_percent() {
        let glow = glow_origin(150.0, 75.0, &card()).expect("non-empty card");
        assert_eq!(glow.style(), "--mx: 25.0%; --my: 25.0%;");
    }

    #[test]
    fn empty_rect_has_no_effect() {
        let empty = CardRect {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 10.0,
        };
        assert!(glow_origin(1.0, 1.0, &empty).is_none());
        assert!(tilt(1.0, 1.0, &empty).is_none());
    }

    #[test]
    fn centre_is_flat_and_corners_hit_the_limit() {
        let centre = tilt(200.0, 100.0, &card()).expect("tilt");
        assert_eq!((centre.rotate_x, centre.rotate_y), (0.0, 0.0));

        let corner = tilt(100.0, 50.0, &card()).expect("tilt");
        assert_eq!(corner.rotate_x, -4.0);
        assert_eq!(corner.rotate_y, 4.0);
        assert_eq!(corner.glare, 0.0);

        let far = tilt(10_000.0, 10_000.0, &card()).expect("tilt");
        assert_eq!(far.rotate_x, 4.0);
        assert_eq!(far.rotate_y, -4.0);
        assert!((far.glare - TILT_MAX_GLARE).abs() < 1e-12);
    }

    #[test]
    fn flat_transform_string() {
        assert_eq!(
            Tilt::flat().transform(),
            "perspective(1000px) rotateX(0.00deg) rotateY(0.00deg) scale3d(1, 1, 1)"
        );
    }
}
