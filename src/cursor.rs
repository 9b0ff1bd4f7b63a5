pub const FOLLOWER_EASE: f64 = 0.12;
/// Seconds the cursor dot takes to catch up with the pointer.
pub const DOT_CATCH_UP: f64 = 0.1;
pub const HOVER_CLASS: &str = "cursor-hover";
pub const HOVER_SELECTOR: &str = "a, button, .skill-card, .project-card, .cert-card";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pointer target plus a follower that trails it with exponential smoothing.
#[derive(Clone, Debug, Default)]
pub struct CursorFollower {
    pointer: Point,
    follower: Point,
    hovering: bool,
}

impl CursorFollower {
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer = Point::new(x, y);
    }

    /// One animation frame of smoothing.
    pub fn tick(&mut self) -> Point {
        self.follower.x += (self.pointer.x - self.follower.x) * FOLLOWER_EASE;
        self.follower.y += (self.pointer.y - self.follower.y) * FOLLOWER_EASE;
        self.follower
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn follower(&self) -> Point {
        self.follower
    }

    pub fn set_hovering(&mut self, hovering: bool) -> bool {
        let changed = self.hovering != hovering;
        self.hovering = hovering;
        changed
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_moves_twelve_percent_of_the_gap() {
        let mut cursor = CursorFollower::default();
        cursor.pointer_moved(100.0, -50.0);

        let follower = cursor.tick();
        assert!((follower.x - 12.0).abs() < 1e-9);
        assert!((follower.y + 6.0).abs() < 1e-9);
    }

    #[test]
    fn follower_converges_without_overshoot() {
        let mut cursor = CursorFollower::default();
        cursor.pointer_moved(400.0, 300.0);

        let mut previous = 0.0;
        for _ in 0..200 {
            let follower = cursor.tick();
            assert!(follower.x >= previous && follower.x <= 400.0);
            previous = follower.x;
        }
        assert!((cursor.follower().x - 400.0).abs() < 1e-6);
        assert!((cursor.follower().y - 300.0).abs() < 1e-6);
    }

    #[test]
    fn hover_reports_changes_only() {
        let mut cursor = CursorFollower::default();
        assert!(cursor.set_hovering(true));
        assert!(!cursor.set_hovering(true));
        assert!(cursor.is_hovering());
        assert!(cursor.set_hovering(false));
    }
}
