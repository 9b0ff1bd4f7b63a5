//! Simulated contact form. Nothing is sent anywhere: submitting locks the
//! button for a fixed "network" delay, then reports success and hides the
//! success banner again a few seconds later. Times are in milliseconds.

pub const DEFAULT_SEND_DELAY_MS: u32 = 1_800;
pub const DEFAULT_SUCCESS_VISIBLE_MS: u32 = 5_000;
pub const SEND_LABEL: &str = "Send Message";
pub const PENDING_LABEL: &str = "Sending…";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormTiming {
    pub send_delay_ms: u32,
    pub success_visible_ms: u32,
}

impl Default for FormTiming {
    fn default() -> Self {
        Self {
            send_delay_ms: DEFAULT_SEND_DELAY_MS,
            success_visible_ms: DEFAULT_SUCCESS_VISIBLE_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Sending { since: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormEvent {
    /// Button is usable again, the banner is shown and fields are cleared.
    Restored,
    BannerHidden,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContactForm {
    timing: FormTiming,
    phase: Phase,
    banner_visible: bool,
    /// Every restore schedules its own hide; an earlier one still fires
    /// after a resubmit.
    banner_hides: Vec<f64>,
    driver: u64,
}

impl ContactForm {
    pub fn new(timing: FormTiming) -> Self {
        Self {
            timing,
            phase: Phase::Idle,
            banner_visible: false,
            banner_hides: Vec::new(),
            driver: 0,
        }
    }

    pub fn submit(&mut self, now: f64) -> bool {
        if self.is_sending() {
            return false;
        }
        self.phase = Phase::Sending { since: now };
        true
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.phase, Phase::Sending { .. })
    }

    pub fn button_disabled(&self) -> bool {
        self.is_sending()
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_sending() {
            PENDING_LABEL
        } else {
            SEND_LABEL
        }
    }

    pub fn banner_visible(&self) -> bool {
        self.banner_visible
    }

    fn restore_at(&self) -> Option<f64> {
        match self.phase {
            Phase::Sending { since } => Some(since + f64::from(self.timing.send_delay_ms)),
            Phase::Idle => None,
        }
    }

    /// The next moment `advance` has something to report.
    pub fn next_deadline(&self) -> Option<f64> {
        self.restore_at()
            .into_iter()
            .chain(self.banner_hides.iter().copied())
            .reduce(f64::min)
    }

    pub fn advance(&mut self, now: f64) -> Vec<FormEvent> {
        let mut events = Vec::new();

        if let Some(restored_at) = self.restore_at().filter(|at| *at <= now) {
            self.hide_due(restored_at, &mut events);
            self.phase = Phase::Idle;
            self.banner_visible = true;
            self.banner_hides
                .push(restored_at + f64::from(self.timing.success_visible_ms));
            events.push(FormEvent::Restored);
        }
        self.hide_due(now, &mut events);

        events
    }

    fn hide_due(&mut self, now: f64, events: &mut Vec<FormEvent>) {
        let before = self.banner_hides.len();
        self.banner_hides.retain(|at| *at > now);
        if self.banner_hides.len() < before && self.banner_visible {
            self.banner_visible = false;
            events.push(FormEvent::BannerHidden);
        }
    }

    /// Starts a new deadline driver and retires any earlier one.
    pub fn start_driver(&mut self) -> u64 {
        self.driver += 1;
        self.driver
    }

    /// Next wake-up for `driver`, `None` once it has been superseded or
    /// nothing is pending.
    pub fn driver_deadline(&self, driver: u64) -> Option<f64> {
        if driver != self.driver {
            return None;
        }
        self.next_deadline()
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(FormTiming::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_locks_the_button_immediately() {
        let mut form = ContactForm::default();
        assert!(form.submit(1_000.0));
        assert!(form.button_disabled());
        assert_eq!(form.button_label(), PENDING_LABEL);
        assert!(!form.banner_visible());
    }

    #[test]
    fn button_is_restored_no_sooner_than_the_delay() {
        let mut form = ContactForm::default();
        form.submit(1_000.0);

        assert!(form.advance(2_799.0).is_empty());
        assert!(form.button_disabled());

        assert_eq!(form.advance(2_800.0), vec![FormEvent::Restored]);
        assert!(!form.button_disabled());
        assert_eq!(form.button_label(), SEND_LABEL);
        assert!(form.banner_visible());
    }

    #[test]
    fn banner_hides_after_its_own_delay() {
        let mut form = ContactForm::default();
        form.submit(0.0);
        form.advance(1_800.0);

        assert_eq!(form.next_deadline(), Some(6_800.0));
        assert!(form.advance(6_799.0).is_empty());
        assert_eq!(form.advance(6_800.0), vec![FormEvent::BannerHidden]);
        assert!(!form.banner_visible());
        assert_eq!(form.next_deadline(), None);
    }

    #[test]
    fn late_poll_reports_both_events() {
        let mut form = ContactForm::default();
        form.submit(0.0);
        assert_eq!(
            form.advance(60_000.0),
            vec![FormEvent::Restored, FormEvent::BannerHidden]
        );
    }

    #[test]
    fn double_submit_is_ignored_while_sending() {
        let mut form = ContactForm::default();
        assert!(form.submit(0.0));
        assert!(!form.submit(100.0));
        assert_eq!(form.next_deadline(), Some(1_800.0));
    }

    #[test]
    fn resubmitting_while_banner_shows_is_allowed() {
        let mut form = ContactForm::default();
        form.submit(0.0);
        form.advance(1_800.0);
        assert!(form.submit(2_000.0));
        assert!(form.banner_visible());
        assert_eq!(form.next_deadline(), Some(3_800.0));
    }

    #[test]
    fn earlier_banner_hide_still_fires_after_a_resubmit() {
        let mut form = ContactForm::default();
        form.submit(0.0);
        assert_eq!(form.advance(1_800.0), vec![FormEvent::Restored]);
        assert!(form.submit(2_000.0));

        assert_eq!(form.advance(3_800.0), vec![FormEvent::Restored]);
        assert_eq!(form.next_deadline(), Some(6_800.0));
        assert_eq!(form.advance(6_800.0), vec![FormEvent::BannerHidden]);
        assert!(!form.banner_visible());

        assert_eq!(form.next_deadline(), Some(8_800.0));
        assert!(form.advance(8_800.0).is_empty());
        assert_eq!(form.next_deadline(), None);
    }

    #[test]
    fn hide_that_falls_during_a_resend_happens_before_the_restore() {
        let mut form = ContactForm::default();
        form.submit(0.0);
        form.advance(1_800.0);
        assert!(form.submit(6_000.0));

        assert_eq!(
            form.advance(7_900.0),
            vec![FormEvent::BannerHidden, FormEvent::Restored]
        );
        assert!(form.banner_visible());
        assert_eq!(form.next_deadline(), Some(12_800.0));
    }

    #[test]
    fn a_new_driver_retires_the_previous_one() {
        let mut form = ContactForm::default();
        form.submit(0.0);
        let first = form.start_driver();
        assert_eq!(form.driver_deadline(first), Some(1_800.0));

        form.advance(1_800.0);
        assert!(form.submit(2_000.0));
        let second = form.start_driver();
        assert_eq!(form.driver_deadline(first), None);
        assert_eq!(form.driver_deadline(second), Some(3_800.0));

        form.advance(60_000.0);
        assert_eq!(form.driver_deadline(second), None);
    }
}
