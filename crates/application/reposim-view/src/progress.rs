//! Cosmetic "what are we doing" ticker shown while a request is outstanding
//!
//! Purely presentational. It is driven by the caller's clock so it has no
//! timer of its own to leak: once stopped, ticks are ignored.

use std::time::{Duration, Instant};

/// Status lines, shown in order and wrapping
pub const LOADING_STEPS: [&str; 8] = [
    "Connecting to GitHub...",
    "Authorizing access...",
    "Cloning repository (simulated)...",
    "Analyzing file structure...",
    "Parsing frontend code...",
    "Inspecting backend dependencies...",
    "Generating AI analysis report...",
    "Finalizing...",
];

#[derive(Debug, Clone)]
pub struct ProgressTicker {
    interval: Duration,
    step: usize,
    /// When the current step began; `None` while stopped
    step_started: Option<Instant>,
}

impl ProgressTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            step: 0,
            step_started: None,
        }
    }

    /// Restart from the first step
    pub fn start(&mut self, now: Instant) {
        self.step = 0;
        self.step_started = Some(now);
    }

    pub fn stop(&mut self) {
        self.step_started = None;
    }

    pub fn is_running(&self) -> bool {
        self.step_started.is_some()
    }

    /// Move forward one step per whole interval elapsed since the current
    /// step began. Returns whether the step changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(started) = self.step_started else {
            return false;
        };

        let elapsed = now.saturating_duration_since(started);
        let whole = (elapsed.as_nanos() / self.interval.as_nanos()) as u32;
        if whole == 0 {
            return false;
        }

        self.step = (self.step + whole as usize) % LOADING_STEPS.len();
        self.step_started = Some(started + self.interval * whole);
        true
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn message(&self) -> &'static str {
        LOADING_STEPS[self.step]
    }

    /// Gauge fill, `(step + 1) / steps`
    pub fn ratio(&self) -> f64 {
        (self.step + 1) as f64 / LOADING_STEPS.len() as f64
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(1500);

    #[test]
    fn test_cycles_and_wraps() {
        let t0 = Instant::now();
        let mut ticker = ProgressTicker::new(STEP);
        ticker.start(t0);
        assert_eq!(ticker.message(), "Connecting to GitHub...");

        let mut seen = vec![ticker.step()];
        for i in 1..=LOADING_STEPS.len() {
            assert!(ticker.tick(t0 + STEP * i as u32));
            seen.push(ticker.step());
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5, 6, 7, 0]);
    }

    #[test]
    fn test_holds_between_intervals() {
        let t0 = Instant::now();
        let mut ticker = ProgressTicker::new(STEP);
        ticker.start(t0);

        assert!(!ticker.tick(t0 + Duration::from_millis(250)));
        assert!(!ticker.tick(t0 + Duration::from_millis(1499)));
        assert_eq!(ticker.step(), 0);

        assert!(ticker.tick(t0 + Duration::from_millis(1500)));
        assert!(!ticker.tick(t0 + Duration::from_millis(2999)));
        assert_eq!(ticker.step(), 1);
    }

    #[test]
    fn test_catches_up_after_a_late_tick() {
        let t0 = Instant::now();
        let mut ticker = ProgressTicker::new(STEP);
        ticker.start(t0);

        assert!(ticker.tick(t0 + Duration::from_millis(4600)));
        assert_eq!(ticker.step(), 3);
        assert_eq!(ticker.message(), "Analyzing file structure...");
        // Next boundary stays aligned to the start time
        assert!(ticker.tick(t0 + Duration::from_millis(6000)));
        assert_eq!(ticker.step(), 4);
    }

    #[test]
    fn test_stopped_ticker_never_advances() {
        let t0 = Instant::now();
        let mut ticker = ProgressTicker::new(STEP);
        ticker.start(t0);
        ticker.tick(t0 + STEP);
        ticker.stop();

        assert!(!ticker.is_running());
        assert!(!ticker.tick(t0 + STEP * 10));
        assert_eq!(ticker.step(), 1);
    }

    #[test]
    fn test_ratio() {
        let t0 = Instant::now();
        let mut ticker = ProgressTicker::new(STEP);
        ticker.start(t0);
        assert_eq!(ticker.ratio(), 0.125);
        ticker.tick(t0 + STEP * 7);
        assert_eq!(ticker.ratio(), 1.0);
    }
}
