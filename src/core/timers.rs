// core/timers.rs

// Named, independently armable timers compared against a monotonic clock.
// Nothing fires on its own: callers ask how long a timer has been armed when a
// sample arrives, and act on the answer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::{ProxemicsError, Result};

/// Timers the interaction core knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerName {
    /// Armed on Far entry; drives the second invitation
    FarEntered,
    /// Armed on Far entry; drives the auto-neutral reset
    FarForNeutral,
    /// Armed on Near entry; drives the first pat request
    NearEntered,
    /// Armed when the first pat request is issued
    PatRequested,
}

/// Collection of armed-at timestamps keyed by timer name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerSet {
    armed: HashMap<TimerName, Instant>,
}

impl TimerSet {
    /// Creates an empty set
    pub fn new() -> Self {
        TimerSet::default()
    }

    /// Arms (or re-arms) a timer at `now` and returns the armed-at instant
    pub fn arm(&mut self, name: TimerName, now: Instant) -> Instant {
        self.armed.insert(name, now);
        now
    }

    /// Returns when the timer was armed
    pub fn armed_at(&self, name: TimerName) -> Option<Instant> {
        self.armed.get(&name).copied()
    }

    /// Returns true if the timer is armed
    pub fn is_armed(&self, name: TimerName) -> bool {
        self.armed.contains_key(&name)
    }

    /// Time since the timer was armed, or None if it is not armed.
    /// A `now` earlier than the armed-at instant counts as zero elapsed.
    pub fn elapsed_since(&self, name: TimerName, now: Instant) -> Option<Duration> {
        self.armed_at(name)
            .map(|armed_at| now.saturating_duration_since(armed_at))
    }

    /// True only if the timer is armed and strictly more than `limit` has elapsed
    pub fn has_exceeded(&self, name: TimerName, now: Instant, limit: Duration) -> bool {
        self.elapsed_since(name, now)
            .is_some_and(|elapsed| elapsed > limit)
    }

    /// Disarms a single timer
    pub fn clear(&mut self, name: TimerName) {
        self.armed.remove(&name);
    }

    /// Disarms every timer
    pub fn clear_all(&mut self) {
        self.armed.clear();
    }

    /// Returns true when nothing is armed
    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}

/// Escalation delays, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Far dwell before the second invitation
    pub far_second_prompt_secs: f64,
    /// Far dwell before the auto-neutral reset
    pub far_neutral_secs: f64,
    /// Near dwell before the first pat request
    pub near_pat_request_secs: f64,
    /// Wait after the first pat request before the second one
    pub pat_second_request_secs: f64,
    /// Period for the optional scheduled tick; None keeps the core purely reactive
    pub tick_interval_ms: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            far_second_prompt_secs: 5.0,
            far_neutral_secs: 20.0,
            near_pat_request_secs: 4.0,
            pat_second_request_secs: 6.0,
            tick_interval_ms: None,
        }
    }
}

impl TimingConfig {
    /// Far dwell before the second invitation
    pub fn far_second_prompt(&self) -> Duration {
        seconds(self.far_second_prompt_secs)
    }

    /// Far dwell before the auto-neutral reset
    pub fn far_neutral(&self) -> Duration {
        seconds(self.far_neutral_secs)
    }

    /// Near dwell before the first pat request
    pub fn near_pat_request(&self) -> Duration {
        seconds(self.near_pat_request_secs)
    }

    /// Wait after the first pat request before the second one
    pub fn pat_second_request(&self) -> Duration {
        seconds(self.pat_second_request_secs)
    }

    /// Scheduled tick period, if enabled
    pub fn tick_interval(&self) -> Option<Duration> {
        self.tick_interval_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// Rejects negative, non-finite or unrepresentably large delays
    pub fn validate(&self) -> Result<()> {
        let delays = [
            ("far_second_prompt_secs", self.far_second_prompt_secs),
            ("far_neutral_secs", self.far_neutral_secs),
            ("near_pat_request_secs", self.near_pat_request_secs),
            ("pat_second_request_secs", self.pat_second_request_secs),
        ];
        for (name, value) in delays {
            if !value.is_finite() || value < 0.0 {
                return Err(ProxemicsError::ConfigError(format!(
                    "timing.{} must be a non-negative number of seconds, got {}",
                    name, value
                )));
            }
            if Duration::try_from_secs_f64(value).is_err() {
                return Err(ProxemicsError::ConfigError(format!(
                    "timing.{} is too large to represent, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

// Unvalidated oversized delays saturate so they never fire early
fn seconds(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unarmed_timer_reports_nothing() {
        let timers = TimerSet::new();
        let now = Instant::now();

        assert_eq!(timers.elapsed_since(TimerName::FarEntered, now), None);
        assert!(!timers.has_exceeded(TimerName::FarEntered, now, Duration::ZERO));
    }

    #[test]
    fn elapsed_is_measured_from_arm_time() {
        let mut timers = TimerSet::new();
        let t0 = Instant::now();
        timers.arm(TimerName::NearEntered, t0);

        let later = t0 + Duration::from_millis(4100);
        assert_eq!(
            timers.elapsed_since(TimerName::NearEntered, later),
            Some(Duration::from_millis(4100))
        );
        assert!(timers.has_exceeded(TimerName::NearEntered, later, Duration::from_secs(4)));
    }

    #[test]
    fn exceeded_is_strict() {
        let mut timers = TimerSet::new();
        let t0 = Instant::now();
        timers.arm(TimerName::FarForNeutral, t0);

        let exactly = t0 + Duration::from_secs(20);
        assert!(!timers.has_exceeded(TimerName::FarForNeutral, exactly, Duration::from_secs(20)));
    }

    #[test]
    fn out_of_order_now_counts_as_zero() {
        let mut timers = TimerSet::new();
        let t0 = Instant::now() + Duration::from_secs(10);
        timers.arm(TimerName::PatRequested, t0);

        let earlier = t0 - Duration::from_secs(3);
        assert_eq!(timers.elapsed_since(TimerName::PatRequested, earlier), Some(Duration::ZERO));
    }

    #[test]
    fn timers_clear_independently() {
        let mut timers = TimerSet::new();
        let t0 = Instant::now();
        timers.arm(TimerName::FarEntered, t0);
        timers.arm(TimerName::FarForNeutral, t0);

        timers.clear(TimerName::FarEntered);
        assert!(!timers.is_armed(TimerName::FarEntered));
        assert!(timers.is_armed(TimerName::FarForNeutral));

        timers.clear_all();
        assert!(timers.is_empty());
    }

    #[test]
    fn negative_delay_is_rejected() {
        let timing = TimingConfig {
            pat_second_request_secs: -1.0,
            ..TimingConfig::default()
        };
        assert!(timing.validate().is_err());
    }

    #[test]
    fn oversized_delay_is_rejected() {
        let timing = TimingConfig {
            far_neutral_secs: 1.0e20,
            ..TimingConfig::default()
        };
        assert!(matches!(timing.validate(), Err(ProxemicsError::ConfigError(_))));
    }

    #[test]
    fn oversized_delay_never_fires_early() {
        let timing = TimingConfig {
            far_neutral_secs: 1.0e20,
            ..TimingConfig::default()
        };
        assert_eq!(timing.far_neutral(), Duration::MAX);

        let mut timers = TimerSet::new();
        let t0 = Instant::now();
        timers.arm(TimerName::FarForNeutral, t0);
        let later = t0 + Duration::from_millis(200);
        assert!(!timers.has_exceeded(TimerName::FarForNeutral, later, timing.far_neutral()));
    }

    #[test]
    fn large_representable_delay_is_accepted() {
        let timing = TimingConfig {
            far_neutral_secs: 1.0e12,
            ..TimingConfig::default()
        };
        assert!(timing.validate().is_ok());
        assert_eq!(timing.far_neutral(), Duration::from_secs(1_000_000_000_000));
    }

    #[test]
    fn zero_tick_interval_disables_ticking() {
        let timing = TimingConfig {
            tick_interval_ms: Some(0),
            ..TimingConfig::default()
        };
        assert_eq!(timing.tick_interval(), None);
    }
}
