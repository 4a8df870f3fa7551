// core/session.rs

// The single mutable entity of an interaction run. Only the state machine
// mutates it; everyone else reads through accessors.

use std::time::Instant;

use super::timers::{TimerName, TimerSet};
use super::zone::Zone;

/// Per-run interaction state: current zone, escalation flags and timers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    current_zone: Zone,
    timers: TimerSet,
    far_second_prompt_sent: bool,
    pat_requested: bool,
    pat_second_request_sent: bool,
    pat_received: bool,
}

impl SessionState {
    /// Creates a neutral session with no zone and nothing armed
    pub fn new() -> Self {
        SessionState::default()
    }

    /// Zone the session is currently in; Unknown while idle
    pub fn current_zone(&self) -> Zone {
        self.current_zone
    }

    /// Armed timers
    pub fn timers(&self) -> &TimerSet {
        &self.timers
    }

    /// When the current Far stay began
    pub fn far_entered_at(&self) -> Option<Instant> {
        self.timers.armed_at(TimerName::FarEntered)
    }

    /// Whether the second Far invitation went out during this stay
    pub fn far_second_prompt_sent(&self) -> bool {
        self.far_second_prompt_sent
    }

    /// Whether the auto-neutral countdown is running
    pub fn far_auto_neutral_armed(&self) -> bool {
        self.timers.is_armed(TimerName::FarForNeutral)
    }

    /// When the current Near stay began
    pub fn near_entered_at(&self) -> Option<Instant> {
        self.timers.armed_at(TimerName::NearEntered)
    }

    /// Whether the first pat request went out during this Near stay
    pub fn pat_requested(&self) -> bool {
        self.pat_requested
    }

    /// When the first pat request went out
    pub fn pat_requested_at(&self) -> Option<Instant> {
        self.timers.armed_at(TimerName::PatRequested)
    }

    /// Whether the second pat request went out
    pub fn pat_second_request_sent(&self) -> bool {
        self.pat_second_request_sent
    }

    /// Whether a pat has been accepted during this Near stay
    pub fn pat_received(&self) -> bool {
        self.pat_received
    }

    /// True when the session is idle with nothing armed
    pub fn is_neutral(&self) -> bool {
        *self == SessionState::new()
    }

    /// Checks that Far and Near sub-state only exist while in that zone
    pub fn is_consistent(&self) -> bool {
        let far_state = self.timers.is_armed(TimerName::FarEntered)
            || self.timers.is_armed(TimerName::FarForNeutral)
            || self.far_second_prompt_sent;
        let near_state = self.timers.is_armed(TimerName::NearEntered)
            || self.timers.is_armed(TimerName::PatRequested)
            || self.pat_requested
            || self.pat_second_request_sent
            || self.pat_received;

        (!far_state || self.current_zone == Zone::Far)
            && (!near_state || self.current_zone == Zone::Near)
            && (!self.pat_second_request_sent || self.pat_requested)
    }

    pub(crate) fn enter(&mut self, zone: Zone) {
        self.clear_far();
        self.clear_near();
        self.current_zone = zone;
    }

    pub(crate) fn reset(&mut self) {
        *self = SessionState::new();
    }

    pub(crate) fn arm(&mut self, name: TimerName, now: Instant) -> Instant {
        self.timers.arm(name, now)
    }

    pub(crate) fn mark_far_second_prompt_sent(&mut self) {
        self.far_second_prompt_sent = true;
    }

    pub(crate) fn mark_pat_requested(&mut self, now: Instant) {
        self.pat_requested = true;
        self.timers.arm(TimerName::PatRequested, now);
    }

    pub(crate) fn mark_pat_second_request_sent(&mut self) {
        self.pat_second_request_sent = true;
    }

    pub(crate) fn mark_pat_received(&mut self) {
        self.pat_received = true;
    }

    fn clear_far(&mut self) {
        self.timers.clear(TimerName::FarEntered);
        self.timers.clear(TimerName::FarForNeutral);
        self.far_second_prompt_sent = false;
    }

    fn clear_near(&mut self) {
        self.timers.clear(TimerName::NearEntered);
        self.timers.clear(TimerName::PatRequested);
        self.pat_requested = false;
        self.pat_second_request_sent = false;
        self.pat_received = false;
    }
}
