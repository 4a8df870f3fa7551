// core/machine.rs

// Zone-transition and timer-escalation state machine. Owns the actuator, the
// dialogue source and the expression table; the session it acts on is passed
// in by exclusive reference on every call.
//
// States: Neutral (Unknown), Far, Medium, Near. A zone different from the
// current one is always a fresh entry; the same zone only runs escalation.

use log::{debug, info};
use std::time::Instant;

use super::session::SessionState;
use super::timers::{TimerName, TimingConfig};
use super::zone::Zone;
use crate::robot_interface::{Actuator, DialogueSource, ExpressionTable, Joint, Situation};

/// Timed follow-up fired while staying in a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    /// Second Far invitation
    FarSecondPrompt,
    /// Far for too long; session returned to neutral
    NeutralReset,
    /// First head-pat request
    PatFirstRequest,
    /// Second, gentler head-pat request
    PatSecondRequest,
}

/// What a single `on_zone` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoneOutcome {
    /// Zone entered by this call, if it was a transition
    pub entered: Option<Zone>,
    /// Escalation fired by this call, if any
    pub escalation: Option<Escalation>,
}

/// Interaction state machine driving collaborators from zone and touch facts
pub struct InteractionStateMachine<A, D> {
    actuator: A,
    dialogue: D,
    expressions: ExpressionTable,
    timing: TimingConfig,
}

impl<A: Actuator, D: DialogueSource> InteractionStateMachine<A, D> {
    /// Creates a state machine over its collaborators
    pub fn new(
        actuator: A,
        dialogue: D,
        expressions: ExpressionTable,
        timing: TimingConfig,
    ) -> Self {
        InteractionStateMachine {
            actuator,
            dialogue,
            expressions,
            timing,
        }
    }

    /// Handles a classified zone. Unknown is a no-op; a new zone runs its entry
    /// behaviour once; escalation checks run on every known zone.
    pub fn on_zone(&mut self, state: &mut SessionState, zone: Zone, now: Instant) -> ZoneOutcome {
        if !zone.is_known() {
            debug!("Ignoring unknown zone");
            return ZoneOutcome::default();
        }

        let entered = if zone != state.current_zone() {
            self.enter(state, zone, now);
            Some(zone)
        } else {
            None
        };
        let escalation = self.escalate(state, now);

        debug_assert!(state.is_consistent(), "inconsistent session: {:?}", state);
        ZoneOutcome { entered, escalation }
    }

    /// Runs escalation checks for the current zone without a new classification
    pub fn on_tick(&mut self, state: &mut SessionState, now: Instant) -> Option<Escalation> {
        let escalation = self.escalate(state, now);
        debug_assert!(state.is_consistent(), "inconsistent session: {:?}", state);
        escalation
    }

    /// Applies an accepted pat. Returns false if the session cannot take one.
    pub fn accept_pat(&mut self, state: &mut SessionState) -> bool {
        if state.current_zone() != Zone::Near || state.pat_received() {
            return false;
        }
        info!("Head pat received");
        state.mark_pat_received();
        self.perform(Situation::PatThanks);
        true
    }

    /// Clears the session to its idle baseline and shows the idle expression
    pub fn go_neutral(&mut self, state: &mut SessionState) {
        info!("Going to neutral (was {})", state.current_zone());
        state.reset();
        self.perform(Situation::Idle);
    }

    /// Actuator in use
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Escalation delays in use
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    fn enter(&mut self, state: &mut SessionState, zone: Zone, now: Instant) {
        info!("Zone transition: {} -> {}", state.current_zone(), zone);
        state.enter(zone);

        match zone {
            Zone::Far => {
                state.arm(TimerName::FarEntered, now);
                state.arm(TimerName::FarForNeutral, now);
                self.perform(Situation::FarInvite);
            }
            Zone::Medium => self.perform(Situation::MediumInvite),
            Zone::Near => {
                state.arm(TimerName::NearEntered, now);
                self.perform(Situation::NearWelcome);
            }
            Zone::Unknown => debug_assert!(false, "Unknown is never an entry target"),
        }
    }

    fn escalate(&mut self, state: &mut SessionState, now: Instant) -> Option<Escalation> {
        match state.current_zone() {
            Zone::Far => {
                // Auto-neutral wins over the second invitation
                if state.timers().has_exceeded(
                    TimerName::FarForNeutral,
                    now,
                    self.timing.far_neutral(),
                ) {
                    info!("Far for over {:?}, nobody engaged", self.timing.far_neutral());
                    self.go_neutral(state);
                    return Some(Escalation::NeutralReset);
                }
                if !state.far_second_prompt_sent()
                    && state.timers().has_exceeded(
                        TimerName::FarEntered,
                        now,
                        self.timing.far_second_prompt(),
                    )
                {
                    info!("Still far, inviting again");
                    self.perform(Situation::FarInviteAgain);
                    state.mark_far_second_prompt_sent();
                    return Some(Escalation::FarSecondPrompt);
                }
                None
            }
            Zone::Near if !state.pat_received() => {
                if !state.pat_requested() {
                    if state.timers().has_exceeded(
                        TimerName::NearEntered,
                        now,
                        self.timing.near_pat_request(),
                    ) {
                        info!("Asking for head pat (first time)");
                        self.perform(Situation::PatRequest);
                        state.mark_pat_requested(now);
                        return Some(Escalation::PatFirstRequest);
                    }
                } else if !state.pat_second_request_sent()
                    && state.timers().has_exceeded(
                        TimerName::PatRequested,
                        now,
                        self.timing.pat_second_request(),
                    )
                {
                    info!("Asking for head pat (second time)");
                    self.perform(Situation::PatRequestAgain);
                    state.mark_pat_second_request_sent();
                    return Some(Escalation::PatSecondRequest);
                }
                None
            }
            _ => None,
        }
    }

    fn perform(&mut self, situation: Situation) {
        let expression = self.expressions.get(situation);
        let velocity = self.expressions.joint_velocity;

        self.actuator.show_face(&expression.face);
        self.actuator.set_light(expression.light);
        if expression.level_head {
            for joint in [Joint::HeadPitch, Joint::HeadRoll, Joint::HeadYaw] {
                self.actuator.move_joint(joint, 0.0, velocity);
            }
        }
        self.actuator.move_joint(Joint::LeftArm, expression.left_arm, velocity);
        self.actuator.move_joint(Joint::RightArm, expression.right_arm, velocity);

        if let Some(line) = self.dialogue.line(situation) {
            self.actuator.speak(&line);
        }
    }
}

// Weaknesses:
// - Boundary flicker between two zones re-runs entry behaviour on every flip.
// - Timers only advance when a sample or tick is routed; a silent sensor
//   freezes every escalation, including the auto-neutral reset.
// - When both Far deadlines are overdue on one sample the reset runs alone and
//   the second invitation is never spoken; the robot's script spoke it first
//   and then went neutral.
