//! Event routing for the interaction core
//!
//! This module is the single entry point for sensor samples:
//! - distance samples are filtered to the canonical site, classified and
//!   handed to the state machine
//! - touch samples go through the pat gate and, when accepted, become the
//!   pat-accepted transition
//! - ticks re-run escalation checks for the optional scheduled mode
//!
//! Every call finishes all state changes and actuator commands for its sample
//! before returning.

mod feed;

pub use feed::*;

use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::core::{
    Escalation, GateDecision, InteractionStateMachine, SessionState, TouchGate, TouchSite,
    ZoneClassifier, ZoneOutcome,
};
use crate::robot_interface::{Actuator, DialogueSource};
use crate::ProxemicsConfig;

/// Time-of-flight sensor positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DistanceSite {
    /// Forward-facing center sensor
    #[default]
    Center,
    /// Forward-left sensor
    Left,
    /// Forward-right sensor
    Right,
    /// Rear sensor
    Back,
}

/// A resolved distance reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceSample {
    /// Sensor that produced the reading
    pub site: DistanceSite,
    /// Distance in meters; None when the sensor had no valid return
    pub meters: Option<f64>,
    /// Monotonic arrival time
    pub at: Instant,
}

impl DistanceSample {
    /// Creates a distance sample
    pub fn new(site: DistanceSite, meters: Option<f64>, at: Instant) -> Self {
        DistanceSample { site, meters, at }
    }
}

/// A debounced touch contact change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    /// Touched site
    pub site: TouchSite,
    /// True on press, false on release
    pub contacted: bool,
    /// Monotonic arrival time
    pub at: Instant,
}

impl TouchSample {
    /// Creates a touch sample
    pub fn new(site: TouchSite, contacted: bool, at: Instant) -> Self {
        TouchSample { site, contacted, at }
    }
}

/// Anything the router accepts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorEvent {
    /// Distance reading
    Distance(DistanceSample),
    /// Touch contact change
    Touch(TouchSample),
    /// Re-evaluate escalation timers without new input
    Tick(Instant),
}

impl SensorEvent {
    /// Arrival time of the event
    pub fn at(&self) -> Instant {
        match self {
            SensorEvent::Distance(sample) => sample.at,
            SensorEvent::Touch(sample) => sample.at,
            SensorEvent::Tick(at) => *at,
        }
    }
}

/// What routing one event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Reading from a non-canonical site, dropped
    IgnoredSite(DistanceSite),
    /// Missing or invalid reading, no transition
    Unclassified,
    /// Classified reading handed to the state machine
    Zone(ZoneOutcome),
    /// Touch accepted as a pat
    PatAccepted,
    /// Touch dropped by the gate
    TouchIgnored(GateDecision),
    /// Tick processed
    Ticked(Option<Escalation>),
}

/// Single synchronous entry point for sensor events
pub struct EventRouter<A, D> {
    canonical_site: DistanceSite,
    classifier: ZoneClassifier,
    gate: TouchGate,
    machine: InteractionStateMachine<A, D>,
}

impl<A: Actuator, D: DialogueSource> EventRouter<A, D> {
    /// Builds a router and its state machine from configuration
    pub fn new(config: &ProxemicsConfig, actuator: A, dialogue: D) -> Self {
        let machine = InteractionStateMachine::new(
            actuator,
            dialogue,
            config.expressions.clone(),
            config.timing.clone(),
        );

        EventRouter {
            canonical_site: config.sensors.distance_site,
            classifier: ZoneClassifier::new(config.zones),
            gate: TouchGate::new(config.sensors.head_sites.clone()),
            machine,
        }
    }

    /// Creates the run's session in its neutral configuration and puts the
    /// robot in its idle expression
    pub fn begin_session(&mut self) -> SessionState {
        let mut session = SessionState::new();
        self.machine.go_neutral(&mut session);
        session
    }

    /// Routes one event to completion
    pub fn route(&mut self, session: &mut SessionState, event: &SensorEvent) -> RouteOutcome {
        match event {
            SensorEvent::Distance(sample) => self.on_distance(session, sample),
            SensorEvent::Touch(sample) => self.on_touch(session, sample),
            SensorEvent::Tick(at) => self.tick(session, *at),
        }
    }

    /// Classifies a distance reading and drives the state machine with it
    pub fn on_distance(
        &mut self,
        session: &mut SessionState,
        sample: &DistanceSample,
    ) -> RouteOutcome {
        if sample.site != self.canonical_site {
            return RouteOutcome::IgnoredSite(sample.site);
        }

        let zone = self.classifier.classify(sample.meters);
        debug!("Distance {:?} m -> {}", sample.meters, zone);
        if !zone.is_known() {
            return RouteOutcome::Unclassified;
        }
        RouteOutcome::Zone(self.machine.on_zone(session, zone, sample.at))
    }

    /// Gates a touch and applies the pat-accepted transition when it passes
    pub fn on_touch(&mut self, session: &mut SessionState, sample: &TouchSample) -> RouteOutcome {
        let decision = self.gate.evaluate(
            sample.site,
            sample.contacted,
            session.current_zone(),
            session.pat_received(),
        );
        if decision != GateDecision::Accepted {
            debug!("Touch on {:?} ignored: {:?}", sample.site, decision);
            return RouteOutcome::TouchIgnored(decision);
        }

        if self.machine.accept_pat(session) {
            RouteOutcome::PatAccepted
        } else {
            RouteOutcome::TouchIgnored(GateDecision::AlreadyReceived)
        }
    }

    /// Re-runs escalation checks at `now`
    pub fn tick(&mut self, session: &mut SessionState, now: Instant) -> RouteOutcome {
        RouteOutcome::Ticked(self.machine.on_tick(session, now))
    }

    /// Explicit neutral reset
    pub fn go_neutral(&mut self, session: &mut SessionState) {
        self.machine.go_neutral(session);
    }

    /// Zone classifier in use
    pub fn classifier(&self) -> &ZoneClassifier {
        &self.classifier
    }

    /// Pat gate in use
    pub fn gate(&self) -> &TouchGate {
        &self.gate
    }

    /// State machine in use
    pub fn machine(&self) -> &InteractionStateMachine<A, D> {
        &self.machine
    }
}
