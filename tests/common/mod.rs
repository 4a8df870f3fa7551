// Shared fixtures for the integration tests.
#![allow(dead_code)]

use proxemics::{
    DistanceSample, DistanceSite, EventRouter, Persona, ProxemicsConfig, RecordingActuator,
    ScriptedDialogue, SensorEvent, TouchSample, TouchSite,
};
use std::time::{Duration, Instant};

pub type TestRouter = EventRouter<RecordingActuator, ScriptedDialogue>;

/// Router over default configuration, friendly persona, recording actuator
pub fn router() -> TestRouter {
    router_with(&ProxemicsConfig::default())
}

pub fn router_with(config: &ProxemicsConfig) -> TestRouter {
    EventRouter::new(
        config,
        RecordingActuator::new(),
        ScriptedDialogue::seeded(Persona::Friendly, 1),
    )
}

/// `t0` plus a number of seconds
pub fn at(t0: Instant, secs: f64) -> Instant {
    t0 + Duration::from_secs_f64(secs)
}

pub fn distance(t0: Instant, secs: f64, meters: f64) -> SensorEvent {
    SensorEvent::Distance(DistanceSample::new(DistanceSite::Center, Some(meters), at(t0, secs)))
}

pub fn touch(t0: Instant, secs: f64, site: TouchSite, contacted: bool) -> SensorEvent {
    SensorEvent::Touch(TouchSample::new(site, contacted, at(t0, secs)))
}

pub const FAR: f64 = 2.0;
pub const MEDIUM: f64 = 1.0;
pub const NEAR: f64 = 0.5;
