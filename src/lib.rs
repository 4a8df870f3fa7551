//! Proxemics - zone-driven social interaction core
//!
//! This library drives a proximity-based interaction sequence for a companion
//! robot: distance readings are classified into social zones, each zone has an
//! entry behaviour and timed escalations, a head pat gates the start of the
//! session, and prolonged absence falls back to an idle baseline.
//!
//! The crate is purely reactive. Timers are only evaluated when a sensor sample
//! (or an explicit tick) is routed, so no sample after a deadline means nothing
//! fires.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod core;
pub mod robot_interface;
pub mod router;
mod scenario;

// Re-export commonly used items for easier access
pub use crate::core::{
    Escalation, GateDecision, InteractionStateMachine, SessionState, TimerName, TimerSet,
    TimingConfig, TouchGate, TouchSite, Zone, ZoneClassifier, ZoneOutcome, ZoneThresholds,
};
pub use robot_interface::{
    Actuator, ActuatorCommand, DialogueConfig, DialogueSource, Expression, ExpressionTable,
    Joint, LoggingActuator, Persona, RecordingActuator, Rgb, ScriptedDialogue, Situation,
};
pub use router::{
    DistanceSample, DistanceSite, EventRouter, RouteOutcome, SensorEvent, SensorFeed,
    SensorSender, TouchSample,
};
pub use scenario::{Scenario, ScenarioStep};

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Main configuration structure for the interaction core
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxemicsConfig {
    /// Distance thresholds for zone classification
    pub zones: ZoneThresholds,
    /// Escalation and auto-neutral delays
    pub timing: TimingConfig,
    /// Sensor sites and upstream debounce figures
    pub sensors: SensorConfig,
    /// Face, light and posture per situation
    pub expressions: ExpressionTable,
    /// Dialogue persona selection
    pub dialogue: DialogueConfig,
}

/// Sensor-facing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// The only time-of-flight site whose readings are classified
    pub distance_site: DistanceSite,
    /// Touch sites that count as a head pat
    pub head_sites: Vec<TouchSite>,
    /// Minimum spacing between distance samples, enforced upstream
    pub distance_debounce_ms: u64,
    /// Minimum spacing between touch samples, enforced upstream
    pub touch_debounce_ms: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        SensorConfig {
            distance_site: DistanceSite::Center,
            head_sites: TouchSite::HEAD.to_vec(),
            distance_debounce_ms: 200,
            touch_debounce_ms: 250,
        }
    }
}

impl ProxemicsConfig {
    /// Loads and validates a configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let config: ProxemicsConfig = serde_yaml::from_reader(file)?;
        config.validate()?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses and validates a configuration from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: ProxemicsConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every section for values the state machine cannot work with
    pub fn validate(&self) -> Result<()> {
        self.zones.validate()?;
        self.timing.validate()?;
        if self.sensors.head_sites.is_empty() {
            return Err(ProxemicsError::ConfigError(
                "sensors.head_sites must name at least one site".to_string(),
            ));
        }
        if let Some(site) = self.sensors.head_sites.iter().find(|site| !site.is_head()) {
            log::warn!("Touch site {:?} configured as a head site", site);
        }
        Ok(())
    }
}

/// Proxemics error types
#[derive(Debug)]
pub enum ProxemicsError {
    /// Configuration could not be parsed or holds unusable values
    ConfigError(String),
    /// Scenario script could not be parsed or holds unusable values
    ScenarioError(String),
    /// Reading a file failed
    IoError(std::io::Error),
    /// The consuming side of a sensor feed has gone away
    FeedClosed,
}

impl std::fmt::Display for ProxemicsError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ProxemicsError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ProxemicsError::ScenarioError(msg) => write!(f, "Scenario error: {}", msg),
            ProxemicsError::IoError(err) => write!(f, "I/O error: {}", err),
            ProxemicsError::FeedClosed => write!(f, "Sensor feed closed"),
        }
    }
}

impl std::error::Error for ProxemicsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProxemicsError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ProxemicsError {
    fn from(err: std::io::Error) -> Self {
        ProxemicsError::IoError(err)
    }
}

impl From<serde_yaml::Error> for ProxemicsError {
    fn from(err: serde_yaml::Error) -> Self {
        ProxemicsError::ConfigError(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ProxemicsError>;
