// src/scenario.rs
// Rehearsal scripts: timed sensor samples loaded from YAML and turned into
// router events against a chosen origin instant.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::core::TouchSite;
use crate::router::{DistanceSample, DistanceSite, SensorEvent, TouchSample};
use crate::{ProxemicsError, Result};

/// A named list of timed sensor samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Human-readable name
    pub name: String,
    /// Samples in delivery order
    pub steps: Vec<ScenarioStep>,
}

/// One scripted sample, offset in seconds from the start of the run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Distance reading; omit `meters` for a sensor with no valid return
    Distance {
        /// Offset from start, seconds
        at_secs: f64,
        /// Sensor site
        #[serde(default)]
        site: DistanceSite,
        /// Reading in meters
        #[serde(default)]
        meters: Option<f64>,
    },
    /// Touch contact change
    Touch {
        /// Offset from start, seconds
        at_secs: f64,
        /// Touched site
        site: TouchSite,
        /// Press or release
        #[serde(default = "pressed")]
        contacted: bool,
    },
    /// Explicit timer re-evaluation
    Tick {
        /// Offset from start, seconds
        at_secs: f64,
    },
}

fn pressed() -> bool {
    true
}

impl ScenarioStep {
    /// Offset from the start of the run, seconds
    pub fn at_secs(&self) -> f64 {
        match self {
            ScenarioStep::Distance { at_secs, .. }
            | ScenarioStep::Touch { at_secs, .. }
            | ScenarioStep::Tick { at_secs } => *at_secs,
        }
    }

    /// Offset from the start of the run, or None when it is negative, non-finite
    /// or too large for a `Duration`
    pub fn offset(&self) -> Option<Duration> {
        let secs = self.at_secs();
        if secs < 0.0 {
            return None;
        }
        Duration::try_from_secs_f64(secs).ok()
    }

    /// Converts the step into an event relative to `origin`. Offsets past the
    /// clock's range saturate to the latest representable instant.
    pub fn to_event(&self, origin: Instant) -> SensorEvent {
        let at = self
            .offset()
            .and_then(|offset| origin.checked_add(offset))
            .unwrap_or_else(|| latest_instant(origin));
        match self {
            ScenarioStep::Distance { site, meters, .. } => {
                SensorEvent::Distance(DistanceSample::new(*site, *meters, at))
            }
            ScenarioStep::Touch { site, contacted, .. } => {
                SensorEvent::Touch(TouchSample::new(*site, *contacted, at))
            }
            ScenarioStep::Tick { .. } => SensorEvent::Tick(at),
        }
    }
}

impl Scenario {
    /// Loads and validates a scenario from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let scenario: Scenario = serde_yaml::from_reader(file)
            .map_err(|e| ProxemicsError::ScenarioError(format!("{}: {}", path.display(), e)))?;
        scenario.validate()?;
        log::info!("Loaded scenario '{}' ({} steps)", scenario.name, scenario.steps.len());
        Ok(scenario)
    }

    /// Parses and validates a scenario from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let scenario: Scenario =
            serde_yaml::from_str(text).map_err(|e| ProxemicsError::ScenarioError(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Rejects negative, non-finite or out-of-range offsets. Offsets need not
    /// be sorted; out-of-order delivery is part of what a rehearsal may exercise.
    pub fn validate(&self) -> Result<()> {
        let now = Instant::now();
        for (index, step) in self.steps.iter().enumerate() {
            let in_range = step
                .offset()
                .is_some_and(|offset| now.checked_add(offset).is_some());
            if !in_range {
                return Err(ProxemicsError::ScenarioError(format!(
                    "step {} has invalid offset {}",
                    index,
                    step.at_secs()
                )));
            }
        }
        Ok(())
    }

    /// Events in script order, timestamped against `origin`
    pub fn events(&self, origin: Instant) -> Vec<SensorEvent> {
        self.steps.iter().map(|step| step.to_event(origin)).collect()
    }

    /// Offset of the last step, seconds
    pub fn duration_secs(&self) -> f64 {
        self.steps
            .iter()
            .map(ScenarioStep::at_secs)
            .fold(0.0, f64::max)
    }
}

// Halves the step until the clock accepts it
fn latest_instant(origin: Instant) -> Instant {
    let mut latest = origin;
    let mut step = Duration::MAX;
    while !step.is_zero() {
        if let Some(next) = latest.checked_add(step) {
            latest = next;
        } else {
            step /= 2;
        }
    }
    latest
}
