// src/robot_interface/actuator.rs
// Actuators shipped with the crate: one that only logs (dry runs, rehearsal)
// and one that records every command for later inspection.

use log::info;
use serde::{Deserialize, Serialize};

use super::{Actuator, Joint, Rgb};

/// A single command as received by an actuator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActuatorCommand {
    /// `speak(text)`
    Speak(String),
    /// `set_light(color)`
    SetLight(Rgb),
    /// `show_face(image)`
    ShowFace(String),
    /// `move_joint(joint, angle, velocity)`
    MoveJoint {
        /// Joint moved
        joint: Joint,
        /// Target angle, degrees
        angle: f32,
        /// Movement velocity
        velocity: f32,
    },
}

/// Actuator that logs commands instead of driving hardware
#[derive(Debug, Default)]
pub struct LoggingActuator {
    commands_sent: u64,
}

impl LoggingActuator {
    /// Creates a logging actuator
    pub fn new() -> Self {
        LoggingActuator::default()
    }

    /// Number of commands logged so far
    pub fn commands_sent(&self) -> u64 {
        self.commands_sent
    }
}

impl Actuator for LoggingActuator {
    fn speak(&mut self, text: &str) {
        self.commands_sent += 1;
        info!("speak: \"{}\"", text);
    }

    fn set_light(&mut self, color: Rgb) {
        self.commands_sent += 1;
        info!("light: rgb({}, {}, {})", color.r, color.g, color.b);
    }

    fn show_face(&mut self, image: &str) {
        self.commands_sent += 1;
        info!("face: {}", image);
    }

    fn move_joint(&mut self, joint: Joint, angle: f32, velocity: f32) {
        self.commands_sent += 1;
        info!("joint: {:?} -> {} deg at {}", joint, angle, velocity);
    }
}

/// Actuator that keeps every command in order
#[derive(Debug, Default, Clone)]
pub struct RecordingActuator {
    commands: Vec<ActuatorCommand>,
}

impl RecordingActuator {
    /// Creates an empty recorder
    pub fn new() -> Self {
        RecordingActuator::default()
    }

    /// All recorded commands, oldest first
    pub fn commands(&self) -> &[ActuatorCommand] {
        &self.commands
    }

    /// Spoken lines, oldest first
    pub fn spoken(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                ActuatorCommand::Speak(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Face images shown, oldest first
    pub fn faces(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                ActuatorCommand::ShowFace(image) => Some(image.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Most recent light color
    pub fn last_light(&self) -> Option<Rgb> {
        self.commands.iter().rev().find_map(|command| match command {
            ActuatorCommand::SetLight(color) => Some(*color),
            _ => None,
        })
    }
}

impl Actuator for RecordingActuator {
    fn speak(&mut self, text: &str) {
        self.commands.push(ActuatorCommand::Speak(text.to_string()));
    }

    fn set_light(&mut self, color: Rgb) {
        self.commands.push(ActuatorCommand::SetLight(color));
    }

    fn show_face(&mut self, image: &str) {
        self.commands.push(ActuatorCommand::ShowFace(image.to_string()));
    }

    fn move_joint(&mut self, joint: Joint, angle: f32, velocity: f32) {
        self.commands.push(ActuatorCommand::MoveJoint {
            joint,
            angle,
            velocity,
        });
    }
}
