//! Robot-facing collaborators for the interaction core
//!
//! This module holds the contracts the core drives:
//! - [`Actuator`] for speech, face images, the chest light and joints
//! - [`DialogueSource`] for the literal text behind a [`Situation`]
//! - [`ExpressionTable`] for the face, light and posture of each situation

mod actuator;
mod dialogue;
mod expression;

pub use actuator::*;
pub use dialogue::*;
pub use expression::*;

use serde::{Deserialize, Serialize};

/// 8-bit RGB color for the chest light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

/// Joints the core may move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Joint {
    /// Left arm, angle in degrees
    LeftArm,
    /// Right arm, angle in degrees
    RightArm,
    /// Head pitch, degrees
    HeadPitch,
    /// Head roll, degrees
    HeadRoll,
    /// Head yaw, degrees
    HeadYaw,
}

/// Situation tags the core asks collaborators to express
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Situation {
    /// First invitation on Far entry
    FarInvite,
    /// Second, more urgent invitation while staying Far
    FarInviteAgain,
    /// Invitation to sit on Medium entry
    MediumInvite,
    /// Thanks for sitting on Near entry
    NearWelcome,
    /// First head-pat request
    PatRequest,
    /// Gentler second head-pat request
    PatRequestAgain,
    /// Thanks once the pat is accepted
    PatThanks,
    /// Idle baseline after a neutral reset
    Idle,
}

impl Situation {
    /// Every situation, in interaction order
    pub const ALL: [Situation; 8] = [
        Situation::FarInvite,
        Situation::FarInviteAgain,
        Situation::MediumInvite,
        Situation::NearWelcome,
        Situation::PatRequest,
        Situation::PatRequestAgain,
        Situation::PatThanks,
        Situation::Idle,
    ];
}

/// Fire-and-forget robot output. Implementations must not block the caller.
pub trait Actuator {
    /// Speaks a line of text
    fn speak(&mut self, text: &str);
    /// Sets the chest light
    fn set_light(&mut self, color: Rgb);
    /// Displays a face image by file name
    fn show_face(&mut self, image: &str);
    /// Moves a joint to an angle at the given velocity
    fn move_joint(&mut self, joint: Joint, angle: f32, velocity: f32);
}

/// Supplies the literal text for a situation
pub trait DialogueSource {
    /// Returns a line for the situation, or None to stay silent
    fn line(&mut self, situation: Situation) -> Option<String>;
}
