// src/robot_interface/expression.rs
// Face, light and arm posture for each situation. Defaults reproduce the
// robot's stock greeting behaviour; every entry can be overridden from YAML.

use serde::{Deserialize, Serialize};

use super::{Rgb, Situation};

/// Non-verbal part of a situation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    /// Face image file name
    pub face: String,
    /// Chest light color
    pub light: Rgb,
    /// Left arm angle, degrees
    pub left_arm: f32,
    /// Right arm angle, degrees
    pub right_arm: f32,
    /// Return the head to pitch/roll/yaw zero before moving the arms
    #[serde(default)]
    pub level_head: bool,
}

impl Expression {
    fn new(face: &str, light: Rgb, left_arm: f32, right_arm: f32) -> Self {
        Expression {
            face: face.to_string(),
            light,
            left_arm,
            right_arm,
            level_head: false,
        }
    }
}

/// One expression per situation, plus the shared joint velocity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpressionTable {
    /// Velocity used for every joint move
    pub joint_velocity: f32,
    /// Far entry
    pub far_invite: Expression,
    /// Far, second invitation
    pub far_invite_again: Expression,
    /// Medium entry
    pub medium_invite: Expression,
    /// Near entry
    pub near_welcome: Expression,
    /// First pat request
    pub pat_request: Expression,
    /// Second pat request
    pub pat_request_again: Expression,
    /// Pat accepted
    pub pat_thanks: Expression,
    /// Neutral baseline
    pub idle: Expression,
}

impl Default for ExpressionTable {
    fn default() -> Self {
        let blue = Rgb::new(0, 0, 255);
        let green = Rgb::new(0, 255, 0);

        ExpressionTable {
            joint_velocity: 50.0,
            far_invite: Expression::new("e_Amazement.jpg", blue, 80.0, 80.0),
            far_invite_again: Expression::new("e_Admiration.jpg", blue, 70.0, 70.0),
            medium_invite: Expression::new("e_ContentRight.jpg", Rgb::new(255, 255, 0), 0.0, 80.0),
            near_welcome: Expression::new("e_Joy2.jpg", green, -90.0, -90.0),
            pat_request: Expression::new("e_Admiration.jpg", Rgb::new(0, 128, 255), 40.0, 40.0),
            pat_request_again: Expression::new("e_Joy.jpg", Rgb::new(255, 192, 203), 50.0, 50.0),
            pat_thanks: Expression::new("e_JoyGoofy2.jpg", green, -80.0, -80.0),
            idle: Expression {
                level_head: true,
                ..Expression::new("e_DefaultContent.jpg", green, 0.0, 0.0)
            },
        }
    }
}

impl ExpressionTable {
    /// Looks up the expression for a situation
    pub fn get(&self, situation: Situation) -> &Expression {
        match situation {
            Situation::FarInvite => &self.far_invite,
            Situation::FarInviteAgain => &self.far_invite_again,
            Situation::MediumInvite => &self.medium_invite,
            Situation::NearWelcome => &self.near_welcome,
            Situation::PatRequest => &self.pat_request,
            Situation::PatRequestAgain => &self.pat_request_again,
            Situation::PatThanks => &self.pat_thanks,
            Situation::Idle => &self.idle,
        }
    }
}
