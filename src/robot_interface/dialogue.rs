// src/robot_interface/dialogue.rs
// Table-driven dialogue source. Each persona holds a few phrasings per
// situation and one is picked at random; a seed makes rehearsal runs repeatable.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{DialogueSource, Situation};

/// Tone of the robot's lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    /// Playful and upbeat
    #[default]
    Friendly,
    /// Warm and encouraging
    Supportive,
    /// Terse and directive
    Authoritative,
}

/// Dialogue configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// Persona whose lines are used
    pub persona: Persona,
    /// Seed for phrasing selection; None seeds from the OS
    pub seed: Option<u64>,
}

/// Dialogue source backed by static phrase tables
#[derive(Debug, Clone)]
pub struct ScriptedDialogue {
    persona: Persona,
    rng: StdRng,
}

impl ScriptedDialogue {
    /// Creates a source for the persona, seeded from the OS
    pub fn new(persona: Persona) -> Self {
        ScriptedDialogue {
            persona,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a source with a fixed seed
    pub fn seeded(persona: Persona, seed: u64) -> Self {
        ScriptedDialogue {
            persona,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a source from configuration
    pub fn from_config(config: &DialogueConfig) -> Self {
        match config.seed {
            Some(seed) => ScriptedDialogue::seeded(config.persona, seed),
            None => ScriptedDialogue::new(config.persona),
        }
    }

    /// Persona in use
    pub fn persona(&self) -> Persona {
        self.persona
    }

    /// Every phrasing a persona has for a situation
    pub fn phrasings(persona: Persona, situation: Situation) -> &'static [&'static str] {
        match persona {
            Persona::Friendly => friendly(situation),
            Persona::Supportive => supportive(situation),
            Persona::Authoritative => authoritative(situation),
        }
    }
}

impl DialogueSource for ScriptedDialogue {
    fn line(&mut self, situation: Situation) -> Option<String> {
        let phrasings = ScriptedDialogue::phrasings(self.persona, situation);
        if phrasings.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..phrasings.len());
        debug!("{:?}/{:?}: phrasing {} of {}", self.persona, situation, index + 1, phrasings.len());
        Some(phrasings[index].to_string())
    }
}

fn friendly(situation: Situation) -> &'static [&'static str] {
    match situation {
        Situation::FarInvite => &["Come closer!"],
        Situation::FarInviteAgain => &["Come on, come closer!"],
        Situation::MediumInvite => &["Hello friend, have a seat!"],
        Situation::NearWelcome => &["Thank you for sitting down!"],
        Situation::PatRequest => {
            &["If you would like to begin, please give me a gentle pat on my head."]
        }
        Situation::PatRequestAgain => &["Pretty please, could you pat my head?"],
        Situation::PatThanks => &["Thank you for patting my head! Let's begin the tasks."],
        Situation::Idle => &[],
    }
}

fn supportive(situation: Situation) -> &'static [&'static str] {
    match situation {
        Situation::FarInvite => &[
            "Hi there! Come on over, I would love to meet you.",
            "Hello! Why don't you come a little closer?",
        ],
        Situation::FarInviteAgain => &[
            "Don't be shy, I'm really friendly!",
            "It's okay, come closer whenever you're ready.",
        ],
        Situation::MediumInvite => &[
            "Great to see you! Please, take a seat.",
            "Welcome! Make yourself comfortable and have a seat.",
        ],
        Situation::NearWelcome => &[
            "Thank you for sitting with me!",
            "Wonderful, I'm so glad you're here.",
        ],
        Situation::PatRequest => &[
            "When you're ready to start, give me a gentle pat on the head.",
            "If you'd like to begin, a little pat on my head will get us going.",
        ],
        Situation::PatRequestAgain => &[
            "Take your time. Just pat my head when you're ready.",
            "No rush at all. A soft pat on my head starts our game.",
        ],
        Situation::PatThanks => &[
            "That felt lovely, thank you! Let's have some fun.",
            "Thank you! You're going to do great. Let's begin.",
        ],
        Situation::Idle => &[],
    }
}

fn authoritative(situation: Situation) -> &'static [&'static str] {
    match situation {
        Situation::FarInvite => &["Approach the station.", "Proceed forward."],
        Situation::FarInviteAgain => &[
            "Proximity required. Approach now.",
            "You are out of range. Move closer.",
        ],
        Situation::MediumInvite => &["Be seated.", "Take the seat in front of me."],
        Situation::NearWelcome => &["Position confirmed.", "Seating acknowledged."],
        Situation::PatRequest => &[
            "Touch the sensor on my head to begin.",
            "Head contact required to initiate the protocol.",
        ],
        Situation::PatRequestAgain => &[
            "Awaiting head contact.",
            "Input required. Touch my head to proceed.",
        ],
        Situation::PatThanks => &[
            "Contact registered. Commencing tasks.",
            "Input received. Protocol initiated.",
        ],
        Situation::Idle => &[],
    }
}
