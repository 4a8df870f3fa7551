// core/touch.rs

// Filters raw touch contacts down to pat signals. A pat only counts on a head
// site, while the user is Near, and only once per Near stay.

use serde::{Deserialize, Serialize};

use super::zone::Zone;

/// Capacitive touch and bump sites on the robot body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchSite {
    /// Forehead pad
    HeadFront,
    /// Back of the head
    HeadBack,
    /// Left side of the head
    HeadLeft,
    /// Right side of the head
    HeadRight,
    /// Neck scruff
    Scruff,
    /// Chin pad
    Chin,
    /// Front-left bumper
    BumpFrontLeft,
    /// Front-right bumper
    BumpFrontRight,
    /// Rear-left bumper
    BumpBackLeft,
    /// Rear-right bumper
    BumpBackRight,
}

impl TouchSite {
    /// Sites that count as a head contact
    pub const HEAD: [TouchSite; 6] = [
        TouchSite::HeadFront,
        TouchSite::HeadBack,
        TouchSite::HeadLeft,
        TouchSite::HeadRight,
        TouchSite::Scruff,
        TouchSite::Chin,
    ];

    /// Returns true for the head-contact sites
    pub fn is_head(self) -> bool {
        TouchSite::HEAD.contains(&self)
    }
}

/// Why a touch was or was not accepted as a pat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Valid pat
    Accepted,
    /// Contact released, not pressed
    NotContacted,
    /// User is not in the Near zone
    NotNear,
    /// A pat was already accepted this Near stay
    AlreadyReceived,
    /// Contact on a site that does not count as a pat
    NotPatSite,
}

/// Pat gate over a configurable set of accepted sites
#[derive(Debug, Clone)]
pub struct TouchGate {
    pat_sites: Vec<TouchSite>,
}

impl Default for TouchGate {
    fn default() -> Self {
        TouchGate::new(TouchSite::HEAD.to_vec())
    }
}

impl TouchGate {
    /// Creates a gate accepting pats on the given sites
    pub fn new(pat_sites: Vec<TouchSite>) -> Self {
        TouchGate { pat_sites }
    }

    /// Sites that count as a pat
    pub fn pat_sites(&self) -> &[TouchSite] {
        &self.pat_sites
    }

    /// Returns true iff the touch is a valid pat
    pub fn on_touch(
        &self,
        site: TouchSite,
        contacted: bool,
        zone: Zone,
        pat_received: bool,
    ) -> bool {
        self.evaluate(site, contacted, zone, pat_received) == GateDecision::Accepted
    }

    /// Same as [`TouchGate::on_touch`] but reports the first failed condition
    pub fn evaluate(
        &self,
        site: TouchSite,
        contacted: bool,
        zone: Zone,
        pat_received: bool,
    ) -> GateDecision {
        if !contacted {
            GateDecision::NotContacted
        } else if zone != Zone::Near {
            GateDecision::NotNear
        } else if pat_received {
            GateDecision::AlreadyReceived
        } else if !self.pat_sites.contains(&site) {
            GateDecision::NotPatSite
        } else {
            GateDecision::Accepted
        }
    }
}
