// core/mod.rs

//! Interaction core: zone classification, named timers, the per-session
//! state, the pat gate, and the state machine that ties them together.
//! Everything here is synchronous and owns no threads.

mod machine;
mod session;
mod timers;
mod touch;
mod zone;

// Re-export key types for a unified API
pub use machine::{Escalation, InteractionStateMachine, ZoneOutcome};
pub use session::SessionState;
pub use timers::{TimerName, TimerSet, TimingConfig};
pub use touch::{GateDecision, TouchGate, TouchSite};
pub use zone::{Zone, ZoneClassifier, ZoneThresholds};
