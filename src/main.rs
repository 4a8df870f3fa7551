// src/main.rs
// Rehearsal entry point: replays a scripted sensor scenario through the
// interaction core against a logging actuator, so behaviour can be checked
// without a robot on the network.

use clap::Parser;
use log::{info, warn};
use proxemics::{
    EventRouter, LoggingActuator, Persona, ProxemicsConfig, RouteOutcome, Scenario,
    ScriptedDialogue,
};
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

const DEFAULT_SCENARIO: &str = include_str!("../scenarios/approach_and_pat.yaml");

/// Replay a sensor scenario through the proxemics interaction core
#[derive(Parser, Debug)]
#[command(name = "proxemics", version, about)]
struct Args {
    /// YAML configuration file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// YAML scenario file; the bundled approach-and-pat script when omitted
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Override the configured dialogue persona
    #[arg(short, long, value_enum)]
    persona: Option<PersonaArg>,

    /// Seed for phrasing selection
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PersonaArg {
    Friendly,
    Supportive,
    Authoritative,
}

impl From<PersonaArg> for Persona {
    fn from(arg: PersonaArg) -> Self {
        match arg {
            PersonaArg::Friendly => Persona::Friendly,
            PersonaArg::Supportive => Persona::Supportive,
            PersonaArg::Authoritative => Persona::Authoritative,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging; RUST_LOG=debug shows ignored samples too
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ProxemicsConfig::load(path)?,
        None => ProxemicsConfig::default(),
    };
    if let Some(persona) = args.persona {
        config.dialogue.persona = persona.into();
    }
    if args.seed.is_some() {
        config.dialogue.seed = args.seed;
    }

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::from_yaml_str(DEFAULT_SCENARIO)?,
    };
    let dialogue = ScriptedDialogue::from_config(&config.dialogue);
    info!(
        "Replaying '{}': {} steps over {:.1}s, persona {:?}",
        scenario.name,
        scenario.steps.len(),
        scenario.duration_secs(),
        dialogue.persona()
    );

    let mut router = EventRouter::new(&config, LoggingActuator::new(), dialogue);
    let thresholds = router.classifier().thresholds();
    let timing = router.machine().timing();
    info!(
        "Zones: far > {} m, near <= {} m; far reset after {:?}, pat request after {:?}",
        thresholds.far_above_m,
        thresholds.near_at_or_below_m,
        timing.far_neutral(),
        timing.near_pat_request()
    );
    let mut session = router.begin_session();

    // Synthetic instants: the script's offsets are applied to one origin, so
    // the replay runs instantly while timers see the scripted spacing
    let origin = Instant::now();
    let tick_interval = config.timing.tick_interval();
    let mut last = origin;
    for (step, event) in scenario.events(origin).iter().enumerate() {
        if let Some(interval) = tick_interval {
            let mut next_tick = last + interval;
            while next_tick < event.at() {
                if let RouteOutcome::Ticked(Some(escalation)) = router.tick(&mut session, next_tick)
                {
                    let offset = next_tick.saturating_duration_since(origin).as_secs_f64();
                    info!("[{:>6.2}s] tick: {:?}", offset, escalation);
                }
                next_tick += interval;
            }
        }
        last = last.max(event.at());

        let offset = event.at().saturating_duration_since(origin).as_secs_f64();
        match router.route(&mut session, event) {
            RouteOutcome::IgnoredSite(site) => {
                warn!("[{:>6.2}s] sample from {:?} ignored", offset, site)
            }
            outcome => info!("[{:>6.2}s] step {}: {:?}", offset, step, outcome),
        }
    }

    info!(
        "Replay complete: zone={}, pat_received={}, {} actuator commands",
        session.current_zone(),
        session.pat_received(),
        router.machine().actuator().commands_sent()
    );
    Ok(())
}
