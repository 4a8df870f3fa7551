// Pat gate, router filtering, the serialized sensor feed and scenario replay.

mod common;

use common::*;
use proxemics::router::channel;
use proxemics::{
    DistanceSample, DistanceSite, GateDecision, ProxemicsConfig, RouteOutcome, Scenario,
    ScenarioStep, SensorEvent, SessionState, TouchGate, TouchSite, Zone,
};
use rstest::rstest;
use std::thread;
use std::time::{Duration, Instant};

#[rstest]
#[case(TouchSite::HeadFront)]
#[case(TouchSite::HeadBack)]
#[case(TouchSite::HeadLeft)]
#[case(TouchSite::HeadRight)]
#[case(TouchSite::Scruff)]
#[case(TouchSite::Chin)]
fn head_sites_pass_the_gate_when_near(#[case] site: TouchSite) {
    let gate = TouchGate::default();
    assert!(gate.on_touch(site, true, Zone::Near, false));
}

#[rstest]
#[case(TouchSite::BumpFrontLeft, true, Zone::Near, false, GateDecision::NotPatSite)]
#[case(TouchSite::BumpBackRight, true, Zone::Near, false, GateDecision::NotPatSite)]
#[case(TouchSite::HeadFront, false, Zone::Near, false, GateDecision::NotContacted)]
#[case(TouchSite::HeadFront, true, Zone::Medium, false, GateDecision::NotNear)]
#[case(TouchSite::HeadFront, true, Zone::Far, false, GateDecision::NotNear)]
#[case(TouchSite::HeadFront, true, Zone::Unknown, false, GateDecision::NotNear)]
#[case(TouchSite::Chin, true, Zone::Near, true, GateDecision::AlreadyReceived)]
fn gate_rejects(
    #[case] site: TouchSite,
    #[case] contacted: bool,
    #[case] zone: Zone,
    #[case] pat_received: bool,
    #[case] expected: GateDecision,
) {
    let gate = TouchGate::default();
    assert_eq!(gate.evaluate(site, contacted, zone, pat_received), expected);
    assert!(!gate.on_touch(site, contacted, zone, pat_received));
}

#[test]
fn touch_outside_near_never_accepts() {
    let t0 = Instant::now();
    let mut router = router();
    let mut session = SessionState::new();

    assert_eq!(
        router.route(&mut session, &touch(t0, 0.0, TouchSite::HeadFront, true)),
        RouteOutcome::TouchIgnored(GateDecision::NotNear)
    );
    router.route(&mut session, &distance(t0, 0.1, MEDIUM));
    assert_eq!(
        router.route(&mut session, &touch(t0, 0.5, TouchSite::HeadFront, true)),
        RouteOutcome::TouchIgnored(GateDecision::NotNear)
    );
    assert!(!session.pat_received());
}

#[test]
fn pat_is_one_shot_per_near_stay() {
    let t0 = Instant::now();
    let mut router = router();
    let mut session = SessionState::new();

    router.route(&mut session, &distance(t0, 0.0, NEAR));
    assert_eq!(
        router.route(&mut session, &touch(t0, 1.0, TouchSite::BumpFrontLeft, true)),
        RouteOutcome::TouchIgnored(GateDecision::NotPatSite)
    );
    assert_eq!(
        router.route(&mut session, &touch(t0, 1.5, TouchSite::Scruff, true)),
        RouteOutcome::PatAccepted
    );
    let spoken_after_pat = router.machine().actuator().spoken().len();

    // Release and press again
    router.route(&mut session, &touch(t0, 1.8, TouchSite::Scruff, false));
    assert_eq!(
        router.route(&mut session, &touch(t0, 2.1, TouchSite::Scruff, true)),
        RouteOutcome::TouchIgnored(GateDecision::AlreadyReceived)
    );
    assert_eq!(router.machine().actuator().spoken().len(), spoken_after_pat);
}

#[test]
fn pat_can_arrive_before_any_request() {
    let t0 = Instant::now();
    let mut router = router();
    let mut session = SessionState::new();

    router.route(&mut session, &distance(t0, 0.0, NEAR));
    assert_eq!(
        router.route(&mut session, &touch(t0, 0.5, TouchSite::HeadBack, true)),
        RouteOutcome::PatAccepted
    );
    assert!(!session.pat_requested());
    assert_eq!(
        router.route(&mut session, &distance(t0, 9.0, NEAR)),
        RouteOutcome::Zone(Default::default())
    );
}

#[test]
fn configured_head_sites_narrow_the_gate() {
    let mut config = ProxemicsConfig::default();
    config.sensors.head_sites = vec![TouchSite::HeadFront];
    let t0 = Instant::now();
    let mut router = router_with(&config);
    let mut session = SessionState::new();
    assert_eq!(router.gate().pat_sites(), &[TouchSite::HeadFront]);

    router.route(&mut session, &distance(t0, 0.0, NEAR));
    assert_eq!(
        router.route(&mut session, &touch(t0, 0.5, TouchSite::Chin, true)),
        RouteOutcome::TouchIgnored(GateDecision::NotPatSite)
    );
    assert_eq!(
        router.route(&mut session, &touch(t0, 0.8, TouchSite::HeadFront, true)),
        RouteOutcome::PatAccepted
    );
}

#[test]
fn non_canonical_distance_site_is_ignored() {
    let t0 = Instant::now();
    let mut router = router();
    let mut session = SessionState::new();

    let side = SensorEvent::Distance(DistanceSample::new(DistanceSite::Left, Some(NEAR), t0));
    assert_eq!(router.route(&mut session, &side), RouteOutcome::IgnoredSite(DistanceSite::Left));
    assert!(session.is_neutral());
    assert!(router.machine().actuator().commands().is_empty());
}

#[test]
fn canonical_site_follows_configuration() {
    let mut config = ProxemicsConfig::default();
    config.sensors.distance_site = DistanceSite::Right;
    let t0 = Instant::now();
    let mut router = router_with(&config);
    let mut session = SessionState::new();

    assert_eq!(
        router.route(&mut session, &distance(t0, 0.0, NEAR)),
        RouteOutcome::IgnoredSite(DistanceSite::Center)
    );
    let right = SensorEvent::Distance(DistanceSample::new(DistanceSite::Right, Some(NEAR), t0));
    router.route(&mut session, &right);
    assert_eq!(session.current_zone(), Zone::Near);
}

#[test]
fn feed_serializes_producers_into_one_consumer() {
    let (sender, feed) = channel();
    let mut router = router();
    let mut session = router.begin_session();

    let producers: Vec<_> = (0..3)
        .map(|_| {
            let sender = sender.clone();
            thread::spawn(move || {
                for _ in 0..10 {
                    sender.distance(DistanceSite::Center, Some(MEDIUM)).unwrap();
                }
            })
        })
        .collect();
    drop(sender);
    for producer in producers {
        producer.join().unwrap();
    }

    assert_eq!(feed.run(&mut router, &mut session), 30);
    assert_eq!(session.current_zone(), Zone::Medium);
    // One Medium entry no matter how many producers repeated it
    assert_eq!(router.machine().actuator().spoken(), vec!["Hello friend, have a seat!"]);
}

#[test]
fn drain_routes_only_what_is_queued() {
    let (sender, feed) = channel();
    let mut router = router();
    let mut session = SessionState::new();

    assert_eq!(feed.drain(&mut router, &mut session), 0);
    sender.distance(DistanceSite::Center, Some(NEAR)).unwrap();
    sender.touch(TouchSite::HeadRight, true).unwrap();
    assert_eq!(feed.drain(&mut router, &mut session), 2);
    assert!(session.pat_received());
}

#[test]
fn send_fails_once_feed_is_gone() {
    let (sender, feed) = channel();
    drop(feed);
    assert!(sender.distance(DistanceSite::Center, Some(FAR)).is_err());
}

#[test]
fn scheduled_feed_escalates_without_new_samples() {
    let mut config = ProxemicsConfig::default();
    config.timing.near_pat_request_secs = 0.05;
    let (sender, feed) = channel();
    let mut router = router_with(&config);
    let mut session = SessionState::new();

    let producer = thread::spawn(move || {
        sender.distance(DistanceSite::Center, Some(NEAR)).unwrap();
        thread::sleep(Duration::from_millis(300));
    });

    let routed = feed.run_scheduled(&mut router, &mut session, Duration::from_millis(20));
    producer.join().unwrap();

    assert_eq!(routed, 1);
    assert!(session.pat_requested());
}

#[test]
fn scenario_parses_and_replays() {
    let yaml = r#"
name: quick
steps:
  - { kind: distance, at_secs: 0.0, meters: 0.5 }
  - { kind: distance, at_secs: 4.5, meters: 0.5 }
  - { kind: touch, at_secs: 5.0, site: HeadFront }
  - { kind: distance, at_secs: 6.0, site: Back, meters: 3.0 }
  - { kind: tick, at_secs: 20.0 }
"#;
    let scenario = Scenario::from_yaml_str(yaml).unwrap();
    assert_eq!(scenario.steps.len(), 5);
    assert_eq!(scenario.duration_secs(), 20.0);
    assert_eq!(
        scenario.steps[2],
        ScenarioStep::Touch {
            at_secs: 5.0,
            site: TouchSite::HeadFront,
            contacted: true
        }
    );

    let mut router = router();
    let mut session = router.begin_session();
    let outcomes: Vec<_> = scenario
        .events(Instant::now())
        .iter()
        .map(|event| router.route(&mut session, event))
        .collect();

    assert_eq!(outcomes[2], RouteOutcome::PatAccepted);
    assert_eq!(outcomes[3], RouteOutcome::IgnoredSite(DistanceSite::Back));
    assert_eq!(outcomes[4], RouteOutcome::Ticked(None));
    assert_eq!(session.current_zone(), Zone::Near);
}

#[test]
fn scenario_rejects_negative_offsets() {
    let yaml = "name: bad\nsteps:\n  - { kind: tick, at_secs: -1.0 }\n";
    assert!(Scenario::from_yaml_str(yaml).is_err());
}

#[test]
fn scenario_rejects_offsets_past_the_clock_range() {
    let yaml = "name: bad\nsteps:\n  - { kind: tick, at_secs: 1.0e20 }\n";
    assert!(Scenario::from_yaml_str(yaml).is_err());
}

#[test]
fn oversized_step_offset_lands_after_the_origin() {
    let step = ScenarioStep::Tick { at_secs: 1.0e20 };
    let origin = Instant::now();
    assert_eq!(step.offset(), None);
    assert!(step.to_event(origin).at() > origin);
}

#[test]
fn bundled_files_load() {
    let manifest = env!("CARGO_MANIFEST_DIR");
    let config = ProxemicsConfig::load(format!("{}/config/default.yaml", manifest)).unwrap();
    assert_eq!(config, ProxemicsConfig::default());

    let scenario = Scenario::load(format!("{}/scenarios/approach_and_pat.yaml", manifest)).unwrap();
    let mut router = router_with(&config);
    let mut session = router.begin_session();
    for event in scenario.events(Instant::now()) {
        router.route(&mut session, &event);
    }
    // Ends with a second Far stay after the auto-neutral reset
    assert_eq!(session.current_zone(), Zone::Far);
    assert!(router
        .machine()
        .actuator()
        .spoken()
        .contains(&"Thank you for patting my head! Let's begin the tasks."));
}
