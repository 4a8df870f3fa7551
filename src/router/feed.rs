// src/router/feed.rs
// Serializes sensor events from any number of producers into one consumer that
// owns the router and the session. Producers never touch session state.

use log::{debug, info};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::{Duration, Instant};

use super::{DistanceSample, DistanceSite, EventRouter, SensorEvent, TouchSample};
use crate::core::{SessionState, TouchSite};
use crate::robot_interface::{Actuator, DialogueSource};
use crate::{ProxemicsError, Result};

/// Producer handle; clone one per sensor callback
#[derive(Debug, Clone)]
pub struct SensorSender {
    tx: Sender<SensorEvent>,
}

impl SensorSender {
    /// Queues an event
    pub fn send(&self, event: SensorEvent) -> Result<()> {
        self.tx.send(event).map_err(|_| ProxemicsError::FeedClosed)
    }

    /// Queues a distance reading stamped now
    pub fn distance(&self, site: DistanceSite, meters: Option<f64>) -> Result<()> {
        self.send(SensorEvent::Distance(DistanceSample::new(site, meters, Instant::now())))
    }

    /// Queues a touch change stamped now
    pub fn touch(&self, site: TouchSite, contacted: bool) -> Result<()> {
        self.send(SensorEvent::Touch(TouchSample::new(site, contacted, Instant::now())))
    }
}

/// Single-consumer end of the sensor queue
#[derive(Debug)]
pub struct SensorFeed {
    rx: Receiver<SensorEvent>,
}

/// Creates a connected sender/feed pair
pub fn channel() -> (SensorSender, SensorFeed) {
    let (tx, rx) = mpsc::channel();
    (SensorSender { tx }, SensorFeed { rx })
}

impl SensorFeed {
    /// Routes every event already queued, then returns how many were routed
    pub fn drain<A: Actuator, D: DialogueSource>(
        &self,
        router: &mut EventRouter<A, D>,
        session: &mut SessionState,
    ) -> usize {
        let mut routed = 0;
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    router.route(session, &event);
                    routed += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        routed
    }

    /// Routes events as they arrive until every sender is dropped.
    /// Purely reactive: timers only advance when an event arrives.
    pub fn run<A: Actuator, D: DialogueSource>(
        &self,
        router: &mut EventRouter<A, D>,
        session: &mut SessionState,
    ) -> usize {
        let mut routed = 0;
        for event in self.rx.iter() {
            router.route(session, &event);
            routed += 1;
        }
        info!("Sensor feed closed after {} events", routed);
        routed
    }

    /// Like [`SensorFeed::run`], but routes a tick whenever no event arrives
    /// within `interval`, so escalations fire without new sensor input.
    /// Returns the number of sensor events routed, ticks excluded.
    pub fn run_scheduled<A: Actuator, D: DialogueSource>(
        &self,
        router: &mut EventRouter<A, D>,
        session: &mut SessionState,
        interval: Duration,
    ) -> usize {
        let mut routed = 0;
        loop {
            match self.rx.recv_timeout(interval) {
                Ok(event) => {
                    router.route(session, &event);
                    routed += 1;
                }
                Err(RecvTimeoutError::Timeout) => {
                    let outcome = router.tick(session, Instant::now());
                    debug!("Scheduled tick: {:?}", outcome);
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        info!("Sensor feed closed after {} events", routed);
        routed
    }
}
