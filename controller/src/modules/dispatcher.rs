/// ----- DISPATCHER MODULE -----
/// Takes floor requests, hands each one to the nearest idle lift or parks it
/// in the pending queue, and keeps the call buttons in sync with what has
/// been served. It also owns the virtual clock: every timed lift phase is a
/// deadline in its timer queue, and `advance` fires them in order.

use std::time::Duration;

use tracing::{debug, info};

use shared_resources::config::SimulationConfig;
use shared_resources::direction::Direction;
use shared_resources::notification::{LiftId, Notification};
use shared_resources::request::FloorRequest;

use crate::modules::lift::{Lift, PhaseOutcome};
use crate::utilities::notifier::Notifier;
use crate::utilities::pending_queue::PendingRequestQueue;
use crate::utilities::registry::FloorRequestRegistry;
use crate::utilities::timer::TimerQueue;

#[derive(serde::Serialize, Debug, Clone)]
pub struct DispatcherSnapshot {
    pub now_ms: u64,
    pub lifts: Vec<Lift>,
    pub active_requests: Vec<FloorRequest>,
    pub pending_requests: Vec<FloorRequest>,
}

pub struct Dispatcher {
    config: SimulationConfig,
    lifts: Vec<Lift>,
    registry: FloorRequestRegistry,
    pending: PendingRequestQueue,
    timers: TimerQueue,
    notifier: Notifier,
}

impl Dispatcher {
    pub fn new(config: SimulationConfig, notifier: Notifier) -> Self {
        info!(floors = config.floors(), lifts = config.lifts(), "starting simulation");
        Dispatcher {
            config,
            lifts: (1..=config.lifts()).map(Lift::new).collect(),
            registry: FloorRequestRegistry::new(config.floors()),
            pending: PendingRequestQueue::new(),
            timers: TimerQueue::new(),
            notifier,
        }
    }

    /// Throws away every lift, request and timer and starts over with a new
    /// building. Lit buttons and busy lifts are reported as turned off first.
    pub fn reset(&mut self, config: SimulationConfig) {
        for (floor, direction) in self.registry.active_requests() {
            self.notifier.emit(Notification::FloorRequestStateChanged { floor, direction, active: false });
        }
        for lift in self.lifts.iter().filter(|lift| !lift.is_idle()) {
            self.notifier.emit(Notification::LiftBusyChanged { lift_id: lift.id(), busy: false });
        }
        info!(floors = config.floors(), lifts = config.lifts(), "resetting simulation");
        self.config = config;
        self.lifts = (1..=config.lifts()).map(Lift::new).collect();
        self.registry = FloorRequestRegistry::new(config.floors());
        self.pending = PendingRequestQueue::new();
        self.timers = TimerQueue::new();
    }

    /// Registers a button press. Returns false if the same button was
    /// already lit, in which case nothing happens.
    ///
    /// Panics on a floor or direction that does not exist in the building.
    pub fn handle_floor_request(&mut self, floor: u8, direction: Direction) -> bool {
        let request = match FloorRequest::new(floor, direction, self.config.floors()) {
            Ok(request) => request,
            Err(e) => panic!("invalid floor request reached the dispatcher: {}", e),
        };
        if !self.registry.submit(floor, direction) {
            debug!(floor, %direction, "duplicate request ignored");
            return false;
        }
        self.notifier.emit(Notification::FloorRequestStateChanged { floor, direction, active: true });

        match self.select_nearest_idle(floor) {
            Some(lift_id) => self.dispatch(lift_id, floor),
            None => {
                info!(floor, %direction, "no idle lift, request queued");
                self.pending.enqueue(request);
            }
        }
        true
    }

    /// Idle lift closest to `floor`, the lowest id winning a tie.
    pub fn select_nearest_idle(&self, floor: u8) -> Option<LiftId> {
        self.lifts
            .iter()
            .filter(|lift| lift.is_idle())
            .min_by_key(|lift| lift.current_floor().abs_diff(floor))
            .map(|lift| lift.id())
    }

    /// Called when `lift_id` has finished its door cycle at `floor`. Both
    /// buttons there count as served. Then at most one pending request is
    /// retried; if no lift can take it, it goes back to the head of the
    /// queue.
    pub fn on_lift_idle(&mut self, lift_id: LiftId, floor: u8) {
        debug!(lift = lift_id, floor, "lift idle");
        for direction in Direction::iter() {
            if self.registry.clear(floor, direction) {
                self.notifier.emit(Notification::FloorRequestStateChanged { floor, direction, active: false });
            }
        }
        let served = self.pending.remove_floor(floor);
        if served > 0 {
            debug!(floor, served, "dropped queued requests served on arrival");
        }

        let Some(request) = self.pending.dequeue_one() else {
            return;
        };
        match self.select_nearest_idle(request.floor) {
            Some(next_lift) => {
                info!(floor = request.floor, direction = %request.direction, "serving queued request");
                self.dispatch(next_lift, request.floor);
            }
            None => self.pending.requeue_front(request),
        }
    }

    fn dispatch(&mut self, lift_id: LiftId, floor: u8) {
        info!(lift = lift_id, floor, "dispatching");
        let timing = self.config.timing();
        let lift = &mut self.lifts[(lift_id - 1) as usize];
        let phase = lift.dispatch_to(floor, &timing, &mut self.notifier);
        self.timers.timer_start(lift_id, phase);
    }

    fn fire(&mut self, lift_id: LiftId) {
        let timing = self.config.timing();
        let lift = &mut self.lifts[(lift_id - 1) as usize];
        match lift.complete_phase(&timing, &mut self.notifier) {
            PhaseOutcome::Continue(phase) => self.timers.timer_start(lift_id, phase),
            PhaseOutcome::Idle { lift_id, floor } => self.on_lift_idle(lift_id, floor),
        }
    }

    /// Runs the simulation forward by `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) {
        self.advance_to(self.timers.now() + elapsed);
    }

    /// Fires every phase that ends at or before `time`, earliest first, then
    /// leaves the clock at `time`.
    pub fn advance_to(&mut self, time: Duration) {
        while let Some(lift_id) = self.timers.pop_due(time) {
            self.fire(lift_id);
        }
        self.timers.set_now(time);
    }

    /// Runs until no lift has a phase in flight and returns the clock.
    pub fn run_until_settled(&mut self) -> Duration {
        while let Some(deadline) = self.timers.next_deadline() {
            self.advance_to(deadline);
        }
        self.timers.now()
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn lifts(&self) -> &[Lift] {
        &self.lifts
    }

    pub fn lift(&self, lift_id: LiftId) -> Option<&Lift> {
        self.lifts.iter().find(|lift| lift.id() == lift_id)
    }

    pub fn is_request_active(&self, floor: u8, direction: Direction) -> bool {
        self.registry.is_active(floor, direction)
    }

    pub fn pending_requests(&self) -> Vec<FloorRequest> {
        self.pending.iter().copied().collect()
    }

    pub fn snapshot(&self) -> DispatcherSnapshot {
        DispatcherSnapshot {
            now_ms: self.now().as_millis() as u64,
            lifts: self.lifts.clone(),
            active_requests: self
                .registry
                .active_requests()
                .into_iter()
                .map(|(floor, direction)| FloorRequest { floor, direction })
                .collect(),
            pending_requests: self.pending_requests(),
        }
    }
}
