/// ----- LIFT MODULE -----
/// One lift car. It accepts a destination while idle and then walks through
/// moving, doors opening, doors open and doors closing, one timed phase at a
/// time. The dispatcher runs the clock and calls `complete_phase` when the
/// current phase has elapsed.

use std::time::Duration;

use tracing::debug;

use shared_resources::config::TimingConfig;
use shared_resources::notification::{DoorState, LiftId, Notification};

use crate::utilities::notifier::Notifier;

#[derive(serde::Serialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LiftStatus {
    Idle,
    Moving { target: u8 },
    DoorsOpening,
    DoorsOpen,
    DoorsClosing,
}

impl LiftStatus {
    pub fn as_string(&self) -> String {
        match self {
            LiftStatus::Idle => String::from("idle"),
            LiftStatus::Moving { target } => format!("moving to {}", target),
            LiftStatus::DoorsOpening => String::from("doorsOpening"),
            LiftStatus::DoorsOpen => String::from("doorsOpen"),
            LiftStatus::DoorsClosing => String::from("doorsClosing"),
        }
    }
}

/// What a finished phase leads to.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum PhaseOutcome {
    /// Another timed phase has started and lasts this long.
    Continue(Duration),
    /// The door cycle is over and the lift rests at `floor`.
    Idle { lift_id: LiftId, floor: u8 },
}

#[derive(serde::Serialize, Debug, Clone)]
pub struct Lift {
    id: LiftId,
    current_floor: u8,
    status: LiftStatus,
}

impl Lift {
    pub fn new(id: LiftId) -> Self {
        Lift {
            id,
            current_floor: 1,
            status: LiftStatus::Idle,
        }
    }

    pub fn id(&self) -> LiftId {
        self.id
    }

    /// Floor the lift last came to rest at. While moving this is the floor
    /// it departed from.
    pub fn current_floor(&self) -> u8 {
        self.current_floor
    }

    pub fn status(&self) -> LiftStatus {
        self.status
    }

    pub fn is_idle(&self) -> bool {
        self.status == LiftStatus::Idle
    }

    /// Sends an idle lift to `target` and returns the length of the first
    /// phase. A call at the resting floor goes straight to the door cycle.
    ///
    /// Panics if the lift is not idle.
    pub fn dispatch_to(&mut self, target: u8, timing: &TimingConfig, notifier: &mut Notifier) -> Duration {
        assert!(
            self.is_idle(),
            "lift {} dispatched to floor {} while {}",
            self.id,
            target,
            self.status.as_string()
        );
        notifier.emit(Notification::LiftBusyChanged { lift_id: self.id, busy: true });

        if target == self.current_floor {
            debug!(lift = self.id, floor = target, "already at floor, opening doors");
            return self.open_doors(timing, notifier);
        }

        let travel_time = timing.travel_time(self.current_floor, target);
        debug!(lift = self.id, from = self.current_floor, to = target, ?travel_time, "moving");
        self.status = LiftStatus::Moving { target };
        notifier.emit(Notification::LiftPositionChanged {
            lift_id: self.id,
            floor: target,
            travel_duration_ms: travel_time.as_millis() as u64,
        });
        travel_time
    }

    /// Advances past the phase that just elapsed.
    ///
    /// Panics if no phase is in flight.
    pub fn complete_phase(&mut self, timing: &TimingConfig, notifier: &mut Notifier) -> PhaseOutcome {
        match self.status {
            LiftStatus::Idle => panic!("lift {} completed a phase while idle", self.id),
            LiftStatus::Moving { target } => {
                debug!(lift = self.id, floor = target, "arrived");
                self.current_floor = target;
                PhaseOutcome::Continue(self.open_doors(timing, notifier))
            }
            LiftStatus::DoorsOpening => {
                self.set_doors(LiftStatus::DoorsOpen, DoorState::Open, notifier);
                PhaseOutcome::Continue(timing.door_hold_time())
            }
            LiftStatus::DoorsOpen => {
                self.set_doors(LiftStatus::DoorsClosing, DoorState::Closing, notifier);
                PhaseOutcome::Continue(timing.door_close_time())
            }
            LiftStatus::DoorsClosing => {
                self.set_doors(LiftStatus::Idle, DoorState::Closed, notifier);
                notifier.emit(Notification::LiftBusyChanged { lift_id: self.id, busy: false });
                PhaseOutcome::Idle {
                    lift_id: self.id,
                    floor: self.current_floor,
                }
            }
        }
    }

    fn open_doors(&mut self, timing: &TimingConfig, notifier: &mut Notifier) -> Duration {
        self.set_doors(LiftStatus::DoorsOpening, DoorState::Opening, notifier);
        timing.door_open_time()
    }

    fn set_doors(&mut self, status: LiftStatus, door_state: DoorState, notifier: &mut Notifier) {
        debug!(lift = self.id, floor = self.current_floor, "doors {}", door_state.as_str());
        self.status = status;
        notifier.emit(Notification::LiftDoorStateChanged {
            lift_id: self.id,
            state: door_state,
        });
    }
}
