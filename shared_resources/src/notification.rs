use crate::direction::Direction;

pub type LiftId = u8;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DoorState {
    Opening,
    Open,
    Closing,
    Closed,
}

impl DoorState {
    pub fn as_str(self) -> &'static str {
        match self {
            DoorState::Opening => "opening",
            DoorState::Open => "open",
            DoorState::Closing => "closing",
            DoorState::Closed => "closed",
        }
    }
}

/// State changes reported to the presentation layer. These are observations
/// only; nothing in the controller reacts to them.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    /// Sent when a lift departs, carrying its destination and how long the
    /// trip takes.
    LiftPositionChanged {
        lift_id: LiftId,
        floor: u8,
        travel_duration_ms: u64,
    },
    LiftDoorStateChanged {
        lift_id: LiftId,
        state: DoorState,
    },
    LiftBusyChanged {
        lift_id: LiftId,
        busy: bool,
    },
    FloorRequestStateChanged {
        floor: u8,
        direction: Direction,
        active: bool,
    },
}
