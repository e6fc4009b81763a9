use crate::direction::Direction;
use crate::error::RequestError;

/// A (floor, direction) call button press. Floors are numbered from 1.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloorRequest {
    pub floor: u8,
    pub direction: Direction,
}

impl FloorRequest {
    /// Builds a request and checks it against a building of `num_floors`
    /// floors. The top floor has no up button and the bottom floor no down
    /// button.
    pub fn new(floor: u8, direction: Direction, num_floors: u8) -> Result<Self, RequestError> {
        if floor < 1 || floor > num_floors {
            return Err(RequestError::FloorOutOfRange { floor, num_floors });
        }
        if !direction.exists_on(floor, num_floors) {
            return Err(RequestError::NoDirectionFromFloor { floor, direction });
        }
        Ok(FloorRequest { floor, direction })
    }
}
