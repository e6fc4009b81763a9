use std::path::PathBuf;

use crate::direction::Direction;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read configuration file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse configuration file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: number of floors must be between {min} and {max}, got {got}")]
    FloorsOutOfRange { got: u8, min: u8, max: u8 },
    #[error("invalid configuration: number of lifts must be between {min} and {max}, got {got}")]
    LiftsOutOfRange { got: u8, min: u8, max: u8 },
    #[error("invalid configuration: speed must be between {min} and {max}, got {got}")]
    InvalidSpeed { got: f64, min: f64, max: f64 },
    #[error("invalid configuration: {field} must be at most {max} ms, got {got}")]
    TimingOutOfRange { field: &'static str, got: u64, max: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("floor {floor} is outside the building (floors 1 to {num_floors})")]
    FloorOutOfRange { floor: u8, num_floors: u8 },
    #[error("floor {floor} has no {direction} button")]
    NoDirectionFromFloor { floor: u8, direction: Direction },
    #[error("unknown direction {0:?}, expected up or down")]
    UnknownDirection(String),
    #[error("malformed command {0:?}")]
    Malformed(String),
}
