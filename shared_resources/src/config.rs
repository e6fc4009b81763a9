use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

pub const MIN_FLOORS: u8 = 2;
pub const MAX_FLOORS: u8 = 9;
pub const MIN_LIFTS: u8 = 1;
pub const MAX_LIFTS: u8 = 5;
pub const MIN_SPEED: f64 = 0.01;
pub const MAX_SPEED: f64 = 1000.0;
/// Upper bound for any single timing value, ten minutes.
pub const MAX_PHASE_MS: u64 = 600_000;

const CONFIG_FILE_PATH: &str = "config.json";
const FALLBACK_CONFIG_FILE_PATH: &str = "_config.json";

/// Durations of the timed lift phases, in milliseconds of simulated time.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct TimingConfig {
    pub travel_ms_per_floor: u64,
    pub door_open_ms: u64,
    /// How long the doors stay fully open before closing.
    pub door_hold_ms: u64,
    pub door_close_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            travel_ms_per_floor: 2000,
            door_open_ms: 1000,
            door_hold_ms: 1500,
            door_close_ms: 2500,
        }
    }
}

impl TimingConfig {
    pub fn travel_time(&self, from: u8, to: u8) -> Duration {
        Duration::from_millis(from.abs_diff(to) as u64 * self.travel_ms_per_floor)
    }

    pub fn door_open_time(&self) -> Duration {
        Duration::from_millis(self.door_open_ms)
    }

    pub fn door_hold_time(&self) -> Duration {
        Duration::from_millis(self.door_hold_ms)
    }

    pub fn door_close_time(&self) -> Duration {
        Duration::from_millis(self.door_close_ms)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub floors: u8,
    pub lifts: u8,
    pub speed: f64,
    pub timing: TimingConfig,
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile {
            floors: 5,
            lifts: 3,
            speed: 1.0,
            timing: TimingConfig::default(),
        }
    }
}

/// Building dimensions and phase timing of one simulation run. Only
/// obtainable through [`SimulationConfig::new`], so a value of this type has
/// always passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    floors: u8,
    lifts: u8,
    speed: f64,
    timing: TimingConfig,
}

impl SimulationConfig {
    pub fn new(floors: u8, lifts: u8, speed: f64, timing: TimingConfig) -> Result<Self, ConfigError> {
        if !(MIN_FLOORS..=MAX_FLOORS).contains(&floors) {
            return Err(ConfigError::FloorsOutOfRange { got: floors, min: MIN_FLOORS, max: MAX_FLOORS });
        }
        if !(MIN_LIFTS..=MAX_LIFTS).contains(&lifts) {
            return Err(ConfigError::LiftsOutOfRange { got: lifts, min: MIN_LIFTS, max: MAX_LIFTS });
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            return Err(ConfigError::InvalidSpeed { got: speed, min: MIN_SPEED, max: MAX_SPEED });
        }
        for (field, got) in [
            ("travel_ms_per_floor", timing.travel_ms_per_floor),
            ("door_open_ms", timing.door_open_ms),
            ("door_hold_ms", timing.door_hold_ms),
            ("door_close_ms", timing.door_close_ms),
        ] {
            if got > MAX_PHASE_MS {
                return Err(ConfigError::TimingOutOfRange { field, got, max: MAX_PHASE_MS });
            }
        }
        Ok(SimulationConfig { floors, lifts, speed, timing })
    }

    pub fn from_file(config_file: ConfigFile) -> Result<Self, ConfigError> {
        Self::new(config_file.floors, config_file.lifts, config_file.speed, config_file.timing)
    }

    /// Same timing and speed, new building dimensions.
    pub fn with_building(&self, floors: u8, lifts: u8) -> Result<Self, ConfigError> {
        Self::new(floors, lifts, self.speed, self.timing)
    }

    pub fn floors(&self) -> u8 {
        self.floors
    }

    pub fn lifts(&self) -> u8 {
        self.lifts
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn timing(&self) -> TimingConfig {
        self.timing
    }
}

pub fn parse_config(contents: &str, path: &Path) -> Result<ConfigFile, ConfigError> {
    serde_json::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&contents, path)
}

/// Reads the configuration file. An explicitly given path must exist;
/// otherwise `config.json` is tried, then the shipped `_config.json`, then
/// built-in defaults.
pub fn read_config_file(path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    if let Some(path) = path {
        return read_file(path);
    }
    for candidate in [CONFIG_FILE_PATH, FALLBACK_CONFIG_FILE_PATH] {
        let candidate = PathBuf::from(candidate);
        if candidate.exists() {
            return read_file(&candidate);
        }
    }
    Ok(ConfigFile::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(SimulationConfig::new(2, 1, 1.0, TimingConfig::default()).is_ok());
        assert!(SimulationConfig::new(9, 5, 1.0, TimingConfig::default()).is_ok());
    }

    #[test]
    fn rejects_building_outside_bounds() {
        assert!(matches!(
            SimulationConfig::new(1, 3, 1.0, TimingConfig::default()),
            Err(ConfigError::FloorsOutOfRange { got: 1, .. })
        ));
        assert!(matches!(
            SimulationConfig::new(10, 3, 1.0, TimingConfig::default()),
            Err(ConfigError::FloorsOutOfRange { got: 10, .. })
        ));
        assert!(matches!(
            SimulationConfig::new(5, 0, 1.0, TimingConfig::default()),
            Err(ConfigError::LiftsOutOfRange { got: 0, .. })
        ));
        assert!(matches!(
            SimulationConfig::new(5, 6, 1.0, TimingConfig::default()),
            Err(ConfigError::LiftsOutOfRange { got: 6, .. })
        ));
    }

    #[test]
    fn rejects_speed_outside_bounds() {
        for speed in [0.0, -1.0, 1e-20, 1e300, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    SimulationConfig::new(5, 3, speed, TimingConfig::default()),
                    Err(ConfigError::InvalidSpeed { .. })
                ),
                "speed {} was accepted",
                speed
            );
        }
        assert!(SimulationConfig::new(5, 3, MIN_SPEED, TimingConfig::default()).is_ok());
        assert!(SimulationConfig::new(5, 3, MAX_SPEED, TimingConfig::default()).is_ok());
    }

    #[test]
    fn rejects_timing_outside_bounds() {
        let timing = TimingConfig { travel_ms_per_floor: u64::MAX, ..TimingConfig::default() };
        assert!(matches!(
            SimulationConfig::new(5, 3, 1.0, timing),
            Err(ConfigError::TimingOutOfRange { field: "travel_ms_per_floor", .. })
        ));
        let timing = TimingConfig { door_close_ms: MAX_PHASE_MS + 1, ..TimingConfig::default() };
        assert!(matches!(
            SimulationConfig::new(5, 3, 1.0, timing),
            Err(ConfigError::TimingOutOfRange { field: "door_close_ms", .. })
        ));
        let timing = TimingConfig {
            travel_ms_per_floor: MAX_PHASE_MS,
            door_open_ms: MAX_PHASE_MS,
            door_hold_ms: MAX_PHASE_MS,
            door_close_ms: MAX_PHASE_MS,
        };
        let config = SimulationConfig::new(MAX_FLOORS, 1, 1.0, timing).unwrap();
        assert_eq!(
            config.timing().travel_time(1, MAX_FLOORS),
            Duration::from_millis((MAX_FLOORS as u64 - 1) * MAX_PHASE_MS)
        );
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let file = parse_config(r#"{ "floors": 7, "timing": { "door_open_ms": 100 } }"#, Path::new("test.json")).unwrap();
        assert_eq!(file.floors, 7);
        assert_eq!(file.lifts, 3);
        assert_eq!(file.timing.door_open_ms, 100);
        assert_eq!(file.timing.travel_ms_per_floor, 2000);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        assert!(matches!(
            parse_config("{ floors: ", Path::new("broken.json")),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn travel_time_scales_with_distance() {
        let timing = TimingConfig::default();
        assert_eq!(timing.travel_time(1, 4), Duration::from_millis(6000));
        assert_eq!(timing.travel_time(4, 1), Duration::from_millis(6000));
        assert_eq!(timing.travel_time(3, 3), Duration::ZERO);
    }
}
