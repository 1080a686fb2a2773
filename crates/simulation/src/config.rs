use std::fmt;
use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Distance between parallel roads of the city grid.
pub const GRID_SPACING: f32 = 100.0;
/// Planner coordinates are clamped into `[-GRID_BOUND, GRID_BOUND]`.
pub const GRID_BOUND: f32 = 300.0;
/// Safety cap on the raw (pre-densification) waypoint count.
pub const MAX_RAW_WAYPOINTS: usize = 50;
/// Segments inserted between each pair of raw waypoints.
pub const SEGMENTS_PER_SECTION: usize = 10;

/// Roads run at `i * GRID_SPACING` for `i` in `-ROAD_INDEX_RANGE..=ROAD_INDEX_RANGE`.
pub const ROAD_INDEX_RANGE: i32 = 2;
pub const ROAD_WIDTH: f32 = 15.0;
/// Side length of the square ground plane.
pub const GROUND_SIZE: f32 = 600.0;

/// Height of the vehicle origin above the ground.
pub const VEHICLE_ELEVATION: f32 = 1.0;
/// Height at which the route ribbon is drawn.
pub const RIBBON_HEIGHT: f32 = 2.0;

/// Where the vehicle waits (hidden) before the first route is generated.
pub const VEHICLE_PARKING_SPOT: (f32, f32) = (0.0, -200.0);

/// Errors raised while loading or validating a [`NavigationConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io(std::io::Error),
    /// The config file is not valid JSON for this schema.
    Json(serde_json::Error),
    /// A value is out of its allowed range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {e}"),
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Speed ramp for the autonomous driver, in world units per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    pub cruise_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    /// The driver never slows below this while approaching the destination.
    pub decel_floor: f32,
    /// Straight-line distance to the final waypoint that starts deceleration.
    pub decel_distance: f32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            cruise_speed: 0.2,
            acceleration: 0.001,
            deceleration: 0.0012,
            decel_floor: 0.05,
            decel_distance: 40.0,
        }
    }
}

/// Look-ahead pursuit tuning. Tuned for a 100-unit grid and a 0.2 cruise speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    pub look_ahead_gain: f32,
    pub look_ahead_reference: f32,
    pub min_look_ahead: f32,
    pub max_look_ahead: f32,
    pub turn_rate_gain: f32,
    /// Radians per tick.
    pub max_turn_rate: f32,
    /// Heading errors at or below this are ignored.
    pub heading_deadband: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            look_ahead_gain: 12.0,
            look_ahead_reference: 20.0,
            min_look_ahead: 8.0,
            max_look_ahead: 20.0,
            turn_rate_gain: 0.06,
            max_turn_rate: 0.04,
            heading_deadband: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualDriveConfig {
    pub speed: f32,
    pub turn_rate: f32,
    /// The vehicle is kept inside `[-bound, bound]` on both axes.
    pub bound: f32,
    pub arrival_distance: f32,
}

impl Default for ManualDriveConfig {
    fn default() -> Self {
        Self {
            speed: 0.2,
            turn_rate: 0.02,
            bound: 280.0,
            arrival_distance: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub initial_position: [f32; 3],
    pub initial_look_at: [f32; 3],
    pub survey_position: [f32; 3],
    pub survey_look_at: [f32; 3],
    pub survey_duration_ms: u64,
    pub follow_distance: f32,
    pub follow_height: f32,
    pub follow_look_ahead: f32,
    pub follow_position_lerp: f32,
    pub follow_look_at_lerp: f32,
    /// Lowest orbit elevation in radians (max polar angle of PI / 2.2).
    pub min_orbit_pitch: f32,
    pub max_orbit_pitch: f32,
    pub min_orbit_distance: f32,
    pub max_orbit_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_position: [100.0, 120.0, 150.0],
            initial_look_at: [0.0, 0.0, 0.0],
            survey_position: [0.0, 300.0, 50.0],
            survey_look_at: [0.0, 0.0, 0.0],
            survey_duration_ms: 2500,
            follow_distance: 50.0,
            follow_height: 50.0,
            follow_look_ahead: 20.0,
            follow_position_lerp: 0.12,
            follow_look_at_lerp: 0.15,
            min_orbit_pitch: std::f32::consts::FRAC_PI_2 - std::f32::consts::PI / 2.2,
            max_orbit_pitch: 1.55,
            min_orbit_distance: 20.0,
            max_orbit_distance: 600.0,
        }
    }
}

impl CameraConfig {
    pub fn initial_position(&self) -> Vec3 {
        Vec3::from_array(self.initial_position)
    }

    pub fn initial_look_at(&self) -> Vec3 {
        Vec3::from_array(self.initial_look_at)
    }

    pub fn survey_position(&self) -> Vec3 {
        Vec3::from_array(self.survey_position)
    }

    pub fn survey_look_at(&self) -> Vec3 {
        Vec3::from_array(self.survey_look_at)
    }

    pub fn survey_duration(&self) -> Duration {
        Duration::from_millis(self.survey_duration_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonConfig {
    pub reveal_duration_ms: u64,
    pub fade_distance: f32,
    pub radius: f32,
    pub radial_segments: usize,
    pub min_tubular_segments: usize,
    pub tubular_segments_per_point: usize,
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            reveal_duration_ms: 4000,
            fade_distance: 25.0,
            radius: 2.0,
            radial_segments: 8,
            min_tubular_segments: 128,
            tubular_segments_per_point: 4,
        }
    }
}

impl RibbonConfig {
    pub fn reveal_duration(&self) -> Duration {
        Duration::from_millis(self.reveal_duration_ms)
    }
}

/// All tunables of the navigation core.
///
/// Inserted by the app before `SimulationPlugin` when a JSON override is
/// supplied; otherwise the plugin initializes the defaults.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Distance at which the autonomous driver counts a waypoint as reached.
    pub arrival_radius: f32,
    pub speed: SpeedConfig,
    pub steering: SteeringConfig,
    pub manual: ManualDriveConfig,
    pub camera: CameraConfig,
    pub ribbon: RibbonConfig,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            arrival_radius: 5.0,
            speed: SpeedConfig::default(),
            steering: SteeringConfig::default(),
            manual: ManualDriveConfig::default(),
            camera: CameraConfig::default(),
            ribbon: RibbonConfig::default(),
        }
    }
}

impl NavigationConfig {
    /// Parse and validate a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: NavigationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arrival_radius", self.arrival_radius),
            ("speed.cruise_speed", self.speed.cruise_speed),
            ("speed.acceleration", self.speed.acceleration),
            ("speed.deceleration", self.speed.deceleration),
            ("steering.max_turn_rate", self.steering.max_turn_rate),
            ("steering.look_ahead_reference", self.steering.look_ahead_reference),
            ("manual.speed", self.manual.speed),
            ("manual.bound", self.manual.bound),
            ("ribbon.fade_distance", self.ribbon.fade_distance),
            ("ribbon.radius", self.ribbon.radius),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(ConfigError::Invalid(format!(
                "{name} must be positive, got {value}"
            )));
        }
        if self.speed.decel_floor < 0.0 || self.speed.decel_floor > self.speed.cruise_speed {
            return Err(ConfigError::Invalid(format!(
                "speed.decel_floor must be within [0, cruise_speed], got {}",
                self.speed.decel_floor
            )));
        }
        if self.steering.min_look_ahead > self.steering.max_look_ahead {
            return Err(ConfigError::Invalid(
                "steering.min_look_ahead exceeds steering.max_look_ahead".to_string(),
            ));
        }
        if self.camera.min_orbit_pitch >= self.camera.max_orbit_pitch {
            return Err(ConfigError::Invalid(
                "camera.min_orbit_pitch must be below camera.max_orbit_pitch".to_string(),
            ));
        }
        if self.ribbon.radial_segments < 3 {
            return Err(ConfigError::Invalid(
                "ribbon.radial_segments must be at least 3".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(NavigationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            NavigationConfig::from_json_str(r#"{ "speed": { "cruise_speed": 0.3 } }"#).unwrap();
        assert_eq!(config.speed.cruise_speed, 0.3);
        assert_eq!(config.speed.acceleration, SpeedConfig::default().acceleration);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = NavigationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(NavigationConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_negative_speed() {
        let err = NavigationConfig::from_json_str(r#"{ "speed": { "cruise_speed": -1.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("cruise_speed"));
    }

    #[test]
    fn test_rejects_floor_above_cruise() {
        let mut config = NavigationConfig::default();
        config.speed.decel_floor = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let err = NavigationConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_orbit_pitch_floor_matches_polar_limit() {
        let pitch = CameraConfig::default().min_orbit_pitch;
        assert!((pitch.to_degrees() - 8.18).abs() < 0.01);
    }
}
