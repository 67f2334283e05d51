use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};
use core::{any::Any, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    lut::{InterpolationMethod, Lut, LutError},
    CHORD_WIDTH_MAIN_SAIL, KINEMATIC_VISCOSITY,
};

// Reynolds number -> desired angle of attack (degrees) for the main sail
pub const DEFAULT_LOOKUP_TABLE: [[f64; 2]; 5] = [
    [50000.0, 5.75],
    [100000.0, 6.75],
    [200000.0, 7.0],
    [500000.0, 9.25],
    [1000000.0, 10.0],
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindSensorData {
    pub speed: f64,     // m/s, apparent
    pub direction: f64, // degrees, -180 < direction <= 180
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsData {
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,   // knots
    pub heading: f64, // degrees
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    pub chord_width: f64,         // m
    pub kinematic_viscosity: f64, // m^2/s
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WingsailConfig {
    #[serde(flatten)]
    pub constants: PhysicalConstants,
    pub lookup_table: Vec<Vec<f64>>,
    pub interpolation_method: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    Parse { line: usize, column: usize },
    Lut(LutError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WingsailTelemetryFrame {
    pub timestamp: u64,
    pub apparent_wind_speed: f64,
    pub apparent_wind_direction: f64,
    pub reynolds_number: f64,
    pub angle_of_attack: f64,
    pub trim_tab_angle: f64,
    pub boat_speed: Option<f64>,
}

pub trait WingsailDriver {
    fn timestamp(&self) -> f64;

    fn set_trim_tab_angle(&mut self, angle: f64);
    fn get_trim_tab_angle(&self) -> f64;

    fn as_mut_any(&mut self) -> &mut dyn Any;
}

impl PhysicalConstants {
    pub const fn default() -> Self {
        Self {
            chord_width: CHORD_WIDTH_MAIN_SAIL,
            kinematic_viscosity: KINEMATIC_VISCOSITY,
        }
    }
}

impl Default for WingsailConfig {
    fn default() -> Self {
        Self {
            constants: PhysicalConstants::default(),
            lookup_table: default_lookup_rows(),
            interpolation_method: InterpolationMethod::Linear.to_string(),
        }
    }
}

impl WingsailConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            line: e.line(),
            column: e.column(),
        })?;

        // Fail on a bad table now rather than when the controller comes up
        config.build_lut()?;

        Ok(config)
    }

    pub fn build_lut(&self) -> Result<Lut, ConfigError> {
        Lut::from_rows(&self.lookup_table, &self.interpolation_method).map_err(ConfigError::Lut)
    }
}

impl From<LutError> for ConfigError {
    fn from(error: LutError) -> Self {
        ConfigError::Lut(error)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse { line, column } => {
                write!(f, "invalid wingsail config at {}:{}", line, column)
            }
            ConfigError::Lut(error) => write!(f, "invalid wingsail config: {}", error),
        }
    }
}

impl WingsailTelemetryFrame {
    pub const fn default() -> Self {
        Self {
            timestamp: 0,
            apparent_wind_speed: 0.0,
            apparent_wind_direction: 0.0,
            reynolds_number: 0.0,
            angle_of_attack: 0.0,
            trim_tab_angle: 0.0,
            boat_speed: None,
        }
    }
}

pub fn default_lookup_rows() -> Vec<Vec<f64>> {
    let mut rows = vec![];
    for row in DEFAULT_LOOKUP_TABLE {
        rows.push(row.to_vec());
    }
    rows
}
