use libm::pow;

const SUTHERLAND_REFERENCE_TEMPERATURE: f64 = 273.15; // K
const SUTHERLAND_REFERENCE_VISCOSITY: f64 = 1.716e-5; // Pa*s
const SUTHERLAND_CONSTANT: f64 = 110.4; // K

pub const SEA_LEVEL_AIR_DENSITY: f64 = 1.225; // kg/m^3

/// Dynamic viscosity of air in Pa*s, using Sutherland's law.
pub fn air_dynamic_viscosity(temperature_c: f64) -> f64 {
    let temperature_k = temperature_c + 273.15;
    let temperature_ratio = temperature_k / SUTHERLAND_REFERENCE_TEMPERATURE;

    SUTHERLAND_REFERENCE_VISCOSITY
        * (SUTHERLAND_REFERENCE_TEMPERATURE + SUTHERLAND_CONSTANT)
        / (temperature_k + SUTHERLAND_CONSTANT)
        * pow(temperature_ratio, 1.5)
}

pub fn air_kinematic_viscosity(temperature_c: f64, density: f64) -> f64 {
    air_dynamic_viscosity(temperature_c) / density
}
