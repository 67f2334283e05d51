#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod lut;
pub mod standard_atmosphere;
pub mod wingsail_hal;
pub mod wingsail_mock;

pub use lut::{InterpolationMethod, Lut, LutError, ShapeError};

pub const CHORD_WIDTH_MAIN_SAIL: f64 = 0.14; // In m, trim tab chord width is not included
pub const KINEMATIC_VISCOSITY: f64 = 0.000014207; // In m^2/s, air at 10 degC and 1.225 kg/m^3
