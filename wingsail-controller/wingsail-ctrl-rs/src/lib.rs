// Define no_std except for testing and sil feature
#![cfg_attr(not(any(test, feature = "sil")), no_std)]
#![deny(unsafe_code)]

pub mod controller;

use log::trace;
use shared::wingsail_hal::{GpsData, WindSensorData, WingsailDriver, WingsailTelemetryFrame};

pub use controller::{TrimTabSolution, WingsailController};

/// Latest sensor readings and trim tab command for one wingsail.
///
/// The host owns the timing: it feeds sensor updates as they arrive and calls
/// [`Wingsail::update`] once per publish period.
pub struct Wingsail<'a> {
    controller: WingsailController<'a>,
    pub driver: &'a mut dyn WingsailDriver,
    filtered_wind_sensor: Option<WindSensorData>,
    gps: Option<GpsData>,
    last_solution: Option<TrimTabSolution>,
    trim_tab_angle: f64,
}

impl<'a> Wingsail<'a> {
    pub fn new(controller: WingsailController<'a>, driver: &'a mut dyn WingsailDriver) -> Self {
        Self {
            controller,
            driver,
            filtered_wind_sensor: None,
            gps: None,
            last_solution: None,
            trim_tab_angle: 0.0,
        }
    }

    pub fn update_wind_sensor(&mut self, data: WindSensorData) {
        trace!(
            "Wind sensor: {} m/s at {} deg",
            data.speed,
            data.direction
        );
        self.filtered_wind_sensor = Some(data);
    }

    pub fn update_gps(&mut self, data: GpsData) {
        trace!("GPS: {} kts heading {} deg", data.speed, data.heading);
        self.gps = Some(data);
    }

    /// Runs the control law on the latest wind reading and commands the trim
    /// tab. Returns `None` until a wind reading has arrived.
    pub fn update(&mut self) -> Option<f64> {
        let wind = self.filtered_wind_sensor?;
        let solution = self.controller.evaluate(wind.speed, wind.direction);

        trace!(
            "Re {:.0} -> alpha {} -> trim tab {}",
            solution.reynolds_number,
            solution.angle_of_attack,
            solution.trim_tab_angle
        );

        self.driver.set_trim_tab_angle(solution.trim_tab_angle);
        self.trim_tab_angle = solution.trim_tab_angle;
        self.last_solution = Some(solution);

        Some(solution.trim_tab_angle)
    }

    pub fn trim_tab_angle(&self) -> f64 {
        self.trim_tab_angle
    }

    pub fn controller(&self) -> &WingsailController<'a> {
        &self.controller
    }

    pub fn generate_telemetry_frame(&self) -> WingsailTelemetryFrame {
        let mut frame = WingsailTelemetryFrame::default();
        frame.timestamp = (self.driver.timestamp() * 1e3) as u64;
        frame.trim_tab_angle = self.trim_tab_angle;
        frame.boat_speed = self.gps.map(|gps| gps.speed);

        if let Some(wind) = self.filtered_wind_sensor {
            frame.apparent_wind_speed = wind.speed;
            frame.apparent_wind_direction = wind.direction;
        }

        if let Some(solution) = self.last_solution {
            frame.reynolds_number = solution.reynolds_number;
            frame.angle_of_attack = solution.angle_of_attack;
        }

        frame
    }
}
