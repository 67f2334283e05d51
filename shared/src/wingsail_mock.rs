use core::any::Any;

use crate::wingsail_hal::WingsailDriver;

#[derive(Debug)]
pub struct WingsailDriverMock {
    start_timestamp: f64,
    trim_tab_angle: f64,
    trim_tab_commands: u32,
}

impl WingsailDriver for WingsailDriverMock {
    fn timestamp(&self) -> f64 {
        get_timestamp() - self.start_timestamp
    }

    fn set_trim_tab_angle(&mut self, angle: f64) {
        self.trim_tab_angle = angle;
        self.trim_tab_commands += 1;
    }

    fn get_trim_tab_angle(&self) -> f64 {
        self.trim_tab_angle
    }

    fn as_mut_any(&mut self) -> &mut dyn Any {
        self
    }
}

impl WingsailDriverMock {
    pub fn new() -> Self {
        Self {
            start_timestamp: get_timestamp(),
            trim_tab_angle: 0.0,
            trim_tab_commands: 0,
        }
    }

    pub fn trim_tab_commands(&self) -> u32 {
        self.trim_tab_commands
    }
}

#[cfg(any(test, feature = "std"))]
fn get_timestamp() -> f64 {
    extern crate std;

    let now = std::time::SystemTime::now();
    let duration = now
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    duration.as_secs_f64()
}

#[cfg(not(any(test, feature = "std")))]
fn get_timestamp() -> f64 {
    0.0
}
