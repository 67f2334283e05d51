use libm::copysign;
use log::debug;
use shared::{wingsail_hal::PhysicalConstants, Lut};

/// Intermediate values of one pass through the control law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimTabSolution {
    pub reynolds_number: f64,
    pub angle_of_attack: f64,
    pub trim_tab_angle: f64,
}

/// Maps apparent wind to a trim tab angle through a Reynolds number indexed
/// angle of attack table.
#[derive(Debug, Clone, Copy)]
pub struct WingsailController<'a> {
    constants: PhysicalConstants,
    lut: &'a Lut,
}

impl<'a> WingsailController<'a> {
    pub fn new(chord_width: f64, kinematic_viscosity: f64, lut: &'a Lut) -> Self {
        Self::with_constants(
            PhysicalConstants {
                chord_width,
                kinematic_viscosity,
            },
            lut,
        )
    }

    pub fn with_constants(constants: PhysicalConstants, lut: &'a Lut) -> Self {
        debug!(
            "Wingsail controller using chord width {} m, kinematic viscosity {} m^2/s, {} LUT",
            constants.chord_width,
            constants.kinematic_viscosity,
            lut.method()
        );

        Self { constants, lut }
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    pub fn compute_reynolds_number(&self, apparent_wind_speed: f64) -> f64 {
        (apparent_wind_speed * self.constants.chord_width) / self.constants.kinematic_viscosity
    }

    pub fn compute_angle_of_attack(&self, reynolds_number: f64) -> f64 {
        self.lut.evaluate(reynolds_number)
    }

    /// Range: -180 < direction <= 180, a direction of 0 counts as starboard
    /// (positive).
    pub fn compute_trim_tab_angle(&self, desired_alpha: f64, apparent_wind_direction: f64) -> f64 {
        let side = if apparent_wind_direction >= 0.0 {
            1.0
        } else {
            -1.0
        };

        copysign(desired_alpha, side)
    }

    pub fn get_trim_tab_angle(&self, apparent_wind_speed: f64, apparent_wind_direction: f64) -> f64 {
        self.evaluate(apparent_wind_speed, apparent_wind_direction)
            .trim_tab_angle
    }

    pub fn evaluate(&self, apparent_wind_speed: f64, apparent_wind_direction: f64) -> TrimTabSolution {
        let reynolds_number = self.compute_reynolds_number(apparent_wind_speed);
        let angle_of_attack = self.compute_angle_of_attack(reynolds_number);
        let trim_tab_angle = self.compute_trim_tab_angle(angle_of_attack, apparent_wind_direction);

        TrimTabSolution {
            reynolds_number,
            angle_of_attack,
            trim_tab_angle,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use shared::{
        wingsail_hal::DEFAULT_LOOKUP_TABLE, InterpolationMethod, CHORD_WIDTH_MAIN_SAIL,
        KINEMATIC_VISCOSITY,
    };

    use super::*;

    #[fixture]
    fn lut() -> Lut {
        Lut::new(&DEFAULT_LOOKUP_TABLE, InterpolationMethod::Linear).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[rstest]
    #[case(10.0, 98542.97177447738)]
    #[case(20.0, 197085.94354895476)]
    #[case(5.0, 49271.48588723869)]
    fn test_compute_reynolds_number(lut: Lut, #[case] speed: f64, #[case] expected: f64) {
        let controller = WingsailController::new(CHORD_WIDTH_MAIN_SAIL, KINEMATIC_VISCOSITY, &lut);

        assert_close(controller.compute_reynolds_number(speed), expected);
    }

    #[rstest]
    fn test_negative_speed_propagates(lut: Lut) {
        let controller = WingsailController::new(CHORD_WIDTH_MAIN_SAIL, KINEMATIC_VISCOSITY, &lut);

        assert_close(controller.compute_reynolds_number(-10.0), -98542.97177447738);
        assert_eq!(controller.compute_reynolds_number(0.0), 0.0);
    }

    #[rstest]
    #[case(1000000.0, [[500000.0, 3.0], [1500000.0, 5.0]], 4.0)]
    #[case(2000000.0, [[1500000.0, 5.0], [2500000.0, 7.0]], 6.0)]
    #[case(3000000.0, [[2500000.0, 7.0], [3500000.0, 9.0]], 8.0)]
    fn test_compute_angle_of_attack(
        #[case] reynolds_number: f64,
        #[case] table: [[f64; 2]; 2],
        #[case] expected: f64,
    ) {
        let lut = Lut::new(&table, InterpolationMethod::Linear).unwrap();
        let controller = WingsailController::new(CHORD_WIDTH_MAIN_SAIL, KINEMATIC_VISCOSITY, &lut);

        assert_close(controller.compute_angle_of_attack(reynolds_number), expected);
    }

    #[rstest]
    #[case(5.0, 45.0, 5.0)]
    #[case(10.0, -30.0, -10.0)]
    #[case(15.0, 0.0, 15.0)]
    #[case(15.0, -0.0, 15.0)]
    #[case(7.5, 180.0, 7.5)]
    #[case(7.5, -179.9, -7.5)]
    fn test_compute_trim_tab_angle(
        lut: Lut,
        #[case] desired_alpha: f64,
        #[case] direction: f64,
        #[case] expected: f64,
    ) {
        let controller = WingsailController::new(CHORD_WIDTH_MAIN_SAIL, KINEMATIC_VISCOSITY, &lut);

        assert_eq!(
            controller.compute_trim_tab_angle(desired_alpha, direction),
            expected
        );
    }

    #[rstest]
    fn test_trim_tab_takes_magnitude_from_alpha(lut: Lut) {
        let controller = WingsailController::new(CHORD_WIDTH_MAIN_SAIL, KINEMATIC_VISCOSITY, &lut);

        assert_eq!(controller.compute_trim_tab_angle(-4.0, 90.0), 4.0);
        assert_eq!(controller.compute_trim_tab_angle(-4.0, -90.0), -4.0);
    }

    #[rstest]
    fn test_low_wind_clamps_to_table(lut: Lut) {
        let controller = WingsailController::new(CHORD_WIDTH_MAIN_SAIL, KINEMATIC_VISCOSITY, &lut);
        let solution = controller.evaluate(1.0, 45.0);

        assert_close(solution.reynolds_number, 9854.297177447737);
        assert_eq!(solution.angle_of_attack, 5.75);
        assert_eq!(solution.trim_tab_angle, 5.75);
        assert_eq!(controller.get_trim_tab_angle(1.0, 45.0), 5.75);
    }

    #[rstest]
    #[case(10.0, 45.0, 5.75 + (98542.97177447738 - 50000.0) / 50000.0)]
    #[case(20.0, -30.0, -(6.75 + 0.25 * (197085.94354895476 - 100000.0) / 100000.0))]
    #[case(5.0, 0.0, 5.75)]
    fn test_get_trim_tab_angle(
        lut: Lut,
        #[case] speed: f64,
        #[case] direction: f64,
        #[case] expected: f64,
    ) {
        let controller = WingsailController::new(CHORD_WIDTH_MAIN_SAIL, KINEMATIC_VISCOSITY, &lut);

        assert_close(controller.get_trim_tab_angle(speed, direction), expected);
    }

    #[test]
    fn test_constants_are_not_hardcoded() {
        let lut = Lut::new(&[[0.0, 1.0], [2.0, 3.0]], InterpolationMethod::Linear).unwrap();
        let controller = WingsailController::with_constants(
            PhysicalConstants {
                chord_width: 0.5,
                kinematic_viscosity: 0.25,
            },
            &lut,
        );

        assert_eq!(controller.compute_reynolds_number(1.0), 2.0);
        assert_eq!(controller.get_trim_tab_angle(0.5, -10.0), -2.0);
        assert_eq!(controller.constants().chord_width, 0.5);
    }
}
