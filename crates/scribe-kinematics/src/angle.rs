//! Encoder count to joint angle conversion

use scribe_core::{
    Axis, AxisCalibration, CalibrationTable, EncoderReading, JointAngles, ScribeResult,
    AXIS_COUNT,
};

/// Linear map from encoder counts to degrees, one calibration per axis.
///
/// `angle = (count - home) * 360 / resolution`. No wrap-around normalisation is
/// applied: a count several revolutions away from home yields an angle beyond
/// ±360°.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleConverter {
    calibration: [AxisCalibration; AXIS_COUNT],
}

impl AngleConverter {
    /// Build a converter, rejecting any non-positive resolution.
    ///
    /// Validation happens here, once; [`AngleConverter::convert`] never fails.
    pub fn new(table: &CalibrationTable) -> ScribeResult<Self> {
        table.validate()?;
        Ok(AngleConverter {
            calibration: table.to_array(),
        })
    }

    pub fn calibration(&self, axis: Axis) -> AxisCalibration {
        self.calibration[axis.index()]
    }

    /// Convert a single count on `axis` to degrees
    #[inline]
    pub fn axis_degrees(&self, axis: Axis, count: i32) -> f64 {
        counts_to_degrees(count, self.calibration[axis.index()])
    }

    /// Convert a full reading
    pub fn convert(&self, reading: &EncoderReading) -> JointAngles {
        JointAngles(Axis::ALL.map(|axis| self.axis_degrees(axis, reading[axis])))
    }
}

/// Degrees of `count` relative to the calibration's home position.
///
/// The count delta is widened before subtracting so that it stays exact over
/// the whole i32 range.
#[inline]
pub fn counts_to_degrees(count: i32, calibration: AxisCalibration) -> f64 {
    let delta = i64::from(count) - i64::from(calibration.home);
    (delta as f64 * 360.0) / f64::from(calibration.resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use scribe_core::ScribeError;

    fn reference() -> AngleConverter {
        AngleConverter::new(&CalibrationTable::default()).unwrap()
    }

    #[test]
    fn test_home_reading_is_zero() {
        let reading = EncoderReading::new([15971, 24861, 26802, 16387, 13068]);
        let angles = reference().convert(&reading);
        assert_eq!(angles, JointAngles::ZERO);
    }

    #[test]
    fn test_quarter_turns() {
        let converter = reference();

        // 65536 counts/rev: a quarter turn is 16384 counts
        assert_eq!(converter.axis_degrees(Axis::Base, 15971 + 16384), 90.0);
        // 32768 counts/rev
        assert_eq!(converter.axis_degrees(Axis::Elbow, 26802 - 8192), -90.0);
        // 16384 counts/rev
        assert_eq!(converter.axis_degrees(Axis::WristFlip, 13068 + 4096), 90.0);
    }

    #[test]
    fn test_no_wrap_normalisation() {
        let converter = reference();
        let count = 16387 + 3 * 16384 + 8192;
        assert_eq!(converter.axis_degrees(Axis::WristRoll, count), 3.0 * 360.0 + 180.0);
    }

    #[test]
    fn test_extreme_counts_do_not_overflow() {
        let cal = AxisCalibration::new(i32::MAX, 1);
        let degrees = counts_to_degrees(i32::MIN, cal);
        let expected = (i64::from(i32::MIN) - i64::from(i32::MAX)) as f64 * 360.0;
        assert_eq!(degrees, expected);
        assert!(degrees.is_finite());
    }

    #[test]
    fn test_invalid_resolution_rejected_at_construction() {
        let mut table = CalibrationTable::default();
        table.shoulder.resolution = -1;
        assert!(matches!(
            AngleConverter::new(&table),
            Err(ScribeError::InvalidCalibration {
                axis: Axis::Shoulder,
                resolution: -1
            })
        ));
    }

    #[test]
    fn test_axes_use_own_calibration() {
        let table = CalibrationTable::from_array([
            AxisCalibration::new(0, 360),
            AxisCalibration::new(100, 360),
            AxisCalibration::new(0, 720),
            AxisCalibration::new(-50, 36),
            AxisCalibration::new(0, 1),
        ]);
        let converter = AngleConverter::new(&table).unwrap();
        let angles = converter.convert(&EncoderReading::new([10, 110, 10, -49, 2]));

        assert_eq!(angles.degrees(), &[10.0, 10.0, 5.0, 10.0, 720.0]);
    }

    proptest! {
        #[test]
        fn prop_one_revolution_is_360(
            count in -1_000_000i32..1_000_000,
            home in -1_000_000i32..1_000_000,
            resolution in 1i32..1_000_000,
        ) {
            let cal = AxisCalibration::new(home, resolution);
            let diff = counts_to_degrees(count + resolution, cal) - counts_to_degrees(count, cal);
            prop_assert!((diff - 360.0).abs() < 1e-6);
        }

        #[test]
        fn prop_home_is_zero(home in any::<i32>(), resolution in 1i32..=i32::MAX) {
            let cal = AxisCalibration::new(home, resolution);
            prop_assert_eq!(counts_to_degrees(home, cal), 0.0);
        }

        #[test]
        fn prop_sign_follows_delta(
            count in any::<i32>(),
            home in any::<i32>(),
            resolution in 1i32..=i32::MAX,
        ) {
            let degrees = counts_to_degrees(count, AxisCalibration::new(home, resolution));
            prop_assert_eq!(degrees > 0.0, count > home);
            prop_assert_eq!(degrees < 0.0, count < home);
        }
    }
}
