//! Static arm configuration
//!
//! Calibration and geometry are supplied once per device and never mutated at
//! runtime. They are plain values passed into the pipeline so that several
//! arms (or tests) can use different constants side by side.

use serde::{Deserialize, Serialize};

use crate::{Axis, ScribeError, ScribeResult, AXIS_COUNT};

/// Zero reference and counts-per-revolution of one axis encoder
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisCalibration {
    /// Encoder count at the joint's zero-degree position
    pub home: i32,
    /// Encoder counts per full revolution, must be positive
    pub resolution: i32,
}

impl AxisCalibration {
    pub const fn new(home: i32, resolution: i32) -> Self {
        AxisCalibration { home, resolution }
    }

    /// Reject a non-positive resolution
    pub fn validate(&self, axis: Axis) -> ScribeResult<()> {
        if self.resolution <= 0 {
            return Err(ScribeError::InvalidCalibration {
                axis,
                resolution: self.resolution,
            });
        }
        Ok(())
    }
}

/// Calibration of all five axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalibrationTable {
    pub base: AxisCalibration,
    pub shoulder: AxisCalibration,
    pub elbow: AxisCalibration,
    pub wrist_roll: AxisCalibration,
    pub wrist_flip: AxisCalibration,
}

impl Default for CalibrationTable {
    fn default() -> Self {
        // Reference device home counts and encoder resolutions
        CalibrationTable {
            base: AxisCalibration::new(15971, 65536),
            shoulder: AxisCalibration::new(24861, 65536),
            elbow: AxisCalibration::new(26802, 32768),
            wrist_roll: AxisCalibration::new(16387, 16384),
            wrist_flip: AxisCalibration::new(13068, 16384),
        }
    }
}

impl CalibrationTable {
    pub fn from_array(entries: [AxisCalibration; AXIS_COUNT]) -> Self {
        let [base, shoulder, elbow, wrist_roll, wrist_flip] = entries;
        CalibrationTable {
            base,
            shoulder,
            elbow,
            wrist_roll,
            wrist_flip,
        }
    }

    pub fn get(&self, axis: Axis) -> AxisCalibration {
        match axis {
            Axis::Base => self.base,
            Axis::Shoulder => self.shoulder,
            Axis::Elbow => self.elbow,
            Axis::WristRoll => self.wrist_roll,
            Axis::WristFlip => self.wrist_flip,
        }
    }

    /// Entries in wire order
    pub fn to_array(&self) -> [AxisCalibration; AXIS_COUNT] {
        Axis::ALL.map(|axis| self.get(axis))
    }

    pub fn validate(&self) -> ScribeResult<()> {
        for axis in Axis::ALL {
            self.get(axis).validate(axis)?;
        }
        Ok(())
    }
}

/// Fixed mechanical dimensions of the arm
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkGeometry {
    /// Height of the shoulder joint above the base
    pub base_height: f64,
    /// Shoulder to elbow
    pub link1: f64,
    /// Elbow to wrist
    pub link2: f64,
    /// Wrist to probe tip
    pub link3: f64,
}

impl Default for LinkGeometry {
    fn default() -> Self {
        // Reference device, millimetres
        LinkGeometry {
            base_height: 210.82,
            link1: 362.32,
            link2: 322.43,
            link3: 135.97,
        }
    }
}

impl LinkGeometry {
    pub const fn new(base_height: f64, link1: f64, link2: f64, link3: f64) -> Self {
        LinkGeometry {
            base_height,
            link1,
            link2,
            link3,
        }
    }

    /// Full in-plane reach with every joint at zero
    pub fn reach(&self) -> f64 {
        self.link1 + self.link2 + self.link3
    }

    pub fn validate(&self) -> ScribeResult<()> {
        let lengths = [
            ("base_height", self.base_height),
            ("link1", self.link1),
            ("link2", self.link2),
            ("link3", self.link3),
        ];
        for (link, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScribeError::InvalidGeometry { link, value });
            }
        }
        Ok(())
    }
}

/// Complete static description of one arm
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArmConfig {
    pub calibration: CalibrationTable,
    pub geometry: LinkGeometry,
}

impl ArmConfig {
    pub fn new(calibration: CalibrationTable, geometry: LinkGeometry) -> Self {
        ArmConfig {
            calibration,
            geometry,
        }
    }

    /// Check calibration and geometry before the pipeline is built
    pub fn validate(&self) -> ScribeResult<()> {
        self.calibration.validate()?;
        self.geometry.validate()
    }
}
