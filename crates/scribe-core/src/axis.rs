//! Axis definitions
//!
//! The arm is a serial chain of five rotary joints. Their order is fixed and
//! shared by the wire format, the calibration table and the kinematics:
//! - Base: rotation about the vertical axis
//! - Shoulder, Elbow: pitch joints in the vertical plane
//! - Wrist roll: summed into the pitch chain
//! - Wrist flip: scales the last link's extension

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of encoder axes on the arm
pub const AXIS_COUNT: usize = 5;

/// One rotary joint of the arm
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Axis {
    Base = 0,
    Shoulder = 1,
    Elbow = 2,
    WristRoll = 3,
    WristFlip = 4,
}

impl Axis {
    /// All axes in wire order
    pub const ALL: [Axis; AXIS_COUNT] = [
        Axis::Base,
        Axis::Shoulder,
        Axis::Elbow,
        Axis::WristRoll,
        Axis::WristFlip,
    ];

    /// Position of this axis in packets, readings and angle sets
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Short identifier, as used in configuration files
    pub fn name(self) -> &'static str {
        match self {
            Axis::Base => "base",
            Axis::Shoulder => "shoulder",
            Axis::Elbow => "elbow",
            Axis::WristRoll => "wrist_roll",
            Axis::WristFlip => "wrist_flip",
        }
    }

    /// Human-readable label for display
    pub fn label(self) -> &'static str {
        match self {
            Axis::Base => "Base Joint",
            Axis::Shoulder => "Shoulder Joint",
            Axis::Elbow => "Elbow Joint",
            Axis::WristRoll => "Wrist Roll Joint",
            Axis::WristFlip => "Wrist Flip Joint",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_index_roundtrip() {
        for (i, axis) in Axis::ALL.iter().enumerate() {
            assert_eq!(axis.index(), i);
            assert_eq!(Axis::from_index(i), Some(*axis));
        }
        assert_eq!(Axis::from_index(AXIS_COUNT), None);
    }

    #[test]
    fn test_axis_names() {
        assert_eq!(Axis::WristRoll.name(), "wrist_roll");
        assert_eq!(Axis::WristFlip.label(), "Wrist Flip Joint");
        assert_eq!(Axis::Base.to_string(), "base");
    }
}
