//! Per-packet values
//!
//! Each packet produces one value of each type, in pipeline order:
//! EncoderReading (raw counts) -> JointAngles (degrees) -> CartesianPose.
//! None of them outlive the packet they were computed from.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::{Axis, AXIS_COUNT};

/// Raw encoder counts, one per axis in wire order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EncoderReading(pub [i32; AXIS_COUNT]);

impl EncoderReading {
    pub const fn new(counts: [i32; AXIS_COUNT]) -> Self {
        EncoderReading(counts)
    }

    #[inline]
    pub fn get(&self, axis: Axis) -> i32 {
        self.0[axis.index()]
    }

    #[inline]
    pub fn counts(&self) -> &[i32; AXIS_COUNT] {
        &self.0
    }

    /// Iterate `(axis, count)` pairs in wire order
    pub fn iter(&self) -> impl Iterator<Item = (Axis, i32)> + '_ {
        Axis::ALL.iter().map(move |&axis| (axis, self.get(axis)))
    }
}

impl Index<Axis> for EncoderReading {
    type Output = i32;

    fn index(&self, axis: Axis) -> &i32 {
        &self.0[axis.index()]
    }
}

/// Calibrated joint angles in degrees, one per axis in wire order
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct JointAngles(pub [f64; AXIS_COUNT]);

impl JointAngles {
    pub const ZERO: JointAngles = JointAngles([0.0; AXIS_COUNT]);

    pub const fn from_degrees(degrees: [f64; AXIS_COUNT]) -> Self {
        JointAngles(degrees)
    }

    #[inline]
    pub fn get(&self, axis: Axis) -> f64 {
        self.0[axis.index()]
    }

    #[inline]
    pub fn set(&mut self, axis: Axis, degrees: f64) {
        self.0[axis.index()] = degrees;
    }

    /// Builder-style setter
    pub fn with(mut self, axis: Axis, degrees: f64) -> Self {
        self.set(axis, degrees);
        self
    }

    #[inline]
    pub fn degrees(&self) -> &[f64; AXIS_COUNT] {
        &self.0
    }

    /// The same angles in radians.
    ///
    /// This is the only place degrees become radians; the kinematics work in
    /// radians throughout after this call.
    pub fn to_radians(&self) -> [f64; AXIS_COUNT] {
        self.0.map(f64::to_radians)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Axis, f64)> + '_ {
        Axis::ALL.iter().map(move |&axis| (axis, self.get(axis)))
    }
}

impl Index<Axis> for JointAngles {
    type Output = f64;

    fn index(&self, axis: Axis) -> &f64 {
        &self.0[axis.index()]
    }
}

/// Probe tip position, in the length unit of the link geometry
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CartesianPose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianPose {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance to another pose
    pub fn distance(&self, other: &CartesianPose) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}
