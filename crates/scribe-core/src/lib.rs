//! Scribe Core - Fundamental types and primitives
//!
//! This crate defines the types shared by every stage of the digitizer pipeline:
//! - Axis identifiers (base, shoulder, elbow, wrist roll, wrist flip)
//! - Per-packet values (EncoderReading, JointAngles, CartesianPose)
//! - Static arm configuration (AxisCalibration, LinkGeometry, ArmConfig)
//! - The workspace error type

pub mod axis;
pub mod config;
pub mod error;
pub mod reading;

pub use axis::*;
pub use config::*;
pub use error::*;
pub use reading::*;
