//! Scribe Kinematics - From encoder counts to probe tip position
//!
//! Per packet, in order:
//! 1. Decode encoder counts (scribe-wire)
//! 2. Convert counts to calibrated joint angles (AngleConverter)
//! 3. Solve forward kinematics for the tip position (ForwardKinematicsSolver)
//!
//! Every stage is pure; a pipeline can be shared freely between threads.

pub mod angle;
pub mod forward;
pub mod pipeline;

pub use angle::*;
pub use forward::*;
pub use pipeline::*;
