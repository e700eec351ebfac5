//! Scribe Runtime - Polling loop around the kinematic pipeline
//!
//! Each poll:
//! 1. Read one transfer from the packet source
//! 2. Decode, convert and solve (scribe-kinematics)
//! 3. Discard and count malformed transfers
//! 4. Hand the sample to the display

pub mod config;
pub mod display;
pub mod monitor;

pub use config::*;
pub use display::*;
pub use monitor::*;
