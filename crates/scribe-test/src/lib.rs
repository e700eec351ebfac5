//! Scribe Test Harness - Simulation and end-to-end validation
//!
//! This crate provides:
//! - An arm simulator producing packets for known joint angles
//! - Capture generation for replay
//! - End-to-end runs of sources through the monitor

pub mod integration;
pub mod simulator;

pub use integration::*;
pub use simulator::*;
