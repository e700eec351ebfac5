//! Error types for the Scribe pipeline

use thiserror::Error;

use crate::Axis;

/// Core Scribe errors
#[derive(Error, Debug)]
pub enum ScribeError {
    // Wire errors
    #[error("Invalid packet length: expected {expected}, got {actual}")]
    InvalidPacketLength { expected: usize, actual: usize },

    // Configuration errors
    #[error("Invalid calibration for {axis}: resolution {resolution} must be positive")]
    InvalidCalibration { axis: Axis, resolution: i32 },

    #[error("Invalid geometry: {link} = {value} must be a finite positive length")]
    InvalidGeometry { link: &'static str, value: f64 },

    #[error("Configuration error: {0}")]
    Config(String),

    // Capture errors
    #[error("Malformed capture: {0}")]
    Capture(String),

    // Transport errors
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type for Scribe operations
pub type ScribeResult<T> = Result<T, ScribeError>;
