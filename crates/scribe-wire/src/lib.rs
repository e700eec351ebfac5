//! Scribe Wire Format - Encoder packets
//!
//! The arm reports its state as one fixed-size bulk transfer per reading:
//! - Bytes 0-1: header (ignored)
//! - Bytes 2-21: five encoder counts (i32, LE), one per axis
//! - Bytes 22-32: trailer (ignored)

pub mod packet;

pub use packet::*;
