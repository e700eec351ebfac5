//! Scribe Transport - Where raw transfers come from
//!
//! - `PacketSource`: blocking source of raw transfers
//! - `MemorySource`: in-memory queue (tests, simulation)
//! - `CaptureWriter` / `ReplaySource`: length-prefixed capture files

pub mod capture;
pub mod source;

pub use capture::*;
pub use source::*;
