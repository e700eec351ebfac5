//! End-to-end harness: source -> monitor -> samples

use std::io::Write;

use scribe_core::{ArmConfig, JointAngles, ScribeResult};
use scribe_kinematics::Sample;
use scribe_runtime::{Monitor, MonitorConfig, MonitorStats, Step};
use scribe_transport::{CaptureWriter, PacketSource};

use crate::ArmSimulator;

/// Result of draining a source through the monitor
#[derive(Debug, Clone)]
pub struct RunReport {
    pub samples: Vec<Sample>,
    pub stats: MonitorStats,
}

/// Step a monitor over `source` until it is exhausted, without pacing
pub fn drain<S: PacketSource>(source: S, arm: &ArmConfig) -> ScribeResult<RunReport> {
    let mut monitor = Monitor::new(source, arm, MonitorConfig::default())?;
    let mut samples = Vec::new();

    loop {
        match monitor.step()? {
            Step::Sample(sample) => samples.push(sample),
            Step::Discarded { .. } => {}
            Step::Exhausted => break,
        }
    }

    Ok(RunReport {
        samples,
        stats: monitor.stats(),
    })
}

/// Record a sweep out to `pose` and back to home, inserting a malformed
/// transfer every `malformed_every` packets (0 = never).
///
/// Returns the number of records written.
pub fn record_sweep<W: Write>(
    sim: &mut ArmSimulator,
    writer: &mut CaptureWriter<W>,
    pose: &JointAngles,
    steps: usize,
    malformed_every: usize,
) -> ScribeResult<u64> {
    let out = sim.sweep(&JointAngles::ZERO, pose, steps);
    let back = sim.sweep(pose, &JointAngles::ZERO, steps);

    for (i, packet) in out.iter().chain(back.iter()).enumerate() {
        if malformed_every > 0 && i > 0 && i % malformed_every == 0 {
            writer.write_packet(&sim.malformed())?;
        }
        writer.write_packet(packet)?;
    }
    writer.flush()?;

    tracing::debug!("Recorded sweep of {} records", writer.records());
    Ok(writer.records())
}
