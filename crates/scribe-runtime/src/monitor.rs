//! Monitor - Polling loop implementation

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::time::MissedTickBehavior;

use scribe_core::{ArmConfig, ScribeError, ScribeResult};
use scribe_kinematics::{KinematicPipeline, Sample};
use scribe_transport::PacketSource;

/// Monitor configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorConfig {
    /// Delay between reads
    #[serde(deserialize_with = "crate::config::deserialize_duration")]
    pub poll_interval: Duration,
    /// Stop after this many malformed transfers in a row (0 = never)
    pub max_consecutive_failures: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            poll_interval: Duration::from_millis(100),
            max_consecutive_failures: 50,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct MonitorStats {
    pub packets_read: u64,
    pub samples: u64,
    pub discarded: u64,
    pub consecutive_discards: u32,
    pub last_sample: Option<Sample>,
}

/// Outcome of a single poll
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// A valid packet was decoded
    Sample(Sample),
    /// The transfer had the wrong length and was dropped
    Discarded { len: usize },
    /// The source has nothing more to read
    Exhausted,
}

/// Why [`Monitor::run`] returned
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    Interrupted,
    SourceExhausted,
    TooManyFailures,
    /// The sample callback asked to stop
    Requested,
}

/// Reads transfers from a source and runs them through the pipeline
pub struct Monitor<S: PacketSource> {
    source: S,
    pipeline: KinematicPipeline,
    config: MonitorConfig,
    stats: Arc<Mutex<MonitorStats>>,
}

impl<S: PacketSource> Monitor<S> {
    /// Validates the arm configuration before anything is read
    pub fn new(source: S, arm: &ArmConfig, config: MonitorConfig) -> ScribeResult<Self> {
        arm.validate()?;
        Ok(Monitor {
            source,
            pipeline: KinematicPipeline::new(arm)?,
            config,
            stats: Arc::new(Mutex::new(MonitorStats::default())),
        })
    }

    pub fn pipeline(&self) -> &KinematicPipeline {
        &self.pipeline
    }

    /// Snapshot of the current statistics
    pub fn stats(&self) -> MonitorStats {
        self.stats.lock().clone()
    }

    /// Shared statistics, readable from other threads while the monitor runs
    pub fn stats_handle(&self) -> Arc<Mutex<MonitorStats>> {
        Arc::clone(&self.stats)
    }

    /// Read and process one transfer.
    ///
    /// Wrong-length transfers are counted and dropped; source errors propagate.
    pub fn step(&mut self) -> ScribeResult<Step> {
        let Some(transfer) = self.source.read_packet()? else {
            return Ok(Step::Exhausted);
        };

        let mut stats = self.stats.lock();
        stats.packets_read += 1;

        match self.pipeline.process(&transfer) {
            Ok(sample) => {
                stats.samples += 1;
                stats.consecutive_discards = 0;
                stats.last_sample = Some(sample);
                tracing::debug!(
                    x = sample.pose.x,
                    y = sample.pose.y,
                    z = sample.pose.z,
                    "Processed packet"
                );
                Ok(Step::Sample(sample))
            }
            Err(ScribeError::InvalidPacketLength { expected, actual }) => {
                stats.discarded += 1;
                stats.consecutive_discards += 1;
                tracing::warn!(
                    "Discarding transfer: expected {} bytes, got {}",
                    expected,
                    actual
                );
                Ok(Step::Discarded { len: actual })
            }
            Err(e) => Err(e),
        }
    }

    fn too_many_failures(&self) -> bool {
        let limit = self.config.max_consecutive_failures;
        limit > 0 && self.stats.lock().consecutive_discards >= limit
    }

    /// Poll the source until it is exhausted, Ctrl-C is pressed, too many
    /// malformed transfers arrive in a row, or `on_sample` breaks.
    ///
    /// Reads happen on the runtime thread; a blocking source holds it for the
    /// duration of the read.
    pub async fn run<F>(&mut self, mut on_sample: F) -> ScribeResult<StopReason>
    where
        F: FnMut(&Sample) -> ScribeResult<ControlFlow<()>>,
    {
        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        tracing::info!(
            "Monitor started on {} (poll every {:?})",
            self.source.describe(),
            self.config.poll_interval
        );

        let reason = loop {
            tokio::select! {
                _ = &mut ctrl_c => break StopReason::Interrupted,
                _ = ticker.tick() => match self.step()? {
                    Step::Sample(sample) => {
                        if on_sample(&sample)?.is_break() {
                            break StopReason::Requested;
                        }
                    }
                    Step::Discarded { .. } => {
                        if self.too_many_failures() {
                            tracing::warn!(
                                "Giving up after {} malformed transfers in a row",
                                self.config.max_consecutive_failures
                            );
                            break StopReason::TooManyFailures;
                        }
                    }
                    Step::Exhausted => break StopReason::SourceExhausted,
                },
            }
        };

        let stats = self.stats();
        tracing::info!(
            "Monitor stopped ({:?}): {} read, {} samples, {} discarded",
            reason,
            stats.packets_read,
            stats.samples,
            stats.discarded
        );
        Ok(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::{Axis, EncoderReading, JointAngles};
    use scribe_transport::MemorySource;
    use scribe_wire::PacketDecoder;

    fn home_reading() -> EncoderReading {
        EncoderReading::new([15971, 24861, 26802, 16387, 13068])
    }

    fn fast_config(max_failures: u32) -> MonitorConfig {
        MonitorConfig {
            poll_interval: Duration::from_millis(1),
            max_consecutive_failures: max_failures,
        }
    }

    #[test]
    fn test_step_sample_and_discard() {
        let mut source = MemorySource::new();
        source.push(PacketDecoder::to_bytes(&home_reading()).to_vec());
        source.push(vec![0u8; 12]);

        let mut monitor = Monitor::new(source, &ArmConfig::default(), fast_config(0)).unwrap();

        match monitor.step().unwrap() {
            Step::Sample(sample) => assert_eq!(sample.angles, JointAngles::ZERO),
            other => panic!("expected sample, got {:?}", other),
        }
        assert_eq!(monitor.step().unwrap(), Step::Discarded { len: 12 });
        assert_eq!(monitor.step().unwrap(), Step::Exhausted);

        let stats = monitor.stats();
        assert_eq!(stats.packets_read, 2);
        assert_eq!(stats.samples, 1);
        assert_eq!(stats.discarded, 1);
        assert_eq!(stats.consecutive_discards, 1);
        assert!(stats.last_sample.is_some());
    }

    #[test]
    fn test_invalid_arm_rejected() {
        let mut arm = ArmConfig::default();
        arm.geometry.base_height = 0.0;
        assert!(matches!(
            Monitor::new(MemorySource::new(), &arm, MonitorConfig::default()),
            Err(ScribeError::InvalidGeometry { .. })
        ));
    }

    #[tokio::test]
    async fn test_run_until_exhausted() {
        let mut reading = home_reading();
        reading.0[Axis::Base.index()] += 16384;
        let source: MemorySource = vec![
            PacketDecoder::to_bytes(&home_reading()).to_vec(),
            vec![1, 2, 3],
            PacketDecoder::to_bytes(&reading).to_vec(),
        ]
        .into_iter()
        .collect();

        let mut monitor = Monitor::new(source, &ArmConfig::default(), fast_config(0)).unwrap();
        let mut seen = Vec::new();
        let reason = monitor
            .run(|sample| {
                seen.push(*sample);
                Ok(ControlFlow::Continue(()))
            })
            .await
            .unwrap();

        assert_eq!(reason, StopReason::SourceExhausted);
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].angles[Axis::Base], 90.0);
        assert_eq!(monitor.stats().discarded, 1);
    }

    #[tokio::test]
    async fn test_run_stops_on_request() {
        let source: MemorySource = (0..5)
            .map(|_| PacketDecoder::to_bytes(&home_reading()).to_vec())
            .collect();

        let mut monitor = Monitor::new(source, &ArmConfig::default(), fast_config(0)).unwrap();
        let reason = monitor
            .run(|_| Ok(ControlFlow::Break(())))
            .await
            .unwrap();

        assert_eq!(reason, StopReason::Requested);
        assert_eq!(monitor.stats().samples, 1);
    }

    #[tokio::test]
    async fn test_run_gives_up_on_garbage() {
        let source: MemorySource = (0..10).map(|_| vec![0u8; 64]).collect();
        let handle;
        let reason = {
            let mut monitor =
                Monitor::new(source, &ArmConfig::default(), fast_config(3)).unwrap();
            handle = monitor.stats_handle();
            monitor
                .run(|_| Ok(ControlFlow::Continue(())))
                .await
                .unwrap()
        };

        assert_eq!(reason, StopReason::TooManyFailures);
        assert_eq!(handle.lock().discarded, 3);
        assert_eq!(handle.lock().samples, 0);
    }

    #[tokio::test]
    async fn test_callback_error_propagates() {
        let source: MemorySource = vec![PacketDecoder::to_bytes(&home_reading()).to_vec()]
            .into_iter()
            .collect();
        let mut monitor = Monitor::new(source, &ArmConfig::default(), fast_config(0)).unwrap();

        let result = monitor
            .run(|_| Err(ScribeError::Transport("display closed".into())))
            .await;
        assert!(matches!(result, Err(ScribeError::Transport(_))));
    }
}
