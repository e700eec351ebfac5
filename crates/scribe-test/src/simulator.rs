//! Arm simulator
//!
//! Produces the transfers a device would send for a given set of joint
//! angles, using the same calibration the pipeline will decode with. Framing
//! bytes are randomised so that anything reading them is caught.

use bytes::Bytes;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use scribe_core::{ArmConfig, Axis, EncoderReading, JointAngles};
use scribe_wire::{PacketDecoder, PACKET_SIZE};

/// Simulator settings
#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    /// Maximum random offset added to each encoder count (± counts)
    pub count_noise: i32,
    /// Fill header and trailer bytes with random data
    pub randomize_framing: bool,
    /// Longest malformed transfer generated
    pub max_malformed_len: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            count_noise: 0,
            randomize_framing: true,
            max_malformed_len: 64,
        }
    }
}

impl SimulatorConfig {
    /// Exact counts, zeroed framing
    pub fn exact() -> Self {
        SimulatorConfig {
            count_noise: 0,
            randomize_framing: false,
            ..Default::default()
        }
    }

    /// Encoder jitter of a few counts
    pub fn noisy() -> Self {
        SimulatorConfig {
            count_noise: 3,
            ..Default::default()
        }
    }
}

/// Simulated digitizer arm
pub struct ArmSimulator {
    arm: ArmConfig,
    config: SimulatorConfig,
    rng: StdRng,
}

impl ArmSimulator {
    pub fn new(arm: ArmConfig, config: SimulatorConfig) -> Self {
        Self::with_seed(arm, config, 0)
    }

    pub fn with_seed(arm: ArmConfig, config: SimulatorConfig, seed: u64) -> Self {
        ArmSimulator {
            arm,
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn arm(&self) -> &ArmConfig {
        &self.arm
    }

    /// Encoder counts the arm reports at `angles`
    pub fn reading_for(&mut self, angles: &JointAngles) -> EncoderReading {
        let noise = self.config.count_noise.abs();
        EncoderReading(Axis::ALL.map(|axis| {
            let cal = self.arm.calibration.get(axis);
            let offset = (angles[axis] * f64::from(cal.resolution) / 360.0).round();
            let jitter = if noise > 0 {
                self.rng.gen_range(-noise..=noise)
            } else {
                0
            };
            let count = f64::from(cal.home) + offset + f64::from(jitter);
            count.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
        }))
    }

    /// A full packet for `angles`
    pub fn packet_for(&mut self, angles: &JointAngles) -> Bytes {
        let reading = self.reading_for(angles);
        self.packet_with(&reading)
    }

    /// A full packet carrying exactly `reading`
    pub fn packet_with(&mut self, reading: &EncoderReading) -> Bytes {
        let mut buf = [0u8; PACKET_SIZE];
        if self.config.randomize_framing {
            self.rng.fill(&mut buf[..]);
        }
        // Length is PACKET_SIZE by construction
        let _ = PacketDecoder::encode(reading, &mut buf);
        Bytes::copy_from_slice(&buf)
    }

    /// A random transfer whose length is anything but a packet's
    pub fn malformed(&mut self) -> Bytes {
        let max = self.config.max_malformed_len.max(PACKET_SIZE + 1);
        let mut len = self.rng.gen_range(0..=max);
        if len == PACKET_SIZE {
            len += 1;
        }
        let mut buf = vec![0u8; len];
        self.rng.fill(&mut buf[..]);
        Bytes::from(buf)
    }

    /// Packets for `steps + 1` poses linearly interpolated from `from` to `to`
    pub fn sweep(&mut self, from: &JointAngles, to: &JointAngles, steps: usize) -> Vec<Bytes> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| {
                let t = i as f64 / steps as f64;
                let angles = JointAngles(Axis::ALL.map(|axis| {
                    from[axis] + (to[axis] - from[axis]) * t
                }));
                self.packet_for(&angles)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use scribe_kinematics::AngleConverter;

    #[test]
    fn test_home_angles_give_home_counts() {
        let mut sim = ArmSimulator::new(ArmConfig::default(), SimulatorConfig::default());
        let reading = sim.reading_for(&JointAngles::ZERO);
        assert_eq!(reading, EncoderReading::new([15971, 24861, 26802, 16387, 13068]));
    }

    #[test]
    fn test_framing_is_randomised() {
        let mut sim = ArmSimulator::with_seed(ArmConfig::default(), SimulatorConfig::default(), 7);
        let packets: Vec<Bytes> = (0..8).map(|_| sim.packet_for(&JointAngles::ZERO)).collect();

        assert!(packets.iter().all(|p| p.len() == PACKET_SIZE));
        assert!(packets.iter().any(|p| p[0] != 0 || p[32] != 0));
        for p in &packets {
            assert_eq!(
                PacketDecoder::decode(p).unwrap(),
                EncoderReading::new([15971, 24861, 26802, 16387, 13068])
            );
        }
    }

    #[test]
    fn test_exact_framing_is_zero() {
        let mut sim = ArmSimulator::new(ArmConfig::default(), SimulatorConfig::exact());
        let packet = sim.packet_for(&JointAngles::ZERO);
        assert_eq!(&packet[..2], &[0, 0]);
        assert!(packet[22..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_malformed_never_packet_sized() {
        let mut sim = ArmSimulator::with_seed(ArmConfig::default(), SimulatorConfig::default(), 3);
        for _ in 0..500 {
            assert_ne!(sim.malformed().len(), PACKET_SIZE);
        }
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let mut a = ArmSimulator::with_seed(ArmConfig::default(), SimulatorConfig::noisy(), 42);
        let mut b = ArmSimulator::with_seed(ArmConfig::default(), SimulatorConfig::noisy(), 42);
        let angles = JointAngles::from_degrees([10.0, 20.0, 30.0, 40.0, 50.0]);
        assert_eq!(a.packet_for(&angles), b.packet_for(&angles));
    }

    #[test]
    fn test_sweep_endpoints() {
        let mut sim = ArmSimulator::new(ArmConfig::default(), SimulatorConfig::exact());
        let to = JointAngles::ZERO.with(Axis::Base, 90.0);
        let packets = sim.sweep(&JointAngles::ZERO, &to, 4);
        assert_eq!(packets.len(), 5);

        let converter = AngleConverter::new(&ArmConfig::default().calibration).unwrap();
        let first = converter.convert(&PacketDecoder::decode(&packets[0]).unwrap());
        let mid = converter.convert(&PacketDecoder::decode(&packets[2]).unwrap());
        let last = converter.convert(&PacketDecoder::decode(&packets[4]).unwrap());
        assert_eq!(first, JointAngles::ZERO);
        assert_eq!(mid[Axis::Base], 45.0);
        assert_eq!(last[Axis::Base], 90.0);
    }

    proptest! {
        #[test]
        fn prop_simulated_angles_decode_within_one_count(
            degrees in proptest::array::uniform5(-720.0f64..720.0),
        ) {
            let arm = ArmConfig::default();
            let mut sim = ArmSimulator::new(arm, SimulatorConfig::default());
            let angles = JointAngles::from_degrees(degrees);

            let reading = PacketDecoder::decode(&sim.packet_for(&angles)).unwrap();
            let decoded = AngleConverter::new(&arm.calibration).unwrap().convert(&reading);

            for axis in Axis::ALL {
                let step = 360.0 / f64::from(arm.calibration.get(axis).resolution);
                prop_assert!((decoded[axis] - angles[axis]).abs() <= step / 2.0 + 1e-9);
            }
        }
    }
}
