//! Packet to pose pipeline

use serde::{Deserialize, Serialize};

use scribe_core::{ArmConfig, CartesianPose, EncoderReading, JointAngles, ScribeResult};
use scribe_wire::{PacketDecoder, RawPacket};

use crate::{AngleConverter, ForwardKinematicsSolver};

/// Everything derived from one packet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub reading: EncoderReading,
    pub angles: JointAngles,
    pub pose: CartesianPose,
}

/// Decoder, angle converter and kinematics for one arm
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicPipeline {
    converter: AngleConverter,
    solver: ForwardKinematicsSolver,
}

impl KinematicPipeline {
    /// Build a pipeline for `config`.
    ///
    /// Fails with `InvalidCalibration` if an axis resolution is not positive.
    /// Geometry is trusted as given.
    pub fn new(config: &ArmConfig) -> ScribeResult<Self> {
        Ok(KinematicPipeline {
            converter: AngleConverter::new(&config.calibration)?,
            solver: ForwardKinematicsSolver::new(config.geometry),
        })
    }

    pub fn converter(&self) -> &AngleConverter {
        &self.converter
    }

    pub fn solver(&self) -> &ForwardKinematicsSolver {
        &self.solver
    }

    /// Decode and transform one raw transfer.
    ///
    /// The only failure is `InvalidPacketLength`.
    pub fn process(&self, buf: &[u8]) -> ScribeResult<Sample> {
        let reading = PacketDecoder::decode(buf)?;
        Ok(self.sample(reading))
    }

    /// Transform an already length-checked packet
    pub fn process_packet(&self, packet: &RawPacket) -> Sample {
        self.sample(packet.reading())
    }

    pub fn angles(&self, reading: &EncoderReading) -> JointAngles {
        self.converter.convert(reading)
    }

    pub fn pose(&self, angles: &JointAngles) -> CartesianPose {
        self.solver.solve(angles)
    }

    fn sample(&self, reading: EncoderReading) -> Sample {
        let angles = self.angles(&reading);
        let pose = self.pose(&angles);
        Sample {
            reading,
            angles,
            pose,
        }
    }
}
