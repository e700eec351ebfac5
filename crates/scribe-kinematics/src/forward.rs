//! Forward kinematics of the five-axis arm
//!
//! The arm is modelled as a planar three-link chain in a vertical plane
//! (shoulder, elbow and the wrist segment), then rotated about the vertical
//! axis by the base angle. Wrist roll is summed into the chain's cumulative
//! pitch before wrist flip scales the last link by its cosine.
//!
//! The roll term does move the tip in this model. A true roll about the probe
//! axis would not; keep the formula until it is checked against the device.

use scribe_core::{CartesianPose, JointAngles, LinkGeometry};

/// Joint angles to probe tip position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForwardKinematicsSolver {
    geometry: LinkGeometry,
}

impl ForwardKinematicsSolver {
    pub fn new(geometry: LinkGeometry) -> Self {
        ForwardKinematicsSolver { geometry }
    }

    pub fn geometry(&self) -> &LinkGeometry {
        &self.geometry
    }

    /// Tip position for `angles` (degrees). Total over all finite inputs.
    pub fn solve(&self, angles: &JointAngles) -> CartesianPose {
        let [t1, t2, t3, t4, t5] = angles.to_radians();
        let g = &self.geometry;

        // Shoulder joint
        let z_base = g.base_height;

        // Elbow
        let x2 = g.link1 * t2.cos();
        let z2 = z_base + g.link1 * t2.sin();

        // Wrist
        let x3 = x2 + g.link2 * (t2 + t3).cos();
        let z3 = z2 + g.link2 * (t2 + t3).sin();

        // Probe tip, extension scaled by wrist flip
        let flip = t5.cos();
        let x4 = x3 + g.link3 * (t2 + t3 + t4).cos() * flip;
        let z4 = z3 + g.link3 * (t2 + t3 + t4).sin() * flip;

        // Rotate in-plane reach about the vertical axis
        CartesianPose {
            x: x4 * t1.cos(),
            y: x4 * t1.sin(),
            z: z4,
        }
    }
}

impl Default for ForwardKinematicsSolver {
    fn default() -> Self {
        Self::new(LinkGeometry::default())
    }
}
