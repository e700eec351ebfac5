#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use scribe_core::{JointAngles, LinkGeometry};
use scribe_kinematics::ForwardKinematicsSolver;

#[derive(Debug, Arbitrary)]
struct Input {
    degrees: [f64; 5],
    lengths: [f64; 4],
}

fuzz_target!(|input: Input| {
    let [base_height, link1, link2, link3] = input.lengths;
    let geometry = LinkGeometry::new(base_height, link1, link2, link3);
    if geometry.validate().is_err() || input.degrees.iter().any(|d| !d.is_finite()) {
        return;
    }

    // Total over finite input: must not panic
    let pose = ForwardKinematicsSolver::new(geometry).solve(&JointAngles::from_degrees(input.degrees));
    let _ = pose.distance(&pose);
});
