#![no_main]

use libfuzzer_sys::fuzz_target;

use scribe_core::{ArmConfig, ScribeError};
use scribe_kinematics::KinematicPipeline;
use scribe_wire::PACKET_SIZE;

fuzz_target!(|data: &[u8]| {
    let Ok(pipeline) = KinematicPipeline::new(&ArmConfig::default()) else {
        return;
    };

    match pipeline.process(data) {
        Ok(sample) => {
            assert_eq!(data.len(), PACKET_SIZE);
            // Counts are bounded, so every stage stays finite
            assert!(sample.angles.degrees().iter().all(|a| a.is_finite()));
            assert!(sample.pose.x.is_finite() && sample.pose.y.is_finite() && sample.pose.z.is_finite());
        }
        Err(ScribeError::InvalidPacketLength { actual, .. }) => assert_eq!(actual, data.len()),
        Err(e) => panic!("unexpected error: {}", e),
    }
});
