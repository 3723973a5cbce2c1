#![no_main]

//! Fuzz target for full v1 decoding and the target-state codec.

use blueprint_types::{BlueprintV1, TargetState};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(blueprint) = BlueprintV1::from_slice(data) {
        // Whatever decodes must encode and decode to the same value.
        let encoded = serde_json::to_vec(&blueprint).expect("encode decoded blueprint");
        let again = BlueprintV1::from_slice(&encoded).expect("decode encoded blueprint");
        assert_eq!(blueprint, again);
    }

    let _ = TargetState::from_json(data);
});
