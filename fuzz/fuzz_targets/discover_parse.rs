#![no_main]

//! Fuzz target for version discovery.
//!
//! Arbitrary bytes go straight into `parse_blueprint` and the dispatcher; neither may panic.

use blueprint_load::{DispatchConfig, decode_blueprint};
use blueprint_types::parse_blueprint;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let discovered = parse_blueprint(data);

    let config = DispatchConfig {
        allow_test_apis: true,
    };
    let decoded = decode_blueprint(data, &config);

    // A successful full decode implies discovery succeeded with the same identifier.
    if let Ok(blueprint) = decoded {
        let general = discovered.expect("discovery must succeed when decode does");
        assert_eq!(&general.api, blueprint.api());
    }
});
