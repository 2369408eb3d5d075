//! Fuzz target for engine configuration parsing.
//!
//! Tests that JSON configuration parsing and validation handle arbitrary
//! input without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use loganon_engine::{EngineConfig, Pipeline, ProcessorRegistry};

fuzz_target!(|data: &[u8]| {
    // Should never panic, only return an error
    if let Ok(config) = serde_json::from_slice::<EngineConfig>(data) {
        if config.validate().is_ok() {
            let _ = Pipeline::new(&ProcessorRegistry::standard(), &config);
        }
    }
});
