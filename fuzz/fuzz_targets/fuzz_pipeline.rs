//! Fuzz target for the stream pipeline.
//!
//! Arbitrary bytes, including invalid UTF-8, must never panic or fail, and
//! the output must keep the same number of lines as the input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use loganon_engine::{EngineConfig, Pipeline, ProcessorRegistry};

fuzz_target!(|data: &[u8]| {
    let pipeline = match Pipeline::new(&ProcessorRegistry::standard(), &EngineConfig::default()) {
        Ok(p) => p,
        Err(_) => return,
    };

    let mut output = Vec::new();
    pipeline
        .run(data, &mut output)
        .expect("in-memory run cannot fail");

    let newlines_in = data.iter().filter(|&&b| b == b'\n').count();
    let newlines_out = output.iter().filter(|&&b| b == b'\n').count();
    assert_eq!(newlines_in, newlines_out);
});
