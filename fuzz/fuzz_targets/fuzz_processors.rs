//! Fuzz target for the individual processors.
//!
//! Any mask width or ratio the constructors accept must process any text
//! without panicking, and masking must be idempotent.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use loganon_engine::{EmailProcessor, Ipv4Processor, Ipv6Processor, LineProcessor};

#[derive(Arbitrary, Debug)]
struct Input {
    ipv4_mask: u32,
    ipv6_mask: u32,
    include_private: bool,
    ratio: f64,
    line: String,
}

fuzz_target!(|input: Input| {
    if let Ok(p) = Ipv4Processor::new(input.ipv4_mask, input.include_private) {
        let once = p.apply(&input.line).into_owned();
        assert_eq!(p.apply(&once), once);
    }

    if let Ok(p) = Ipv6Processor::new(input.ipv6_mask, input.include_private) {
        let once = p.apply(&input.line).into_owned();
        assert_eq!(p.apply(&once), once);
    }

    if let Ok(p) = EmailProcessor::new(input.ratio) {
        let _ = p.apply(&input.line);
    }
});
