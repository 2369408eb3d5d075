//! Command-line surface for the log anonymizer.
//!
//! The engine lives in `loganon-engine`; this crate adds the pieces a
//! process needs around it: logging bootstrap, exit codes, and input/output
//! handling including atomic in-place rewrites.

pub mod exit_codes;
pub mod io;
pub mod logging;
