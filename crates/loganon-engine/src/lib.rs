//! Streaming anonymization engine for log files.
//!
//! Detects IPv4 addresses, IPv6 addresses, and email addresses inside
//! arbitrary log lines and replaces them with partially redacted forms,
//! passing everything else through unchanged.
//!
//! # Key Features
//!
//! - **Bit-level masking**: addresses are converted to fixed-width integers and
//!   their rightmost N bits cleared (32-bit IPv4, 128-bit IPv6).
//! - **Private-range exclusion**: a line containing a private address is left
//!   untouched unless private anonymization is requested.
//! - **Ratio redaction**: email local-parts keep a prefix, domains keep a suffix.
//! - **Binary-safe streaming**: the first line that is not valid UTF-8 switches
//!   the pipeline to raw passthrough for the rest of the stream.
//!
//! # Example
//!
//! ```no_run
//! use loganon_engine::{EngineConfig, Pipeline, ProcessorRegistry};
//!
//! let registry = ProcessorRegistry::standard();
//! let pipeline = Pipeline::new(&registry, &EngineConfig::default()).unwrap();
//!
//! let line = pipeline.anonymize_line("connect from 203.0.113.42 ok");
//! assert_eq!(line, "connect from 203.0.113.0 ok");
//! ```

pub mod classify;
pub mod codec;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod processor;
pub mod registry;

pub use classify::is_private;
pub use codec::{AddressFamily, AddressMask};
pub use config::{AddressOptions, EmailOptions, EngineConfig};
pub use error::{AnonError, Result};
pub use pipeline::{Pipeline, PipelineState, PipelineStats};
pub use processor::{EmailProcessor, Ipv4Processor, Ipv6Processor, LineProcessor, Processor};
pub use registry::{ProcessorKind, ProcessorRegistry};
