//! Stream pipeline.
//!
//! Reads input one line at a time, decodes each line as UTF-8, runs the
//! configured processors in registry order, and writes the result. The
//! first line that fails to decode is written raw and switches the stream
//! to passthrough for good; later lines are copied byte for byte even if
//! they would decode.
//!
//! Memory use is bounded by the longest line, not the stream length.

use crate::processor::Processor;
use crate::{EngineConfig, ProcessorRegistry, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::io::{BufRead, Write};

/// Pipeline state while streaming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// Lines are decoded and anonymized.
    #[default]
    Text,
    /// Terminal: lines are copied unchanged.
    Passthrough,
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Lines read (a trailing fragment without newline counts as a line).
    pub lines: u64,

    /// Lines whose text was changed by a processor.
    pub lines_modified: u64,

    /// 1-based line number where passthrough began.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passthrough_from: Option<u64>,

    /// State at end of stream.
    pub final_state: PipelineState,
}

/// A configured, immutable processor chain.
#[derive(Debug, Clone)]
pub struct Pipeline {
    processors: Vec<Processor>,
}

impl Pipeline {
    /// Build a pipeline from `config`, resolving processor names against
    /// `registry`. Fails before any input is read on unknown names or
    /// invalid parameters.
    pub fn new(registry: &ProcessorRegistry, config: &EngineConfig) -> Result<Self> {
        let kinds = registry.resolve(config.processors.as_slice())?;
        let processors = kinds
            .into_iter()
            .map(|kind| Processor::configure(kind, config))
            .collect::<Result<Vec<_>>>()?;

        let pipeline = Self { processors };
        tracing::debug!(
            processors = ?pipeline.processor_names(),
            "pipeline configured"
        );
        Ok(pipeline)
    }

    /// Names of active processors in execution order.
    pub fn processor_names(&self) -> Vec<&'static str> {
        self.processors.iter().map(Processor::name).collect()
    }

    /// Run the processor chain over one decoded line.
    pub fn anonymize_line<'a>(&self, line: &'a str) -> Cow<'a, str> {
        let mut current = Cow::Borrowed(line);
        for processor in &self.processors {
            let changed = match processor.apply(&current) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(changed) => changed,
            };
            current = Cow::Owned(changed);
        }
        current
    }

    /// Stream `input` to `output`.
    ///
    /// Only I/O failures are returned; malformed data never ends the run.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<PipelineStats> {
        let mut stats = PipelineStats::default();
        let mut state = PipelineState::Text;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            stats.lines += 1;

            if state == PipelineState::Passthrough {
                output.write_all(&buf)?;
                continue;
            }

            match std::str::from_utf8(&buf) {
                Ok(text) => {
                    let (body, terminator) = split_terminator(text);
                    let anonymized = self.anonymize_line(body);
                    if anonymized != body {
                        stats.lines_modified += 1;
                        tracing::trace!(line = stats.lines, "line anonymized");
                    }
                    output.write_all(anonymized.as_bytes())?;
                    output.write_all(terminator.as_bytes())?;
                }
                Err(err) => {
                    tracing::debug!(
                        line = stats.lines,
                        error = %err,
                        "undecodable input, switching to passthrough"
                    );
                    state = PipelineState::Passthrough;
                    stats.passthrough_from = Some(stats.lines);
                    output.write_all(&buf)?;
                }
            }
        }

        output.flush()?;
        stats.final_state = state;
        Ok(stats)
    }
}

/// Split a line into body and terminator (`"\r\n"`, `"\n"`, or `""`).
fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, &line[body.len()..])
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, &line[body.len()..])
    } else {
        (line, "")
    }
}
