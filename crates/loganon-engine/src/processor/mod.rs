//! Line processors.
//!
//! Each processor owns a compiled pattern and a transformation rule, is
//! configured once, and is immutable afterwards. The closed set of variants
//! is wrapped by [`Processor`] so a pipeline can hold them in one ordered list.

mod address;
pub mod email;
pub mod ipv4;
pub mod ipv6;

pub use email::EmailProcessor;
pub use ipv4::Ipv4Processor;
pub use ipv6::Ipv6Processor;

use crate::{EngineConfig, ProcessorKind, Result};
use std::borrow::Cow;

/// Capability shared by every processor.
pub trait LineProcessor {
    /// Build the processor from engine configuration, validating the
    /// parameters it reads.
    fn configure(config: &EngineConfig) -> Result<Self>
    where
        Self: Sized;

    /// Stable registry name.
    fn name(&self) -> &'static str;

    /// Transform one line (without its terminator). Text outside matches is
    /// never reordered or dropped.
    fn apply<'a>(&self, line: &'a str) -> Cow<'a, str>;
}

/// A configured processor of any kind.
#[derive(Debug, Clone)]
pub enum Processor {
    Ipv4(Ipv4Processor),
    Ipv6(Ipv6Processor),
    Email(EmailProcessor),
}

impl Processor {
    /// Configure the processor for `kind`.
    pub fn configure(kind: ProcessorKind, config: &EngineConfig) -> Result<Self> {
        Ok(match kind {
            ProcessorKind::Ipv4 => Processor::Ipv4(Ipv4Processor::configure(config)?),
            ProcessorKind::Ipv6 => Processor::Ipv6(Ipv6Processor::configure(config)?),
            ProcessorKind::Email => Processor::Email(EmailProcessor::configure(config)?),
        })
    }

    pub fn kind(&self) -> ProcessorKind {
        match self {
            Processor::Ipv4(_) => ProcessorKind::Ipv4,
            Processor::Ipv6(_) => ProcessorKind::Ipv6,
            Processor::Email(_) => ProcessorKind::Email,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Processor::Ipv4(p) => p.name(),
            Processor::Ipv6(p) => p.name(),
            Processor::Email(p) => p.name(),
        }
    }

    pub fn apply<'a>(&self, line: &'a str) -> Cow<'a, str> {
        match self {
            Processor::Ipv4(p) => p.apply(line),
            Processor::Ipv6(p) => p.apply(line),
            Processor::Email(p) => p.apply(line),
        }
    }
}

/// A located match within a line plus its replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan {
    /// Byte offset of the match start.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
    /// Text substituted for `line[start..end]`.
    pub replacement: String,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize, replacement: String) -> Self {
        Self {
            start,
            end,
            replacement,
        }
    }
}

/// Rebuild `line` with each span replaced at its own offset.
///
/// Spans must be sorted and non-overlapping, which `Regex::find_iter`
/// guarantees.
pub(crate) fn splice<'a>(line: &'a str, spans: &[MatchSpan]) -> Cow<'a, str> {
    if spans.is_empty() {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    let mut cursor = 0;
    for span in spans {
        out.push_str(&line[cursor..span.start]);
        out.push_str(&span.replacement);
        cursor = span.end;
    }
    out.push_str(&line[cursor..]);
    Cow::Owned(out)
}

/// Whether the match at `start..end` is glued to surrounding word text
/// (`v1.2.3.4.5`, `1.2.3.4.el8`, `Foo::bar`) rather than standing on its own.
///
/// A numeric component after the match (`203.0.113.42.443`) does not count:
/// tcpdump and netstat print ports that way.
pub(crate) fn is_embedded(line: &str, start: usize, end: usize) -> bool {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    let before = line[..start].chars().next_back();
    if matches!(before, Some(c) if is_word(c) || c == '.') {
        return true;
    }

    let mut after = line[end..].chars();
    match after.next() {
        Some(c) if is_word(c) => true,
        Some('.') => matches!(after.next(), Some(c) if c.is_alphabetic()),
        _ => false,
    }
}

/// Whether the match at `end` is followed by `.<digit>`, i.e. the text goes
/// on as a dotted quad the match did not take in.
pub(crate) fn has_dotted_tail(line: &str, end: usize) -> bool {
    let mut after = line[end..].chars();
    after.next() == Some('.') && matches!(after.next(), Some(c) if c.is_ascii_digit())
}
