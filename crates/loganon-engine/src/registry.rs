//! Processor registry.
//!
//! A fixed table of available processors in declared order. The table is
//! built once and passed by reference into the pipeline; its order is the
//! order processors run in, whatever order the caller names them.

use crate::{AnonError, Result};
use serde::{Deserialize, Serialize};

/// Kind of processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessorKind {
    Ipv4,
    Ipv6,
    Email,
}

impl ProcessorKind {
    /// Every kind, in declared order.
    pub const ALL: [ProcessorKind; 3] = [
        ProcessorKind::Ipv4,
        ProcessorKind::Ipv6,
        ProcessorKind::Email,
    ];

    /// Stable name used for selection.
    pub fn name(self) -> &'static str {
        match self {
            ProcessorKind::Ipv4 => "ipv4",
            ProcessorKind::Ipv6 => "ipv6",
            ProcessorKind::Email => "email",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ProcessorKind::Ipv4 => "mask the low-order bits of IPv4 addresses",
            ProcessorKind::Ipv6 => "mask the low-order bits of IPv6 addresses",
            ProcessorKind::Email => "truncate email local-parts and domains",
        }
    }
}

impl std::fmt::Display for ProcessorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Ordered table of available processors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorRegistry {
    kinds: Vec<ProcessorKind>,
}

impl ProcessorRegistry {
    /// The standard table: `ipv4`, `ipv6`, `email`.
    pub fn standard() -> Self {
        Self {
            kinds: ProcessorKind::ALL.to_vec(),
        }
    }

    /// Kinds in declared order.
    pub fn kinds(&self) -> &[ProcessorKind] {
        &self.kinds
    }

    /// Names in declared order.
    pub fn names(&self) -> Vec<&'static str> {
        self.kinds.iter().map(|kind| kind.name()).collect()
    }

    /// Look up a kind by name (case-sensitive).
    pub fn lookup(&self, name: &str) -> Result<ProcessorKind> {
        self.kinds
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| AnonError::UnknownProcessor {
                name: name.to_string(),
                valid: self.names().join(", "),
            })
    }

    /// Resolve requested names to kinds in declared order.
    ///
    /// Fails on the first unknown name. Duplicates are ignored.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<ProcessorKind>> {
        let mut requested = Vec::with_capacity(names.len());
        for name in names {
            requested.push(self.lookup(name.as_ref())?);
        }

        Ok(self
            .kinds
            .iter()
            .copied()
            .filter(|kind| requested.contains(kind))
            .collect())
    }
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
