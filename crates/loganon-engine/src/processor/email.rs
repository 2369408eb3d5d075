//! Email address processor.
//!
//! `alice@example.com` becomes `al...@...e.com`: the local-part keeps its
//! first `floor(ratio * len)` characters, the domain keeps its last
//! `floor(ratio * len)` characters.

use super::{splice, LineProcessor, MatchSpan};
use crate::{AnonError, EmailOptions, EngineConfig, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").unwrap()
});

/// Default share of each email part that is kept.
pub const DEFAULT_EMAIL_RATIO: f64 = 0.5;

/// Partially redacts every email address in a line.
#[derive(Debug, Clone)]
pub struct EmailProcessor {
    ratio: f64,
}

impl EmailProcessor {
    pub const NAME: &'static str = "email";

    /// Create a processor keeping `ratio` (0.0..=1.0) of each part.
    pub fn new(ratio: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(AnonError::InvalidRatio(ratio));
        }
        Ok(Self { ratio })
    }

    pub fn with_options(options: &EmailOptions) -> Result<Self> {
        Self::new(options.ratio)
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }
}

impl Default for EmailProcessor {
    fn default() -> Self {
        Self {
            ratio: DEFAULT_EMAIL_RATIO,
        }
    }
}

impl LineProcessor for EmailProcessor {
    fn configure(config: &EngineConfig) -> Result<Self> {
        Self::with_options(&config.email)
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply<'a>(&self, line: &'a str) -> Cow<'a, str> {
        let spans: Vec<MatchSpan> = EMAIL_PATTERN
            .find_iter(line)
            .map(|m| MatchSpan::new(m.start(), m.end(), redact_email(m.as_str(), self.ratio)))
            .collect();
        splice(line, &spans)
    }
}

/// Redact one email address, splitting at the rightmost `@`.
///
/// Text without an `@` is returned unchanged.
pub fn redact_email(address: &str, ratio: f64) -> String {
    let Some((local, domain)) = address.rsplit_once('@') else {
        return address.to_string();
    };

    let local_keep = kept_chars(local, ratio);
    let domain_len = domain.chars().count();
    let domain_keep = kept_chars(domain, ratio);

    let prefix: String = local.chars().take(local_keep).collect();
    let suffix: String = domain.chars().skip(domain_len - domain_keep).collect();

    format!("{}...@...{}", prefix, suffix)
}

/// `floor(ratio * len)`, in characters.
fn kept_chars(part: &str, ratio: f64) -> usize {
    let len = part.chars().count();
    ((len as f64 * ratio).floor() as usize).min(len)
}
