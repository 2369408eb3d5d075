//! Logging configuration for the loganon binary.
//!
//! Level precedence, lowest to highest: the built-in `warn`, `LOGANON_LOG`,
//! then `-v`/`-d`/`-q`. `RUST_LOG` sidesteps all three and is handed to the
//! filter verbatim by [`super::init_logging`].

/// Log output format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Human,
    /// One JSON object per event.
    Jsonl,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(LogFormat::Human),
            "jsonl" => Ok(LogFormat::Jsonl),
            _ => Err(format!("unknown log format '{}' (expected human or jsonl)", s)),
        }
    }
}

/// Minimum level written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Error,
    /// Address fallbacks; a clean run prints nothing.
    #[default]
    Warn,
    /// Run summary.
    Info,
    /// Pipeline order and the passthrough switch.
    Debug,
    /// One event per modified line.
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
        .into_iter()
        .find(|level| level.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown log level '{}'", s))
    }
}

/// The `-v`, `-d` and `-q` switches as given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbosity {
    pub verbose: bool,
    pub debug: bool,
    pub quiet: bool,
}

impl Verbosity {
    /// Level forced by the switches; `-q` beats `-d` beats `-v`.
    pub fn level(self) -> Option<LogLevel> {
        if self.quiet {
            Some(LogLevel::Error)
        } else if self.debug {
            Some(LogLevel::Debug)
        } else if self.verbose {
            Some(LogLevel::Info)
        } else {
            None
        }
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
}

impl LogConfig {
    /// Resolve against the process environment.
    pub fn resolve(verbosity: Verbosity, format: Option<LogFormat>) -> Self {
        Self::resolve_with(verbosity, format, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup.
    ///
    /// An unparseable `LOGANON_LOG` is ignored.
    pub fn resolve_with<F>(verbosity: Verbosity, format: Option<LogFormat>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = env("LOGANON_LOG").and_then(|val| val.parse::<LogLevel>().ok());
        LogConfig {
            format: format.unwrap_or_default(),
            level: verbosity.level().or(from_env).unwrap_or_default(),
        }
    }

    /// `EnvFilter` directive covering the binary and the engine.
    pub fn directive(&self) -> String {
        let level = self.level.as_str();
        format!("loganon={level},loganon_cli={level},loganon_engine={level}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(level: Option<&str>) -> impl Fn(&str) -> Option<String> {
        let level = level.map(str::to_string);
        move |key| match key {
            "LOGANON_LOG" => level.clone(),
            _ => None,
        }
    }

    #[test]
    fn test_default_is_warn_human() {
        let config = LogConfig::resolve_with(Verbosity::default(), None, env_with(None));
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.format, LogFormat::Human);
    }

    #[test]
    fn test_env_level_applies_without_flags() {
        let config = LogConfig::resolve_with(Verbosity::default(), None, env_with(Some("DEBUG")));
        assert_eq!(config.level, LogLevel::Debug);
    }

    #[test]
    fn test_flags_beat_env() {
        let quiet = Verbosity {
            quiet: true,
            ..Verbosity::default()
        };
        let config = LogConfig::resolve_with(quiet, None, env_with(Some("trace")));
        assert_eq!(config.level, LogLevel::Error);
    }

    #[test]
    fn test_bad_env_level_ignored() {
        let config = LogConfig::resolve_with(Verbosity::default(), None, env_with(Some("loud")));
        assert_eq!(config.level, LogLevel::Warn);
    }

    #[test]
    fn test_verbosity_order() {
        let all = Verbosity {
            verbose: true,
            debug: true,
            quiet: false,
        };
        assert_eq!(all.level(), Some(LogLevel::Debug));
        assert_eq!(
            Verbosity {
                verbose: true,
                ..Verbosity::default()
            }
            .level(),
            Some(LogLevel::Info)
        );
        assert_eq!(Verbosity::default().level(), None);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("jsonl".parse::<LogFormat>().unwrap(), LogFormat::Jsonl);
        assert!("json".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_directive() {
        let config = LogConfig {
            format: LogFormat::Human,
            level: LogLevel::Info,
        };
        assert_eq!(
            config.directive(),
            "loganon=info,loganon_cli=info,loganon_engine=info"
        );
    }
}
