//! loganon - anonymize IP and email addresses in log streams.
//!
//! Reads a log from a file or stdin, masks addresses line by line, and
//! writes the result to stdout, a file, or back over the input.

use clap::Parser;
use loganon_cli::exit_codes::ExitCode;
use loganon_cli::io::{run_to_target, OutputTarget};
use loganon_cli::logging::{init_logging, LogConfig, LogFormat, Verbosity};
use loganon_engine::{AnonError, EngineConfig, Pipeline, ProcessorRegistry};
use std::path::PathBuf;

/// Anonymize IPv4, IPv6 and email addresses in log files
#[derive(Parser, Debug)]
#[command(name = "loganon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file (stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Write output to a file instead of stdout
    #[arg(short, long, conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Rewrite the input file atomically
    #[arg(short, long, requires = "input")]
    in_place: bool,

    /// Processors to run (repeatable or comma-separated; default: all)
    #[arg(short, long = "processor", value_delimiter = ',')]
    processors: Vec<String>,

    /// JSON configuration file
    #[arg(long, env = "LOGANON_CONFIG")]
    config: Option<PathBuf>,

    /// Low-order bits cleared in IPv4 addresses (1-32)
    #[arg(long)]
    ipv4_mask: Option<u32>,

    /// Low-order bits cleared in IPv6 addresses (1-128)
    #[arg(long)]
    ipv6_mask: Option<u32>,

    /// Also anonymize private-range IPv4 addresses
    #[arg(long)]
    include_private_ipv4: bool,

    /// Also anonymize private-range IPv6 addresses
    #[arg(long)]
    include_private_ipv6: bool,

    /// Share of each email part kept visible (0.0-1.0)
    #[arg(long)]
    email_ratio: Option<f64>,

    /// List available processors and exit
    #[arg(long)]
    list_processors: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Log progress at info level
    #[arg(short, long)]
    verbose: bool,

    /// Log at debug level
    #[arg(short, long)]
    debug: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with_all = ["verbose", "debug"])]
    quiet: bool,

    /// Log format for stderr (human, jsonl)
    #[arg(long, env = "LOGANON_LOG_FORMAT")]
    log_format: Option<LogFormat>,
}

fn main() {
    let cli = Cli::parse();

    let verbosity = Verbosity {
        verbose: cli.verbose,
        debug: cli.debug,
        quiet: cli.quiet,
    };
    init_logging(&LogConfig::resolve(verbosity, cli.log_format));

    let code = match run(&cli) {
        Ok(()) => ExitCode::Clean,
        Err(err) => {
            eprintln!("loganon: {}", err);
            ExitCode::from(&err)
        }
    };
    std::process::exit(code.as_i32());
}

fn run(cli: &Cli) -> Result<(), AnonError> {
    let registry = ProcessorRegistry::standard();

    if cli.list_processors {
        for kind in registry.kinds() {
            println!("{:<6} {}", kind.name(), kind.description());
        }
        return Ok(());
    }

    let config = resolve_config(cli)?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let pipeline = Pipeline::new(&registry, &config)?;

    let target = if cli.in_place {
        match &cli.input {
            Some(path) => OutputTarget::InPlace(path.clone()),
            None => {
                return Err(AnonError::ConfigError(
                    "--in-place requires an input file".to_string(),
                ))
            }
        }
    } else if let Some(path) = &cli.output {
        OutputTarget::File(path.clone())
    } else {
        OutputTarget::Stdout
    };

    let stats = run_to_target(&pipeline, cli.input.as_deref(), &target)?;
    tracing::info!(
        lines = stats.lines,
        lines_modified = stats.lines_modified,
        passthrough_from = ?stats.passthrough_from,
        "anonymization complete"
    );
    Ok(())
}

/// Defaults, then the config file, then command-line flags.
fn resolve_config(cli: &Cli) -> Result<EngineConfig, AnonError> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path).map_err(|err| match err {
            AnonError::IoError(e) => {
                AnonError::ConfigError(format!("cannot read {}: {}", path.display(), e))
            }
            other => other,
        })?,
        None => EngineConfig::default(),
    };

    if !cli.processors.is_empty() {
        config.processors = cli.processors.clone();
    }
    if let Some(bits) = cli.ipv4_mask {
        config.ipv4.mask_bits = bits;
    }
    if let Some(bits) = cli.ipv6_mask {
        config.ipv6.mask_bits = bits;
    }
    if cli.include_private_ipv4 {
        config.ipv4.include_private = true;
    }
    if cli.include_private_ipv6 {
        config.ipv6.include_private = true;
    }
    if let Some(ratio) = cli.email_ratio {
        config.email.ratio = ratio;
    }

    config.validate()?;
    Ok(config)
}
