//! Input and output plumbing for the binary.
//!
//! stdin/stdout are the defaults; `-` also names stdin. In-place rewrites
//! stream into a temporary file next to the target and rename it over the
//! original only after the whole input has been processed.

use loganon_engine::{AnonError, Pipeline, PipelineStats, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Where the anonymized stream goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
    /// Replace the input file once the run succeeds.
    InPlace(PathBuf),
}

/// Open the input stream. `None` and `-` mean stdin.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        None => Ok(Box::new(io::stdin().lock())),
        Some(p) if p.as_os_str() == "-" => Ok(Box::new(io::stdin().lock())),
        Some(p) => {
            let file = File::open(p)?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Run `pipeline` from `input` into `target`.
pub fn run_to_target(
    pipeline: &Pipeline,
    input: Option<&Path>,
    target: &OutputTarget,
) -> Result<PipelineStats> {
    match target {
        OutputTarget::Stdout => {
            let reader = open_input(input)?;
            let stdout = io::stdout();
            let writer = BufWriter::new(stdout.lock());
            pipeline.run(reader, writer)
        }
        OutputTarget::File(path) => {
            let reader = open_input(input)?;
            let writer = BufWriter::new(File::create(path)?);
            pipeline.run(reader, writer)
        }
        OutputTarget::InPlace(path) => rewrite_in_place(pipeline, path),
    }
}

/// Anonymize `path` into a sibling temp file, then rename it over `path`.
///
/// The original is left untouched if the run fails.
pub fn rewrite_in_place(pipeline: &Pipeline, path: &Path) -> Result<PipelineStats> {
    let reader = BufReader::new(File::open(path)?);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    let stats = {
        let writer = BufWriter::new(temp.as_file_mut());
        pipeline.run(reader, writer)?
    };
    temp.as_file().sync_all()?;

    let permissions = std::fs::metadata(path)?.permissions();
    std::fs::set_permissions(temp.path(), permissions)?;

    temp.persist(path).map_err(|e| AnonError::IoError(e.error))?;
    tracing::debug!(path = %path.display(), "rewrote file in place");
    Ok(stats)
}
