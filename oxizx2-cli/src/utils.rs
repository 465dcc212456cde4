//! File handling for the CLI.

use oxizx2::Zx2Error;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Suffix of compressed files.
pub const SUFFIX: &str = ".zx2";

/// CLI failures, each naming the file involved.
#[derive(Debug, Error)]
pub enum CliError {
    /// No output name given and none can be derived from the input name.
    #[error("Cannot infer output filename from {}", .0.display())]
    CannotInferOutput(PathBuf),

    /// The input file cannot be opened.
    #[error("Cannot access input file {}: {source}", .path.display())]
    InputAccess {
        /// Input path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// The output file exists and overwriting was not forced.
    #[error("Already existing output file {}", .0.display())]
    OutputExists(PathBuf),

    /// The output file cannot be created.
    #[error("Cannot create output file {}: {source}", .path.display())]
    OutputCreate {
        /// Output path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// Decoding failed.
    #[error("{source} ({})", .path.display())]
    Decode {
        /// The input or output path, whichever the failure belongs to.
        path: PathBuf,
        /// Underlying error.
        source: Zx2Error,
    },
}

impl CliError {
    /// Attribute a decode error to the input or output file.
    pub fn decode(input: &Path, output: &Path, source: Zx2Error) -> Self {
        let path = if source.is_output_error() {
            output
        } else {
            input
        };
        Self::Decode {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Derive the output name by stripping the `.zx2` suffix.
///
/// The suffix alone is not a usable name.
pub fn infer_output_path(input: &Path) -> Result<PathBuf, CliError> {
    input
        .to_str()
        .and_then(|name| name.strip_suffix(SUFFIX))
        .filter(|stem| !stem.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| CliError::CannotInferOutput(input.to_path_buf()))
}

/// Open the compressed input file.
pub fn open_input(path: &Path) -> Result<File, CliError> {
    File::open(path).map_err(|source| CliError::InputAccess {
        path: path.to_path_buf(),
        source,
    })
}

/// Create the output file, refusing to replace an existing one unless forced.
pub fn create_output(path: &Path, force: bool) -> Result<File, CliError> {
    if !force && path.exists() {
        return Err(CliError::OutputExists(path.to_path_buf()));
    }
    File::create(path).map_err(|source| CliError::OutputCreate {
        path: path.to_path_buf(),
        source,
    })
}
