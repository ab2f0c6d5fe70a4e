//! Error type for the Caliper CLI.

use std::io;

use thiserror::Error;

use caliper::ResolveError;

/// The error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid document description: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid document description: {0}")]
    Spec(String),

    #[error("no such object or label: `{0}`")]
    UnknownObject(String),

    #[error("empty selection; pass at least one --select")]
    EmptySelection,

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
