//! Error handling for bibplate.
//! Defines the error type and result alias used throughout the crate.

use thiserror::Error;

/// Error types for bibplate operations.
///
/// Only configuration, entry and front-end failures are errors. Template
/// anomalies such as unknown placeholders or unpaired markers are rendered
/// verbatim instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Unknown or malformed configuration values
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Template structure that cannot be expanded safely
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// Entry data that does not describe a list of bibliography entries
    #[error("Entry error: {0}.")]
    EntryError(String),

    /// Errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to report
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
