//! Error types for configuration, consent storage and form submission.

use std::path::PathBuf;

use thiserror::Error;

/// Failure loading site configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid window size {width}x{height}")]
    WindowSize { width: u32, height: u32 },
}

/// Failure reading or writing the persisted consent flag.
#[derive(Error, Debug)]
pub enum ConsentError {
    #[error("consent store I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt consent store {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Transport-level failure from a submitter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("submission rejected: {0}")]
    Rejected(String),
}

/// Outcome of a rejected submit attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("captcha answer does not match")]
    ChallengeMismatch,

    #[error("a submission is already in flight")]
    Busy,

    #[error("no submission in flight")]
    NotSubmitting,

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Unrecognised terminal command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{0}' is not a number")]
    NotANumber(String),
}
