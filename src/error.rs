use std::{io, path::PathBuf};

use thiserror::Error;

/// Every failure the converter can report.
///
/// Only `RowShapeMismatch` is recovered from (the row is skipped); every
/// other variant ends the run with a non-zero exit status.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error("a filepath argument is required")]
    MissingArgument,

    #[error("only comma or semicolon separators are allowed, got `{0}`")]
    InvalidSeparator(String),

    #[error("file {} is not CSV", .0.display())]
    WrongExtension(PathBuf),

    #[error("file {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("cannot access file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("input has no header row")]
    EmptyInput,

    #[error("failed to read header row: {0}")]
    HeaderRead(#[source] csv::Error),

    #[error("failed to read row: {0}")]
    RowRead(#[source] csv::Error),

    #[error("line doesn't match headers format (expected {expected} fields, found {found})")]
    RowShapeMismatch { expected: usize, found: usize },

    #[error("failed to write output {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("record sink stopped before all records were delivered")]
    SinkClosed,

    #[error("record sink task failed: {0}")]
    SinkTask(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
