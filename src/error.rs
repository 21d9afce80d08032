use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::metrics::MetricsError;

/// Why a line of the process file was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Expected `pid arrival burst`, got this many fields.
    FieldCount(usize),
    NotAnInteger { field: &'static str, value: String },
    NonPositiveBurst(i64),
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ParseErrorKind::FieldCount(n) =>
                write!(f, "expected 3 fields `pid arrival burst`, found {}", n),
            ParseErrorKind::NotAnInteger { field, ref value } =>
                write!(f, "{} `{}` is not a non-negative integer", field, value),
            ParseErrorKind::NonPositiveBurst(b) =>
                write!(f, "burst time must be positive, found {}", b),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read {}: {source}", .path.display())]
    Io { path: PathBuf, #[source] source: io::Error },

    #[error("line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },

    #[error("process times overflow the simulation clock: last arrival plus total burst exceeds 18446744073709551615")]
    TimeOverflow,

    #[error("invalid quantum `{0}`: must be a positive integer")]
    InvalidQuantum(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

pub type Result<T> = std::result::Result<T, Error>;
