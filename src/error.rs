//! Error type shared by the estimators, loaders and the `learn` binary.

use std::path::PathBuf;
use thiserror::Error;

/// Every fatal condition the toolkit can report.
///
/// Soft conditions (an unseen value during Naive Bayes scoring) are not
/// errors; they are logged and scored as zero.
#[derive(Debug, Error)]
pub enum LearnError {
    /// Feature vectors that must share a length do not.
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// Paired label sequences of different length.
    #[error("label sequences differ in length: {actual} actual vs {predicted} predicted")]
    LengthMismatch { actual: usize, predicted: usize },

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("{0} not fitted. Call train() first.")]
    NotFitted(&'static str),

    #[error("unknown distance function '{0}', expected 'manh' or 'e2'")]
    UnknownDistance(String),

    /// Inconsistent run configuration (algorithm selection, missing inputs).
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Raised only when an explicit iteration cap was configured.
    #[error("k-means did not converge within {iterations} iterations")]
    NotConverged { iterations: usize },
}

pub type Result<T> = std::result::Result<T, LearnError>;

impl LearnError {
    pub(crate) fn dimension(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        LearnError::DimensionMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }
}
