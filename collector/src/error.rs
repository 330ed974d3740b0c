use summary::SummaryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error(transparent)]
    Summary(#[from] SummaryError),

    #[error("Failed to list result files matching '{pattern}': {reason}")]
    Discovery { pattern: String, reason: String },
}

pub type CollectorResult<T> = Result<T, CollectorError>;
