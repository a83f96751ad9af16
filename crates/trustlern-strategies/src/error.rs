use std::path::PathBuf;

use thiserror::Error;
use trustlern_core::EvalError;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("failed to read probability table {}: {source}", .path.display())]
    TableIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("probability table is not a JSON object of numbers: {0}")]
    TableFormat(#[from] serde_json::Error),
    #[error("probability table key is not an integer review id: {0}")]
    InvalidReviewId(String),
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),
    #[error("strategy {0} takes parameters and cannot be built from its name alone")]
    MissingParameters(String),
    #[error("strategy already registered: {0}")]
    AlreadyRegistered(String),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

pub type Result<T> = std::result::Result<T, StrategyError>;
