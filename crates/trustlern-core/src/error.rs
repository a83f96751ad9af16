use thiserror::Error;

/// Failures raised while a strategy evaluates a single round.
///
/// All of these are data or configuration problems of the caller; none of
/// them is transient.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("round {round} has no reviews")]
    EmptyReviews { round: usize },
    #[error("missing configuration key: {0}")]
    MissingConfig(String),
    #[error("invalid configuration value for {key}: {reason}")]
    InvalidConfig { key: String, reason: String },
    #[error("offer carries no hotel_value")]
    MissingHotelValue,
    #[error("offer carries no review_id")]
    MissingReviewId,
    #[error("review feature not present: {0}")]
    MissingFeature(String),
    #[error("review feature {0} is neither numeric nor boolean")]
    InvalidFeature(String),
    #[error("review id {0} not found in probability table")]
    UnknownReviewId(i64),
}

pub type Result<T> = std::result::Result<T, EvalError>;
