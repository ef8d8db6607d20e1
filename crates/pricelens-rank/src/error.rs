use thiserror::Error;

/// Reasons a ranking attempt was abandoned. All of them are recoverable:
/// the caller keeps the offers in arrival order.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    #[error("feature matrix contains non-finite values")]
    NonFiniteFeatures,

    #[error("training labels must contain both classes")]
    SingleClass,

    #[error("feature rows ({rows}) and labels ({labels}) differ in length")]
    LengthMismatch { rows: usize, labels: usize },

    #[error("solver did not converge within {max_iter} iterations")]
    NotConverged { max_iter: usize },

    #[error("separating hyperplane is degenerate (zero weight vector)")]
    DegenerateHyperplane,

    #[error("invalid solver parameter: {0}")]
    InvalidParams(String),
}
