use thiserror::Error;

/// Errors emitted by the generation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error(transparent)]
    Core(#[from] cpr_core::Error),
    #[error("candidate reached the top of the stage tree without a {0}")]
    IncompleteCandidate(&'static str),
}
