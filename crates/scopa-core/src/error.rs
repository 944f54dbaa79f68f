use thiserror::Error;

/// A card token that is not `<1-10><B|C|D|S>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid card token '{token}' (expected rank 1-10 followed by B, C, D or S)")]
pub struct CardParseError {
    token: String,
}

impl CardParseError {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Reasons an analysis produced no result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    TokenParse(#[from] CardParseError),
    #[error("only {available} unseen cards remain; at least {required} are needed to sample an opponent hand")]
    InsufficientPool { available: usize, required: usize },
    #[error("{what} must contain at least one card")]
    EmptyInput { what: &'static str },
    #[error("trial count must be greater than zero")]
    ZeroTrials,
}
