use thiserror::Error;

/// Failure taxonomy for the prediction pipeline.
///
/// `InsufficientData` and `InvalidParameter` abort a request before any
/// sampling happens. `NumericOverflow` is only surfaced at the sampler
/// boundary, where a non-finite intensity means an upstream contract was
/// violated; inside the expected-goals derivation such values are clamped
/// and logged instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("non-finite intensity `{name}` = {value}")]
    NumericOverflow { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, EngineError>;
