use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Invalid probability for {entry}: {value} (must be between 0.0 and 1.0)")]
    InvalidProbability { entry: &'static str, value: f64 },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
