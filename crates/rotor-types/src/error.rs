use thiserror::Error;

#[derive(Error, Debug)]
pub enum BemError {
    #[error("Polar data error: {0}")]
    DataError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Numeric degeneracy: {0}")]
    NumericDegeneracy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type BemResult<T> = Result<T, BemError>;
