use thiserror::Error;

#[derive(Error, Debug)]
pub enum EyeSimError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Failed to parse CSV data: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EyeSimError>;
