use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("file format error: {0}")]
    FileFormat(String),
    #[error("no valid data found in file")]
    NoValidData,
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ResultsError>;
