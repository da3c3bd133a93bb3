use thiserror::Error;

#[derive(Error, Debug)]
pub enum HugoError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown table '{0}'")]
    UnknownTable(String),

    #[error("Upload rejected: {0}")]
    UploadRejected(String),

    #[error("{0}")]
    Gateway(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HugoError>;
