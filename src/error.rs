use thiserror::Error;

pub type Result<T> = std::result::Result<T, GhcndError>;

#[derive(Error, Debug)]
pub enum GhcndError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    #[error("Station {station_id} not found in catalog")]
    StationNotFound { station_id: String },

    #[error("Station {station_id} has no inventory entry for element {element}")]
    MissingElement {
        station_id: String,
        element: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl GhcndError {
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        GhcndError::MalformedRecord {
            line,
            message: message.into(),
        }
    }
}
