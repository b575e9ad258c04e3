use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {message}")]
    Catalog { message: String },
}

pub type Result<T> = std::result::Result<T, MatcherError>;
