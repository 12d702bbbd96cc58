use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Seed file error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed identifier '{id}': expected '{prefix}' followed by digits")]
    MalformedId { prefix: &'static str, id: String },

    #[error("No worksheet configured for stream '{stream}'")]
    MissingWorksheet { stream: &'static str },

    #[error("Unknown domain '{0}' (expected retail, manufacturing or education)")]
    UnknownDomain(String),

    #[error("Vocabulary list '{field}' is empty")]
    EmptyVocabulary { field: &'static str },

    #[error("Driver already stopped")]
    DriverStopped,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
