use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareQueueError {
    #[error("invalid patient identifier '{0}'")]
    InvalidPatientId(String),

    #[error("queue entry '{0}' not found")]
    EntryNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Submit(#[from] crate::confirm::SubmitError),

    #[error("{0}")]
    ConfirmationRequired(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CareQueueError>;
