use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Unexpected page structure: {0}")]
    StructuralMismatch(String),

    #[error("Timed out after {seconds}s waiting for {what}")]
    Timeout { what: String, seconds: u64 },

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Record from {found} cannot be normalized as {expected}")]
    SourceMismatch { expected: String, found: String },

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
